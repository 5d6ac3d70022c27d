// Service exports
pub mod enrichment;
pub mod llm;
pub mod search;

pub use enrichment::{Enricher, Enrichment, EnrichmentError, SummarySource};
pub use llm::{LlmClient, LlmError};
pub use search::{SearchClient, SearchError, SearchSnippet};
