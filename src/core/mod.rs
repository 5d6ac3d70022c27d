// Core algorithm exports
pub mod deriver;
pub mod domain_name;
pub mod scorer;
pub mod taxonomy;

pub use deriver::{merge_tags, TagDeriver};
pub use domain_name::{clean_domain, display_name, DomainError};
pub use scorer::{calculate_match, CultureScorer};
pub use taxonomy::{classify, normalize_tag, TagKind, TagRule};
