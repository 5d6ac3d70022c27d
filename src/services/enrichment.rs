use crate::config::EnrichmentSettings;
use crate::core::{merge_tags, TagDeriver};
use crate::models::{CompanySummary, CulturalInsights};
use crate::services::llm::{LlmClient, LlmError};
use crate::services::search::{SearchClient, SearchError, SearchSnippet};
use thiserror::Error;

const MAX_HIGHLIGHTS: usize = 3;

/// Errors raised while building enrichment clients at startup
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("LLM client setup failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Search client setup failed: {0}")]
    Search(#[from] SearchError),
}

/// Which path produced a company summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    Llm,
    Static,
}

/// Everything known about a company after enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub summary: CompanySummary,
    pub insights: Option<CulturalInsights>,
    pub source: SummarySource,
}

/// Orchestrates tag derivation
///
/// The static deriver is always available. The LLM and search clients are
/// optional; any failure from them is logged and replaced with static output,
/// so `enrich` never fails.
pub struct Enricher {
    deriver: TagDeriver,
    llm: Option<LlmClient>,
    search: Option<SearchClient>,
}

impl Enricher {
    /// Static-only enricher
    pub fn new(deriver: TagDeriver) -> Self {
        Self {
            deriver,
            llm: None,
            search: None,
        }
    }

    pub fn with_llm(mut self, llm: LlmClient) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn with_search(mut self, search: SearchClient) -> Self {
        self.search = Some(search);
        self
    }

    /// Build an enricher from settings, enabling only usable external clients
    pub fn from_settings(settings: &EnrichmentSettings) -> Result<Self, EnrichmentError> {
        let mut enricher = Self::new(TagDeriver::new(settings.seed));

        if settings.llm.is_usable() {
            enricher = enricher.with_llm(LlmClient::new(&settings.llm)?);
        } else if settings.llm.enabled {
            tracing::warn!("LLM enrichment enabled but no API key configured, using static analysis");
        }

        if settings.search.is_usable() {
            enricher = enricher.with_search(SearchClient::new(&settings.search)?);
        } else if settings.search.enabled {
            tracing::warn!("Search enrichment enabled but API key or engine id missing, skipping insights");
        }

        Ok(enricher)
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    pub fn search_enabled(&self) -> bool {
        self.search.is_some()
    }

    /// Derive a summary, tags and optional insights for a cleaned domain
    pub async fn enrich(&self, domain: &str) -> Enrichment {
        let (mut summary, source) = match &self.llm {
            Some(llm) => match llm.summarize_company(domain).await {
                Ok(summary) => (summary, SummarySource::Llm),
                Err(e) => {
                    tracing::warn!("LLM enrichment failed for {}, using static analysis: {}", domain, e);
                    (self.deriver.derive(domain), SummarySource::Static)
                }
            },
            None => (self.deriver.derive(domain), SummarySource::Static),
        };

        if summary.summary.is_empty() {
            summary.summary = self.deriver.derive(domain).summary;
        }

        let insights = match &self.search {
            Some(search) => match search.culture_snippets(domain).await {
                Ok(snippets) if !snippets.is_empty() => Some(self.insights_from(&snippets)),
                Ok(_) => {
                    tracing::debug!("No culture snippets found for {}", domain);
                    None
                }
                Err(e) => {
                    tracing::warn!("Search enrichment failed for {}, skipping insights: {}", domain, e);
                    None
                }
            },
            None => None,
        };

        if let Some(insights) = &insights {
            merge_tags(&mut summary.tags, &insights.signals);
        }

        tracing::debug!(
            "Enriched {} via {:?} ({} tags, insights: {})",
            domain,
            source,
            summary.tags.len(),
            insights.is_some()
        );

        Enrichment {
            summary,
            insights,
            source,
        }
    }

    fn insights_from(&self, snippets: &[SearchSnippet]) -> CulturalInsights {
        let mut signals = Vec::new();
        for snippet in snippets {
            let text = format!("{} {}", snippet.title, snippet.snippet);
            merge_tags(&mut signals, &self.deriver.tags_from_text(&text));
        }

        let source = if snippets.iter().any(|s| s.link.contains("glassdoor.")) {
            "glassdoor"
        } else {
            "web-search"
        };

        CulturalInsights {
            source: source.to_string(),
            highlights: snippets
                .iter()
                .take(MAX_HIGHLIGHTS)
                .map(|s| s.snippet.trim().to_string())
                .collect(),
            signals,
            links: snippets
                .iter()
                .filter(|s| !s.link.is_empty())
                .map(|s| s.link.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_enrichment_is_deterministic() {
        let enricher = Enricher::new(TagDeriver::default());

        let first = tokio_test::block_on(enricher.enrich("openteam.io"));
        let second = tokio_test::block_on(enricher.enrich("openteam.io"));

        assert_eq!(first, second);
        assert_eq!(first.source, SummarySource::Static);
        assert!(first.insights.is_none());
    }

    #[test]
    fn test_insights_from_snippets() {
        let enricher = Enricher::new(TagDeriver::default());
        let snippets = vec![
            SearchSnippet {
                title: "Acme Reviews | Glassdoor".to_string(),
                snippet: "Great work-life balance but some micromanagement.".to_string(),
                link: "https://www.glassdoor.com/Reviews/acme".to_string(),
            },
            SearchSnippet {
                title: "Acme | LinkedIn".to_string(),
                snippet: "A diverse team of builders.".to_string(),
                link: String::new(),
            },
        ];

        let insights = enricher.insights_from(&snippets);

        assert_eq!(insights.source, "glassdoor");
        assert_eq!(insights.highlights.len(), 2);
        assert_eq!(insights.links.len(), 1);
        assert!(insights.signals.contains(&"work-life-balance".to_string()));
        assert!(insights.signals.contains(&"micro-managed".to_string()));
        assert!(insights.signals.contains(&"diverse".to_string()));
    }

    #[test]
    fn test_from_settings_skips_unusable_clients() {
        let mut settings = EnrichmentSettings::default();
        settings.llm.enabled = true;
        settings.search.enabled = true;

        let enricher = Enricher::from_settings(&settings).unwrap();

        assert!(!enricher.llm_enabled());
        assert!(!enricher.search_enabled());
    }
}
