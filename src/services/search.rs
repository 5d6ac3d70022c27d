use crate::config::SearchSettings;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when querying the web-search API
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned error status: {0}")]
    Api(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// A single search hit
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchSnippet>,
}

/// Google Custom Search client that looks up employee-review snippets
pub struct SearchClient {
    endpoint: String,
    api_key: String,
    engine_id: String,
    max_results: u8,
    client: Client,
}

impl SearchClient {
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            engine_id: settings.engine_id.clone(),
            // The API caps `num` at 10
            max_results: settings.max_results.clamp(1, 10),
            client,
        })
    }

    /// Search Glassdoor and LinkedIn for culture snippets about a domain
    pub async fn culture_snippets(&self, domain: &str) -> Result<Vec<SearchSnippet>, SearchError> {
        let url = self.build_url(domain);

        tracing::debug!("Searching culture snippets for {}", domain);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SearchError::Api(response.status().as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        let snippets: Vec<SearchSnippet> = body
            .items
            .into_iter()
            .filter(|item| !item.snippet.trim().is_empty())
            .take(self.max_results as usize)
            .collect();

        tracing::debug!("Found {} culture snippets for {}", snippets.len(), domain);

        Ok(snippets)
    }

    fn build_url(&self, domain: &str) -> String {
        let query = format!(
            "{} company culture reviews (site:glassdoor.com OR site:linkedin.com)",
            domain
        );

        format!(
            "{}?key={}&cx={}&num={}&q={}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.engine_id),
            self.max_results,
            urlencoding::encode(&query)
        )
    }
}
