use crate::config::LlmSettings;
use crate::core::normalize_tag;
use crate::models::CompanySummary;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const SYSTEM_PROMPT: &str = "You describe company workplace culture. Reply with a single JSON object \
{\"summary\": string, \"tags\": [string]} and nothing else. Tags are short lowercase kebab-case labels \
such as remote-friendly, flexible-hours, flat-structure, micro-managed, top-down, diverse, racial-bias, \
mentorship, career-growth, collaborative, work-life-balance, burnout, integrity, teamwork.";

/// Errors that can occur when calling the text-completion API
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse model output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Shape the model is asked to produce
#[derive(Debug, Deserialize)]
struct SummaryPayload {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// OpenAI-compatible chat-completion client used to summarize company culture
pub struct LlmClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: Client,
}

impl LlmClient {
    /// Create a new client with the configured request timeout
    pub fn new(settings: &LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            client,
        })
    }

    /// Ask the model for a culture summary and tags for a domain
    pub async fn summarize_company(&self, domain: &str) -> Result<CompanySummary, LlmError> {
        let prompt = format!(
            "Company domain: {}\nSummarize the workplace culture of this company in two or three \
             sentences and list up to eight culture tags.",
            domain
        );

        let request = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: &prompt },
            ],
        };

        tracing::debug!("Requesting LLM culture summary for {}", domain);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(LlmError::Api { status, message });
        }

        let chat: ChatResponse = response.json().await?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        parse_summary(&content)
    }
}

/// Parse the JSON object embedded in model output, tolerating prose or code fences
fn parse_summary(content: &str) -> Result<CompanySummary, LlmError> {
    let json = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    };

    let payload: SummaryPayload = serde_json::from_str(json)?;

    let mut tags: Vec<String> = Vec::new();
    for tag in payload.tags.iter().map(|t| normalize_tag(t)) {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    if tags.is_empty() {
        return Err(LlmError::EmptyContent);
    }

    Ok(CompanySummary {
        summary: payload.summary.trim().to_string(),
        tags,
    })
}
