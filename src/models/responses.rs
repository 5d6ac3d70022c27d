use serde::{Deserialize, Serialize};
use crate::models::domain::{Category, CompanySummary, CulturalInsights, ImportanceLevel, MatchResult};

/// Response for the culture match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CultureMatchResponse {
    pub domain: String,
    pub summary: CompanySummary,
    #[serde(rename = "culturalInsights", default, skip_serializing_if = "Option::is_none")]
    pub cultural_insights: Option<CulturalInsights>,
    #[serde(rename = "match")]
    pub match_result: MatchResult,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub llm_enabled: bool,
    pub search_enabled: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// A selectable importance level and its scoring weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelOption {
    pub label: String,
    pub weight: u8,
}

/// Choices available to a preference form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceOptionsResponse {
    pub categories: Vec<String>,
    pub levels: Vec<LevelOption>,
}

impl PreferenceOptionsResponse {
    pub fn current() -> Self {
        Self {
            categories: Category::ALL.iter().map(|c| c.key().to_string()).collect(),
            levels: ImportanceLevel::ALL
                .iter()
                .map(|level| LevelOption {
                    label: level.label().to_string(),
                    weight: level.weight(),
                })
                .collect(),
        }
    }
}
