use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;
use crate::models::domain::Preferences;

/// Request to score a company's culture against user preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CultureMatchRequest {
    #[validate(length(min = 1, message = "domain is required"))]
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub preferences: Preferences,
}

impl CultureMatchRequest {
    /// Build a request from GET query parameters
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        Self {
            domain: query.get("domain").cloned().unwrap_or_default(),
            preferences: Preferences::from_query(query),
        }
    }
}
