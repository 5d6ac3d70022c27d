//! Culture Match - company culture matching service
//!
//! Derives culture tags for a company domain and scores them against a
//! user's workplace preferences.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match, clean_domain, CultureScorer, TagDeriver};
pub use crate::models::{Category, ImportanceLevel, Preferences, MatchResult, ScoringPolicy, CultureMatchRequest, CultureMatchResponse};
pub use crate::services::Enricher;
