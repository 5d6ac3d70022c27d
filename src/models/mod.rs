// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Category, ImportanceLevel, Preferences, CompanySummary, CulturalInsights, MatchResult, ScoringPolicy};
pub use requests::CultureMatchRequest;
pub use responses::{CultureMatchResponse, HealthResponse, ErrorResponse, LevelOption, PreferenceOptionsResponse};
