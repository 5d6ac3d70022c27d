use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use crate::models::ScoringPolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub enrichment: EnrichmentSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichmentSettings {
    /// Selects alternative summary phrasings; unset means canonical phrasing
    pub seed: Option<u64>,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_llm_endpoint(),
            api_key: String::new(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl LlmSettings {
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.is_empty()
    }
}

fn default_llm_endpoint() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_llm_model() -> String { "gpt-4o-mini".to_string() }
fn default_llm_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub engine_id: String,
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_search_max_results")]
    pub max_results: u8,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_search_endpoint(),
            api_key: String::new(),
            engine_id: String::new(),
            timeout_secs: default_search_timeout(),
            max_results: default_search_max_results(),
        }
    }
}

impl SearchSettings {
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.is_empty() && !self.engine_id.is_empty()
    }
}

fn default_search_endpoint() -> String { "https://www.googleapis.com/customsearch/v1".to_string() }
fn default_search_timeout() -> u64 { 5 }
fn default_search_max_results() -> u8 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_general_bonus")]
    pub general_bonus: f64,
    #[serde(default = "default_penalty_threshold")]
    pub penalty_threshold: u8,
    #[serde(default = "default_penalty_multiplier")]
    pub penalty_multiplier: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            general_bonus: default_general_bonus(),
            penalty_threshold: default_penalty_threshold(),
            penalty_multiplier: default_penalty_multiplier(),
        }
    }
}

impl From<&ScoringSettings> for ScoringPolicy {
    fn from(settings: &ScoringSettings) -> Self {
        Self {
            general_bonus: settings.general_bonus,
            penalty_threshold: settings.penalty_threshold,
            penalty_multiplier: settings.penalty_multiplier,
        }
    }
}

fn default_general_bonus() -> f64 { 0.5 }
fn default_penalty_threshold() -> u8 { 2 }
fn default_penalty_multiplier() -> f64 { 1.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CULTURE__)
    /// 5. Well-known provider keys (OPENAI_API_KEY, GOOGLE_API_KEY, GOOGLE_CSE_ID)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CULTURE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CULTURE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_provider_keys(settings)?;

        settings.try_deserialize()
    }
}

/// Let the conventional provider environment variables fill in API credentials
fn apply_provider_keys(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(key) = env::var("OPENAI_API_KEY") {
        builder = builder.set_override("enrichment.llm.api_key", key)?;
    }
    if let Ok(key) = env::var("GOOGLE_API_KEY") {
        builder = builder.set_override("enrichment.search.api_key", key)?;
    }
    if let Ok(engine_id) = env::var("GOOGLE_CSE_ID") {
        builder = builder.set_override("enrichment.search.engine_id", engine_id)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring() {
        let policy = ScoringPolicy::from(&ScoringSettings::default());
        assert_eq!(policy, ScoringPolicy::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_enrichment_disabled_by_default() {
        let settings = Settings::default();
        assert!(!settings.enrichment.llm.is_usable());
        assert!(!settings.enrichment.search.is_usable());
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_llm_needs_key() {
        let llm = LlmSettings {
            enabled: true,
            ..LlmSettings::default()
        };
        assert!(!llm.is_usable());
    }

    #[test]
    fn test_shipped_config_parses() {
        let settings: Settings = toml::from_str(include_str!("../config/default.toml")).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.scoring.penalty_threshold, 2);
        assert_eq!(settings.enrichment.search.max_results, 5);
        assert!(!settings.enrichment.llm.enabled);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let settings: Settings = toml::from_str("[scoring]\ngeneral_bonus = 1.0\n").unwrap();

        assert_eq!(settings.scoring.general_bonus, 1.0);
        assert_eq!(settings.scoring.penalty_multiplier, 1.0);
        assert_eq!(settings.logging.level, "info");
    }
}
