use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A dimension of workplace culture the user can rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "flexibility")]
    Flexibility,
    #[serde(rename = "management")]
    Management,
    #[serde(rename = "inclusion")]
    Inclusion,
    #[serde(rename = "growth")]
    Growth,
    #[serde(rename = "workEnvironment")]
    WorkEnvironment,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Flexibility,
        Category::Management,
        Category::Inclusion,
        Category::Growth,
        Category::WorkEnvironment,
    ];

    /// Parse a category key, ignoring case and `-`/`_` separators
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized: String = key
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "flexibility" => Some(Category::Flexibility),
            "management" => Some(Category::Management),
            "inclusion" => Some(Category::Inclusion),
            "growth" => Some(Category::Growth),
            "workenvironment" => Some(Category::WorkEnvironment),
            _ => None,
        }
    }

    /// Wire name used in JSON payloads
    pub fn key(&self) -> &'static str {
        match self {
            Category::Flexibility => "flexibility",
            Category::Management => "management",
            Category::Inclusion => "inclusion",
            Category::Growth => "growth",
            Category::WorkEnvironment => "workEnvironment",
        }
    }

    /// Human-readable name used in match reasons
    pub fn label(&self) -> &'static str {
        match self {
            Category::Flexibility => "flexibility",
            Category::Management => "management style",
            Category::Inclusion => "inclusion",
            Category::Growth => "growth",
            Category::WorkEnvironment => "work environment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How much a user cares about a category, on a 0-3 ordinal scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportanceLevel {
    #[default]
    NotImportant,
    SomewhatImportant,
    Important,
    VeryImportant,
}

impl ImportanceLevel {
    pub const ALL: [ImportanceLevel; 4] = [
        ImportanceLevel::NotImportant,
        ImportanceLevel::SomewhatImportant,
        ImportanceLevel::Important,
        ImportanceLevel::VeryImportant,
    ];

    pub fn weight(&self) -> u8 {
        match self {
            ImportanceLevel::NotImportant => 0,
            ImportanceLevel::SomewhatImportant => 1,
            ImportanceLevel::Important => 2,
            ImportanceLevel::VeryImportant => 3,
        }
    }

    pub fn from_weight(weight: i64) -> Option<Self> {
        match weight {
            0 => Some(ImportanceLevel::NotImportant),
            1 => Some(ImportanceLevel::SomewhatImportant),
            2 => Some(ImportanceLevel::Important),
            3 => Some(ImportanceLevel::VeryImportant),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImportanceLevel::NotImportant => "not-important",
            ImportanceLevel::SomewhatImportant => "somewhat-important",
            ImportanceLevel::Important => "important",
            ImportanceLevel::VeryImportant => "very-important",
        }
    }

    /// Parse a label such as `very-important`, `Slightly Important` or `2`
    pub fn parse_label(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace(['_', ' '], "-");

        match normalized.as_str() {
            "not-important" | "none" | "no" => Some(ImportanceLevel::NotImportant),
            "somewhat-important" | "slightly-important" | "low" => {
                Some(ImportanceLevel::SomewhatImportant)
            }
            "important" | "medium" => Some(ImportanceLevel::Important),
            "very-important" | "high" | "critical" => Some(ImportanceLevel::VeryImportant),
            other => other.parse::<i64>().ok().and_then(Self::from_weight),
        }
    }

    /// Lenient conversion from any JSON value; malformed input is `NotImportant`
    pub fn from_value(value: &Value) -> Self {
        let parsed = match value {
            Value::String(s) => Self::parse_label(s),
            Value::Number(n) => n.as_i64().and_then(Self::from_weight),
            _ => None,
        };

        parsed.unwrap_or_else(|| {
            tracing::debug!("Treating malformed importance level {} as not-important", value);
            ImportanceLevel::NotImportant
        })
    }
}

/// User culture preferences: importance per category
///
/// Deserialization never fails. Missing, `null` or malformed input yields
/// weight 0 for the affected categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Preferences {
    #[serde(flatten)]
    levels: BTreeMap<Category, ImportanceLevel>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, category: Category, level: ImportanceLevel) -> Self {
        self.set(category, level);
        self
    }

    pub fn set(&mut self, category: Category, level: ImportanceLevel) {
        self.levels.insert(category, level);
    }

    pub fn level(&self, category: Category) -> ImportanceLevel {
        self.levels.get(&category).copied().unwrap_or_default()
    }

    pub fn weight(&self, category: Category) -> u8 {
        self.level(category).weight()
    }

    /// Sum of weights over categories the user marked as mattering
    pub fn max_possible(&self) -> u32 {
        self.levels
            .values()
            .map(|level| level.weight() as u32)
            .filter(|w| *w > 0)
            .sum()
    }

    pub fn from_value(value: &Value) -> Self {
        let mut preferences = Self::new();

        let Some(map) = value.as_object() else {
            if !value.is_null() {
                tracing::debug!("Ignoring non-object preferences: {}", value);
            }
            return preferences;
        };

        for (key, raw) in map {
            match Category::from_key(key) {
                Some(category) => preferences.set(category, ImportanceLevel::from_value(raw)),
                None => tracing::debug!("Ignoring unknown preference category: {}", key),
            }
        }

        preferences
    }

    /// Build preferences from GET query parameters
    ///
    /// Accepts a JSON-encoded `preferences` parameter, bracket keys such as
    /// `preferences[flexibility]`, and bare category keys. Bare keys override
    /// the JSON parameter and bracket keys override bare keys.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let mut preferences = match query.get("preferences") {
            Some(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(value) => Self::from_value(&value),
                Err(e) => {
                    tracing::debug!("Ignoring unparsable preferences parameter: {}", e);
                    Self::new()
                }
            },
            None => Self::new(),
        };

        // Bare keys first so bracket keys win when both name a category.
        let bare = query.iter().filter(|(key, _)| !key.starts_with("preferences["));
        let bracketed = query.iter().filter_map(|(key, raw)| {
            key.strip_prefix("preferences[")
                .and_then(|k| k.strip_suffix(']'))
                .map(|k| (k, raw))
        });

        for (key, raw) in bare.map(|(k, v)| (k.as_str(), v)).chain(bracketed) {
            if let Some(category) = Category::from_key(key) {
                let level = ImportanceLevel::parse_label(raw).unwrap_or_else(|| {
                    tracing::debug!("Treating malformed importance level {:?} as not-important", raw);
                    ImportanceLevel::NotImportant
                });
                preferences.set(category, level);
            }
        }

        preferences
    }
}

impl<'de> Deserialize<'de> for Preferences {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Descriptive summary of a company and its culture tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub summary: String,
    pub tags: Vec<String>,
}

/// Extra culture signals gathered from web search snippets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalInsights {
    pub source: String,
    pub highlights: Vec<String>,
    pub signals: Vec<String>,
    pub links: Vec<String>,
}

/// Outcome of scoring company tags against user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Percentage in 0..=100
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Tunable constants for the culture scorer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    /// Fixed bonus per general-positive tag
    pub general_bonus: f64,
    /// Minimum category weight at which a negative tag is penalized
    pub penalty_threshold: u8,
    /// Penalty is `weight * penalty_multiplier`
    pub penalty_multiplier: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            general_bonus: 0.5,
            penalty_threshold: 2,
            penalty_multiplier: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_keys_are_lenient() {
        assert_eq!(Category::from_key("workEnvironment"), Some(Category::WorkEnvironment));
        assert_eq!(Category::from_key("work-environment"), Some(Category::WorkEnvironment));
        assert_eq!(Category::from_key("WORK_ENVIRONMENT"), Some(Category::WorkEnvironment));
        assert_eq!(Category::from_key("salary"), None);
    }

    #[test]
    fn test_importance_aliases() {
        assert_eq!(
            ImportanceLevel::parse_label("slightly-important"),
            Some(ImportanceLevel::SomewhatImportant)
        );
        assert_eq!(
            ImportanceLevel::parse_label("Very Important"),
            Some(ImportanceLevel::VeryImportant)
        );
        assert_eq!(ImportanceLevel::parse_label("2"), Some(ImportanceLevel::Important));
        assert_eq!(ImportanceLevel::parse_label("7"), None);
    }

    #[test]
    fn test_malformed_preferences_are_not_important() {
        let prefs: Preferences = serde_json::from_value(json!({
            "flexibility": "extremely",
            "management": 9,
            "inclusion": ["very-important"],
            "growth": 2,
            "favouriteColour": "blue"
        }))
        .unwrap();

        assert_eq!(prefs.weight(Category::Flexibility), 0);
        assert_eq!(prefs.weight(Category::Management), 0);
        assert_eq!(prefs.weight(Category::Inclusion), 0);
        assert_eq!(prefs.weight(Category::Growth), 2);
        assert_eq!(prefs.max_possible(), 2);
    }

    #[test]
    fn test_null_preferences() {
        let prefs: Preferences = serde_json::from_value(Value::Null).unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.max_possible(), 0);
    }

    #[test]
    fn test_query_overrides_json() {
        let mut query = HashMap::new();
        query.insert(
            "preferences".to_string(),
            r#"{"flexibility":"important","inclusion":"important"}"#.to_string(),
        );
        query.insert("preferences[inclusion]".to_string(), "very-important".to_string());
        query.insert("growth".to_string(), "somewhat-important".to_string());
        query.insert("domain".to_string(), "acme.com".to_string());

        let prefs = Preferences::from_query(&query);

        assert_eq!(prefs.level(Category::Flexibility), ImportanceLevel::Important);
        assert_eq!(prefs.level(Category::Inclusion), ImportanceLevel::VeryImportant);
        assert_eq!(prefs.level(Category::Growth), ImportanceLevel::SomewhatImportant);
        assert_eq!(prefs.max_possible(), 6);
    }

    #[test]
    fn test_bracket_key_beats_bare_key() {
        // Each map gets its own hasher seed, so iteration order varies between runs.
        for _ in 0..50 {
            let query: HashMap<String, String> = [
                ("inclusion", "very-important"),
                ("preferences[inclusion]", "not-important"),
                ("preferences[growth]", "important"),
                ("growth", "very-important"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

            let prefs = Preferences::from_query(&query);

            assert_eq!(prefs.weight(Category::Inclusion), 0);
            assert_eq!(prefs.weight(Category::Growth), 2);
        }
    }

    #[test]
    fn test_preferences_serialize_with_wire_names() {
        let prefs = Preferences::new()
            .with(Category::WorkEnvironment, ImportanceLevel::Important)
            .with(Category::Flexibility, ImportanceLevel::VeryImportant);

        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(
            value,
            json!({"flexibility": "very-important", "workEnvironment": "important"})
        );
    }
}
