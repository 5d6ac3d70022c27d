use std::collections::HashSet;
use crate::core::taxonomy::{classify, normalize_tag, TagKind};
use crate::models::{MatchResult, Preferences, ScoringPolicy};

const NO_MATCH_REASON: &str = "No specific culture signals matched your priorities";
const GENERAL_MATCH_REASON: &str = "The company's general culture signals partly align with your priorities";

/// Score company culture tags against user preferences
///
/// Scoring formula:
/// ```text
/// score = Σ weight(C) for positive tags in category C
///       + general_bonus for general-positive tags
///       - weight(C) * penalty_multiplier for negative tags when weight(C) >= threshold
/// percentage = round(100 * max(score, 0) / Σ weights), clamped to 0..=100
/// ```
pub fn calculate_match(
    tags: &[String],
    preferences: &Preferences,
    policy: &ScoringPolicy,
) -> MatchResult {
    let max_possible = preferences.max_possible() as f64;

    let mut score: f64 = 0.0;
    let mut reasons = Vec::new();
    let mut seen = HashSet::new();

    for raw in tags {
        let tag = normalize_tag(raw);
        if !seen.insert(tag.clone()) {
            continue;
        }

        let Some(rule) = classify(&tag) else {
            continue;
        };

        match rule.kind {
            TagKind::Positive(category) => {
                let weight = preferences.weight(category);
                if weight > 0 {
                    score += weight as f64;
                    reasons.push(format!(
                        "{}: a good fit for your {} preference",
                        rule.phrase,
                        category.label()
                    ));
                }
            }
            TagKind::General => {
                if max_possible > 0.0 {
                    score += policy.general_bonus;
                    reasons.push(rule.phrase.to_string());
                }
            }
            TagKind::Negative(category) => {
                let weight = preferences.weight(category);
                if weight >= policy.penalty_threshold && weight > 0 {
                    score -= weight as f64 * policy.penalty_multiplier;
                    reasons.push(format!(
                        "{}: a concern for your {} priority",
                        rule.phrase,
                        category.label()
                    ));
                } else {
                    reasons.push(format!(
                        "Note: {} (not counted, {} is not a high priority for you)",
                        rule.phrase.to_lowercase(),
                        category.label()
                    ));
                }
            }
        }
    }

    let score = score.max(0.0);

    let percentage = if max_possible > 0.0 {
        (100.0 * score / max_possible).round()
    } else {
        0.0
    };
    let percentage = percentage.clamp(0.0, 100.0) as u8;

    if reasons.is_empty() {
        let fallback = if percentage == 0 { NO_MATCH_REASON } else { GENERAL_MATCH_REASON };
        reasons.push(fallback.to_string());
    }

    MatchResult {
        score: percentage,
        reasons,
    }
}

/// Culture scorer configured with a scoring policy
#[derive(Debug, Clone, Copy)]
pub struct CultureScorer {
    policy: ScoringPolicy,
}

impl CultureScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn with_default_policy() -> Self {
        Self {
            policy: ScoringPolicy::default(),
        }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn score(&self, tags: &[String], preferences: &Preferences) -> MatchResult {
        calculate_match(tags, preferences, &self.policy)
    }
}

impl Default for CultureScorer {
    fn default() -> Self {
        Self::with_default_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ImportanceLevel};

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn flexibility_first() -> Preferences {
        Preferences::new()
            .with(Category::Flexibility, ImportanceLevel::VeryImportant)
            .with(Category::Management, ImportanceLevel::NotImportant)
            .with(Category::Inclusion, ImportanceLevel::NotImportant)
    }

    #[test]
    fn test_remote_friendly_full_match() {
        let result = CultureScorer::default().score(&tags(&["remote-friendly"]), &flexibility_first());

        assert_eq!(result.score, 100);
        assert!(result.reasons.iter().any(|r| r.contains("flexibility")));
    }

    #[test]
    fn test_no_priorities_scores_zero() {
        let result = CultureScorer::default().score(
            &tags(&["remote-friendly", "integrity", "diverse"]),
            &Preferences::default(),
        );

        assert_eq!(result.score, 0);
        assert_eq!(result.reasons, vec![NO_MATCH_REASON.to_string()]);
    }

    #[test]
    fn test_penalty_applies_above_threshold() {
        let prefs = flexibility_first().with(Category::Inclusion, ImportanceLevel::VeryImportant);

        let clean = CultureScorer::default().score(&tags(&["remote-friendly"]), &prefs);
        let biased = CultureScorer::default().score(&tags(&["remote-friendly", "racial-bias"]), &prefs);

        assert_eq!(clean.score, 50);
        assert_eq!(biased.score, 0);
        assert!(biased.reasons.iter().any(|r| r.contains("racial bias")));
    }

    #[test]
    fn test_negative_below_threshold_is_informational() {
        let prefs = flexibility_first().with(Category::Management, ImportanceLevel::SomewhatImportant);

        let result = CultureScorer::default().score(&tags(&["remote-friendly", "micro-managed"]), &prefs);

        // 3 / (3 + 1)
        assert_eq!(result.score, 75);
        assert!(result.reasons.iter().any(|r| r.starts_with("Note: reports of micromanagement")));
    }

    #[test]
    fn test_general_bonus() {
        let prefs = Preferences::new().with(Category::Growth, ImportanceLevel::Important);

        let result = CultureScorer::default().score(&tags(&["integrity"]), &prefs);

        // 0.5 / 2
        assert_eq!(result.score, 25);
        assert_eq!(result.reasons, vec!["Known for integrity".to_string()]);
    }

    #[test]
    fn test_duplicates_count_once() {
        let prefs = Preferences::new()
            .with(Category::Flexibility, ImportanceLevel::Important)
            .with(Category::Inclusion, ImportanceLevel::Important);

        let once = CultureScorer::default().score(&tags(&["hybrid"]), &prefs);
        let twice = CultureScorer::default().score(&tags(&["hybrid", "Hybrid", " hybrid "]), &prefs);

        assert_eq!(once, twice);
        assert_eq!(twice.score, 50);
    }

    #[test]
    fn test_score_is_clamped() {
        let prefs = Preferences::new().with(Category::Flexibility, ImportanceLevel::SomewhatImportant);

        let result = CultureScorer::default().score(
            &tags(&["remote-friendly", "flexible-hours", "hybrid", "teamwork"]),
            &prefs,
        );

        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_custom_policy() {
        let policy = ScoringPolicy {
            general_bonus: 1.0,
            penalty_threshold: 1,
            penalty_multiplier: 0.5,
        };
        let prefs = Preferences::new()
            .with(Category::Flexibility, ImportanceLevel::VeryImportant)
            .with(Category::Management, ImportanceLevel::SomewhatImportant);

        let result = CultureScorer::new(policy).score(&tags(&["remote-friendly", "top-down", "teamwork"]), &prefs);

        // (3 + 1 - 0.5) / 4
        assert_eq!(result.score, 88);
    }
}
