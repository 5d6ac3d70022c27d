use crate::models::Category;

/// How a known tag affects scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Adds the category weight when the user cares about the category
    Positive(Category),
    /// Penalized when the user cares enough about the category
    Negative(Category),
    /// Small fixed bonus regardless of category
    General,
}

/// A known tag with the phrase used in match reasons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRule {
    pub tag: &'static str,
    pub kind: TagKind,
    pub phrase: &'static str,
}

const fn positive(tag: &'static str, category: Category, phrase: &'static str) -> TagRule {
    TagRule { tag, kind: TagKind::Positive(category), phrase }
}

const fn negative(tag: &'static str, category: Category, phrase: &'static str) -> TagRule {
    TagRule { tag, kind: TagKind::Negative(category), phrase }
}

const fn general(tag: &'static str, phrase: &'static str) -> TagRule {
    TagRule { tag, kind: TagKind::General, phrase }
}

pub const TAG_RULES: &[TagRule] = &[
    // Flexibility
    positive("remote-friendly", Category::Flexibility, "Remote-friendly work arrangements"),
    positive("flexible-hours", Category::Flexibility, "Flexible working hours"),
    positive("hybrid", Category::Flexibility, "A hybrid office model"),
    positive("async-first", Category::Flexibility, "Asynchronous, async-first collaboration"),
    positive("four-day-week", Category::Flexibility, "A four-day work week"),
    negative("office-only", Category::Flexibility, "An office-only attendance policy"),
    negative("rigid-hours", Category::Flexibility, "Rigid working hours"),
    negative("long-hours", Category::Flexibility, "A reputation for long hours"),
    // Management
    positive("flat-structure", Category::Management, "A flat organizational structure"),
    positive("autonomous-teams", Category::Management, "Autonomous, self-directed teams"),
    positive("transparent-leadership", Category::Management, "Transparent leadership"),
    positive("supportive-management", Category::Management, "Supportive managers"),
    negative("micro-managed", Category::Management, "Reports of micromanagement"),
    negative("top-down", Category::Management, "Top-down decision making"),
    negative("hierarchical", Category::Management, "A strongly hierarchical structure"),
    // Inclusion
    positive("diverse", Category::Inclusion, "A diverse workforce"),
    positive("inclusive", Category::Inclusion, "Inclusive hiring and team practices"),
    positive("equal-pay", Category::Inclusion, "Commitment to pay equity"),
    positive("accessibility", Category::Inclusion, "Investment in accessibility"),
    negative("racial-bias", Category::Inclusion, "Reports of racial bias"),
    negative("gender-bias", Category::Inclusion, "Reports of gender bias"),
    negative("discrimination", Category::Inclusion, "Discrimination complaints"),
    negative("lack-of-diversity", Category::Inclusion, "A lack of diversity"),
    // Growth
    positive("mentorship", Category::Growth, "Mentorship programs"),
    positive("learning-budget", Category::Growth, "A learning and training budget"),
    positive("career-growth", Category::Growth, "Clear career progression"),
    positive("innovative", Category::Growth, "Room to work on innovative projects"),
    negative("limited-growth", Category::Growth, "Limited advancement opportunities"),
    negative("stagnant", Category::Growth, "A stagnant environment"),
    // Work environment
    positive("collaborative", Category::WorkEnvironment, "A collaborative atmosphere"),
    positive("work-life-balance", Category::WorkEnvironment, "Healthy work-life balance"),
    positive("wellness", Category::WorkEnvironment, "Employee wellness support"),
    positive("mission-driven", Category::WorkEnvironment, "A mission-driven culture"),
    negative("high-pressure", Category::WorkEnvironment, "A high-pressure environment"),
    negative("toxic", Category::WorkEnvironment, "Reports of a toxic culture"),
    negative("burnout", Category::WorkEnvironment, "Reports of burnout"),
    negative("high-turnover", Category::WorkEnvironment, "High staff turnover"),
    // General positives
    general("integrity", "Known for integrity"),
    general("teamwork", "Strong emphasis on teamwork"),
    general("transparency", "Values transparency"),
    general("customer-focused", "A customer-focused culture"),
];

/// Canonical form of a tag: trimmed, lowercase, kebab-case
pub fn normalize_tag(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Look up a normalized tag; unknown tags return `None`
pub fn classify(tag: &str) -> Option<&'static TagRule> {
    TAG_RULES.iter().find(|rule| rule.tag == tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tags_are_unique_and_canonical() {
        let mut seen = HashSet::new();
        for rule in TAG_RULES {
            assert!(seen.insert(rule.tag), "duplicate tag {}", rule.tag);
            assert_eq!(normalize_tag(rule.tag), rule.tag);
        }
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("  Remote Friendly "), "remote-friendly");
        assert_eq!(normalize_tag("work_life__balance"), "work-life-balance");
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            classify("racial-bias").map(|r| r.kind),
            Some(TagKind::Negative(Category::Inclusion))
        );
        assert_eq!(classify("teamwork").map(|r| r.kind), Some(TagKind::General));
        assert!(classify("fast-paced").is_none());
    }
}
