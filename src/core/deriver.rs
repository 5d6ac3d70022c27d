use crate::core::domain_name::{display_name, labels};
use crate::models::CompanySummary;

/// How a rule recognizes a keyword
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Substring anywhere in the text
    Contains(&'static str),
    /// Whole word, for tokens too short to match as substrings
    Word(&'static str),
}

#[derive(Debug)]
struct IndustryRule {
    industry: &'static str,
    patterns: &'static [Pattern],
    tags: &'static [&'static str],
}

#[derive(Debug)]
struct CultureRule {
    patterns: &'static [Pattern],
    tags: &'static [&'static str],
    /// Alternative phrasings; the first is used when no seed is set
    sentences: &'static [&'static str],
}

use Pattern::{Contains, Word};

// First match wins.
const INDUSTRY_RULES: &[IndustryRule] = &[
    IndustryRule {
        industry: "technology",
        patterns: &[Contains("tech"), Contains("soft"), Contains("data"), Contains("cloud"), Contains("code"), Contains("dev"), Word("ai")],
        tags: &["innovative", "fast-paced"],
    },
    IndustryRule {
        industry: "media",
        patterns: &[Contains("media"), Contains("news"), Contains("studio"), Contains("press")],
        tags: &["creative", "deadline-driven"],
    },
    IndustryRule {
        industry: "healthcare",
        patterns: &[Contains("health"), Contains("medic"), Word("med"), Contains("clinic"), Contains("pharma"), Contains("bio")],
        tags: &["mission-driven", "high-pressure"],
    },
    IndustryRule {
        industry: "finance",
        patterns: &[Contains("bank"), Contains("financ"), Contains("capital"), Contains("invest"), Contains("pay"), Contains("fund"), Contains("insur")],
        tags: &["hierarchical", "high-pressure"],
    },
    IndustryRule {
        industry: "education",
        patterns: &[Contains("edu"), Contains("school"), Contains("academy"), Contains("univ")],
        tags: &["mission-driven", "mentorship"],
    },
    IndustryRule {
        industry: "retail",
        patterns: &[Contains("shop"), Contains("store"), Contains("retail"), Contains("mart"), Contains("market")],
        tags: &["customer-focused", "rigid-hours"],
    },
    IndustryRule {
        industry: "consulting",
        patterns: &[Contains("consult"), Contains("advisory"), Contains("partners")],
        tags: &["long-hours", "career-growth"],
    },
    IndustryRule {
        industry: "energy",
        patterns: &[Contains("energy"), Contains("solar"), Contains("green"), Contains("power")],
        tags: &["mission-driven", "innovative"],
    },
    IndustryRule {
        industry: "public",
        patterns: &[Word("gov")],
        tags: &["work-life-balance", "hierarchical"],
    },
    IndustryRule {
        industry: "non-profit",
        patterns: &[Word("org")],
        tags: &["mission-driven", "work-life-balance"],
    },
];

const INDUSTRY_SENTENCES: &[&str] = &[
    "{name} appears to work in the {industry} sector.",
    "{name} looks like it operates in the {industry} space.",
    "{name} seems to be part of the {industry} industry.",
];

const NO_INDUSTRY_SENTENCES: &[&str] = &[
    "{name} gives a few hints about its culture.",
    "The name {name} offers some clues about how it works.",
];

const LIMITED_SIGNAL_SENTENCES: &[&str] = &[
    "{name} has limited public culture signals, so no specific traits could be inferred.",
    "Not much is known publicly about how {name} works.",
];

const CULTURE_RULES: &[CultureRule] = &[
    CultureRule {
        patterns: &[Contains("remote"), Contains("distributed")],
        tags: &["remote-friendly", "async-first"],
        sentences: &[
            "It likely supports remote work across distributed teams.",
            "Remote and asynchronous work seem to be part of its DNA.",
        ],
    },
    CultureRule {
        patterns: &[Contains("flex")],
        tags: &["flexible-hours"],
        sentences: &[
            "Flexible schedules appear to be valued.",
            "Working hours are probably flexible.",
        ],
    },
    CultureRule {
        patterns: &[Contains("team"), Contains("collective"), Contains("crew")],
        tags: &["teamwork", "collaborative"],
        sentences: &[
            "Collaboration and teamwork are emphasized.",
            "It presents itself as a team-oriented workplace.",
        ],
    },
    CultureRule {
        patterns: &[Contains("divers"), Contains("inclus"), Contains("equity")],
        tags: &["diverse", "inclusive"],
        sentences: &[
            "Diversity and inclusion are part of its identity.",
            "It signals a commitment to an inclusive workforce.",
        ],
    },
    CultureRule {
        patterns: &[Contains("open")],
        tags: &["transparency", "transparent-leadership"],
        sentences: &[
            "Openness and transparency are highlighted.",
            "Leadership is likely to communicate openly.",
        ],
    },
    CultureRule {
        patterns: &[Contains("labs"), Contains("ventures"), Contains("startup"), Contains("hq")],
        tags: &["flat-structure", "autonomous-teams", "fast-paced"],
        sentences: &[
            "Its startup-style naming suggests a flat, fast-moving organization.",
            "Expect small autonomous teams and few layers of management.",
        ],
    },
    CultureRule {
        patterns: &[Contains("corp"), Contains("group"), Contains("holdings"), Contains("global")],
        tags: &["hierarchical", "top-down"],
        sentences: &[
            "As a large corporate group it may be more hierarchical.",
            "Decision making in a group this size tends to be top-down.",
        ],
    },
    CultureRule {
        patterns: &[Contains("trust"), Contains("honest")],
        tags: &["integrity"],
        sentences: &[
            "Trust and integrity feature in its brand.",
            "It puts honesty front and center.",
        ],
    },
    CultureRule {
        patterns: &[Contains("learn"), Contains("mentor")],
        tags: &["learning-budget", "mentorship"],
        sentences: &[
            "Learning and mentorship seem to be encouraged.",
            "There are probably good opportunities to keep learning.",
        ],
    },
    CultureRule {
        patterns: &[Contains("wellness"), Contains("wellbeing"), Word("care")],
        tags: &["wellness"],
        sentences: &[
            "Employee wellbeing looks like a priority.",
            "It appears to care about staff wellness.",
        ],
    },
];

/// Review phrases that only make sense in free text such as search snippets
const REVIEW_RULES: &[(&[Pattern], &[&str])] = &[
    (&[Contains("micromanag"), Contains("micro-manag")], &["micro-managed"]),
    (&[Contains("toxic")], &["toxic"]),
    (&[Contains("burnout"), Contains("burn out"), Contains("burned out")], &["burnout"]),
    (&[Contains("work-life balance"), Contains("work life balance")], &["work-life-balance"]),
    (&[Contains("discriminat")], &["discrimination"]),
    (&[Contains("racis"), Contains("racial bias")], &["racial-bias"]),
    (&[Contains("sexis"), Contains("gender bias")], &["gender-bias"]),
    (&[Contains("long hours"), Contains("overtime")], &["long-hours"]),
    (&[Contains("turnover")], &["high-turnover"]),
    (&[Contains("career growth"), Contains("promotion")], &["career-growth"]),
    (&[Contains("no growth"), Contains("limited growth"), Contains("dead end")], &["limited-growth"]),
    (&[Contains("supportive manag"), Contains("great manag")], &["supportive-management"]),
    (&[Contains("hierarch")], &["hierarchical"]),
    (&[Contains("pressure")], &["high-pressure"]),
    (&[Contains("collaborat")], &["collaborative"]),
    (&[Contains("hybrid")], &["hybrid"]),
];

/// Text prepared for pattern matching
struct Haystack<'a> {
    text: &'a str,
    words: Vec<&'a str>,
}

impl<'a> Haystack<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            words: labels(text).collect(),
        }
    }

    fn matches(&self, patterns: &[Pattern]) -> bool {
        patterns.iter().any(|pattern| match pattern {
            Contains(needle) => self.text.contains(*needle),
            Word(word) => self.words.iter().any(|w| w == word),
        })
    }
}

/// Static, deterministic tag deriver
///
/// Output is a pure function of the domain and the optional seed. The seed
/// only chooses between alternative sentence phrasings; tags never depend on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagDeriver {
    seed: Option<u64>,
}

impl TagDeriver {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// Derive a summary and culture tags from a cleaned domain
    pub fn derive(&self, domain: &str) -> CompanySummary {
        let domain = domain.to_lowercase();
        let haystack = Haystack::new(&domain);
        let name = display_name(&domain);

        let mut tags = TagSet::default();
        let mut sentences = Vec::new();

        for (slot, rule) in CULTURE_RULES.iter().enumerate() {
            if haystack.matches(rule.patterns) {
                tags.extend(rule.tags.iter());
                sentences.push(self.pick(&domain, slot + 1, rule.sentences).to_string());
            }
        }

        let industry = INDUSTRY_RULES.iter().find(|rule| haystack.matches(rule.patterns));

        let opening = match industry {
            Some(rule) => self
                .pick(&domain, 0, INDUSTRY_SENTENCES)
                .replace("{industry}", rule.industry),
            None if sentences.is_empty() => self.pick(&domain, 0, LIMITED_SIGNAL_SENTENCES).to_string(),
            None => self.pick(&domain, 0, NO_INDUSTRY_SENTENCES).to_string(),
        };
        sentences.insert(0, opening.replace("{name}", &name));

        // Industry tags go first so they lead the tag list.
        let mut ordered = TagSet::default();
        if let Some(rule) = industry {
            ordered.extend(rule.tags.iter());
        }
        ordered.extend(tags.0.iter());

        tracing::debug!(
            "Derived {} tags for {} (industry: {:?})",
            ordered.0.len(),
            domain,
            industry.map(|r| r.industry)
        );

        CompanySummary {
            summary: sentences.join(" "),
            tags: ordered.0,
        }
    }

    /// Extract culture tags from free text such as review snippets
    pub fn tags_from_text(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let haystack = Haystack::new(&lowered);
        let mut tags = TagSet::default();

        for rule in CULTURE_RULES {
            if haystack.matches(rule.patterns) {
                tags.extend(rule.tags.iter());
            }
        }
        for (patterns, rule_tags) in REVIEW_RULES {
            if haystack.matches(patterns) {
                tags.extend(rule_tags.iter());
            }
        }

        tags.0
    }

    fn pick(&self, domain: &str, slot: usize, variants: &'static [&'static str]) -> &'static str {
        match self.seed {
            Some(seed) if variants.len() > 1 => {
                let index = stable_hash(domain, seed, slot) % variants.len() as u64;
                variants[index as usize]
            }
            _ => variants[0],
        }
    }
}

/// FNV-1a over (domain, seed, slot); stable across runs and platforms
fn stable_hash(domain: &str, seed: u64, slot: usize) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;

    domain
        .bytes()
        .chain(seed.to_le_bytes())
        .chain((slot as u64).to_le_bytes())
        .fold(OFFSET, |hash, byte| (hash ^ byte as u64).wrapping_mul(PRIME))
}

/// Insertion-ordered tag list without duplicates
#[derive(Default)]
struct TagSet(Vec<String>);

impl TagSet {
    fn extend<T: AsRef<str>>(&mut self, tags: impl IntoIterator<Item = T>) {
        for tag in tags {
            let tag = tag.as_ref();
            if !self.0.iter().any(|t| t == tag) {
                self.0.push(tag.to_string());
            }
        }
    }
}

/// Append `extra` tags to `tags`, skipping ones already present
pub fn merge_tags(tags: &mut Vec<String>, extra: &[String]) {
    for tag in extra {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
}
