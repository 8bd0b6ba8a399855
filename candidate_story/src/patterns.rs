//! Keyword tables and the matching engine shared by the experience, issue and
//! geography passes.

use regex::Regex;

use crate::config::StoryErrors;

/// Experience categories, in the order in which they are processed.
pub const EXPERIENCE_KEYWORDS: &[(&str, &[&str])] = &[
    ("legal", &["prosecutor", "lawyer", "attorney"]),
    (
        "entrepreneurial",
        &["co-found", "ceo", "chair", "founder", "vp", "chairman", "director"],
    ),
    (
        "political",
        &[
            "mayor",
            "city",
            "legislature",
            "house",
            "representative",
            "senate",
            "senator",
            "congress",
            "governor",
            "secretary",
        ],
    ),
    ("military", &["navy", "army", "marine"]),
];

/// Issue categories, in the order in which they claim headings.
pub const ISSUE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "education",
        &["college", "education", "debt", "pre-k", "teacher"],
    ),
    (
        "environment",
        &[
            "climate",
            "carbon",
            "renewable",
            "energy",
            "green new deal",
            "public lands",
        ],
    ),
    (
        "economy",
        &[
            "capitalism",
            "economy",
            "jobs",
            "tax",
            "minimum wage",
            "income",
            "credit",
            "bonds",
            "social security",
        ],
    ),
    ("gun_control", &["gun"]),
    ("health_care", &["health care", "medicare"]),
    ("immigration", &["immigration"]),
    ("abortion", &["abortion"]),
    ("justice", &["criminal", "death penalty"]),
    ("drugs", &["marijuana", "drug", "opioid"]),
    (
        "technology",
        &["automation", "big tech", "social media", "data"],
    ),
    ("social_issues", &["sexual", "sex", "discrimination"]),
];

/// "college" is an education keyword, except in this phrase.
pub const COLLEGE_PATTERN: &str = "college";
pub const COLLEGE_EXEMPTION: &str = "electoral college";

/// One regular expression of a category, with the fragments it must never claim.
#[derive(Debug, Clone)]
pub struct CategoryPattern {
    pub source: String,
    regex: Regex,
    exemptions: Vec<String>,
}

impl CategoryPattern {
    pub fn new(source: &str) -> Result<CategoryPattern, StoryErrors> {
        let regex =
            Regex::new(source).map_err(|_| StoryErrors::InvalidPattern(source.to_string()))?;
        Ok(CategoryPattern {
            source: source.to_string(),
            regex,
            exemptions: Vec::new(),
        })
    }

    /// The pattern will not match this exact fragment.
    pub fn exempt(mut self, fragment: &str) -> CategoryPattern {
        self.exemptions.push(fragment.to_string());
        self
    }

    pub fn is_match(&self, fragment: &str) -> bool {
        !self.exemptions.iter().any(|e| e == fragment) && self.regex.is_match(fragment)
    }
}

/// A named category and its patterns. A fragment belongs to the category when any of
/// the patterns matches.
#[derive(Debug, Clone)]
pub struct CategoryPatternSet {
    pub name: String,
    pub patterns: Vec<CategoryPattern>,
    pub image: Option<String>,
}

impl CategoryPatternSet {
    pub fn new(name: &str, sources: &[&str]) -> Result<CategoryPatternSet, StoryErrors> {
        let patterns = sources
            .iter()
            .map(|s| CategoryPattern::new(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CategoryPatternSet {
            name: name.to_string(),
            patterns,
            image: None,
        })
    }

    pub fn with_image(mut self, image: &str) -> CategoryPatternSet {
        self.image = Some(image.to_string());
        self
    }

    pub fn matches(&self, fragment: &str) -> bool {
        matches(fragment, self)
    }
}

/// Tests a fragment against every pattern of a set.
///
/// Case folding is the responsibility of the caller.
pub fn matches(fragment: &str, set: &CategoryPatternSet) -> bool {
    set.patterns.iter().any(|p| p.is_match(fragment))
}

pub fn experience_categories() -> Result<Vec<CategoryPatternSet>, StoryErrors> {
    EXPERIENCE_KEYWORDS
        .iter()
        .map(|(name, keywords)| {
            Ok(CategoryPatternSet::new(name, keywords)?
                .with_image(&format!("experience/{}.png", name)))
        })
        .collect()
}

pub fn issue_categories() -> Result<Vec<CategoryPatternSet>, StoryErrors> {
    let mut res: Vec<CategoryPatternSet> = Vec::new();
    for (name, keywords) in ISSUE_KEYWORDS.iter() {
        let mut set =
            CategoryPatternSet::new(name, keywords)?.with_image(&format!("issues/{}.png", name));
        set.patterns = set
            .patterns
            .into_iter()
            .map(|p| {
                if p.source == COLLEGE_PATTERN {
                    p.exempt(COLLEGE_EXEMPTION)
                } else {
                    p
                }
            })
            .collect();
        res.push(set);
    }
    Ok(res)
}
