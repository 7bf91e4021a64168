// src/classify.rs
//! Keyword heuristics that label news items.
//!
//! Matching is plain case-insensitive substring search over `title + " " + description`.
//! The category table is an ordered cascade: the first group with any hit wins.
//! Short tokens such as `opt` or `ice` also hit inside longer words; that is
//! how the heuristic has always behaved and callers rely on its determinism, not its precision.

use crate::ingest::types::Category;

/// Ordered cascade. Earlier rows take precedence.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::WorkVisa,
        &[
            "h1b",
            "h-1b",
            "work visa",
            "employment visa",
            "work permit",
            "h-2b",
            "l-1 visa",
            "o-1 visa",
        ],
    ),
    (
        Category::StudentVisa,
        &[
            "f1",
            "f-1",
            "student visa",
            "opt",
            "stem opt",
            "cpt",
            "international student",
            "sevis",
        ],
    ),
    (
        Category::GreenCard,
        &[
            "green card",
            "permanent resident",
            "eb1",
            "eb-1",
            "eb2",
            "eb-2",
            "eb3",
            "eb-3",
            "eb5",
            "eb-5",
            "adjustment of status",
        ],
    ),
    (
        Category::TouristVisa,
        &[
            "tourist visa",
            "b1",
            "b-1",
            "b2",
            "b-2",
            "visitor visa",
        ],
    ),
    (
        Category::FamilyVisa,
        &[
            "family visa",
            "spouse visa",
            "k1",
            "k-1",
            "fiancé",
            "fiance",
            "family-based",
        ],
    ),
    (
        Category::PolicyUpdate,
        &[
            "policy",
            "law",
            "regulation",
            "rule",
            "executive order",
            "proclamation",
        ],
    ),
    (
        Category::BorderSecurity,
        &["border", "customs", "enforcement", "ice", "cbp", "deportation"],
    ),
    (
        Category::LegalNews,
        &["court", "ruling", "judge", "lawsuit", "appeal"],
    ),
    (
        Category::ImmigrationReform,
        &["reform", "bill", "congress", "senate", "house", "legislation"],
    ),
];

const URGENT_KEYWORDS: &[&str] = &[
    "breaking",
    "urgent",
    "emergency",
    "immediate",
    "suspended",
    "banned",
    "alert",
    "deadline",
];

fn haystack(title: &str, description: &str) -> String {
    format!("{title} {description}").to_lowercase()
}

pub fn categorize(title: &str, description: &str) -> Category {
    let text = haystack(title, description);
    CATEGORY_RULES
        .iter()
        .find(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map(|(cat, _)| *cat)
        .unwrap_or(Category::GeneralNews)
}

pub fn is_urgent(title: &str, description: &str) -> bool {
    let text = haystack(title, description);
    URGENT_KEYWORDS.iter().any(|w| text.contains(w))
}
