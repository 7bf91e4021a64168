// src/ingest/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ingest::error::FetchError;

/// One syndication entry as extracted from a feed document, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeedItem {
    pub title: String,        // publisher suffix already removed
    pub link: String,         // may be empty
    pub published_at: String, // original pubDate text, possibly malformed
    pub description: String,  // markup stripped
    pub source: String,       // publisher, heuristic
}

/// Display-ready item handed to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: Category,
    pub country: String,
    pub published_at: String,
    pub source: String,
    pub urgent: bool,
    pub link: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Work Visa")]
    WorkVisa,
    #[serde(rename = "Student Visa")]
    StudentVisa,
    #[serde(rename = "Green Card")]
    GreenCard,
    #[serde(rename = "Tourist Visa")]
    TouristVisa,
    #[serde(rename = "Family Visa")]
    FamilyVisa,
    #[serde(rename = "Policy Update")]
    PolicyUpdate,
    #[serde(rename = "Border Security")]
    BorderSecurity,
    #[serde(rename = "Legal News")]
    LegalNews,
    #[serde(rename = "Immigration Reform")]
    ImmigrationReform,
    #[serde(rename = "General News")]
    GeneralNews,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::WorkVisa,
        Category::StudentVisa,
        Category::GreenCard,
        Category::TouristVisa,
        Category::FamilyVisa,
        Category::PolicyUpdate,
        Category::BorderSecurity,
        Category::LegalNews,
        Category::ImmigrationReform,
        Category::GeneralNews,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::WorkVisa => "Work Visa",
            Category::StudentVisa => "Student Visa",
            Category::GreenCard => "Green Card",
            Category::TouristVisa => "Tourist Visa",
            Category::FamilyVisa => "Family Visa",
            Category::PolicyUpdate => "Policy Update",
            Category::BorderSecurity => "Border Security",
            Category::LegalNews => "Legal News",
            Category::ImmigrationReform => "Immigration Reform",
            Category::GeneralNews => "General News",
        }
    }

    /// Case-insensitive lookup by display label.
    pub fn from_label(s: &str) -> Option<Category> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a proxy handed back: status plus the body text, untouched.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Outbound GET seam. The production impl wraps `reqwest`; tests script responses.
#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
    fn name(&self) -> &'static str;
}
