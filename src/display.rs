// src/display.rs
//! Helpers for rendering the feed: filtering and relative date labels.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::ingest::parse_published_at;
use crate::ingest::types::{Category, NewsItem};

const ALL: &str = "all";

/// UI-side selection. Absent, empty or `"all"` means "no restriction".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
}

fn selection(v: &Option<String>) -> Option<&str> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(ALL))
}

impl NewsFilter {
    pub fn matches(&self, item: &NewsItem) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                item.title.to_lowercase().contains(&q) || item.summary.to_lowercase().contains(&q)
            }
            _ => true,
        };
        let category_ok = selection(&self.category)
            .map_or(true, |c| Category::from_label(c) == Some(item.category));
        let country_ok =
            selection(&self.country).map_or(true, |c| item.country.eq_ignore_ascii_case(c));
        search_ok && category_ok && country_ok
    }
}

pub fn filter_news(items: Vec<NewsItem>, filter: &NewsFilter) -> Vec<NewsItem> {
    items.into_iter().filter(|it| filter.matches(it)).collect()
}

/// "1 day ago", "N days ago" within a week, else the calendar date.
/// Day distance is rounded up; unparsable input renders as "Recently".
pub fn format_published_at(published_at: &str, now: DateTime<Utc>) -> String {
    let Some(ts) = parse_published_at(published_at) else {
        return "Recently".to_string();
    };
    let Some(date) = DateTime::<Utc>::from_timestamp(ts, 0) else {
        return "Recently".to_string();
    };
    let diff_secs = (now.timestamp() - ts).unsigned_abs();
    let diff_days = diff_secs.div_ceil(86_400);
    match diff_days {
        1 => "1 day ago".to_string(),
        d if d < 7 => format!("{d} days ago"),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}
