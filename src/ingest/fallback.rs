// src/ingest/fallback.rs
use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::ingest::types::{Category, NewsItem};

/// Static stories served when no feed could be fetched at all.
/// Dated relative to `now` so the UI still shows "today" / "1 day ago".
pub fn fallback_news(now: DateTime<Utc>, country: &str) -> Vec<NewsItem> {
    let stamp = |days_ago: i64| {
        (now - Duration::days(days_ago)).to_rfc3339_opts(SecondsFormat::Secs, true)
    };
    vec![
        NewsItem {
            id: "fallback-1".to_string(),
            title: "USCIS Extends Automatic Extension Period for Employment Authorization Documents"
                .to_string(),
            summary: "USCIS announced an extension of the automatic extension period for certain \
                      Employment Authorization Documents (EADs) from 180 days to 540 days for \
                      qualifying renewal applicants."
                .to_string(),
            category: Category::PolicyUpdate,
            country: country.to_string(),
            published_at: stamp(0),
            source: "USCIS".to_string(),
            urgent: true,
            link: "https://www.uscis.gov".to_string(),
        },
        NewsItem {
            id: "fallback-2".to_string(),
            title: "New H-1B Registration Process Updates".to_string(),
            summary: "U.S. Citizenship and Immigration Services (USCIS) has announced important \
                      updates to the H-1B registration process for the upcoming fiscal year."
                .to_string(),
            category: Category::WorkVisa,
            country: country.to_string(),
            published_at: stamp(1),
            source: "Immigration News".to_string(),
            urgent: false,
            link: "https://www.uscis.gov".to_string(),
        },
        NewsItem {
            id: "fallback-3".to_string(),
            title: "Immigration Court Backlog Reaches Record High".to_string(),
            summary: "The Executive Office for Immigration Review reports that the immigration \
                      court backlog has reached a new record high, affecting thousands of pending \
                      cases."
                .to_string(),
            category: Category::LegalNews,
            country: country.to_string(),
            published_at: stamp(2),
            source: "Department of Justice".to_string(),
            urgent: false,
            link: "https://www.justice.gov".to_string(),
        },
    ]
}
