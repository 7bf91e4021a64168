// src/ingest/feed.rs
//! RSS 2.0 document parsing for search-result feeds.
//!
//! Publisher names are recovered with a best-effort heuristic: syndication
//! search results append `" - Publisher"` to each headline, so everything after
//! the first `" - "` is taken as the source and cut from the title. Headlines
//! that themselves contain `" - "` lose their tail into the source; that is accepted.

use metrics::{counter, histogram};
use once_cell::sync::OnceCell;
use quick_xml::de::from_str;
use regex::Regex;
use serde::Deserialize;

use crate::ingest::error::FetchError;
use crate::ingest::types::RawFeedItem;

pub const DEFAULT_SOURCE: &str = "Google News";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

/// Parse a feed body and extract at most `cap` items.
///
/// Errors when the document is not RSS, or when no item survives extraction.
pub fn parse_feed(xml: &str, cap: usize) -> Result<Vec<RawFeedItem>, FetchError> {
    let t0 = std::time::Instant::now();
    let xml_clean = scrub_html_entities_for_xml(xml);
    let rss: Rss = from_str(&xml_clean).map_err(|e| FetchError::Xml(e.to_string()))?;

    let out: Vec<RawFeedItem> = rss
        .channel
        .item
        .into_iter()
        .take(cap)
        .filter_map(extract_item)
        .collect();

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("ingest_parse_ms").record(ms);

    if out.is_empty() {
        return Err(FetchError::NoItems);
    }
    counter!("ingest_items_total").increment(out.len() as u64);
    Ok(out)
}

fn extract_item(it: Item) -> Option<RawFeedItem> {
    let raw_title = it.title.unwrap_or_default();
    let (title, source) = split_source(&raw_title);
    if title.is_empty() {
        return None;
    }
    Some(RawFeedItem {
        title,
        link: it.link.map(|l| l.trim().to_string()).unwrap_or_default(),
        published_at: it.pub_date.map(|d| d.trim().to_string()).unwrap_or_default(),
        description: strip_markup(it.description.as_deref().unwrap_or_default()),
        source,
    })
}

/// Split `"Headline - Publisher"` into `("Headline", "Publisher")` at the first separator.
/// Falls back to the whole title and [`DEFAULT_SOURCE`].
pub fn split_source(title: &str) -> (String, String) {
    let title = title.trim();
    match title.split_once(" - ") {
        Some((head, src)) if !head.trim().is_empty() && !src.trim().is_empty() => {
            (head.trim().to_string(), src.trim().to_string())
        }
        _ => (title.to_string(), DEFAULT_SOURCE.to_string()),
    }
}

/// Delete tags, decode entities, collapse whitespace.
pub fn strip_markup(s: &str) -> String {
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?s)<[^>]*>").unwrap());
    let no_tags = re_tags.replace_all(s, "");

    let decoded = html_escape::decode_html_entities(&no_tags);

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&decoded, " ").trim().to_string()
}

// HTML entities are not valid XML; error pages and sloppy feeds use them raw.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>t</title><link>https://news.example</link>{items}</channel></rss>"#
        )
    }

    #[test]
    fn splits_trailing_publisher() {
        let (t, s) = split_source("USCIS updates fee schedule - Reuters");
        assert_eq!(t, "USCIS updates fee schedule");
        assert_eq!(s, "Reuters");
    }

    #[test]
    fn first_separator_wins() {
        let (t, s) = split_source("H-1B lottery - what changes - The Hill");
        assert_eq!(t, "H-1B lottery");
        assert_eq!(s, "what changes - The Hill");
    }

    #[test]
    fn missing_suffix_defaults_source() {
        let (t, s) = split_source("  Visa bulletin for November  ");
        assert_eq!(t, "Visa bulletin for November");
        assert_eq!(s, DEFAULT_SOURCE);
    }

    #[test]
    fn strip_markup_removes_tags_and_entities() {
        let s = r##"<a href="https://x">Story</a>&nbsp;&nbsp;<font color="#6f6f6f">CNN</font>"##;
        assert_eq!(strip_markup(s), "Story CNN");
    }

    #[test]
    fn tags_are_deleted_not_spaced() {
        assert_eq!(strip_markup("H<sub>2</sub>O shortage"), "H2O shortage");
        assert_eq!(strip_markup("<p>plain</p>"), "plain");
    }

    #[test]
    fn items_interleaved_with_other_elements_are_all_kept() {
        let xml = feed(
            r#"<item><title>First - AP</title><link>https://a</link></item><atom:link href="x" rel="self"/><item><title>Second - NPR</title><link>https://b</link></item>"#,
        );
        let items = parse_feed(&xml, 20).unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn escaped_description_markup_is_stripped() {
        let xml = feed(
            r#"<item><title>Rule change - AP</title><link>https://a</link><pubDate>Mon, 12 Oct 2026 09:30:00 GMT</pubDate><description>&lt;b&gt;Bold&lt;/b&gt; text</description></item>"#,
        );
        let items = parse_feed(&xml, 20).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Bold text");
        assert_eq!(items[0].source, "AP");
        assert_eq!(items[0].title, "Rule change");
    }

    #[test]
    fn per_feed_cap_applies() {
        let many: String = (0..25)
            .map(|i| format!("<item><title>Story {i} - Src</title><link>https://x/{i}</link></item>"))
            .collect();
        let items = parse_feed(&feed(&many), 20).unwrap();
        assert_eq!(items.len(), 20);
        assert_eq!(items[19].title, "Story 19");
    }

    #[test]
    fn untitled_items_are_dropped() {
        let xml = feed(
            r#"<item><link>https://only-link</link></item><item><title>Kept</title></item>"#,
        );
        let items = parse_feed(&xml, 20).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Kept");
        assert_eq!(items[0].link, "");
    }

    #[test]
    fn empty_channel_is_rejected() {
        let err = parse_feed(&feed(""), 20).unwrap_err();
        assert!(matches!(err, FetchError::NoItems));
    }

    #[test]
    fn html_error_page_is_rejected() {
        let html = "<html><head><title>Rate limited</title></head><body><p>Too many requests, retry later please.</p></body></html>";
        assert!(parse_feed(html, 20).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            parse_feed("not xml at all {", 20),
            Err(FetchError::Xml(_))
        ));
    }
}
