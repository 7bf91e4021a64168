// src/ingest/mod.rs
pub mod config;
pub mod error;
pub mod fallback;
pub mod feed;
pub mod fetch;
pub mod retry;
pub mod types;

use crate::classify::{categorize, is_urgent};
use crate::ingest::config::{load_config_default, proxied_url, PipelineConfig};
use crate::ingest::error::FetchError;
use crate::ingest::fallback::fallback_news;
use crate::ingest::feed::parse_feed;
use crate::ingest::fetch::ReqwestFetcher;
use crate::ingest::retry::try_in_order;
use crate::ingest::types::{FeedFetcher, NewsItem, RawFeedItem};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::OffsetDateTime;

pub const SUMMARY_MAX_CHARS: usize = 200;
pub const LINK_PLACEHOLDER: &str = "#";

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_runs_total", "Pipeline invocations.");
        describe_counter!("ingest_items_total", "Items extracted from feeds.");
        describe_counter!(
            "ingest_dedup_total",
            "Items removed by title deduplication."
        );
        describe_counter!(
            "ingest_proxy_errors_total",
            "Proxy attempts rejected (status/body/xml/empty)."
        );
        describe_counter!(
            "ingest_fallback_total",
            "Runs that served the static fallback list."
        );
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!(
            "ingest_pipeline_last_run_ts",
            "Unix ts when ingest pipeline last ran."
        );
    });
}

/// Parse an RSS `pubDate` (RFC 2822) or an ISO timestamp (RFC 3339) to unix seconds.
pub fn parse_published_at(ts: &str) -> Option<i64> {
    let ts = ts.trim();
    OffsetDateTime::parse(ts, &Rfc2822)
        .or_else(|_| OffsetDateTime::parse(ts, &Rfc3339))
        .ok()
        .map(|dt| dt.unix_timestamp())
}

/// Drop later items whose trimmed, lower-cased title was already seen.
/// Returns (kept, dropped_count).
pub fn dedup_by_title(items: Vec<RawFeedItem>) -> (Vec<RawFeedItem>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut keep = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for it in items {
        if !seen.insert(it.title.trim().to_lowercase()) {
            dropped += 1;
            continue;
        }
        keep.push(it);
    }
    (keep, dropped)
}

/// Newest first. Unparsable dates sink below every parsable one; ties keep merge order.
pub fn sort_newest_first(items: &mut [RawFeedItem]) {
    items.sort_by_cached_key(|it| Reverse(parse_published_at(&it.published_at)));
}

/// Cut to `SUMMARY_MAX_CHARS` characters, appending `...` when anything was cut.
pub fn summarize(description: &str) -> String {
    if description.chars().count() > SUMMARY_MAX_CHARS {
        let mut s: String = description.chars().take(SUMMARY_MAX_CHARS).collect();
        s.push_str("...");
        s
    } else {
        description.to_string()
    }
}

/// Map surviving raw items to the output shape. Ids are `news-<generated_at_ms>-<index>`.
pub fn to_news_items(items: Vec<RawFeedItem>, country: &str, generated_at_ms: i64) -> Vec<NewsItem> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, it)| NewsItem {
            id: format!("news-{generated_at_ms}-{i}"),
            summary: summarize(&it.description),
            category: categorize(&it.title, &it.description),
            urgent: is_urgent(&it.title, &it.description),
            country: country.to_string(),
            link: if it.link.is_empty() {
                LINK_PLACEHOLDER.to_string()
            } else {
                it.link
            },
            title: it.title,
            published_at: it.published_at,
            source: it.source,
        })
        .collect()
}

/// Merge per-query batches into the final list: dedup, sort, cap, map.
/// Returns `None` when nothing survived the merge.
pub fn assemble(
    batches: Vec<Vec<RawFeedItem>>,
    config: &PipelineConfig,
    generated_at_ms: i64,
) -> Option<Vec<NewsItem>> {
    let merged: Vec<RawFeedItem> = batches.into_iter().flatten().collect();
    let (mut unique, dropped) = dedup_by_title(merged);
    counter!("ingest_dedup_total").increment(dropped as u64);
    if unique.is_empty() {
        return None;
    }
    sort_newest_first(&mut unique);
    unique.truncate(config.max_items);
    Some(to_news_items(unique, &config.country, generated_at_ms))
}

/// The news ingestion pipeline. Stateless across calls; holds only configuration
/// and the outbound fetcher.
pub struct NewsPipeline {
    config: PipelineConfig,
    fetcher: Arc<dyn FeedFetcher>,
}

impl NewsPipeline {
    /// Pipeline backed by `reqwest` with the configured per-request timeout.
    pub fn new(config: PipelineConfig) -> anyhow::Result<Self> {
        let config = config.sanitized();
        let fetcher = ReqwestFetcher::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(config: PipelineConfig, fetcher: Arc<dyn FeedFetcher>) -> Self {
        Self {
            config: config.sanitized(),
            fetcher,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch, normalize and rank the news. Never fails and never returns an empty list.
    pub async fn fetch_news(&self) -> Vec<NewsItem> {
        ensure_metrics_described();
        counter!("ingest_runs_total").increment(1);

        let mut batches = Vec::with_capacity(self.config.feed_queries.len());
        for query in &self.config.feed_queries {
            let items = self.fetch_query(query).await;
            tracing::info!(target: "ingest", query = %query, items = items.len(), "query done");
            batches.push(items);
        }

        let now = chrono::Utc::now();
        gauge!("ingest_pipeline_last_run_ts").set(now.timestamp() as f64);

        match assemble(batches, &self.config, now.timestamp_millis()) {
            Some(items) => {
                tracing::info!(target: "ingest", kept = items.len(), "news assembled");
                items
            }
            None => {
                tracing::warn!(target: "ingest", "every source failed; serving fallback news");
                counter!("ingest_fallback_total").increment(1);
                fallback_news(now, &self.config.country)
            }
        }
    }

    /// One query through the proxy list. Zero items if every proxy fails.
    async fn fetch_query(&self, query: &str) -> Vec<RawFeedItem> {
        let target = self.config.search_url(query);
        try_in_order(&self.config.proxy_endpoints, |proxy| {
            self.try_proxy(proxy, &target)
        })
        .await
        .unwrap_or_else(|| {
            tracing::warn!(target: "ingest", query = %query, "all proxies failed for query");
            Vec::new()
        })
    }

    async fn try_proxy(&self, proxy: &str, target: &str) -> Result<Vec<RawFeedItem>, FetchError> {
        let url = proxied_url(proxy, target);
        tracing::debug!(target: "ingest", %url, fetcher = self.fetcher.name(), "fetching feed");
        let res = self.fetch_and_parse(&url).await;
        if res.is_err() {
            counter!("ingest_proxy_errors_total").increment(1);
        }
        res
    }

    async fn fetch_and_parse(&self, url: &str) -> Result<Vec<RawFeedItem>, FetchError> {
        let resp = self.fetcher.get(url).await?;
        if !(200..300).contains(&resp.status) {
            return Err(FetchError::Status(resp.status));
        }
        if resp.body.trim().len() < self.config.min_body_len {
            return Err(FetchError::BodyTooShort {
                len: resp.body.trim().len(),
                min: self.config.min_body_len,
            });
        }
        parse_feed(&resp.body, self.config.item_cap_per_query)
    }
}

/// Zero-argument entry point: default configuration, real network.
/// Configuration or client setup problems degrade to the fallback list like any other failure.
pub async fn fetch_news() -> Vec<NewsItem> {
    let config = load_config_default().unwrap_or_else(|e| {
        tracing::warn!(target: "ingest", error = ?e, "pipeline config unreadable; using defaults");
        PipelineConfig::default()
    });
    match NewsPipeline::new(config) {
        Ok(p) => p.fetch_news().await,
        Err(e) => {
            tracing::error!(target: "ingest", error = ?e, "pipeline setup failed; serving fallback news");
            counter!("ingest_fallback_total").increment(1);
            fallback_news(chrono::Utc::now(), "USA")
        }
    }
}
