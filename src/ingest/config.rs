// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_PATH: &str = "NEWS_PIPELINE_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/news_pipeline.toml";
pub const DEFAULT_JSON_PATH: &str = "config/news_pipeline.json";

pub const DEFAULT_MAX_ITEMS: usize = 30;
pub const DEFAULT_ITEM_CAP_PER_QUERY: usize = 20;
pub const DEFAULT_MIN_BODY_LEN: usize = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

fn default_feed_queries() -> Vec<String> {
    vec![
        "visa H1B student visa work visa USA".to_string(),
        "immigration green card USCIS USA".to_string(),
        "OPT F1 visa international students USA".to_string(),
    ]
}

fn default_proxy_endpoints() -> Vec<String> {
    vec![
        "https://api.allorigins.win/raw?url=".to_string(),
        "https://corsproxy.io/?".to_string(),
        "https://api.codetabs.com/v1/proxy?quest=".to_string(),
    ]
}

fn default_search_endpoint() -> String {
    "https://news.google.com/rss/search".to_string()
}
fn default_search_params() -> String {
    "hl=en-US&gl=US&ceid=US:en".to_string()
}
fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}
fn default_item_cap_per_query() -> usize {
    DEFAULT_ITEM_CAP_PER_QUERY
}
fn default_min_body_len() -> usize {
    DEFAULT_MIN_BODY_LEN
}
fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_country() -> String {
    "USA".to_string()
}

/// Everything the pipeline can be tuned with. Callers of `fetch_news` never see this;
/// it exists so deployments and tests can swap queries, proxies and caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Topic searches sent to the syndication endpoint, one feed each.
    #[serde(default = "default_feed_queries")]
    pub feed_queries: Vec<String>,
    /// Proxy prefixes, tried in order. The URL-encoded target is appended verbatim.
    #[serde(default = "default_proxy_endpoints")]
    pub proxy_endpoints: Vec<String>,
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,
    /// Extra query-string parameters (locale) appended after `q=`.
    #[serde(default = "default_search_params")]
    pub search_params: String,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_item_cap_per_query")]
    pub item_cap_per_query: usize,
    /// Bodies shorter than this are treated as error pages.
    #[serde(default = "default_min_body_len")]
    pub min_body_len: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_country")]
    pub country: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            feed_queries: default_feed_queries(),
            proxy_endpoints: default_proxy_endpoints(),
            search_endpoint: default_search_endpoint(),
            search_params: default_search_params(),
            max_items: default_max_items(),
            item_cap_per_query: default_item_cap_per_query(),
            min_body_len: default_min_body_len(),
            request_timeout_secs: default_request_timeout_secs(),
            country: default_country(),
        }
    }
}

impl PipelineConfig {
    /// Drop blank entries and reset nonsensical caps.
    pub fn sanitized(mut self) -> Self {
        self.feed_queries = clean_list(self.feed_queries);
        self.proxy_endpoints = clean_list(self.proxy_endpoints);
        if self.max_items == 0 {
            self.max_items = DEFAULT_MAX_ITEMS;
        }
        if self.item_cap_per_query == 0 {
            self.item_cap_per_query = DEFAULT_ITEM_CAP_PER_QUERY;
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = DEFAULT_REQUEST_TIMEOUT_SECS;
        }
        if self.search_endpoint.trim().is_empty() {
            self.search_endpoint = default_search_endpoint();
        }
        if self.country.trim().is_empty() {
            self.country = default_country();
        }
        self
    }

    /// Search URL for one topic query, e.g.
    /// `https://news.google.com/rss/search?q=visa%20H1B&hl=en-US&gl=US&ceid=US:en`.
    pub fn search_url(&self, query: &str) -> String {
        let mut url = format!(
            "{}?q={}",
            self.search_endpoint.trim_end_matches('?'),
            urlencoding::encode(query.trim())
        );
        let params = self.search_params.trim().trim_start_matches('&');
        if !params.is_empty() {
            url.push('&');
            url.push_str(params);
        }
        url
    }
}

/// Route `target` through a proxy prefix.
pub fn proxied_url(proxy: &str, target: &str) -> String {
    format!("{proxy}{}", urlencoding::encode(target))
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<PipelineConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading pipeline config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let cfg = match ext.as_str() {
        "json" => serde_json::from_str::<PipelineConfig>(&content)
            .with_context(|| format!("parsing json config {}", path.display()))?,
        _ => toml::from_str::<PipelineConfig>(&content)
            .with_context(|| format!("parsing toml config {}", path.display()))?,
    };
    Ok(cfg.sanitized())
}

/// Load config using env var + fallbacks:
/// 1) $NEWS_PIPELINE_CONFIG_PATH
/// 2) config/news_pipeline.toml
/// 3) config/news_pipeline.json
/// 4) built-in defaults
pub fn load_config_default() -> Result<PipelineConfig> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("{ENV_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from(DEFAULT_JSON_PATH);
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    Ok(PipelineConfig::default())
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_behavior() {
        let c = PipelineConfig::default();
        assert_eq!(c.feed_queries.len(), 3);
        assert_eq!(c.proxy_endpoints.len(), 3);
        assert_eq!(c.max_items, 30);
        assert_eq!(c.item_cap_per_query, 20);
        assert_eq!(c.min_body_len, 100);
        assert_eq!(c.country, "USA");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c: PipelineConfig = toml::from_str("max_items = 10").unwrap();
        assert_eq!(c.max_items, 10);
        assert_eq!(c.proxy_endpoints, default_proxy_endpoints());
    }

    #[test]
    fn sanitize_keeps_order_and_drops_blanks() {
        let c = PipelineConfig {
            proxy_endpoints: vec![" b ".into(), "".into(), "a".into(), "b".into()],
            max_items: 0,
            ..PipelineConfig::default()
        }
        .sanitized();
        assert_eq!(c.proxy_endpoints, vec!["b".to_string(), "a".to_string()]);
        assert_eq!(c.max_items, DEFAULT_MAX_ITEMS);
    }

    #[test]
    fn search_url_encodes_query() {
        let c = PipelineConfig::default();
        assert_eq!(
            c.search_url("green card USCIS"),
            "https://news.google.com/rss/search?q=green%20card%20USCIS&hl=en-US&gl=US&ceid=US:en"
        );
    }

    #[test]
    fn proxied_url_appends_encoded_target() {
        let u = proxied_url("https://corsproxy.io/?", "https://x.test/rss?q=a b");
        assert_eq!(u, "https://corsproxy.io/?https%3A%2F%2Fx.test%2Frss%3Fq%3Da%20b");
    }
}
