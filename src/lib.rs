// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod classify;
pub mod display;
pub mod ingest;
pub mod metrics;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::classify::{categorize, is_urgent};
pub use crate::display::{filter_news, format_published_at, NewsFilter};
pub use crate::ingest::config::PipelineConfig;
pub use crate::ingest::types::{Category, NewsItem};
pub use crate::ingest::{fetch_news, NewsPipeline};
