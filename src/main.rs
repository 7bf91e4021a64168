//! Visa news feed: binary entrypoint.
//! Boots the Axum HTTP server that serves the normalized news feed to the UI.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use visa_news_feed::api::{self, AppState};
use visa_news_feed::ingest::config::load_config_default;
use visa_news_feed::metrics::Metrics;
use visa_news_feed::{NewsPipeline, PipelineConfig};

/// Compact logs by default, JSON lines when LOG_FORMAT=json.
/// The runtime may already own the global subscriber; then this is a no-op.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("visa_news_feed=info,ingest=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let res = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = load_config_default().unwrap_or_else(|e| {
        tracing::warn!(error = ?e, "pipeline config unreadable; using defaults");
        PipelineConfig::default()
    });
    tracing::info!(
        queries = config.feed_queries.len(),
        proxies = config.proxy_endpoints.len(),
        max_items = config.max_items,
        "news pipeline configured"
    );

    let pipeline = NewsPipeline::new(config)?;
    let metrics = Metrics::init()?;

    let router = api::router(AppState::new(pipeline)).merge(metrics.router());

    Ok(router.into())
}
