// src/ingest/fetch.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::ingest::error::FetchError;
use crate::ingest::types::{FeedFetcher, HttpResponse};

const ACCEPT_FEED: &str = "application/rss+xml, application/xml, text/xml";
const USER_AGENT: &str = concat!("visa-news-feed/", env!("CARGO_PKG_VERSION"));

/// Plain `reqwest` GET with a hard per-request timeout.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("building reqwest client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_FEED)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(HttpResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
