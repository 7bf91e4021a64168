// src/ingest/error.rs
use thiserror::Error;

/// Why a single proxy attempt was rejected. Never escapes the pipeline;
/// every variant just means "try the next proxy".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http status {0}")]
    Status(u16),
    #[error("body too short: {len} bytes (min {min})")]
    BodyTooShort { len: usize, min: usize },
    #[error("xml parse error: {0}")]
    Xml(String),
    #[error("feed has no usable items")]
    NoItems,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}
