//! Catalog error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("malformed location label {0:?}, expected three dot-separated words")]
    MalformedLabel(String),
    #[error("unsupported no-fly geometry type {0:?}")]
    UnsupportedGeometry(String),
    #[error("invalid catalog payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
