//! Error types for vault scraping, downloading and extraction

use thiserror::Error;

/// Errors raised while talking to the vault or writing its files to disk
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("status code error: {status} ({url})")]
    Status { url: String, status: String },

    #[error("HTTP Error: {0}")]
    DownloadFailed(String),

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("detail page has no mediaId token")]
    MissingMediaId,

    #[error("missing filename in response")]
    MissingFilename,

    #[error("unexpected archive layout: entry '{0}' has no file name")]
    UnexpectedArchiveLayout(String),

    #[error("failed to read archive: {0}")]
    Archive(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VaultError>;
