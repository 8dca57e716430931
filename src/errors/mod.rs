//! Error type definitions for m3u-sweeper
//!
//! A small hierarchical error system: `SourceError` for failures talking to
//! remote playlist sources, `AppError` as the top-level type the pipeline and
//! binary work with.

use thiserror::Error;

/// Convenient result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Source handling errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// No channels survived aggregation, nothing to check or write
    #[error("No channels were obtained from any configured source")]
    EmptyPipeline,

    /// Filesystem errors while writing the output playlist
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors fetching a remote playlist source
#[derive(Error, Debug)]
pub enum SourceError {
    /// No response within the fetch timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Terminal non-success HTTP status
    #[error("HTTP error: {status} from {url}")]
    Http { status: u16, url: String },

    /// Connection, DNS or protocol failure
    #[error("Network error: {url} - {message}")]
    Network { url: String, message: String },
}

impl AppError {
    /// Create a configuration error with a custom message
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Classify a reqwest failure against the URL that produced it
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}
