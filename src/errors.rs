// errors.rs
use thiserror::Error;

/// Everything that can go wrong between asking for `events.json` and holding
/// a parsed document. The loader treats every variant the same way.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Network response was not ok: {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed event document: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid source location: {0}")]
    InvalidLocation(String),
}
