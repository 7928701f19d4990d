//! Error types for geo-ip

use thiserror::Error;

/// Main error type for geo-ip operations
///
/// Transport timeouts and failures are not represented here: a lookup absorbs
/// them into a degraded [`LocationResult`](crate::geo::LocationResult).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for geo-ip operations
pub type Result<T> = std::result::Result<T, Error>;
