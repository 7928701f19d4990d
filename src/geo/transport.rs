//! HTTP transport
//!
//! A [`Transport`] executes one GET and reports how it went. It never fails:
//! timeouts and every other failure are outcomes, which the client turns into
//! placeholder records.

use crate::error::Result;
use reqwest::header::CACHE_CONTROL;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("geo-ip/", env!("CARGO_PKG_VERSION"));

/// A single outbound lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub url: String,
    pub timeout: Duration,
    /// Caching hint for the transport layer
    pub cache_ttl: Duration,
}

/// How a request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    /// 2xx response with its body
    Success { body: String },
    /// The request did not complete within its timeout
    TimedOut,
    /// Anything else: connection errors, non-2xx statuses, unreadable bodies
    Failed { reason: String },
}

impl TransportOutcome {
    fn from_error(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportOutcome::TimedOut
        } else {
            TransportOutcome::Failed {
                reason: error.to_string(),
            }
        }
    }
}

/// Trait for HTTP transports
///
/// Implementations must be thread-safe so a client can be shared.
pub trait Transport: Send + Sync {
    /// Execute a blocking GET for the request
    fn get(&self, request: &LookupRequest) -> TransportOutcome;
}

/// Blocking reqwest transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a new transport
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self::from_client(client))
    }

    /// Wrap an already configured client
    ///
    /// Per-request timeouts are still applied on top of the client's settings.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &LookupRequest) -> TransportOutcome {
        let sent = self
            .client
            .get(&request.url)
            .timeout(request.timeout)
            .header(CACHE_CONTROL, format!("max-age={}", request.cache_ttl.as_secs()))
            .send();

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                debug!("Request failed before a response arrived: {}", e);
                return TransportOutcome::from_error(&e);
            }
        };

        let status = response.status();
        if !status.is_success() {
            return TransportOutcome::Failed {
                reason: format!("service returned status: {}", status),
            };
        }

        match response.text() {
            Ok(body) => TransportOutcome::Success { body },
            Err(e) => TransportOutcome::from_error(&e),
        }
    }
}
