//! HTTP client port

use std::future::Future;
use std::pin::Pin;

use fincheck_domain::{RequestSpec, ResponseSpec};
use thiserror::Error;

/// Errors surfaced by HTTP client adapters.
///
/// Transport failures are distinguished so that failure details can
/// name what actually went wrong (connection refused vs. DNS vs.
/// timeout) instead of a generic message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver error message.
        message: String,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Too many redirects were followed.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit that was exceeded.
        max: u32,
    },

    /// The request URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be serialized.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Any other client error.
    #[error("HTTP client error: {0}")]
    Other(String),
}

/// Port for executing HTTP requests.
pub trait HttpClient: Send + Sync {
    /// Executes a request, returning the response or a transport
    /// error. Non-2xx statuses are NOT errors; callers inspect the
    /// status themselves.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>>;
}
