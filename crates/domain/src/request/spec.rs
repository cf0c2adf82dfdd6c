//! Request specification type

use std::time::Duration;

use crate::auth::BearerToken;
use crate::request::{Header, Headers, HttpMethod};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A fully-resolved HTTP request ready for execution.
///
/// Bodies are always JSON; the suite never sends any other content
/// type against the target API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Request headers.
    pub headers: Headers,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RequestSpec {
    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Headers::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a POST request with a JSON body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Headers::new(),
            body: Some(body),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a PUT request with a JSON body.
    #[must_use]
    pub fn put(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Put,
            url: url.into(),
            headers: Headers::new(),
            body: Some(body),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(name, value));
        self
    }

    /// Attaches a bearer token as the `Authorization` header.
    #[must_use]
    pub fn with_bearer(self, token: &BearerToken) -> Self {
        self.with_header("Authorization", token.authorization_header())
    }

    /// Returns true if the request carries an `Authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.headers.contains("Authorization")
    }
}
