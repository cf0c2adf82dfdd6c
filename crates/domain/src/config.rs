//! Run configuration.
//!
//! The base URL and API root are explicit configuration validated up
//! front; deployments differ on both (port 5051 vs 5001 has been seen
//! in the wild).

use std::time::Duration;

use url::Url;

use crate::auth::Credentials;
use crate::error::{DomainError, DomainResult};

/// Default base URL of the target server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5051";

/// Default API root mounted under the base URL.
pub const DEFAULT_API_ROOT: &str = "/api/v1";

/// Timeout applied to the initial health check.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for a single suite run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    base_url: Url,
    api_root: String,
    /// Timeout applied to every request after the health check.
    pub timeout: Duration,
    /// Fixed credentials; when absent the runner generates throwaway
    /// ones.
    pub credentials: Option<Credentials>,
}

impl RunConfig {
    /// Creates a configuration from a base URL and API root.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse as an absolute
    /// http(s) URL.
    pub fn new(base_url: &str, api_root: &str) -> DomainResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {base_url}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme: {}",
                base_url.scheme()
            )));
        }

        let trimmed = api_root.trim_matches('/');
        let api_root = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };

        Ok(Self {
            base_url,
            api_root,
            timeout: Duration::from_secs(30),
            credentials: None,
        })
    }

    /// Overrides the default request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets fixed credentials instead of generated ones.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Returns the server base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the base URL as a string without a trailing slash.
    #[must_use]
    pub fn base(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    /// Returns the API root joined onto the base URL.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base(), self.api_root)
    }

    /// Builds a full endpoint URL under the API root.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base(), path.trim_start_matches('/'))
    }
}
