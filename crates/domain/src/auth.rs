//! Credentials and bearer token types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Password used for generated throwaway accounts.
pub const GENERATED_PASSWORD: &str = "TestPassword123!";

/// Email/password pair used for registration and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from an existing email/password pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either field is empty.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> DomainResult<Self> {
        let email = email.into();
        let password = password.into();
        if email.is_empty() {
            return Err(DomainError::InvalidIdentifier("empty email".to_string()));
        }
        if password.is_empty() {
            return Err(DomainError::InvalidIdentifier("empty password".to_string()));
        }
        Ok(Self { email, password })
    }

    /// Generates throwaway credentials unique to this run.
    ///
    /// The email embeds the current Unix timestamp in milliseconds so
    /// repeated runs against the same server register distinct users.
    #[must_use]
    pub fn generated(now: DateTime<Utc>) -> Self {
        Self {
            email: format!("test_{}@example.com", now.timestamp_millis()),
            password: GENERATED_PASSWORD.to_string(),
        }
    }
}

/// Opaque bearer credential returned by login.
///
/// Attached to later requests as `Authorization: Bearer <token>` to
/// prove identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Creates a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty.
    pub fn new(token: impl Into<String>) -> DomainResult<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(DomainError::InvalidIdentifier(
                "empty bearer token".to_string(),
            ));
        }
        Ok(Self(token))
    }

    /// Returns the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generated_credentials_embed_timestamp() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let credentials = Credentials::generated(now);

        assert_eq!(
            credentials.email,
            format!("test_{}@example.com", now.timestamp_millis())
        );
        assert_eq!(credentials.password, GENERATED_PASSWORD);
    }

    #[test]
    fn test_generated_credentials_differ_over_time() {
        let first = Credentials::generated(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
        let second = Credentials::generated(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 1).unwrap());
        assert_ne!(first.email, second.email);
    }

    #[test]
    fn test_credentials_reject_empty_fields() {
        assert!(Credentials::new("", "secret").is_err());
        assert!(Credentials::new("a@b.com", "").is_err());
        assert!(Credentials::new("a@b.com", "secret").is_ok());
    }

    #[test]
    fn test_bearer_token_header() {
        let token = BearerToken::new("abc123").unwrap();
        assert_eq!(token.as_str(), "abc123");
        assert_eq!(token.authorization_header(), "Bearer abc123");
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(BearerToken::new("").is_err());
    }
}
