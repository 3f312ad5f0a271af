//! Error types for search adapters.

use reqwest::blocking::Response;
use thiserror::Error;

/// Header carrying the requests left in the current rate limit window.
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Errors raised while querying a remote search service.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The service rejected the credential.
    #[error("{service} rejected the access token (HTTP {status})")]
    Auth {
        /// Service name.
        service: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// The response did not have the expected shape.
    #[error("unexpected {context} response: {reason}")]
    Malformed {
        /// What was being parsed.
        context: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The service refused the request because the rate limit is used up.
    #[error("{service} rate limit exceeded (HTTP {status}); try again later")]
    RateLimited {
        /// Service name.
        service: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// A request returned a non-success status.
    #[error("{service} returned HTTP {status}")]
    Status {
        /// Service name.
        service: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// Transport failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A required credential variable is not set.
    #[error("environment variable {var} is not set")]
    MissingToken {
        /// Name of the environment variable.
        var: String,
    },
}

impl SourceError {
    /// Returns true for credential failures, which callers must treat as fatal.
    pub fn is_credential(&self) -> bool {
        matches!(self, Self::Auth { .. } | Self::MissingToken { .. })
    }

    /// Maps an HTTP status to an error, or `None` on success.
    ///
    /// `rate_limited` marks a response whose rate limit window is exhausted. GitHub answers
    /// those with 403, which must not read as a bad token.
    pub fn from_status(service: &'static str, status: u16, rate_limited: bool) -> Option<Self> {
        match status {
            200..=299 => None,
            429 => Some(Self::RateLimited { service, status }),
            403 if rate_limited => Some(Self::RateLimited { service, status }),
            401 | 403 => Some(Self::Auth { service, status }),
            _ => Some(Self::Status { service, status }),
        }
    }

    /// Maps a response's status and rate limit header to an error, or `None` on success.
    pub fn from_response(service: &'static str, response: &Response) -> Option<Self> {
        let rate_limited = response
            .headers()
            .get(RATE_LIMIT_REMAINING)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");
        Self::from_status(service, response.status().as_u16(), rate_limited)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unauthorized_and_forbidden_are_auth_errors() {
        for status in [401, 403] {
            let err = SourceError::from_status("GitHub", status, false).unwrap();
            assert!(matches!(err, SourceError::Auth { status: s, .. } if s == status));
            assert!(err.is_credential());
        }
    }

    #[test]
    fn success_is_not_an_error() {
        assert!(SourceError::from_status("GitHub", 200, false).is_none());
        assert!(SourceError::from_status("GitHub", 204, true).is_none());
    }

    #[test]
    fn other_failures_are_status_errors() {
        let err = SourceError::from_status("Twitter", 503, false).unwrap();
        assert!(matches!(err, SourceError::Status { status: 503, .. }));
        assert!(!err.is_credential());
        assert_eq!(err.to_string(), "Twitter returned HTTP 503");
    }

    #[test]
    fn exhausted_rate_limit_is_not_a_credential_error() {
        let err = SourceError::from_status("GitHub", 403, true).unwrap();
        assert!(matches!(err, SourceError::RateLimited { status: 403, .. }));
        assert!(!err.is_credential());

        let err = SourceError::from_status("Twitter", 429, false).unwrap();
        assert!(matches!(err, SourceError::RateLimited { status: 429, .. }));
        assert!(!err.is_credential());
    }

    #[test]
    fn rejected_token_stays_auth_while_limit_remains() {
        let err = SourceError::from_status("GitHub", 401, true).unwrap();
        assert!(err.is_credential());
    }

    #[test]
    fn missing_token_is_a_credential_error() {
        let err = SourceError::MissingToken {
            var: "T_BEARER_TOKEN".into(),
        };
        assert!(err.is_credential());
        assert!(err.to_string().contains("T_BEARER_TOKEN"));
    }
}
