//! Search adapters for trend analysis.
//!
//! Each remote service sits behind a small trait so callers can substitute fixtures in tests:
//!
//! - [`RepositorySearch`]: repository metadata plus README text ([`GitHubClient`]).
//! - [`PostSearch`]: short social posts ([`TwitterClient`]).
//!
//! Clients are synchronous and issue one request at a time. Response parsing is kept apart
//! from networking ([`parse_search_response`], [`parse_tweets`]) so it can be tested without
//! a server.

#![warn(missing_docs)]

mod error;
mod github;
mod twitter;

use std::env;

pub use error::SourceError;
pub use github::{
    GitHubClient, RepositoryItem, RepositoryQuery, clean_readme, decode_readme,
    parse_search_response,
};
pub use twitter::{TwitterClient, parse_tweets};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("trends/", env!("CARGO_PKG_VERSION"));

/// Searches a repository hosting service.
pub trait RepositorySearch {
    /// Returns matching repositories in service order, each with its README text.
    fn search(&self, query: &RepositoryQuery) -> Result<Vec<RepositoryItem>, SourceError>;
}

/// Searches a social post service.
pub trait PostSearch {
    /// Returns the full text of posts matching any keyword.
    fn search(&self, keywords: &[String]) -> Result<Vec<String>, SourceError>;
}

/// Joins keywords into an OR query of quoted phrases: `"kw1" OR "kw2"`.
///
/// Empty keywords are skipped.
pub fn quoted_keywords<S: AsRef<str>>(keywords: &[S]) -> String {
    keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(|k| format!("\"{k}\""))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Reads a token from the environment; unset and empty variables both yield `None`.
fn token_from_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quoted_keywords_joins_with_or() {
        assert_eq!(
            quoted_keywords(&["vpn", "online tracking"]),
            r#""vpn" OR "online tracking""#
        );
    }

    #[test]
    fn quoted_keywords_skips_empty() {
        assert_eq!(quoted_keywords(&["", " vpn ", "  "]), r#""vpn""#);
        let none: [&str; 0] = [];
        assert_eq!(quoted_keywords(&none), "");
    }

    #[test]
    fn unset_variable_has_no_token() {
        assert_eq!(token_from_env("TRENDS_TEST_VARIABLE_THAT_IS_NEVER_SET"), None);
    }
}
