//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{env, fmt};

use crate::{Config, MAX_REPOSITORIES};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No keywords are configured.
    NoKeywords,
    /// The repository count is zero or larger than one search page.
    RepositoryLimitOutOfRange {
        /// Configured repository count.
        limit: usize,
    },
    /// The term limit is zero, so no terms would be reported.
    ZeroTermLimit,
    /// The token variable for a service is not set.
    TokenMissing {
        /// Service name.
        service: &'static str,
        /// Environment variable that was checked.
        var: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoKeywords => write!(f, "no keywords are configured"),
            Self::RepositoryLimitOutOfRange { limit } => write!(
                f,
                "repository count {limit} is outside 1..={MAX_REPOSITORIES}"
            ),
            Self::ZeroTermLimit => write!(f, "term limit is 0, no terms will be reported"),
            Self::TokenMissing { service, var } => {
                write!(f, "{service} token variable {var} is not set")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
///
/// This checks for:
/// - An empty keyword set
/// - Repository counts the search API cannot serve in one page
/// - A zero term limit
/// - Unset token variables (the Twitter token only when Twitter is enabled)
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.search.keywords.is_empty() {
        warnings.push(ConfigWarning::NoKeywords);
    }

    let limit = config.search.repositories;
    if limit == 0 || limit > MAX_REPOSITORIES {
        warnings.push(ConfigWarning::RepositoryLimitOutOfRange { limit });
    }

    if config.terms.limit == 0 {
        warnings.push(ConfigWarning::ZeroTermLimit);
    }

    if env::var_os(&config.github.token_env).is_none() {
        warnings.push(ConfigWarning::TokenMissing {
            service: "github",
            var: config.github.token_env.clone(),
        });
    }

    if config.twitter.enabled && env::var_os(&config.twitter.token_env).is_none() {
        warnings.push(ConfigWarning::TokenMissing {
            service: "twitter",
            var: config.twitter.token_env.clone(),
        });
    }

    warnings
}
