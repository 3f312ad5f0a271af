//! Configuration file parsing.
//!
//! Parses individual `.trends.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::{ConfigError, ItemOrder, Normalization, split_keywords};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
    /// Term settings section.
    pub terms: Option<RawTermSettings>,
    /// Repository service section.
    pub github: Option<RawGitHubSettings>,
    /// Social post service section.
    pub twitter: Option<RawTwitterSettings>,
}

/// Raw search settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Keywords, either an array or a single slash-delimited string.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub keywords: Option<Vec<String>>,
    /// Number of repositories to fetch.
    pub repositories: Option<usize>,
    /// Star floor for repository search.
    pub min_stars: Option<u32>,
    /// Fork floor for repository search.
    pub min_forks: Option<u32>,
    /// Output order of scored repositories.
    pub order: Option<ItemOrder>,
}

impl RawSearchSettings {
    /// Returns the keywords with slash-delimited entries expanded.
    pub fn expanded_keywords(&self) -> Option<Vec<String>> {
        self.keywords
            .as_ref()
            .map(|entries| entries.iter().flat_map(|e| split_keywords(e)).collect())
    }
}

/// Raw term settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTermSettings {
    /// Number of top terms to report.
    pub limit: Option<usize>,
    /// Row normalization after weighting.
    pub normalization: Option<Normalization>,
    /// Additional stopwords.
    pub extra_stopwords: Option<Vec<String>>,
}

/// Raw repository service settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGitHubSettings {
    /// Base URL of the REST API.
    pub api_base: Option<String>,
    /// Environment variable holding the access token.
    pub token_env: Option<String>,
}

/// Raw social post service settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTwitterSettings {
    /// Whether reports include social post terms.
    pub enabled: Option<bool>,
    /// Base URL of the REST API.
    pub api_base: Option<String>,
    /// Environment variable holding the bearer token.
    pub token_env: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
