//! Configuration system for trends.
//!
//! trends uses TOML configuration files named `.trends.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.trends.toml` files found, then loading `~/.trends.toml` as the global config with lowest
//! precedence. Setting `TRENDS_CONFIG` to a file path replaces all of that with one file.
//!
//! The resolved [`Config`] is an immutable value. It is built once per invocation and handed
//! to the pipeline explicitly; nothing here is process-global.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
    str,
};

pub use discovery::{
    CONFIG_ENV, CONFIG_FILENAME, ConfigOrigin, ConfigSource, SearchPaths, global_config_path,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawGitHubSettings, RawSearchSettings, RawTermSettings, RawTwitterSettings,
    parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Keywords searched when neither the command line nor a config file names any.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "vpn",
    "anonymous browsing",
    "online tracking",
    "online surveillance",
];

/// Largest page size accepted by the repository search API.
pub const MAX_REPOSITORIES: usize = 100;

/// Top-level merged configuration for trends.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.trends.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// What to search for and how many items to fetch.
    pub search: SearchSettings,
    /// Term extraction and ranking settings.
    pub terms: TermSettings,
    /// Repository search service settings.
    pub github: GitHubSettings,
    /// Social post search service settings.
    pub twitter: TwitterSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.trends.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_with(cwd, &SearchPaths::from_env())
    }

    /// Loads configuration for `cwd` from explicit search locations.
    pub fn load_with(cwd: &Path, paths: &SearchPaths) -> Result<Self, ConfigError> {
        let files: Vec<PathBuf> = paths
            .discover(cwd)
            .into_iter()
            .map(|source| source.path)
            .collect();
        Self::load_from_files(&files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.trends.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableConfig {
            search: &self.search,
            terms: &self.terms,
            github: &self.github,
            twitter: &self.twitter,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Borrowed view of [`Config`] used for TOML output.
#[derive(Serialize)]
struct SerializableConfig<'a> {
    /// Search settings.
    search: &'a SearchSettings,
    /// Term settings.
    terms: &'a TermSettings,
    /// Repository service settings.
    github: &'a GitHubSettings,
    /// Social post service settings.
    twitter: &'a TwitterSettings,
}

/// Settings describing what to search for.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Keywords to search for and to count when scoring relevancy.
    pub keywords: Vec<String>,
    /// Number of repositories to fetch per search.
    pub repositories: usize,
    /// Only repositories with more stars than this are returned.
    pub min_stars: u32,
    /// Only repositories with more forks than this are returned.
    pub min_forks: u32,
    /// Order of the scored repository table.
    pub order: ItemOrder,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
            repositories: 30,
            min_stars: 10,
            min_forks: 10,
            order: ItemOrder::default(),
        }
    }
}

/// Settings for term extraction and ranking.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TermSettings {
    /// Number of top terms to report.
    pub limit: usize,
    /// Row normalization applied after TF-IDF weighting.
    pub normalization: Normalization,
    /// Additional words dropped during normalization.
    pub extra_stopwords: Vec<String>,
}

impl Default for TermSettings {
    fn default() -> Self {
        Self {
            limit: 30,
            normalization: Normalization::default(),
            extra_stopwords: Vec::new(),
        }
    }
}

/// Repository search service settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// Base URL of the REST API.
    pub api_base: String,
    /// Environment variable holding the access token.
    pub token_env: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base: String::from("https://api.github.com"),
            token_env: String::from("G_ACCESS_TOKEN"),
        }
    }
}

/// Social post search service settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TwitterSettings {
    /// Whether `trends report` includes social post terms.
    pub enabled: bool,
    /// Base URL of the REST API.
    pub api_base: String,
    /// Environment variable holding the bearer token.
    pub token_env: String,
}

impl Default for TwitterSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base: String::from("https://api.twitter.com"),
            token_env: String::from("T_BEARER_TOKEN"),
        }
    }
}

/// Row normalization applied to TF-IDF weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Scale each document row to unit Euclidean length.
    #[default]
    L2,
    /// Leave raw `count * idf` weights untouched.
    None,
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::L2 => write!(f, "l2"),
            Self::None => write!(f, "none"),
        }
    }
}

impl str::FromStr for Normalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l2" => Ok(Self::L2),
            "none" | "raw" => Ok(Self::None),
            _ => Err(format!(
                "unknown normalization '{s}', expected one of: l2, none"
            )),
        }
    }
}

/// Ordering of scored repositories in the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemOrder {
    /// Keep the order returned by the search service (by stars).
    #[default]
    Source,
    /// Highest relevancy first; ties keep the service order.
    Relevancy,
}

impl fmt::Display for ItemOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Relevancy => write!(f, "relevancy"),
        }
    }
}

impl str::FromStr for ItemOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" | "stars" => Ok(Self::Source),
            "relevancy" | "relevance" => Ok(Self::Relevancy),
            _ => Err(format!(
                "unknown order '{s}', expected one of: source, relevancy"
            )),
        }
    }
}

/// Splits a slash-delimited keyword string into trimmed, non-empty keywords.
///
/// `"Mozilla VPN/online tracking"` becomes `["Mozilla VPN", "online tracking"]`.
pub fn split_keywords(input: &str) -> Vec<String> {
    input
        .split('/')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToString::to_string)
        .collect()
}
