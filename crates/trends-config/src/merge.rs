//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules.

use std::path::{Path, PathBuf};

use crate::{
    Config, GitHubSettings, SearchSettings, TermSettings, TwitterSettings,
    parse::{
        RawConfig, RawGitHubSettings, RawSearchSettings, RawTermSettings, RawTwitterSettings,
    },
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings and keyword lists: first defined value wins
/// - Extra stopwords: union of all files, highest precedence first, duplicates dropped
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    if configs.is_empty() {
        return Config::default();
    }

    let mut search = SearchSettings::default();
    let mut terms = TermSettings::default();
    let mut github = GitHubSettings::default();
    let mut twitter = TwitterSettings::default();

    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref s) = raw.search {
            apply_raw_search(&mut search, s);
        }
        if let Some(ref t) = raw.terms {
            apply_raw_terms(&mut terms, t);
        }
        if let Some(ref g) = raw.github {
            apply_raw_github(&mut github, g);
        }
        if let Some(ref t) = raw.twitter {
            apply_raw_twitter(&mut twitter, t);
        }
    }

    terms.extra_stopwords = merge_extra_stopwords(configs);

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Config {
        search,
        terms,
        github,
        twitter,
        config_root,
    }
}

/// Applies raw search settings to result, overwriting any present values.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.expanded_keywords() {
        result.keywords = v;
    }
    if let Some(v) = raw.repositories {
        result.repositories = v;
    }
    if let Some(v) = raw.min_stars {
        result.min_stars = v;
    }
    if let Some(v) = raw.min_forks {
        result.min_forks = v;
    }
    if let Some(v) = raw.order {
        result.order = v;
    }
}

/// Applies raw term settings to result (not the stopword list).
fn apply_raw_terms(result: &mut TermSettings, raw: &RawTermSettings) {
    if let Some(v) = raw.limit {
        result.limit = v;
    }
    if let Some(v) = raw.normalization {
        result.normalization = v;
    }
}

/// Applies raw repository service settings.
fn apply_raw_github(result: &mut GitHubSettings, raw: &RawGitHubSettings) {
    if let Some(ref v) = raw.api_base {
        result.api_base.clone_from(v);
    }
    if let Some(ref v) = raw.token_env {
        result.token_env.clone_from(v);
    }
}

/// Applies raw social post service settings.
fn apply_raw_twitter(result: &mut TwitterSettings, raw: &RawTwitterSettings) {
    if let Some(v) = raw.enabled {
        result.enabled = v;
    }
    if let Some(ref v) = raw.api_base {
        result.api_base.clone_from(v);
    }
    if let Some(ref v) = raw.token_env {
        result.token_env.clone_from(v);
    }
}

/// Collects extra stopwords from every config, lowercased, in precedence order.
fn merge_extra_stopwords(configs: &[ParsedConfig]) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for parsed in configs {
        let Some(extra) = parsed
            .config
            .terms
            .as_ref()
            .and_then(|t| t.extra_stopwords.as_ref())
        else {
            continue;
        };
        for word in extra {
            let word = word.trim().to_lowercase();
            if !word.is_empty() && !words.contains(&word) {
                words.push(word);
            }
        }
    }
    words
}
