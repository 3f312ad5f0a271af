//! Integration tests for trends-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge -> validate.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use trends_config::{Config, ConfigError, ItemOrder, Normalization, SearchPaths};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_root_config_ignores_parents() {
    let env = TestEnv::new();
    env.create_file(".trends.toml", "[search]\nrepositories = 99\n");
    env.create_file(
        "project/.trends.toml",
        r#"
root = true

[search]
keywords = "vpn/online tracking"
order = "relevancy"

[terms]
limit = 12
normalization = "none"
"#,
    );
    let cwd = env.create_dir("project/src");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.search.keywords, vec!["vpn", "online tracking"]);
    assert_eq!(config.search.order, ItemOrder::Relevancy);
    // The parent config is above the root marker.
    assert_eq!(config.search.repositories, 30);
    assert_eq!(config.terms.limit, 12);
    assert_eq!(config.terms.normalization, Normalization::None);
    assert_eq!(config.config_root, Some(env.path().join("project")));
}

#[test]
fn test_load_nested_configs_merge() {
    let env = TestEnv::new();
    env.create_file(
        ".trends.toml",
        "root = true\n[search]\nrepositories = 50\nmin_stars = 500\n",
    );
    env.create_file("a/.trends.toml", "[search]\nrepositories = 20\n");
    let cwd = env.create_dir("a/b");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.search.repositories, 20);
    assert_eq!(config.search.min_stars, 500);
}

#[test]
fn test_load_from_files_reports_parse_errors() {
    let env = TestEnv::new();
    let bad = env.create_file(".trends.toml", "[search\nrepositories = ");

    let result = Config::load_from_files(&[bad.clone()]);

    match result {
        Err(ConfigError::ParseToml { path, .. }) => assert_eq!(path, bad),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_load_from_no_files_is_default() {
    let config = Config::load_from_files(&[]).unwrap();
    assert_eq!(config.search.repositories, 30);
    assert_eq!(config.terms.limit, 30);
}

#[test]
fn test_loaded_config_round_trips_through_settings_toml() {
    let env = TestEnv::new();
    let file = env.create_file(
        ".trends.toml",
        "[search]\nkeywords = [\"privacy\"]\n[terms]\nextra_stopwords = [\"badge\"]\n",
    );
    let config = Config::load_from_files(&[file]).unwrap();

    let rendered = config.settings_to_toml().unwrap();
    let reparsed_path = env.create_file("rendered/.trends.toml", &rendered);
    let reparsed = Config::load_from_files(&[reparsed_path]).unwrap();

    assert_eq!(reparsed.search.keywords, vec!["privacy"]);
    assert_eq!(reparsed.terms.extra_stopwords, vec!["badge"]);
}

#[test]
fn test_override_file_replaces_discovery() {
    let env = TestEnv::new();
    env.create_file(".trends.toml", "root = true\n[search]\nrepositories = 99\n");
    let shared = env.create_file("shared/survey.toml", "[search]\nrepositories = 7\n");
    let paths = SearchPaths {
        override_file: Some(shared),
        global_file: None,
    };

    let config = Config::load_with(env.path(), &paths).unwrap();

    assert_eq!(config.search.repositories, 7);
    assert_eq!(config.config_root, Some(env.path().join("shared")));
}

#[test]
fn test_missing_override_file_is_an_error() {
    let env = TestEnv::new();
    let paths = SearchPaths {
        override_file: Some(env.path().join("missing.toml")),
        global_file: None,
    };

    match Config::load_with(env.path(), &paths) {
        Err(ConfigError::ReadFile { path, .. }) => assert_eq!(path, env.path().join("missing.toml")),
        other => panic!("expected read error, got {other:?}"),
    }
}
