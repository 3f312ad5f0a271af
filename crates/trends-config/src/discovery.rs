//! Configuration file discovery.
//!
//! Sources in precedence order:
//!
//! 1. The file named by `TRENDS_CONFIG`. When set, nothing else is read.
//! 2. Project files, found walking up from the working directory. A file with `root = true`
//!    ends the walk and shuts out the global file.
//! 3. The global `~/.trends.toml`.

use std::{
    env,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".trends.toml";

/// Environment variable naming a config file that replaces discovery.
pub const CONFIG_ENV: &str = "TRENDS_CONFIG";

/// Where a discovered config file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Named by `TRENDS_CONFIG`.
    Override,
    /// Found in the working directory or one of its ancestors.
    Project,
    /// The per-user file in the home directory.
    Global,
}

/// A config file path and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// Path to the file.
    pub path: PathBuf,
    /// How the file was found.
    pub origin: ConfigOrigin,
}

/// Fixed locations consulted alongside the project walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    /// Explicit config file; disables the walk and the global file.
    pub override_file: Option<PathBuf>,
    /// Per-user config file.
    pub global_file: Option<PathBuf>,
}

impl SearchPaths {
    /// Reads `TRENDS_CONFIG` and the home directory from the environment.
    pub fn from_env() -> Self {
        Self {
            override_file: env::var_os(CONFIG_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            global_file: global_config_path(),
        }
    }

    /// Lists config sources for `cwd`, highest precedence first.
    ///
    /// An override is returned even if the file is missing, so loading reports the bad path
    /// instead of quietly falling back to defaults.
    pub fn discover(&self, cwd: &Path) -> Vec<ConfigSource> {
        if let Some(path) = &self.override_file {
            return vec![ConfigSource {
                path: cwd.join(path),
                origin: ConfigOrigin::Override,
            }];
        }

        let mut sources = Vec::new();
        for dir in cwd.ancestors() {
            let path = dir.join(CONFIG_FILENAME);
            if !path.is_file() || self.global_file.as_ref() == Some(&path) {
                continue;
            }
            let stop = is_root_config(&path);
            sources.push(ConfigSource {
                path,
                origin: ConfigOrigin::Project,
            });
            if stop {
                return sources;
            }
        }

        if let Some(global) = self.global_file.as_ref().filter(|p| p.is_file()) {
            sources.push(ConfigSource {
                path: global.clone(),
                origin: ConfigOrigin::Global,
            });
        }
        sources
    }
}

/// Returns the path to the global configuration file (`~/.trends.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Writes `body` to `<rel>/.trends.toml` under `root` and returns the file path.
    fn write_config(root: &TempDir, rel: &str, body: &str) -> PathBuf {
        let dir = root.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, body).unwrap();
        path
    }

    /// Creates `<rel>` under `root` and returns it.
    fn mkdir(root: &TempDir, rel: &str) -> PathBuf {
        let dir = root.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Search paths with a global file under `root/home` and no override.
    fn with_home(root: &TempDir) -> SearchPaths {
        SearchPaths {
            override_file: None,
            global_file: Some(root.path().join("home").join(CONFIG_FILENAME)),
        }
    }

    /// Paths and origins, for compact assertions.
    fn listed(sources: &[ConfigSource]) -> Vec<(PathBuf, ConfigOrigin)> {
        sources
            .iter()
            .map(|s| (s.path.clone(), s.origin))
            .collect()
    }

    #[test]
    fn test_nothing_found() {
        let root = tempfile::tempdir().unwrap();
        let cwd = mkdir(&root, "work/vpn-survey");

        assert!(with_home(&root).discover(&cwd).is_empty());
    }

    #[test]
    fn test_project_files_closest_first_then_global() {
        let root = tempfile::tempdir().unwrap();
        let global = write_config(&root, "home", "[terms]\nlimit = 5\n");
        let outer = write_config(&root, "work", "[search]\nrepositories = 50\n");
        let inner = write_config(&root, "work/vpn-survey", "[search]\nkeywords = \"vpn\"\n");
        let cwd = mkdir(&root, "work/vpn-survey/notes");

        let sources = with_home(&root).discover(&cwd);

        assert_eq!(
            listed(&sources),
            vec![
                (inner, ConfigOrigin::Project),
                (outer, ConfigOrigin::Project),
                (global, ConfigOrigin::Global),
            ]
        );
    }

    #[test]
    fn test_root_marker_shuts_out_parents_and_global() {
        let root = tempfile::tempdir().unwrap();
        write_config(&root, "home", "[terms]\nlimit = 5\n");
        write_config(&root, "work", "[search]\nrepositories = 50\n");
        let survey = write_config(&root, "work/vpn-survey", "root = true\n");
        let cwd = mkdir(&root, "work/vpn-survey/notes");

        let sources = with_home(&root).discover(&cwd);

        assert_eq!(listed(&sources), vec![(survey, ConfigOrigin::Project)]);
    }

    #[test]
    fn test_directory_named_like_config_is_ignored() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("work").join(CONFIG_FILENAME)).unwrap();
        let cwd = mkdir(&root, "work/vpn-survey");

        assert!(with_home(&root).discover(&cwd).is_empty());
    }

    #[test]
    fn test_global_file_is_not_listed_twice_when_walking_through_home() {
        let root = tempfile::tempdir().unwrap();
        let global = write_config(&root, "home", "[terms]\nlimit = 5\n");
        let cwd = mkdir(&root, "home/projects/tor");

        let sources = with_home(&root).discover(&cwd);

        assert_eq!(listed(&sources), vec![(global, ConfigOrigin::Global)]);
    }

    #[test]
    fn test_override_replaces_discovery() {
        let root = tempfile::tempdir().unwrap();
        write_config(&root, "home", "[terms]\nlimit = 5\n");
        write_config(&root, "work", "[search]\nrepositories = 50\n");
        let cwd = mkdir(&root, "work");
        let paths = SearchPaths {
            override_file: Some(PathBuf::from("alt/trends.toml")),
            ..with_home(&root)
        };

        let sources = paths.discover(&cwd);

        // Relative overrides resolve against the working directory, and missing files are kept.
        assert_eq!(
            listed(&sources),
            vec![(cwd.join("alt/trends.toml"), ConfigOrigin::Override)]
        );
    }

    #[test]
    fn test_global_config_path_uses_config_filename() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
    }
}
