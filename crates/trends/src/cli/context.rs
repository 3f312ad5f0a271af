//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use trends_config::Config;
use trends_source::{GitHubClient, SourceError, TwitterClient};

use crate::{Pipeline, PipelineError};

/// Exit code for rejected or missing credentials.
pub const CREDENTIAL_FAILURE: u8 = 3;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Builds a pipeline from the loaded configuration.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(&self.config.search, &self.config.terms)
    }

    /// Creates the repository search client.
    pub fn github(&self) -> Result<GitHubClient, ExitCode> {
        GitHubClient::from_settings(&self.config.github).map_err(|e| self.source_failure(&e))
    }

    /// Creates the social post search client.
    pub fn twitter(&self) -> Result<TwitterClient, ExitCode> {
        TwitterClient::from_settings(&self.config.twitter).map_err(|e| self.source_failure(&e))
    }

    /// Reports a pipeline error and returns the matching exit code.
    pub fn pipeline_failure(&self, err: &PipelineError) -> ExitCode {
        match err {
            PipelineError::Source(e) => self.source_failure(e),
            PipelineError::NoKeywords => {
                eprintln!("error: {err}");
                eprintln!("Pass keywords on the command line or set [search] keywords.");
                ExitCode::FAILURE
            }
        }
    }

    /// Reports an adapter error and returns the matching exit code.
    ///
    /// Credential failures name the variable to renew and exit with [`CREDENTIAL_FAILURE`].
    pub fn source_failure(&self, err: &SourceError) -> ExitCode {
        eprintln!("error: {err}");
        match err {
            SourceError::Auth { service, .. } => {
                eprintln!("Renew the token in {}.", self.token_var(service));
                ExitCode::from(CREDENTIAL_FAILURE)
            }
            SourceError::MissingToken { var } => {
                eprintln!("Set {var} to a valid token.");
                ExitCode::from(CREDENTIAL_FAILURE)
            }
            _ => ExitCode::FAILURE,
        }
    }

    /// Returns the token variable configured for a service name.
    fn token_var(&self, service: &str) -> &str {
        if service.eq_ignore_ascii_case("twitter") {
            &self.config.twitter.token_env
        } else {
            &self.config.github.token_env
        }
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
