//! Implementation of `trends config`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings, with validation warnings on stderr.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    for warning in config.validate() {
        eprintln!("warning: {warning}");
    }
    match config.settings_to_toml() {
        Ok(toml) => {
            if let Some(root) = &config.config_root {
                println!("# config root: {}", root.display());
            }
            print!("{toml}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
