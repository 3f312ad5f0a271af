//! Implementation of `trends init`.

use std::{fs, path::PathBuf, process::ExitCode};

use trends_config::{CONFIG_FILENAME, Config, global_config_path, global_template, local_template};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Config file `init` writes.
enum Target {
    /// `.trends.toml` in the working directory.
    Project(PathBuf),
    /// `~/.trends.toml`.
    Global(PathBuf),
}

impl Target {
    /// Picks the global file for `--global` or when run from the home directory.
    fn choose(ctx: &CommandContext, cmd: &InitCommand) -> Result<Self, ExitCode> {
        let global = global_config_path();
        let in_home = global
            .as_ref()
            .and_then(|p| p.parent())
            .is_some_and(|home| home == ctx.cwd);

        if !(cmd.global || in_home) {
            return Ok(Self::Project(ctx.cwd.join(CONFIG_FILENAME)));
        }
        global.map(Self::Global).ok_or_else(|| {
            eprintln!("error: could not determine home directory");
            ExitCode::FAILURE
        })
    }

    /// Path to write.
    fn path(&self) -> &PathBuf {
        match self {
            Self::Project(path) | Self::Global(path) => path,
        }
    }

    /// Commented-out template for this target.
    fn template(&self) -> String {
        match self {
            Self::Project(_) => local_template(),
            Self::Global(_) => global_template(),
        }
    }
}

/// Writes a commented-out config template, then reports the keywords now in effect.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let target = match Target::choose(ctx, cmd) {
        Ok(target) => target,
        Err(code) => return code,
    };
    let path = target.path();

    if path.exists() && !cmd.force {
        eprintln!("error: configuration file already exists: {}", path.display());
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }
    if let Err(e) = fs::write(path, target.template()) {
        eprintln!("error: failed to write {}: {e}", path.display());
        return ExitCode::FAILURE;
    }
    println!("Created {}", path.display());

    // Other config files may still be broken; that should not fail init.
    match Config::load(&ctx.cwd) {
        Ok(config) if config.search.keywords.is_empty() => {
            println!("No keywords configured. Set [search] keywords in {}", path.display());
        }
        Ok(config) => println!("Keywords: {}", config.search.keywords.join(" / ")),
        Err(e) => eprintln!("warning: {e}"),
    }
    ExitCode::SUCCESS
}
