//! Implementation of `trends report`.

use std::process::ExitCode;

use trends_source::PostSearch;

use crate::cli::{args::ReportCommand, context::CommandContext, output::print_json};

/// Runs a full fetch-and-score cycle and prints the report as JSON.
pub fn run(ctx: &mut CommandContext, cmd: &ReportCommand) -> ExitCode {
    if let Some(repos) = cmd.repos {
        ctx.config.search.repositories = repos;
    }
    if let Some(normalization) = cmd.normalization {
        ctx.config.terms.normalization = normalization;
    }
    if let Some(terms) = cmd.terms {
        if terms == 0 {
            eprintln!("error: --terms must be at least 1");
            return ExitCode::FAILURE;
        }
        ctx.config.terms.limit = terms;
    }
    let keywords = cmd.keywords.resolve(&ctx.config.search.keywords);

    let github = match ctx.github() {
        Ok(client) => client,
        Err(code) => return code,
    };
    let twitter = if cmd.twitter || ctx.config.twitter.enabled {
        match ctx.twitter() {
            Ok(client) => Some(client),
            Err(code) => return code,
        }
    } else {
        None
    };

    let posts = twitter.as_ref().map(|t| t as &dyn PostSearch);
    match ctx.pipeline().report(&github, posts, &keywords) {
        Ok(report) => print_json(&report),
        Err(e) => ctx.pipeline_failure(&e),
    }
}
