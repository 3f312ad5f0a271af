//! Implementation of `trends repos`.

use std::process::ExitCode;

use tracing::debug;

use crate::cli::{
    args::ReposCommand,
    context::CommandContext,
    output::{print_json, repository_table},
};

/// Searches repositories and prints them with their relevancy.
pub fn run(ctx: &mut CommandContext, cmd: &ReposCommand) -> ExitCode {
    let search = &mut ctx.config.search;
    if let Some(limit) = cmd.limit {
        search.repositories = limit;
    }
    if let Some(min_stars) = cmd.min_stars {
        search.min_stars = min_stars;
    }
    if let Some(min_forks) = cmd.min_forks {
        search.min_forks = min_forks;
    }
    if let Some(order) = cmd.sort {
        search.order = order;
    }
    let keywords = cmd.keywords.resolve(&search.keywords);
    debug!(?keywords, "repos");

    let github = match ctx.github() {
        Ok(client) => client,
        Err(code) => return code,
    };

    let items = match ctx.pipeline().scored_repositories(&github, &keywords) {
        Ok(items) => items,
        Err(e) => return ctx.pipeline_failure(&e),
    };

    if cmd.output.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("No repositories found.");
        return ExitCode::SUCCESS;
    }
    println!("{}", repository_table(&items));
    ExitCode::SUCCESS
}
