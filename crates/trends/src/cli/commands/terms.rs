//! Implementation of `trends terms`.

use std::{num::NonZeroUsize, process::ExitCode};

use crate::cli::{
    args::{TermSource, TermsCommand},
    context::CommandContext,
    output::{print_json, term_bars},
};

/// Ranks the top terms from repository or social post text.
pub fn run(ctx: &mut CommandContext, cmd: &TermsCommand) -> ExitCode {
    if let Some(repos) = cmd.repos {
        ctx.config.search.repositories = repos;
    }
    if let Some(normalization) = cmd.normalization {
        ctx.config.terms.normalization = normalization;
    }
    let keywords = cmd.keywords.resolve(&ctx.config.search.keywords);
    let pipeline = ctx.pipeline();
    let n = match cmd.limit {
        Some(limit) => match NonZeroUsize::new(limit) {
            Some(n) => n,
            None => {
                eprintln!("error: --limit must be at least 1");
                return ExitCode::FAILURE;
            }
        },
        None => pipeline.term_limit(),
    };

    let terms = match cmd.source {
        TermSource::Github => {
            let github = match ctx.github() {
                Ok(client) => client,
                Err(code) => return code,
            };
            match pipeline.fetch_repositories(&github, &keywords) {
                Ok(items) => pipeline.repository_terms(&items, n),
                Err(e) => return ctx.pipeline_failure(&e),
            }
        }
        TermSource::Twitter => {
            let twitter = match ctx.twitter() {
                Ok(client) => client,
                Err(code) => return code,
            };
            match pipeline.fetch_posts(&twitter, &keywords) {
                Ok(posts) => pipeline.post_terms(&posts, n),
                Err(e) => return ctx.pipeline_failure(&e),
            }
        }
    };

    if cmd.output.json {
        return print_json(&terms);
    }

    if terms.is_empty() {
        println!("No terms found.");
        return ExitCode::SUCCESS;
    }
    print!("{}", term_bars(&terms));
    ExitCode::SUCCESS
}
