//! trends: keyword trend analysis.
//!
//! Searches a repository host (and optionally a social post service) for a set of keywords,
//! then reports which terms dominate the results and how relevant each repository is to the
//! search. Nothing persists between runs; every invocation fetches and recomputes.

#![warn(missing_docs)]

pub mod cli;
pub mod pipeline;

pub use pipeline::{Pipeline, PipelineError, ScoredItem, TrendReport};
