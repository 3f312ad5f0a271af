//! Clap argument definitions for the `trends` CLI.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use trends_config::{ItemOrder, MAX_REPOSITORIES, Normalization, split_keywords};

/// Parse an item order from a string.
fn parse_order(s: &str) -> Result<ItemOrder, String> {
    s.parse()
}

/// Parse a weight normalization from a string.
fn parse_normalization(s: &str) -> Result<Normalization, String> {
    s.parse()
}

/// Parse a repository count, rejecting values the search API cannot page.
fn parse_repositories(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number"))?;
    if (1..=MAX_REPOSITORIES).contains(&n) {
        Ok(n)
    } else {
        Err(format!("must be between 1 and {MAX_REPOSITORIES}"))
    }
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "trends")]
#[command(about = "Keyword trends across code repositories and social posts")]
pub struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Positional keywords shared by search commands.
#[derive(Args, Debug, Clone, Default)]
pub struct KeywordArgs {
    /// Keywords to search for; each argument may hold several separated by '/'
    /// [default: from config]
    pub keywords: Vec<String>,
}

impl KeywordArgs {
    /// Returns the command-line keywords, or `defaults` when none were given.
    pub fn resolve(&self, defaults: &[String]) -> Vec<String> {
        let given: Vec<String> = self
            .keywords
            .iter()
            .flat_map(|k| split_keywords(k))
            .collect();
        if given.is_empty() {
            defaults.to_vec()
        } else {
            given
        }
    }
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `trends repos`.
#[derive(Args, Debug, Clone)]
pub struct ReposCommand {
    #[command(flatten)]
    /// Search keywords.
    pub keywords: KeywordArgs,

    /// Number of repositories to fetch (1-100) [default: 30]
    #[arg(short = 'n', long, value_parser = parse_repositories)]
    pub limit: Option<usize>,

    /// Only repositories with more stars than this [default: 10]
    #[arg(long)]
    pub min_stars: Option<u32>,

    /// Only repositories with more forks than this [default: 10]
    #[arg(long)]
    pub min_forks: Option<u32>,

    /// Row order: source (as returned, by stars) or relevancy [default: source]
    #[arg(long, value_parser = parse_order)]
    pub sort: Option<ItemOrder>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Where `trends terms` takes its text from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TermSource {
    /// Repository names, descriptions and READMEs
    #[default]
    Github,
    /// Social posts
    Twitter,
}

/// Arguments for `trends terms`.
#[derive(Args, Debug, Clone)]
pub struct TermsCommand {
    #[command(flatten)]
    /// Search keywords.
    pub keywords: KeywordArgs,

    /// Text source to rank terms from
    #[arg(long, value_enum, default_value_t = TermSource::Github)]
    pub source: TermSource,

    /// Number of terms to show [default: 30]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Number of repositories to fetch (1-100) [default: 30]
    #[arg(long, value_parser = parse_repositories)]
    pub repos: Option<usize>,

    /// Row normalization of term weights: l2 or none [default: l2]
    #[arg(long, value_parser = parse_normalization)]
    pub normalization: Option<Normalization>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `trends report`.
#[derive(Args, Debug, Clone)]
pub struct ReportCommand {
    #[command(flatten)]
    /// Search keywords.
    pub keywords: KeywordArgs,

    /// Number of repositories to fetch (1-100) [default: 30]
    #[arg(long, value_parser = parse_repositories)]
    pub repos: Option<usize>,

    /// Row normalization of term weights: l2 or none [default: l2]
    #[arg(long, value_parser = parse_normalization)]
    pub normalization: Option<Normalization>,

    /// Number of terms per ranking [default: 30]
    #[arg(long)]
    pub terms: Option<usize>,

    /// Include social post terms even if disabled in config
    #[arg(long)]
    pub twitter: bool,
}

/// Arguments for `trends init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.trends.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `trends` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search repositories and score their relevancy
    #[command(after_help = "\
EXAMPLES:
  trends repos
  trends repos 'Mozilla VPN/online tracking'
  trends repos vpn tor --sort relevancy -n 50
  trends repos vpn --json")]
    Repos(ReposCommand),

    /// Rank the top terms in repository or social post text
    Terms(TermsCommand),

    /// Print a full JSON report: repositories, repository terms and post terms
    Report(ReportCommand),

    /// Initialize trends configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}
