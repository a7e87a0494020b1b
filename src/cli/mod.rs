//! Command-line interface for `trackline`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::logging;
use trackline_lib::classify::WorkStream;

/// `trackline` (tln) - Gantt timeline dashboard for a Redmine-compatible tracker.
#[derive(Parser, Debug)]
#[command(name = "tln")]
#[command(
    author,
    version,
    about = "Read-only Gantt timeline dashboard over a Redmine-compatible tracker",
    long_about = None,
    after_help = "Read-only: never writes to the tracker. Credentials via --url/--api-key or REDMINE_URL/REDMINE_API_KEY."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Tracker base URL
    #[arg(long, global = true, env = "REDMINE_URL")]
    pub url: Option<String>,

    /// Tracker API key
    #[arg(long, global = true, env = "REDMINE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the grouped Gantt board for one or more projects
    Board(BoardArgs),

    /// List projects visible to the API key
    Projects,

    /// Flat issue listing
    Issues(IssuesArgs),

    /// Serve the stdio protocol bridge
    Serve,

    /// Show version information
    Version,
}

fn parse_stream(s: &str) -> std::result::Result<WorkStream, String> {
    s.parse()
}

#[derive(Args, Debug)]
pub struct BoardArgs {
    /// Project id to load (repeatable)
    #[arg(short, long = "project", required = true)]
    pub project: Vec<u64>,

    /// Keep only issues whose id or subject matches (features matching by
    /// subject keep all their parts)
    #[arg(long)]
    pub ticket: Option<String>,

    /// Keep only issues whose assignee name matches
    #[arg(long)]
    pub assignee: Option<String>,

    /// Show only these work streams: be, fe, plan, design, qa (repeatable)
    #[arg(long = "stream", value_parser = parse_stream)]
    pub stream: Vec<WorkStream>,

    /// Compact hour-bar list instead of the day grid
    #[arg(long)]
    pub list: bool,
}

#[derive(Args, Debug)]
pub struct IssuesArgs {
    /// Restrict to one project
    #[arg(short, long)]
    pub project: Option<u64>,

    /// Filter by status id
    #[arg(long)]
    pub status: Option<u64>,

    /// Filter by assignee user id
    #[arg(long)]
    pub assigned_to: Option<u64>,

    /// Maximum number of issues to fetch (upstream cap 100)
    #[arg(long, default_value_t = 100)]
    pub limit: u32,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    match cli.command {
        Commands::Board(args) => {
            commands::board::execute(&args, cli.url, cli.api_key, cli.json)?;
        }
        Commands::Projects => {
            commands::projects::execute(cli.url, cli.api_key, cli.json)?;
        }
        Commands::Issues(args) => {
            commands::issues::execute(&args, cli.url, cli.api_key, cli.json)?;
        }
        Commands::Serve => {
            commands::serve::execute(cli.url, cli.api_key)?;
        }
        Commands::Version => {
            println!("tln {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
