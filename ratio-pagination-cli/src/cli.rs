use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Cursor pagination over a JSON dataset
#[derive(Parser, Debug)]
#[command(name = "ratio-page", version, about = "ratio-pagination CLI")]
pub struct Cli {
    /// TOML file with a [pagination] table
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// JSON array of documents, each with an `_id`
    #[arg(long)]
    pub data: PathBuf,
    /// Page size (defaults to the configured default_limit)
    #[arg(long)]
    pub limit: Option<u32>,
    /// Field to paginate on (defaults to the primary key)
    #[arg(long)]
    pub field: Option<String>,
    /// Sort ascending instead of descending
    #[arg(long)]
    pub ascending: bool,
    /// Mongo-style match document, e.g. '{"user_id": "miguel"}'
    #[arg(long = "match")]
    pub filter: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Fetch one page in table mode (previous + next cursors)
    Table {
        #[command(flatten)]
        page: PageArgs,
        /// Cursor token of the page to continue after
        #[arg(long, conflicts_with = "previous")]
        next: Option<String>,
        /// Cursor token of the page to go back before
        #[arg(long)]
        previous: Option<String>,
    },
    /// Fetch one page in infinite mode (next cursor only)
    Infinite {
        #[command(flatten)]
        page: PageArgs,
        /// Cursor token of the page to continue after
        #[arg(long)]
        next: Option<String>,
    },
    /// Walk every page and check round trips and strategy agreement
    Validate {
        #[command(flatten)]
        page: PageArgs,
    },
}
