//! CLI mode implementation
//!
//! Provides the command-line interface over the table search

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::records::Entity;

/// Maglo CLI
#[derive(Parser)]
#[command(name = "maglo")]
#[command(about = "Fuzzy search over Maglo invoice and transaction tables", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter and rank the rows of a table fixture
    Search(SearchArgs),
    /// Print the effective ranking configuration for a table
    Config(ConfigArgs),
}

/// Output format for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}

/// Search command arguments
#[derive(Parser, Clone, Debug)]
pub struct SearchArgs {
    /// Table the rows belong to
    #[arg(short = 'e', long, value_enum)]
    pub entity: Entity,

    /// JSON fixture holding the rows (array, or object with a `data` array)
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Search terms (case- and accent-insensitive)
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Status filter, e.g. paid or pending ("all" disables it)
    #[arg(short = 's', long)]
    pub status: Option<String>,

    /// Table URL state such as "?search=acme&status=paid"; --query/--status take precedence
    #[arg(short = 'p', long)]
    pub params: Option<String>,

    /// Maximum number of results (default 50, max 500)
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Search config file (defaults to <config dir>/maglo/search.json)
    #[arg(short = 'c', long, env = "MAGLO_SEARCH_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Config command arguments
#[derive(Parser, Clone, Debug)]
pub struct ConfigArgs {
    /// Table to show the configuration for
    #[arg(short = 'e', long, value_enum)]
    pub entity: Entity,

    /// Search config file (defaults to <config dir>/maglo/search.json)
    #[arg(short = 'c', long, env = "MAGLO_SEARCH_CONFIG")]
    pub config: Option<PathBuf>,
}
