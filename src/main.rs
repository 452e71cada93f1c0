//! maglo CLI (Rust)
//!
//! Runs the Maglo table search over JSON fixtures:
//! - `search` - filter and rank invoice or transaction rows
//! - `config` - print the effective ranking options for a table

use anyhow::Result;
use clap::Parser;
use maglo::cli::{Cli, Commands};
use maglo::error::AppError;
use maglo::tools;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let result = match cli.command {
        Some(Commands::Search(args)) => tools::search::execute_search(args),
        Some(Commands::Config(args)) => tools::config::execute_config(args),
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    // Handle result and exit with appropriate code
    match result.map_err(anyhow::Error::from) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Map an error to the process exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<AppError>().map_or(5, AppError::exit_code)
}
