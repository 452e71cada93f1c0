//! CLI commands implementation

pub mod config;
pub mod search;

#[cfg(test)]
mod cli_integration_tests;
