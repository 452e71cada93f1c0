//! Maglo table search
//!
//! Fuzzy search and ranking for the Maglo dashboard tables:
//! - [`search`] - framework-free index, normalizer and ranker
//! - [`records`] - invoice and transaction rows with their search projections
//! - [`tools`] - the `search` and `config` commands behind the CLI

pub mod cli;
pub mod config;
pub mod error;
pub mod records;
pub mod search;
pub mod tools;
