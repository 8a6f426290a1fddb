//! CLI module
//!
//! Command-line interface for fetching events.
//!
//! # Commands
//!
//! - `fetch` - Fetch every event in a time range and write it out
//! - `validate` - Check the configuration and show the resolved settings

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
