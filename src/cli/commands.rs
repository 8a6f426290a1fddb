//! CLI commands and argument parsing

use crate::output::OutputFormat;
use crate::types::Region;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fetch events from the Mailgun Events API
#[derive(Parser, Debug)]
#[command(name = "mailgun-events")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API key (overrides the config file)
    #[arg(long, global = true, env = "MAILGUN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all events in a time range
    Fetch {
        /// Sending domain (defaults to the config file's `domain`)
        #[arg(short, long)]
        domain: Option<String>,

        /// API region (defaults to the config file's `region`)
        #[arg(short, long, value_enum)]
        region: Option<Region>,

        /// Start of the window: Unix seconds, RFC 3339 or `YYYY-MM-DD[ HH:MM[:SS]]` (UTC)
        #[arg(short, long)]
        begin: String,

        /// End of the window, same formats as --begin
        #[arg(short, long)]
        end: String,

        /// Filter field as key=value (repeatable), e.g. event=delivered
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        /// Print only this dotted field of each event, e.g. recipient
        #[arg(long)]
        field: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration
    Validate,
}
