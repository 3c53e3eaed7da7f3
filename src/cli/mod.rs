//! CLI argument parsing for the planner
//!
//! Global flags: --root, --config, --store, --format, --quiet, --verbose,
//! --log-level, --log-json

pub mod availability;
pub mod graph;
pub mod output;
pub mod parse;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use availability::AvailabilityCommands;
pub use graph::GraphCommands;
pub use output::OutputFormat;

/// Weekend Planner - connected locations and shared free time
#[derive(Parser, Debug)]
#[command(name = "planner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for config discovery and local data
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Data directory for the file backend (overrides configured backend)
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (error, warn, info, debug, trace, or a full directive)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and query the location graph
    Graph {
        #[command(subcommand)]
        command: GraphCommands,
    },

    /// Record group availability and find common free times
    Availability {
        #[command(subcommand)]
        command: AvailabilityCommands,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "planner", "graph", "path", "Delhi", "Agra", "--format", "json", "--store", "data",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.store, Some(PathBuf::from("data")));
        assert!(matches!(
            cli.command,
            Some(Commands::Graph {
                command: GraphCommands::Path { .. }
            })
        ));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = Cli::try_parse_from(["planner", "--format", "xml", "graph", "show"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
