//! Command dispatch for the planner

use std::time::Instant;

use crate::cli::paths::resolve_root_path;
use crate::cli::{Cli, Commands};
use crate::commands;
use planner_core::error::Result;
use tracing::debug;

mod command;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = resolve_root_path(cli.root.clone());

    debug!(elapsed = ?start.elapsed(), root = %root.display(), "resolve_root");

    let ctx = CommandContext::new(cli, &root, start)?;

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Graph { command } => commands::graph::execute(ctx, command),
            Commands::Availability { command } => commands::availability::execute(ctx, command),
        }
    }
}
