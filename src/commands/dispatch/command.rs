//! Command trait and context for dispatching commands

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::{Builder, Runtime};

use crate::cli::paths::resolve_against;
use crate::cli::Cli;
use planner_core::config::{BackendKind, PlannerConfig};
use planner_core::error::Result;
use planner_core::store::{open_store, DocumentStore};

/// Resolve configuration for this invocation.
///
/// `--store` always selects the file backend rooted at the given directory.
pub fn resolve_config(cli: &Cli, root: &Path) -> Result<PlannerConfig> {
    let explicit = cli.config.as_ref().map(|path| resolve_against(root, path));
    let (mut config, source) = PlannerConfig::discover(root, explicit.as_deref())?;

    if let Some(path) = &cli.store {
        config.backend.kind = BackendKind::File;
        config.backend.path = Some(resolve_against(root, path));
    }

    tracing::debug!(
        source = ?source,
        backend = config.backend.kind.as_str(),
        "resolve_config"
    );
    Ok(config)
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
    runtime: Runtime,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            cli,
            root,
            start,
            runtime,
        })
    }

    pub fn config(&self) -> Result<PlannerConfig> {
        resolve_config(self.cli, self.root)
    }

    /// Open the configured document store
    pub fn open_store(&self, config: &PlannerConfig) -> Result<Arc<dyn DocumentStore>> {
        let store = open_store(config, self.root)?;
        tracing::debug!(elapsed = ?self.start.elapsed(), "open_store");
        Ok(store)
    }

    /// Drive a store operation to completion on this invocation's runtime
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("planner {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Plan weekends: connect locations and find shared free time.");
        println!();
        println!("Run `planner --help` for usage information.");
        Ok(())
    }
}
