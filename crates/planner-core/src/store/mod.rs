//! Document store backends
//!
//! The planner persists whole JSON documents at slash-separated paths
//! (`locationGraph`, `availableTimes/<group>`). Every backend offers the same
//! two operations:
//! - `write`: full overwrite of the document at a path (never a merge)
//! - `read`: the document at a path, or `None` when nothing is stored
//!
//! Writing JSON `null` removes the document. Concurrent writers are
//! last-writer-wins; failures are returned to the caller without retry.

mod file;
mod memory;
mod rest;
mod sqlite;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::{BackendKind, PlannerConfig};
use crate::error::{PlannerError, Result};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use sqlite::SqliteStore;

/// Persistence collaborator for graph and availability documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Replace the document stored at `path`
    async fn write(&self, path: &str, document: &Value) -> Result<()>;

    /// Fetch the document stored at `path`
    async fn read(&self, path: &str) -> Result<Option<Value>>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Validate and normalize a document path.
///
/// Leading and trailing slashes are dropped; empty paths and `.`/`..`
/// segments are rejected so file-backed stores cannot escape their root.
pub fn normalize_path(path: &str) -> Result<String> {
    let segments: Vec<&str> = path.trim().trim_matches('/').split('/').collect();

    if segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
        return Err(PlannerError::invalid_value("document path", path));
    }

    Ok(segments.join("/"))
}

/// Open the backend selected by `config`, resolving local paths against `root`.
pub fn open_store(config: &PlannerConfig, root: &Path) -> Result<Arc<dyn DocumentStore>> {
    let backend = &config.backend;
    let store: Arc<dyn DocumentStore> = match backend.kind {
        BackendKind::Memory => Arc::new(MemoryStore::new()),
        BackendKind::File => Arc::new(FileStore::new(config.data_path(root))),
        BackendKind::Sqlite => Arc::new(SqliteStore::open(&config.data_path(root))?),
        BackendKind::Rest => {
            let Some(url) = backend.url.as_deref() else {
                crate::bail_usage!("rest backend requires [backend].url or PLANNER_BACKEND_URL");
            };
            Arc::new(RestStore::new(
                url,
                backend.auth_token.clone(),
                backend.timeout_seconds,
            )?)
        }
    };

    tracing::debug!(backend = backend.kind.as_str(), store = %store.describe(), "open_store");
    Ok(store)
}

#[cfg(test)]
mod tests;
