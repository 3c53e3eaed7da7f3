//! Configuration type definitions

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Project-local configuration directory
pub const CONFIG_DIR: &str = ".planner";

/// Configuration file name, both project-local and per-user
pub const CONFIG_FILE: &str = "config.toml";

/// Default data directory for the file and SQLite backends (relative to the root)
pub const DEFAULT_DATA_DIR: &str = ".planner/data";

/// Collection the location graph is persisted under
pub const DEFAULT_GRAPH_COLLECTION: &str = "locationGraph";

/// Collection group availability documents live under
pub const DEFAULT_AVAILABILITY_COLLECTION: &str = "availableTimes";

/// Default timeout for hosted database requests
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// Accepted range for the request timeout, from any source
pub const TIMEOUT_RANGE_SECONDS: (u64, u64) = (1, 300);

/// Planner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Document store backend
    #[serde(default)]
    pub backend: BackendConfig,

    /// Collection paths inside the document store
    #[serde(default)]
    pub collections: CollectionsConfig,
}

/// Which document store to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process only; nothing survives the command
    Memory,
    /// JSON files in a directory
    #[default]
    File,
    /// Single SQLite database file
    Sqlite,
    /// Hosted real-time database over REST
    Rest,
}

impl BackendKind {
    pub const SUPPORTED: &'static str = "memory, file, sqlite, rest";

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::File => "file",
            BackendKind::Sqlite => "sqlite",
            BackendKind::Rest => "rest",
        }
    }
}

impl FromStr for BackendKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "file" => Ok(BackendKind::File),
            "sqlite" => Ok(BackendKind::Sqlite),
            "rest" => Ok(BackendKind::Rest),
            other => crate::bail_unsupported!("backend", other, Self::SUPPORTED),
        }
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,

    /// Directory (file backend) or database file (sqlite backend).
    /// Relative paths resolve against the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Base URL of the hosted database (rest backend)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Access token appended as the `auth` query parameter (rest backend)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Request timeout in seconds (rest backend)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            path: None,
            url: None,
            auth_token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Document paths used by each feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionsConfig {
    #[serde(default = "default_graph_collection")]
    pub graph: String,

    #[serde(default = "default_availability_collection")]
    pub availability: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            graph: default_graph_collection(),
            availability: default_availability_collection(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_graph_collection() -> String {
    DEFAULT_GRAPH_COLLECTION.to_string()
}

fn default_availability_collection() -> String {
    DEFAULT_AVAILABILITY_COLLECTION.to_string()
}
