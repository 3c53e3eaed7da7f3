//! Planner configuration
//!
//! Configuration is read from TOML. Lookup order: an explicit path, then
//! `<root>/.planner/config.toml`, then the per-user config file, then
//! built-in defaults. Environment variables override the backend settings
//! last.

pub mod global;
pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PlannerError, Result};

pub use types::{
    BackendConfig, BackendKind, CollectionsConfig, PlannerConfig, CONFIG_DIR, CONFIG_FILE,
    DEFAULT_AVAILABILITY_COLLECTION, DEFAULT_DATA_DIR, DEFAULT_GRAPH_COLLECTION,
    DEFAULT_TIMEOUT_SECONDS, TIMEOUT_RANGE_SECONDS,
};

/// Overrides the hosted database base URL
pub const BACKEND_URL_ENV_VAR: &str = "PLANNER_BACKEND_URL";
/// Overrides the hosted database access token
pub const AUTH_TOKEN_ENV_VAR: &str = "PLANNER_AUTH_TOKEN";
/// Overrides the hosted database request timeout (seconds)
pub const TIMEOUT_ENV_VAR: &str = "PLANNER_TIMEOUT";

impl PlannerConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PlannerError::io_operation("read config", path.display(), e))?;
        let mut config: Self = toml::from_str(&content).map_err(|e| PlannerError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.backend.timeout_seconds = clamp_timeout(config.backend.timeout_seconds);
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PlannerError::Other(format!("failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve configuration for a project root.
    ///
    /// Returns the config together with the file it came from, if any.
    /// An explicit path that does not exist is an error; the implicit
    /// locations are simply skipped.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let mut config = Self::load(path)?;
            config.apply_env();
            return Ok((config, Some(path.to_path_buf())));
        }

        let candidates = [
            Some(root.join(CONFIG_DIR).join(CONFIG_FILE)),
            global::user_config_path(),
        ];

        for candidate in candidates.into_iter().flatten() {
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "loading config");
                let mut config = Self::load(&candidate)?;
                config.apply_env();
                return Ok((config, Some(candidate)));
            }
        }

        let mut config = Self::default();
        config.apply_env();
        Ok((config, None))
    }

    /// Apply `PLANNER_*` environment overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BACKEND_URL_ENV_VAR).filter(|s| !s.is_empty()) {
            self.backend.url = Some(url);
            self.backend.kind = BackendKind::Rest;
        }

        if let Some(token) = lookup(AUTH_TOKEN_ENV_VAR).filter(|s| !s.is_empty()) {
            self.backend.auth_token = Some(token);
        }

        if let Some(timeout) = lookup(TIMEOUT_ENV_VAR) {
            if let Ok(seconds) = timeout.trim().parse::<u64>() {
                self.backend.timeout_seconds = clamp_timeout(seconds);
            }
        }
    }

    /// Data location for the file and SQLite backends, resolved against `root`
    pub fn data_path(&self, root: &Path) -> PathBuf {
        let configured = match (&self.backend.path, self.backend.kind) {
            (Some(path), _) => path.clone(),
            (None, BackendKind::Sqlite) => Path::new(DEFAULT_DATA_DIR).join("planner.db"),
            (None, _) => PathBuf::from(DEFAULT_DATA_DIR),
        };

        if configured.is_absolute() {
            configured
        } else {
            root.join(configured)
        }
    }
}

fn clamp_timeout(seconds: u64) -> u64 {
    let (min, max) = TIMEOUT_RANGE_SECONDS;
    seconds.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.backend.kind, BackendKind::File);
        assert_eq!(config.backend.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.collections.graph, DEFAULT_GRAPH_COLLECTION);
        assert_eq!(config.collections.availability, DEFAULT_AVAILABILITY_COLLECTION);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = PlannerConfig::default();
        config.backend.kind = BackendKind::Sqlite;
        config.backend.path = Some(PathBuf::from("db/planner.db"));
        config.collections.graph = "cities".to_string();
        config.save(&path).unwrap();

        let loaded = PlannerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[backend]\nkind = \"memory\"\n").unwrap();

        let loaded = PlannerConfig::load(&path).unwrap();
        assert_eq!(loaded.backend.kind, BackendKind::Memory);
        assert_eq!(loaded.collections.graph, DEFAULT_GRAPH_COLLECTION);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[backend]\nkind = \"carrier-pigeon\"\n").unwrap();

        let err = PlannerConfig::load(&path).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_discover_project_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_DIR).join(CONFIG_FILE);
        let mut config = PlannerConfig::default();
        config.collections.availability = "slots".to_string();
        config.save(&path).unwrap();

        let (found, source) = PlannerConfig::discover(dir.path(), None).unwrap();
        assert_eq!(found.collections.availability, "slots");
        assert_eq!(source, Some(path));
    }

    #[test]
    fn test_discover_missing_explicit_path_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(PlannerConfig::discover(dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_overrides_switch_to_rest() {
        let vars: HashMap<&str, &str> = [
            (BACKEND_URL_ENV_VAR, "https://planner.example.com"),
            (AUTH_TOKEN_ENV_VAR, "secret"),
            (TIMEOUT_ENV_VAR, "9999"),
        ]
        .into_iter()
        .collect();

        let mut config = PlannerConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.backend.kind, BackendKind::Rest);
        assert_eq!(
            config.backend.url.as_deref(),
            Some("https://planner.example.com")
        );
        assert_eq!(config.backend.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.backend.timeout_seconds, 300);
    }

    #[test]
    fn test_load_clamps_file_timeout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "[backend]\nkind = \"rest\"\ntimeout_seconds = 0\n").unwrap();
        assert_eq!(PlannerConfig::load(&path).unwrap().backend.timeout_seconds, 1);

        fs::write(&path, "[backend]\ntimeout_seconds = 86400\n").unwrap();
        assert_eq!(PlannerConfig::load(&path).unwrap().backend.timeout_seconds, 300);

        fs::write(&path, "[backend]\ntimeout_seconds = 45\n").unwrap();
        assert_eq!(PlannerConfig::load(&path).unwrap().backend.timeout_seconds, 45);
    }

    #[test]
    fn test_data_path_defaults() {
        let root = Path::new("/srv/planner");
        let mut config = PlannerConfig::default();
        assert_eq!(config.data_path(root), root.join(DEFAULT_DATA_DIR));

        config.backend.kind = BackendKind::Sqlite;
        assert_eq!(
            config.data_path(root),
            root.join(DEFAULT_DATA_DIR).join("planner.db")
        );

        config.backend.path = Some(PathBuf::from("/var/lib/planner"));
        assert_eq!(config.data_path(root), PathBuf::from("/var/lib/planner"));
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("SQLite".parse::<BackendKind>().unwrap(), BackendKind::Sqlite);
        let err = "ftp".parse::<BackendKind>().unwrap_err();
        assert!(matches!(err, PlannerError::Unsupported { .. }));
        assert_eq!(BackendKind::Rest.as_str(), "rest");
    }
}
