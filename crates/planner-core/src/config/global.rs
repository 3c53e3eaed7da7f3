//! Per-user configuration location (`~/.config/weekend-planner/config.toml`)

use std::path::PathBuf;

use super::types::CONFIG_FILE;

const USER_CONFIG_DIR: &str = "weekend-planner";
pub const CONFIG_DIR_ENV_VAR: &str = "PLANNER_CONFIG_DIR";

/// Path of the per-user config file, if a config directory can be determined.
///
/// `PLANNER_CONFIG_DIR` takes precedence over the platform config directory.
pub fn user_config_path() -> Option<PathBuf> {
    let config_dir = match std::env::var(CONFIG_DIR_ENV_VAR) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::config_dir()?.join(USER_CONFIG_DIR),
    };

    Some(config_dir.join(CONFIG_FILE))
}
