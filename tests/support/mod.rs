use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::Path;
use std::process::Output;

/// Get a Command for planner
pub fn planner() -> Command {
    cargo_bin_cmd!("planner")
}

/// Command rooted at `dir`, isolated from the user's config and environment
pub fn planner_in(dir: &Path) -> Command {
    let mut cmd = planner();
    cmd.current_dir(dir)
        .env("PLANNER_CONFIG_DIR", dir.join(".user-config"))
        .env_remove("PLANNER_BACKEND_URL")
        .env_remove("PLANNER_AUTH_TOKEN")
        .env_remove("PLANNER_TIMEOUT")
        .env_remove("PLANNER_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Parse stdout as a single JSON document
#[allow(dead_code)]
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

/// First line of stdout, trimmed
#[allow(dead_code)]
pub fn first_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
