//! Path resolution for CLI commands

use std::env;
use std::path::{Path, PathBuf};

/// Resolve the project root: the explicit `--root`, else the current
/// directory, else `.`.
pub fn resolve_root_path(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolve a user-supplied path against the project root
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_explicit_path() {
        let explicit = PathBuf::from("/tmp/test/path");
        assert_eq!(resolve_root_path(Some(explicit.clone())), explicit);
    }

    #[test]
    fn test_resolve_against_root() {
        let root = Path::new("/srv/planner");
        assert_eq!(
            resolve_against(root, Path::new("data")),
            PathBuf::from("/srv/planner/data")
        );
        assert_eq!(
            resolve_against(root, Path::new("/var/data")),
            PathBuf::from("/var/data")
        );
    }
}
