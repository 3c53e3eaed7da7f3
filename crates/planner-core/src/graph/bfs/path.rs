//! Path reconstruction for breadth-first search

use std::collections::HashMap;

/// Walk the predecessor map back from `to` and return the path `from..=to`.
///
/// The caller guarantees `to` was reached from `from`, so every step back
/// has a predecessor.
pub fn reconstruct_path(from: &str, to: &str, predecessors: &HashMap<&str, &str>) -> Vec<String> {
    let mut path = vec![to.to_string()];
    let mut current = to;

    while current != from {
        match predecessors.get(current) {
            Some(pred) => {
                current = *pred;
                path.push(current.to_string());
            }
            None => break,
        }
    }

    path.reverse();
    path
}
