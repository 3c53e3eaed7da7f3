use std::collections::HashSet;

use super::LocationGraph;

/// Trait for providing graph adjacency to the traversal algorithms
pub trait GraphProvider {
    /// Neighbors of `key` in enumeration order, or `None` if `key` is not a node
    fn neighbors(&self, key: &str) -> Option<&[String]>;
}

impl GraphProvider for LocationGraph {
    fn neighbors(&self, key: &str) -> Option<&[String]> {
        self.locations.get(key).map(|location| location.neighbors())
    }
}

/// Depth-first pre-order traversal from `start`.
///
/// Uses an explicit stack but visits nodes in exactly the order a recursive
/// walk over the neighbor lists would. Returns an empty list if `start` is
/// not in the graph.
pub fn depth_first_search(provider: &dyn GraphProvider, start: &str) -> Vec<String> {
    if provider.neighbors(start).is_none() {
        return Vec::new();
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut order = Vec::new();
    let mut stack: Vec<&str> = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        order.push(current.to_string());

        let neighbors = provider.neighbors(current).unwrap_or_default();
        // Reverse so the first neighbor is popped first
        for neighbor in neighbors.iter().rev() {
            if !visited.contains(neighbor.as_str()) {
                stack.push(neighbor.as_str());
            }
        }
    }

    order
}
