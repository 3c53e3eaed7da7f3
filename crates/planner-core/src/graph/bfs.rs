mod path;

use std::collections::{HashMap, HashSet, VecDeque};

use super::GraphProvider;

/// Breadth-first traversal from `start`, in discovery order.
///
/// Returns an empty list if `start` is not in the graph.
pub fn breadth_first_search(provider: &dyn GraphProvider, start: &str) -> Vec<String> {
    if provider.neighbors(start).is_none() {
        return Vec::new();
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    let mut order = Vec::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        order.push(current.to_string());

        for neighbor in provider.neighbors(current).unwrap_or_default() {
            if visited.insert(neighbor.as_str()) {
                queue.push_back(neighbor.as_str());
            }
        }
    }

    order
}

/// Shortest path between two nodes using parent-pointer BFS.
///
/// Returns the keys along the path including both endpoints, `[start]` when
/// `start == end`, and `None` when either node is missing or `end` cannot be
/// reached. Among equally short paths, the one through earlier-enumerated
/// neighbors wins.
#[tracing::instrument(skip(provider))]
pub fn find_shortest_path(
    provider: &dyn GraphProvider,
    start: &str,
    end: &str,
) -> Option<Vec<String>> {
    provider.neighbors(start)?;
    provider.neighbors(end)?;

    if start == end {
        return Some(vec![start.to_string()]);
    }

    let mut predecessors: HashMap<&str, &str> = HashMap::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in provider.neighbors(current).unwrap_or_default() {
            let neighbor = neighbor.as_str();
            if !visited.insert(neighbor) {
                continue;
            }
            predecessors.insert(neighbor, current);

            if neighbor == end {
                let found = path::reconstruct_path(start, end, &predecessors);
                tracing::debug!(hops = found.len() - 1, "path found");
                return Some(found);
            }
            queue.push_back(neighbor);
        }
    }

    tracing::debug!("no path");
    None
}
