//! Location graph
//!
//! An undirected, unweighted adjacency structure over named locations:
//! - insertion, edge creation and removal, vertex removal
//! - depth-first and breadth-first traversal, shortest paths
//! - bulk save/load through a [`DocumentStore`](crate::store::DocumentStore)
//!
//! Keys are sanitized on every entry point. Queries and mutations on keys
//! that are not in the graph degrade to empty results or no-ops; they never
//! fail.

pub mod bfs;
mod document;
pub mod seed;
pub mod traversal;
pub mod types;

use std::collections::BTreeMap;

pub use crate::key::sanitize_key;
pub use bfs::{breadth_first_search, find_shortest_path};
pub use traversal::{depth_first_search, GraphProvider};
pub use types::{GraphDocument, Location, LocationRecord, LocationValue};

use crate::config::DEFAULT_GRAPH_COLLECTION;

/// Undirected location graph, owned by whoever builds it
#[derive(Debug, Clone)]
pub struct LocationGraph {
    locations: BTreeMap<String, Location>,
    collection: String,
}

impl Default for LocationGraph {
    fn default() -> Self {
        Self {
            locations: BTreeMap::new(),
            collection: DEFAULT_GRAPH_COLLECTION.to_string(),
        }
    }
}

impl LocationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist under `collection` instead of the default `locationGraph`
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Document path used by [`save`](Self::save) and [`load`](Self::load)
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Add a location. Does nothing if the key already exists.
    pub fn add_node(&mut self, key: &str, value: LocationValue) {
        self.locations
            .entry(sanitize_key(key))
            .or_insert_with(|| Location::new(value));
    }

    /// Connect two locations, creating either one if needed.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        let a = sanitize_key(a);
        let b = sanitize_key(b);

        self.locations.entry(a.clone()).or_default().connect(&b);
        self.locations.entry(b).or_default().connect(&a);
    }

    /// Disconnect two locations; missing locations or edges are ignored.
    pub fn remove_edge(&mut self, a: &str, b: &str) {
        let a = sanitize_key(a);
        let b = sanitize_key(b);

        if let Some(location) = self.locations.get_mut(&a) {
            location.disconnect(&b);
        }
        if let Some(location) = self.locations.get_mut(&b) {
            location.disconnect(&a);
        }
    }

    /// Remove a location and every edge touching it.
    pub fn remove_vertex(&mut self, key: &str) {
        let key = sanitize_key(key);

        let Some(removed) = self.locations.remove(&key) else {
            return;
        };

        for neighbor in removed.neighbors() {
            if let Some(location) = self.locations.get_mut(neighbor) {
                location.disconnect(&key);
            }
        }
    }

    /// Neighbors of `key` in insertion order; empty if `key` is unknown.
    pub fn related_locations(&self, key: &str) -> Vec<String> {
        self.location(key)
            .map(|location| location.neighbors().to_vec())
            .unwrap_or_default()
    }

    pub fn depth_first_search(&self, start: &str) -> Vec<String> {
        depth_first_search(self, &sanitize_key(start))
    }

    pub fn breadth_first_search(&self, start: &str) -> Vec<String> {
        breadth_first_search(self, &sanitize_key(start))
    }

    /// Shortest path from `start` to `end`, or `None` if there is none.
    pub fn find_shortest_path(&self, start: &str, end: &str) -> Option<Vec<String>> {
        find_shortest_path(self, &sanitize_key(start), &sanitize_key(end))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.locations.contains_key(&sanitize_key(key))
    }

    /// Attributes stored for `key`
    pub fn value(&self, key: &str) -> Option<&LocationValue> {
        self.location(key).map(|location| &location.value)
    }

    pub fn location(&self, key: &str) -> Option<&Location> {
        self.locations.get(&sanitize_key(key))
    }

    /// All location keys, sorted
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
