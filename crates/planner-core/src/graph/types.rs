use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque attributes attached to a location (name, coordinates, notes, ...)
pub type LocationValue = Map<String, Value>;

/// A single location: its attributes plus its insertion-ordered neighbors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub value: LocationValue,
    pub(crate) neighbors: Vec<String>,
}

impl Location {
    pub fn new(value: LocationValue) -> Self {
        Self {
            value,
            neighbors: Vec::new(),
        }
    }

    /// Neighbor keys in the order the edges were added
    pub fn neighbors(&self) -> &[String] {
        &self.neighbors
    }

    pub(crate) fn connect(&mut self, key: &str) {
        if !self.neighbors.iter().any(|n| n == key) {
            self.neighbors.push(key.to_string());
        }
    }

    pub(crate) fn disconnect(&mut self, key: &str) {
        self.neighbors.retain(|n| n != key);
    }
}

/// Persisted form of one location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default)]
    pub value: LocationValue,

    #[serde(default, rename = "connectedLocations")]
    pub connected_locations: BTreeMap<String, bool>,
}

/// The whole graph as stored: sanitized key -> record
pub type GraphDocument = BTreeMap<String, LocationRecord>;
