//! Bulk persistence of the location graph

use serde_json::{Map, Value};

use super::{GraphDocument, LocationGraph, LocationRecord};
use crate::error::{PlannerError, Result};
use crate::store::DocumentStore;

impl LocationGraph {
    /// Serialize every location as `{ value, connectedLocations }`
    pub fn to_document(&self) -> GraphDocument {
        self.locations
            .iter()
            .map(|(key, location)| {
                let record = LocationRecord {
                    value: location.value.clone(),
                    connected_locations: location
                        .neighbors()
                        .iter()
                        .map(|neighbor| (neighbor.clone(), true))
                        .collect(),
                };
                (key.clone(), record)
            })
            .collect()
    }

    /// Build a fresh graph from a stored document
    pub fn from_document(document: GraphDocument) -> Self {
        let mut graph = Self::new();
        graph.merge_document(document);
        graph
    }

    /// Add every location in `document`, then every recorded edge.
    ///
    /// Existing locations keep their values; neighbor flags other than
    /// `true` are ignored.
    pub fn merge_document(&mut self, document: GraphDocument) {
        for (key, record) in &document {
            self.add_node(key, record.value.clone());
        }

        for (key, record) in &document {
            for (neighbor, connected) in &record.connected_locations {
                if *connected {
                    self.add_edge(key, neighbor);
                }
            }
        }
    }

    /// Overwrite the stored graph with this one in a single write
    #[tracing::instrument(skip(self, store), fields(collection = %self.collection, locations = self.len(), store = %store.describe()))]
    pub async fn save(&self, store: &dyn DocumentStore) -> Result<()> {
        let document = serde_json::to_value(self.to_document())?;
        store.write(&self.collection, &document).await
    }

    /// Load the stored graph into this one. A missing document means no
    /// graph has been saved yet and leaves the graph untouched.
    #[tracing::instrument(skip(self, store), fields(collection = %self.collection, store = %store.describe()))]
    pub async fn load(&mut self, store: &dyn DocumentStore) -> Result<()> {
        let Some(raw) = store.read(&self.collection).await? else {
            tracing::debug!("no stored graph");
            return Ok(());
        };

        let document = parse_document(&self.collection, raw)?;
        self.merge_document(document);

        tracing::debug!(locations = self.len(), "graph loaded");
        Ok(())
    }
}

/// Decode a stored graph. Backends that turn integer-keyed objects into
/// arrays are accepted at both the location and the neighbor level.
fn parse_document(path: &str, raw: Value) -> Result<GraphDocument> {
    let mut locations = match raw {
        Value::Object(map) => map,
        Value::Array(items) => indexed(items),
        other => {
            return Err(PlannerError::malformed(
                path,
                format!("expected an object of locations, got {}", other),
            ))
        }
    };

    for record in locations.values_mut() {
        if let Some(field) = record.get_mut("connectedLocations") {
            if let Value::Array(items) = field {
                *field = Value::Object(indexed(std::mem::take(items)));
            }
        }
    }

    serde_json::from_value(Value::Object(locations)).map_err(|e| PlannerError::malformed(path, e))
}

/// Key array items by index, dropping holes (`null`) and `false` flags
fn indexed(items: Vec<Value>) -> Map<String, Value> {
    items
        .into_iter()
        .enumerate()
        .filter(|(_, item)| !matches!(item, Value::Null | Value::Bool(false)))
        .map(|(i, item)| (i.to_string(), item))
        .collect()
}
