use std::collections::BTreeMap;

use serde_json::{Map, Value};
use ulid::Generator;

use super::{common_times_for, Participant};
use crate::error::{PlannerError, Result};
use crate::key::sanitize_key;
use crate::store::DocumentStore;

/// participant id -> entry key -> time
type Entries = BTreeMap<String, BTreeMap<String, String>>;

/// Stored availability for one group, at `<collection>/<group>`.
///
/// Each slot gets its own time-ordered entry key, so a participant can
/// propose the same time twice and remove one copy without losing the other.
pub struct GroupAvailability {
    group: String,
    path: String,
    entries: Entries,
    generator: Generator,
}

impl GroupAvailability {
    /// Empty availability for `group` under `collection`
    pub fn new(collection: &str, group: &str) -> Result<Self> {
        let group = checked_key("group", group)?;
        let path = document_path(collection, &group);
        Ok(Self {
            group,
            path,
            entries: Entries::new(),
            generator: Generator::new(),
        })
    }

    /// Load the group document; a missing document is an empty group.
    #[tracing::instrument(skip(store), fields(store = %store.describe()))]
    pub async fn load(store: &dyn DocumentStore, collection: &str, group: &str) -> Result<Self> {
        let mut availability = Self::new(collection, group)?;

        if let Some(raw) = store.read(&availability.path).await? {
            availability.entries = parse_entries(&availability.path, raw)?;
        }

        tracing::debug!(
            participants = availability.entries.len(),
            "group availability loaded"
        );
        Ok(availability)
    }

    /// Overwrite the stored group document. An empty group deletes it.
    #[tracing::instrument(skip(self, store), fields(path = %self.path, store = %store.describe()))]
    pub async fn save(&self, store: &dyn DocumentStore) -> Result<()> {
        let document = if self.entries.is_empty() {
            Value::Null
        } else {
            serde_json::to_value(&self.entries)?
        };
        store.write(&self.path, &document).await
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Document path inside the store
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Record a slot for `participant` and return its entry key
    pub fn add_time(&mut self, participant: &str, time: &str) -> Result<String> {
        let participant = checked_key("participant", participant)?;
        let time = time.trim();
        if time.is_empty() {
            crate::bail_invalid!("time slot", "(empty)");
        }

        let key = self
            .generator
            .generate()
            .map_err(|e| PlannerError::Other(format!("cannot generate entry key: {}", e)))?
            .to_string();

        self.entries
            .entry(participant)
            .or_default()
            .insert(key.clone(), time.to_string());
        Ok(key)
    }

    /// Drop one slot; returns whether anything was removed.
    ///
    /// A participant left without slots is dropped as well.
    pub fn remove_time(&mut self, participant: &str, entry_key: &str) -> bool {
        let participant = sanitize_key(participant);
        let Some(times) = self.entries.get_mut(&participant) else {
            return false;
        };

        let removed = times.remove(entry_key.trim()).is_some();
        if times.is_empty() {
            self.entries.remove(&participant);
        }
        removed
    }

    /// Slots keyed by entry key for one participant
    pub fn entries_for(&self, participant: &str) -> Option<&BTreeMap<String, String>> {
        self.entries.get(&sanitize_key(participant))
    }

    /// Participants in id order, each with slots in insertion order
    pub fn participants(&self) -> Vec<Participant> {
        self.entries
            .iter()
            .map(|(id, times)| Participant::new(id.clone(), times.values().cloned().collect()))
            .collect()
    }

    /// Slots every participant in the group proposed
    pub fn common_times(&self) -> Vec<String> {
        common_times_for(&self.participants())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `<collection>/<group>` with surrounding slashes removed
pub fn document_path(collection: &str, group: &str) -> String {
    format!("{}/{}", collection.trim_matches('/'), group)
}

fn checked_key(context: &str, raw: &str) -> Result<String> {
    let key = sanitize_key(raw);
    if key.is_empty() {
        crate::bail_invalid!(context, format!("{:?}", raw));
    }
    Ok(key)
}

/// Accepts `{participant: {key: time}}`; participant lists stored as arrays
/// are keyed by zero-padded index.
fn parse_entries(path: &str, raw: Value) -> Result<Entries> {
    let Value::Object(participants) = raw else {
        return Err(PlannerError::malformed(path, "expected an object of participants"));
    };

    let mut entries = Entries::new();
    for (participant, slots) in participants {
        let times = match slots {
            Value::Object(map) => parse_slot_map(path, &participant, map)?,
            Value::Array(items) => {
                let map: Map<String, Value> = items
                    .into_iter()
                    .enumerate()
                    .filter(|(_, item)| !item.is_null())
                    .map(|(i, item)| (format!("{:06}", i), item))
                    .collect();
                parse_slot_map(path, &participant, map)?
            }
            Value::Null => continue,
            other => {
                return Err(PlannerError::malformed(
                    path,
                    format!("slots for {} must be an object, got {}", participant, other),
                ))
            }
        };

        if !times.is_empty() {
            entries.insert(sanitize_key(&participant), times);
        }
    }
    Ok(entries)
}

fn parse_slot_map(
    path: &str,
    participant: &str,
    map: Map<String, Value>,
) -> Result<BTreeMap<String, String>> {
    map.into_iter()
        .map(|(key, value)| match value {
            Value::String(time) => Ok((key, time)),
            other => Err(PlannerError::malformed(
                path,
                format!("slot {} of {} is not a string: {}", key, participant, other),
            )),
        })
        .collect()
}
