//! Availability intersection
//!
//! Every participant proposes a list of time slots; the common free times are
//! the slots that appear in all of them. The result follows the first
//! participant's order with duplicates dropped, so it is always a subset of
//! that first list. Comparison is exact value equality; callers that want
//! `2024-06-01T09:00` and `2024-06-01T09:00:00` to match should run
//! [`normalize_slot`] first.

mod group;
mod slot;

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub use group::GroupAvailability;
pub use slot::normalize_slot;

/// A participant and the slots they proposed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,

    #[serde(default, rename = "availableTimes")]
    pub available_times: Vec<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>, available_times: Vec<String>) -> Self {
        Self {
            id: id.into(),
            available_times,
        }
    }
}

/// Slots present in every participant's list.
///
/// No participants, or any participant with no slots, yields an empty list.
pub fn common_free_times<T, S>(participants: &[S]) -> Vec<T>
where
    T: Eq + Hash + Clone,
    S: AsRef<[T]>,
{
    let Some((first, rest)) = participants.split_first() else {
        return Vec::new();
    };

    let others: Vec<HashSet<&T>> = rest
        .iter()
        .map(|times| times.as_ref().iter().collect())
        .collect();

    let mut seen: HashSet<&T> = HashSet::new();
    first
        .as_ref()
        .iter()
        .filter(|time| others.iter().all(|set| set.contains(time)))
        .filter(|time| seen.insert(*time))
        .cloned()
        .collect()
}

/// [`common_free_times`] over participant records
pub fn common_times_for(participants: &[Participant]) -> Vec<String> {
    let lists: Vec<&[String]> = participants
        .iter()
        .map(|p| p.available_times.as_slice())
        .collect();
    common_free_times(&lists)
}
