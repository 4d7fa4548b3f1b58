use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::catalog::ITEM_COUNT;

/// Answers keyed by item id.
///
/// A set may be partial or hold out-of-range values while it is being
/// collected; `validate_complete` decides whether it can be scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: BTreeMap<u8, u8>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the answer for an item, returning the previous value.
    pub fn insert(&mut self, id: u8, value: u8) -> Option<u8> {
        self.answers.insert(id, value)
    }

    pub fn remove(&mut self, id: u8) -> Option<u8> {
        self.answers.remove(&id)
    }

    pub fn get(&self, id: u8) -> Option<u8> {
        self.answers.get(&id).copied()
    }

    pub fn contains(&self, id: u8) -> bool {
        self.answers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// (id, value) pairs in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.answers.iter().map(|(id, value)| (*id, *value))
    }
}

/// Answers given in item order: index 0 is Q1.
impl From<[u8; ITEM_COUNT]> for ResponseSet {
    fn from(values: [u8; ITEM_COUNT]) -> Self {
        values
            .iter()
            .zip(1u8..)
            .map(|(value, id)| (id, *value))
            .collect()
    }
}

impl FromIterator<(u8, u8)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (u8, u8)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
