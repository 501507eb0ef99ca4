//! Ordered property set attached to a log event.

use serde::Serialize;
use serde_json::{Map, Value};

/// Property name → value, in insertion order.
///
/// Each name is written once; a later write under an existing name is
/// ignored, so caller-supplied extras take precedence over collected fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertySet {
    entries: Map<String, Value>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` unless `name` is already present. Returns whether it was inserted.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        match self.entries.entry(name.into()) {
            serde_json::map::Entry::Vacant(entry) => {
                entry.insert(value.into());
                true
            }
            serde_json::map::Entry::Occupied(_) => false,
        }
    }

    /// Insert only when there is a value; `None` leaves the property absent.
    pub fn insert_some(&mut self, name: impl Into<String>, value: Option<Value>) -> bool {
        match value {
            Some(value) => self.insert(name, value),
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
