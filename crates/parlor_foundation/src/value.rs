//! Dynamic attribute values.
//!
//! Saves and template globals carry loosely-typed data: a saved entity
//! is a map of attribute names to values, and `<<path.to.attr>>`
//! expansions in event text resolve against nested value maps.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ix::Ix;

/// A dynamic value: primitive scalar, string, list, map, or an entity
/// reference.
///
/// [`Value::Ref`] is how cross-references between entities survive a
/// save/load round trip; a loaded reference is only accepted when it
/// resolves against the current entity store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absence of a value.
    Nil,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// String.
    String(String),
    /// Ordered list.
    List(Vec<Value>),
    /// String-keyed map (ordered for deterministic serialization).
    Map(BTreeMap<String, Value>),
    /// Reference to another entity by index.
    Ref(Ix),
}

impl Value {
    /// Walks a dotted path through nested maps.
    ///
    /// Returns `None` if any segment is missing or a non-map value is
    /// traversed before the last segment.
    #[must_use]
    pub fn walk_path(&self, path: &str) -> Option<&Value> {
        let mut current = self;
        for segment in path.split('.') {
            match current {
                Value::Map(map) => current = map.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Renders the value as player-visible text.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Value::Nil => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::String(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::render)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Map(_) => "<map>".to_string(),
            Value::Ref(ix) => ix.to_string(),
        }
    }

    /// Collects every entity reference contained in this value.
    pub fn collect_refs<'a>(&'a self, out: &mut Vec<&'a Ix>) {
        match self {
            Value::Ref(ix) => out.push(ix),
            Value::List(items) => {
                for item in items {
                    item.collect_refs(out);
                }
            }
            Value::Map(map) => {
                for item in map.values() {
                    item.collect_refs(out);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Ix> for Value {
    fn from(ix: Ix) -> Self {
        Value::Ref(ix)
    }
}
