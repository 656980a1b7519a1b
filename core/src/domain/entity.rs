//! Metadata that lets the generic repository work over any persisted entity.
//!
//! An [`Entity`] names its table, exposes its columns as a closed field enum,
//! its eager-loadable relations as a closed relation enum, and can report the
//! value of any field. Backends interpret queries against this metadata.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::entities::{Country, Hotel};
use crate::repositories::store::{DataStore, EntityStore};

/// Scalar value a field can be compared against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Ordering between two values of compatible type; `None` when incomparable
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Text(a), Value::Text(b)) => Some(a.to_lowercase().cmp(&b.to_lowercase())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Closed set of persisted entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Country,
    Hotel,
}

impl EntityKind {
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Country => Country::TABLE,
            EntityKind::Hotel => Hotel::TABLE,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Country => write!(f, "Country"),
            EntityKind::Hotel => write!(f, "Hotel"),
        }
    }
}

/// An entity value queued for insert or update
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Country(Country),
    Hotel(Hotel),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Country(_) => EntityKind::Country,
            Record::Hotel(_) => EntityKind::Hotel,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Record::Country(c) => c.id,
            Record::Hotel(h) => h.id,
        }
    }
}

/// A column of an entity's table
pub trait EntityField: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    fn column(self) -> &'static str;
}

/// A persisted entity with an auto-assigned integer key
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    type Field: EntityField;
    type Relation: Copy + Eq + fmt::Debug + Send + Sync + 'static;

    const KIND: EntityKind;
    const TABLE: &'static str;
    const ID_FIELD: Self::Field;

    /// Every column, in insertion order, starting with the key
    fn fields() -> &'static [Self::Field];

    fn id(&self) -> i64;

    fn value(&self, field: Self::Field) -> Value;

    fn into_record(self) -> Record;

    /// The part of a data store that serves this entity type
    fn select(store: &dyn DataStore) -> &dyn EntityStore<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_compare() {
        assert_eq!(Value::Int(1).compare(&Value::Int(2)), Some(Ordering::Less));
        assert_eq!(Value::Int(4).compare(&Value::Float(3.5)), Some(Ordering::Greater));
        assert_eq!(
            Value::from("jamaica").compare(&Value::from("Jamaica")),
            Some(Ordering::Equal)
        );
        assert_eq!(Value::Int(1).compare(&Value::from("1")), None);
    }

    #[test]
    fn test_entity_kind_table() {
        assert_eq!(EntityKind::Country.table(), "countries");
        assert_eq!(EntityKind::Hotel.table(), "hotels");
        assert_eq!(EntityKind::Hotel.to_string(), "Hotel");
    }
}
