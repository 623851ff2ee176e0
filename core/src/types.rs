//! Record and value type definitions.
//!
//! This module defines the data produced by converters: ordered
//! field-name → value records in two stages. A [`RawRecord`] holds the
//! strings exactly as the front end cut them out of the command output, and a
//! [`TypedRecord`] holds the same fields after the typed pass has promoted
//! some of them to integers, floats or null.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single typed field value.
///
/// Serializes untagged, so a record renders as a plain JSON object with
/// strings, numbers and `null`.
///
/// # Examples
///
/// ```
/// use command_output_core::Value;
///
/// assert_eq!(serde_json::to_string(&Value::Integer(5)).unwrap(), "5");
/// assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
/// assert_eq!(Value::from("up").as_str(), Some("up"));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Conversion failed or the value is not displayed by the tool.
    Null,
    /// Whole number.
    Integer(i64),
    /// Decimal number (always finite).
    Float(f64),
    /// Text kept as-is.
    String(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<Option<i64>> for Value {
    fn from(n: Option<i64>) -> Self {
        n.map_or(Self::Null, Self::Integer)
    }
}

/// Ordered mapping from normalized field name to value.
///
/// Insertion order is preserved for display. Inserting a key that already
/// exists overwrites the value in place and keeps its original position.
///
/// # Examples
///
/// ```
/// use command_output_core::RawRecord;
///
/// let mut record = RawRecord::new();
/// record.insert("name", "make".to_string());
/// record.insert("size", "1160660".to_string());
/// record.insert("name", "make-devel".to_string());
///
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.get("name").map(String::as_str), Some("make-devel"));
/// assert_eq!(record.keys().collect::<Vec<_>>(), vec!["name", "size"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record<V> {
    entries: Vec<(String, V)>,
}

/// Record straight out of a front end: every value is a string.
pub type RawRecord = Record<String>;

/// Record after the typed pass.
pub type TypedRecord = Record<Value>;

impl<V> Default for Record<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> Record<V> {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, overwriting any earlier value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> FromIterator<(String, V)> for Record<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl<V> IntoIterator for Record<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for Record<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl From<&RawRecord> for TypedRecord {
    /// Lifts every raw string into [`Value::String`] without any coercion.
    fn from(raw: &RawRecord) -> Self {
        raw.iter()
            .map(|(key, value)| (key.to_string(), Value::from(value.as_str())))
            .collect()
    }
}
