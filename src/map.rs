//! Ordered map type for TOML tables.
//!
//! This module provides [`TomlMap`], a wrapper around [`IndexMap`] that keeps
//! entries in insertion order. Both the root of a parsed document and every
//! nested table are a `TomlMap`.
//!
//! ## Why IndexMap?
//!
//! TOML is a hand-edited format, and tables remember the order in which their
//! entries were written:
//!
//! - **Deterministic output**: re-writing a parsed document keeps keys in a
//!   stable order instead of hash order
//! - **Faithful `[[table]]` semantics**: arrays of tables and their sibling
//!   keys stay where the author put them
//!
//! Note that equality between two maps is order-insensitive: the round-trip
//! guarantee compares keys, nesting and values, not textual layout.
//!
//! ## Examples
//!
//! ```rust
//! use tomlio::{TomlMap, TomlValue};
//!
//! let mut map = TomlMap::new();
//! map.insert("name".to_string(), TomlValue::from("Alice"));
//! map.insert("age".to_string(), TomlValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use serde::ser::SerializeMap as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// An insertion-ordered map of string keys to TOML values.
///
/// This is a thin wrapper around [`IndexMap`]. The reader rejects duplicate
/// keys before they ever reach the map, so `insert` returning a previous value
/// indicates a caller-side overwrite, never a parse artifact.
///
/// # Examples
///
/// ```rust
/// use tomlio::{TomlMap, TomlValue};
///
/// let mut map = TomlMap::new();
/// map.insert("first".to_string(), TomlValue::from(1));
/// map.insert("second".to_string(), TomlValue::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TomlMap(IndexMap<String, crate::TomlValue>);

impl TomlMap {
    /// Creates an empty `TomlMap`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlio::TomlMap;
    ///
    /// let map = TomlMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        TomlMap(IndexMap::new())
    }

    /// Creates an empty `TomlMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TomlMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned.
    pub fn insert(&mut self, key: String, value: crate::TomlValue) -> Option<crate::TomlValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlio::{TomlMap, TomlValue};
    ///
    /// let mut map = TomlMap::new();
    /// map.insert("key".to_string(), TomlValue::from(42));
    /// assert_eq!(map.get("key").and_then(|v| v.as_integer()), Some(42));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::TomlValue> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::TomlValue> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::TomlValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::TomlValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::TomlValue> {
        self.0.iter()
    }
}

impl fmt::Display for TomlMap {
    /// Renders the map with inline-table syntax: `{ a = 1, b = "x" }`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", crate::ser::display_key(key), value)?;
        }
        write!(f, " }}")
    }
}

impl From<HashMap<String, crate::TomlValue>> for TomlMap {
    fn from(map: HashMap<String, crate::TomlValue>) -> Self {
        TomlMap(map.into_iter().collect())
    }
}

impl From<TomlMap> for HashMap<String, crate::TomlValue> {
    fn from(map: TomlMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for TomlMap {
    type Item = (String, crate::TomlValue);
    type IntoIter = indexmap::map::IntoIter<String, crate::TomlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TomlMap {
    type Item = (&'a String, &'a crate::TomlValue);
    type IntoIter = indexmap::map::Iter<'a, String, crate::TomlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::TomlValue)> for TomlMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::TomlValue)>>(iter: T) -> Self {
        TomlMap(IndexMap::from_iter(iter))
    }
}

impl Serialize for TomlMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TomlMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct TomlMapVisitor;

        impl<'de> Visitor<'de> for TomlMapVisitor {
            type Value = TomlMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a TOML table")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = TomlMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(TomlMapVisitor)
    }
}
