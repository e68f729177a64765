//! Ordered key map for parameters and dictionaries.
//!
//! This module provides [`OrderedMap`], a wrapper around [`IndexMap`] keyed by
//! structured field keys. Both [`Parameters`](crate::Parameters) and
//! [`Dictionary`](crate::Dictionary) are built on it.
//!
//! ## Why IndexMap?
//!
//! Structured fields are order-preserving, and a repeated key overwrites the
//! earlier value *without* moving it. `IndexMap::insert` has exactly these
//! semantics: the slot of the first insertion is kept and only its value is
//! replaced, in O(1) average time.
//!
//! ## Examples
//!
//! ```rust
//! use structured_fields::{BareItem, OrderedMap};
//!
//! let mut params: OrderedMap<BareItem> = OrderedMap::new();
//! params.insert("a".to_string(), BareItem::from(1));
//! params.insert("b".to_string(), BareItem::from(2));
//! params.insert("a".to_string(), BareItem::from(3));
//!
//! let keys: Vec<_> = params.keys().cloned().collect();
//! assert_eq!(keys, vec!["a", "b"]);
//! assert_eq!(params.get("a"), Some(&BareItem::from(3)));
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// An insertion-ordered map from keys to `V`.
///
/// Keys are not validated on insertion; a key that does not match the key
/// grammar is reported when the map is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V>(IndexMap<String, V>);

impl<V> OrderedMap<V> {
    /// Creates an empty `OrderedMap`.
    #[must_use]
    pub fn new() -> Self {
        OrderedMap(IndexMap::new())
    }

    /// Creates an empty `OrderedMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, its value is replaced in place
    /// (the entry keeps its original position) and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::{BareItem, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.insert("key".to_string(), BareItem::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), BareItem::from(43)).is_some());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the entry at `index` in insertion order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&String, &V)> {
        self.0.get_index(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, V> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, V> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.0.iter()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a OrderedMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        OrderedMap(IndexMap::from_iter(iter))
    }
}

impl<V> Extend<(String, V)> for OrderedMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

/// Serialized as a sequence of `[key, value]` pairs so that order survives
/// formats whose maps are unordered.
impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            seq.serialize_element(&(key, value))?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_first_slot() {
        let mut map = OrderedMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        map.insert("c".to_string(), 3);
        assert_eq!(map.insert("a".to_string(), 4), Some(1));

        let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(entries, vec![("a", 4), ("b", 2), ("c", 3)]);
    }

    #[test]
    fn test_from_iter_collapses_duplicates() {
        let map: OrderedMap<i32> = vec![
            ("x".to_string(), 1),
            ("y".to_string(), 2),
            ("x".to_string(), 3),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0), Some((&"x".to_string(), &3)));
    }

    #[test]
    fn test_extend_and_lookup() {
        let mut map = OrderedMap::with_capacity(2);
        map.extend(vec![("k".to_string(), "v")]);
        assert!(map.contains_key("k"));
        assert!(!map.contains_key("K"));
        if let Some(v) = map.get_mut("k") {
            *v = "w";
        }
        assert_eq!(map.get("k"), Some(&"w"));
    }
}
