//! Insertion-ordered map type for JSON objects.
//!
//! [`ObjectMap`] wraps an [`IndexMap`], which keeps key lookup and member order
//! in one structure. The writer reproduces the iteration order, so a document
//! that is parsed and written again keeps its members in source order.
//!
//! Keys are unique. Inserting an existing key replaces its value but keeps the
//! position where the key was first inserted.
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::{ObjectMap, Value};
//!
//! let mut map = ObjectMap::new();
//! map.insert("a", Value::from(1));
//! map.insert("b", Value::from(2));
//! map.insert("a", Value::from(3));
//!
//! let keys: Vec<_> = map.keys().map(String::as_str).collect();
//! assert_eq!(keys, ["a", "b"]);
//! assert_eq!(map.find_number("a"), Some(3.0));
//! ```

use crate::{Error, Result, Value};
use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to JSON values.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{ObjectMap, Value};
///
/// let mut map = ObjectMap::new();
/// map.insert("first", Value::from(1));
/// map.insert("second", Value::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectMap(IndexMap<String, Value>);

impl ObjectMap {
    /// Creates an empty `ObjectMap`.
    #[must_use]
    pub fn new() -> Self {
        ObjectMap(IndexMap::new())
    }

    /// Creates an empty `ObjectMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ObjectMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a member, returning the value it replaced.
    ///
    /// A replaced key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsondoc::{ObjectMap, Value};
    ///
    /// let mut map = ObjectMap::new();
    /// assert!(map.insert("key", Value::from(42)).is_none());
    /// assert_eq!(map.insert("key", Value::from(43)), Some(Value::from(42)));
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Like [`insert`](Self::insert), but reports allocation failure as
    /// [`Error::Exception`] instead of aborting.
    pub fn try_insert(&mut self, key: String, value: Value) -> Result<Option<Value>> {
        if !self.0.contains_key(&key) {
            self.0.try_reserve(1).map_err(|_| Error::Exception)?;
        }
        Ok(self.0.insert(key, value))
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Alias of [`get`](Self::get).
    #[inline]
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    /// Returns the string stored under `key`, if the member exists and is a string.
    #[must_use]
    pub fn find_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns the number stored under `key`, if the member exists and is a number.
    #[must_use]
    pub fn find_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Returns the boolean stored under `key`, if the member exists and is a boolean.
    #[must_use]
    pub fn find_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Returns `true` if the member exists and is `null`.
    #[must_use]
    pub fn find_null(&self, key: &str) -> bool {
        self.get(key).is_some_and(Value::is_null)
    }

    /// Returns the array stored under `key`, if the member exists and is an array.
    #[must_use]
    pub fn find_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    /// Returns the object stored under `key`, if the member exists and is an object.
    #[must_use]
    pub fn find_object(&self, key: &str) -> Option<&ObjectMap> {
        self.get(key).and_then(Value::as_object)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a member, shifting later members down to keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Removes every member.
    pub fn remove_all(&mut self) {
        self.0.clear();
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the members, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Returns a mutable iterator over the members, in insertion order.
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }
}

impl From<HashMap<String, Value>> for ObjectMap {
    fn from(map: HashMap<String, Value>) -> Self {
        ObjectMap(map.into_iter().collect())
    }
}

impl From<IndexMap<String, Value>> for ObjectMap {
    fn from(map: IndexMap<String, Value>) -> Self {
        ObjectMap(map)
    }
}

impl IntoIterator for ObjectMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObjectMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for ObjectMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        ObjectMap(IndexMap::from_iter(iter))
    }
}

impl std::ops::Index<&str> for ObjectMap {
    type Output = Value;

    /// Returns `Value::Null` for a missing key.
    fn index(&self, key: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.get(key).unwrap_or(&NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_keeps_first_position() {
        let mut map = ObjectMap::new();
        map.insert("a", Value::from(1));
        map.insert("b", Value::from(2));
        map.insert("a", Value::from(3));

        assert_eq!(map.len(), 2);
        let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![("a", Value::from(3)), ("b", Value::from(2))]
        );
    }

    #[test]
    fn test_try_insert() {
        let mut map = ObjectMap::new();
        assert_eq!(map.try_insert("x".to_string(), Value::Null), Ok(None));
        assert_eq!(
            map.try_insert("x".to_string(), Value::from(true)),
            Ok(Some(Value::Null))
        );
        assert_eq!(map.find_bool("x"), Some(true));
    }

    #[test]
    fn test_typed_finders() {
        let mut map = ObjectMap::new();
        map.insert("s", Value::from("text"));
        map.insert("n", Value::from(1.5));
        map.insert("b", Value::from(false));
        map.insert("z", Value::Null);
        map.insert("arr", Value::Array(vec![Value::from(1)]));
        map.insert("obj", Value::Object(ObjectMap::new()));

        assert_eq!(map.find_str("s"), Some("text"));
        assert_eq!(map.find_number("n"), Some(1.5));
        assert_eq!(map.find_bool("b"), Some(false));
        assert!(map.find_null("z"));
        assert_eq!(map.find_array("arr").map(Vec::len), Some(1));
        assert!(map.find_object("obj").is_some_and(ObjectMap::is_empty));

        // Wrong kind or missing key
        assert_eq!(map.find_str("n"), None);
        assert_eq!(map.find_number("missing"), None);
        assert!(!map.find_null("s"));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: ObjectMap = ["a", "b", "c"]
            .iter()
            .map(|k| (k.to_string(), Value::from(*k)))
            .collect();
        assert_eq!(map.remove("b"), Some(Value::from("b")));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);

        map.remove_all();
        assert!(map.is_empty());
    }

    #[test]
    fn test_index_missing_is_null() {
        let map = ObjectMap::new();
        assert!(map["nothing"].is_null());
    }
}
