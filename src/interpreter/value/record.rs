use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// A string-keyed map that remembers insertion order.
///
/// Keys are unique. Inserting an existing key replaces its value in place, so
/// the first insertion decides the position. Two records are equal when they
/// hold the same keys with equal values, regardless of order.
///
/// Lookups go through a key index, so building or merging large objects stays
/// linear in the number of members.
///
/// # Example
/// ```
/// use dynexpr::{Record, Value};
///
/// let a: Record = [("x", Value::from(1)), ("y", Value::from(2))].into_iter().collect();
/// let b: Record = [("y", Value::from(2)), ("x", Value::from(1))].into_iter().collect();
///
/// assert_eq!(a, b);
/// assert_eq!(a.keys().collect::<Vec<_>>(), ["x", "y"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    entries: Vec<(String, Value)>,
    index:   HashMap<String, usize>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new(),
               index:   HashMap::new(), }
    }

    /// Creates an empty record with room for `capacity` members.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity),
               index:   HashMap::with_capacity(capacity), }
    }

    /// Number of members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the record has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index
            .get(key)
            .and_then(|&i| self.entries.get(i))
            .map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Stores `value` under `key` and returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if let Some((_, slot)) = self.index.get(&key).and_then(|&i| self.entries.get_mut(i)) {
            return Some(std::mem::replace(slot, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Iterates over the members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns a new record holding the members of `self` overwritten by the
    /// members of `other`. Neither input is modified.
    ///
    /// # Example
    /// ```
    /// use dynexpr::{Record, Value};
    ///
    /// let left: Record = [("a", Value::from(1)), ("b", Value::from(2))].into_iter().collect();
    /// let right: Record = [("b", Value::from(3))].into_iter().collect();
    ///
    /// let merged = left.merged(&right);
    /// assert_eq!(merged.get("b"), Some(&Value::from(3)));
    /// assert_eq!(left.get("b"), Some(&Value::from(2)));
    /// ```
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.entries.reserve(other.len());
        for (key, value) in &other.entries {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
        && self.entries
               .iter()
               .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl<'a> IntoIterator for &'a Record {
    type IntoIter = std::iter::Map<std::slice::Iter<'a, (String, Value)>,
                                   fn(&'a (String, Value)) -> (&'a str, &'a Value)>;
    type Item = (&'a str, &'a Value);

    fn into_iter(self) -> Self::IntoIter {
        let split: fn(&'a (String, Value)) -> (&'a str, &'a Value) = |(k, v)| (k.as_str(), v);
        self.entries.iter().map(split)
    }
}
