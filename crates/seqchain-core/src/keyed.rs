//! Ordered keyed array: the concrete structure a sequence materializes into.
//!
//! Insertion order is preserved. Re-inserting an existing key overwrites the
//! value in place; the key keeps the position of its first insertion.

use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::key::Key;

#[derive(Debug, Clone)]
pub struct KeyedArray<V> {
    entries: Vec<(Key, V)>,
    index: HashMap<Key, usize>,
}

impl<V> Default for KeyedArray<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyedArray<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cap),
            index: HashMap::with_capacity(cap),
        }
    }

    /// Insert or overwrite. Returns the previous value for `key`, if any.
    pub fn insert(&mut self, key: Key, value: V) -> Option<V> {
        if let Some(&slot) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[slot].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &Key) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn into_values(self) -> Vec<V> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }

    pub fn into_pairs(self) -> Vec<(Key, V)> {
        self.entries
    }
}

impl<V: PartialEq> PartialEq for KeyedArray<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Eq> Eq for KeyedArray<V> {}

impl<V> From<Vec<V>> for KeyedArray<V> {
    fn from(values: Vec<V>) -> Self {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Key::from(i), v))
            .collect()
    }
}

impl<V> FromIterator<(Key, V)> for KeyedArray<V> {
    fn from_iter<I: IntoIterator<Item = (Key, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl<V> IntoIterator for KeyedArray<V> {
    type Item = (Key, V);
    type IntoIter = std::vec::IntoIter<(Key, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Serialized as an ordered list of `[key, value]` pairs.
impl<V: Serialize> Serialize for KeyedArray<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}
