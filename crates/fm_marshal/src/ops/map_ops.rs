use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use fm_utils::hash::{HashTable, hash_one};

use crate::ops::Value;

/// A key-value mapping that remembers insertion order.
///
/// Entries live in a vector in insertion order, indexed by a hash table of
/// positions. Re-inserting a key replaces its value in place.
///
/// Equality and hashing ignore order.
///
/// # Examples
///
/// ```
/// use fm_marshal::ops::{MapValue, Value};
///
/// let mut map = MapValue::new();
/// assert!(map.insert(Value::from("b"), Value::from(1)).is_none());
/// map.insert(Value::from("a"), Value::from(2));
/// assert_eq!(map.insert(Value::from("b"), Value::from(3)), Some(Value::from(1)));
///
/// let keys: Vec<_> = map.keys().filter_map(Value::as_str).collect();
/// assert_eq!(keys, ["b", "a"]);
/// assert_eq!(map.get(&Value::from("b")), Some(&Value::from(3)));
/// ```
#[derive(Clone, Default)]
pub struct MapValue {
    entries: Vec<(Value, Value)>,
    indices: HashTable<usize>,
}

impl MapValue {
    /// Creates an empty map.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: HashTable::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashTable::with_capacity(capacity),
        }
    }

    /// Inserts an entry.
    ///
    /// - `Some(old_value)` if the key already existed (its position is kept).
    /// - `None` if the key is new; it goes last.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        let Self { entries, indices } = self;
        let hash = hash_one(&key);
        match indices.find(hash, |&i| entries[i].0 == key) {
            Some(&index) => Some(core::mem::replace(&mut entries[index].1, value)),
            None => {
                indices.insert_unique(hash, entries.len(), |&i| hash_one(&entries[i].0));
                entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        let index = self
            .indices
            .find(hash_one(key), |&i| self.entries[i].0 == *key)?;
        Some(&self.entries[*index].1)
    }

    #[inline]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(Value, Value)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for MapValue {}

impl Hash for MapValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mixed = self
            .entries
            .iter()
            .fold(0u64, |acc, entry| acc.wrapping_add(hash_one(entry)));
        state.write_usize(self.entries.len());
        state.write_u64(mixed);
    }
}

impl fmt::Debug for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
