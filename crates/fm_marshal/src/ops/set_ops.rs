use core::fmt;
use core::hash::{Hash, Hasher};

use fm_utils::hash::{HashSet, hash_one};

use crate::ops::Value;

/// An unordered collection of unique values.
///
/// Equality and hashing ignore iteration order. Marshalling emits the items
/// sorted, so output never depends on insertion order.
///
/// # Examples
///
/// ```
/// use fm_marshal::ops::{SetValue, Value};
///
/// let a: SetValue = [Value::from(1), Value::from(2)].into_iter().collect();
/// let mut b = SetValue::new();
/// b.insert(Value::from(2));
/// b.insert(Value::from(1));
/// assert!(!b.insert(Value::from(1)));
///
/// assert_eq!(a, b);
/// assert_eq!(b.len(), 2);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SetValue {
    items: HashSet<Value>,
}

impl SetValue {
    /// Creates an empty set.
    #[inline]
    pub fn new() -> Self {
        Self {
            items: HashSet::default(),
        }
    }

    /// Adds `value`; returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, value: Value) -> bool {
        self.items.insert(value)
    }

    #[inline]
    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in an unspecified order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.items.iter()
    }
}

impl FromIterator<Value> for SetValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = Self::new();
        set.items.extend(iter);
        set
    }
}

impl Hash for SetValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mixed = self
            .items
            .iter()
            .fold(0u64, |acc, v| acc.wrapping_add(hash_one(v)));
        state.write_usize(self.items.len());
        state.write_u64(mixed);
    }
}

impl fmt::Debug for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}
