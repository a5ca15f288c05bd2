use alloc::sync::Arc;

use crate::info::TypeInfo;

/// Descriptor of a key-value mapping (`Dict[K, V]`).
///
/// Keys travel as JSON object keys, so they are coerced to strings when
/// marshalling and decoded back according to `key` when unmarshalling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapInfo {
    key: Arc<TypeInfo>,
    value: Arc<TypeInfo>,
}

impl MapInfo {
    /// Creates a map descriptor.
    #[inline]
    pub fn new(key: TypeInfo, value: TypeInfo) -> Self {
        Self {
            key: Arc::new(key),
            value: Arc::new(value),
        }
    }

    /// Returns the key descriptor.
    #[inline]
    pub fn key(&self) -> &TypeInfo {
        &self.key
    }

    /// Returns the value descriptor.
    #[inline]
    pub fn value(&self) -> &TypeInfo {
        &self.value
    }
}
