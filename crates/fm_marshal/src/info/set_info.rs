use alloc::sync::Arc;

use crate::info::TypeInfo;

/// Descriptor of an unordered collection of unique items (`Set[T]`).
///
/// Sets marshal to sequences sorted by the marshalled items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetInfo {
    item: Arc<TypeInfo>,
}

impl SetInfo {
    /// Creates a set descriptor with the given item type.
    #[inline]
    pub fn new(item: TypeInfo) -> Self {
        Self {
            item: Arc::new(item),
        }
    }

    /// Returns the item descriptor.
    #[inline]
    pub fn item(&self) -> &TypeInfo {
        &self.item
    }
}
