use alloc::sync::Arc;

use crate::info::TypeInfo;

/// Descriptor of a homogeneous, ordered sequence (`List[T]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceInfo {
    item: Arc<TypeInfo>,
}

impl SequenceInfo {
    /// Creates a sequence descriptor with the given item type.
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
