use alloc::sync::Arc;

use crate::info::TypeInfo;

/// Descriptor of a fixed-arity, heterogeneous sequence (`Tuple[A, B, ..]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleInfo {
    items: Arc<[TypeInfo]>,
}

impl TupleInfo {
    /// Creates a tuple descriptor. The item order is the element order.
    pub fn new(items: impl IntoIterator<Item = TypeInfo>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Returns the element descriptors in order.
    #[inline]
    pub fn items(&self) -> &[TypeInfo] {
        &self.items
    }

    /// Returns the arity.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
