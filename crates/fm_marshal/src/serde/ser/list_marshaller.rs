use alloc::vec::Vec;

use crate::ops::Value;
use crate::registry::Registry;
use crate::{MarshalError, Primitive};

/// Lists and tuples become sequences in element order.
pub(super) struct ListMarshaller<'a> {
    pub items: &'a [Value],
    pub registry: &'a Registry,
}

impl ListMarshaller<'_> {
    pub fn marshal(&self) -> Result<Primitive, MarshalError> {
        self.items
            .iter()
            .map(|item| self.registry.marshal(item))
            .collect::<Result<Vec<_>, _>>()
            .map(Primitive::Array)
    }
}
