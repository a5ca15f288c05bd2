use alloc::vec::Vec;

use crate::info::TypeInfo;
use crate::ops::{SetValue, Value};
use crate::registry::Registry;
use crate::{Primitive, UnmarshalError};

/// Sequences become lists or sets of one item type.
pub(super) struct ListUnmarshaller<'a> {
    pub items: &'a [Primitive],
    pub item: &'a TypeInfo,
    pub registry: &'a Registry,
}

impl ListUnmarshaller<'_> {
    pub fn unmarshal_list(&self) -> Result<Value, UnmarshalError> {
        self.items
            .iter()
            .map(|item| self.registry.unmarshal(item, self.item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }

    /// Equal items collapse.
    pub fn unmarshal_set(&self) -> Result<Value, UnmarshalError> {
        self.items
            .iter()
            .map(|item| self.registry.unmarshal(item, self.item))
            .collect::<Result<SetValue, _>>()
            .map(Value::Set)
    }
}

/// Sequences become tuples, one item type per position.
pub(super) struct TupleUnmarshaller<'a> {
    pub items: &'a [Primitive],
    pub types: &'a [TypeInfo],
    pub target: &'a TypeInfo,
    pub registry: &'a Registry,
}

impl TupleUnmarshaller<'_> {
    pub fn unmarshal(&self) -> Result<Value, UnmarshalError> {
        if self.items.len() != self.types.len() {
            return Err(UnmarshalError::WrongLength {
                target: self.target.clone(),
                expected: self.types.len(),
                actual: self.items.len(),
            });
        }
        self.items
            .iter()
            .zip(self.types)
            .map(|(item, ty)| self.registry.unmarshal(item, ty))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Tuple)
    }
}
