use alloc::sync::Arc;

use crate::info::{EnumInfo, ScalarValue, TypeInfo};
use crate::ops::Value;
use crate::{Primitive, UnmarshalError};

/// Scalars become enum members, looked up by value.
pub(super) struct EnumUnmarshaller<'a> {
    pub data: &'a Primitive,
    pub info: &'a Arc<EnumInfo>,
    pub target: &'a TypeInfo,
}

impl EnumUnmarshaller<'_> {
    pub fn unmarshal(&self) -> Result<Value, UnmarshalError> {
        let Some(scalar) = ScalarValue::from_primitive(self.info.kind(), self.data) else {
            return Err(UnmarshalError::mismatch(self.target, self.data));
        };
        match self.info.from_value(scalar) {
            Some(value) => Ok(Value::Enum(value)),
            None => Err(UnmarshalError::NoSuchMember {
                target: self.target.clone(),
                value: self.data.clone(),
            }),
        }
    }
}
