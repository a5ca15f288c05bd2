use alloc::string::{String, ToString};

use crate::ops::{MapValue, Value};
use crate::registry::Registry;
use crate::{MarshalError, Primitive, PrimitiveMap};

/// Maps become objects in insertion order.
///
/// Each key is marshalled first, then coerced to a string: `true`, `false`
/// and `null` by name, numbers in their shortest round-trip form, strings as
/// they are. Keys marshalling to sequences or mappings are rejected. Keys
/// that coerce to the same string collapse, the later entry winning.
pub(super) struct MapMarshaller<'a> {
    pub map: &'a MapValue,
    pub registry: &'a Registry,
}

impl MapMarshaller<'_> {
    pub fn marshal(&self) -> Result<Primitive, MarshalError> {
        let mut out = PrimitiveMap::with_capacity(self.map.len());
        for (key, value) in self.map.iter() {
            let key = self.marshal_key(key)?;
            out.insert(key, self.registry.marshal(value)?);
        }
        Ok(Primitive::Object(out))
    }

    fn marshal_key(&self, key: &Value) -> Result<String, MarshalError> {
        match self.registry.marshal(key)? {
            Primitive::Null => Ok(String::from("null")),
            Primitive::Bool(true) => Ok(String::from("true")),
            Primitive::Bool(false) => Ok(String::from("false")),
            Primitive::Number(n) => Ok(n.to_string()),
            Primitive::String(s) => Ok(s),
            other => Err(MarshalError::InvalidKey {
                shape: key.shape(),
                key: other,
            }),
        }
    }
}
