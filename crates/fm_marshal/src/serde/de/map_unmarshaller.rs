use super::map_key::decode_key;

use crate::info::MapInfo;
use crate::ops::{MapValue, Value};
use crate::registry::Registry;
use crate::{PrimitiveMap, UnmarshalError};

/// Objects become maps; keys are decoded for the key type first.
pub(super) struct MapUnmarshaller<'a> {
    pub entries: &'a PrimitiveMap,
    pub info: &'a MapInfo,
    pub registry: &'a Registry,
}

impl MapUnmarshaller<'_> {
    pub fn unmarshal(&self) -> Result<Value, UnmarshalError> {
        let mut map = MapValue::with_capacity(self.entries.len());
        for (key, value) in self.entries {
            let key = decode_key(self.registry, key, self.info.key())?;
            let key = self.registry.unmarshal(&key, self.info.key())?;
            let value = self.registry.unmarshal(value, self.info.value())?;
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}
