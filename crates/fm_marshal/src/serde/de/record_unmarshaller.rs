use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::info::{RecordInfo, TypeInfo};
use crate::ops::{RecordValue, Value};
use crate::registry::Registry;
use crate::{PrimitiveMap, UnmarshalError};

/// Objects become records, field by field in declaration order.
///
/// - `OMIT` fields take their default without looking at the input.
/// - A present key goes through the field override, else the registry.
/// - An absent key takes the default as is, or fails with `MissingKey`.
///
/// Keys that match no field are ignored.
pub(super) struct RecordUnmarshaller<'a> {
    pub entries: &'a PrimitiveMap,
    pub info: &'a Arc<RecordInfo>,
    pub target: &'a TypeInfo,
    pub registry: &'a Registry,
}

impl RecordUnmarshaller<'_> {
    pub fn unmarshal(&self) -> Result<Value, UnmarshalError> {
        let mut fields = Vec::with_capacity(self.info.len());
        for field in self.info.iter() {
            let options = field.options();
            if options.is_omitted() {
                let default = field.default().ok_or_else(|| UnmarshalError::MissingDefault {
                    name: String::from(field.name()),
                    target: self.target.clone(),
                })?;
                fields.push(default.clone());
                continue;
            }

            let value = match self.entries.get(field.key()) {
                Some(data) => match options.unmarshal_fn() {
                    Some(unmarshal) => unmarshal(data)?,
                    None => self.registry.unmarshal(data, field.ty())?,
                },
                None => match field.default() {
                    Some(default) => default.clone(),
                    None => {
                        return Err(UnmarshalError::MissingKey {
                            name: String::from(field.key()),
                            target: self.target.clone(),
                        });
                    }
                },
            };
            fields.push(value);
        }
        Ok(Value::Record(RecordValue::from_parts(self.info.clone(), fields)))
    }
}
