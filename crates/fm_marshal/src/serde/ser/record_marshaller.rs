use crate::info::FieldFlags;
use crate::ops::RecordValue;
use crate::registry::Registry;
use crate::{MarshalError, Primitive, PrimitiveMap};

/// Records become objects keyed by field, in declaration order.
///
/// `OMIT` fields are skipped, and so are `null` values of `OMIT_IF_NONE`
/// fields. A field-level marshal override beats every registry hook.
pub(super) struct RecordMarshaller<'a> {
    pub record: &'a RecordValue,
    pub registry: &'a Registry,
}

impl RecordMarshaller<'_> {
    pub fn marshal(&self) -> Result<Primitive, MarshalError> {
        let mut out = PrimitiveMap::with_capacity(self.record.info().len());
        for (field, value) in self.record.iter() {
            let options = field.options();
            if options.is_omitted() {
                continue;
            }
            if value.is_null() && options.flags().contains(FieldFlags::OMIT_IF_NONE) {
                continue;
            }
            let data = match options.marshal_fn() {
                Some(marshal) => marshal(value)?,
                None => self.registry.marshal(value)?,
            };
            out.insert(field.key().into(), data);
        }
        Ok(Primitive::Object(out))
    }
}
