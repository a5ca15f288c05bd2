use alloc::string::String;

use crate::info::ScalarValue;
use crate::ops::EnumValue;
use crate::{MarshalError, Primitive};

/// Enums become their underlying member value; flags their combined bits.
pub(super) struct EnumMarshaller<'a> {
    pub value: &'a EnumValue,
}

impl EnumMarshaller<'_> {
    pub fn marshal(&self) -> Result<Primitive, MarshalError> {
        Ok(match self.value.value() {
            ScalarValue::Bool(v) => Primitive::Bool(*v),
            ScalarValue::Int(v) => Primitive::from(*v),
            ScalarValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(Primitive::Number)
                .ok_or(MarshalError::NonFiniteFloat(*v))?,
            ScalarValue::Str(v) => Primitive::String(String::from(&**v)),
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use serde_json::json;

    use crate::info::EnumInfo;
    use crate::ops::Value;
    use crate::registry::Registry;

    #[test]
    fn member_values() {
        let registry = Registry::new();
        let float = Arc::new(EnumInfo::new("m::F", [("HALF", 0.5), ("ONE", 1.0)]));
        let boolean = Arc::new(EnumInfo::new("m::B", [("YES", true), ("NO", false)]));
        let flag = Arc::new(EnumInfo::flag("m::Flag", [("A", 1), ("B", 2)]));

        let half = Value::Enum(float.member("HALF").unwrap());
        assert_eq!(registry.marshal(&half).unwrap(), json!(0.5));
        let no = Value::Enum(boolean.member("NO").unwrap());
        assert_eq!(registry.marshal(&no).unwrap(), json!(false));
        let ab = Value::Enum(flag.combine(&["A", "B"]).unwrap());
        assert_eq!(registry.marshal(&ab).unwrap(), json!(3));
        let empty = Value::Enum(flag.from_value(0).unwrap());
        assert_eq!(registry.marshal(&empty).unwrap(), json!(0));
    }
}
