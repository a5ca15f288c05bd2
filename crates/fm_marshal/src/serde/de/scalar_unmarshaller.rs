use crate::info::{ScalarKind, TypeInfo};
use crate::ops::Value;
use crate::{Primitive, UnmarshalError};

/// Scalars pass through after a shape check; integers widen to floats.
pub(super) struct ScalarUnmarshaller<'a> {
    pub kind: ScalarKind,
    pub data: &'a Primitive,
    pub target: &'a TypeInfo,
}

impl ScalarUnmarshaller<'_> {
    pub fn unmarshal(&self) -> Result<Value, UnmarshalError> {
        match (self.kind, self.data) {
            (ScalarKind::Null, Primitive::Null) => Ok(Value::Null),
            (ScalarKind::Bool, Primitive::Bool(v)) => Ok(Value::Bool(*v)),
            (ScalarKind::Int, Primitive::Number(n)) if !n.is_f64() => {
                n.as_i64()
                    .map(Value::Int)
                    .ok_or_else(|| UnmarshalError::IntegerOverflow {
                        target: self.target.clone(),
                        data: self.data.clone(),
                    })
            }
            (ScalarKind::Float, Primitive::Number(n)) => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| UnmarshalError::mismatch(self.target, self.data)),
            (ScalarKind::Str, Primitive::String(s)) => Ok(Value::Str(s.clone())),
            _ => Err(UnmarshalError::mismatch(self.target, self.data)),
        }
    }
}

/// Builds the dynamic value of untyped data, for `Any` targets.
///
/// Integers that do not fit `i64` become floats and may lose precision.
pub(super) fn identity(data: &Primitive) -> Value {
    match data {
        Primitive::Null => Value::Null,
        Primitive::Bool(v) => Value::Bool(*v),
        Primitive::Number(n) => match n.as_i64() {
            Some(v) if !n.is_f64() => Value::Int(v),
            _ => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Primitive::String(s) => Value::Str(s.clone()),
        Primitive::Array(items) => Value::List(items.iter().map(identity).collect()),
        Primitive::Object(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (Value::Str(k.clone()), identity(v)))
                .collect(),
        ),
    }
}
