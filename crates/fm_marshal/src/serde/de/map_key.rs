use alloc::string::String;

use crate::info::{ScalarKind, TypeInfo};
use crate::registry::Registry;
use crate::{Primitive, UnmarshalError};

/// Turns a JSON object key back into primitive data for the key type `ty`.
///
/// The result still goes through the registry; this only undoes the string
/// coercion applied when marshalling. Keys of hooked types, unions and
/// composite types stay strings.
pub(super) fn decode_key(
    registry: &Registry,
    key: &str,
    ty: &TypeInfo,
) -> Result<Primitive, UnmarshalError> {
    if registry.unmarshal_hook(ty).is_some() {
        return Ok(Primitive::String(String::from(key)));
    }
    match ty {
        TypeInfo::Scalar(kind) => decode_scalar(*kind, key, ty),
        TypeInfo::Enum(info) => decode_scalar(info.kind(), key, ty),
        TypeInfo::Optional(_) if key == "null" => Ok(Primitive::Null),
        TypeInfo::Optional(info) => decode_key(registry, key, info.inner()),
        _ => Ok(Primitive::String(String::from(key))),
    }
}

fn decode_scalar(kind: ScalarKind, key: &str, ty: &TypeInfo) -> Result<Primitive, UnmarshalError> {
    let invalid = |expected: &'static str| UnmarshalError::InvalidKey {
        target: ty.clone(),
        key: String::from(key),
        expected,
    };
    match kind {
        ScalarKind::Str => Ok(Primitive::String(String::from(key))),
        ScalarKind::Int => key
            .parse::<i64>()
            .map(Primitive::from)
            .map_err(|_| invalid("an integer")),
        ScalarKind::Float => key
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Primitive::Number)
            .ok_or_else(|| invalid("a finite number")),
        ScalarKind::Bool => match key {
            "true" => Ok(Primitive::Bool(true)),
            "false" => Ok(Primitive::Bool(false)),
            _ => Err(invalid("'true' or 'false'")),
        },
        ScalarKind::Null => match key {
            "null" => Ok(Primitive::Null),
            _ => Err(invalid("'null'")),
        },
    }
}
