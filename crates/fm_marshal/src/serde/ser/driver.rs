use alloc::string::String;

use super::enum_marshaller::EnumMarshaller;
use super::list_marshaller::ListMarshaller;
use super::map_marshaller::MapMarshaller;
use super::record_marshaller::RecordMarshaller;
use super::set_marshaller::SetMarshaller;

use crate::ops::{Shape, Value};
use crate::registry::{MarshalImpl, Registry};
use crate::{MarshalError, Primitive};

// -----------------------------------------------------------------------------
// Resolution

/// Chooses the converter for values of `shape`.
///
/// 1. **Hook Priority**: a hook registered for the shape, or for the nearest
///    base type of a named shape, wins.
/// 2. **Scalars**: null, bool, int, float and str pass through.
/// 3. **Built-ins**: containers, enums and records have structural converters.
///
/// Objects without a hook are unsupported.
pub(crate) fn resolve_marshal(registry: &Registry, shape: &Shape) -> MarshalImpl {
    if let Some(hook) = registry.marshal_hook(shape) {
        return MarshalImpl::Hook(hook.clone());
    }
    match shape {
        Shape::Null | Shape::Bool | Shape::Int | Shape::Float | Shape::Str => MarshalImpl::Identity,
        Shape::List | Shape::Tuple => MarshalImpl::Sequence,
        Shape::Set => MarshalImpl::Set,
        Shape::Map => MarshalImpl::Map,
        Shape::Enum(_) => MarshalImpl::Enum,
        Shape::Record(_) => MarshalImpl::Record,
        Shape::Object(_) => MarshalImpl::Unsupported,
    }
}

fn marshal_scalar(value: &Value) -> Option<Result<Primitive, MarshalError>> {
    let data = match value {
        Value::Null => Primitive::Null,
        Value::Bool(v) => Primitive::Bool(*v),
        Value::Int(v) => Primitive::from(*v),
        Value::Float(v) => match serde_json::Number::from_f64(*v) {
            Some(n) => Primitive::Number(n),
            None => return Some(Err(MarshalError::NonFiniteFloat(*v))),
        },
        Value::Str(v) => Primitive::String(v.clone()),
        _ => return None,
    };
    Some(Ok(data))
}

// -----------------------------------------------------------------------------
// Marshal engine

impl Registry {
    /// Converts `value` into primitive data.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_marshal::ops::Value;
    /// use fm_marshal::registry::Registry;
    /// use serde_json::json;
    ///
    /// let registry = Registry::new();
    /// let value = Value::map([
    ///     (Value::from(true), Value::from(1)),
    ///     (Value::Null, Value::from(0)),
    ///     (Value::from(0.1), Value::tuple([Value::from("a"), Value::from(2)])),
    /// ]);
    ///
    /// assert_eq!(
    ///     registry.marshal(&value).unwrap(),
    ///     json!({ "true": 1, "null": 0, "0.1": ["a", 2] }),
    /// );
    /// ```
    pub fn marshal(&self, value: &Value) -> Result<Primitive, MarshalError> {
        let shape = value.shape();
        match (self.marshal_impl(&shape), value) {
            (MarshalImpl::Hook(hook), _) => hook.call(value, self),
            (MarshalImpl::Identity, _) => match marshal_scalar(value) {
                Some(result) => result,
                None => Err(MarshalError::Unsupported { shape }),
            },
            (MarshalImpl::Sequence, Value::List(items) | Value::Tuple(items)) => ListMarshaller {
                items,
                registry: self,
            }
            .marshal(),
            (MarshalImpl::Set, Value::Set(set)) => SetMarshaller {
                set,
                registry: self,
            }
            .marshal(),
            (MarshalImpl::Map, Value::Map(map)) => MapMarshaller {
                map,
                registry: self,
            }
            .marshal(),
            (MarshalImpl::Enum, Value::Enum(value)) => EnumMarshaller { value }.marshal(),
            (MarshalImpl::Record, Value::Record(record)) => RecordMarshaller {
                record,
                registry: self,
            }
            .marshal(),
            _ => Err(MarshalError::Unsupported { shape }),
        }
    }

    /// Converts `value` into compact JSON text.
    ///
    /// Object keys keep the order produced by marshalling.
    pub fn marshal_json(&self, value: &Value) -> Result<String, MarshalError> {
        let data = self.marshal(value)?;
        Ok(serde_json::to_string(&data)?)
    }
}
