use super::enum_unmarshaller::EnumUnmarshaller;
use super::list_unmarshaller::{ListUnmarshaller, TupleUnmarshaller};
use super::map_unmarshaller::MapUnmarshaller;
use super::record_unmarshaller::RecordUnmarshaller;
use super::scalar_unmarshaller::{ScalarUnmarshaller, identity};
use super::union_resolver::{resolve_optional, resolve_union};

use crate::info::TypeInfo;
use crate::ops::Value;
use crate::registry::{Registry, Rejection, UnionResolution, UnmarshalImpl};
use crate::{Primitive, PrimitiveShape, UnmarshalError};

// -----------------------------------------------------------------------------
// Resolution

/// Chooses the converter for data of `shape` into `target`.
///
/// 1. **Any**: the data is kept as it is.
/// 2. **Hook Priority**: a hook registered for the target, or for the
///    nearest base type of a named target, wins.
/// 3. **Built-ins**: the target's structural converter, if the shape fits.
/// 4. **Unions**: optionals and unions resolve to a member.
///
/// Objects without a hook cannot be built from data.
pub(crate) fn resolve_unmarshal(
    registry: &Registry,
    shape: PrimitiveShape,
    target: &TypeInfo,
) -> UnmarshalImpl {
    if let TypeInfo::Any = target {
        return UnmarshalImpl::Identity;
    }
    if let Some(hook) = registry.unmarshal_hook(target) {
        return UnmarshalImpl::Hook(hook.clone());
    }

    match target {
        TypeInfo::Scalar(kind) if kind.accepts(shape) => UnmarshalImpl::Scalar(*kind),
        TypeInfo::Optional(info) => resolve_optional(shape, info),
        TypeInfo::Union(info) => resolve_union(registry, shape, info),
        TypeInfo::Sequence(_) if shape == PrimitiveShape::Seq => UnmarshalImpl::Sequence,
        TypeInfo::Tuple(_) if shape == PrimitiveShape::Seq => UnmarshalImpl::Tuple,
        TypeInfo::Set(_) if shape == PrimitiveShape::Seq => UnmarshalImpl::Set,
        TypeInfo::Map(_) if shape == PrimitiveShape::Map => UnmarshalImpl::Map,
        TypeInfo::Record(_) if shape == PrimitiveShape::Map => UnmarshalImpl::Record,
        TypeInfo::Enum(info) if info.kind().accepts(shape) => UnmarshalImpl::Enum,
        _ => UnmarshalImpl::Reject(Rejection::Mismatch),
    }
}

// -----------------------------------------------------------------------------
// Unmarshal engine

impl Registry {
    /// Builds a value of `target` from primitive data.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_marshal::info::TypeInfo;
    /// use fm_marshal::ops::Value;
    /// use fm_marshal::registry::Registry;
    /// use serde_json::json;
    ///
    /// let registry = Registry::new();
    /// let target = TypeInfo::map(TypeInfo::bool(), TypeInfo::optional(TypeInfo::int()));
    ///
    /// let value = registry.unmarshal(&json!({ "true": 1, "false": null }), &target).unwrap();
    /// assert_eq!(value, Value::map([
    ///     (Value::Bool(true), Value::Int(1)),
    ///     (Value::Bool(false), Value::Null),
    /// ]));
    ///
    /// assert!(registry.unmarshal(&json!({ "x": 1 }), &target).is_err());
    /// ```
    pub fn unmarshal(&self, data: &Primitive, target: &TypeInfo) -> Result<Value, UnmarshalError> {
        let shape = PrimitiveShape::of(data);
        match (self.unmarshal_impl(shape, target), target, data) {
            (UnmarshalImpl::Identity, _, _) => Ok(identity(data)),
            (UnmarshalImpl::Hook(hook), _, _) => hook.call(data, target, self),
            (UnmarshalImpl::Scalar(kind), _, _) => ScalarUnmarshaller { kind, data, target }.unmarshal(),
            (UnmarshalImpl::Sequence, TypeInfo::Sequence(info), Primitive::Array(items)) => {
                ListUnmarshaller {
                    items,
                    item: info.item(),
                    registry: self,
                }
                .unmarshal_list()
            }
            (UnmarshalImpl::Set, TypeInfo::Set(info), Primitive::Array(items)) => ListUnmarshaller {
                items,
                item: info.item(),
                registry: self,
            }
            .unmarshal_set(),
            (UnmarshalImpl::Tuple, TypeInfo::Tuple(info), Primitive::Array(items)) => {
                TupleUnmarshaller {
                    items,
                    types: info.items(),
                    target,
                    registry: self,
                }
                .unmarshal()
            }
            (UnmarshalImpl::Map, TypeInfo::Map(info), Primitive::Object(entries)) => {
                MapUnmarshaller {
                    entries,
                    info,
                    registry: self,
                }
                .unmarshal()
            }
            (UnmarshalImpl::Record, TypeInfo::Record(info), Primitive::Object(entries)) => {
                RecordUnmarshaller {
                    entries,
                    info,
                    target,
                    registry: self,
                }
                .unmarshal()
            }
            (UnmarshalImpl::Enum, TypeInfo::Enum(info), _) => {
                EnumUnmarshaller { data, info, target }.unmarshal()
            }
            (UnmarshalImpl::Union(UnionResolution::Null), _, _) => Ok(Value::Null),
            (UnmarshalImpl::Union(UnionResolution::Member(member)), _, _) => {
                self.unmarshal(data, &member)
            }
            (UnmarshalImpl::Reject(rejection), _, _) => Err(rejection.into_error(target, data)),
            _ => Err(UnmarshalError::mismatch(target, data)),
        }
    }

    /// Parses JSON text and builds a value of `target` from it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_marshal::info::TypeInfo;
    /// use fm_marshal::ops::Value;
    /// use fm_marshal::registry::Registry;
    ///
    /// let registry = Registry::new();
    /// let target = TypeInfo::tuple([TypeInfo::int(), TypeInfo::str()]);
    /// let value = registry.unmarshal_json(r#"[1, "a"]"#, &target).unwrap();
    /// assert_eq!(value, Value::tuple([Value::Int(1), Value::from("a")]));
    ///
    /// assert!(registry.unmarshal_json("[1,", &target).is_err());
    /// ```
    pub fn unmarshal_json(&self, text: &str, target: &TypeInfo) -> Result<Value, UnmarshalError> {
        let data: Primitive = serde_json::from_str(text)?;
        self.unmarshal(&data, target)
    }
}
