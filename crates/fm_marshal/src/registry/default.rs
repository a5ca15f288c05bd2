use alloc::string::String;
use std::sync::LazyLock;

use crate::info::TypeInfo;
use crate::ops::Value;
use crate::registry::{Registry, RegistryArc};
use crate::{MarshalError, Primitive, UnmarshalError};

static DEFAULT_REGISTRY: LazyLock<RegistryArc> = LazyLock::new(|| {
    let mut registry = Registry::new();
    registry.auto_register();
    RegistryArc::new(registry)
});

/// The process-wide registry used by the free functions of this crate.
///
/// Created on first use, with every submitted
/// [`HookPlugin`](crate::registry::HookPlugin) installed, and alive until
/// the process exits. Tests that register hooks should build their own
/// [`Registry`] instead.
///
/// The free functions hold a read lock for the whole conversion. Hooks
/// installed here must recurse through the registry they are handed
/// ([`MarshalHook::with_registry`](crate::registry::MarshalHook::with_registry),
/// [`UnmarshalHook::with_context`](crate::registry::UnmarshalHook::with_context)),
/// not through the free functions: a second read lock on the same thread
/// can deadlock behind a waiting writer.
#[inline]
pub fn default_registry() -> &'static RegistryArc {
    &DEFAULT_REGISTRY
}

/// [`Registry::marshal`] on the [default registry](default_registry).
///
/// # Examples
///
/// ```
/// use fm_marshal::ops::Value;
/// use serde_json::json;
///
/// let set = Value::set([Value::from(3), Value::from(1), Value::from(2)]);
/// assert_eq!(fm_marshal::marshal(&set).unwrap(), json!([1, 2, 3]));
/// ```
pub fn marshal(value: &Value) -> Result<Primitive, MarshalError> {
    default_registry().read().marshal(value)
}

/// [`Registry::marshal_json`] on the [default registry](default_registry).
pub fn marshal_json(value: &Value) -> Result<String, MarshalError> {
    default_registry().read().marshal_json(value)
}

/// [`Registry::unmarshal`] on the [default registry](default_registry).
pub fn unmarshal(data: &Primitive, target: &TypeInfo) -> Result<Value, UnmarshalError> {
    default_registry().read().unmarshal(data, target)
}

/// [`Registry::unmarshal_json`] on the [default registry](default_registry).
///
/// # Examples
///
/// ```
/// use fm_marshal::info::TypeInfo;
/// use fm_marshal::ops::Value;
///
/// let ty = TypeInfo::optional(TypeInfo::int());
/// assert_eq!(fm_marshal::unmarshal_json("null", &ty).unwrap(), Value::Null);
/// assert_eq!(fm_marshal::unmarshal_json("1", &ty).unwrap(), Value::Int(1));
/// assert!(fm_marshal::unmarshal_json("{", &ty).is_err());
/// ```
pub fn unmarshal_json(text: &str, target: &TypeInfo) -> Result<Value, UnmarshalError> {
    default_registry().read().unmarshal_json(text, target)
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use serde_json::json;

    use crate::MarshalError;
    use crate::info::{FieldInfo, RecordInfo, TypeInfo};
    use crate::ops::{RecordValue, Value};
    use crate::registry::{MarshalHook, default_registry};

    #[test]
    fn hooks_recurse_through_the_given_registry() {
        let info = Arc::new(RecordInfo::new(
            "default_tests::Wrapper",
            [FieldInfo::new("inner", TypeInfo::set(TypeInfo::int()))],
        ));
        default_registry().write().add_marshal_hook(
            &TypeInfo::from(&info),
            MarshalHook::with_registry(|value, registry| {
                let record = value.as_record().ok_or_else(|| MarshalError::custom("record"))?;
                registry.marshal(record.get("inner").unwrap_or(&Value::Null))
            }),
        );

        let inner = Value::set([Value::from(2), Value::from(1)]);
        let value = Value::Record(RecordValue::builder(&info).with("inner", inner).build().unwrap());
        assert_eq!(crate::marshal(&value).unwrap(), json!([1, 2]));
    }
}
