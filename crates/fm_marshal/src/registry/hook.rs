use alloc::sync::Arc;
use core::fmt;

use crate::info::TypeInfo;
use crate::ops::Value;
use crate::registry::Registry;
use crate::{MarshalError, Primitive, UnmarshalError};

type MarshalValueFn = dyn Fn(&Value) -> Result<Primitive, MarshalError> + Send + Sync;
type MarshalWithRegistryFn =
    dyn Fn(&Value, &Registry) -> Result<Primitive, MarshalError> + Send + Sync;

type UnmarshalValueFn = dyn Fn(&Primitive) -> Result<Value, UnmarshalError> + Send + Sync;
type UnmarshalWithContextFn =
    dyn Fn(&Primitive, &TypeInfo, &Registry) -> Result<Value, UnmarshalError> + Send + Sync;

// -----------------------------------------------------------------------------
// MarshalHook

/// A user-supplied converter from values of one shape to primitive data.
///
/// A hook either takes the value alone, or the value and the registry
/// running the conversion (to marshal nested values with the same hooks).
///
/// # Examples
///
/// ```
/// use fm_marshal::ops::Value;
/// use fm_marshal::registry::{MarshalHook, Registry};
/// use fm_marshal::MarshalError;
/// use serde_json::json;
///
/// let hook = MarshalHook::new(|v: &Value| {
///     let n = v.as_int().ok_or_else(|| MarshalError::custom("not an int"))?;
///     Ok(json!(format!("#{n}")))
/// });
/// assert!(!hook.takes_args());
/// assert_eq!(hook.call(&Value::Int(3), &Registry::new()).unwrap(), json!("#3"));
/// ```
#[derive(Clone)]
pub enum MarshalHook {
    Value(Arc<MarshalValueFn>),
    WithRegistry(Arc<MarshalWithRegistryFn>),
}

impl MarshalHook {
    /// A hook that only looks at the value.
    pub fn new(
        f: impl Fn(&Value) -> Result<Primitive, MarshalError> + Send + Sync + 'static,
    ) -> Self {
        Self::Value(Arc::new(f))
    }

    /// A hook that also receives the registry running the conversion.
    pub fn with_registry(
        f: impl Fn(&Value, &Registry) -> Result<Primitive, MarshalError> + Send + Sync + 'static,
    ) -> Self {
        Self::WithRegistry(Arc::new(f))
    }

    /// Returns `true` if the hook receives the registry.
    #[inline]
    pub const fn takes_args(&self) -> bool {
        matches!(self, Self::WithRegistry(_))
    }

    /// Runs the hook.
    #[inline]
    pub fn call(&self, value: &Value, registry: &Registry) -> Result<Primitive, MarshalError> {
        match self {
            Self::Value(f) => f(value),
            Self::WithRegistry(f) => f(value, registry),
        }
    }
}

impl<F> From<F> for MarshalHook
where
    F: Fn(&Value) -> Result<Primitive, MarshalError> + Send + Sync + 'static,
{
    #[inline]
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl fmt::Debug for MarshalHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.write_str("MarshalHook(value)"),
            Self::WithRegistry(_) => f.write_str("MarshalHook(value, registry)"),
        }
    }
}

// -----------------------------------------------------------------------------
// UnmarshalHook

/// A user-supplied converter from primitive data to values of one type.
///
/// A hook either takes the data alone, or the data, the requested target
/// descriptor and the registry running the conversion.
#[derive(Clone)]
pub enum UnmarshalHook {
    Value(Arc<UnmarshalValueFn>),
    WithContext(Arc<UnmarshalWithContextFn>),
}

impl UnmarshalHook {
    /// A hook that only looks at the data.
    pub fn new(
        f: impl Fn(&Primitive) -> Result<Value, UnmarshalError> + Send + Sync + 'static,
    ) -> Self {
        Self::Value(Arc::new(f))
    }

    /// A hook that also receives the target descriptor and the registry.
    ///
    /// The target is the descriptor actually requested, so a hook registered
    /// for a base record sees the subtype it must build.
    pub fn with_context(
        f: impl Fn(&Primitive, &TypeInfo, &Registry) -> Result<Value, UnmarshalError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self::WithContext(Arc::new(f))
    }

    /// Returns `true` if the hook receives the target and the registry.
    #[inline]
    pub const fn takes_args(&self) -> bool {
        matches!(self, Self::WithContext(_))
    }

    /// Runs the hook.
    #[inline]
    pub fn call(
        &self,
        data: &Primitive,
        target: &TypeInfo,
        registry: &Registry,
    ) -> Result<Value, UnmarshalError> {
        match self {
            Self::Value(f) => f(data),
            Self::WithContext(f) => f(data, target, registry),
        }
    }
}

impl<F> From<F> for UnmarshalHook
where
    F: Fn(&Primitive) -> Result<Value, UnmarshalError> + Send + Sync + 'static,
{
    #[inline]
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl fmt::Debug for UnmarshalHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.write_str("UnmarshalHook(data)"),
            Self::WithContext(_) => f.write_str("UnmarshalHook(data, target, registry)"),
        }
    }
}
