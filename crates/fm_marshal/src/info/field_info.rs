use alloc::sync::Arc;
use core::fmt;

use bitflags::bitflags;

use crate::info::TypeInfo;
use crate::ops::Value;
use crate::{MarshalError, Primitive, UnmarshalError};

// -----------------------------------------------------------------------------
// FieldFlags

bitflags! {
    /// Switches that take a field out of the marshalled form.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        /// Never marshalled; unmarshalling takes the field's default.
        const OMIT = 1;
        /// Not marshalled while the value is `null`.
        const OMIT_IF_NONE = 1 << 1;
    }
}

// -----------------------------------------------------------------------------
// FieldOptions

/// A field-level marshal override.
pub type FieldMarshalFn = Arc<dyn Fn(&Value) -> Result<Primitive, MarshalError> + Send + Sync>;

/// A field-level unmarshal override.
pub type FieldUnmarshalFn =
    Arc<dyn Fn(&Primitive) -> Result<Value, UnmarshalError> + Send + Sync>;

/// Per-field marshalling options.
///
/// Field-level overrides take precedence over any hook in the registry.
///
/// # Examples
///
/// ```
/// use fm_marshal::info::{FieldFlags, field};
///
/// let options = field().rename("my-field").omit_if_none();
///
/// assert_eq!(options.name(), Some("my-field"));
/// assert!(options.flags().contains(FieldFlags::OMIT_IF_NONE));
/// assert!(!options.is_omitted());
/// ```
#[derive(Clone, Default)]
pub struct FieldOptions {
    name: Option<Arc<str>>,
    flags: FieldFlags,
    marshal: Option<FieldMarshalFn>,
    unmarshal: Option<FieldUnmarshalFn>,
}

/// Starts a [`FieldOptions`] declaration.
#[inline]
pub fn field() -> FieldOptions {
    FieldOptions::default()
}

impl FieldOptions {
    /// Uses `name` as the key in the marshalled mapping.
    pub fn rename(mut self, name: &str) -> Self {
        self.name = Some(Arc::from(name));
        self
    }

    /// Sets [`FieldFlags::OMIT`].
    pub fn omit(mut self) -> Self {
        self.flags |= FieldFlags::OMIT;
        self
    }

    /// Sets [`FieldFlags::OMIT_IF_NONE`].
    pub fn omit_if_none(mut self) -> Self {
        self.flags |= FieldFlags::OMIT_IF_NONE;
        self
    }

    /// Replaces the flags.
    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Marshals this field with `f` instead of the registry.
    pub fn marshal_with(
        mut self,
        f: impl Fn(&Value) -> Result<Primitive, MarshalError> + Send + Sync + 'static,
    ) -> Self {
        self.marshal = Some(Arc::new(f));
        self
    }

    /// Unmarshals this field with `f` instead of the registry.
    pub fn unmarshal_with(
        mut self,
        f: impl Fn(&Primitive) -> Result<Value, UnmarshalError> + Send + Sync + 'static,
    ) -> Self {
        self.unmarshal = Some(Arc::new(f));
        self
    }

    /// The external name, if renamed.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    #[inline]
    pub fn is_omitted(&self) -> bool {
        self.flags.contains(FieldFlags::OMIT)
    }

    #[inline]
    pub fn marshal_fn(&self) -> Option<&FieldMarshalFn> {
        self.marshal.as_ref()
    }

    #[inline]
    pub fn unmarshal_fn(&self) -> Option<&FieldUnmarshalFn> {
        self.unmarshal.as_ref()
    }
}

impl fmt::Debug for FieldOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldOptions")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("marshal", &self.marshal.is_some())
            .field("unmarshal", &self.unmarshal.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A named, typed record field.
///
/// # Examples
///
/// ```
/// use fm_marshal::info::{FieldInfo, TypeInfo, field};
/// use fm_marshal::ops::Value;
///
/// let f = FieldInfo::new("my_field", TypeInfo::optional(TypeInfo::int()))
///     .with_default(Value::Null)
///     .with_options(field().rename("my-field"));
///
/// assert_eq!(f.name(), "my_field");
/// assert_eq!(f.key(), "my-field");
/// assert_eq!(f.default(), Some(&Value::Null));
/// ```
#[derive(Debug, Clone)]
pub struct FieldInfo {
    name: Arc<str>,
    ty: TypeInfo,
    default: Option<Value>,
    options: FieldOptions,
}

impl FieldInfo {
    /// Creates a required field without options.
    pub fn new(name: &str, ty: TypeInfo) -> Self {
        Self {
            name: Arc::from(name),
            ty,
            default: None,
            options: FieldOptions::default(),
        }
    }

    /// Gives the field a default, used when its key is absent.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// The declared (in-memory) name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key in the marshalled mapping: the rename if any, else the name.
    #[inline]
    pub fn key(&self) -> &str {
        self.options.name().unwrap_or(&self.name)
    }

    #[inline]
    pub fn ty(&self) -> &TypeInfo {
        &self.ty
    }

    #[inline]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[inline]
    pub fn options(&self) -> &FieldOptions {
        &self.options
    }
}
