use alloc::sync::Arc;
use core::{error, fmt};

use crate::info::{EnumInfo, ObjectInfo, RecordInfo, ScalarKind, Type};
use crate::info::{MapInfo, OptionalInfo, SequenceInfo, SetInfo, TupleInfo, UnionInfo};

// -----------------------------------------------------------------------------
// DescriptorKind

/// A fast discriminator for [`TypeInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    Any,
    Scalar,
    Sequence,
    Tuple,
    Set,
    Map,
    Optional,
    Union,
    Enum,
    Record,
    Object,
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.pad("Any"),
            Self::Scalar => f.pad("Scalar"),
            Self::Sequence => f.pad("Sequence"),
            Self::Tuple => f.pad("Tuple"),
            Self::Set => f.pad("Set"),
            Self::Map => f.pad("Map"),
            Self::Optional => f.pad("Optional"),
            Self::Union => f.pad("Union"),
            Self::Enum => f.pad("Enum"),
            Self::Record => f.pad("Record"),
            Self::Object => f.pad("Object"),
        }
    }
}

/// Error returned when a `TypeInfo` value is not the expected `DescriptorKind`.
#[derive(Debug)]
pub struct DescriptorKindError {
    pub expected: DescriptorKind,
    pub received: DescriptorKind,
}

impl fmt::Display for DescriptorKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "descriptor kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for DescriptorKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// An immutable, recursively defined description of a target type.
///
/// Descriptors drive unmarshalling: primitive data carries no type, so every
/// [`unmarshal`](crate::registry::Registry::unmarshal) call receives the
/// descriptor to build. They are also the keys of unmarshal hooks.
///
/// Cloning is cheap: nested descriptors live behind `Arc`s.
///
/// # Equality
///
/// Named descriptors (enum, record, object) are equal when their [`Type`]s
/// are. Unions compare as member sets.
///
/// # Examples
///
/// ```
/// use fm_marshal::info::TypeInfo;
///
/// let ty = TypeInfo::map(TypeInfo::str(), TypeInfo::list(TypeInfo::optional(TypeInfo::int())));
/// assert_eq!(ty.to_string(), "Dict[str, List[Optional[int]]]");
///
/// let u = TypeInfo::union([TypeInfo::int(), TypeInfo::str(), TypeInfo::null()]);
/// assert_eq!(u.to_string(), "Optional[Union[int, str]]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeInfo {
    /// Accepts any primitive data unchanged.
    Any,
    Scalar(ScalarKind),
    Sequence(SequenceInfo),
    Tuple(TupleInfo),
    Set(SetInfo),
    Map(MapInfo),
    Optional(OptionalInfo),
    Union(UnionInfo),
    Enum(Arc<EnumInfo>),
    Record(Arc<RecordInfo>),
    Object(Arc<ObjectInfo>),
}

// Helper macro that implements type-safe accessor methods like `as_record`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ty) => {
        /// Convert [`TypeInfo`] to specific descriptor information.
        pub fn $name(&self) -> Result<&$info, DescriptorKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(DescriptorKindError {
                    expected: DescriptorKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_sequence: Sequence => SequenceInfo);
    impl_cast_method!(as_tuple: Tuple => TupleInfo);
    impl_cast_method!(as_set: Set => SetInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_union: Union => UnionInfo);
    impl_cast_method!(as_enum: Enum => Arc<EnumInfo>);
    impl_cast_method!(as_record: Record => Arc<RecordInfo>);
    impl_cast_method!(as_object: Object => Arc<ObjectInfo>);

    /// `None`, the type of `null`.
    #[inline]
    pub const fn null() -> Self {
        Self::Scalar(ScalarKind::Null)
    }

    #[inline]
    pub const fn bool() -> Self {
        Self::Scalar(ScalarKind::Bool)
    }

    #[inline]
    pub const fn int() -> Self {
        Self::Scalar(ScalarKind::Int)
    }

    #[inline]
    pub const fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    #[inline]
    pub const fn str() -> Self {
        Self::Scalar(ScalarKind::Str)
    }

    /// `List[item]`.
    #[inline]
    pub fn list(item: TypeInfo) -> Self {
        Self::Sequence(SequenceInfo::new(item))
    }

    /// `Tuple[items..]`.
    #[inline]
    pub fn tuple(items: impl IntoIterator<Item = TypeInfo>) -> Self {
        Self::Tuple(TupleInfo::new(items))
    }

    /// `Set[item]`.
    #[inline]
    pub fn set(item: TypeInfo) -> Self {
        Self::Set(SetInfo::new(item))
    }

    /// `Dict[key, value]`.
    #[inline]
    pub fn map(key: TypeInfo, value: TypeInfo) -> Self {
        Self::Map(MapInfo::new(key, value))
    }

    /// `Optional[inner]`, normalized like [`TypeInfo::union`].
    #[inline]
    pub fn optional(inner: TypeInfo) -> Self {
        super::union_info::normalize([inner, Self::null()])
    }

    /// The normalized union of `members`.
    ///
    /// Nested unions and optionals are flattened, duplicates dropped (the
    /// first occurrence keeps its place), a single member stands for itself,
    /// and a null member turns the result into an `Optional`.
    ///
    /// # Panics
    ///
    /// Panics if `members` is empty.
    #[inline]
    pub fn union(members: impl IntoIterator<Item = TypeInfo>) -> Self {
        super::union_info::normalize(members)
    }

    /// Returns the [`DescriptorKind`] for this `TypeInfo`.
    pub const fn kind(&self) -> DescriptorKind {
        match self {
            Self::Any => DescriptorKind::Any,
            Self::Scalar(_) => DescriptorKind::Scalar,
            Self::Sequence(_) => DescriptorKind::Sequence,
            Self::Tuple(_) => DescriptorKind::Tuple,
            Self::Set(_) => DescriptorKind::Set,
            Self::Map(_) => DescriptorKind::Map,
            Self::Optional(_) => DescriptorKind::Optional,
            Self::Union(_) => DescriptorKind::Union,
            Self::Enum(_) => DescriptorKind::Enum,
            Self::Record(_) => DescriptorKind::Record,
            Self::Object(_) => DescriptorKind::Object,
        }
    }

    /// The named type behind an enum, record or object descriptor.
    pub fn named_type(&self) -> Option<&Type> {
        match self {
            Self::Enum(info) => Some(info.ty()),
            Self::Record(info) => Some(info.ty()),
            Self::Object(info) => Some(info.ty()),
            _ => None,
        }
    }

    /// Returns `true` for `Scalar(_)` descriptors.
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

impl From<ScalarKind> for TypeInfo {
    #[inline]
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl From<&Arc<RecordInfo>> for TypeInfo {
    #[inline]
    fn from(info: &Arc<RecordInfo>) -> Self {
        Self::Record(info.clone())
    }
}

impl From<&Arc<EnumInfo>> for TypeInfo {
    #[inline]
    fn from(info: &Arc<EnumInfo>) -> Self {
        Self::Enum(info.clone())
    }
}

impl From<&Arc<ObjectInfo>> for TypeInfo {
    #[inline]
    fn from(info: &Arc<ObjectInfo>) -> Self {
        Self::Object(info.clone())
    }
}

impl From<RecordInfo> for TypeInfo {
    #[inline]
    fn from(info: RecordInfo) -> Self {
        Self::Record(Arc::new(info))
    }
}

impl From<EnumInfo> for TypeInfo {
    #[inline]
    fn from(info: EnumInfo) -> Self {
        Self::Enum(Arc::new(info))
    }
}

impl From<ObjectInfo> for TypeInfo {
    #[inline]
    fn from(info: ObjectInfo) -> Self {
        Self::Object(Arc::new(info))
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeInfo]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        fmt::Display::fmt(item, f)?;
    }
    Ok(())
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Sequence(info) => write!(f, "List[{}]", info.item()),
            Self::Tuple(info) => {
                f.write_str("Tuple[")?;
                write_list(f, info.items())?;
                f.write_str("]")
            }
            Self::Set(info) => write!(f, "Set[{}]", info.item()),
            Self::Map(info) => write!(f, "Dict[{}, {}]", info.key(), info.value()),
            Self::Optional(info) => write!(f, "Optional[{}]", info.inner()),
            Self::Union(info) => {
                f.write_str("Union[")?;
                write_list(f, info.members())?;
                f.write_str("]")
            }
            Self::Enum(info) => f.write_str(info.ty().path()),
            Self::Record(info) => f.write_str(info.ty().path()),
            Self::Object(info) => f.write_str(info.ty().path()),
        }
    }
}
