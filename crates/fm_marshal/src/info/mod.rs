//! Type descriptors: immutable values describing the target of a conversion.
//!
//! ## Menu
//!
//! - [`Type`]: the identity of a named type, with an optional base type.
//! - [`ScalarKind`] / [`ScalarValue`]: the scalar leaves and enum member values.
//! - [`TypeInfo`]: the descriptor enum. Its payload is one of:
//!     - [`SequenceInfo`]: `List[T]`.
//!     - [`TupleInfo`]: `Tuple[A, B, ..]`, fixed arity.
//!     - [`SetInfo`]: `Set[T]`.
//!     - [`MapInfo`]: `Dict[K, V]`.
//!     - [`OptionalInfo`]: `Optional[T]`.
//!     - [`UnionInfo`]: `Union[A, B, ..]`, normalized by [`TypeInfo::union`].
//!     - [`EnumInfo`]: scalar-valued enums and flags.
//!     - [`RecordInfo`]: named, ordered [`FieldInfo`]s.
//!     - [`ObjectInfo`]: opaque types converted by hooks only.
//! - [`FieldOptions`] / [`field`]: per-field rename, omission and overrides.
//! - [`DescriptorKind`]: a fast discriminator for [`TypeInfo`].

// -----------------------------------------------------------------------------
// Modules

mod enum_info;
mod field_info;
mod list_info;
mod map_info;
mod object_info;
mod record_info;
mod scalar;
mod set_info;
mod tuple_info;
mod type_info;
mod type_path;
mod union_info;

// -----------------------------------------------------------------------------
// Exports

pub use enum_info::{EnumInfo, EnumMember};
pub use field_info::{FieldFlags, FieldInfo, FieldMarshalFn, FieldOptions, FieldUnmarshalFn, field};
pub use list_info::SequenceInfo;
pub use map_info::MapInfo;
pub use object_info::ObjectInfo;
pub use record_info::RecordInfo;
pub use scalar::{ScalarKind, ScalarValue};
pub use set_info::SetInfo;
pub use tuple_info::TupleInfo;
pub use type_info::{DescriptorKind, DescriptorKindError, TypeInfo};
pub use type_path::{Ancestors, Type};
pub use union_info::{OptionalInfo, UnionInfo};

pub(crate) use scalar::canonical_bits;
