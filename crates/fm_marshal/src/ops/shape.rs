use alloc::vec::Vec;
use core::fmt;

use crate::info::{ScalarKind, Type, TypeInfo};

/// The runtime classification of a [`Value`](crate::ops::Value).
///
/// Marshal dispatch and marshal hooks are keyed by shape. Named shapes carry
/// their [`Type`], so a hook registered for a base type is found from a
/// subtype's shape by walking [`Type::ancestors`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    Set,
    Map,
    Enum(Type),
    Record(Type),
    Object(Type),
}

impl Shape {
    /// Returns the named type for enum, record and object shapes.
    #[inline]
    pub fn named_type(&self) -> Option<&Type> {
        match self {
            Self::Enum(ty) | Self::Record(ty) | Self::Object(ty) => Some(ty),
            _ => None,
        }
    }

    /// Returns `true` for null, bool, int, float and str.
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool | Self::Int | Self::Float | Self::Str
        )
    }

    /// The value shapes described by `ty`.
    ///
    /// Unions and optionals expand to every member's shape. Containers map
    /// to their container shape regardless of item types. `Any` has no shape.
    pub fn of_type(ty: &TypeInfo) -> Vec<Shape> {
        let mut shapes = Vec::new();
        collect(ty, &mut shapes);
        shapes
    }
}

fn collect(ty: &TypeInfo, out: &mut Vec<Shape>) {
    let shape = match ty {
        TypeInfo::Any => return,
        TypeInfo::Scalar(kind) => match kind {
            ScalarKind::Null => Shape::Null,
            ScalarKind::Bool => Shape::Bool,
            ScalarKind::Int => Shape::Int,
            ScalarKind::Float => Shape::Float,
            ScalarKind::Str => Shape::Str,
        },
        TypeInfo::Sequence(_) => Shape::List,
        TypeInfo::Tuple(_) => Shape::Tuple,
        TypeInfo::Set(_) => Shape::Set,
        TypeInfo::Map(_) => Shape::Map,
        TypeInfo::Optional(info) => {
            collect(info.inner(), out);
            Shape::Null
        }
        TypeInfo::Union(info) => {
            for member in info.members() {
                collect(member, out);
            }
            return;
        }
        TypeInfo::Enum(info) => Shape::Enum(info.ty().clone()),
        TypeInfo::Record(info) => Shape::Record(info.ty().clone()),
        TypeInfo::Object(info) => Shape::Object(info.ty().clone()),
    };
    if !out.contains(&shape) {
        out.push(shape);
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.pad("None"),
            Self::Bool => f.pad("bool"),
            Self::Int => f.pad("int"),
            Self::Float => f.pad("float"),
            Self::Str => f.pad("str"),
            Self::List => f.pad("list"),
            Self::Tuple => f.pad("tuple"),
            Self::Set => f.pad("set"),
            Self::Map => f.pad("dict"),
            Self::Enum(ty) | Self::Record(ty) | Self::Object(ty) => f.pad(ty.path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Shape;
    use crate::info::{ObjectInfo, TypeInfo};

    #[test]
    fn shapes_of_union() {
        let stamp = TypeInfo::from(ObjectInfo::new("time::Stamp"));
        let ty = TypeInfo::optional(TypeInfo::union([
            TypeInfo::int(),
            TypeInfo::list(TypeInfo::str()),
            stamp.clone(),
        ]));
        assert_eq!(Shape::of_type(&ty), [
            Shape::Int,
            Shape::List,
            Shape::Object(stamp.named_type().unwrap().clone()),
            Shape::Null,
        ]);
        assert!(Shape::of_type(&TypeInfo::Any).is_empty());
    }
}
