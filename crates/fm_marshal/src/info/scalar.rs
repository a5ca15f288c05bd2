use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::{Primitive, PrimitiveShape};

// -----------------------------------------------------------------------------
// ScalarKind

/// The scalar leaves of the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
}

impl ScalarKind {
    /// The name used when rendering descriptors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "None",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
        }
    }

    /// Returns `true` if primitive data of `shape` can become this scalar.
    ///
    /// Exact matches are accepted, and integers are widened to floats.
    /// Booleans and integers stay distinct.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_marshal::PrimitiveShape;
    /// use fm_marshal::info::ScalarKind;
    ///
    /// assert!(ScalarKind::Float.accepts(PrimitiveShape::Int));
    /// assert!(!ScalarKind::Int.accepts(PrimitiveShape::Float));
    /// assert!(!ScalarKind::Int.accepts(PrimitiveShape::Bool));
    /// ```
    pub const fn accepts(self, shape: PrimitiveShape) -> bool {
        matches!(
            (self, shape),
            (Self::Null, PrimitiveShape::Null)
                | (Self::Bool, PrimitiveShape::Bool)
                | (Self::Int, PrimitiveShape::Int)
                | (Self::Float, PrimitiveShape::Int | PrimitiveShape::Float)
                | (Self::Str, PrimitiveShape::Str)
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// -----------------------------------------------------------------------------
// ScalarValue

/// A non-null scalar, the value behind an enum member.
///
/// Floats compare and hash by their canonical bit pattern, so `ScalarValue`
/// is `Eq` and `Hash`.
#[derive(Debug, Clone)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
}

/// Bit pattern used for float equality and hashing: `-0.0` folds into `0.0`
/// and every NaN into one NaN.
#[inline]
pub(crate) fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

impl ScalarValue {
    /// The kind of this scalar.
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Int(_) => ScalarKind::Int,
            Self::Float(_) => ScalarKind::Float,
            Self::Str(_) => ScalarKind::Str,
        }
    }

    /// Returns the integer, if this is one.
    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Converts into primitive data; `None` for non-finite floats.
    pub fn to_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Bool(v) => Some(Primitive::Bool(*v)),
            Self::Int(v) => Some(Primitive::from(*v)),
            Self::Float(v) => serde_json::Number::from_f64(*v).map(Primitive::Number),
            Self::Str(v) => Some(Primitive::String(String::from(&**v))),
        }
    }

    /// Reads primitive data as a scalar of `kind`, widening integers for
    /// float kinds. `None` if the data does not fit.
    pub(crate) fn from_primitive(kind: ScalarKind, data: &Primitive) -> Option<Self> {
        match (kind, data) {
            (ScalarKind::Bool, Primitive::Bool(v)) => Some(Self::Bool(*v)),
            (ScalarKind::Int, Primitive::Number(n)) if !n.is_f64() => n.as_i64().map(Self::Int),
            (ScalarKind::Float, Primitive::Number(n)) => n.as_f64().map(Self::Float),
            (ScalarKind::Str, Primitive::String(s)) => Some(Self::Str(Arc::from(s.as_str()))),
            _ => None,
        }
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ScalarValue {}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Bool(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Float(v) => canonical_bits(*v).hash(state),
            Self::Str(v) => v.hash(state),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Debug::fmt(v, f),
            Self::Str(v) => fmt::Debug::fmt(v, f),
        }
    }
}

impl From<bool> for ScalarValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ScalarValue {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ScalarValue {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ScalarValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ScalarValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<String> for ScalarValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(Arc::from(value))
    }
}
