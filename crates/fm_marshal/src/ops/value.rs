use alloc::string::String;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use crate::info::{ScalarValue, canonical_bits};
use crate::ops::{EnumValue, MapValue, ObjectValue, RecordValue, SetValue, Shape};

// -----------------------------------------------------------------------------
// Value

/// A typed, in-memory value: the input of marshalling and the output of
/// unmarshalling.
///
/// `Value` is `Eq` and `Hash` so it can be a set item or a map key. Floats
/// compare by canonical bit pattern. Sets and maps compare independently of
/// order. Booleans, integers and floats never compare equal to each other.
///
/// # Examples
///
/// ```
/// use fm_marshal::ops::{Shape, Value};
///
/// let v = Value::list([Value::from(1), Value::from("a"), Value::Null]);
/// assert_eq!(v.shape(), Shape::List);
/// assert_eq!(v.as_list().map(<[Value]>::len), Some(3));
///
/// assert_ne!(Value::from(1), Value::from(true));
/// assert_eq!(Value::from(Some(2)), Value::Int(2));
/// assert_eq!(Value::from(None::<i64>), Value::Null);
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(SetValue),
    Map(MapValue),
    Enum(EnumValue),
    Record(RecordValue),
    Object(ObjectValue),
}

impl Value {
    /// Builds a [`Value::List`].
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Builds a [`Value::Tuple`].
    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    /// Builds a [`Value::Set`]; duplicates collapse.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Builds a [`Value::Map`] in the given entry order.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Map(entries.into_iter().collect())
    }

    /// Returns the runtime shape used for marshal dispatch.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Null => Shape::Null,
            Self::Bool(_) => Shape::Bool,
            Self::Int(_) => Shape::Int,
            Self::Float(_) => Shape::Float,
            Self::Str(_) => Shape::Str,
            Self::List(_) => Shape::List,
            Self::Tuple(_) => Shape::Tuple,
            Self::Set(_) => Shape::Set,
            Self::Map(_) => Shape::Map,
            Self::Enum(v) => Shape::Enum(v.info().ty().clone()),
            Self::Record(v) => Shape::Record(v.info().ty().clone()),
            Self::Object(v) => Shape::Object(v.info().ty().clone()),
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the items of a list or a tuple.
    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) | Self::Tuple(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_set(&self) -> Option<&SetValue> {
        match self {
            Self::Set(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Float(v) => canonical_bits(*v).hash(state),
            Self::Str(v) => v.hash(state),
            Self::List(v) | Self::Tuple(v) => v.hash(state),
            Self::Set(v) => v.hash(state),
            Self::Map(v) => v.hash(state),
            Self::Enum(v) => v.hash(state),
            Self::Record(v) => v.hash(state),
            Self::Object(v) => v.hash(state),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($from:ty => $variant:ident),* $(,)?) => {$(
        impl From<$from> for Value {
            #[inline]
            fn from(value: $from) -> Self {
                Self::$variant(value.into())
            }
        }
    )*};
}

impl_from! {
    bool => Bool,
    i64 => Int,
    i32 => Int,
    u32 => Int,
    f64 => Float,
    f32 => Float,
    String => Str,
    &str => Str,
    Vec<Value> => List,
    SetValue => Set,
    MapValue => Map,
    EnumValue => Enum,
    RecordValue => Record,
    ObjectValue => Object,
}

impl From<ScalarValue> for Value {
    fn from(value: ScalarValue) -> Self {
        match value {
            ScalarValue::Bool(v) => Self::Bool(v),
            ScalarValue::Int(v) => Self::Int(v),
            ScalarValue::Float(v) => Self::Float(v),
            ScalarValue::Str(v) => Self::Str(String::from(&*v)),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
