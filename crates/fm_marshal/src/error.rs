use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

use crate::Primitive;
use crate::info::TypeInfo;
use crate::ops::Shape;

// -----------------------------------------------------------------------------
// MarshalError

/// An error produced while converting a value into primitive data.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// No hook and no built-in converter handles values of this shape.
    #[error("cannot marshal a value of shape `{shape}`: no hook or built-in converter")]
    Unsupported { shape: Shape },
    /// A map key marshalled to something JSON cannot use as an object key.
    #[error("cannot marshal dict key of shape `{shape}`: it marshals to `{key}`")]
    InvalidKey { shape: Shape, key: Primitive },
    /// JSON has no representation for NaN and infinities.
    #[error("cannot marshal non-finite float `{0}`")]
    NonFiniteFloat(f64),
    /// The primitive tree could not be written as JSON text.
    #[error("cannot encode JSON text: {0}")]
    Json(#[from] serde_json::Error),
    /// Raised by hooks.
    #[error("{0}")]
    Custom(String),
}

impl MarshalError {
    /// Creates a [`MarshalError::Custom`] from any displayable message.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_marshal::MarshalError;
    ///
    /// let err = MarshalError::custom(format_args!("bad timestamp {}", 42));
    /// assert_eq!(err.to_string(), "bad timestamp 42");
    /// ```
    pub fn custom(message: impl Display) -> Self {
        Self::Custom(message.to_string())
    }
}

// -----------------------------------------------------------------------------
// UnmarshalError

/// An error produced while building a value from primitive data.
#[derive(Debug, Error)]
pub enum UnmarshalError {
    /// The data's shape is not compatible with the target descriptor.
    #[error("cannot unmarshal to `{target}`: {data}")]
    Mismatch { target: TypeInfo, data: Primitive },
    /// A required record field is absent from the input mapping.
    #[error("missing key: {name} (unmarshalling `{target}`)")]
    MissingKey { name: String, target: TypeInfo },
    /// A fixed-arity tuple received the wrong number of elements.
    #[error("wrong number of elements for `{target}`: expected {expected}, got {actual}")]
    WrongLength {
        target: TypeInfo,
        expected: usize,
        actual: usize,
    },
    /// Automatic union resolution refused to pick a member.
    #[error(
        "cannot unmarshal to `{target}`: {data}; {reason}. \
         Register an unmarshal hook for the union to resolve it"
    )]
    AmbiguousUnion {
        target: TypeInfo,
        data: Primitive,
        reason: String,
    },
    /// A JSON object key could not be decoded as the map's key type.
    #[error("error converting dict key {key:?} to `{target}`: expected {expected}")]
    InvalidKey {
        target: TypeInfo,
        key: String,
        expected: &'static str,
    },
    /// The data is a valid scalar but no enum member (or flag combination) has it.
    #[error("`{target}` has no member with value {value}")]
    NoSuchMember { target: TypeInfo, value: Primitive },
    /// An integer does not fit into `i64`.
    #[error("integer {data} is out of range for `{target}`")]
    IntegerOverflow { target: TypeInfo, data: Primitive },
    /// A field excluded from unmarshalling has no default to fall back on.
    #[error("field `{name}` of `{target}` is omitted but has no default")]
    MissingDefault { name: String, target: TypeInfo },
    /// The input text is not valid JSON.
    #[error("cannot decode JSON text: {0}")]
    Json(#[from] serde_json::Error),
    /// Raised by hooks.
    #[error("{0}")]
    Custom(String),
}

impl UnmarshalError {
    /// Creates an [`UnmarshalError::Custom`] from any displayable message.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_marshal::UnmarshalError;
    ///
    /// let err = UnmarshalError::custom("unknown address family");
    /// assert_eq!(err.to_string(), "unknown address family");
    /// ```
    pub fn custom(message: impl Display) -> Self {
        Self::Custom(message.to_string())
    }

    #[inline]
    pub(crate) fn mismatch(target: &TypeInfo, data: &Primitive) -> Self {
        Self::Mismatch {
            target: target.clone(),
            data: data.clone(),
        }
    }
}
