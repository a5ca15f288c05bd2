//! Convert typed, in-memory values to a JSON-shaped primitive tree and back.
//!
//! The engine is driven by explicit [type descriptors](info::TypeInfo) instead
//! of compile-time reflection. A [`Registry`](registry::Registry) owns the hook
//! tables and dispatch caches, and decides for every value (or every piece of
//! primitive data) which converter handles it.
//!
//! ```
//! use std::sync::Arc;
//! use fm_marshal::info::{FieldInfo, RecordInfo, TypeInfo};
//! use fm_marshal::ops::{RecordValue, Value};
//! use fm_marshal::registry::Registry;
//! use serde_json::json;
//!
//! let point = Arc::new(RecordInfo::new("geo::Point", [
//!     FieldInfo::new("x", TypeInfo::int()),
//!     FieldInfo::new("y", TypeInfo::int()),
//! ]));
//!
//! let value = RecordValue::builder(&point)
//!     .with("x", 1)
//!     .with("y", 2)
//!     .build()
//!     .unwrap();
//!
//! let registry = Registry::new();
//! let data = registry.marshal(&Value::Record(value.clone())).unwrap();
//! assert_eq!(data, json!({ "x": 1, "y": 2 }));
//!
//! let back = registry.unmarshal(&data, &TypeInfo::from(&point)).unwrap();
//! assert_eq!(back, Value::Record(value));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(not(feature = "std"))]
compile_error!("`fm_marshal` needs the `std` feature for its locks and lazy statics");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod primitive;

pub mod info;
pub mod ops;
pub mod registry;
pub mod serde;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use error::{MarshalError, UnmarshalError};
pub use primitive::{Primitive, PrimitiveMap, PrimitiveShape, primitive_cmp};
pub use registry::{default_registry, marshal, marshal_json, unmarshal, unmarshal_json};
