//! In-memory values: what marshalling consumes and unmarshalling produces.
//!
//! ## Menu
//!
//! - [`Value`]: the dynamic value enum.
//! - [`Shape`]: the runtime classification of a value, the key of marshal dispatch.
//! - [`SetValue`]: a hash set of values.
//! - [`MapValue`]: an insertion-ordered map of values.
//! - [`RecordValue`] / [`RecordBuilder`]: a record and its builder.
//! - [`EnumValue`]: an enum member (or flag combination).
//! - [`ObjectValue`]: an opaque payload converted by hooks.

// -----------------------------------------------------------------------------
// Modules

mod enum_ops;
mod map_ops;
mod object_ops;
mod record_ops;
mod set_ops;
mod shape;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use enum_ops::EnumValue;
pub use map_ops::MapValue;
pub use object_ops::ObjectValue;
pub use record_ops::{ConstructError, RecordBuilder, RecordValue};
pub use set_ops::SetValue;
pub use shape::Shape;
pub use value::Value;
