//! Hook registration and converter dispatch.
//!
//! ## Menu
//!
//! - [`Registry`]: hook tables plus memoized dispatch; runs conversions.
//! - [`RegistryArc`]: a registry shared behind a read-write lock.
//! - [`MarshalHook`] / [`UnmarshalHook`]: user-supplied converters.
//! - [`MarshalImpl`] / [`UnmarshalImpl`]: the resolved converter for a
//!   shape (and target), as reported by the `lookup_*_impl` methods.
//! - [`default_registry`] and the free functions [`marshal`],
//!   [`marshal_json`], [`unmarshal`], [`unmarshal_json`].
//! - [`HookPlugin`] and [`submit_hook_plugin!`](crate::submit_hook_plugin):
//!   hooks installed by [`Registry::auto_register`].
//!
//! ## Dispatch order
//!
//! Marshalling a value of some shape:
//!
//! 1. a hook registered for exactly that shape;
//! 2. scalars pass through;
//! 3. for enums, records and objects, the hook of the nearest base type;
//! 4. the built-in container, enum or record converter;
//! 5. otherwise [`MarshalError::Unsupported`](crate::MarshalError::Unsupported).
//!
//! Unmarshalling data into a target:
//!
//! 1. `Any` keeps the data;
//! 2. a hook for the target, or for its nearest base type;
//! 3. the built-in converter for the target kind, unions included.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod default;
mod dispatch;
mod hook;
mod hook_table;
mod registry;
mod registry_arc;

// -----------------------------------------------------------------------------
// Exports

pub use auto_register::HookPlugin;
pub use default::{default_registry, marshal, marshal_json, unmarshal, unmarshal_json};
pub use dispatch::{MarshalImpl, Rejection, UnionResolution, UnmarshalImpl};
pub use hook::{MarshalHook, UnmarshalHook};
pub use registry::Registry;
pub use registry_arc::RegistryArc;
