//! The marshal and unmarshal engines.
//!
//! Both are methods of [`Registry`](crate::registry::Registry):
//!
//! - [`marshal`](crate::registry::Registry::marshal) /
//!   [`marshal_json`](crate::registry::Registry::marshal_json): value to
//!   primitive tree (or JSON text).
//! - [`unmarshal`](crate::registry::Registry::unmarshal) /
//!   [`unmarshal_json`](crate::registry::Registry::unmarshal_json): primitive
//!   tree (or JSON text) plus target descriptor to value.
//!
//! Each call recurses through the registry, so hooks apply at every depth.

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use de::resolve_unmarshal;
pub(crate) use ser::resolve_marshal;
