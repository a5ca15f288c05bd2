// -----------------------------------------------------------------------------
// Modules

mod driver;
mod union_resolver;

mod enum_unmarshaller;
mod list_unmarshaller;
mod map_key;
mod map_unmarshaller;
mod record_unmarshaller;
mod scalar_unmarshaller;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use driver::resolve_unmarshal;
