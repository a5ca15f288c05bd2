// -----------------------------------------------------------------------------
// Modules

mod driver;

mod enum_marshaller;
mod list_marshaller;
mod map_marshaller;
mod record_marshaller;
mod set_marshaller;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use driver::resolve_marshal;
