//! Items used by exported macros. Not public API.

#[cfg(feature = "auto_register")]
pub use inventory;
