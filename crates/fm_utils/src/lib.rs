//! Small shared utilities for the `fieldmarshal` crates.
//!
//! At the moment this is only [`hash`]: hash containers with a fixed,
//! reproducible hash state.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(test)]
extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod hash;
