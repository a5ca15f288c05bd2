#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use fm_marshal as marshal;
pub use fm_utils as utils;

pub use fm_marshal::info::{FieldInfo, TypeInfo, field};
pub use fm_marshal::ops::Value;
pub use fm_marshal::registry::{MarshalHook, Registry, RegistryArc, UnmarshalHook};
pub use fm_marshal::{MarshalError, Primitive, UnmarshalError, submit_hook_plugin};
