use alloc::sync::Arc;
use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::ObjectInfo;

type Payload = dyn Any + Send + Sync;

fn eq_erased<T: PartialEq + 'static>(a: &Payload, b: &Payload) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn debug_erased<T: fmt::Debug + 'static>(value: &Payload, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => fmt::Debug::fmt(value, f),
        None => f.write_str(".."),
    }
}

/// A value of an opaque type: its descriptor plus a shared payload.
///
/// Only hooks know how to marshal and unmarshal objects. The payload is any
/// `Send + Sync` Rust value, recovered with [`downcast_ref`](Self::downcast_ref).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fm_marshal::info::ObjectInfo;
/// use fm_marshal::ops::ObjectValue;
///
/// #[derive(Debug, PartialEq)]
/// struct Stamp(i64);
///
/// let info = Arc::new(ObjectInfo::new("time::Stamp"));
/// let a = ObjectValue::new(&info, Stamp(5));
///
/// assert_eq!(a.downcast_ref::<Stamp>(), Some(&Stamp(5)));
/// assert_eq!(a, ObjectValue::new(&info, Stamp(5)));
/// assert_ne!(a, ObjectValue::new(&info, Stamp(6)));
/// ```
#[derive(Clone)]
pub struct ObjectValue {
    info: Arc<ObjectInfo>,
    payload: Arc<Payload>,
    eq: fn(&Payload, &Payload) -> bool,
    debug: fn(&Payload, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl ObjectValue {
    /// Wraps `payload` as a value of `info`.
    pub fn new<T>(info: &Arc<ObjectInfo>, payload: T) -> Self
    where
        T: Any + Send + Sync + PartialEq + fmt::Debug,
    {
        Self {
            info: info.clone(),
            payload: Arc::new(payload),
            eq: eq_erased::<T>,
            debug: debug_erased::<T>,
        }
    }

    #[inline]
    pub fn info(&self) -> &Arc<ObjectInfo> {
        &self.info
    }

    /// Returns the payload if it is a `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        self.info == other.info
            && (Arc::ptr_eq(&self.payload, &other.payload) || (self.eq)(&*self.payload, &*other.payload))
    }
}

impl Eq for ObjectValue {}

impl Hash for ObjectValue {
    // Payloads are not hashable; objects of one type share a bucket.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.info.ty().hash(state);
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.info.ty().name())?;
        (self.debug)(&*self.payload, f)?;
        f.write_str(")")
    }
}
