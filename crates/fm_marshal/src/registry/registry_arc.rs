use alloc::sync::Arc;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::Registry;

/// A shared, lock-guarded [`Registry`].
///
/// Conversions take the read lock; hook registration takes the write lock,
/// which waits for in-flight conversions and clears the caches before any
/// new conversion starts. A poisoned lock is recovered, not propagated.
///
/// # Examples
///
/// ```
/// use fm_marshal::info::TypeInfo;
/// use fm_marshal::ops::Value;
/// use fm_marshal::registry::RegistryArc;
/// use serde_json::json;
///
/// let shared = RegistryArc::default();
/// let worker = {
///     let shared = shared.clone();
///     std::thread::spawn(move || shared.read().marshal(&Value::from("hi")).unwrap())
/// };
/// assert_eq!(worker.join().unwrap(), json!("hi"));
///
/// shared.write().add_marshal_hook(&TypeInfo::str(), |_: &Value| Ok(json!("hooked")));
/// assert_eq!(shared.read().marshal(&Value::from("hi")).unwrap(), json!("hooked"));
/// ```
#[derive(Clone, Default)]
pub struct RegistryArc {
    /// The wrapped [`Registry`].
    pub internal: Arc<RwLock<Registry>>,
}

impl RegistryArc {
    /// Wraps an existing registry.
    #[inline]
    pub fn new(registry: Registry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`Registry`].
    pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`Registry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for RegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.read();
        let (marshal_hooks, unmarshal_hooks) = registry.hook_len();
        f.debug_struct("RegistryArc")
            .field("marshal_hooks", &marshal_hooks)
            .field("unmarshal_hooks", &unmarshal_hooks)
            .finish()
    }
}
