use fm_utils::hash::HashSet;

use crate::PrimitiveShape;
use crate::info::TypeInfo;
use crate::ops::Shape;
use crate::registry::dispatch::DispatchCache;
use crate::registry::hook_table::HookTable;
use crate::registry::{MarshalHook, MarshalImpl, UnmarshalHook, UnmarshalImpl};
use crate::serde::{resolve_marshal, resolve_unmarshal};

// -----------------------------------------------------------------------------
// Registry

/// Hook tables plus memoized dispatch: the entry point of every conversion.
///
/// Conversions take `&self` and may run from many threads at once; the
/// dispatch caches sit behind their own locks. Registering a hook takes
/// `&mut self` and clears both caches, so no conversion ever observes a
/// resolution computed under an older hook set.
///
/// For a registry shared and mutated across threads, see
/// [`RegistryArc`](crate::registry::RegistryArc).
///
/// # Examples
///
/// ```
/// use fm_marshal::info::TypeInfo;
/// use fm_marshal::ops::Value;
/// use fm_marshal::registry::Registry;
/// use serde_json::json;
///
/// let mut registry = Registry::new();
/// registry.add_unmarshal_hook(&TypeInfo::int(), |data: &serde_json::Value| {
///     Ok(Value::Int(data.as_i64().unwrap_or_default() * 10))
/// });
///
/// let v = registry.unmarshal(&json!([1, 2]), &TypeInfo::list(TypeInfo::int())).unwrap();
/// assert_eq!(v, Value::list([Value::Int(10), Value::Int(20)]));
/// ```
pub struct Registry {
    marshal_hooks: HookTable<Shape, MarshalHook>,
    unmarshal_hooks: HookTable<TypeInfo, UnmarshalHook>,
    installed_plugins: HashSet<&'static str>,
    cache: DispatchCache,
}

impl Default for Registry {
    /// See [`Registry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry without hooks.
    ///
    /// Plugins submitted with [`submit_hook_plugin!`](crate::submit_hook_plugin)
    /// are not installed; call [`auto_register`](Self::auto_register) for that.
    pub fn new() -> Self {
        Self {
            marshal_hooks: HookTable::new(),
            unmarshal_hooks: HookTable::new(),
            installed_plugins: HashSet::default(),
            cache: DispatchCache::default(),
        }
    }

    /// Registers a marshal hook for the values described by `ty`.
    ///
    /// Hooks are keyed by value shape: a union or optional registers the hook
    /// for each member, and a container descriptor registers it for every
    /// container of that kind regardless of item type. A hook for a named
    /// type also serves its subtypes.
    ///
    /// # Panics
    ///
    /// Panics if `ty` is `Any`, which describes no shape.
    pub fn add_marshal_hook(&mut self, ty: &TypeInfo, hook: impl Into<MarshalHook>) {
        let shapes = Shape::of_type(ty);
        if shapes.is_empty() {
            panic!("cannot register a marshal hook for `{ty}`: it describes no value shape");
        }
        let hook = hook.into();
        for shape in shapes {
            let replaced = match shape.named_type() {
                Some(named) => self.marshal_hooks.insert_named(named.clone(), hook.clone()),
                None => self.marshal_hooks.insert_exact(shape.clone(), hook.clone()),
            };
            if replaced.is_some() {
                log::warn!("replaced the marshal hook for `{shape}`");
            } else {
                log::debug!("registered marshal hook for `{shape}`");
            }
        }
        self.invalidate();
    }

    /// Registers an unmarshal hook for the target `ty`.
    ///
    /// The hook serves exactly `ty`; for a named type it also serves every
    /// subtype without a closer hook. Unions are matched regardless of member
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if `ty` is `Any`, which always passes data through unchanged.
    pub fn add_unmarshal_hook(&mut self, ty: &TypeInfo, hook: impl Into<UnmarshalHook>) {
        if let TypeInfo::Any = ty {
            panic!("cannot register an unmarshal hook for `Any`");
        }
        let hook = hook.into();
        let replaced = match ty.named_type() {
            Some(named) => self.unmarshal_hooks.insert_named(named.clone(), hook),
            None => self.unmarshal_hooks.insert_exact(ty.clone(), hook),
        };
        if replaced.is_some() {
            log::warn!("replaced the unmarshal hook for `{ty}`");
        } else {
            log::debug!("registered unmarshal hook for `{ty}`");
        }
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.cache.clear_mut();
        log::debug!("dispatch caches cleared after hook registration");
    }

    /// Drops every memoized resolution.
    ///
    /// Never needed for correctness; hook registration already does this.
    pub fn clear_cache(&self) {
        self.cache.clear();
        log::debug!("dispatch caches cleared");
    }

    /// Number of memoized `(marshal, unmarshal)` resolutions.
    pub fn cache_len(&self) -> (usize, usize) {
        self.cache.len()
    }

    /// Number of registered `(marshal, unmarshal)` hook entries.
    pub fn hook_len(&self) -> (usize, usize) {
        (self.marshal_hooks.len(), self.unmarshal_hooks.len())
    }

    /// Resolves the converter for values of `shape`, without caching.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_marshal::ops::Shape;
    /// use fm_marshal::registry::{MarshalImpl, Registry};
    ///
    /// let registry = Registry::new();
    /// assert!(matches!(registry.lookup_marshal_impl(&Shape::Int), MarshalImpl::Identity));
    /// assert!(matches!(registry.lookup_marshal_impl(&Shape::Set), MarshalImpl::Set));
    /// ```
    #[inline]
    pub fn lookup_marshal_impl(&self, shape: &Shape) -> MarshalImpl {
        resolve_marshal(self, shape)
    }

    /// Resolves the converter for data of `shape` into `target`, without caching.
    #[inline]
    pub fn lookup_unmarshal_impl(&self, shape: PrimitiveShape, target: &TypeInfo) -> UnmarshalImpl {
        resolve_unmarshal(self, shape, target)
    }

    /// Cached form of [`lookup_marshal_impl`](Self::lookup_marshal_impl).
    pub(crate) fn marshal_impl(&self, shape: &Shape) -> MarshalImpl {
        self.cache.marshal(shape, || resolve_marshal(self, shape))
    }

    /// Cached form of [`lookup_unmarshal_impl`](Self::lookup_unmarshal_impl).
    pub(crate) fn unmarshal_impl(&self, shape: PrimitiveShape, target: &TypeInfo) -> UnmarshalImpl {
        self.cache
            .unmarshal(shape, target, || resolve_unmarshal(self, shape, target))
    }

    /// The hook for `shape`: exact for structural shapes, nearest ancestor
    /// for named ones.
    pub(crate) fn marshal_hook(&self, shape: &Shape) -> Option<&MarshalHook> {
        match shape.named_type() {
            Some(ty) => self.marshal_hooks.nearest(ty).map(|(_, hook)| hook),
            None => self.marshal_hooks.exact(shape),
        }
    }

    /// The hook for `target`: exact for structural descriptors, nearest
    /// ancestor for named ones.
    pub(crate) fn unmarshal_hook(&self, target: &TypeInfo) -> Option<&UnmarshalHook> {
        match target.named_type() {
            Some(ty) => self.unmarshal_hooks.nearest(ty).map(|(_, hook)| hook),
            None => self.unmarshal_hooks.exact(target),
        }
    }

    /// Records `name` as installed; `false` if it already was.
    pub(crate) fn mark_plugin_installed(&mut self, name: &'static str) -> bool {
        self.installed_plugins.insert(name)
    }
}
