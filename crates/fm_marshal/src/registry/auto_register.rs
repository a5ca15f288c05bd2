use crate::registry::Registry;

/// A named bundle of hooks that installs itself into registries.
///
/// Submit plugins with [`submit_hook_plugin!`](crate::submit_hook_plugin);
/// [`Registry::auto_register`] installs every submitted plugin once.
#[derive(Debug, Clone, Copy)]
pub struct HookPlugin {
    name: &'static str,
    install: fn(&mut Registry),
}

impl HookPlugin {
    /// Creates a plugin. `name` must be unique per plugin.
    #[inline]
    pub const fn new(name: &'static str, install: fn(&mut Registry)) -> Self {
        Self { name, install }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the installer on `registry`.
    #[inline]
    pub fn install(&self, registry: &mut Registry) {
        (self.install)(registry);
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(HookPlugin);

/// Submits a [`HookPlugin`] for [`Registry::auto_register`].
///
/// Expands to nothing without the `auto_register` feature.
///
/// # Examples
///
/// ```
/// use fm_marshal::info::{ObjectInfo, TypeInfo};
/// use fm_marshal::ops::Value;
/// use fm_marshal::registry::Registry;
/// use serde_json::json;
///
/// fn install(registry: &mut Registry) {
///     let ty = TypeInfo::from(ObjectInfo::new("net::Ipv4"));
///     registry.add_marshal_hook(&ty, |_: &Value| Ok(json!("0.0.0.0")));
/// }
///
/// fm_marshal::submit_hook_plugin!("net::ipv4", install);
///
/// fn main() {
///     let mut registry = Registry::new();
///     assert!(registry.auto_register());
///     assert_eq!(registry.hook_len(), (1, 0));
/// }
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! submit_hook_plugin {
    ($name:expr, $install:path) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::HookPlugin::new($name, $install)
        }
    };
}

/// Submits a [`HookPlugin`] for [`Registry::auto_register`].
///
/// Expands to nothing without the `auto_register` feature.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! submit_hook_plugin {
    ($name:expr, $install:path) => {};
}

impl Registry {
    /// Installs every plugin submitted with
    /// [`submit_hook_plugin!`](crate::submit_hook_plugin) that this registry
    /// has not installed yet.
    ///
    /// Returns `true` if automatic registration is available, `false` when
    /// the `auto_register` feature is disabled (then this does nothing).
    /// Repeated calls are cheap and never install a plugin twice.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            for plugin in inventory::iter::<HookPlugin> {
                if self.mark_plugin_installed(plugin.name()) {
                    log::debug!("installing hook plugin `{}`", plugin.name());
                    plugin.install(self);
                }
            }
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }
}
