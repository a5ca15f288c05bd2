use core::hash::Hash;

use fm_utils::hash::HashMap;

use crate::info::Type;

/// Hooks keyed either structurally (`K`) or by named [`Type`].
///
/// Named entries are found for subtypes too: [`nearest`](Self::nearest)
/// walks the ancestor chain and returns the closest registered type.
pub(crate) struct HookTable<K, H> {
    exact: HashMap<K, H>,
    named: HashMap<Type, H>,
}

impl<K: Eq + Hash, H> HookTable<K, H> {
    pub fn new() -> Self {
        Self {
            exact: HashMap::default(),
            named: HashMap::default(),
        }
    }

    /// Returns the replaced hook, if any.
    #[inline]
    pub fn insert_exact(&mut self, key: K, hook: H) -> Option<H> {
        self.exact.insert(key, hook)
    }

    /// Returns the replaced hook, if any.
    #[inline]
    pub fn insert_named(&mut self, ty: Type, hook: H) -> Option<H> {
        self.named.insert(ty, hook)
    }

    #[inline]
    pub fn exact(&self, key: &K) -> Option<&H> {
        self.exact.get(key)
    }

    /// The hook of `ty` itself, or of its nearest ancestor.
    pub fn nearest<'a, 'b>(&'a self, ty: &'b Type) -> Option<(&'b Type, &'a H)> {
        if self.named.is_empty() {
            return None;
        }
        core::iter::once(ty)
            .chain(ty.ancestors())
            .find_map(|t| self.named.get(t).map(|h| (t, h)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exact.len() + self.named.len()
    }
}
