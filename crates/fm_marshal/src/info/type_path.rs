use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// Type

/// The identity of a named type (record, enum or opaque object).
///
/// A `Type` is a path such as `"hcloud::Server"` plus an optional base type,
/// which gives named types single inheritance: hooks registered for a base
/// also serve its subtypes.
///
/// Equality and hashing only look at the path. Cloning is cheap.
///
/// # Examples
///
/// ```
/// use fm_marshal::info::Type;
///
/// let base = Type::new("app::Foo");
/// let sub = Type::with_base("app::FooSubclass", &base);
///
/// assert_eq!(sub.name(), "FooSubclass");
/// assert_eq!(sub.base(), Some(&base));
/// assert!(sub.is_subtype_of(&base));
/// assert!(!base.is_subtype_of(&sub));
/// ```
#[derive(Clone)]
pub struct Type {
    inner: Arc<TypeInner>,
}

struct TypeInner {
    path: Box<str>,
    base: Option<Type>,
}

impl Type {
    /// Creates a root type.
    pub fn new(path: &str) -> Self {
        Self {
            inner: Arc::new(TypeInner {
                path: Box::from(path),
                base: None,
            }),
        }
    }

    /// Creates a type deriving from `base`.
    pub fn with_base(path: &str, base: &Type) -> Self {
        Self {
            inner: Arc::new(TypeInner {
                path: Box::from(path),
                base: Some(base.clone()),
            }),
        }
    }

    /// Returns the full path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// Returns the last `::` segment of the path.
    pub fn name(&self) -> &str {
        let path = self.path();
        path.rsplit_once("::").map_or(path, |(_, name)| name)
    }

    /// Returns the direct base type, if any.
    #[inline]
    pub fn base(&self) -> Option<&Type> {
        self.inner.base.as_ref()
    }

    /// Iterates over the base chain, nearest first. `self` is not included.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: self.base() }
    }

    /// Returns `true` if `other` is `self` or one of its ancestors.
    pub fn is_subtype_of(&self, other: &Type) -> bool {
        self == other || self.ancestors().any(|ty| ty == other)
    }
}

impl From<&str> for Type {
    #[inline]
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<&Type> for Type {
    #[inline]
    fn from(ty: &Type) -> Self {
        ty.clone()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.path == other.inner.path
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.path.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Type").field(&self.path()).finish()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path())
    }
}

// -----------------------------------------------------------------------------
// Ancestors

/// Iterator returned by [`Type::ancestors`].
pub struct Ancestors<'a> {
    next: Option<&'a Type>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Type;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base();
        Some(current)
    }
}
