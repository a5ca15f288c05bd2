use crate::info::Type;

/// Descriptor of an opaque, class-shaped type.
///
/// The engine has no built-in converter for objects: values of such types
/// only travel through marshal and unmarshal hooks (timestamps, addresses
/// and similar).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectInfo {
    ty: Type,
}

impl ObjectInfo {
    #[inline]
    pub fn new(ty: impl Into<Type>) -> Self {
        Self { ty: ty.into() }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }
}
