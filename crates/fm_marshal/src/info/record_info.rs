use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use fm_utils::hash::HashMap;

use crate::info::{FieldInfo, Type};

/// Descriptor of a record: a named type with ordered, named fields.
///
/// Field order is declaration order, and is also the key order of the
/// marshalled mapping.
///
/// # Panics
///
/// Construction panics on two fields sharing a name, or two fields sharing
/// an external key.
///
/// # Examples
///
/// ```
/// use fm_marshal::info::{FieldInfo, RecordInfo, TypeInfo, field};
///
/// let info = RecordInfo::new("hcloud::ServerType", [
///     FieldInfo::new("id", TypeInfo::int()),
///     FieldInfo::new("num_cores", TypeInfo::int()).with_options(field().rename("cores")),
/// ]);
///
/// assert_eq!(info.len(), 2);
/// assert_eq!(info.index_of("num_cores"), Some(1));
/// assert_eq!(info.field_by_key("cores").map(|f| f.name()), Some("num_cores"));
/// ```
#[derive(Debug, Clone)]
pub struct RecordInfo {
    ty: Type,
    fields: Box<[FieldInfo]>,
    indices: HashMap<Arc<str>, usize>,
}

impl RecordInfo {
    /// Creates a record descriptor with no base.
    pub fn new(ty: impl Into<Type>, fields: impl IntoIterator<Item = FieldInfo>) -> Self {
        Self::build(ty.into(), fields.into_iter().collect())
    }

    /// Creates a record deriving from `base`.
    ///
    /// The base's fields come first, followed by `fields`. The new type's
    /// base is `base`'s type, so hooks registered for `base` apply to it.
    pub fn extends(
        path: &str,
        base: &RecordInfo,
        fields: impl IntoIterator<Item = FieldInfo>,
    ) -> Self {
        let ty = Type::with_base(path, &base.ty);
        let all = base.fields.iter().cloned().chain(fields).collect();
        Self::build(ty, all)
    }

    fn build(ty: Type, fields: Vec<FieldInfo>) -> Self {
        let mut indices = HashMap::with_capacity_and_hasher(fields.len(), Default::default());
        for (index, field) in fields.iter().enumerate() {
            if indices.insert(Arc::from(field.name()), index).is_some() {
                panic!("duplicate field `{}` in record `{ty}`", field.name());
            }
        }
        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|f| f.key() == field.key()) {
                panic!("duplicate key `{}` in record `{ty}`", field.key());
            }
        }

        Self {
            ty,
            fields: fields.into_boxed_slice(),
            indices,
        }
    }

    /// Returns the record's type.
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the field with the given declared name.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(*self.indices.get(name)?)
    }

    /// Returns the field marshalled under `key`.
    ///
    /// This is O(N) complexity.
    pub fn field_by_key(&self, key: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.key() == key)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Returns the index of the field with the given declared name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns an iterator over the fields in **declaration order**.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FieldInfo> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl PartialEq for RecordInfo {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for RecordInfo {}

impl core::hash::Hash for RecordInfo {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
    }
}
