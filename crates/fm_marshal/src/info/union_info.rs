use alloc::sync::Arc;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use fm_utils::hash::hash_one;

use crate::info::{ScalarKind, TypeInfo};

// -----------------------------------------------------------------------------
// OptionalInfo

/// Descriptor of `Optional[T]`: `null` or a `T`.
///
/// Created through [`TypeInfo::optional`] or [`TypeInfo::union`] with a
/// null member. The inner descriptor is never null or optional itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionalInfo {
    inner: Arc<TypeInfo>,
}

impl OptionalInfo {
    /// Returns the non-null descriptor.
    #[inline]
    pub fn inner(&self) -> &TypeInfo {
        &self.inner
    }
}

// -----------------------------------------------------------------------------
// UnionInfo

/// Descriptor of a union of two or more non-null members.
///
/// Created through [`TypeInfo::union`], which keeps unions normalized:
/// no nested unions, no duplicates, no null member.
///
/// Two unions are equal when they hold the same members in any order, so a
/// hook registered for `Union[Foo, Bar]` also serves `Union[Bar, Foo]`.
/// The declared order is kept for iteration.
#[derive(Debug, Clone)]
pub struct UnionInfo {
    members: Arc<[TypeInfo]>,
}

impl UnionInfo {
    /// Returns the members in declaration order.
    #[inline]
    pub fn members(&self) -> &[TypeInfo] {
        &self.members
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if `ty` is one of the members.
    #[inline]
    pub fn contains(&self, ty: &TypeInfo) -> bool {
        self.members.contains(ty)
    }
}

impl PartialEq for UnionInfo {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.members.iter().all(|m| other.contains(m))
    }
}

impl Eq for UnionInfo {}

impl Hash for UnionInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mixed = self
            .members
            .iter()
            .fold(0u64, |acc, m| acc.wrapping_add(hash_one(m)));
        state.write_usize(self.len());
        state.write_u64(mixed);
    }
}

// -----------------------------------------------------------------------------
// Normalization

fn flatten(ty: TypeInfo, members: &mut Vec<TypeInfo>, nullable: &mut bool) {
    match ty {
        TypeInfo::Union(info) => {
            for member in info.members.iter() {
                flatten(member.clone(), members, nullable);
            }
        }
        TypeInfo::Optional(info) => {
            *nullable = true;
            flatten(TypeInfo::clone(&info.inner), members, nullable);
        }
        TypeInfo::Scalar(ScalarKind::Null) => *nullable = true,
        other => {
            if !members.contains(&other) {
                members.push(other);
            }
        }
    }
}

/// Builds the normalized descriptor for a union of `members`.
///
/// # Panics
///
/// Panics if `members` is empty.
pub(super) fn normalize(members: impl IntoIterator<Item = TypeInfo>) -> TypeInfo {
    let mut flat = Vec::new();
    let mut nullable = false;
    for member in members {
        flatten(member, &mut flat, &mut nullable);
    }

    let inner = match flat.len() {
        0 => None,
        1 => flat.pop(),
        _ => Some(TypeInfo::Union(UnionInfo {
            members: flat.into(),
        })),
    };

    match (inner, nullable) {
        (Some(inner), true) => TypeInfo::Optional(OptionalInfo {
            inner: Arc::new(inner),
        }),
        (Some(inner), false) => inner,
        (None, true) => TypeInfo::Scalar(ScalarKind::Null),
        (None, false) => panic!("a union needs at least one member"),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use fm_utils::hash::hash_one;

    use crate::info::TypeInfo;

    #[test]
    fn flattens_and_dedupes() {
        let u = TypeInfo::union([
            TypeInfo::int(),
            TypeInfo::union([TypeInfo::str(), TypeInfo::int()]),
        ]);
        let TypeInfo::Union(info) = &u else {
            panic!("expected a union, got {u}");
        };
        assert_eq!(info.members(), &[TypeInfo::int(), TypeInfo::str()]);
    }

    #[test]
    fn collapses() {
        assert_eq!(TypeInfo::union([TypeInfo::int()]), TypeInfo::int());
        assert_eq!(
            TypeInfo::union([TypeInfo::int(), TypeInfo::null()]),
            TypeInfo::optional(TypeInfo::int())
        );
        assert_eq!(
            TypeInfo::optional(TypeInfo::optional(TypeInfo::int())),
            TypeInfo::optional(TypeInfo::int())
        );
        assert_eq!(TypeInfo::optional(TypeInfo::null()), TypeInfo::null());
        assert_eq!(
            TypeInfo::optional(TypeInfo::union([TypeInfo::int(), TypeInfo::str()])),
            TypeInfo::union([TypeInfo::null(), TypeInfo::str(), TypeInfo::int()])
        );
    }

    #[test]
    fn order_insensitive_identity() {
        let a = TypeInfo::union(vec![TypeInfo::int(), TypeInfo::str(), TypeInfo::bool()]);
        let b = TypeInfo::union(vec![TypeInfo::bool(), TypeInfo::int(), TypeInfo::str()]);
        assert_eq!(a, b);
        assert_eq!(hash_one(&a), hash_one(&b));
        assert_ne!(a, TypeInfo::union([TypeInfo::int(), TypeInfo::str()]));
    }

    #[test]
    #[should_panic(expected = "at least one member")]
    fn empty_union() {
        let _ = TypeInfo::union(Vec::new());
    }
}
