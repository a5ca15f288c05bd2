use alloc::vec::Vec;

use crate::PrimitiveShape;
use crate::info::{OptionalInfo, TypeInfo, UnionInfo};
use crate::registry::{Registry, Rejection, UnionResolution, UnmarshalImpl};

/// `null` stays `null`; anything else goes to the inner descriptor.
pub(super) fn resolve_optional(shape: PrimitiveShape, info: &OptionalInfo) -> UnmarshalImpl {
    match shape {
        PrimitiveShape::Null => UnmarshalImpl::Union(UnionResolution::Null),
        _ => UnmarshalImpl::Union(UnionResolution::Member(info.inner().clone())),
    }
}

/// Picks the member of `info` that data of `shape` converts to.
///
/// First match wins:
///
/// 1. A member with a reachable unmarshal hook disables resolution, since
///    the hook may accept shapes nothing here can predict.
/// 2. A scalar shape that is literally a member resolves to it.
/// 3. Sequence and mapping data narrows the union to its non-scalar members;
///    a strictly smaller union is resolved again through the registry, so a
///    hook on the narrowed union applies.
/// 4. A single non-scalar candidate takes the data.
///
/// Anything else is ambiguous.
pub(super) fn resolve_union(
    registry: &Registry,
    shape: PrimitiveShape,
    info: &UnionInfo,
) -> UnmarshalImpl {
    let members = info.members();

    if let Some(hooked) = members
        .iter()
        .find(|member| registry.unmarshal_hook(member).is_some())
    {
        return UnmarshalImpl::Reject(Rejection::HookedMember(hooked.clone()));
    }

    if let Some(kind) = shape.scalar_kind()
        && members.contains(&TypeInfo::Scalar(kind))
    {
        return UnmarshalImpl::Union(UnionResolution::Member(TypeInfo::Scalar(kind)));
    }

    let candidates: Vec<&TypeInfo> = members.iter().filter(|m| !m.is_scalar()).collect();

    if !shape.is_scalar() && candidates.len() < members.len() {
        return match candidates.len() {
            0 => UnmarshalImpl::Reject(Rejection::NoCandidate),
            _ => UnmarshalImpl::Union(UnionResolution::Member(TypeInfo::union(
                candidates.into_iter().cloned(),
            ))),
        };
    }

    match candidates.as_slice() {
        [] => UnmarshalImpl::Reject(Rejection::NoCandidate),
        [only] => UnmarshalImpl::Union(UnionResolution::Member(TypeInfo::clone(only))),
        _ => UnmarshalImpl::Reject(Rejection::Ambiguous),
    }
}
