use alloc::format;
use alloc::string::String;
use core::hash::{Hash, Hasher};
use std::sync::{PoisonError, RwLock};

use fm_utils::hash::HashMap;
use fm_utils::hash::hashbrown::Equivalent;

use crate::info::{ScalarKind, TypeInfo};
use crate::ops::Shape;
use crate::registry::{MarshalHook, UnmarshalHook};
use crate::{Primitive, PrimitiveShape, UnmarshalError};

// -----------------------------------------------------------------------------
// MarshalImpl

/// The converter chosen for values of one [`Shape`].
#[derive(Debug, Clone)]
pub enum MarshalImpl {
    /// Scalars pass through.
    Identity,
    /// A registered hook, for the shape itself or a base type.
    Hook(MarshalHook),
    /// Lists and tuples become sequences.
    Sequence,
    /// Sets become sorted sequences.
    Set,
    /// Maps become objects with string keys.
    Map,
    /// Enums become their member value.
    Enum,
    /// Records become objects keyed by field.
    Record,
    /// Nothing handles the shape.
    Unsupported,
}

// -----------------------------------------------------------------------------
// UnmarshalImpl

/// The member chosen by union resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnionResolution {
    /// The data is `null` and the union is optional.
    Null,
    /// Convert to this member.
    Member(TypeInfo),
}

/// Why no converter applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The data's shape does not fit the target.
    Mismatch,
    /// A union member has its own hook, which the resolver cannot reason about.
    HookedMember(TypeInfo),
    /// No union member accepts the data's shape.
    NoCandidate,
    /// Several union members could accept the data.
    Ambiguous,
}

impl Rejection {
    pub(crate) fn into_error(self, target: &TypeInfo, data: &Primitive) -> UnmarshalError {
        let shape = PrimitiveShape::of(data);
        let reason: String = match self {
            Self::Mismatch => return UnmarshalError::mismatch(target, data),
            Self::HookedMember(member) => {
                format!("member `{member}` has an unmarshal hook, so automatic resolution is off")
            }
            Self::NoCandidate => format!("no member accepts data of shape `{shape}`"),
            Self::Ambiguous => format!("more than one member could accept data of shape `{shape}`"),
        };
        UnmarshalError::AmbiguousUnion {
            target: target.clone(),
            data: data.clone(),
            reason,
        }
    }
}

/// The converter chosen for primitive data of one shape and one target.
#[derive(Debug, Clone)]
pub enum UnmarshalImpl {
    /// `Any` keeps the data as it is.
    Identity,
    /// A scalar target accepting the data's shape.
    Scalar(ScalarKind),
    /// A registered hook, for the target itself or a base type.
    Hook(UnmarshalHook),
    Sequence,
    Tuple,
    Set,
    Map,
    Enum,
    Record,
    /// A union or optional resolved to a member.
    Union(UnionResolution),
    /// Conversion fails; failures are cached like successes.
    Reject(Rejection),
}

// -----------------------------------------------------------------------------
// DispatchCache

// Borrowed form of an unmarshal cache key; hashes like the owned tuple.
struct UnmarshalKeyRef<'a>(PrimitiveShape, &'a TypeInfo);

impl Hash for UnmarshalKeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
        self.1.hash(state);
    }
}

impl Equivalent<(PrimitiveShape, TypeInfo)> for UnmarshalKeyRef<'_> {
    fn equivalent(&self, key: &(PrimitiveShape, TypeInfo)) -> bool {
        self.0 == key.0 && *self.1 == key.1
    }
}

/// Memoized resolutions. Entries are only ever computed from the current
/// hook set: hook registration needs `&mut Registry` and clears both maps.
#[derive(Default)]
pub(crate) struct DispatchCache {
    marshal: RwLock<HashMap<Shape, MarshalImpl>>,
    unmarshal: RwLock<HashMap<(PrimitiveShape, TypeInfo), UnmarshalImpl>>,
}

impl DispatchCache {
    pub fn marshal(&self, shape: &Shape, resolve: impl FnOnce() -> MarshalImpl) -> MarshalImpl {
        if let Some(found) = self
            .marshal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(shape)
        {
            return found.clone();
        }
        let resolved = resolve();
        log::trace!("marshal dispatch for `{shape}` resolved to {resolved:?}");
        self.marshal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(shape.clone())
            .or_insert(resolved)
            .clone()
    }

    pub fn unmarshal(
        &self,
        shape: PrimitiveShape,
        target: &TypeInfo,
        resolve: impl FnOnce() -> UnmarshalImpl,
    ) -> UnmarshalImpl {
        if let Some(found) = self
            .unmarshal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&UnmarshalKeyRef(shape, target))
        {
            return found.clone();
        }
        let resolved = resolve();
        log::trace!("unmarshal dispatch for `{shape}` -> `{target}` resolved to {resolved:?}");
        self.unmarshal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((shape, target.clone()))
            .or_insert(resolved)
            .clone()
    }

    /// Clears through a shared reference.
    pub fn clear(&self) {
        self.marshal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.unmarshal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Clears without locking; the exclusive borrow rules out readers.
    pub fn clear_mut(&mut self) {
        self.marshal
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.unmarshal
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached `(marshal, unmarshal)` resolutions.
    pub fn len(&self) -> (usize, usize) {
        (
            self.marshal
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
            self.unmarshal
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
        )
    }
}
