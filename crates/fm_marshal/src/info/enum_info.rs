use alloc::boxed::Box;
use alloc::sync::Arc;
use core::hash::{Hash, Hasher};

use crate::info::{ScalarKind, ScalarValue, Type};
use crate::ops::EnumValue;

// -----------------------------------------------------------------------------
// EnumMember

/// A named enum member and its underlying value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumMember {
    name: Arc<str>,
    value: ScalarValue,
}

impl EnumMember {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &ScalarValue {
        &self.value
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// Descriptor of an enumeration with scalar member values.
///
/// All members share one underlying [`ScalarKind`]. A *flag* enum has integer
/// members that combine with bitwise OR; `0` and any OR of member values are
/// valid flag values.
///
/// Several members may share a value; the first one names it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fm_marshal::info::{EnumInfo, ScalarKind, ScalarValue};
///
/// let status = Arc::new(EnumInfo::new("hcloud::ServerStatus", [
///     ("running", "running"),
///     ("off", "off"),
/// ]));
/// assert_eq!(status.kind(), ScalarKind::Str);
///
/// let off = status.member("off").unwrap();
/// assert_eq!(off.value(), &ScalarValue::from("off"));
/// assert!(status.member("starting").is_none());
///
/// let perms = Arc::new(EnumInfo::flag("fs::Perm", [("R", 4), ("W", 2), ("X", 1)]));
/// let rw = perms.combine(&["R", "W"]).unwrap();
/// assert_eq!(rw.bits(), Some(6));
/// assert!(perms.from_value(8).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct EnumInfo {
    ty: Type,
    kind: ScalarKind,
    members: Box<[EnumMember]>,
    flag: bool,
    mask: i64,
}

impl EnumInfo {
    /// Creates a plain enum. The underlying kind is taken from the members.
    ///
    /// # Panics
    ///
    /// Panics if `members` is empty, if member kinds differ, or if a member
    /// name repeats.
    pub fn new<V: Into<ScalarValue>>(
        ty: impl Into<Type>,
        members: impl IntoIterator<Item = (&'static str, V)>,
    ) -> Self {
        Self::build(ty.into(), members, false)
    }

    /// Creates a flag enum over integer members.
    ///
    /// # Panics
    ///
    /// As [`EnumInfo::new`], plus a negative member value.
    pub fn flag(
        ty: impl Into<Type>,
        members: impl IntoIterator<Item = (&'static str, i64)>,
    ) -> Self {
        Self::build(ty.into(), members, true)
    }

    fn build<V: Into<ScalarValue>>(
        ty: Type,
        members: impl IntoIterator<Item = (&'static str, V)>,
        flag: bool,
    ) -> Self {
        let members: Box<[EnumMember]> = members
            .into_iter()
            .map(|(name, value)| EnumMember {
                name: Arc::from(name),
                value: value.into(),
            })
            .collect();

        let Some(first) = members.first() else {
            panic!("enum `{ty}` has no members");
        };
        let kind = first.value.kind();

        let mut mask = 0;
        for (index, member) in members.iter().enumerate() {
            if member.value.kind() != kind {
                panic!(
                    "member `{}` of enum `{ty}` is {}, expected {kind}",
                    member.name,
                    member.value.kind()
                );
            }
            if members[..index].iter().any(|m| m.name == member.name) {
                panic!("duplicate member `{}` in enum `{ty}`", member.name);
            }
            if flag {
                match member.value.as_int() {
                    Some(bits) if bits >= 0 => mask |= bits,
                    _ => panic!(
                        "member `{}` of flag enum `{ty}` must be a non-negative int",
                        member.name
                    ),
                }
            }
        }

        Self {
            ty,
            kind,
            members,
            flag,
            mask,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The kind shared by all member values.
    #[inline]
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    #[inline]
    pub fn is_flag(&self) -> bool {
        self.flag
    }

    /// Returns the members in declaration order.
    #[inline]
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// Returns the name of the first member holding `value`.
    pub fn name_of(&self, value: &ScalarValue) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.value == *value)
            .map(EnumMember::name)
    }

    /// Returns `true` if `value` is a member value or, for flags, a
    /// combination of member bits.
    pub fn is_valid(&self, value: &ScalarValue) -> bool {
        if self.members.iter().any(|m| m.value == *value) {
            return true;
        }
        match (self.flag, value.as_int()) {
            (true, Some(bits)) => bits >= 0 && bits & !self.mask == 0,
            _ => false,
        }
    }

    /// Returns the member with the given name.
    pub fn member(self: &Arc<Self>, name: &str) -> Option<EnumValue> {
        let member = self.members.iter().find(|m| &*m.name == name)?;
        Some(EnumValue::new_unchecked(self.clone(), member.value.clone()))
    }

    /// Returns the enum value holding `value`, if valid.
    pub fn from_value(self: &Arc<Self>, value: impl Into<ScalarValue>) -> Option<EnumValue> {
        let value = value.into();
        self.is_valid(&value)
            .then(|| EnumValue::new_unchecked(self.clone(), value))
    }

    /// ORs the named members of a flag enum together.
    ///
    /// Returns `None` for plain enums and for unknown names. An empty list
    /// yields the `0` flag.
    pub fn combine(self: &Arc<Self>, names: &[&str]) -> Option<EnumValue> {
        if !self.flag {
            return None;
        }
        let mut bits = 0;
        for name in names {
            let member = self.members.iter().find(|m| &*m.name == *name)?;
            bits |= member.value.as_int()?;
        }
        Some(EnumValue::new_unchecked(self.clone(), ScalarValue::Int(bits)))
    }
}

impl PartialEq for EnumInfo {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for EnumInfo {}

impl Hash for EnumInfo {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::EnumInfo;
    use crate::info::ScalarValue;

    #[test]
    fn flags_accept_zero_and_combinations() {
        let info = Arc::new(EnumInfo::flag("m::Flag", [("A", 1), ("B", 2), ("AB", 3)]));
        assert!(info.is_valid(&ScalarValue::Int(0)));
        assert!(info.is_valid(&ScalarValue::Int(3)));
        assert!(!info.is_valid(&ScalarValue::Int(4)));
        assert!(!info.is_valid(&ScalarValue::Int(-1)));

        let ab = info.combine(&["A", "B"]).unwrap();
        assert_eq!(ab.name(), Some("AB"));
        assert_eq!(info.combine(&[]).unwrap().bits(), Some(0));
        assert!(info.combine(&["C"]).is_none());
    }

    #[test]
    fn aliases_share_a_value() {
        let info = Arc::new(EnumInfo::new("m::Color", [("RED", 1), ("CRIMSON", 1), ("BLUE", 2)]));
        assert_eq!(info.member("CRIMSON").unwrap().name(), Some("RED"));
        assert!(info.combine(&["RED"]).is_none());
    }

    #[test]
    #[should_panic(expected = "expected int")]
    fn mixed_kinds() {
        let _ = EnumInfo::new("m::Mixed", [
            ("A", ScalarValue::Int(1)),
            ("B", ScalarValue::from("b")),
        ]);
    }
}
