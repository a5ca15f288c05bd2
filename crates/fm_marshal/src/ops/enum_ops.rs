use alloc::sync::Arc;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::{EnumInfo, ScalarValue};

/// A value of an enum: its descriptor plus a valid member value.
///
/// Created through [`EnumInfo::member`], [`EnumInfo::from_value`] and
/// [`EnumInfo::combine`]. For flags the value may be a combination of
/// members, which has no name of its own unless a member declares it.
#[derive(Clone)]
pub struct EnumValue {
    info: Arc<EnumInfo>,
    value: ScalarValue,
}

impl EnumValue {
    /// Callers have checked [`EnumInfo::is_valid`].
    #[inline]
    pub(crate) fn new_unchecked(info: Arc<EnumInfo>, value: ScalarValue) -> Self {
        Self { info, value }
    }

    #[inline]
    pub fn info(&self) -> &Arc<EnumInfo> {
        &self.info
    }

    /// The underlying member value.
    #[inline]
    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    /// The name of the member holding this value.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.info.name_of(&self.value)
    }

    /// The integer value of a flag or int enum.
    #[inline]
    pub fn bits(&self) -> Option<i64> {
        self.value.as_int()
    }

    /// For flags: `true` if every bit of `other` is set in `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use fm_marshal::info::EnumInfo;
    ///
    /// let info = Arc::new(EnumInfo::flag("m::Flag", [("A", 1), ("B", 2)]));
    /// let ab = info.combine(&["A", "B"]).unwrap();
    /// assert!(ab.contains(&info.member("A").unwrap()));
    /// assert!(!info.member("A").unwrap().contains(&ab));
    /// ```
    pub fn contains(&self, other: &EnumValue) -> bool {
        match (self.bits(), other.bits()) {
            (Some(a), Some(b)) if self.info == other.info => a & b == b,
            _ => false,
        }
    }
}

impl PartialEq for EnumValue {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.info == other.info && self.value == other.value
    }
}

impl Eq for EnumValue {}

impl Hash for EnumValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.info.ty().hash(state);
        self.value.hash(state);
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}.{name}", self.info.ty().name()),
            None => write!(f, "{}({})", self.info.ty().name(), self.value),
        }
    }
}
