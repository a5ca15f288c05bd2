use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::info::ScalarKind;

// -----------------------------------------------------------------------------
// Primitive

/// The primitive tree: exactly the JSON data model.
///
/// Object keys keep insertion order.
pub type Primitive = serde_json::Value;

/// The string-keyed mapping of the primitive tree.
pub type PrimitiveMap = serde_json::Map<alloc::string::String, Primitive>;

// -----------------------------------------------------------------------------
// PrimitiveShape

/// The runtime classification of primitive data.
///
/// Numbers written with a fraction or an exponent are [`Float`](Self::Float),
/// every other number is [`Int`](Self::Int).
///
/// # Examples
///
/// ```
/// use fm_marshal::PrimitiveShape;
/// use serde_json::json;
///
/// assert_eq!(PrimitiveShape::of(&json!(1)), PrimitiveShape::Int);
/// assert_eq!(PrimitiveShape::of(&json!(1.0)), PrimitiveShape::Float);
/// assert_eq!(PrimitiveShape::of(&json!({})), PrimitiveShape::Map);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveShape {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Seq,
    Map,
}

impl PrimitiveShape {
    /// Classifies `data`.
    pub fn of(data: &Primitive) -> Self {
        match data {
            Primitive::Null => Self::Null,
            Primitive::Bool(_) => Self::Bool,
            Primitive::Number(n) if n.is_f64() => Self::Float,
            Primitive::Number(_) => Self::Int,
            Primitive::String(_) => Self::Str,
            Primitive::Array(_) => Self::Seq,
            Primitive::Object(_) => Self::Map,
        }
    }

    /// Returns `true` for everything except sequences and mappings.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Self::Seq | Self::Map)
    }

    /// The scalar kind with exactly this shape.
    pub const fn scalar_kind(self) -> Option<ScalarKind> {
        match self {
            Self::Null => Some(ScalarKind::Null),
            Self::Bool => Some(ScalarKind::Bool),
            Self::Int => Some(ScalarKind::Int),
            Self::Float => Some(ScalarKind::Float),
            Self::Str => Some(ScalarKind::Str),
            Self::Seq | Self::Map => None,
        }
    }

    /// The name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Seq => "list",
            Self::Map => "dict",
        }
    }
}

impl fmt::Display for PrimitiveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Total order

const fn rank(data: &Primitive) -> u8 {
    match data {
        Primitive::Null => 0,
        Primitive::Bool(_) => 1,
        Primitive::Number(_) => 2,
        Primitive::String(_) => 3,
        Primitive::Array(_) => 4,
        Primitive::Object(_) => 5,
    }
}

fn cmp_numbers(a: &serde_json::Number, b: &serde_json::Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    let x = a.as_f64().unwrap_or(f64::NAN);
    let y = b.as_f64().unwrap_or(f64::NAN);
    // `1` sorts before `1.0`.
    x.total_cmp(&y).then_with(|| a.is_f64().cmp(&b.is_f64()))
}

/// A total order over primitive data, used to emit sets deterministically.
///
/// null < bool < number < string < sequence < mapping. Numbers compare by
/// value, sequences lexicographically and mappings by their key-sorted entries.
///
/// # Examples
///
/// ```
/// use fm_marshal::primitive_cmp;
/// use serde_json::json;
/// use core::cmp::Ordering;
///
/// assert_eq!(primitive_cmp(&json!(null), &json!(false)), Ordering::Less);
/// assert_eq!(primitive_cmp(&json!(10), &json!(9.5)), Ordering::Greater);
/// assert_eq!(primitive_cmp(&json!([1, 2]), &json!([1, 2, 0])), Ordering::Less);
/// ```
pub fn primitive_cmp(a: &Primitive, b: &Primitive) -> Ordering {
    match (a, b) {
        (Primitive::Bool(x), Primitive::Bool(y)) => x.cmp(y),
        (Primitive::Number(x), Primitive::Number(y)) => cmp_numbers(x, y),
        (Primitive::String(x), Primitive::String(y)) => x.cmp(y),
        (Primitive::Array(x), Primitive::Array(y)) => {
            for (l, r) in x.iter().zip(y.iter()) {
                match primitive_cmp(l, r) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            x.len().cmp(&y.len())
        }
        (Primitive::Object(x), Primitive::Object(y)) => {
            let mut x: Vec<_> = x.iter().collect();
            let mut y: Vec<_> = y.iter().collect();
            x.sort_unstable_by(|l, r| l.0.cmp(r.0));
            y.sort_unstable_by(|l, r| l.0.cmp(r.0));
            for ((lk, lv), (rk, rv)) in x.iter().zip(y.iter()) {
                match lk.cmp(rk).then_with(|| primitive_cmp(lv, rv)) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            x.len().cmp(&y.len())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use serde_json::json;

    use super::*;

    #[test]
    fn shapes() {
        assert_eq!(PrimitiveShape::of(&json!(null)), PrimitiveShape::Null);
        assert_eq!(PrimitiveShape::of(&json!(true)), PrimitiveShape::Bool);
        assert_eq!(PrimitiveShape::of(&json!(-3)), PrimitiveShape::Int);
        assert_eq!(PrimitiveShape::of(&json!(u64::MAX)), PrimitiveShape::Int);
        assert_eq!(PrimitiveShape::of(&json!(0.5)), PrimitiveShape::Float);
        assert_eq!(PrimitiveShape::of(&json!("a")), PrimitiveShape::Str);
        assert_eq!(PrimitiveShape::of(&json!([])), PrimitiveShape::Seq);
        assert!(!PrimitiveShape::Map.is_scalar());
        assert_eq!(PrimitiveShape::Seq.scalar_kind(), None);
    }

    #[test]
    fn sort_mixed() {
        let mut items: Vec<Primitive> = vec![
            json!({"b": 1}),
            json!("b"),
            json!([2]),
            json!(2.5),
            json!(true),
            json!(null),
            json!(-1),
            json!("a"),
            json!({"a": 2}),
            json!([1, 9]),
        ];
        items.sort_by(primitive_cmp);
        assert_eq!(
            items,
            vec![
                json!(null),
                json!(true),
                json!(-1),
                json!(2.5),
                json!("a"),
                json!("b"),
                json!([1, 9]),
                json!([2]),
                json!({"a": 2}),
                json!({"b": 1}),
            ]
        );
    }

    #[test]
    fn numbers_compare_across_representations() {
        assert_eq!(primitive_cmp(&json!(u64::MAX), &json!(-1)), Ordering::Greater);
        assert_eq!(primitive_cmp(&json!(1), &json!(1.0)), Ordering::Less);
        assert_eq!(primitive_cmp(&json!(2), &json!(1.5)), Ordering::Greater);
    }
}
