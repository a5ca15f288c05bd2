use alloc::vec::Vec;

use crate::ops::SetValue;
use crate::registry::Registry;
use crate::{MarshalError, Primitive, primitive_cmp};

/// Sets become sequences sorted by the marshalled items, so the output does
/// not depend on hashing or insertion order.
pub(super) struct SetMarshaller<'a> {
    pub set: &'a SetValue,
    pub registry: &'a Registry,
}

impl SetMarshaller<'_> {
    pub fn marshal(&self) -> Result<Primitive, MarshalError> {
        let mut items = self
            .set
            .iter()
            .map(|item| self.registry.marshal(item))
            .collect::<Result<Vec<_>, _>>()?;
        items.sort_by(primitive_cmp);
        Ok(Primitive::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::ops::Value;
    use crate::registry::Registry;

    #[test]
    fn sorted_regardless_of_insertion_order() {
        let registry = Registry::new();
        let a = Value::set([Value::from("b"), Value::from(2), Value::Null, Value::from("a")]);
        let b = Value::set([Value::from("a"), Value::Null, Value::from("b"), Value::from(2)]);
        let expected = json!([null, 2, "a", "b"]);
        assert_eq!(registry.marshal(&a).unwrap(), expected);
        assert_eq!(registry.marshal(&b).unwrap(), expected);
    }

    #[test]
    fn nested_sets() {
        let registry = Registry::new();
        let value = Value::set([
            Value::tuple([Value::from(2), Value::from("x")]),
            Value::tuple([Value::from(1), Value::from("y")]),
        ]);
        assert_eq!(registry.marshal(&value).unwrap(), json!([[1, "y"], [2, "x"]]));
    }
}
