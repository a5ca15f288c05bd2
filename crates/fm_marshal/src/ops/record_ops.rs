use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use thiserror::Error;

use crate::info::{FieldInfo, RecordInfo, Type};
use crate::ops::Value;

// -----------------------------------------------------------------------------
// ConstructError

/// Error returned by [`RecordBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    #[error("record `{record}` has no field `{field}`")]
    UnknownField { record: Type, field: String },
    #[error("field `{field}` of record `{record}` has no value and no default")]
    MissingField { record: Type, field: String },
}

// -----------------------------------------------------------------------------
// RecordValue

/// A record: its descriptor plus one value per field, in declaration order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fm_marshal::info::{FieldInfo, RecordInfo, TypeInfo};
/// use fm_marshal::ops::{ConstructError, RecordValue, Value};
///
/// let info = Arc::new(RecordInfo::new("app::Foo", [
///     FieldInfo::new("id", TypeInfo::int()),
///     FieldInfo::new("tag", TypeInfo::optional(TypeInfo::str())).with_default(Value::Null),
/// ]));
///
/// let foo = RecordValue::builder(&info).with("id", 7).build().unwrap();
/// assert_eq!(foo.get("id"), Some(&Value::Int(7)));
/// assert_eq!(foo.get("tag"), Some(&Value::Null));
///
/// let err = RecordValue::builder(&info).build().unwrap_err();
/// assert!(matches!(err, ConstructError::MissingField { .. }));
/// ```
#[derive(Clone)]
pub struct RecordValue {
    info: Arc<RecordInfo>,
    fields: Vec<Value>,
}

impl RecordValue {
    /// Starts building a value of `info`.
    #[inline]
    pub fn builder(info: &Arc<RecordInfo>) -> RecordBuilder {
        RecordBuilder {
            info: info.clone(),
            fields: alloc::vec![None; info.len()],
            error: None,
        }
    }

    /// Assembles a record from values already in declaration order.
    pub(crate) fn from_parts(info: Arc<RecordInfo>, fields: Vec<Value>) -> Self {
        debug_assert_eq!(info.len(), fields.len());
        Self { info, fields }
    }

    #[inline]
    pub fn info(&self) -> &Arc<RecordInfo> {
        &self.info
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        self.info.ty()
    }

    /// Returns the value of the field with the given declared name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(self.info.index_of(name)?)
    }

    /// Returns a mutable reference to a field value.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let index = self.info.index_of(name)?;
        self.fields.get_mut(index)
    }

    /// Returns the field values in declaration order.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.fields
    }

    /// Iterates over `(field, value)` pairs in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&FieldInfo, &Value)> {
        self.info.iter().zip(self.fields.iter())
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        self.info.ty() == other.info.ty() && self.fields == other.fields
    }
}

impl Eq for RecordValue {}

impl Hash for RecordValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.info.ty().hash(state);
        self.fields.hash(state);
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.info.ty().name());
        for (field, value) in self.iter() {
            s.field(field.name(), value);
        }
        s.finish()
    }
}

// -----------------------------------------------------------------------------
// RecordBuilder

/// Builder returned by [`RecordValue::builder`].
///
/// Fields left unset take their declared default.
pub struct RecordBuilder {
    info: Arc<RecordInfo>,
    fields: Vec<Option<Value>>,
    error: Option<ConstructError>,
}

impl RecordBuilder {
    /// Sets the field with the given declared name.
    ///
    /// An unknown name is reported by [`build`](Self::build).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        match self.info.index_of(name) {
            Some(index) => self.fields[index] = Some(value.into()),
            None => {
                self.error.get_or_insert_with(|| ConstructError::UnknownField {
                    record: self.info.ty().clone(),
                    field: String::from(name),
                });
            }
        }
        self
    }

    /// Finishes the record, filling unset fields with defaults.
    pub fn build(self) -> Result<RecordValue, ConstructError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let fields = self
            .fields
            .into_iter()
            .zip(self.info.iter())
            .map(|(value, field)| match value {
                Some(value) => Ok(value),
                None => field.default().cloned().ok_or_else(|| ConstructError::MissingField {
                    record: self.info.ty().clone(),
                    field: String::from(field.name()),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecordValue {
            info: self.info,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use crate::info::{FieldInfo, RecordInfo, TypeInfo};
    use crate::ops::{ConstructError, RecordValue, Value};

    fn info() -> Arc<RecordInfo> {
        Arc::new(RecordInfo::new("m::Pair", [
            FieldInfo::new("a", TypeInfo::int()),
            FieldInfo::new("b", TypeInfo::int()).with_default(0),
        ]))
    }

    #[test]
    fn unknown_field() {
        let err = RecordValue::builder(&info()).with("c", 1).build().unwrap_err();
        assert!(matches!(err, ConstructError::UnknownField { ref field, .. } if field == "c"));
    }

    #[test]
    fn equality_and_mutation() {
        let info = info();
        let mut x = RecordValue::builder(&info).with("a", 1).build().unwrap();
        let y = RecordValue::builder(&info).with("a", 1).with("b", 0).build().unwrap();
        assert_eq!(x, y);

        *x.get_mut("b").unwrap() = Value::from(5);
        assert_ne!(x, y);
        assert_eq!(x.values(), &[Value::Int(1), Value::Int(5)]);
    }
}
