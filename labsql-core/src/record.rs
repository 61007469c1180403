//! The contract between a record type and the mapping layer.

use crate::column::ColumnDescriptor;
use crate::value::SqlValue;

/// One persisted field of a record instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub value: SqlValue,
}

impl Field {
    pub fn new(name: &'static str, value: impl Into<SqlValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    pub fn is_nullish(&self) -> bool {
        self.value.is_nullish()
    }
}

/// A type persisted as one table.
///
/// `schema` describes the columns once, in declaration order; a field may
/// appear several times and its descriptors are merged. `fields` yields the
/// current values of one instance, in the same order.
pub trait Record: 'static {
    /// Table name, conventionally the type name.
    const TABLE: &'static str;

    /// Column declarations for this type.
    fn schema() -> Vec<(&'static str, ColumnDescriptor)>;

    /// Field values of this instance.
    fn fields(&self) -> Vec<Field>;

    /// Value of a named field, `Null` when absent or unknown.
    fn value_of(&self, name: &str) -> SqlValue {
        self.fields()
            .into_iter()
            .find(|f| f.name == name)
            .map(|f| f.value)
            .unwrap_or_default()
    }
}
