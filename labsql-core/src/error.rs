use thiserror::Error;

/// Errors raised while building a table schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// More than one field claims a key role that must be unique per table
    #[error("Schema conflict in {table}: {count} fields declared {role}")]
    SchemaConflict {
        table: String,
        role: &'static str,
        count: usize,
    },

    /// The record type was never registered
    #[error("Table not registered: {0}")]
    Unregistered(String),
}

impl SchemaError {
    pub fn unregistered(table: impl Into<String>) -> Self {
        Self::Unregistered(table.into())
    }
}

/// A constructor argument failed its precondition.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} is not pure number")]
    NotPureNumber(String),

    #[error("{0} is not a directory")]
    NotADirectory(String),

    #[error("Invalid date/time: {0}")]
    InvalidDate(String),
}
