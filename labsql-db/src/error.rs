use labsql_core::{SchemaError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The backend rejected a statement
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No usable reference or match column for a mutation
    #[error("Reference resolution failed: {0}")]
    ReferenceResolution(String),
}

impl DbError {
    pub fn reference(msg: impl Into<String>) -> Self {
        Self::ReferenceResolution(msg.into())
    }
}
