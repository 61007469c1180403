//! SQLite persistence for record types described by `labsql-core`.
//!
//! Generates `CREATE TABLE` statements from registered column metadata and
//! performs upsert, insert-or-update, and filtered selects without
//! hand-written SQL, backed by rusqlite with the bundled feature.

pub mod backend;
pub mod connection;
pub mod error;
pub mod mutate;
pub mod row;
pub mod schema;

pub use backend::identifier;
pub use connection::Connection;
pub use error::DbError;
pub use mutate::{InsertOrUpdateStats, Reference};
pub use row::Row;
pub use schema::create_table_sql;
