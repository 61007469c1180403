//! A database handle bundled with the column metadata of its record types.

use std::path::Path;

use labsql_core::{ColumnMetadataRegistry, Predicate, Record, SqlValue, TableSchema, validate};

use crate::backend;
use crate::error::DbError;
use crate::mutate::{self, InsertOrUpdateStats, Reference};
use crate::row::Row;
use crate::schema::create_table_sql;

/// An open SQLite database plus the registry of record types it maps.
///
/// Record types are registered once after opening; every operation then
/// names its target type explicitly, so there is no "current table" state.
/// The underlying connection closes on drop.
pub struct Connection {
    conn: rusqlite::Connection,
    registry: ColumnMetadataRegistry,
}

impl Connection {
    /// Open or create a database file. The containing directory must exist.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        validate(Some(dir.to_string_lossy().as_ref()), Predicate::ExistingDirectoryPath)?;

        let conn = rusqlite::Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self::from_backend(conn))
    }

    /// Open an in-memory database. Useful for testing.
    pub fn open_memory() -> Result<Self, DbError> {
        let conn = rusqlite::Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self::from_backend(conn))
    }

    fn from_backend(conn: rusqlite::Connection) -> Self {
        Self {
            conn,
            registry: ColumnMetadataRegistry::new(),
        }
    }

    /// Register the column metadata of `R`.
    pub fn register<R: Record>(&mut self) -> Result<&TableSchema, DbError> {
        Ok(self.registry.register::<R>()?)
    }

    pub fn registry(&self) -> &ColumnMetadataRegistry {
        &self.registry
    }

    /// The raw rusqlite connection.
    pub fn backend(&self) -> &rusqlite::Connection {
        &self.conn
    }

    fn schema<R: Record>(&self) -> Result<&TableSchema, DbError> {
        Ok(self.registry.schema::<R>()?)
    }

    /// The DDL `create_table` would execute for `R`.
    pub fn create_table_sql<R: Record>(&self) -> Result<String, DbError> {
        Ok(create_table_sql(self.schema::<R>()?))
    }

    /// Create `R`'s table if it does not exist yet.
    pub fn create_table<R: Record>(&self) -> Result<(), DbError> {
        let sql = self.create_table_sql::<R>()?;
        backend::run(&self.conn, &sql)?;
        Ok(())
    }

    /// Insert each instance, resolving conflicts per `reference`.
    ///
    /// Returns the number of changed rows.
    pub fn upsert<R: Record>(&self, instances: &[R], reference: Reference<'_>) -> Result<usize, DbError> {
        mutate::upsert(&self.conn, self.schema::<R>()?, instances, reference)
    }

    /// Insert each instance unless a row already matches it on `match_fields`,
    /// in which case the matching rows are overwritten with its non-null fields.
    pub fn insert_or_update<R: Record>(
        &self,
        instances: &[R],
        match_fields: &[&str],
    ) -> Result<InsertOrUpdateStats, DbError> {
        mutate::insert_or_update(&self.conn, self.schema::<R>()?, instances, match_fields)
    }

    /// Rows equal to `instance` on all of its non-null fields.
    pub fn select_all_when_property_equal<R: Record>(
        &self,
        instance: &R,
        columns: &[&str],
    ) -> Result<Vec<Row>, DbError> {
        mutate::select_all_when_property_equal(&self.conn, self.schema::<R>()?, instance, columns)
    }

    /// Number of rows in `R`'s table.
    pub fn row_count<R: Record>(&self) -> Result<i64, DbError> {
        let table = self.schema::<R>()?.name();
        let rows = backend::all(&self.conn, &format!("select count(*) as `count` from {table};"))?;
        rows.first()
            .and_then(|row| row.get("count"))
            .and_then(SqlValue::as_i64)
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Close the connection, reporting any error from the backend.
    pub fn close(self) -> Result<(), DbError> {
        self.conn.close().map_err(|(_, e)| DbError::Sqlite(e))
    }
}
