pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod query;
pub(crate) mod schema;

use std::path::Path;

use labsql_catalog::{Room, Student};
use labsql_db::Connection;

use crate::CliError;

/// Open the database and register the exam record types.
pub(crate) fn open_catalog(db_path: &Path) -> Result<Connection, CliError> {
    let mut conn = Connection::open(db_path).map_err(|e| {
        CliError::database(format!("Failed to open {}: {}", db_path.display(), e))
    })?;
    register_all(&mut conn)?;
    Ok(conn)
}

/// Register every record type the CLI knows about.
pub(crate) fn register_all(conn: &mut Connection) -> Result<(), CliError> {
    conn.register::<Room>()
        .map_err(|e| CliError::database(e.to_string()))?;
    conn.register::<Student>()
        .map_err(|e| CliError::database(e.to_string()))?;
    Ok(())
}
