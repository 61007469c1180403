use labsql_db::{Connection, create_table_sql};

use crate::CliError;

/// Print the DDL for every registered table without touching a database file.
pub(crate) fn run_schema() -> Result<(), CliError> {
    let mut conn =
        Connection::open_memory().map_err(|e| CliError::database(e.to_string()))?;
    super::register_all(&mut conn)?;

    for schema in conn.registry().tables() {
        println!("{}", create_table_sql(schema));
    }
    Ok(())
}
