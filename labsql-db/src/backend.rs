//! Statement execution with round-trip logging.
//!
//! Every statement is logged once on the way out and once on the way back,
//! both lines tagged with the same short identifier so interleaved output
//! can be paired up. The identifier is for log correlation only.

use std::fmt::Display;

use rand::Rng;
use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::error::DbError;
use crate::row::{Row, from_sqlite};

const ENGINE: &str = "SQLite";

/// A 6-character hex tag derived from the current millisecond and a random salt.
pub fn identifier() -> String {
    let millis = chrono::Utc::now().timestamp_subsec_millis();
    let mut rng = rand::thread_rng();
    let salt: String = (0..10)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    let digest = Sha256::digest(format!("{millis}{salt}").as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(6);
    hex
}

fn log_request(id: &str, sql: &str) {
    log::info!("[{ENGINE}] [#{id} ->]: {sql}");
}

fn log_response(id: &str, sql: &str, returned: impl Display) {
    log::info!("[{ENGINE}] [#{id} <-]: {sql} returned {returned}");
}

/// Execute a statement that returns no rows. Returns the number of changed rows.
pub(crate) fn run(conn: &Connection, sql: &str) -> Result<usize, DbError> {
    let id = identifier();
    log_request(&id, sql);
    let changes = conn
        .execute(sql, [])
        .inspect_err(|e| log::error!("[{ENGINE}] [#{id} <-]: {e}"))?;
    log_response(&id, sql, changes);
    Ok(changes)
}

/// Execute a query and collect every row.
pub(crate) fn all(conn: &Connection, sql: &str) -> Result<Vec<Row>, DbError> {
    let id = identifier();
    log_request(&id, sql);
    let rows = query_rows(conn, sql).inspect_err(|e| log::error!("[{ENGINE}] [#{id} <-]: {e}"))?;
    log_response(&id, sql, format_args!("{} rows", rows.len()));
    Ok(rows)
}

fn query_rows(conn: &Connection, sql: &str) -> rusqlite::Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let rows = stmt
        .query_map([], |row| {
            let mut columns = Vec::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                columns.push((name.clone(), from_sqlite(row.get_ref(i)?)));
            }
            Ok(Row::new(columns))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_six_hex_chars() {
        let id = identifier();
        assert_eq!(id.len(), 6);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn all_returns_named_columns() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn, "create table t (a integer, b text);").unwrap();
        assert_eq!(run(&conn, "insert into t (a, b) values (1, 'x');").unwrap(), 1);
        let rows = all(&conn, "select * from t;").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("a"), Some(&labsql_core::SqlValue::Integer(1)));
        assert_eq!(rows[0].get("b").and_then(|v| v.as_str()), Some("x"));
    }

    #[test]
    fn backend_errors_propagate() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(run(&conn, "insert into missing values (1);"), Err(DbError::Sqlite(_))));
    }
}
