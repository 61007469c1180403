use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use labsql_catalog::{Room, Student};
use labsql_core::{Record, SqlValue};
use labsql_db::{Connection, Row};

use crate::cli_types::{OutputArgs, QueryTable};
use crate::{CliError, log_ok};

pub(crate) fn run_query(db_path: &Path, table: QueryTable) -> Result<(), CliError> {
    if !db_path.exists() {
        log::warn!("No database found at {}", db_path.display());
        log::info!("Run 'labsql import' to create one.");
        return Ok(());
    }
    let conn = super::open_catalog(db_path)?;

    match table {
        QueryTable::Room {
            kdno,
            kcno,
            ccno,
            kdname,
            exptime,
            papername,
            output,
        } => {
            let template = Room::new(
                kdno.as_deref(),
                kcno.as_deref(),
                ccno.as_deref(),
                kdname.as_deref(),
                exptime.as_deref(),
                papername.as_deref(),
            )
            .map_err(|e| CliError::validation(e.to_string()))?;
            select_and_print(&conn, &template, &output)
        }
        QueryTable::Student {
            registno,
            name,
            kdno,
            kcno,
            ccno,
            seat,
            output,
        } => {
            let template = Student::new(
                registno.as_deref(),
                name.as_deref(),
                kdno.as_deref(),
                kcno.as_deref(),
                ccno.as_deref(),
                seat.as_deref(),
            )
            .map_err(|e| CliError::validation(e.to_string()))?;
            select_and_print(&conn, &template, &output)
        }
    }
}

fn select_and_print<R: Record>(
    conn: &Connection,
    template: &R,
    output: &OutputArgs,
) -> Result<(), CliError> {
    let columns: Vec<&str> = output.columns.iter().map(String::as_str).collect();
    let rows = conn
        .select_all_when_property_equal(template, &columns)
        .map_err(|e| CliError::database(format!("Failed to query {}: {}", R::TABLE, e)))?;

    if output.json {
        let json = serde_json::Value::Array(rows.iter().map(row_to_json).collect());
        let text = serde_json::to_string_pretty(&json)
            .map_err(|e| CliError::other(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    for row in &rows {
        let cells: Vec<String> = row
            .columns()
            .iter()
            .map(|(name, value)| {
                format!("{}={}", name.if_supports_color(Stdout, |t| t.cyan()), value)
            })
            .collect();
        log::info!("  {}", cells.join("  "));
    }
    log_ok(format!("{} rows from {}", rows.len(), R::TABLE));
    Ok(())
}

fn value_to_json(value: &SqlValue) -> serde_json::Value {
    match value {
        SqlValue::Null => serde_json::Value::Null,
        SqlValue::Integer(n) => (*n).into(),
        SqlValue::Real(x) => serde_json::Number::from_f64(*x)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        SqlValue::Text(_) | SqlValue::Date(_) => value.to_string().into(),
    }
}

fn row_to_json(row: &Row) -> serde_json::Value {
    let object = row
        .columns()
        .iter()
        .map(|(name, value)| (name.clone(), value_to_json(value)))
        .collect();
    serde_json::Value::Object(object)
}
