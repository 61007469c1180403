use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use labsql_catalog::{DataLoader, Room, Student};
use labsql_db::Reference;

use crate::cli_types::CsvArgs;
use crate::{CliError, log_blank, log_ok};

/// Columns identifying one exam sitting.
const ROOM_MATCH: &[&str] = &["kdno", "kcno", "ccno"];

/// Student rows are reconciled on their registration number.
const STUDENT_REFERENCE: &str = "registno";

fn load_rows(path: &Path, csv: &CsvArgs, encoding: &str) -> Result<Vec<Vec<String>>, CliError> {
    let delimiter = u8::try_from(csv.delimiter)
        .map_err(|_| CliError::config(format!("Delimiter must be ASCII: {:?}", csv.delimiter)))?;
    let loader = DataLoader::new(path).map_err(|e| CliError::load(e.to_string()))?;
    log::debug!("Reading {} as {}", loader.path().display(), encoding);
    loader
        .load(delimiter, !csv.no_header, encoding)
        .map_err(|e| CliError::load(e.to_string()))
}

pub(crate) fn run_import(
    db_path: &Path,
    rooms_csv: PathBuf,
    students_csv: PathBuf,
    csv: CsvArgs,
) -> Result<(), CliError> {
    // Parse everything up front so bad input aborts before any write.
    let rooms = load_rows(&rooms_csv, &csv, &csv.rooms_encoding)?
        .iter()
        .map(|row| Room::from_row(row))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CliError::validation(format!("{}: {}", rooms_csv.display(), e)))?;
    let students = load_rows(&students_csv, &csv, &csv.students_encoding)?
        .iter()
        .map(|row| Student::from_row(row))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CliError::validation(format!("{}: {}", students_csv.display(), e)))?;

    log::info!(
        "Running SQLite {} and {}",
        "create table".if_supports_color(Stdout, |t| t.bright_blue()),
        "insert or update".if_supports_color(Stdout, |t| t.bright_blue()),
    );

    let conn = super::open_catalog(db_path)?;

    conn.create_table::<Room>()
        .map_err(|e| CliError::database(e.to_string()))?;
    let room_stats = conn
        .insert_or_update(&rooms, ROOM_MATCH)
        .map_err(|e| CliError::database(format!("Failed to import rooms: {}", e)))?;

    conn.create_table::<Student>()
        .map_err(|e| CliError::database(e.to_string()))?;
    let student_changes = conn
        .upsert(&students, Reference::Column(STUDENT_REFERENCE))
        .map_err(|e| CliError::database(format!("Failed to import students: {}", e)))?;

    log_blank();
    log_ok(format!(
        "Rooms: {} inserted, {} updated ({} rows in table)",
        room_stats.inserted,
        room_stats.updated,
        conn.row_count::<Room>()
            .map_err(|e| CliError::database(e.to_string()))?,
    ));
    log_ok(format!(
        "Students: {} rows written ({} rows in table)",
        student_changes,
        conn.row_count::<Student>()
            .map_err(|e| CliError::database(e.to_string()))?,
    ));

    conn.close().map_err(|e| CliError::database(e.to_string()))?;
    Ok(())
}
