//! Shared settings file (`~/.config/labsql/settings.toml`).
//!
//! ```toml
//! [database]
//! path = "/home/me/exams/lab1.db"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Database used when neither the CLI nor the settings file names one.
pub(crate) const DEFAULT_DATABASE: &str = "db/lab1.db";

#[derive(Debug, Default, Deserialize)]
struct Settings {
    #[serde(default)]
    database: DatabaseSettings,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSettings {
    path: Option<String>,
}

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("labsql").join("settings.toml")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. [`DEFAULT_DATABASE`], relative to the current directory
pub(crate) fn resolve_database_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_database_path() {
        return p;
    }
    PathBuf::from(DEFAULT_DATABASE)
}

fn load_database_path() -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    parse_database_path(&contents)
}

fn parse_database_path(contents: &str) -> Option<PathBuf> {
    let settings: Settings = toml::from_str(contents).ok()?;
    settings
        .database
        .path
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// The settings file as a TOML table. Missing or unparsable files read as empty.
fn read_document(path: &Path) -> toml::Table {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| contents.parse().ok())
        .unwrap_or_default()
}

/// Replace the settings file through a sibling `.tmp` file and a rename.
fn persist_document(path: &Path, doc: &toml::Table) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(doc).map_err(io::Error::other)?;
    let staged = path.with_extension("toml.tmp");
    std::fs::write(&staged, serialized)?;
    std::fs::rename(&staged, path)
}

/// Set `database.path` in `doc`, or remove it when `path` is `None`.
/// Other keys are left as they were.
fn apply_database_path(doc: &mut toml::Table, path: Option<&Path>) -> io::Result<()> {
    let section = doc
        .entry("database")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[database] in settings.toml is not a table"))?;
    match path {
        Some(p) => {
            section.insert("path".into(), p.to_string_lossy().into_owned().into());
        }
        None => {
            section.remove("path");
        }
    }
    Ok(())
}

/// Save (or clear) the database path in `settings.toml`.
pub(crate) fn save_database_path(path: Option<&Path>) -> io::Result<()> {
    let file = settings_path();
    let mut doc = read_document(&file);
    apply_database_path(&mut doc, path)?;
    persist_document(&file, &doc)
}

/// The settings file, re-serialized for display. `None` if there is nothing to show.
pub(crate) fn load_settings_string() -> Option<String> {
    let doc = read_document(&settings_path());
    if doc.is_empty() {
        return None;
    }
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_database_path() {
        let path = parse_database_path("[database]\npath = \"/tmp/exams.db\"\n");
        assert_eq!(path, Some(PathBuf::from("/tmp/exams.db")));
    }

    #[test]
    fn empty_or_missing_path_is_none() {
        assert_eq!(parse_database_path("[database]\npath = \"\"\n"), None);
        assert_eq!(parse_database_path("[other]\nkey = 1\n"), None);
        assert_eq!(parse_database_path("not toml ["), None);
    }

    #[test]
    fn database_path_update_keeps_other_keys() {
        let mut doc: toml::Table = "[database]\npath = \"old.db\"\ntimeout = 5\n\n[ui]\ncolor = true\n"
            .parse()
            .unwrap();
        apply_database_path(&mut doc, Some(Path::new("/srv/exams.db"))).unwrap();
        let text = toml::to_string_pretty(&doc).unwrap();
        assert_eq!(parse_database_path(&text), Some(PathBuf::from("/srv/exams.db")));
        assert_eq!(doc["database"]["timeout"].as_integer(), Some(5));
        assert_eq!(doc["ui"]["color"].as_bool(), Some(true));

        apply_database_path(&mut doc, None).unwrap();
        assert!(doc["database"].get("path").is_none());
    }

    #[test]
    fn database_section_must_be_a_table() {
        let mut doc: toml::Table = "database = 3\n".parse().unwrap();
        assert!(apply_database_path(&mut doc, None).is_err());
    }

    #[test]
    fn persisted_document_reads_back() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("nested").join("settings.toml");
        let mut doc = toml::Table::new();
        apply_database_path(&mut doc, Some(Path::new("lab.db"))).unwrap();
        persist_document(&file, &doc).unwrap();
        assert_eq!(read_document(&file), doc);
        assert!(!file.with_extension("toml.tmp").exists());
    }

    #[test]
    fn cli_override_wins() {
        let p = resolve_database_path(Some(PathBuf::from("x.db")));
        assert_eq!(p, PathBuf::from("x.db"));
    }
}
