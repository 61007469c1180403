use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::settings;
use crate::{CliError, log_blank, log_ok};

/// Show the settings file and the database path that would be used.
pub(crate) fn run_config_show(cli_database: Option<PathBuf>) {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "labsql Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let database = settings::resolve_database_path(cli_database);
    log::info!(
        "  Database:      {}",
        database.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    if let Some(contents) = settings::load_settings_string() {
        log_blank();
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }
}

pub(crate) fn run_config_path() {
    println!("{}", settings::settings_path().display());
}

pub(crate) fn run_config_set_database(path: PathBuf) -> Result<(), CliError> {
    settings::save_database_path(Some(&path))
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log_ok(format!("Default database set to {}", path.display()));
    Ok(())
}

pub(crate) fn run_config_clear_database() -> Result<(), CliError> {
    settings::save_database_path(None)
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log_ok(format!(
        "Default database cleared (falls back to {})",
        settings::DEFAULT_DATABASE
    ));
    Ok(())
}
