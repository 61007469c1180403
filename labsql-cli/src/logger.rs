//! Console logger behind the `log` facade.
//!
//! Lines are tagged `[ok]`, `[error]`, `[warning]`, `[info]` or `[debug]`.
//! `ok` is an info record sent to the [`OK_TARGET`] target.

use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

use crate::CliError;

pub(crate) const OK_TARGET: &str = "labsql::ok";

struct CliLogger {
    level: LevelFilter,
    timestamps: bool,
    file: Option<Mutex<File>>,
}

impl CliLogger {
    fn tag(&self, record: &Record<'_>) -> String {
        let stream = if record.level() <= Level::Warn { Stderr } else { Stdout };
        match record.level() {
            Level::Error => "error".if_supports_color(stream, |t| t.red()).to_string(),
            Level::Warn => "warning"
                .if_supports_color(stream, |t| t.bright_yellow())
                .to_string(),
            Level::Info if record.target() == OK_TARGET => {
                "ok".if_supports_color(stream, |t| t.green()).to_string()
            }
            Level::Info => "info".if_supports_color(stream, |t| t.bright_blue()).to_string(),
            Level::Debug | Level::Trace => {
                "debug".if_supports_color(stream, |t| t.dimmed()).to_string()
            }
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut line = format!("[{}]", self.tag(record));
        if self.timestamps {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            line.push_str(&format!(" [{}]", now.if_supports_color(Stdout, |t| t.dimmed())));
        }
        line.push_str(&format!(" {}", record.args()));

        if record.level() <= Level::Warn {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }

        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{}", strip_ansi_escapes::strip_str(&line));
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Install the logger. `quiet` wins over `verbose`.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let file = logfile.map(File::create).transpose()?.map(Mutex::new);

    log::set_boxed_logger(Box::new(CliLogger {
        level,
        timestamps: verbose,
        file,
    }))
    .map_err(|e| CliError::other(format!("Failed to install logger: {e}")))?;
    log::set_max_level(level);
    Ok(())
}

/// Log a success line.
pub(crate) fn log_ok(msg: impl Display) {
    log::info!(target: OK_TARGET, "{msg}");
}

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
