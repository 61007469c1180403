//! CSV loading into rows of strings.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use labsql_core::{Predicate, ValidationError, validate};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parse error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A CSV file whose existence was checked at construction.
#[derive(Debug, Clone)]
pub struct DataLoader {
    path: PathBuf,
}

impl DataLoader {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        validate(Some(path.to_string_lossy().as_ref()), Predicate::ExistingDirectoryPath)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record as a row of strings.
    ///
    /// `encoding` is any WHATWG label (`utf-8`, `gbk`, `gb18030`, ...). A
    /// leading byte-order mark overrides it and is dropped. Malformed
    /// sequences decode to U+FFFD with a warning. `has_header` drops the
    /// first record.
    pub fn load(
        &self,
        delimiter: u8,
        has_header: bool,
        encoding: &str,
    ) -> Result<Vec<Vec<String>>, LoadError> {
        let path = self.path.display().to_string();
        let decoder = Encoding::for_label(encoding.trim().as_bytes())
            .ok_or_else(|| LoadError::UnsupportedEncoding(encoding.to_string()))?;

        let bytes = std::fs::read(&self.path).map_err(|e| LoadError::Io {
            path: path.clone(),
            source: e,
        })?;
        let (text, used, malformed) = decoder.decode(&bytes);
        if malformed {
            log::warn!("{} has bytes that are not valid {}", path, used.name());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| LoadError::Csv {
                path: path.clone(),
                source: e,
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        if has_header && !rows.is_empty() {
            rows.remove(0);
        }

        log::debug!("Loaded {} rows from {}", rows.len(), path);
        Ok(rows)
    }
}
