//! Preconditions on constructor arguments.
//!
//! Constructors call [`validate`] on their raw string arguments before
//! assigning anything, so a failed check leaves no partially built value.

use std::path::Path;

use crate::error::ValidationError;

/// A named check applied to a string argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Only ASCII digits. An empty string passes.
    PureNumericString,
    /// The path exists on disk.
    ExistingDirectoryPath,
}

/// Check `value` against `predicate`. Absent values always pass.
pub fn validate(value: Option<&str>, predicate: Predicate) -> Result<(), ValidationError> {
    let Some(value) = value else {
        return Ok(());
    };
    let result = match predicate {
        Predicate::PureNumericString => pure_number(value),
        Predicate::ExistingDirectoryPath => has_dir(value),
    };
    if let Err(e) = &result {
        log::error!("{e}");
    }
    result
}

fn pure_number(s: &str) -> Result<(), ValidationError> {
    if s.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::NotPureNumber(s.to_string()))
    }
}

fn has_dir(s: &str) -> Result<(), ValidationError> {
    if Path::new(s).exists() {
        Ok(())
    } else {
        Err(ValidationError::NotADirectory(s.to_string()))
    }
}
