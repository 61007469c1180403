//! Per-field column descriptors.
//!
//! A descriptor carries the structural properties of one column. The
//! shorthand constructors mirror the usual field annotations (`nn`, `pri`,
//! `ai`, `uni`, `fri`, `col`) and can be merged together when a field
//! carries more than one of them.

use std::fmt;

use crate::value::{SqlValue, infer_type};

/// Storage type of a column. Nothing beyond these three is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnType {
    Integer,
    #[default]
    Text,
    Null,
}

impl ColumnType {
    /// SQL keyword used in generated DDL.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Target of a foreign-key column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
}

/// Structural metadata attached to one field of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnDescriptor {
    pub not_null: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub unique: bool,
    pub foreign_key: Option<ForeignKey>,
    /// Storage type inferred from a representative value, if one was sampled.
    pub inferred_type: Option<ColumnType>,
}

impl ColumnDescriptor {
    /// A plain column with no constraints.
    pub fn col() -> Self {
        Self::default()
    }

    /// Not null.
    pub fn nn() -> Self {
        Self {
            not_null: true,
            ..Self::default()
        }
    }

    /// Primary key. Implies not null.
    pub fn pri() -> Self {
        Self {
            primary_key: true,
            not_null: true,
            ..Self::default()
        }
    }

    /// Auto-increment primary key. Implies primary key and not null.
    pub fn ai() -> Self {
        Self {
            auto_increment: true,
            primary_key: true,
            not_null: true,
            ..Self::default()
        }
    }

    /// Unique.
    pub fn uni() -> Self {
        Self {
            unique: true,
            ..Self::default()
        }
    }

    /// Foreign key referencing `table(column)`.
    pub fn fri(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            foreign_key: Some(ForeignKey {
                table: table.into(),
                column: column.into(),
            }),
            ..Self::default()
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set the inferred storage type from a representative value.
    pub fn sample(mut self, value: impl Into<SqlValue>) -> Self {
        self.inferred_type = Some(infer_type(&value.into()));
        self
    }

    /// Merge another partial descriptor into this one.
    ///
    /// Flags are OR-ed; a foreign key or a sampled type on `other` replaces
    /// the current one. The result is [`normalized`](Self::normalized).
    pub fn merge(&mut self, other: &ColumnDescriptor) {
        self.not_null |= other.not_null;
        self.primary_key |= other.primary_key;
        self.auto_increment |= other.auto_increment;
        self.unique |= other.unique;
        if other.foreign_key.is_some() {
            self.foreign_key = other.foreign_key.clone();
        }
        if other.inferred_type.is_some() {
            self.inferred_type = other.inferred_type;
        }
        self.normalize();
    }

    /// Apply the implied flags: auto-increment makes a primary key, and a
    /// primary key is never null.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    fn normalize(&mut self) {
        self.primary_key |= self.auto_increment;
        self.not_null |= self.primary_key;
    }

    /// The type emitted in DDL. Primary keys are always integer; unsampled
    /// columns are text.
    pub fn sql_type(&self) -> ColumnType {
        if self.primary_key {
            ColumnType::Integer
        } else {
            self.inferred_type.unwrap_or_default()
        }
    }
}
