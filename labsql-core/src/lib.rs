//! Column metadata, SQL value encoding, and the record contract.
//!
//! This crate holds everything the mapping layer knows about a record type
//! without touching a database: per-field column descriptors, the registry
//! that accumulates them, literal quoting, and constructor-argument
//! validation. `labsql-db` consumes these to generate and execute SQL.

pub mod column;
pub mod error;
pub mod record;
pub mod registry;
pub mod validate;
pub mod value;

pub use column::{ColumnDescriptor, ColumnType, ForeignKey};
pub use error::{SchemaError, ValidationError};
pub use record::{Field, Record};
pub use registry::{ColumnMetadataRegistry, TableSchema};
pub use validate::{Predicate, validate};
pub use value::{DATE_FORMAT, SqlValue, infer_type, quote};
