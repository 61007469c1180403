//! Registry of column descriptors keyed by record type.
//!
//! Each record type gets one [`TableSchema`], built by merging its declared
//! columns field by field. Key-role conflicts are checked after every
//! declaration so a bad schema never becomes visible to DDL generation.

use std::any::TypeId;
use std::collections::HashMap;

use crate::column::ColumnDescriptor;
use crate::error::SchemaError;
use crate::record::Record;

/// The merged column descriptors of one table, in first-declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSchema {
    name: String,
    columns: Vec<(String, ColumnDescriptor)>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Build the schema of `R` from its declarations.
    pub fn of<R: Record>() -> Result<Self, SchemaError> {
        let mut schema = Self::new(R::TABLE);
        for (field, partial) in R::schema() {
            schema.declare(field, &partial)?;
        }
        Ok(schema)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Merge `partial` into the descriptor of `field`, creating it if absent.
    /// Implied flags are filled in, so an auto-increment column is always a
    /// non-null primary key.
    ///
    /// The merge is applied only if the result still passes
    /// [`validate_uniqueness`](Self::validate_uniqueness).
    pub fn declare(&mut self, field: &str, partial: &ColumnDescriptor) -> Result<(), SchemaError> {
        let mut candidate = self.columns.clone();
        match candidate.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => existing.merge(partial),
            None => candidate.push((field.to_string(), partial.clone().normalized())),
        }
        check_unique_roles(&self.name, &candidate)?;
        self.columns = candidate;
        Ok(())
    }

    /// Fail if more than one field is a primary key or auto-increments.
    pub fn validate_uniqueness(&self) -> Result<(), SchemaError> {
        check_unique_roles(&self.name, &self.columns)
    }

    pub fn columns(&self) -> &[(String, ColumnDescriptor)] {
        &self.columns
    }

    pub fn column(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, d)| d)
    }

    /// First field, in declaration order, that is a primary key without auto-increment.
    pub fn reference_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|(_, d)| d.primary_key && !d.auto_increment)
            .map(|(name, _)| name.as_str())
    }
}

fn check_unique_roles(
    table: &str,
    columns: &[(String, ColumnDescriptor)],
) -> Result<(), SchemaError> {
    let primary = columns.iter().filter(|(_, d)| d.primary_key).count();
    if primary > 1 {
        return Err(SchemaError::SchemaConflict {
            table: table.to_string(),
            role: "primary key",
            count: primary,
        });
    }
    let auto = columns.iter().filter(|(_, d)| d.auto_increment).count();
    if auto > 1 {
        return Err(SchemaError::SchemaConflict {
            table: table.to_string(),
            role: "autoincrement",
            count: auto,
        });
    }
    Ok(())
}

/// Process-wide column metadata, populated once at start-up.
#[derive(Debug, Default)]
pub struct ColumnMetadataRegistry {
    tables: HashMap<TypeId, TableSchema>,
}

impl ColumnMetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every column declared by `R`.
    ///
    /// Registering the same type twice merges the same flags again and
    /// leaves the schema unchanged. A conflicting type is not registered.
    pub fn register<R: Record>(&mut self) -> Result<&TableSchema, SchemaError> {
        let built = TableSchema::of::<R>().inspect_err(|e| log::error!("{e}"))?;
        if self.is_registered::<R>() {
            for (field, descriptor) in built.columns() {
                self.declare_column::<R>(field, descriptor)?;
            }
        } else {
            self.tables.insert(TypeId::of::<R>(), built);
        }
        self.schema::<R>()
    }

    /// Merge one partial descriptor into `R`'s schema.
    pub fn declare_column<R: Record>(
        &mut self,
        field: &str,
        partial: &ColumnDescriptor,
    ) -> Result<(), SchemaError> {
        let schema = self
            .tables
            .entry(TypeId::of::<R>())
            .or_insert_with(|| TableSchema::new(R::TABLE));
        if let Err(e) = schema.declare(field, partial) {
            log::error!("{e}");
            return Err(e);
        }
        Ok(())
    }

    pub fn validate_uniqueness<R: Record>(&self) -> Result<(), SchemaError> {
        self.schema::<R>()?.validate_uniqueness()
    }

    /// All field descriptors of `R`, in declaration order.
    pub fn all_columns<R: Record>(&self) -> Result<&[(String, ColumnDescriptor)], SchemaError> {
        Ok(self.schema::<R>()?.columns())
    }

    pub fn schema<R: Record>(&self) -> Result<&TableSchema, SchemaError> {
        self.tables
            .get(&TypeId::of::<R>())
            .ok_or_else(|| SchemaError::unregistered(R::TABLE))
    }

    pub fn is_registered<R: Record>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<R>())
    }

    /// Registered schemas, sorted by table name.
    pub fn tables(&self) -> Vec<&TableSchema> {
        let mut tables: Vec<_> = self.tables.values().collect();
        tables.sort_by(|a, b| a.name().cmp(b.name()));
        tables
    }
}
