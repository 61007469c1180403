//! `CREATE TABLE` generation from registered column metadata.

use labsql_core::TableSchema;

/// Build an idempotent `create table if not exists` statement.
///
/// Column clauses come first, in declaration order, each followed by its
/// constraints in the fixed order `primary key`, `autoincrement`,
/// `not null`, `unique`. Auto-increment columns never get `not null`
/// appended. Foreign-key clauses trail the column clauses.
///
/// A schema with no columns yields a statement the backend will reject.
pub fn create_table_sql(schema: &TableSchema) -> String {
    let mut clauses = Vec::new();
    let mut foreign = Vec::new();

    for (name, column) in schema.columns() {
        let mut clause = format!("`{name}` {}", column.sql_type());
        if column.primary_key {
            clause.push_str(" primary key");
        }
        if column.auto_increment {
            clause.push_str(" autoincrement");
        }
        if column.not_null && !column.auto_increment {
            clause.push_str(" not null");
        }
        if column.unique {
            clause.push_str(" unique");
        }
        clauses.push(clause);

        if let Some(fk) = &column.foreign_key {
            foreign.push(format!(
                "foreign key (`{name}`) references {}(`{}`)",
                fk.table, fk.column
            ));
        }
    }

    clauses.extend(foreign);
    format!(
        "create table if not exists {} ({});",
        schema.name(),
        clauses.join(", ")
    )
}
