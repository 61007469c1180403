//! Upsert, insert-or-update, and equality selects over record instances.
//!
//! Statement builders are pure functions over field lists; the executors
//! below them resolve references against a [`TableSchema`] and run the
//! statements one instance at a time. Nullish fields never appear in a
//! generated statement.

use labsql_core::{Field, Record, TableSchema, quote};
use rusqlite::Connection;

use crate::backend;
use crate::error::DbError;
use crate::row::Row;

/// How an upsert detects a pre-existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    /// Plain insert, no conflict handling.
    None,
    /// Resolve conflicts on this column.
    Column(&'a str),
    /// Use the table's primary key, skipping auto-increment keys.
    AutoDetect,
}

/// Per-call counts from [`insert_or_update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertOrUpdateStats {
    pub inserted: usize,
    pub updated: usize,
}

fn present(fields: &[Field]) -> impl Iterator<Item = &Field> {
    fields.iter().filter(|f| !f.is_nullish())
}

fn equalities<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Vec<String> {
    fields
        .into_iter()
        .map(|f| format!("`{}`={}", f.name, quote(&f.value)))
        .collect()
}

/// Resolve the reference column an upsert should use.
pub fn resolve_reference<'a>(
    schema: &'a TableSchema,
    reference: Reference<'a>,
) -> Result<Option<&'a str>, DbError> {
    match reference {
        Reference::None => Ok(None),
        Reference::Column(name) => Ok(Some(name)),
        Reference::AutoDetect => match schema.reference_column() {
            Some(name) => Ok(Some(name)),
            None => {
                let msg = format!(
                    "upsert into {} requested auto-detection but no non-autoincrement primary key exists",
                    schema.name()
                );
                log::error!("{msg}");
                Err(DbError::reference(msg))
            }
        },
    }
}

/// Build the insert (and conflict clause) for one instance.
///
/// With a reference column the statement becomes
/// `insert ... on conflict (ref) do update set (cols)=(vals) where (ref=val)`,
/// where `cols` excludes the reference itself. If nothing but the reference
/// is set, a conflict does nothing.
pub fn upsert_sql(table: &str, fields: &[Field], reference: Option<&str>) -> Result<String, DbError> {
    let set: Vec<&Field> = present(fields).collect();

    let reference = match reference {
        Some(name) => match set.iter().position(|f| f.name == name) {
            Some(pos) => Some((name, pos)),
            None => {
                let msg = format!("upsert failed for not providing {name}'s value in the instance");
                log::error!("{msg}");
                return Err(DbError::reference(msg));
            }
        },
        None => None,
    };

    if set.is_empty() {
        return Ok(format!("insert into {table} default values;"));
    }

    let columns: Vec<String> = set.iter().map(|f| format!("`{}`", f.name)).collect();
    let values: Vec<String> = set.iter().map(|f| quote(&f.value)).collect();
    let mut sql = format!(
        "insert into {table} ({}) values ({})",
        columns.join(","),
        values.join(",")
    );

    if let Some((name, pos)) = reference {
        let rest_columns: Vec<&str> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pos)
            .map(|(_, c)| c.as_str())
            .collect();
        if rest_columns.is_empty() {
            sql.push_str(&format!(" on conflict (`{name}`) do nothing"));
        } else {
            let rest_values: Vec<&str> = values
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != pos)
                .map(|(_, v)| v.as_str())
                .collect();
            sql.push_str(&format!(
                " on conflict (`{name}`) do update set ({})=({}) where (`{name}`={})",
                rest_columns.join(","),
                rest_values.join(","),
                values[pos]
            ));
        }
    }

    sql.push(';');
    Ok(sql)
}

/// Build `select <columns|*> from table [where f=v and ...]`.
pub fn select_sql(table: &str, filters: &[Field], columns: &[&str]) -> String {
    let selector = if columns.is_empty() {
        "*".to_string()
    } else {
        format!("`{}`", columns.join("`,`"))
    };
    let mut sql = format!("select {selector} from {table}");
    let conditions = equalities(present(filters));
    if !conditions.is_empty() {
        sql.push_str(" where ");
        sql.push_str(&conditions.join(" and "));
    }
    sql.push(';');
    sql
}

/// Build `update table set f=v, ... where (k=v and ...)`.
///
/// Every non-null field is written, including the match fields.
pub fn update_sql(table: &str, fields: &[Field], filters: &[Field]) -> String {
    format!(
        "update {table} set {} where ({});",
        equalities(present(fields)).join(","),
        equalities(filters).join(" and ")
    )
}

/// Pick the match fields out of an instance. Each must carry a value.
fn match_filters(fields: &[Field], match_fields: &[&str]) -> Result<Vec<Field>, DbError> {
    if match_fields.is_empty() {
        return Err(DbError::reference("insert_or_update needs at least one match field"));
    }
    match_fields
        .iter()
        .map(|name| {
            present(fields)
                .find(|f| f.name == *name)
                .cloned()
                .ok_or_else(|| {
                    let msg = format!("instance has no value for match field {name}");
                    log::error!("{msg}");
                    DbError::reference(msg)
                })
        })
        .collect()
}

/// Insert every instance, resolving conflicts on the reference column.
///
/// Returns the total number of changed rows. An empty slice does nothing.
pub fn upsert<R: Record>(
    conn: &Connection,
    schema: &TableSchema,
    instances: &[R],
    reference: Reference<'_>,
) -> Result<usize, DbError> {
    if instances.is_empty() {
        return Ok(0);
    }
    let reference = resolve_reference(schema, reference)?;
    let mut changes = 0;
    for instance in instances {
        let sql = upsert_sql(schema.name(), &instance.fields(), reference)?;
        changes += backend::run(conn, &sql)?;
    }
    Ok(changes)
}

/// Two-step write: select on the match fields, then insert if nothing
/// matched or update every matching row otherwise.
pub fn insert_or_update<R: Record>(
    conn: &Connection,
    schema: &TableSchema,
    instances: &[R],
    match_fields: &[&str],
) -> Result<InsertOrUpdateStats, DbError> {
    let mut stats = InsertOrUpdateStats::default();
    for instance in instances {
        let fields = instance.fields();
        let filters = match_filters(&fields, match_fields)?;
        let existing = backend::all(conn, &select_sql(schema.name(), &filters, &[]))?;
        if existing.is_empty() {
            let sql = upsert_sql(schema.name(), &fields, None)?;
            stats.inserted += backend::run(conn, &sql)?;
        } else {
            let sql = update_sql(schema.name(), &fields, &filters);
            stats.updated += backend::run(conn, &sql)?;
        }
    }
    Ok(stats)
}

/// Rows whose columns equal every non-null field of `instance`.
///
/// An instance with no fields set matches every row. `columns` limits the
/// returned columns; empty means all.
pub fn select_all_when_property_equal<R: Record>(
    conn: &Connection,
    schema: &TableSchema,
    instance: &R,
    columns: &[&str],
) -> Result<Vec<Row>, DbError> {
    backend::all(conn, &select_sql(schema.name(), &instance.fields(), columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<Field> {
        vec![
            Field::new("id", Option::<i64>::None),
            Field::new("registno", "0358100"),
            Field::new("name", "O'Brien"),
        ]
    }

    #[test]
    fn plain_insert_skips_null_fields() {
        let sql = upsert_sql("Student", &fields(), None).unwrap();
        assert_eq!(
            sql,
            "insert into Student (`registno`,`name`) values ('0358100','O''Brien');"
        );
    }

    #[test]
    fn conflict_clause_excludes_reference() {
        let sql = upsert_sql("Student", &fields(), Some("registno")).unwrap();
        assert_eq!(
            sql,
            "insert into Student (`registno`,`name`) values ('0358100','O''Brien') \
             on conflict (`registno`) do update set (`name`)=('O''Brien') \
             where (`registno`='0358100');"
        );
    }

    #[test]
    fn reference_only_does_nothing_on_conflict() {
        let only = vec![Field::new("registno", "1")];
        let sql = upsert_sql("Student", &only, Some("registno")).unwrap();
        assert!(sql.ends_with("on conflict (`registno`) do nothing;"));
    }

    #[test]
    fn missing_reference_value_fails() {
        let err = upsert_sql("Student", &fields(), Some("id")).unwrap_err();
        assert!(matches!(err, DbError::ReferenceResolution(_)));
    }

    #[test]
    fn select_without_filters_has_no_where() {
        let none = vec![Field::new("a", Option::<String>::None)];
        assert_eq!(select_sql("T", &none, &[]), "select * from T;");
        assert_eq!(select_sql("T", &[], &["id", "name"]), "select `id`,`name` from T;");
    }

    #[test]
    fn update_writes_every_present_field() {
        let filters = vec![Field::new("registno", "0358100")];
        assert_eq!(
            update_sql("Student", &fields(), &filters),
            "update Student set `registno`='0358100',`name`='O''Brien' where (`registno`='0358100');"
        );
    }

    #[test]
    fn match_fields_must_be_set() {
        assert!(match_filters(&fields(), &["id"]).is_err());
        assert!(match_filters(&fields(), &[]).is_err());
        assert_eq!(match_filters(&fields(), &["name"]).unwrap().len(), 1);
    }
}
