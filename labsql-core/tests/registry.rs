use labsql_core::*;

struct Pair;

impl Record for Pair {
    const TABLE: &'static str = "Pair";

    fn schema() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            ("a", ColumnDescriptor::pri()),
            ("b", ColumnDescriptor::pri()),
        ]
    }

    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }
}

struct Counters;

impl Record for Counters {
    const TABLE: &'static str = "Counters";

    fn schema() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            ("first", ColumnDescriptor::ai()),
            ("second", ColumnDescriptor::col()),
        ]
    }

    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }
}

struct Member;

impl Record for Member {
    const TABLE: &'static str = "Member";

    fn schema() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            ("id", ColumnDescriptor::pri()),
            ("registno", ColumnDescriptor::nn()),
            ("registno", ColumnDescriptor::uni()),
            ("team", ColumnDescriptor::fri("Team", "id")),
            ("age", ColumnDescriptor::col().sample(0)),
        ]
    }

    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }
}

struct Loose;

impl Record for Loose {
    const TABLE: &'static str = "Loose";

    fn schema() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            (
                "id",
                ColumnDescriptor {
                    auto_increment: true,
                    ..Default::default()
                },
            ),
            (
                "code",
                ColumnDescriptor {
                    primary_key: true,
                    ..Default::default()
                },
            ),
        ]
    }

    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }
}

struct LooseKey;

impl Record for LooseKey {
    const TABLE: &'static str = "LooseKey";

    fn schema() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![(
            "id",
            ColumnDescriptor {
                auto_increment: true,
                ..Default::default()
            },
        )]
    }

    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }
}

#[test]
fn two_primary_keys_conflict() {
    let mut registry = ColumnMetadataRegistry::new();
    let err = registry.register::<Pair>().unwrap_err();
    assert!(matches!(
        err,
        SchemaError::SchemaConflict { role: "primary key", count: 2, .. }
    ));
    assert!(!registry.is_registered::<Pair>());
}

#[test]
fn table_schema_of_reports_conflict() {
    assert!(TableSchema::of::<Pair>().is_err());
}

#[test]
fn second_autoincrement_is_rejected() {
    let mut registry = ColumnMetadataRegistry::new();
    registry.register::<Counters>().unwrap();
    let err = registry
        .declare_column::<Counters>("second", &ColumnDescriptor::ai())
        .unwrap_err();
    assert!(matches!(err, SchemaError::SchemaConflict { .. }));

    // The rejected declaration left the schema untouched.
    let second = registry.schema::<Counters>().unwrap().column("second").unwrap();
    assert!(!second.auto_increment);
    registry.validate_uniqueness::<Counters>().unwrap();
}

#[test]
fn repeated_declarations_merge() {
    let mut registry = ColumnMetadataRegistry::new();
    let schema = registry.register::<Member>().unwrap();
    assert_eq!(schema.columns().len(), 4);

    let registno = schema.column("registno").unwrap();
    assert!(registno.not_null);
    assert!(registno.unique);
    assert!(!registno.primary_key);
}

#[test]
fn register_twice_is_idempotent() {
    let mut registry = ColumnMetadataRegistry::new();
    let first = registry.register::<Member>().unwrap().clone();
    let second = registry.register::<Member>().unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn all_columns_in_declaration_order() {
    let mut registry = ColumnMetadataRegistry::new();
    registry.register::<Member>().unwrap();
    let names: Vec<_> = registry
        .all_columns::<Member>()
        .unwrap()
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, ["id", "registno", "team", "age"]);
}

#[test]
fn foreign_key_and_sample_type_are_kept() {
    let schema = TableSchema::of::<Member>().unwrap();
    let team = schema.column("team").unwrap();
    assert_eq!(
        team.foreign_key,
        Some(ForeignKey {
            table: "Team".to_string(),
            column: "id".to_string(),
        })
    );
    assert_eq!(schema.column("age").unwrap().sql_type(), ColumnType::Integer);
    assert_eq!(schema.column("team").unwrap().inferred_type, None);
}

#[test]
fn reference_column_skips_autoincrement() {
    assert_eq!(TableSchema::of::<Member>().unwrap().reference_column(), Some("id"));
    assert_eq!(TableSchema::of::<Counters>().unwrap().reference_column(), None);
}

#[test]
fn hand_built_auto_increment_implies_primary_key() {
    let mut registry = ColumnMetadataRegistry::new();
    let id = registry.register::<LooseKey>().unwrap().column("id").unwrap();
    assert!(id.auto_increment && id.primary_key && id.not_null);
    assert_eq!(id.sql_type(), ColumnType::Integer);
}

#[test]
fn hand_built_key_roles_still_conflict() {
    // `id` becomes a primary key through auto-increment, clashing with `code`.
    let mut registry = ColumnMetadataRegistry::new();
    let err = registry.register::<Loose>().unwrap_err();
    assert!(matches!(
        err,
        SchemaError::SchemaConflict { role: "primary key", count: 2, .. }
    ));
}

#[test]
fn tables_are_sorted_by_name() {
    let mut registry = ColumnMetadataRegistry::new();
    registry.register::<Member>().unwrap();
    registry.register::<Counters>().unwrap();
    let names: Vec<&str> = registry.tables().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["Counters", "Member"]);
}

#[test]
fn unregistered_type_is_an_error() {
    let registry = ColumnMetadataRegistry::new();
    assert!(matches!(
        registry.all_columns::<Member>(),
        Err(SchemaError::Unregistered(_))
    ));
}
