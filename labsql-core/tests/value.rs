use chrono::NaiveDate;
use labsql_core::{ColumnType, SqlValue, infer_type, quote};

#[test]
fn quote_doubles_single_quotes() {
    assert_eq!(quote(&"O'Brien".into()), "'O''Brien'");
    assert_eq!(quote(&"''".into()), "''''''");
}

#[test]
fn quote_stringifies_numbers() {
    assert_eq!(quote(&SqlValue::Integer(42)), "'42'");
    assert_eq!(quote(&SqlValue::Real(1.5)), "'1.5'");
}

#[test]
fn quote_formats_dates_to_minutes() {
    let date = NaiveDate::from_ymd_opt(2004, 6, 10)
        .unwrap()
        .and_hms_opt(13, 40, 59)
        .unwrap();
    assert_eq!(quote(&date.into()), "'2004-06-10 13:40'");
}

#[test]
fn infer_type_by_value_kind() {
    assert_eq!(infer_type(&5.into()), ColumnType::Integer);
    assert_eq!(infer_type(&2.5.into()), ColumnType::Integer);
    assert_eq!(infer_type(&"x".into()), ColumnType::Text);
    assert_eq!(infer_type(&SqlValue::Null), ColumnType::Null);
}

#[test]
fn dates_infer_as_text() {
    let date = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(infer_type(&date.into()), ColumnType::Text);
}

#[test]
fn option_none_is_nullish() {
    let v: SqlValue = Option::<String>::None.into();
    assert!(v.is_nullish());
    let v: SqlValue = Some("a").into();
    assert_eq!(v.as_str(), Some("a"));
}
