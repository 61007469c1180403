use chrono::NaiveDate;
use labsql_catalog::{Room, Student, parse_exam_time};
use labsql_core::{Record, SqlValue, TableSchema, ValidationError};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

#[test]
fn room_from_row_parses_time_and_blank_paper() {
    let room = Room::from_row(&row(&["01", "2", "3", "Hall", "2004-06-10  13:40", ""])).unwrap();
    assert_eq!(room.kdno.as_deref(), Some("01"));
    assert_eq!(
        room.exptime,
        NaiveDate::from_ymd_opt(2004, 6, 10).unwrap().and_hms_opt(13, 40, 0)
    );
    assert_eq!(room.papername, None);
    assert_eq!(room.id, None);
}

#[test]
fn room_rejects_non_numeric_code() {
    let err = Room::new(Some("0a"), None, None, None, None, None).unwrap_err();
    assert!(matches!(err, ValidationError::NotPureNumber(_)));
}

#[test]
fn room_rejects_bad_time() {
    let err = Room::new(None, None, None, None, Some("tomorrow"), None).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidDate(_)));
}

#[test]
fn exam_time_accepts_date_only() {
    let t = parse_exam_time("2004/06/10").unwrap();
    assert_eq!(t, NaiveDate::from_ymd_opt(2004, 6, 10).unwrap().and_hms_opt(0, 0, 0).unwrap());
}

#[test]
fn empty_room_has_only_null_fields() {
    let room = Room::new(None, None, None, None, None, None).unwrap();
    assert!(room.fields().iter().all(|f| f.is_nullish()));
}

#[test]
fn student_rejects_non_numeric_registno() {
    assert!(Student::new(Some("A1"), Some("Ann"), None, None, None, None).is_err());
}

#[test]
fn student_fields_follow_declaration_order() {
    let s = Student::from_row(&row(&["0358100", "Ann", "01", "2", "1", "12"])).unwrap();
    let names: Vec<_> = s.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["id", "registno", "name", "kdno", "kcno", "ccno", "seat"]);
    assert_eq!(s.value_of("seat"), SqlValue::Text("12".to_string()));
}

#[test]
fn schemas_are_consistent() {
    let room = TableSchema::of::<Room>().unwrap();
    assert!(room.column("id").unwrap().auto_increment);
    assert_eq!(room.reference_column(), None);

    let student = TableSchema::of::<Student>().unwrap();
    let registno = student.column("registno").unwrap();
    assert!(registno.not_null && registno.unique);
    assert_eq!(student.reference_column(), Some("id"));
}
