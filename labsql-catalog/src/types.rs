//! Record types for exam rooms and students.

use chrono::{NaiveDate, NaiveDateTime};
use labsql_core::{ColumnDescriptor, Field, Predicate, Record, ValidationError, validate};

// ── Parsing helpers ─────────────────────────────────────────────────────────

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse an exam time such as `2004-06-10  13:40`.
///
/// Runs of whitespace are collapsed first; a bare date means midnight.
pub fn parse_exam_time(s: &str) -> Result<NaiveDateTime, ValidationError> {
    let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
    for fmt in DATE_TIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Ok(t);
        }
    }
    for fmt in DATE_FORMATS {
        if let Some(t) = NaiveDate::parse_from_str(&normalized, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(t);
        }
    }
    log::error!("{s} is not a valid exam time");
    Err(ValidationError::InvalidDate(s.to_string()))
}

/// Cell `i` of a CSV row, with empty or missing cells treated as absent.
fn cell(row: &[String], i: usize) -> Option<&str> {
    row.get(i).map(String::as_str).filter(|s| !s.is_empty())
}

fn owned(s: Option<&str>) -> Option<String> {
    s.map(str::to_string)
}

// ── Room ────────────────────────────────────────────────────────────────────

/// An exam sitting in a room.
///
/// Every field is optional so that a partly filled instance can serve as a
/// query template; the not-null constraints are enforced by the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Room {
    pub id: Option<i64>,
    pub kdno: Option<String>,
    pub kcno: Option<String>,
    pub ccno: Option<String>,
    pub kdname: Option<String>,
    pub exptime: Option<NaiveDateTime>,
    pub papername: Option<String>,
}

impl Room {
    /// Build a room, checking that the three codes are numeric.
    pub fn new(
        kdno: Option<&str>,
        kcno: Option<&str>,
        ccno: Option<&str>,
        kdname: Option<&str>,
        exptime: Option<&str>,
        papername: Option<&str>,
    ) -> Result<Self, ValidationError> {
        validate(kdno, Predicate::PureNumericString)?;
        validate(kcno, Predicate::PureNumericString)?;
        validate(ccno, Predicate::PureNumericString)?;
        let exptime = exptime.map(parse_exam_time).transpose()?;
        Ok(Self {
            id: None,
            kdno: owned(kdno),
            kcno: owned(kcno),
            ccno: owned(ccno),
            kdname: owned(kdname),
            exptime,
            papername: owned(papername),
        })
    }

    /// Build from a `room.csv` row: kdno, kcno, ccno, kdname, exptime, papername.
    pub fn from_row(row: &[String]) -> Result<Self, ValidationError> {
        Self::new(
            cell(row, 0),
            cell(row, 1),
            cell(row, 2),
            cell(row, 3),
            cell(row, 4),
            cell(row, 5),
        )
    }
}

impl Record for Room {
    const TABLE: &'static str = "Room";

    fn schema() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            ("id", ColumnDescriptor::ai()),
            ("kdno", ColumnDescriptor::nn()),
            ("kcno", ColumnDescriptor::nn()),
            ("ccno", ColumnDescriptor::nn()),
            ("kdname", ColumnDescriptor::nn()),
            ("exptime", ColumnDescriptor::nn()),
            ("papername", ColumnDescriptor::col()),
        ]
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("id", self.id),
            Field::new("kdno", self.kdno.clone()),
            Field::new("kcno", self.kcno.clone()),
            Field::new("ccno", self.ccno.clone()),
            Field::new("kdname", self.kdname.clone()),
            Field::new("exptime", self.exptime),
            Field::new("papername", self.papername.clone()),
        ]
    }
}

// ── Student ─────────────────────────────────────────────────────────────────

/// A student seated for an exam.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Student {
    pub id: Option<i64>,
    pub registno: Option<String>,
    pub name: Option<String>,
    pub kdno: Option<String>,
    pub kcno: Option<String>,
    pub ccno: Option<String>,
    pub seat: Option<String>,
}

impl Student {
    /// Build a student, checking that the registration number and codes are numeric.
    pub fn new(
        registno: Option<&str>,
        name: Option<&str>,
        kdno: Option<&str>,
        kcno: Option<&str>,
        ccno: Option<&str>,
        seat: Option<&str>,
    ) -> Result<Self, ValidationError> {
        validate(registno, Predicate::PureNumericString)?;
        validate(kdno, Predicate::PureNumericString)?;
        validate(kcno, Predicate::PureNumericString)?;
        validate(ccno, Predicate::PureNumericString)?;
        Ok(Self {
            id: None,
            registno: owned(registno),
            name: owned(name),
            kdno: owned(kdno),
            kcno: owned(kcno),
            ccno: owned(ccno),
            seat: owned(seat),
        })
    }

    /// Build from a `student.csv` row: registno, name, kdno, kcno, ccno, seat.
    pub fn from_row(row: &[String]) -> Result<Self, ValidationError> {
        Self::new(
            cell(row, 0),
            cell(row, 1),
            cell(row, 2),
            cell(row, 3),
            cell(row, 4),
            cell(row, 5),
        )
    }
}

impl Record for Student {
    const TABLE: &'static str = "Student";

    fn schema() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            ("id", ColumnDescriptor::pri()),
            ("registno", ColumnDescriptor::nn()),
            ("registno", ColumnDescriptor::uni()),
            ("name", ColumnDescriptor::nn()),
            ("kdno", ColumnDescriptor::nn()),
            ("kcno", ColumnDescriptor::nn()),
            ("ccno", ColumnDescriptor::nn()),
            ("seat", ColumnDescriptor::nn()),
        ]
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("id", self.id),
            Field::new("registno", self.registno.clone()),
            Field::new("name", self.name.clone()),
            Field::new("kdno", self.kdno.clone()),
            Field::new("kcno", self.kcno.clone()),
            Field::new("ccno", self.ccno.clone()),
            Field::new("seat", self.seat.clone()),
        ]
    }
}
