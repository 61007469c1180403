//! Exam-room data model and CSV loading.
//!
//! Defines the `Room` and `Student` record types with their column
//! declarations and validated constructors, plus a CSV loader that turns a
//! file into rows of strings for those constructors. Persistence lives in
//! `labsql-db`.

pub mod loader;
pub mod types;

pub use loader::{DataLoader, LoadError};
pub use types::{Room, Student, parse_exam_time};
