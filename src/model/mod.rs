//! Entities returned by the API and the records repositories persist.

mod faculty;
mod student;

pub use faculty::{Faculty, FacultyInput, FacultyRecord};
pub use student::{FacultyRef, Student, StudentInput, StudentRecord};
