//! HTTP handlers for faculties and students.

pub mod common;
pub mod faculty;
pub mod student;
pub use faculty::*;
pub use student::*;
