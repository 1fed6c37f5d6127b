//! Validation and reference resolution between the HTTP handlers and the repositories.

mod faculty;
mod student;
mod validation;

pub use faculty::{FacultyService, FACULTY_RULES};
pub use student::{AgeRange, StudentService, STUDENT_RULES};
pub use validation::{FieldKind, FieldRule, RequestValidator, ValidationRule};

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Turn an already validated body into its typed input.
fn into_input<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(map)).map_err(|e| AppError::BadRequest(format!("invalid body: {}", e)))
}

/// A body may repeat the path id but must not contradict it.
fn check_body_id(path_id: i64, body_id: Option<i64>) -> Result<(), AppError> {
    match body_id {
        Some(b) if b != path_id => Err(AppError::BadRequest(format!(
            "body id {} does not match path id {}",
            b, path_id
        ))),
        _ => Ok(()),
    }
}
