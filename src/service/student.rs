use super::validation::{FieldKind, FieldRule, RequestValidator, ValidationRule};
use super::{check_body_id, into_input};
use crate::error::AppError;
use crate::model::{Faculty, FacultyRef, Student, StudentInput, StudentRecord};
use crate::state::AppState;
use serde_json::Value;
use std::collections::HashMap;

pub const STUDENT_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        rule: ValidationRule {
            required: true,
            kind: Some(FieldKind::String),
            max_length: Some(255),
            pattern: Some(r"\S"),
            pattern_hint: Some("not be blank"),
            ..ValidationRule::NONE
        },
    },
    FieldRule {
        field: "age",
        rule: ValidationRule {
            required: true,
            kind: Some(FieldKind::Integer),
            minimum: Some(0),
            ..ValidationRule::NONE
        },
    },
    FieldRule {
        field: "faculty",
        rule: ValidationRule {
            kind: Some(FieldKind::Object),
            ..ValidationRule::NONE
        },
    },
];

/// Inclusive age bounds from `?min=&max=`. A missing bound does not restrict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgeRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl AgeRange {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let bound = |key: &str| -> Result<Option<i32>, AppError> {
            match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
                Some(raw) => raw
                    .parse::<i32>()
                    .map(Some)
                    .map_err(|_| AppError::BadRequest(format!("{} must be an integer, got '{}'", key, raw))),
                None => Ok(None),
            }
        };
        let range = Self {
            min: bound("min")?,
            max: bound("max")?,
        };
        if let (Some(min), Some(max)) = (range.min, range.max) {
            if min > max {
                return Err(AppError::BadRequest(format!(
                    "min ({}) must not be greater than max ({})",
                    min, max
                )));
            }
        }
        Ok(range)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min.unwrap_or(i32::MIN), self.max.unwrap_or(i32::MAX))
    }
}

pub struct StudentService;

impl StudentService {
    pub async fn create(state: &AppState, body: Value) -> Result<Student, AppError> {
        let input = Self::parse(body)?;
        let record = Self::record(state, input).await?;
        let student = state.students.create(record).await?;
        tracing::info!(id = student.id, faculty_id = ?student.faculty.as_ref().map(|f| f.id), "student created");
        Ok(student)
    }

    pub async fn read(state: &AppState, id: i64) -> Result<Student, AppError> {
        state
            .students
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("student {}", id)))
    }

    /// Total replacement: a body without `faculty` clears the association.
    pub async fn update(state: &AppState, id: i64, body: Value) -> Result<Student, AppError> {
        let input = Self::parse(body)?;
        check_body_id(id, input.id)?;
        let record = Self::record(state, input).await?;
        let student = state
            .students
            .update(id, record)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
        tracing::info!(id, faculty_id = ?student.faculty.as_ref().map(|f| f.id), "student updated");
        Ok(student)
    }

    pub async fn delete(state: &AppState, id: i64) -> Result<Student, AppError> {
        let student = state
            .students
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
        tracing::info!(id, "student deleted");
        Ok(student)
    }

    pub async fn list(state: &AppState, range: AgeRange) -> Result<Vec<Student>, AppError> {
        if range.is_unbounded() {
            return state.students.find_all().await;
        }
        let (min, max) = range.bounds();
        state.students.find_by_age_between(min, max).await
    }

    pub async fn faculty(state: &AppState, id: i64) -> Result<Faculty, AppError> {
        Self::read(state, id)
            .await?
            .faculty
            .ok_or_else(|| AppError::NotFound(format!("faculty of student {}", id)))
    }

    fn parse(body: Value) -> Result<StudentInput, AppError> {
        let map = RequestValidator::validate_object(body, STUDENT_RULES)?;
        if let Some(Value::Object(reference)) = map.get("faculty") {
            match reference.get("id") {
                None | Some(Value::Null) => {
                    return Err(AppError::validation("faculty.id", "faculty.id is required"));
                }
                Some(id) if id.as_i64().is_none() => {
                    return Err(AppError::validation("faculty.id", "faculty.id must be an integer"));
                }
                Some(_) => {}
            }
        }
        into_input(map)
    }

    async fn record(state: &AppState, input: StudentInput) -> Result<StudentRecord, AppError> {
        let faculty_id = Self::resolve_faculty(state, input.faculty).await?;
        Ok(StudentRecord {
            name: input.name,
            age: input.age,
            faculty_id,
        })
    }

    /// The embedded faculty is a reference by id; it must name a stored faculty.
    async fn resolve_faculty(state: &AppState, reference: Option<FacultyRef>) -> Result<Option<i64>, AppError> {
        let Some(reference) = reference else {
            return Ok(None);
        };
        let Some(id) = reference.id else {
            return Err(AppError::validation("faculty.id", "faculty.id is required"));
        };
        match state.faculties.find_by_id(id).await? {
            Some(faculty) => Ok(Some(faculty.id)),
            None => Err(AppError::validation(
                "faculty.id",
                format!("faculty {} does not exist", id),
            )),
        }
    }
}
