use super::validation::{FieldKind, FieldRule, RequestValidator, ValidationRule};
use super::{check_body_id, into_input};
use crate::error::AppError;
use crate::model::{Faculty, FacultyInput, FacultyRecord, Student};
use crate::state::AppState;
use serde_json::Value;

const TEXT: ValidationRule = ValidationRule {
    required: true,
    kind: Some(FieldKind::String),
    pattern: Some(r"\S"),
    pattern_hint: Some("not be blank"),
    ..ValidationRule::NONE
};

pub const FACULTY_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        rule: ValidationRule {
            max_length: Some(255),
            ..TEXT
        },
    },
    FieldRule {
        field: "color",
        rule: ValidationRule {
            max_length: Some(64),
            ..TEXT
        },
    },
];

pub struct FacultyService;

impl FacultyService {
    pub async fn create(state: &AppState, body: Value) -> Result<Faculty, AppError> {
        let input = Self::parse(body)?;
        let faculty = state.faculties.create(FacultyRecord::from(input)).await?;
        tracing::info!(id = faculty.id, name = %faculty.name, "faculty created");
        Ok(faculty)
    }

    pub async fn read(state: &AppState, id: i64) -> Result<Faculty, AppError> {
        state
            .faculties
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("faculty {}", id)))
    }

    /// All faculties, or only those of one color (case-insensitive).
    pub async fn list(state: &AppState, color: Option<&str>) -> Result<Vec<Faculty>, AppError> {
        match color {
            Some(c) => state.faculties.find_by_color(c).await,
            None => state.faculties.find_all().await,
        }
    }

    pub async fn update(state: &AppState, id: i64, body: Value) -> Result<Faculty, AppError> {
        let input = Self::parse(body)?;
        check_body_id(id, input.id)?;
        let faculty = state
            .faculties
            .update(id, FacultyRecord::from(input))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("faculty {}", id)))?;
        tracing::info!(id, "faculty updated");
        Ok(faculty)
    }

    /// Refuses while students still belong to the faculty.
    pub async fn delete(state: &AppState, id: i64) -> Result<Faculty, AppError> {
        let members = state.students.find_by_faculty(id).await?;
        if !members.is_empty() {
            return Err(AppError::Conflict(format!(
                "faculty {} still has {} student(s)",
                id,
                members.len()
            )));
        }
        let faculty = state
            .faculties
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("faculty {}", id)))?;
        tracing::info!(id, "faculty deleted");
        Ok(faculty)
    }

    pub async fn students(state: &AppState, id: i64) -> Result<Vec<Student>, AppError> {
        Self::read(state, id).await?;
        state.students.find_by_faculty(id).await
    }

    fn parse(body: Value) -> Result<FacultyInput, AppError> {
        let map = RequestValidator::validate_object(body, FACULTY_RULES)?;
        into_input(map)
    }
}
