//! Student handlers: create, read, update, delete, age-range listing.

use super::common::parse_id;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{JsonBody, QueryParams};
use crate::model::{Faculty, Student, StudentInput};
use crate::service::{AgeRange, StudentService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    post,
    path = "/student",
    tag = "student",
    request_body = StudentInput,
    responses(
        (status = 200, description = "Stored student with its new id", body = Student),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 422, description = "Invalid field or unknown faculty", body = ErrorBody)
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Student>, AppError> {
    Ok(Json(StudentService::create(&state, body).await?))
}

#[utoipa::path(
    get,
    path = "/student",
    tag = "student",
    params(
        ("min" = Option<i32>, Query, description = "Lowest age, inclusive"),
        ("max" = Option<i32>, Query, description = "Highest age, inclusive")
    ),
    responses(
        (status = 200, description = "Students in the age range ordered by id", body = [Student]),
        (status = 400, description = "Bound is not an integer or min > max", body = ErrorBody)
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<Json<Vec<Student>>, AppError> {
    let range = AgeRange::from_params(&params)?;
    Ok(Json(StudentService::list(&state, range).await?))
}

#[utoipa::path(
    get,
    path = "/student/{id}",
    tag = "student",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student with its faculty", body = Student),
        (status = 404, description = "Unknown id", body = ErrorBody)
    )
)]
pub async fn read_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(StudentService::read(&state, id).await?))
}

#[utoipa::path(
    put,
    path = "/student/{id}",
    tag = "student",
    params(("id" = i64, Path, description = "Student id")),
    request_body = StudentInput,
    responses(
        (status = 200, description = "Updated student", body = Student),
        (status = 400, description = "Malformed body or id mismatch", body = ErrorBody),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 422, description = "Invalid field or unknown faculty", body = ErrorBody)
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(StudentService::update(&state, id, body).await?))
}

#[utoipa::path(
    delete,
    path = "/student/{id}",
    tag = "student",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Deleted student", body = Student),
        (status = 404, description = "Unknown id", body = ErrorBody)
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(StudentService::delete(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/student/{id}/faculty",
    tag = "student",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student's faculty", body = Faculty),
        (status = 404, description = "Unknown student or no faculty", body = ErrorBody)
    )
)]
pub async fn student_faculty(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Faculty>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(StudentService::faculty(&state, id).await?))
}
