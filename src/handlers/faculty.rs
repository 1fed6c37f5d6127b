//! Faculty handlers: create, read, list, update, delete, members.

use super::common::parse_id;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{JsonBody, QueryParams};
use crate::model::{Faculty, FacultyInput, Student};
use crate::service::FacultyService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    post,
    path = "/faculty",
    tag = "faculty",
    request_body = FacultyInput,
    responses(
        (status = 200, description = "Stored faculty with its new id", body = Faculty),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 422, description = "Invalid field", body = ErrorBody)
    )
)]
pub async fn create_faculty(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Faculty>, AppError> {
    Ok(Json(FacultyService::create(&state, body).await?))
}

#[utoipa::path(
    get,
    path = "/faculty",
    tag = "faculty",
    params(("color" = Option<String>, Query, description = "Only faculties of this color (case-insensitive)")),
    responses((status = 200, description = "Faculties ordered by id", body = [Faculty]))
)]
pub async fn list_faculties(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> Result<Json<Vec<Faculty>>, AppError> {
    let color = params.get("color").map(String::as_str).filter(|c| !c.is_empty());
    Ok(Json(FacultyService::list(&state, color).await?))
}

#[utoipa::path(
    get,
    path = "/faculty/{id}",
    tag = "faculty",
    params(("id" = i64, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "The faculty", body = Faculty),
        (status = 404, description = "Unknown id", body = ErrorBody)
    )
)]
pub async fn read_faculty(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Faculty>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(FacultyService::read(&state, id).await?))
}

#[utoipa::path(
    put,
    path = "/faculty/{id}",
    tag = "faculty",
    params(("id" = i64, Path, description = "Faculty id")),
    request_body = FacultyInput,
    responses(
        (status = 200, description = "Updated faculty", body = Faculty),
        (status = 400, description = "Malformed body or id mismatch", body = ErrorBody),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 422, description = "Invalid field", body = ErrorBody)
    )
)]
pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Faculty>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(FacultyService::update(&state, id, body).await?))
}

#[utoipa::path(
    delete,
    path = "/faculty/{id}",
    tag = "faculty",
    params(("id" = i64, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Deleted faculty", body = Faculty),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 409, description = "Students still belong to the faculty", body = ErrorBody)
    )
)]
pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Faculty>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(FacultyService::delete(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/faculty/{id}/students",
    tag = "faculty",
    params(("id" = i64, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Students of the faculty ordered by id", body = [Student]),
        (status = 404, description = "Unknown id", body = ErrorBody)
    )
)]
pub async fn faculty_students(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Vec<Student>>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(FacultyService::students(&state, id).await?))
}
