//! OpenAPI document for the school API, served at `/openapi.json`.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers;
use crate::model::{Faculty, FacultyInput, FacultyRef, Student, StudentInput};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Hogwarts school registry"),
    paths(
        handlers::faculty::create_faculty,
        handlers::faculty::list_faculties,
        handlers::faculty::read_faculty,
        handlers::faculty::update_faculty,
        handlers::faculty::delete_faculty,
        handlers::faculty::faculty_students,
        handlers::student::create_student,
        handlers::student::list_students,
        handlers::student::read_student,
        handlers::student::update_student,
        handlers::student::delete_student,
        handlers::student::student_faculty,
    ),
    components(schemas(Faculty, FacultyInput, Student, StudentInput, FacultyRef, ErrorBody, ErrorDetail)),
    tags(
        (name = "faculty", description = "Faculties (houses)"),
        (name = "student", description = "Students and their faculty")
    )
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi))
}
