//! Faculty and student CRUD routes.

use crate::handlers::{
    create_faculty, create_student, delete_faculty, delete_student, faculty_students, list_faculties,
    list_students, read_faculty, read_student, student_faculty, update_faculty, update_student,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn school_routes(state: AppState) -> Router {
    Router::new()
        .route("/faculty", get(list_faculties).post(create_faculty))
        .route(
            "/faculty/:id",
            get(read_faculty).put(update_faculty).delete(delete_faculty),
        )
        .route("/faculty/:id/students", get(faculty_students))
        .route("/student", get(list_students).post(create_student))
        .route(
            "/student/:id",
            get(read_student).put(update_student).delete(delete_student),
        )
        .route("/student/:id/faculty", get(student_faculty))
        .with_state(state)
}
