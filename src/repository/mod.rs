//! Persistence access for faculties and students.
//!
//! Both traits are implemented by [`PgRepository`] (PostgreSQL through sqlx) and
//! [`MemoryRepository`] (process-local maps, used by tests and when no database is configured).

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use crate::error::AppError;
use crate::model::{Faculty, FacultyRecord, Student, StudentRecord};
use async_trait::async_trait;

#[async_trait]
pub trait FacultyRepository: Send + Sync {
    /// Insert and return the faculty with its assigned id.
    async fn create(&self, record: FacultyRecord) -> Result<Faculty, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Faculty>, AppError>;

    /// All faculties ordered by id.
    async fn find_all(&self) -> Result<Vec<Faculty>, AppError>;

    /// Case-insensitive exact match on color, ordered by id.
    async fn find_by_color(&self, color: &str) -> Result<Vec<Faculty>, AppError>;

    /// Replace name and color. `None` when no faculty has this id.
    async fn update(&self, id: i64, record: FacultyRecord) -> Result<Option<Faculty>, AppError>;

    /// Remove one faculty and return it. Fails with a conflict while students reference it.
    async fn delete(&self, id: i64) -> Result<Option<Faculty>, AppError>;

    /// Remove every faculty and return how many were removed. Students must be cleared first.
    async fn delete_all(&self) -> Result<u64, AppError>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert and return the student with its assigned id and resolved faculty.
    async fn create(&self, record: StudentRecord) -> Result<Student, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError>;

    /// All students ordered by id.
    async fn find_all(&self) -> Result<Vec<Student>, AppError>;

    /// Students with `min <= age <= max`, ordered by id.
    async fn find_by_age_between(&self, min: i32, max: i32) -> Result<Vec<Student>, AppError>;

    /// Students referencing the faculty, ordered by id.
    async fn find_by_faculty(&self, faculty_id: i64) -> Result<Vec<Student>, AppError>;

    /// Total replacement of the stored fields, including the faculty reference.
    async fn update(&self, id: i64, record: StudentRecord) -> Result<Option<Student>, AppError>;

    async fn delete(&self, id: i64) -> Result<Option<Student>, AppError>;

    async fn delete_all(&self) -> Result<u64, AppError>;
}
