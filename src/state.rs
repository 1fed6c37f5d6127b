//! Shared application state for all routes: one repository per entity, both backed by the same store.

use crate::repository::{FacultyRepository, MemoryRepository, PgRepository, StudentRepository};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub faculties: Arc<dyn FacultyRepository>,
    pub students: Arc<dyn StudentRepository>,
    /// Present when running on PostgreSQL; used by the readiness check.
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn postgres(pool: PgPool, schema: &str) -> Self {
        let repo = Arc::new(PgRepository::new(pool.clone(), schema));
        Self {
            faculties: repo.clone(),
            students: repo,
            pool: Some(pool),
        }
    }

    /// State over an in-memory store. Keep a clone of `repo` to reach the same data directly.
    pub fn in_memory(repo: MemoryRepository) -> Self {
        let repo = Arc::new(repo);
        Self {
            faculties: repo.clone(),
            students: repo,
            pool: None,
        }
    }

    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}
