//! Hogwarts school registry: REST service for faculties and students over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Faculty, Student};
pub use repository::{FacultyRepository, MemoryRepository, PgRepository, StudentRepository};
pub use routes::{app, common_routes, common_routes_with_ready, docs_routes, school_routes};
pub use service::{FacultyService, StudentService};
pub use state::AppState;
pub use store::ensure_database_exists;
