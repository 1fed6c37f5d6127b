//! Apply the school schema: CREATE SCHEMA, tables, indexes. Every statement is idempotent.

use crate::error::AppError;
use crate::store::{qualified_table, quote_ident, FACULTY_TABLE, STUDENT_TABLE};
use sqlx::PgPool;

/// DDL statements in dependency order: schema, faculty, student (FK to faculty), indexes.
pub fn schema_statements(schema: &str) -> Vec<String> {
    let faculty = qualified_table(schema, FACULTY_TABLE);
    let student = qualified_table(schema, STUDENT_TABLE);
    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)),
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\
                id BIGSERIAL PRIMARY KEY, \
                name TEXT NOT NULL, \
                color TEXT NOT NULL)",
            faculty
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\
                id BIGSERIAL PRIMARY KEY, \
                name TEXT NOT NULL, \
                age INTEGER NOT NULL CHECK (age >= 0), \
                faculty_id BIGINT REFERENCES {} (id) ON UPDATE CASCADE ON DELETE RESTRICT)",
            student, faculty
        ),
        format!("CREATE INDEX IF NOT EXISTS student_age_idx ON {} (age)", student),
        format!("CREATE INDEX IF NOT EXISTS student_faculty_id_idx ON {} (faculty_id)", student),
    ]
}

/// Create the schema and tables if missing. Existing tables are left as they are.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    for sql in schema_statements(schema) {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(schema, "school schema ready");
    Ok(())
}
