//! Database bootstrap: naming of the school tables, database creation and pool setup.

use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

pub const FACULTY_TABLE: &str = "faculty";
pub const STUDENT_TABLE: &str = "student";

/// Schema-qualified, quoted table name (e.g. `"school"."student"`).
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Ensure the database named in `database_url` exists; create it if not. Connects to the
/// `postgres` maintenance database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };

    let mut conn = opts.clone().database("postgres").connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Open the connection pool described by `settings`. Caller checks that a URL is configured.
pub async fn connect(database_url: &str, settings: &Settings) -> Result<PgPool, AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("student"), "\"student\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(qualified_table("school", "faculty"), "\"school\".\"faculty\"");
    }

    #[tokio::test]
    async fn rejects_unparseable_url() {
        let err = ensure_database_exists("not a url").await.unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::DatabaseUrl(_))));
    }
}
