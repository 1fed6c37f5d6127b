//! Runtime settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::fmt;

pub const DEFAULT_SCHEMA: &str = "school";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone)]
pub struct Settings {
    /// When `None` the service runs on the in-memory store.
    pub database_url: Option<String>,
    /// PostgreSQL schema holding the `faculty` and `student` tables.
    pub schema: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub body_limit: usize,
}

// Keeps credentials in DATABASE_URL out of logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("schema", &self.schema)
            .field("bind_addr", &self.bind_addr)
            .field("max_connections", &self.max_connections)
            .field("body_limit", &self.body_limit)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            schema: DEFAULT_SCHEMA.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Settings {
    /// Read `DATABASE_URL`, `SCHOOL_SCHEMA`, `BIND_ADDR`, `DB_MAX_CONNECTIONS`, `BODY_LIMIT_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Settings::default();

        let schema = get("SCHOOL_SCHEMA").unwrap_or(defaults.schema);
        if !is_plain_identifier(&schema) {
            return Err(ConfigError::Invalid {
                var: "SCHOOL_SCHEMA",
                value: schema,
                reason: "must match [A-Za-z_][A-Za-z0-9_]*".into(),
            });
        }

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "DB_MAX_CONNECTIONS",
                        value: raw,
                        reason: "must be a positive integer".into(),
                    })
                }
            },
            None => defaults.max_connections,
        };

        let body_limit = match get("BODY_LIMIT_BYTES") {
            Some(raw) => raw.parse::<usize>().map_err(|e| ConfigError::Invalid {
                var: "BODY_LIMIT_BYTES",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.body_limit,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            schema,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_connections,
            body_limit,
        })
    }
}

/// True for names that can be used unquoted as a PostgreSQL identifier.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
