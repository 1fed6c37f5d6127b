use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored faculty (house).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Faculty {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// Body of `POST /faculty` and `PUT /faculty/{id}`. `id` is optional and never written.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, ToSchema)]
pub struct FacultyInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub color: String,
}

/// Faculty fields as written to storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacultyRecord {
    pub name: String,
    pub color: String,
}

impl From<FacultyInput> for FacultyRecord {
    fn from(input: FacultyInput) -> Self {
        Self {
            name: input.name,
            color: input.color,
        }
    }
}

impl Faculty {
    pub fn from_record(id: i64, record: FacultyRecord) -> Self {
        Self {
            id,
            name: record.name,
            color: record.color,
        }
    }
}
