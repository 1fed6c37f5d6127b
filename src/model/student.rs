use super::Faculty;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored student with its faculty resolved. `faculty` serializes as `null` when unset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub faculty: Option<Faculty>,
}

/// Body of `POST /student` and `PUT /student/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, ToSchema)]
pub struct StudentInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub faculty: Option<FacultyRef>,
}

/// Embedded faculty in a student body. Only `id` is read; name and color are taken from storage.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, ToSchema)]
pub struct FacultyRef {
    #[serde(default)]
    pub id: Option<i64>,
}

/// Student fields as written to storage: the association is just the foreign key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: String,
    pub age: i32,
    pub faculty_id: Option<i64>,
}
