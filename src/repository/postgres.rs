use super::{FacultyRepository, StudentRepository};
use crate::error::AppError;
use crate::model::{Faculty, FacultyRecord, Student, StudentRecord};
use crate::store::{qualified_table, FACULTY_TABLE, STUDENT_TABLE};
use async_trait::async_trait;
use sqlx::PgPool;

/// Student row joined with its faculty; faculty columns are null when there is none.
#[derive(sqlx::FromRow)]
struct StudentRow {
    id: i64,
    name: String,
    age: i32,
    faculty_id: Option<i64>,
    faculty_name: Option<String>,
    faculty_color: Option<String>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        let faculty = match (row.faculty_id, row.faculty_name, row.faculty_color) {
            (Some(id), Some(name), Some(color)) => Some(Faculty { id, name, color }),
            _ => None,
        };
        Student {
            id: row.id,
            name: row.name,
            age: row.age,
            faculty,
        }
    }
}

/// Repository over the `faculty` and `student` tables of one schema.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
    faculty: String,
    student: String,
}

impl PgRepository {
    /// `schema` must already be validated as a plain identifier.
    pub fn new(pool: PgPool, schema: &str) -> Self {
        Self {
            pool,
            faculty: qualified_table(schema, FACULTY_TABLE),
            student: qualified_table(schema, STUDENT_TABLE),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// `source` is a table expression or CTE name exposing id, name, age, faculty_id.
    fn student_select(&self, source: &str) -> String {
        format!(
            "SELECT s.id, s.name, s.age, f.id AS faculty_id, f.name AS faculty_name, f.color AS faculty_color \
             FROM {} s LEFT JOIN {} f ON f.id = s.faculty_id",
            source, self.faculty
        )
    }

    async fn fetch_students(&self, sql: &str, binds: &[i64]) -> Result<Vec<Student>, AppError> {
        tracing::debug!(sql = %sql, params = ?binds, "query");
        let mut query = sqlx::query_as::<_, StudentRow>(sql);
        for b in binds {
            query = query.bind(*b);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Student::from).collect())
    }
}

#[async_trait]
impl FacultyRepository for PgRepository {
    async fn create(&self, record: FacultyRecord) -> Result<Faculty, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, color) VALUES ($1, $2) RETURNING id, name, color",
            self.faculty
        );
        tracing::debug!(sql = %sql, "query");
        let faculty = sqlx::query_as::<_, Faculty>(&sql)
            .bind(&record.name)
            .bind(&record.color)
            .fetch_one(&self.pool)
            .await?;
        Ok(faculty)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Faculty>, AppError> {
        let sql = format!("SELECT id, name, color FROM {} WHERE id = $1", self.faculty);
        tracing::debug!(sql = %sql, id, "query");
        let faculty = sqlx::query_as::<_, Faculty>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(faculty)
    }

    async fn find_all(&self) -> Result<Vec<Faculty>, AppError> {
        let sql = format!("SELECT id, name, color FROM {} ORDER BY id", self.faculty);
        tracing::debug!(sql = %sql, "query");
        let faculties = sqlx::query_as::<_, Faculty>(&sql).fetch_all(&self.pool).await?;
        Ok(faculties)
    }

    async fn find_by_color(&self, color: &str) -> Result<Vec<Faculty>, AppError> {
        let sql = format!(
            "SELECT id, name, color FROM {} WHERE lower(color) = lower($1) ORDER BY id",
            self.faculty
        );
        tracing::debug!(sql = %sql, color, "query");
        let faculties = sqlx::query_as::<_, Faculty>(&sql)
            .bind(color)
            .fetch_all(&self.pool)
            .await?;
        Ok(faculties)
    }

    async fn update(&self, id: i64, record: FacultyRecord) -> Result<Option<Faculty>, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $2, color = $3 WHERE id = $1 RETURNING id, name, color",
            self.faculty
        );
        tracing::debug!(sql = %sql, id, "query");
        let faculty = sqlx::query_as::<_, Faculty>(&sql)
            .bind(id)
            .bind(&record.name)
            .bind(&record.color)
            .fetch_optional(&self.pool)
            .await?;
        Ok(faculty)
    }

    async fn delete(&self, id: i64) -> Result<Option<Faculty>, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING id, name, color", self.faculty);
        tracing::debug!(sql = %sql, id, "query");
        let faculty = sqlx::query_as::<_, Faculty>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(faculty)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {}", self.faculty);
        tracing::debug!(sql = %sql, "query");
        let done = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl StudentRepository for PgRepository {
    async fn create(&self, record: StudentRecord) -> Result<Student, AppError> {
        let sql = format!(
            "WITH written AS (INSERT INTO {} (name, age, faculty_id) VALUES ($1, $2, $3) \
             RETURNING id, name, age, faculty_id) {}",
            self.student,
            self.student_select("written")
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(&record.name)
            .bind(record.age)
            .bind(record.faculty_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        let sql = format!("{} WHERE s.id = $1", self.student_select(&self.student));
        Ok(self.fetch_students(&sql, &[id]).await?.into_iter().next())
    }

    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        let sql = format!("{} ORDER BY s.id", self.student_select(&self.student));
        self.fetch_students(&sql, &[]).await
    }

    async fn find_by_age_between(&self, min: i32, max: i32) -> Result<Vec<Student>, AppError> {
        let sql = format!(
            "{} WHERE s.age BETWEEN $1 AND $2 ORDER BY s.id",
            self.student_select(&self.student)
        );
        tracing::debug!(sql = %sql, min, max, "query");
        let rows = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(min)
            .bind(max)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn find_by_faculty(&self, faculty_id: i64) -> Result<Vec<Student>, AppError> {
        let sql = format!(
            "{} WHERE s.faculty_id = $1 ORDER BY s.id",
            self.student_select(&self.student)
        );
        self.fetch_students(&sql, &[faculty_id]).await
    }

    async fn update(&self, id: i64, record: StudentRecord) -> Result<Option<Student>, AppError> {
        let sql = format!(
            "WITH written AS (UPDATE {} SET name = $2, age = $3, faculty_id = $4 WHERE id = $1 \
             RETURNING id, name, age, faculty_id) {}",
            self.student,
            self.student_select("written")
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(id)
            .bind(&record.name)
            .bind(record.age)
            .bind(record.faculty_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Student::from))
    }

    async fn delete(&self, id: i64) -> Result<Option<Student>, AppError> {
        let sql = format!(
            "WITH written AS (DELETE FROM {} WHERE id = $1 RETURNING id, name, age, faculty_id) {}",
            self.student,
            self.student_select("written")
        );
        Ok(self.fetch_students(&sql, &[id]).await?.into_iter().next())
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {}", self.student);
        tracing::debug!(sql = %sql, "query");
        let done = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }
}
