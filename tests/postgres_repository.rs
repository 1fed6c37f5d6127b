//! PostgreSQL repository tests. Run with `DATABASE_URL` set and `cargo test -- --ignored`.
//! Each test works in its own schema, dropped at the end.

use hogwarts_school::model::{FacultyRecord, StudentRecord};
use hogwarts_school::{
    apply_migrations, ensure_database_exists, AppError, FacultyRepository, PgRepository, StudentRepository,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

async fn repository(schema: &str) -> (PgPool, PgRepository) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for postgres tests");
    ensure_database_exists(&url).await.unwrap();
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
    sqlx::query(&format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", schema))
        .execute(&pool)
        .await
        .unwrap();
    apply_migrations(&pool, schema).await.unwrap();
    (pool.clone(), PgRepository::new(pool, schema))
}

async fn drop_schema(pool: &PgPool, schema: &str) {
    sqlx::query(&format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", schema))
        .execute(pool)
        .await
        .unwrap();
}

fn faculty(name: &str, color: &str) -> FacultyRecord {
    FacultyRecord {
        name: name.into(),
        color: color.into(),
    }
}

fn student(name: &str, age: i32, faculty_id: Option<i64>) -> StudentRecord {
    StudentRecord {
        name: name.into(),
        age,
        faculty_id,
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn student_round_trip_with_faculty() {
    let schema = "school_test_round_trip";
    let (pool, repo) = repository(schema).await;

    let house = FacultyRepository::create(&repo, faculty("Gryffindor", "red")).await.unwrap();
    let harry = StudentRepository::create(&repo, student("Harry Potter", 15, Some(house.id)))
        .await
        .unwrap();
    assert_eq!(harry.faculty.as_ref(), Some(&house));

    let fetched = StudentRepository::find_by_id(&repo, harry.id).await.unwrap().unwrap();
    assert_eq!(fetched, harry);

    let other = FacultyRepository::create(&repo, faculty("Slytherin", "green")).await.unwrap();
    let moved = StudentRepository::update(&repo, harry.id, student("Harry Potter", 16, Some(other.id)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.faculty, Some(other));
    assert_eq!(moved.age, 16);

    drop_schema(&pool, schema).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn age_range_is_inclusive() {
    let schema = "school_test_age_range";
    let (pool, repo) = repository(schema).await;

    for (i, age) in [11, 13, 14, 15, 17, 18].into_iter().enumerate() {
        StudentRepository::create(&repo, student(&format!("s{i}"), age, None)).await.unwrap();
    }
    let ages: Vec<i32> = repo
        .find_by_age_between(14, 17)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.age)
        .collect();
    assert_eq!(ages, vec![14, 15, 17]);

    drop_schema(&pool, schema).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn referenced_faculty_delete_is_a_conflict() {
    let schema = "school_test_restrict";
    let (pool, repo) = repository(schema).await;

    let house = FacultyRepository::create(&repo, faculty("Ravenclaw", "blue")).await.unwrap();
    StudentRepository::create(&repo, student("Luna Lovegood", 14, Some(house.id)))
        .await
        .unwrap();

    let err = FacultyRepository::delete(&repo, house.id).await.unwrap_err();
    assert_eq!(err.status_and_code().1, "conflict");
    assert!(matches!(err, AppError::Db(_)));

    assert_eq!(StudentRepository::delete_all(&repo).await.unwrap(), 1);
    assert_eq!(FacultyRepository::delete_all(&repo).await.unwrap(), 1);
    assert!(StudentRepository::find_all(&repo).await.unwrap().is_empty());
    assert!(FacultyRepository::find_all(&repo).await.unwrap().is_empty());

    drop_schema(&pool, schema).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn migrations_are_idempotent() {
    let schema = "school_test_idempotent";
    let (pool, _repo) = repository(schema).await;
    apply_migrations(&pool, schema).await.unwrap();
    drop_schema(&pool, schema).await;
}
