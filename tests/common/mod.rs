//! Test server harness: runs the real router on an ephemeral port over an in-memory store.

#![allow(dead_code)]

use hogwarts_school::config::DEFAULT_BODY_LIMIT;
use hogwarts_school::{app, AppState, Faculty, FacultyRepository, MemoryRepository, Student, StudentRepository};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const NAMES: &[&str] = &[
    "Harry Potter",
    "Hermione Granger",
    "Ron Weasley",
    "Draco Malfoy",
    "Luna Lovegood",
    "Neville Longbottom",
    "Cho Chang",
    "Cedric Diggory",
    "Ginny Weasley",
];

pub const HOUSES: &[(&str, &str)] = &[
    ("Gryffindor", "red"),
    ("Slytherin", "green"),
    ("Ravenclaw", "blue"),
    ("Hufflepuff", "yellow"),
    ("Durmstrang", "crimson"),
];

pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
    /// Same store the server uses; for teardown and direct assertions.
    pub repo: MemoryRepository,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_limit(DEFAULT_BODY_LIMIT).await
    }

    pub async fn start_with_limit(body_limit: usize) -> Self {
        let repo = MemoryRepository::new();
        let state = AppState::in_memory(repo.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app(state, body_limit))
                .await
                .expect("test server");
        });
        Self {
            base: format!("http://{}", addr),
            client: reqwest::Client::new(),
            repo,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.expect("GET")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client.post(self.url(path)).json(body).send().await.expect("POST")
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client.put(self.url(path)).json(body).send().await.expect("PUT")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client.delete(self.url(path)).send().await.expect("DELETE")
    }

    /// POST a faculty and check the echo: same fields, fresh id.
    pub async fn add_faculty(&self, name: &str, color: &str) -> Faculty {
        let response = self.post("/faculty", &json!({"name": name, "color": color})).await;
        assert_eq!(response.status(), StatusCode::OK);
        let faculty: Faculty = response.json().await.expect("faculty body");
        assert_eq!(faculty.name, name);
        assert_eq!(faculty.color, color);
        assert!(faculty.id > 0);
        faculty
    }

    /// POST a student and check the echo, including the nested faculty.
    pub async fn add_student(&self, name: &str, age: i32, faculty: Option<&Faculty>) -> Student {
        let body = json!({"name": name, "age": age, "faculty": faculty});
        let response = self.post("/student", &body).await;
        assert_eq!(response.status(), StatusCode::OK);
        let student: Student = response.json().await.expect("student body");
        assert_eq!(student.name, name);
        assert_eq!(student.age, age);
        assert_eq!(student.faculty.as_ref(), faculty);
        assert!(student.id > 0);
        student
    }

    /// Students first: faculties cannot go while referenced.
    pub async fn teardown(&self) {
        StudentRepository::delete_all(&self.repo).await.expect("delete students");
        FacultyRepository::delete_all(&self.repo).await.expect("delete faculties");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Deterministic ages covering 11..=17.
pub fn age_for(i: usize) -> i32 {
    11 + ((i * 5 + 3) % 7) as i32
}

pub async fn error_code(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("error body");
    body["error"]["code"].as_str().unwrap_or_default().to_string()
}
