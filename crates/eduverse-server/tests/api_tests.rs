//! Integration tests against a real server backed by a data directory.

use std::net::SocketAddr;
use std::sync::Arc;

use eduverse_providers::FsContentProvider;
use eduverse_server::{serve_with_listener, AppState, ErrorResponse};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const ASSESSMENT: &str = r#"[
  {"id": 1, "questionText": "What is 7 x 8?", "options": ["54", "56", "58", "64"], "correctAnswer": "56"},
  {"id": 2, "questionText": "What is 9 + 6?", "options": ["14", "15", "16", "17"], "correctAnswer": "15"}
]"#;

const EXAMPLES: &str = r#"[
  {"concept": "Multiplication", "realWorldExample": "Rows of seats", "explanation": "Repeated addition"}
]"#;

/// Spawns server in background task, returns bound address
async fn spawn_server(data_dir: &std::path::Path) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::new(Arc::new(FsContentProvider::new(data_dir))));

    tokio::spawn(async move {
        let _ = serve_with_listener(listener, state).await;
    });

    addr
}

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("math_assessment.json"), ASSESSMENT).unwrap();
    std::fs::write(dir.path().join("math_examples.json"), EXAMPLES).unwrap();
    std::fs::write(dir.path().join("physics_assessment.json"), "not json").unwrap();
    dir
}

#[tokio::test]
async fn serves_subjects_from_data_directory() {
    let dir = data_dir();
    let addr = spawn_server(dir.path()).await;

    let subjects: Vec<String> = reqwest::get(format!("http://{addr}/api/subjects"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(subjects, vec!["math", "physics"]);
}

#[tokio::test]
async fn malformed_file_reports_malformed_content() {
    let dir = data_dir();
    let addr = spawn_server(dir.path()).await;

    let response = reqwest::get(format!("http://{addr}/api/assessment/physics"))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);

    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.code, "malformed_content");
}

#[tokio::test]
async fn invalid_subject_is_bad_request() {
    let dir = data_dir();
    let addr = spawn_server(dir.path()).await;

    let response = reqwest::get(format!("http://{addr}/api/examples/ma.th"))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.code, "invalid_subject");
}

#[tokio::test]
async fn perfect_score_is_excellent() {
    let dir = data_dir();
    let addr = spawn_server(dir.path()).await;

    let body: Value = reqwest::Client::new()
        .post(format!("http://{addr}/api/assessment/math/score"))
        .json(&json!({"answers": {"1": "56", "2": "15"}}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["correctCount"], 2);
    assert_eq!(body["total"], 2);
    assert_eq!(body["feedbackTier"], "excellent");
    assert_eq!(body["message"], "Excellent work!");
}
