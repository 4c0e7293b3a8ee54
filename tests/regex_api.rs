use axum::http::StatusCode;
use devdle_server::model::regex::{NewRegexSolution, RegexChallenge, RegexSolution};
use devdle_server::response::ApiResponse;
use devdle_server::store::Store;
use serde_json::{Value, json};

mod helpers;
use helpers::{banana_challenge, server_for, setup_test_environment, test_day};

#[tokio::test]
async fn test_get_challenge() {
    let (server, _store) = setup_test_environment();

    let response = server.get("/regex/get_challenge").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let challenge = response.json::<ApiResponse<RegexChallenge>>().data.unwrap();
    assert_eq!(challenge, banana_challenge());
}

#[tokio::test]
async fn test_get_challenge_without_assignment() {
    let (_server, store) = setup_test_environment();
    let server = server_for(store, test_day().pred_opt().unwrap());

    let response = server.get("/regex/get_challenge").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: ApiResponse<Value> = response.json();
    assert!(body.status_message.contains("regex"));
}

#[tokio::test]
async fn test_submit_correct_solution() {
    let (server, _store) = setup_test_environment();

    let response = server
        .post("/regex/submit_solution")
        .json(&json!({ "pattern": "a" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: ApiResponse<i64> = response.json();
    assert_eq!(body.status_code, 201);
    let new_id = body.data.unwrap();

    let solutions = server
        .get("/regex/get_solutions")
        .await
        .json::<ApiResponse<Vec<RegexSolution>>>()
        .data
        .unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].id, new_id);
    assert_eq!(solutions[0].pattern, "a");
    assert_eq!(solutions[0].replacement, None);
    assert!(!solutions[0].is_official);
}

#[tokio::test]
async fn test_submit_solution_with_captures() {
    let (server, _store) = setup_test_environment();

    let response = server
        .post("/regex/submit_solution")
        .json(&json!({ "pattern": "a(n?)", "replacement": "$1" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_submit_solution_with_lookbehind() {
    let (server, _store) = setup_test_environment();

    let response = server
        .post("/regex/submit_solution")
        .json(&json!({ "pattern": "(?<=[bn])a", "replacement": "" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let solutions = server
        .get("/regex/get_solutions")
        .await
        .json::<ApiResponse<Vec<RegexSolution>>>()
        .data
        .unwrap();
    assert_eq!(solutions[0].pattern, "(?<=[bn])a");
}

#[tokio::test]
async fn test_submit_incorrect_solution_is_rejected() {
    let (server, _store) = setup_test_environment();

    let wrong = server
        .post("/regex/submit_solution")
        .json(&json!({ "pattern": "n" }))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let invalid = server
        .post("/regex/submit_solution")
        .json(&json!({ "pattern": "(a" }))
        .await;
    assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let solutions = server
        .get("/regex/get_solutions")
        .await
        .json::<ApiResponse<Vec<RegexSolution>>>()
        .data
        .unwrap();
    assert!(solutions.is_empty());
}

#[tokio::test]
async fn test_submit_solution_validation() {
    let (server, _store) = setup_test_environment();

    let missing = server
        .post("/regex/submit_solution")
        .json(&json!({ "replacement": "x" }))
        .await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

    let blank = server
        .post("/regex/submit_solution")
        .json(&json!({ "pattern": "" }))
        .await;
    assert_eq!(blank.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_solutions_list_official_first() {
    let (server, store) = setup_test_environment();

    server
        .post("/regex/submit_solution")
        .json(&json!({ "pattern": "a+", "replacement": "" }))
        .await;
    store
        .insert_regex_solution(NewRegexSolution {
            regex_id: 1,
            pattern: "[a]".to_string(),
            replacement: None,
            is_official: true,
        })
        .await
        .unwrap();

    let solutions = server
        .get("/regex/get_solutions")
        .await
        .json::<ApiResponse<Vec<RegexSolution>>>()
        .data
        .unwrap();
    assert_eq!(solutions.len(), 2);
    assert!(solutions[0].is_official);
    assert_eq!(solutions[0].pattern, "[a]");
    assert_eq!(solutions[1].pattern, "a+");
}
