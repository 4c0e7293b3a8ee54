use axum::http::StatusCode;
use devdle_server::model::daily::DailyAssignment;
use devdle_server::model::guess::SnippetGuessResult;
use devdle_server::model::language::YesterdayAnswer;
use devdle_server::model::snippet::{Snippet, SnippetCode, SnippetReveal};
use devdle_server::response::ApiResponse;
use serde_json::{Value, json};
use std::collections::BTreeMap;

mod helpers;
use helpers::{RUST_ID, rust_snippet, server_for, setup_test_environment, test_day};

#[tokio::test]
async fn test_get_code_hides_language() {
    let (server, _store) = setup_test_environment();

    let response = server.get("/snippet/get_code").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"], json!({ "code": rust_snippet().code }));

    let typed: ApiResponse<SnippetCode> = server.get("/snippet/get_code").await.json();
    assert_eq!(typed.data.unwrap().code, rust_snippet().code);
}

#[tokio::test]
async fn test_submit_guess_wrong_then_right() {
    let (server, _store) = setup_test_environment();

    let wrong = server
        .post("/snippet/submit_guess")
        .json(&json!({ "guessedLanguage": "Python" }))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::OK);
    let wrong = wrong.json::<ApiResponse<SnippetGuessResult>>().data.unwrap();
    assert_eq!(wrong.language, "Python");
    assert!(!wrong.language_match);
    assert_eq!(wrong.icon, "python.svg");

    let right = server
        .post("/snippet/submit_guess")
        .json(&json!({ "guessedLanguage": "RUST" }))
        .await;
    let right = right.json::<ApiResponse<SnippetGuessResult>>().data.unwrap();
    assert!(right.is_win());
    assert_eq!(right.language, "Rust");
    assert_eq!(right.guess_count, Some(1));
    assert!(right.count_recorded);
}

#[tokio::test]
async fn test_submit_guess_survives_count_failure() {
    let (server, store) = setup_test_environment();
    store.fail_count_writes(true);

    let response = server
        .post("/snippet/submit_guess")
        .json(&json!({ "guessedLanguage": "Rust" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["languageMatch"], json!(true));
    assert!(body["data"].get("guessCount").is_none());
    assert_eq!(body["data"]["countRecorded"], json!(false));
}

#[tokio::test]
async fn test_submit_guess_unknown_and_invalid() {
    let (server, _store) = setup_test_environment();

    let unknown = server
        .post("/snippet/submit_guess")
        .json(&json!({ "guessedLanguage": "COBOL" }))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);

    let invalid = server
        .post("/snippet/submit_guess")
        .json(&json!({ "language": "Rust" }))
        .await;
    assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_snippet_counts_are_separate_from_language_counts() {
    let (server, _store) = setup_test_environment();

    server
        .post("/snippet/submit_guess")
        .json(&json!({ "guessedLanguage": "Rust" }))
        .await;
    server
        .post("/snippet/submit_guess")
        .json(&json!({ "guessedLanguage": "Java" }))
        .await;

    let snippet_counts = server
        .get("/snippet/get_guess_counts")
        .await
        .json::<ApiResponse<BTreeMap<String, i64>>>()
        .data
        .unwrap();
    assert_eq!(snippet_counts.len(), 2);
    assert_eq!(snippet_counts.get("Rust"), Some(&1));

    let language_counts = server
        .get("/language/get_guess_counts")
        .await
        .json::<ApiResponse<BTreeMap<String, i64>>>()
        .data
        .unwrap();
    assert!(language_counts.is_empty());
}

#[tokio::test]
async fn test_reveal() {
    let (server, _store) = setup_test_environment();

    let locked = server.get("/snippet/reveal").await;
    assert_eq!(locked.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .get("/snippet/reveal")
        .add_query_param("has_won", "true")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let reveal = response.json::<ApiResponse<SnippetReveal>>().data.unwrap();
    assert_eq!(reveal.snippet, rust_snippet());
    assert_eq!(reveal.language.id, RUST_ID);
    assert_eq!(reveal.language.name, "Rust");
}

fn orphan_snippet() -> Snippet {
    Snippet {
        id: 2,
        language_id: 99,
        ..rust_snippet()
    }
}

#[tokio::test]
async fn test_reveal_with_missing_language() {
    let (server, store) = setup_test_environment();
    store.add_snippet(orphan_snippet());
    store.set_daily_assignment(DailyAssignment {
        date: test_day(),
        language_id: Some(1),
        snippet_id: Some(2),
        regex_id: Some(1),
        complexity_id: Some(1),
    });

    let response = server
        .get("/snippet/reveal")
        .add_query_param("has_won", "true")
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ApiResponse<Value> = response.json();
    assert_eq!(body.status_message, "Internal Server Error");
    assert!(body.data.is_none());
}

#[tokio::test]
async fn test_yesterday_names_the_language() {
    let (_server, store) = setup_test_environment();
    let server = server_for(store, test_day().succ_opt().unwrap());

    let response = server.get("/snippet/yesterday").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"], json!({ "name": "Rust", "icon": "rust.svg" }));
}

#[tokio::test]
async fn test_yesterday_without_assignment() {
    let (server, _store) = setup_test_environment();

    let response = server.get("/snippet/yesterday").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: ApiResponse<YesterdayAnswer> = response.json();
    assert!(body.data.is_none());
}
