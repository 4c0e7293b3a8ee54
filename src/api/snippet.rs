use super::helper;
use crate::AppState;
use crate::compare::compare_snippet;
use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::model::daily::GuessBoard;
use crate::model::guess::SnippetGuessResult;
use crate::model::language::YesterdayAnswer;
use crate::model::snippet::{SnippetCode, SnippetReveal};
use crate::payloads::guess::GuessLanguagePayload;
use crate::payloads::params::RevealParams;
use crate::response::ApiResponse;
use axum::extract::{Query, State};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Today's snippet, stripped of anything naming its language.
///
/// Returns (wrapped in `ApiResponse`)
/// * `{ code }` (200 OK).
/// * `404 Not Found`: If no snippet is assigned today.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state))]
pub async fn get_code(State(state): State<AppState>) -> Result<ApiResponse<SnippetCode>, AppError> {
    let today = state.today();
    info!("Fetching snippet code for {}", today);

    let snippet = state.resolver.snippet(today).await?;
    Ok(ApiResponse::ok(SnippetCode::from(&snippet)))
}

/// Checks whether the guessed language is the one today's snippet is
/// written in, and counts the guess.
///
/// Request Body: `GuessLanguagePayload`
///
/// Returns (wrapped in `ApiResponse`)
/// * `SnippetGuessResult` (200 OK).
/// * `400 Bad Request`: If the body is missing, malformed or blank.
/// * `404 Not Found`: If the guessed language is unknown or no snippet is assigned today.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state, payload))]
pub async fn submit_guess(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GuessLanguagePayload>,
) -> Result<ApiResponse<SnippetGuessResult>, AppError> {
    let today = state.today();
    info!(
        "Snippet guess '{}' submitted for {}",
        payload.guessed_language, today
    );

    let (guessed, snippet) = tokio::join!(
        helper::find_guessed_language(&state, &payload.guessed_language),
        state.resolver.snippet(today)
    );
    let guessed = guessed?;
    let snippet = snippet?;

    let mut result = compare_snippet(&guessed, &snippet);
    result.set_guess_count(
        state
            .aggregator
            .record(GuessBoard::Snippet, today, guessed.id)
            .await,
    );

    info!(
        "Snippet guess '{}' for {} evaluated, win: {}",
        guessed.name,
        today,
        result.is_win()
    );
    Ok(ApiResponse::ok(result))
}

#[instrument(skip(state))]
pub async fn get_guess_counts(
    State(state): State<AppState>,
) -> Result<ApiResponse<BTreeMap<String, i64>>, AppError> {
    let today = state.today();
    let counts = state.aggregator.counts(GuessBoard::Snippet, today).await?;
    debug!("{} snippet languages guessed so far on {}", counts.len(), today);
    Ok(ApiResponse::ok(counts))
}

/// Today's snippet together with its language.
///
/// Query Parameters: `has_won=true`
///
/// Returns (wrapped in `ApiResponse`)
/// * `{ snippet, language }` (200 OK).
/// * `403 Forbidden`: If the client has not reported a win.
/// * `404 Not Found`: If no snippet is assigned today.
/// * `500 Internal Server Error`: If the snippet's language is missing or a database error occurs.
#[instrument(skip(state))]
pub async fn reveal(
    State(state): State<AppState>,
    Query(params): Query<RevealParams>,
) -> Result<ApiResponse<SnippetReveal>, AppError> {
    helper::require_win(&params, "snippet")?;

    let today = state.today();
    let snippet = state.resolver.snippet(today).await?;
    let language = state.resolver.snippet_language(today, &snippet).await?;

    info!("Revealed snippet {} for {}", snippet.id, today);
    Ok(ApiResponse::ok(SnippetReveal { snippet, language }))
}

/// The language yesterday's snippet was written in.
///
/// Returns (wrapped in `ApiResponse`)
/// * `YesterdayAnswer` (200 OK).
/// * `404 Not Found`: If no snippet was assigned yesterday.
/// * `500 Internal Server Error`: If a database error occurs or the snippet's
///   language is missing.
#[instrument(skip(state))]
pub async fn yesterday(
    State(state): State<AppState>,
) -> Result<ApiResponse<YesterdayAnswer>, AppError> {
    let yesterday = helper::yesterday(&state)?;
    let snippet = state.resolver.snippet(yesterday).await?;
    let language = state.resolver.snippet_language(yesterday, &snippet).await?;

    debug!("Yesterday's snippet ({}) was written in {}", yesterday, language.name);
    Ok(ApiResponse::ok(YesterdayAnswer::from(&language)))
}
