use crate::AppState;
use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::model::regex::{NewRegexSolution, RegexChallenge, RegexSolution};
use crate::payloads::regex::SubmitRegexSolutionPayload;
use crate::regex_eval;
use crate::response::ApiResponse;
use axum::extract::State;
use tracing::{debug, info, instrument, warn};

/// Today's regex challenge: source text, target text and instruction.
///
/// Returns (wrapped in `ApiResponse`)
/// * `RegexChallenge` (200 OK).
/// * `404 Not Found`: If no regex challenge is assigned today.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state))]
pub async fn get_challenge(
    State(state): State<AppState>,
) -> Result<ApiResponse<RegexChallenge>, AppError> {
    let today = state.today();
    info!("Fetching regex challenge for {}", today);

    let challenge = state.resolver.regex(today).await?;
    Ok(ApiResponse::ok(challenge))
}

/// Known solutions to today's challenge, official ones first.
///
/// Returns (wrapped in `ApiResponse`)
/// * `Vec<RegexSolution>` (200 OK).
/// * `404 Not Found`: If no regex challenge is assigned today.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state))]
pub async fn get_solutions(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<RegexSolution>>, AppError> {
    let today = state.today();
    let challenge = state.resolver.regex(today).await?;

    let solutions = state.store.regex_solutions(challenge.id).await?;

    info!(
        "Fetched {} solutions for regex challenge {}",
        solutions.len(),
        challenge.id
    );
    Ok(ApiResponse::ok(solutions))
}

/// Stores a player's solution after checking it against today's challenge.
///
/// Request Body: `SubmitRegexSolutionPayload`
///
/// Returns (wrapped in `ApiResponse`)
/// * `i64`: The new solution ID (201 Created).
/// * `400 Bad Request`: If the body is missing, malformed or the pattern is blank.
/// * `404 Not Found`: If no regex challenge is assigned today.
/// * `422 Unprocessable Entity`: If the pattern is invalid or does not produce the target text.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state, payload))]
pub async fn submit_solution(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SubmitRegexSolutionPayload>,
) -> Result<ApiResponse<i64>, AppError> {
    let today = state.today();
    info!("Regex solution submitted for {}", today);
    debug!("Submit regex solution payload: {:?}", payload);

    let challenge = state.resolver.regex(today).await?;

    let evaluation = regex_eval::evaluate(
        &challenge.source_text,
        &challenge.target_text,
        &payload.pattern,
        payload.replacement.as_deref().unwrap_or_default(),
    );
    if !evaluation.is_correct {
        warn!(
            "Rejected regex solution for challenge {}: output does not match target",
            challenge.id
        );
        return Err(AppError::UnprocessableEntity(
            "The solution does not turn the source text into the target text.".to_string(),
        ));
    }

    let new_id = state
        .store
        .insert_regex_solution(NewRegexSolution {
            regex_id: challenge.id,
            pattern: payload.pattern,
            replacement: payload.replacement,
            is_official: false,
        })
        .await?;

    info!(
        "Stored regex solution {} for challenge {}",
        new_id, challenge.id
    );
    Ok(ApiResponse::created(new_id))
}
