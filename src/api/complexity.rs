use super::helper;
use crate::AppState;
use crate::compare::compare_complexity;
use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::model::complexity::{ComplexityCase, PublicComplexity};
use crate::model::guess::ComplexityGuessResult;
use crate::payloads::guess::GuessComplexityPayload;
use crate::payloads::params::RevealParams;
use crate::response::ApiResponse;
use axum::extract::{Query, State};
use tracing::{info, instrument};

/// Today's snippet for the complexity game, without its solution.
///
/// Returns (wrapped in `ApiResponse`)
/// * `{ id, language, snippet }` (200 OK).
/// * `404 Not Found`: If no complexity case is assigned today.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state))]
pub async fn get_challenge(
    State(state): State<AppState>,
) -> Result<ApiResponse<PublicComplexity>, AppError> {
    let today = state.today();
    info!("Fetching complexity challenge for {}", today);

    let case = state.resolver.complexity(today).await?;
    Ok(ApiResponse::ok(PublicComplexity::from(&case)))
}

/// Request Body: `GuessComplexityPayload`
///
/// Returns (wrapped in `ApiResponse`)
/// * `{ correct, trend }` (200 OK).
/// * `400 Bad Request`: If the body is missing, malformed or blank.
/// * `404 Not Found`: If no complexity case is assigned today.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state, payload))]
pub async fn submit_guess(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GuessComplexityPayload>,
) -> Result<ApiResponse<ComplexityGuessResult>, AppError> {
    let today = state.today();
    info!(
        "Complexity guess '{}' submitted for {}",
        payload.guessed_complexity, today
    );

    let case = state.resolver.complexity(today).await?;
    let result = compare_complexity(payload.guessed_complexity.trim(), &case.solution);

    info!(
        "Complexity guess for {} evaluated, correct: {}",
        today, result.correct
    );
    Ok(ApiResponse::ok(result))
}

/// Query Parameters: `has_won=true`
///
/// Returns (wrapped in `ApiResponse`)
/// * `ComplexityCase`, solution and explanation included (200 OK).
/// * `403 Forbidden`: If the client has not reported a win.
/// * `404 Not Found`: If no complexity case is assigned today.
#[instrument(skip(state))]
pub async fn reveal(
    State(state): State<AppState>,
    Query(params): Query<RevealParams>,
) -> Result<ApiResponse<ComplexityCase>, AppError> {
    helper::require_win(&params, "complexity")?;

    let today = state.today();
    let case = state.resolver.complexity(today).await?;

    info!("Revealed complexity case {} for {}", case.id, today);
    Ok(ApiResponse::ok(case))
}
