use super::helper;
use crate::AppState;
use crate::compare::compare_language;
use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::model::daily::GuessBoard;
use crate::model::guess::LanguageGuessResult;
use crate::model::language::{
    HintResponse, HintType, Language, LanguageSummary, YesterdayAnswer,
};
use crate::payloads::guess::GuessLanguagePayload;
use crate::payloads::params::{HintParams, RevealParams};
use crate::response::ApiResponse;
use axum::extract::{Query, State};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Lists every guessable language for autocomplete.
///
/// Returns (wrapped in `ApiResponse`)
/// * `Vec<LanguageSummary>`: id, name and icon, ordered by name (200 OK).
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state))]
pub async fn list_languages(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<LanguageSummary>>, AppError> {
    info!("Fetching language list");

    let languages = state.store.list_languages().await?;

    info!("Successfully fetched {} languages", languages.len());
    Ok(ApiResponse::ok(languages))
}

/// Compares a guessed language against today's language, attribute by
/// attribute, and counts the guess.
///
/// Request Body: `GuessLanguagePayload`
///
/// Returns (wrapped in `ApiResponse`)
/// * `LanguageGuessResult`: Per-attribute match flags, plus `guessCount` when the
///   count was recorded (200 OK).
/// * `400 Bad Request`: If the body is missing, malformed or blank.
/// * `404 Not Found`: If the guessed language is unknown or no language is assigned today.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state, payload))]
pub async fn submit_guess(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GuessLanguagePayload>,
) -> Result<ApiResponse<LanguageGuessResult>, AppError> {
    let today = state.today();
    info!(
        "Language guess '{}' submitted for {}",
        payload.guessed_language, today
    );

    let (guessed, target) = tokio::join!(
        helper::find_guessed_language(&state, &payload.guessed_language),
        state.resolver.language(today)
    );
    let guessed = guessed?;
    let target = target?;

    let mut result = compare_language(&guessed, &target);
    result.set_guess_count(
        state
            .aggregator
            .record(GuessBoard::Language, today, guessed.id)
            .await,
    );

    info!(
        "Language guess '{}' for {} evaluated, win: {}",
        guessed.name,
        today,
        result.is_win()
    );
    Ok(ApiResponse::ok(result))
}

/// Returns one hint about today's language.
///
/// Query Parameters: `hintType` = `nameLength` | `creators`
///
/// Returns (wrapped in `ApiResponse`)
/// * `{ nameLength }` or `{ creators }` (200 OK).
/// * `400 Bad Request`: If `hintType` is missing or not recognized.
/// * `404 Not Found`: If no language is assigned today.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state))]
pub async fn get_hint(
    State(state): State<AppState>,
    Query(params): Query<HintParams>,
) -> Result<ApiResponse<HintResponse>, AppError> {
    let raw = params.hint_type.as_deref().unwrap_or_default();
    let Some(hint) = HintType::parse(raw) else {
        warn!("Invalid hint type requested: '{}'", raw);
        return Err(AppError::BadRequest(
            "Invalid hint type. Expected 'nameLength' or 'creators'.".to_string(),
        ));
    };

    let today = state.today();
    info!("Fetching {:?} hint for {}", hint, today);

    let target = state.resolver.language(today).await?;
    Ok(ApiResponse::ok(HintResponse::for_language(hint, &target)))
}

/// Guess totals per language for today.
///
/// Returns (wrapped in `ApiResponse`)
/// * `{ language name: count }` (200 OK).
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state))]
pub async fn get_guess_counts(
    State(state): State<AppState>,
) -> Result<ApiResponse<BTreeMap<String, i64>>, AppError> {
    let today = state.today();
    let counts = state.aggregator.counts(GuessBoard::Language, today).await?;
    debug!("{} languages guessed so far on {}", counts.len(), today);
    Ok(ApiResponse::ok(counts))
}

/// Full record of today's language, for the post-win screen.
///
/// Query Parameters: `has_won=true`
///
/// Returns (wrapped in `ApiResponse`)
/// * `Language` (200 OK).
/// * `403 Forbidden`: If the client has not reported a win.
/// * `404 Not Found`: If no language is assigned today.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state))]
pub async fn reveal(
    State(state): State<AppState>,
    Query(params): Query<RevealParams>,
) -> Result<ApiResponse<Language>, AppError> {
    helper::require_win(&params, "language")?;

    let today = state.today();
    let target = state.resolver.language(today).await?;

    info!("Revealed language for {}", today);
    Ok(ApiResponse::ok(target))
}

/// Name and icon of yesterday's language. Needs no win.
///
/// Returns (wrapped in `ApiResponse`)
/// * `YesterdayAnswer` (200 OK).
/// * `404 Not Found`: If no language was assigned yesterday.
/// * `500 Internal Server Error`: If a database error occurs.
#[instrument(skip(state))]
pub async fn yesterday(
    State(state): State<AppState>,
) -> Result<ApiResponse<YesterdayAnswer>, AppError> {
    let yesterday = helper::yesterday(&state)?;
    let language = state.resolver.language(yesterday).await?;

    debug!("Yesterday's language ({}) was {}", yesterday, language.name);
    Ok(ApiResponse::ok(YesterdayAnswer::from(&language)))
}
