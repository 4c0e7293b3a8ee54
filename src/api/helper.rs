use crate::AppState;
use crate::errors::AppError;
use crate::model::language::Language;
use crate::payloads::params::RevealParams;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Looks up a guessed language by name. Unknown names are a client error
/// and are reported before any comparison or counting happens.
pub(super) async fn find_guessed_language(
    state: &AppState,
    name: &str,
) -> Result<Language, AppError> {
    match state.store.language_by_name(name).await? {
        Some(language) => {
            debug!("Guess '{}' resolved to language id {}", name, language.id);
            Ok(language)
        }
        None => {
            warn!("Guess for unknown candidate '{}'", name);
            Err(AppError::NotFound(format!(
                "Unknown candidate: {}",
                name.trim()
            )))
        }
    }
}

pub(super) fn require_win(params: &RevealParams, game: &str) -> Result<(), AppError> {
    if params.has_won() {
        return Ok(());
    }
    warn!("Reveal of today's {} requested before a win", game);
    Err(AppError::Forbidden(format!(
        "Today's {} answer is revealed only after winning.",
        game
    )))
}

pub(super) fn yesterday(state: &AppState) -> Result<NaiveDate, AppError> {
    state
        .today()
        .pred_opt()
        .ok_or_else(|| AppError::NotFound("There is no previous game day.".to_string()))
}
