use super::validate_not_blank;
use serde::Deserialize;
use validator::Validate;

/// Body of a language or snippet guess.
#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuessLanguagePayload {
    #[validate(
        length(min = 1, max = 100, message = "guessedLanguage must be between 1 and 100 characters"),
        custom(function = validate_not_blank, message = "guessedLanguage must not be blank")
    )]
    pub guessed_language: String,
}

#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuessComplexityPayload {
    #[validate(
        length(min = 1, max = 32, message = "guessedComplexity must be between 1 and 32 characters"),
        custom(function = validate_not_blank, message = "guessedComplexity must not be blank")
    )]
    pub guessed_complexity: String,
}
