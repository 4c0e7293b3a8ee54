use super::validate_not_blank;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Debug, Validate)]
pub struct SubmitRegexSolutionPayload {
    #[validate(
        length(min = 1, max = 1000, message = "pattern must be between 1 and 1000 characters"),
        custom(function = validate_not_blank, message = "pattern must not be blank")
    )]
    pub pattern: String,

    /// Absent means "delete every match".
    #[validate(length(max = 1000, message = "replacement must be at most 1000 characters"))]
    pub replacement: Option<String>,
}
