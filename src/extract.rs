use crate::errors::AppError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use tracing::warn;
use validator::Validate;

/// `Json<T>` that also runs `T`'s validation rules. Every rejection,
/// malformed JSON included, is a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                warn!("Rejected request body: {}", rejection.body_text());
                AppError::BadRequest(rejection.body_text())
            })?;

        value.validate().map_err(|validation_errors| {
            warn!("Request body failed validation: {}", validation_errors);
            AppError::BadRequest(validation_errors.to_string())
        })?;

        Ok(ValidatedJson(value))
    }
}
