use crate::model::daily::{GameMode, GuessBoard};
use crate::response::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use deadpool_diesel::postgres::PoolError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String), // 400

    #[error("Forbidden: {0}")]
    Forbidden(String), // 403

    #[error("Not Found: {0}")]
    NotFound(String), // 404

    #[error("Unprocessable Entity: {0}")]
    UnprocessableEntity(String), // 422

    #[error("Data Integrity Error: {0}")]
    DataIntegrity(String), // 500

    #[error("Internal Server Error: {0}")]
    InternalServerError(#[from] anyhow::Error), // 500
}

/// Failures at the data store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("database interaction error: {0}")]
    Interact(String),

    #[error("database query error: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no {mode} assignment for date {date}")]
    NotFound { mode: GameMode, date: NaiveDate },

    #[error("{mode} assignment for {date} points at missing id {id}")]
    DataIntegrity {
        mode: GameMode,
        date: NaiveDate,
        id: i64,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A guess-count upsert that did not go through. Logged, never returned to
/// the player in place of the guess result.
#[derive(Debug, Error)]
#[error("failed to record {board} guess for language {language_id} on {date}: {source}")]
pub struct AggregationWriteError {
    pub board: GuessBoard,
    pub date: NaiveDate,
    pub language_id: i64,
    #[source]
    pub source: StoreError,
}

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("progress storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored progress is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::InternalServerError(anyhow::Error::new(err).context("Data store error"))
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound { mode, date } => {
                AppError::NotFound(format!("No {} challenge for {}.", mode, date))
            }
            ResolveError::DataIntegrity { mode, date, id } => {
                AppError::DataIntegrity(format!(
                    "{} assignment for {} points at missing id {}",
                    mode, date, id
                ))
            }
            ResolveError::Store(store_err) => AppError::from(store_err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::UnprocessableEntity(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),

            AppError::DataIntegrity(detail) => {
                error!(
                    "Responding with 500 Internal Server Error. Data integrity: {}",
                    detail
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::InternalServerError(source) => {
                error!(
                    "Responding with 500 Internal Server Error. Source: {:?}",
                    source
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        ApiResponse::error(status, error_message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Clone, Default)]
    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn respond_counting_errors(err: impl Into<AppError>) -> (StatusCode, usize) {
        let counter = ErrorCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        let status = tracing::subscriber::with_default(subscriber, || {
            err.into().into_response().status()
        });
        (status, counter.0.load(Ordering::SeqCst))
    }

    #[test]
    fn test_store_failure_logged_once() {
        let (status, logged) =
            respond_counting_errors(StoreError::Unavailable("connection refused".to_string()));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(logged, 1);
    }

    #[test]
    fn test_integrity_failure_logged_once() {
        let (status, logged) = respond_counting_errors(ResolveError::DataIntegrity {
            mode: GameMode::Language,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            id: 99,
        });

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(logged, 1);
    }

    #[test]
    fn test_client_errors_are_not_logged_as_errors() {
        let (status, logged) = respond_counting_errors(ResolveError::NotFound {
            mode: GameMode::Snippet,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(logged, 0);
    }
}
