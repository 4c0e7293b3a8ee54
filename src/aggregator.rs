//! Per-day guess statistics: how many players guessed each language.

use crate::errors::{AggregationWriteError, StoreError};
use crate::model::daily::GuessBoard;
use crate::store::Store;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Clone)]
pub struct GuessAggregator {
    store: Arc<dyn Store>,
}

impl GuessAggregator {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Counts one guess. The first guess for a key creates it at 1.
    pub async fn increment(
        &self,
        board: GuessBoard,
        date: NaiveDate,
        language_id: i64,
    ) -> Result<i64, AggregationWriteError> {
        self.store
            .increment_guess_count(board, date, language_id)
            .await
            .map_err(|source| AggregationWriteError {
                board,
                date,
                language_id,
                source,
            })
    }

    /// Like `increment`, but a failed write only costs the statistic: it is
    /// logged and `None` is returned so the guess result still goes out.
    pub async fn record(&self, board: GuessBoard, date: NaiveDate, language_id: i64) -> Option<i64> {
        match self.increment(board, date, language_id).await {
            Ok(count) => {
                debug!(
                    "{} guess count for language {} on {} is now {}",
                    board, language_id, date, count
                );
                Some(count)
            }
            Err(err) => {
                error!("Guess count not recorded: {}", err);
                None
            }
        }
    }

    pub async fn count(
        &self,
        board: GuessBoard,
        date: NaiveDate,
        language_id: i64,
    ) -> Result<i64, StoreError> {
        self.store.guess_count(board, date, language_id).await
    }

    /// Language name to count, for every language guessed at least once.
    pub async fn counts(
        &self,
        board: GuessBoard,
        date: NaiveDate,
    ) -> Result<BTreeMap<String, i64>, StoreError> {
        Ok(self
            .store
            .guess_counts(board, date)
            .await?
            .into_iter()
            .collect())
    }
}
