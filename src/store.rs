//! Query interface to the relational data store.
//!
//! Handlers and the engine only ever talk to `dyn Store`. `PgStore` is the
//! production implementation; `MemoryStore` backs tests and local runs.

use crate::errors::StoreError;
use crate::model::complexity::ComplexityCase;
use crate::model::daily::{DailyAssignment, GameMode, GuessBoard, NewDailyAssignment};
use crate::model::language::{Language, LanguageSummary};
use crate::model::regex::{NewRegexSolution, RegexChallenge, RegexSolution};
use crate::model::snippet::Snippet;
use async_trait::async_trait;
use chrono::NaiveDate;

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn daily_assignment(&self, date: NaiveDate)
    -> Result<Option<DailyAssignment>, StoreError>;

    /// Insert-or-ignore: an existing assignment for the date is never
    /// replaced. Returns whether a row was created.
    async fn insert_daily_assignment(
        &self,
        assignment: NewDailyAssignment,
    ) -> Result<bool, StoreError>;

    /// Every id that can be picked for `mode`, ascending.
    async fn candidate_ids(&self, mode: GameMode) -> Result<Vec<i64>, StoreError>;

    async fn language_by_id(&self, id: i64) -> Result<Option<Language>, StoreError>;

    /// Case-insensitive lookup on the trimmed name.
    async fn language_by_name(&self, name: &str) -> Result<Option<Language>, StoreError>;

    /// Ordered by name.
    async fn list_languages(&self) -> Result<Vec<LanguageSummary>, StoreError>;

    async fn snippet_by_id(&self, id: i64) -> Result<Option<Snippet>, StoreError>;

    async fn complexity_by_id(&self, id: i64) -> Result<Option<ComplexityCase>, StoreError>;

    async fn regex_by_id(&self, id: i64) -> Result<Option<RegexChallenge>, StoreError>;

    /// Atomic create-or-increment. Returns the count after this guess.
    async fn increment_guess_count(
        &self,
        board: GuessBoard,
        date: NaiveDate,
        language_id: i64,
    ) -> Result<i64, StoreError>;

    async fn guess_count(
        &self,
        board: GuessBoard,
        date: NaiveDate,
        language_id: i64,
    ) -> Result<i64, StoreError>;

    /// `(language name, count)` for every language guessed on `date`.
    async fn guess_counts(
        &self,
        board: GuessBoard,
        date: NaiveDate,
    ) -> Result<Vec<(String, i64)>, StoreError>;

    async fn insert_regex_solution(&self, solution: NewRegexSolution) -> Result<i64, StoreError>;

    /// Official solutions first, then in submission order.
    async fn regex_solutions(&self, regex_id: i64) -> Result<Vec<RegexSolution>, StoreError>;
}
