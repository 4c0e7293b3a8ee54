use super::Store;
use crate::errors::StoreError;
use crate::model::complexity::ComplexityCase;
use crate::model::daily::{DailyAssignment, GameMode, GuessBoard, NewDailyAssignment};
use crate::model::language::{Language, LanguageSummary};
use crate::model::regex::{NewRegexSolution, RegexChallenge, RegexSolution};
use crate::model::snippet::Snippet;
use crate::schema::{
    complexity::dsl as complexity_dsl, daily::dsl as daily_dsl,
    guess_language::dsl as guess_language_dsl, guess_snippet::dsl as guess_snippet_dsl,
    language::dsl as language_dsl, regex_challenges::dsl as regex_dsl,
    regex_solutions::dsl as solutions_dsl, snippet::dsl as snippet_dsl,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use deadpool_diesel::postgres::Pool;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::{debug, error};

diesel::define_sql_function!(fn lower(x: Text) -> Text);

#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn run_query<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, diesel::result::Error> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.pool.get().await.map_err(|pool_err| {
            error!(
                "Failed to get DB connection object from pool: {:?}",
                pool_err
            );
            StoreError::Pool(pool_err)
        })?;
        debug!("DB connection object obtained from pool for interaction");

        match conn.interact(query).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(diesel_err)) => {
                error!("Diesel query failed within interaction: {:?}", diesel_err);
                Err(StoreError::Query(diesel_err))
            }
            Err(interact_err) => {
                error!("Deadpool interact error: {:?}", interact_err);
                Err(StoreError::Interact(interact_err.to_string()))
            }
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn daily_assignment(
        &self,
        date: NaiveDate,
    ) -> Result<Option<DailyAssignment>, StoreError> {
        self.run_query(move |conn| {
            daily_dsl::daily
                .find(date)
                .select(DailyAssignment::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    async fn insert_daily_assignment(
        &self,
        assignment: NewDailyAssignment,
    ) -> Result<bool, StoreError> {
        let inserted = self
            .run_query(move |conn| {
                diesel::insert_into(daily_dsl::daily)
                    .values(&assignment)
                    .on_conflict(daily_dsl::date)
                    .do_nothing()
                    .execute(conn)
            })
            .await?;
        Ok(inserted == 1)
    }

    async fn candidate_ids(&self, mode: GameMode) -> Result<Vec<i64>, StoreError> {
        self.run_query(move |conn| match mode {
            GameMode::Language => language_dsl::language
                .select(language_dsl::id)
                .order_by(language_dsl::id.asc())
                .load::<i64>(conn),
            GameMode::Snippet => snippet_dsl::snippet
                .select(snippet_dsl::id)
                .order_by(snippet_dsl::id.asc())
                .load::<i64>(conn),
            GameMode::Regex => regex_dsl::regex_challenges
                .select(regex_dsl::id)
                .order_by(regex_dsl::id.asc())
                .load::<i64>(conn),
            GameMode::Complexity => complexity_dsl::complexity
                .select(complexity_dsl::id)
                .order_by(complexity_dsl::id.asc())
                .load::<i64>(conn),
        })
        .await
    }

    async fn language_by_id(&self, id: i64) -> Result<Option<Language>, StoreError> {
        self.run_query(move |conn| {
            language_dsl::language
                .find(id)
                .select(Language::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    async fn language_by_name(&self, name: &str) -> Result<Option<Language>, StoreError> {
        let needle = name.trim().to_lowercase();
        self.run_query(move |conn| {
            language_dsl::language
                .filter(lower(language_dsl::name).eq(needle))
                .select(Language::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    async fn list_languages(&self) -> Result<Vec<LanguageSummary>, StoreError> {
        self.run_query(|conn| {
            language_dsl::language
                .select(LanguageSummary::as_select())
                .order_by(language_dsl::name.asc())
                .load(conn)
        })
        .await
    }

    async fn snippet_by_id(&self, id: i64) -> Result<Option<Snippet>, StoreError> {
        self.run_query(move |conn| {
            snippet_dsl::snippet
                .find(id)
                .select(Snippet::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    async fn complexity_by_id(&self, id: i64) -> Result<Option<ComplexityCase>, StoreError> {
        self.run_query(move |conn| {
            complexity_dsl::complexity
                .find(id)
                .select(ComplexityCase::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    async fn regex_by_id(&self, id: i64) -> Result<Option<RegexChallenge>, StoreError> {
        self.run_query(move |conn| {
            regex_dsl::regex_challenges
                .find(id)
                .select(RegexChallenge::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    async fn increment_guess_count(
        &self,
        board: GuessBoard,
        date: NaiveDate,
        language_id: i64,
    ) -> Result<i64, StoreError> {
        // INSERT .. ON CONFLICT DO UPDATE is a single statement, so concurrent
        // guesses for the same key serialize on the row lock.
        self.run_query(move |conn| match board {
            GuessBoard::Language => diesel::insert_into(guess_language_dsl::guess_language)
                .values((
                    guess_language_dsl::date.eq(date),
                    guess_language_dsl::language_id.eq(language_id),
                    guess_language_dsl::guess_count.eq(1_i64),
                ))
                .on_conflict((guess_language_dsl::date, guess_language_dsl::language_id))
                .do_update()
                .set(guess_language_dsl::guess_count.eq(guess_language_dsl::guess_count + 1))
                .returning(guess_language_dsl::guess_count)
                .get_result::<i64>(conn),
            GuessBoard::Snippet => diesel::insert_into(guess_snippet_dsl::guess_snippet)
                .values((
                    guess_snippet_dsl::date.eq(date),
                    guess_snippet_dsl::language_id.eq(language_id),
                    guess_snippet_dsl::guess_count.eq(1_i64),
                ))
                .on_conflict((guess_snippet_dsl::date, guess_snippet_dsl::language_id))
                .do_update()
                .set(guess_snippet_dsl::guess_count.eq(guess_snippet_dsl::guess_count + 1))
                .returning(guess_snippet_dsl::guess_count)
                .get_result::<i64>(conn),
        })
        .await
    }

    async fn guess_count(
        &self,
        board: GuessBoard,
        date: NaiveDate,
        language_id: i64,
    ) -> Result<i64, StoreError> {
        let count = self
            .run_query(move |conn| match board {
                GuessBoard::Language => guess_language_dsl::guess_language
                    .find((date, language_id))
                    .select(guess_language_dsl::guess_count)
                    .first::<i64>(conn)
                    .optional(),
                GuessBoard::Snippet => guess_snippet_dsl::guess_snippet
                    .find((date, language_id))
                    .select(guess_snippet_dsl::guess_count)
                    .first::<i64>(conn)
                    .optional(),
            })
            .await?;
        Ok(count.unwrap_or(0))
    }

    async fn guess_counts(
        &self,
        board: GuessBoard,
        date: NaiveDate,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        self.run_query(move |conn| match board {
            GuessBoard::Language => guess_language_dsl::guess_language
                .inner_join(language_dsl::language)
                .filter(guess_language_dsl::date.eq(date))
                .select((language_dsl::name, guess_language_dsl::guess_count))
                .order_by(language_dsl::name.asc())
                .load::<(String, i64)>(conn),
            GuessBoard::Snippet => guess_snippet_dsl::guess_snippet
                .inner_join(language_dsl::language)
                .filter(guess_snippet_dsl::date.eq(date))
                .select((language_dsl::name, guess_snippet_dsl::guess_count))
                .order_by(language_dsl::name.asc())
                .load::<(String, i64)>(conn),
        })
        .await
    }

    async fn insert_regex_solution(&self, solution: NewRegexSolution) -> Result<i64, StoreError> {
        self.run_query(move |conn| {
            diesel::insert_into(solutions_dsl::regex_solutions)
                .values(&solution)
                .returning(solutions_dsl::id)
                .get_result::<i64>(conn)
        })
        .await
    }

    async fn regex_solutions(&self, regex_id: i64) -> Result<Vec<RegexSolution>, StoreError> {
        self.run_query(move |conn| {
            solutions_dsl::regex_solutions
                .filter(solutions_dsl::regex_id.eq(regex_id))
                .select(RegexSolution::as_select())
                .order_by((solutions_dsl::is_official.desc(), solutions_dsl::id.asc()))
                .load(conn)
        })
        .await
    }
}
