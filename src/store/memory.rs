use super::Store;
use crate::errors::StoreError;
use crate::model::complexity::ComplexityCase;
use crate::model::daily::{DailyAssignment, GameMode, GuessBoard, NewDailyAssignment};
use crate::model::language::{Language, LanguageSummary};
use crate::model::regex::{NewRegexSolution, RegexChallenge, RegexSolution};
use crate::model::snippet::Snippet;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Tables {
    daily: BTreeMap<NaiveDate, DailyAssignment>,
    languages: BTreeMap<i64, Language>,
    snippets: BTreeMap<i64, Snippet>,
    complexities: BTreeMap<i64, ComplexityCase>,
    regexes: BTreeMap<i64, RegexChallenge>,
    regex_solutions: Vec<RegexSolution>,
    guess_counts: HashMap<(GuessBoard, NaiveDate, i64), i64>,
}

/// Process-local store. One mutex guards all tables, which makes every
/// operation (the guess-count upsert included) atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_count_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_language(&self, language: Language) {
        self.tables().languages.insert(language.id, language);
    }

    pub fn add_snippet(&self, snippet: Snippet) {
        self.tables().snippets.insert(snippet.id, snippet);
    }

    pub fn add_complexity(&self, case: ComplexityCase) {
        self.tables().complexities.insert(case.id, case);
    }

    pub fn add_regex(&self, challenge: RegexChallenge) {
        self.tables().regexes.insert(challenge.id, challenge);
    }

    /// Unlike `insert_daily_assignment` this overwrites; it is meant for
    /// seeding.
    pub fn set_daily_assignment(&self, assignment: DailyAssignment) {
        self.tables().daily.insert(assignment.date, assignment);
    }

    /// Makes every subsequent guess-count write fail, to exercise the
    /// degraded path of a guess submission.
    pub fn fail_count_writes(&self, fail: bool) {
        self.fail_count_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn daily_assignment(
        &self,
        date: NaiveDate,
    ) -> Result<Option<DailyAssignment>, StoreError> {
        Ok(self.tables().daily.get(&date).cloned())
    }

    async fn insert_daily_assignment(
        &self,
        assignment: NewDailyAssignment,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        if tables.daily.contains_key(&assignment.date) {
            return Ok(false);
        }
        tables.daily.insert(assignment.date, assignment.into());
        Ok(true)
    }

    async fn candidate_ids(&self, mode: GameMode) -> Result<Vec<i64>, StoreError> {
        let tables = self.tables();
        let ids = match mode {
            GameMode::Language => tables.languages.keys().copied().collect(),
            GameMode::Snippet => tables.snippets.keys().copied().collect(),
            GameMode::Regex => tables.regexes.keys().copied().collect(),
            GameMode::Complexity => tables.complexities.keys().copied().collect(),
        };
        Ok(ids)
    }

    async fn language_by_id(&self, id: i64) -> Result<Option<Language>, StoreError> {
        Ok(self.tables().languages.get(&id).cloned())
    }

    async fn language_by_name(&self, name: &str) -> Result<Option<Language>, StoreError> {
        let needle = name.trim().to_lowercase();
        Ok(self
            .tables()
            .languages
            .values()
            .find(|language| language.name.to_lowercase() == needle)
            .cloned())
    }

    async fn list_languages(&self) -> Result<Vec<LanguageSummary>, StoreError> {
        let mut summaries: Vec<LanguageSummary> = self
            .tables()
            .languages
            .values()
            .map(LanguageSummary::from)
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    async fn snippet_by_id(&self, id: i64) -> Result<Option<Snippet>, StoreError> {
        Ok(self.tables().snippets.get(&id).cloned())
    }

    async fn complexity_by_id(&self, id: i64) -> Result<Option<ComplexityCase>, StoreError> {
        Ok(self.tables().complexities.get(&id).cloned())
    }

    async fn regex_by_id(&self, id: i64) -> Result<Option<RegexChallenge>, StoreError> {
        Ok(self.tables().regexes.get(&id).cloned())
    }

    async fn increment_guess_count(
        &self,
        board: GuessBoard,
        date: NaiveDate,
        language_id: i64,
    ) -> Result<i64, StoreError> {
        if self.fail_count_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "guess count writes are disabled".to_string(),
            ));
        }

        let mut tables = self.tables();
        let count = tables
            .guess_counts
            .entry((board, date, language_id))
            .or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn guess_count(
        &self,
        board: GuessBoard,
        date: NaiveDate,
        language_id: i64,
    ) -> Result<i64, StoreError> {
        Ok(self
            .tables()
            .guess_counts
            .get(&(board, date, language_id))
            .copied()
            .unwrap_or(0))
    }

    async fn guess_counts(
        &self,
        board: GuessBoard,
        date: NaiveDate,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        let tables = self.tables();
        let mut counts: Vec<(String, i64)> = tables
            .guess_counts
            .iter()
            .filter(|((b, d, _), _)| *b == board && *d == date)
            .filter_map(|((_, _, language_id), count)| {
                tables
                    .languages
                    .get(language_id)
                    .map(|language| (language.name.clone(), *count))
            })
            .collect();
        counts.sort();
        Ok(counts)
    }

    async fn insert_regex_solution(&self, solution: NewRegexSolution) -> Result<i64, StoreError> {
        let mut tables = self.tables();
        let id = tables.regex_solutions.len() as i64 + 1;
        tables.regex_solutions.push(RegexSolution {
            id,
            regex_id: solution.regex_id,
            pattern: solution.pattern,
            replacement: solution.replacement,
            is_official: solution.is_official,
        });
        Ok(id)
    }

    async fn regex_solutions(&self, regex_id: i64) -> Result<Vec<RegexSolution>, StoreError> {
        let mut solutions: Vec<RegexSolution> = self
            .tables()
            .regex_solutions
            .iter()
            .filter(|solution| solution.regex_id == regex_id)
            .cloned()
            .collect();
        solutions.sort_by_key(|solution| (!solution.is_official, solution.id));
        Ok(solutions)
    }
}
