//! Per-day player progress kept on the client side.
//!
//! Values are JSON stored under `{key}-{YYYY-MM-DD}`, so yesterday's guesses
//! are simply never read again. There is no versioning or migration.

use crate::clock::date_key;
use crate::errors::ProgressError;
use crate::model::guess::GuessRecord;
use crate::model::regex::RegexChallenge;
use crate::regex_eval::{self, Evaluation};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};
use uuid::Uuid;

pub const LANGUAGE_GUESSES: &str = "languageGuesses";
pub const SNIPPET_GUESSES: &str = "snippetGuesses";
pub const REGEX_SOLUTION: &str = "regex-solution";

pub fn storage_key(key: &str, date: NaiveDate) -> String {
    format!("{}-{}", key, date_key(date))
}

/// String-to-string storage with the shape of the browser's local storage.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ProgressError>;
    fn set(&self, key: &str, value: String) -> Result<(), ProgressError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ProgressError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), ProgressError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One JSON object on disk holding every key. Rewritten whole on each set.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, ProgressError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ProgressError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), ProgressError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

pub struct Progress<S> {
    storage: S,
}

impl<S: KeyValueStorage> Progress<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn load_value<T: DeserializeOwned>(
        &self,
        key: &str,
        date: NaiveDate,
    ) -> Result<Option<T>, ProgressError> {
        let full_key = storage_key(key, date);
        match self.storage.get(&full_key)? {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|err| {
                warn!("Stored progress under '{}' is corrupt: {}", full_key, err);
                ProgressError::Json(err)
            }),
            None => Ok(None),
        }
    }

    pub fn save_value<T: Serialize + ?Sized>(
        &self,
        key: &str,
        date: NaiveDate,
        value: &T,
    ) -> Result<(), ProgressError> {
        let full_key = storage_key(key, date);
        self.storage.set(&full_key, serde_json::to_string(value)?)?;
        debug!("Saved progress under '{}'", full_key);
        Ok(())
    }

    /// The day's guesses, each marked as coming from storage. `None` when
    /// nothing was saved for that date.
    pub fn load_guesses<T>(&self, key: &str, date: NaiveDate) -> Result<Option<Vec<T>>, ProgressError>
    where
        T: GuessRecord + DeserializeOwned,
    {
        let Some(mut guesses) = self.load_value::<Vec<T>>(key, date)? else {
            return Ok(None);
        };
        for guess in &mut guesses {
            guess.set_from_storage(true);
        }
        Ok(Some(guesses))
    }

    pub fn save_guesses<T: Serialize>(
        &self,
        key: &str,
        date: NaiveDate,
        guesses: &[T],
    ) -> Result<(), ProgressError> {
        self.save_value(key, date, guesses)
    }

    /// Appends a fresh guess to the day's list and saves it. Returns the
    /// whole list, new guess last.
    pub fn record<T>(&self, key: &str, date: NaiveDate, mut result: T) -> Result<Vec<T>, ProgressError>
    where
        T: GuessRecord + Serialize + DeserializeOwned,
    {
        result.set_ordering_id(Uuid::new_v4().to_string());
        result.set_from_storage(false);

        let mut guesses = self.load_guesses::<T>(key, date)?.unwrap_or_default();
        guesses.push(result);
        self.save_guesses(key, date, &guesses)?;
        Ok(guesses)
    }
}

/// The persisted form of a solved regex challenge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegexAttempt {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexPhase {
    Editing,
    Submitted,
}

/// Player-side state of one day's regex challenge. Edits re-evaluate live;
/// once a correct attempt is submitted the session is frozen.
#[derive(Debug, Clone)]
pub struct RegexSession {
    date: NaiveDate,
    challenge: RegexChallenge,
    attempt: RegexAttempt,
    phase: RegexPhase,
}

impl RegexSession {
    /// Starts editing, or goes straight to `Submitted` when a solution was
    /// already saved for `date`.
    pub fn restore<S: KeyValueStorage>(
        progress: &Progress<S>,
        date: NaiveDate,
        challenge: RegexChallenge,
    ) -> Result<Self, ProgressError> {
        let saved = progress.load_value::<RegexAttempt>(REGEX_SOLUTION, date)?;
        let (attempt, phase) = match saved {
            Some(attempt) => (attempt, RegexPhase::Submitted),
            None => (
                RegexAttempt {
                    pattern: String::new(),
                    replacement: String::new(),
                },
                RegexPhase::Editing,
            ),
        };
        Ok(Self {
            date,
            challenge,
            attempt,
            phase,
        })
    }

    pub fn phase(&self) -> RegexPhase {
        self.phase
    }

    pub fn attempt(&self) -> &RegexAttempt {
        &self.attempt
    }

    /// Returns false, changing nothing, once submitted.
    pub fn set_pattern(&mut self, pattern: impl Into<String>) -> bool {
        if self.phase == RegexPhase::Submitted {
            return false;
        }
        self.attempt.pattern = pattern.into();
        true
    }

    /// Returns false, changing nothing, once submitted.
    pub fn set_replacement(&mut self, replacement: impl Into<String>) -> bool {
        if self.phase == RegexPhase::Submitted {
            return false;
        }
        self.attempt.replacement = replacement.into();
        true
    }

    pub fn evaluate(&self) -> Evaluation {
        regex_eval::evaluate(
            &self.challenge.source_text,
            &self.challenge.target_text,
            &self.attempt.pattern,
            &self.attempt.replacement,
        )
    }

    /// Persists the attempt and moves to `Submitted` if it is correct.
    /// Returns whether the session is submitted afterwards.
    pub fn submit<S: KeyValueStorage>(&mut self, progress: &Progress<S>) -> Result<bool, ProgressError> {
        if self.phase == RegexPhase::Submitted {
            return Ok(true);
        }
        if !self.evaluate().is_correct {
            return Ok(false);
        }
        progress.save_value(REGEX_SOLUTION, self.date, &self.attempt)?;
        self.phase = RegexPhase::Submitted;
        Ok(true)
    }
}
