use crate::model::complexity::ComplexityCase;
use crate::model::language::Language;
use crate::model::regex::RegexChallenge;
use crate::model::snippet::Snippet;
use crate::schema::daily;
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Language,
    Snippet,
    Regex,
    Complexity,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Language,
        GameMode::Snippet,
        GameMode::Regex,
        GameMode::Complexity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Language => "language",
            GameMode::Snippet => "snippet",
            GameMode::Regex => "regex",
            GameMode::Complexity => "complexity",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The games that keep per-day guess statistics. Each board is its own
/// `(date, language_id)` keyed counter table.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GuessBoard {
    Language,
    Snippet,
}

impl fmt::Display for GuessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessBoard::Language => f.write_str("language"),
            GuessBoard::Snippet => f.write_str("snippet"),
        }
    }
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = daily)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DailyAssignment {
    pub date: NaiveDate,
    pub language_id: Option<i64>,
    pub snippet_id: Option<i64>,
    pub regex_id: Option<i64>,
    pub complexity_id: Option<i64>,
}

impl DailyAssignment {
    pub fn id_for(&self, mode: GameMode) -> Option<i64> {
        match mode {
            GameMode::Language => self.language_id,
            GameMode::Snippet => self.snippet_id,
            GameMode::Regex => self.regex_id,
            GameMode::Complexity => self.complexity_id,
        }
    }
}

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = daily)]
pub struct NewDailyAssignment {
    pub date: NaiveDate,
    pub language_id: Option<i64>,
    pub snippet_id: Option<i64>,
    pub regex_id: Option<i64>,
    pub complexity_id: Option<i64>,
}

impl From<NewDailyAssignment> for DailyAssignment {
    fn from(new: NewDailyAssignment) -> Self {
        DailyAssignment {
            date: new.date,
            language_id: new.language_id,
            snippet_id: new.snippet_id,
            regex_id: new.regex_id,
            complexity_id: new.complexity_id,
        }
    }
}

/// The entity a daily assignment points at, whatever the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyTarget {
    Language(Language),
    Snippet(Snippet),
    Regex(RegexChallenge),
    Complexity(ComplexityCase),
}

impl DailyTarget {
    pub fn mode(&self) -> GameMode {
        match self {
            DailyTarget::Language(_) => GameMode::Language,
            DailyTarget::Snippet(_) => GameMode::Snippet,
            DailyTarget::Regex(_) => GameMode::Regex,
            DailyTarget::Complexity(_) => GameMode::Complexity,
        }
    }
}
