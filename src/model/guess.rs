use serde::{Deserialize, Serialize};

/// Tri-state outcome for multi-valued attributes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SetMatch {
    Full,
    Partial,
    #[serde(rename = "none")]
    Disjoint,
}

/// Where the guess sits relative to the answer on an ordered attribute.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Full,
    Higher,
    Lower,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Higher,
    Lower,
}

/// A result that can live in the client's per-day progress list.
pub trait GuessRecord {
    fn ordering_id(&self) -> Option<&str>;
    fn set_ordering_id(&mut self, id: String);
    fn set_from_storage(&mut self, from_storage: bool);
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageGuessResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub name_match: bool,
    pub paradigms: Vec<String>,
    pub paradigms_match: SetMatch,
    pub year: i32,
    pub year_match: Direction,
    pub typing: String,
    pub typing_match: bool,
    pub execution: String,
    pub execution_match: bool,
    pub gc: bool,
    pub gc_match: bool,
    pub scope: Vec<String>,
    pub scope_match: SetMatch,
    pub symbol: String,
    pub symbol_match: bool,
    pub icon: String,
    #[serde(default)]
    pub is_from_storage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess_count: Option<i64>,
    /// False when the guess could not be counted; `guessCount` is then absent.
    #[serde(default)]
    pub count_recorded: bool,
}

impl LanguageGuessResult {
    pub fn is_win(&self) -> bool {
        self.name_match
    }

    pub fn set_guess_count(&mut self, count: Option<i64>) {
        self.count_recorded = count.is_some();
        self.guess_count = count;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SnippetGuessResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub language: String,
    pub language_match: bool,
    pub icon: String,
    #[serde(default)]
    pub is_from_storage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess_count: Option<i64>,
    /// False when the guess could not be counted; `guessCount` is then absent.
    #[serde(default)]
    pub count_recorded: bool,
}

impl SnippetGuessResult {
    pub fn is_win(&self) -> bool {
        self.language_match
    }

    pub fn set_guess_count(&mut self, count: Option<i64>) {
        self.count_recorded = count.is_some();
        self.guess_count = count;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexityGuessResult {
    pub correct: bool,
    pub trend: Trend,
}

macro_rules! impl_guess_record {
    ($($result:ty),+) => {
        $(
            impl GuessRecord for $result {
                fn ordering_id(&self) -> Option<&str> {
                    self.id.as_deref()
                }

                fn set_ordering_id(&mut self, id: String) {
                    self.id = Some(id);
                }

                fn set_from_storage(&mut self, from_storage: bool) {
                    self.is_from_storage = from_storage;
                }
            }
        )+
    };
}

impl_guess_record!(LanguageGuessResult, SnippetGuessResult);
