use crate::schema::language;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A guessable programming language with every attribute the comparator and
/// the post-win reveal need.
#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = language)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Language {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub paradigms: Vec<String>,
    pub year: i32,
    pub typing: String,
    pub execution: String,
    pub gc: bool,
    pub scope: Vec<String>,
    pub symbol: String,
    pub description: String,
    pub link: String,
    pub syntax_name: String,
    pub creators: Vec<String>,
}

/// Public projection used for autocomplete; reveals nothing about the answer.
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = language)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LanguageSummary {
    pub id: i64,
    pub name: String,
    pub icon: String,
}

impl From<&Language> for LanguageSummary {
    fn from(language: &Language) -> Self {
        LanguageSummary {
            id: language.id,
            name: language.name.clone(),
            icon: language.icon.clone(),
        }
    }
}

/// The previous day's answer. Shown to every player, so no win is required.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct YesterdayAnswer {
    pub name: String,
    pub icon: String,
}

impl From<&Language> for YesterdayAnswer {
    fn from(language: &Language) -> Self {
        YesterdayAnswer {
            name: language.name.clone(),
            icon: language.icon.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintType {
    NameLength,
    Creators,
}

impl HintType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "nameLength" => Some(HintType::NameLength),
            "creators" => Some(HintType::Creators),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum HintResponse {
    NameLength {
        #[serde(rename = "nameLength")]
        name_length: usize,
    },
    Creators {
        creators: Vec<String>,
    },
}

impl HintResponse {
    pub fn for_language(hint: HintType, language: &Language) -> Self {
        match hint {
            HintType::NameLength => HintResponse::NameLength {
                name_length: language.name.chars().count(),
            },
            HintType::Creators => HintResponse::Creators {
                creators: language.creators.clone(),
            },
        }
    }
}
