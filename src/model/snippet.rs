use crate::model::language::Language;
use crate::schema::snippet;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = snippet)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Snippet {
    pub id: i64,
    pub code: String,
    pub language_id: i64,
    pub description: String,
    pub link: String,
}

/// What the player sees before winning: the code and nothing that names
/// its language.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnippetCode {
    pub code: String,
}

impl From<&Snippet> for SnippetCode {
    fn from(snippet: &Snippet) -> Self {
        SnippetCode {
            code: snippet.code.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnippetReveal {
    pub snippet: Snippet,
    pub language: Language,
}
