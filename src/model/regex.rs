use crate::schema::{regex_challenges, regex_solutions};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = regex_challenges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RegexChallenge {
    pub id: i64,
    pub source_text: String,
    pub target_text: String,
    pub instruction: String,
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = regex_solutions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RegexSolution {
    pub id: i64,
    pub regex_id: i64,
    pub pattern: String,
    pub replacement: Option<String>,
    pub is_official: bool,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = regex_solutions)]
pub struct NewRegexSolution {
    pub regex_id: i64,
    pub pattern: String,
    pub replacement: Option<String>,
    pub is_official: bool,
    // created_at has a DB default (CURRENT_TIMESTAMP)
}
