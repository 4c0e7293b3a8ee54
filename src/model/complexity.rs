use crate::schema::complexity;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = complexity)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ComplexityCase {
    pub id: i64,
    pub snippet: String,
    pub language: String,
    pub solution: String,
    pub explanation: String,
}

/// Pre-win projection: no solution, no explanation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicComplexity {
    pub id: i64,
    pub language: String,
    pub snippet: String,
}

impl From<&ComplexityCase> for PublicComplexity {
    fn from(case: &ComplexityCase) -> Self {
        PublicComplexity {
            id: case.id,
            language: case.language.clone(),
            snippet: case.snippet.clone(),
        }
    }
}

/// The fixed complexity ladder, declared cheapest first so the derived
/// ordering is the rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComplexityClass {
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    Quadratic,
    Exponential,
}

impl ComplexityClass {
    pub const ALL: [ComplexityClass; 6] = [
        ComplexityClass::Constant,
        ComplexityClass::Logarithmic,
        ComplexityClass::Linear,
        ComplexityClass::Linearithmic,
        ComplexityClass::Quadratic,
        ComplexityClass::Exponential,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComplexityClass::Constant => "O(1)",
            ComplexityClass::Logarithmic => "O(log n)",
            ComplexityClass::Linear => "O(n)",
            ComplexityClass::Linearithmic => "O(n log n)",
            ComplexityClass::Quadratic => "O(n²)",
            ComplexityClass::Exponential => "O(2^n)",
        }
    }

    /// Exact label lookup. Anything off the ladder is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.label() == label)
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
