//! Guess-versus-target comparison.
//!
//! Everything here is pure: the caller resolves both entities first and
//! handles unknown candidates before any comparison happens.

use crate::model::complexity::ComplexityClass;
use crate::model::guess::{
    ComplexityGuessResult, Direction, LanguageGuessResult, SetMatch, SnippetGuessResult, Trend,
};
use crate::model::language::Language;
use crate::model::snippet::Snippet;
use std::collections::BTreeSet;
use std::cmp::Ordering;

/// Order-independent overlap of two multi-valued attributes.
pub fn set_overlap(guessed: &[String], target: &[String]) -> SetMatch {
    let guessed: BTreeSet<&str> = guessed.iter().map(String::as_str).collect();
    let target: BTreeSet<&str> = target.iter().map(String::as_str).collect();

    if guessed == target {
        SetMatch::Full
    } else if guessed.intersection(&target).next().is_some() {
        SetMatch::Partial
    } else {
        SetMatch::Disjoint
    }
}

pub fn ordered<T: Ord>(guessed: T, target: T) -> Direction {
    match guessed.cmp(&target) {
        Ordering::Equal => Direction::Full,
        Ordering::Greater => Direction::Higher,
        Ordering::Less => Direction::Lower,
    }
}

pub fn compare_language(guessed: &Language, target: &Language) -> LanguageGuessResult {
    LanguageGuessResult {
        id: None,
        name: guessed.name.clone(),
        name_match: guessed.name == target.name,
        paradigms: guessed.paradigms.clone(),
        paradigms_match: set_overlap(&guessed.paradigms, &target.paradigms),
        year: guessed.year,
        year_match: ordered(guessed.year, target.year),
        typing: guessed.typing.clone(),
        typing_match: guessed.typing == target.typing,
        execution: guessed.execution.clone(),
        execution_match: guessed.execution == target.execution,
        gc: guessed.gc,
        gc_match: guessed.gc == target.gc,
        scope: guessed.scope.clone(),
        scope_match: set_overlap(&guessed.scope, &target.scope),
        symbol: guessed.symbol.clone(),
        symbol_match: guessed.symbol == target.symbol,
        icon: guessed.icon.clone(),
        is_from_storage: false,
        guess_count: None,
        count_recorded: false,
    }
}

pub fn compare_snippet(guessed: &Language, target: &Snippet) -> SnippetGuessResult {
    SnippetGuessResult {
        id: None,
        language: guessed.name.clone(),
        language_match: guessed.id == target.language_id,
        icon: guessed.icon.clone(),
        is_from_storage: false,
        guess_count: None,
        count_recorded: false,
    }
}

/// Labels off the complexity ladder cannot be ranked and land in the
/// `lower` bucket, as does an exact hit.
pub fn compare_complexity(guessed: &str, solution: &str) -> ComplexityGuessResult {
    let correct = guessed == solution;

    let trend = match (
        ComplexityClass::from_label(guessed),
        ComplexityClass::from_label(solution),
    ) {
        (Some(guess_rank), Some(solution_rank)) if guess_rank > solution_rank => Trend::Higher,
        _ => Trend::Lower,
    };

    ComplexityGuessResult { correct, trend }
}
