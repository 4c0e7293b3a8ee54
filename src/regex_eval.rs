//! Live evaluation of a player's regex challenge attempt.
//!
//! The same scan produces the substituted text and the highlight segments, so
//! the preview never disagrees with the correctness check. Patterns follow the
//! browser dialect players write them in: lookaround and backreferences work,
//! and `\d`, `\w` and their negations only match ASCII.

use fancy_regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Segment {
    Unmatched { text: String },
    Deleted { text: String },
    Replaced { original: String, replacement: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Preview {
    Segments { segments: Vec<Segment> },
    InvalidPattern { message: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub modified_text: String,
    pub is_correct: bool,
    pub preview: Preview,
}

impl Evaluation {
    fn invalid(message: String) -> Self {
        Evaluation {
            modified_text: String::new(),
            is_correct: false,
            preview: Preview::InvalidPattern { message },
        }
    }
}

pub fn evaluate(source: &str, target: &str, pattern: &str, replacement: &str) -> Evaluation {
    let regex = match compile(pattern) {
        Ok(regex) => regex,
        Err(err) => return Evaluation::invalid(err.to_string()),
    };
    // Matching itself can fail, e.g. on the backtrack limit.
    let (modified_text, segments) = match scan(&regex, source, replacement) {
        Ok(scanned) => scanned,
        Err(err) => return Evaluation::invalid(err.to_string()),
    };

    // An empty pattern previews as the untouched source but still
    // substitutes, matching at every position.
    let segments = if pattern.is_empty() {
        vec![Segment::Unmatched {
            text: source.to_string(),
        }]
    } else {
        segments
    };

    Evaluation {
        is_correct: modified_text == target,
        modified_text,
        preview: Preview::Segments { segments },
    }
}

/// Global substitution only; `None` when the pattern does not compile or
/// matching fails.
pub fn substitute(source: &str, pattern: &str, replacement: &str) -> Option<String> {
    let regex = compile(pattern).ok()?;
    scan(&regex, source, replacement)
        .ok()
        .map(|(modified, _)| modified)
}

fn compile(pattern: &str) -> Result<Regex, fancy_regex::Error> {
    Regex::new(&ascii_classes(pattern))
}

/// Spells `\d`, `\D`, `\w` and `\W` as ASCII classes. Inside brackets only
/// `\d` and `\w` can become ranges; the negated forms stay as written there,
/// as does `\b`.
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match (chars.next(), in_class) {
                (Some('d'), false) => out.push_str("[0-9]"),
                (Some('D'), false) => out.push_str("[^0-9]"),
                (Some('w'), false) => out.push_str("[A-Za-z0-9_]"),
                (Some('W'), false) => out.push_str("[^A-Za-z0-9_]"),
                (Some('d'), true) => out.push_str("0-9"),
                (Some('w'), true) => out.push_str("A-Za-z0-9_"),
                (Some(escaped), _) => {
                    out.push('\\');
                    out.push(escaped);
                }
                (None, _) => out.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                out.push(ch);
            }
            ']' if in_class => {
                in_class = false;
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    out
}

fn scan(
    regex: &Regex,
    source: &str,
    replacement: &str,
) -> Result<(String, Vec<Segment>), fancy_regex::Error> {
    let mut modified = String::with_capacity(source.len());
    let mut segments = Vec::new();
    let mut last_end = 0;
    let mut position = 0;

    while position <= source.len() {
        let Some(captures) = regex.captures_from_pos(source, position)? else {
            break;
        };
        let Some(whole) = captures.get(0) else {
            break;
        };

        if whole.start() > last_end {
            let gap = &source[last_end..whole.start()];
            modified.push_str(gap);
            segments.push(Segment::Unmatched {
                text: gap.to_string(),
            });
        }

        let expanded = expand_template(replacement, &captures);
        modified.push_str(&expanded);
        if replacement.is_empty() {
            segments.push(Segment::Deleted {
                text: whole.as_str().to_string(),
            });
        } else {
            segments.push(Segment::Replaced {
                original: whole.as_str().to_string(),
                replacement: expanded,
            });
        }

        last_end = whole.end();
        position = if whole.start() == whole.end() {
            next_char_boundary(source, whole.end())
        } else {
            whole.end()
        };
    }

    if last_end < source.len() {
        let rest = &source[last_end..];
        modified.push_str(rest);
        segments.push(Segment::Unmatched {
            text: rest.to_string(),
        });
    }

    Ok((modified, segments))
}

/// Expands `$N` references; unknown or non-participating groups expand to
/// nothing and a `$` without digits stays literal.
fn expand_template(template: &str, captures: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }

        let digits_start = index + 1;
        let mut digits_end = digits_start;
        while let Some(&(next_index, next)) = chars.peek() {
            if next.is_ascii_digit() {
                digits_end = next_index + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        if digits_end == digits_start {
            out.push('$');
            continue;
        }

        let group = template[digits_start..digits_end]
            .parse::<usize>()
            .ok()
            .and_then(|n| captures.get(n));
        if let Some(group) = group {
            out.push_str(group.as_str());
        }
    }

    out
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map_or(from + 1, |ch| from + ch.len_utf8())
}
