//! Target finder: locates candidate anchor character positions for
//! embedding variation selectors.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{VsMarkError, VsMarkResult};

/// Anchor-selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetPolicy {
    #[default]
    Whitespace,
    Punctuation,
    FirstLetter,
    LastLetter,
    AllCharacters,
}

impl TargetPolicy {
    pub fn parse(s: &str) -> VsMarkResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "whitespace" => Ok(TargetPolicy::Whitespace),
            "punctuation" => Ok(TargetPolicy::Punctuation),
            "first_letter" => Ok(TargetPolicy::FirstLetter),
            "last_letter" => Ok(TargetPolicy::LastLetter),
            "all_characters" => Ok(TargetPolicy::AllCharacters),
            other => Err(VsMarkError::InputValue(format!(
                "invalid target: {other}. Must be one of whitespace, punctuation, \
                 first_letter, last_letter, all_characters."
            ))),
        }
    }
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s").unwrap())
}

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.,!?;:]").unwrap())
}

fn word_char_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\w]").unwrap())
}

/// Find character indices (counted over `char_indices`, i.e. Unicode
/// scalar value positions, not byte offsets) eligible to anchor a
/// variation-selector run under the given policy.
///
/// Indices are returned sorted ascending, matching the order they
/// occur in `text`.
pub fn find_targets(text: &str, policy: TargetPolicy) -> Vec<usize> {
    let chars: Vec<char> = text.chars().collect();

    match policy {
        TargetPolicy::Whitespace => chars
            .iter()
            .enumerate()
            .filter(|(_, c)| whitespace_re().is_match(&c.to_string()))
            .map(|(i, _)| i)
            .collect(),
        TargetPolicy::Punctuation => chars
            .iter()
            .enumerate()
            .filter(|(_, c)| punctuation_re().is_match(&c.to_string()))
            .map(|(i, _)| i)
            .collect(),
        TargetPolicy::AllCharacters => (0..chars.len()).collect(),
        TargetPolicy::FirstLetter => word_boundary_targets(&chars, true),
        TargetPolicy::LastLetter => word_boundary_targets(&chars, false),
    }
}

fn is_word_char(c: char) -> bool {
    word_char_re().is_match(&c.to_string())
}

/// Indices of the first (or last) word character of every maximal run
/// of word characters, i.e. the positions `\b\w` / `\w\b` match.
fn word_boundary_targets(chars: &[char], first: bool) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &c) in chars.iter().enumerate() {
        if is_word_char(c) {
            if run_start.is_none() {
                run_start = Some(i);
                if first {
                    indices.push(i);
                }
            }
        } else if let Some(start) = run_start.take() {
            if !first {
                indices.push(i - 1);
            }
            let _ = start;
        }
    }
    if let Some(_start) = run_start {
        if !first {
            indices.push(chars.len() - 1);
        }
    }

    indices
}
