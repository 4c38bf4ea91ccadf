//! Header-name matching
//!
//! Decides whether a raw column header refers to a synonym phrase. Both sides
//! are normalized first (trimmed, lowercased, runs of `_`, `-`, `/` and
//! whitespace collapsed to one space), then tested in this order:
//!
//! 1. Patterns of at most two characters only match an identical header.
//! 2. An exclusion guard attached to the pattern can veto the match.
//! 3. Whole-word / whole-phrase match.
//! 4. Plain substring containment, for multi-word patterns only.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Longest pattern that is only ever matched exactly
const EXACT_MATCH_MAX_CHARS: usize = 2;

/// Normalize a header or pattern for comparison
pub fn normalize_header(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut pending_space = false;

    for c in header.trim().chars() {
        if c.is_whitespace() || matches!(c, '_' | '-' | '/') {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.extend(c.to_lowercase());
    }

    out
}

/// Vetoes a pattern match when the header also mentions one of the given terms
///
/// Used to keep e.g. `state` (geography) from matching "State Withholding".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExclusion {
    /// Terms that, when contained in the normalized header, block the match
    pub header_contains: Vec<String>,
}

impl HeaderExclusion {
    /// Create an exclusion from a list of terms
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            header_contains: terms
                .into_iter()
                .map(|t| normalize_header(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Returns true if the normalized header must not match
    pub fn excludes(&self, normalized_header: &str) -> bool {
        self.header_contains
            .iter()
            .any(|term| normalized_header.contains(term.as_str()))
    }
}

/// A compiled synonym phrase
#[derive(Debug, Clone)]
pub struct HeaderPattern {
    phrase: String,
    boundary: Regex,
    multi_word: bool,
    exclusion: Option<HeaderExclusion>,
}

impl HeaderPattern {
    /// Compile a synonym phrase with an optional exclusion guard
    pub fn compile(pattern: &str, exclusion: Option<HeaderExclusion>) -> Result<Self, regex::Error> {
        let phrase = normalize_header(pattern);
        let boundary = Regex::new(&boundary_expression(&phrase))?;
        let multi_word = phrase.split(' ').count() > 1;

        Ok(Self {
            phrase,
            boundary,
            multi_word,
            exclusion,
        })
    }

    /// Normalized phrase
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Test a raw header
    pub fn matches(&self, header: &str) -> bool {
        self.matches_normalized(&normalize_header(header))
    }

    /// Test a header that has already been through [`normalize_header`]
    pub fn matches_normalized(&self, header: &str) -> bool {
        if self.phrase.is_empty() || header.is_empty() {
            return false;
        }

        if self.phrase.chars().count() <= EXACT_MATCH_MAX_CHARS {
            return header == self.phrase;
        }

        if let Some(ref exclusion) = self.exclusion {
            if exclusion.excludes(header) {
                return false;
            }
        }

        if self.boundary.is_match(header) {
            return true;
        }

        self.multi_word && header.contains(self.phrase.as_str())
    }
}

/// One-off match of a header against a synonym phrase, without exclusion guards
pub fn matches(header: &str, pattern: &str) -> bool {
    HeaderPattern::compile(pattern, None)
        .map(|p| p.matches(header))
        .unwrap_or(false)
}

/// Whole-word expression for a normalized phrase
///
/// Word boundaries are only required on sides where the phrase begins or ends
/// with a word character, so symbol-terminated synonyms such as `ss#` still
/// match at the end of a header.
fn boundary_expression(phrase: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let starts_word = phrase.chars().next().map(is_word).unwrap_or(false);
    let ends_word = phrase.chars().last().map(is_word).unwrap_or(false);

    format!(
        "(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(phrase),
        if ends_word { r"\b" } else { "" }
    )
}
