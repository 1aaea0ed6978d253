//! Exact matching for zero-tolerance selections
//!
//! Each literal compiles to a pattern anchored on word boundaries, with every
//! internal delineator widened to any whitespace, separator or punctuation
//! character. A hit counts only when it covers whole tokens: any end of the
//! literal that is not itself delineating must border a delineator or the
//! edge of the text. Overlapping occurrences are all reported.

use std::time::{Duration, Instant};

use regex::{Regex, RegexBuilder};

use crate::error::{LookupError, Result};
use crate::lookup::results::{Aggregator, MatchDetail};
use crate::lookup::CancellationFlag;

use super::normalize::{is_accent, is_delineating, DELINEATOR_CLASS};
use super::selection::Selection;
use super::tokenizer::IndexedText;

/// Compiled pattern size ceiling. Each internal delineator expands to a
/// Unicode class, so literals of a few thousand words fit but longer ones
/// fail with `LookupError::Pattern`.
const PATTERN_SIZE_LIMIT: usize = 1 << 28;

/// Characters a `\b` assertion treats as part of a word
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_accent(c)
}

/// Build the pattern source for a literal.
///
/// Word boundaries are added at either end when the literal starts or ends
/// with a word character. A `\b` next to a symbol such as `+` could never be
/// satisfied before a space, so symbol ends are left to the neighbour check
/// in [`ExactMatcher::scan`]. Returns `None` for an empty literal.
pub fn pattern_for(literal: &str) -> Option<String> {
    let first = literal.chars().next()?;
    let last = literal.chars().next_back()?;

    let mut pattern = String::with_capacity(literal.len() * 2 + 8);
    if is_word_char(first) {
        pattern.push_str(r"\b");
    }
    for c in literal.chars() {
        if is_delineating(c) {
            pattern.push_str(DELINEATOR_CLASS);
        } else {
            let mut buf = [0u8; 4];
            pattern.push_str(&regex::escape(c.encode_utf8(&mut buf)));
        }
    }
    if is_word_char(last) {
        pattern.push_str(r"\b");
    }
    Some(pattern)
}

struct CompiledSelection {
    selection: usize,
    regex: Regex,
    /// Literal starts with a non-delineating char
    guard_start: bool,
    /// Literal ends with a non-delineating char
    guard_end: bool,
}

impl CompiledSelection {
    /// Hit spans whole tokens: guarded ends border a delineator or the edge
    fn is_whole_token(&self, haystack: &str, start: usize, end: usize) -> bool {
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        (!self.guard_start || before.map_or(true, is_delineating))
            && (!self.guard_end || after.map_or(true, is_delineating))
    }
}

/// Precompiled patterns for every exact selection
pub struct ExactMatcher {
    compiled: Vec<CompiledSelection>,
    budget: Duration,
}

impl ExactMatcher {
    /// Compile patterns for the selections with tolerance ≤ 0.
    ///
    /// Empty literals can never match and are skipped. Patterns may grow up
    /// to `PATTERN_SIZE_LIMIT` bytes once compiled.
    pub fn new(selections: &[Selection], budget: Duration) -> Result<Self> {
        let mut compiled = Vec::new();

        for (index, selection) in selections.iter().enumerate() {
            if selection.is_fuzzy() {
                continue;
            }
            let Some(source) = pattern_for(&selection.text) else {
                continue;
            };
            let (Some(first), Some(last)) =
                (selection.text.chars().next(), selection.text.chars().next_back())
            else {
                continue;
            };
            let regex = RegexBuilder::new(&source)
                .case_insensitive(!selection.case_sensitive)
                .size_limit(PATTERN_SIZE_LIMIT)
                .build()
                .map_err(|source| LookupError::Pattern {
                    term: selection.text.clone(),
                    source,
                })?;
            compiled.push(CompiledSelection {
                selection: index,
                regex,
                guard_start: !is_delineating(first),
                guard_end: !is_delineating(last),
            });
        }

        Ok(Self { compiled, budget })
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Record every occurrence of every exact selection in `text`.
    ///
    /// `lead` is the number of chars trimmed off the front of the caller's
    /// text and is added to every offset. Stops early once the aggregator is
    /// full.
    pub fn scan(
        &self,
        selections: &[Selection],
        text: &IndexedText<'_>,
        lead: usize,
        aggregator: &mut Aggregator,
        cancel: &CancellationFlag,
    ) -> Result<()> {
        let haystack = text.as_str();

        for compiled in &self.compiled {
            if cancel.is_cancelled() {
                return Err(LookupError::Cancelled);
            }

            let selection = &selections[compiled.selection];
            let deadline = Instant::now() + self.budget;
            let mut at = 0;

            while let Some(found) = compiled.regex.find_at(haystack, at) {
                if Instant::now() >= deadline {
                    return Err(LookupError::MatchTimeout {
                        term: selection.text.clone(),
                        budget: self.budget,
                    });
                }

                if compiled.is_whole_token(haystack, found.start(), found.end()) {
                    let detail = MatchDetail {
                        text: found.as_str().to_string(),
                        offset: text.char_index(found.start()) + lead,
                        length: found.as_str().chars().count(),
                        match_distance: 0.0,
                    };
                    if !aggregator.record(selection.entity, detail) {
                        return Ok(());
                    }
                }

                // step one char past the match start so overlapping
                // occurrences are found too
                let step = haystack[found.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                at = found.start() + step;
                if at > haystack.len() {
                    break;
                }
            }
        }

        Ok(())
    }
}
