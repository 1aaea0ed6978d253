//! Fuzzy matching for selections with a positive tolerance
//!
//! Every candidate window from the tokenizer is normalized with each fuzzy
//! selection's settings and compared by Damerau-Levenshtein distance, where
//! accent-only edits cost half an edit.

use tracing::warn;

use crate::error::{LookupError, Result};
use crate::lookup::results::{Aggregator, MatchDetail};
use crate::lookup::CancellationFlag;

use super::normalize::{fold_chars, normalize, FoldedChar};
use super::selection::Selection;
use super::tokenizer::{Candidates, IndexedText};

const EDIT_COST: f64 = 1.0;
const ACCENT_EDIT_COST: f64 = 0.5;

/// Damerau-Levenshtein distance (optimal string alignment) with half-cost
/// accent edits.
///
/// - substituting characters that differ only by diacritics costs 0.5
/// - inserting or deleting where exactly one of the aligned characters is a
///   combining mark costs 0.5
/// - everything else, including adjacent transposition, costs 1
pub fn damerau_levenshtein(a: &[char], b: &[char]) -> f64 {
    folded_distance(&fold_chars(a), &fold_chars(b))
}

/// Distance over pre-folded chars; the cell loop does no Unicode lookups
fn folded_distance(a: &[FoldedChar], b: &[FoldedChar]) -> f64 {
    if a.is_empty() {
        return b.len() as f64;
    }
    if b.is_empty() {
        return a.len() as f64;
    }

    let width = b.len() + 1;
    let mut d = vec![0.0f64; (a.len() + 1) * width];
    let at = |i: usize, j: usize| i * width + j;

    for i in 0..=a.len() {
        d[at(i, 0)] = i as f64;
    }
    for j in 0..=b.len() {
        d[at(0, j)] = j as f64;
    }

    for i in 0..a.len() {
        for j in 0..b.len() {
            let substitution = if a[i].ch == b[j].ch {
                0.0
            } else if a[i].same_base(&b[j]) {
                ACCENT_EDIT_COST
            } else {
                EDIT_COST
            };

            let indel = if a[i].accent ^ b[j].accent {
                ACCENT_EDIT_COST
            } else {
                EDIT_COST
            };

            let mut best = (d[at(i, j + 1)] + indel)
                .min(d[at(i + 1, j)] + indel)
                .min(d[at(i, j)] + substitution);

            if i > 0 && j > 0 && a[i].ch == b[j - 1].ch && b[j].ch == a[i - 1].ch {
                best = best.min(d[at(i - 1, j - 1)] + substitution);
            }

            d[at(i + 1, j + 1)] = best;
        }
    }

    d[at(a.len(), b.len())]
}

struct ActiveSelection {
    /// Index into the engine's selection list
    selection: usize,
    folded: Vec<FoldedChar>,
}

/// Scans candidate windows against the fuzzy selections
pub struct FuzzyMatcher {
    active: Vec<ActiveSelection>,
    max_words: usize,
}

impl FuzzyMatcher {
    /// Pick out the fuzzy selections that can match a candidate window.
    ///
    /// Literals whose normalized form spans several words, or is empty, never
    /// take part in the fuzzy pass.
    pub fn new(selections: &[Selection], max_words: usize) -> Self {
        let mut active = Vec::new();

        for (index, selection) in selections.iter().enumerate() {
            if !selection.is_fuzzy() {
                continue;
            }
            if selection.normalized().is_empty() {
                warn!(
                    term = %selection.text,
                    "Fuzzy lookup term is empty after normalization and will never match"
                );
                continue;
            }
            if selection.spans_words() {
                warn!(term = %selection.text, "Multi-word fuzzy lookup term will never match");
                continue;
            }
            active.push(ActiveSelection {
                selection: index,
                folded: fold_chars(selection.normalized()),
            });
        }

        Self { active, max_words }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Record every candidate within tolerance of a fuzzy selection.
    ///
    /// Offsets are shifted by `lead` chars. Cancellation is checked before
    /// each candidate; the scan stops early once the aggregator is full.
    pub fn scan(
        &self,
        selections: &[Selection],
        text: &IndexedText<'_>,
        lead: usize,
        aggregator: &mut Aggregator,
        cancel: &CancellationFlag,
    ) -> Result<()> {
        if self.active.is_empty() || text.char_len() == 0 {
            return Ok(());
        }

        for candidate in Candidates::new(text, self.max_words) {
            if cancel.is_cancelled() {
                return Err(LookupError::Cancelled);
            }

            // at most four normalized forms per candidate
            let mut forms: [Option<Vec<FoldedChar>>; 4] = Default::default();

            for active in &self.active {
                let selection = &selections[active.selection];
                let slot = usize::from(selection.case_sensitive) * 2
                    + usize::from(selection.accent_sensitive);
                let form = forms[slot].get_or_insert_with(|| {
                    normalize(
                        candidate.text,
                        selection.case_sensitive,
                        selection.accent_sensitive,
                    )
                    .chars()
                    .map(FoldedChar::new)
                    .collect()
                });

                let distance = folded_distance(form, &active.folded);
                if distance <= selection.effective_tolerance() as f64 {
                    let detail = MatchDetail {
                        text: candidate.text.to_string(),
                        offset: candidate.offset + lead,
                        length: candidate.text.chars().count(),
                        match_distance: distance,
                    };
                    if !aggregator.record(selection.entity, detail) {
                        return Ok(());
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Entity};
    use crate::config::MatchDefaults;
    use crate::matching::selection::expand_selections;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn distance(a: &str, b: &str) -> f64 {
        damerau_levenshtein(&chars(a), &chars(b))
    }

    #[test]
    fn test_damerau_basic_edits() {
        assert_eq!(distance("hello", "hello"), 0.0);
        assert_eq!(distance("hello", "helo"), 1.0);
        assert_eq!(distance("helo", "hello"), 1.0);
        assert_eq!(distance("hello", "hallo"), 1.0);
        assert_eq!(distance("kitten", "sitting"), 3.0);
    }

    #[test]
    fn test_damerau_transposition() {
        assert_eq!(distance("ab", "ba"), 1.0);
        assert_eq!(distance("brwon", "brown"), 1.0);
    }

    #[test]
    fn test_damerau_empty_sides() {
        assert_eq!(distance("", "abc"), 3.0);
        assert_eq!(distance("abc", ""), 3.0);
        assert_eq!(distance("", ""), 0.0);
    }

    #[test]
    fn test_accent_substitution_is_half_cost() {
        assert_eq!(distance("héllo", "hello"), 0.5);
        assert_eq!(distance("naïve", "naive"), 0.5);
    }

    #[test]
    fn test_combining_mark_removal_is_half_cost() {
        assert_eq!(distance("he\u{0301}llo", "hello"), 0.5);
    }

    #[test]
    fn test_folded_distance_matches_char_distance() {
        let pairs = [("zażółć", "zazolc"), ("gęślą", "gesla"), ("jaźń", "jazn"), ("łódź", "lodz")];
        for (a, b) in pairs {
            let folded = folded_distance(&fold_chars(&chars(a)), &fold_chars(&chars(b)));
            assert_eq!(folded, distance(a, b), "{} / {}", a, b);
        }
        // ż, ó, ć are decomposable; ł has no decomposition and costs a full edit
        assert_eq!(distance("zażółć", "zazolc"), 2.5);
    }

    #[test]
    fn test_long_accented_text_scan() {
        let catalog = Catalog::new(vec![
            Entity::named("gęślą").with_fuzzy_edit_distance(2),
            Entity::named("jaźń").with_fuzzy_edit_distance(1),
        ]);
        let text = "zażółć gęślą jaźń ".repeat(500);
        let found = scan(&catalog, &text);
        let exact_hits = found.iter().filter(|m| m.match_distance == 0.0).count();
        assert_eq!(exact_hits, 1000);
    }

    fn scan(catalog: &Catalog, text: &str) -> Vec<MatchDetail> {
        let selections = expand_selections(catalog, &MatchDefaults::default());
        let matcher = FuzzyMatcher::new(&selections, 5);
        let mut aggregator = Aggregator::new(None);
        matcher
            .scan(
                &selections,
                &IndexedText::new(text),
                0,
                &mut aggregator,
                &CancellationFlag::new(),
            )
            .unwrap();
        aggregator
            .into_report(catalog)
            .entities
            .into_iter()
            .flat_map(|e| e.matches)
            .collect()
    }

    #[test]
    fn test_scan_finds_misspelling() {
        let catalog = Catalog::new(vec![Entity::named("brwn").with_fuzzy_edit_distance(1)]);
        let found = scan(&catalog, "The brown fox jumped over the river");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "brown");
        assert_eq!(found[0].offset, 4);
        assert_eq!(found[0].match_distance, 1.0);
    }

    #[test]
    fn test_scan_case_folding_is_free() {
        let catalog = Catalog::new(vec![Entity::named("the").with_fuzzy_edit_distance(1)]);
        let found = scan(&catalog, "The brown fox jumped over the river");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|m| m.match_distance == 0.0));
    }

    #[test]
    fn test_scan_skips_multi_word_terms() {
        let catalog = Catalog::new(vec![Entity::named("once upon").with_fuzzy_edit_distance(1)]);
        let selections = expand_selections(&catalog, &MatchDefaults::default());
        assert!(FuzzyMatcher::new(&selections, 5).is_empty());
        assert!(scan(&catalog, "once upon a time").is_empty());
    }

    #[test]
    fn test_exact_selections_are_not_active() {
        let catalog = Catalog::from_words(["alpha"]);
        let selections = expand_selections(&catalog, &MatchDefaults::default());
        assert!(FuzzyMatcher::new(&selections, 5).is_empty());
    }

    #[test]
    fn test_scan_checks_cancellation() {
        let catalog = Catalog::new(vec![Entity::named("alpha").with_fuzzy_edit_distance(1)]);
        let selections = expand_selections(&catalog, &MatchDefaults::default());
        let matcher = FuzzyMatcher::new(&selections, 5);
        let cancel = CancellationFlag::new();
        cancel.cancel();

        let result = matcher.scan(
            &selections,
            &IndexedText::new("alpha beta"),
            0,
            &mut Aggregator::new(None),
            &cancel,
        );
        assert!(matches!(result, Err(LookupError::Cancelled)));
    }
}
