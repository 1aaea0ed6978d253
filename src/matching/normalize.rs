//! Text normalization shared by the exact and fuzzy matchers
//!
//! Two character classes drive everything else:
//! - delineating characters (whitespace, separators, punctuation) mark word
//!   boundaries and are trimmed from both ends of normalized text
//! - accents (non-spacing and spacing combining marks) are dropped when a
//!   selection is accent-insensitive

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Regex class for delineating characters
pub const DELINEATOR_CLASS: &str = r"[\s\p{Z}\p{P}]";

static DELINEATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}$", DELINEATOR_CLASS)).unwrap());

static ACCENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\p{Mn}\p{Mc}]$").unwrap());

fn class_matches(re: &Regex, c: char) -> bool {
    let mut buf = [0u8; 4];
    re.is_match(c.encode_utf8(&mut buf))
}

/// Whitespace, Unicode separator or punctuation
pub fn is_delineating(c: char) -> bool {
    if c.is_ascii() {
        return c.is_whitespace() || (c.is_ascii_punctuation() && !is_ascii_symbol(c));
    }
    c.is_whitespace() || class_matches(&DELINEATOR_RE, c)
}

/// ASCII punctuation that Unicode files under symbols rather than punctuation
fn is_ascii_symbol(c: char) -> bool {
    matches!(c, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~')
}

/// Combining diacritic (general category Mn or Mc)
pub fn is_accent(c: char) -> bool {
    !c.is_ascii() && class_matches(&ACCENT_RE, c)
}

/// A character with its accent class and diacritic-free base worked out
/// once, for comparisons repeated across a distance table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedChar {
    pub ch: char,
    pub accent: bool,
    base: String,
}

impl FoldedChar {
    pub fn new(ch: char) -> Self {
        if ch.is_ascii() {
            return Self {
                ch,
                accent: false,
                base: ch.to_string(),
            };
        }
        Self {
            ch,
            accent: is_accent(ch),
            base: std::iter::once(ch).nfd().filter(|m| !is_accent(*m)).collect(),
        }
    }

    /// Same character once canonically decomposed and stripped of marks
    pub fn same_base(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

/// Fold every char of a normalized form
pub fn fold_chars(chars: &[char]) -> Vec<FoldedChar> {
    chars.iter().copied().map(FoldedChar::new).collect()
}

/// True when two characters differ only by diacritics, e.g. `é` and `e`.
///
/// Both sides are canonically decomposed and their combining marks dropped
/// before comparing.
pub fn equals_modulo_diacritics(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    if a.is_ascii() && b.is_ascii() {
        return false;
    }
    FoldedChar::new(a).same_base(&FoldedChar::new(b))
}

/// Remove combining marks, leaving precomposed characters untouched
pub fn strip_diacritics(text: &str) -> String {
    text.chars().filter(|c| !is_accent(*c)).collect()
}

/// Trim delineating characters from both ends
pub fn trim_delineating(text: &str) -> &str {
    text.trim_matches(is_delineating)
}

/// Normalize text for distance comparison.
///
/// Lower-cases unless `case_sensitive`, strips combining marks unless
/// `accent_sensitive`, then trims boundary delineators.
pub fn normalize(text: &str, case_sensitive: bool, accent_sensitive: bool) -> String {
    let folded = if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    };

    let stripped = if accent_sensitive {
        folded
    } else {
        strip_diacritics(&folded)
    };

    trim_delineating(&stripped).to_string()
}
