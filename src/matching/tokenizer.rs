//! Candidate generation for fuzzy matching
//!
//! Produces every word (maximal run of non-delineating characters) plus every
//! window that extends a word forward by whole words, up to a configured
//! number of words per window. Offsets are char positions in the scanned
//! text.

use super::normalize::is_delineating;

/// Text indexed by char so char offsets and byte slices can be mixed freely
#[derive(Debug)]
pub struct IndexedText<'a> {
    text: &'a str,
    chars: Vec<char>,
    /// Byte offset of each char, plus `text.len()` as a sentinel
    byte_starts: Vec<usize>,
}

impl<'a> IndexedText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut byte_starts = Vec::with_capacity(text.len() + 1);
        for (i, c) in text.char_indices() {
            chars.push(c);
            byte_starts.push(i);
        }
        byte_starts.push(text.len());
        Self {
            text,
            chars,
            byte_starts,
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Slice by char range `[start, end)`
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.byte_starts[start]..self.byte_starts[end]]
    }

    /// Char index of a byte offset that lies on a char boundary
    pub fn char_index(&self, byte: usize) -> usize {
        self.byte_starts.partition_point(|&b| b < byte)
    }
}

/// A substring proposed to the fuzzy matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub text: &'a str,
    /// Char offset of the first character
    pub offset: usize,
}

/// Lazy candidate sequence over one text; create a fresh one per scan
pub struct Candidates<'t, 'a> {
    text: &'t IndexedText<'a>,
    max_words: usize,
    start: usize,
    end: usize,
    window_end: usize,
    window: usize,
    window_open: bool,
}

impl<'t, 'a> Candidates<'t, 'a> {
    pub fn new(text: &'t IndexedText<'a>, max_words: usize) -> Self {
        let chars = text.chars();
        let start = match chars.first() {
            Some(c) if is_delineating(*c) => next_word_start(chars, 0),
            _ => 0,
        };
        Self {
            text,
            max_words: max_words.max(1),
            start,
            end: 0,
            window_end: 0,
            window: 0,
            window_open: false,
        }
    }
}

impl<'t, 'a> Iterator for Candidates<'t, 'a> {
    type Item = Candidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let chars = self.text.chars();

        loop {
            if self.start >= chars.len() {
                return None;
            }

            if !self.window_open {
                self.end = next_word_end(chars, self.end + 1);
                self.window_end = self.end;
                self.window = 0;
                self.window_open = true;
            }

            let (start, end) = (self.start, self.window_end);

            let previous_end = self.window_end;
            self.window_end = next_word_end(chars, previous_end + 1);
            self.window += 1;

            // an extension that does not move means the text ran out
            if self.window_end == previous_end || self.window >= self.max_words {
                self.start = next_word_start(chars, self.start + 1);
                self.window_open = false;
            }

            let text = self.text.slice(start, end);
            if !text.chars().all(char::is_whitespace) {
                return Some(Candidate {
                    text,
                    offset: start,
                });
            }
        }
    }
}

/// First char at or after `from` that follows a delineator and starts a word
fn next_word_start(chars: &[char], from: usize) -> usize {
    (from..chars.len())
        .find(|&i| {
            is_delineating(chars[i]) && i + 1 < chars.len() && !is_delineating(chars[i + 1])
        })
        .map(|i| i + 1)
        .unwrap_or(chars.len())
}

/// First delineator at or after `from` that closes a word
fn next_word_end(chars: &[char], from: usize) -> usize {
    (from.max(1)..chars.len())
        .find(|&i| is_delineating(chars[i]) && !is_delineating(chars[i - 1]))
        .unwrap_or(chars.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(text: &str, max_words: usize) -> Vec<(String, usize)> {
        let indexed = IndexedText::new(text);
        Candidates::new(&indexed, max_words)
            .map(|c| (c.text.to_string(), c.offset))
            .collect()
    }

    #[test]
    fn test_single_word() {
        assert_eq!(candidates("hello", 5), vec![("hello".to_string(), 0)]);
    }

    #[test]
    fn test_empty_text() {
        assert!(candidates("", 5).is_empty());
    }

    #[test]
    fn test_windows_extend_forward() {
        let got = candidates("a b c", 5);
        let expected = vec![
            ("a".to_string(), 0),
            ("a b".to_string(), 0),
            ("a b c".to_string(), 0),
            ("b".to_string(), 2),
            ("b c".to_string(), 2),
            ("c".to_string(), 4),
        ];
        assert_eq!(got, expected);
    }

    #[test]
    fn test_window_size_is_capped() {
        let got = candidates("one two three four five six seven", 5);
        let from_start: Vec<_> = got.iter().filter(|(_, offset)| *offset == 0).collect();
        assert_eq!(from_start.len(), 5);
        assert_eq!(from_start[4].0, "one two three four five");

        let single = candidates("one two three", 1);
        let words: Vec<_> = single.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(words, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_runs_of_delineators() {
        let got = candidates("a  ..b", 1);
        assert_eq!(got, vec![("a".to_string(), 0), ("b".to_string(), 5)]);
    }

    #[test]
    fn test_leading_delineators() {
        let got = candidates("  ab", 5);
        assert_eq!(got, vec![("ab".to_string(), 2)]);
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        let got = candidates("héllo wörld", 1);
        assert_eq!(got[1], ("wörld".to_string(), 6));
    }

    #[test]
    fn test_restartable() {
        let indexed = IndexedText::new("x y");
        let first: Vec<_> = Candidates::new(&indexed, 5).collect();
        let second: Vec<_> = Candidates::new(&indexed, 5).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_char_index() {
        let indexed = IndexedText::new("héllo");
        assert_eq!(indexed.char_index(0), 0);
        assert_eq!(indexed.char_index(3), 2);
        assert_eq!(indexed.slice(1, 3), "él");
    }
}
