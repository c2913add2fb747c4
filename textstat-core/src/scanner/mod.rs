//! Whitespace tokenization with carry-over across read boundaries
//!
//! The scanner is a pure function over `(chunk, carry_in)`. Every whitespace
//! character closes the token it ends (the whitespace stays attached to the
//! token), and whatever follows the last whitespace is a tentative token that
//! becomes the carry-over for the next chunk.

mod normalizer;

pub use normalizer::{is_numeric_literal, is_punctuation, normalize};

/// Tokens produced from one chunk plus the partial token left over
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanOutput {
    /// Completed raw tokens, each ending in the whitespace that closed it
    pub tokens: Vec<String>,
    /// Trailing partial token, possibly empty
    pub carry: String,
}

/// Split text into raw tokens
///
/// The last element is the tentative token after the final whitespace and is
/// always present, even when empty.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            let end = idx + ch.len_utf8();
            tokens.push(&text[start..end]);
            start = end;
        }
    }

    tokens.push(&text[start..]);
    tokens
}

/// Scan one chunk, continuing the token carried over from the previous one
///
/// When the chunk is the last one, the returned `carry` is a real token and
/// the caller must count it.
pub fn scan_chunk(chunk: &str, carry_in: &str) -> ScanOutput {
    let mut text = String::with_capacity(carry_in.len() + chunk.len());
    text.push_str(carry_in);
    text.push_str(chunk);

    let mut tokens: Vec<String> = tokenize(&text).into_iter().map(str::to_owned).collect();
    let carry = tokens.pop().unwrap_or_default();

    ScanOutput { tokens, carry }
}

/// Running line count over a stream of text
///
/// Counts `\n`-terminated segments, plus one for a final unterminated
/// segment. Empty content has zero lines.
#[derive(Debug, Clone, Default)]
pub struct LineCounter {
    newlines: u64,
    seen_content: bool,
    ends_with_newline: bool,
}

impl LineCounter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for the next piece of text
    pub fn observe(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.newlines += text.bytes().filter(|&b| b == b'\n').count() as u64;
        self.seen_content = true;
        self.ends_with_newline = text.ends_with('\n');
    }

    /// Line count of everything observed so far
    pub fn count(&self) -> u64 {
        if self.seen_content && !self.ends_with_newline {
            self.newlines + 1
        } else {
            self.newlines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_whitespace_and_tentative_token() {
        assert_eq!(tokenize("ab cd\nef"), vec!["ab ", "cd\n", "ef"]);
        assert_eq!(tokenize("ab "), vec!["ab ", ""]);
        assert_eq!(tokenize(""), vec![""]);
        assert_eq!(tokenize("  "), vec![" ", " ", ""]);
    }

    #[test]
    fn test_scan_chunk_carries_partial_token() {
        let first = scan_chunk("the Ma", "");
        assert_eq!(first.tokens, vec!["the "]);
        assert_eq!(first.carry, "Ma");

        let second = scan_chunk("d Hatter", &first.carry);
        assert_eq!(second.tokens, vec!["Mad "]);
        assert_eq!(second.carry, "Hatter");
    }

    #[test]
    fn test_scan_chunk_split_on_whitespace() {
        let out = scan_chunk("tea ", "");
        assert_eq!(out.tokens, vec!["tea "]);
        assert_eq!(out.carry, "");

        let out = scan_chunk("", "party");
        assert!(out.tokens.is_empty());
        assert_eq!(out.carry, "party");
    }

    #[test]
    fn test_scan_chunk_multibyte() {
        let out = scan_chunk("naïve café\u{3000}終", "");
        assert_eq!(out.tokens, vec!["naïve ", "café\u{3000}"]);
        assert_eq!(out.carry, "終");
    }

    #[test]
    fn test_line_counter() {
        let cases = [
            ("", 0),
            ("\n", 1),
            ("one", 1),
            ("one\n", 1),
            ("one\ntwo", 2),
            ("one\ntwo\n", 2),
            ("\n\n\n", 3),
        ];
        for (text, expected) in cases {
            let mut counter = LineCounter::new();
            counter.observe(text);
            assert_eq!(counter.count(), expected, "text {text:?}");
        }
    }

    #[test]
    fn test_line_counter_accumulates_across_pieces() {
        let mut counter = LineCounter::new();
        for piece in ["on", "e\ntw", "o\n", "", "three"] {
            counter.observe(piece);
        }
        assert_eq!(counter.count(), 3);
    }
}
