//! Approximate tokenizer preview.
//!
//! This is a teaching aid, not a real analyzer: the rules below produce a
//! plausible, deterministic token stream with accurate offsets for the
//! simplified rule, and nothing more. Offsets are character offsets into
//! the scanned text (the original text for `whitespace`, its lowercased
//! form for the delimiter-based kinds), end-exclusive.

use serde::Serialize;
use std::fmt;

/// Analyzer kinds the preview understands. Unknown names fall through to
/// [`AnalyzerKind::Other`], which tokenizes like `standard`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerKind {
    Standard,
    Simple,
    Whitespace,
    Keyword,
    Pattern,
    UaxUrlEmail,
    Other(String),
}

impl AnalyzerKind {
    /// The built-in kinds, in the order the tester lists them.
    pub fn builtin() -> [AnalyzerKind; 6] {
        [
            AnalyzerKind::Standard,
            AnalyzerKind::Simple,
            AnalyzerKind::Whitespace,
            AnalyzerKind::Keyword,
            AnalyzerKind::Pattern,
            AnalyzerKind::UaxUrlEmail,
        ]
    }

    pub fn from_name(name: &str) -> AnalyzerKind {
        match name {
            "standard" => AnalyzerKind::Standard,
            "simple" => AnalyzerKind::Simple,
            "whitespace" => AnalyzerKind::Whitespace,
            "keyword" => AnalyzerKind::Keyword,
            "pattern" => AnalyzerKind::Pattern,
            "uax_url_email" => AnalyzerKind::UaxUrlEmail,
            other => AnalyzerKind::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AnalyzerKind::Standard => "standard",
            AnalyzerKind::Simple => "simple",
            AnalyzerKind::Whitespace => "whitespace",
            AnalyzerKind::Keyword => "keyword",
            AnalyzerKind::Pattern => "pattern",
            AnalyzerKind::UaxUrlEmail => "uax_url_email",
            AnalyzerKind::Other(name) => name,
        }
    }

    /// Translation key for the tester's per-kind description line.
    pub fn description_key(&self) -> String {
        format!("analyzerTester.{}Description", self.name())
    }

    /// The default example sentence shown before the user types anything.
    pub fn example_text(&self) -> &'static str {
        match self {
            AnalyzerKind::Simple | AnalyzerKind::Whitespace => {
                "The quick brown-fox jumps over the lazy dog."
            }
            AnalyzerKind::Pattern => "The quick, brown-fox jumps over the lazy dog.",
            AnalyzerKind::UaxUrlEmail => {
                "Contact us at support@example.com or visit https://example.com"
            }
            _ => "The quick brown fox jumps over the lazy dog.",
        }
    }

    /// Token table for the default example.
    ///
    /// Every kind derives its table from [`tokenize`] except
    /// `uax_url_email`, whose example keeps e-mail addresses and URLs
    /// intact — something the approximation cannot produce, so its table is
    /// fixed data.
    pub fn example_tokens(&self) -> Vec<Token> {
        match self {
            AnalyzerKind::UaxUrlEmail => vec![
                Token::new("contact", 0, 0, 7),
                Token::new("us", 1, 8, 10),
                Token::new("at", 2, 11, 13),
                Token::new("support@example.com", 3, 14, 33),
                Token::new("or", 4, 34, 36),
                Token::new("visit", 5, 37, 42),
                Token::new("https://example.com", 6, 43, 62),
            ],
            kind => tokenize(kind, kind.example_text()),
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One preview token: the literal substring, its occurrence index, and its
/// character offsets in the scanned text (end-exclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub token: String,
    pub position: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Token {
    pub fn new(token: &str, position: usize, start_offset: usize, end_offset: usize) -> Self {
        Token {
            token: token.to_string(),
            position,
            start_offset,
            end_offset,
        }
    }
}

/// Delimiters for the lowercasing kinds, in addition to whitespace.
const DELIMITERS: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '\'', '"', '/', '\\', '-',
];

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || DELIMITERS.contains(&c)
}

/// Tokenize `text` under the simplified rule for `kind`.
///
/// An empty result (empty or whitespace-only input) substitutes the fixed
/// placeholder sequence from [`placeholder_tokens`] — a UI fallback, not a
/// tokenizer rule.
pub fn tokenize(kind: &AnalyzerKind, text: &str) -> Vec<Token> {
    let tokens = match kind {
        AnalyzerKind::Keyword => keyword_tokens(text),
        AnalyzerKind::Whitespace => scan_tokens(text, char::is_whitespace),
        _ => scan_tokens(&text.to_lowercase(), is_delimiter),
    };

    if tokens.is_empty() {
        placeholder_tokens()
    } else {
        tokens
    }
}

/// The fixed "no tokenization result" sequence, offsets included. Display
/// data, kept stable so downstream views can rely on it.
pub fn placeholder_tokens() -> Vec<Token> {
    vec![
        Token::new("토큰화", 0, 0, 3),
        Token::new("결과가", 1, 4, 7),
        Token::new("없습니다", 2, 8, 11),
    ]
}

fn keyword_tokens(text: &str) -> Vec<Token> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![Token {
        token: text.to_string(),
        position: 0,
        start_offset: 0,
        end_offset: text.chars().count(),
    }]
}

/// Split `text` on `split` characters and locate each part with an
/// incremental first-match scan: the search for a part starts at the end
/// offset of the previous token, so repeated substrings land on distinct,
/// non-overlapping offsets.
fn scan_tokens(text: &str, split: impl Fn(char) -> bool) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for part in text.split(|c: char| split(c)).filter(|p| !p.is_empty()) {
        let needle: Vec<char> = part.chars().collect();
        let Some(start) = find_from(&chars, &needle, cursor) else {
            continue;
        };
        let end = start + needle.len();
        tokens.push(Token {
            token: part.to_string(),
            position: tokens.len(),
            start_offset: start,
            end_offset: end,
        });
        cursor = end;
    }

    tokens
}

/// First occurrence of `needle` in `haystack` at or after `from`.
fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(kind: &AnalyzerKind, text: &str) -> Vec<(String, usize, usize)> {
        tokenize(kind, text)
            .into_iter()
            .map(|t| (t.token, t.start_offset, t.end_offset))
            .collect()
    }

    #[test]
    fn keyword_spans_the_whole_string() {
        let result = tokenize(&AnalyzerKind::Keyword, "The quick brown fox jumps over the lazy dog.");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].token, "The quick brown fox jumps over the lazy dog.");
        assert_eq!(result[0].start_offset, 0);
        assert_eq!(result[0].end_offset, 44);
    }

    #[test]
    fn whitespace_preserves_case_and_punctuation() {
        let result = tokenize(&AnalyzerKind::Whitespace, "The quick brown-fox jumps");
        let texts: Vec<_> = result.iter().map(|t| t.token.as_str()).collect();
        assert_eq!(texts, ["The", "quick", "brown-fox", "jumps"]);

        // Offsets are monotonically increasing, non-overlapping, and each
        // names the exact substring of the input.
        let input: Vec<char> = "The quick brown-fox jumps".chars().collect();
        let mut previous_end = 0;
        for token in &result {
            assert!(token.start_offset >= previous_end);
            assert!(token.end_offset > token.start_offset);
            let slice: String = input[token.start_offset..token.end_offset].iter().collect();
            assert_eq!(slice, token.token);
            previous_end = token.end_offset;
        }
    }

    #[test]
    fn standard_lowercases_and_splits_on_delimiters() {
        assert_eq!(
            tokens(&AnalyzerKind::Standard, "Hello, World!"),
            [("hello".to_string(), 0, 5), ("world".to_string(), 7, 12)]
        );
    }

    #[test]
    fn repeated_words_advance_through_the_text() {
        let result = tokenize(&AnalyzerKind::Standard, "the the the");
        assert_eq!(
            result
                .iter()
                .map(|t| (t.start_offset, t.end_offset))
                .collect::<Vec<_>>(),
            [(0, 3), (4, 7), (8, 11)]
        );
        assert_eq!(result.iter().map(|t| t.position).collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn empty_input_yields_the_placeholder_sequence() {
        assert_eq!(tokenize(&AnalyzerKind::Standard, ""), placeholder_tokens());
        assert_eq!(tokenize(&AnalyzerKind::Keyword, ""), placeholder_tokens());
        assert_eq!(tokenize(&AnalyzerKind::Whitespace, "   \t "), placeholder_tokens());
    }

    #[test]
    fn delimiter_only_input_yields_the_placeholder_sequence() {
        assert_eq!(tokenize(&AnalyzerKind::Standard, "... --- !!!"), placeholder_tokens());
    }

    #[test]
    fn placeholder_sequence_is_verbatim() {
        let fallback = placeholder_tokens();
        assert_eq!(fallback.len(), 3);
        assert_eq!(fallback[0], Token::new("토큰화", 0, 0, 3));
        assert_eq!(fallback[1], Token::new("결과가", 1, 4, 7));
        assert_eq!(fallback[2], Token::new("없습니다", 2, 8, 11));
    }

    #[test]
    fn unknown_kinds_tokenize_like_standard() {
        let custom = AnalyzerKind::from_name("my_custom");
        assert_eq!(
            tokenize(&custom, "Hello World"),
            tokenize(&AnalyzerKind::Standard, "Hello World")
        );
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in AnalyzerKind::builtin() {
            assert_eq!(AnalyzerKind::from_name(kind.name()), kind);
        }
    }

    #[test]
    fn offsets_are_character_based() {
        // Multi-byte characters count as one offset unit each.
        let result = tokenize(&AnalyzerKind::Whitespace, "héllo wörld");
        assert_eq!(result[0].start_offset, 0);
        assert_eq!(result[0].end_offset, 5);
        assert_eq!(result[1].start_offset, 6);
        assert_eq!(result[1].end_offset, 11);
    }
}
