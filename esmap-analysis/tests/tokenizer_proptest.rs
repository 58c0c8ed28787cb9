//! Property-based tests for the tokenizer preview.
//!
//! The preview promises "plausible, deterministic, offset-accurate for the
//! simplified rule": whatever the input, token offsets are monotonically
//! increasing, non-overlapping, and name the exact substring of the scanned
//! text. Inputs are printable ASCII so the scanned text and the original
//! have identical character counts.

use esmap_analysis::tokenize::{placeholder_tokens, tokenize, AnalyzerKind, Token};
use proptest::prelude::*;

fn is_placeholder(tokens: &[Token]) -> bool {
    tokens == placeholder_tokens()
}

fn assert_offsets_cover(tokens: &[Token], scanned: &str) {
    let chars: Vec<char> = scanned.chars().collect();
    let mut previous_end = 0;
    for (index, token) in tokens.iter().enumerate() {
        assert_eq!(token.position, index);
        assert!(token.start_offset >= previous_end, "offsets overlap");
        assert!(token.end_offset > token.start_offset, "empty span");
        assert!(token.end_offset <= chars.len(), "span exceeds input");
        let slice: String = chars[token.start_offset..token.end_offset].iter().collect();
        assert_eq!(slice, token.token, "offset does not name the token text");
        previous_end = token.end_offset;
    }
}

proptest! {
    #[test]
    fn tokenization_never_returns_an_empty_list(input in "[ -~]{0,60}") {
        for kind in AnalyzerKind::builtin() {
            prop_assert!(!tokenize(&kind, &input).is_empty());
        }
    }

    #[test]
    fn whitespace_offsets_name_exact_substrings(input in "[ -~]{0,60}") {
        let tokens = tokenize(&AnalyzerKind::Whitespace, &input);
        if !is_placeholder(&tokens) {
            assert_offsets_cover(&tokens, &input);
        }
    }

    #[test]
    fn standard_offsets_name_lowercased_substrings(input in "[ -~]{0,60}") {
        let tokens = tokenize(&AnalyzerKind::Standard, &input);
        if !is_placeholder(&tokens) {
            assert_offsets_cover(&tokens, &input.to_lowercase());
        }
    }

    #[test]
    fn keyword_is_the_identity_token(input in "[ -~]{1,60}") {
        let tokens = tokenize(&AnalyzerKind::Keyword, &input);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].token.as_str(), input.as_str());
        prop_assert_eq!(tokens[0].end_offset, input.chars().count());
    }

    #[test]
    fn tokenization_is_deterministic(input in "[ -~]{0,60}") {
        for kind in AnalyzerKind::builtin() {
            prop_assert_eq!(tokenize(&kind, &input), tokenize(&kind, &input));
        }
    }
}
