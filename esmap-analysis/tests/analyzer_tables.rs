//! Token tables for the tester's default examples.
//!
//! These mirror the reference tables character for character; the default
//! examples are what users see before typing anything, so their offsets are
//! load-bearing display data.

use esmap_analysis::tokenize::{tokenize, AnalyzerKind, Token};
use rstest::rstest;

fn table(entries: &[(&str, usize, usize)]) -> Vec<Token> {
    entries
        .iter()
        .enumerate()
        .map(|(position, (token, start, end))| Token::new(token, position, *start, *end))
        .collect()
}

#[rstest]
#[case::standard(
    AnalyzerKind::Standard,
    "The quick brown fox jumps over the lazy dog.",
    &[
        ("the", 0, 3), ("quick", 4, 9), ("brown", 10, 15), ("fox", 16, 19),
        ("jumps", 20, 25), ("over", 26, 30), ("the", 31, 34), ("lazy", 35, 39),
        ("dog", 40, 43),
    ]
)]
#[case::simple(
    AnalyzerKind::Simple,
    "The quick brown-fox jumps over the lazy dog.",
    &[
        ("the", 0, 3), ("quick", 4, 9), ("brown", 10, 15), ("fox", 16, 19),
        ("jumps", 20, 25), ("over", 26, 30), ("the", 31, 34), ("lazy", 35, 39),
        ("dog", 40, 43),
    ]
)]
#[case::whitespace(
    AnalyzerKind::Whitespace,
    "The quick brown-fox jumps over the lazy dog.",
    &[
        ("The", 0, 3), ("quick", 4, 9), ("brown-fox", 10, 19), ("jumps", 20, 25),
        ("over", 26, 30), ("the", 31, 34), ("lazy", 35, 39), ("dog.", 40, 44),
    ]
)]
#[case::keyword(
    AnalyzerKind::Keyword,
    "The quick brown fox jumps over the lazy dog.",
    &[("The quick brown fox jumps over the lazy dog.", 0, 44)]
)]
#[case::pattern(
    AnalyzerKind::Pattern,
    "The quick, brown-fox jumps over the lazy dog.",
    &[
        ("the", 0, 3), ("quick", 4, 9), ("brown", 11, 16), ("fox", 17, 20),
        ("jumps", 21, 26), ("over", 27, 31), ("the", 32, 35), ("lazy", 36, 40),
        ("dog", 41, 44),
    ]
)]
fn default_example_tokenizes_to_the_reference_table(
    #[case] kind: AnalyzerKind,
    #[case] text: &str,
    #[case] expected: &[(&str, usize, usize)],
) {
    assert_eq!(kind.example_text(), text);
    assert_eq!(tokenize(&kind, text), table(expected));
    assert_eq!(kind.example_tokens(), table(expected));
}

#[test]
fn uax_url_email_example_keeps_addresses_intact() {
    let kind = AnalyzerKind::UaxUrlEmail;
    let expected = table(&[
        ("contact", 0, 7),
        ("us", 8, 10),
        ("at", 11, 13),
        ("support@example.com", 14, 33),
        ("or", 34, 36),
        ("visit", 37, 42),
        ("https://example.com", 43, 62),
    ]);
    assert_eq!(kind.example_tokens(), expected);

    // The live preview cannot produce that table: it splits on '@', '.' and
    // '/', which is exactly why the example table is fixed data.
    assert_ne!(tokenize(&kind, kind.example_text()), expected);
}
