//! Fundamental token types and the logos scanner that produces them.
//!
//! Every tokenizer boundary in the crate comes from [`scan_token_lengths`] or
//! [`token_length_at`]. Both are built on the same logos automaton and the same
//! run cap, so a [`Tokenizer`](super::Tokenizer) and a
//! [`SimpleTokenIterator`](super::SimpleTokenIterator) always agree on where
//! tokens start and end.

use logos::Logos;

/// The longest a single token may be, in bytes. Longer runs are split into
/// several tokens of the same type.
pub const MAX_TOKEN_LENGTH: usize = 255;

/// The character category a token belongs to.
///
/// - Text: ASCII letters, digits, and anything beyond ASCII.
/// - Whitespace: spaces and tabs.
/// - LineBreak: CR, LF, or CR+LF as a single token.
/// - Symbol: any other character, always one per token.
/// - Null: used for iterators that are out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FundamentalType {
    #[default]
    Null,
    Text,
    Whitespace,
    LineBreak,
    Symbol,
}

impl FundamentalType {
    /// Returns the fundamental type of a single character.
    pub fn of(character: char) -> Self {
        if character.is_ascii_alphanumeric() || !character.is_ascii() {
            FundamentalType::Text
        } else if character == ' ' || character == '\t' {
            FundamentalType::Whitespace
        } else if character == '\n' || character == '\r' {
            FundamentalType::LineBreak
        } else {
            FundamentalType::Symbol
        }
    }
}

/// Logos token enum - one variant per [`FundamentalType`]
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    #[regex(r"[a-zA-Z0-9\x{80}-\x{10FFFF}]+")]
    Text,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r\n|\r|\n")]
    LineBreak,

    #[regex(r"[^a-zA-Z0-9 \t\r\n\x{80}-\x{10FFFF}]")]
    Symbol,
}

/// Length of the first token of a run, honoring [`MAX_TOKEN_LENGTH`] without
/// splitting a multi-byte character.
fn capped_length(run: &str) -> usize {
    if run.len() <= MAX_TOKEN_LENGTH {
        return run.len();
    }

    let mut length = MAX_TOKEN_LENGTH;
    while !run.is_char_boundary(length) {
        length -= 1;
    }
    length
}

/// Splits the whole text into token lengths.
pub(crate) fn scan_token_lengths(text: &str) -> Vec<u8> {
    // Random guess, almost always too low, but closer than the default.
    let mut lengths = Vec::with_capacity(8 + text.len() / 20);
    let mut lexer = RawToken::lexer(text);

    while let Some(token) = lexer.next() {
        let mut run = lexer.slice();

        if token.is_err() {
            // The patterns cover every character, but stay lossless regardless.
            for character in run.chars() {
                lengths.push(character.len_utf8() as u8);
            }
            continue;
        }

        while !run.is_empty() {
            let length = capped_length(run);
            lengths.push(length as u8);
            run = &run[length..];
        }
    }

    lengths
}

/// Length of the token starting at `index`, or zero if `index` is at or past
/// the end of the text.
pub(crate) fn token_length_at(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return 0;
    }

    let mut lexer = RawToken::lexer(&text[index..]);

    match lexer.next() {
        Some(Ok(_)) => capped_length(lexer.slice()),
        Some(Err(())) => lexer.slice().chars().next().map_or(1, char::len_utf8),
        None => 0,
    }
}
