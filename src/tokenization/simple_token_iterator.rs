//! A token cursor over a plain string.

use std::cmp::Ordering;

use smol_str::SmolStr;

use super::TokenIterator;
use super::fundamental::{FundamentalType, token_length_at};
use super::tokenizer::text_eq;
use crate::base::{ContractViolation, violated};

/// Walks the tokens of a string without building a [`Tokenizer`](super::Tokenizer).
///
/// Token boundaries are derived on the fly with the same rules the tokenizer
/// uses, so comparing one of these against a [`TokenIterator`] is reliable.
/// There are no classification overlays and it can only move forward.
#[derive(Debug, Clone, Copy)]
pub struct SimpleTokenIterator<'a> {
    raw_text: &'a str,
    raw_text_index: usize,
    token_length: usize,
}

#[allow(clippy::should_implement_trait)]
impl<'a> SimpleTokenIterator<'a> {
    pub fn new(raw_text: &'a str) -> Self {
        Self::at_offset(raw_text, 0)
    }

    /// Starts at a byte offset, which must be the start of a token. Offsets
    /// past the end are clamped to the end.
    ///
    /// # Panics
    ///
    /// If the offset falls inside a character. Debug builds also panic if it
    /// falls inside a token.
    pub fn at_offset(raw_text: &'a str, offset: usize) -> Self {
        if offset < raw_text.len() && !raw_text.is_char_boundary(offset) {
            violated(ContractViolation::NotOnTokenBoundary);
        }
        debug_assert!(
            is_token_start(raw_text, offset),
            "{}",
            ContractViolation::NotOnTokenBoundary
        );

        let offset = offset.min(raw_text.len());
        Self {
            raw_text,
            raw_text_index: offset,
            token_length: token_length_at(raw_text, offset),
        }
    }

    pub fn next(&mut self) -> bool {
        self.next_by(1)
    }

    /// Moves forward a number of tokens. Returns false if it moved past the end.
    pub fn next_by(&mut self, count: usize) -> bool {
        let mut count = count;

        while count > 0 && self.raw_text_index < self.raw_text.len() {
            self.raw_text_index += self.token_length;
            self.token_length = token_length_at(self.raw_text, self.raw_text_index);
            count -= 1;
        }

        self.is_in_bounds()
    }

    /// Moves forward past whitespace. Returns whether it moved.
    pub fn next_past_whitespace(&mut self) -> bool {
        let start = self.raw_text_index;
        while self.fundamental_type() == FundamentalType::Whitespace {
            self.next();
        }
        self.raw_text_index != start
    }

    /// Moves forward past whitespace without passing `limit`. Returns whether it
    /// moved.
    pub fn next_past_whitespace_until(&mut self, limit: &SimpleTokenIterator<'_>) -> bool {
        let start = self.raw_text_index;
        while self.fundamental_type() == FundamentalType::Whitespace && *self < *limit {
            self.next();
        }
        self.raw_text_index != start
    }

    pub fn matches_token(&self, text: &str, ignore_case: bool) -> bool {
        self.is_in_bounds() && text_eq(self.token_text(), text, ignore_case)
    }

    pub fn matches_token_iterator(&self, other: &TokenIterator, ignore_case: bool) -> bool {
        other.matches_simple_token(self, ignore_case)
    }

    pub fn matches_simple_token(&self, other: &SimpleTokenIterator<'_>, ignore_case: bool) -> bool {
        self.is_in_bounds()
            && other.is_in_bounds()
            && text_eq(self.token_text(), other.token_text(), ignore_case)
    }

    pub(crate) fn token_text(&self) -> &'a str {
        &self.raw_text[self.raw_text_index..self.raw_text_index + self.token_length]
    }

    pub fn string(&self) -> SmolStr {
        SmolStr::new(self.token_text())
    }

    /// First character of the current token, or `'\0'` if out of bounds.
    pub fn character(&self) -> char {
        self.token_text().chars().next().unwrap_or('\0')
    }

    pub fn fundamental_type(&self) -> FundamentalType {
        self.token_text()
            .chars()
            .next()
            .map_or(FundamentalType::Null, FundamentalType::of)
    }

    pub fn raw_text(&self) -> &'a str {
        self.raw_text
    }

    pub fn raw_text_index(&self) -> usize {
        self.raw_text_index
    }

    /// Length of the current token in bytes, or zero if out of bounds.
    pub fn raw_text_length(&self) -> usize {
        self.token_length
    }

    pub fn is_in_bounds(&self) -> bool {
        self.raw_text_index < self.raw_text.len()
    }

    /// Whether both iterators walk the same string.
    pub fn is_same_base(&self, other: &SimpleTokenIterator<'_>) -> bool {
        std::ptr::eq(self.raw_text, other.raw_text)
    }
}

/// Whether `offset` is where a token begins when `text` is tokenized from the
/// start. The end of the text and anything past it count as a start.
fn is_token_start(text: &str, offset: usize) -> bool {
    let mut index = 0;
    while index < offset && index < text.len() {
        match token_length_at(text, index) {
            0 => return false,
            length => index += length,
        }
    }
    index == offset || offset >= text.len()
}

/// Iterators are equal when they sit at the same offset of the same string.
/// Iterators over different strings are never equal. Unlike ordering,
/// comparing them for equality is allowed and yields false.
impl PartialEq for SimpleTokenIterator<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_base(other) && self.raw_text_index == other.raw_text_index
    }
}

impl Eq for SimpleTokenIterator<'_> {}

/// # Panics
///
/// Ordering iterators over different strings is a contract violation.
impl PartialOrd for SimpleTokenIterator<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.is_same_base(other) {
            violated(ContractViolation::NotSameBase);
        }
        Some(self.raw_text_index.cmp(&other.raw_text_index))
    }
}
