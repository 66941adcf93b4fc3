//! Token-level cursor over a [`Tokenizer`].

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex};
use smol_str::SmolStr;

use super::classification::{CommentParsingType, PrototypeParsingType, SyntaxHighlightingType};
use super::fundamental::FundamentalType;
use super::tokenizer::text_eq;
use super::{SimpleTokenIterator, Tokenizer};
use crate::base::{ContractViolation, Position, violated};

/// How [`TokenIterator::previous_past_whitespace`] decides where to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousPastWhitespaceMode {
    /// Stop on the first token that isn't whitespace.
    Iterator,
    /// Stop when the *previous* token isn't whitespace, so the iterator works
    /// as the exclusive end of a range.
    EndingBounds,
}

/// A position in a [`Tokenizer`].
///
/// Iterators may move out of bounds in either direction without failing. Moving
/// past the end leaves the iterator at the end of the text and moving before the
/// start leaves it at the start, but the token index keeps counting so that
/// moving back the same distance returns to the original token.
#[derive(Clone)]
pub struct TokenIterator {
    tokenizer: Arc<Tokenizer>,
    token_index: isize,
    raw_text_index: usize,
    line_number: usize,
}

#[allow(clippy::should_implement_trait)]
impl TokenIterator {
    pub(crate) fn new(
        tokenizer: Arc<Tokenizer>,
        token_index: isize,
        raw_text_index: usize,
        line_number: usize,
    ) -> Self {
        Self {
            tokenizer,
            token_index,
            raw_text_index,
            line_number,
        }
    }

    // ========================================================================
    // Movement
    // ========================================================================

    /// Moves forward one token. Returns false if it moved past the last token.
    pub fn next(&mut self) -> bool {
        self.next_by(1)
    }

    /// Moves forward a number of tokens, or backward if negative. Returns false
    /// if the iterator ends up out of bounds, so landing on the first token
    /// going backward returns true.
    pub fn next_by(&mut self, count: isize) -> bool {
        if count < 0 {
            return self.previous_by(-count);
        }

        let token_count = self.tokenizer.token_count() as isize;
        let mut count = count;

        if self.token_index < 0 {
            if self.token_index + count <= 0 {
                self.token_index += count;
                return self.is_in_bounds();
            }
            count += self.token_index;
            self.token_index = 0;
        }

        while count > 0 && self.token_index < token_count {
            if self.fundamental_type() == FundamentalType::LineBreak {
                self.line_number += 1;
            }
            self.raw_text_index += self.tokenizer.token_length(self.token_index as usize);
            self.token_index += 1;
            count -= 1;
        }

        self.token_index += count;
        self.is_in_bounds()
    }

    /// Moves back one token. Returns false if it moved before the first token.
    pub fn previous(&mut self) -> bool {
        self.previous_by(1)
    }

    /// Moves back a number of tokens, or forward if negative. Returns false if
    /// the iterator ends up out of bounds.
    pub fn previous_by(&mut self, count: isize) -> bool {
        if count < 0 {
            return self.next_by(-count);
        }

        let token_count = self.tokenizer.token_count() as isize;
        let mut count = count;

        if self.token_index > token_count {
            if self.token_index - count >= token_count {
                self.token_index -= count;
                return self.is_in_bounds();
            }
            count -= self.token_index - token_count;
            self.token_index = token_count;
        }

        while count > 0 && self.token_index > 0 {
            self.token_index -= 1;
            self.raw_text_index -= self.tokenizer.token_length(self.token_index as usize);
            if self.fundamental_type() == FundamentalType::LineBreak {
                self.line_number -= 1;
            }
            count -= 1;
        }

        self.token_index -= count;
        self.is_in_bounds()
    }

    /// Moves forward by a number of bytes, which must land on a token boundary.
    /// Negative values move backward.
    ///
    /// # Panics
    ///
    /// If the move would end in the middle of a token.
    pub fn next_by_characters(&mut self, characters: isize) -> bool {
        if characters < 0 {
            return self.previous_by_characters(-characters);
        }

        match self.tokens_in_characters(characters as usize) {
            Some(tokens) => self.next_by(tokens as isize),
            None => violated(ContractViolation::NotOnTokenBoundary),
        }
    }

    /// Moves backward by a number of bytes, which must land on a token boundary.
    ///
    /// # Panics
    ///
    /// If the move would end in the middle of a token.
    pub fn previous_by_characters(&mut self, characters: isize) -> bool {
        if characters < 0 {
            return self.next_by_characters(-characters);
        }

        match self.tokens_in_previous_characters(characters as usize) {
            Some(tokens) => self.previous_by(tokens as isize),
            None => violated(ContractViolation::NotOnTokenBoundary),
        }
    }

    /// Moves forward until past all whitespace tokens. Returns whether it moved.
    pub fn next_past_whitespace(&mut self) -> bool {
        if self.fundamental_type() != FundamentalType::Whitespace {
            return false;
        }
        while self.fundamental_type() == FundamentalType::Whitespace {
            self.next();
        }
        true
    }

    /// Moves forward until past all whitespace tokens or `limit` is reached.
    /// Returns whether it moved.
    pub fn next_past_whitespace_until(&mut self, limit: &TokenIterator) -> bool {
        if self.fundamental_type() != FundamentalType::Whitespace || *self >= *limit {
            return false;
        }
        loop {
            self.next();
            if self.fundamental_type() != FundamentalType::Whitespace || *self >= *limit {
                return true;
            }
        }
    }

    /// Moves backward past whitespace. Returns whether it moved.
    pub fn previous_past_whitespace(&mut self, mode: PreviousPastWhitespaceMode) -> bool {
        match mode {
            PreviousPastWhitespaceMode::Iterator => {
                if self.fundamental_type() != FundamentalType::Whitespace {
                    return false;
                }
                while self.fundamental_type() == FundamentalType::Whitespace {
                    self.previous();
                }
                true
            }
            PreviousPastWhitespaceMode::EndingBounds => {
                let mut lookbehind = self.clone();
                lookbehind.previous();
                if lookbehind.fundamental_type() != FundamentalType::Whitespace {
                    return false;
                }
                while lookbehind.fundamental_type() == FundamentalType::Whitespace {
                    *self = lookbehind.clone();
                    lookbehind.previous();
                }
                true
            }
        }
    }

    /// Moves backward past whitespace without going past `limit`. Returns
    /// whether it moved.
    pub fn previous_past_whitespace_until(
        &mut self,
        mode: PreviousPastWhitespaceMode,
        limit: &TokenIterator,
    ) -> bool {
        match mode {
            PreviousPastWhitespaceMode::Iterator => {
                if self.fundamental_type() != FundamentalType::Whitespace || *self <= *limit {
                    return false;
                }
                loop {
                    self.previous();
                    if self.fundamental_type() != FundamentalType::Whitespace || *self <= *limit {
                        return true;
                    }
                }
            }
            PreviousPastWhitespaceMode::EndingBounds => {
                let mut lookbehind = self.clone();
                lookbehind.previous();
                if lookbehind.fundamental_type() != FundamentalType::Whitespace
                    || lookbehind < *limit
                {
                    return false;
                }
                while lookbehind.fundamental_type() == FundamentalType::Whitespace
                    && lookbehind >= *limit
                {
                    *self = lookbehind.clone();
                    lookbehind.previous();
                }
                true
            }
        }
    }

    // ========================================================================
    // Boundaries
    // ========================================================================

    /// Returns how many tokens the next `character_count` bytes cover, or
    /// `None` if they don't end on a token boundary or the iterator is out of
    /// bounds. Ending one past the last token is allowed.
    pub fn tokens_in_characters(&self, character_count: usize) -> Option<usize> {
        if !self.is_in_bounds() {
            return None;
        }

        let token_count = self.tokenizer.token_count();
        let mut remaining = character_count;
        let mut index = self.token_index as usize;
        let mut tokens = 0;

        while remaining > 0 && index < token_count {
            let length = self.tokenizer.token_length(index);
            if length > remaining {
                return None;
            }
            remaining -= length;
            index += 1;
            tokens += 1;
        }

        (remaining == 0).then_some(tokens)
    }

    /// Returns how many tokens the previous `character_count` bytes cover, or
    /// `None` if they don't start on a token boundary. Works from one past the
    /// last token.
    pub fn tokens_in_previous_characters(&self, character_count: usize) -> Option<usize> {
        let token_count = self.tokenizer.token_count() as isize;
        if self.token_index < 0 || self.token_index > token_count {
            return None;
        }

        let mut remaining = character_count;
        let mut index = self.token_index as usize;
        let mut tokens = 0;

        while remaining > 0 && index > 0 {
            index -= 1;
            let length = self.tokenizer.token_length(index);
            if length > remaining {
                return None;
            }
            remaining -= length;
            tokens += 1;
        }

        (remaining == 0).then_some(tokens)
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Whether the current token is exactly `text`. Partial tokens don't match.
    pub fn matches_token(&self, text: &str, ignore_case: bool) -> bool {
        self.is_in_bounds() && text_eq(self.token_text(), text, ignore_case)
    }

    /// Runs a regular expression against the current token.
    pub fn matches_token_regex<'t>(&'t self, regex: &Regex) -> Option<Captures<'t>> {
        regex.captures(self.token_text())
    }

    /// Whether the current token has the same text as another iterator's.
    pub fn matches_token_at(&self, other: &TokenIterator, ignore_case: bool) -> bool {
        self.is_in_bounds()
            && other.is_in_bounds()
            && text_eq(self.token_text(), other.token_text(), ignore_case)
    }

    /// Whether the current token has the same text as a simple token iterator's.
    pub fn matches_simple_token(&self, other: &SimpleTokenIterator<'_>, ignore_case: bool) -> bool {
        self.is_in_bounds()
            && other.is_in_bounds()
            && text_eq(self.token_text(), other.token_text(), ignore_case)
    }

    /// Whether `text` starts at this token and ends on a token boundary, so it
    /// can match multi-token strings like `::`.
    pub fn matches_across_tokens(&self, text: &str, ignore_case: bool) -> bool {
        self.is_in_bounds()
            && self.tokens_in_characters(text.len()).is_some()
            && text_eq(self.upcoming_text(text.len()), text, ignore_case)
    }

    /// Returns the index of the first entry that matches the current token.
    pub fn matches_any_token<S: AsRef<str>>(&self, texts: &[S], ignore_case: bool) -> Option<usize> {
        if !self.is_in_bounds() {
            return None;
        }

        let token = self.token_text();
        texts
            .iter()
            .position(|text| text_eq(token, text.as_ref(), ignore_case))
    }

    /// Returns the index of the first entry that matches starting at this token,
    /// possibly across several tokens.
    pub fn matches_any_across_tokens<S: AsRef<str>>(
        &self,
        texts: &[S],
        ignore_case: bool,
    ) -> Option<usize> {
        if !self.is_in_bounds() {
            return None;
        }

        texts
            .iter()
            .position(|text| self.matches_across_tokens(text.as_ref(), ignore_case))
    }

    /// Returns the index of the first pair whose opening symbol matches starting
    /// at this token. Only the first element of each pair is compared.
    pub fn matches_any_pair_across_tokens(
        &self,
        pairs: &[(&str, &str)],
        ignore_case: bool,
    ) -> Option<usize> {
        if !self.is_in_bounds() {
            return None;
        }

        pairs
            .iter()
            .position(|(opening, _)| self.matches_across_tokens(opening, ignore_case))
    }

    /// Whether the current token is a word on its own, so `internal` in
    /// `protected_internal` doesn't count. Neighboring text tokens and
    /// underscores both join a word.
    pub fn is_standalone_word(&self) -> bool {
        if self.fundamental_type() != FundamentalType::Text {
            return false;
        }

        let joins = |neighbor: &TokenIterator| {
            neighbor.fundamental_type() == FundamentalType::Text || neighbor.character() == '_'
        };

        let mut lookahead = self.clone();
        lookahead.next();
        let mut lookbehind = self.clone();
        lookbehind.previous();

        !joins(&lookahead) && !joins(&lookbehind)
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Text of the current token, or empty if out of bounds.
    fn token_text(&self) -> &str {
        let length = self.raw_text_length();
        &self.tokenizer.raw_text()[self.raw_text_index..self.raw_text_index + length]
    }

    /// Up to `length` bytes starting at this token, cut short at the end of text.
    fn upcoming_text(&self, length: usize) -> &str {
        let raw_text = self.tokenizer.raw_text();
        let end = (self.raw_text_index + length).min(raw_text.len());
        raw_text.get(self.raw_text_index..end).unwrap_or("")
    }

    pub fn text_between(&self, end: &TokenIterator) -> &str {
        self.tokenizer.text_between(self, end)
    }

    pub fn append_token_to(&self, output: &mut String) {
        output.push_str(self.token_text());
    }

    pub fn append_text_between_to(&self, end: &TokenIterator, output: &mut String) {
        self.tokenizer.append_text_between_to(self, end, output);
    }

    /// Text of the current token, or empty if out of bounds.
    pub fn string(&self) -> SmolStr {
        SmolStr::new(self.token_text())
    }

    /// First character of the current token, or `'\0'` if out of bounds.
    pub fn character(&self) -> char {
        if !self.is_in_bounds() {
            return '\0';
        }
        self.token_text().chars().next().unwrap_or('\0')
    }

    // ========================================================================
    // Classification
    // ========================================================================

    pub fn fundamental_type(&self) -> FundamentalType {
        self.tokenizer
            .fundamental_type_at(self.token_index, self.raw_text_index)
    }

    pub fn comment_parsing_type(&self) -> CommentParsingType {
        self.tokenizer.comment_parsing_type_at(self.token_index)
    }

    pub fn set_comment_parsing_type(&self, tag: CommentParsingType) {
        self.tokenizer
            .set_comment_parsing_type_at(self.checked_index(), tag);
    }

    /// Sets the comment parsing type of every token in the next `characters`
    /// bytes.
    ///
    /// # Panics
    ///
    /// If the bytes don't end on a token boundary.
    pub fn set_comment_parsing_type_by_characters(&self, tag: CommentParsingType, characters: usize) {
        let end = self.checked_index() + self.tokens_for_paint(characters);
        self.tokenizer
            .set_comment_parsing_type_between(self.checked_index(), end, tag);
    }

    pub fn set_comment_parsing_type_between(&self, end: &TokenIterator, tag: CommentParsingType) {
        let (start, end) = self.index_range(end);
        self.tokenizer.set_comment_parsing_type_between(start, end, tag);
    }

    pub fn syntax_highlighting_type(&self) -> SyntaxHighlightingType {
        self.tokenizer.syntax_highlighting_type_at(self.token_index)
    }

    pub fn set_syntax_highlighting_type(&self, tag: SyntaxHighlightingType) {
        self.tokenizer
            .set_syntax_highlighting_type_at(self.checked_index(), tag);
    }

    pub fn set_syntax_highlighting_type_by_characters(
        &self,
        tag: SyntaxHighlightingType,
        characters: usize,
    ) {
        let end = self.checked_index() + self.tokens_for_paint(characters);
        self.tokenizer
            .set_syntax_highlighting_type_between(self.checked_index(), end, tag);
    }

    pub fn set_syntax_highlighting_type_between(
        &self,
        end: &TokenIterator,
        tag: SyntaxHighlightingType,
    ) {
        let (start, end) = self.index_range(end);
        self.tokenizer
            .set_syntax_highlighting_type_between(start, end, tag);
    }

    pub fn prototype_parsing_type(&self) -> PrototypeParsingType {
        self.tokenizer.prototype_parsing_type_at(self.token_index)
    }

    pub fn set_prototype_parsing_type(&self, tag: PrototypeParsingType) {
        self.tokenizer
            .set_prototype_parsing_type_at(self.checked_index(), tag);
    }

    pub fn set_prototype_parsing_type_by_characters(
        &self,
        tag: PrototypeParsingType,
        characters: usize,
    ) {
        let end = self.checked_index() + self.tokens_for_paint(characters);
        self.tokenizer
            .set_prototype_parsing_type_between(self.checked_index(), end, tag);
    }

    pub fn set_prototype_parsing_type_between(&self, end: &TokenIterator, tag: PrototypeParsingType) {
        let (start, end) = self.index_range(end);
        self.tokenizer
            .set_prototype_parsing_type_between(start, end, tag);
    }

    fn checked_index(&self) -> usize {
        if !self.is_in_bounds() {
            violated(ContractViolation::OutOfBounds);
        }
        self.token_index as usize
    }

    fn tokens_for_paint(&self, characters: usize) -> usize {
        self.tokens_in_characters(characters)
            .unwrap_or_else(|| violated(ContractViolation::NotOnTokenBoundary))
    }

    fn index_range(&self, end: &TokenIterator) -> (usize, usize) {
        if !self.is_same_base(end) {
            violated(ContractViolation::NotSameBase);
        }
        if self.token_index < 0 || end.token_index > self.tokenizer.token_count() as isize {
            violated(ContractViolation::OutOfBounds);
        }
        if self.token_index > end.token_index {
            violated(ContractViolation::ReversedRange);
        }
        (self.token_index as usize, end.token_index as usize)
    }

    // ========================================================================
    // Properties
    // ========================================================================

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Column of the current token in characters, starting at 1.
    pub fn char_number(&self) -> usize {
        let before = &self.tokenizer.raw_text()[..self.raw_text_index];
        let line_start = before.rfind(['\r', '\n']).map_or(0, |index| index + 1);
        before[line_start..].chars().count() + 1
    }

    pub fn position(&self) -> Position {
        Position::new(self.line_number, self.char_number())
    }

    /// Byte offset of the current token in the raw text.
    pub fn raw_text_index(&self) -> usize {
        self.raw_text_index
    }

    /// Length of the current token in bytes, or zero if out of bounds.
    pub fn raw_text_length(&self) -> usize {
        if self.is_in_bounds() {
            self.tokenizer.token_length(self.token_index as usize)
        } else {
            0
        }
    }

    /// Index of the current token. Negative or past the end when out of bounds.
    pub fn token_index(&self) -> isize {
        self.token_index
    }

    pub fn is_in_bounds(&self) -> bool {
        self.token_index >= 0 && (self.token_index as usize) < self.tokenizer.token_count()
    }

    pub fn tokenizer(&self) -> &Arc<Tokenizer> {
        &self.tokenizer
    }

    /// Whether both iterators walk the same tokenizer.
    pub fn is_same_base(&self, other: &TokenIterator) -> bool {
        Arc::ptr_eq(&self.tokenizer, &other.tokenizer)
    }
}

/// Iterators are equal when they sit on the same token of the same tokenizer.
/// Iterators from different tokenizers are never equal. Unlike ordering,
/// comparing them for equality is allowed and yields false.
impl PartialEq for TokenIterator {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_base(other) && self.token_index == other.token_index
    }
}

impl Eq for TokenIterator {}

/// # Panics
///
/// Ordering iterators from different tokenizers is a contract violation.
impl PartialOrd for TokenIterator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.is_same_base(other) {
            violated(ContractViolation::NotSameBase);
        }
        Some(self.token_index.cmp(&other.token_index))
    }
}

impl fmt::Debug for TokenIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIterator")
            .field("token_index", &self.token_index)
            .field("raw_text_index", &self.raw_text_index)
            .field("line_number", &self.line_number)
            .field("token", &self.token_text())
            .finish()
    }
}
