//! The tokenizer: immutable text split into fundamental tokens, plus the
//! classification overlays and line table that hang off of it.

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::{Captures, Regex};

use super::classification::{
    CommentParsingType, Overlay, PrototypeParsingType, SyntaxHighlightingType,
};
use super::fundamental::{FundamentalType, scan_token_lengths};
use super::{LineIterator, TokenIterator, TokenizerOptions};
use crate::base::{ContractViolation, violated};

/// One entry in the line table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Line {
    /// Number of tokens on the line, including its line break
    pub(crate) token_length: usize,
    /// Number of bytes on the line, including its line break
    pub(crate) raw_text_length: usize,
}

/// Text divided into tokens of a single [`FundamentalType`].
///
/// The text and token boundaries never change after construction. Three
/// classification overlays can be written through a shared reference by the
/// parser that owns the tokenizer, and the line table is computed the first time
/// it's needed.
///
/// Tokenizers are always handed out behind an [`Arc`] so iterators can hold on
/// to them without borrowing.
pub struct Tokenizer {
    raw_text: String,
    token_lengths: Vec<u8>,
    options: TokenizerOptions,
    lines: OnceLock<Vec<Line>>,
    comment_parsing_types: Overlay<CommentParsingType>,
    syntax_highlighting_types: Overlay<SyntaxHighlightingType>,
    prototype_parsing_types: Overlay<PrototypeParsingType>,
}

impl Tokenizer {
    /// Tokenize text that starts on line 1.
    pub fn new(input: impl Into<String>) -> Arc<Self> {
        Self::with_options(input, TokenizerOptions::default())
    }

    pub fn with_options(input: impl Into<String>, options: TokenizerOptions) -> Arc<Self> {
        let raw_text = input.into();
        let token_lengths = scan_token_lengths(&raw_text);

        tracing::trace!(
            tokens = token_lengths.len(),
            bytes = raw_text.len(),
            starting_line = options.starting_line_number,
            "built tokenizer"
        );

        Arc::new(Self::from_parts(raw_text, token_lengths, options))
    }

    fn from_parts(raw_text: String, token_lengths: Vec<u8>, options: TokenizerOptions) -> Self {
        Self {
            raw_text,
            token_lengths,
            options,
            lines: OnceLock::new(),
            comment_parsing_types: Overlay::new(),
            syntax_highlighting_types: Overlay::new(),
            prototype_parsing_types: Overlay::new(),
        }
    }

    /// Builds a tokenizer from already split text and a full set of prototype
    /// parsing and syntax highlighting types, one per token. The highlighting
    /// overlay is left unallocated when every tag is `Null`.
    pub(crate) fn from_classified(
        raw_text: String,
        token_lengths: Vec<u8>,
        prototype_parsing_types: &[PrototypeParsingType],
        syntax_highlighting_types: &[SyntaxHighlightingType],
    ) -> Arc<Self> {
        debug_assert_eq!(
            token_lengths.iter().map(|&length| length as usize).sum::<usize>(),
            raw_text.len()
        );
        debug_assert_eq!(token_lengths.len(), prototype_parsing_types.len());
        debug_assert_eq!(token_lengths.len(), syntax_highlighting_types.len());

        let mut tokenizer = Self::from_parts(raw_text, token_lengths, TokenizerOptions::default());
        tokenizer.prototype_parsing_types = Overlay::from_tags(prototype_parsing_types);
        if syntax_highlighting_types
            .iter()
            .any(|&tag| tag != SyntaxHighlightingType::Null)
        {
            tokenizer.syntax_highlighting_types = Overlay::from_tags(syntax_highlighting_types);
        }

        tracing::trace!(tokens = tokenizer.token_count(), "built classified tokenizer");
        Arc::new(tokenizer)
    }

    // ========================================================================
    // Slicing
    // ========================================================================

    /// Creates an independent tokenizer from the tokens between two iterators.
    /// The token at `end` is not included. Line numbering and any classification
    /// overlays are carried over.
    ///
    /// # Panics
    ///
    /// If the iterators don't belong to this tokenizer or are reversed.
    pub fn create_from_iterators(&self, start: &TokenIterator, end: &TokenIterator) -> Arc<Self> {
        self.try_create_from_iterators(start, end)
            .unwrap_or_else(|violation| violated(violation))
    }

    pub fn try_create_from_iterators(
        &self,
        start: &TokenIterator,
        end: &TokenIterator,
    ) -> Result<Arc<Self>, ContractViolation> {
        let (start_index, end_index) = self.check_range(start, end)?;
        Ok(Arc::new(self.slice(start, end, start_index, end_index)))
    }

    /// Creates an independent tokenizer from the lines between two line
    /// iterators. The line at `end` is not included.
    ///
    /// # Panics
    ///
    /// If the iterators don't belong to this tokenizer or are reversed.
    pub fn create_from_line_iterators(&self, start: &LineIterator, end: &LineIterator) -> Arc<Self> {
        if !self.owns(start.tokenizer()) || !self.owns(end.tokenizer()) {
            violated(ContractViolation::NotSameBase);
        }
        if start.line_index() > end.line_index() {
            violated(ContractViolation::ReversedRange);
        }

        let lines = self.lines();
        let clamp = |index: isize| index.clamp(0, lines.len() as isize) as usize;
        let (first_line, end_line) = (clamp(start.line_index()), clamp(end.line_index()));

        let start_token = start.first_token(super::LineBoundsMode::Everything);
        let end_token = end.first_token(super::LineBoundsMode::Everything);
        let (start_index, end_index) = self
            .check_range(&start_token, &end_token)
            .unwrap_or_else(|violation| violated(violation));

        let result = self.slice(&start_token, &end_token, start_index, end_index);
        let _ = result.lines.set(lines[first_line..end_line].to_vec());
        Arc::new(result)
    }

    fn slice(
        &self,
        start: &TokenIterator,
        end: &TokenIterator,
        start_index: usize,
        end_index: usize,
    ) -> Self {
        let raw_text = self.raw_text[start.raw_text_index()..end.raw_text_index()].to_owned();
        let token_lengths = self.token_lengths[start_index..end_index].to_vec();
        let options = TokenizerOptions {
            starting_line_number: start.line_number(),
            ..self.options
        };

        let mut result = Self::from_parts(raw_text, token_lengths, options);
        result.comment_parsing_types = self.comment_parsing_types.copy_range(start_index, end_index);
        result.syntax_highlighting_types =
            self.syntax_highlighting_types.copy_range(start_index, end_index);
        result.prototype_parsing_types =
            self.prototype_parsing_types.copy_range(start_index, end_index);
        result
    }

    fn owns(&self, tokenizer: &Arc<Tokenizer>) -> bool {
        std::ptr::eq(Arc::as_ptr(tokenizer), self)
    }

    /// Validates a range and returns its token indexes, clamped to the token list.
    fn check_range(
        &self,
        start: &TokenIterator,
        end: &TokenIterator,
    ) -> Result<(usize, usize), ContractViolation> {
        if !self.owns(start.tokenizer()) || !self.owns(end.tokenizer()) {
            return Err(ContractViolation::NotSameBase);
        }
        if start.token_index() < 0 {
            return Err(ContractViolation::OutOfBounds);
        }
        if start.token_index() > end.token_index() {
            return Err(ContractViolation::ReversedRange);
        }

        let count = self.token_count();
        let start_index = (start.token_index() as usize).min(count);
        let end_index = (end.token_index() as usize).min(count);
        Ok((start_index, end_index))
    }

    // ========================================================================
    // Text between iterators
    // ========================================================================

    /// Returns the text between two iterators.
    ///
    /// # Panics
    ///
    /// If the iterators don't belong to this tokenizer, `start` is before the
    /// first token, or the range is reversed.
    pub fn text_between(&self, start: &TokenIterator, end: &TokenIterator) -> &str {
        self.try_text_between(start, end)
            .unwrap_or_else(|violation| violated(violation))
    }

    pub fn try_text_between(
        &self,
        start: &TokenIterator,
        end: &TokenIterator,
    ) -> Result<&str, ContractViolation> {
        self.check_range(start, end)?;
        Ok(&self.raw_text[start.raw_text_index()..end.raw_text_index()])
    }

    pub fn append_text_between_to(
        &self,
        start: &TokenIterator,
        end: &TokenIterator,
        output: &mut String,
    ) {
        output.push_str(self.text_between(start, end));
    }

    /// Runs a regular expression over the text between two iterators.
    pub fn match_text_between<'t>(
        &'t self,
        regex: &Regex,
        start: &TokenIterator,
        end: &TokenIterator,
    ) -> Option<Captures<'t>> {
        regex.captures(self.text_between(start, end))
    }

    pub fn contains_text_between(
        &self,
        text: &str,
        ignore_case: bool,
        start: &TokenIterator,
        end: &TokenIterator,
    ) -> bool {
        find_text(self.text_between(start, end), text, ignore_case).is_some()
    }

    pub fn equals_text_between(
        &self,
        text: &str,
        ignore_case: bool,
        start: &TokenIterator,
        end: &TokenIterator,
    ) -> bool {
        text_eq(self.text_between(start, end), text, ignore_case)
    }

    /// Finds `text` as a single whole token between two iterators, so `some`
    /// will not match `something`.
    pub fn find_token_between(
        &self,
        text: &str,
        ignore_case: bool,
        start: &TokenIterator,
        end: &TokenIterator,
    ) -> Option<TokenIterator> {
        self.find_aligned(text, ignore_case, start, end, true)
    }

    /// Finds `text` between two iterators. The match may cross token boundaries,
    /// so `<<` can be found, but it must start and end on them, so `<< some`
    /// will not match `<< something`.
    pub fn find_tokens_between(
        &self,
        text: &str,
        ignore_case: bool,
        start: &TokenIterator,
        end: &TokenIterator,
    ) -> Option<TokenIterator> {
        self.find_aligned(text, ignore_case, start, end, false)
    }

    fn find_aligned(
        &self,
        text: &str,
        ignore_case: bool,
        start: &TokenIterator,
        end: &TokenIterator,
        whole_token: bool,
    ) -> Option<TokenIterator> {
        if !start.is_in_bounds() || start > end {
            return None;
        }

        let between = self.text_between(start, end);
        let mut result = start.clone();
        let mut search_from = 0;

        while let Some(offset) = find_text(&between[search_from..], text, ignore_case) {
            let target = start.raw_text_index() + search_from + offset;

            while result.raw_text_index() < target {
                result.next();
            }

            if result.raw_text_index() == target {
                let aligned = if whole_token {
                    result.raw_text_length() == text.len()
                } else {
                    result.tokens_in_characters(text.len()).is_some()
                };
                if aligned {
                    return Some(result);
                }
            }

            let skipped = between[search_from + offset..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            search_from += offset + skipped;
            if search_from > between.len() {
                break;
            }
        }

        None
    }

    // ========================================================================
    // Per-token information
    // ========================================================================

    /// Returns the fundamental type of the token at the given position, or
    /// `Null` if it's out of bounds.
    pub fn fundamental_type_at(&self, token_index: isize, raw_text_index: usize) -> FundamentalType {
        if token_index < 0 || token_index as usize >= self.token_count() {
            return FundamentalType::Null;
        }

        self.raw_text[raw_text_index..]
            .chars()
            .next()
            .map_or(FundamentalType::Null, FundamentalType::of)
    }

    pub fn comment_parsing_type_at(&self, token_index: isize) -> CommentParsingType {
        self.comment_parsing_types.get(token_index)
    }

    pub fn set_comment_parsing_type_at(&self, token_index: usize, tag: CommentParsingType) {
        self.comment_parsing_types
            .set(token_index, tag, self.token_count());
    }

    /// Sets the comment parsing type of every token from `start` up to but not
    /// including `end`.
    pub fn set_comment_parsing_type_between(&self, start: usize, end: usize, tag: CommentParsingType) {
        self.comment_parsing_types
            .set_range(start, end, tag, self.token_count());
    }

    pub fn syntax_highlighting_type_at(&self, token_index: isize) -> SyntaxHighlightingType {
        self.syntax_highlighting_types.get(token_index)
    }

    pub fn set_syntax_highlighting_type_at(&self, token_index: usize, tag: SyntaxHighlightingType) {
        self.syntax_highlighting_types
            .set(token_index, tag, self.token_count());
    }

    pub fn set_syntax_highlighting_type_between(
        &self,
        start: usize,
        end: usize,
        tag: SyntaxHighlightingType,
    ) {
        self.syntax_highlighting_types
            .set_range(start, end, tag, self.token_count());
    }

    pub fn prototype_parsing_type_at(&self, token_index: isize) -> PrototypeParsingType {
        self.prototype_parsing_types.get(token_index)
    }

    pub fn set_prototype_parsing_type_at(&self, token_index: usize, tag: PrototypeParsingType) {
        self.prototype_parsing_types
            .set(token_index, tag, self.token_count());
    }

    pub fn set_prototype_parsing_type_between(
        &self,
        start: usize,
        end: usize,
        tag: PrototypeParsingType,
    ) {
        self.prototype_parsing_types
            .set_range(start, end, tag, self.token_count());
    }

    /// Whether any syntax highlighting has been applied.
    pub fn has_syntax_highlighting(&self) -> bool {
        self.syntax_highlighting_types.is_allocated()
    }

    // ========================================================================
    // Iterators and properties
    // ========================================================================

    pub fn first_token(self: &Arc<Self>) -> TokenIterator {
        TokenIterator::new(Arc::clone(self), 0, 0, self.starting_line_number())
    }

    /// An iterator one past the last token.
    pub fn end_of_tokens(self: &Arc<Self>) -> TokenIterator {
        TokenIterator::new(
            Arc::clone(self),
            self.token_count() as isize,
            self.raw_text.len(),
            self.line_number_past_end(),
        )
    }

    pub fn first_line(self: &Arc<Self>) -> LineIterator {
        LineIterator::new(Arc::clone(self), 0, 0, 0)
    }

    /// A line iterator one past the last line.
    pub fn end_of_lines(self: &Arc<Self>) -> LineIterator {
        LineIterator::new(
            Arc::clone(self),
            self.lines().len() as isize,
            self.token_count(),
            self.raw_text.len(),
        )
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn token_count(&self) -> usize {
        self.token_lengths.len()
    }

    pub fn starting_line_number(&self) -> usize {
        self.options.starting_line_number
    }

    pub fn tab_width(&self) -> usize {
        self.options.tab_width
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    pub(crate) fn token_length(&self, token_index: usize) -> usize {
        self.token_lengths[token_index] as usize
    }

    pub(crate) fn token_lengths(&self) -> &[u8] {
        &self.token_lengths
    }

    /// The line table, computed on first use.
    pub(crate) fn lines(&self) -> &[Line] {
        self.lines.get_or_init(|| self.calculate_lines())
    }

    fn calculate_lines(&self) -> Vec<Line> {
        let mut lines = Vec::with_capacity(4 + self.raw_text.len() / 60);
        let mut line = Line::default();
        let mut raw_text_index = 0;

        for (token_index, &length) in self.token_lengths.iter().enumerate() {
            let is_line_break = self.fundamental_type_at(token_index as isize, raw_text_index)
                == FundamentalType::LineBreak;

            line.token_length += 1;
            line.raw_text_length += length as usize;
            raw_text_index += length as usize;

            if is_line_break {
                lines.push(line);
                line = Line::default();
            }
        }

        if line.token_length > 0 {
            lines.push(line);
        }

        tracing::trace!(lines = lines.len(), "calculated line table");
        lines
    }

    /// The line number an iterator has after walking past every token, which is
    /// the starting line plus the number of line breaks.
    pub(crate) fn line_number_past_end(&self) -> usize {
        let mut line_breaks = self.lines().len();
        if line_breaks > 0 && !self.raw_text.ends_with(['\r', '\n']) {
            line_breaks -= 1;
        }
        self.starting_line_number() + line_breaks
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("raw_text", &self.raw_text)
            .field("token_count", &self.token_count())
            .field("starting_line_number", &self.starting_line_number())
            .field("prototype_parsing_types", &self.prototype_parsing_types)
            .finish()
    }
}

// ============================================================================
// Text comparison
// ============================================================================

/// Compares two strings, optionally ignoring ASCII case.
pub(crate) fn text_eq(a: &str, b: &str, ignore_case: bool) -> bool {
    if ignore_case {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

/// Finds the byte offset of `needle` in `haystack`, optionally ignoring ASCII case.
pub(crate) fn find_text(haystack: &str, needle: &str, ignore_case: bool) -> Option<usize> {
    if !ignore_case {
        return haystack.find(needle);
    }
    if needle.len() > haystack.len() {
        return None;
    }

    let needle = needle.as_bytes();
    let bytes = haystack.as_bytes();

    (0..=bytes.len() - needle.len()).find(|&index| {
        haystack.is_char_boundary(index) && bytes[index..index + needle.len()].eq_ignore_ascii_case(needle)
    })
}
