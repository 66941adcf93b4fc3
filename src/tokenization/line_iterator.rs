//! Line-level cursor over a [`Tokenizer`].

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex};
use text_size::{TextRange, TextSize};

use super::classification::CommentParsingType;
use super::fundamental::FundamentalType;
use super::tokenizer::{Line, find_text};
use super::{TokenIterator, Tokenizer};
use crate::base::{ContractViolation, violated};

/// Which tokens count as part of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineBoundsMode {
    /// Every token, including the line break.
    #[default]
    Everything,
    /// Leading and trailing whitespace and the line break are excluded.
    ExcludeWhitespace,
    /// Like `ExcludeWhitespace`, and also excludes comment symbols and
    /// decorations at either end.
    CommentContent,
}

/// Token and byte bounds of one line under a [`LineBoundsMode`].
#[derive(Debug, Clone, Copy)]
struct LineBounds {
    raw_text_start: usize,
    raw_text_end: usize,
    token_start: usize,
    token_end: usize,
}

/// A position among the lines of a [`Tokenizer`].
///
/// Like [`TokenIterator`], a line iterator tolerates moving out of bounds.
#[derive(Clone)]
pub struct LineIterator {
    tokenizer: Arc<Tokenizer>,
    line_index: isize,
    token_index: usize,
    raw_text_index: usize,
}

#[allow(clippy::should_implement_trait)]
impl LineIterator {
    pub(crate) fn new(
        tokenizer: Arc<Tokenizer>,
        line_index: isize,
        token_index: usize,
        raw_text_index: usize,
    ) -> Self {
        Self {
            tokenizer,
            line_index,
            token_index,
            raw_text_index,
        }
    }

    // ========================================================================
    // Movement
    // ========================================================================

    pub fn next(&mut self) -> bool {
        self.next_by(1)
    }

    /// Moves forward a number of lines, or backward if negative. Returns false
    /// if it ends up out of bounds.
    pub fn next_by(&mut self, count: isize) -> bool {
        if count < 0 {
            return self.previous_by(-count);
        }

        let lines = self.tokenizer.lines();
        let line_count = lines.len() as isize;
        let mut count = count;

        if self.line_index < 0 {
            if self.line_index + count <= 0 {
                self.line_index += count;
                return self.is_in_bounds();
            }
            count += self.line_index;
            self.line_index = 0;
        }

        while count > 0 && self.line_index < line_count {
            let line = lines[self.line_index as usize];
            self.token_index += line.token_length;
            self.raw_text_index += line.raw_text_length;
            self.line_index += 1;
            count -= 1;
        }

        self.line_index += count;
        self.is_in_bounds()
    }

    pub fn previous(&mut self) -> bool {
        self.previous_by(1)
    }

    /// Moves back a number of lines, or forward if negative. Returns false if it
    /// ends up out of bounds.
    pub fn previous_by(&mut self, count: isize) -> bool {
        if count < 0 {
            return self.next_by(-count);
        }

        let lines = self.tokenizer.lines();
        let line_count = lines.len() as isize;
        let mut count = count;

        if self.line_index > line_count {
            if self.line_index - count >= line_count {
                self.line_index -= count;
                return self.is_in_bounds();
            }
            count -= self.line_index - line_count;
            self.line_index = line_count;
        }

        while count > 0 && self.line_index > 0 {
            self.line_index -= 1;
            let line = lines[self.line_index as usize];
            self.token_index -= line.token_length;
            self.raw_text_index -= line.raw_text_length;
            count -= 1;
        }

        self.line_index -= count;
        self.is_in_bounds()
    }

    // ========================================================================
    // Bounds
    // ========================================================================

    fn calculate_bounds(&self, mode: LineBoundsMode) -> LineBounds {
        let Some(line) = self.current_line() else {
            return LineBounds {
                raw_text_start: self.raw_text_index,
                raw_text_end: self.raw_text_index,
                token_start: self.token_index,
                token_end: self.token_index,
            };
        };

        let mut bounds = LineBounds {
            raw_text_start: self.raw_text_index,
            raw_text_end: self.raw_text_index + line.raw_text_length,
            token_start: self.token_index,
            token_end: self.token_index + line.token_length,
        };

        if mode == LineBoundsMode::Everything {
            return bounds;
        }

        while bounds.token_end > bounds.token_start {
            let length = self.tokenizer.token_length(bounds.token_end - 1);
            if !self.is_skippable(bounds.token_end - 1, bounds.raw_text_end - length, mode) {
                break;
            }
            bounds.token_end -= 1;
            bounds.raw_text_end -= length;
        }

        while bounds.token_start < bounds.token_end
            && self.is_skippable(bounds.token_start, bounds.raw_text_start, mode)
        {
            bounds.raw_text_start += self.tokenizer.token_length(bounds.token_start);
            bounds.token_start += 1;
        }

        bounds
    }

    fn is_skippable(&self, token_index: usize, raw_text_index: usize, mode: LineBoundsMode) -> bool {
        if mode == LineBoundsMode::Everything {
            return false;
        }

        let fundamental_type = self
            .tokenizer
            .fundamental_type_at(token_index as isize, raw_text_index);
        if matches!(
            fundamental_type,
            FundamentalType::Whitespace | FundamentalType::LineBreak
        ) {
            return true;
        }
        if mode == LineBoundsMode::ExcludeWhitespace {
            return false;
        }

        matches!(
            self.tokenizer.comment_parsing_type_at(token_index as isize),
            CommentParsingType::CommentSymbol | CommentParsingType::CommentDecoration
        )
    }

    fn token_at(&self, token_index: usize, raw_text_index: usize, line_number: usize) -> TokenIterator {
        TokenIterator::new(
            Arc::clone(&self.tokenizer),
            token_index as isize,
            raw_text_index,
            line_number,
        )
    }

    /// Line number of a token that ends a line's bounds: past the line break it
    /// belongs to the next line.
    fn line_number_at_end(&self, bounds: &LineBounds) -> usize {
        let past_line_break = bounds.token_end > bounds.token_start
            && self.tokenizer.fundamental_type_at(
                bounds.token_end as isize - 1,
                bounds.raw_text_end - self.tokenizer.token_length(bounds.token_end - 1),
            ) == FundamentalType::LineBreak;

        self.line_number() + usize::from(past_line_break)
    }

    /// An iterator on the first token of the line. Out of bounds lines return
    /// the first or one past the last token of the tokenizer.
    pub fn first_token(&self, mode: LineBoundsMode) -> TokenIterator {
        if self.line_index < 0 {
            return self.tokenizer.first_token();
        }
        if !self.is_in_bounds() {
            return self.tokenizer.end_of_tokens();
        }

        let bounds = self.calculate_bounds(mode);
        self.token_at(bounds.token_start, bounds.raw_text_start, self.line_number())
    }

    /// An iterator one past the last token of the line.
    pub fn last_token(&self, mode: LineBoundsMode) -> TokenIterator {
        if self.line_index < 0 {
            return self.tokenizer.first_token();
        }
        if !self.is_in_bounds() {
            return self.tokenizer.end_of_tokens();
        }

        let bounds = self.calculate_bounds(mode);
        self.token_at(bounds.token_end, bounds.raw_text_end, self.line_number_at_end(&bounds))
    }

    /// Returns the first token and one past the last token of the line.
    pub fn bounds(&self, mode: LineBoundsMode) -> (TokenIterator, TokenIterator) {
        if !self.is_in_bounds() {
            let start = self.first_token(mode);
            return (start.clone(), start);
        }

        let bounds = self.calculate_bounds(mode);
        (
            self.token_at(bounds.token_start, bounds.raw_text_start, self.line_number()),
            self.token_at(bounds.token_end, bounds.raw_text_end, self.line_number_at_end(&bounds)),
        )
    }

    /// Byte range of the line in the tokenizer's raw text.
    pub fn raw_text_bounds(&self, mode: LineBoundsMode) -> TextRange {
        let bounds = self.calculate_bounds(mode);
        TextRange::new(
            TextSize::from(bounds.raw_text_start as u32),
            TextSize::from(bounds.raw_text_end as u32),
        )
    }

    // ========================================================================
    // Text
    // ========================================================================

    pub fn string(&self, mode: LineBoundsMode) -> &str {
        let bounds = self.calculate_bounds(mode);
        &self.tokenizer.raw_text()[bounds.raw_text_start..bounds.raw_text_end]
    }

    pub fn append_to(&self, output: &mut String, mode: LineBoundsMode) {
        output.push_str(self.string(mode));
    }

    pub fn is_empty(&self, mode: LineBoundsMode) -> bool {
        let bounds = self.calculate_bounds(mode);
        bounds.raw_text_start == bounds.raw_text_end
    }

    /// Column the line's content starts at, with tabs expanded to the
    /// tokenizer's tab width.
    pub fn indent(&self, mode: LineBoundsMode) -> usize {
        let bounds = self.calculate_bounds(mode);
        let options = self.tokenizer.options();

        self.tokenizer.raw_text()[self.raw_text_index..bounds.raw_text_start]
            .chars()
            .fold(0, |indent, character| {
                if character == '\t' {
                    options.expand_tab(indent)
                } else {
                    indent + 1
                }
            })
    }

    /// Runs a regular expression over the line.
    pub fn match_line<'t>(&'t self, regex: &Regex, mode: LineBoundsMode) -> Option<Captures<'t>> {
        regex.captures(self.string(mode))
    }

    /// Finds `text` as a whole token in the line.
    pub fn find_token(&self, text: &str, ignore_case: bool, mode: LineBoundsMode) -> Option<TokenIterator> {
        self.find_across_tokens(text, ignore_case, mode)
            .filter(|result| result.raw_text_length() == text.len())
    }

    /// Finds `text` in the line. The match may span several tokens but must
    /// start on a token boundary.
    pub fn find_across_tokens(
        &self,
        text: &str,
        ignore_case: bool,
        mode: LineBoundsMode,
    ) -> Option<TokenIterator> {
        if !self.is_in_bounds() {
            return None;
        }

        let bounds = self.calculate_bounds(mode);
        let line = &self.tokenizer.raw_text()[bounds.raw_text_start..bounds.raw_text_end];
        let target = bounds.raw_text_start + find_text(line, text, ignore_case)?;

        let mut result = self.token_at(bounds.token_start, bounds.raw_text_start, self.line_number());
        while result.raw_text_index() < target {
            result.next();
        }

        (result.raw_text_index() == target).then_some(result)
    }

    // ========================================================================
    // Properties
    // ========================================================================

    fn current_line(&self) -> Option<Line> {
        if self.line_index < 0 {
            return None;
        }
        self.tokenizer.lines().get(self.line_index as usize).copied()
    }

    pub fn line_number(&self) -> usize {
        (self.tokenizer.starting_line_number() as isize + self.line_index).max(0) as usize
    }

    pub fn is_in_bounds(&self) -> bool {
        self.current_line().is_some()
    }

    pub fn tokenizer(&self) -> &Arc<Tokenizer> {
        &self.tokenizer
    }

    pub fn is_same_base(&self, other: &LineIterator) -> bool {
        Arc::ptr_eq(&self.tokenizer, &other.tokenizer)
    }

    pub(crate) fn line_index(&self) -> isize {
        self.line_index
    }
}

/// Line iterators are equal when they sit on the same line of the same
/// tokenizer. Line iterators from different tokenizers are never equal. Unlike
/// ordering, comparing them for equality is allowed and yields false.
impl PartialEq for LineIterator {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_base(other) && self.line_index == other.line_index
    }
}

impl Eq for LineIterator {}

/// # Panics
///
/// Ordering line iterators from different tokenizers is a contract violation.
impl PartialOrd for LineIterator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.is_same_base(other) {
            violated(ContractViolation::NotSameBase);
        }
        Some(self.line_index.cmp(&other.line_index))
    }
}

impl fmt::Debug for LineIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineIterator")
            .field("line_index", &self.line_index)
            .field("token_index", &self.token_index)
            .field("raw_text_index", &self.raw_text_index)
            .finish()
    }
}
