use std::fmt;
use std::sync::Arc;

use crate::base::{ContractViolation, TextRange, TextSize, violated};
use crate::tokenization::{TokenIterator, Tokenizer};

/// A run of tokens, from `start` up to but not including `end`.
///
/// Ranges returned by prototype accessors usually point into the prototype's
/// own tokenizer, but a built type may live in a tokenizer of its own. Check
/// [`TokenRange::tokenizer`] rather than assuming either.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRange {
    start: TokenIterator,
    end: TokenIterator,
}

impl TokenRange {
    /// # Panics
    ///
    /// If the iterators belong to different tokenizers or `end` comes first.
    pub fn new(start: TokenIterator, end: TokenIterator) -> Self {
        if !start.is_same_base(&end) {
            violated(ContractViolation::NotSameBase);
        }
        if end < start {
            violated(ContractViolation::ReversedRange);
        }
        Self { start, end }
    }

    /// The whole of a tokenizer.
    pub fn whole(tokenizer: &Arc<Tokenizer>) -> Self {
        Self {
            start: tokenizer.first_token(),
            end: tokenizer.end_of_tokens(),
        }
    }

    pub fn start(&self) -> &TokenIterator {
        &self.start
    }

    pub fn end(&self) -> &TokenIterator {
        &self.end
    }

    pub fn into_bounds(self) -> (TokenIterator, TokenIterator) {
        (self.start, self.end)
    }

    pub fn tokenizer(&self) -> &Arc<Tokenizer> {
        self.start.tokenizer()
    }

    pub fn text(&self) -> &str {
        self.start.text_between(&self.end)
    }

    /// Byte offsets of the range within its tokenizer's text.
    pub fn text_range(&self) -> TextRange {
        TextRange::new(
            TextSize::from(self.start.raw_text_index() as u32),
            TextSize::from(self.end.raw_text_index() as u32),
        )
    }

    pub fn token_count(&self) -> usize {
        (self.end.token_index() - self.start.token_index()) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRange")
            .field("tokens", &(self.start.token_index()..self.end.token_index()))
            .field("text", &self.text())
            .finish()
    }
}
