//! Tokenization for the docproto engine.
//!
//! Raw text is split into tokens of a single [`FundamentalType`] by a logos
//! scanner. Parsers then classify tokens by writing to the tokenizer's
//! overlays, and everything downstream walks the result with iterators:
//!
//! - [`Tokenizer`] - the text, its token boundaries, overlays, and line table
//! - [`TokenIterator`] - token-level cursor with matching and classification
//! - [`LineIterator`] - line-level cursor with bounds modes and indentation
//! - [`SimpleTokenIterator`] - cursor over a plain string with the same boundaries

mod classification;
mod fundamental;
mod line_iterator;
mod options;
mod simple_token_iterator;
mod token_iterator;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use classification::{CommentParsingType, PrototypeParsingType, SyntaxHighlightingType};
pub use fundamental::{FundamentalType, MAX_TOKEN_LENGTH};
pub use line_iterator::{LineBoundsMode, LineIterator};
pub use options::TokenizerOptions;
pub use simple_token_iterator::SimpleTokenIterator;
pub use token_iterator::{PreviousPastWhitespaceMode, TokenIterator};
pub use tokenizer::Tokenizer;
