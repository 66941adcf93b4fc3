//! Contract violations.
//!
//! These signal a bug in the caller, never a property of the input text. Not-found
//! conditions are reported through `Option` instead and never use this type.

use thiserror::Error;

/// Ways a caller can misuse the tokenization and prototype APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// Two iterators were compared or combined but belong to different tokenizers or strings.
    #[error("relative comparison of iterators that are not on the same base")]
    NotSameBase,

    /// A range was passed with its end before its start.
    #[error("range end comes before its start")]
    ReversedRange,

    /// A range or token index fell outside of the tokenizer.
    #[error("iterator or index is out of bounds")]
    OutOfBounds,

    /// Moving or painting by a character count would not land on a token boundary.
    #[error("character count does not fall on a token boundary")]
    NotOnTokenBoundary,

    /// An opening block token was passed to a single token API.
    #[error("blocks must be added as a whole, not token by token")]
    BlockThroughTokenApi,

    /// A block was passed with opening or closing tokens of the wrong kind.
    #[error("block is not delimited by matching opening and closing tokens")]
    MismatchedBlock,
}

/// Abort on a contract violation.
#[cold]
#[track_caller]
pub fn violated(violation: ContractViolation) -> ! {
    panic!("{violation}")
}
