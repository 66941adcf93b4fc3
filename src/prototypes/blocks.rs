//! Finding the ends of bracketed blocks in a tagged prototype.
//!
//! Blocks open on [`OpeningTypeModifier`](PrototypeParsingType::OpeningTypeModifier),
//! [`OpeningParamModifier`](PrototypeParsingType::OpeningParamModifier) or
//! [`StartOfTuple`](PrototypeParsingType::StartOfTuple) tokens. All three families
//! share one nesting level, so input is assumed to be balanced within and across
//! families. Unbalanced input runs into the limit and reports no block.

use crate::tokenization::{PrototypeParsingType, TokenIterator};

pub(crate) fn is_block_opening(tag: PrototypeParsingType) -> bool {
    matches!(
        tag,
        PrototypeParsingType::OpeningTypeModifier
            | PrototypeParsingType::OpeningParamModifier
            | PrototypeParsingType::StartOfTuple
    )
}

pub(crate) fn is_block_closing(tag: PrototypeParsingType) -> bool {
    matches!(
        tag,
        PrototypeParsingType::ClosingTypeModifier
            | PrototypeParsingType::ClosingParamModifier
            | PrototypeParsingType::EndOfTuple
    )
}

/// If `opening` starts a block, returns its closing token and the end of the
/// block. The end is past the closing token and any
/// [`ClosingExtensionSymbol`](PrototypeParsingType::ClosingExtensionSymbol)
/// tokens after it.
///
/// Returns `None` if `opening` isn't on an opening tag or the block doesn't
/// close before `limit`.
pub fn get_end_of_block(
    opening: &TokenIterator,
    limit: &TokenIterator,
) -> Option<(TokenIterator, TokenIterator)> {
    if !is_block_opening(opening.prototype_parsing_type()) {
        return None;
    }

    let mut iterator = opening.clone();
    iterator.next();
    let mut level = 1usize;

    loop {
        if iterator >= *limit || !iterator.is_in_bounds() {
            return None;
        }

        let tag = iterator.prototype_parsing_type();
        if is_block_opening(tag) {
            level += 1;
        } else if is_block_closing(tag) {
            level -= 1;
            if level == 0 {
                break;
            }
        }

        iterator.next();
    }

    let closing = iterator.clone();
    iterator.next();
    while iterator < *limit
        && iterator.prototype_parsing_type() == PrototypeParsingType::ClosingExtensionSymbol
    {
        iterator.next();
    }

    Some((closing, iterator))
}

/// Moves `iterator` past the block it's on, if it's on one that closes before
/// `limit`. Returns whether it moved.
pub fn try_to_skip_block(iterator: &mut TokenIterator, limit: &TokenIterator) -> bool {
    match get_end_of_block(iterator, limit) {
        Some((_, end_of_block)) => {
            *iterator = end_of_block;
            true
        }
        None => false,
    }
}
