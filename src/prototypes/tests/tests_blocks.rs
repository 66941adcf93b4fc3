#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::tagged;
use crate::prototypes::{get_end_of_block, try_to_skip_block};
use crate::tokenization::PrototypeParsingType as P;

// ============================================================================
// get_end_of_block
// ============================================================================

#[test]
fn test_nested_blocks() {
    // List < Map < int > > _ x
    let tokenizer = tagged(&[
        ("List", P::Type),
        ("<", P::OpeningTypeModifier),
        ("Map", P::Type),
        ("<", P::OpeningTypeModifier),
        ("int", P::Type),
        (">", P::ClosingTypeModifier),
        (">", P::ClosingTypeModifier),
        (" ", P::Null),
        ("x", P::Name),
    ]);
    let limit = tokenizer.end_of_tokens();

    let mut outer = tokenizer.first_token();
    outer.next();
    let (closing, end) = get_end_of_block(&outer, &limit).unwrap();
    assert_eq!(closing.token_index(), 6);
    assert_eq!(end.token_index(), 7);

    let mut inner = outer.clone();
    inner.next_by(2);
    let (closing, end) = get_end_of_block(&inner, &limit).unwrap();
    assert_eq!(closing.token_index(), 5);
    assert_eq!(end.token_index(), 6);
}

#[test]
fn test_unclosed_block() {
    let tokenizer = tagged(&[("<", P::OpeningTypeModifier), ("int", P::Type)]);
    assert!(get_end_of_block(&tokenizer.first_token(), &tokenizer.end_of_tokens()).is_none());
}

#[test]
fn test_not_on_an_opening_token() {
    let tokenizer = tagged(&[
        ("List", P::Type),
        ("<", P::OpeningTypeModifier),
        ("int", P::Type),
        (">", P::ClosingTypeModifier),
    ]);
    assert!(get_end_of_block(&tokenizer.first_token(), &tokenizer.end_of_tokens()).is_none());
}

#[test]
fn test_limit_before_closing() {
    let tokenizer = tagged(&[
        ("<", P::OpeningTypeModifier),
        ("int", P::Type),
        (">", P::ClosingTypeModifier),
    ]);
    let mut limit = tokenizer.first_token();
    limit.next_by(2);

    assert!(get_end_of_block(&tokenizer.first_token(), &limit).is_none());
}

#[test]
fn test_closing_extension_symbols_are_absorbed() {
    let tokenizer = tagged(&[
        ("(", P::StartOfTuple),
        ("a", P::Type),
        (")", P::EndOfTuple),
        ("?", P::ClosingExtensionSymbol),
        (" ", P::Null),
        ("b", P::Name),
    ]);
    let (closing, end) =
        get_end_of_block(&tokenizer.first_token(), &tokenizer.end_of_tokens()).unwrap();
    assert_eq!(closing.token_index(), 2);
    assert_eq!(end.token_index(), 4);
}

#[test]
fn test_families_share_one_level() {
    let tokenizer = tagged(&[
        ("[", P::OpeningParamModifier),
        ("<", P::OpeningTypeModifier),
        ("]", P::ClosingParamModifier),
        (">", P::ClosingTypeModifier),
    ]);
    let (closing, _) =
        get_end_of_block(&tokenizer.first_token(), &tokenizer.end_of_tokens()).unwrap();
    assert_eq!(closing.token_index(), 3);
}

// ============================================================================
// try_to_skip_block
// ============================================================================

#[test]
fn test_try_to_skip_block() {
    let tokenizer = tagged(&[
        ("[", P::OpeningParamModifier),
        ("12", P::Null),
        ("]", P::ClosingParamModifier),
        ("x", P::Name),
    ]);
    let limit = tokenizer.end_of_tokens();

    let mut iterator = tokenizer.first_token();
    assert!(try_to_skip_block(&mut iterator, &limit));
    assert_eq!(iterator.string(), "x");

    assert!(!try_to_skip_block(&mut iterator, &limit));
    assert_eq!(iterator.token_index(), 3);
}

#[test]
fn test_try_to_skip_unclosed_block_leaves_iterator() {
    let tokenizer = tagged(&[("[", P::OpeningParamModifier), ("12", P::Null)]);
    let mut iterator = tokenizer.first_token();

    assert!(!try_to_skip_block(&mut iterator, &tokenizer.end_of_tokens()));
    assert_eq!(iterator.token_index(), 0);
}
