#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use docproto::{PrototypeParsingType as P, Section, TextSize, Tokenizer, TypeBuilder};

use crate::helpers::prototype_fixtures::tagged;

// ============================================================================
// Zero-copy and built types
// ============================================================================

#[test]
fn test_canonical_type_points_into_original() {
    let tokenizer = tagged(&[
        ("unsigned", P::TypeModifier),
        (" ", P::Null),
        ("int", P::Type),
        (" ", P::Null),
        ("count", P::Name),
    ]);
    let section = Section::new(tokenizer.first_token(), tokenizer.end_of_tokens());
    let full_type = section.build_full_type().unwrap();

    assert_eq!(full_type.text(), "unsigned int");
    assert!(Arc::ptr_eq(full_type.tokenizer(), &tokenizer));
    assert_eq!(full_type.text_range().start(), TextSize::from(0));
}

#[test]
fn test_discontinuous_type_is_built() {
    let tokenizer = tagged(&[
        ("int", P::Type),
        (" ", P::Null),
        ("values", P::Name),
        ("[", P::OpeningTypeModifier),
        ("12", P::Null),
        ("]", P::ClosingTypeModifier),
    ]);
    let section = Section::new(tokenizer.first_token(), tokenizer.end_of_tokens());
    let full_type = section.build_full_type().unwrap();

    let mut builder = TypeBuilder::new();
    builder.add_type_tokens(&tokenizer.first_token(), &tokenizer.end_of_tokens());

    assert!(!Arc::ptr_eq(full_type.tokenizer(), &tokenizer));
    assert_eq!(full_type.text(), builder.raw_text());
    assert_eq!(full_type.text(), "int[12]");
}

// ============================================================================
// Contracts
// ============================================================================

#[test]
#[should_panic(expected = "not on the same base")]
fn test_ordering_iterators_of_different_tokenizers() {
    let first = Tokenizer::new("int x");
    let second = Tokenizer::new("int x");

    let _ = first.first_token() < second.first_token();
}

#[test]
fn test_iterators_of_different_tokenizers_are_not_equal() {
    let first = Tokenizer::new("int x");
    let second = Tokenizer::new("int x");

    assert_ne!(first.first_token(), second.first_token());
    assert_eq!(first.first_token(), first.first_token());
}
