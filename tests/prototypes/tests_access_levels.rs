#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use rstest::rstest;

use docproto::{AccessLevel, PrototypeParsingType as P, Section};

use crate::helpers::prototype_fixtures::{csharp_method, tagged};

#[rstest]
#[case("protected", "internal")]
#[case("internal", "protected")]
fn test_protected_internal_in_either_order(#[case] first: &str, #[case] second: &str) {
    let tokenizer = tagged(&[
        (first, P::TypeModifier),
        (" ", P::Null),
        (second, P::TypeModifier),
        (" ", P::Null),
        ("void", P::Type),
    ]);
    let section = Section::new(tokenizer.first_token(), tokenizer.end_of_tokens());

    assert_eq!(section.get_access_level(), AccessLevel::ProtectedInternal);
}

#[test]
fn test_substrings_are_not_keywords() {
    let tokenizer = tagged(&[
        ("protected_internal", P::TypeModifier),
        (" ", P::Null),
        ("void", P::Type),
    ]);
    let section = Section::new(tokenizer.first_token(), tokenizer.end_of_tokens());

    assert_eq!(section.get_access_level(), AccessLevel::Unknown);
}

#[test]
fn test_method_access_level() {
    let prototype =
        docproto::ParsedPrototype::new(csharp_method(), docproto::PrototypeOptions::default());
    assert_eq!(prototype.get_access_level(), AccessLevel::ProtectedInternal);
}
