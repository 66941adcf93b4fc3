#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use rstest::rstest;

use super::tagged;
use crate::prototypes::{AccessLevel, Section};
use crate::tokenization::{FundamentalType, PrototypeParsingType as P, Tokenizer};

fn whole(tokenizer: &Arc<Tokenizer>) -> Section {
    Section::new(tokenizer.first_token(), tokenizer.end_of_tokens())
}

/// Tags every word as a type modifier, the way a fallback parser would.
fn modifiers(text: &str) -> Arc<Tokenizer> {
    let tokenizer = Tokenizer::new(text);
    let mut iterator = tokenizer.first_token();
    while iterator.is_in_bounds() {
        if iterator.fundamental_type() == FundamentalType::Text {
            iterator.set_prototype_parsing_type(P::TypeModifier);
        }
        iterator.next();
    }
    tokenizer
}

// ============================================================================
// Construction
// ============================================================================

#[test]
#[should_panic(expected = "end comes before its start")]
fn test_new_rejects_reversed_range() {
    let tokenizer = Tokenizer::new("int x");
    Section::new(tokenizer.end_of_tokens(), tokenizer.first_token());
}

#[test]
#[should_panic(expected = "not on the same base")]
fn test_new_rejects_different_tokenizers() {
    let first = Tokenizer::new("int x");
    let second = Tokenizer::new("int x");
    Section::new(first.first_token(), second.end_of_tokens());
}

// ============================================================================
// Name
// ============================================================================

#[test]
fn test_get_name_joins_keyword_and_name() {
    let tokenizer = tagged(&[
        ("void", P::Type),
        (" ", P::Null),
        ("operator", P::KeywordName),
        ("+", P::Name),
        (" ", P::Null),
        ("b", P::Name),
    ]);
    assert_eq!(whole(&tokenizer).get_name().unwrap().text(), "operator+");
}

#[test]
fn test_get_name_without_name() {
    let tokenizer = tagged(&[("int", P::Type)]);
    assert!(whole(&tokenizer).get_name().is_none());
}

// ============================================================================
// Access level
// ============================================================================

#[rstest]
#[case("public void", AccessLevel::Public)]
#[case("protected internal", AccessLevel::ProtectedInternal)]
#[case("internal protected", AccessLevel::ProtectedInternal)]
#[case("private protected", AccessLevel::PrivateProtected)]
#[case("protected_internal", AccessLevel::Unknown)]
#[case("static readonly", AccessLevel::Unknown)]
fn test_get_access_level(#[case] text: &str, #[case] expected: AccessLevel) {
    assert_eq!(whole(&modifiers(text)).get_access_level(), expected);
}

#[test]
fn test_get_access_level_needs_modifier_tags() {
    let tokenizer = Tokenizer::new("public void");
    assert_eq!(whole(&tokenizer).get_access_level(), AccessLevel::Unknown);
}

// ============================================================================
// Types
// ============================================================================

#[test]
fn test_get_base_type_skips_modifiers() {
    let tokenizer = tagged(&[
        ("unsigned", P::TypeModifier),
        (" ", P::Null),
        ("std", P::TypeQualifier),
        (".", P::TypeQualifier),
        ("Int", P::Type),
        ("*", P::TypeModifier),
        (" ", P::Null),
        ("x", P::Name),
    ]);
    assert_eq!(whole(&tokenizer).get_base_type().unwrap().text(), "std.Int");
}

#[test]
fn test_tuples_have_no_base_type() {
    let tokenizer = tagged(&[
        ("(", P::StartOfTuple),
        ("int", P::Type),
        (")", P::EndOfTuple),
        (" ", P::Null),
        ("t", P::Name),
    ]);
    let section = whole(&tokenizer);

    assert!(section.get_base_type().is_none());
    assert!(section.has_type());
}

#[test]
fn test_build_full_type_points_into_original() {
    let tokenizer = tagged(&[
        ("unsigned", P::TypeModifier),
        (" ", P::Null),
        ("int", P::Type),
        (" ", P::Null),
        ("x", P::Name),
    ]);
    let full_type = whole(&tokenizer).build_full_type().unwrap();

    assert_eq!(full_type.text(), "unsigned int");
    assert!(Arc::ptr_eq(full_type.tokenizer(), &tokenizer));
}

#[test]
fn test_build_full_type_normalizes_spacing() {
    let tokenizer = tagged(&[
        ("int", P::Type),
        (" ", P::Null),
        ("*", P::TypeModifier),
        ("x", P::Name),
    ]);
    let full_type = whole(&tokenizer).build_full_type().unwrap();

    assert_eq!(full_type.text(), "int*");
    assert!(!Arc::ptr_eq(full_type.tokenizer(), &tokenizer));
}

#[test]
fn test_build_full_type_collects_modifiers_after_name() {
    let tokenizer = tagged(&[
        ("int", P::Type),
        (" ", P::Null),
        ("x", P::Name),
        ("[", P::OpeningTypeModifier),
        ("12", P::Null),
        ("]", P::ClosingTypeModifier),
    ]);
    let full_type = whole(&tokenizer).build_full_type().unwrap();

    assert_eq!(full_type.text(), "int[12]");
    let built = full_type.tokenizer();
    assert_eq!(built.prototype_parsing_type_at(0), P::Type);
    assert_eq!(built.prototype_parsing_type_at(1), P::OpeningTypeModifier);
}

#[test]
fn test_build_full_type_of_tuple() {
    let tokenizer = tagged(&[
        ("(", P::StartOfTuple),
        ("int", P::Type),
        (",", P::TupleMemberSeparator),
        (" ", P::Null),
        ("string", P::Type),
        (")", P::EndOfTuple),
        (" ", P::Null),
        ("t", P::Name),
    ]);
    assert_eq!(whole(&tokenizer).build_full_type().unwrap().text(), "(int, string)");
}

#[rstest]
#[case(&[("x", P::Name)])]
#[case(&[("const", P::TypeModifier), (" ", P::Null), ("x", P::Name)])]
fn test_build_full_type_without_type(#[case] segments: &[(&str, P)]) {
    let tokenizer = tagged(segments);
    assert!(whole(&tokenizer).build_full_type().is_none());
}

// ============================================================================
// Default value
// ============================================================================

#[test]
fn test_get_default_value() {
    let tokenizer = tagged(&[
        ("x", P::Name),
        (" ", P::Null),
        ("=", P::DefaultValueSeparator),
        (" ", P::Null),
        ("a + b", P::DefaultValue),
    ]);
    assert_eq!(whole(&tokenizer).get_default_value().unwrap().text(), "a + b");
}

#[test]
fn test_get_default_value_without_one() {
    let tokenizer = tagged(&[("int", P::Type), (" ", P::Null), ("x", P::Name)]);
    assert!(whole(&tokenizer).get_default_value().is_none());
}
