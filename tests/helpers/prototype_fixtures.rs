//! Tagged prototypes, standing in for the output of a language parser.

use std::sync::Arc;

use docproto::{PrototypeParsingType as P, Tokenizer};

/// Tokenizes the concatenated segments and tags each one. Segments must fall
/// on token boundaries.
pub fn tagged(segments: &[(&str, P)]) -> Arc<Tokenizer> {
    let text: String = segments.iter().map(|(text, _)| *text).collect();
    let tokenizer = Tokenizer::new(text);

    let mut iterator = tokenizer.first_token();
    for (text, tag) in segments {
        if *tag != P::Null {
            iterator.set_prototype_parsing_type_by_characters(*tag, text.len());
        }
        iterator.next_by_characters(text.len() as isize);
    }

    tokenizer
}

/// `(int x, y)`
pub fn c_implied_parameters() -> Arc<Tokenizer> {
    tagged(&[
        ("(", P::StartOfParams),
        ("int", P::Type),
        (" ", P::Null),
        ("x", P::Name),
        (",", P::ParamSeparator),
        (" ", P::Null),
        ("y", P::Name),
        (")", P::EndOfParams),
    ])
}

/// `(a, b: integer)`
pub fn pascal_implied_parameters() -> Arc<Tokenizer> {
    tagged(&[
        ("(", P::StartOfParams),
        ("a", P::Name),
        (",", P::ParamSeparator),
        (" ", P::Null),
        ("b", P::Name),
        (":", P::NameTypeSeparator),
        (" ", P::Null),
        ("integer", P::Type),
        (")", P::EndOfParams),
    ])
}

/// `get() set(int value)`, a property with both accessors in one prototype
pub fn getter_and_setter() -> Arc<Tokenizer> {
    tagged(&[
        ("get", P::Null),
        ("(", P::StartOfParams),
        (")", P::EndOfParams),
        (" ", P::Null),
        ("set", P::Null),
        ("(", P::StartOfParams),
        ("int", P::Type),
        (" ", P::Null),
        ("value", P::Name),
        (")", P::EndOfParams),
    ])
}

/// `protected internal static List<string> Names (int count = 10, bool sorted) where T : class`
pub fn csharp_method() -> Arc<Tokenizer> {
    tagged(&[
        ("protected", P::TypeModifier),
        (" ", P::Null),
        ("internal", P::TypeModifier),
        (" ", P::Null),
        ("static", P::TypeModifier),
        (" ", P::Null),
        ("List", P::Type),
        ("<", P::OpeningTypeModifier),
        ("string", P::Type),
        (">", P::ClosingTypeModifier),
        (" ", P::Null),
        ("Names", P::Name),
        (" ", P::Null),
        ("(", P::StartOfParams),
        ("int", P::Type),
        (" ", P::Null),
        ("count", P::Name),
        (" ", P::Null),
        ("=", P::DefaultValueSeparator),
        (" ", P::Null),
        ("10", P::DefaultValue),
        (",", P::ParamSeparator),
        (" ", P::Null),
        ("bool", P::Type),
        (" ", P::Null),
        ("sorted", P::Name),
        (")", P::EndOfParams),
        (" ", P::Null),
        ("where", P::StartOfPrototypeSection),
        (" T : class", P::Null),
    ])
}
