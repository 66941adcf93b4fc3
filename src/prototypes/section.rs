//! A classified range of a prototype and the accessors that read it.

use std::sync::Arc;

use super::access_level::AccessLevel;
use super::blocks::try_to_skip_block;
use super::token_range::TokenRange;
use super::type_builder::TypeBuilder;
use crate::base::{ContractViolation, violated};
use crate::tokenization::{FundamentalType, PrototypeParsingType, TokenIterator, Tokenizer};

/// A contiguous chunk of a prototype, read through the prototype parsing tags
/// a language parser stamped on its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    start: TokenIterator,
    end: TokenIterator,
}

impl Section {
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

    pub fn start(&self) -> &TokenIterator {
        &self.start
    }

    pub fn end(&self) -> &TokenIterator {
        &self.end
    }

    pub fn bounds(&self) -> TokenRange {
        TokenRange::new(self.start.clone(), self.end.clone())
    }

    /// The first run of [`Name`](PrototypeParsingType::Name) or
    /// [`KeywordName`](PrototypeParsingType::KeywordName) tokens.
    pub fn get_name(&self) -> Option<TokenRange> {
        self.run_of(
            |tag| matches!(tag, PrototypeParsingType::Name | PrototypeParsingType::KeywordName),
            |tag| matches!(tag, PrototypeParsingType::Name | PrototypeParsingType::KeywordName),
        )
    }

    /// Reads the access level from standalone words tagged as
    /// [`TypeModifier`](PrototypeParsingType::TypeModifier).
    ///
    /// This is a fallback for languages without a dedicated parser, so it
    /// only knows the common keywords. See [`AccessLevel::with_modifier`].
    pub fn get_access_level(&self) -> AccessLevel {
        let mut access_level = AccessLevel::Unknown;
        let mut iterator = self.start.clone();

        while iterator < self.end {
            if iterator.prototype_parsing_type() == PrototypeParsingType::TypeModifier
                && iterator.is_standalone_word()
            {
                if let Some(level) = access_level.with_modifier(&iterator.string()) {
                    access_level = level;
                }
            }
            iterator.next();
        }

        access_level
    }

    /// The type without its modifiers, so `unsigned int*[]` gives `int`.
    /// Qualifiers like `std::` are included. Tuples have no base type.
    pub fn get_base_type(&self) -> Option<TokenRange> {
        self.run_of(
            |tag| {
                matches!(
                    tag,
                    PrototypeParsingType::Type
                        | PrototypeParsingType::TypeQualifier
                        | PrototypeParsingType::StartOfTuple
                )
            },
            |tag| matches!(tag, PrototypeParsingType::Type | PrototypeParsingType::TypeQualifier),
        )
    }

    /// The type with all of its modifiers and qualifiers.
    ///
    /// If the whole type is one continuous run that's already spaced the way
    /// [`TypeBuilder`] would space it, the result points into this section's
    /// tokenizer. Otherwise it points into a new tokenizer holding the built
    /// type.
    pub fn build_full_type(&self) -> Option<TokenRange> {
        let mut iterator = self.start.clone();
        while iterator < self.end && !is_full_type_token(iterator.prototype_parsing_type()) {
            iterator.next();
        }

        let full_type_start = iterator.clone();
        let mut found_type = false;

        // The continuous part
        while iterator < self.end {
            let tag = iterator.prototype_parsing_type();

            if tag == PrototypeParsingType::Type {
                found_type = true;
                iterator.next();
            } else if matches!(
                tag,
                PrototypeParsingType::TypeModifier
                    | PrototypeParsingType::TypeQualifier
                    | PrototypeParsingType::ParamModifier
            ) {
                iterator.next();
            } else if try_to_skip_block(&mut iterator, &self.end) {
                if tag == PrototypeParsingType::StartOfTuple {
                    found_type = true;
                }
            } else if iterator.fundamental_type() == FundamentalType::Whitespace {
                // Whitespace only counts if more of the type follows it
                let mut lookahead = iterator.clone();
                lookahead.next();
                if !is_full_type_token(lookahead.prototype_parsing_type()) {
                    break;
                }
                iterator = lookahead;
            } else {
                break;
            }
        }

        let full_type_end = iterator.clone();

        // Anything type related past it means it isn't continuous
        let mut continuous = true;
        while iterator < self.end {
            match iterator.prototype_parsing_type() {
                PrototypeParsingType::Type | PrototypeParsingType::StartOfTuple => {
                    found_type = true;
                    continuous = false;
                }
                PrototypeParsingType::TypeModifier
                | PrototypeParsingType::TypeQualifier
                | PrototypeParsingType::OpeningTypeModifier
                | PrototypeParsingType::ParamModifier
                | PrototypeParsingType::OpeningParamModifier => {
                    continuous = false;
                }
                _ => {}
            }

            if found_type && !continuous {
                break;
            }
            iterator.next();
        }

        if !found_type {
            return None;
        }

        if !continuous {
            tracing::debug!("building full type: type tokens are not continuous");
            return Some(TokenRange::whole(&self.build_type()));
        }
        if !TypeBuilder::has_similar_spacing(&full_type_start, &full_type_end) {
            tracing::debug!("building full type: spacing is not canonical");
            return Some(TokenRange::whole(&self.build_type()));
        }

        debug_assert_eq!(
            full_type_start.text_between(&full_type_end),
            self.build_type().raw_text(),
            "continuous type differs from the built one"
        );
        Some(TokenRange::new(full_type_start, full_type_end))
    }

    /// The run of [`DefaultValue`](PrototypeParsingType::DefaultValue) tokens.
    pub fn get_default_value(&self) -> Option<TokenRange> {
        let is_default_value = |tag: PrototypeParsingType| tag == PrototypeParsingType::DefaultValue;
        self.run_of(is_default_value, is_default_value)
    }

    /// Whether the section has a type of its own, including tuples.
    pub fn has_type(&self) -> bool {
        self.find(|tag| {
            matches!(tag, PrototypeParsingType::Type | PrototypeParsingType::StartOfTuple)
        })
        .is_some()
    }

    fn find(&self, predicate: impl Fn(PrototypeParsingType) -> bool) -> Option<TokenIterator> {
        let mut iterator = self.start.clone();
        while iterator < self.end {
            if predicate(iterator.prototype_parsing_type()) {
                return Some(iterator);
            }
            iterator.next();
        }
        None
    }

    /// Finds the first token matching `starts`, then extends it over tokens
    /// matching `continues`. Returns `None` if nothing was covered.
    fn run_of(
        &self,
        starts: impl Fn(PrototypeParsingType) -> bool,
        continues: impl Fn(PrototypeParsingType) -> bool,
    ) -> Option<TokenRange> {
        let run_start = self.find(starts)?;

        let mut run_end = run_start.clone();
        while run_end < self.end && continues(run_end.prototype_parsing_type()) {
            run_end.next();
        }

        (run_start < run_end).then(|| TokenRange::new(run_start, run_end))
    }

    /// Builds the full type into a new tokenizer, whether or not it was
    /// continuous.
    fn build_type(&self) -> Arc<Tokenizer> {
        let mut builder = TypeBuilder::new();
        builder.add_type_tokens(&self.start, &self.end);
        builder.into_tokenizer()
    }
}

/// Tags that can start or continue a full type.
fn is_full_type_token(tag: PrototypeParsingType) -> bool {
    matches!(
        tag,
        PrototypeParsingType::Type
            | PrototypeParsingType::TypeModifier
            | PrototypeParsingType::TypeQualifier
            | PrototypeParsingType::OpeningTypeModifier
            | PrototypeParsingType::ParamModifier
            | PrototypeParsingType::OpeningParamModifier
            | PrototypeParsingType::StartOfTuple
    )
}
