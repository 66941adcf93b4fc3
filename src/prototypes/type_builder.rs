//! Assembles a type from tokens that may be scattered across a prototype.
//!
//! Spacing is normalized as tokens are added, so `unsigned  int *` and
//! `unsigned int*` build the same text:
//!
//! - whitespace is never copied, it's generated
//! - text following text gets a space, unless they were adjacent tokens
//! - text following a symbol gets a space, except after leading symbols,
//!   package separators (`.` and `::`) and `% " ' @ (`
//! - blocks like `<int>` or `[12]` are copied whole, and text after them gets
//!   a space
//!
//! [`TypeBuilder::has_similar_spacing`] replays the same rules against existing
//! text so callers can skip building when the original is already canonical.

use std::sync::Arc;

use super::blocks::{get_end_of_block, try_to_skip_block};
use crate::base::{ContractViolation, violated};
use crate::tokenization::{
    FundamentalType, PrototypeParsingType, SyntaxHighlightingType, TokenIterator, Tokenizer,
};

/// Builds a new [`Tokenizer`] holding a type, keeping the prototype parsing
/// and syntax highlighting tags of every copied token.
#[derive(Debug, Default)]
pub struct TypeBuilder {
    raw_text: String,
    token_lengths: Vec<u8>,
    prototype_parsing_types: Vec<PrototypeParsingType>,
    syntax_highlighting_types: Vec<SyntaxHighlightingType>,

    last_token: Option<TokenIterator>,
    last_token_type: FundamentalType,
    past_first_text: bool,
    dont_add_space_after_symbol: bool,
    last_symbol_was_block: bool,
}

impl TypeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single type token. Tokens that aren't part of a type, and
    /// whitespace, are ignored. Any extension symbols directly after the token
    /// are added along with it.
    ///
    /// # Panics
    ///
    /// If the token opens a modifier block. Use [`TypeBuilder::add_block`].
    pub fn add_token(&mut self, token: &TokenIterator) {
        match token.prototype_parsing_type() {
            PrototypeParsingType::OpeningTypeModifier | PrototypeParsingType::OpeningParamModifier => {
                violated(ContractViolation::BlockThroughTokenApi)
            }
            PrototypeParsingType::Type
            | PrototypeParsingType::TypeModifier
            | PrototypeParsingType::TypeQualifier
            | PrototypeParsingType::ParamModifier
            | PrototypeParsingType::StartOfTuple
            | PrototypeParsingType::EndOfTuple
            | PrototypeParsingType::TupleMemberSeparator
            | PrototypeParsingType::TupleMemberName => {}
            _ => return,
        }

        let mut token_type = spacing_type(token);
        if token_type != FundamentalType::Text && token_type != FundamentalType::Symbol {
            return;
        }

        let after_member_separator = self.last_token.as_ref().is_some_and(|last| {
            last.prototype_parsing_type() == PrototypeParsingType::TupleMemberSeparator
        });
        if self.needs_space_before(token, token_type) || after_member_separator {
            self.push_space();
        }

        if token.fundamental_type() == FundamentalType::Symbol {
            self.dont_add_space_after_symbol = is_joining_symbol(token)
                || (token.character() == ':' && self.dont_add_space_after_symbol);
        }

        let mut iterator = token.clone();
        loop {
            self.push_token(&iterator);
            self.last_token = Some(iterator.clone());
            self.last_token_type = token_type;
            self.last_symbol_was_block = false;
            if token_type == FundamentalType::Text {
                self.past_first_text = true;
            }

            iterator.next();
            token_type = spacing_type(&iterator);

            if !matches!(
                iterator.prototype_parsing_type(),
                PrototypeParsingType::OpeningExtensionSymbol
                    | PrototypeParsingType::ClosingExtensionSymbol
            ) {
                break;
            }
        }
    }

    /// Adds a whole block, from its opening token up to `end_of_block`.
    /// Tuples have their members added with normalized spacing. Modifier
    /// blocks are copied as they are.
    ///
    /// # Panics
    ///
    /// If `opening` and `closing` aren't a matching pair of block tags.
    pub fn add_block(
        &mut self,
        opening: &TokenIterator,
        closing: &TokenIterator,
        end_of_block: &TokenIterator,
    ) {
        if opening.prototype_parsing_type() == PrototypeParsingType::StartOfTuple {
            self.add_tuple(opening, closing, end_of_block);
        } else {
            self.add_modifier_block(opening, closing, end_of_block);
        }
    }

    /// Copies a modifier block like `<int>` or `[12]` verbatim.
    ///
    /// # Panics
    ///
    /// If `opening` and `closing` aren't modifier block tags.
    pub fn add_modifier_block(
        &mut self,
        opening: &TokenIterator,
        closing: &TokenIterator,
        end_of_block: &TokenIterator,
    ) {
        let opens = matches!(
            opening.prototype_parsing_type(),
            PrototypeParsingType::OpeningTypeModifier | PrototypeParsingType::OpeningParamModifier
        );
        let closes = matches!(
            closing.prototype_parsing_type(),
            PrototypeParsingType::ClosingTypeModifier | PrototypeParsingType::ClosingParamModifier
        );
        if !opens || !closes {
            violated(ContractViolation::MismatchedBlock);
        }

        if opening >= end_of_block {
            return;
        }

        let token_type = spacing_type(opening);
        if self.needs_space_before(opening, token_type) {
            self.push_space();
        }

        let mut iterator = opening.clone();
        while iterator < *end_of_block {
            self.push_token(&iterator);
            iterator.next();
        }

        self.last_token = Some(closing.clone());
        self.last_token_type = token_type;
        self.last_symbol_was_block = true;
        self.dont_add_space_after_symbol = false;
        if token_type == FundamentalType::Text {
            self.past_first_text = true;
        }
    }

    /// Adds a tuple like `(int, string)`, normalizing the spacing of its
    /// members. Modifier blocks inside it are copied verbatim.
    ///
    /// # Panics
    ///
    /// If `start_of_tuple` and `end_of_tuple` aren't tuple tags.
    pub fn add_tuple(
        &mut self,
        start_of_tuple: &TokenIterator,
        end_of_tuple: &TokenIterator,
        end_of_block: &TokenIterator,
    ) {
        if start_of_tuple.prototype_parsing_type() != PrototypeParsingType::StartOfTuple
            || end_of_tuple.prototype_parsing_type() != PrototypeParsingType::EndOfTuple
        {
            violated(ContractViolation::MismatchedBlock);
        }

        let mut iterator = start_of_tuple.clone();
        while iterator < *end_of_block {
            let tag = iterator.prototype_parsing_type();
            let opens_modifier = matches!(
                tag,
                PrototypeParsingType::OpeningTypeModifier
                    | PrototypeParsingType::OpeningParamModifier
            );

            if opens_modifier {
                match get_end_of_block(&iterator, end_of_block) {
                    Some((closing, end_of_modifier)) => {
                        self.add_modifier_block(&iterator, &closing, &end_of_modifier);
                        iterator = end_of_modifier;
                    }
                    None => {
                        iterator.next();
                    }
                }
            } else {
                if iterator.fundamental_type() != FundamentalType::Whitespace {
                    self.add_token(&iterator);
                }
                iterator.next();
            }
        }
    }

    /// Adds every type token between two iterators, with blocks added whole.
    /// Tokens that aren't part of a type are skipped.
    pub fn add_type_tokens(&mut self, start: &TokenIterator, end: &TokenIterator) {
        let mut iterator = start.clone();
        while iterator < *end {
            match iterator.prototype_parsing_type() {
                PrototypeParsingType::Type
                | PrototypeParsingType::TypeModifier
                | PrototypeParsingType::TypeQualifier
                | PrototypeParsingType::ParamModifier => {
                    self.add_token(&iterator);
                    iterator.next();
                }
                PrototypeParsingType::OpeningTypeModifier
                | PrototypeParsingType::OpeningParamModifier
                | PrototypeParsingType::StartOfTuple => {
                    iterator = self.add_block_at(&iterator, end);
                }
                _ => {
                    iterator.next();
                }
            }
        }
    }

    /// Adds the block at `opening` and returns the iterator past it. Unclosed
    /// blocks are stepped over one token at a time.
    pub(crate) fn add_block_at(&mut self, opening: &TokenIterator, limit: &TokenIterator) -> TokenIterator {
        match get_end_of_block(opening, limit) {
            Some((closing, end_of_block)) => {
                self.add_block(opening, &closing, &end_of_block);
                end_of_block
            }
            None => {
                let mut next = opening.clone();
                next.next();
                next
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }

    /// The text built so far.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Finishes the type as a standalone tokenizer.
    pub fn into_tokenizer(self) -> Arc<Tokenizer> {
        Tokenizer::from_classified(
            self.raw_text,
            self.token_lengths,
            &self.prototype_parsing_types,
            &self.syntax_highlighting_types,
        )
    }

    /// Whether the tokens between `start` and `end` are already spaced the
    /// way a builder would space them. Any comma fails the check, since
    /// whether `x[,,]` or `(x, y)` wants a space isn't worth guessing at.
    pub fn has_similar_spacing(start: &TokenIterator, end: &TokenIterator) -> bool {
        let mut iterator = start.clone();
        let mut past_first_text = false;
        let mut last_token_type = FundamentalType::Null;
        let mut dont_add_space_after_symbol = false;
        let mut last_symbol_was_block = false;

        while iterator < *end {
            match spacing_type(&iterator) {
                FundamentalType::Text => {
                    let spacing_ok = match last_token_type {
                        FundamentalType::Null | FundamentalType::Text | FundamentalType::Whitespace => true,
                        FundamentalType::Symbol => {
                            dont_add_space_after_symbol || (!past_first_text && !last_symbol_was_block)
                        }
                        FundamentalType::LineBreak => false,
                    };
                    if !spacing_ok {
                        return false;
                    }

                    past_first_text = true;
                    last_token_type = FundamentalType::Text;
                    if !try_to_skip_block(&mut iterator, end) {
                        iterator.next();
                    }
                }

                FundamentalType::Symbol => {
                    if iterator.character() == ',' {
                        return false;
                    }
                    if !matches!(
                        last_token_type,
                        FundamentalType::Null | FundamentalType::Text | FundamentalType::Symbol
                    ) {
                        return false;
                    }

                    last_token_type = FundamentalType::Symbol;
                    if iterator.matches_across_tokens("::", false) {
                        last_symbol_was_block = false;
                        dont_add_space_after_symbol = true;
                        iterator.next_by(2);
                    } else if is_joining_symbol(&iterator) {
                        last_symbol_was_block = false;
                        dont_add_space_after_symbol = true;
                        iterator.next();
                    } else if try_to_skip_block(&mut iterator, end) {
                        last_symbol_was_block = true;
                        dont_add_space_after_symbol = false;
                    } else {
                        last_symbol_was_block = false;
                        dont_add_space_after_symbol = false;
                        iterator.next();
                    }
                }

                FundamentalType::Whitespace
                    if iterator.character() == ' ' && iterator.raw_text_length() == 1 =>
                {
                    let space_expected = last_token_type == FundamentalType::Text
                        || (last_token_type == FundamentalType::Symbol
                            && !dont_add_space_after_symbol
                            && (past_first_text || last_symbol_was_block));
                    if !space_expected {
                        return false;
                    }

                    last_token_type = FundamentalType::Whitespace;
                    iterator.next();
                }

                _ => return false,
            }
        }

        true
    }

    fn needs_space_before(&self, token: &TokenIterator, token_type: FundamentalType) -> bool {
        if token_type != FundamentalType::Text {
            return false;
        }

        match self.last_token_type {
            FundamentalType::Text => !self.last_token.as_ref().is_some_and(|last| {
                last.is_same_base(token) && token.token_index() == last.token_index() + 1
            }),
            FundamentalType::Symbol => {
                !self.dont_add_space_after_symbol
                    && (self.past_first_text || self.last_symbol_was_block)
            }
            _ => false,
        }
    }

    fn push_token(&mut self, token: &TokenIterator) {
        let length = token.raw_text_length();
        if length == 0 {
            return;
        }

        token.append_token_to(&mut self.raw_text);
        self.token_lengths.push(length as u8);
        self.prototype_parsing_types.push(token.prototype_parsing_type());
        self.syntax_highlighting_types.push(token.syntax_highlighting_type());
    }

    fn push_space(&mut self) {
        self.raw_text.push(' ');
        self.token_lengths.push(1);
        self.prototype_parsing_types.push(PrototypeParsingType::Null);
        self.syntax_highlighting_types.push(SyntaxHighlightingType::Null);
    }
}

/// Underscores join words, so they space like text.
fn spacing_type(token: &TokenIterator) -> FundamentalType {
    if token.character() == '_' {
        FundamentalType::Text
    } else {
        token.fundamental_type()
    }
}

/// Symbols that attach to the text after them: package separators, `%` as in
/// `MyVar%TYPE`, quotes and `@` from annotations, and the parenthesis of a
/// tuple.
fn is_joining_symbol(token: &TokenIterator) -> bool {
    matches!(token.character(), '.' | '%' | '"' | '\'' | '@' | '(')
        || token.matches_across_tokens("::", false)
}
