//! A section with a parameter list, split into the parts before, between and
//! after its parameters.

use super::access_level::AccessLevel;
use super::blocks::try_to_skip_block;
use super::options::ParameterStyle;
use super::section::Section;
use super::token_range::TokenRange;
use super::type_builder::TypeBuilder;
use crate::tokenization::{FundamentalType, PrototypeParsingType, TokenIterator};

/// A [`Section`] containing a parameter list.
///
/// Parameter boundaries are found from the
/// [`StartOfParams`](PrototypeParsingType::StartOfParams),
/// [`ParamSeparator`](PrototypeParsingType::ParamSeparator) and
/// [`EndOfParams`](PrototypeParsingType::EndOfParams) tags when the section is
/// created. If those tags change afterwards, call
/// [`ParameterSection::recalculate_parameters`].
#[derive(Debug, Clone)]
pub struct ParameterSection {
    section: Section,
    before_parameters: Section,
    after_parameters: Option<Section>,
    parameters: Vec<Section>,
    parameter_style: ParameterStyle,
    supports_implied_types: bool,
}

impl ParameterSection {
    /// Covers everything from `start` to `end`, including the parts before and
    /// after the parameters. An [`Unknown`](ParameterStyle::Unknown) style is
    /// detected from the parameters.
    pub fn new(
        start: TokenIterator,
        end: TokenIterator,
        parameter_style: ParameterStyle,
        supports_implied_types: bool,
    ) -> Self {
        let section = Section::new(start, end);
        let mut parameter_section = Self {
            before_parameters: section.clone(),
            section,
            after_parameters: None,
            parameters: Vec::new(),
            parameter_style,
            supports_implied_types,
        };
        parameter_section.recalculate_parameters();
        parameter_section
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn start(&self) -> &TokenIterator {
        self.section.start()
    }

    pub fn end(&self) -> &TokenIterator {
        self.section.end()
    }

    pub fn bounds(&self) -> TokenRange {
        self.section.bounds()
    }

    /// The name, which is looked for before the parameters only.
    pub fn get_name(&self) -> Option<TokenRange> {
        self.before_parameters.get_name()
    }

    pub fn get_access_level(&self) -> AccessLevel {
        self.before_parameters.get_access_level()
    }

    /// Always `None`. Only individual parameters have types, see
    /// [`ParameterSection::get_base_parameter_type`].
    pub fn get_base_type(&self) -> Option<TokenRange> {
        None
    }

    /// Always `None`. See [`ParameterSection::build_full_parameter_type`].
    pub fn build_full_type(&self) -> Option<TokenRange> {
        None
    }

    /// Always `None`. See [`ParameterSection::get_parameter_default_value`].
    pub fn get_default_value(&self) -> Option<TokenRange> {
        None
    }

    pub fn has_type(&self) -> bool {
        self.section.has_type()
    }

    /// Everything before the first parameter, including the opening symbol of
    /// the parameter list.
    pub fn get_before_parameters(&self) -> Option<TokenRange> {
        Some(self.before_parameters.bounds())
    }

    /// Everything after the last parameter, starting with the closing symbol
    /// of the parameter list.
    pub fn get_after_parameters(&self) -> Option<TokenRange> {
        self.after_parameters.as_ref().map(Section::bounds)
    }

    /// The symbol opening the parameter list, such as `(`, `#(` or `{`.
    pub fn get_opening_parameter_symbol(&self) -> Option<TokenRange> {
        let before_start = self.before_parameters.start();
        let mut symbol_end = self.before_parameters.end().clone();

        let mut lookbehind = symbol_end.clone();
        lookbehind.previous();
        while lookbehind >= *before_start
            && lookbehind.fundamental_type() == FundamentalType::Whitespace
            && lookbehind.prototype_parsing_type() == PrototypeParsingType::Null
        {
            symbol_end = lookbehind.clone();
            lookbehind.previous();
        }

        let mut symbol_start = symbol_end.clone();
        while lookbehind >= *before_start
            && matches!(
                lookbehind.prototype_parsing_type(),
                PrototypeParsingType::StartOfParams | PrototypeParsingType::OpeningExtensionSymbol
            )
        {
            symbol_start = lookbehind.clone();
            lookbehind.previous();
        }

        (symbol_start < symbol_end).then(|| TokenRange::new(symbol_start, symbol_end))
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// Splits the section into its before, parameter and after parts again.
    /// Only needed if the delimiting tags changed since the section was
    /// created.
    ///
    /// Each parameter includes its trailing separator. Whitespace that isn't
    /// tagged is trimmed from the edges. A trailing parameter that's only
    /// whitespace, as left by a separator after every struct member, is dropped
    /// unless it's the only one.
    pub fn recalculate_parameters(&mut self) {
        let start = self.section.start().clone();
        let end = self.section.end().clone();
        let mut iterator = start.clone();

        while iterator < end && iterator.prototype_parsing_type() != PrototypeParsingType::StartOfParams {
            iterator.next();
        }

        // The opening symbol can span several tokens, like `(*`
        while iterator < end && iterator.prototype_parsing_type() == PrototypeParsingType::StartOfParams {
            iterator.next();
        }
        while iterator < end
            && iterator.prototype_parsing_type() == PrototypeParsingType::OpeningExtensionSymbol
        {
            iterator.next();
        }

        self.before_parameters = Section::new(start, iterator.clone());
        self.parameters = Vec::new();
        self.after_parameters = None;

        if iterator < end && is_insignificant_whitespace(&iterator) {
            iterator.next();
        }

        if iterator < end && iterator.prototype_parsing_type() != PrototypeParsingType::EndOfParams {
            self.parameters = Vec::with_capacity(count_parameters(&iterator, &end));
            let mut start_of_parameter = iterator.clone();

            loop {
                if iterator >= end || iterator.prototype_parsing_type() == PrototypeParsingType::EndOfParams {
                    let mut lookbehind = iterator.clone();
                    lookbehind.previous();
                    let parameter_end = if lookbehind >= start_of_parameter
                        && is_insignificant_whitespace(&lookbehind)
                    {
                        lookbehind
                    } else {
                        iterator.clone()
                    };
                    self.parameters.push(Section::new(start_of_parameter, parameter_end));
                    break;
                }

                if iterator.prototype_parsing_type() == PrototypeParsingType::ParamSeparator {
                    iterator.next();
                    self.parameters.push(Section::new(start_of_parameter, iterator.clone()));
                    if iterator < end && is_insignificant_whitespace(&iterator) {
                        iterator.next();
                    }
                    start_of_parameter = iterator.clone();
                } else {
                    iterator.next();
                }
            }
        }

        if iterator < end {
            self.after_parameters = Some(Section::new(iterator, end));
        }

        if self.parameters.len() > 1
            && self
                .parameters
                .last()
                .is_some_and(is_only_whitespace)
        {
            self.parameters.pop();
        }

        if self.parameter_style == ParameterStyle::Unknown {
            self.recalculate_parameter_style();
        }

        tracing::trace!(
            parameters = self.parameters.len(),
            style = ?self.parameter_style,
            "recalculated parameters"
        );
    }

    /// Detects whether the parameters are C style (`int x`) or Pascal style
    /// (`x: integer`) from whichever of a type or a name comes first. The first
    /// parameter with either decides. Defaults to C.
    pub fn recalculate_parameter_style(&mut self) -> ParameterStyle {
        self.parameter_style = self
            .parameters
            .iter()
            .find_map(detect_parameter_style)
            .unwrap_or(ParameterStyle::C);
        self.parameter_style
    }

    pub fn number_of_parameters(&self) -> usize {
        self.parameters.len()
    }

    pub fn parameters(&self) -> &[Section] {
        &self.parameters
    }

    pub fn get_parameter_bounds(&self, index: usize) -> Option<TokenRange> {
        self.parameters.get(index).map(Section::bounds)
    }

    pub fn get_parameter_name(&self, index: usize) -> Option<TokenRange> {
        self.parameters.get(index)?.get_name()
    }

    pub fn get_parameter_default_value(&self, index: usize) -> Option<TokenRange> {
        self.parameters.get(index)?.get_default_value()
    }

    /// The parameter's type without modifiers.
    ///
    /// With `implied_types` set, and if the language supports them, a
    /// parameter without a type borrows one from its neighbors, so `y` in
    /// `int x, y` gives `int`.
    pub fn get_base_parameter_type(&self, index: usize, implied_types: bool) -> Option<TokenRange> {
        let parameter = self.parameters.get(index)?;
        if parameter.has_type() {
            return parameter.get_base_type();
        }

        if !implied_types || !self.supports_implied_types {
            return None;
        }
        let implied_index = self.get_implied_type_index(index)?;
        self.parameters[implied_index].get_base_type()
    }

    /// The parameter's type with all its modifiers, built the same way as
    /// [`Section::build_full_type`].
    ///
    /// A borrowed type is always built into a new tokenizer. It combines the
    /// parameter's own modifiers with the type and type modifiers of the
    /// parameter it's borrowed from, so `b` in `int a, *b` gives `int*`.
    pub fn build_full_parameter_type(&self, index: usize, implied_types: bool) -> Option<TokenRange> {
        let parameter = self.parameters.get(index)?;
        if parameter.has_type() {
            return parameter.build_full_type();
        }

        if !implied_types || !self.supports_implied_types {
            return None;
        }
        let implied_index = self.get_implied_type_index(index)?;
        let implied = &self.parameters[implied_index];

        let mut builder = TypeBuilder::new();
        let end = parameter.end();

        // Pascal parameters get their modifiers before the name first, like
        // `out` in `out a, b: integer`. C parameters don't, or `int a, *b` would
        // come out as `*int`.
        let mut name = parameter.start().clone();
        if self.parameter_style == ParameterStyle::Pascal {
            while name < *end
                && !matches!(
                    name.prototype_parsing_type(),
                    PrototypeParsingType::Name | PrototypeParsingType::KeywordName
                )
            {
                name = add_parameter_modifier(&mut builder, &name, end);
            }
        }

        // The borrowed type and its modifiers
        let mut iterator = implied.start().clone();
        while iterator < *implied.end() {
            match iterator.prototype_parsing_type() {
                PrototypeParsingType::Type
                | PrototypeParsingType::TypeModifier
                | PrototypeParsingType::TypeQualifier => {
                    builder.add_token(&iterator);
                    iterator.next();
                }
                PrototypeParsingType::OpeningTypeModifier | PrototypeParsingType::StartOfTuple => {
                    iterator = builder.add_block_at(&iterator, implied.end());
                }
                _ => {
                    if !try_to_skip_block(&mut iterator, implied.end()) {
                        iterator.next();
                    }
                }
            }
        }

        // The parameter's own modifiers, after the name for Pascal so `[12]`
        // in `out a[12], b: integer` is kept
        let mut iterator = name;
        while iterator < *end {
            iterator = add_parameter_modifier(&mut builder, &iterator, end);
        }

        Some(TokenRange::whole(&builder.into_tokenizer()))
    }

    /// The index of the nearest parameter with its own type, searching
    /// backwards for C style and forwards for Pascal style.
    pub fn get_implied_type_index(&self, index: usize) -> Option<usize> {
        match self.parameter_style {
            ParameterStyle::Pascal => (index + 1..self.parameters.len())
                .find(|&candidate| self.parameters[candidate].has_type()),
            ParameterStyle::C | ParameterStyle::Unknown => (0..index.min(self.parameters.len()))
                .rev()
                .find(|&candidate| self.parameters[candidate].has_type()),
        }
    }

    pub fn parameter_style(&self) -> ParameterStyle {
        self.parameter_style
    }

    /// Overrides the parameter style. Setting it to
    /// [`Unknown`](ParameterStyle::Unknown) detects it again.
    pub fn set_parameter_style(&mut self, parameter_style: ParameterStyle) {
        self.parameter_style = parameter_style;
        if parameter_style == ParameterStyle::Unknown {
            self.recalculate_parameter_style();
        }
    }

    pub fn supports_implied_types(&self) -> bool {
        self.supports_implied_types
    }
}

/// Adds the parameter modifier at `iterator`, if it's on one, and returns the
/// iterator past whatever it was on.
fn add_parameter_modifier(
    builder: &mut TypeBuilder,
    iterator: &TokenIterator,
    limit: &TokenIterator,
) -> TokenIterator {
    match iterator.prototype_parsing_type() {
        PrototypeParsingType::ParamModifier => {
            builder.add_token(iterator);
            let mut next = iterator.clone();
            next.next();
            next
        }
        PrototypeParsingType::OpeningParamModifier => builder.add_block_at(iterator, limit),
        _ => {
            let mut next = iterator.clone();
            if !try_to_skip_block(&mut next, limit) {
                next.next();
            }
            next
        }
    }
}

fn count_parameters(start: &TokenIterator, end: &TokenIterator) -> usize {
    let mut count = 1;
    let mut iterator = start.clone();
    while iterator < *end && iterator.prototype_parsing_type() != PrototypeParsingType::EndOfParams {
        if iterator.prototype_parsing_type() == PrototypeParsingType::ParamSeparator {
            count += 1;
        }
        iterator.next();
    }
    count
}

fn is_insignificant_whitespace(iterator: &TokenIterator) -> bool {
    iterator.fundamental_type() == FundamentalType::Whitespace
        && iterator.prototype_parsing_type() == PrototypeParsingType::Null
}

fn is_only_whitespace(section: &Section) -> bool {
    let mut iterator = section.start().clone();
    while iterator < *section.end() {
        if iterator.fundamental_type() != FundamentalType::Whitespace {
            return false;
        }
        iterator.next();
    }
    true
}

fn detect_parameter_style(parameter: &Section) -> Option<ParameterStyle> {
    let mut iterator = parameter.start().clone();
    while iterator < *parameter.end() {
        match iterator.prototype_parsing_type() {
            PrototypeParsingType::Name | PrototypeParsingType::KeywordName => {
                return Some(ParameterStyle::Pascal);
            }
            PrototypeParsingType::Type | PrototypeParsingType::StartOfTuple => {
                return Some(ParameterStyle::C);
            }
            _ => {}
        }
        iterator.next();
    }
    None
}
