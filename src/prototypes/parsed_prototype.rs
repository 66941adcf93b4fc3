//! The entry point for reading a tagged prototype.

use std::sync::Arc;

use super::access_level::AccessLevel;
use super::options::{ParameterStyle, PrototypeOptions};
use super::parameter_section::ParameterSection;
use super::prototype_section::PrototypeSection;
use super::section::Section;
use super::token_range::TokenRange;
use crate::base::{ContractViolation, violated};
use crate::tokenization::{
    FundamentalType, PreviousPastWhitespaceMode, PrototypeParsingType, Tokenizer,
};

/// A prototype whose tokens a language parser has already tagged with
/// [`PrototypeParsingType`]s, divided into sections.
///
/// Sections are delimited by
/// [`StartOfPrototypeSection`](PrototypeParsingType::StartOfPrototypeSection)
/// and [`EndOfPrototypeSection`](PrototypeParsingType::EndOfPrototypeSection)
/// tags, either of which may be used alone. A second parameter list also starts
/// a new section, so signatures like a getter and setter are kept apart.
///
/// One section is the main one, which the accessors here read from. Parameter
/// accessors return `None` when the main section has no parameter list.
///
/// Sections are calculated once. If tags change afterwards, call
/// [`ParsedPrototype::recalculate_sections`].
#[derive(Debug, Clone)]
pub struct ParsedPrototype {
    tokenizer: Arc<Tokenizer>,
    sections: Vec<PrototypeSection>,
    main_section_index: usize,
    options: PrototypeOptions,
}

impl ParsedPrototype {
    pub fn new(tokenizer: Arc<Tokenizer>, options: PrototypeOptions) -> Self {
        let mut prototype = Self {
            tokenizer,
            sections: Vec::new(),
            main_section_index: 0,
            options,
        };
        prototype.recalculate_sections();
        prototype
    }

    /// Divides the prototype into sections again and guesses the main one. A
    /// main section set by hand has to be set again afterwards.
    ///
    /// The main section is the only one if there's just one, otherwise the
    /// first with a name, otherwise the first with parameters, otherwise the
    /// first.
    pub fn recalculate_sections(&mut self) {
        let mut sections = Vec::new();
        let mut first_with_name = None;
        let mut first_with_parameters = None;

        let mut start_of_section = self.tokenizer.first_token();
        let mut end_of_section = start_of_section.clone();

        loop {
            let mut is_empty = true;
            let mut has_name = false;
            let mut has_parameters = false;

            while end_of_section.is_in_bounds() {
                let tag = end_of_section.prototype_parsing_type();

                if tag == PrototypeParsingType::StartOfPrototypeSection
                    && end_of_section > start_of_section
                {
                    break;
                }
                if tag == PrototypeParsingType::StartOfParams && has_parameters {
                    break;
                }

                if end_of_section.fundamental_type() != FundamentalType::Whitespace {
                    is_empty = false;
                }

                match tag {
                    PrototypeParsingType::Name | PrototypeParsingType::KeywordName => {
                        has_name = true;
                        end_of_section.next();
                    }
                    PrototypeParsingType::StartOfParams => {
                        has_parameters = true;
                        // Multi-token openings count as one parameter list
                        while end_of_section.prototype_parsing_type()
                            == PrototypeParsingType::StartOfParams
                        {
                            end_of_section.next();
                        }
                    }
                    PrototypeParsingType::EndOfPrototypeSection => {
                        end_of_section.next();
                        break;
                    }
                    _ => {
                        end_of_section.next();
                    }
                }
            }

            if !is_empty {
                end_of_section.previous_past_whitespace_until(
                    PreviousPastWhitespaceMode::EndingBounds,
                    &start_of_section,
                );
                start_of_section.next_past_whitespace_until(&end_of_section);

                let section = if has_parameters {
                    PrototypeSection::Parameters(ParameterSection::new(
                        start_of_section.clone(),
                        end_of_section.clone(),
                        self.options.parameter_style,
                        self.options.supports_implied_types,
                    ))
                } else {
                    PrototypeSection::Plain(Section::new(
                        start_of_section.clone(),
                        end_of_section.clone(),
                    ))
                };
                sections.push(section);

                if has_name && first_with_name.is_none() {
                    first_with_name = Some(sections.len() - 1);
                }
                if has_parameters && first_with_parameters.is_none() {
                    first_with_parameters = Some(sections.len() - 1);
                }
            }

            if !end_of_section.is_in_bounds() {
                break;
            }
            start_of_section = end_of_section.clone();
        }

        // Only possible if the prototype is nothing but whitespace
        if sections.is_empty() {
            sections.push(PrototypeSection::Plain(Section::new(
                self.tokenizer.first_token(),
                self.tokenizer.end_of_tokens(),
            )));
        }

        self.main_section_index = if sections.len() == 1 {
            0
        } else {
            first_with_name.or(first_with_parameters).unwrap_or(0)
        };
        self.sections = sections;

        tracing::trace!(
            sections = self.sections.len(),
            main_section = self.main_section_index,
            "recalculated prototype sections"
        );
    }

    // ========================================================================
    // Main section
    // ========================================================================

    pub fn get_name(&self) -> Option<TokenRange> {
        self.main_section().get_name()
    }

    /// Only reliable for languages without a dedicated parser. See
    /// [`Section::get_access_level`].
    pub fn get_access_level(&self) -> AccessLevel {
        self.main_section().get_access_level()
    }

    /// Everything before the parameters, including the opening symbol. The
    /// whole prototype if there are no parameters.
    pub fn get_before_parameters(&self) -> Option<TokenRange> {
        match self.main_parameter_section() {
            Some(section) => section.get_before_parameters(),
            None => Some(TokenRange::whole(&self.tokenizer)),
        }
    }

    pub fn get_after_parameters(&self) -> Option<TokenRange> {
        self.main_parameter_section()?.get_after_parameters()
    }

    pub fn number_of_parameters(&self) -> usize {
        self.main_parameter_section()
            .map_or(0, ParameterSection::number_of_parameters)
    }

    pub fn get_parameter(&self, index: usize) -> Option<TokenRange> {
        self.main_parameter_section()?.get_parameter_bounds(index)
    }

    pub fn get_parameter_name(&self, index: usize) -> Option<TokenRange> {
        self.main_parameter_section()?.get_parameter_name(index)
    }

    /// See [`ParameterSection::get_base_parameter_type`]. Implied types are
    /// only used if both `implied_types` and the prototype's options allow
    /// them.
    pub fn get_base_parameter_type(&self, index: usize, implied_types: bool) -> Option<TokenRange> {
        self.main_parameter_section()?
            .get_base_parameter_type(index, implied_types && self.options.supports_implied_types)
    }

    /// See [`ParameterSection::build_full_parameter_type`].
    pub fn build_full_parameter_type(&self, index: usize, implied_types: bool) -> Option<TokenRange> {
        self.main_parameter_section()?
            .build_full_parameter_type(index, implied_types && self.options.supports_implied_types)
    }

    pub fn get_parameter_default_value(&self, index: usize) -> Option<TokenRange> {
        self.main_parameter_section()?.get_parameter_default_value(index)
    }

    // ========================================================================
    // Properties
    // ========================================================================

    pub fn tokenizer(&self) -> &Arc<Tokenizer> {
        &self.tokenizer
    }

    pub fn sections(&self) -> &[PrototypeSection] {
        &self.sections
    }

    pub fn main_section(&self) -> &PrototypeSection {
        &self.sections[self.main_section_index]
    }

    fn main_parameter_section(&self) -> Option<&ParameterSection> {
        self.main_section().as_parameter_section()
    }

    pub fn main_section_index(&self) -> usize {
        self.main_section_index
    }

    /// # Panics
    ///
    /// If there's no section at `index`.
    pub fn set_main_section_index(&mut self, index: usize) {
        if index >= self.sections.len() {
            violated(ContractViolation::OutOfBounds);
        }
        self.main_section_index = index;
    }

    /// The main section's parameter style, or the configured one if it has no
    /// parameters.
    pub fn parameter_style(&self) -> ParameterStyle {
        self.main_parameter_section()
            .map_or(self.options.parameter_style, ParameterSection::parameter_style)
    }

    /// Overrides the parameter style of every section with parameters.
    pub fn set_parameter_style(&mut self, parameter_style: ParameterStyle) {
        self.options.parameter_style = parameter_style;
        for section in &mut self.sections {
            if let Some(section) = section.as_parameter_section_mut() {
                section.set_parameter_style(parameter_style);
            }
        }
    }

    pub fn supports_implied_types(&self) -> bool {
        self.options.supports_implied_types
    }

    pub fn options(&self) -> &PrototypeOptions {
        &self.options
    }
}
