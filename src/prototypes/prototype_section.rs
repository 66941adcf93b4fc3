use super::access_level::AccessLevel;
use super::parameter_section::ParameterSection;
use super::section::Section;
use super::token_range::TokenRange;
use crate::tokenization::TokenIterator;

/// One section of a [`ParsedPrototype`](super::ParsedPrototype).
#[derive(Debug, Clone)]
pub enum PrototypeSection {
    Plain(Section),
    Parameters(ParameterSection),
}

impl PrototypeSection {
    pub fn start(&self) -> &TokenIterator {
        match self {
            Self::Plain(section) => section.start(),
            Self::Parameters(section) => section.start(),
        }
    }

    pub fn end(&self) -> &TokenIterator {
        match self {
            Self::Plain(section) => section.end(),
            Self::Parameters(section) => section.end(),
        }
    }

    pub fn bounds(&self) -> TokenRange {
        match self {
            Self::Plain(section) => section.bounds(),
            Self::Parameters(section) => section.bounds(),
        }
    }

    pub fn get_name(&self) -> Option<TokenRange> {
        match self {
            Self::Plain(section) => section.get_name(),
            Self::Parameters(section) => section.get_name(),
        }
    }

    pub fn get_access_level(&self) -> AccessLevel {
        match self {
            Self::Plain(section) => section.get_access_level(),
            Self::Parameters(section) => section.get_access_level(),
        }
    }

    pub fn get_base_type(&self) -> Option<TokenRange> {
        match self {
            Self::Plain(section) => section.get_base_type(),
            Self::Parameters(section) => section.get_base_type(),
        }
    }

    pub fn build_full_type(&self) -> Option<TokenRange> {
        match self {
            Self::Plain(section) => section.build_full_type(),
            Self::Parameters(section) => section.build_full_type(),
        }
    }

    pub fn get_default_value(&self) -> Option<TokenRange> {
        match self {
            Self::Plain(section) => section.get_default_value(),
            Self::Parameters(section) => section.get_default_value(),
        }
    }

    pub fn has_type(&self) -> bool {
        match self {
            Self::Plain(section) => section.has_type(),
            Self::Parameters(section) => section.has_type(),
        }
    }

    pub fn as_parameter_section(&self) -> Option<&ParameterSection> {
        match self {
            Self::Parameters(section) => Some(section),
            Self::Plain(_) => None,
        }
    }

    pub fn as_parameter_section_mut(&mut self) -> Option<&mut ParameterSection> {
        match self {
            Self::Parameters(section) => Some(section),
            Self::Plain(_) => None,
        }
    }
}
