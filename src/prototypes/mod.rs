//! Reading prototypes that a language parser has tagged.
//!
//! This layer never recognizes language keywords. It reads the
//! [`PrototypeParsingType`](crate::tokenization::PrototypeParsingType) tags
//! already written to a tokenizer and answers questions about them:
//!
//! - [`ParsedPrototype`] - divides a prototype into sections and picks the main one
//! - [`Section`] - name, access level, types and default value of one range
//! - [`ParameterSection`] - a section split into its parameters, with implied types
//! - [`TypeBuilder`] - assembles types whose tokens aren't next to each other
//!
//! Accessors return a [`TokenRange`], or `None` when the prototype doesn't
//! have what was asked for.

mod access_level;
mod blocks;
mod options;
mod parameter_section;
mod parsed_prototype;
mod prototype_section;
mod section;
mod token_range;
mod type_builder;

#[cfg(test)]
mod tests;

pub use access_level::AccessLevel;
pub use blocks::{get_end_of_block, try_to_skip_block};
pub use options::{ParameterStyle, PrototypeOptions};
pub use parameter_section::ParameterSection;
pub use parsed_prototype::ParsedPrototype;
pub use prototype_section::PrototypeSection;
pub use section::Section;
pub use token_range::TokenRange;
pub use type_builder::TypeBuilder;
