//! # docproto
//!
//! Language independent core for reading source code prototypes: a tokenizer
//! whose tokens can be classified by language parsers, and a model of the
//! tagged prototypes they produce.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! prototypes    → ParsedPrototype, sections, parameters, type building
//!   ↓
//! tokenization  → Logos scanner, Tokenizer, token/line iterators, overlays
//!   ↓
//! base          → Primitives (Position, TextRange, ContractViolation)
//! ```
//!
//! ## Example
//!
//! ```
//! use docproto::{ParsedPrototype, PrototypeOptions, PrototypeParsingType, Tokenizer};
//!
//! let tokenizer = Tokenizer::new("(int x, y)");
//! // A language parser would normally write these tags
//! tokenizer.set_prototype_parsing_type_at(0, PrototypeParsingType::StartOfParams);
//! tokenizer.set_prototype_parsing_type_at(1, PrototypeParsingType::Type);
//! tokenizer.set_prototype_parsing_type_at(3, PrototypeParsingType::Name);
//! tokenizer.set_prototype_parsing_type_at(4, PrototypeParsingType::ParamSeparator);
//! tokenizer.set_prototype_parsing_type_at(6, PrototypeParsingType::Name);
//! tokenizer.set_prototype_parsing_type_at(7, PrototypeParsingType::EndOfParams);
//!
//! let prototype = ParsedPrototype::new(tokenizer, PrototypeOptions::default());
//! assert_eq!(prototype.number_of_parameters(), 2);
//! assert_eq!(prototype.get_base_parameter_type(1, true).unwrap().text(), "int");
//! ```

// ============================================================================
// MODULES (dependency order: base → tokenization → prototypes)
// ============================================================================

/// Foundation types: Position, TextRange, ContractViolation
pub mod base;

/// Tokenization: Logos scanner, Tokenizer, iterators, classification overlays
pub mod tokenization;

/// Prototypes: sections, parameters, implied types, type building
pub mod prototypes;

// Re-export foundation types
pub use base::{ContractViolation, Position, TextRange, TextSize};

// Re-export the main entry points
pub use prototypes::{
    AccessLevel, ParameterSection, ParameterStyle, ParsedPrototype, PrototypeOptions,
    PrototypeSection, Section, TokenRange, TypeBuilder,
};
pub use tokenization::{
    CommentParsingType, FundamentalType, LineBoundsMode, LineIterator, PrototypeParsingType,
    SimpleTokenIterator, SyntaxHighlightingType, TokenIterator, Tokenizer, TokenizerOptions,
};
