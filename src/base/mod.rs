//! Foundation types for the docproto engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`] - Line/character positions for tokens
//! - [`ContractViolation`] - Programming errors raised by iterator and range APIs
//!
//! This module has NO dependencies on other docproto modules.

mod error;
mod position;

pub use error::{ContractViolation, violated};
pub use position::Position;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
