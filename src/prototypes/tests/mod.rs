mod tests_blocks;
mod tests_section;

use std::sync::Arc;

use crate::tokenization::{PrototypeParsingType, Tokenizer};

/// Tokenizes the concatenated segments and tags each one the way a language
/// parser would. Segments must fall on token boundaries.
pub(super) fn tagged(segments: &[(&str, PrototypeParsingType)]) -> Arc<Tokenizer> {
    let text: String = segments.iter().map(|(text, _)| *text).collect();
    let tokenizer = Tokenizer::new(text);

    let mut iterator = tokenizer.first_token();
    for (text, tag) in segments {
        if *tag != PrototypeParsingType::Null {
            iterator.set_prototype_parsing_type_by_characters(*tag, text.len());
        }
        iterator.next_by_characters(text.len() as isize);
    }

    tokenizer
}
