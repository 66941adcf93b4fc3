
use std::sync::Arc;

use super::Tokenizer;

/// Walks a tokenizer from start to end and collects every token's text.
pub(super) fn token_strings(tokenizer: &Arc<Tokenizer>) -> Vec<String> {
    let mut strings = Vec::new();
    let mut iterator = tokenizer.first_token();
    while iterator.is_in_bounds() {
        strings.push(iterator.string().to_string());
        iterator.next();
    }
    strings
}
