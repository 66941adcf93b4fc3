//! Property-based tests for token boundaries.
//!
//! These make sure any text, including long runs and multi-byte characters,
//! splits into tokens that cover it exactly.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use proptest::prelude::*;

use docproto::tokenization::MAX_TOKEN_LENGTH;
use docproto::{SimpleTokenIterator, Tokenizer};

fn source_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~\t\r\n]{0,300}",
        "\\PC{0,120}",
        ("[a-z ]", 200usize..700).prop_map(|(run, count)| run.repeat(count)),
    ]
}

proptest! {
    #[test]
    fn prop_tokens_reproduce_text(text in source_text()) {
        let tokenizer = Tokenizer::new(text.clone());

        let mut rebuilt = String::new();
        let mut total_length = 0;
        let mut iterator = tokenizer.first_token();
        while iterator.is_in_bounds() {
            prop_assert!(iterator.raw_text_length() > 0);
            prop_assert!(iterator.raw_text_length() <= MAX_TOKEN_LENGTH);
            total_length += iterator.raw_text_length();
            iterator.append_token_to(&mut rebuilt);
            iterator.next();
        }

        prop_assert_eq!(total_length, text.len());
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn prop_next_then_previous_returns(text in source_text()) {
        let tokenizer = Tokenizer::new(text);

        let mut iterator = tokenizer.first_token();
        while iterator.is_in_bounds() {
            let before = iterator.clone();
            iterator.next();
            iterator.previous();
            prop_assert_eq!(&iterator, &before);
            iterator.next();
        }
    }

    #[test]
    fn prop_tokens_in_characters_lands_on_boundaries(text in source_text()) {
        let tokenizer = Tokenizer::new(text);
        let start = tokenizer.first_token();

        let mut boundary = start.clone();
        while boundary.is_in_bounds() {
            boundary.next();
            let characters = boundary.raw_text_index();

            let tokens = start.tokens_in_characters(characters).unwrap();
            let mut moved = start.clone();
            moved.next_by(tokens as isize);
            prop_assert_eq!(moved.raw_text_index(), characters);
        }
    }

    #[test]
    fn prop_simple_iterator_agrees(text in source_text()) {
        let tokenizer = Tokenizer::new(text.clone());

        let mut iterator = tokenizer.first_token();
        let mut simple = SimpleTokenIterator::new(&text);
        while iterator.is_in_bounds() {
            prop_assert!(simple.is_in_bounds());
            prop_assert_eq!(simple.raw_text_index(), iterator.raw_text_index());
            prop_assert_eq!(simple.raw_text_length(), iterator.raw_text_length());
            prop_assert_eq!(simple.fundamental_type(), iterator.fundamental_type());
            iterator.next();
            simple.next();
        }
        prop_assert!(!simple.is_in_bounds());
    }
}

#[test]
fn test_characters_inside_a_token_are_not_a_boundary() {
    let tokenizer = Tokenizer::new("unsigned int");
    assert_eq!(tokenizer.first_token().tokens_in_characters(3), None);
    assert_eq!(tokenizer.first_token().tokens_in_characters(9), Some(2));
}
