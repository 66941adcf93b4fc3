#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use docproto::{LineBoundsMode, Tokenizer, TokenizerOptions};

#[test]
fn test_lines_of_a_documentation_comment() {
    let tokenizer = Tokenizer::with_options(
        "/// Adds two numbers.\n///\n/// Returns the sum.\n",
        TokenizerOptions::starting_at_line(10),
    );

    let mut lines = Vec::new();
    let mut line = tokenizer.first_line();
    while line.is_in_bounds() {
        lines.push((line.line_number(), line.string(LineBoundsMode::Everything).to_string()));
        line.next();
    }

    assert_eq!(
        lines,
        [
            (10, "/// Adds two numbers.\n".to_string()),
            (11, "///\n".to_string()),
            (12, "/// Returns the sum.\n".to_string()),
        ]
    );
}

#[test]
fn test_tokens_report_their_lines() {
    let tokenizer = Tokenizer::new("int\n  x");

    let mut iterator = tokenizer.first_token();
    assert_eq!(iterator.line_number(), 1);

    iterator.next_by(3);
    assert_eq!(iterator.string(), "x");
    assert_eq!(iterator.line_number(), 2);
    assert_eq!(iterator.char_number(), 3);
}
