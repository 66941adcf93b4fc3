//! Assertions over accessor results.

use docproto::TokenRange;

/// Assert an accessor found something and that it reads as `expected`.
pub fn assert_range_text(actual: Option<TokenRange>, expected: &str) {
    match actual {
        Some(range) => assert_eq!(range.text(), expected, "unexpected text in {range:?}"),
        None => panic!("expected '{expected}' but nothing was found"),
    }
}

/// Assert an accessor reported that nothing was found.
pub fn assert_not_found(actual: Option<TokenRange>) {
    if let Some(range) = actual {
        panic!("expected nothing but found '{}'", range.text());
    }
}
