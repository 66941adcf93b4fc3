#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use docproto::{ParsedPrototype, PrototypeOptions, PrototypeSection, Tokenizer};

use crate::helpers::prototype_fixtures::{csharp_method, getter_and_setter};
use crate::helpers::range_assertions::{assert_not_found, assert_range_text};

#[test]
fn test_getter_and_setter_get_separate_sections() {
    let prototype = ParsedPrototype::new(getter_and_setter(), PrototypeOptions::default());

    assert_eq!(prototype.sections().len(), 2);
    assert!(
        prototype
            .sections()
            .iter()
            .all(|section| matches!(section, PrototypeSection::Parameters(_)))
    );
    assert_eq!(prototype.main_section_index(), 1);
    assert_range_text(prototype.get_parameter_name(0), "value");
}

#[test]
fn test_where_clause_is_its_own_section() {
    let prototype = ParsedPrototype::new(csharp_method(), PrototypeOptions::default());

    assert_eq!(prototype.sections().len(), 2);
    assert_eq!(prototype.main_section_index(), 0);
    assert_eq!(prototype.sections()[1].bounds().text(), "where T : class");
    assert_not_found(prototype.sections()[1].get_name());
}

#[test]
fn test_choosing_another_main_section() {
    let mut prototype = ParsedPrototype::new(getter_and_setter(), PrototypeOptions::default());
    prototype.set_main_section_index(0);

    assert_eq!(prototype.number_of_parameters(), 0);
    assert_range_text(prototype.get_before_parameters(), "get(");
    assert_range_text(prototype.get_after_parameters(), ") set");
}

#[test]
fn test_untagged_prototype_never_fails() {
    let prototype =
        ParsedPrototype::new(Tokenizer::new("some text (with, commas)"), PrototypeOptions::default());

    assert_eq!(prototype.sections().len(), 1);
    assert_eq!(prototype.number_of_parameters(), 0);
    assert_range_text(prototype.get_before_parameters(), "some text (with, commas)");
    assert_not_found(prototype.get_after_parameters());
    assert_not_found(prototype.get_name());
    assert_not_found(prototype.get_parameter(0));
    assert_not_found(prototype.main_section().build_full_type());
}
