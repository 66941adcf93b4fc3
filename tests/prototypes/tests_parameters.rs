#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use docproto::{ParameterStyle, ParsedPrototype, PrototypeOptions};

use crate::helpers::prototype_fixtures::{
    c_implied_parameters, csharp_method, pascal_implied_parameters,
};
use crate::helpers::range_assertions::{assert_not_found, assert_range_text};

// ============================================================================
// Implied types
// ============================================================================

#[test]
fn test_c_style_parameter_borrows_type_backwards() {
    let prototype = ParsedPrototype::new(c_implied_parameters(), PrototypeOptions::default());

    assert_eq!(prototype.parameter_style(), ParameterStyle::C);
    assert_range_text(prototype.get_base_parameter_type(1, true), "int");
    assert_not_found(prototype.get_base_parameter_type(1, false));
}

#[test]
fn test_pascal_style_parameter_borrows_type_forwards() {
    let prototype = ParsedPrototype::new(pascal_implied_parameters(), PrototypeOptions::default());

    assert_eq!(prototype.parameter_style(), ParameterStyle::Pascal);
    assert_range_text(prototype.get_base_parameter_type(0, true), "integer");
    assert_range_text(prototype.build_full_parameter_type(0, true), "integer");
}

#[test]
fn test_out_of_range_parameter_is_not_found() {
    let prototype = ParsedPrototype::new(c_implied_parameters(), PrototypeOptions::default());

    assert_not_found(prototype.get_parameter(2));
    assert_not_found(prototype.get_parameter_name(2));
    assert_not_found(prototype.get_base_parameter_type(2, true));
    assert_not_found(prototype.build_full_parameter_type(2, true));
    assert_not_found(prototype.get_parameter_default_value(2));
}

// ============================================================================
// Full method
// ============================================================================

#[test]
fn test_method_parameters() {
    let prototype = ParsedPrototype::new(csharp_method(), PrototypeOptions::default());

    assert_eq!(prototype.number_of_parameters(), 2);
    assert_range_text(prototype.get_parameter(0), "int count = 10,");
    assert_range_text(prototype.get_parameter(1), "bool sorted");
    assert_range_text(prototype.get_parameter_name(1), "sorted");
    assert_range_text(prototype.get_parameter_default_value(0), "10");
    assert_not_found(prototype.get_parameter_default_value(1));
    assert_range_text(prototype.build_full_parameter_type(0, true), "int");
}

#[test]
fn test_method_before_and_after_parameters() {
    let prototype = ParsedPrototype::new(csharp_method(), PrototypeOptions::default());

    assert_range_text(
        prototype.get_before_parameters(),
        "protected internal static List<string> Names (",
    );
    assert_range_text(prototype.get_after_parameters(), ")");
    assert_range_text(prototype.get_name(), "Names");
}
