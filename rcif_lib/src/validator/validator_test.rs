//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the validator and the dictionary parser.

use std::cmp::Ordering;

use crate::model::model_test::TEST_DICT;

use super::*;

#[test]
fn test_dictionary_parsing() {
    let validator = Validator::from_bytes(TEST_DICT.as_bytes()).unwrap();

    assert_eq!(validator.dict_name(), "test_dict");
    assert_eq!(validator.dict_version(), "1.0");

    assert!(validator.validator_for_type("int").is_some());
    assert!(validator.validator_for_type("INT").is_some());
    assert!(validator.validator_for_type("bogus").is_none());

    let cv = validator.validator_for_category("test_a").unwrap();
    assert_eq!(cv.keys(), &vec!["id".to_owned()]);
    assert!(cv.mandatory_items().contains("id"));

    let iv = validator.validator_for_item("_test_a.method").unwrap();
    assert_eq!(iv.enums().len(), 2);
    assert!(iv.enums().contains("X-RAY DIFFRACTION"));
}

#[test]
fn test_parent_child_links() {
    let validator = Validator::from_bytes(TEST_DICT.as_bytes()).unwrap();

    let child = validator.validator_for_item("_test_b.a_id").unwrap();
    let parent_ref = child.parent().as_ref().unwrap();
    assert_eq!(parent_ref.category, "test_a");
    assert_eq!(parent_ref.item, "id");

    // a_id is the single key of test_b, so the link cascades.
    let parent = validator.validator_for_item("_test_a.id").unwrap();
    assert_eq!(parent.foreign_keys().len(), 1);
    assert_eq!(parent.foreign_keys()[0].category, "test_b");
}

#[test]
fn test_value_validation() {
    let validator = Validator::from_bytes(TEST_DICT.as_bytes()).unwrap();

    validator.validate_value("test_a", "id", "42").unwrap();
    validator.validate_value("test_a", "id", "-3").unwrap();
    assert!(validator.validate_value("test_a", "id", "4.2").is_err());
    assert!(validator.validate_value("test_a", "id", "abc").is_err());

    // Empty, unknown and inapplicable always pass.
    validator.validate_value("test_a", "id", "").unwrap();
    validator.validate_value("test_a", "id", "?").unwrap();
    validator.validate_value("test_a", "id", ".").unwrap();

    validator.validate_value("test_a", "method", "X-RAY DIFFRACTION").unwrap();
    assert!(validator.validate_value("test_a", "method", "X-RAY").is_err());
}

#[test]
fn test_numeric_compare() {
    assert_eq!(compare_numeric_values("1.0", "1"), Ordering::Equal);
    assert_eq!(compare_numeric_values("-1e2", "-100"), Ordering::Equal);
    assert_eq!(compare_numeric_values("1", "2"), Ordering::Less);
    assert_eq!(compare_numeric_values("10", "9"), Ordering::Greater);

    // Non-parsable values compare greater than parsable ones.
    assert_eq!(compare_numeric_values("x", "1"), Ordering::Greater);
    assert_eq!(compare_numeric_values("1", "x"), Ordering::Less);
}

#[test]
fn test_char_compare() {
    assert_eq!(compare_char_values("A  B", "A B"), Ordering::Equal);
    assert_eq!(compare_char_values("A\tB", "A B"), Ordering::Equal);
    assert_eq!(compare_char_values("abc", "ABC"), Ordering::Equal);
    assert_eq!(compare_char_values("a", "b"), Ordering::Less);
}

#[test]
fn test_empty_compares_less() {
    let tv = TypeValidator::new("code", PrimitiveType::Char, "[a-z]+").unwrap();
    assert_eq!(tv.compare("", "a"), Ordering::Less);
    assert_eq!(tv.compare("a", ""), Ordering::Greater);
    assert_eq!(tv.compare("", ""), Ordering::Equal);
}

#[test]
fn test_numeric_prefix_parsing() {
    assert_eq!(parse_numeric_prefix("1.5"), Some(1.5));
    assert_eq!(parse_numeric_prefix("-1e2"), Some(-100.0));
    assert_eq!(parse_numeric_prefix("1.23(4)"), Some(1.23));
    assert_eq!(parse_numeric_prefix(".5"), Some(0.5));
    assert_eq!(parse_numeric_prefix("abc"), None);
    assert_eq!(parse_numeric_prefix(""), None);
}

#[test]
fn test_strict_vs_lenient_reporting() {
    let mut validator = Validator::from_bytes(TEST_DICT.as_bytes()).unwrap();

    validator.report(crate::error::RCifError::ValidationError("lenient".to_owned())).unwrap();

    validator.set_strict(true);
    assert!(validator.report(crate::error::RCifError::ValidationError("strict".to_owned())).is_err());
}
