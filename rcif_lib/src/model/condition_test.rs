//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the condition layer.

use super::condition::{any, key};
use super::*;

fn atoms() -> Category {
    let mut cat = Category::new("atom_site", None).unwrap();
    cat.emplace(&[("id", "1"), ("label_asym_id", "A"), ("label_seq_id", "1"), ("type_symbol", "N")]).unwrap();
    cat.emplace(&[("id", "2"), ("label_asym_id", "A"), ("label_seq_id", "2"), ("type_symbol", "C")]).unwrap();
    cat.emplace(&[("id", "3"), ("label_asym_id", "B"), ("label_seq_id", "1"), ("type_symbol", "O")]).unwrap();
    cat
}

#[test]
fn test_key_is() {
    let cat = atoms();
    let rows = cat.find(&key("label_asym_id").is("A"));
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_key_is_numeric() {
    let cat = atoms();

    // Without a dictionary the comparison is still numeric when both sides parse.
    let rows = cat.find(&key("id").is("02"));
    assert_eq!(rows.len(), 1);
    assert_eq!(cat.value(rows[0], "type_symbol"), "C");
}

#[test]
fn test_key_is_not_and_compare() {
    let cat = atoms();
    assert_eq!(cat.find(&key("label_asym_id").is_not("A")).len(), 1);
    assert_eq!(cat.find(&key("id").gt("1")).len(), 2);
    assert_eq!(cat.find(&key("id").le("2")).len(), 2);
}

#[test]
fn test_key_matches() {
    let cat = atoms();
    let rows = cat.find(&key("type_symbol").matches(regex::Regex::new("^[NO]$").unwrap()));
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_any() {
    let cat = atoms();
    assert_eq!(cat.find(&any().is("B")).len(), 1);
    assert_eq!(cat.find(&any().matches(regex::Regex::new("^[AB]$").unwrap())).len(), 3);
}

#[test]
fn test_and_or() {
    let cat = atoms();

    let rows = cat.find(&(key("label_asym_id").is("A") & key("label_seq_id").is("2")));
    assert_eq!(rows.len(), 1);
    assert_eq!(cat.value(rows[0], "id"), "2");

    let rows = cat.find(&(key("label_asym_id").is("B") | key("label_seq_id").is("2")));
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_find_preserves_category_order() {
    let cat = atoms();
    let rows = cat.find(&key("label_seq_id").is("1"));
    let ids: Vec<_> = rows.iter().map(|r| cat.value(*r, "id")).collect();
    assert_eq!(ids, ["1", "3"]);
}

#[test]
fn test_display() {
    let cond = key("a").is("1") & key("b").gt("2");
    assert_eq!(cond.to_string(), "(a == '1') and (b > '2')");
}
