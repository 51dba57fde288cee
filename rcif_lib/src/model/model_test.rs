//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the in-memory data model.

use std::sync::Arc;

use crate::validator::Validator;

use super::condition::key;
use super::*;

/// A small dictionary with an indexed parent category (`test_a`, key `id`) and
/// a child category (`test_b`) referencing it through `a_id`.
pub(crate) const TEST_DICT: &str = "\
data_test_dict
loop_
_item_type_list.code
_item_type_list.primitive_code
_item_type_list.construct
code  char  '[A-Za-z0-9_.;:-]+'
int   numb  '[+-]?[0-9]+'
float numb  '[+-]?(([0-9]+)|([0-9]*[.][0-9]+))([eE][+-]?[0-9]+)?'
text  char  '(?s).*'

save_test_a
_category.id test_a
loop_
_category_key.name '_test_a.id'
save_

save__test_a.id
_item.name '_test_a.id'
_item.category_id test_a
_item.mandatory_code yes
_item_type.code int
save_

save__test_a.name
_item.name '_test_a.name'
_item.category_id test_a
_item.mandatory_code no
_item_type.code code
save_

save__test_a.method
_item.name '_test_a.method'
_item.category_id test_a
_item.mandatory_code no
_item_type.code text
loop_
_item_enumeration.value
'X-RAY DIFFRACTION'
'NEUTRON DIFFRACTION'
save_

save_test_b
_category.id test_b
loop_
_category_key.name '_test_b.a_id'
save_

save__test_b.a_id
_item.name '_test_b.a_id'
_item.category_id test_b
_item.mandatory_code yes
_item_type.code int
save_

save__test_b.note
_item.name '_test_b.note'
_item.category_id test_b
_item.mandatory_code no
_item_type.code text
save_

loop_
_pdbx_item_linked_group_list.child_category_id
_pdbx_item_linked_group_list.child_name
_pdbx_item_linked_group_list.parent_name
_pdbx_item_linked_group_list.parent_category_id
test_b '_test_b.a_id' '_test_a.id' test_a

_dictionary.title test_dict
_dictionary.version 1.0
";

pub(crate) fn test_validator() -> Arc<Validator> {
    Arc::new(Validator::from_bytes(TEST_DICT.as_bytes()).unwrap())
}

#[test]
fn test_tiny_loop() {
    let file = File::from_bytes(b"data_x\nloop_\n_a.b _a.c\n1 2\n3 4\n#\n").unwrap();

    let block = file.datablock("x").unwrap();
    let cat = block.get("a").unwrap();
    assert_eq!(cat.len(), 2);

    let rows: Vec<_> = cat.rows().collect();
    assert_eq!(cat.value(rows[0], "b"), "1");
    assert_eq!(cat.value(rows[0], "c"), "2");
    assert_eq!(cat.value(rows[1], "b"), "3");
    assert_eq!(cat.value(rows[1], "c"), "4");
}

#[test]
fn test_duplicate_datablock_names_fail() {
    let mut file = File::new();
    file.append(Datablock::new("x")).unwrap();
    assert!(matches!(file.append(Datablock::new("X")), Err(RCifError::DatablockAlreadyDefined(_))));
}

#[test]
fn test_missing_and_inapplicable_values() {
    let file = File::from_bytes(b"data_x\nloop_\n_a.b _a.c\n1 .\n2 ?\n").unwrap();
    let cat = file.datablock("x").unwrap().get("a").unwrap();
    let rows: Vec<_> = cat.rows().collect();

    // Inapplicable reads as empty, but the raw storage keeps the dot.
    assert_eq!(cat.value(rows[0], "c"), "");
    assert_eq!(cat.raw_value(rows[0], "c"), Some("."));

    // Unknown is simply not stored.
    assert_eq!(cat.value(rows[1], "c"), "");
    assert_eq!(cat.raw_value(rows[1], "c"), None);
}

#[test]
fn test_emplace_duplicate_key_is_rejected() {
    let mut cat = Category::new("test_a", Some(test_validator())).unwrap();

    let (first, inserted) = cat.emplace(&[("id", "1"), ("name", "x")]).unwrap();
    assert!(inserted);

    // Same key under the numeric comparator, so no new row.
    let (existing, inserted) = cat.emplace(&[("id", "1.0"), ("name", "y")]).unwrap();
    assert!(!inserted);
    assert_eq!(existing, first);
    assert_eq!(cat.len(), 1);
    assert_eq!(cat.value(first, "name"), "x");
}

#[test]
fn test_key_update_reindexes() {
    let mut cat = Category::new("test_a", Some(test_validator())).unwrap();

    let (row, _) = cat.emplace(&[("id", "1")]).unwrap();
    cat.set_value(row, "id", "2").unwrap();

    // The old key is free again, the new one is taken.
    let (_, inserted) = cat.emplace(&[("id", "1")]).unwrap();
    assert!(inserted);
    let (existing, inserted) = cat.emplace(&[("id", "2")]).unwrap();
    assert!(!inserted);
    assert_eq!(existing, row);
}

#[test]
fn test_cascade_erase() {
    let mut block = Datablock::new("x");
    block.set_validator(Some(test_validator()));

    {
        let cat = block.category_mut("test_a").unwrap();
        cat.emplace(&[("id", "1")]).unwrap();
        cat.emplace(&[("id", "2")]).unwrap();
    }
    {
        let cat = block.category_mut("test_b").unwrap();
        cat.emplace(&[("a_id", "1"), ("note", "one")]).unwrap();
        cat.emplace(&[("a_id", "2"), ("note", "two")]).unwrap();
    }

    let erased = block.erase("test_a", key("id").is("1"));
    assert_eq!(erased, 2);

    // No row in the child category still holds the erased key value.
    let child = block.get("test_b").unwrap();
    assert_eq!(child.len(), 1);
    let remaining = child.rows().next().unwrap();
    assert_eq!(child.value(remaining, "a_id"), "2");
}

#[test]
fn test_reorder_by_index() {
    let mut cat = Category::new("test_a", Some(test_validator())).unwrap();
    cat.emplace(&[("id", "10")]).unwrap();
    cat.emplace(&[("id", "2")]).unwrap();
    cat.emplace(&[("id", "1")]).unwrap();

    // Insertion order until told otherwise.
    let ids: Vec<_> = cat.rows().map(|r| cat.value(r, "id").to_owned()).collect();
    assert_eq!(ids, ["10", "2", "1"]);

    cat.reorder_by_index();

    // Numeric key order, not lexical: 2 before 10.
    let ids: Vec<_> = cat.rows().map(|r| cat.value(r, "id").to_owned()).collect();
    assert_eq!(ids, ["1", "2", "10"]);
}

#[test]
fn test_order_by_is_stable() {
    let mut cat = Category::new("plain", None).unwrap();
    cat.emplace(&[("a", "2"), ("b", "x")]).unwrap();
    cat.emplace(&[("a", "1"), ("b", "y")]).unwrap();
    cat.emplace(&[("a", "1"), ("b", "z")]).unwrap();

    let rows = cat.order_by(cat.rows().collect(), &["a"]);
    let values: Vec<_> = rows.iter().map(|r| (cat.value(*r, "a"), cat.value(*r, "b"))).collect();
    assert_eq!(values, [("1", "y"), ("1", "z"), ("2", "x")]);
}

#[test]
fn test_first_item() {
    let file = File::from_bytes(b"data_x\n_entry.id 1ABC\n").unwrap();
    assert_eq!(file.datablock("x").unwrap().first_item("_entry.id"), "1ABC");
    assert_eq!(file.datablock("x").unwrap().first_item("_entry.missing"), "");
}

#[test]
fn test_validation_accepts_good_values() {
    let mut file = File::from_bytes(b"data_x\nloop_\n_test_a.id _test_a.name\n1 foo\n2 bar\n").unwrap();
    let mut validator = Validator::from_bytes(TEST_DICT.as_bytes()).unwrap();
    validator.set_strict(true);
    file.set_validator(Some(Arc::new(validator)));

    file.validate().unwrap();
}

#[test]
fn test_validation_rejects_enum_violation() {
    let mut file = File::from_bytes(b"data_x\n_test_a.id 1\n_test_a.method X-RAY\n").unwrap();
    let mut validator = Validator::from_bytes(TEST_DICT.as_bytes()).unwrap();
    validator.set_strict(true);
    file.set_validator(Some(Arc::new(validator)));

    match file.validate() {
        Err(RCifError::ValueNotEnumerated(value, item)) => {
            assert_eq!(value, "X-RAY");
            assert_eq!(item, "_test_a.method");
        }
        other => panic!("expected an enumeration error, got {other:?}"),
    }
}

#[test]
fn test_validation_rejects_type_violation() {
    let mut file = File::from_bytes(b"data_x\n_test_a.id abc\n").unwrap();
    let mut validator = Validator::from_bytes(TEST_DICT.as_bytes()).unwrap();
    validator.set_strict(true);
    file.set_validator(Some(Arc::new(validator)));

    assert!(matches!(file.validate(), Err(RCifError::ValueTypeMismatch(..))));
}

#[test]
fn test_lenient_validation_logs_and_continues() {
    let mut file = File::from_bytes(b"data_x\n_test_a.id abc\n").unwrap();
    let validator = Validator::from_bytes(TEST_DICT.as_bytes()).unwrap();
    file.set_validator(Some(Arc::new(validator)));

    file.validate().unwrap();
}
