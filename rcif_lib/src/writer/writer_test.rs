//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the mmCIF writer.

use crate::lexer::MAX_LINE_LENGTH;
use crate::model::File;

fn round_trip(input: &str) -> String {
    let file = File::from_bytes(input.as_bytes()).unwrap();
    file.to_string_lossy()
}

#[test]
fn test_single_row_layout() {
    let output = round_trip("data_x\n_cell.length_a 10.0\n_cell.length_b 20.0\n");
    assert!(output.starts_with("data_x\n"));
    assert!(output.contains("_cell.length_a"));
    assert!(output.contains("10.0"));

    // Single-row categories use no loop_.
    assert!(!output.contains("loop_"));
}

#[test]
fn test_loop_layout() {
    let output = round_trip("data_x\nloop_\n_a.b _a.c\n1 2\n3 4\n");
    assert!(output.contains("loop_"));
    assert!(output.contains("_a.b"));
    assert!(output.contains("_a.c"));
}

#[test]
fn test_round_trip_is_stable() {
    let input = "data_x\nloop_\n_a.b _a.c\n1 'two words'\n3 4\n_entry.id 1ABC\n";

    let once = round_trip(input);
    let twice = round_trip(&once);

    // The second pass reproduces the first byte for byte.
    assert_eq!(once, twice);
}

#[test]
fn test_values_round_trip() {
    let input = "data_x\nloop_\n_a.b _a.c\n1 'two words'\nhello \"it's\"\n? .\n";
    let output = round_trip(input);

    let reparsed = File::from_bytes(output.as_bytes()).unwrap();
    let block = reparsed.datablock("x").unwrap();
    let cat = block.get("a").unwrap();
    let rows: Vec<_> = cat.rows().collect();

    assert_eq!(cat.value(rows[0], "b"), "1");
    assert_eq!(cat.value(rows[0], "c"), "two words");
    assert_eq!(cat.value(rows[1], "b"), "hello");
    assert_eq!(cat.value(rows[1], "c"), "it's");
    assert_eq!(cat.raw_value(rows[2], "b"), None);
    assert_eq!(cat.raw_value(rows[2], "c"), Some("."));
}

#[test]
fn test_text_field_round_trip() {
    let input = "data_x\n_a.b\n;line one\n\\;line two\n;\n";
    let output = round_trip(input);

    assert!(output.contains(";line one\n\\;line two\n;"));

    let reparsed = File::from_bytes(output.as_bytes()).unwrap();
    let cat = reparsed.datablock("x").unwrap().get("a").unwrap();
    let row = cat.rows().next().unwrap();
    assert_eq!(cat.value(row, "b"), "line one\n\\;line two");
}

#[test]
fn test_multiline_value_becomes_text_field() {
    let input = "data_x\n_a.b\n;first\nsecond\n;\n";
    let output = round_trip(input);
    assert!(output.contains(";first\nsecond\n;"));
}

#[test]
fn test_embedded_newline_semicolon_is_escaped() {
    let mut file = File::new();
    let mut block = crate::model::Datablock::new("x");
    let cat = block.category_mut("a").unwrap();
    cat.emplace(&[("b", "first\n;second")]).unwrap();
    file.append(block).unwrap();

    let output = file.to_string_lossy();
    assert!(output.contains("first\n\\;second"));

    // And it reads back with the escape intact.
    let reparsed = File::from_bytes(output.as_bytes()).unwrap();
    let cat = reparsed.datablock("x").unwrap().get("a").unwrap();
    let row = cat.rows().next().unwrap();
    assert_eq!(cat.value(row, "b"), "first\n\\;second");
}

#[test]
fn test_line_width_budget() {
    let long_value = "x".repeat(100);
    let input = format!(
        "data_x\nloop_\n_a.b _a.c _a.d\n{long_value} {long_value} {long_value}\nsecond row goes-here\n"
    );

    let output = round_trip(&input);
    for line in output.lines() {
        if !line.starts_with(';') {
            assert!(line.len() <= MAX_LINE_LENGTH, "line too long: {line}");
        }
    }
}

#[test]
fn test_long_value_becomes_text_field() {
    let long_value = "y".repeat(200);
    let input = format!("data_x\n_a.b\n;{long_value}\n;\n_a.c 1\n");
    let output = round_trip(&input);
    assert!(output.contains(&format!(";{long_value}\n;")));
}

#[test]
fn test_missing_values_written_as_question_mark() {
    let input = "data_x\nloop_\n_a.b _a.c\n1 ?\n2 3\n";
    let output = round_trip(input);

    let reparsed = File::from_bytes(output.as_bytes()).unwrap();
    let cat = reparsed.datablock("x").unwrap().get("a").unwrap();
    let rows: Vec<_> = cat.rows().collect();
    assert_eq!(cat.raw_value(rows[0], "c"), None);
}

#[test]
fn test_reserved_looking_value_is_quoted() {
    let mut file = File::new();
    let mut block = crate::model::Datablock::new("x");
    let cat = block.category_mut("a").unwrap();
    cat.emplace(&[("b", "data_oops"), ("c", "loop_")]).unwrap();
    file.append(block).unwrap();

    let output = file.to_string_lossy();
    let reparsed = File::from_bytes(output.as_bytes()).unwrap();
    let cat = reparsed.datablock("x").unwrap().get("a").unwrap();
    let row = cat.rows().next().unwrap();
    assert_eq!(cat.value(row, "b"), "data_oops");
    assert_eq!(cat.value(row, "c"), "loop_");
}

#[test]
fn test_audit_conform_is_synthesized() {
    let mut file = File::from_bytes(b"data_x\n_entry.id 1ABC\n").unwrap();
    let validator = crate::validator::Validator::from_bytes(crate::model::model_test::TEST_DICT.as_bytes()).unwrap();
    file.set_validator(Some(std::sync::Arc::new(validator)));

    let output = file.to_string_lossy();
    assert!(output.contains("_audit_conform.dict_name"));
    assert!(output.contains("test_dict"));
    assert!(output.contains("_audit_conform.dict_version"));
}

#[test]
fn test_tag_order_override() {
    let mut file = File::from_bytes(b"data_x\n_cell.length_a 10\n_entry.id 1ABC\n").unwrap();

    let order = vec!["_entry.id".to_owned(), "_cell.length_a".to_owned()];
    let mut out = vec![];
    file.write_with_order(&mut out, &order).unwrap();
    let output = String::from_utf8_lossy(&out).into_owned();

    let entry_pos = output.find("_entry.id").unwrap();
    let cell_pos = output.find("_cell.length_a").unwrap();
    assert!(entry_pos < cell_pos);
}
