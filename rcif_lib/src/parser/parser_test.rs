//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the grammar driver.

use super::*;

/// Sink which records every callback as one line, for easy comparison.
#[derive(Default)]
struct RecordingSink {
    events: Vec<String>,
}

impl DocumentSink for RecordingSink {
    fn produce_datablock(&mut self, name: &str) -> Result<()> {
        self.events.push(format!("datablock {name}"));
        Ok(())
    }

    fn produce_category(&mut self, name: &str) -> Result<()> {
        self.events.push(format!("category {name}"));
        Ok(())
    }

    fn produce_row(&mut self) -> Result<()> {
        self.events.push("row".to_owned());
        Ok(())
    }

    fn produce_item(&mut self, category: &str, item: &str, value: &str) -> Result<()> {
        self.events.push(format!("item _{category}.{item} = {value}"));
        Ok(())
    }
}

fn parse(input: &str) -> Result<Vec<String>> {
    let mut sink = RecordingSink::default();
    let mut parser = Parser::new(input.as_bytes(), &mut sink)?;
    parser.parse_file()?;
    Ok(sink.events)
}

#[test]
fn test_split_tag_name() {
    assert_eq!(split_tag_name("_atom_site.label_seq_id"), ("atom_site".to_owned(), "label_seq_id".to_owned()));
    assert_eq!(split_tag_name("_entry.id"), ("entry".to_owned(), "id".to_owned()));
    assert_eq!(split_tag_name("_cell_length"), ("cell".to_owned(), "length".to_owned()));
}

#[test]
fn test_tiny_loop() {
    let events = parse("data_x\nloop_\n_a.b _a.c\n1 2\n3 4\n#\n").unwrap();
    assert_eq!(events, vec![
        "datablock x",
        "category a",
        "row",
        "item _a.b = 1",
        "item _a.c = 2",
        "row",
        "item _a.b = 3",
        "item _a.c = 4",
    ]);
}

#[test]
fn test_consecutive_tags_coalesce_into_one_row() {
    let events = parse("data_x\n_cell.length_a 10.0\n_cell.length_b 20.0\n_entry.id foo\n").unwrap();
    assert_eq!(events, vec![
        "datablock x",
        "category cell",
        "row",
        "item _cell.length_a = 10.0",
        "item _cell.length_b = 20.0",
        "category entry",
        "row",
        "item _entry.id = foo",
    ]);
}

#[test]
fn test_global_is_consumed_but_ignored() {
    let events = parse("global_\n_a.b 1\ndata_x\n_c.d 2\n").unwrap();
    assert_eq!(events, vec![
        "datablock x",
        "category c",
        "row",
        "item _c.d = 2",
    ]);
}

#[test]
fn test_mismatched_loop_categories_fail() {
    let result = parse("data_x\nloop_\n_a.b _c.d\n1 2\n");
    assert!(matches!(result, Err(RCifError::ParseError(..))));
}

#[test]
fn test_save_frame_in_regular_file_fails() {
    let result = parse("data_x\nsave_foo\n_a.b 1\nsave_\n");
    assert!(matches!(result, Err(RCifError::ParseError(..))));
}

#[test]
fn test_not_a_cif_file() {
    let result = parse("HEADER    HYDROLASE\n");
    assert!(matches!(result, Err(RCifError::ParseError(..))));
}

#[test]
fn test_multiple_datablocks() {
    let events = parse("data_x\n_a.b 1\ndata_y\n_a.b 2\n").unwrap();
    assert_eq!(events[0], "datablock x");
    assert_eq!(events[4], "datablock y");
}
