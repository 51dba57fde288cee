//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the PDB pre-parser and its helpers.

use super::*;

#[test]
fn test_record_columns() {
    let record = PdbRecord {
        line_nr: 1,
        name: "ATOM  ".to_owned(),
        value: "      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N".to_owned(),
    };

    assert_eq!(record.vi(7, 11), 1);
    assert_eq!(record.vs(13, 16), "N");
    assert_eq!(record.vc(17), ' ');
    assert_eq!(record.vs(18, 20), "ALA");
    assert_eq!(record.vc(22), 'A');
    assert_eq!(record.vi(23, 26), 1);
    assert_eq!(record.vf(31, 38), "11.104");
    assert_eq!(record.vf(39, 46), "6.134");
    assert_eq!(record.vf(47, 54), "-6.504");
    assert_eq!(record.vs(77, 78), "N");

    // Reads past the end of the value are blanks, not errors.
    assert_eq!(record.vc(80), ' ');
    assert_eq!(record.vs(79, 80), "");
}

#[test]
fn test_title_continuation() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
TITLE     THE FIRST PART OF A LONG
TITLE    2 TITLE SPREAD OVER LINES
END
";

    let parsed = pre_parse(input).unwrap();
    let title = parsed.records.iter().find(|r| r.is("TITLE ")).unwrap();
    assert_eq!(title.vs_from(11), "THE FIRST PART OF A LONGTITLE SPREAD OVER LINES");
}

#[test]
fn test_unsupported_records_are_dropped() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
FOOBAR some nonsense
END
";

    let parsed = pre_parse(input).unwrap();
    assert!(parsed.records.iter().all(|r| !r.name.starts_with("FOOBAR")));
}

#[test]
fn test_remark_200_key_value_map() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
REMARK 200  TEMPERATURE           (KELVIN) : 100
REMARK 200  DETECTOR TYPE                  : CCD
REMARK 200  RADIATION SOURCE               : NULL
REMARK 200  MONOCHROMATOR                  : NONE
END
";

    let parsed = pre_parse(input).unwrap();
    assert_eq!(parsed.remark200.get("TEMPERATURE (KELVIN)").map(String::as_str), Some("100"));
    assert_eq!(parsed.remark200.get("DETECTOR TYPE").map(String::as_str), Some("CCD"));

    // NULL is dropped, NONE reads as inapplicable.
    assert_eq!(parsed.remark200.get("RADIATION SOURCE"), None);
    assert_eq!(parsed.remark200.get("MONOCHROMATOR").map(String::as_str), Some("."));
}

#[test]
fn test_link_records_are_parsed_eagerly() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
LINK         ND2 ASN A   1                 C1  NAG A 201     1555   1555  1.45
END
";

    let parsed = pre_parse(input).unwrap();
    assert_eq!(parsed.links.len(), 1);

    let link = &parsed.links[0];
    assert_eq!(link.a.name, "ND2");
    assert_eq!(link.a.res_name, "ASN");
    assert_eq!(link.a.chain_id, 'A');
    assert_eq!(link.a.res_seq, 1);
    assert_eq!(link.b.name, "C1");
    assert_eq!(link.b.res_name, "NAG");
    assert_eq!(link.b.res_seq, 201);
    assert_eq!(link.sym_op_a, "1555");
    assert!((link.distance.unwrap() - 1.45).abs() < 1e-6);
}

#[test]
fn test_date_conversion() {
    assert_eq!(pdb2cif_date("22-JAN-98").unwrap(), "1998-01-22");
    assert_eq!(pdb2cif_date("13-JUL-11").unwrap(), "2011-07-13");
    assert_eq!(pdb2cif_date("JUL-11").unwrap(), "2011-07");
    assert!(pdb2cif_date("32-JAN-98").is_err());
    assert!(pdb2cif_date("nonsense").is_err());
}

#[test]
fn test_author_conversion() {
    assert_eq!(pdb2cif_auth("J.DOE"), "Doe, J.");
    assert_eq!(pdb2cif_auth("A.B.SMITH"), "Smith, A.B.");
}

#[test]
fn test_symmetry_conversion() {
    assert_eq!(pdb2cif_symmetry("1555").unwrap(), "1_555");
    assert_eq!(pdb2cif_symmetry("12555").unwrap(), "12_555");
    assert_eq!(pdb2cif_symmetry("").unwrap(), "");
    assert!(pdb2cif_symmetry("bogus").is_err());
}

#[test]
fn test_charge_conversion() {
    assert_eq!(pdb2cif_charge("2+"), "2");
    assert_eq!(pdb2cif_charge("1-"), "-1");
    assert_eq!(pdb2cif_charge(""), "");
}

#[test]
fn test_asym_id_sequence() {
    assert_eq!(cif_id_for_number(0), "A");
    assert_eq!(cif_id_for_number(1), "B");
    assert_eq!(cif_id_for_number(25), "Z");
    assert_eq!(cif_id_for_number(26), "AA");
    assert_eq!(cif_id_for_number(27), "AB");
    assert_eq!(cif_id_for_number(52), "BA");
}

#[test]
fn test_format_sniffing() {
    let cif = b"data_test\n_entry.id test\n" as &[u8];
    let file = read_structure_file(cif).unwrap();
    assert_eq!(file.datablock("test").unwrap().first_item("_entry.id"), "test");
}

#[test]
fn test_read_structure_file_from_disk() {
    let reader = std::fs::File::open("../test_files/test_minimal.pdb").unwrap();
    let file = read_structure_file(reader).unwrap();
    assert_eq!(file.datablock("1ABC").unwrap().first_item("_entry.id"), "1ABC");

    let reader = std::fs::File::open("../test_files/test_tiny.cif").unwrap();
    let file = read_structure_file(reader).unwrap();
    let block = file.datablock("x").unwrap();
    assert_eq!(block.first_item("_entry.id"), "x");
    assert_eq!(block.get("a").unwrap().len(), 2);
    assert_eq!(block.first_item("_note.text"), "line one\n\\;line two");
}
