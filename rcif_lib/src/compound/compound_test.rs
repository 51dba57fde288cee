//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the builtin compound factory.

use super::*;

#[test]
fn test_known_peptides() {
    let factory = BuiltinCompoundFactory;
    assert!(factory.is_known_peptide("ALA"));
    assert!(factory.is_known_peptide("ala"));
    assert!(factory.is_known_peptide("MSE"));
    assert!(!factory.is_known_peptide("HOH"));
    assert!(!factory.is_known_peptide("NAG"));
}

#[test]
fn test_known_bases() {
    let factory = BuiltinCompoundFactory;
    assert!(factory.is_known_base("DA"));
    assert!(factory.is_known_base("U"));
    assert!(!factory.is_known_base("ALA"));
}

#[test]
fn test_lookup() {
    let factory = BuiltinCompoundFactory;

    let ala = factory.lookup_compound("ALA").unwrap();
    assert_eq!(ala.name, "ALANINE");
    assert_eq!(ala.formula, "C3 H7 N O2");
    assert!((ala.formula_weight - 89.093).abs() < 1e-6);

    let nag = factory.lookup_compound("NAG").unwrap();
    assert!(nag.name.contains("glucopyranose"));

    assert!(factory.lookup_compound("ZZZ").is_none());
}

#[test]
fn test_one_letter_codes() {
    assert_eq!(one_letter_code("ALA"), Some('A'));
    assert_eq!(one_letter_code("TRP"), Some('W'));
    assert_eq!(one_letter_code("DG"), Some('G'));
    assert_eq!(one_letter_code("XYZ"), None);
}
