//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

/*!
Module with the chemical-compound collaborator interface.

The chemical knowledge itself (the full component dictionary with atoms and
bonds per compound) lives outside this crate. Users plug their backend in
through the [CompoundFactory] trait; the [BuiltinCompoundFactory] knows just
enough chemistry (standard amino acids, nucleotides, water, the common
glycosylation sugars) for the converter to produce sensible `chem_comp` rows
without one.

The factory is process-wide and should be set once, before any conversion
starts.
!*/

use lazy_static::lazy_static;

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

#[cfg(test)] mod compound_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// One atom of a compound, as the component dictionary describes it.
#[derive(Clone, Debug, PartialEq)]
pub struct CompoundAtom {
    pub id: String,
    pub symbol: String,
    pub charge: i32,
}

/// One bond of a compound.
#[derive(Clone, Debug, PartialEq)]
pub struct CompoundBond {
    pub atom_id_1: String,
    pub atom_id_2: String,
    pub order: String,
}

/// Everything the converter needs to know about one chemical component.
#[derive(Clone, Debug, PartialEq)]
pub struct Compound {
    pub id: String,
    pub name: String,
    pub comp_type: String,
    pub formula: String,
    pub formula_weight: f64,
    pub atoms: Vec<CompoundAtom>,
    pub bonds: Vec<CompoundBond>,
}

/// The seam to the external chemical-component library.
pub trait CompoundFactory: Send + Sync {

    /// Everything known about the provided component, or None for unknown ids.
    fn lookup_compound(&self, id: &str) -> Option<Compound>;

    /// True if the component is a known amino acid.
    fn is_known_peptide(&self, id: &str) -> bool;

    /// True if the component is a known nucleotide.
    fn is_known_base(&self, id: &str) -> bool;
}

/// The fallback factory: a small static table of the standard residues.
pub struct BuiltinCompoundFactory;

//---------------------------------------------------------------------------//
//                           Implementations
//---------------------------------------------------------------------------//

/// Compact row of the builtin table: id, name, type, formula, weight.
type BuiltinRow = (&'static str, &'static str, &'static str, &'static str, f64);

/// The standard amino acids, with CCD names, formulas and weights.
const AMINO_ACIDS: &[BuiltinRow] = &[
    ("ALA", "ALANINE", "L-peptide linking", "C3 H7 N O2", 89.093),
    ("ARG", "ARGININE", "L-peptide linking", "C6 H15 N4 O2 1", 175.209),
    ("ASN", "ASPARAGINE", "L-peptide linking", "C4 H8 N2 O3", 132.118),
    ("ASP", "ASPARTIC ACID", "L-peptide linking", "C4 H7 N O4", 133.103),
    ("CYS", "CYSTEINE", "L-peptide linking", "C3 H7 N O2 S", 121.158),
    ("GLN", "GLUTAMINE", "L-peptide linking", "C5 H10 N2 O3", 146.144),
    ("GLU", "GLUTAMIC ACID", "L-peptide linking", "C5 H9 N O4", 147.129),
    ("GLY", "GLYCINE", "peptide linking", "C2 H5 N O2", 75.067),
    ("HIS", "HISTIDINE", "L-peptide linking", "C6 H10 N3 O2 1", 156.162),
    ("ILE", "ISOLEUCINE", "L-peptide linking", "C6 H13 N O2", 131.173),
    ("LEU", "LEUCINE", "L-peptide linking", "C6 H13 N O2", 131.173),
    ("LYS", "LYSINE", "L-peptide linking", "C6 H15 N2 O2 1", 147.195),
    ("MET", "METHIONINE", "L-peptide linking", "C5 H11 N O2 S", 149.211),
    ("MSE", "SELENOMETHIONINE", "L-peptide linking", "C5 H11 N O2 Se", 196.106),
    ("PHE", "PHENYLALANINE", "L-peptide linking", "C9 H11 N O2", 165.189),
    ("PRO", "PROLINE", "L-peptide linking", "C5 H9 N O2", 115.130),
    ("SER", "SERINE", "L-peptide linking", "C3 H7 N O3", 105.093),
    ("THR", "THREONINE", "L-peptide linking", "C4 H9 N O3", 119.119),
    ("TRP", "TRYPTOPHAN", "L-peptide linking", "C11 H12 N2 O2", 204.225),
    ("TYR", "TYROSINE", "L-peptide linking", "C9 H11 N O3", 181.189),
    ("VAL", "VALINE", "L-peptide linking", "C5 H11 N O2", 117.146),
];

/// The standard nucleotides.
const NUCLEOTIDES: &[BuiltinRow] = &[
    ("A", "ADENOSINE-5'-MONOPHOSPHATE", "RNA linking", "C10 H14 N5 O7 P", 347.221),
    ("C", "CYTIDINE-5'-MONOPHOSPHATE", "RNA linking", "C9 H14 N3 O8 P", 323.197),
    ("G", "GUANOSINE-5'-MONOPHOSPHATE", "RNA linking", "C10 H14 N5 O8 P", 363.221),
    ("U", "URIDINE-5'-MONOPHOSPHATE", "RNA linking", "C9 H13 N2 O9 P", 324.181),
    ("DA", "2'-DEOXYADENOSINE-5'-MONOPHOSPHATE", "DNA linking", "C10 H14 N5 O6 P", 331.222),
    ("DC", "2'-DEOXYCYTIDINE-5'-MONOPHOSPHATE", "DNA linking", "C9 H14 N3 O7 P", 307.197),
    ("DG", "2'-DEOXYGUANOSINE-5'-MONOPHOSPHATE", "DNA linking", "C10 H14 N5 O7 P", 347.221),
    ("DT", "THYMIDINE-5'-MONOPHOSPHATE", "DNA linking", "C10 H15 N2 O8 P", 322.208),
    ("T", "THYMIDINE-5'-MONOPHOSPHATE", "DNA linking", "C10 H15 N2 O8 P", 322.208),
];

/// Water and the sugars seen in N-glycosylation trees.
const OTHERS: &[BuiltinRow] = &[
    ("HOH", "WATER", "non-polymer", "H2 O", 18.015),
    ("NAG", "2-acetamido-2-deoxy-beta-D-glucopyranose", "D-saccharide, beta linking", "C8 H15 N O6", 221.208),
    ("NDG", "2-acetamido-2-deoxy-alpha-D-glucopyranose", "D-saccharide, alpha linking", "C8 H15 N O6", 221.208),
    ("BMA", "beta-D-mannopyranose", "D-saccharide, beta linking", "C6 H12 O6", 180.156),
    ("MAN", "alpha-D-mannopyranose", "D-saccharide, alpha linking", "C6 H12 O6", 180.156),
    ("GAL", "beta-D-galactopyranose", "D-saccharide, beta linking", "C6 H12 O6", 180.156),
    ("GLC", "alpha-D-glucopyranose", "D-saccharide, alpha linking", "C6 H12 O6", 180.156),
    ("FUC", "alpha-L-fucopyranose", "L-saccharide, alpha linking", "C6 H12 O5", 164.156),
];

/// One-letter codes for the standard amino acids, ambiguity codes included.
const AA_LETTERS: &[(&str, char)] = &[
    ("ALA", 'A'), ("ARG", 'R'), ("ASN", 'N'), ("ASP", 'D'), ("CYS", 'C'),
    ("GLN", 'Q'), ("GLU", 'E'), ("GLY", 'G'), ("HIS", 'H'), ("ILE", 'I'),
    ("LEU", 'L'), ("LYS", 'K'), ("MET", 'M'), ("PHE", 'F'), ("PRO", 'P'),
    ("SER", 'S'), ("THR", 'T'), ("TRP", 'W'), ("TYR", 'Y'), ("VAL", 'V'),
    ("GLX", 'Z'), ("ASX", 'B'),
];

/// One-letter codes for the standard bases.
const BASE_LETTERS: &[(&str, char)] = &[
    ("A", 'A'), ("C", 'C'), ("G", 'G'), ("T", 'T'), ("U", 'U'),
    ("DA", 'A'), ("DC", 'C'), ("DG", 'G'), ("DT", 'T'),
];

lazy_static! {

    /// The process-wide factory. Defaults to the builtin table; set it once at
    /// startup to use a CCD-backed implementation.
    static ref FACTORY: RwLock<Arc<dyn CompoundFactory>> = RwLock::new(Arc::new(BuiltinCompoundFactory));

    static ref KNOWN_PEPTIDES: BTreeSet<&'static str> = AMINO_ACIDS.iter().map(|row| row.0).collect();
    static ref KNOWN_BASES: BTreeSet<&'static str> = NUCLEOTIDES.iter().map(|row| row.0).collect();
}

/// This function returns the process-wide compound factory.
pub fn compound_factory() -> Arc<dyn CompoundFactory> {
    FACTORY.read().map(|factory| factory.clone()).unwrap_or_else(|_| Arc::new(BuiltinCompoundFactory))
}

/// This function replaces the process-wide compound factory. Call it once,
/// before any conversion starts.
pub fn set_compound_factory(factory: Arc<dyn CompoundFactory>) {
    if let Ok(mut slot) = FACTORY.write() {
        *slot = factory;
    }
}

/// This function returns the one-letter code of a standard residue, if it has one.
pub fn one_letter_code(res_name: &str) -> Option<char> {
    AA_LETTERS.iter().chain(BASE_LETTERS.iter())
        .find(|(name, _)| res_name.eq_ignore_ascii_case(name))
        .map(|(_, letter)| *letter)
}

impl CompoundFactory for BuiltinCompoundFactory {
    fn lookup_compound(&self, id: &str) -> Option<Compound> {
        AMINO_ACIDS.iter()
            .chain(NUCLEOTIDES.iter())
            .chain(OTHERS.iter())
            .find(|(row_id, ..)| id.eq_ignore_ascii_case(row_id))
            .map(|(id, name, comp_type, formula, weight)| Compound {
                id: (*id).to_owned(),
                name: (*name).to_owned(),
                comp_type: (*comp_type).to_owned(),
                formula: (*formula).to_owned(),
                formula_weight: *weight,
                atoms: vec![],
                bonds: vec![],
            })
    }

    fn is_known_peptide(&self, id: &str) -> bool {
        KNOWN_PEPTIDES.contains(id.to_ascii_uppercase().as_str())
    }

    fn is_known_base(&self, id: &str) -> bool {
        KNOWN_BASES.contains(id.to_ascii_uppercase().as_str())
    }
}
