//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the semantic reconstruction pipeline.

use crate::model::condition::key;
use crate::pdb::read_pdb_file;

/// Diagnostics of the pipeline are worth seeing when a test goes wrong.
fn init_logging() {
    let _ = simplelog::SimpleLogger::init(simplelog::LevelFilter::Debug, simplelog::Config::default());
}

const MINIMAL_PDB: &str = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ALA A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  C   ALA A   1      10.716   6.755  -4.148  1.00  0.00           C
END
";

#[test]
fn test_legacy_minimum() {
    init_logging();

    let file = read_pdb_file(MINIMAL_PDB).unwrap();
    let block = file.datablock("1ABC").unwrap();

    assert_eq!(block.first_item("_entry.id"), "1ABC");

    // A synthetic chain and entity.
    let asym = block.get("struct_asym").unwrap();
    let row = asym.rows().next().unwrap();
    assert_eq!(asym.value(row, "id"), "A");
    assert_eq!(asym.value(row, "entity_id"), "1");

    // One atom_site row per ATOM record, mapped onto the synthetic asym.
    let atom_site = block.get("atom_site").unwrap();
    assert_eq!(atom_site.len(), 3);
    for row in atom_site.rows() {
        assert_eq!(atom_site.value(row, "group_PDB"), "ATOM");
        assert_eq!(atom_site.value(row, "label_asym_id"), "A");
        assert_eq!(atom_site.value(row, "label_seq_id"), "1");
        assert_eq!(atom_site.value(row, "auth_asym_id"), "A");
        assert_eq!(atom_site.value(row, "pdbx_PDB_model_num"), "1");
    }

    // The residue is known, so chem_comp carries its full description.
    let chem_comp = block.get("chem_comp").unwrap();
    let ala = chem_comp.first(&key("id").is("ALA")).unwrap();
    assert_eq!(chem_comp.value(ala, "name"), "ALANINE");
    assert_eq!(chem_comp.value(ala, "formula"), "C3 H7 N O2");
    assert_eq!(chem_comp.value(ala, "mon_nstd_flag"), "y");

    // Observed element symbols, sorted.
    let atom_type = block.get("atom_type").unwrap();
    let symbols: Vec<_> = atom_type.rows().map(|r| atom_type.value(r, "symbol").to_owned()).collect();
    assert_eq!(symbols, ["C", "N"]);
}

#[test]
fn test_unknown_residue_gets_empty_chem_comp() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
HETATM    1  X1  QZX A 101      11.104   6.134  -6.504  1.00  0.00           C
END
";

    let file = read_pdb_file(input).unwrap();
    let block = file.datablock("1ABC").unwrap();

    let chem_comp = block.get("chem_comp").unwrap();
    let row = chem_comp.first(&key("id").is("QZX")).unwrap();
    assert_eq!(chem_comp.value(row, "name"), "");
    assert_eq!(chem_comp.value(row, "type"), "NON-POLYMER");
    assert_eq!(chem_comp.raw_value(row, "mon_nstd_flag"), Some("."));
}

const ALIGNED_PDB: &str = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
SEQRES   1 A    3  ALA GLY SER
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ALA A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  N   SER A   3      10.000   5.000  -4.000  1.00  0.00           N
ATOM      4  CA  SER A   3      10.500   5.500  -3.000  1.00  0.00           C
TER       5      SER A   3
END
";

#[test]
fn test_seqres_alignment_recovers_label_seq() {
    let file = read_pdb_file(ALIGNED_PDB).unwrap();
    let block = file.datablock("1ABC").unwrap();

    // The full declared sequence is numbered, the unobserved GLY included.
    let scheme = block.get("pdbx_poly_seq_scheme").unwrap();
    assert_eq!(scheme.len(), 3);

    let rows: Vec<_> = scheme.rows().collect();
    assert_eq!(scheme.value(rows[0], "mon_id"), "ALA");
    assert_eq!(scheme.value(rows[0], "seq_id"), "1");
    assert_eq!(scheme.value(rows[0], "pdb_seq_num"), "1");
    assert_eq!(scheme.value(rows[0], "auth_seq_num"), "1");

    assert_eq!(scheme.value(rows[1], "mon_id"), "GLY");
    assert_eq!(scheme.value(rows[1], "seq_id"), "2");
    assert_eq!(scheme.value(rows[1], "pdb_seq_num"), "2");
    assert_eq!(scheme.raw_value(rows[1], "auth_seq_num"), Some("."));

    assert_eq!(scheme.value(rows[2], "mon_id"), "SER");
    assert_eq!(scheme.value(rows[2], "seq_id"), "3");
    assert_eq!(scheme.value(rows[2], "pdb_seq_num"), "3");

    // Each observed residue's (asym, label_seq) maps back onto its original
    // (chain, resSeq): SER kept auth 3 and got label 3.
    let atom_site = block.get("atom_site").unwrap();
    let ser = atom_site.first(&key("label_comp_id").is("SER")).unwrap();
    assert_eq!(atom_site.value(ser, "label_seq_id"), "3");
    assert_eq!(atom_site.value(ser, "auth_seq_id"), "3");

    // The polymer sequence made it into the entity as one-letter codes.
    let poly = block.get("entity_poly").unwrap();
    let row = poly.rows().next().unwrap();
    assert_eq!(poly.value(row, "pdbx_seq_one_letter_code"), "AGS");
    assert_eq!(poly.value(row, "type"), "polypeptide(L)");
}

#[test]
fn test_self_inconsistent_file_fails() {
    // The observed TRP does not exist anywhere in the declared sequence.
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
SEQRES   1 A    2  ALA GLY
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  N   TRP A   2      10.000   5.000  -4.000  1.00  0.00           N
ATOM      3  N   GLY A   3      10.000   5.000  -2.000  1.00  0.00           N
END
";

    assert!(read_pdb_file(input).is_err());
}

const SUGAR_PDB: &str = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
HET    NAG  A 201      14
HET    NAG  A 202      14
LINK         ND2 ASN A   1                 C1  NAG A 201     1555   1555  1.45
LINK         O4  NAG A 201                 C1  NAG A 202     1555   1555  1.42
ATOM      1  N   ASN A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ASN A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  ND2 ASN A   1      12.000   6.500  -4.000  1.00  0.00           N
HETATM    4  C1  NAG A 201      13.104   7.134  -3.504  1.00  0.00           C
HETATM    5  O4  NAG A 201      14.104   8.134  -2.504  1.00  0.00           O
HETATM    6  C1  NAG A 202      15.104   9.134  -1.504  1.00  0.00           C
END
";

#[test]
fn test_sugar_tree() {
    let file = read_pdb_file(SUGAR_PDB).unwrap();
    let block = file.datablock("1ABC").unwrap();

    // One branched entity with two sugars in its list.
    let branch = block.get("pdbx_entity_branch").unwrap();
    assert_eq!(branch.len(), 1);
    let row = branch.rows().next().unwrap();
    assert_eq!(branch.value(row, "type"), "oligosaccharide");
    let entity_id = branch.value(row, "entity_id").to_owned();

    let entity = block.get("entity").unwrap();
    let branched = entity.first(&key("id").is(&entity_id)).unwrap();
    assert_eq!(entity.value(branched, "type"), "branched");

    let list = block.get("pdbx_entity_branch_list").unwrap();
    assert_eq!(list.len(), 2);

    // The single link: sugar 2's C1 bonds onto sugar 1's O4.
    let link = block.get("pdbx_entity_branch_link").unwrap();
    assert_eq!(link.len(), 1);
    let row = link.rows().next().unwrap();
    assert_eq!(link.value(row, "entity_branch_list_num_1"), "2");
    assert_eq!(link.value(row, "atom_id_1"), "C1");
    assert_eq!(link.value(row, "entity_branch_list_num_2"), "1");
    assert_eq!(link.value(row, "atom_id_2"), "O4");

    // Both sugars appear in the branch scheme under one asym.
    let scheme = block.get("pdbx_branch_scheme").unwrap();
    assert_eq!(scheme.len(), 2);

    // The hetero residues were folded into the branch; no nonpoly entity for NAG.
    let nonpoly = block.get("pdbx_entity_nonpoly");
    assert!(nonpoly.map(|c| c.find(&key("comp_id").is("NAG")).is_empty()).unwrap_or(true));

    // The struct_conn rows for the LINK records survive with a distance.
    let conn = block.get("struct_conn").unwrap();
    assert_eq!(conn.len(), 2);
    for row in conn.rows() {
        assert_eq!(conn.value(row, "conn_type_id"), "covale");
        assert!(!conn.value(row, "pdbx_dist_value").is_empty());
    }
}

const ASSEMBLY_PDB: &str = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
REMARK 350 BIOMOLECULE: 1
REMARK 350 AUTHOR DETERMINED BIOLOGICAL UNIT: HEXAMERIC
REMARK 350 SOFTWARE DETERMINED QUATERNARY STRUCTURE: HEXAMERIC
REMARK 350 SOFTWARE USED: PISA
REMARK 350 TOTAL BURIED SURFACE AREA: 5240 ANGSTROM**2
REMARK 350 SURFACE AREA OF THE COMPLEX: 10680 ANGSTROM**2
REMARK 350 CHANGE IN SOLVENT FREE ENERGY: -40.0 KCAL/MOL
REMARK 350 APPLY THE FOLLOWING TO CHAINS: A
REMARK 350   BIOMT1   1  1.000000  0.000000  0.000000        0.000000
REMARK 350   BIOMT2   1  0.000000  1.000000  0.000000        0.000000
REMARK 350   BIOMT3   1  0.000000  0.000000  1.000000        0.000000
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
END
";

#[test]
fn test_remark_350_assembly() {
    let file = read_pdb_file(ASSEMBLY_PDB).unwrap();
    let block = file.datablock("1ABC").unwrap();

    // Author and software both determined the unit, which is its own
    // enumerated value, not a list of the two.
    let assembly = block.get("pdbx_struct_assembly").unwrap();
    assert_eq!(assembly.len(), 1);
    let row = assembly.rows().next().unwrap();
    assert_eq!(assembly.value(row, "id"), "1");
    assert_eq!(assembly.value(row, "details"), "author_and_software_defined_assembly");
    assert_eq!(assembly.value(row, "method_details"), "PISA");
    assert_eq!(assembly.value(row, "oligomeric_details"), "hexameric");
    assert_eq!(assembly.value(row, "oligomeric_count"), "6");

    // The property rows carry the values with their units stripped.
    let props = block.get("pdbx_struct_assembly_prop").unwrap();
    let absa = props.first(&key("type").is("ABSA (A^2)")).unwrap();
    assert_eq!(props.value(absa, "value"), "5240");
    let ssa = props.first(&key("type").is("SSA (A^2)")).unwrap();
    assert_eq!(props.value(ssa, "value"), "10680");
    let more = props.first(&key("type").is("MORE")).unwrap();
    assert_eq!(props.value(more, "value"), "-40.0");

    // One generator row for the biomolecule, over the chain's asym.
    let gen = block.get("pdbx_struct_assembly_gen").unwrap();
    assert_eq!(gen.len(), 1);
    let row = gen.rows().next().unwrap();
    assert_eq!(gen.value(row, "assembly_id"), "1");
    assert_eq!(gen.value(row, "oper_expression"), "1");
    assert_eq!(gen.value(row, "asym_id_list"), "A");

    // The identity operator.
    let opers = block.get("pdbx_struct_oper_list").unwrap();
    assert_eq!(opers.len(), 1);
    let row = opers.rows().next().unwrap();
    assert_eq!(opers.value(row, "id"), "1");
    assert_eq!(opers.value(row, "type"), "identity operation");
    assert_eq!(opers.value(row, "matrix[1][1]"), "1.0000000000");
    assert_eq!(opers.value(row, "vector[3]"), "0.0000000000");
}

#[test]
fn test_remark_350_author_only() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
REMARK 350 BIOMOLECULE: 1
REMARK 350 AUTHOR DETERMINED BIOLOGICAL UNIT: MONOMERIC
REMARK 350 APPLY THE FOLLOWING TO CHAINS: A
REMARK 350   BIOMT1   1  1.000000  0.000000  0.000000        0.000000
REMARK 350   BIOMT2   1  0.000000  1.000000  0.000000        0.000000
REMARK 350   BIOMT3   1  0.000000  0.000000  1.000000        0.000000
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
END
";

    let file = read_pdb_file(input).unwrap();
    let block = file.datablock("1ABC").unwrap();

    let assembly = block.get("pdbx_struct_assembly").unwrap();
    let row = assembly.rows().next().unwrap();
    assert_eq!(assembly.value(row, "details"), "author_defined_assembly");
    assert_eq!(assembly.value(row, "oligomeric_details"), "monomeric");
    assert_eq!(assembly.value(row, "oligomeric_count"), "1");
}

#[test]
fn test_disulfide_bond() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
SSBOND   1 CYS A    1    CYS A    2                          1555   1555  2.04
ATOM      1  SG  CYS A   1      11.104   6.134  -6.504  1.00  0.00           S
ATOM      2  SG  CYS A   2      10.104   5.134  -5.504  1.00  0.00           S
END
";

    let file = read_pdb_file(input).unwrap();
    let block = file.datablock("1ABC").unwrap();

    let conn = block.get("struct_conn").unwrap();
    assert_eq!(conn.len(), 1);
    let row = conn.rows().next().unwrap();
    assert_eq!(conn.value(row, "conn_type_id"), "disulf");
    assert_eq!(conn.value(row, "ptnr1_label_atom_id"), "SG");
    assert_eq!(conn.value(row, "ptnr1_symmetry"), "1_555");
    assert_eq!(conn.value(row, "pdbx_dist_value"), "2.04");

    let conn_type = block.get("struct_conn_type").unwrap();
    assert_eq!(conn_type.first_item("id"), "disulf");
}

#[test]
fn test_cryst1() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
CRYST1   61.500   61.500  170.300  90.00  90.00  90.00 P 43 21 2     8
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
END
";

    let file = read_pdb_file(input).unwrap();
    let block = file.datablock("1ABC").unwrap();

    let cell = block.get("cell").unwrap();
    let row = cell.rows().next().unwrap();
    assert_eq!(cell.value(row, "length_a"), "61.500");
    assert_eq!(cell.value(row, "length_c"), "170.300");
    assert_eq!(cell.value(row, "angle_alpha"), "90.00");

    let symmetry = block.get("symmetry").unwrap();
    let row = symmetry.rows().next().unwrap();
    assert_eq!(symmetry.value(row, "space_group_name_H-M"), "P 43 21 2");
    assert_eq!(symmetry.value(row, "Int_Tables_number"), "96");
}

#[test]
fn test_waters_get_their_own_asym() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
HETATM    2  O   HOH A 301      20.000  20.000  20.000  1.00  0.00           O
HETATM    3  O   HOH A 302      21.000  21.000  21.000  1.00  0.00           O
END
";

    let file = read_pdb_file(input).unwrap();
    let block = file.datablock("1ABC").unwrap();

    let entity = block.get("entity").unwrap();
    let water = entity.first(&key("type").is("water")).unwrap();
    assert_eq!(entity.value(water, "pdbx_description"), "water");

    // Both waters share one asym, separate from the polymer's.
    let atom_site = block.get("atom_site").unwrap();
    let waters = atom_site.find(&key("label_comp_id").is("HOH"));
    assert_eq!(waters.len(), 2);
    let asym = atom_site.value(waters[0], "label_asym_id").to_owned();
    assert_ne!(asym, "A");
    assert_eq!(atom_site.value(waters[1], "label_asym_id"), asym);

    // Waters are HETATM and carry no label_seq_id.
    assert_eq!(atom_site.value(waters[0], "group_PDB"), "HETATM");
    assert_eq!(atom_site.raw_value(waters[0], "label_seq_id"), Some("."));
}

#[test]
fn test_anisou_attaches_to_preceding_atom() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
ANISOU    1  N   ALA A   1     1000   2000   3000    100    200    300       N
END
";

    let file = read_pdb_file(input).unwrap();
    let block = file.datablock("1ABC").unwrap();

    let anisotrop = block.get("atom_site_anisotrop").unwrap();
    assert_eq!(anisotrop.len(), 1);
    let row = anisotrop.rows().next().unwrap();
    assert_eq!(anisotrop.value(row, "id"), "1");
    assert_eq!(anisotrop.value(row, "U[1][1]"), "0.1000");
    assert_eq!(anisotrop.value(row, "U[2][2]"), "0.2000");
    assert_eq!(anisotrop.value(row, "U[2][3]"), "0.0300");
}
