//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the REMARK 3 dispatcher.

use crate::model::condition::key;
use crate::model::Datablock;
use crate::pdb::pre_parse;

const REFMAC5_REMARK: &str = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
REMARK   3
REMARK   3 REFINEMENT.
REMARK   3   PROGRAM     : REFMAC 5.8.0267
REMARK   3   AUTHORS     : MURSHUDOV,SKUBAK,LEBEDEV,PANNU
REMARK   3
REMARK   3    DATA USED IN REFINEMENT.
REMARK   3   RESOLUTION RANGE HIGH (ANGSTROMS) :   1.50
REMARK   3   RESOLUTION RANGE LOW  (ANGSTROMS) :  20.00
REMARK   3   DATA CUTOFF            (SIGMA(F)) : NONE
REMARK   3   COMPLETENESS FOR RANGE        (%) :  99.5
REMARK   3   NUMBER OF REFLECTIONS             :   52370
REMARK   3
REMARK   3  FIT TO DATA USED IN REFINEMENT.
REMARK   3   CROSS-VALIDATION METHOD          : THROUGHOUT
REMARK   3   FREE R VALUE TEST SET SELECTION  : RANDOM
REMARK   3   R VALUE     (WORKING + TEST SET) : 0.159
REMARK   3   R VALUE            (WORKING SET) : 0.157
REMARK   3   FREE R VALUE                     : 0.196
REMARK   3   FREE R VALUE TEST SET SIZE   (%) : 5.1
REMARK   3   FREE R VALUE TEST SET COUNT      : 2813
REMARK   3
REMARK   3  FIT IN THE HIGHEST RESOLUTION BIN.
REMARK   3   TOTAL NUMBER OF BINS USED           : 20
REMARK   3   BIN RESOLUTION RANGE HIGH       (A) : 1.50
REMARK   3   BIN RESOLUTION RANGE LOW        (A) : 1.54
REMARK   3   REFLECTION IN BIN     (WORKING SET) : 3600
REMARK   3   BIN COMPLETENESS (WORKING+TEST) (%) : 97.3
REMARK   3   BIN R VALUE           (WORKING SET) : 0.2150
REMARK   3   BIN FREE R VALUE SET COUNT          : 200
REMARK   3   BIN FREE R VALUE                    : 0.2560
REMARK   3
REMARK   3  NUMBER OF NON-HYDROGEN ATOMS USED IN REFINEMENT.
REMARK   3   PROTEIN ATOMS            : 2035
REMARK   3   NUCLEIC ACID ATOMS       : 0
REMARK   3   HETEROGEN ATOMS          : 28
REMARK   3   SOLVENT ATOMS            : 275
REMARK   3
REMARK   3  B VALUES.
REMARK   3   FROM WILSON PLOT           (A**2) : 12.8
REMARK   3   MEAN B VALUE      (OVERALL, A**2) : 14.5
REMARK   3   OVERALL ANISOTROPIC B VALUE.
REMARK   3    B11 (A**2) : -0.31
REMARK   3    B22 (A**2) : -0.31
REMARK   3    B33 (A**2) : 0.62
REMARK   3    B12 (A**2) : 0.00
REMARK   3    B13 (A**2) : 0.00
REMARK   3    B23 (A**2) : 0.00
REMARK   3
REMARK   3  ESTIMATED OVERALL COORDINATE ERROR.
REMARK   3   ESU BASED ON R VALUE                            (A): 0.075
REMARK   3   ESU BASED ON FREE R VALUE                       (A): 0.072
REMARK   3   ESU BASED ON MAXIMUM LIKELIHOOD                 (A): 0.047
REMARK   3   ESU FOR B VALUES BASED ON MAXIMUM LIKELIHOOD (A**2): 1.380
REMARK   3
REMARK   3 CORRELATION COEFFICIENTS.
REMARK   3   CORRELATION COEFFICIENT FO-FC      : 0.965
REMARK   3   CORRELATION COEFFICIENT FO-FC FREE : 0.948
REMARK   3
REMARK   3  RMS DEVIATIONS FROM IDEAL VALUES        COUNT    RMS    WEIGHT
REMARK   3   BOND LENGTHS REFINED ATOMS        (A):  2096 ; 0.019 ; 0.019
REMARK   3   BOND ANGLES REFINED ATOMS   (DEGREES):  2845 ; 1.800 ; 1.967
REMARK   3   CHIRAL-CENTER RESTRAINTS       (A**3):   305 ; 0.112 ; 0.200
REMARK   3
REMARK   3  BULK SOLVENT MODELLING.
REMARK   3   METHOD USED : MASK
REMARK   3   PARAMETERS FOR MASK CALCULATION
REMARK   3   VDW PROBE RADIUS   : 1.20
REMARK   3   ION PROBE RADIUS   : 0.80
REMARK   3   SHRINKAGE RADIUS   : 0.80
REMARK   3
REMARK   3  OTHER REFINEMENT REMARKS: HYDROGENS HAVE BEEN ADDED IN THE RIDING
REMARK   3  POSITIONS
END
";

#[test]
fn test_refmac5_dispatch() {
    let parsed = pre_parse(REFMAC5_REMARK).unwrap();
    let start = parsed.records.iter().position(|r| r.is("REMARK   3")).unwrap();

    let mut db = Datablock::new("1ABC");
    let found = super::parse("X-RAY DIFFRACTION", &parsed.records[start..], &mut db).unwrap();
    assert!(found);

    // The software row names the winning program with its version.
    let software = db.get("software").unwrap();
    let row = software.rows().next().unwrap();
    assert_eq!(software.value(row, "name"), "REFMAC");
    assert_eq!(software.value(row, "version"), "5.8.0267");
    assert_eq!(software.value(row, "classification"), "refinement");

    // The captured refine statistics.
    let refine = db.get("refine").unwrap();
    let row = refine.front().unwrap();
    assert_eq!(refine.value(row, "pdbx_refine_id"), "X-RAY DIFFRACTION");
    assert_eq!(refine.value(row, "entry_id"), "1ABC");
    assert_eq!(refine.value(row, "ls_d_res_high"), "1.50");
    assert_eq!(refine.value(row, "ls_d_res_low"), "20.00");
    assert_eq!(refine.value(row, "ls_R_factor_R_work"), "0.157");
    assert_eq!(refine.value(row, "ls_R_factor_R_free"), "0.196");
    assert_eq!(refine.value(row, "correlation_coeff_Fo_to_Fc"), "0.965");
    assert_eq!(refine.value(row, "pdbx_overall_ESU_R"), "0.075");
    assert_eq!(refine.value(row, "solvent_model_details"), "MASK");
    assert_eq!(refine.value(row, "pdbx_solvent_vdw_probe_radii"), "1.20");

    // NONE counts as a null placeholder, so the sigma cutoff stays unset.
    assert_eq!(refine.raw_value(row, "pdbx_ls_sigma_F"), None);

    // The trailing free text went into refine.details.
    assert!(refine.value(row, "details").contains("HYDROGENS HAVE BEEN ADDED"));

    // The restraints, one row per type.
    let restr = db.get("refine_ls_restr").unwrap();
    let bond = restr.first(&key("type").is("r_bond_refined_d")).unwrap();
    assert_eq!(restr.value(bond, "number"), "2096");
    assert_eq!(restr.value(bond, "dev_ideal"), "0.019");
    assert_eq!(restr.value(bond, "dev_ideal_target"), "0.019");

    let chiral = restr.first(&key("type").is("r_chiral_restr")).unwrap();
    assert_eq!(restr.value(chiral, "number"), "305");

    // The highest resolution shell.
    let shell = db.get("refine_ls_shell").unwrap();
    let row = shell.front().unwrap();
    assert_eq!(shell.value(row, "pdbx_total_number_of_bins_used"), "20");
    assert_eq!(shell.value(row, "d_res_high"), "1.50");
    assert_eq!(shell.value(row, "R_factor_R_work"), "0.2150");

    // The atom counts, seeded with the resolution range.
    let hist = db.get("refine_hist").unwrap();
    let row = hist.front().unwrap();
    assert_eq!(hist.value(row, "pdbx_number_atoms_protein"), "2035");
    assert_eq!(hist.value(row, "number_atoms_solvent"), "275");
    assert_eq!(hist.value(row, "d_res_high"), "1.50");
    assert_eq!(hist.value(row, "cycle_id"), "LAST");

    // And the Wilson estimate lands in reflns.
    let reflns = db.get("reflns").unwrap();
    let row = reflns.front().unwrap();
    assert_eq!(reflns.value(row, "B_iso_Wilson_estimate"), "12.8");
}

#[test]
fn test_unrecognized_program_is_skipped() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
REMARK   3 REFINEMENT.
REMARK   3   PROGRAM     : SOMETHING-ELSE
REMARK   3   NOTHING HERE MATCHES ANY TEMPLATE AT ALL
END
";

    let parsed = pre_parse(input).unwrap();
    let start = parsed.records.iter().position(|r| r.is("REMARK   3")).unwrap();

    let mut db = Datablock::new("1ABC");

    // The fall-through tries every parser; none scores, so no stats land.
    let found = super::parse("X-RAY DIFFRACTION", &parsed.records[start..], &mut db).unwrap();
    let _ = found;
    assert!(db.get("refine").map(|c| c.is_empty()).unwrap_or(true));
}

#[test]
fn test_missing_refinement_header_is_not_an_error() {
    let input = "\
HEADER    HYDROLASE                               22-JAN-98   1ABC
REMARK   3 SOMETHING ENTIRELY DIFFERENT
END
";

    let parsed = pre_parse(input).unwrap();
    let start = parsed.records.iter().position(|r| r.is("REMARK   3")).unwrap();

    let mut db = Datablock::new("1ABC");
    let found = super::parse("X-RAY DIFFRACTION", &parsed.records[start..], &mut db).unwrap();
    assert!(!found);
}
