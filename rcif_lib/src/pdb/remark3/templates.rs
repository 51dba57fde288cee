//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The per-program REMARK 3 templates.
//!
//! Each line is `(regex, state offset, target category, target items,
//! restraint type, create-new flag)`. A matched line writes its captures into
//! the target and moves the state by the offset; negative offsets loop back
//! for repeating groups like TLS tensors.

/// One rule of a template.
pub(crate) struct TemplateLine {
    pub rx: &'static str,
    pub next_state_offset: i32,
    pub category: &'static str,
    pub items: &'static [&'static str],
    pub ls_restr_type: &'static str,
    pub create_new: bool,
}

/// A skipped section header: matched, but nothing stored.
const fn skip(rx: &'static str, next_state_offset: i32) -> TemplateLine {
    TemplateLine { rx, next_state_offset, category: "", items: &[], ls_restr_type: "", create_new: false }
}

/// A capture into the last row of a category.
const fn cap(rx: &'static str, next_state_offset: i32, category: &'static str, items: &'static [&'static str]) -> TemplateLine {
    TemplateLine { rx, next_state_offset, category, items, ls_restr_type: "", create_new: false }
}

/// A capture that starts a fresh row of its category.
const fn cap_new(rx: &'static str, next_state_offset: i32, category: &'static str, items: &'static [&'static str]) -> TemplateLine {
    TemplateLine { rx, next_state_offset, category, items, ls_restr_type: "", create_new: true }
}

/// First-phase restraint emission: a fresh refine_ls_restr row of this type.
const fn restr_new(rx: &'static str, next_state_offset: i32, items: &'static [&'static str], ls_restr_type: &'static str) -> TemplateLine {
    TemplateLine { rx, next_state_offset, category: "refine_ls_restr", items, ls_restr_type, create_new: true }
}

/// Second-phase restraint emission: updates the row of this type in place.
const fn restr(rx: &'static str, next_state_offset: i32, items: &'static [&'static str], ls_restr_type: &'static str) -> TemplateLine {
    TemplateLine { rx, next_state_offset, category: "refine_ls_restr", items, ls_restr_type, create_new: false }
}

/// One refinement program: its name prefixes as found in the PROGRAM line,
/// the regex splitting name from version, and the template itself.
pub(crate) struct ProgramTemplate {
    pub canonical_name: &'static str,
    pub name_prefixes: &'static [&'static str],
    pub version_rx: &'static str,
    pub template: &'static [TemplateLine],
}

/// All known program templates, in the order the fall-through tries them.
pub(crate) fn program_templates() -> &'static [ProgramTemplate] {
    &PROGRAM_TEMPLATES
}

static PROGRAM_TEMPLATES: [ProgramTemplate; 10] = [
    ProgramTemplate {
        canonical_name: "BUSTER-TNT",
        name_prefixes: &["BUSTER"],
        version_rx: r"(BUSTER(?:-TNT)?)(?: (\d+(?:\..+)?))?",
        template: &BUSTER_TNT_TEMPLATE,
    },
    ProgramTemplate {
        canonical_name: "CNS",
        name_prefixes: &["CNS", "CNX"],
        version_rx: r"(CN[SX])(?: (\d+(?:\.\d+)?))?",
        template: &CNS_TEMPLATE,
    },
    ProgramTemplate {
        canonical_name: "PHENIX",
        name_prefixes: &["PHENIX"],
        version_rx: r"(PHENIX)(?: \(PHENIX\.REFINE:) (\d+(?:\.[^)]+)?)\)?",
        template: &PHENIX_TEMPLATE,
    },
    ProgramTemplate {
        canonical_name: "NUCLSQ",
        name_prefixes: &["NUCLSQ"],
        version_rx: r"(NUCLSQ)(?: (\d+(?:\.\d+)?))?",
        template: &NUCLSQ_TEMPLATE,
    },
    ProgramTemplate {
        canonical_name: "PROLSQ",
        name_prefixes: &["PROLSQ"],
        version_rx: r"(PROLSQ)(?: (\d+(?:\.\d+)?))?",
        template: &PROLSQ_TEMPLATE,
    },
    ProgramTemplate {
        canonical_name: "REFMAC",
        name_prefixes: &["REFMAC"],
        version_rx: r"(REFMAC)()",
        template: &REFMAC_TEMPLATE,
    },
    ProgramTemplate {
        canonical_name: "REFMAC5",
        name_prefixes: &["REFMAC"],
        version_rx: r"(REFMAC)(?: (\d+(?:\..+)?))?",
        template: &REFMAC5_TEMPLATE,
    },
    ProgramTemplate {
        canonical_name: "SHELXL",
        name_prefixes: &["SHELXL"],
        version_rx: r"(SHELXL)(?:-(\d+(?:\..+)?))",
        template: &SHELXL_TEMPLATE,
    },
    ProgramTemplate {
        canonical_name: "TNT",
        name_prefixes: &["TNT"],
        version_rx: r"(TNT)(?: V\. (\d+.+)?)?",
        template: &TNT_TEMPLATE,
    },
    ProgramTemplate {
        canonical_name: "X-PLOR",
        name_prefixes: &["X-PLOR"],
        version_rx: r"(X-PLOR)(?: (\d+(?:\.\d+)?))?",
        template: &XPLOR_TEMPLATE,
    },
];

static BUSTER_TNT_TEMPLATE: [TemplateLine; 99] = [
    skip(r"DATA USED IN REFINEMENT\.", 1),
    cap(r"RESOLUTION RANGE HIGH \(ANGSTROMS\) :\s+(.+?)", 1, "refine", &["ls_d_res_high"]),
    cap(r"RESOLUTION RANGE LOW \(ANGSTROMS\) :\s+(.+?)", 1, "refine", &["ls_d_res_low"]),
    cap(r"DATA CUTOFF \(SIGMA\(F\)\) :\s+(.+?)", 1, "refine", &["pdbx_ls_sigma_F"]),
    cap(r"COMPLETENESS FOR RANGE \(%\) :\s+(.+?)", 1, "refine", &["ls_percent_reflns_obs"]),
    cap(r"NUMBER OF REFLECTIONS :\s+(.+?)", 1, "refine", &["ls_number_reflns_obs"]),
    skip(r"FIT TO DATA USED IN REFINEMENT\.", 1),
    cap(r"CROSS-VALIDATION METHOD :\s+(.+?)", 1, "refine", &["pdbx_ls_cross_valid_method"]),
    cap(r"FREE R VALUE TEST SET SELECTION :\s+(.+?)", 1, "refine", &["pdbx_R_Free_selection_details"]),
    cap(r"R VALUE \(WORKING ?\+ ?TEST SET\) :\s+(.+?)", 1, "refine", &["ls_R_factor_obs"]),
    cap(r"R VALUE \(WORKING SET\) :\s+(.+?)", 1, "refine", &["ls_R_factor_R_work"]),
    cap(r"FREE R VALUE :\s+(.+?)", 1, "refine", &["ls_R_factor_R_free"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%\) :\s+(.+?)", 1, "refine", &["ls_percent_reflns_R_free"]),
    cap(r"FREE R VALUE TEST SET COUNT :\s+(.+?)", 1, "refine", &["ls_number_reflns_R_free"]),
    cap(r"ESTIMATED ERROR OF FREE R VALUE :\s+(.+?)", 1, "refine", &["ls_R_factor_R_free_error"]),
    skip(r"FIT IN THE HIGHEST RESOLUTION BIN\.", 1),
    cap(r"TOTAL NUMBER OF BINS USED :\s+(.+?)", 1, "refine_ls_shell", &["pdbx_total_number_of_bins_used"]),
    cap(r"BIN RESOLUTION RANGE HIGH \(A(?:NGSTROMS)?\) :\s+(.+?)", 1, "refine_ls_shell", &["d_res_high"]),
    cap(r"BIN RESOLUTION RANGE LOW \(A(?:NGSTROMS)?\) :\s+(.+?)", 1, "refine_ls_shell", &["d_res_low"]),
    cap(r"BIN COMPLETENESS \(WORKING\+TEST\) \(%\) :\s+(.+?)", 1, "refine_ls_shell", &["percent_reflns_obs"]),
    cap(r"REFLECTIONS IN BIN \(WORKING ?\+ ?TEST(?: SET)?\) :\s+(.+?)", 1, "refine_ls_shell", &["number_reflns_all"]),
    cap(r"BIN R VALUE \(WORKING ?\+ ?TEST(?: SET)?\) :\s+(.+?)", 1, "refine_ls_shell", &["R_factor_all"]),
    cap(r"REFLECTIONS IN BIN \(WORKING SET\) :\s+(.+?)", 1, "refine_ls_shell", &["number_reflns_R_work"]),
    cap(r"BIN R VALUE \(WORKING SET\) :\s+(.+?)", 1, "refine_ls_shell", &["R_factor_R_work"]),
    cap(r"BIN FREE R VALUE :\s+(.+?)", 1, "refine_ls_shell", &["R_factor_R_free"]),
    cap(r"BIN FREE R VALUE TEST SET SIZE \(%\) :\s+(.+?)", 1, "refine_ls_shell", &["percent_reflns_R_free"]),
    cap(r"BIN FREE R VALUE TEST SET COUNT :\s+(.+?)", 1, "refine_ls_shell", &["number_reflns_R_free"]),
    cap(r"ESTIMATED ERROR OF BIN FREE R VALUE :\s+(.+?)", 1, "refine_ls_shell", &["R_factor_R_free_error"]),
    skip(r"NUMBER OF NON-HYDROGEN ATOMS USED IN REFINEMENT\.", 1),
    cap(r"PROTEIN ATOMS :\s+(.+?)", 1, "refine_hist", &["pdbx_number_atoms_protein"]),
    cap(r"NUCLEIC ACID ATOMS :\s+(.+?)", 1, "refine_hist", &["pdbx_number_atoms_nucleic_acid"]),
    cap(r"HETEROGEN ATOMS :\s+(.+?)", 1, "refine_hist", &["pdbx_number_atoms_ligand"]),
    cap(r"SOLVENT ATOMS :\s+(.+?)", 1, "refine_hist", &["number_atoms_solvent"]),
    skip(r"B VALUES\.", 1),
    cap(r"B VALUE TYPE :\s+(.+?)", 1, "refine", &["pdbx_TLS_residual_ADP_flag"]),
    cap(r"FROM WILSON PLOT \(A\*\*2\) :\s+(.+?)", 1, "reflns", &["B_iso_Wilson_estimate"]),
    cap(r"MEAN B VALUE \(OVERALL, A\*\*2\) :\s+(.+?)", 1, "refine", &["B_iso_mean"]),
    skip(r"OVERALL ANISOTROPIC B VALUE\.", 1),
    cap(r"B11 \(A\*\*2\) :\s+(.+?)", 1, "refine", &["aniso_B[1][1]"]),
    cap(r"B22 \(A\*\*2\) :\s+(.+?)", 1, "refine", &["aniso_B[2][2]"]),
    cap(r"B33 \(A\*\*2\) :\s+(.+?)", 1, "refine", &["aniso_B[3][3]"]),
    cap(r"B12 \(A\*\*2\) :\s+(.+?)", 1, "refine", &["aniso_B[1][2]"]),
    cap(r"B13 \(A\*\*2\) :\s+(.+?)", 1, "refine", &["aniso_B[1][3]"]),
    cap(r"B23 \(A\*\*2\) :\s+(.+?)", 1, "refine", &["aniso_B[2][3]"]),
    skip(r"ESTIMATED COORDINATE ERROR\.", 1),
    cap(r"ESD FROM LUZZATI PLOT \(A\) :\s+(.+?)", 1, "refine_analyze", &["Luzzati_coordinate_error_obs"]),
    cap(r"DPI \(BLOW EQ-10\) BASED ON R VALUE \(A\) :\s+(.+?)", 1, "refine", &["pdbx_overall_SU_R_Blow_DPI"]),
    cap(r"DPI \(BLOW EQ-9\) BASED ON FREE R VALUE \(A\) :\s+(.+?)", 1, "refine", &["pdbx_overall_SU_R_free_Blow_DPI"]),
    cap(r"DPI \(CRUICKSHANK\) BASED ON R VALUE \(A\) :\s+(.+?)", 1, "refine", &["overall_SU_R_Cruickshank_DPI"]),
    cap(r"DPI \(CRUICKSHANK\) BASED ON FREE R VALUE \(A\) :\s+(.+?)", 1, "refine", &["pdbx_overall_SU_R_free_Cruickshank_DPI"]),
    skip(r"REFERENCES: BLOW.+", 1),
    skip(r"CORRELATION COEFFICIENTS\.", 1),
    cap(r"CORRELATION COEFFICIENT FO-FC :\s+(.+?)", 1, "refine", &["correlation_coeff_Fo_to_Fc"]),
    cap(r"CORRELATION COEFFICIENT FO-FC FREE :\s+(.+?)", 1, "refine", &["correlation_coeff_Fo_to_Fc_free"]),
    skip(r"NUMBER OF GEOMETRIC FUNCTION TERMS DEFINED : 15", 1),
    skip(r"TERM COUNT WEIGHT FUNCTION\.", 1),
    restr_new(r"BOND LENGTHS :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_bond_d"),
    restr_new(r"BOND ANGLES :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_angle_deg"),
    restr_new(r"TORSION ANGLES :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_dihedral_angle_d"),
    restr_new(r"TRIGONAL CARBON PLANES :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_trig_c_planes"),
    restr_new(r"GENERAL PLANES :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_gen_planes"),
    restr_new(r"ISOTROPIC THERMAL FACTORS :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_it"),
    restr_new(r"BAD NON-BONDED CONTACTS :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_nbd"),
    restr_new(r"IMPROPER TORSIONS :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_improper_torsion"),
    restr_new(r"PSEUDOROTATION ANGLES :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_pseud_angle"),
    restr_new(r"CHIRAL IMPROPER TORSION :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_chiral_improper_torsion"),
    restr_new(r"SUM OF OCCUPANCIES :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_sum_occupancies"),
    restr_new(r"UTILITY DISTANCES :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_utility_distance"),
    restr_new(r"UTILITY ANGLES :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_utility_angle"),
    restr_new(r"UTILITY TORSION :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_utility_torsion"),
    restr_new(r"IDEAL-DIST CONTACT TERM :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["number", "weight", "pdbx_restraint_function"], "t_ideal_dist_contact"),
    skip(r"RMS DEVIATIONS FROM IDEAL VALUES\.", 1),
    restr(r"BOND LENGTHS \(A\) :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["dev_ideal", "weight", "number"], "t_bond_d"),
    restr(r"BOND ANGLES \(DEGREES\) :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["dev_ideal", "weight", "number"], "t_angle_deg"),
    restr(r"TORSION ANGLES \(DEGREES\) :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["dev_ideal", "weight", "number"], "t_dihedral_angle_d"),
    restr(r"PSEUDO ROTATION ANGLES \(DEGREES\) :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["dev_ideal", "weight", "number"], "t_pseud_angle"),
    restr(r"TRIGONAL CARBON PLANES \(A\) :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["dev_ideal", "weight", "number"], "t_trig_c_planes"),
    restr(r"GENERAL PLANES \(A\) :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["dev_ideal", "weight", "number"], "t_gen_planes"),
    restr(r"ISOTROPIC THERMAL FACTORS \(A\*\*2\) :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["dev_ideal", "weight", "number"], "t_it"),
    restr(r"NON-BONDED CONTACTS \(A\) :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["dev_ideal", "weight", "number"], "t_nbd"),
    restr(r"PEPTIDE OMEGA TORSION ANGLES \(DEGREES\) :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["dev_ideal", "weight", "number"], "t_omega_torsion"),
    restr(r"OTHER TORSION ANGLES \(DEGREES\) :\s+(.+?);\s+(.+?);\s+(.+?)", 1, &["dev_ideal", "weight", "number"], "t_other_torsion"),
    skip(r"TLS DETAILS\.?", 1),
    skip(r"NUMBER OF TLS GROUPS :.+", 1),
    cap_new(r"TLS GROUP :\s*(\d+)", 1, "pdbx_refine_tls", &["id"]),
    cap_new(r"(?:SELECTION|SET) *:\s+(.+?)", 1, "pdbx_refine_tls_group", &["selection_details"]),
    cap(r"ORIGIN FOR THE GROUP \(A\):\s+(.+?)\s+(.+?)\s+(.+?)", 1, "pdbx_refine_tls", &["origin_x", "origin_y", "origin_z"]),
    skip(r"T TENSOR", 1),
    cap(r"T11:\s+(.+?) T22:\s+(.+?)", 1, "pdbx_refine_tls", &["T[1][1]", "T[2][2]"]),
    cap(r"T33:\s+(.+?) T12:\s+(.+?)", 1, "pdbx_refine_tls", &["T[3][3]", "T[1][2]"]),
    cap(r"T13:\s+(.+?) T23:\s+(.+?)", 1, "pdbx_refine_tls", &["T[1][3]", "T[2][3]"]),
    skip(r"L TENSOR", 1),
    cap(r"L11:\s+(.+?) L22:\s+(.+?)", 1, "pdbx_refine_tls", &["L[1][1]", "L[2][2]"]),
    cap(r"L33:\s+(.+?) L12:\s+(.+?)", 1, "pdbx_refine_tls", &["L[3][3]", "L[1][2]"]),
    cap(r"L13:\s+(.+?) L23:\s+(.+?)", 1, "pdbx_refine_tls", &["L[1][3]", "L[2][3]"]),
    skip(r"S TENSOR", 1),
    cap(r"S11:\s+(.+?) S12:\s+(.+?) S13:\s+(.+?)", 1, "pdbx_refine_tls", &["S[1][1]", "S[1][2]", "S[1][3]"]),
    cap(r"S21:\s+(.+?) S22:\s+(.+?) S23:\s+(.+?)", 1, "pdbx_refine_tls", &["S[2][1]", "S[2][2]", "S[2][3]"]),
    cap(r"S31:\s+(.+?) S32:\s+(.+?) S33:\s+(.+?)", 84 - 98, "pdbx_refine_tls", &["S[3][1]", "S[3][2]", "S[3][3]"]),
];

static CNS_TEMPLATE: [TemplateLine; 81] = [
    cap(r"REFINEMENT TARGET\s*:\s*(.+)", 1, "refine", &["pdbx_stereochemistry_target_values"]),
    skip(r"DATA USED IN REFINEMENT\.", 1),
    cap(r"RESOLUTION RANGE HIGH \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_high"]),
    cap(r"RESOLUTION RANGE LOW \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_low"]),
    cap(r"DATA CUTOFF \(SIGMA\(F\)\)\s*:\s*(.+)", 1, "refine", &["pdbx_ls_sigma_F"]),
    cap(r"DATA CUTOFF HIGH \(ABS\(F\)\)\s*:\s*(.+)", 1, "refine", &["pdbx_data_cutoff_high_absF"]),
    cap(r"DATA CUTOFF LOW \(ABS\(F\)\)\s*:\s*(.+)", 1, "refine", &["pdbx_data_cutoff_low_absF"]),
    cap(r"COMPLETENESS \(WORKING\+TEST\) \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_obs"]),
    cap(r"NUMBER OF REFLECTIONS\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_obs"]),
    skip(r"FIT TO DATA USED IN REFINEMENT\.", 1),
    cap(r"CROSS-VALIDATION METHOD\s*:\s*(.+)", 1, "refine", &["pdbx_ls_cross_valid_method"]),
    cap(r"FREE R VALUE TEST SET SELECTION\s*:\s*(.+)", 1, "refine", &["pdbx_R_Free_selection_details"]),
    cap(r"R VALUE \(WORKING \+ TEST SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_obs"]),
    cap(r"R VALUE \(WORKING SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_work"]),
    cap(r"FREE R VALUE\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_free"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_R_free"]),
    cap(r"FREE R VALUE TEST SET COUNT\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_R_free"]),
    cap(r"ESTIMATED ERROR OF FREE R VALUE\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_free_error"]),
    skip(r"FIT/AGREEMENT OF MODEL WITH ALL DATA\.", 1),
    cap(r"R VALUE \(WORKING \+ TEST SET, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["R_factor_all_no_cutoff"]),
    cap(r"R VALUE \(WORKING SET, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["R_factor_obs_no_cutoff"]),
    cap(r"FREE R VALUE \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_factor_no_cutoff"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_size_perc_no_cutoff"]),
    cap(r"FREE R VALUE TEST SET COUNT \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_ct_no_cutoff"]),
    cap(r"ESTIMATED ERROR OF FREE R VALUE \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_error_no_cutoff"]),
    cap(r"TOTAL NUMBER OF REFLECTIONS \(NO CUTOFF\)\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_all"]),
    skip(r"FIT IN THE HIGHEST RESOLUTION BIN\.", 1),
    cap(r"TOTAL NUMBER OF BINS USED\s*:\s*(.+)", 1, "refine_ls_shell", &["pdbx_total_number_of_bins_used"]),
    cap(r"BIN RESOLUTION RANGE HIGH \(A\)\s*:\s*(.+)", 1, "refine_ls_shell", &["d_res_high"]),
    cap(r"BIN RESOLUTION RANGE LOW \(A\)\s*:\s*(.+)", 1, "refine_ls_shell", &["d_res_low"]),
    cap(r"BIN COMPLETENESS \(WORKING\+TEST\) \(%\)\s*:\s*(.+)", 1, "refine_ls_shell", &["percent_reflns_obs"]),
    cap(r"REFLECTIONS IN BIN \(WORKING SET\)\s*:\s*(.+)", 1, "refine_ls_shell", &["number_reflns_R_work"]),
    cap(r"BIN R VALUE \(WORKING SET\)\s*:\s*(.+)", 1, "refine_ls_shell", &["R_factor_R_work"]),
    cap(r"BIN FREE R VALUE\s*:\s*(.+)", 1, "refine_ls_shell", &["R_factor_R_free"]),
    cap(r"BIN FREE R VALUE TEST SET SIZE \(%\)\s*:\s*(.+)", 1, "refine_ls_shell", &["percent_reflns_R_free"]),
    cap(r"BIN FREE R VALUE TEST SET COUNT\s*:\s*(.+)", 1, "refine_ls_shell", &["number_reflns_R_free"]),
    cap(r"ESTIMATED ERROR OF BIN FREE R VALUE\s*:\s*(.+)", 1, "refine_ls_shell", &["R_factor_R_free_error"]),
    skip(r"NUMBER OF NON-HYDROGEN ATOMS USED IN REFINEMENT\.", 1),
    cap(r"PROTEIN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_protein"]),
    cap(r"NUCLEIC ACID ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_nucleic_acid"]),
    cap(r"HETEROGEN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_ligand"]),
    cap(r"SOLVENT ATOMS\s*:\s*(.+)", 1, "refine_hist", &["number_atoms_solvent"]),
    skip(r"B VALUES\.", 1),
    cap(r"B VALUE TYPE\s*:\s*(.+)", 1, "refine", &["pdbx_TLS_residual_ADP_flag"]),
    cap(r"FROM WILSON PLOT \(A\*\*2\)\s*:\s*(.+)", 1, "reflns", &["B_iso_Wilson_estimate"]),
    cap(r"MEAN B VALUE \(OVERALL, A\*\*2\)\s*:\s*(.+)", 1, "refine", &["B_iso_mean"]),
    skip(r"OVERALL ANISOTROPIC B VALUE\.", 1),
    cap(r"B11 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][1]"]),
    cap(r"B22 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][2]"]),
    cap(r"B33 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[3][3]"]),
    cap(r"B12 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][2]"]),
    cap(r"B13 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][3]"]),
    cap(r"B23 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][3]"]),
    skip(r"ESTIMATED COORDINATE ERROR\.", 1),
    cap(r"ESD FROM LUZZATI PLOT \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_coordinate_error_obs"]),
    cap(r"ESD FROM SIGMAA \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_sigma_a_obs"]),
    cap(r"LOW RESOLUTION CUTOFF \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_d_res_low_obs"]),
    skip(r"CROSS-VALIDATED ESTIMATED COORDINATE ERROR\.", 1),
    cap(r"ESD FROM C-V LUZZATI PLOT \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_coordinate_error_free"]),
    cap(r"ESD FROM C-V SIGMAA \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_sigma_a_free"]),
    skip(r"RMS DEVIATIONS FROM IDEAL VALUES\.", 1),
    restr(r"BOND LENGTHS \(A\)\s*:\s*(.+)", 1, &["dev_ideal"], "c_bond_d"),
    restr(r"BOND ANGLES \(DEGREES\)\s*:\s*(.+)", 1, &["dev_ideal"], "c_angle_deg"),
    restr(r"DIHEDRAL ANGLES \(DEGREES\)\s*:\s*(.+)", 1, &["dev_ideal"], "c_dihedral_angle_d"),
    restr(r"IMPROPER ANGLES \(DEGREES\)\s*:\s*(.+)", 1, &["dev_ideal"], "c_improper_angle_d"),
    cap(r"ISOTROPIC THERMAL MODEL\s*:\s*(.+)", 1, "refine", &["pdbx_isotropic_thermal_model"]),
    skip(r"ISOTROPIC THERMAL FACTOR RESTRAINTS\. RMS SIGMA", 1),
    restr(r"MAIN-CHAIN BOND \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "c_mcbond_it"),
    restr(r"MAIN-CHAIN ANGLE \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "c_mcangle_it"),
    restr(r"SIDE-CHAIN BOND \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "c_scbond_it"),
    restr(r"SIDE-CHAIN ANGLE \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "c_scangle_it"),
    skip(r"BULK SOLVENT MODELING\.", 1),
    cap(r"METHOD USED\s*:\s*(.+)", 1, "refine", &["solvent_model_details"]),
    cap(r"KSOL\s*:\s*(.+)", 1, "refine", &["solvent_model_param_ksol"]),
    cap(r"BSOL\s*:\s*(.+)", 1, "refine", &["solvent_model_param_bsol"]),
    skip(r"NCS MODEL\s*:\s*(.+)", 1),
    skip(r"NCS RESTRAINTS\. RMS SIGMA/WEIGHT", 1),
    skip(r"GROUP (\d+) POSITIONAL \(A\)\s*:\s*(.+)", 1),
    skip(r"GROUP (\d+) B-FACTOR \(A\*\*2\)\s*:\s*(.+)", 1),
    skip(r"PARAMETER FILE (\d+) :\s+(.+)", 1),
    skip(r"TOPOLOGY FILE (\d+) :\s+(.+)", 1),
];

static PHENIX_TEMPLATE: [TemplateLine; 71] = [
    cap(r"REFINEMENT TARGET\s*:\s*(.+)", 1, "refine", &["pdbx_stereochemistry_target_values"]),
    skip(r"DATA USED IN REFINEMENT\.", 1),
    cap(r"RESOLUTION RANGE HIGH \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_high"]),
    cap(r"RESOLUTION RANGE LOW \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_low"]),
    cap(r"MIN\(FOBS/SIGMA_FOBS\)\s*:\s*(.+)", 1, "refine", &["pdbx_ls_sigma_F"]),
    cap(r"COMPLETENESS FOR RANGE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_obs"]),
    cap(r"NUMBER OF REFLECTIONS\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_obs"]),
    skip(r"FIT TO DATA USED IN REFINEMENT\.", 1),
    cap(r"R VALUE \(WORKING \+ TEST SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_obs"]),
    cap(r"R VALUE \(WORKING SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_work"]),
    cap(r"FREE R VALUE\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_free"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_R_free"]),
    cap(r"FREE R VALUE TEST SET COUNT\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_R_free"]),
    skip(r"FIT TO DATA USED IN REFINEMENT \(IN BINS\)\.", 1),
    skip(r"BIN RESOLUTION RANGE COMPL\. NWORK NFREE RWORK RFREE", 1),
    cap_new(r"\d+ (\d+(?:\.\d+)?) - (\d+(?:\.\d+)?) (\d+(?:\.\d+)?) (\d+) (\d+) (\d+(?:\.\d+)?) (\d+(?:\.\d+)?)", 0, "refine_ls_shell", &["d_res_low", "d_res_high", "percent_reflns_obs", "number_reflns_R_work", "number_reflns_R_free", "R_factor_R_work", "R_factor_R_free"]),
    skip(r"BULK SOLVENT MODELLING\.", 1),
    cap(r"METHOD USED\s*:\s*(.+)", 1, "refine", &["solvent_model_details"]),
    cap(r"SOLVENT RADIUS\s*:\s*(.+)", 1, "refine", &["pdbx_solvent_vdw_probe_radii"]),
    cap(r"SHRINKAGE RADIUS\s*:\s*(.+)", 1, "refine", &["pdbx_solvent_shrinkage_radii"]),
    cap(r"K_SOL\s*:\s*(.+)", 1, "refine", &["solvent_model_param_ksol"]),
    cap(r"B_SOL\s*:\s*(.+)", 1, "refine", &["solvent_model_param_bsol"]),
    skip(r"ERROR ESTIMATES\.", 1),
    cap(r"COORDINATE ERROR \(MAXIMUM-LIKELIHOOD BASED\)\s*:\s*(.+)", 1, "refine", &["overall_SU_ML"]),
    cap(r"PHASE ERROR \(DEGREES, MAXIMUM-LIKELIHOOD BASED\)\s*:\s*(.+)", 1, "refine", &["pdbx_overall_phase_error"]),
    skip(r"B VALUES\.", 1),
    cap(r"B VALUE TYPE\s*:\s*(.+)", 1, "refine", &["pdbx_TLS_residual_ADP_flag"]),
    cap(r"FROM WILSON PLOT \(A\*\*2\)\s*:\s*(.+)", 1, "reflns", &["B_iso_Wilson_estimate"]),
    cap(r"MEAN B VALUE \(OVERALL, A\*\*2\)\s*:\s*(.+)", 1, "refine", &["B_iso_mean"]),
    skip(r"OVERALL ANISOTROPIC B VALUE\.", 1),
    cap(r"B11 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][1]"]),
    cap(r"B22 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][2]"]),
    cap(r"B33 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[3][3]"]),
    cap(r"B12 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][2]"]),
    cap(r"B13 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][3]"]),
    cap(r"B23 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][3]"]),
    skip(r"TWINNING INFORMATION\.", 1),
    cap(r"FRACTION:\s*(.+)", 1, "pdbx_reflns_twin", &["fraction"]),
    cap(r"OPERATOR:\s*(.+)", 1, "pdbx_reflns_twin", &["operator"]),
    skip(r"DEVIATIONS FROM IDEAL VALUES\.", 1),
    skip(r"RMSD COUNT", 1),
    restr(r"BOND\s*:\s*(\d+(?:\.\d+))\s+(\d+)", 1, &["dev_ideal", "number"], "f_bond_d"),
    restr(r"ANGLE\s*:\s*(\d+(?:\.\d+))\s+(\d+)", 1, &["dev_ideal", "number"], "f_angle_d"),
    restr(r"CHIRALITY\s*:\s*(\d+(?:\.\d+))\s+(\d+)", 1, &["dev_ideal", "number"], "f_chiral_restr"),
    restr(r"PLANARITY\s*:\s*(\d+(?:\.\d+))\s+(\d+)", 1, &["dev_ideal", "number"], "f_plane_restr"),
    restr(r"DIHEDRAL\s*:\s*(\d+(?:\.\d+))\s+(\d+)", 1, &["dev_ideal", "number"], "f_dihedral_angle_d"),
    skip(r"TLS DETAILS", 1),
    skip(r"NUMBER OF TLS GROUPS\s*:\s*(.+)", 1),
    cap_new(r"TLS GROUP\s*:\s*(.+)", 1, "pdbx_refine_tls", &["id"]),
    cap_new(r"SELECTION:\s*(.+)", 1, "pdbx_refine_tls_group", &["selection_details"]),
    cap(r"ORIGIN FOR THE GROUP(?:\s*\(A\))?\s*:\s*(\S+)\s+(\S+)\s+(\S+)", 1, "pdbx_refine_tls", &["origin_x", "origin_y", "origin_z"]),
    skip(r"T TENSOR", 1),
    cap(r"T11\s*:\s*(.+) T22\s*:\s*(.+)", 1, "pdbx_refine_tls", &["T[1][1]", "T[2][2]"]),
    cap(r"T33\s*:\s*(.+) T12\s*:\s*(.+)", 1, "pdbx_refine_tls", &["T[3][3]", "T[1][2]"]),
    cap(r"T13\s*:\s*(.+) T23\s*:\s*(.+)", 1, "pdbx_refine_tls", &["T[1][3]", "T[2][3]"]),
    skip(r"L TENSOR", 1),
    cap(r"L11\s*:\s*(.+) L22\s*:\s*(.+)", 1, "pdbx_refine_tls", &["L[1][1]", "L[2][2]"]),
    cap(r"L33\s*:\s*(.+) L12\s*:\s*(.+)", 1, "pdbx_refine_tls", &["L[3][3]", "L[1][2]"]),
    cap(r"L13\s*:\s*(.+) L23\s*:\s*(.+)", 1, "pdbx_refine_tls", &["L[1][3]", "L[2][3]"]),
    skip(r"S TENSOR", 1),
    cap(r"S11\s*:\s*(.+) S12\s*:\s*(.+) S13\s*:\s*(.+)", 1, "pdbx_refine_tls", &["S[1][1]", "S[1][2]", "S[1][3]"]),
    cap(r"S21\s*:\s*(.+) S22\s*:\s*(.+) S23\s*:\s*(.+)", 1, "pdbx_refine_tls", &["S[2][1]", "S[2][2]", "S[2][3]"]),
    cap(r"S31\s*:\s*(.+) S32\s*:\s*(.+) S33\s*:\s*(.+)", 48 - 62, "pdbx_refine_tls", &["S[3][1]", "S[3][2]", "S[3][3]"]),
    skip(r"ANOMALOUS SCATTERER GROUPS DETAILS\.", 1),
    skip(r"NUMBER OF ANOMALOUS SCATTERER GROUPS\s*:\s*\d+", 1),
    skip(r"ANOMALOUS SCATTERER GROUP\s*:\s*\d+", 1),
    skip(r"SELECTION: .+", 1),
    skip(r"fp\s*:\s*.+", 1),
    skip(r"fdp\s*:\s*.+", 63 - 68),
    skip(r"NCS DETAILS", 1),
    skip(r"NUMBER OF NCS GROUPS\s*:\s*(.+)", 1),
];

static NUCLSQ_TEMPLATE: [TemplateLine; 56] = [
    skip(r"DATA USED IN REFINEMENT\.", 1),
    cap(r"RESOLUTION RANGE HIGH \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_high"]),
    cap(r"RESOLUTION RANGE LOW \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_low"]),
    cap(r"DATA CUTOFF \(SIGMA\(F\)\)\s*:\s*(.+)", 1, "refine", &["pdbx_ls_sigma_F"]),
    cap(r"COMPLETENESS FOR RANGE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_obs"]),
    cap(r"NUMBER OF REFLECTIONS\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_obs"]),
    skip(r"FIT TO DATA USED IN REFINEMENT\.", 1),
    cap(r"CROSS-VALIDATION METHOD\s*:\s*(.+)", 1, "refine", &["pdbx_ls_cross_valid_method"]),
    cap(r"FREE R VALUE TEST SET SELECTION\s*:\s*(.+)", 1, "refine", &["pdbx_R_Free_selection_details"]),
    cap(r"R VALUE \(WORKING \+ TEST SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_obs"]),
    cap(r"R VALUE \(WORKING SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_work"]),
    cap(r"FREE R VALUE\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_free"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_R_free"]),
    cap(r"FREE R VALUE TEST SET COUNT\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_R_free"]),
    skip(r"FIT/AGREEMENT OF MODEL WITH ALL DATA\.", 1),
    cap(r"R VALUE \(WORKING \+ TEST SET, NO CUTOFF\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_all"]),
    cap(r"R VALUE \(WORKING SET, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["R_factor_obs_no_cutoff"]),
    cap(r"FREE R VALUE \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_factor_no_cutoff"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_size_perc_no_cutoff"]),
    cap(r"FREE R VALUE TEST SET COUNT \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_ct_no_cutoff"]),
    cap(r"TOTAL NUMBER OF REFLECTIONS \(NO CUTOFF\)\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_all"]),
    skip(r"NUMBER OF NON-HYDROGEN ATOMS USED IN REFINEMENT\.", 1),
    cap(r"PROTEIN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_protein"]),
    cap(r"NUCLEIC ACID ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_nucleic_acid"]),
    cap(r"HETEROGEN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_ligand"]),
    cap(r"SOLVENT ATOMS\s*:\s*(.+)", 1, "refine_hist", &["number_atoms_solvent"]),
    skip(r"B VALUES\.", 1),
    cap(r"B VALUE TYPE\s*:\s*(.+)", 1, "refine", &["pdbx_TLS_residual_ADP_flag"]),
    cap(r"FROM WILSON PLOT \(A\*\*2\)\s*:\s*(.+)", 1, "reflns", &["B_iso_Wilson_estimate"]),
    cap(r"MEAN B VALUE \(OVERALL, A\*\*2\)\s*:\s*(.+)", 1, "refine", &["B_iso_mean"]),
    skip(r"OVERALL ANISOTROPIC B VALUE\.", 1),
    cap(r"B11 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][1]"]),
    cap(r"B22 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][2]"]),
    cap(r"B33 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[3][3]"]),
    cap(r"B12 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][2]"]),
    cap(r"B13 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][3]"]),
    cap(r"B23 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][3]"]),
    skip(r"ESTIMATED COORDINATE ERROR\.", 1),
    cap(r"ESD FROM LUZZATI PLOT \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_coordinate_error_obs"]),
    cap(r"ESD FROM SIGMAA \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_sigma_a_obs"]),
    cap(r"LOW RESOLUTION CUTOFF \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_d_res_low_obs"]),
    skip(r"RMS DEVIATIONS FROM IDEAL VALUES\.", 1),
    skip(r"DISTANCE RESTRAINTS\. RMS SIGMA", 1),
    restr(r"SUGAR-BASE BOND DISTANCE \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_sugar_bond_d"),
    restr(r"SUGAR-BASE BOND ANGLE DISTANCE \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_sugar_bond_angle_d"),
    restr(r"PHOSPHATE BONDS DISTANCE \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_phos_bond_d"),
    restr(r"PHOSPHATE BOND ANGLE, H-BOND \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_phos_bond_angle_d"),
    restr(r"PLANE RESTRAINT \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_plane_restr"),
    restr(r"CHIRAL-CENTER RESTRAINT \(A\*\*3\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_chiral_restr"),
    skip(r"NON-BONDED CONTACT RESTRAINTS\.", 1),
    restr(r"SINGLE TORSION \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_singtor_nbd"),
    restr(r"MULTIPLE TORSION \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_multtor_nbd"),
    skip(r"ISOTROPIC THERMAL FACTOR RESTRAINTS\. RMS SIGMA", 1),
    restr(r"SUGAR-BASE BONDS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_sugar_bond_it"),
    restr(r"SUGAR-BASE ANGLES \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_sugar_angle_it"),
    restr(r"PHOSPHATE BONDS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "n_phos_bond_it"),
];

static PROLSQ_TEMPLATE: [TemplateLine; 64] = [
    skip(r"DATA USED IN REFINEMENT\.", 1),
    cap(r"RESOLUTION RANGE HIGH \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_high"]),
    cap(r"RESOLUTION RANGE LOW \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_low"]),
    cap(r"DATA CUTOFF \(SIGMA\(F\)\)\s*:\s*(.+)", 1, "refine", &["pdbx_ls_sigma_F"]),
    cap(r"COMPLETENESS FOR RANGE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_obs"]),
    cap(r"NUMBER OF REFLECTIONS\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_obs"]),
    skip(r"FIT TO DATA USED IN REFINEMENT\.", 1),
    cap(r"CROSS-VALIDATION METHOD\s*:\s*(.+)", 1, "refine", &["pdbx_ls_cross_valid_method"]),
    cap(r"FREE R VALUE TEST SET SELECTION\s*:\s*(.+)", 1, "refine", &["pdbx_R_Free_selection_details"]),
    cap(r"R VALUE \(WORKING \+ TEST SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_obs"]),
    cap(r"R VALUE \(WORKING SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_work"]),
    cap(r"FREE R VALUE\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_free"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_R_free"]),
    cap(r"FREE R VALUE TEST SET COUNT\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_R_free"]),
    skip(r"FIT/AGREEMENT OF MODEL WITH ALL DATA\.", 1),
    cap(r"R VALUE \(WORKING \+ TEST SET, NO CUTOFF\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_all"]),
    cap(r"R VALUE \(WORKING SET, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["R_factor_obs_no_cutoff"]),
    cap(r"FREE R VALUE \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_factor_no_cutoff"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_size_perc_no_cutoff"]),
    cap(r"FREE R VALUE TEST SET COUNT \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_ct_no_cutoff"]),
    cap(r"TOTAL NUMBER OF REFLECTIONS \(NO CUTOFF\)\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_all"]),
    skip(r"NUMBER OF NON-HYDROGEN ATOMS USED IN REFINEMENT\.", 1),
    cap(r"PROTEIN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_protein"]),
    cap(r"NUCLEIC ACID ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_nucleic_acid"]),
    cap(r"HETEROGEN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_ligand"]),
    cap(r"SOLVENT ATOMS\s*:\s*(.+)", 1, "refine_hist", &["number_atoms_solvent"]),
    skip(r"B VALUES\.", 1),
    cap(r"B VALUE TYPE\s*:\s*(.+)", 1, "refine", &["pdbx_TLS_residual_ADP_flag"]),
    cap(r"FROM WILSON PLOT \(A\*\*2\)\s*:\s*(.+)", 1, "reflns", &["B_iso_Wilson_estimate"]),
    cap(r"MEAN B VALUE \(OVERALL, A\*\*2\)\s*:\s*(.+)", 1, "refine", &["B_iso_mean"]),
    skip(r"OVERALL ANISOTROPIC B VALUE\.", 1),
    cap(r"B11 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][1]"]),
    cap(r"B22 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][2]"]),
    cap(r"B33 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[3][3]"]),
    cap(r"B12 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][2]"]),
    cap(r"B13 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][3]"]),
    cap(r"B23 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][3]"]),
    skip(r"ESTIMATED COORDINATE ERROR\.", 1),
    cap(r"ESD FROM LUZZATI PLOT \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_coordinate_error_obs"]),
    cap(r"ESD FROM SIGMAA \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_sigma_a_obs"]),
    cap(r"LOW RESOLUTION CUTOFF \(A\)\s*:\s*(.+)", 1, "refine_analyze", &["Luzzati_d_res_low_obs"]),
    skip(r"RMS DEVIATIONS FROM IDEAL VALUES\.", 1),
    skip(r"DISTANCE RESTRAINTS\. RMS SIGMA", 1),
    restr(r"BOND LENGTH \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_bond_d"),
    restr(r"ANGLE DISTANCE \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_angle_d"),
    restr(r"INTRAPLANAR 1-4 DISTANCE \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_planar_d"),
    restr(r"H-BOND OR METAL COORDINATION \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_hb_or_metal_coord"),
    restr(r"PLANE RESTRAINT \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_plane_restr"),
    restr(r"CHIRAL-CENTER RESTRAINT \(A\*\*3\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_chiral_restr"),
    skip(r"NON-BONDED CONTACT RESTRAINTS\.", 1),
    restr(r"SINGLE TORSION \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_singtor_nbd"),
    restr(r"MULTIPLE TORSION \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_multtor_nbd"),
    restr(r"H-BOND \(X\.\.\.Y\) \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_xyhbond_nbd"),
    restr(r"H-BOND \(X-H\.\.\.Y\) \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_xhyhbond_nbd"),
    skip(r"CONFORMATIONAL TORSION ANGLE RESTRAINTS\.", 1),
    restr(r"SPECIFIED \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_special_tor"),
    restr(r"PLANAR \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_planar_tor"),
    restr(r"STAGGERED \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_staggered_tor"),
    restr(r"TRANSVERSE \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_transverse_tor"),
    skip(r"ISOTROPIC THERMAL FACTOR RESTRAINTS\. RMS SIGMA", 1),
    restr(r"MAIN-CHAIN BOND \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_mcbond_it"),
    restr(r"MAIN-CHAIN ANGLE \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_mcangle_it"),
    restr(r"SIDE-CHAIN BOND \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_scbond_it"),
    restr(r"SIDE-CHAIN ANGLE \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_scangle_it"),
];

static REFMAC_TEMPLATE: [TemplateLine; 59] = [
    skip(r"DATA USED IN REFINEMENT\.", 1),
    cap(r"RESOLUTION RANGE HIGH \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_high"]),
    cap(r"RESOLUTION RANGE LOW \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_low"]),
    cap(r"DATA CUTOFF \(SIGMA\(F\)\)\s*:\s*(.+)", 1, "refine", &["pdbx_ls_sigma_F"]),
    cap(r"COMPLETENESS FOR RANGE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_obs"]),
    cap(r"NUMBER OF REFLECTIONS\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_obs"]),
    skip(r"FIT TO DATA USED IN REFINEMENT\.", 1),
    cap(r"CROSS-VALIDATION METHOD\s*:\s*(.+)", 1, "refine", &["pdbx_ls_cross_valid_method"]),
    cap(r"FREE R VALUE TEST SET SELECTION\s*:\s*(.+)", 1, "refine", &["pdbx_R_Free_selection_details"]),
    cap(r"R VALUE \(WORKING \+ TEST SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_obs"]),
    cap(r"R VALUE \(WORKING SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_work"]),
    cap(r"FREE R VALUE\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_free"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_R_free"]),
    cap(r"FREE R VALUE TEST SET COUNT\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_R_free"]),
    skip(r"NUMBER OF NON-HYDROGEN ATOMS USED IN REFINEMENT\.", 1),
    cap(r"PROTEIN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_protein"]),
    cap(r"NUCLEIC ACID ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_nucleic_acid"]),
    cap(r"HETEROGEN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_ligand"]),
    cap(r"SOLVENT ATOMS\s*:\s*(.+)", 1, "refine_hist", &["number_atoms_solvent"]),
    skip(r"ALL ATOMS\s*:\s*(.+)", 1),
    skip(r"B VALUES\..*", 1),
    cap(r"B VALUE TYPE\s*:\s*(.+)", 1, "refine", &["pdbx_TLS_residual_ADP_flag"]),
    cap(r"FROM WILSON PLOT \(A\*\*2\)\s*:\s*(.+)", 1, "reflns", &["B_iso_Wilson_estimate"]),
    cap(r"MEAN B VALUE \(OVERALL, A\*\*2\)\s*:\s*(.+)", 1, "refine", &["B_iso_mean"]),
    skip(r"OVERALL ANISOTROPIC B VALUE\.", 1),
    cap(r"B11 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][1]"]),
    cap(r"B22 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][2]"]),
    cap(r"B33 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[3][3]"]),
    cap(r"B12 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][2]"]),
    cap(r"B13 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][3]"]),
    cap(r"B23 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][3]"]),
    skip(r"ESTIMATED OVERALL COORDINATE ERROR\.", 1),
    cap(r"ESU BASED ON R VALUE(?:\s*\(A\))?\s*:\s*(.+)", 1, "refine", &["pdbx_overall_ESU_R"]),
    cap(r"ESU BASED ON FREE R VALUE(?:\s*\(A\))?\s*:\s*(.+)", 1, "refine", &["pdbx_overall_ESU_R_Free"]),
    cap(r"ESU BASED ON MAXIMUM LIKELIHOOD(?:\s*\(A\))?\s*:\s*(.+)", 1, "refine", &["overall_SU_ML"]),
    cap(r"ESU FOR B VALUES BASED ON MAXIMUM LIKELIHOOD \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["overall_SU_B"]),
    skip(r"RMS DEVIATIONS FROM IDEAL VALUES\.", 1),
    skip(r"DISTANCE RESTRAINTS\. RMS SIGMA", 1),
    restr(r"BOND LENGTH \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_bond_d"),
    restr(r"ANGLE DISTANCE \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_angle_d"),
    restr(r"INTRAPLANAR 1-4 DISTANCE \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_planar_d"),
    restr(r"H-BOND OR METAL COORDINATION \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_hb_or_metal_coord"),
    restr(r"PLANE RESTRAINT \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_plane_restr"),
    restr(r"CHIRAL-CENTER RESTRAINT \(A\*\*3\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_chiral_restr"),
    skip(r"NON-BONDED CONTACT RESTRAINTS\.", 1),
    restr(r"SINGLE TORSION \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_singtor_nbd"),
    restr(r"MULTIPLE TORSION \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_multtor_nbd"),
    restr(r"H-BOND \(X\.\..Y\) \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_xyhbond_nbd"),
    restr(r"H-BOND \(X-H\.\.\.Y\) \(A\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_xhyhbond_nbd"),
    skip(r"CONFORMATIONAL TORSION ANGLE RESTRAINTS\.", 1),
    restr(r"SPECIFIED \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_special_tor"),
    restr(r"PLANAR \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_planar_tor"),
    restr(r"STAGGERED \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_staggered_tor"),
    restr(r"TRANSVERSE \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_transverse_tor"),
    skip(r"ISOTROPIC THERMAL FACTOR RESTRAINTS\. RMS SIGMA", 1),
    restr(r"MAIN-CHAIN BOND \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_mcbond_it"),
    restr(r"MAIN-CHAIN ANGLE \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_mcangle_it"),
    restr(r"SIDE-CHAIN BOND \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_scbond_it"),
    restr(r"SIDE-CHAIN ANGLE \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "dev_ideal_target"], "p_scangle_it"),
];

static REFMAC5_TEMPLATE: [TemplateLine; 136] = [
    cap(r"REFINEMENT TARGET\s*:\s*(.+)", 1, "refine", &["pdbx_stereochemistry_target_values"]),
    skip(r"DATA USED IN REFINEMENT\.", 1),
    cap(r"RESOLUTION RANGE HIGH \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_high"]),
    cap(r"RESOLUTION RANGE LOW \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_low"]),
    cap(r"DATA CUTOFF \(SIGMA\(F\)\)\s*:\s*(.+)", 1, "refine", &["pdbx_ls_sigma_F"]),
    cap(r"COMPLETENESS FOR RANGE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_obs"]),
    cap(r"NUMBER OF REFLECTIONS\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_obs"]),
    skip(r"FIT TO DATA USED IN REFINEMENT\.", 1),
    cap(r"CROSS-VALIDATION METHOD\s*:\s*(.+)", 1, "refine", &["pdbx_ls_cross_valid_method"]),
    cap(r"FREE R VALUE TEST SET SELECTION\s*:\s*(.+)", 1, "refine", &["pdbx_R_Free_selection_details"]),
    cap(r"R VALUE \(WORKING \+ TEST SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_obs"]),
    cap(r"R VALUE \(WORKING SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_work"]),
    cap(r"FREE R VALUE\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_free"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_R_free"]),
    cap(r"FREE R VALUE TEST SET COUNT\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_R_free"]),
    skip(r"FIT IN THE HIGHEST RESOLUTION BIN\.", 1),
    cap(r"TOTAL NUMBER OF BINS USED\s*:\s*(.+)", 1, "refine_ls_shell", &["pdbx_total_number_of_bins_used"]),
    cap(r"BIN RESOLUTION RANGE HIGH(?:\s*\(A\))?\s*:\s*(.+)", 1, "refine_ls_shell", &["d_res_high"]),
    cap(r"BIN RESOLUTION RANGE LOW(?:\s*\(A\))?\s*:\s*(.+)", 1, "refine_ls_shell", &["d_res_low"]),
    cap(r"REFLECTION IN BIN \(WORKING SET\)\s*:\s*(.+)", 1, "refine_ls_shell", &["number_reflns_R_work"]),
    cap(r"BIN COMPLETENESS \(WORKING\+TEST\) \(%\)\s*:\s*(.+)", 1, "refine_ls_shell", &["percent_reflns_obs"]),
    cap(r"BIN R VALUE \(WORKING SET\)\s*:\s*(.+)", 1, "refine_ls_shell", &["R_factor_R_work"]),
    cap(r"BIN FREE R VALUE SET COUNT\s*:\s*(.+)", 1, "refine_ls_shell", &["number_reflns_R_free"]),
    cap(r"BIN FREE R VALUE\s*:\s*(.+)", 1, "refine_ls_shell", &["R_factor_R_free"]),
    skip(r"NUMBER OF NON-HYDROGEN ATOMS USED IN REFINEMENT\.", 1),
    cap(r"PROTEIN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_protein"]),
    cap(r"NUCLEIC ACID ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_nucleic_acid"]),
    cap(r"HETEROGEN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_ligand"]),
    cap(r"SOLVENT ATOMS\s*:\s*(.+)", 1, "refine_hist", &["number_atoms_solvent"]),
    skip(r"ALL ATOMS\s*:\s*(.+)", 1),
    skip(r"B VALUES\..*", 1),
    cap(r"B VALUE TYPE\s*:\s*(.+)", 1, "refine", &["pdbx_TLS_residual_ADP_flag"]),
    cap(r"FROM WILSON PLOT \(A\*\*2\)\s*:\s*(.+)", 1, "reflns", &["B_iso_Wilson_estimate"]),
    cap(r"MEAN B VALUE \(OVERALL, A\*\*2\)\s*:\s*(.+)", 1, "refine", &["B_iso_mean"]),
    skip(r"OVERALL ANISOTROPIC B VALUE\.", 1),
    cap(r"B11 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][1]"]),
    cap(r"B22 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][2]"]),
    cap(r"B33 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[3][3]"]),
    cap(r"B12 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][2]"]),
    cap(r"B13 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[1][3]"]),
    cap(r"B23 \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["aniso_B[2][3]"]),
    skip(r"ESTIMATED OVERALL COORDINATE ERROR\.", 1),
    cap(r"ESU BASED ON R VALUE(?:\s*\(A\))?\s*:\s*(.+)", 1, "refine", &["pdbx_overall_ESU_R"]),
    cap(r"ESU BASED ON FREE R VALUE(?:\s*\(A\))?\s*:\s*(.+)", 1, "refine", &["pdbx_overall_ESU_R_Free"]),
    cap(r"ESU BASED ON MAXIMUM LIKELIHOOD(?:\s*\(A\))?\s*:\s*(.+)", 1, "refine", &["overall_SU_ML"]),
    cap(r"ESU FOR B VALUES BASED ON MAXIMUM LIKELIHOOD \(A\*\*2\)\s*:\s*(.+)", 1, "refine", &["overall_SU_B"]),
    skip(r"CORRELATION COEFFICIENTS\.", 1),
    cap(r"CORRELATION COEFFICIENT FO-FC\s*:\s*(.+)", 1, "refine", &["correlation_coeff_Fo_to_Fc"]),
    cap(r"CORRELATION COEFFICIENT FO-FC FREE\s*:\s*(.+)", 1, "refine", &["correlation_coeff_Fo_to_Fc_free"]),
    skip(r"RMS DEVIATIONS FROM IDEAL VALUES COUNT RMS WEIGHT", 1),
    restr_new(r"BOND LENGTHS REFINED ATOMS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_bond_refined_d"),
    restr_new(r"BOND LENGTHS OTHERS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_bond_other_d"),
    restr_new(r"BOND ANGLES REFINED ATOMS \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_angle_refined_deg"),
    restr_new(r"BOND ANGLES OTHERS \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_angle_other_deg"),
    restr_new(r"TORSION ANGLES, PERIOD 1 \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_dihedral_angle_1_deg"),
    restr_new(r"TORSION ANGLES, PERIOD 2 \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_dihedral_angle_2_deg"),
    restr_new(r"TORSION ANGLES, PERIOD 3 \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_dihedral_angle_3_deg"),
    restr_new(r"TORSION ANGLES, PERIOD 4 \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_dihedral_angle_4_deg"),
    restr_new(r"CHIRAL-CENTER RESTRAINTS \(A\*\*3\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_chiral_restr"),
    restr_new(r"GENERAL PLANES REFINED ATOMS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_gen_planes_refined"),
    restr_new(r"GENERAL PLANES OTHERS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_gen_planes_other"),
    restr_new(r"NON-BONDED CONTACTS REFINED ATOMS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_nbd_refined"),
    restr_new(r"NON-BONDED CONTACTS OTHERS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_nbd_other"),
    restr_new(r"NON-BONDED TORSION REFINED ATOMS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_nbtor_refined"),
    restr_new(r"NON-BONDED TORSION OTHERS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_nbtor_other"),
    restr_new(r"H-BOND \(X\.\.\.Y\) REFINED ATOMS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_xyhbond_nbd_refined"),
    restr_new(r"H-BOND \(X\.\.\.Y\) OTHERS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_xyhbond_nbd_other"),
    restr_new(r"POTENTIAL METAL-ION REFINED ATOMS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_metal_ion_refined"),
    restr_new(r"POTENTIAL METAL-ION OTHERS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_metal_ion_other"),
    restr_new(r"SYMMETRY VDW REFINED ATOMS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_symmetry_vdw_refined"),
    restr_new(r"SYMMETRY VDW OTHERS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_symmetry_vdw_other"),
    restr_new(r"SYMMETRY H-BOND REFINED ATOMS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_symmetry_hbond_refined"),
    restr_new(r"SYMMETRY H-BOND OTHERS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_symmetry_hbond_other"),
    restr_new(r"SYMMETRY METAL-ION REFINED ATOMS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_symmetry_metal_ion_refined"),
    restr_new(r"SYMMETRY METAL-ION OTHERS(?:\s*\(A\))?\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_symmetry_metal_ion_other"),
    skip(r"ISOTROPIC THERMAL FACTOR RESTRAINTS\. COUNT RMS WEIGHT", 1),
    restr_new(r"MAIN-CHAIN BOND REFINED ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_mcbond_it"),
    restr_new(r"MAIN-CHAIN BOND OTHER ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_mcbond_other"),
    restr_new(r"MAIN-CHAIN ANGLE REFINED ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_mcangle_it"),
    restr_new(r"MAIN-CHAIN ANGLE OTHER ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_mcangle_other"),
    restr_new(r"SIDE-CHAIN BOND REFINED ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_scbond_it"),
    restr_new(r"SIDE-CHAIN BOND OTHER ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_scbond_other"),
    restr_new(r"SIDE-CHAIN ANGLE REFINED ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_scangle_it"),
    restr_new(r"SIDE-CHAIN ANGLE OTHER ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_scangle_other"),
    restr_new(r"LONG RANGE B REFINED ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_long_range_B_refined"),
    restr_new(r"LONG RANGE B OTHER ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_long_range_B_other"),
    skip(r"ANISOTROPIC THERMAL FACTOR RESTRAINTS\. COUNT RMS WEIGHT", 1),
    restr_new(r"RIGID-BOND RESTRAINTS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_rigid_bond_restr"),
    restr_new(r"SPHERICITY; FREE ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_sphericity_free"),
    restr_new(r"SPHERICITY; BONDED ATOMS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["number", "dev_ideal", "dev_ideal_target"], "r_sphericity_bonded"),
    skip(r"NCS RESTRAINTS STATISTICS", 1),
    skip(r"NUMBER OF DIFFERENT NCS GROUPS\s*:\s*(.+)", 1),
    skip(r"NCS GROUP NUMBER\s*:\s*(\d+)", 1),
    skip(r"CHAIN NAMES\s*:\s*(.+)", 1),
    skip(r"NUMBER OF COMPONENTS NCS GROUP\s*:\s*(\d+)", 1),
    skip(r"COMPONENT C SSSEQI TO C SSSEQI CODE", 1),
    skip(r"(\d+)\s+(.)\s+(\d+)(.)\s+(.)\s+(\d+)(.)\s+(.+)", 0),
    skip(r"(\d+)\s+(.)\s+(\d+)\s+(.)\s+(\d+)\s+(.+)", 0),
    skip(r"GROUP CHAIN COUNT RMS WEIGHT", 1),
    skip(r"TIGHT POSITIONAL\s+\d+\s+(.)\s+\(A\):\s+(\d+)\s*;\s*(\d+(?:\.\d*)?)\s*;\s*(\d+(?:\.\d*)?)", 0),
    skip(r"MEDIUM POSITIONAL\s+\d+\s+(.)\s+\(A\):\s+(\d+)\s*;\s*(\d+(?:\.\d*)?)\s*;\s*(\d+(?:\.\d*)?)", 0),
    skip(r"LOOSE POSITIONAL\s+\d+\s+(.)\s+\(A\):\s+(\d+)\s*;\s*(\d+(?:\.\d*)?)\s*;\s*(\d+(?:\.\d*)?)", 0),
    skip(r"TIGHT THERMAL\s+\d+\s+(.)\s+\(A\*\*2\):\s+(\d+)\s*;\s*(\d+(?:\.\d*)?)\s*;\s*(\d+(?:\.\d*)?)", 0),
    skip(r"MEDIUM THERMAL\s+\d+\s+(.)\s+\(A\*\*2\):\s+(\d+)\s*;\s*(\d+(?:\.\d*)?)\s*;\s*(\d+(?:\.\d*)?)", 0),
    skip(r"LOOSE THERMAL\s+\d+\s+(.)\s+\(A\*\*2\):\s+(\d+)\s*;\s*(\d+(?:\.\d*)?)\s*;\s*(\d+(?:\.\d*)?)", 0),
    skip(r"NCS GROUP NUMBER\s*:\s*(\d+)", 93 - 105),
    skip(r"TWIN DETAILS", 1),
    skip(r"NUMBER OF TWIN DOMAINS\s*:\s*(\d*)", 1),
    cap_new(r"TWIN DOMAIN\s*:\s*(.+)", 1, "pdbx_reflns_twin", &["domain_id"]),
    cap(r"TWIN OPERATOR\s*:\s*(.+)", 1, "pdbx_reflns_twin", &["operator"]),
    cap(r"TWIN FRACTION\s*:\s*(.+)", 108 - 110, "pdbx_reflns_twin", &["fraction"]),
    skip(r"TLS DETAILS", 1),
    skip(r"NUMBER OF TLS GROUPS\s*:\s*(.+)", 1),
    cap_new(r"TLS GROUP\s*:\s*(.+)", 1, "pdbx_refine_tls", &["id"]),
    skip(r"NUMBER OF COMPONENTS GROUP\s*:\s*(.+)", 1),
    skip(r"COMPONENTS C SSSEQI TO C SSSEQI", 1),
    cap_new(r"RESIDUE RANGE\s*:\s+(\S+)\s+(\d*\S)\s+(\S+)\s+(\d*\S)", 0, "pdbx_refine_tls_group", &["beg_auth_asym_id", "beg_auth_seq_id", "end_auth_asym_id", "end_auth_seq_id"]),
    cap(r"ORIGIN FOR THE GROUP(?:\s*\(A\))?\s*:\s*([-+]?\d+(?:\.\d+)?)\s*([-+]?\d+(?:\.\d+)?)\s*([-+]?\d+(?:\.\d+)?)", 1, "pdbx_refine_tls", &["origin_x", "origin_y", "origin_z"]),
    skip(r"T TENSOR", 1),
    cap(r"T11\s*:\s*(.+) T22\s*:\s*(.+)", 1, "pdbx_refine_tls", &["T[1][1]", "T[2][2]"]),
    cap(r"T33\s*:\s*(.+) T12\s*:\s*(.+)", 1, "pdbx_refine_tls", &["T[3][3]", "T[1][2]"]),
    cap(r"T13\s*:\s*(.+) T23\s*:\s*(.+)", 1, "pdbx_refine_tls", &["T[1][3]", "T[2][3]"]),
    skip(r"L TENSOR", 1),
    cap(r"L11\s*:\s*(.+) L22\s*:\s*(.+)", 1, "pdbx_refine_tls", &["L[1][1]", "L[2][2]"]),
    cap(r"L33\s*:\s*(.+) L12\s*:\s*(.+)", 1, "pdbx_refine_tls", &["L[3][3]", "L[1][2]"]),
    cap(r"L13\s*:\s*(.+) L23\s*:\s*(.+)", 1, "pdbx_refine_tls", &["L[1][3]", "L[2][3]"]),
    skip(r"S TENSOR", 1),
    cap(r"S11\s*:\s*(.+) S12\s*:\s*(.+) S13\s*:\s*(.+)", 1, "pdbx_refine_tls", &["S[1][1]", "S[1][2]", "S[1][3]"]),
    cap(r"S21\s*:\s*(.+) S22\s*:\s*(.+) S23\s*:\s*(.+)", 1, "pdbx_refine_tls", &["S[2][1]", "S[2][2]", "S[2][3]"]),
    cap(r"S31\s*:\s*(.+) S32\s*:\s*(.+) S33\s*:\s*(.+)", 113 - 129, "pdbx_refine_tls", &["S[3][1]", "S[3][2]", "S[3][3]"]),
    skip(r"BULK SOLVENT MODELLING\.", 1),
    cap(r"METHOD USED\s*:\s*(.+)", 1, "refine", &["solvent_model_details"]),
    skip(r"PARAMETERS FOR MASK CALCULATION", 1),
    cap(r"VDW PROBE RADIUS\s*:\s*(.+)", 1, "refine", &["pdbx_solvent_vdw_probe_radii"]),
    cap(r"ION PROBE RADIUS\s*:\s*(.+)", 1, "refine", &["pdbx_solvent_ion_probe_radii"]),
    cap(r"SHRINKAGE RADIUS\s*:\s*(.+)", 1, "refine", &["pdbx_solvent_shrinkage_radii"]),
];

static SHELXL_TEMPLATE: [TemplateLine; 47] = [
    skip(r"DATA USED IN REFINEMENT\.", 1),
    cap(r"RESOLUTION RANGE HIGH \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_high"]),
    cap(r"RESOLUTION RANGE LOW \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_low"]),
    cap(r"DATA CUTOFF \(SIGMA\(F\)\)\s*:\s*(.+)", 1, "refine", &["pdbx_ls_sigma_F"]),
    cap(r"COMPLETENESS FOR RANGE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_obs"]),
    cap(r"CROSS-VALIDATION METHOD\s*:\s*(.+)", 1, "refine", &["pdbx_ls_cross_valid_method"]),
    cap(r"FREE R VALUE TEST SET SELECTION\s*:\s*(.+)", 1, "refine", &["pdbx_R_Free_selection_details"]),
    skip(r"FIT TO DATA USED IN REFINEMENT \(NO CUTOFF\)\.", 1),
    cap(r"R VALUE \(WORKING \+ TEST SET, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["R_factor_all_no_cutoff"]),
    cap(r"R VALUE \(WORKING SET, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["R_factor_obs_no_cutoff"]),
    cap(r"FREE R VALUE \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_factor_no_cutoff"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_size_perc_no_cutoff"]),
    cap(r"FREE R VALUE TEST SET COUNT \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_ct_no_cutoff"]),
    cap(r"TOTAL NUMBER OF REFLECTIONS \(NO CUTOFF\)\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_all"]),
    skip(r"FIT/AGREEMENT OF MODEL FOR DATA WITH F>4SIG\(F\)\.", 1),
    cap(r"R VALUE \(WORKING \+ TEST SET, F>4SIG\(F\)\)\s*:\s*(.+)", 1, "pdbx_refine", &["R_factor_all_4sig_cutoff"]),
    cap(r"R VALUE \(WORKING SET, F>4SIG\(F\)\)\s*:\s*(.+)", 1, "pdbx_refine", &["R_factor_obs_4sig_cutoff"]),
    cap(r"FREE R VALUE \(F>4SIG\(F\)\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_factor_4sig_cutoff"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%, F>4SIG\(F\)\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_size_perc_4sig_cutoff"]),
    cap(r"FREE R VALUE TEST SET COUNT \(F>4SIG\(F\)\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_ct_4sig_cutoff"]),
    cap(r"TOTAL NUMBER OF REFLECTIONS \(F>4SIG\(F\)\)\s*:\s*(.+)", 1, "pdbx_refine", &["number_reflns_obs_4sig_cutoff"]),
    skip(r"NUMBER OF NON-HYDROGEN ATOMS USED IN REFINEMENT\.", 1),
    cap(r"PROTEIN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_protein"]),
    cap(r"NUCLEIC ACID ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_nucleic_acid"]),
    cap(r"HETEROGEN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_ligand"]),
    cap(r"SOLVENT ATOMS\s*:\s*(.+)", 1, "refine_hist", &["number_atoms_solvent"]),
    skip(r"MODEL REFINEMENT\.", 1),
    cap(r"OCCUPANCY SUM OF NON-HYDROGEN ATOMS\s*:\s*(.+)", 1, "refine_analyze", &["occupancy_sum_non_hydrogen"]),
    cap(r"OCCUPANCY SUM OF HYDROGEN ATOMS\s*:\s*(.+)", 1, "refine_analyze", &["occupancy_sum_hydrogen"]),
    cap(r"NUMBER OF DISCRETELY DISORDERED RESIDUES\s*:\s*(.+)", 1, "refine_analyze", &["number_disordered_residues"]),
    cap(r"NUMBER OF LEAST-SQUARES PARAMETERS\s*:\s*(.+)", 1, "refine", &["ls_number_parameters"]),
    cap(r"NUMBER OF RESTRAINTS\s*:\s*(.+)", 1, "refine", &["ls_number_restraints"]),
    skip(r"RMS DEVIATIONS FROM RESTRAINT TARGET VALUES\.", 1),
    restr(r"BOND LENGTHS \(A\)\s*:\s*(.+)", 1, &["dev_ideal"], "s_bond_d"),
    restr(r"ANGLE DISTANCES \(A\)\s*:\s*(.+)", 1, &["dev_ideal"], "s_angle_d"),
    restr(r"SIMILAR DISTANCES \(NO TARGET VALUES\) \(A\)\s*:\s*(.+)", 1, &["dev_ideal"], "s_similar_dist"),
    restr(r"DISTANCES FROM RESTRAINT PLANES \(A\)\s*:\s*(.+)", 1, &["dev_ideal"], "s_from_restr_planes"),
    restr(r"ZERO CHIRAL VOLUMES \(A\*\*3\)\s*:\s*(.+)", 1, &["dev_ideal"], "s_zero_chiral_vol"),
    restr(r"NON-ZERO CHIRAL VOLUMES \(A\*\*3\)\s*:\s*(.+)", 1, &["dev_ideal"], "s_non_zero_chiral_vol"),
    restr(r"ANTI-BUMPING DISTANCE RESTRAINTS \(A\)\s*:\s*(.+)", 1, &["dev_ideal"], "s_anti_bump_dis_restr"),
    restr(r"RIGID-BOND ADP COMPONENTS \(A\*\*2\)\s*:\s*(.+)", 1, &["dev_ideal"], "s_rigid_bond_adp_cmpnt"),
    restr(r"SIMILAR ADP COMPONENTS \(A\*\*2\)\s*:\s*(.+)", 1, &["dev_ideal"], "s_similar_adp_cmpnt"),
    restr(r"APPROXIMATELY ISOTROPIC ADPS \(A\*\*2\)\s*:\s*(.+)", 1, &["dev_ideal"], "s_approx_iso_adps"),
    skip(r"BULK SOLVENT MODELING\.", 1),
    cap(r"METHOD USED\s*:\s*(.+)", 1, "refine", &["solvent_model_details"]),
    cap(r"STEREOCHEMISTRY TARGET VALUES\s*:\s*(.+)", 1, "refine", &["pdbx_stereochemistry_target_values"]),
    cap(r"SPECIAL CASE\s*:\s*(.+)", 1, "refine", &["pdbx_stereochem_target_val_spec_case"]),
];

static TNT_TEMPLATE: [TemplateLine; 44] = [
    skip(r"DATA USED IN REFINEMENT\.", 1),
    cap(r"RESOLUTION RANGE HIGH \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_high"]),
    cap(r"RESOLUTION RANGE LOW \(ANGSTROMS\)\s*:\s*(.+)", 1, "refine", &["ls_d_res_low"]),
    cap(r"DATA CUTOFF \(SIGMA\(F\)\)\s*:\s*(.+)", 1, "refine", &["pdbx_ls_sigma_F"]),
    cap(r"COMPLETENESS FOR RANGE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_obs"]),
    cap(r"NUMBER OF REFLECTIONS\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_obs"]),
    skip(r"USING DATA ABOVE SIGMA CUTOFF\.", 1),
    cap(r"CROSS-VALIDATION METHOD\s*:\s*(.+)", 1, "refine", &["pdbx_ls_cross_valid_method"]),
    cap(r"FREE R VALUE TEST SET SELECTION\s*:\s*(.+)", 1, "refine", &["pdbx_R_Free_selection_details"]),
    cap(r"R VALUE \(WORKING \+ TEST SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_obs"]),
    cap(r"R VALUE \(WORKING SET\)\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_work"]),
    cap(r"FREE R VALUE\s*:\s*(.+)", 1, "refine", &["ls_R_factor_R_free"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%\)\s*:\s*(.+)", 1, "refine", &["ls_percent_reflns_R_free"]),
    cap(r"FREE R VALUE TEST SET COUNT\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_R_free"]),
    skip(r"USING ALL DATA, NO SIGMA CUTOFF\.", 1),
    cap(r"R VALUE \(WORKING \+ TEST SET, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["R_factor_all_no_cutoff"]),
    cap(r"R VALUE \(WORKING SET, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["R_factor_obs_no_cutoff"]),
    cap(r"FREE R VALUE \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_factor_no_cutoff"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%, NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_size_perc_no_cutoff"]),
    cap(r"FREE R VALUE TEST SET COUNT \(NO CUTOFF\)\s*:\s*(.+)", 1, "pdbx_refine", &["free_R_val_test_set_ct_no_cutoff"]),
    cap(r"TOTAL NUMBER OF REFLECTIONS \(NO CUTOFF\)\s*:\s*(.+)", 1, "refine", &["ls_number_reflns_all"]),
    skip(r"NUMBER OF NON-HYDROGEN ATOMS USED IN REFINEMENT\.", 1),
    cap(r"PROTEIN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_protein"]),
    cap(r"NUCLEIC ACID ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_nucleic_acid"]),
    cap(r"HETEROGEN ATOMS\s*:\s*(.+)", 1, "refine_hist", &["pdbx_number_atoms_ligand"]),
    cap(r"SOLVENT ATOMS\s*:\s*(.+)", 1, "refine_hist", &["number_atoms_solvent"]),
    cap(r"WILSON B VALUE \(FROM FCALC, A\*\*2\)\s*:\s*(.+)", 1, "reflns", &["B_iso_Wilson_estimate"]),
    skip(r"RMS DEVIATIONS FROM IDEAL VALUES\. RMS WEIGHT COUNT", 1),
    restr(r"BOND LENGTHS \(A\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "weight", "number"], "t_bond_d"),
    restr(r"BOND ANGLES \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "weight", "number"], "t_angle_deg"),
    restr(r"TORSION ANGLES \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "weight", "number"], "t_dihedral_angle_d"),
    restr(r"PSEUDOROTATION ANGLES \(DEGREES\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "weight", "number"], "t_pseud_angle"),
    restr(r"TRIGONAL CARBON PLANES \(A\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "weight", "number"], "t_trig_c_planes"),
    restr(r"GENERAL PLANES \(A\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "weight", "number"], "t_gen_planes"),
    restr(r"ISOTROPIC THERMAL FACTORS \(A\*\*2\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "weight", "number"], "t_it"),
    restr(r"NON-BONDED CONTACTS \(A\)\s*:\s*(.+)\s*;\s*(.+)\s*;\s*(.+)", 1, &["dev_ideal", "weight", "number"], "t_nbd"),
    restr(r"INCORRECT CHIRAL-CENTERS \(COUNT\)\s*:\s*(.+)\s*", 1, &["number"], "t_incorr_chiral_ct"),
    skip(r"BULK SOLVENT MODELING\.", 1),
    cap(r"METHOD USED\s*:\s*(.+)", 1, "refine", &["solvent_model_details"]),
    cap(r"KSOL\s*:\s*(.+)", 1, "refine", &["solvent_model_param_ksol"]),
    cap(r"BSOL\s*:\s*(.+)", 1, "refine", &["solvent_model_param_bsol"]),
    skip(r"RESTRAINT LIBRARIES\.", 1),
    cap(r"STEREOCHEMISTRY\s*:\s*(.+)", 1, "refine", &["pdbx_stereochemistry_target_values"]),
    cap(r"ISOTROPIC THERMAL FACTOR RESTRAINTS\s*:\s*(.+)", 1, "refine", &["pdbx_isotropic_thermal_model"]),
];

static XPLOR_TEMPLATE: [TemplateLine; 67] = [
    skip(r"DATA USED IN REFINEMENT\.", 1),
    cap(r"RESOLUTION RANGE HIGH \(ANGSTROMS\) :\s+(.+)", 1, "refine", &["ls_d_res_high"]),
    cap(r"RESOLUTION RANGE LOW \(ANGSTROMS\) :\s+(.+)", 1, "refine", &["ls_d_res_low"]),
    cap(r"DATA CUTOFF \(SIGMA\(F\)\) :\s+(.+)", 1, "refine", &["pdbx_ls_sigma_F"]),
    cap(r"DATA CUTOFF HIGH \(ABS\(F\)\) :\s+(.+)", 1, "refine", &["pdbx_data_cutoff_high_absF"]),
    cap(r"DATA CUTOFF LOW \(ABS\(F\)\) :\s+(.+)", 1, "refine", &["pdbx_data_cutoff_low_absF"]),
    cap(r"COMPLETENESS \(WORKING\+TEST\) \(%\) :\s+(.+)", 1, "refine", &["ls_percent_reflns_obs"]),
    cap(r"NUMBER OF REFLECTIONS :\s+(.+)", 1, "refine", &["ls_number_reflns_obs"]),
    skip(r"FIT TO DATA USED IN REFINEMENT\.", 1),
    cap(r"CROSS-VALIDATION METHOD :\s+(.+)", 1, "refine", &["pdbx_ls_cross_valid_method"]),
    cap(r"FREE R VALUE TEST SET SELECTION :\s+(.+)", 1, "refine", &["pdbx_R_Free_selection_details"]),
    cap(r"R VALUE \(WORKING SET\) :\s+(.+)", 1, "refine", &["ls_R_factor_R_work"]),
    cap(r"FREE R VALUE :\s+(.+)", 1, "refine", &["ls_R_factor_R_free"]),
    cap(r"FREE R VALUE TEST SET SIZE \(%\) :\s+(.+)", 1, "refine", &["ls_percent_reflns_R_free"]),
    cap(r"FREE R VALUE TEST SET COUNT :\s+(.+)", 1, "refine", &["ls_number_reflns_R_free"]),
    cap(r"ESTIMATED ERROR OF FREE R VALUE :\s+(.+)", 1, "refine", &["ls_R_factor_R_free_error"]),
    skip(r"FIT IN THE HIGHEST RESOLUTION BIN\.", 1),
    cap(r"TOTAL NUMBER OF BINS USED :\s+(.+)", 1, "refine_ls_shell", &["pdbx_total_number_of_bins_used"]),
    cap(r"BIN RESOLUTION RANGE HIGH \(A\) :\s+(.+)", 1, "refine_ls_shell", &["d_res_high"]),
    cap(r"BIN RESOLUTION RANGE LOW \(A\) :\s+(.+)", 1, "refine_ls_shell", &["d_res_low"]),
    cap(r"BIN COMPLETENESS \(WORKING\+TEST\) \(%\) :\s+(.+)", 1, "refine_ls_shell", &["percent_reflns_obs"]),
    cap(r"REFLECTIONS IN BIN \(WORKING SET\) :\s+(.+)", 1, "refine_ls_shell", &["number_reflns_R_work"]),
    cap(r"BIN R VALUE \(WORKING SET\) :\s+(.+)", 1, "refine_ls_shell", &["R_factor_R_work"]),
    cap(r"BIN FREE R VALUE :\s+(.+)", 1, "refine_ls_shell", &["R_factor_R_free"]),
    cap(r"BIN FREE R VALUE TEST SET SIZE \(%\) :\s+(.+)", 1, "refine_ls_shell", &["percent_reflns_R_free"]),
    cap(r"BIN FREE R VALUE TEST SET COUNT :\s+(.+)", 1, "refine_ls_shell", &["number_reflns_R_free"]),
    cap(r"ESTIMATED ERROR OF BIN FREE R VALUE :\s+(.+)", 1, "refine_ls_shell", &["R_factor_R_free_error"]),
    skip(r"NUMBER OF NON-HYDROGEN ATOMS USED IN REFINEMENT\.", 1),
    cap(r"PROTEIN ATOMS :\s+(.+)", 1, "refine_hist", &["pdbx_number_atoms_protein"]),
    cap(r"NUCLEIC ACID ATOMS :\s+(.+)", 1, "refine_hist", &["pdbx_number_atoms_nucleic_acid"]),
    cap(r"HETEROGEN ATOMS :\s+(.+)", 1, "refine_hist", &["pdbx_number_atoms_ligand"]),
    cap(r"SOLVENT ATOMS :\s+(.+)", 1, "refine_hist", &["number_atoms_solvent"]),
    skip(r"B VALUES\.", 1),
    cap(r"B VALUE TYPE :\s+(.+)", 1, "refine", &["pdbx_TLS_residual_ADP_flag"]),
    cap(r"FROM WILSON PLOT \(A\*\*2\) :\s+(.+)", 1, "reflns", &["B_iso_Wilson_estimate"]),
    cap(r"MEAN B VALUE \(OVERALL, A\*\*2\) :\s+(.+)", 1, "refine", &["B_iso_mean"]),
    skip(r"OVERALL ANISOTROPIC B VALUE\.", 1),
    cap(r"B11 \(A\*\*2\) :\s+(.+)", 1, "refine", &["aniso_B[1][1]"]),
    cap(r"B22 \(A\*\*2\) :\s+(.+)", 1, "refine", &["aniso_B[2][2]"]),
    cap(r"B33 \(A\*\*2\) :\s+(.+)", 1, "refine", &["aniso_B[3][3]"]),
    cap(r"B12 \(A\*\*2\) :\s+(.+)", 1, "refine", &["aniso_B[1][2]"]),
    cap(r"B13 \(A\*\*2\) :\s+(.+)", 1, "refine", &["aniso_B[1][3]"]),
    cap(r"B23 \(A\*\*2\) :\s+(.+)", 1, "refine", &["aniso_B[2][3]"]),
    skip(r"ESTIMATED COORDINATE ERROR\.", 1),
    cap(r"ESD FROM LUZZATI PLOT \(A\) :\s+(.+)", 1, "refine_analyze", &["Luzzati_coordinate_error_obs"]),
    cap(r"ESD FROM SIGMAA \(A\) :\s+(.+)", 1, "refine_analyze", &["Luzzati_sigma_a_obs"]),
    cap(r"LOW RESOLUTION CUTOFF \(A\) :\s+(.+)", 1, "refine_analyze", &["Luzzati_d_res_low_obs"]),
    skip(r"CROSS-VALIDATED ESTIMATED COORDINATE ERROR\.", 1),
    cap(r"ESD FROM C-V LUZZATI PLOT \(A\) :\s+(.+)", 1, "refine_analyze", &["Luzzati_coordinate_error_free"]),
    cap(r"ESD FROM C-V SIGMAA \(A\) :\s+(.+)", 1, "refine_analyze", &["Luzzati_sigma_a_free"]),
    skip(r"RMS DEVIATIONS FROM IDEAL VALUES\..*", 1),
    restr(r"BOND LENGTHS \(A\) :\s+(.+)", 1, &["dev_ideal"], "x_bond_d"),
    restr(r"BOND ANGLES \(DEGREES\) :\s+(.+)", 1, &["dev_ideal"], "x_angle_deg"),
    restr(r"DIHEDRAL ANGLES \(DEGREES\) :\s+(.+)", 1, &["dev_ideal"], "x_dihedral_angle_d"),
    restr(r"IMPROPER ANGLES \(DEGREES\) :\s+(.+)", 1, &["dev_ideal"], "x_improper_angle_d"),
    cap(r"ISOTROPIC THERMAL MODEL :\s+(.+)", 1, "refine", &["pdbx_isotropic_thermal_model"]),
    skip(r"ISOTROPIC THERMAL FACTOR RESTRAINTS\. RMS SIGMA", 1),
    restr(r"MAIN-CHAIN BOND \(A\*\*2\) :\s+(.+?);\s+(.+)", 1, &["dev_ideal", "dev_ideal_target"], "x_mcbond_it"),
    restr(r"MAIN-CHAIN ANGLE \(A\*\*2\) :\s+(.+?);\s+(.+)", 1, &["dev_ideal", "dev_ideal_target"], "x_mcangle_it"),
    restr(r"SIDE-CHAIN BOND \(A\*\*2\) :\s+(.+?);\s+(.+)", 1, &["dev_ideal", "dev_ideal_target"], "x_scbond_it"),
    restr(r"SIDE-CHAIN ANGLE \(A\*\*2\) :\s+(.+?);\s+(.+)", 1, &["dev_ideal", "dev_ideal_target"], "x_scangle_it"),
    skip(r"NCS MODEL :\s+(.+)", 1),
    skip(r"NCS RESTRAINTS\. RMS SIGMA/WEIGHT", 1),
    skip(r"GROUP (\d+) POSITIONAL \(A\) :\s+(.+?);\s+(.+)", 1),
    skip(r"GROUP (\d+) B-FACTOR \(A\*\*2\) :\s+(.+?);\s+(.+)", 63 - 64),
    skip(r"PARAMETER FILE (\d+) :\s+(.+)", 0),
    skip(r"TOPOLOGY FILE (\d+) :\s+(.+)", 0),
];
