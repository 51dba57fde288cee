//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Connectivity annotation (SSBOND, LINK, CISPEP) and the SITE records.

use crate::compound::compound_factory;
use crate::error::Result;
use crate::pdb::pdb2cif_symmetry;

use super::PdbParser;

/// Metals as they appear in single-atom heterogens; used to tell metal
/// coordination from covalent links.
const METALS: &[&str] = &[
    "LI", "BE", "NA", "MG", "AL", "K", "CA", "SC", "TI", "V", "CR", "MN",
    "FE", "CO", "NI", "CU", "ZN", "GA", "RB", "SR", "Y", "ZR", "NB", "MO",
    "TC", "RU", "RH", "PD", "AG", "CD", "IN", "SN", "CS", "BA", "LA", "CE",
    "PR", "ND", "SM", "EU", "GD", "TB", "DY", "HO", "ER", "TM", "YB", "LU",
    "HF", "TA", "W", "RE", "OS", "IR", "PT", "AU", "HG", "TL", "PB", "BI",
    "TH", "U",
];

/// True if the named atom of the residue is a metal.
fn is_metal(res_name: &str, atom_id: &str) -> bool {
    let symbol = compound_factory()
        .lookup_compound(res_name)
        .and_then(|c| c.atoms.iter().find(|a| a.id == atom_id).map(|a| a.symbol.to_uppercase()));

    match symbol {
        Some(symbol) => METALS.contains(&symbol.as_str()),
        None => {

            // Single-atom heterogens are usually named after their element.
            res_name == atom_id && METALS.contains(&res_name)
        }
    }
}

impl PdbParser<'_> {

    pub(crate) fn parse_connectivity_annotation(&mut self) -> Result<()> {
        let mut ss_bond_nr = 0;
        let mut link_nr = 0;
        let mut first_covale = true;
        let mut first_metalc = true;

        // Some programs write these records in the wrong order, so all three
        // types are accepted in any order until something else shows up.
        loop {
            if self.rec().is("SSBOND") {
                if ss_bond_nr == 0 {
                    self.emplace("struct_conn_type", &[("id", "disulf")])?;
                }

                let p1 = self.map_residue(self.vc(16), self.vi(18, 21), self.vc(22));
                let p2 = self.map_residue(self.vc(30), self.vi(32, 35), self.vc(36));

                let ((p1_asym, p1_seq, _), (p2_asym, p2_seq, _)) = match (p1, p2) {
                    (Some(p1), Some(p2)) => (p1, p2),
                    _ => {
                        log::debug!("dropping SSBOND {}", self.vi(8, 10));
                        self.next_record();
                        continue;
                    }
                };

                let mut alt1 = self.alt_locs_for_atom(self.vc(16), self.vi(18, 21), self.vc(22), "SG");
                let mut alt2 = self.alt_locs_for_atom(self.vc(30), self.vi(32, 35), self.vc(36), "SG");

                if alt1.is_empty() {
                    alt1.push('\0');
                }
                if alt2.is_empty() {
                    alt2.push('\0');
                }

                let sym1 = pdb2cif_symmetry(&self.vs(60, 65));
                let sym2 = pdb2cif_symmetry(&self.vs(67, 72));

                let (sym1, sym2) = match (sym1, sym2) {
                    (Ok(sym1), Ok(sym2)) => (sym1, sym2),
                    _ => {
                        log::debug!("dropping SSBOND {} due to invalid symmetry operation", self.vi(8, 10));
                        self.next_record();
                        continue;
                    }
                };

                for a1 in &alt1 {
                    for a2 in &alt2 {
                        ss_bond_nr += 1;
                        let id = format!("disulf{ss_bond_nr}");

                        let alt1_str = if *a1 == '\0' { String::new() } else { a1.to_string() };
                        let alt2_str = if *a2 == '\0' { String::new() } else { a2.to_string() };
                        let p1_seq_str = if p1_seq != 0 { p1_seq.to_string() } else { ".".to_owned() };
                        let p2_seq_str = if p2_seq != 0 { p2_seq.to_string() } else { ".".to_owned() };

                        self.emplace("struct_conn", &[
                            ("id", &id),
                            ("conn_type_id", "disulf"),
                            ("ptnr1_label_asym_id", &p1_asym),
                            ("pdbx_ptnr1_label_alt_id", &alt1_str),
                            ("ptnr1_label_comp_id", &self.vs(12, 14)),
                            ("ptnr1_label_seq_id", &p1_seq_str),
                            ("ptnr1_label_atom_id", "SG"),
                            ("ptnr1_symmetry", &sym1),
                            ("ptnr2_label_asym_id", &p2_asym),
                            ("pdbx_ptnr2_label_alt_id", &alt2_str),
                            ("ptnr2_label_comp_id", &self.vs(26, 28)),
                            ("ptnr2_label_seq_id", &p2_seq_str),
                            ("ptnr2_label_atom_id", "SG"),
                            ("ptnr1_auth_asym_id", &self.vs(16, 16)),
                            ("ptnr1_auth_comp_id", &self.vs(12, 14)),
                            ("ptnr1_auth_seq_id", &self.vi(18, 21).to_string()),
                            ("ptnr2_auth_asym_id", &self.vs(30, 30)),
                            ("ptnr2_auth_comp_id", &self.vs(26, 28)),
                            ("ptnr2_auth_seq_id", &self.vi(32, 35).to_string()),
                            ("ptnr2_symmetry", &sym2),
                            ("pdbx_dist_value", &self.vs(74, 78)),
                        ])?;
                    }
                }

                self.next_record();
                continue;
            }

            if self.rec().is("LINK  ") || self.rec().is("LINKR ") {
                if self.rec().is("LINKR ") {
                    log::debug!("accepting non-standard LINKR record, but ignoring extra information");
                }

                let name1 = self.vs(13, 16);
                let res_name1 = self.vs(18, 20);
                let name2 = self.vs(43, 46);
                let res_name2 = self.vs(48, 50);

                let conn_type = if is_metal(&res_name1, &name1) || is_metal(&res_name2, &name2) {
                    "metalc"
                } else {
                    "covale"
                };

                if conn_type == "covale" && first_covale {
                    self.emplace("struct_conn_type", &[("id", conn_type)])?;
                    first_covale = false;
                }

                if conn_type == "metalc" && first_metalc {
                    self.emplace("struct_conn_type", &[("id", conn_type)])?;
                    first_metalc = false;
                }

                link_nr += 1;

                let p1 = self.map_residue(self.vc(22), self.vi(23, 26), self.vc(27));
                let p2 = self.map_residue(self.vc(52), self.vi(53, 56), self.vc(57));

                let ((p1_asym, p1_seq, is_resseq1), (p2_asym, p2_seq, is_resseq2)) = match (p1, p2) {
                    (Some(p1), Some(p2)) => (p1, p2),
                    _ => {
                        log::debug!("dropping LINK record at line {}", self.rec().line_nr);
                        self.next_record();
                        continue;
                    }
                };

                // A LINK distance that does not parse is taken for a
                // CCP4-style link id; LINKR always carries the id there.
                let mut distance = String::new();
                let mut _ccp4_link_id = String::new();

                if self.rec().is("LINK  ") {
                    distance = self.vs(74, 78);
                    if !distance.is_empty() && distance.parse::<f64>().is_err() {
                        log::debug!("distance value '{distance}' is not a valid float in LINK record");
                        std::mem::swap(&mut _ccp4_link_id, &mut distance);
                    }
                } else {
                    _ccp4_link_id = self.vs(74, 78);
                }

                let sym1 = pdb2cif_symmetry(&self.vs(60, 65));
                let sym2 = pdb2cif_symmetry(&self.vs(67, 72));

                let (sym1, sym2) = match (sym1, sym2) {
                    (Ok(sym1), Ok(sym2)) => (sym1, sym2),
                    _ => {
                        log::debug!("dropping LINK record at line {} due to invalid symmetry operation", self.rec().line_nr);
                        self.next_record();
                        continue;
                    }
                };

                let id = format!("{conn_type}{link_nr}");
                let p1_seq_str = if is_resseq1 && p1_seq != 0 { p1_seq.to_string() } else { ".".to_owned() };
                let p2_seq_str = if is_resseq2 && p2_seq != 0 { p2_seq.to_string() } else { ".".to_owned() };

                self.emplace("struct_conn", &[
                    ("id", &id),
                    ("conn_type_id", conn_type),
                    ("ptnr1_label_asym_id", &p1_asym),
                    ("ptnr1_label_comp_id", &res_name1),
                    ("ptnr1_label_seq_id", &p1_seq_str),
                    ("ptnr1_label_atom_id", &name1),
                    ("pdbx_ptnr1_label_alt_id", &self.vs(17, 17)),
                    ("pdbx_ptnr1_PDB_ins_code", &self.vs(27, 27)),
                    ("pdbx_ptnr1_standard_comp_id", ""),
                    ("ptnr1_symmetry", &sym1),
                    ("ptnr2_label_asym_id", &p2_asym),
                    ("ptnr2_label_comp_id", &res_name2),
                    ("ptnr2_label_seq_id", &p2_seq_str),
                    ("ptnr2_label_atom_id", &name2),
                    ("pdbx_ptnr2_label_alt_id", &self.vs(47, 47)),
                    ("pdbx_ptnr2_PDB_ins_code", &self.vs(57, 57)),
                    ("ptnr1_auth_asym_id", &self.vs(22, 22)),
                    ("ptnr1_auth_comp_id", &res_name1),
                    ("ptnr1_auth_seq_id", &self.vi(23, 26).to_string()),
                    ("ptnr2_auth_asym_id", &self.vs(52, 52)),
                    ("ptnr2_auth_comp_id", &res_name2),
                    ("ptnr2_auth_seq_id", &self.vi(53, 56).to_string()),
                    ("ptnr2_symmetry", &sym2),
                    ("pdbx_dist_value", &distance),
                ])?;

                self.next_record();
                continue;
            }

            if self.rec().is("CISPEP") {
                let ser_num = self.vi(8, 10);
                let pep1 = self.vs(12, 14);
                let chain_id1 = self.vc(16);
                let seq_num1 = self.vi(18, 21);
                let icode1 = self.vc(22);
                let pep2 = self.vs(26, 28);
                let chain_id2 = self.vc(30);
                let seq_num2 = self.vi(32, 35);
                let icode2 = self.vc(36);
                let mut mod_num = self.vi(44, 46);
                let measure = self.vf(54, 59);

                if mod_num == 0 {
                    mod_num = 1;
                }

                let p1 = self.map_residue(chain_id1, seq_num1, icode1);
                let p2 = self.map_residue(chain_id2, seq_num2, icode2);

                let ((asym1, seq1, _), (asym2, seq2, _)) = match (p1, p2) {
                    (Some(p1), Some(p2)) => (p1, p2),
                    _ => {
                        log::debug!("dropping CISPEP record at line {}", self.rec().line_nr);
                        self.next_record();
                        continue;
                    }
                };

                let icode1_str = if icode1 == ' ' { String::new() } else { icode1.to_string() };
                let icode2_str = if icode2 == ' ' { String::new() } else { icode2.to_string() };

                self.emplace("struct_mon_prot_cis", &[
                    ("pdbx_id", &ser_num.to_string()),
                    ("label_comp_id", &pep1),
                    ("label_seq_id", &seq1.to_string()),
                    ("label_asym_id", &asym1),
                    ("label_alt_id", "."),
                    ("pdbx_PDB_ins_code", &icode1_str),
                    ("auth_comp_id", &pep1),
                    ("auth_seq_id", &seq_num1.to_string()),
                    ("auth_asym_id", &chain_id1.to_string()),
                    ("pdbx_label_comp_id_2", &pep2),
                    ("pdbx_label_seq_id_2", &seq2.to_string()),
                    ("pdbx_label_asym_id_2", &asym2),
                    ("pdbx_PDB_ins_code_2", &icode2_str),
                    ("pdbx_auth_comp_id_2", &pep2),
                    ("pdbx_auth_seq_id_2", &seq_num2.to_string()),
                    ("pdbx_auth_asym_id_2", &chain_id2.to_string()),
                    ("pdbx_PDB_model_num", &mod_num.to_string()),
                    ("pdbx_omega_angle", &measure),
                ])?;

                self.next_record();
                continue;
            }

            break;
        }

        Ok(())
    }

    /// The SITE records: each names up to four residues per chunk of eleven
    /// columns, pre-padded by the pre-parser.
    pub(crate) fn parse_miscellaneous_features(&mut self) -> Result<()> {
        let mut struct_site_gen_id = 1;

        while self.rec().is("SITE  ") {
            let site_id = self.vs(12, 14);
            let num_res = self.vi(16, 17);

            let mut o = 19;

            for _ in 0..num_res {
                let res_name = self.vs(o, o + 2);
                let chain_id = self.vc(o + 4);
                let seq = self.vi(o + 5, o + 8);
                let icode = self.vc(o + 9);

                match self.map_residue(chain_id, seq, icode) {
                    Some((asym, label_seq, is_resseq)) => {
                        let id = struct_site_gen_id.to_string();
                        struct_site_gen_id += 1;

                        let label_seq_str = if label_seq > 0 && is_resseq { label_seq.to_string() } else { ".".to_owned() };
                        let ins = if icode == ' ' { String::new() } else { icode.to_string() };

                        self.emplace("struct_site_gen", &[
                            ("id", &id),
                            ("site_id", &site_id),
                            ("pdbx_num_res", &num_res.to_string()),
                            ("label_comp_id", &res_name),
                            ("label_asym_id", &asym),
                            ("label_seq_id", &label_seq_str),
                            ("pdbx_auth_ins_code", &ins),
                            ("auth_comp_id", &res_name),
                            ("auth_asym_id", &chain_id.to_string()),
                            ("auth_seq_id", &seq.to_string()),
                            ("label_atom_id", "."),
                            ("label_alt_id", "."),
                        ])?;
                    }
                    None => log::debug!("skipping struct_site_gen record"),
                }

                o += 11;
            }

            self.next_record();
        }

        Ok(())
    }
}
