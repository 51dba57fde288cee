//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Secondary structure: HELIX records become struct_conf rows, SHEET records
//! become sheets, strand ranges, strand order and the registration hydrogen
//! bonds.

use crate::error::Result;

use super::PdbParser;

impl PdbParser<'_> {

    pub(crate) fn parse_secondary_structure(&mut self) -> Result<()> {
        let mut first_helix = true;

        while self.rec().is("HELIX ") {
            let beg = self.map_residue(self.vc(20), self.vi(22, 25), self.vc(26));
            let end = self.map_residue(self.vc(32), self.vi(34, 37), self.vc(38));

            match (beg, end) {
                (Some((beg_asym, beg_seq, _)), Some((end_asym, end_seq, _))) => {
                    let id = format!("HELX_P{}", self.vi(8, 10));
                    let helix_id = self.vs(12, 14);
                    let beg_comp = self.vs(16, 18);
                    let end_comp = self.vs(28, 30);
                    let beg_ins = self.vs(26, 26);
                    let end_ins = self.vs(38, 38);
                    let beg_auth_asym = self.vs(20, 20);
                    let end_auth_asym = self.vs(32, 32);
                    let beg_auth_seq = self.vi(22, 25).to_string();
                    let end_auth_seq = self.vi(34, 37).to_string();
                    let helix_class = self.vs(39, 40);
                    let details = self.vs(41, 70);
                    let length = self.vi(72, 76).to_string();

                    self.emplace("struct_conf", &[
                        ("conf_type_id", "HELX_P"),
                        ("id", &id),
                        ("pdbx_PDB_helix_id", &helix_id),
                        ("beg_label_comp_id", &beg_comp),
                        ("beg_label_asym_id", &beg_asym),
                        ("beg_label_seq_id", &beg_seq.to_string()),
                        ("pdbx_beg_PDB_ins_code", &beg_ins),
                        ("end_label_comp_id", &end_comp),
                        ("end_label_asym_id", &end_asym),
                        ("end_label_seq_id", &end_seq.to_string()),
                        ("pdbx_end_PDB_ins_code", &end_ins),
                        ("beg_auth_comp_id", &beg_comp),
                        ("beg_auth_asym_id", &beg_auth_asym),
                        ("beg_auth_seq_id", &beg_auth_seq),
                        ("end_auth_comp_id", &end_comp),
                        ("end_auth_asym_id", &end_auth_asym),
                        ("end_auth_seq_id", &end_auth_seq),
                        ("pdbx_PDB_helix_class", &helix_class),
                        ("details", &details),
                        ("pdbx_PDB_helix_length", &length),
                    ])?;

                    if first_helix {
                        self.emplace("struct_conf_type", &[("id", "HELX_P")])?;
                        first_helix = false;
                    }
                }
                _ => log::debug!("could not map residue for HELIX {}", self.vi(8, 10)),
            }

            self.next_record();
        }

        let mut sheets_seen: Vec<String> = vec![];
        let mut range_id = 1;

        while self.rec().is("SHEET ") {
            let sheet_id = self.vs(12, 14);

            if !sheets_seen.contains(&sheet_id) {
                sheets_seen.push(sheet_id.clone());
                range_id = 1;

                let number_strands = self.vi(15, 16).to_string();
                self.emplace("struct_sheet", &[
                    ("id", &sheet_id),
                    ("number_strands", &number_strands),
                ])?;
            }

            let sense = self.vi(39, 40);

            if sense != 0 {
                let range_1 = range_id.to_string();
                let range_2 = (range_id + 1).to_string();
                self.emplace("struct_sheet_order", &[
                    ("sheet_id", &sheet_id),
                    ("range_id_1", &range_1),
                    ("range_id_2", &range_2),
                    ("sense", if sense == -1 { "anti-parallel" } else { "parallel" }),
                ])?;
            }

            let beg = self.map_residue(self.vc(22), self.vi(23, 26), self.vc(27));
            let end = self.map_residue(self.vc(33), self.vi(34, 37), self.vc(38));

            match (beg, end) {
                (Some((beg_asym, beg_seq, _)), Some((end_asym, end_seq, _))) => {
                    let strand_id = self.vi(8, 10).to_string();
                    let beg_comp = self.vs(18, 20);
                    let end_comp = self.vs(29, 31);

                    self.emplace("struct_sheet_range", &[
                        ("sheet_id", &sheet_id),
                        ("id", &strand_id),
                        ("beg_label_comp_id", &beg_comp),
                        ("beg_label_asym_id", &beg_asym),
                        ("beg_label_seq_id", &beg_seq.to_string()),
                        ("pdbx_beg_PDB_ins_code", &self.vs(27, 27)),
                        ("end_label_comp_id", &end_comp),
                        ("end_label_asym_id", &end_asym),
                        ("end_label_seq_id", &end_seq.to_string()),
                        ("pdbx_end_PDB_ins_code", &self.vs(38, 38)),
                        ("beg_auth_comp_id", &beg_comp),
                        ("beg_auth_asym_id", &self.vs(22, 22)),
                        ("beg_auth_seq_id", &self.vi(23, 26).to_string()),
                        ("end_auth_comp_id", &end_comp),
                        ("end_auth_asym_id", &self.vs(33, 33)),
                        ("end_auth_seq_id", &self.vi(34, 37).to_string()),
                    ])?;

                    // The registration, when the record carries one.
                    if sense != 0 && self.rec().value.len() > 34 {
                        let r1 = self.map_residue(self.vc(65), self.vi(66, 69), self.vc(70));
                        let r2 = self.map_residue(self.vc(50), self.vi(51, 54), self.vc(55));

                        match (r1, r2) {
                            (Some((r1_asym, r1_seq, _)), Some((r2_asym, r2_seq, _))) => {
                                let range_1 = range_id.to_string();
                                let range_2 = (range_id + 1).to_string();

                                self.emplace("pdbx_struct_sheet_hbond", &[
                                    ("sheet_id", &sheet_id),
                                    ("range_id_1", &range_1),
                                    ("range_id_2", &range_2),
                                    ("range_1_label_atom_id", &self.vs(57, 60)),
                                    ("range_1_label_comp_id", &self.vs(61, 63)),
                                    ("range_1_label_asym_id", &r1_asym),
                                    ("range_1_label_seq_id", &r1_seq.to_string()),
                                    ("range_1_PDB_ins_code", &self.vs(70, 70)),
                                    ("range_1_auth_atom_id", &self.vs(57, 60)),
                                    ("range_1_auth_comp_id", &self.vs(61, 63)),
                                    ("range_1_auth_asym_id", &self.vs(65, 65)),
                                    ("range_1_auth_seq_id", &self.vi(66, 69).to_string()),
                                    ("range_2_label_atom_id", &self.vs(42, 45)),
                                    ("range_2_label_comp_id", &self.vs(46, 48)),
                                    ("range_2_label_asym_id", &r2_asym),
                                    ("range_2_label_seq_id", &r2_seq.to_string()),
                                    ("range_2_PDB_ins_code", &self.vs(55, 55)),
                                    ("range_2_auth_atom_id", &self.vs(42, 45)),
                                    ("range_2_auth_comp_id", &self.vs(46, 48)),
                                    ("range_2_auth_asym_id", &self.vs(50, 50)),
                                    ("range_2_auth_seq_id", &self.vi(51, 54).to_string()),
                                ])?;
                            }
                            _ => log::debug!("skipping unmatched pdbx_struct_sheet_hbond record"),
                        }
                    }

                    if sense != 0 {
                        range_id += 1;
                    }
                }
                _ => log::debug!("dropping SHEET record {}", self.vi(8, 10)),
            }

            self.next_record();
        }

        Ok(())
    }
}
