//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The coordinate section: ATOM, HETATM, ANISOU and TER records of one model.

use std::cmp::Ordering;

use crate::error::{RCifError, Result};
use crate::model::condition::key;
use crate::pdb::pdb2cif_charge;

use super::PdbParser;

/// One gathered atom: its target asym/seq, plus the record indices of the
/// ATOM and, when present, the trailing ANISOU.
struct GatheredAtom {
    asym_id: String,
    seq_id: i32,
    is_resseq: bool,
    atom: usize,
    anisou: Option<usize>,
}

/// Ordering of the output: ascending asym (short ids first), then label seq.
fn atom_order(a: &GatheredAtom, b: &GatheredAtom) -> Ordering {
    a.asym_id.len().cmp(&b.asym_id.len())
        .then_with(|| a.asym_id.cmp(&b.asym_id))
        .then_with(|| a.seq_id.cmp(&b.seq_id))
}

impl PdbParser<'_> {

    pub(crate) fn parse_coordinate(&mut self, model_nr: i32) -> Result<()> {

        // The records arrive in author order but have to leave in ascending
        // asym order, so gather first.
        let mut atoms: Vec<GatheredAtom> = vec![];

        while self.rec().is("ATOM  ") || self.rec().is("HETATM") {
            let chain_id = self.vc(22);
            let res_seq = self.vi(23, 26);
            let icode = self.vc(27);

            let (asym_id, seq_id, is_resseq) = self.map_residue_req(chain_id, res_seq, icode)?;

            let atom = self.cur;
            self.next_record();

            let anisou = if self.rec().is("ANISOU") {
                let anisou = self.cur;
                self.next_record();
                Some(anisou)
            } else {
                None
            };

            atoms.push(GatheredAtom { asym_id, seq_id, is_resseq, atom, anisou });

            while self.rec().is("TER   ") {
                self.match_rec("TER   ", true)?;
                self.next_record();
            }
        }

        atoms.sort_by(|a, b| atom_order(a, b));

        // Within one residue, alternates regroup by atom name, altLoc last.
        let mut i = 0;
        while i + 1 < atoms.len() {
            let alt_loc = self.record(atoms[i].atom).vc(17);

            if alt_loc == ' ' || alt_loc == '\0' {
                i += 1;
                continue;
            }

            let mut e = i;
            let mut atom_index: Vec<String> = vec![];

            while e < atoms.len() && atom_order(&atoms[i], &atoms[e]) == Ordering::Equal {
                let name = self.record(atoms[e].atom).vs(13, 16);
                if !atom_index.contains(&name) {
                    atom_index.push(name);
                }
                e += 1;
            }

            let records = self.records;
            atoms[i..e].sort_by(|a, b| {
                let na = records[a.atom].vs(13, 16);
                let nb = records[b.atom].vs(13, 16);

                let pa = atom_index.iter().position(|n| *n == na).unwrap_or(0);
                let pb = atom_index.iter().position(|n| *n == nb).unwrap_or(0);

                pa.cmp(&pb).then_with(|| records[a.atom].vc(17).cmp(&records[b.atom].vc(17)))
            });

            i += (e - i).max(1);
        }

        for gathered in &atoms {
            let rec = self.record(gathered.atom);

            self.atom_id += 1;

            let mut group_pdb = if rec.is("ATOM  ") { "ATOM" } else { "HETATM" };
            let name = rec.vs(13, 16);
            let alt_loc = rec.vc(17);
            let res_name = rec.vs(18, 20);
            let chain_id = rec.vc(22);
            let mut res_seq = rec.vi(23, 26);
            let icode = rec.vc(27);
            let x = rec.vf(31, 38);
            let y = rec.vf(39, 46);
            let z = rec.vf(47, 54);
            let occupancy = rec.vf(55, 60);
            let temp_factor = rec.vf(61, 66);
            let element = rec.vs(77, 78);
            let charge = pdb2cif_charge(&rec.vs(79, 80));

            let entity_id = self.asym_to_entity.get(&gathered.asym_id).cloned().unwrap_or_default();

            // group_PDB follows the residue's classification, not the record type.
            if res_name == "UNK" || Self::is_monomer(&res_name) {
                if group_pdb == "HETATM" {
                    log::debug!("changing atom from HETATM to ATOM at line {}", rec.line_nr);
                    group_pdb = "ATOM";
                }
            } else if group_pdb == "ATOM" {
                log::debug!("changing atom from ATOM to HETATM at line {}", rec.line_nr);
                group_pdb = "HETATM";
            }

            // Sugar atoms take the branch numbering for their auth_seq_id.
            if self.sugar_entities.contains(&entity_id) {
                if let Some(scheme) = self.datablock.get("pdbx_branch_scheme") {
                    let cond = key("asym_id").is(&gathered.asym_id) & key("auth_seq_num").is(&res_seq.to_string());
                    if let Some(row) = scheme.first(&cond) {
                        if let Ok(num) = scheme.value(row, "pdb_seq_num").parse::<i32>() {
                            res_seq = num;
                        }
                    }
                }
            }

            let id = self.atom_id.to_string();
            let alt_id = if alt_loc != ' ' { alt_loc.to_string() } else { ".".to_owned() };
            let label_seq = if gathered.is_resseq && gathered.seq_id > 0 {
                gathered.seq_id.to_string()
            } else {
                ".".to_owned()
            };
            let ins = if icode == ' ' { String::new() } else { icode.to_string() };

            self.emplace("atom_site", &[
                ("group_PDB", group_pdb),
                ("id", &id),
                ("type_symbol", &element),
                ("label_atom_id", &name),
                ("label_alt_id", &alt_id),
                ("label_comp_id", &res_name),
                ("label_asym_id", &gathered.asym_id),
                ("label_entity_id", &entity_id),
                ("label_seq_id", &label_seq),
                ("pdbx_PDB_ins_code", &ins),
                ("Cartn_x", &x),
                ("Cartn_y", &y),
                ("Cartn_z", &z),
                ("occupancy", &occupancy),
                ("B_iso_or_equiv", &temp_factor),
                ("pdbx_formal_charge", &charge),
                ("auth_seq_id", &res_seq.to_string()),
                ("auth_comp_id", &res_name),
                ("auth_asym_id", &chain_id.to_string()),
                ("auth_atom_id", &name),
                ("pdbx_PDB_model_num", &model_nr.to_string()),
            ])?;

            self.insert_atom_type(&element);

            // An ANISOU must belong to the ATOM right before it; serial,
            // element and charge have to agree.
            let check = rec.vs(7, 11) + &rec.vs(77, 80);

            if let Some(anisou_index) = gathered.anisou {
                let anisou = self.record(anisou_index);

                if anisou.vs(7, 11) + &anisou.vs(77, 80) != check {
                    return Err(RCifError::ValidationError(
                        "ANISOU record should follow corresponding ATOM record".to_owned(),
                    ));
                }

                let u = |first, last| format!("{:.4}", anisou.vi(first, last) as f64 / 10000.0);

                self.emplace("atom_site_anisotrop", &[
                    ("id", &id),
                    ("type_symbol", &element),
                    ("pdbx_label_atom_id", &name),
                    ("pdbx_label_alt_id", &alt_id),
                    ("pdbx_label_comp_id", &res_name),
                    ("pdbx_label_asym_id", &gathered.asym_id),
                    ("pdbx_label_seq_id", &label_seq),
                    ("U[1][1]", &u(29, 35)),
                    ("U[2][2]", &u(36, 42)),
                    ("U[3][3]", &u(43, 49)),
                    ("U[1][2]", &u(50, 56)),
                    ("U[1][3]", &u(57, 63)),
                    ("U[2][3]", &u(64, 70)),
                    ("pdbx_auth_seq_id", &res_seq.to_string()),
                    ("pdbx_auth_comp_id", &res_name),
                    ("pdbx_auth_asym_id", &chain_id.to_string()),
                    ("pdbx_auth_atom_id", &name),
                ])?;
            }
        }

        Ok(())
    }
}
