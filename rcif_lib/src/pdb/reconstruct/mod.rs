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
Module with the legacy-PDB semantic reconstructor.

This is a single forward pass over the flattened record list, with the
sections visited in legacy PDB order: title block, citations, remarks, primary
structure, heterogens, entity/asym construction, assemblies, secondary
structure, connectivity annotation, sites, crystallographic records,
coordinate transformations, coordinates, bookkeeping.

The hard part is bridging the two numbering schemes: the `(chainID, resSeq,
iCode)` triples the legacy format uses are mapped onto `(asymID, label_seq)`
through the SEQRES alignment, and that map is consulted by every later
section. Asym ids are handed out in base-26 order; waters get one asym per
chain, heterogens outside SEQRES get their own, and N-glycosylation trees are
collapsed into branched entities of their own.
!*/

use std::collections::{BTreeMap, BTreeSet};

use crate::compound::compound_factory;
use crate::error::{RCifError, Result};
use crate::model::condition::key;
use crate::model::Datablock;

use super::{Link, LinkAtom, PdbRecord, PreParsed};

mod title;
mod remarks;
mod primary;
mod entities;
mod branch;
mod secondary;
mod connectivity;
mod xtal;
mod coords;

#[cfg(test)] mod reconstruct_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// One `MOL_ID` block of the COMPND/SOURCE records.
#[derive(Debug, Default)]
pub(crate) struct PdbCompound {
    pub mol_id: i32,
    pub title: String,
    pub chains: BTreeSet<char>,
    pub info: BTreeMap<String, String>,
    pub source: BTreeMap<String, String>,
}

/// One residue of a SEQRES sequence, with the numbering recovered by the aligner.
#[derive(Clone, Debug, Default)]
pub struct PdbSeqRes {
    pub mon_id: String,
    pub seq_num: i32,
    pub icode: char,
    pub db_seq_num: i32,
    pub seen: bool,
    pub alts: BTreeSet<String>,
}

impl PdbSeqRes {
    fn same_residue(&self, mon_id: &str, seq_num: i32, icode: char) -> bool {
        self.seq_num == seq_num && self.mon_id == mon_id && self.icode == icode
    }
}

/// One residue as observed in the ATOM records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AtomRes {
    pub mon_id: String,
    pub seq_num: i32,
    pub icode: char,
}

impl AtomRes {
    fn same_position(&self, rhs: &AtomRes) -> bool {
        self.seq_num == rhs.seq_num && self.icode == rhs.icode
    }
}

/// The DBREF fields of one chain.
#[derive(Clone, Debug, Default)]
pub(crate) struct Dbref {
    pub pdb_id_code: String,
    pub chain_id: char,
    pub seq_begin: i32,
    pub insert_begin: char,
    pub seq_end: i32,
    pub insert_end: char,
    pub database: String,
    pub db_accession: String,
    pub db_id_code: String,
    pub db_seq_begin: i32,
    pub db_ins_beg: char,
    pub db_seq_end: i32,
    pub db_ins_end: char,
}

/// One chain of the legacy file.
#[derive(Debug, Default)]
pub(crate) struct PdbChain {
    pub dbref: Dbref,
    pub seqres: Vec<PdbSeqRes>,
    pub het: Vec<PdbSeqRes>,
    pub ter_index: usize,
    pub mol_id: i32,

    // Scratch values for reading SEQRES records.
    pub next_seq_num: i32,
    pub next_db_seq_num: i32,

    // Scratch value for aligning.
    pub residues_seen: Vec<AtomRes>,
}

impl PdbChain {
    fn new(chain_id: char, mol_id: i32) -> Self {
        Self {
            dbref: Dbref { chain_id, ..Default::default() },
            mol_id,
            next_seq_num: 1,
            next_db_seq_num: 1,
            ..Default::default()
        }
    }

    /// True if both chains declare exactly the same SEQRES sequence.
    pub(crate) fn same_sequence(&self, rhs: &PdbChain) -> bool {
        self.seqres.len() == rhs.seqres.len()
            && self.seqres.iter().zip(rhs.seqres.iter()).all(|(a, b)| a.mon_id == b.mon_id)
    }
}

/// One heterogen occurrence (HET record or stray HETATM residue).
#[derive(Debug, Default)]
pub(crate) struct Het {
    pub het_id: String,
    pub chain_id: char,
    pub seq_num: i32,
    pub icode: char,
    pub text: String,
    pub asym_id: String,

    /// Indices into the record list of the atoms of this het.
    pub atoms: Vec<usize>,
    pub processed: bool,
    pub branch: bool,
}

/// One SEQADV record.
#[derive(Debug)]
pub(crate) struct Seqadv {
    pub res_name: String,
    pub chain_id: char,
    pub seq_num: i32,
    pub icode: char,
    pub database: String,
    pub db_accession: String,
    pub db_res: String,
    pub db_seq: i32,
    pub conflict: String,
}

/// One unobserved residue or atom set, from REMARK 465/470.
#[derive(Debug)]
pub(crate) struct Unobs {
    pub model_nr: i32,
    pub res: String,
    pub chain: char,
    pub seq: i32,
    pub icode: char,
    pub atoms: Vec<String>,
}

/// The reconstructor itself: the record cursor plus everything the passes
/// accumulate.
pub struct PdbParser<'a> {
    records: &'a [PdbRecord],
    links: &'a [Link],
    pub(crate) remark200: &'a BTreeMap<String, String>,
    cur: usize,
    end_record: PdbRecord,

    pub(crate) datablock: Datablock,

    pub(crate) structure_id: String,
    pub(crate) model_type_details: String,
    pub(crate) original_date: String,
    pub(crate) exp_method: String,
    pub(crate) citation_author_nr: i32,
    pub(crate) citation_editor_nr: i32,
    pub(crate) next_mol_id: i32,
    pub(crate) next_entity_nr: i32,

    pub(crate) seqadvs: Vec<Seqadv>,
    pub(crate) compounds: Vec<PdbCompound>,
    pub(crate) chains: Vec<PdbChain>,
    pub(crate) hets: Vec<Het>,
    pub(crate) hetnams: BTreeMap<String, String>,
    pub(crate) hetsyns: BTreeMap<String, String>,
    pub(crate) formuls: BTreeMap<String, String>,
    pub(crate) water_het_id: String,
    pub(crate) chem_comp: Vec<String>,
    pub(crate) atom_types: Vec<String>,

    pub(crate) atom_id: i32,
    pub(crate) pdbx_dif_ordinal: i32,
    pub(crate) unobs: Vec<Unobs>,
    pub(crate) mod_res_set: Vec<String>,

    // Various maps between the numbering schemes.
    pub(crate) chain_seq_to_asym: BTreeMap<(char, i32, char), (String, i32, bool)>,
    pub(crate) mol_id_to_entity: BTreeMap<i32, String>,
    pub(crate) het_to_entity: BTreeMap<String, String>,
    pub(crate) branch_to_entity: BTreeMap<String, String>,
    pub(crate) asym_to_entity: BTreeMap<String, String>,
    pub(crate) mod_to_parent: BTreeMap<String, String>,
    pub(crate) sugar_entities: BTreeSet<String>,
}

//---------------------------------------------------------------------------//
//                           Implementations
//---------------------------------------------------------------------------//

impl<'a> PdbParser<'a> {

    /// This function creates a new parser over pre-parsed records.
    pub fn new(pre_parsed: &'a PreParsed) -> Self {
        Self {
            records: &pre_parsed.records,
            links: &pre_parsed.links,
            remark200: &pre_parsed.remark200,
            cur: 0,
            end_record: PdbRecord { line_nr: 0, name: "END   ".to_owned(), value: String::new() },

            datablock: Datablock::new("nohd"),

            structure_id: String::new(),
            model_type_details: String::new(),
            original_date: String::new(),
            exp_method: "X-RAY DIFFRACTION".to_owned(),
            citation_author_nr: 1,
            citation_editor_nr: 1,
            next_mol_id: 1,
            next_entity_nr: 1,

            seqadvs: vec![],
            compounds: vec![],
            chains: vec![],
            hets: vec![],
            hetnams: BTreeMap::new(),
            hetsyns: BTreeMap::new(),
            formuls: BTreeMap::new(),
            water_het_id: String::new(),
            chem_comp: vec![],
            atom_types: vec![],

            atom_id: 0,
            pdbx_dif_ordinal: 0,
            unobs: vec![],
            mod_res_set: vec![],

            chain_seq_to_asym: BTreeMap::new(),
            mol_id_to_entity: BTreeMap::new(),
            het_to_entity: BTreeMap::new(),
            branch_to_entity: BTreeMap::new(),
            asym_to_entity: BTreeMap::new(),
            mod_to_parent: BTreeMap::new(),
            sugar_entities: BTreeSet::new(),
        }
    }

    /// This function runs the whole pipeline and returns the reconstructed datablock.
    pub fn parse(&mut self) -> Result<Datablock> {
        self.parse_title()?;
        self.parse_remarks()?;
        self.parse_primary_structure()?;
        self.parse_heterogen()?;

        self.construct_entities()?;

        self.parse_remark_350()?;

        self.parse_secondary_structure()?;
        self.parse_connectivity_annotation()?;
        self.parse_miscellaneous_features()?;
        self.parse_crystallographic()?;
        self.parse_coordinate_transformation()?;

        let mut model_nr = 1;
        let mut has_atoms = false;

        while self.rec().is("MODEL ") || self.rec().is("ATOM  ") || self.rec().is("HETATM") {
            let model = self.rec().is("MODEL ");
            if model {
                model_nr = self.vi(11, 14);
                self.next_record();
            }

            has_atoms = has_atoms || self.rec().is("ATOM  ") || self.rec().is("HETATM");

            self.parse_coordinate(model_nr)?;

            if model {
                self.match_rec("ENDMDL", true)?;
                self.next_record();
            }
        }

        if !has_atoms {
            return Err(RCifError::UnexpectedPdbRecord(
                "ATOM".to_owned(),
                self.rec().name.trim().to_owned(),
            ));
        }

        let atom_types = std::mem::take(&mut self.atom_types);
        for symbol in &atom_types {
            self.emplace("atom_type", &[("symbol", symbol)])?;
        }

        // In V5 files, atom_type is sorted.
        if let Some(cat) = self.datablock.get_mut("atom_type") {
            let order: Vec<_> = cat.order_by(cat.rows().collect(), &["symbol"]);
            let symbols: Vec<String> = order.iter().map(|id| cat.value(*id, "symbol").to_owned()).collect();
            cat.clear();
            for symbol in &symbols {
                cat.emplace(&[("symbol", symbol)])?;
            }
        }

        self.parse_connectivity()?;
        self.parse_bookkeeping()?;

        self.parse_remark_3()?;
        self.fix_struct_conn_distances()?;

        let name = self.datablock.name().to_owned();
        Ok(std::mem::replace(&mut self.datablock, Datablock::new(&name)))
    }

    //-----------------------------------------------------------------------//
    //                        Record navigation
    //-----------------------------------------------------------------------//

    /// The record under the cursor, or a synthetic END after the last one.
    pub(crate) fn rec(&self) -> &PdbRecord {
        self.records.get(self.cur).unwrap_or(&self.end_record)
    }

    pub(crate) fn next_record(&mut self) {
        if self.cur < self.records.len() {
            self.cur += 1;
        }
    }

    pub(crate) fn match_rec(&self, expected: &str, throw_if_missing: bool) -> Result<()> {
        if !self.rec().is(expected) {
            if throw_if_missing {
                return Err(RCifError::UnexpectedPdbRecord(
                    expected.trim().to_owned(),
                    self.rec().name.trim().to_owned(),
                ));
            }

            log::debug!("expected record {expected} but found {}", self.rec().name);
        }

        Ok(())
    }

    /// Index of the first record with the provided name, if any.
    pub(crate) fn find_record(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.is(name))
    }

    /// The record at an absolute index. The returned reference borrows the
    /// backing slice, not the parser, so state may be mutated while held.
    pub(crate) fn record(&self, index: usize) -> &'a PdbRecord {
        &self.records[index]
    }

    pub(crate) fn record_count(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn vc(&self, column: usize) -> char {
        self.rec().vc(column)
    }

    pub(crate) fn vs(&self, column_first: usize, column_last: usize) -> String {
        self.rec().vs(column_first, column_last)
    }

    pub(crate) fn vs_from(&self, column_first: usize) -> String {
        self.rec().vs_from(column_first)
    }

    pub(crate) fn vi(&self, column_first: usize, column_last: usize) -> i32 {
        self.rec().vi(column_first, column_last)
    }

    pub(crate) fn vf(&self, column_first: usize, column_last: usize) -> String {
        self.rec().vf(column_first, column_last)
    }

    //-----------------------------------------------------------------------//
    //                        Shared state helpers
    //-----------------------------------------------------------------------//

    /// The compound for a MOL_ID, created (with its entity number) if needed.
    pub(crate) fn get_or_create_compound(&mut self, mol_id: i32) -> &mut PdbCompound {
        if let Some(position) = self.compounds.iter().position(|c| c.mol_id == mol_id) {
            return &mut self.compounds[position];
        }

        self.compounds.push(PdbCompound { mol_id, ..Default::default() });
        self.mol_id_to_entity.insert(mol_id, self.next_entity_nr.to_string());
        self.next_entity_nr += 1;

        self.compounds.last_mut().expect("just pushed")
    }

    /// The chain record for a chain id, created with dummy data if missing.
    pub(crate) fn get_chain_for_id(&mut self, chain_id: char) -> &mut PdbChain {
        if let Some(position) = self.chains.iter().position(|c| c.dbref.chain_id == chain_id) {
            return &mut self.chains[position];
        }

        let mol_id = self.compounds.iter()
            .find(|c| c.chains.contains(&chain_id))
            .map(|c| c.mol_id)
            .unwrap_or(0);

        self.chains.push(PdbChain::new(chain_id, mol_id));
        self.chains.last_mut().expect("just pushed")
    }

    pub(crate) fn insert_chem_comp(&mut self, chem_comp: &str) {
        if !self.chem_comp.iter().any(|c| c == chem_comp) {
            self.chem_comp.push(chem_comp.to_owned());
        }
    }

    pub(crate) fn insert_atom_type(&mut self, atom_type: &str) {
        if !atom_type.is_empty() && !self.atom_types.iter().any(|t| t == atom_type) {
            self.atom_types.push(atom_type.to_owned());
        }
    }

    /// This function maps a PDB residue location onto `(asymID, seqID, is_polymer)`.
    pub(crate) fn map_residue(&self, chain_id: char, res_seq: i32, icode: char) -> Option<(String, i32, bool)> {
        self.chain_seq_to_asym.get(&(chain_id, res_seq, icode)).cloned()
    }

    /// Like [PdbParser::map_residue], but failing with the residue named.
    pub(crate) fn map_residue_req(&self, chain_id: char, res_seq: i32, icode: char) -> Result<(String, i32, bool)> {
        self.map_residue(chain_id, res_seq, icode).ok_or_else(|| {
            RCifError::UnmappableResidue(
                String::new(),
                res_seq,
                if icode == ' ' { String::new() } else { icode.to_string() },
                chain_id.to_string(),
            )
        })
    }

    /// Alternate location indicators seen for one atom, over all ATOM records.
    pub(crate) fn alt_locs_for_atom(&self, chain_id: char, res_seq: i32, icode: char, atom_name: &str) -> Vec<char> {
        let mut result = BTreeSet::new();

        for r in self.records {
            if r.is("ATOM  ") || r.is("HETATM") {
                let alt_loc = r.vc(17);
                if alt_loc != ' '
                    && r.vc(22) == chain_id
                    && r.vi(23, 26) == res_seq
                    && r.vc(27) == icode
                    && r.vs(13, 16) == atom_name
                {
                    result.insert(alt_loc);
                }
            }
        }

        result.into_iter().collect()
    }

    /// The asym ids a legacy chain id maps to, shortest first.
    pub(crate) fn map_chain_to_asyms(&self, chain_id: char) -> Vec<String> {
        let mut result: Vec<String> = self.chain_seq_to_asym.iter()
            .filter(|((c, _, _), _)| *c == chain_id)
            .map(|(_, (asym, _, _))| asym.clone())
            .collect();

        result.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        result.dedup();
        result
    }

    /// The other end of a LINK record touching the provided atom, if any.
    pub(crate) fn find_link(&self, atom: &LinkAtom, name2: &str, res_name2: &str) -> Option<LinkAtom> {
        for link in self.links {
            if link.a == *atom && link.b.name == name2 && (res_name2.is_empty() || link.b.res_name == res_name2) {
                return Some(link.b.clone());
            }
            if link.b == *atom && link.a.name == name2 && (res_name2.is_empty() || link.a.res_name == res_name2) {
                return Some(link.a.clone());
            }
        }

        None
    }

    //-----------------------------------------------------------------------//
    //                             Emission
    //-----------------------------------------------------------------------//

    /// This function appends one row to a category of the output datablock.
    pub(crate) fn emplace(&mut self, category: &str, items: &[(&str, &str)]) -> Result<()> {
        let cat = self.datablock.category_mut(category)?;
        cat.emplace(items)?;
        Ok(())
    }

    //-----------------------------------------------------------------------//
    //                      Trailing sections & fixups
    //-----------------------------------------------------------------------//

    fn parse_connectivity(&mut self) -> Result<()> {
        while self.rec().is("CONECT") {
            self.next_record();
        }

        Ok(())
    }

    fn parse_bookkeeping(&mut self) -> Result<()> {
        if self.rec().is("MASTER") {
            self.match_rec("MASTER", false)?;
            self.next_record();
        }

        self.match_rec("END   ", false)?;
        Ok(())
    }

    fn parse_remark_3(&mut self) -> Result<()> {
        let start = match self.find_record("REMARK   3") {
            Some(start) => start,
            None => return Ok(()),
        };

        let parsed = super::remark3::parse(&self.exp_method, &self.records[start..], &mut self.datablock)?;

        if parsed {

            // Make sure the exptl category exists once refinement stats landed.
            let empty = self.datablock.get("exptl").map(|c| c.is_empty()).unwrap_or(true);
            if empty {
                let entry_id = self.structure_id.clone();
                let method = self.exp_method.clone();
                let crystals = self.remark200.get("NUMBER OF CRYSTALS USED").cloned().unwrap_or_default();
                self.emplace("exptl", &[
                    ("entry_id", &entry_id),
                    ("method", &method),
                    ("crystals_number", &crystals),
                ])?;
            }
        }

        Ok(())
    }

    /// Links whose distance is missing or zero get it recomputed from the
    /// coordinates, when both atoms are in the reference cell.
    fn fix_struct_conn_distances(&mut self) -> Result<()> {
        let conn = match self.datablock.get("struct_conn") {
            Some(conn) => conn,
            None => return Ok(()),
        };

        let atom_site = match self.datablock.get("atom_site") {
            Some(atom_site) => atom_site,
            None => return Ok(()),
        };

        let mut fixes = vec![];

        for row in conn.rows() {
            let current = conn.value(row, "pdbx_dist_value");
            if !(current.is_empty() || current.parse::<f64>().map(|v| v == 0.0).unwrap_or(false)) {
                continue;
            }

            let asym1 = conn.value(row, "ptnr1_label_asym_id");
            let seq1 = conn.value(row, "ptnr1_label_seq_id");
            let atom1 = conn.value(row, "ptnr1_label_atom_id");
            let symm1 = conn.value(row, "ptnr1_symmetry");
            let asym2 = conn.value(row, "ptnr2_label_asym_id");
            let seq2 = conn.value(row, "ptnr2_label_seq_id");
            let atom2 = conn.value(row, "ptnr2_label_atom_id");
            let symm2 = conn.value(row, "ptnr2_symmetry");

            let mut distance = 1.0f64;

            let a1 = atom_site.first(
                &(key("label_asym_id").is(asym1) & key("label_seq_id").is(seq1) & key("label_atom_id").is(atom1)),
            );
            let a2 = atom_site.first(
                &(key("label_asym_id").is(asym2) & key("label_seq_id").is(seq2) & key("label_atom_id").is(atom2)),
            );

            match (a1, a2) {
                (Some(a1), Some(a2)) => {
                    let coords = |id| -> Option<nalgebra::Point3<f64>> {
                        Some(nalgebra::Point3::new(
                            atom_site.value(id, "Cartn_x").parse().ok()?,
                            atom_site.value(id, "Cartn_y").parse().ok()?,
                            atom_site.value(id, "Cartn_z").parse().ok()?,
                        ))
                    };

                    let in_reference_cell = (symm1.is_empty() || symm1 == "1_555") && (symm2.is_empty() || symm2 == "1_555");

                    match (coords(a1), coords(a2)) {
                        (Some(p1), Some(p2)) if in_reference_cell => {
                            distance = nalgebra::distance(&p1, &p2);
                        }
                        (Some(_), Some(_)) => {
                            log::debug!("cannot calculate distance for link since one of the atoms is in another dimension");
                        }
                        _ => log::debug!("error finding atom coordinates for LINK distance calculation"),
                    }
                }
                _ => log::debug!("error finding atom for LINK distance calculation"),
            }

            fixes.push((row, format!("{distance:.2}")));
        }

        if let Some(conn) = self.datablock.get_mut("struct_conn") {
            for (row, value) in fixes {
                conn.set_value(row, "pdbx_dist_value", &value)?;
            }
        }

        Ok(())
    }

    /// True if the compound factory knows this residue as a building block.
    pub(crate) fn is_monomer(res_name: &str) -> bool {
        let factory = compound_factory();
        factory.is_known_peptide(res_name) || factory.is_known_base(res_name)
    }
}
