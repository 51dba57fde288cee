//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Entity and asym construction.
//!
//! This pass fuses COMPND/SOURCE, SEQRES and the ATOM records into the
//! dictionary's entity model: polymer entities with their sequences and
//! source organisms, water and non-polymer entities, the synthetic asym ids,
//! and the `(chainID, resSeq, iCode)` to `(asymID, label_seq)` map everything
//! downstream depends on.

use std::collections::BTreeMap;

use crate::compound::{compound_factory, one_letter_code};
use crate::error::{RCifError, Result};
use crate::pdb::{cif_id_for_number, is_water, align};

use super::{Het, PdbParser, PdbSeqRes, AtomRes};

impl PdbParser<'_> {

    pub(crate) fn construct_entities(&mut self) -> Result<()> {
        self.collect_residues_seen()?;

        // Prune completely empty chains.
        self.chains.retain(|c| !(c.residues_seen.is_empty() && c.seqres.is_empty()));

        self.align_chains()?;
        self.classify_het_atoms();
        self.create_missing_compounds();

        let mut asym_nr = self.write_poly_seq_scheme()?;
        self.write_compounds()?;

        // Build sugar trees first; they steal hets and asym numbers.
        self.construct_sugar_trees(&mut asym_nr)?;

        self.write_nonpoly_entities(&mut asym_nr)?;
        self.write_mod_residues()?;
        self.write_chem_comps()?;
        self.write_unobs()?;

        Ok(())
    }

    /// First pass over the coordinates of model 1: which residues exist, and
    /// where the TER records are.
    fn collect_residues_seen(&mut self) -> Result<()> {
        let mut residues_seen: BTreeMap<(char, i32, char, char), String> = BTreeMap::new();

        for index in 0..self.record_count() {
            let r = self.record(index);

            if r.is("MODEL ") {
                if r.vi(11, 14) != 1 {
                    break;
                }
                continue;
            }

            if r.is("ATOM  ") || r.is("HETATM") {
                let name = r.vs(13, 16);
                let alt_loc = r.vc(17);
                let res_name = r.vs(18, 20);
                let chain_id = r.vc(22);
                let res_seq = r.vi(23, 26);
                let icode = r.vc(27);
                let model_nr = 1;

                // Validate; too sad this is required.
                let k = (chain_id, res_seq, icode, alt_loc);
                match residues_seen.get(&k) {
                    None => {
                        residues_seen.insert(k, res_name.clone());
                    }
                    Some(seen) if *seen != res_name => {
                        return Err(RCifError::ValidationError(format!(
                            "inconsistent residue type for {chain_id}{res_seq}{icode}{alt_loc} ({seen} != {res_name})"
                        )));
                    }
                    _ => {}
                }

                let is_monomer = Self::is_monomer(&res_name);
                let chain = self.get_chain_for_id(chain_id);

                let ar = AtomRes { mon_id: res_name.clone(), seq_num: res_seq, icode };
                if (chain.residues_seen.is_empty() || !chain.residues_seen.last().map(|l| l.same_position(&ar)).unwrap_or(false))
                    && is_monomer
                {
                    chain.residues_seen.push(ar);
                }

                // Observed atoms leave the unobs list.
                self.unobs.retain_mut(|u| {
                    if model_nr == u.model_nr.max(1)
                        && res_name == u.res
                        && chain_id == u.chain
                        && res_seq == u.seq
                        && icode == u.icode
                    {
                        u.atoms.retain(|a| *a != name);
                        !u.atoms.is_empty()
                    } else {
                        true
                    }
                });

                continue;
            }

            if r.is("TER   ") {
                let chain_id = r.vc(22);
                let chain = self.get_chain_for_id(chain_id);

                // Only the first TER counts; some programs write several.
                if chain.ter_index == 0 {
                    chain.ter_index = chain.residues_seen.len();
                }
            }
        }

        Ok(())
    }

    /// Align each chain's observed residues against its SEQRES, or
    /// reconstruct the SEQRES from the observations when there is none.
    fn align_chains(&mut self) -> Result<()> {
        let mut inserted_comps = vec![];

        for chain in &mut self.chains {
            if !(chain.seqres.is_empty() || chain.residues_seen.is_empty()) {
                if chain.ter_index > 0 {
                    chain.residues_seen.truncate(chain.ter_index);
                }

                let last_residue_index = align::align_res_to_seqres(
                    chain.dbref.chain_id,
                    &mut chain.seqres,
                    &chain.residues_seen,
                )?;

                if last_residue_index > 0 && last_residue_index + 1 < chain.residues_seen.len() {
                    let r = &chain.residues_seen[last_residue_index + 1];
                    log::debug!(
                        "detected residues that cannot be aligned to SEQRES, first is {}:{}{}",
                        chain.dbref.chain_id, r.seq_num,
                        if r.icode == ' ' { String::new() } else { r.icode.to_string() }
                    );
                    chain.ter_index = last_residue_index + 1;
                }
            } else {

                // No SEQRES: reconstruct it from the observations, first
                // pushing the TER index past the last known monomer.
                let factory = compound_factory();
                for ix in chain.ter_index..chain.residues_seen.len() {
                    let res_name = chain.residues_seen[ix].mon_id.clone();

                    if factory.is_known_peptide(&res_name) || factory.is_known_base(&res_name) {
                        chain.ter_index = ix + 1;
                    }

                    inserted_comps.push(res_name);
                }

                for ix in 0..chain.ter_index.min(chain.residues_seen.len()) {
                    let ar = chain.residues_seen[ix].clone();
                    chain.seqres.push(PdbSeqRes {
                        mon_id: ar.mon_id,
                        seq_num: ar.seq_num,
                        icode: ar.icode,
                        db_seq_num: ar.seq_num,
                        seen: true,
                        ..Default::default()
                    });
                }
            }
        }

        for comp in inserted_comps {
            self.insert_chem_comp(&comp);
        }

        Ok(())
    }

    /// Second pass over the coordinates: mark SEQRES residues as seen, gather
    /// true heterogens, and detect chains whose tail is non-polymer.
    fn classify_het_atoms(&mut self) {
        let mut terminated_chains = vec![];
        let mut residue_per_chain_counter: BTreeMap<char, usize> = BTreeMap::new();
        let mut inserted_comps = vec![];

        for index in 0..self.record_count() {
            let r = self.record(index);

            if r.is("MODEL ") {
                if r.vi(11, 14) != 1 {
                    break;
                }
                continue;
            }

            if r.is("TER   ") {
                let chain_id = r.vc(22);
                if !terminated_chains.contains(&chain_id) {
                    terminated_chains.push(chain_id);
                }
                continue;
            }

            if !(r.is("ATOM  ") || r.is("HETATM")) {
                continue;
            }

            let alt_loc = r.vc(17);
            let res_name = r.vs(18, 20);
            let chain_id = r.vc(22);
            let res_seq = r.vi(23, 26);
            let icode = r.vc(27);

            let is_monomer = Self::is_monomer(&res_name);

            let (_in_seqres, ter_index) = {
                let chain = self.get_chain_for_id(chain_id);

                let mut i = chain.seqres.iter_mut().find(|sr| sr.same_residue(&res_name, res_seq, icode));

                // Alternates may carry another residue name at the same spot.
                if i.is_none() && alt_loc != ' ' {
                    i = chain.seqres.iter_mut().find(|sr| sr.seq_num == res_seq && sr.icode == icode);
                }

                match i {
                    Some(sr) => {
                        sr.seen = true;
                        if sr.mon_id != res_name {
                            sr.alts.insert(res_name.clone());
                        }
                        (true, chain.ter_index)
                    }
                    None => {
                        let residues = &mut chain.het;
                        if residues.is_empty() || residues.last().map(|l| l.seq_num != res_seq).unwrap_or(true) {
                            let pos = residues.partition_point(|r1| r1.seq_num < res_seq);
                            residues.insert(pos, PdbSeqRes {
                                mon_id: res_name.clone(),
                                seq_num: res_seq,
                                icode,
                                db_seq_num: res_seq,
                                seen: true,
                                ..Default::default()
                            });

                            inserted_comps.push(res_name.clone());
                        }
                        (false, chain.ter_index)
                    }
                }
            };

            let counter = residue_per_chain_counter.entry(chain_id).or_insert(0);
            *counter += 1;
            let residue_count = *counter;

            // There appears to be a program that writes out HETATM records as
            // ATOM records.
            if !is_monomer || terminated_chains.contains(&chain_id) || (ter_index > 0 && residue_count >= ter_index) {
                if is_water(&res_name) {
                    self.water_het_id = res_name.clone();
                }

                let position = self.hets.iter().position(|het| {
                    het.het_id == res_name && het.chain_id == chain_id && het.seq_num == res_seq && het.icode == icode
                });

                let position = match position {
                    Some(position) => position,
                    None => {
                        self.hets.push(Het {
                            het_id: res_name.clone(),
                            chain_id,
                            seq_num: res_seq,
                            icode,
                            ..Default::default()
                        });
                        self.hets.len() - 1
                    }
                };

                self.hets[position].atoms.push(index);
            }
        }

        for comp in inserted_comps {
            self.insert_chem_comp(&comp);
        }
    }

    /// Chains without a COMPND block still need a compound; identical
    /// sequences share one.
    fn create_missing_compounds(&mut self) {
        for index in 0..self.chains.len() {
            if self.chains[index].mol_id != 0 || self.chains[index].seqres.is_empty() {
                continue;
            }

            let mut mol_id = 0;
            for other in 0..self.chains.len() {
                if other == index || self.chains[other].mol_id == 0 {
                    continue;
                }

                if self.chains[index].same_sequence(&self.chains[other]) {
                    mol_id = self.chains[other].mol_id;
                    break;
                }
            }

            if mol_id == 0 {
                mol_id = self.next_mol_id;
                self.next_mol_id += 1;

                let chain_id = self.chains[index].dbref.chain_id;
                let comp = self.get_or_create_compound(mol_id);
                comp.chains.insert(chain_id);
            }

            self.chains[index].mol_id = mol_id;
        }
    }

    /// The poly-seq scheme plus struct_asym rows, and the big numbering map.
    fn write_poly_seq_scheme(&mut self) -> Result<usize> {
        let mut asym_nr = 0usize;
        let mut rows: Vec<Vec<(String, String)>> = vec![];
        let mut asym_rows: Vec<Vec<(String, String)>> = vec![];

        for ci in 0..self.chains.len() {
            let asym_id = cif_id_for_number(asym_nr);
            asym_nr += 1;

            let mol_id = self.chains[ci].mol_id;
            let entity_id = match self.mol_id_to_entity.get(&mol_id) {
                Some(entity_id) => entity_id.clone(),
                None => continue,
            };

            self.asym_to_entity.insert(asym_id.clone(), entity_id.clone());

            let chain_id = self.chains[ci].dbref.chain_id;
            asym_rows.push(vec![
                ("id".to_owned(), asym_id.clone()),
                ("pdbx_blank_PDB_chainid_flag".to_owned(), if chain_id == ' ' { "Y" } else { "N" }.to_owned()),
                ("entity_id".to_owned(), entity_id.clone()),
            ]);

            let mut seq_nr = 1;
            for res in &self.chains[ci].seqres {
                self.chain_seq_to_asym.insert((chain_id, res.seq_num, res.icode), (asym_id.clone(), seq_nr, true));

                let seq_id = seq_nr.to_string();
                seq_nr += 1;

                let mut mon_ids = vec![res.mon_id.clone()];
                mon_ids.extend(res.alts.iter().cloned());

                for mon_id in mon_ids {
                    let hetero = if res.alts.is_empty() { "n" } else { "y" };

                    if res.seen {
                        let auth_ins_code = if res.icode != ' ' { res.icode.to_string() } else { ".".to_owned() };
                        rows.push(vec![
                            ("asym_id".to_owned(), asym_id.clone()),
                            ("entity_id".to_owned(), entity_id.clone()),
                            ("seq_id".to_owned(), seq_id.clone()),
                            ("mon_id".to_owned(), mon_id.clone()),
                            ("ndb_seq_num".to_owned(), seq_id.clone()),
                            ("pdb_seq_num".to_owned(), res.seq_num.to_string()),
                            ("auth_seq_num".to_owned(), res.seq_num.to_string()),
                            ("pdb_mon_id".to_owned(), mon_id.clone()),
                            ("auth_mon_id".to_owned(), mon_id.clone()),
                            ("pdb_strand_id".to_owned(), chain_id.to_string()),
                            ("pdb_ins_code".to_owned(), auth_ins_code),
                            ("hetero".to_owned(), hetero.to_owned()),
                        ]);
                    } else {
                        let auth_ins_code = if res.icode != ' ' { format!("{}A", res.icode) } else { ".".to_owned() };
                        rows.push(vec![
                            ("asym_id".to_owned(), asym_id.clone()),
                            ("entity_id".to_owned(), entity_id.clone()),
                            ("seq_id".to_owned(), seq_id.clone()),
                            ("mon_id".to_owned(), mon_id.clone()),
                            ("ndb_seq_num".to_owned(), seq_id.clone()),
                            ("pdb_seq_num".to_owned(), res.seq_num.to_string()),
                            ("auth_seq_num".to_owned(), ".".to_owned()),
                            ("pdb_mon_id".to_owned(), ".".to_owned()),
                            ("auth_mon_id".to_owned(), ".".to_owned()),
                            ("pdb_strand_id".to_owned(), chain_id.to_string()),
                            ("pdb_ins_code".to_owned(), auth_ins_code),
                            ("hetero".to_owned(), hetero.to_owned()),
                        ]);
                    }
                }
            }
        }

        for row in asym_rows {
            let items: Vec<(&str, &str)> = row.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            self.emplace("struct_asym", &items)?;
        }

        for row in rows {
            let items: Vec<(&str, &str)> = row.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            self.emplace("pdbx_poly_seq_scheme", &items)?;
        }

        Ok(asym_nr)
    }

    /// The entity rows for the polymer compounds, with sources, sequences and
    /// database references.
    fn write_compounds(&mut self) -> Result<()> {
        let mut struct_ref_id = 0u32;
        let mut struct_ref_seq_align_id = 0u32;

        let mut struct_title: Vec<String> = vec![];
        let mut struct_description: Vec<String> = vec![];

        for cmp_index in 0..self.compounds.len() {
            struct_ref_id += 1;

            let mol_id = self.compounds[cmp_index].mol_id;
            let entity_id = self.mol_id_to_entity.get(&mol_id).cloned().unwrap_or_default();

            let info_map = self.compounds[cmp_index].info.clone();
            let source_map = self.compounds[cmp_index].source.clone();
            let info = |key: &str| info_map.get(key).cloned().unwrap_or_default();
            let source = |key: &str| source_map.get(key).cloned().unwrap_or_default();

            let src_method;
            let ref_id = struct_ref_id.to_string();

            if !source("SYNTHETIC").is_empty() {
                src_method = "syn";

                let organism = source("ORGANISM_SCIENTIFIC");
                let taxid = source("ORGANISM_TAXID");
                self.emplace("pdbx_entity_src_syn", &[
                    ("entity_id", &entity_id),
                    ("pdbx_src_id", &ref_id),
                    ("organism_scientific", &organism),
                    ("ncbi_taxonomy_id", &taxid),
                ])?;
            } else if info("ENGINEERED") == "YES" || !source("EXPRESSION_SYSTEM").is_empty() {
                src_method = "man";

                let items = [
                    ("gene_src_common_name", source("ORGANISM_COMMON")),
                    ("pdbx_gene_src_gene", source("GENE")),
                    ("gene_src_strain", source("STRAIN")),
                    ("gene_src_tissue", source("TISSUE")),
                    ("gene_src_tissue_fraction", source("TISSUE_FRACTION")),
                    ("pdbx_gene_src_cell_line", source("CELL_LINE")),
                    ("pdbx_gene_src_organelle", source("ORGANELLE")),
                    ("pdbx_gene_src_cell", source("CELL")),
                    ("pdbx_gene_src_cellular_location", source("CELLULAR_LOCATION")),
                    ("host_org_common_name", source("EXPRESSION_SYSTEM_COMMON")),
                    ("pdbx_gene_src_scientific_name", source("ORGANISM_SCIENTIFIC")),
                    ("pdbx_gene_src_ncbi_taxonomy_id", source("ORGANISM_TAXID")),
                    ("pdbx_host_org_scientific_name", source("EXPRESSION_SYSTEM")),
                    ("pdbx_host_org_ncbi_taxonomy_id", source("EXPRESSION_SYSTEM_TAXID")),
                    ("pdbx_host_org_strain", source("EXPRESSION_SYSTEM_STRAIN")),
                    ("pdbx_host_org_variant", source("EXPRESSION_SYSTEM_VARIANT")),
                    ("pdbx_host_org_cell_line", source("EXPRESSION_SYSTEM_CELL_LINE")),
                    ("pdbx_host_org_cellular_location", source("EXPRESSION_SYSTEM_CELLULAR_LOCATION")),
                    ("pdbx_host_org_vector_type", source("EXPRESSION_SYSTEM_VECTOR_TYPE")),
                    ("pdbx_host_org_vector", source("EXPRESSION_SYSTEM_VECTOR")),
                    ("pdbx_host_org_gene", source("EXPRESSION_SYSTEM_GENE")),
                    ("plasmid_name", source("EXPRESSION_SYSTEM_PLASMID")),
                    ("pdbx_description", source("OTHER_DETAILS")),
                ];

                let mut row: Vec<(&str, &str)> = vec![("entity_id", &entity_id), ("pdbx_src_id", &ref_id)];
                for (k, v) in &items {
                    row.push((k, v.as_str()));
                }
                self.emplace("entity_src_gen", &row)?;
            } else if !source("ORGANISM_SCIENTIFIC").is_empty() {
                src_method = "nat";

                let items = [
                    ("common_name", source("ORGANISM_COMMON")),
                    ("strain", source("STRAIN")),
                    ("pdbx_secretion", source("SECRETION")),
                    ("pdbx_organism_scientific", source("ORGANISM_SCIENTIFIC")),
                    ("pdbx_ncbi_taxonomy_id", source("ORGANISM_TAXID")),
                    ("pdbx_cellular_location", source("CELLULAR_LOCATION")),
                    ("pdbx_plasmid_name", source("PLASMID")),
                    ("pdbx_organ", source("ORGAN")),
                ];

                let mut row: Vec<(&str, &str)> = vec![("entity_id", &entity_id), ("pdbx_src_id", &ref_id)];
                for (k, v) in &items {
                    row.push((k, v.as_str()));
                }
                self.emplace("entity_src_nat", &row)?;
            } else {
                src_method = "";
            }

            let description = info("MOLECULE");
            let details = info("OTHER_DETAILS");
            let mutation = info("MUTATION");
            let fragment = info("FRAGMENT");
            let ec = info("EC");
            let molecules = self.compounds[cmp_index].chains.len().to_string();

            self.emplace("entity", &[
                ("id", &entity_id),
                ("type", "polymer"),
                ("src_method", src_method),
                ("pdbx_description", &description),
                ("pdbx_number_of_molecules", &molecules),
                ("details", &details),
                ("pdbx_mutation", &mutation),
                ("pdbx_fragment", &fragment),
                ("pdbx_ec", &ec),
            ])?;

            if !info("SYNONYM").is_empty() {
                let synonym = info("SYNONYM");
                self.emplace("entity_name_com", &[("entity_id", &entity_id), ("name", &synonym)])?;
            }

            let mut desc = info("MOLECULE");
            if !ec.is_empty() {
                desc += &format!(" (E.C.{ec})");
            }

            if !self.compounds[cmp_index].title.is_empty() && !struct_title.contains(&self.compounds[cmp_index].title) {
                struct_title.push(self.compounds[cmp_index].title.clone());
            }

            if !desc.is_empty() && !struct_description.contains(&desc) {
                struct_description.push(desc);
            }

            // struct_ref from the first chain of the compound with a dbref.
            let chain_index = self.chains.iter().position(|c| self.compounds[cmp_index].chains.contains(&c.dbref.chain_id));
            if let Some(chain_index) = chain_index {
                if !self.chains[chain_index].dbref.db_id_code.is_empty() {
                    let dbref = self.chains[chain_index].dbref.clone();
                    self.emplace("struct_ref", &[
                        ("id", &ref_id),
                        ("entity_id", &entity_id),
                        ("db_name", &dbref.database),
                        ("db_code", &dbref.db_id_code),
                        ("pdbx_db_accession", &dbref.db_accession),
                    ])?;
                }
            }

            let mut nstd_monomer = false;
            let mut nonstandard_linkage = false;
            let mut might_be_polypeptide = true;
            let mut might_be_dna = true;

            let mut chains: Vec<String> = vec![];
            let mut seq = String::new();
            let mut seq_can = String::new();

            for chain_index in 0..self.chains.len() {
                if self.chains[chain_index].mol_id != mol_id {
                    continue;
                }

                struct_ref_seq_align_id += 1;
                let dbref = self.chains[chain_index].dbref.clone();

                if !dbref.database.is_empty() {
                    let ins_to_str = |i: char| if i == ' ' || !i.is_ascii_graphic() { String::new() } else { i.to_string() };

                    // The alignment region in label numbering, recovered from
                    // the scheme written above.
                    let seq_align_beg = self.map_residue(dbref.chain_id, dbref.seq_begin, dbref.insert_begin)
                        .map(|(_, seq, _)| seq.to_string())
                        .unwrap_or_default();
                    let seq_align_end = self.map_residue(dbref.chain_id, dbref.seq_end, dbref.insert_end)
                        .map(|(_, seq, _)| seq.to_string())
                        .unwrap_or_default();

                    let align_id = struct_ref_seq_align_id.to_string();
                    self.emplace("struct_ref_seq", &[
                        ("align_id", &align_id),
                        ("ref_id", &ref_id),
                        ("pdbx_PDB_id_code", &dbref.pdb_id_code),
                        ("pdbx_strand_id", &dbref.chain_id.to_string()),
                        ("seq_align_beg", &seq_align_beg),
                        ("pdbx_seq_align_beg_ins_code", &ins_to_str(dbref.insert_begin)),
                        ("seq_align_end", &seq_align_end),
                        ("pdbx_seq_align_end_ins_code", &ins_to_str(dbref.insert_end)),
                        ("pdbx_db_accession", &dbref.db_accession),
                        ("db_align_beg", &dbref.db_seq_begin.to_string()),
                        ("pdbx_db_align_beg_ins_code", &ins_to_str(dbref.db_ins_beg)),
                        ("db_align_end", &dbref.db_seq_end.to_string()),
                        ("pdbx_db_align_end_ins_code", &ins_to_str(dbref.db_ins_end)),
                        ("pdbx_auth_seq_align_beg", &dbref.seq_begin.to_string()),
                        ("pdbx_auth_seq_align_end", &dbref.seq_end.to_string()),
                    ])?;

                    // struct_ref_seq_dif from the SEQADV records of this chain.
                    for seqadv_index in 0..self.seqadvs.len() {
                        let (chain_id, res_name) = {
                            let s = &self.seqadvs[seqadv_index];
                            (s.chain_id, s.res_name.clone())
                        };
                        if chain_id != dbref.chain_id || res_name.is_empty() {
                            continue;
                        }

                        let (seq_num, icode) = {
                            let s = &self.seqadvs[seqadv_index];
                            (s.seq_num, s.icode)
                        };

                        let mapped = match self.map_residue(chain_id, seq_num, icode) {
                            Some(mapped) => mapped,
                            None => {
                                log::debug!("dropping unmatched SEQADV record");
                                continue;
                            }
                        };

                        self.pdbx_dif_ordinal += 1;

                        let s_database = self.seqadvs[seqadv_index].database.clone();
                        let s_accession = self.seqadvs[seqadv_index].db_accession.clone();
                        let s_db_res = self.seqadvs[seqadv_index].db_res.clone();
                        let s_db_seq = self.seqadvs[seqadv_index].db_seq.to_string();
                        let s_conflict = self.seqadvs[seqadv_index].conflict.clone();

                        let align_id = struct_ref_seq_align_id.to_string();
                        let label_seq = mapped.1.to_string();
                        let ordinal = self.pdbx_dif_ordinal.to_string();
                        let ins = if icode == ' ' { String::new() } else { icode.to_string() };

                        self.emplace("struct_ref_seq_dif", &[
                            ("align_id", &align_id),
                            ("pdbx_PDB_id_code", &dbref.pdb_id_code),
                            ("mon_id", &res_name),
                            ("pdbx_pdb_strand_id", &chain_id.to_string()),
                            ("seq_num", &label_seq),
                            ("pdbx_pdb_ins_code", &ins),
                            ("pdbx_seq_db_name", &s_database),
                            ("pdbx_seq_db_accession_code", &s_accession),
                            ("db_mon_id", &s_db_res),
                            ("pdbx_seq_db_seq_num", &s_db_seq),
                            ("details", &s_conflict),
                            ("pdbx_auth_seq_num", &seq_num.to_string()),
                            ("pdbx_ordinal", &ordinal),
                        ])?;
                    }
                }

                let chain_id = self.chains[chain_index].dbref.chain_id;
                if !chains.is_empty() {

                    // Not the first chain of this compound; sequences are shared.
                    chains.push(chain_id.to_string());
                    continue;
                }

                chains.push(chain_id.to_string());

                // Build the one-letter codes and the entity_poly_seq rows.
                let mut seq_len = 0;
                let mut seq_can_len = 0;
                let factory = compound_factory();

                let seqres = self.chains[chain_index].seqres.clone();

                for res in &seqres {
                    let std_res = self.mod_to_parent.get(&res.mon_id).cloned();

                    let mut letter;
                    match one_letter_code(&res.mon_id) {
                        Some(code) if factory.is_known_peptide(&res.mon_id) => {
                            letter = code.to_string();
                            might_be_dna = false;
                        }
                        Some(code) => {
                            letter = code.to_string();
                            might_be_polypeptide = false;
                        }
                        None => {
                            nstd_monomer = true;
                            letter = format!("({})", res.mon_id);

                            let lookup = std_res.clone().unwrap_or_else(|| res.mon_id.clone());
                            if let Some(compound) = factory.lookup_compound(&lookup) {
                                if !compound.comp_type.eq_ignore_ascii_case("L-peptide linking")
                                    && !compound.comp_type.eq_ignore_ascii_case("RNA linking")
                                {
                                    nonstandard_linkage = true;
                                }
                            }
                        }
                    }

                    if seq_len + letter.len() > 80 {
                        seq.push('\n');
                        seq_len = 0;
                    }
                    seq += &letter;
                    seq_len += letter.len();

                    if letter.len() > 1 {
                        letter = std_res.as_deref()
                            .and_then(one_letter_code)
                            .or_else(|| one_letter_code(&res.mon_id))
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "X".to_owned());
                    }

                    if seq_can_len + letter.len() > 80 {
                        seq_can.push('\n');
                        seq_can_len = 0;
                    }
                    seq_can += &letter;
                    seq_can_len += letter.len();
                }

                for (i, rs) in seqres.iter().enumerate() {
                    self.insert_chem_comp(&rs.mon_id);

                    let num = (i + 1).to_string();
                    let hetero = if rs.alts.is_empty() { "n" } else { "y" };
                    self.emplace("entity_poly_seq", &[
                        ("entity_id", &entity_id),
                        ("num", &num),
                        ("mon_id", &rs.mon_id),
                        ("hetero", hetero),
                    ])?;

                    for alt in &rs.alts {
                        self.emplace("entity_poly_seq", &[
                            ("entity_id", &entity_id),
                            ("num", &num),
                            ("mon_id", alt),
                            ("hetero", "y"),
                        ])?;
                    }
                }
            }

            let poly_type = if might_be_polypeptide && !might_be_dna {
                "polypeptide(L)"
            } else if might_be_dna && !might_be_polypeptide {
                "polyribonucleotide"
            } else {
                ""
            };

            let strand_ids = chains.join(",");
            self.emplace("entity_poly", &[
                ("entity_id", &entity_id),
                ("pdbx_seq_one_letter_code", &seq),
                ("pdbx_seq_one_letter_code_can", &seq_can),
                ("nstd_monomer", if nstd_monomer { "yes" } else { "no" }),
                ("pdbx_strand_id", &strand_ids),
                ("nstd_linkage", if nonstandard_linkage { "yes" } else { "no" }),
                ("type", poly_type),
            ])?;
        }

        if !(struct_title.is_empty() && struct_description.is_empty()) {
            let entry_id = self.structure_id.clone();
            let title = struct_title.join(", ");
            let descriptor = struct_description.join(", ");
            let model_type = self.model_type_details.clone();
            self.emplace("struct", &[
                ("entry_id", &entry_id),
                ("title", &title),
                ("pdbx_descriptor", &descriptor),
                ("pdbx_model_type_details", &model_type),
            ])?;
        }

        Ok(())
    }

    /// Water and non-polymer entities, their asyms, and the nonpoly scheme.
    fn write_nonpoly_entities(&mut self, asym_nr: &mut usize) -> Result<()> {
        let mut water_chains: BTreeMap<char, String> = BTreeMap::new();
        let mut ndb_seq_num: BTreeMap<(String, String), i32> = BTreeMap::new();
        let mut entity_auth_seq_num: BTreeMap<String, i32> = BTreeMap::new();

        // Assign asym ids to non-water heterogens outside SEQRES.
        for i in 0..self.hets.len() {
            if !self.hets[i].asym_id.is_empty() {
                continue;
            }

            let het_id = self.hets[i].het_id.clone();
            if het_id == self.water_het_id || is_water(&het_id) {
                continue;
            }

            let chain_id = self.hets[i].chain_id;
            let seq_num = self.hets[i].seq_num;
            let icode = self.hets[i].icode;

            let in_seqres = {
                let chain = self.get_chain_for_id(chain_id);
                chain.seqres.iter().any(|sr| sr.same_residue(&het_id, seq_num, icode))
            };

            if in_seqres {
                continue;
            }

            self.hets[i].asym_id = cif_id_for_number(*asym_nr);
            *asym_nr += 1;
        }

        let mut het_count: BTreeMap<String, usize> = BTreeMap::new();
        for het in &self.hets {
            *het_count.entry(het.het_id.clone()).or_insert(0) += 1;
        }

        let mut written_asyms: Vec<String> = vec![];

        for i in 0..self.hets.len() {
            let het_id = self.hets[i].het_id.clone();
            let chain_id = self.hets[i].chain_id;
            let seq_num = self.hets[i].seq_num;
            let icode = self.hets[i].icode;

            let in_seqres = {
                let chain = self.get_chain_for_id(chain_id);
                chain.seqres.iter().any(|sr| sr.same_residue(&het_id, seq_num, icode))
            };
            if in_seqres {
                continue;
            }

            // First occurrence of the het id creates its entity.
            if !self.het_to_entity.contains_key(&het_id) {
                let entity_id = self.next_entity_nr.to_string();
                self.next_entity_nr += 1;
                self.het_to_entity.insert(het_id.clone(), entity_id.clone());

                let count = het_count.get(&het_id).copied().unwrap_or(0).to_string();

                if het_id == self.water_het_id {
                    self.emplace("entity", &[
                        ("id", &entity_id),
                        ("type", "water"),
                        ("src_method", "nat"),
                        ("pdbx_description", "water"),
                        ("pdbx_number_of_molecules", &count),
                    ])?;
                } else {
                    if self.hetnams.get(&het_id).map(|n| n.is_empty()).unwrap_or(true) {
                        if let Some(compound) = compound_factory().lookup_compound(&het_id) {
                            self.hetnams.insert(het_id.clone(), compound.name);
                        }
                    }

                    let name = self.hetnams.get(&het_id).cloned().unwrap_or_default();
                    let syns = self.hetsyns.get(&het_id).cloned().unwrap_or_default();

                    self.emplace("entity", &[
                        ("id", &entity_id),
                        ("type", "non-polymer"),
                        ("src_method", "syn"),
                        ("pdbx_description", &name),
                        ("details", &syns),
                        ("pdbx_number_of_molecules", &count),
                    ])?;
                }

                let mut name = self.hetnams.get(&het_id).cloned().unwrap_or_default();
                if name.is_empty() && het_id == self.water_het_id {
                    name = "water".to_owned();
                }

                self.emplace("pdbx_entity_nonpoly", &[
                    ("entity_id", &entity_id),
                    ("name", &name),
                    ("comp_id", &het_id),
                ])?;
            }

            // Create an asym for this het/chain combo, if needed.
            let entity_id = self.het_to_entity.get(&het_id).cloned().unwrap_or_default();
            let mut asym_id = self.hets[i].asym_id.clone();

            let k = (chain_id, seq_num, icode);
            if !self.chain_seq_to_asym.contains_key(&k) {
                if het_id == self.water_het_id || is_water(&het_id) {
                    asym_id = match water_chains.get(&chain_id) {
                        Some(asym_id) => asym_id.clone(),
                        None => {
                            let new_asym = cif_id_for_number(*asym_nr);
                            *asym_nr += 1;
                            water_chains.insert(chain_id, new_asym.clone());
                            new_asym
                        }
                    };
                }

                self.asym_to_entity.insert(asym_id.clone(), entity_id.clone());

                // A nonpoly residue has no label_seq_id, but the scheme still
                // numbers it; the map keeps that number with is_poly false.
                self.chain_seq_to_asym.insert(k, (asym_id.clone(), 0, false));

                if !written_asyms.contains(&asym_id) {
                    written_asyms.push(asym_id.clone());

                    self.emplace("struct_asym", &[
                        ("id", &asym_id),
                        ("pdbx_blank_PDB_chainid_flag", if chain_id == ' ' { "Y" } else { "N" }),
                        ("entity_id", &entity_id),
                    ])?;
                }
            }

            let seq_nr = {
                let e = ndb_seq_num.entry((het_id.clone(), asym_id.clone())).or_insert(0);
                *e += 1;
                *e
            };
            let auth_seq_nr = {
                let e = entity_auth_seq_num.entry(het_id.clone()).or_insert(0);
                *e += 1;
                *e
            };

            let ins = if icode == ' ' { ".".to_owned() } else { icode.to_string() };
            self.emplace("pdbx_nonpoly_scheme", &[
                ("asym_id", &asym_id),
                ("entity_id", &entity_id),
                ("mon_id", &het_id),
                ("ndb_seq_num", &seq_nr.to_string()),
                ("pdb_seq_num", &seq_num.to_string()),
                ("auth_seq_num", &auth_seq_nr.to_string()),
                ("pdb_mon_id", &het_id),
                ("auth_mon_id", &het_id),
                ("pdb_strand_id", &chain_id.to_string()),
                ("pdb_ins_code", &ins),
            ])?;

            self.chain_seq_to_asym.insert(k, (asym_id, seq_nr, false));
        }

        Ok(())
    }

    /// The pdbx_struct_mod_residue rows from the MODRES records.
    fn write_mod_residues(&mut self) -> Result<()> {
        let mut mod_res_id = 1;
        let mut mod_res_set: Vec<String> = vec![];

        let start = match self.find_record("MODRES") {
            Some(start) => start,
            None => {
                return Ok(());
            }
        };

        let mut rows = vec![];
        for index in start..self.record_count() {
            let rec = self.record(index);
            if !rec.is("MODRES") {
                break;
            }

            rows.push((
                rec.vs(13, 15),
                rec.vc(17),
                rec.vi(19, 22),
                rec.vc(23),
                rec.vs(25, 27),
                rec.vs(30, 70),
            ));
        }

        for (res_name, chain_id, seq_num, icode, std_res, comment) in rows {
            let (asym_id, seq, _) = match self.map_residue(chain_id, seq_num, icode) {
                Some(mapped) => mapped,
                None => {

                    // No need to write a modres if it could not be found.
                    log::debug!("dropping unmapped MODRES record");
                    continue;
                }
            };

            let id = mod_res_id.to_string();
            mod_res_id += 1;

            let ins = if icode == ' ' { String::new() } else { icode.to_string() };
            self.emplace("pdbx_struct_mod_residue", &[
                ("id", &id),
                ("label_asym_id", &asym_id),
                ("label_seq_id", &seq.to_string()),
                ("label_comp_id", &res_name),
                ("auth_asym_id", &chain_id.to_string()),
                ("auth_seq_id", &seq_num.to_string()),
                ("auth_comp_id", &res_name),
                ("PDB_ins_code", &ins),
                ("parent_comp_id", &std_res),
                ("details", &comment),
            ])?;

            if !mod_res_set.contains(&res_name) {
                mod_res_set.push(res_name);
            }
        }

        self.mod_res_set = mod_res_set;
        Ok(())
    }

    /// One chem_comp row per residue name encountered anywhere.
    fn write_chem_comps(&mut self) -> Result<()> {
        let factory = compound_factory();
        let chem_comp = std::mem::take(&mut self.chem_comp);

        for cc in &chem_comp {
            let lookup = self.mod_to_parent.get(cc).cloned().unwrap_or_else(|| cc.clone());
            let compound = factory.lookup_compound(&lookup);

            let mut name = String::new();
            let mut formula = String::new();
            let mut comp_type = String::new();
            let mut nstd = ".";
            let mut formula_weight = String::new();

            if let Some(compound) = &compound {
                name = compound.name.clone();
                comp_type = compound.comp_type.clone();

                if comp_type.eq_ignore_ascii_case("L-peptide linking") || comp_type.eq_ignore_ascii_case("peptide linking") {
                    nstd = "y";
                }

                formula = compound.formula.clone();
                formula_weight = format!("{:.3}", compound.formula_weight);
            }

            if name.is_empty() {
                name = self.hetnams.get(cc).cloned().unwrap_or_default();
            }

            if comp_type.is_empty() {
                comp_type = "NON-POLYMER".to_owned();
            }

            if formula.is_empty() {
                formula = self.formuls.get(cc).cloned().unwrap_or_default();

                // FORMUL values may carry a multiplier: "2(C8 H15 N O6)".
                if let Some(inner) = formula.strip_suffix(')').and_then(|f| f.split_once('(')) {
                    if inner.0.chars().all(|c| c.is_ascii_digit()) {
                        formula = inner.1.to_owned();
                    }
                }
            }

            if self.mod_res_set.contains(cc) {
                nstd = "n";
            }

            self.emplace("chem_comp", &[
                ("id", cc),
                ("name", &name),
                ("formula", &formula),
                ("formula_weight", &formula_weight),
                ("mon_nstd_flag", nstd),
                ("type", &comp_type),
            ])?;
        }

        self.chem_comp = chem_comp;

        // chem_comp is sorted by id in V5 files.
        if let Some(cat) = self.datablock.get_mut("chem_comp") {
            let order = cat.order_by(cat.rows().collect(), &["id"]);
            let mut rows = vec![];
            for id in order {
                let row: Vec<(String, String)> = cat.row(id).items().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
                rows.push(row);
            }

            cat.clear();
            for row in rows {
                let items: Vec<(&str, &str)> = row.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                cat.emplace(&items)?;
            }
        }

        Ok(())
    }

    /// The unobserved residues and atoms from REMARK 465/470.
    fn write_unobs(&mut self) -> Result<()> {
        let mut id_res = 0;
        let mut id_atom = 0;

        let mut unobs = std::mem::take(&mut self.unobs);
        unobs.sort_by_key(|u| (u.model_nr, u.seq));

        for u in &unobs {
            let (asym_id, seq_nr, is_polymer) = match self.map_residue(u.chain, u.seq, u.icode) {
                Some(mapped) => mapped,
                None => {
                    log::debug!("error mapping unobserved residue");
                    continue;
                }
            };

            let model = if u.model_nr != 0 { u.model_nr } else { 1 }.to_string();
            let ins = if u.icode == ' ' { String::new() } else { u.icode.to_string() };
            let label_seq = if seq_nr > 0 { seq_nr.to_string() } else { String::new() };

            if u.atoms.is_empty() {
                id_res += 1;
                let id = id_res.to_string();
                self.emplace("pdbx_unobs_or_zero_occ_residues", &[
                    ("id", &id),
                    ("polymer_flag", if is_polymer { "Y" } else { "N" }),
                    ("occupancy_flag", "1"),
                    ("PDB_model_num", &model),
                    ("auth_asym_id", &u.chain.to_string()),
                    ("auth_comp_id", &u.res),
                    ("auth_seq_id", &u.seq.to_string()),
                    ("PDB_ins_code", &ins),
                    ("label_asym_id", &asym_id),
                    ("label_comp_id", &u.res),
                    ("label_seq_id", &label_seq),
                ])?;
            } else {
                for atom in &u.atoms {
                    id_atom += 1;
                    let id = id_atom.to_string();
                    self.emplace("pdbx_unobs_or_zero_occ_atoms", &[
                        ("id", &id),
                        ("polymer_flag", if is_polymer { "Y" } else { "N" }),
                        ("occupancy_flag", "1"),
                        ("PDB_model_num", &model),
                        ("auth_asym_id", &u.chain.to_string()),
                        ("auth_comp_id", &u.res),
                        ("auth_seq_id", &u.seq.to_string()),
                        ("PDB_ins_code", &ins),
                        ("auth_atom_id", atom),
                        ("label_asym_id", &asym_id),
                        ("label_comp_id", &u.res),
                        ("label_seq_id", &label_seq),
                        ("label_atom_id", atom),
                    ])?;
                }
            }
        }

        self.unobs = unobs;
        Ok(())
    }
}
