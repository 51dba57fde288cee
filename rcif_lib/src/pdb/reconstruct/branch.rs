//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Sugar-tree detection.
//!
//! N-glycosylation shows up in legacy files as loose NAG/NDG heterogens tied
//! together by LINK records: the root sugar's C1 bonds to the ND2 of an ASN,
//! and each further sugar's C1 bonds to an O1..O6 of its parent. Those chains
//! are followed here to rebuild branched entities, which replace the involved
//! heterogens.

use crate::compound::compound_factory;
use crate::error::Result;
use crate::pdb::cif_id_for_number;
use crate::pdb::LinkAtom;

use super::PdbParser;

/// One sugar of a tree: its C1 atom, plus which oxygen of which parent it
/// hangs from (the root has no parent).
#[derive(Clone, Debug)]
struct SugarNode {
    c1: LinkAtom,
    leaving_o: u8,
    parent: Option<LinkAtom>,
}

/// The IUPAC-flavoured name of the whole tree: children first, each with its
/// linkage position, brackets around side branches.
fn entity_name(tree: &[SugarNode], node: &LinkAtom) -> String {
    let factory = compound_factory();

    let own_name = factory.lookup_compound(&node.res_name)
        .map(|c| c.name)
        .unwrap_or_else(|| node.res_name.clone());

    let mut children: Vec<&SugarNode> = tree.iter()
        .filter(|s| s.parent.as_ref() == Some(node))
        .collect();
    children.sort_by_key(|s| s.leaving_o);

    let mut result = String::new();
    for (i, child) in children.iter().enumerate() {
        let sub = format!("{}-(1->{})-", entity_name(tree, &child.c1), child.leaving_o);
        if i == 0 {
            result += &sub;
        } else {
            result += &format!("[{sub}]");
        }
    }

    result + &own_name
}

impl PdbParser<'_> {

    pub(crate) fn construct_sugar_trees(&mut self, asym_nr: &mut usize) -> Result<()> {
        loop {

            // Find a first NAG/NDG that has not been looked at yet.
            let si = match self.hets.iter().position(|h| {
                (h.het_id == "NAG" || h.het_id == "NDG") && !(h.processed || h.branch)
            }) {
                Some(si) => si,
                None => break,
            };

            self.hets[si].processed = true;

            // The alternate locations of its C1 atom.
            let mut c1_alts: Vec<char> = vec![];
            for &atom_index in &self.hets[si].atoms {
                let a = self.record(atom_index);
                if a.vs(13, 16) == "C1" && !c1_alts.contains(&a.vc(17)) {
                    c1_alts.push(a.vc(17));
                }
            }

            if c1_alts.is_empty() {
                continue;
            }

            for alt in c1_alts.clone() {
                let c1 = LinkAtom {
                    name: "C1".to_owned(),
                    res_name: self.hets[si].het_id.clone(),
                    res_seq: self.hets[si].seq_num,
                    chain_id: self.hets[si].chain_id,
                    icode: self.hets[si].icode,
                    alt_loc: alt,
                };

                // The root has to hang off an ASN through its ND2.
                if self.find_link(&c1, "ND2", "ASN").is_none() {
                    continue;
                }

                let mut stack = vec![c1.clone()];
                let mut tree = vec![SugarNode { c1: c1.clone(), leaving_o: 0, parent: None }];

                while let Some(c1) = stack.pop() {
                    for o in 1..=6u8 {
                        let mut leaving = c1.clone();
                        leaving.name = format!("O{o}");

                        if let Some(nc1) = self.find_link(&leaving, "C1", "") {
                            tree.push(SugarNode { c1: nc1.clone(), leaving_o: o, parent: Some(c1.clone()) });
                            stack.push(nc1);
                        }
                    }
                }

                if tree.len() < 2 {

                    // Not really a tree.
                    continue;
                }

                let branch_name = entity_name(&tree, &tree[0].c1);
                let mut entity_id = self.branch_to_entity.get(&branch_name).cloned().unwrap_or_default();
                let hetero = if c1_alts.len() == 1 { "n" } else { "y" };

                if entity_id.is_empty() {
                    entity_id = self.next_entity_nr.to_string();
                    self.next_entity_nr += 1;
                    self.branch_to_entity.insert(branch_name.clone(), entity_id.clone());

                    self.emplace("entity", &[
                        ("id", &entity_id),
                        ("type", "branched"),
                        ("src_method", "man"),
                        ("pdbx_description", &branch_name),
                    ])?;

                    self.emplace("pdbx_entity_branch", &[
                        ("entity_id", &entity_id),
                        ("type", "oligosaccharide"),
                    ])?;

                    // Number the tree, then write the links between numbers.
                    for (num, s) in tree.iter().enumerate() {
                        let num = (num + 1).to_string();
                        self.emplace("pdbx_entity_branch_list", &[
                            ("entity_id", &entity_id),
                            ("comp_id", &s.c1.res_name),
                            ("num", &num),
                            ("hetero", hetero),
                        ])?;
                    }

                    let branch_num = |atom: &LinkAtom| -> usize {
                        tree.iter().position(|s| s.c1 == *atom).map(|p| p + 1).unwrap_or(0)
                    };

                    let mut link_id = 0;
                    for s in &tree {
                        let parent = match &s.parent {
                            Some(parent) => parent,
                            None => continue,
                        };

                        link_id += 1;
                        let id = link_id.to_string();
                        let num_1 = branch_num(&s.c1).to_string();
                        let num_2 = branch_num(parent).to_string();
                        let atom_id_2 = format!("O{}", s.leaving_o);
                        let leaving_2 = format!("HO{}", s.leaving_o);

                        self.emplace("pdbx_entity_branch_link", &[
                            ("link_id", &id),
                            ("entity_id", &entity_id),
                            ("entity_branch_list_num_1", &num_1),
                            ("comp_id_1", &s.c1.res_name),
                            ("atom_id_1", &s.c1.name),
                            ("leaving_atom_id_1", "O1"),
                            ("entity_branch_list_num_2", &num_2),
                            ("comp_id_2", &parent.res_name),
                            ("atom_id_2", &atom_id_2),
                            ("leaving_atom_id_2", &leaving_2),
                            ("value_order", "sing"),
                        ])?;
                    }
                }

                self.sugar_entities.insert(entity_id.clone());

                // One asym per occurrence of the tree.
                let asym_id = cif_id_for_number(*asym_nr);
                *asym_nr += 1;

                self.asym_to_entity.insert(asym_id.clone(), entity_id.clone());

                let blank_flag = if self.hets[si].chain_id == ' ' { "Y" } else { "N" };
                self.emplace("struct_asym", &[
                    ("id", &asym_id),
                    ("pdbx_blank_PDB_chainid_flag", blank_flag),
                    ("pdbx_modified", "N"),
                    ("entity_id", &entity_id),
                ])?;

                for (num, s) in tree.iter().enumerate() {
                    let num = num + 1;
                    let num_str = num.to_string();
                    let icode_str = if s.c1.icode == ' ' { ".".to_owned() } else { s.c1.icode.to_string() };
                    let auth_seq = s.c1.res_seq.to_string();
                    let chain_str = s.c1.chain_id.to_string();

                    self.emplace("pdbx_branch_scheme", &[
                        ("asym_id", &asym_id),
                        ("entity_id", &entity_id),
                        ("mon_id", &s.c1.res_name),
                        ("num", &num_str),
                        ("pdb_asym_id", &asym_id),
                        ("pdb_mon_id", &s.c1.res_name),
                        ("pdb_seq_num", &num_str),
                        ("auth_asym_id", &chain_str),
                        ("auth_mon_id", &s.c1.res_name),
                        ("auth_seq_num", &auth_seq),
                        ("pdb_ins_code", &icode_str),
                        ("hetero", hetero),
                    ])?;

                    let k = (s.c1.chain_id, s.c1.res_seq, s.c1.icode);
                    self.chain_seq_to_asym.insert(k, (asym_id.clone(), num as i32, false));

                    // The het is now part of a tree, not a standalone residue.
                    for h in &mut self.hets {
                        if h.het_id == s.c1.res_name
                            && h.chain_id == s.c1.chain_id
                            && h.seq_num == s.c1.res_seq
                            && h.icode == s.c1.icode
                        {
                            h.branch = true;
                            break;
                        }
                    }
                }

                break;
            }
        }

        // Remove the branched hets.
        self.hets.retain(|h| !h.branch);

        Ok(())
    }
}
