//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Primary structure (DBREF, SEQADV, SEQRES, MODRES) and heterogen (HET,
//! HETNAM, HETSYN, FORMUL) sections.

use crate::error::{RCifError, Result};

use super::{Het, PdbParser, PdbSeqRes, Seqadv};

impl PdbParser<'_> {

    pub(crate) fn parse_primary_structure(&mut self) -> Result<()> {
        let mut cur = super::Dbref { pdb_id_code: self.structure_id.clone(), ..Default::default() };

        while self.rec().name.starts_with("DBREF") {
            if self.rec().is("DBREF ") {
                cur.pdb_id_code = self.vs(8, 11);
                cur.chain_id = self.vc(13);
                cur.seq_begin = self.vi(15, 18);
                cur.insert_begin = self.vc(19);
                cur.seq_end = self.vi(21, 24);
                cur.insert_end = self.vc(25);
                cur.database = self.vs(27, 32);
                cur.db_accession = self.vs(34, 41);
                cur.db_id_code = self.vs(43, 54);
                cur.db_seq_begin = self.vi(56, 60);
                cur.db_ins_beg = self.vc(61);
                cur.db_seq_end = self.vi(63, 67);
                cur.db_ins_end = self.vc(68);

                let dbref = cur.clone();
                let chain = self.get_chain_for_id(dbref.chain_id);
                chain.dbref = dbref;
            } else if self.rec().is("DBREF1") {
                cur.pdb_id_code = self.vs(8, 11);
                cur.chain_id = self.vc(13);
                cur.seq_begin = self.vi(15, 18);
                cur.insert_begin = self.vc(19);
                cur.seq_end = self.vi(21, 24);
                cur.insert_end = self.vc(25);
                cur.database = self.vs(27, 32);
                cur.db_id_code = self.vs(48, 67);
            } else if self.rec().is("DBREF2") {
                if self.vc(13) != cur.chain_id {
                    return Err(RCifError::ValidationError(
                        "Chain IDs for DBREF1/DBREF2 records do not match".to_owned(),
                    ));
                }

                cur.db_accession = self.vs(19, 40);
                cur.db_seq_begin = self.vi(46, 55);
                cur.db_seq_end = self.vi(58, 67);

                let dbref = cur.clone();
                let chain = self.get_chain_for_id(dbref.chain_id);
                chain.dbref = dbref;
            }

            self.next_record();
        }

        // The DBREF numbering seeds the SEQRES counters.
        for chain in &mut self.chains {
            chain.next_seq_num = chain.dbref.seq_begin;
            chain.next_db_seq_num = chain.dbref.db_seq_begin;
        }

        while self.rec().is("SEQADV") {
            self.seqadvs.push(Seqadv {
                res_name: self.vs(13, 15),
                chain_id: self.vc(17),
                seq_num: self.vi(19, 22),
                icode: self.vc(23),
                database: self.vs(25, 28),
                db_accession: self.vs(30, 38),
                db_res: self.vs(40, 42),
                db_seq: self.vi(44, 48),
                conflict: self.vs(50, 70),
            });

            self.next_record();
        }

        while self.rec().is("SEQRES") {
            let chain_id = self.vc(12);
            let monomers = self.vs(20, 70);

            let mut new_residues = vec![];
            {
                let chain = self.get_chain_for_id(chain_id);
                for mon_id in monomers.split_whitespace() {
                    chain.seqres.push(PdbSeqRes {
                        mon_id: mon_id.to_owned(),
                        seq_num: chain.next_seq_num,
                        icode: ' ',
                        db_seq_num: chain.next_db_seq_num,
                        ..Default::default()
                    });
                    chain.next_seq_num += 1;
                    chain.next_db_seq_num += 1;
                    new_residues.push(mon_id.to_owned());
                }
            }

            for mon_id in new_residues {
                self.insert_chem_comp(&mon_id);
            }

            self.next_record();
        }

        // First pass over MODRES; only the modified-to-standard map matters
        // before ConstructEntities runs.
        while self.rec().is("MODRES") {
            let res_name = self.vs(13, 15);
            let std_res = self.vs(25, 27);
            self.mod_to_parent.insert(res_name, std_res);
            self.next_record();
        }

        Ok(())
    }

    pub(crate) fn parse_heterogen(&mut self) -> Result<()> {
        while self.rec().is("HET   ") {
            let het = Het {
                het_id: self.vs(8, 10),
                chain_id: self.vc(13),
                seq_num: self.vi(14, 17),
                icode: self.vc(18),
                text: self.vs(31, 70),
                ..Default::default()
            };

            self.hets.push(het);
            self.next_record();
        }

        loop {
            if self.rec().is("HETNAM") {
                let het_id = self.vs(12, 14);
                let text = self.vs_from(16);

                self.hetnams.insert(het_id.clone(), text);
                self.insert_chem_comp(&het_id);

                self.next_record();
                continue;
            }

            if self.rec().is("HETSYN") {
                let het_id = self.vs(12, 14);
                let syn = self.vs_from(16);

                self.hetsyns.insert(het_id, syn);

                self.next_record();
                continue;
            }

            break;
        }

        while self.rec().is("FORMUL") {
            let het_id = self.vs(13, 15);
            let water_mark = self.vc(19);
            let formula = self.vs_from(20);

            self.formuls.insert(het_id.clone(), formula);

            if water_mark == '*' {
                self.water_het_id = het_id;
            }

            self.next_record();
        }

        Ok(())
    }
}
