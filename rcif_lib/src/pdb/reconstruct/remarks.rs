//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The REMARK sections: secondary citations (1), data collection (200),
//! crystal conditions (280), assemblies (350), unobserved residues and atoms
//! (465/470) and site descriptions (800). REMARK 3 is handled by the
//! dedicated refinement-statistics dispatcher.

use lazy_static::lazy_static;

use std::collections::BTreeMap;

use crate::error::{RCifError, Result};
use crate::pdb::pdb2cif_date_lenient;

use super::{PdbParser, Unobs};

lazy_static! {
    static ref BIOMOLECULE_RX: regex::Regex =
        regex::Regex::new(r"^BIOMOLECULE: (\d+)$").unwrap();
    static ref KEY_VALUE_RX: regex::Regex =
        regex::Regex::new(r"^([^:]+): (.+?)(?: (ANGSTROM\*\*2|KCAL/MOL))?$").unwrap();
    static ref APPLY_CHAINS_RX: regex::Regex =
        regex::Regex::new(r"^APPLY THE FOLLOWING TO CHAINS: (.+)$").unwrap();
    static ref AND_CHAINS_RX: regex::Regex =
        regex::Regex::new(r"^AND CHAINS: (.+)$").unwrap();
    static ref BIOMT_RX: regex::Regex = regex::Regex::new(
        r"^BIOMT([123])\s+(\d+)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)$"
    ).unwrap();
    static ref N_MERIC_RX: regex::Regex =
        regex::Regex::new(r"^(\d+)-meric$").unwrap();
}

/// Molecule count behind an oligomeric description like `hexameric` or `24-meric`.
fn oligomer_count(oligomer: &str) -> i32 {
    if let Some(m) = N_MERIC_RX.captures(oligomer) {
        return m[1].parse().unwrap_or(0);
    }

    match oligomer.strip_suffix("meric") {
        Some("mono") => 1,
        Some("di") => 2,
        Some("tri") => 3,
        Some("tetra") => 4,
        Some("hexa") => 6,
        Some("octa") => 8,
        Some("dodeca") => 12,
        _ => 0,
    }
}

impl PdbParser<'_> {

    /// This function walks all consecutive REMARK records, dispatching the
    /// numbers this reader understands and skipping the rest cleanly.
    pub(crate) fn parse_remarks(&mut self) -> Result<()> {
        while self.rec().name.starts_with("REMARK") {
            let number = self.rec().name[6..].trim().parse::<i32>().unwrap_or(-1);

            match number {
                1 => self.parse_remark_1()?,
                200 | 240 => {

                    // Parsed into the key:value map by the pre-parser; emit
                    // the categories once, at the first line.
                    let first = self.find_record(&self.rec().name) == Some(self.cur);
                    if first {
                        self.parse_remark_200()?;
                    }
                    self.next_record();
                }
                280 => self.parse_remark_280()?,
                465 => self.parse_remark_465()?,
                470 => self.parse_remark_470()?,
                800 => self.parse_remark_800()?,
                _ => self.next_record(),
            }
        }

        Ok(())
    }

    /// REMARK 1: secondary literature references.
    fn parse_remark_1(&mut self) -> Result<()> {
        let name = self.rec().name.clone();

        while self.rec().is(&name) {
            let line = self.vs_from(12);

            if let Some(reference) = line.strip_prefix("REFERENCE ") {
                let id = reference.trim().to_owned();
                self.next_record();
                self.parse_citation(&id)?;
            } else {
                self.next_record();
            }
        }

        Ok(())
    }

    /// REMARK 200: the data-collection key:value map becomes diffrn,
    /// detector, radiation, source and reflns rows.
    fn parse_remark_200(&mut self) -> Result<()> {
        let get = |key: &str| self.remark200.get(key).cloned().unwrap_or_default();

        let structure_id = self.structure_id.clone();

        if !get("TEMPERATURE (KELVIN)").is_empty() {
            let temp = get("TEMPERATURE (KELVIN)");
            self.emplace("diffrn", &[
                ("id", "1"),
                ("ambient_temp", &temp),
                ("crystal_id", "1"),
            ])?;
        }

        if !get("DETECTOR TYPE").is_empty() || !get("DETECTOR MANUFACTURER").is_empty() {
            let detector = get("DETECTOR TYPE");
            let manufacturer = get("DETECTOR MANUFACTURER");
            let date = pdb2cif_date_lenient(&get("DATE OF DATA COLLECTION"));
            let details = get("OPTICS");

            self.emplace("diffrn_detector", &[
                ("diffrn_id", "1"),
                ("detector", &detector),
                ("type", &manufacturer),
                ("pdbx_collection_date", &date),
                ("details", &details),
            ])?;
        }

        if !get("MONOCHROMATIC OR LAUE (M/L)").is_empty() || !get("MONOCHROMATOR").is_empty() {
            let ml = get("MONOCHROMATIC OR LAUE (M/L)");
            let mono = get("MONOCHROMATOR");
            let protocol = get("DIFFRACTION PROTOCOL");

            self.emplace("diffrn_radiation", &[
                ("diffrn_id", "1"),
                ("wavelength_id", "1"),
                ("pdbx_monochromatic_or_laue_m_l", &ml),
                ("monochromator", &mono),
                ("pdbx_diffrn_protocol", &protocol),
                ("pdbx_scattering_type", "x-ray"),
            ])?;
        }

        let wavelengths = get("WAVELENGTH OR RANGE (A)");
        if !wavelengths.is_empty() {
            for (i, wavelength) in wavelengths.split(&[',', ';'][..]).enumerate() {
                let id = (i + 1).to_string();
                let wavelength = wavelength.trim();
                self.emplace("diffrn_radiation_wavelength", &[
                    ("id", &id),
                    ("wavelength", wavelength),
                    ("wt", "1.0"),
                ])?;
            }
        }

        if !get("RADIATION SOURCE").is_empty() || !get("SYNCHROTRON SITE").is_empty() {
            let source = get("RADIATION SOURCE");
            let site = get("SYNCHROTRON SITE");
            let beamline = get("BEAMLINE");
            let type_ = if site.is_empty() || site == "." {
                source.clone()
            } else {
                format!("{site} BEAMLINE {beamline}")
            };

            self.emplace("diffrn_source", &[
                ("diffrn_id", "1"),
                ("source", &source),
                ("type", &type_),
                ("pdbx_synchrotron_site", &site),
                ("pdbx_synchrotron_beamline", &beamline),
                ("pdbx_wavelength_list", &wavelengths),
            ])?;
        }

        if !get("NUMBER OF UNIQUE REFLECTIONS").is_empty() || !get("RESOLUTION RANGE HIGH (A)").is_empty() {
            let d_high = get("RESOLUTION RANGE HIGH (A)");
            let d_low = get("RESOLUTION RANGE LOW (A)");
            let number_obs = get("NUMBER OF UNIQUE REFLECTIONS");
            let completeness = get("COMPLETENESS FOR RANGE (%)");
            let redundancy = get("REDUNDANCY");
            let rmerge = get("R MERGE (I)");
            let rsym = get("R SYM (I)");
            let isigma = get("<I/SIGMA(I)> FOR THE DATA SET");

            self.emplace("reflns", &[
                ("entry_id", &structure_id),
                ("d_resolution_high", &d_high),
                ("d_resolution_low", &d_low),
                ("number_obs", &number_obs),
                ("percent_possible_obs", &completeness),
                ("pdbx_redundancy", &redundancy),
                ("pdbx_Rmerge_I_obs", &rmerge),
                ("pdbx_Rsym_value", &rsym),
                ("pdbx_netI_over_sigmaI", &isigma),
                ("pdbx_ordinal", "1"),
                ("pdbx_diffrn_id", "1"),
            ])?;
        }

        if !get("HIGHEST RESOLUTION SHELL, RANGE HIGH (A)").is_empty() {
            let d_high = get("HIGHEST RESOLUTION SHELL, RANGE HIGH (A)");
            let d_low = get("HIGHEST RESOLUTION SHELL, RANGE LOW (A)");
            let completeness = get("COMPLETENESS FOR SHELL (%)");
            let rmerge = get("R MERGE FOR SHELL (I)");
            let rsym = get("R SYM FOR SHELL (I)");
            let isigma = get("<I/SIGMA(I)> FOR SHELL");
            let redundancy = get("REDUNDANCY IN SHELL");

            self.emplace("reflns_shell", &[
                ("d_res_high", &d_high),
                ("d_res_low", &d_low),
                ("percent_possible_all", &completeness),
                ("Rmerge_I_obs", &rmerge),
                ("pdbx_Rsym_value", &rsym),
                ("meanI_over_sigI_obs", &isigma),
                ("pdbx_redundancy", &redundancy),
                ("pdbx_ordinal", "1"),
                ("pdbx_diffrn_id", "1"),
            ])?;
        }

        Ok(())
    }

    /// REMARK 280: crystal properties and growth conditions.
    fn parse_remark_280(&mut self) -> Result<()> {
        let name = self.rec().name.clone();

        let mut matthews = String::new();
        let mut solvent = String::new();
        let mut conditions = String::new();
        let mut in_conditions = false;

        while self.rec().is(&name) {
            let line = self.vs_from(12);

            if let Some((k, v)) = line.split_once(':') {
                let k = k.trim();
                let v = v.trim();
                in_conditions = false;

                if k.starts_with("MATTHEWS COEFFICIENT") {
                    matthews = v.to_owned();
                } else if k.starts_with("SOLVENT CONTENT") {
                    solvent = v.to_owned();
                } else if k.starts_with("CRYSTALLIZATION CONDITIONS") {
                    conditions = v.to_owned();
                    in_conditions = true;
                }
            } else if in_conditions && !line.is_empty() {
                conditions.push(' ');
                conditions += &line;
            }

            self.next_record();
        }

        if !(matthews.is_empty() && solvent.is_empty()) {
            self.emplace("exptl_crystal", &[
                ("id", "1"),
                ("density_Matthews", &matthews),
                ("density_percent_sol", &solvent),
            ])?;
        }

        if !conditions.is_empty() && !conditions.eq_ignore_ascii_case("NULL") {
            self.emplace("exptl_crystal_grow", &[
                ("crystal_id", "1"),
                ("pdbx_details", &conditions),
            ])?;
        }

        Ok(())
    }

    /// REMARK 465: completely unobserved residues.
    fn parse_remark_465(&mut self) -> Result<()> {
        let name = self.rec().name.clone();
        let mut in_table = false;

        while self.rec().is(&name) {
            let line = self.vs_from(12);

            if line.starts_with("M RES C SSSEQI") {
                in_table = true;
            } else if in_table && !line.is_empty() {
                let parts: Vec<&str> = line.split_whitespace().collect();

                // Either "RES C SEQ" or "MODEL RES C SEQ".
                let (model_nr, rest) = match parts.as_slice() {
                    [m, res, c, seq] if m.parse::<i32>().is_ok() => (m.parse::<i32>().unwrap_or(0), [*res, *c, *seq]),
                    [res, c, seq] => (0, [*res, *c, *seq]),
                    _ => {
                        self.next_record();
                        continue;
                    }
                };

                let chain = rest[1].chars().next().unwrap_or(' ');
                let (seq, icode) = split_seq_icode(rest[2]);

                self.unobs.push(Unobs {
                    model_nr,
                    res: rest[0].to_owned(),
                    chain,
                    seq,
                    icode,
                    atoms: vec![],
                });
            }

            self.next_record();
        }

        Ok(())
    }

    /// REMARK 470: residues with missing atoms.
    fn parse_remark_470(&mut self) -> Result<()> {
        let name = self.rec().name.clone();
        let mut in_table = false;

        while self.rec().is(&name) {
            let line = self.vs_from(12);

            if line.starts_with("M RES") {
                in_table = true;
            } else if in_table && !line.is_empty() {
                let parts: Vec<&str> = line.split_whitespace().collect();

                if parts.len() >= 3 {
                    let (model_nr, rest) = if parts[0].parse::<i32>().is_ok() && parts.len() >= 4 {
                        (parts[0].parse::<i32>().unwrap_or(0), &parts[1..])
                    } else {
                        (0, &parts[..])
                    };

                    if rest.len() >= 3 {
                        let chain = rest[1].chars().next().unwrap_or(' ');
                        let (seq, icode) = split_seq_icode(rest[2]);

                        self.unobs.push(Unobs {
                            model_nr,
                            res: rest[0].to_owned(),
                            chain,
                            seq,
                            icode,
                            atoms: rest[3..].iter().map(|a| (*a).to_owned()).collect(),
                        });
                    }
                }
            }

            self.next_record();
        }

        Ok(())
    }

    /// REMARK 800: the free-text descriptions of the SITE records.
    fn parse_remark_800(&mut self) -> Result<()> {
        let name = self.rec().name.clone();

        let mut site_id = String::new();
        let mut evidence = String::new();

        while self.rec().is(&name) {
            let line = self.vs_from(12);

            if let Some(v) = line.strip_prefix("SITE_IDENTIFIER:") {
                site_id = v.trim().to_owned();
                evidence.clear();
            } else if let Some(v) = line.strip_prefix("EVIDENCE_CODE:") {
                evidence = v.trim().to_owned();
            } else if let Some(v) = line.strip_prefix("SITE_DESCRIPTION:") {
                let details = v.trim().to_owned();
                if !site_id.is_empty() {
                    let evidence = evidence.to_lowercase();
                    self.emplace("struct_site", &[
                        ("id", &site_id),
                        ("pdbx_evidence_code", &evidence),
                        ("details", &details),
                    ])?;
                }
            }

            self.next_record();
        }

        Ok(())
    }

    /// REMARK 350: biomolecule definitions become assemblies with their
    /// operator matrices.
    ///
    /// Each biomolecule block carries `KEY: value` lines first, then the
    /// chains it applies to, then BIOMT rows. The assembly row is written once
    /// the first operator's matrix completes; the generator row when the next
    /// biomolecule starts (or the remark ends).
    pub(crate) fn parse_remark_350(&mut self) -> Result<()> {
        let start = match self.find_record("REMARK 350") {
            Some(start) => start,
            None => return Ok(()),
        };

        enum State {
            Start,
            Info,
            And,
            Apply,
            BioMt,
        }

        let mut state = State::Start;

        let mut biomolecule: i32 = 0;
        let mut oper_id: i32 = 0;
        let mut oper_expression: Vec<String> = vec![];
        let mut values: BTreeMap<String, String> = BTreeMap::new();
        let mut asym_id_list: Vec<String> = vec![];
        let mut mat: Vec<f64> = vec![];
        let mut trans: Vec<f64> = vec![];
        let mut written_opers: Vec<i32> = vec![];

        let mut index = start;
        while index < self.record_count() && self.record(index).is("REMARK 350") {
            let line = self.record(index).vs_from(12);
            index += 1;

            match state {
                State::Start => {
                    if let Some(m) = BIOMOLECULE_RX.captures(&line) {
                        biomolecule = m[1].parse().unwrap_or(0);
                        state = State::Info;
                    }
                }

                State::Info => {
                    if let Some(m) = APPLY_CHAINS_RX.captures(&line) {
                        let chains = m[1].to_owned();
                        let more = Self::collect_chains(&chains, &mut asym_id_list, |c| self.map_chain_to_asyms(c))?;
                        state = if more { State::And } else { State::Apply };
                    } else if let Some(m) = KEY_VALUE_RX.captures(&line) {
                        values.insert(m[1].to_owned(), m[2].to_owned());
                    }
                }

                State::And | State::Apply => {
                    if matches!(state, State::And) {
                        if let Some(m) = AND_CHAINS_RX.captures(&line) {
                            let chains = m[1].to_owned();
                            let more = Self::collect_chains(&chains, &mut asym_id_list, |c| self.map_chain_to_asyms(c))?;
                            state = if more { State::And } else { State::Apply };
                            continue;
                        }
                    }

                    // A chain list may run straight into the first BIOMT row.
                    if let Some(m) = BIOMT_RX.captures(&line) {
                        if &m[1] != "1" {
                            return Err(RCifError::ValidationError("invalid REMARK 350".to_owned()));
                        }

                        oper_id = m[2].parse().unwrap_or(0);
                        oper_expression.push(oper_id.to_string());

                        mat.push(m[3].parse().unwrap_or(0.0));
                        mat.push(m[4].parse().unwrap_or(0.0));
                        mat.push(m[5].parse().unwrap_or(0.0));
                        trans.push(m[6].parse().unwrap_or(0.0));
                        state = State::BioMt;
                    }
                }

                State::BioMt => {
                    if let Some(m) = BIOMT_RX.captures(&line) {
                        let mt: i32 = m[1].parse().unwrap_or(0);

                        if mt == 1 {
                            oper_id = m[2].parse().unwrap_or(0);
                            oper_expression.push(oper_id.to_string());
                        } else if oper_id != m[2].parse().unwrap_or(-1) {
                            return Err(RCifError::ValidationError("invalid REMARK 350".to_owned()));
                        }

                        mat.push(m[3].parse().unwrap_or(0.0));
                        mat.push(m[4].parse().unwrap_or(0.0));
                        mat.push(m[5].parse().unwrap_or(0.0));
                        trans.push(m[6].parse().unwrap_or(0.0));

                        if mt == 3 {
                            if trans.len() != 3 || mat.len() != 9 {
                                return Err(RCifError::ValidationError("invalid REMARK 350".to_owned()));
                            }

                            if oper_id == 1 {
                                self.write_assembly(biomolecule, &values)?;
                                values.clear();
                            }

                            let identity = mat == [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
                                && trans == [0.0, 0.0, 0.0];
                            let oper_type = if identity { "identity operation" } else { "crystal symmetry operation" };

                            // Biomolecules tend to share operators; every id
                            // is written once.
                            if !written_opers.contains(&oper_id) {
                                written_opers.push(oper_id);

                                let id = oper_id.to_string();
                                let f = |v: f64| format!("{v:.10}");
                                self.emplace("pdbx_struct_oper_list", &[
                                    ("id", &id),
                                    ("type", oper_type),
                                    ("matrix[1][1]", &f(mat[0])), ("matrix[1][2]", &f(mat[1])), ("matrix[1][3]", &f(mat[2])),
                                    ("vector[1]", &f(trans[0])),
                                    ("matrix[2][1]", &f(mat[3])), ("matrix[2][2]", &f(mat[4])), ("matrix[2][3]", &f(mat[5])),
                                    ("vector[2]", &f(trans[1])),
                                    ("matrix[3][1]", &f(mat[6])), ("matrix[3][2]", &f(mat[7])), ("matrix[3][3]", &f(mat[8])),
                                    ("vector[3]", &f(trans[2])),
                                ])?;
                            }

                            mat.clear();
                            trans.clear();
                        }
                    } else if let Some(m) = BIOMOLECULE_RX.captures(&line) {
                        if !(trans.is_empty() && mat.is_empty()) {
                            return Err(RCifError::ValidationError("invalid REMARK 350".to_owned()));
                        }

                        self.write_assembly_gen(biomolecule, &oper_expression, &mut asym_id_list)?;

                        biomolecule = m[1].parse().unwrap_or(0);
                        asym_id_list.clear();
                        oper_expression.clear();

                        state = State::Info;
                    }
                }
            }
        }

        if !oper_expression.is_empty() {
            self.write_assembly_gen(biomolecule, &oper_expression, &mut asym_id_list)?;
        }

        Ok(())
    }

    /// The chains of an APPLY/AND line. Returns true when a trailing empty
    /// entry announces an AND CHAINS continuation.
    fn collect_chains(
        value: &str,
        asym_id_list: &mut Vec<String>,
        mut map_chain: impl FnMut(char) -> Vec<String>,
    ) -> Result<bool> {
        for chain in value.split(',').map(str::trim) {
            if chain.is_empty() {
                return Ok(true);
            }

            if chain.len() != 1 {
                return Err(RCifError::ValidationError("invalid REMARK 350".to_owned()));
            }

            let c = chain.chars().next().unwrap_or(' ');
            asym_id_list.extend(map_chain(c));
        }

        Ok(false)
    }

    /// The pdbx_struct_assembly row plus its property rows, from the KEY:
    /// value lines of one biomolecule block.
    fn write_assembly(&mut self, biomolecule: i32, values: &BTreeMap<String, String>) -> Result<()> {
        let get = |key: &str| values.get(key).cloned().unwrap_or_default();

        let author = get("AUTHOR DETERMINED BIOLOGICAL UNIT");
        let software = get("SOFTWARE DETERMINED QUATERNARY STRUCTURE");

        let mut oligomer = if author.is_empty() { software.clone() } else { author.clone() };
        oligomer.make_ascii_lowercase();

        let count = oligomer_count(&oligomer);

        let details = if author.is_empty() {
            if software.is_empty() { "" } else { "software_defined_assembly" }
        } else if software.is_empty() {
            "author_defined_assembly"
        } else {
            "author_and_software_defined_assembly"
        };

        let id = biomolecule.to_string();
        let method_details = get("SOFTWARE USED");
        let count = if count > 0 { count.to_string() } else { String::new() };

        self.emplace("pdbx_struct_assembly", &[
            ("id", &id),
            ("details", details),
            ("method_details", &method_details),
            ("oligomeric_details", &oligomer),
            ("oligomeric_count", &count),
        ])?;

        let props = [
            ("ABSA (A^2)", get("TOTAL BURIED SURFACE AREA")),
            ("MORE", get("CHANGE IN SOLVENT FREE ENERGY")),
            ("SSA (A^2)", get("SURFACE AREA OF THE COMPLEX")),
        ];

        for (prop_type, value) in &props {
            if !value.is_empty() {
                self.emplace("pdbx_struct_assembly_prop", &[
                    ("biol_id", &id),
                    ("type", prop_type),
                    ("value", value),
                ])?;
            }
        }

        Ok(())
    }

    /// One generator row per biomolecule, with its operator list and the asym
    /// ids its chains map to.
    fn write_assembly_gen(&mut self, biomolecule: i32, oper_expression: &[String], asym_id_list: &mut Vec<String>) -> Result<()> {
        asym_id_list.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        asym_id_list.dedup();

        let assembly_id = biomolecule.to_string();
        let opers = oper_expression.join(",");
        let asyms = asym_id_list.join(",");

        self.emplace("pdbx_struct_assembly_gen", &[
            ("assembly_id", &assembly_id),
            ("oper_expression", &opers),
            ("asym_id_list", &asyms),
        ])
    }
}

/// Splits `123A` into the number and the insertion code.
fn split_seq_icode(s: &str) -> (i32, char) {
    if let Some(last) = s.chars().last() {
        if last.is_ascii_alphabetic() {
            let seq = s[..s.len() - 1].parse::<i32>().unwrap_or(0);
            return (seq, last);
        }
    }

    (s.parse::<i32>().unwrap_or(0), ' ')
}
