//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Title section: HEADER through JRNL, including the COMPND/SOURCE
//! specification-list sub-parser.

use crate::error::{RCifError, Result};
use crate::pdb::{pdb2cif_auth, pdb2cif_date_lenient, split_csv};

use super::PdbParser;

//---------------------------------------------------------------------------//
//                     COMPND/SOURCE specification lists
//---------------------------------------------------------------------------//

/// States of the `TOKEN: value;` scanner.
enum SpecState {
    Start,
    Id,
    Colon,
    Value,
    Nl,
    NlId,
    SemiColon,
    Error,
}

/// Parser for the `TOKEN: value;` lists in COMPND and SOURCE records. Values
/// may wrap across continuation lines, which show up here as embedded
/// newlines.
pub(crate) struct SpecificationListParser {
    text: Vec<char>,
    pos: usize,
}

impl SpecificationListParser {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
        }
    }

    /// The next `(id, value)` pair, or None at the end of the list.
    pub(crate) fn next_specification(&mut self) -> Option<(String, String)> {
        let mut id = String::new();
        let mut value = String::new();

        let mut state = SpecState::Start;
        let mut backup = self.pos;

        while self.pos < self.text.len() {
            let ch = self.text[self.pos];
            self.pos += 1;

            match state {
                SpecState::Start => {
                    if ch.is_ascii_alphanumeric() || ch == '_' {
                        id = ch.to_string();
                        value.clear();
                        state = SpecState::Id;
                    } else if !ch.is_whitespace() {
                        log::debug!("skipping invalid character in SOURCE ID: {ch}");
                    }
                }

                SpecState::Id => {
                    if ch.is_ascii_alphanumeric() || ch == '_' {
                        id.push(ch);
                    } else if ch == ':' {
                        state = SpecState::Colon;
                    } else {
                        state = SpecState::Error;
                    }
                }

                SpecState::Colon => {
                    if ch == ';' {
                        log::debug!("empty value for SOURCE: {id}");
                        state = SpecState::Start;
                    } else if !ch.is_whitespace() {
                        value = ch.to_string();
                        state = SpecState::Value;
                    }
                }

                SpecState::Value => {
                    if ch == '\n' {
                        backup = self.pos;
                        state = SpecState::Nl;
                    } else if ch == ';' {
                        backup = self.pos;
                        state = SpecState::SemiColon;
                    } else {
                        value.push(ch);
                    }
                }

                SpecState::SemiColon => {
                    if ch == '\n' {
                        return Some((id, value));
                    } else if ch != ' ' {

                        // Not a terminator after all; the semicolon was data.
                        value.extend(&self.text[backup - 1..self.pos]);
                        state = SpecState::Value;
                    }
                }

                SpecState::Nl => {
                    if ch.is_ascii_alphanumeric() {
                        value.push(' ');
                        state = SpecState::NlId;
                    } else if ch.is_whitespace() {
                        state = SpecState::Value;
                    }
                }

                SpecState::NlId => {
                    if ch == ':' {

                        // The line after the newline was a new TOKEN.
                        self.pos = backup;
                        return Some((id, value));
                    } else if ch == ';' {
                        state = SpecState::SemiColon;
                    } else if !(ch.is_ascii_alphanumeric() || ch == '_') {
                        value.extend(&self.text[backup..self.pos]);
                        state = SpecState::Value;
                    }
                }

                SpecState::Error => {
                    if ch == ';' {
                        log::debug!("skipping invalid header line");
                        state = SpecState::Start;
                    }
                }
            }
        }

        if id.is_empty() || value.is_empty() {
            None
        } else {
            Some((id, value))
        }
    }
}

//---------------------------------------------------------------------------//
//                              Title section
//---------------------------------------------------------------------------//

impl PdbParser<'_> {

    /// Title section, in strict legacy order: HEADER, OBSLTE, TITLE, SPLIT,
    /// CAVEAT, COMPND, SOURCE, KEYWDS, EXPDTA, NUMMDL, MDLTYP, AUTHOR,
    /// REVDAT, SPRSDE, JRNL.
    pub(crate) fn parse_title(&mut self) -> Result<()> {
        self.match_rec("HEADER", false)?;

        let mut keywords = String::new();

        if self.rec().is("HEADER") {
            self.structure_id = self.vs(63, 66);
            keywords = self.vs(11, 50);
            self.original_date = pdb2cif_date_lenient(&self.vs(51, 59));
            self.next_record();
        }

        if self.structure_id.is_empty() {
            self.structure_id = "nohd".to_owned();
        }

        self.datablock.set_name(&self.structure_id.clone());

        let structure_id = self.structure_id.clone();
        self.emplace("entry", &[("id", &structure_id)])?;

        self.emplace("database_2", &[("database_id", "PDB"), ("database_code", &structure_id)])?;

        if !self.original_date.is_empty() {
            let date = self.original_date.clone();
            self.emplace("pdbx_database_status", &[
                ("entry_id", &structure_id),
                ("recvd_initial_deposition_date", &date),
            ])?;
        }

        // OBSLTE
        if self.rec().is("OBSLTE") {
            let old = self.vs(22, 25);
            let date = pdb2cif_date_lenient(&self.vs(12, 20));
            let value = self.vs_from(32);

            for id in value.split_whitespace() {
                self.emplace("pdbx_database_PDB_obs_spr", &[
                    ("id", "OBSLTE"),
                    ("date", &date),
                    ("replace_pdb_id", &old),
                    ("pdb_id", id),
                ])?;
            }

            self.next_record();
        }

        // TITLE
        self.match_rec("TITLE ", false)?;
        let mut title = String::new();
        if self.rec().is("TITLE ") {
            title = self.vs_from(11);
            self.next_record();
        }

        // SPLIT
        if self.rec().is("SPLIT ") {
            return Err(RCifError::ValidationError("SPLIT PDB files are not supported".to_owned()));
        }

        // CAVEAT
        let mut caveat_id = 1;
        while self.rec().is("CAVEAT") {
            let text = self.vs_from(20);
            let id = caveat_id.to_string();
            self.emplace("database_PDB_caveat", &[("id", &id), ("text", &text)])?;
            caveat_id += 1;
            self.next_record();
        }

        // COMPND
        self.match_rec("COMPND", false)?;
        if self.rec().is("COMPND") {
            let value = self.vs_from(11);

            if !value.contains(':') {

                // Special case for dumb, stripped files.
                let comp = self.get_or_create_compound(1);
                comp.info.insert("MOLECULE".to_owned(), value);
            } else {
                let mut spec = SpecificationListParser::new(&value);

                while let Some((spec_key, spec_value)) = spec.next_specification() {
                    if !spec_key.eq_ignore_ascii_case("MOL_ID") && self.compounds.is_empty() {
                        log::debug!("ignoring invalid COMPND record");
                        break;
                    }

                    if spec_key == "MOL_ID" {
                        let mol_id = spec_value.trim().parse::<i32>().unwrap_or(1);
                        let comp = self.get_or_create_compound(mol_id);
                        comp.title = title.clone();
                    } else if spec_key == "CHAIN" {
                        for chain in split_csv(&spec_value) {
                            if let Some(c) = chain.chars().next() {
                                if let Some(comp) = self.compounds.last_mut() {
                                    comp.chains.insert(c);
                                }
                            }
                        }
                    } else if let Some(comp) = self.compounds.last_mut() {
                        comp.info.insert(spec_key, spec_value);
                    }
                }
            }

            self.next_record();
        }

        // SOURCE
        self.match_rec("SOURCE", false)?;
        if self.rec().is("SOURCE") {
            let value = self.vs_from(11);
            let mut spec = SpecificationListParser::new(&value);
            let mut mol_id: Option<i32> = None;

            while let Some((spec_key, spec_value)) = spec.next_specification() {
                if spec_key == "MOL_ID" {
                    mol_id = spec_value.trim().parse::<i32>().ok();
                    continue;
                }

                let line_nr = self.rec().line_nr;
                let mol_id = mol_id.ok_or_else(|| {
                    RCifError::ParseError(line_nr, "missing MOL_ID in SOURCE".to_owned())
                })?;

                if let Some(comp) = self.compounds.iter_mut().find(|c| c.mol_id == mol_id) {
                    comp.source.insert(spec_key, spec_value);
                }
            }

            self.next_record();
        }

        // KEYWDS
        self.match_rec("KEYWDS", false)?;
        let mut pdbx_keywords = String::new();
        if self.rec().is("KEYWDS") {
            pdbx_keywords = self.vs_from(11);
            self.next_record();
        }

        if !(keywords.is_empty() && pdbx_keywords.is_empty()) {
            self.emplace("struct_keywords", &[
                ("entry_id", &structure_id),
                ("pdbx_keywords", &keywords),
                ("text", &pdbx_keywords),
            ])?;
        }

        // EXPDTA
        self.match_rec("EXPDTA", false)?;
        if self.rec().is("EXPDTA") {
            self.exp_method = self.vs_from(11);

            let mut crystals: Vec<String> = self.remark200
                .get("NUMBER OF CRYSTALS USED")
                .map(|v| v.split("; ").map(str::to_owned).collect())
                .unwrap_or_default();
            if crystals.is_empty() {
                crystals.push(String::new());
            }

            let methods: Vec<String> = self.exp_method
                .split(';')
                .map(|m| m.trim().to_owned())
                .filter(|m| !m.is_empty())
                .collect();

            for (i, method) in methods.iter().enumerate() {
                let crystals_number = crystals.get(i).cloned().unwrap_or_default();
                self.emplace("exptl", &[
                    ("entry_id", &structure_id),
                    ("method", method),
                    ("crystals_number", &crystals_number),
                ])?;
            }

            self.next_record();
        }

        // NUMMDL
        if self.rec().is("NUMMDL") {
            log::debug!("skipping unimplemented NUMMDL record");
            self.next_record();
        }

        // MDLTYP
        if self.rec().is("MDLTYP") {
            self.model_type_details = self.vs_from(11);
            self.next_record();
        }

        // AUTHOR
        self.match_rec("AUTHOR", false)?;
        if self.rec().is("AUTHOR") {
            let value = self.vs_from(11);
            for (n, author) in value.split(',').filter(|a| !a.trim().is_empty()).enumerate() {
                let name = pdb2cif_auth(author);
                let ordinal = (n + 1).to_string();
                self.emplace("audit_author", &[("name", &name), ("pdbx_ordinal", &ordinal)])?;
            }

            self.next_record();
        }

        // REVDAT
        struct RevDat {
            rev_num: i32,
            date: String,
            date_original: String,
            replaces: String,
            mod_type: i32,
            types: Vec<String>,
        }

        let mut revdats: Vec<RevDat> = vec![];

        while self.rec().is("REVDAT") {
            let rev_num = self.vi(8, 10);
            let date = pdb2cif_date_lenient(&self.vs(14, 22));
            let mod_id = self.vs(24, 27);
            let mod_type = self.vi(32, 32);
            let detail = self.vs_from(40);

            revdats.push(RevDat {
                rev_num,
                date,
                date_original: if mod_type == 0 { self.original_date.clone() } else { String::new() },
                replaces: mod_id,
                mod_type,
                types: detail.split_whitespace().map(str::to_owned).collect(),
            });

            self.next_record();
        }

        revdats.sort_by_key(|r| r.rev_num);
        for revdat in &revdats {
            let num = revdat.rev_num.to_string();
            let mod_type = revdat.mod_type.to_string();
            self.emplace("database_PDB_rev", &[
                ("num", &num),
                ("date", &revdat.date),
                ("date_original", &revdat.date_original),
                ("replaces", &revdat.replaces),
                ("mod_type", &mod_type),
            ])?;

            for rev_type in &revdat.types {
                if rev_type.is_empty() {
                    continue;
                }

                self.emplace("database_PDB_rev_record", &[("rev_num", &num), ("type", rev_type)])?;
            }
        }

        // SPRSDE
        if self.rec().is("SPRSDE") {
            let date = pdb2cif_date_lenient(&self.vs(12, 20));
            let id = self.vs(22, 25);
            let superseded = self.vs_from(32);

            for old in superseded.split_whitespace() {
                self.emplace("pdbx_database_PDB_obs_spr", &[
                    ("id", "SPRSDE"),
                    ("date", &date),
                    ("pdb_id", &id),
                    ("replace_pdb_id", old),
                ])?;
            }

            self.next_record();
        }

        // JRNL
        if self.rec().is("JRNL  ") {
            self.parse_citation("primary")?;
        }

        Ok(())
    }

    /// One citation: either the JRNL block or one REMARK 1 reference.
    pub(crate) fn parse_citation(&mut self, id: &str) -> Result<()> {
        let rec_name = self.rec().name.clone();

        let mut auth = String::new();
        let mut titl = String::new();
        let mut edit = String::new();
        let mut publ = String::new();
        let mut pmid = String::new();
        let mut doi = String::new();
        let mut pubname = String::new();
        let mut volume = String::new();
        let mut astm = String::new();
        let mut country = String::new();
        let mut issn = String::new();
        let mut page_first = String::new();
        let mut year = 0;

        fn extend(s: &mut String, p: &str) {
            if !s.is_empty() {
                s.push(' ');
            }
            *s += p.trim();
        }

        while self.rec().is(&rec_name) && (id == "primary" || self.vc(12) == ' ') {
            let k = self.vs(13, 16);
            match k.as_str() {
                "AUTH" => extend(&mut auth, &self.vs(20, 79)),
                "TITL" => extend(&mut titl, &self.vs(20, 79)),
                "EDIT" => extend(&mut edit, &self.vs(20, 79)),
                "REF" => {
                    if pubname.is_empty() {
                        extend(&mut pubname, &self.vs(20, 47));
                        if self.vs(50, 51) == "V." {
                            volume = self.vs(52, 55);
                        }
                        page_first = self.vs(57, 61);
                        year = self.vi(63, 66);
                    } else {
                        extend(&mut pubname, &self.vs(20, 47));
                    }
                }
                "PUBL" => extend(&mut publ, &self.vs(20, 70)),
                "REFN" => {
                    if self.vs(20, 23) == "ASTN" {
                        astm = self.vs(25, 30);
                    }
                    country = self.vs(33, 34);
                    if self.vs(36, 39) == "ISSN" {
                        issn = self.vs(41, 65);
                    }
                }
                "PMID" => pmid = self.vs(20, 79),
                "DOI" => doi = self.vs(20, 79),
                _ => {}
            }

            self.next_record();
        }

        let year = if year > 0 { year.to_string() } else { String::new() };
        self.emplace("citation", &[
            ("id", id),
            ("title", &titl),
            ("journal_abbrev", &pubname),
            ("journal_volume", &volume),
            ("page_first", &page_first),
            ("year", &year),
            ("journal_id_ASTM", &astm),
            ("country", &country),
            ("journal_id_ISSN", &issn),
            ("book_publisher", &publ),
            ("pdbx_database_id_PubMed", &pmid),
            ("pdbx_database_id_DOI", &doi),
        ])?;

        if !auth.is_empty() {
            for author in auth.split(',').filter(|a| !a.trim().is_empty()) {
                let name = pdb2cif_auth(author);
                let ordinal = self.citation_author_nr.to_string();
                self.emplace("citation_author", &[
                    ("citation_id", id),
                    ("name", &name),
                    ("ordinal", &ordinal),
                ])?;
                self.citation_author_nr += 1;
            }
        }

        if !edit.is_empty() {
            for editor in edit.split(',').filter(|e| !e.trim().is_empty()) {
                let name = pdb2cif_auth(editor);
                let ordinal = self.citation_editor_nr.to_string();
                self.emplace("citation_editor", &[
                    ("citation_id", id),
                    ("name", &name),
                    ("ordinal", &ordinal),
                ])?;
                self.citation_editor_nr += 1;
            }
        }

        Ok(())
    }
}
