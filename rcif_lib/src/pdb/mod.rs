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
Module with the legacy PDB reader.

Parsing a PDB file takes several passes over the data, so the pre-parser first
flattens every record: continuation lines are concatenated per record type
(each type has its own continuation rule), and each flattened record is stored
with its line number and padded record name. Unsupported record types are
dropped with a warning.

The semantic reconstruction of the mmCIF categories from these records lives
in [reconstruct]; [read_structure_file] sniffs the format and dispatches to
either that pipeline or the plain mmCIF parser.
!*/

use lazy_static::lazy_static;

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use crate::error::{RCifError, Result};
use crate::model::File;

pub mod align;
pub mod reconstruct;
pub mod remark3;

#[cfg(test)] mod pdb_test;

/// The record types this reader understands. Everything else is dropped.
const SUPPORTED_RECORDS: &[&str] = &[
    "HEADER", "OBSLTE", "TITLE ", "SPLIT ", "CAVEAT", "COMPND", "SOURCE",
    "KEYWDS", "EXPDTA", "NUMMDL", "MDLTYP", "AUTHOR", "REVDAT", "SPRSDE",
    "JRNL  ", "REMARK", "DBREF ", "DBREF1", "DBREF2", "SEQADV", "SEQRES",
    "MODRES", "HET   ", "HETNAM", "HETSYN", "FORMUL", "HELIX ", "SHEET ",
    "SSBOND", "LINK  ", "CISPEP", "SITE  ", "CRYST1", "ORIGX1", "SCALE1",
    "MTRIX1", "ORIGX2", "SCALE2", "MTRIX2", "ORIGX3", "SCALE3", "MTRIX3",
    "MODEL ", "ATOM  ", "ANISOU", "TER   ", "HETATM", "ENDMDL", "CONECT",
    "MASTER", "END   ",
    "LINKR ",
];

const MONTHS: &[(&str, u8)] = &[
    ("JAN", 1), ("FEB", 2), ("MAR", 3), ("APR", 4), ("MAY", 5), ("JUN", 6),
    ("JUL", 7), ("AUG", 8), ("SEP", 9), ("OCT", 10), ("NOV", 11), ("DEC", 12),
];

/// Returns true if the provided residue name is one of the water spellings.
pub fn is_water(res_name: &str) -> bool {
    matches!(res_name, "HOH" | "H2O" | "OH2" | "WAT" | "DOD")
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// One flattened record: line number, padded record name, and the value (the
/// line contents from column 7 on, continuations already appended).
#[derive(Clone, Debug)]
pub struct PdbRecord {
    pub line_nr: u32,
    pub name: String,
    pub value: String,
}

/// One side of a LINK record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LinkAtom {
    pub name: String,
    pub alt_loc: char,
    pub res_name: String,
    pub chain_id: char,
    pub res_seq: i32,
    pub icode: char,
}

/// A LINK or LINKR record, parsed eagerly because the sugar-tree detection
/// needs to chase these before the coordinate section is reached.
#[derive(Clone, Debug, Default)]
pub struct Link {
    pub a: LinkAtom,
    pub b: LinkAtom,
    pub sym_op_a: String,
    pub sym_op_b: String,
    pub distance: Option<f64>,
}

/// Everything the pre-parser produces.
pub struct PreParsed {
    pub records: Vec<PdbRecord>,
    pub links: Vec<Link>,
    pub remark200: BTreeMap<String, String>,
}

//---------------------------------------------------------------------------//
//                        Implementation of PdbRecord
//---------------------------------------------------------------------------//

impl PdbRecord {

    /// True if this record has the provided (padded) name.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Character at the provided PDB column (1-based, the name takes 1-6).
    pub fn vc(&self, column: usize) -> char {
        self.value.as_bytes().get(column.wrapping_sub(7)).map(|&b| b as char).unwrap_or(' ')
    }

    /// Trimmed string spanning the provided PDB columns, both inclusive.
    pub fn vs(&self, column_first: usize, column_last: usize) -> String {
        let len = self.value.len();
        let first = column_first.saturating_sub(7);
        let last = (column_last.saturating_sub(7) + 1).min(len);

        if first >= len {
            String::new()
        } else {
            self.value[first..last].trim().to_owned()
        }
    }

    /// Like [PdbRecord::vs], but running to the end of the record.
    pub fn vs_from(&self, column_first: usize) -> String {
        self.vs(column_first, self.value.len() + 6)
    }

    /// Integer at the provided columns; garbage reads as 0 with a warning.
    pub fn vi(&self, column_first: usize, column_last: usize) -> i32 {
        let s = self.vs(column_first, column_last);
        if s.is_empty() {
            return 0;
        }

        match s.parse::<i32>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("not a valid integer '{s}' at line {}", self.line_nr);
                0
            }
        }
    }

    /// Real-number field, kept as text: the value string goes into the model
    /// uninterpreted.
    pub fn vf(&self, column_first: usize, column_last: usize) -> String {
        self.vs(column_first, column_last)
    }
}

//---------------------------------------------------------------------------//
//                              Pre-parser
//---------------------------------------------------------------------------//

/// Continuation number at the given offset/length within a line, 0 if blank.
fn cont_nr(line: &str, offset: usize, len: usize) -> Result<i32> {
    let end = (offset + len).min(line.len());
    if offset >= line.len() {
        return Ok(0);
    }

    let s = line[offset..end].trim();
    if s.is_empty() {
        Ok(0)
    } else {
        s.parse::<i32>()
            .map_err(|_| RCifError::ParseError(0, format!("Continuation string '{s}' is not valid")))
    }
}

fn substr_from(line: &str, offset: usize) -> &str {
    if offset >= line.len() {
        ""
    } else {
        &line[offset..]
    }
}

fn substr(line: &str, offset: usize, len: usize) -> &str {
    let end = (offset + len).min(line.len());
    if offset >= line.len() {
        ""
    } else {
        &line[offset..end]
    }
}

/// This function flattens a PDB byte stream into records, applying each record
/// type's continuation rule and gathering the LINK list and the REMARK 200/240
/// key:value map along the way.
pub fn pre_parse(input: &str) -> Result<PreParsed> {
    let mut lines = input.lines();
    let mut lookahead = lines.next().map(|l| l.trim_end_matches('\r').to_owned());
    let mut line_nr: u32 = 1;

    let mut records: Vec<PdbRecord> = vec![];
    let mut links: Vec<Link> = vec![];
    let mut remark200: BTreeMap<String, String> = BTreeMap::new();
    let mut dropped: BTreeSet<String> = BTreeSet::new();

    macro_rules! next_line {
        () => {{
            lookahead = lines.next().map(|l| l.trim_end_matches('\r').to_owned());
            line_nr += 1;
        }};
    }

    loop {
        let line = match &lookahead {
            Some(line) if line.is_empty() => {
                log::debug!("line number {line_nr} is empty");
                next_line!();
                continue;
            }
            Some(line) => line.clone(),
            None => break,
        };

        let mut record_type = format!("{:<6}", substr(&line, 0, 6));
        record_type.truncate(6);
        let mut value = substr_from(&line, 6).trim_end().to_owned();

        let cur_line_nr = line_nr;
        next_line!();

        if !SUPPORTED_RECORDS.contains(&record_type.as_str()) {
            let trimmed = record_type.trim().to_owned();
            if trimmed != "END" {
                dropped.insert(trimmed);
            }
            continue;
        }

        // Append the continuation lines, each record type in its own way.
        match record_type.as_str() {
            "AUTHOR" | "EXPDTA" | "MDLTYP" | "KEYWDS" | "SPLIT " | "SPRSDE" | "TITLE " => {
                let mut n = 2;
                while let Some(next) = lookahead.clone() {
                    if substr(&next, 0, 6) != record_type || cont_nr(&next, 7, 3)? != n {
                        break;
                    }
                    value += substr_from(&next, 10).trim_end();
                    next_line!();
                    n += 1;
                }
            }

            "COMPND" => {
                let mut n = 2;
                value.push('\n');
                while let Some(next) = lookahead.clone() {
                    if substr(&next, 0, 6) != record_type || cont_nr(&next, 7, 3)? != n {
                        break;
                    }
                    value += substr_from(&next, 10).trim_end();
                    value.push('\n');
                    next_line!();
                    n += 1;
                }
            }

            "SOURCE" => {
                let mut n = 2;
                value.push('\n');
                while let Some(next) = lookahead.clone() {
                    if substr(&next, 0, 6) != record_type || cont_nr(&next, 7, 3)? != n {
                        break;
                    }
                    value += substr(&next, 10, next.len()).trim();
                    value.push('\n');
                    next_line!();
                    n += 1;
                }
            }

            "REVDAT" => {
                let rev_nr = match substr(&value, 1, 3).trim().parse::<i32>() {
                    Ok(nr) => nr,
                    Err(_) => {
                        log::warn!(
                            "dropping REVDAT line ({}) with invalid modification number '{}'",
                            cur_line_nr, substr(&value, 1, 3)
                        );
                        continue;
                    }
                };

                let mut n = 2;
                let mut dropped_record = false;
                while let Some(next) = lookahead.clone() {
                    if substr(&next, 0, 6) != record_type {
                        break;
                    }

                    // An unreadable modification number on a follow-up line
                    // poisons the whole record.
                    let next_rev = match substr(&next, 7, 3).trim().parse::<i32>() {
                        Ok(nr) => nr,
                        Err(_) => {
                            dropped_record = true;
                            break;
                        }
                    };

                    if next_rev != rev_nr || cont_nr(&next, 10, 2)? != n {
                        break;
                    }
                    value += substr_from(&next, 38);
                    next_line!();
                    n += 1;
                }

                if dropped_record {
                    log::warn!("dropping REVDAT record ({cur_line_nr}) with an invalid continuation line");
                    continue;
                }
            }

            "CAVEAT" => {
                let mut n = 2;
                while let Some(next) = lookahead.clone() {
                    if substr(&next, 0, 6) != record_type || cont_nr(&next, 7, 3)? != n {
                        break;
                    }
                    value += substr_from(&next, 13).trim_end();
                    next_line!();
                    n += 1;
                }
            }

            "OBSLTE" => {
                while let Some(next) = lookahead.clone() {
                    if substr(&next, 0, 6) != record_type {
                        break;
                    }
                    value += substr_from(&next, 31);
                    next_line!();
                }
            }

            "FORMUL" => {
                let comp_nr = match substr(&value, 1, 3).trim().parse::<i32>() {
                    Ok(nr) => nr,
                    Err(_) => {
                        log::warn!(
                            "dropping FORMUL line ({}) with invalid component number '{}'",
                            cur_line_nr, substr(&value, 1, 3)
                        );
                        continue;
                    }
                };

                let mut n = 2;
                let mut dropped_record = false;
                while let Some(next) = lookahead.clone() {
                    if substr(&next, 0, 6) != record_type {
                        break;
                    }

                    // An unreadable component number on a follow-up line
                    // poisons the whole record.
                    let next_comp = match substr(&next, 7, 3).trim().parse::<i32>() {
                        Ok(nr) => nr,
                        Err(_) => {
                            dropped_record = true;
                            break;
                        }
                    };

                    if next_comp != comp_nr || cont_nr(&next, 16, 2)? != n {
                        break;
                    }
                    value += substr_from(&next, 19).trim_end();
                    next_line!();
                    n += 1;
                }

                if dropped_record {
                    log::warn!("dropping FORMUL record ({cur_line_nr}) with an invalid continuation line");
                    continue;
                }
            }

            "HETNAM" | "HETSYN" => {
                let mut n = 2;
                while let Some(next) = lookahead.clone() {
                    if substr(&next, 0, 6) != record_type || cont_nr(&next, 8, 2)? != n {
                        break;
                    }
                    value += substr_from(&next, 16).trim_end();
                    next_line!();
                    n += 1;
                }
            }

            "SITE  " => {
                let site_name = substr(&value, 5, 3).to_owned();
                value = value.trim_end().to_owned();

                // Pad the residue part to whole 11-character chunks.
                let n = value.len().saturating_sub(12);
                value += &" ".repeat(11 - (n % 11));

                while let Some(next) = lookahead.clone() {
                    if substr(&next, 0, 6) != record_type || substr(&next, 11, 3) != site_name {
                        break;
                    }

                    let mut s = substr_from(&next, 18).trim_end().to_owned();
                    s += &" ".repeat(11 - (s.len() % 11));
                    value += &s;
                    next_line!();
                }
            }

            "REMARK" => {
                record_type += substr(&value, 0, 4);

                // REMARK 200/240 carry key : value pairs worth a map.
                if record_type == "REMARK 200" || record_type == "REMARK 240" {
                    if let Some(colon) = value.find(':') {
                        let mut k = value[4..colon].trim().to_owned();
                        while k.contains("  ") {
                            k = k.replace("  ", " ");
                        }
                        let v = value[colon + 1..].trim().to_owned();

                        if v.eq_ignore_ascii_case("NONE") || v.eq_ignore_ascii_case("N/A") || v.eq_ignore_ascii_case("NAN") {
                            remark200.insert(k, ".".to_owned());
                        } else if !v.eq_ignore_ascii_case("NULL") {
                            remark200.insert(k, v);
                        }
                    }
                }
            }

            _ => {}
        }

        let record = PdbRecord {
            line_nr: cur_line_nr,
            name: record_type.clone(),
            value,
        };

        let trimmed_type = record_type.trim();
        if trimmed_type == "LINK" || trimmed_type == "LINKR" {
            let mut link = Link {
                a: LinkAtom {
                    name: record.vs(13, 16),
                    alt_loc: record.vc(17),
                    res_name: record.vs(18, 20),
                    chain_id: record.vc(22),
                    res_seq: record.vi(23, 26),
                    icode: record.vc(27),
                },
                b: LinkAtom {
                    name: record.vs(43, 46),
                    alt_loc: record.vc(47),
                    res_name: record.vs(48, 50),
                    chain_id: record.vc(52),
                    res_seq: record.vi(53, 56),
                    icode: record.vc(57),
                },
                sym_op_a: record.vs(60, 65),
                sym_op_b: record.vs(67, 72),
                distance: None,
            };

            if trimmed_type == "LINK" {
                let f = record.vf(74, 78);
                link.distance = f.parse::<f64>().ok();
                if link.distance.is_none() && !f.is_empty() {
                    log::debug!("error parsing link distance at line {}", record.line_nr);
                }
            }

            links.push(link);
        }

        let at_end = trimmed_type == "END";
        records.push(record);
        if at_end {
            break;
        }
    }

    if !dropped.is_empty() {
        let list = dropped.iter().cloned().collect::<Vec<_>>().join(", ");
        log::warn!("dropped unsupported records: {list}");
    }

    if records.is_empty() {
        return Err(RCifError::NotAPdbFile);
    }

    Ok(PreParsed {
        records,
        links,
        remark200,
    })
}

//---------------------------------------------------------------------------//
//                              Small helpers
//---------------------------------------------------------------------------//

lazy_static! {
    static ref DATE_FULL_RX: regex::Regex =
        regex::Regex::new(r"^(\d{2})-(JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)-(\d{2})$").unwrap();
    static ref DATE_MONTH_RX: regex::Regex =
        regex::Regex::new(r"^(JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)-(\d{2})$").unwrap();
    static ref AUTHOR_RX: regex::Regex = regex::Regex::new(r"^((?:[A-Z]+\.)+)(.+)$").unwrap();
    static ref SYMMETRY_RX: regex::Regex = regex::Regex::new(r"^(\d{1,3})(\d{3})$").unwrap();
    static ref CHARGE_RX: regex::Regex = regex::Regex::new(r"^(\d+)(\+|-)$").unwrap();
}

fn month_number(name: &str) -> Option<u8> {
    MONTHS.iter().find(|(m, _)| *m == name).map(|(_, n)| *n)
}

/// This function converts a legacy PDB date (`13-JUL-11` or `JUL-11`) into the
/// ISO form the dictionary expects. Invalid dates come back unchanged, with an
/// error for the caller to log.
pub fn pdb2cif_date(s: &str) -> Result<String> {
    if let Some(m) = DATE_FULL_RX.captures(s) {
        let day: u8 = m[1].parse().map_err(|_| RCifError::ParseError(0, format!("invalid date '{s}'")))?;
        let month = month_number(&m[2]).ok_or_else(|| RCifError::ParseError(0, format!("invalid month in '{s}'")))?;
        let mut year: i32 = 1900 + m[3].parse::<i32>().map_err(|_| RCifError::ParseError(0, format!("invalid date '{s}'")))?;
        if year < 1950 {
            year += 100;
        }

        // Reject things like FEB-30 before formatting.
        let date = time::Date::from_calendar_date(year, time::Month::try_from(month).map_err(|_| RCifError::ParseError(0, format!("invalid month in '{s}'")))?, day)
            .map_err(|_| RCifError::ParseError(0, format!("invalid date '{s}'")))?;

        let format = time::format_description::parse("[year]-[month]-[day]")?;
        Ok(date.format(&format)?)
    } else if let Some(m) = DATE_MONTH_RX.captures(s) {
        let month = month_number(&m[1]).ok_or_else(|| RCifError::ParseError(0, format!("invalid month in '{s}'")))?;
        let mut year: i32 = 1900 + m[2].parse::<i32>().map_err(|_| RCifError::ParseError(0, format!("invalid date '{s}'")))?;
        if year < 1950 {
            year += 100;
        }

        Ok(format!("{year:04}-{month:02}"))
    } else {
        Err(RCifError::ParseError(0, format!("invalid date '{s}'")))
    }
}

/// Like [pdb2cif_date], but logging instead of failing.
pub fn pdb2cif_date_lenient(s: &str) -> String {
    match pdb2cif_date(s) {
        Ok(date) => date,
        Err(_) => {
            if !s.is_empty() {
                log::debug!("invalid date ({s})");
            }
            s.to_owned()
        }
    }
}

/// This function rewrites `A.B.Surname` into `Surname, A.B.` and fixes the
/// all-caps casing legacy files use for author names.
pub fn pdb2cif_auth(author: &str) -> String {
    let mut author = author.trim().to_owned();

    if let Some(m) = AUTHOR_RX.captures(&author) {
        author = format!("{}, {}", &m[2], &m[1]);
    }

    let mut upper = true;
    let mut result = String::with_capacity(author.len());
    for c in author.chars() {
        if c.is_ascii_punctuation() || c.is_whitespace() {
            upper = true;
            result.push(c);
        } else if upper {
            upper = false;
            result.push(c);
        } else {
            result.push(c.to_ascii_lowercase());
        }
    }

    result
}

/// This function converts a packed symmetry code (`1555`) into the mmCIF form
/// (`1_555`). An empty input stays empty; anything else is an error.
pub fn pdb2cif_symmetry(s: &str) -> Result<String> {
    if s.is_empty() {
        return Ok(String::new());
    }

    match SYMMETRY_RX.captures(s) {
        Some(m) => Ok(format!("{}_{}", &m[1], &m[2])),
        None => Err(RCifError::ParseError(0, format!("invalid symmetry value '{s}'"))),
    }
}

/// This function converts a legacy charge (`2+`/`1-`) into a signed number.
pub fn pdb2cif_charge(c: &str) -> String {
    match CHARGE_RX.captures(c) {
        Some(m) if &m[2] == "-" => format!("-{}", &m[1]),
        Some(m) => m[1].to_owned(),
        None => c.to_owned(),
    }
}

/// This function produces the asym id for a zero-based number: A..Z, then
/// AA..AZ, BA.. and so on.
pub fn cif_id_for_number(mut number: usize) -> String {
    let mut result = String::new();

    loop {
        result.insert(0, (b'A' + (number % 26) as u8) as char);
        number /= 26;
        if number == 0 {
            break;
        }
        number -= 1;
    }

    result
}

/// This function splits a comma-separated list, trimming every part.
pub(crate) fn split_csv(value: &str) -> Vec<String> {
    value.split(',').map(|s| s.trim().to_owned()).collect()
}

//---------------------------------------------------------------------------//
//                              Entry points
//---------------------------------------------------------------------------//

/// This function reads a legacy PDB file and reconstructs an mmCIF model from it.
pub fn read_pdb_file(input: &str) -> Result<File> {
    let mut file = File::new();

    // The converter validates against the PDBx dictionary when it is around.
    match crate::validator::Validator::from_name("mmcif_pdbx") {
        Ok(validator) => file.set_validator(Some(std::sync::Arc::new(validator))),
        Err(error) => log::info!("no PDBx dictionary available, continuing without ({error})"),
    }

    let pre_parsed = pre_parse(input)?;
    let mut parser = reconstruct::PdbParser::new(&pre_parsed);
    let datablock = parser.parse()?;
    file.append(datablock)?;

    Ok(file)
}

/// This function reads either format: all PDB files start with a HEADER line
/// (or at least an alphabetic record name), while mmCIF files cannot validly
/// start with a letter other than the `d` of `data_`.
pub fn read_structure_file<R: Read>(mut reader: R) -> Result<File> {
    let mut data = vec![];
    reader.read_to_end(&mut data)?;

    let first = data.iter().find(|&&b| !(b as char).is_whitespace());

    match first {
        Some(&b) if (b as char).is_ascii_alphabetic() && b.to_ascii_uppercase() != b'D' => {

            // The column arithmetic below assumes ASCII; anything else is
            // replaced so slicing stays on character boundaries.
            let input: String = data.iter().map(|&b| if b.is_ascii() { b as char } else { '?' }).collect();
            read_pdb_file(&input)
        }
        _ => File::from_bytes(&data),
    }
}
