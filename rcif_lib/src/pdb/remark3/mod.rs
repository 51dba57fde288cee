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
Module with the REMARK 3 refinement-statistics dispatcher.

Every refinement program writes its statistics in its own free-text layout,
so each one gets a template: an ordered list of line patterns with the
category and items their captures land in. The dispatcher reads the
`PROGRAM :` line, runs the matching templates over a copy of the remark
lines, scores each run by the fraction of lines it understood, and keeps the
best. When no candidate reaches 0.9, every template gets a try; the threshold
and the fall-through are deliberate heuristics with no ground truth behind
them.
!*/

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::condition::key;
use crate::model::Datablock;
use crate::pdb::PdbRecord;

use self::templates::{program_templates, ProgramTemplate, TemplateLine};

pub(crate) mod templates;

#[cfg(test)] mod remark3_test;

//---------------------------------------------------------------------------//
//                              Template engine
//---------------------------------------------------------------------------//

/// One run of one program's template over the remark lines.
struct TemplateRun<'a> {
    name: String,
    exp_method: String,
    records: &'a [PdbRecord],
    rec_index: usize,
    db: Datablock,
    line: String,
    captures: Vec<String>,
    state: usize,
    program: &'static ProgramTemplate,
    regex_cache: BTreeMap<&'static str, regex::Regex>,
}

impl<'a> TemplateRun<'a> {
    fn new(name: &str, exp_method: &str, records: &'a [PdbRecord], db_name: &str, program: &'static ProgramTemplate) -> Self {
        Self {
            name: name.to_owned(),
            exp_method: exp_method.to_owned(),
            records,
            rec_index: 0,
            db: Datablock::new(db_name),
            line: String::new(),
            captures: vec![],
            state: 0,
            program,
            regex_cache: BTreeMap::new(),
        }
    }

    /// The next logical line: values wrapped over several records are glued
    /// back together, multiple spaces collapse to one.
    fn next_line(&mut self) -> String {
        self.line.clear();

        while self.rec_index < self.records.len() && self.records[self.rec_index].is("REMARK   3") {
            let value = self.records[self.rec_index].value.clone();

            // Where the value after the colon starts, for wrap detection.
            let value_indent = value.as_bytes().iter().enumerate().skip(4)
                .find(|(_, &b)| b == b':')
                .map(|(i, _)| i)
                .unwrap_or(0);

            self.line = self.records[self.rec_index].vs_from(12);
            self.rec_index += 1;

            if self.line.is_empty() {
                continue;
            }

            if value_indent > 4 {
                let indent = " ".repeat(value_indent - 4);

                while self.rec_index < self.records.len()
                    && self.records[self.rec_index].is("REMARK   3")
                    && self.records[self.rec_index].value.len() > value_indent
                {
                    let v = &self.records[self.rec_index].value;
                    if !v[4..].starts_with(&indent) {
                        break;
                    }

                    self.line.push(' ');
                    self.line += v[value_indent..].trim();
                    self.rec_index += 1;
                }
            }

            // Collapse multiple spaces.
            let mut collapsed = String::with_capacity(self.line.len());
            let mut space = false;
            for c in self.line.chars() {
                if c.is_whitespace() {
                    space = true;
                } else {
                    if space && !collapsed.is_empty() {
                        collapsed.push(' ');
                    }
                    space = false;
                    collapsed.push(c);
                }
            }
            self.line = collapsed;

            break;
        }

        log::trace!("RM3: {}", self.line);
        self.line.clone()
    }

    /// Full-match the current line, saving the captures and moving the state.
    fn matches(&mut self, expr: &'static str, next_state: usize) -> bool {
        let rx = self.regex_cache.entry(expr).or_insert_with(|| {
            regex::Regex::new(&format!("^(?:{expr})$")).unwrap_or_else(|error| {
                log::warn!("invalid template expression {expr}: {error}");
                regex::Regex::new("$^").expect("trivial regex")
            })
        });

        match rx.captures(&self.line) {
            Some(captures) => {
                self.captures = captures.iter()
                    .map(|m| m.map(|m| m.as_str().to_owned()).unwrap_or_default())
                    .collect();
                self.state = next_state;
                true
            }
            None => false,
        }
    }

    /// One full pass over the lines. The score is the matched fraction.
    fn parse(&mut self) -> Result<f32> {
        let mut line_count = 0usize;
        let mut dropped = 0usize;
        let mut remarks = String::new();
        self.state = 0;

        let template = self.program.template;
        let count = template.len();

        loop {
            if self.next_line().is_empty() {
                break;
            }

            line_count += 1;

            // Skip over AUTHORS lines.
            if self.state == 0 && self.matches(r"AUTHORS\s*:.+", 0) {
                continue;
            }

            let mut state = self.state;
            let mut matched = false;

            while state < count {
                let tmpl: &TemplateLine = &template[state];

                let next_state = (state as i32 + tmpl.next_state_offset).max(0) as usize;
                if self.matches(tmpl.rx, next_state) {
                    if !tmpl.category.is_empty() && !tmpl.items.is_empty() {
                        if tmpl.ls_restr_type.is_empty() {
                            self.store_capture(tmpl.category, tmpl.items, tmpl.create_new)?;
                        } else if tmpl.create_new {
                            self.store_refine_ls_restr(tmpl.ls_restr_type, tmpl.items)?;
                        } else {
                            self.update_refine_ls_restr(tmpl.ls_restr_type, tmpl.items)?;
                        }
                    }

                    matched = true;
                    break;
                }

                state += 1;
            }

            if matched {
                continue;
            }

            if state == count && self.matches(r"OTHER REFINEMENT REMARKS\s*:\s*(.*)", count + 1) {
                remarks = self.captures.get(1).cloned().unwrap_or_default();
                continue;
            }

            if state == count + 1 || self.state == count + 1 {
                remarks = remarks + "\n" + &self.line;
                continue;
            }

            log::trace!("dropping line: '{}'", self.line);
            dropped += 1;
        }

        if !remarks.is_empty() && !remarks.eq_ignore_ascii_case("NULL") {
            if let Some(refine) = self.db.get_mut("refine") {
                if let Some(front) = refine.front() {
                    refine.set_value(front, "details", remarks.trim())?;
                }
            }
        }

        if line_count == 0 {
            return Ok(0.0);
        }

        Ok((line_count - dropped) as f32 / line_count as f32)
    }

    fn program(&self) -> String {
        let rx = regex::Regex::new(&format!("^(?:{})$", self.program.version_rx));
        match rx.ok().and_then(|rx| rx.captures(&self.name)) {
            Some(m) => m.get(1).map(|m| m.as_str().to_owned()).unwrap_or_else(|| self.name.clone()),
            None => self.program.canonical_name.to_owned(),
        }
    }

    fn version(&self) -> String {
        let rx = regex::Regex::new(&format!("^(?:{})$", self.program.version_rx));
        match rx.ok().and_then(|rx| rx.captures(&self.name)) {
            Some(m) => m.get(2).map(|m| m.as_str().to_owned()).unwrap_or_default(),
            None => String::new(),
        }
    }

    /// True for the placeholder values remark blocks are full of.
    fn is_null_value(value: &str) -> bool {
        value.is_empty()
            || value.eq_ignore_ascii_case("NULL")
            || value.eq_ignore_ascii_case("NONE")
            || value.eq_ignore_ascii_case("Inf")
            || value.eq_ignore_ascii_case("+Inf")
            || value.bytes().all(|b| b == b'*')
    }

    /// Store the captures of the current match into `(category, items)`,
    /// seeding the row with the category's boilerplate when it is new.
    fn store_capture(&mut self, category: &str, items: &[&str], create_new: bool) -> Result<()> {
        let mut create_new = create_new;

        for (capture, item) in items.iter().enumerate() {
            let value = self.captures.get(capture + 1).map(|v| v.trim().to_owned()).unwrap_or_default();

            if Self::is_null_value(&value) {
                continue;
            }

            log::trace!("storing '{value}' in _{category}.{item}");

            let needs_seed = create_new || self.db.get(category).map(|c| c.is_empty()).unwrap_or(true);
            if needs_seed {
                self.seed_row(category)?;
                create_new = false;
            }

            let cat = self.db.category_mut(category)?;
            if let Some(back) = cat.back() {
                cat.set_value(back, item, &value)?;
            }
        }

        Ok(())
    }

    /// The boilerplate each category's fresh rows start with.
    fn seed_row(&mut self, category: &str) -> Result<()> {
        let exp_method = self.exp_method.clone();
        let entry_id = self.db.name().to_owned();

        let cat = self.db.category_mut(category)?;

        match category.to_lowercase().as_str() {
            "refine" => {
                cat.emplace(&[
                    ("pdbx_refine_id", &exp_method),
                    ("entry_id", &entry_id),
                    ("pdbx_diffrn_id", "1"),
                ])?;
            }
            "refine_analyze" | "pdbx_refine" => {
                cat.emplace(&[
                    ("pdbx_refine_id", &exp_method),
                    ("entry_id", &entry_id),
                ])?;
            }
            "refine_hist" => {
                let (d_res_high, d_res_low) = match self.db.get("refine").and_then(|c| c.front().map(|r| (c.value(r, "ls_d_res_high").to_owned(), c.value(r, "ls_d_res_low").to_owned()))) {
                    Some((h, l)) => (h, l),
                    None => (String::new(), String::new()),
                };

                let cat = self.db.category_mut(category)?;
                cat.emplace(&[
                    ("pdbx_refine_id", &exp_method),
                    ("cycle_id", "LAST"),
                    ("d_res_high", if d_res_high.is_empty() { "." } else { &d_res_high }),
                    ("d_res_low", if d_res_low.is_empty() { "." } else { &d_res_low }),
                ])?;
            }
            "refine_ls_shell" => {
                cat.emplace(&[("pdbx_refine_id", &exp_method)])?;
            }
            "pdbx_refine_tls_group" => {
                let tls_id = self.db.get("pdbx_refine_tls")
                    .and_then(|c| c.back().map(|r| c.value(r, "id").to_owned()))
                    .unwrap_or_default();

                let cat = self.db.category_mut(category)?;
                let group_id = (cat.len() + 1).to_string();
                cat.emplace(&[
                    ("pdbx_refine_id", &exp_method),
                    ("id", &group_id),
                    ("refine_tls_id", &tls_id),
                ])?;
            }
            "pdbx_refine_tls" => {
                cat.emplace(&[
                    ("pdbx_refine_id", &exp_method),
                    ("method", "refined"),
                ])?;
            }
            "pdbx_reflns_twin" => {
                cat.emplace(&[
                    ("crystal_id", "1"),
                    ("diffrn_id", "1"),
                    ("operator", ""),
                    ("fraction", "0"),
                ])?;
            }
            "reflns" => {
                let ordinal = (cat.len() + 1).to_string();
                cat.emplace(&[
                    ("pdbx_ordinal", &ordinal),
                    ("entry_id", &entry_id),
                    ("pdbx_diffrn_id", "1"),
                ])?;
            }
            _ => {
                cat.emplace(&[])?;
            }
        }

        Ok(())
    }

    /// First phase of the refine_ls_restr emission: a fresh restraint-type row.
    fn store_refine_ls_restr(&mut self, restr_type: &str, items: &[&str]) -> Result<()> {
        let exp_method = self.exp_method.clone();
        let mut created = false;

        for (capture, item) in items.iter().enumerate() {
            let value = self.captures.get(capture + 1).map(|v| v.trim().to_owned()).unwrap_or_default();
            if Self::is_null_value(&value) {
                continue;
            }

            let cat = self.db.category_mut("refine_ls_restr")?;
            if !created {
                cat.emplace(&[
                    ("pdbx_refine_id", &exp_method),
                    ("type", restr_type),
                ])?;
                created = true;
            }

            if let Some(back) = cat.back() {
                cat.set_value(back, item, &value)?;
            }
        }

        Ok(())
    }

    /// Second phase: the dev_ideal values address the row of the same
    /// restraint type written in the first phase.
    fn update_refine_ls_restr(&mut self, restr_type: &str, items: &[&str]) -> Result<()> {
        let exp_method = self.exp_method.clone();

        let row = self.db.get("refine_ls_restr").and_then(|cat| {
            cat.first(&(key("type").is(restr_type) & key("pdbx_refine_id").is(&exp_method)))
        });

        match row {
            None => self.store_refine_ls_restr(restr_type, items)?,
            Some(row) => {
                for (capture, item) in items.iter().enumerate() {
                    let mut value = self.captures.get(capture + 1).map(|v| v.trim().to_owned()).unwrap_or_default();
                    if value.eq_ignore_ascii_case("NULL") || (!value.is_empty() && value.bytes().all(|b| b == b'*')) {
                        value.clear();
                    }

                    let cat = self.db.category_mut("refine_ls_restr")?;
                    cat.set_value(row, item, &value)?;
                }
            }
        }

        Ok(())
    }

    /// Program-specific cleanups on the scratch datablock.
    fn fixup(&mut self) -> Result<()> {
        match self.program.canonical_name {
            "PHENIX" => {

                // PHENIX writes shell completeness as a fraction.
                if let Some(cat) = self.db.get_mut("refine_ls_shell") {
                    let mut fixes = vec![];
                    for row in cat.rows() {
                        if let Ok(val) = cat.value(row, "percent_reflns_obs").parse::<f32>() {
                            fixes.push((row, ((val * 100.0) as i32).to_string()));
                        }
                    }
                    for (row, value) in fixes {
                        cat.set_value(row, "percent_reflns_obs", &value)?;
                    }
                }
            }

            "NUCLSQ" | "PROLSQ" => {

                // These never print the total atom count.
                if let Some(cat) = self.db.get_mut("refine_hist") {
                    let mut fixes = vec![];
                    for row in cat.rows() {
                        let total: i64 = ["pdbx_number_atoms_protein", "pdbx_number_atoms_nucleic_acid", "pdbx_number_atoms_ligand", "number_atoms_solvent"]
                            .iter()
                            .filter_map(|item| cat.value(row, item).parse::<i64>().ok())
                            .sum();
                        fixes.push((row, total.to_string()));
                    }
                    for (row, value) in fixes {
                        cat.set_value(row, "number_atoms_total", &value)?;
                    }
                }
            }

            _ => {}
        }

        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                              Dispatcher
//---------------------------------------------------------------------------//

/// This function parses a REMARK 3 block into the provided datablock.
///
/// Returns true when a refinement program could be recognized and its
/// statistics extracted.
pub fn parse<'a>(exp_method: &str, records: &'a [PdbRecord], db: &mut Datablock) -> Result<bool> {
    let mut index = 0;

    let mut next_line = |index: &mut usize| -> String {
        let mut result = String::new();
        while result.is_empty() && *index < records.len() && records[*index].is("REMARK   3") {
            result = records[*index].vs_from(12);
            *index += 1;
        }
        result
    };

    // All remark 3 blocks start with the same two lines.
    if next_line(&mut index) != "REFINEMENT." {
        log::debug!("unexpected data in REMARK 3");
        return Ok(false);
    }

    let line = next_line(&mut index);
    let programs = match line.strip_prefix("PROGRAM") {
        Some(rest) => match rest.trim_start().strip_prefix(':') {
            Some(list) => list.trim().to_owned(),
            None => {
                log::debug!("expected valid PROGRAM line in REMARK 3");
                return Ok(false);
            }
        },
        None => {
            log::debug!("expected valid PROGRAM line in REMARK 3");
            return Ok(false);
        }
    };

    let remaining: &'a [PdbRecord] = &records[index..];
    let mut scores: Vec<(f32, TemplateRun<'a>)> = vec![];

    let mut try_parser = |scores: &mut Vec<(f32, TemplateRun<'a>)>, name: &str, program: &'static ProgramTemplate| {
        let mut run = TemplateRun::new(name, exp_method, remaining, db.name(), program);

        let score = match run.parse() {
            Ok(score) => score,
            Err(error) => {
                log::warn!("error parsing REMARK 3 with {}: {error}", run.program());
                0.0
            }
        };

        log::debug!("score for {}: {score}", run.program());

        if score > 0.0 {
            scores.push((score, run));
        }
    };

    for program in programs.split(", ").map(str::trim).filter(|p| !p.is_empty()) {
        let mut recognized = false;

        for template in program_templates() {
            if template.name_prefixes.iter().any(|prefix| program.starts_with(prefix)) {
                try_parser(&mut scores, program, template);
                recognized = true;
            }
        }

        if !recognized {
            log::debug!("skipping unknown program ({program}) in REMARK 3");
        }
    }

    scores.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let guess_program = scores.first().map(|(score, _)| *score < 0.9).unwrap_or(true);
    if guess_program {
        log::debug!("unknown or untrusted program in REMARK 3, trying all parsers to see if there is a match");

        for template in program_templates() {
            try_parser(&mut scores, template.canonical_name, template);
        }

        scores.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    }

    let (score, mut best) = match scores.into_iter().next() {
        Some(best) => best,
        None => return Ok(false),
    };

    log::debug!(
        "choosing {} version '{}' as refinement program, score = {score}",
        best.program(), best.version()
    );

    let program = best.program();
    let version = best.version();

    let ordinal = (db.get("software").map(|c| c.len()).unwrap_or(0) + 1).to_string();
    db.category_mut("software")?.emplace(&[
        ("name", &program),
        ("classification", "refinement"),
        ("version", &version),
        ("pdbx_ordinal", &ordinal),
    ])?;

    best.fixup()?;

    // Merge the winner's scratch datablock into the real one. For reflns and
    // refine only the first row's values are copied.
    let scratch = best.db;
    for cat in scratch.categories() {
        let single_row = cat.name() == "reflns" || cat.name() == "refine";

        if single_row {
            let front = match cat.front() {
                Some(front) => front,
                None => continue,
            };

            let items: Vec<(String, String)> = cat.row(front).items().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();

            let target = db.category_mut(cat.name())?;
            match target.front() {
                None => {
                    let items: Vec<(&str, &str)> = items.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                    target.emplace(&items)?;
                }
                Some(existing) => {
                    for (item, value) in items {
                        target.set_value(existing, &item, &value)?;
                    }
                }
            }
        } else {
            let rows: Vec<Vec<(String, String)>> = cat.rows()
                .map(|row| cat.row(row).items().map(|(k, v)| (k.to_owned(), v.to_owned())).collect())
                .collect();

            let target = db.category_mut(cat.name())?;
            for row in rows {
                let items: Vec<(&str, &str)> = row.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                target.emplace(&items)?;
            }
        }
    }

    Ok(true)
}
