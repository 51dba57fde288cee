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
Module with the mmCIF writer.

Writing never mutates the model: it is a pure function of the in-memory data.
Multi-row categories are written as `loop_` blocks with column-aligned values,
single-row categories as aligned tag/value pairs. The quoting of each value is
chosen from its content: bare where possible, single or double quotes when the
value contains blanks, and a semicolon text field for multi-line or very long
values. No emitted line exceeds 132 columns, except text fields, which are
never split.
!*/

use std::io::Write;

use crate::error::Result;
use crate::lexer::{is_non_blank, is_unquoted_string, MAX_LINE_LENGTH};
use crate::model::{Category, Datablock, File};

#[cfg(test)] mod writer_test;

//---------------------------------------------------------------------------//
//                         Value-level serialization
//---------------------------------------------------------------------------//

/// This function writes one value at the provided offset, choosing its
/// quoting, and returns the offset after it.
///
/// `width` is the column width for loop output; a zero width forces a text
/// field.
pub(crate) fn write_value<W: Write>(out: &mut W, value: &str, mut offset: usize, width: usize) -> Result<usize> {
    if value.contains('\n') || width == 0 || value.len() >= MAX_LINE_LENGTH {

        // A semicolon at the start of a line inside the value would terminate
        // the text field early, so it gets escaped.
        let value = value.replace("\n;", "\n\\;");

        if offset > 0 {
            writeln!(out)?;
        }
        write!(out, ";{value}")?;
        if !value.ends_with('\n') {
            writeln!(out)?;
        }
        writeln!(out, ";")?;
        offset = 0;
    } else if is_unquoted_string(value) {
        write!(out, "{value}")?;

        if value.len() < width {
            write!(out, "{}", " ".repeat(width - value.len()))?;
            offset += width;
        } else {
            write!(out, " ")?;
            offset += value.len() + 1;
        }
    } else {
        let mut done = false;

        for quote in ['\'', '"'] {
            if !quote_is_usable(value, quote) {
                continue;
            }

            write!(out, "{quote}{value}{quote}")?;

            if value.len() + 2 < width {
                write!(out, "{}", " ".repeat(width - value.len() - 2))?;
                offset += width;
            } else {
                write!(out, " ")?;
                offset += value.len() + 1;
            }

            done = true;
            break;
        }

        if !done {
            if offset > 0 {
                writeln!(out)?;
            }
            writeln!(out, ";{value}")?;
            writeln!(out, ";")?;
            offset = 0;
        }
    }

    Ok(offset)
}

/// A quote character is usable unless the value contains it followed by
/// whitespace or by itself, or at the very end. Such a sequence would read
/// back as the end of the string.
fn quote_is_usable(value: &str, quote: char) -> bool {
    let bytes = value.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b as char == quote {
            match bytes.get(i + 1) {
                Some(&next) if is_non_blank(next as i32) && next as char != quote => {}
                _ => return false,
            }
        }
    }

    true
}

/// Visible width a value will take in a loop column, quoting included.
fn value_width(value: &str) -> usize {
    if is_unquoted_string(value) {
        value.len()
    } else {
        value.len() + 2
    }
}

//---------------------------------------------------------------------------//
//                        Category-level serialization
//---------------------------------------------------------------------------//

impl Category {

    /// This function writes the category with its columns in their natural order.
    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        let order = (0..self.columns().len()).collect::<Vec<_>>();
        self.write_ordered(out, &order)
    }

    /// This function writes the category with the provided items first, in the
    /// provided order, followed by the remaining columns.
    pub fn write_with_items<W: Write>(&mut self, out: &mut W, items: &[String]) -> Result<()> {
        for item in items {
            self.add_column(item)?;
        }

        let mut order = vec![];
        for item in items {
            if let Some(cix) = self.column_index(item) {
                if !order.contains(&cix) {
                    order.push(cix);
                }
            }
        }

        for cix in 0..self.columns().len() {
            if !order.contains(&cix) {
                order.push(cix);
            }
        }

        self.write_ordered(out, &order)
    }

    fn write_ordered<W: Write>(&self, out: &mut W, order: &[usize]) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        let need_loop = self.len() > 1;

        if need_loop {
            writeln!(out, "loop_")?;

            for &cix in order {
                writeln!(out, "_{}.{} ", self.name(), self.columns()[cix].name)?;
            }

            // Per-column width: at least 2, at most one line.
            let mut column_widths = vec![2usize; self.columns().len()];
            for id in self.rows() {
                for (cix, width) in column_widths.iter_mut().enumerate() {
                    if let Some(value) = self.raw_value_by_column(id, cix as u32) {
                        if value.contains('\n') {
                            continue;
                        }

                        let l = value_width(value);
                        if l >= MAX_LINE_LENGTH {
                            continue;
                        }

                        if *width < l + 1 {
                            *width = l + 1;
                        }
                    }
                }
            }

            for id in self.rows() {
                let mut offset = 0;

                for &cix in order {
                    let w = column_widths[cix];

                    let value = self.raw_value_by_column(id, cix as u32).unwrap_or("?");
                    let value = if value.is_empty() { "?" } else { value };

                    let mut l = value_width(value);
                    if l < w {
                        l = w;
                    }

                    if offset + l >= MAX_LINE_LENGTH && offset > 0 {
                        writeln!(out)?;
                        offset = 0;
                    }

                    offset = write_value(out, value, offset, w)?;

                    if offset >= MAX_LINE_LENGTH {
                        writeln!(out)?;
                        offset = 0;
                    }
                }

                if offset > 0 {
                    writeln!(out)?;
                }
            }
        } else {

            // Single-row layout: aligned tag/value pairs.
            let gutter = self.columns().iter()
                .map(|c| c.name.len() + self.name().len() + 2)
                .max()
                .unwrap_or(0) + 3;

            let id = match self.front() {
                Some(id) => id,
                None => return Ok(()),
            };

            for &cix in order {
                let col_name = &self.columns()[cix].name;
                let tag_len = col_name.len() + self.name().len() + 2;
                write!(out, "_{}.{}{}", self.name(), col_name, " ".repeat(gutter - tag_len))?;

                let value = self.raw_value_by_column(id, cix as u32).unwrap_or("?");
                let value = if value.is_empty() { "?" } else { value };

                let mut offset = gutter;
                if value.len() + gutter >= MAX_LINE_LENGTH {
                    writeln!(out)?;
                    offset = 0;
                }

                if write_value(out, value, offset, 1)? != 0 {
                    writeln!(out)?;
                }
            }
        }

        writeln!(out, "# ")?;
        Ok(())
    }
}

//---------------------------------------------------------------------------//
//                     Datablock/File-level serialization
//---------------------------------------------------------------------------//

impl Datablock {

    /// This function writes the datablock: its header, the `entry` category
    /// first (with a synthesized `audit_conform` row when a dictionary is
    /// loaded), then every other category.
    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "data_{}", self.name())?;
        writeln!(out, "# ")?;

        if let Some(entry) = self.categories().find(|c| c.name() == "entry") {
            entry.write(out)?;

            if let Some(validator) = self.validator() {
                let mut audit_conform = Category::new("audit_conform", None)?;
                audit_conform.emplace(&[
                    ("dict_name", validator.dict_name()),
                    ("dict_version", validator.dict_version()),
                ])?;
                audit_conform.write(out)?;
            }
        }

        for category in self.categories() {
            if category.name() != "entry" && category.name() != "audit_conform" {
                category.write(out)?;
            }
        }

        Ok(())
    }

    /// This function writes the datablock with an explicit tag order: the
    /// categories named by the order come first, each with its items in the
    /// given order, followed by every category the order missed.
    pub fn write_with_order<W: Write>(&mut self, out: &mut W, order: &[String]) -> Result<()> {
        writeln!(out, "data_{}", self.name())?;
        writeln!(out, "# ")?;

        let mut cat_order: Vec<String> = vec![];
        for tag in order {
            let (cat, _) = crate::parser::split_tag_name(tag);
            if !cat_order.iter().any(|c| c.eq_ignore_ascii_case(&cat)) {
                cat_order.push(cat);
            }
        }

        for cat_name in &cat_order {
            let mut items = vec![];
            for tag in order {
                let (cat, item) = crate::parser::split_tag_name(tag);
                if cat.eq_ignore_ascii_case(cat_name) {
                    items.push(item);
                }
            }

            if let Some(category) = self.get_mut(cat_name) {
                category.write_with_items(out, &items)?;
            }
        }

        let remaining: Vec<String> = self.categories()
            .map(|c| c.name().to_owned())
            .filter(|name| !cat_order.iter().any(|c| c.eq_ignore_ascii_case(name)))
            .collect();

        for name in remaining {
            if let Some(category) = self.get(&name) {
                category.write(out)?;
            }
        }

        Ok(())
    }
}

impl File {

    /// This function writes every datablock of the file.
    pub fn save<W: Write>(&self, out: &mut W) -> Result<()> {
        for datablock in self.datablocks() {
            datablock.write(out)?;
        }

        Ok(())
    }

    /// This function writes every datablock with an explicit tag order.
    pub fn write_with_order<W: Write>(&mut self, out: &mut W, order: &[String]) -> Result<()> {
        for datablock in self.datablocks_mut() {
            datablock.write_with_order(out, order)?;
        }

        Ok(())
    }

    /// The file serialized to a string, mostly for tests and diagnostics.
    pub fn to_string_lossy(&self) -> String {
        let mut out = vec![];
        match self.save(&mut out) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => String::new(),
        }
    }
}
