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
Module with the dictionary parser.

DDL dictionaries are mmCIF files whose datablock is mostly made of save
frames: one per category (frames whose name does not start with `_`) and one
per item. This parser drives the same lexer as the regular grammar driver but
collects the frames into [Validator] records instead of a data model: type
validators from `item_type_list`, category validators from `category` frames,
item validators from item frames, and the parent/child links from
`pdbx_item_linked_group_list` (or the pairwise `item_linked` form) in a final
pass.
!*/

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::error::{RCifError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::model::Datablock;
use crate::parser::split_tag_name;

use super::{CategoryValidator, ItemValidator, PrimitiveType, TypeValidator, Validator};

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// The dictionary parser: a lexer, one token of look-ahead, and the validator
/// pieces collected so far.
pub struct DictParser<'a> {
    lexer: Lexer<'a>,
    lookahead: Token,
    validator: Validator,

    /// Category validators collected from the category frames.
    category_validators: Vec<CategoryValidator>,

    /// Item validators collected from the item frames, grouped by category.
    item_validators: BTreeMap<String, Vec<ItemValidator>>,

    /// The dictionary's own datablock: the content outside the save frames.
    datablock: Option<Datablock>,

    /// Whether `item_type_list` has been turned into type validators yet.
    collected_item_types: bool,
}

//---------------------------------------------------------------------------//
//                           Implementations
//---------------------------------------------------------------------------//

impl<'a> DictParser<'a> {

    /// This function creates a new DictParser over the provided bytes.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let mut lexer = Lexer::new(data);
        let lookahead = lexer.next_token()?;

        Ok(Self {
            lexer,
            lookahead,
            validator: Validator::new(),
            category_validators: vec![],
            item_validators: BTreeMap::new(),
            datablock: None,
            collected_item_types: false,
        })
    }

    fn error(&self, message: &str) -> RCifError {
        RCifError::ParseError(self.lexer.line_nr(), message.to_owned())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.lookahead.kind != kind {
            return Err(self.error(&format!(
                "Unexpected token, expected {} but found {}",
                kind.name(),
                self.lookahead.kind.name()
            )));
        }

        let token = std::mem::replace(&mut self.lookahead, self.lexer.next_token()?);
        Ok(token)
    }

    /// This function parses the whole dictionary and returns the finished Validator.
    pub fn load_dictionary(&mut self) -> Result<Validator> {
        while self.lookahead.kind != TokenKind::Eof {
            match self.lookahead.kind {
                TokenKind::Global => {
                    self.expect(TokenKind::Global)?;
                    while self.lookahead.kind == TokenKind::Tag {
                        self.expect(TokenKind::Tag)?;
                        self.expect(TokenKind::Value)?;
                    }
                }
                _ => {
                    let name = self.expect(TokenKind::Data)?.value;
                    self.datablock = Some(Datablock::new(&name));
                    self.parse_data_block()?;
                }
            }
        }

        // Store the collected validators.
        for cv in std::mem::take(&mut self.category_validators) {
            self.validator.add_category_validator(cv);
        }

        for (category, items) in std::mem::take(&mut self.item_validators) {
            if self.validator.validator_for_category(&category).is_none() {

                // Items of categories without their own frame still get one.
                log::debug!("category {category} has items but no frame of its own");
                self.validator.add_category_validator(CategoryValidator::new(&category, vec![], BTreeSet::new()));
            }

            if let Some(cv) = self.validator.validator_for_category_mut(&category) {
                for item in items {
                    cv.add_item_validator(item);
                }
            }
        }

        self.link_items()?;

        // Store the meta information.
        if let Some(datablock) = &self.datablock {
            let title = datablock.first_item("_dictionary.title").to_owned();
            let version = datablock.first_item("_dictionary.version").to_owned();
            self.validator.set_dict_name(&title);
            self.validator.set_dict_version(&version);
        }

        Ok(std::mem::take(&mut self.validator))
    }

    /// This function parses the body of the dictionary datablock: regular
    /// loops and tags go into the datablock itself, save frames into the
    /// validator pieces.
    fn parse_data_block(&mut self) -> Result<()> {
        let mut current_cat: Option<String> = None;

        loop {
            match self.lookahead.kind {
                TokenKind::Loop => {
                    current_cat = None;
                    let mut datablock = self.datablock.take().ok_or_else(|| self.error("no datablock"))?;
                    let result = self.parse_loop_into(&mut datablock);
                    self.datablock = Some(datablock);
                    result?;
                }

                TokenKind::Tag => {
                    let (cat_name, item_name) = split_tag_name(&self.lookahead.value);
                    self.expect(TokenKind::Tag)?;
                    let value = self.expect(TokenKind::Value)?.value;

                    let mut datablock = self.datablock.take().ok_or_else(|| self.error("no datablock"))?;
                    let category = datablock.category_mut(&cat_name)?;

                    // Consecutive tags of one category coalesce into one row.
                    let new_cat = current_cat.as_deref().map(|c| !c.eq_ignore_ascii_case(&cat_name)).unwrap_or(true);
                    let row = match category.back() {
                        Some(row) if !new_cat => row,
                        _ => category.append_empty_row(),
                    };

                    category.set_value(row, &item_name, &value)?;
                    current_cat = Some(cat_name);
                    self.datablock = Some(datablock);
                }

                TokenKind::Save => self.parse_save_frame()?,

                _ => break,
            }
        }

        Ok(())
    }

    /// This function reads one `loop_` construct into the provided datablock.
    fn parse_loop_into(&mut self, datablock: &mut Datablock) -> Result<()> {
        self.expect(TokenKind::Loop)?;

        let mut cat = String::new();
        let mut tags = vec![];

        while self.lookahead.kind == TokenKind::Tag {
            let (cat_name, item_name) = split_tag_name(&self.lookahead.value);

            if cat.is_empty() {
                cat = cat_name;
            } else if !cat.eq_ignore_ascii_case(&cat_name) {
                return Err(self.error("inconsistent categories in loop_"));
            }

            tags.push(item_name);
            self.expect(TokenKind::Tag)?;
        }

        let category = datablock.category_mut(&cat)?;
        while self.lookahead.kind == TokenKind::Value {
            let row = category.append_empty_row();

            for tag in &tags {
                let value = self.expect(TokenKind::Value)?.value;
                category.set_value(row, tag, &value)?;
            }
        }

        Ok(())
    }

    /// This function reads one save frame and turns it into either a category
    /// validator or a batch of item validators.
    fn parse_save_frame(&mut self) -> Result<()> {
        if !self.collected_item_types {
            self.collected_item_types = self.collect_item_types()?;
        }

        let frame_name = self.lookahead.value.clone();
        if frame_name.is_empty() {
            return Err(self.error("Invalid save frame, should contain more than just 'save_' here"));
        }

        let is_category_frame = !frame_name.starts_with('_');

        let mut dict = Datablock::new(&frame_name);

        self.expect(TokenKind::Save)?;

        while self.lookahead.kind == TokenKind::Loop || self.lookahead.kind == TokenKind::Tag {
            if self.lookahead.kind == TokenKind::Loop {
                self.parse_loop_into(&mut dict)?;
            } else {
                let (cat_name, item_name) = split_tag_name(&self.lookahead.value);
                self.expect(TokenKind::Tag)?;
                let value = self.expect(TokenKind::Value)?.value;

                // Within a frame, all single tags of a category share one row.
                let category = dict.category_mut(&cat_name)?;
                let row = match category.back() {
                    Some(row) => row,
                    None => category.append_empty_row(),
                };
                category.set_value(row, &item_name, &value)?;
            }
        }

        self.expect(TokenKind::Save)?;

        if is_category_frame {
            let category = dict.first_item("_category.id").to_owned();

            let mut keys = vec![];
            if let Some(cat) = dict.get("category_key") {
                for id in cat.rows() {
                    let (_, item) = split_tag_name(cat.value(id, "name"));
                    keys.push(item);
                }
            }

            let mut groups = BTreeSet::new();
            if let Some(cat) = dict.get("category_group") {
                for id in cat.rows() {
                    groups.insert(cat.value(id, "id").to_owned());
                }
            }

            self.category_validators.push(CategoryValidator::new(&category, keys, groups));
        } else {

            // If the type code is missing, this must be a pointer; the link
            // pass inherits the parent's type later.
            let type_code = dict.first_item("_item_type.code").to_owned();
            let type_code = if type_code.is_empty() || type_code == "?" {
                None
            } else {
                if self.validator.validator_for_type(&type_code).is_none() {
                    log::debug!("no validator for type {type_code}");
                }
                Some(type_code)
            };

            let mut enums = BTreeSet::new();
            if let Some(cat) = dict.get("item_enumeration") {
                for id in cat.rows() {
                    enums.insert(cat.value(id, "value").to_owned());
                }
            }

            if let Some(cat) = dict.get("item") {
                for id in cat.rows() {
                    let tag_name = cat.value(id, "name").to_owned();
                    let category_id = cat.value(id, "category_id").to_owned();
                    let mandatory = cat.value(id, "mandatory_code").eq_ignore_ascii_case("yes");

                    let (cat_name, item_name) = split_tag_name(&tag_name);
                    if cat_name.is_empty() || item_name.is_empty() {
                        return Err(self.error(&format!("Invalid tag name in _item.name {tag_name}")));
                    }

                    if !category_id.is_empty() && category_id != "?" && !category_id.eq_ignore_ascii_case(&cat_name) {
                        return Err(self.error(&format!(
                            "specified category id does not match the implicit category name for tag '{tag_name}'"
                        )));
                    }

                    let items = self.item_validators.entry(cat_name.clone()).or_default();

                    match items.iter_mut().find(|iv| iv.tag().eq_ignore_ascii_case(&item_name)) {
                        Some(existing) => {

                            // Frames may disagree; the item's own frame wins.
                            if *existing.mandatory() != mandatory && tag_name.eq_ignore_ascii_case(&frame_name) {
                                log::debug!("inconsistent mandatory value for {tag_name} in dictionary");
                                existing.set_mandatory(mandatory);
                            }

                            if existing.type_code().is_none() {
                                existing.set_type_code(type_code.clone());
                            }

                            existing.merge_enums(&enums);
                        }
                        None => items.push(ItemValidator::new(&item_name, &cat_name, mandatory, type_code.clone(), enums.clone())),
                    }
                }
            }
        }

        Ok(())
    }

    /// This function turns the `item_type_list` rows collected so far into
    /// type validators. Constructs use egrep syntax with escaped newlines and
    /// tabs; a construct that fails to compile falls back to match-everything.
    fn collect_item_types(&mut self) -> Result<bool> {
        let mut result = false;

        let datablock = match &self.datablock {
            Some(datablock) => datablock,
            None => return Err(self.error("no datablock")),
        };

        let mut types = vec![];
        if let Some(cat) = datablock.get("item_type_list") {
            for id in cat.rows() {
                let code = cat.value(id, "code").to_owned();
                let primitive_code = cat.value(id, "primitive_code").to_owned();
                let construct = cat.value(id, "construct")
                    .replace("\\n", "\n")
                    .replace("\\t", "\t")
                    .replace("\\\n", "");

                types.push((code, primitive_code, construct));
            }
        }

        for (code, primitive_code, construct) in types {
            let primitive = PrimitiveType::parse(&primitive_code)?;

            let type_validator = match TypeValidator::new(&code, primitive, &construct) {
                Ok(tv) => tv,
                Err(error) => {
                    log::warn!("the construct of type {code} does not compile ({error}), falling back to match-all");
                    TypeValidator::new(&code, primitive, ".*")?
                }
            };

            log::trace!("added type {code} ({primitive_code})");
            self.validator.add_type_validator(type_validator);
            result = true;
        }

        Ok(result)
    }

    /// This function wires the parent/child links and warns about items that
    /// ended up without a type.
    fn link_items(&mut self) -> Result<()> {
        let mut links = vec![];

        if let Some(datablock) = &self.datablock {
            for name in ["pdbx_item_linked_group_list", "item_linked"] {
                if let Some(cat) = datablock.get(name) {
                    for id in cat.rows() {
                        let child = cat.value(id, "child_name").to_owned();
                        let parent = cat.value(id, "parent_name").to_owned();
                        if !child.is_empty() && !parent.is_empty() {
                            links.push((child, parent));
                        }
                    }
                }
            }
        }

        for (child, parent) in links {
            if let Err(error) = self.validator.link_items(&child, &parent) {
                log::warn!("{error}");
            }
        }

        for cv in self.validator.categories().values() {
            for iv in cv.items().values() {
                if iv.type_code().is_none() {
                    log::warn!("missing item_type for _{}.{}", cv.name(), iv.tag());
                }
            }
        }

        Ok(())
    }
}
