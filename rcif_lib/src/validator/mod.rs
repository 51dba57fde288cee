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
Module with the dictionary-driven validator.

A [Validator] is built from a DDL dictionary (itself an mmCIF-shaped file full
of save frames) and holds three sorted sets: type validators (a primitive kind
plus a regex), category validators (key items, groups, mandatory items), and,
through the categories, item validators (mandatory flag, type, enumeration,
parent/child links).

A value passes item validation iff it is empty, `.`, `?`, or it matches the
type regex and, when an enumeration is present, is a member of it. The type
validators also define the comparison used by the key indices: numeric
primitives compare as doubles with non-parsable values greater than parsable
ones, char primitives compare case-insensitively with whitespace runs
collapsed.
!*/

use getset::Getters;

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{RCifError, Result};
use crate::parser::split_tag_name;

pub mod dict_parser;

#[cfg(test)] mod validator_test;

/// Dictionary loaded by default when a file is validated without one loaded explicitly.
pub const DEFAULT_DICTIONARY: &str = "mmcif_ddl";

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// The primitive kinds a dictionary type can map to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrimitiveType {
    Char,
    UChar,
    Numb,
}

/// A type validator: a named regex with a primitive kind attached.
#[derive(Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct TypeValidator {

    /// Name of the type, like `code` or `float`.
    name: String,

    /// Primitive kind, which decides how values of this type compare.
    primitive: PrimitiveType,

    /// Regex a value of this type has to match.
    rx: regex::Regex,
}

/// Reference to an item validator by category and item name.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct ItemRef {
    pub category: String,
    pub item: String,
}

/// An item validator: everything the dictionary says about one tag.
#[derive(Clone, Debug, Default, Getters)]
#[getset(get = "pub")]
pub struct ItemValidator {

    /// Item name, without the category part.
    tag: String,

    /// Name of the owning category.
    category: String,

    /// Whether a row of the category must carry this item.
    mandatory: bool,

    /// Code of the item's type, if the dictionary declares one.
    type_code: Option<String>,

    /// Allowed values, if the dictionary declares an enumeration.
    enums: BTreeSet<String>,

    /// Parent item, for referential checks.
    parent: Option<ItemRef>,

    /// Child items pointing at this one.
    children: Vec<ItemRef>,

    /// Children whose value is the single key of their own category. Erasing a
    /// row here cascades into those categories.
    foreign_keys: Vec<ItemRef>,
}

/// A category validator: keys, groups and item validators of one category.
#[derive(Clone, Debug, Default, Getters)]
#[getset(get = "pub")]
pub struct CategoryValidator {

    /// Name of the category.
    name: String,

    /// Ordered list of key items. A non-empty list makes the category indexed.
    keys: Vec<String>,

    /// Category groups this category belongs to.
    groups: BTreeSet<String>,

    /// Names of the mandatory items.
    mandatory_items: BTreeSet<String>,

    /// Item validators, keyed by lower-cased item name.
    items: BTreeMap<String, ItemValidator>,
}

/// A full dictionary: type, category and item validators plus the strict bit.
#[derive(Clone, Debug, Default, Getters)]
#[getset(get = "pub")]
pub struct Validator {

    /// Title of the dictionary (`_dictionary.title`).
    dict_name: String,

    /// Version of the dictionary (`_dictionary.version`).
    dict_version: String,

    /// In strict mode any failure is an error; otherwise failures are logged
    /// and processing continues.
    strict: bool,

    /// Type validators, keyed by lower-cased type code.
    types: BTreeMap<String, TypeValidator>,

    /// Category validators, keyed by lower-cased category name.
    categories: BTreeMap<String, CategoryValidator>,
}

//---------------------------------------------------------------------------//
//                           Implementations
//---------------------------------------------------------------------------//

impl PrimitiveType {

    /// This function maps a dictionary primitive code onto its kind.
    pub fn parse(code: &str) -> Result<Self> {
        if code.eq_ignore_ascii_case("char") {
            Ok(Self::Char)
        } else if code.eq_ignore_ascii_case("uchar") {
            Ok(Self::UChar)
        } else if code.eq_ignore_ascii_case("numb") {
            Ok(Self::Numb)
        } else {
            Err(RCifError::UnknownPrimitiveType(code.to_owned()))
        }
    }
}

/// This function parses the longest numeric prefix of the provided string, like `strtod`.
///
/// Returns None if the string does not start with a number at all.
pub fn parse_numeric_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        seen_digit = true;
    }

    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            seen_digit = true;
        }
    }

    if !seen_digit {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        if exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// This function normalizes a char-primitive value for comparison: upper-cased,
/// with every whitespace run collapsed to a single space.
pub fn normalize_char_value(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_space = false;

    for b in s.bytes() {
        if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
            if !in_space {
                result.push(' ');
                in_space = true;
            }
        } else {
            result.push(b.to_ascii_uppercase() as char);
            in_space = false;
        }
    }

    result
}

/// This function compares two values as char primitives.
pub fn compare_char_values(a: &str, b: &str) -> Ordering {
    normalize_char_value(a).cmp(&normalize_char_value(b))
}

/// This function compares two values as numeric primitives.
///
/// Values within machine epsilon are equal; non-parsable values compare
/// greater than parsable ones, and between themselves as char values.
pub fn compare_numeric_values(a: &str, b: &str) -> Ordering {
    match (parse_numeric_prefix(a), parse_numeric_prefix(b)) {
        (Some(da), Some(db)) => {
            if float_eq::float_eq!(da, db, abs <= f64::EPSILON) {
                Ordering::Equal
            } else {
                da.total_cmp(&db)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_char_values(a, b),
    }
}

impl TypeValidator {

    /// This function creates a new TypeValidator from its dictionary definition.
    ///
    /// The construct has to match the whole value, so it gets anchored here.
    pub fn new(name: &str, primitive: PrimitiveType, construct: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_owned(),
            primitive,
            rx: regex::Regex::new(&format!("^(?:{construct})$"))?,
        })
    }

    /// This function compares two values under this type.
    ///
    /// Empty values compare less than all non-empty values, for both primitives.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if a.is_empty() || b.is_empty() {
            return a.len().cmp(&b.len());
        }

        match self.primitive {
            PrimitiveType::Numb => compare_numeric_values(a, b),
            PrimitiveType::Char | PrimitiveType::UChar => compare_char_values(a, b),
        }
    }

    /// This function checks a value against the type's regex.
    pub fn matches(&self, value: &str) -> bool {
        self.rx.is_match(value)
    }
}

impl ItemValidator {

    /// This function creates a new ItemValidator.
    pub fn new(tag: &str, category: &str, mandatory: bool, type_code: Option<String>, enums: BTreeSet<String>) -> Self {
        Self {
            tag: tag.to_owned(),
            category: category.to_owned(),
            mandatory,
            type_code,
            enums,
            ..Default::default()
        }
    }

    pub(crate) fn set_mandatory(&mut self, mandatory: bool) {
        self.mandatory = mandatory;
    }

    pub(crate) fn set_type_code(&mut self, type_code: Option<String>) {
        self.type_code = type_code;
    }

    pub(crate) fn merge_enums(&mut self, enums: &BTreeSet<String>) {
        self.enums.extend(enums.iter().cloned());
    }
}

impl CategoryValidator {

    /// This function creates a new CategoryValidator.
    pub fn new(name: &str, keys: Vec<String>, groups: BTreeSet<String>) -> Self {
        Self {
            name: name.to_owned(),
            keys,
            groups,
            ..Default::default()
        }
    }

    /// This function adds an item validator to the category, keeping the
    /// mandatory set in sync. Already present items are not replaced.
    pub fn add_item_validator(&mut self, validator: ItemValidator) {
        if validator.mandatory {
            self.mandatory_items.insert(validator.tag.clone());
        }

        let key = validator.tag.to_lowercase();
        if self.items.contains_key(&key) {
            log::debug!("Could not add validator for item {} to category {}", validator.tag, self.name);
        } else {
            self.items.insert(key, validator);
        }
    }

    /// This function returns the item validator for the provided item name, if any.
    pub fn validator_for_item(&self, tag: &str) -> Option<&ItemValidator> {
        self.items.get(&tag.to_lowercase())
    }

    pub(crate) fn validator_for_item_mut(&mut self, tag: &str) -> Option<&mut ItemValidator> {
        self.items.get_mut(&tag.to_lowercase())
    }
}

impl Validator {

    /// This function creates a new empty Validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// This function switches the validator between strict (fail on error) and
    /// lenient (log and continue) modes.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub(crate) fn set_dict_name(&mut self, name: &str) {
        self.dict_name = name.to_owned();
    }

    pub(crate) fn set_dict_version(&mut self, version: &str) {
        self.dict_version = version.to_owned();
    }

    /// This function adds a type validator. Already present types are not
    /// replaced, as redefinitions tend to be stricter than the original.
    pub fn add_type_validator(&mut self, validator: TypeValidator) {
        let key = validator.name.to_lowercase();
        if self.types.contains_key(&key) {
            log::debug!("Could not add validator for type {}", validator.name);
        } else {
            self.types.insert(key, validator);
        }
    }

    /// This function adds a category validator. Already present categories are not replaced.
    pub fn add_category_validator(&mut self, validator: CategoryValidator) {
        let key = validator.name.to_lowercase();
        if self.categories.contains_key(&key) {
            log::debug!("Could not add validator for category {}", validator.name);
        } else {
            self.categories.insert(key, validator);
        }
    }

    /// This function returns the type validator for the provided type code, if any.
    pub fn validator_for_type(&self, code: &str) -> Option<&TypeValidator> {
        self.types.get(&code.to_lowercase())
    }

    /// This function returns the category validator for the provided category name, if any.
    pub fn validator_for_category(&self, name: &str) -> Option<&CategoryValidator> {
        self.categories.get(&name.to_lowercase())
    }

    pub(crate) fn validator_for_category_mut(&mut self, name: &str) -> Option<&mut CategoryValidator> {
        self.categories.get_mut(&name.to_lowercase())
    }

    /// This function returns the item validator for the provided full tag, if any.
    pub fn validator_for_item(&self, tag: &str) -> Option<&ItemValidator> {
        let (cat, item) = split_tag_name(tag);
        self.validator_for_category(&cat)
            .and_then(|cv| cv.validator_for_item(&item))
    }

    /// This function returns the type validator behind an item, if any.
    pub fn type_for_item(&self, category: &str, item: &str) -> Option<&TypeValidator> {
        self.validator_for_category(category)
            .and_then(|cv| cv.validator_for_item(item))
            .and_then(|iv| iv.type_code.as_deref())
            .and_then(|code| self.validator_for_type(code))
    }

    /// This function checks one value against an item's type and enumeration.
    ///
    /// Empty, `.` and `?` values always pass.
    pub fn validate_value(&self, category: &str, item: &str, value: &str) -> Result<()> {
        if value.is_empty() || value == "?" || value == "." {
            return Ok(());
        }

        let item_validator = match self.validator_for_category(category).and_then(|cv| cv.validator_for_item(item)) {
            Some(iv) => iv,
            None => return Ok(()),
        };

        if let Some(type_code) = &item_validator.type_code {
            if let Some(type_validator) = self.validator_for_type(type_code) {
                if !type_validator.matches(value) {
                    return Err(RCifError::ValueTypeMismatch(
                        value.to_owned(),
                        type_validator.name.clone(),
                        format!("_{category}.{item}"),
                    ));
                }
            }
        }

        if !item_validator.enums.is_empty() && !item_validator.enums.contains(value) {
            return Err(RCifError::ValueNotEnumerated(value.to_owned(), format!("_{category}.{item}")));
        }

        Ok(())
    }

    /// This function either fails with the provided error (strict mode) or logs
    /// it and moves on.
    pub fn report(&self, error: RCifError) -> Result<()> {
        if self.strict {
            Err(error)
        } else {
            log::warn!("{error}");
            Ok(())
        }
    }

    /// This function wires a parent/child link between two items, inheriting
    /// the type onto untyped children and maintaining the foreign-key set.
    pub fn link_items(&mut self, child_tag: &str, parent_tag: &str) -> Result<()> {
        let (child_cat, child_item) = split_tag_name(child_tag);
        let (parent_cat, parent_item) = split_tag_name(parent_tag);

        let child_ref = ItemRef { category: child_cat.clone(), item: child_item.clone() };
        let parent_ref = ItemRef { category: parent_cat.clone(), item: parent_item.clone() };

        // The child's category key list decides whether the link is a cascading
        // foreign key: it is when the child item is the category's only key.
        let child_is_single_key = self.validator_for_category(&child_cat)
            .map(|cv| cv.keys.len() == 1 && cv.keys[0].eq_ignore_ascii_case(&child_item))
            .unwrap_or(false);

        let parent_type = self.validator_for_category(&parent_cat)
            .and_then(|cv| cv.validator_for_item(&parent_item))
            .ok_or_else(|| RCifError::ValidationError(format!(
                "in the linked group list, item '{parent_tag}' is not specified"
            )))?
            .type_code.clone();

        {
            let child = self.validator_for_category_mut(&child_cat)
                .and_then(|cv| cv.validator_for_item_mut(&child_item))
                .ok_or_else(|| RCifError::ValidationError(format!(
                    "in the linked group list, item '{child_tag}' is not specified"
                )))?;

            child.parent = Some(parent_ref);
            if child.type_code.is_none() {
                child.type_code = parent_type;
            }
        }

        if let Some(parent) = self.validator_for_category_mut(&parent_cat)
            .and_then(|cv| cv.validator_for_item_mut(&parent_item))
        {
            if !parent.children.contains(&child_ref) {
                parent.children.push(child_ref.clone());
            }

            if child_is_single_key && !parent.foreign_keys.contains(&child_ref) {
                parent.foreign_keys.push(child_ref);
            }
        }

        Ok(())
    }

    /// This function builds a Validator by parsing the provided dictionary bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut parser = dict_parser::DictParser::new(data)?;
        parser.load_dictionary()
    }

    /// This function builds a Validator from a dictionary file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut data = vec![];
        File::open(path)?.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// This function resolves a dictionary by name and builds a Validator from it.
    ///
    /// The search order is: `$RCIF_DICT_DIR`, then the user's config folder.
    pub fn from_name(name: &str) -> Result<Self> {
        let file_name = format!("{name}.dic");

        let mut candidates: Vec<PathBuf> = vec![];
        if let Ok(dir) = std::env::var("RCIF_DICT_DIR") {
            candidates.push(PathBuf::from(dir).join(&file_name));
        }

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "rcif") {
            candidates.push(proj_dirs.config_dir().join("dictionaries").join(&file_name));
        }

        for candidate in &candidates {
            if candidate.is_file() {
                return Self::from_file(candidate);
            }
        }

        Err(RCifError::DictionaryNotFound(name.to_owned()))
    }
}
