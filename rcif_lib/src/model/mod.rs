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
Module with the in-memory mmCIF data model.

A [File] owns an ordered list of [Datablock]s, a datablock owns an ordered
list of [Category]s, and a category owns its columns and rows. Rows live in a
per-category arena and are addressed through [RowId] handles; iteration
follows the insertion order unless [Category::reorder_by_index] has been
called.

Categories whose dictionary definition declares key items keep a typed key
index: emplacing a row whose key tuple already exists returns the existing row
instead of inserting, and erasing a row cascades into the categories that
reference it through the dictionary's foreign-key links.
!*/

use itertools::Itertools;

use std::cmp::Ordering;
use std::io::Read;
use std::sync::Arc;

use crate::error::{RCifError, Result};
use crate::parser::{DocumentSink, Parser};
use crate::validator::{compare_char_values, CategoryValidator, PrimitiveType, Validator, DEFAULT_DICTIONARY};

use self::condition::Condition;
use self::index::{CatIndex, KeyPart, KeyTuple};

pub mod condition;
pub(crate) mod index;

#[cfg(test)] pub(crate) mod model_test;
#[cfg(test)] mod condition_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// Handle of a row within its category's arena.
///
/// Handles are only meaningful for the category that returned them, and are
/// invalidated by any mutation that removes the row.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RowId(pub(crate) u32);

/// One value of a row: the owning column plus the uninterpreted text.
#[derive(Clone, Debug, PartialEq)]
struct ItemValue {
    column: u32,
    text: String,
}

/// One row of the arena.
#[derive(Clone, Debug, Default)]
struct RowData {
    next: Option<u32>,
    values: Vec<ItemValue>,
}

/// One column of a category.
#[derive(Clone, Debug)]
pub(crate) struct Column {
    pub(crate) name: String,
}

/// A set of row handles, as returned by [Category::find].
pub type RowSet = Vec<RowId>;

/// Read-only convenience handle over one row.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    cat: &'a Category,
    id: RowId,
}

/// A table of rows sharing one schema.
pub struct Category {
    name: String,
    columns: Vec<Column>,
    rows: Vec<RowData>,
    head: Option<u32>,
    tail: Option<u32>,
    free: Vec<u32>,
    index: Option<CatIndex>,
    validator: Option<Arc<Validator>>,
}

/// A named container of categories, corresponding to one `data_` block.
pub struct Datablock {
    name: String,
    categories: Vec<Category>,
    validator: Option<Arc<Validator>>,
}

/// A whole mmCIF file: datablocks plus an optional validator.
#[derive(Default)]
pub struct File {
    datablocks: Vec<Datablock>,
    validator: Option<Arc<Validator>>,
}

//---------------------------------------------------------------------------//
//                         Implementation of Category
//---------------------------------------------------------------------------//

impl Category {

    /// This function creates a new empty Category.
    ///
    /// If the provided validator knows the category, its key and mandatory
    /// items become columns right away and the key index is created.
    pub fn new(name: &str, validator: Option<Arc<Validator>>) -> Result<Self> {
        if name.is_empty() {
            return Err(RCifError::EmptyCategoryName);
        }

        let mut category = Self {
            name: name.to_owned(),
            columns: vec![],
            rows: vec![],
            head: None,
            tail: None,
            free: vec![],
            index: None,
            validator: None,
        };

        category.set_validator(validator);
        Ok(category)
    }

    /// Name of the category.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This function replaces the validator behind the category, rebuilding
    /// the key index from scratch.
    pub fn set_validator(&mut self, validator: Option<Arc<Validator>>) {
        self.validator = validator;
        self.index = None;

        let (keys, mandatory) = match self.cat_validator() {
            Some(cv) => (cv.keys().clone(), cv.mandatory_items().iter().cloned().collect::<Vec<_>>()),
            None => return,
        };

        for key in keys.iter().chain(mandatory.iter()) {
            if self.column_index(key).is_none() {
                self.columns.push(Column { name: key.clone() });
            }
        }

        if !keys.is_empty() {
            let specs = keys.iter()
                .map(|key| {
                    let primitive = self.validator.as_ref()
                        .and_then(|v| v.type_for_item(&self.name, key))
                        .map(|tv| *tv.primitive())
                        .unwrap_or_else(|| {
                            log::debug!("no type validator for key _{}.{}, comparing as uchar", self.name, key);
                            PrimitiveType::UChar
                        });
                    (key.clone(), primitive)
                })
                .collect();

            let mut index = CatIndex::new(specs);
            let mut row = self.head;
            while let Some(id) = row {
                let tuple = Self::key_tuple(&self.rows, index.specs(), &self.columns, id);
                if let Err(existing) = index.insert(tuple, RowId(id)) {
                    log::warn!(
                        "duplicate key in category {} while rebuilding its index, keeping row {:?}",
                        self.name, existing
                    );
                }
                row = self.rows[id as usize].next;
            }

            self.index = Some(index);
        }
    }

    /// The category validator behind this category, if any.
    pub fn cat_validator(&self) -> Option<&CategoryValidator> {
        self.validator.as_ref().and_then(|v| v.validator_for_category(&self.name))
    }

    /// Names of the columns, in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub(crate) fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// This function returns the index of the column with the provided name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// This function adds a column if not yet present, returning its index.
    ///
    /// With a validator attached, unknown tags are reported (and fail in
    /// strict mode).
    pub fn add_column(&mut self, name: &str) -> Result<usize> {
        if let Some(index) = self.column_index(name) {
            return Ok(index);
        }

        if let (Some(validator), Some(cv)) = (self.validator.clone(), self.cat_validator()) {
            if cv.validator_for_item(name).is_none() {
                validator.report(RCifError::ValidationError(format!(
                    "tag {name} is not allowed in category {}", self.name
                )))?;
            }
        }

        self.columns.push(Column { name: name.to_owned() });
        Ok(self.columns.len() - 1)
    }

    /// True if the category has no rows.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows().count()
    }

    /// Row handles in iteration order.
    pub fn rows(&self) -> RowIter<'_> {
        RowIter { rows: &self.rows, next: self.head }
    }

    /// Read-only handle over one row.
    pub fn row(&self, id: RowId) -> Row<'_> {
        Row { cat: self, id }
    }

    /// First row of the category, if any.
    pub fn front(&self) -> Option<RowId> {
        self.head.map(RowId)
    }

    /// Last row of the category, if any.
    pub fn back(&self) -> Option<RowId> {
        self.tail.map(RowId)
    }

    /// This function returns the raw stored value of an item, if the row carries one.
    pub fn raw_value(&self, id: RowId, item: &str) -> Option<&str> {
        let column = self.column_index(item)? as u32;
        self.raw_value_by_column(id, column)
    }

    pub(crate) fn raw_value_by_column(&self, id: RowId, column: u32) -> Option<&str> {
        self.rows.get(id.0 as usize)?
            .values.iter()
            .find(|v| v.column == column)
            .map(|v| v.text.as_str())
    }

    /// This function returns the value of an item, with both missing values
    /// and the inapplicable marker `.` read as the empty string.
    pub fn value(&self, id: RowId, item: &str) -> &str {
        match self.raw_value(id, item) {
            Some(".") | None => "",
            Some(value) => value,
        }
    }

    /// Value of an item in the first row, read like [Category::value].
    pub fn first_item(&self, item: &str) -> &str {
        match self.front() {
            Some(id) => self.value(id, item),
            None => "",
        }
    }

    /// This function appends a new row with the provided items.
    ///
    /// If the category is indexed and a row with the same key tuple already
    /// exists, nothing is inserted and the existing row is returned with
    /// `false`.
    pub fn emplace(&mut self, items: &[(&str, &str)]) -> Result<(RowId, bool)> {
        if !items.is_empty() {
            if let (Some(validator), Some(cv)) = (self.validator.clone(), self.cat_validator()) {
                for mandatory in cv.mandatory_items() {
                    if !items.iter().any(|(name, _)| name.eq_ignore_ascii_case(mandatory)) {
                        validator.report(RCifError::MissingMandatoryField(mandatory.clone(), self.name.clone()))?;
                    }
                }
            }

            if let Some(index) = &self.index {
                let probe = KeyTuple(
                    index.specs().iter()
                        .map(|(key, primitive)| {
                            let value = items.iter()
                                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                                .map(|(_, value)| *value)
                                .unwrap_or("");
                            KeyPart::new(value, *primitive)
                        })
                        .collect()
                );

                if let Some(existing) = index.find(&probe) {
                    log::debug!("not inserting new record in {} (duplicate key)", self.name);
                    return Ok((existing, false));
                }
            }
        }

        let id = self.append_empty_row();
        for (name, value) in items {
            self.assign(id, name, value, true)?;
        }

        if self.index.is_some() {
            self.index_insert(id);
        }

        Ok((id, true))
    }

    /// This function appends a row without values and without touching the
    /// index. The parser fills it item by item afterwards.
    pub(crate) fn append_empty_row(&mut self) -> RowId {
        let id = match self.free.pop() {
            Some(id) => {
                self.rows[id as usize] = RowData::default();
                id
            }
            None => {
                self.rows.push(RowData::default());
                (self.rows.len() - 1) as u32
            }
        };

        match self.tail {
            Some(tail) => self.rows[tail as usize].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);

        RowId(id)
    }

    /// This function sets the value of one item of a row, validating it and
    /// keeping the key index in sync.
    pub fn set_value(&mut self, id: RowId, item: &str, value: &str) -> Result<()> {
        self.assign(id, item, value, false)
    }

    fn assign(&mut self, id: RowId, item: &str, value: &str, emplacing: bool) -> Result<()> {
        let column = self.add_column(item)? as u32;

        let old_value = self.raw_value_by_column(id, column);
        if old_value == Some(value) {
            return Ok(());
        }

        if let Some(validator) = self.validator.clone() {
            if let Err(error) = validator.validate_value(&self.name, item, value) {
                validator.report(error)?;
            }
        }

        // A key item update has to leave the index before the value changes.
        let mut old_tuple = None;
        if !emplacing {
            if let Some(index) = &self.index {
                if index.specs().iter().any(|(key, _)| key.eq_ignore_ascii_case(item)) {
                    let tuple = Self::key_tuple(&self.rows, index.specs(), &self.columns, id.0);
                    if index.find(&tuple) == Some(id) {
                        old_tuple = Some(tuple);
                    }
                }
            }
        }

        if let (Some(index), Some(tuple)) = (self.index.as_mut(), old_tuple.as_ref()) {
            index.erase(tuple);
        }

        let values = &mut self.rows[id.0 as usize].values;
        values.retain(|v| v.column != column);
        if !value.is_empty() {
            values.push(ItemValue { column, text: value.to_owned() });
        }

        if old_tuple.is_some() {
            self.index_insert(id);
        }

        Ok(())
    }

    /// This function removes one item value from a row.
    pub fn drop_item(&mut self, id: RowId, item: &str) {
        if let Some(column) = self.column_index(item) {
            self.rows[id.0 as usize].values.retain(|v| v.column != column as u32);
        }
    }

    /// This function removes a whole column, with all its values.
    pub fn drop_column(&mut self, name: &str) {
        if let Some(column) = self.column_index(name) {
            let column = column as u32;
            for row in &mut self.rows {
                row.values.retain(|v| v.column != column);
            }

            // Column indices above the dropped one shift down.
            self.columns.remove(column as usize);
            for row in &mut self.rows {
                for value in &mut row.values {
                    if value.column > column {
                        value.column -= 1;
                    }
                }
            }
        }
    }

    /// This function returns the handles of all rows matching the condition,
    /// in iteration order.
    pub fn find(&self, cond: &Condition) -> RowSet {
        self.rows().filter(|id| cond.eval(self, *id)).collect()
    }

    /// First row matching the condition, if any.
    pub fn first(&self, cond: &Condition) -> Option<RowId> {
        self.rows().find(|id| cond.eval(self, *id))
    }

    /// True if any row matches the condition.
    pub fn exists(&self, cond: &Condition) -> bool {
        self.first(cond).is_some()
    }

    /// This function stable-sorts a rowset by the provided items, using the
    /// dictionary-typed comparator where one is available.
    pub fn order_by(&self, mut rows: RowSet, items: &[&str]) -> RowSet {
        rows.sort_by(|a, b| {
            for item in items {
                let ord = self.compare_values(item, self.value(*a, item), self.value(*b, item));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });

        rows
    }

    /// This function compares two values of an item: through its type
    /// validator when there is one, numerically when both sides parse as
    /// numbers, as collapsed case-insensitive text otherwise.
    pub(crate) fn compare_values(&self, item: &str, a: &str, b: &str) -> Ordering {
        if let Some(tv) = self.validator.as_ref().and_then(|v| v.type_for_item(&self.name, item)) {
            return tv.compare(a, b);
        }

        match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(da), Ok(db)) => da.total_cmp(&db),
            _ => compare_char_values(a, b),
        }
    }

    /// This function rethreads the rows into ascending key order. It only has
    /// an effect on indexed categories.
    pub fn reorder_by_index(&mut self) {
        let order = match &self.index {
            Some(index) => index.rows_in_order(),
            None => return,
        };

        self.head = None;
        self.tail = None;
        for id in order {
            self.rows[id.0 as usize].next = None;
            match self.tail {
                Some(tail) => self.rows[tail as usize].next = Some(id.0),
                None => self.head = Some(id.0),
            }
            self.tail = Some(id.0);
        }
    }

    /// This function removes all rows, keeping columns and validator.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        if let Some(index) = &mut self.index {
            index.clear();
        }
    }

    /// This function collects the cascade targets of a row: for every key item
    /// with foreign-key children, the child item and the value it references.
    pub(crate) fn cascade_targets(&self, id: RowId) -> Vec<(String, String, String)> {
        let mut result = vec![];

        let cv = match self.cat_validator() {
            Some(cv) => cv,
            None => return result,
        };

        for key in cv.keys() {
            let iv = match cv.validator_for_item(key) {
                Some(iv) => iv,
                None => continue,
            };

            if iv.foreign_keys().is_empty() {
                continue;
            }

            let value = self.value(id, key);
            if value.is_empty() {
                continue;
            }

            for child in iv.foreign_keys() {
                result.push((child.category.clone(), child.item.clone(), value.to_owned()));
            }
        }

        result
    }

    /// This function removes one row: first from the index, then from the row
    /// chain. The freed slot is reused by later insertions.
    pub(crate) fn erase_row(&mut self, id: RowId) {
        let tuple = self.index.as_ref()
            .map(|index| Self::key_tuple(&self.rows, index.specs(), &self.columns, id.0));
        if let (Some(index), Some(tuple)) = (self.index.as_mut(), tuple.as_ref()) {
            index.erase(tuple);
        }

        if self.head == Some(id.0) {
            self.head = self.rows[id.0 as usize].next;
            if self.head.is_none() {
                self.tail = None;
            }
        } else {
            let mut current = self.head;
            while let Some(ci) = current {
                if self.rows[ci as usize].next == Some(id.0) {
                    self.rows[ci as usize].next = self.rows[id.0 as usize].next;
                    if self.tail == Some(id.0) {
                        self.tail = Some(ci);
                    }
                    break;
                }
                current = self.rows[ci as usize].next;
            }
        }

        self.rows[id.0 as usize] = RowData::default();
        self.free.push(id.0);
    }

    fn index_insert(&mut self, id: RowId) {
        let tuple = match &self.index {
            Some(index) => Self::key_tuple(&self.rows, index.specs(), &self.columns, id.0),
            None => return,
        };

        if let Some(index) = &mut self.index {
            if let Err(existing) = index.insert(tuple, id) {
                log::warn!("duplicate key in category {}, row {existing:?} stays in the index", self.name);
            }
        }
    }

    /// Normalised key tuple of a row, built outside `self` to side-step borrow issues.
    fn key_tuple(rows: &[RowData], specs: &[(String, PrimitiveType)], columns: &[Column], id: u32) -> KeyTuple {
        KeyTuple(
            specs.iter()
                .map(|(key, primitive)| {
                    let column = columns.iter().position(|c| c.name.eq_ignore_ascii_case(key));
                    let value = column.and_then(|column| {
                        rows[id as usize].values.iter()
                            .find(|v| v.column == column as u32)
                            .map(|v| v.text.as_str())
                    }).unwrap_or("");

                    let value = if value == "." { "" } else { value };
                    KeyPart::new(value, *primitive)
                })
                .collect()
        )
    }

    /// This function appends the full tags of the category to the provided list.
    pub fn tag_order(&self, tags: &mut Vec<String>) {
        for column in &self.columns {
            tags.push(format!("_{}.{}", self.name, column.name));
        }
    }

    /// This function validates the category against its dictionary definition:
    /// known columns, mandatory items present, every value passing its type
    /// and enumeration.
    pub fn validate(&self) -> Result<()> {
        let validator = match &self.validator {
            Some(validator) => validator,
            None => return Err(RCifError::NoValidator),
        };

        if self.is_empty() {
            log::debug!("skipping validation of empty category {}", self.name);
            return Ok(());
        }

        let cv = match self.cat_validator() {
            Some(cv) => cv,
            None => {
                validator.report(RCifError::ValidationError(format!("undefined category {}", self.name)))?;
                return Ok(());
            }
        };

        let mut mandatory = cv.mandatory_items().clone();
        for column in &self.columns {
            if cv.validator_for_item(&column.name).is_none() {
                validator.report(RCifError::ValidationError(format!(
                    "field {} is not valid in category {}", column.name, self.name
                )))?;
            }

            mandatory.remove(&column.name);
        }

        if !mandatory.is_empty() {
            let missing = mandatory.iter().join(", ");
            validator.report(RCifError::ValidationError(format!(
                "in category {} the following mandatory fields are missing: {missing}", self.name
            )))?;
        }

        for id in self.rows() {
            for (cix, column) in self.columns.iter().enumerate() {
                let iv = match cv.validator_for_item(&column.name) {
                    Some(iv) => iv,
                    None => continue,
                };

                match self.raw_value_by_column(id, cix as u32) {
                    Some(value) => {
                        if let Err(error) = validator.validate_value(&self.name, &column.name, value) {
                            validator.report(error)?;
                        }
                    }
                    None if *iv.mandatory() => {
                        validator.report(RCifError::MissingMandatoryField(column.name.clone(), self.name.clone()))?;
                    }
                    None => {}
                }
            }
        }

        Ok(())
    }
}

/// Iterator over the row handles of a category, in iteration order.
pub struct RowIter<'a> {
    rows: &'a [RowData],
    next: Option<u32>,
}

impl Iterator for RowIter<'_> {
    type Item = RowId;

    fn next(&mut self) -> Option<RowId> {
        let id = self.next?;
        self.next = self.rows[id as usize].next;
        Some(RowId(id))
    }
}

impl<'a> Row<'a> {

    /// Handle of the row.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Value of an item, with missing and `.` read as the empty string.
    pub fn get(&self, item: &str) -> &'a str {
        self.cat.value(self.id, item)
    }

    /// Raw stored value of an item.
    pub fn raw(&self, item: &str) -> Option<&'a str> {
        self.cat.raw_value(self.id, item)
    }

    /// The item names and values the row actually carries, in assignment order.
    pub fn items(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        let cat = self.cat;
        cat.rows[self.id.0 as usize].values.iter()
            .map(move |v| (cat.columns[v.column as usize].name.as_str(), v.text.as_str()))
    }
}

//---------------------------------------------------------------------------//
//                        Implementation of Datablock
//---------------------------------------------------------------------------//

impl Datablock {

    /// This function creates a new empty Datablock.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            categories: vec![],
            validator: None,
        }
    }

    /// Name of the datablock, as read from its `data_` header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This function renames the datablock.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    /// Categories of the datablock, in order of appearance.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// This function returns the category with the provided name, if present.
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Mutable version of [Datablock::get].
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// This function returns the category with the provided name, creating it
    /// if needed.
    pub fn category_mut(&mut self, name: &str) -> Result<&mut Category> {
        let (position, _) = self.emplace(name)?;
        Ok(&mut self.categories[position])
    }

    /// This function creates the category with the provided name if it does not
    /// exist yet, returning its position and whether it was new.
    pub fn emplace(&mut self, name: &str) -> Result<(usize, bool)> {
        match self.categories.iter().position(|c| c.name.eq_ignore_ascii_case(name)) {
            Some(position) => Ok((position, false)),
            None => {
                self.categories.push(Category::new(name, self.validator.clone())?);
                Ok((self.categories.len() - 1, true))
            }
        }
    }

    /// Value of the provided full tag in the first row of its category.
    pub fn first_item(&self, tag: &str) -> &str {
        let (cat_name, item_name) = crate::parser::split_tag_name(tag);
        match self.get(&cat_name) {
            Some(cat) => cat.first_item(&item_name),
            None => "",
        }
    }

    /// This function replaces the validator behind the datablock and all its categories.
    pub fn set_validator(&mut self, validator: Option<Arc<Validator>>) {
        self.validator = validator.clone();
        for category in &mut self.categories {
            category.set_validator(validator.clone());
        }
    }

    /// The validator behind the datablock, if any.
    pub fn validator(&self) -> Option<&Arc<Validator>> {
        self.validator.as_ref()
    }

    /// This function erases every row of a category matching the condition,
    /// cascading into child categories through the dictionary's foreign keys.
    ///
    /// Returns the total amount of erased rows, cascaded ones included.
    pub fn erase(&mut self, category: &str, cond: Condition) -> usize {
        let mut erased = 0;
        let mut work = vec![(category.to_owned(), cond)];

        while let Some((cat_name, cond)) = work.pop() {
            let position = match self.categories.iter().position(|c| c.name.eq_ignore_ascii_case(&cat_name)) {
                Some(position) => position,
                None => continue,
            };

            let ids = self.categories[position].find(&cond);
            for id in ids {
                for (child_cat, child_item, value) in self.categories[position].cascade_targets(id) {
                    work.push((child_cat, condition::key(&child_item).is(&value)));
                }

                self.categories[position].erase_row(id);
                erased += 1;
            }
        }

        erased
    }

    /// This function appends the full tags of every category to the provided list.
    pub fn tag_order(&self, tags: &mut Vec<String>) {
        for category in &self.categories {
            category.tag_order(tags);
        }
    }

    /// This function validates every category, then the parent/child links
    /// between them. A child value without a matching parent row is only
    /// logged, never an error.
    pub fn validate(&self) -> Result<()> {
        if self.validator.is_none() {
            return Err(RCifError::NoValidator);
        }

        for category in &self.categories {
            category.validate()?;
        }

        self.check_parent_links();
        Ok(())
    }

    /// Referential check: every non-empty child value should exist as a parent
    /// key value. Failures are diagnostics only.
    fn check_parent_links(&self) {
        let validator = match &self.validator {
            Some(validator) => validator,
            None => return,
        };

        for category in &self.categories {
            let cv = match validator.validator_for_category(category.name()) {
                Some(cv) => cv,
                None => continue,
            };

            for column in category.column_names() {
                let parent = match cv.validator_for_item(column).and_then(|iv| iv.parent().as_ref()) {
                    Some(parent) => parent,
                    None => continue,
                };

                let parent_cat = match self.get(&parent.category) {
                    Some(parent_cat) => parent_cat,
                    None => continue,
                };

                for id in category.rows() {
                    let value = category.value(id, column);
                    if value.is_empty() {
                        continue;
                    }

                    if !parent_cat.exists(&condition::key(&parent.item).is(value)) {
                        log::warn!(
                            "value '{value}' of _{}.{column} has no parent row in _{}.{}",
                            category.name(), parent.category, parent.item
                        );
                    }
                }
            }
        }
    }
}

//---------------------------------------------------------------------------//
//                           Implementation of File
//---------------------------------------------------------------------------//

/// Sink which builds a [File] from the parser's callbacks.
struct FileBuilder {
    file: File,
    current_category: Option<usize>,
    current_row: Option<RowId>,
}

impl DocumentSink for FileBuilder {
    fn produce_datablock(&mut self, name: &str) -> Result<()> {
        self.file.append(Datablock::new(name))?;
        self.current_category = None;
        self.current_row = None;
        Ok(())
    }

    fn produce_category(&mut self, name: &str) -> Result<()> {
        let block = self.file.datablocks.last_mut().ok_or(RCifError::NotACifFile)?;
        let (position, _) = block.emplace(name)?;
        self.current_category = Some(position);
        self.current_row = None;
        Ok(())
    }

    fn produce_row(&mut self) -> Result<()> {
        let block = self.file.datablocks.last_mut().ok_or(RCifError::NotACifFile)?;
        let position = self.current_category.ok_or(RCifError::NotACifFile)?;
        self.current_row = Some(block.categories[position].append_empty_row());
        Ok(())
    }

    fn produce_item(&mut self, _category: &str, item: &str, value: &str) -> Result<()> {
        let block = self.file.datablocks.last_mut().ok_or(RCifError::NotACifFile)?;
        let position = self.current_category.ok_or(RCifError::NotACifFile)?;
        let row = self.current_row.ok_or(RCifError::NotACifFile)?;
        block.categories[position].assign(row, item, value, true)
    }
}

impl File {

    /// This function creates a new empty File.
    pub fn new() -> Self {
        Self::default()
    }

    /// This function parses an mmCIF file from the provided reader.
    ///
    /// The result is unvalidated; call [File::validate] afterwards if needed.
    pub fn load<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = vec![];
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// This function parses an mmCIF file from the provided bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut builder = FileBuilder {
            file: Self::new(),
            current_category: None,
            current_row: None,
        };

        let mut parser = Parser::new(data, &mut builder)?;
        parser.parse_file()?;

        Ok(builder.file)
    }

    /// This function appends a datablock to the file, rejecting duplicate
    /// names (case-insensitive).
    pub fn append(&mut self, mut datablock: Datablock) -> Result<()> {
        if self.datablocks.iter().any(|d| d.name.eq_ignore_ascii_case(&datablock.name)) {
            return Err(RCifError::DatablockAlreadyDefined(datablock.name));
        }

        datablock.set_validator(self.validator.clone());
        self.datablocks.push(datablock);
        Ok(())
    }

    /// Datablocks of the file, in order of appearance.
    pub fn datablocks(&self) -> impl Iterator<Item = &Datablock> {
        self.datablocks.iter()
    }

    /// Mutable version of [File::datablocks].
    pub fn datablocks_mut(&mut self) -> impl Iterator<Item = &mut Datablock> {
        self.datablocks.iter_mut()
    }

    /// This function returns the datablock with the provided name.
    pub fn datablock(&self, name: &str) -> Result<&Datablock> {
        self.datablocks.iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| RCifError::DatablockNotFound(name.to_owned()))
    }

    /// Mutable version of [File::datablock].
    pub fn datablock_mut(&mut self, name: &str) -> Result<&mut Datablock> {
        self.datablocks.iter_mut()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| RCifError::DatablockNotFound(name.to_owned()))
    }

    /// First datablock of the file, if any.
    pub fn first_datablock(&self) -> Option<&Datablock> {
        self.datablocks.first()
    }

    /// Mutable version of [File::first_datablock].
    pub fn first_datablock_mut(&mut self) -> Option<&mut Datablock> {
        self.datablocks.first_mut()
    }

    /// The validator behind the file, if any.
    pub fn validator(&self) -> Option<&Arc<Validator>> {
        self.validator.as_ref()
    }

    /// This function replaces the validator behind the file and all its datablocks.
    pub fn set_validator(&mut self, validator: Option<Arc<Validator>>) {
        self.validator = validator.clone();
        for datablock in &mut self.datablocks {
            datablock.set_validator(validator.clone());
        }
    }

    /// This function validates every datablock, loading the default dictionary
    /// first if none was loaded explicitly.
    pub fn validate(&mut self) -> Result<()> {
        if self.validator.is_none() {
            log::info!("no dictionary loaded explicitly, loading the default one");
            self.load_dictionary_by_name(DEFAULT_DICTIONARY)?;
        }

        for datablock in &self.datablocks {
            datablock.validate()?;
        }

        Ok(())
    }

    /// This function loads a dictionary from the provided bytes and makes it
    /// the file's validator.
    pub fn load_dictionary(&mut self, data: &[u8]) -> Result<()> {
        let validator = Validator::from_bytes(data)?;
        self.set_validator(Some(Arc::new(validator)));
        Ok(())
    }

    /// This function resolves a dictionary by name, loads it, and makes it the
    /// file's validator.
    pub fn load_dictionary_by_name(&mut self, name: &str) -> Result<()> {
        let validator = Validator::from_name(name)?;
        self.set_validator(Some(Arc::new(validator)));
        Ok(())
    }

    /// This function appends the full tags of every datablock to one list.
    pub fn tag_order(&self) -> Vec<String> {
        let mut tags = vec![];
        for datablock in &self.datablocks {
            datablock.tag_order(&mut tags);
        }
        tags
    }
}
