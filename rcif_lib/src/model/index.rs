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
Module with the per-category key index.

Categories whose dictionary definition declares key items keep an ordered map
from the key tuple of each row to the row itself. Ordering is the
dictionary-typed one: each key part is normalised according to the key item's
primitive type before it enters the map, so numeric keys compare as numbers
and char keys compare case-insensitively with collapsed whitespace. A lexical
ordering here would silently break key uniqueness.
!*/

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::validator::{parse_numeric_prefix, normalize_char_value, PrimitiveType};

use super::RowId;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// One key item as normalised for ordering.
#[derive(Clone, Debug)]
pub(crate) enum KeyPart {

    /// A missing or empty value. Sorts before everything else.
    Empty,

    /// A numeric value that parsed. Sorts before values that did not parse.
    Number(f64),

    /// A char value, upper-cased and whitespace-collapsed.
    Text(String),

    /// A value of a numeric key that did not parse as a number.
    Unparsable(String),
}

/// The normalised key tuple of one row.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct KeyTuple(pub(crate) Vec<KeyPart>);

/// The index itself: the key specs it was built from, plus the ordered map.
#[derive(Clone, Debug)]
pub(crate) struct CatIndex {

    /// Key items with their resolved primitive types, in dictionary order.
    specs: Vec<(String, PrimitiveType)>,

    /// Normalised key tuple -> row.
    map: BTreeMap<KeyTuple, RowId>,
}

//---------------------------------------------------------------------------//
//                           Implementations
//---------------------------------------------------------------------------//

impl KeyPart {

    /// This function normalises one raw value under the provided primitive type.
    pub(crate) fn new(value: &str, primitive: PrimitiveType) -> Self {
        if value.is_empty() {
            return Self::Empty;
        }

        match primitive {
            PrimitiveType::Numb => match parse_numeric_prefix(value) {
                Some(number) => Self::Number(number),
                None => Self::Unparsable(normalize_char_value(value)),
            },
            PrimitiveType::Char | PrimitiveType::UChar => Self::Text(normalize_char_value(value)),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Unparsable(_) => 3,
        }
    }
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Unparsable(a), Self::Unparsable(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for KeyPart {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyPart {}

impl CatIndex {

    /// This function creates a new empty index over the provided key specs.
    pub(crate) fn new(specs: Vec<(String, PrimitiveType)>) -> Self {
        Self {
            specs,
            map: BTreeMap::new(),
        }
    }

    /// Key items with their primitive types, in dictionary order.
    pub(crate) fn specs(&self) -> &[(String, PrimitiveType)] {
        &self.specs
    }

    /// This function inserts a row under its key tuple.
    ///
    /// On a duplicate key the map is left untouched and the already present
    /// row is returned as the error value.
    pub(crate) fn insert(&mut self, key: KeyTuple, row: RowId) -> std::result::Result<(), RowId> {
        match self.map.get(&key) {
            Some(existing) => Err(*existing),
            None => {
                self.map.insert(key, row);
                Ok(())
            }
        }
    }

    /// This function removes a row from the index.
    pub(crate) fn erase(&mut self, key: &KeyTuple) {
        self.map.remove(key);
    }

    /// This function looks a row up by its key tuple.
    pub(crate) fn find(&self, key: &KeyTuple) -> Option<RowId> {
        self.map.get(key).copied()
    }

    /// Rows in ascending key order.
    pub(crate) fn rows_in_order(&self) -> Vec<RowId> {
        self.map.values().copied().collect()
    }

    /// Number of indexed rows.
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// This function empties the map, keeping the key specs.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}
