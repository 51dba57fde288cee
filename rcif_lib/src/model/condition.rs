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
Module with the composable row predicates used to query categories.

Conditions are built with [key] and [any] and combined with `&` and `|`:

```rust,ignore
let rows = atom_site.find(&(key("label_asym_id").is("A") & key("label_seq_id").gt("10")));
```

Comparisons go through the dictionary-typed comparator when the category has
one for the item, so `key("id").is("1")` also matches a stored `1.0` in a
numeric column.
!*/

use std::fmt;
use std::ops::{BitAnd, BitOr};

use super::{Category, RowId};

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// Comparison operators for [Condition::KeyCompare].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
}

/// A composable predicate over the rows of a category.
#[derive(Clone, Debug)]
pub enum Condition {

    /// Matches every row.
    All,

    /// The item's value equals the provided one.
    KeyIs { item: String, value: String },

    /// The item's value differs from the provided one.
    KeyIsNot { item: String, value: String },

    /// The item's value compares against the provided one.
    KeyCompare { item: String, op: CmpOp, value: String },

    /// The item's value matches the provided regex.
    KeyMatches { item: String, rx: regex::Regex },

    /// Any column's value equals the provided one.
    AnyIs { value: String },

    /// Any column's value matches the provided regex.
    AnyMatches { rx: regex::Regex },

    /// Both sub-conditions hold.
    And(Box<Condition>, Box<Condition>),

    /// Either sub-condition holds.
    Or(Box<Condition>, Box<Condition>),
}

/// Builder for conditions on one item, returned by [key].
pub struct Key(String);

/// Builder for conditions on all columns, returned by [any].
pub struct Any;

//---------------------------------------------------------------------------//
//                           Implementations
//---------------------------------------------------------------------------//

/// This function starts a condition on the provided item.
pub fn key(item: &str) -> Key {
    Key(item.to_owned())
}

/// This function starts a condition on all columns of a row.
pub fn any() -> Any {
    Any
}

impl Key {
    pub fn is(self, value: &str) -> Condition {
        Condition::KeyIs { item: self.0, value: value.to_owned() }
    }

    pub fn is_not(self, value: &str) -> Condition {
        Condition::KeyIsNot { item: self.0, value: value.to_owned() }
    }

    pub fn lt(self, value: &str) -> Condition {
        Condition::KeyCompare { item: self.0, op: CmpOp::Lt, value: value.to_owned() }
    }

    pub fn le(self, value: &str) -> Condition {
        Condition::KeyCompare { item: self.0, op: CmpOp::Le, value: value.to_owned() }
    }

    pub fn gt(self, value: &str) -> Condition {
        Condition::KeyCompare { item: self.0, op: CmpOp::Gt, value: value.to_owned() }
    }

    pub fn ge(self, value: &str) -> Condition {
        Condition::KeyCompare { item: self.0, op: CmpOp::Ge, value: value.to_owned() }
    }

    pub fn matches(self, rx: regex::Regex) -> Condition {
        Condition::KeyMatches { item: self.0, rx }
    }
}

impl Any {
    pub fn is(self, value: &str) -> Condition {
        Condition::AnyIs { value: value.to_owned() }
    }

    pub fn matches(self, rx: regex::Regex) -> Condition {
        Condition::AnyMatches { rx }
    }
}

impl BitAnd for Condition {
    type Output = Condition;

    fn bitand(self, rhs: Condition) -> Condition {
        Condition::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Condition {
    type Output = Condition;

    fn bitor(self, rhs: Condition) -> Condition {
        Condition::Or(Box::new(self), Box::new(rhs))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::All => write!(f, "*"),
            Self::KeyIs { item, value } => write!(f, "{item} == '{value}'"),
            Self::KeyIsNot { item, value } => write!(f, "{item} != '{value}'"),
            Self::KeyCompare { item, op, value } => {
                let op = match op {
                    CmpOp::Lt => "<",
                    CmpOp::Le => "<=",
                    CmpOp::Gt => ">",
                    CmpOp::Ge => ">=",
                };
                write!(f, "{item} {op} '{value}'")
            }
            Self::KeyMatches { item, rx } => write!(f, "{item} =~ /{rx}/"),
            Self::AnyIs { value } => write!(f, "<any> == '{value}'"),
            Self::AnyMatches { rx } => write!(f, "<any> =~ /{rx}/"),
            Self::And(a, b) => write!(f, "({a}) and ({b})"),
            Self::Or(a, b) => write!(f, "({a}) or ({b})"),
        }
    }
}

impl Condition {

    /// This function tests the condition against one row of a category.
    pub fn eval(&self, cat: &Category, row: RowId) -> bool {
        match self {
            Self::All => true,
            Self::KeyIs { item, value } => cat.compare_values(item, cat.value(row, item), value).is_eq(),
            Self::KeyIsNot { item, value } => !cat.compare_values(item, cat.value(row, item), value).is_eq(),
            Self::KeyCompare { item, op, value } => {
                let ord = cat.compare_values(item, cat.value(row, item), value);
                match op {
                    CmpOp::Lt => ord.is_lt(),
                    CmpOp::Le => ord.is_le(),
                    CmpOp::Gt => ord.is_gt(),
                    CmpOp::Ge => ord.is_ge(),
                }
            }
            Self::KeyMatches { item, rx } => rx.is_match(cat.value(row, item)),
            Self::AnyIs { value } => cat.column_names().any(|name| cat.value(row, name) == value),
            Self::AnyMatches { rx } => cat.column_names().any(|name| rx.is_match(cat.value(row, name))),
            Self::And(a, b) => a.eval(cat, row) && b.eval(cat, row),
            Self::Or(a, b) => a.eval(cat, row) || b.eval(cat, row),
        }
    }
}
