//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is the RCIF Lib, a lib to read, validate and convert macromolecular
//! structure files between the mmCIF format and the legacy PDB format.
//!
//! The three main entry points are:
//! - [model::File::load]: parse an mmCIF file into the in-memory model.
//! - [pdb::read_structure_file]: read either format, reconstructing the mmCIF
//!   semantics from the legacy records where needed.
//! - [model::File::save]: write the model back out as mmCIF.
//!
//! Validation is dictionary-driven: load a DDL dictionary into a
//! [validator::Validator] and attach it to a file to get type, enumeration,
//! mandatory-field, key-uniqueness and parent/child checks.

use std::sync::atomic::{AtomicI32, Ordering};

pub mod compound;
pub mod error;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod pdb;
pub mod validator;
pub mod writer;

/// Process-wide verbosity. `0` is silent, higher values enable progressively
/// more expensive diagnostics on top of the `log` levels.
static VERBOSITY: AtomicI32 = AtomicI32::new(0);

/// This function sets the process-wide verbosity level.
pub fn set_verbosity(level: i32) {
    VERBOSITY.store(level, Ordering::Relaxed);
}

/// This function returns the process-wide verbosity level.
pub fn verbosity() -> i32 {
    VERBOSITY.load(Ordering::Relaxed)
}
