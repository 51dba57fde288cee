//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains all kind of errors used inside this crate.
//!
//! Not much to say appart of that, really.

use thiserror::Error;

/// Custom `Result` type, to always return our custom error.
pub type Result<T, E = RCifError> = core::result::Result<T, E>;

/// Custom error type for the lib.
#[derive(Error, Debug)]
pub enum RCifError {
    #[error("parse error at line {0}: {1}")]
    ParseError(u32, String),

    #[error("parse error at line {0}: unterminated text field")]
    UnterminatedTextField(u32),

    #[error("parse error at line {0}: unterminated quoted string")]
    UnterminatedQuotedString(u32),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("Value '{0}' does not match the type expression for type {1} in item {2}.")]
    ValueTypeMismatch(String, String, String),

    #[error("Value '{0}' is not in the list of allowed values for item {1}.")]
    ValueNotEnumerated(String, String),

    #[error("Missing mandatory field {0} for category {1}.")]
    MissingMandatoryField(String, String),

    #[error("The datablock {0} is already defined in this file.")]
    DatablockAlreadyDefined(String),

    #[error("The datablock {0} does not exist in this file.")]
    DatablockNotFound(String),

    #[error("Invalid empty name for a category.")]
    EmptyCategoryName,

    #[error("No validator has been loaded for this file yet.")]
    NoValidator,

    #[error("Incomplete dictionary: no item validator for key {0}.")]
    MissingItemValidator(String),

    #[error("Incomplete dictionary: no type validator for item {0}.")]
    MissingTypeValidator(String),

    #[error("Not a known primitive type: {0}.")]
    UnknownPrimitiveType(String),

    #[error("The dictionary {0} hasn't been found in any of the known dictionary folders.")]
    DictionaryNotFound(String),

    #[error("This file does not seem to be an mmCIF file.")]
    NotACifFile,

    #[error("This file does not seem to be a PDB file: the first record is not HEADER.")]
    NotAPdbFile,

    #[error("Expected the record {0} but found {1}.")]
    UnexpectedPdbRecord(String, String),

    #[error("The residue {0} {1}{2} in chain {3} could not be mapped onto the declared SEQRES sequence. The file disagrees with itself.")]
    UnmappableResidue(String, i32, String, String),

    #[error("Invalid state reached while lexing, this is a bug in the lexer.")]
    InvalidLexerState,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Represents all other cases of `regex::Error`.
    #[error(transparent)]
    RegexError(#[from] regex::Error),

    /// Represents all other cases of `time::error::Parse`.
    #[error(transparent)]
    TimeParseError(#[from] time::error::Parse),

    /// Represents all other cases of `time::error::Format`.
    #[error(transparent)]
    TimeFormatError(#[from] time::error::Format),

    /// Represents all other cases of `time::error::InvalidFormatDescription`.
    #[error(transparent)]
    TimeInvalidFormatDescriptionError(#[from] time::error::InvalidFormatDescription),
}
