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
Module with the mmCIF grammar driver.

The driver consumes tokens from the [Lexer](crate::lexer::Lexer) with a
look-ahead of one and dispatches the `data_`/`loop_`/tag productions into a
[DocumentSink], which receives one callback per produced datablock, category,
row and item. Regular files must not contain save frames; the dictionary
parser has its own driver for those.
!*/

use crate::error::{RCifError, Result};
use crate::lexer::{Lexer, Token, TokenKind};

#[cfg(test)] mod parser_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// Receiver of the parser's productions.
///
/// Implementors build whatever in-memory representation they need: the regular
/// file loader appends to a [File](crate::model::File), tests may just record
/// the callbacks.
pub trait DocumentSink {

    /// A `data_<name>` header was read.
    fn produce_datablock(&mut self, name: &str) -> Result<()>;

    /// A new category starts, either from a `loop_` header or from a tag with
    /// a different category prefix than the previous one.
    fn produce_category(&mut self, name: &str) -> Result<()>;

    /// A new row starts in the current category.
    fn produce_row(&mut self) -> Result<()>;

    /// One item value was read for the current row.
    fn produce_item(&mut self, category: &str, item: &str, value: &str) -> Result<()>;
}

/// The grammar driver itself.
pub struct Parser<'a, 'b, S: DocumentSink> {
    lexer: Lexer<'a>,
    lookahead: Token,
    sink: &'b mut S,
}

//---------------------------------------------------------------------------//
//                           Implementations
//---------------------------------------------------------------------------//

/// This function splits a tag into its category and item parts.
///
/// Both the dotted form `_category.item` and the legacy underscore form
/// `_category_item` (split at the last underscore) are accepted. The leading
/// underscore is optional.
pub fn split_tag_name(tag: &str) -> (String, String) {
    let tag = tag.strip_prefix('_').unwrap_or(tag);

    if let Some(pos) = tag.find('.') {
        (tag[..pos].to_owned(), tag[pos + 1..].to_owned())
    } else if let Some(pos) = tag.rfind('_') {
        (tag[..pos].to_owned(), tag[pos + 1..].to_owned())
    } else {
        (tag.to_owned(), String::new())
    }
}

impl<'a, 'b, S: DocumentSink> Parser<'a, 'b, S> {

    /// This function creates a new Parser over the provided bytes, reading the first token.
    pub fn new(data: &'a [u8], sink: &'b mut S) -> Result<Self> {
        let mut lexer = Lexer::new(data);
        let lookahead = lexer.next_token()?;

        Ok(Self {
            lexer,
            lookahead,
            sink,
        })
    }

    /// This function builds a parse error at the current line.
    fn error(&self, message: &str) -> RCifError {
        RCifError::ParseError(self.lexer.line_nr(), message.to_owned())
    }

    /// This function consumes the look-ahead if it matches the expected kind,
    /// returning the consumed token.
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

    /// This function parses an entire file, firing the sink callbacks along the way.
    pub fn parse_file(&mut self) -> Result<()> {
        while self.lookahead.kind != TokenKind::Eof {
            match self.lookahead.kind {
                TokenKind::Global => self.parse_global()?,
                TokenKind::Data => {
                    let name = self.lookahead.value.clone();
                    self.sink.produce_datablock(&name)?;

                    self.expect(TokenKind::Data)?;
                    self.parse_data_block()?;
                }
                _ => return Err(self.error("This file does not seem to be an mmCIF file")),
            }
        }

        Ok(())
    }

    /// A `global_` section is consumed but otherwise ignored.
    fn parse_global(&mut self) -> Result<()> {
        self.expect(TokenKind::Global)?;
        while self.lookahead.kind == TokenKind::Tag {
            self.expect(TokenKind::Tag)?;
            self.expect(TokenKind::Value)?;
        }

        Ok(())
    }

    /// This function parses the contents of one datablock: any mix of loops,
    /// single tag/value pairs, and save frames.
    fn parse_data_block(&mut self) -> Result<()> {
        let mut cat = String::new();

        loop {
            match self.lookahead.kind {
                TokenKind::Loop => {

                    // A loop always starts a new category.
                    cat.clear();
                    self.expect(TokenKind::Loop)?;

                    let mut tags = vec![];
                    while self.lookahead.kind == TokenKind::Tag {
                        let (cat_name, item_name) = split_tag_name(&self.lookahead.value);

                        if cat.is_empty() {
                            self.sink.produce_category(&cat_name)?;
                            cat = cat_name;
                        } else if !caseless::default_caseless_match_str(&cat, &cat_name) {
                            return Err(self.error("inconsistent categories in loop_"));
                        }

                        tags.push(item_name);
                        self.expect(TokenKind::Tag)?;
                    }

                    while self.lookahead.kind == TokenKind::Value {
                        self.sink.produce_row()?;

                        for tag in &tags {
                            let value = self.expect(TokenKind::Value)?;
                            self.sink.produce_item(&cat, tag, &value.value)?;
                        }
                    }

                    cat.clear();
                }

                TokenKind::Tag => {
                    let (cat_name, item_name) = split_tag_name(&self.lookahead.value);

                    // Consecutive tags of the same category coalesce into one row.
                    if !caseless::default_caseless_match_str(&cat, &cat_name) {
                        self.sink.produce_category(&cat_name)?;
                        cat = cat_name;
                        self.sink.produce_row()?;
                    }

                    self.expect(TokenKind::Tag)?;

                    let value = self.expect(TokenKind::Value)?;
                    self.sink.produce_item(&cat, &item_name, &value.value)?;
                }

                TokenKind::Save => self.parse_save_frame()?,

                _ => break,
            }
        }

        Ok(())
    }

    /// Save frames only appear in dictionaries, which use their own driver.
    fn parse_save_frame(&mut self) -> Result<()> {
        Err(self.error("A regular CIF file should not contain a save frame"))
    }
}
