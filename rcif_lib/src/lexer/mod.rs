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
Module with the mmCIF tokenizer.

This is a hand-written state machine lexer. It reads a byte stream and emits
tokens for the reserved words (`data_`, `loop_`, `global_`, `save_`, `stop_`),
tags, and values, classifying each value as int, float, string, text field,
inapplicable (`.`) or unknown (`?`).

Reserved words are recognised lazily: the lexer speculates that a bare token
is a float first, then an int, then a plain value, rewinding the consumed
characters between attempts. CR and CRLF line endings are normalised to LF
through a one-character putback buffer.
!*/

use bitflags::bitflags;

use crate::error::{RCifError, Result};

#[cfg(test)] mod lexer_test;

/// Maximum line length allowed when writing mmCIF files.
pub const MAX_LINE_LENGTH: usize = 132;

/// Sentinel for end-of-stream, so it can travel through the putback buffer.
const EOF_CHAR: i32 = -1;

bitflags! {

    /// Character classes of the printable ASCII range, as used by the mmCIF grammar.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct CharTraits: u8 {
        const ORDINARY = 1 << 0;
        const NON_BLANK = 1 << 1;
        const TEXT_LEAD = 1 << 2;
        const ANY_PRINT = 1 << 3;
    }
}

/// Character class table for the bytes 0x20..=0x7F, indexed by `byte - 0x20`.
///
/// This table has to match the reference bitmasks byte-for-byte, as it defines
/// which characters are accepted where by the grammar.
const CHAR_TRAITS_TABLE: [u8; 96] = [
    //  0   1   2   3   4   5   6   7   8   9   a   b   c   d   e   f
       14, 15, 14, 14, 14, 15, 15, 14, 15, 15, 15, 15, 15, 15, 15, 15, // 2
       15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 10, 15, 15, 15, 15, // 3
       15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, // 4
       15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 14, 15, 14, 15, 14, // 5
       15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, // 6
       15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15,  0, // 7
];

/// Returns the character classes of the provided character.
fn traits_of(ch: i32) -> CharTraits {
    if (0x20..=0x7F).contains(&ch) {
        CharTraits::from_bits_truncate(CHAR_TRAITS_TABLE[(ch - 0x20) as usize])
    } else {
        CharTraits::empty()
    }
}

/// Returns true if the provided character is ASCII whitespace.
pub fn is_space(ch: i32) -> bool {
    matches!(ch, 0x20 | 0x09 | 0x0A | 0x0B | 0x0C | 0x0D)
}

/// Returns true if the provided character terminates a bare value: whitespace or a comment start.
pub fn is_white(ch: i32) -> bool {
    is_space(ch) || ch == '#' as i32
}

/// Returns true if the provided character may start a bare (unquoted) value.
pub fn is_ordinary(ch: i32) -> bool {
    traits_of(ch).contains(CharTraits::ORDINARY)
}

/// Returns true if the provided character may continue a bare value.
pub fn is_non_blank(ch: i32) -> bool {
    ch > 0x20 && traits_of(ch).contains(CharTraits::NON_BLANK)
}

/// Returns true if the provided character may start a continuation line of a text field.
pub fn is_text_lead(ch: i32) -> bool {
    traits_of(ch).contains(CharTraits::TEXT_LEAD)
}

/// Returns true if the provided character may appear at all in a quoted string or text field.
pub fn is_any_print(ch: i32) -> bool {
    ch == '\t' as i32 || traits_of(ch).contains(CharTraits::ANY_PRINT)
}

/// Returns true if the provided string can be written without quotes.
pub fn is_unquoted_string(s: &str) -> bool {
    let mut bytes = s.bytes();
    let mut result = match bytes.next() {
        Some(b) => is_ordinary(b as i32),
        None => false,
    };

    for b in bytes {
        if !result {
            break;
        }
        result = is_non_blank(b as i32);
    }

    // A bare value must not re-lex as a reserved word or tag.
    result && !is_reserved_word(s)
}

/// Returns true if the provided string would be taken for a reserved word when read back.
fn is_reserved_word(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower == "loop_" || lower == "stop_" || lower == "global_"
        || lower.starts_with("data_") || lower.starts_with("save_")
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This enum represents the tokens of the mmCIF grammar.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Eof,
    Data,
    Loop,
    Global,
    Save,
    Stop,
    Tag,
    Value,
}

/// This enum represents the lexical classification of a value token.
///
/// Note that `Numeric` (a float with a standard-uncertainty suffix, like `1.23(4)`)
/// is reserved: such values currently lex as plain strings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueType {
    Int,
    Float,
    Numeric,
    String,
    TextField,
    Inapplicable,
    Unknown,
}

/// One token as returned by [Lexer::next_token].
#[derive(Clone, Debug)]
pub struct Token {

    /// Kind of the token.
    pub kind: TokenKind,

    /// Value of the token. For `Data` and `Save` this is the name with the keyword stripped.
    pub value: String,

    /// Lexical classification, only meaningful for `Value` tokens.
    pub value_type: ValueType,
}

/// States of the tokenizer automaton.
///
/// The numeric families are tried in the order float, int, plain value: when one
/// fails, [Lexer::restart] rewinds the token and advances the start state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Start,
    White,
    Comment,
    QuestionMark,
    Dot,
    TextField,
    TextFieldNl,
    QuotedString,
    QuotedStringQuote,
    Tag,
    Float0,
    Float1,
    Float2,
    Float3,
    Float4,
    Float5,
    Int0,
    Int1,
    Value0,
    Value1,
    Value2,
}

/// The mmCIF tokenizer.
pub struct Lexer<'a> {

    /// Raw input bytes.
    data: &'a [u8],

    /// Read position within `data`.
    pos: usize,

    /// Putback buffer, for CR/LF translation and retraction.
    buffer: Vec<i32>,

    /// Characters of the token being lexed.
    token_value: Vec<u8>,

    /// Current line, starting at 1.
    line_nr: u32,

    /// Whether the last character consumed was end-of-stream.
    last_eof: bool,

    /// Whether the current position is at the beginning of a line.
    bol: bool,
}

//---------------------------------------------------------------------------//
//                           Implementations
//---------------------------------------------------------------------------//

impl TokenKind {

    /// Name of the token, for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Data => "DATA",
            Self::Loop => "LOOP",
            Self::Global => "GLOBAL",
            Self::Save => "SAVE",
            Self::Stop => "STOP",
            Self::Tag => "Tag",
            Self::Value => "Value",
        }
    }
}

impl<'a> Lexer<'a> {

    /// This function creates a new Lexer over the provided bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            buffer: vec![],
            token_value: vec![],
            line_nr: 1,
            last_eof: false,
            bol: true,
        }
    }

    /// Line number of the read position, for error reporting.
    pub fn line_nr(&self) -> u32 {
        self.line_nr
    }

    /// This function builds a parse error at the current line.
    pub fn error(&self, message: &str) -> RCifError {
        RCifError::ParseError(self.line_nr, message.to_owned())
    }

    /// Next byte of the underlying stream, or the EOF sentinel.
    fn next_byte(&mut self) -> i32 {
        match self.data.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                b as i32
            }
            None => EOF_CHAR,
        }
    }

    /// This function takes a char from the putback buffer, or from the stream if it's empty.
    ///
    /// It also translates CR and CRLF into LF, bumps the line counter, and appends the
    /// character to the token buffer.
    fn get_next_char(&mut self) -> i32 {
        let mut result = match self.buffer.pop() {
            Some(ch) => ch,
            None => self.next_byte(),
        };

        if result == '\r' as i32 {
            let lookahead = self.next_byte();
            if lookahead != '\n' as i32 {
                self.buffer.push(lookahead);
            }
            result = '\n' as i32;
        }

        if result >= 0 {
            self.token_value.push(result as u8);
            self.last_eof = false;
        } else {
            self.last_eof = true;
        }

        if result == '\n' as i32 {
            self.line_nr += 1;
        }

        result
    }

    /// This function puts the last consumed character back, leaving the lexer in
    /// the exact state it had before consuming it.
    fn retract(&mut self) {
        if self.last_eof {
            self.buffer.push(EOF_CHAR);
            self.last_eof = false;
            return;
        }

        if let Some(ch) = self.token_value.pop() {
            if ch == b'\n' {
                self.line_nr -= 1;
            }
            self.buffer.push(ch as i32);
        }
    }

    /// This function rewinds the whole current token and moves the start state one
    /// numeric family further: float, then int, then plain value.
    fn restart(&mut self, start: &mut State, state: &mut State) -> Result<()> {
        while !self.token_value.is_empty() {
            self.retract();
        }

        *start = match *start {
            State::Start => State::Float0,
            State::Float0 => State::Int0,
            State::Int0 => State::Value0,
            _ => return Err(RCifError::InvalidLexerState),
        };
        *state = *start;
        self.bol = false;

        Ok(())
    }

    /// This function lexes and returns the next token of the stream.
    pub fn next_token(&mut self) -> Result<Token> {
        let mut state = State::Start;
        let mut start = State::Start;
        let mut quote_char = 0;

        self.bol = false;
        self.token_value.clear();

        loop {
            let ch = self.get_next_char();

            match state {
                State::Start => {
                    if ch == EOF_CHAR {
                        return Ok(self.token(TokenKind::Eof, ValueType::Unknown));
                    } else if ch == '\n' as i32 {
                        self.bol = true;
                        state = State::White;
                    } else if ch == ' ' as i32 || ch == '\t' as i32 {
                        state = State::White;
                    } else if ch == '#' as i32 {
                        state = State::Comment;
                    } else if ch == '.' as i32 {
                        state = State::Dot;
                    } else if ch == '_' as i32 {
                        state = State::Tag;
                    } else if ch == ';' as i32 && self.bol {
                        state = State::TextField;
                    } else if ch == '\'' as i32 || ch == '"' as i32 {
                        quote_char = ch;
                        state = State::QuotedString;
                    } else if ch == '?' as i32 {
                        state = State::QuestionMark;
                    } else {
                        self.restart(&mut start, &mut state)?;
                    }
                }

                State::White => {
                    if ch == EOF_CHAR {
                        return Ok(self.token(TokenKind::Eof, ValueType::Unknown));
                    } else if !is_space(ch) {
                        state = State::Start;
                        self.retract();
                        self.token_value.clear();
                    } else {
                        self.bol = ch == '\n' as i32;
                    }
                }

                State::Comment => {
                    if ch == '\n' as i32 {
                        state = State::Start;
                        self.bol = true;
                        self.token_value.clear();
                    } else if ch == EOF_CHAR {
                        return Ok(self.token(TokenKind::Eof, ValueType::Unknown));
                    } else if !is_any_print(ch) {
                        return Err(self.error("invalid character in comment"));
                    }
                }

                State::QuestionMark => {
                    if is_non_blank(ch) {
                        state = State::Value1;
                    } else {
                        self.retract();
                        self.token_value.clear();
                        return Ok(self.token(TokenKind::Value, ValueType::Unknown));
                    }
                }

                State::Dot => {
                    if is_digit(ch) {
                        state = State::Float2;
                    } else if is_space(ch) || ch == EOF_CHAR {
                        self.retract();
                        return Ok(self.token(TokenKind::Value, ValueType::Inapplicable));
                    } else {
                        state = State::Value1;
                    }
                }

                State::TextField => {
                    if ch == '\n' as i32 {
                        state = State::TextFieldNl;
                    } else if ch == EOF_CHAR {
                        return Err(RCifError::UnterminatedTextField(self.line_nr));
                    } else if !is_any_print(ch) {
                        log::warn!("invalid character in text field ({ch}) at line {}", self.line_nr);
                    }
                }

                State::TextFieldNl => {
                    if is_text_lead(ch) || ch == ' ' as i32 || ch == '\t' as i32 {
                        state = State::TextField;
                    } else if ch == ';' as i32 {
                        // Strip the opening ';' and the terminating "\n;".
                        let len = self.token_value.len();
                        let content = self.token_value[1..len - 2].to_vec();
                        self.token_value = content;
                        return Ok(self.token(TokenKind::Value, ValueType::TextField));
                    } else if ch == EOF_CHAR {
                        return Err(RCifError::UnterminatedTextField(self.line_nr));
                    } else if ch != '\n' as i32 {
                        return Err(self.error("invalid character in text field"));
                    }
                }

                State::QuotedString => {
                    if ch == EOF_CHAR {
                        return Err(RCifError::UnterminatedQuotedString(self.line_nr));
                    } else if ch == quote_char {
                        state = State::QuotedStringQuote;
                    } else if !is_any_print(ch) {
                        return Err(self.error("invalid character in quoted string"));
                    }
                }

                State::QuotedStringQuote => {
                    if is_white(ch) || ch == EOF_CHAR {
                        self.retract();
                        // Strip the enclosing quotes.
                        let len = self.token_value.len();
                        let content = self.token_value[1..len - 1].to_vec();
                        self.token_value = content;
                        return Ok(self.token(TokenKind::Value, ValueType::String));
                    } else if ch == quote_char {
                        // A doubled quote stays inside the string.
                    } else if is_any_print(ch) {
                        state = State::QuotedString;
                    } else {
                        return Err(self.error("invalid character in quoted string"));
                    }
                }

                State::Tag => {
                    if !is_non_blank(ch) {
                        self.retract();
                        return Ok(self.token(TokenKind::Tag, ValueType::Unknown));
                    }
                }

                State::Float0 => {
                    if ch == '+' as i32 || ch == '-' as i32 || is_digit(ch) {
                        state = State::Float1;
                    } else {
                        self.restart(&mut start, &mut state)?;
                    }
                }

                State::Float1 => {
                    if is_digit(ch) {
                        // Still in the mantissa.
                    } else if ch == '.' as i32 {
                        state = State::Float2;
                    } else if ch == 'e' as i32 || ch == 'E' as i32 {
                        state = State::Float3;
                    } else if is_white(ch) || ch == EOF_CHAR {
                        self.retract();
                        return Ok(self.token(TokenKind::Value, ValueType::Int));
                    } else {
                        self.restart(&mut start, &mut state)?;
                    }
                }

                State::Float2 => {
                    if is_digit(ch) {
                        // Fraction digits.
                    } else if ch == 'e' as i32 || ch == 'E' as i32 {
                        state = State::Float3;
                    } else if is_white(ch) || ch == EOF_CHAR {
                        self.retract();
                        return Ok(self.token(TokenKind::Value, ValueType::Float));
                    } else {
                        self.restart(&mut start, &mut state)?;
                    }
                }

                State::Float3 => {
                    if ch == '+' as i32 || ch == '-' as i32 {
                        state = State::Float4;
                    } else if is_digit(ch) {
                        state = State::Float5;
                    } else {
                        self.restart(&mut start, &mut state)?;
                    }
                }

                State::Float4 => {
                    if is_digit(ch) {
                        state = State::Float5;
                    } else {
                        self.restart(&mut start, &mut state)?;
                    }
                }

                State::Float5 => {
                    if is_digit(ch) {
                        // Exponent digits.
                    } else if is_white(ch) || ch == EOF_CHAR {
                        self.retract();
                        return Ok(self.token(TokenKind::Value, ValueType::Float));
                    } else {
                        self.restart(&mut start, &mut state)?;
                    }
                }

                State::Int0 => {
                    if is_digit(ch) || ch == '+' as i32 || ch == '-' as i32 {
                        state = State::Int1;
                    } else {
                        self.restart(&mut start, &mut state)?;
                    }
                }

                State::Int1 => {
                    if is_digit(ch) {
                        // More digits.
                    } else if is_white(ch) || ch == EOF_CHAR {
                        self.retract();
                        return Ok(self.token(TokenKind::Value, ValueType::Int));
                    } else {
                        self.restart(&mut start, &mut state)?;
                    }
                }

                State::Value0 => {
                    if is_non_blank(ch) {
                        state = State::Value1;
                    } else {
                        return Err(self.error("invalid character at this position"));
                    }
                }

                State::Value1 => {
                    if ch == '_' as i32 {
                        // First '_' of the token: check for the reserved words.
                        let s = String::from_utf8_lossy(&self.token_value).to_ascii_lowercase();

                        if s == "global_" {
                            return Ok(self.token(TokenKind::Global, ValueType::Unknown));
                        } else if s == "stop_" {
                            return Ok(self.token(TokenKind::Stop, ValueType::Unknown));
                        } else if s == "loop_" {
                            return Ok(self.token(TokenKind::Loop, ValueType::Unknown));
                        } else if s == "data_" || s == "save_" {
                            state = State::Value2;
                        }
                    } else if !is_non_blank(ch) {
                        self.retract();
                        return Ok(self.token(TokenKind::Value, ValueType::String));
                    }
                }

                State::Value2 => {
                    if !is_non_blank(ch) {
                        self.retract();

                        let kind = if self.token_value[0].eq_ignore_ascii_case(&b'd') {
                            TokenKind::Data
                        } else {
                            TokenKind::Save
                        };

                        // Strip the "data_"/"save_" keyword.
                        let content = self.token_value[5..].to_vec();
                        self.token_value = content;
                        return Ok(self.token(kind, ValueType::Unknown));
                    }
                }
            }
        }
    }

    /// This function builds a token from the current token buffer.
    fn token(&mut self, kind: TokenKind, value_type: ValueType) -> Token {
        let value = String::from_utf8_lossy(&self.token_value).into_owned();
        log::trace!("token {} '{}'", kind.name(), value);

        Token {
            kind,
            value,
            value_type,
        }
    }
}

/// Returns true if the provided character is an ASCII digit.
fn is_digit(ch: i32) -> bool {
    (0x30..=0x39).contains(&ch)
}
