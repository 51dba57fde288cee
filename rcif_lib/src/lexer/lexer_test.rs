//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the mmCIF tokenizer.

use super::*;

fn tokens_of(input: &str) -> Vec<(TokenKind, String, ValueType)> {
    let mut lexer = Lexer::new(input.as_bytes());
    let mut result = vec![];

    loop {
        let token = lexer.next_token().unwrap();
        let kind = token.kind;
        result.push((token.kind, token.value, token.value_type));
        if kind == TokenKind::Eof {
            break;
        }
    }

    result
}

#[test]
fn test_char_classes() {
    assert!(is_ordinary('a' as i32));
    assert!(is_ordinary('0' as i32));
    assert!(!is_ordinary('_' as i32));
    assert!(!is_ordinary('#' as i32));
    assert!(!is_ordinary('$' as i32));
    assert!(!is_ordinary('\'' as i32));
    assert!(!is_ordinary('"' as i32));
    assert!(!is_ordinary(';' as i32));
    assert!(!is_ordinary('[' as i32));
    assert!(!is_ordinary(']' as i32));
    assert!(!is_ordinary(' ' as i32));

    assert!(is_non_blank('_' as i32));
    assert!(is_non_blank(';' as i32));
    assert!(is_non_blank('\'' as i32));
    assert!(!is_non_blank(' ' as i32));
    assert!(!is_non_blank('\t' as i32));

    assert!(is_text_lead('a' as i32));
    assert!(is_text_lead('_' as i32));
    assert!(!is_text_lead(';' as i32));

    assert!(is_any_print('\t' as i32));
    assert!(is_any_print('~' as i32));
    assert!(!is_any_print(0x7F));
    assert!(!is_any_print('\n' as i32));
}

#[test]
fn test_reserved_words() {
    let tokens = tokens_of("data_test loop_ global_ stop_ save_frame save_\n");
    assert_eq!(tokens[0].0, TokenKind::Data);
    assert_eq!(tokens[0].1, "test");
    assert_eq!(tokens[1].0, TokenKind::Loop);
    assert_eq!(tokens[2].0, TokenKind::Global);
    assert_eq!(tokens[3].0, TokenKind::Stop);
    assert_eq!(tokens[4].0, TokenKind::Save);
    assert_eq!(tokens[4].1, "frame");
    assert_eq!(tokens[5].0, TokenKind::Save);
    assert_eq!(tokens[5].1, "");
    assert_eq!(tokens[6].0, TokenKind::Eof);
}

#[test]
fn test_reserved_words_case_insensitive() {
    let tokens = tokens_of("DATA_Test LOOP_\n");
    assert_eq!(tokens[0].0, TokenKind::Data);
    assert_eq!(tokens[0].1, "Test");
    assert_eq!(tokens[1].0, TokenKind::Loop);
}

#[test]
fn test_value_types() {
    let tokens = tokens_of("1 -42 1.5 -1e2 .5 1.23e-4 hello 1.2.3 ? .\n");
    assert_eq!(tokens[0], (TokenKind::Value, "1".to_owned(), ValueType::Int));
    assert_eq!(tokens[1], (TokenKind::Value, "-42".to_owned(), ValueType::Int));
    assert_eq!(tokens[2], (TokenKind::Value, "1.5".to_owned(), ValueType::Float));
    assert_eq!(tokens[3], (TokenKind::Value, "-1e2".to_owned(), ValueType::Float));
    assert_eq!(tokens[4], (TokenKind::Value, ".5".to_owned(), ValueType::Float));
    assert_eq!(tokens[5], (TokenKind::Value, "1.23e-4".to_owned(), ValueType::Float));
    assert_eq!(tokens[6], (TokenKind::Value, "hello".to_owned(), ValueType::String));
    assert_eq!(tokens[7], (TokenKind::Value, "1.2.3".to_owned(), ValueType::String));
    assert_eq!(tokens[8], (TokenKind::Value, String::new(), ValueType::Unknown));
    assert_eq!(tokens[9], (TokenKind::Value, ".".to_owned(), ValueType::Inapplicable));
}

#[test]
fn test_uncertainty_suffix_is_a_plain_string() {
    let tokens = tokens_of("1.23(4)\n");
    assert_eq!(tokens[0], (TokenKind::Value, "1.23(4)".to_owned(), ValueType::String));
}

#[test]
fn test_tags() {
    let tokens = tokens_of("_atom_site.id _cell_length_a\n");
    assert_eq!(tokens[0], (TokenKind::Tag, "_atom_site.id".to_owned(), ValueType::Unknown));
    assert_eq!(tokens[1], (TokenKind::Tag, "_cell_length_a".to_owned(), ValueType::Unknown));
}

#[test]
fn test_quoted_strings() {
    let tokens = tokens_of("'hello world' \"two words\" 'O'Connor' x\n");
    assert_eq!(tokens[0], (TokenKind::Value, "hello world".to_owned(), ValueType::String));
    assert_eq!(tokens[1], (TokenKind::Value, "two words".to_owned(), ValueType::String));

    // A quote not followed by whitespace does not terminate the string.
    assert_eq!(tokens[2], (TokenKind::Value, "O'Connor".to_owned(), ValueType::String));
}

#[test]
fn test_text_field() {
    let tokens = tokens_of("data_x _a.b\n;line one\nline two\n;\n");
    assert_eq!(tokens[2], (TokenKind::Value, "line one\nline two".to_owned(), ValueType::TextField));
}

#[test]
fn test_text_field_with_escaped_semicolon() {
    // The backslash escape is kept as-is on read; the writer re-emits it untouched.
    let tokens = tokens_of("data_x _a.b\n;line one\n\\;line two\n;\n");
    assert_eq!(tokens[2], (TokenKind::Value, "line one\n\\;line two".to_owned(), ValueType::TextField));
}

#[test]
fn test_semicolon_not_at_bol_is_ordinary() {
    let tokens = tokens_of("data_x _a.b ab;cd\n");
    assert_eq!(tokens[2], (TokenKind::Value, "ab;cd".to_owned(), ValueType::String));
}

#[test]
fn test_comments_are_skipped() {
    let tokens = tokens_of("# a comment\ndata_x # another\n_a.b 1\n");
    assert_eq!(tokens[0].0, TokenKind::Data);
    assert_eq!(tokens[1].0, TokenKind::Tag);
    assert_eq!(tokens[2], (TokenKind::Value, "1".to_owned(), ValueType::Int));
}

#[test]
fn test_crlf_normalization() {
    let tokens = tokens_of("data_x\r\n_a.b\r\n;text\r\nfield\r\n;\r\n");
    assert_eq!(tokens[2], (TokenKind::Value, "text\nfield".to_owned(), ValueType::TextField));
}

#[test]
fn test_line_numbers() {
    let mut lexer = Lexer::new(b"data_x\n_a.b 1\n_a.c 2\n");
    assert_eq!(lexer.line_nr(), 1);
    lexer.next_token().unwrap();
    assert_eq!(lexer.line_nr(), 1);
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(lexer.line_nr(), 2);
}

#[test]
fn test_retract_is_idempotent() {
    let mut lexer = Lexer::new(b"abc def\n");

    let before_pos = lexer.pos;
    let before_line = lexer.line_nr;
    let before_token = lexer.token_value.clone();

    let ch = lexer.get_next_char();
    lexer.retract();

    assert_eq!(lexer.line_nr, before_line);
    assert_eq!(lexer.token_value, before_token);

    // The retracted character must come back unchanged.
    assert_eq!(lexer.get_next_char(), ch);
    assert_eq!(lexer.pos, before_pos + 1);
}

#[test]
fn test_unterminated_text_field_fails() {
    let mut lexer = Lexer::new(b"data_x _a.b\n;no terminator\n");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert!(matches!(lexer.next_token(), Err(RCifError::UnterminatedTextField(_))));
}

#[test]
fn test_unterminated_quoted_string_fails() {
    let mut lexer = Lexer::new(b"data_x _a.b 'no end\n");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert!(matches!(lexer.next_token(), Err(RCifError::UnterminatedQuotedString(_))));
}

#[test]
fn test_unquoted_string_check() {
    assert!(is_unquoted_string("hello"));
    assert!(is_unquoted_string("1.5"));
    assert!(!is_unquoted_string("hello world"));
    assert!(!is_unquoted_string("_tag"));
    assert!(!is_unquoted_string("#comment"));
    assert!(!is_unquoted_string("'quoted"));
    assert!(!is_unquoted_string(""));
    assert!(!is_unquoted_string("data_block"));
    assert!(!is_unquoted_string("loop_"));
}
