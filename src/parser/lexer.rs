// Copyright 2025 Pgscribe Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SQL Lexer (Tokenizer)
//!
//! Tokenizes PostgreSQL SQL text. The whole input is lexed eagerly into a
//! token vector because the parser needs random-access lookahead.
//!
//! The lexer implements the scanner rules of the PostgreSQL dialect:
//! dollar-quoted strings with optional tags, extended (`e'...'`) strings
//! with backslash escapes, unicode (`u&'...'`/`u&"..."`) escapes with
//! `uescape`, bit and hex strings, adjacent string literal concatenation
//! across a newline, nested block comments, and the multi-character
//! operator rule (an operator ending in `+` or `-` must contain one of
//! `~ ! @ # % ^ & | \` ?`).

use super::token::{
    is_extended_operator_char, is_operator_char, is_punctuator_char, keyword_class, Position,
    Token, TokenType,
};
use crate::error::SyntaxError;

/// SQL Lexer over a character buffer
pub struct Lexer {
    /// Input characters
    chars: Vec<char>,
    /// Index of the current character
    i: usize,
    /// Position of the current character
    pos: Position,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            i: 0,
            pos: Position::new(0, 1, 1),
        }
    }

    /// Tokenize the whole input eagerly, ending with an EOF token
    pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let eof = token.is_eof();
            tokens.push(token);
            if eof {
                return Ok(tokens);
            }
        }
    }

    /// Current character, NUL at end of input
    fn ch(&self) -> char {
        self.chars.get(self.i).copied().unwrap_or('\0')
    }

    /// Character n positions ahead of the current one
    fn peek(&self, n: usize) -> char {
        self.chars.get(self.i + n).copied().unwrap_or('\0')
    }

    /// Advance past the current character
    fn advance(&mut self) {
        if let Some(&c) = self.chars.get(self.i) {
            self.pos.offset += c.len_utf8();
            if c == '\n' {
                self.pos.line += 1;
                self.pos.column = 1;
            } else {
                self.pos.column += 1;
            }
            self.i += 1;
        }
    }

    /// Save the cursor for speculative scanning
    fn mark(&self) -> (usize, Position) {
        (self.i, self.pos)
    }

    /// Restore a saved cursor
    fn reset(&mut self, mark: (usize, Position)) {
        self.i = mark.0;
        self.pos = mark.1;
    }

    fn error(&self, message: impl Into<String>, position: Position) -> SyntaxError {
        SyntaxError::new(message, position)
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespace_and_comments()?;

        let pos = self.pos;
        let c = self.ch();

        match c {
            '\0' => Ok(Token::eof(pos)),

            '\'' => self.read_standard_string(pos),

            '"' => self.read_quoted_identifier(pos),

            'e' | 'E' if self.peek(1) == '\'' => {
                self.advance();
                self.read_extended_string(pos)
            }

            'n' | 'N' if self.peek(1) == '\'' => {
                // National strings carry no distinct behavior here
                self.advance();
                self.read_standard_string(pos)
            }

            'b' | 'B' if self.peek(1) == '\'' => self.read_bit_string(pos, 'b'),
            'x' | 'X' if self.peek(1) == '\'' => self.read_bit_string(pos, 'x'),

            'u' | 'U' if self.peek(1) == '&' && self.peek(2) == '\'' => {
                self.advance();
                self.advance();
                self.read_unicode_string(pos, '\'')
            }
            'u' | 'U' if self.peek(1) == '&' && self.peek(2) == '"' => {
                self.advance();
                self.advance();
                self.read_unicode_string(pos, '"')
            }

            '$' if self.peek(1).is_ascii_digit() => {
                self.advance();
                let mut digits = String::new();
                while self.ch().is_ascii_digit() {
                    digits.push(self.ch());
                    self.advance();
                }
                Ok(Token::new(TokenType::PositionalParam, digits, pos))
            }

            '$' => self.read_dollar_string(pos),

            c if c.is_ascii_digit() => self.read_number(pos),

            '.' if self.peek(1).is_ascii_digit() => self.read_number(pos),

            '.' if self.peek(1) == '.' => {
                self.advance();
                self.advance();
                Ok(Token::new(TokenType::Punctuator, "..", pos))
            }

            ':' if self.peek(1) == ':' => {
                self.advance();
                self.advance();
                Ok(Token::new(TokenType::Punctuator, "::", pos))
            }

            ':' if is_identifier_start(self.peek(1)) => {
                self.advance();
                let name = self.read_identifier_word();
                Ok(Token::new(TokenType::NamedParam, name, pos))
            }

            c if is_punctuator_char(c) => {
                self.advance();
                Ok(Token::new(TokenType::Punctuator, c.to_string(), pos))
            }

            c if is_operator_char(c) => self.read_operator(pos),

            c if is_identifier_start(c) => {
                let word = self.read_identifier_word();
                let folded = word.to_ascii_lowercase();
                match keyword_class(&folded) {
                    Some(class) => Ok(Token::new(TokenType::Keyword(class), folded, pos)),
                    None => Ok(Token::new(TokenType::Identifier, folded, pos)),
                }
            }

            c => Err(self.error(format!("unrecognized character {:?}", c), pos)),
        }
    }

    /// Skip whitespace, `--` line comments and nested block comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), SyntaxError> {
        loop {
            let c = self.ch();
            if c.is_whitespace() {
                self.advance();
            } else if c == '-' && self.peek(1) == '-' {
                while self.ch() != '\n' && self.ch() != '\0' {
                    self.advance();
                }
            } else if c == '/' && self.peek(1) == '*' {
                self.skip_block_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    /// Skip a block comment; block comments nest in PostgreSQL
    fn skip_block_comment(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        self.advance();
        self.advance();
        let mut depth = 1usize;
        while depth > 0 {
            match self.ch() {
                '\0' => return Err(self.error("unterminated block comment", start)),
                '/' if self.peek(1) == '*' => {
                    depth += 1;
                    self.advance();
                    self.advance();
                }
                '*' if self.peek(1) == '/' => {
                    depth -= 1;
                    self.advance();
                    self.advance();
                }
                _ => self.advance(),
            }
        }
        Ok(())
    }

    fn read_identifier_word(&mut self) -> String {
        let mut word = String::new();
        while is_identifier_cont(self.ch()) {
            word.push(self.ch());
            self.advance();
        }
        word
    }

    /// Read an integer, decimal or float literal
    fn read_number(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        let mut text = String::new();
        let mut is_float = false;

        while self.ch().is_ascii_digit() {
            text.push(self.ch());
            self.advance();
        }

        // A decimal point, but not the `..` punctuator
        if self.ch() == '.' && self.peek(1) != '.' {
            is_float = true;
            text.push('.');
            self.advance();
            while self.ch().is_ascii_digit() {
                text.push(self.ch());
                self.advance();
            }
        }

        if self.ch() == 'e' || self.ch() == 'E' {
            let mark = self.mark();
            let mut exp = String::from("e");
            self.advance();
            if self.ch() == '+' || self.ch() == '-' {
                exp.push(self.ch());
                self.advance();
            }
            if self.ch().is_ascii_digit() {
                while self.ch().is_ascii_digit() {
                    exp.push(self.ch());
                    self.advance();
                }
                is_float = true;
                text.push_str(&exp);
            } else {
                // `1e` is the number 1 followed by the identifier e
                self.reset(mark);
            }
        }

        if is_float {
            Ok(Token::new(TokenType::Float, text, pos))
        } else {
            Ok(Token::new(TokenType::Integer, text, pos))
        }
    }

    /// Read a standard `'...'` string; `''` is an embedded quote, and two
    /// literals separated by whitespace containing a newline concatenate
    fn read_standard_string(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        let mut value = String::new();
        self.read_quoted_body(&mut value, pos)?;
        self.continue_adjacent_strings(&mut value, pos)?;
        Ok(Token::new(TokenType::String, value, pos))
    }

    /// Read the body of a single-quoted literal, current char on the
    /// opening quote; leaves the cursor past the closing quote
    fn read_quoted_body(&mut self, value: &mut String, pos: Position) -> Result<(), SyntaxError> {
        self.advance(); // opening quote
        loop {
            match self.ch() {
                '\0' => return Err(self.error("unterminated string literal", pos)),
                '\'' => {
                    if self.peek(1) == '\'' {
                        value.push('\'');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        return Ok(());
                    }
                }
                c => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Per the SQL standard, `'a'` newline `'b'` is one literal `'ab'`
    fn continue_adjacent_strings(
        &mut self,
        value: &mut String,
        pos: Position,
    ) -> Result<(), SyntaxError> {
        loop {
            let mark = self.mark();
            let mut saw_newline = false;
            while self.ch().is_whitespace() {
                if self.ch() == '\n' {
                    saw_newline = true;
                }
                self.advance();
            }
            if saw_newline && self.ch() == '\'' {
                self.read_quoted_body(value, pos)?;
            } else {
                self.reset(mark);
                return Ok(());
            }
        }
    }

    /// Read an extended `e'...'` string honoring backslash escapes
    fn read_extended_string(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.ch() {
                '\0' => return Err(self.error("unterminated string literal", pos)),
                '\'' => {
                    if self.peek(1) == '\'' {
                        value.push('\'');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        return Ok(Token::new(TokenType::String, value, pos));
                    }
                }
                '\\' => {
                    self.advance();
                    self.read_backslash_escape(&mut value, pos)?;
                }
                c => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Decode one backslash escape, cursor on the char after the backslash
    fn read_backslash_escape(
        &mut self,
        value: &mut String,
        pos: Position,
    ) -> Result<(), SyntaxError> {
        let c = self.ch();
        match c {
            'b' => {
                value.push('\u{8}');
                self.advance();
            }
            'f' => {
                value.push('\u{c}');
                self.advance();
            }
            'n' => {
                value.push('\n');
                self.advance();
            }
            'r' => {
                value.push('\r');
                self.advance();
            }
            't' => {
                value.push('\t');
                self.advance();
            }
            '0'..='7' => {
                let mut code = 0u32;
                let mut count = 0;
                while count < 3 && ('0'..='7').contains(&self.ch()) {
                    code = code * 8 + self.ch().to_digit(8).unwrap();
                    count += 1;
                    self.advance();
                }
                value.push(char_from_code(code, pos)?);
            }
            'x' => {
                self.advance();
                let mut code = 0u32;
                let mut count = 0;
                while count < 2 && self.ch().is_ascii_hexdigit() {
                    code = code * 16 + self.ch().to_digit(16).unwrap();
                    count += 1;
                    self.advance();
                }
                if count == 0 {
                    value.push('x');
                } else {
                    value.push(char_from_code(code, pos)?);
                }
            }
            'u' => {
                self.advance();
                let code = self.read_hex_digits(4, pos)?;
                let code = self.combine_surrogate(code, pos)?;
                value.push(char_from_code(code, pos)?);
            }
            'U' => {
                self.advance();
                let code = self.read_hex_digits(8, pos)?;
                value.push(char_from_code(code, pos)?);
            }
            '\0' => return Err(self.error("unterminated string literal", pos)),
            c => {
                value.push(c);
                self.advance();
            }
        }
        Ok(())
    }

    /// For `\uXXXX`: a high surrogate must be completed by `\uXXXX` with a
    /// low surrogate
    fn combine_surrogate(&mut self, code: u32, pos: Position) -> Result<u32, SyntaxError> {
        if !(0xD800..=0xDBFF).contains(&code) {
            return Ok(code);
        }
        if self.ch() == '\\' && self.peek(1) == 'u' {
            self.advance();
            self.advance();
            let low = self.read_hex_digits(4, pos)?;
            if (0xDC00..=0xDFFF).contains(&low) {
                return Ok(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00));
            }
        }
        Err(self.error("invalid Unicode surrogate pair", pos))
    }

    fn read_hex_digits(&mut self, n: usize, pos: Position) -> Result<u32, SyntaxError> {
        let mut code = 0u32;
        for _ in 0..n {
            let c = self.ch();
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.error("invalid Unicode escape value", pos))?;
            code = code * 16 + digit;
            self.advance();
        }
        Ok(code)
    }

    /// Read a `b'...'` or `x'...'` bit string; the prefix is kept in the
    /// literal so the printer can reproduce it
    fn read_bit_string(&mut self, pos: Position, prefix: char) -> Result<Token, SyntaxError> {
        self.advance(); // prefix letter
        self.advance(); // opening quote
        let mut literal = String::new();
        literal.push(prefix);
        loop {
            match self.ch() {
                '\0' => return Err(self.error("unterminated bit string literal", pos)),
                '\'' => {
                    self.advance();
                    break;
                }
                c if prefix == 'b' && (c == '0' || c == '1') => {
                    literal.push(c);
                    self.advance();
                }
                c if prefix == 'x' && c.is_ascii_hexdigit() => {
                    literal.push(c);
                    self.advance();
                }
                c => {
                    return Err(self.error(
                        format!(
                            "{:?} is not a valid {} digit",
                            c,
                            if prefix == 'b' { "binary" } else { "hexadecimal" }
                        ),
                        pos,
                    ))
                }
            }
        }
        Ok(Token::new(TokenType::BitString, literal, pos))
    }

    /// Read a `u&'...'` string or `u&"..."` identifier, cursor on the quote
    fn read_unicode_string(&mut self, pos: Position, quote: char) -> Result<Token, SyntaxError> {
        self.advance(); // opening quote
        let mut raw = String::new();
        loop {
            match self.ch() {
                '\0' => return Err(self.error("unterminated quoted string", pos)),
                c if c == quote => {
                    if self.peek(1) == quote {
                        raw.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        break;
                    }
                }
                c => {
                    raw.push(c);
                    self.advance();
                }
            }
        }

        let escape = self.read_uescape_clause()?;
        let value = decode_unicode_escapes(&raw, escape, pos)?;

        if quote == '"' {
            if value.is_empty() {
                return Err(self.error("zero-length delimited identifier", pos));
            }
            Ok(Token::new(TokenType::Identifier, value, pos))
        } else {
            Ok(Token::new(TokenType::String, value, pos))
        }
    }

    /// Look ahead for `uescape 'c'` after a unicode literal
    fn read_uescape_clause(&mut self) -> Result<char, SyntaxError> {
        let mark = self.mark();
        while self.ch().is_whitespace() {
            self.advance();
        }
        let word_start = self.mark();
        if !is_identifier_start(self.ch()) {
            self.reset(mark);
            return Ok('\\');
        }
        let word = self.read_identifier_word();
        if !word.eq_ignore_ascii_case("uescape") {
            self.reset(mark);
            return Ok('\\');
        }
        while self.ch().is_whitespace() {
            self.advance();
        }
        if self.ch() != '\'' {
            return Err(self.error("uescape must be followed by a quoted escape character", word_start.1));
        }
        let mut body = String::new();
        let quote_pos = self.pos;
        self.read_quoted_body(&mut body, quote_pos)?;
        let mut chars = body.chars();
        let escape = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(self.error("invalid Unicode escape character", quote_pos)),
        };
        if escape.is_ascii_hexdigit()
            || escape.is_whitespace()
            || matches!(escape, '+' | '\'' | '"')
        {
            return Err(self.error("invalid Unicode escape character", quote_pos));
        }
        Ok(escape)
    }

    /// Read a dollar-quoted string `$tag$...$tag$`
    fn read_dollar_string(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        self.advance(); // leading $
        let mut tag = String::new();
        while is_identifier_cont(self.ch()) && self.ch() != '$' {
            tag.push(self.ch());
            self.advance();
        }
        if self.ch() != '$' {
            return Err(self.error("unexpected character '$'", pos));
        }
        self.advance(); // $ closing the opening tag

        let closer: Vec<char> = format!("${}$", tag).chars().collect();
        let mut value = String::new();
        loop {
            if self.ch() == '\0' {
                return Err(self.error("unterminated dollar-quoted string", pos));
            }
            if self.ch() == '$' {
                let mut matched = true;
                for (n, &cc) in closer.iter().enumerate() {
                    if self.peek(n) != cc {
                        matched = false;
                        break;
                    }
                }
                if matched {
                    for _ in 0..closer.len() {
                        self.advance();
                    }
                    return Ok(Token::new(TokenType::String, value, pos));
                }
            }
            value.push(self.ch());
            self.advance();
        }
    }

    /// Read a `"..."` identifier with `""` doubling
    fn read_quoted_identifier(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.ch() {
                '\0' => return Err(self.error("unterminated quoted identifier", pos)),
                '"' => {
                    if self.peek(1) == '"' {
                        value.push('"');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        break;
                    }
                }
                c => {
                    value.push(c);
                    self.advance();
                }
            }
        }
        if value.is_empty() {
            return Err(self.error("zero-length delimited identifier", pos));
        }
        Ok(Token::new(TokenType::Identifier, value, pos))
    }

    /// Longest-match operator scan with the PostgreSQL tail rule
    fn read_operator(&mut self, pos: Position) -> Result<Token, SyntaxError> {
        let mark = self.mark();
        let mut run = String::new();
        loop {
            let c = self.ch();
            if !is_operator_char(c) {
                break;
            }
            // a comment start always ends the operator
            if (c == '-' && self.peek(1) == '-') || (c == '/' && self.peek(1) == '*') {
                break;
            }
            run.push(c);
            self.advance();
        }

        // An operator ending in + or - must contain an extended character;
        // otherwise trailing + and - split off as separate operators.
        let has_extended = run.chars().any(is_extended_operator_char);
        let mut keep = run.len();
        if !has_extended {
            while keep > 1 {
                let last = run[..keep].chars().last().unwrap();
                if last == '+' || last == '-' {
                    keep -= 1;
                } else {
                    break;
                }
            }
        }
        if keep < run.len() {
            self.reset(mark);
            for _ in 0..keep {
                self.advance();
            }
            run.truncate(keep);
        }

        if run.is_empty() {
            return Err(self.error("unexpected operator character", pos));
        }

        // != is an alternative spelling of <>
        if run == "!=" {
            run = "<>".to_string();
        }
        Ok(Token::new(TokenType::Operator, run, pos))
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || (c as u32) > 127
}

fn is_identifier_cont(c: char) -> bool {
    c == '_' || c == '$' || c.is_ascii_alphanumeric() || (c as u32) > 127
}

fn char_from_code(code: u32, pos: Position) -> Result<char, SyntaxError> {
    char::from_u32(code).ok_or_else(|| SyntaxError::new("invalid Unicode escape value", pos))
}

/// Decode `\XXXX` / `\+XXXXXX` escapes in a unicode literal body
fn decode_unicode_escapes(
    raw: &str,
    escape: char,
    pos: Position,
) -> Result<String, SyntaxError> {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != escape {
            out.push(c);
            i += 1;
            continue;
        }
        if i + 1 < chars.len() && chars[i + 1] == escape {
            out.push(escape);
            i += 2;
            continue;
        }
        let (code, consumed) = read_unicode_value(&chars, i + 1, pos)?;
        i += 1 + consumed;
        let code = if (0xD800..=0xDBFF).contains(&code) {
            if i < chars.len() && chars[i] == escape {
                let (low, low_consumed) = read_unicode_value(&chars, i + 1, pos)?;
                i += 1 + low_consumed;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(SyntaxError::new("invalid Unicode surrogate pair", pos));
                }
                0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00)
            } else {
                return Err(SyntaxError::new("invalid Unicode surrogate pair", pos));
            }
        } else {
            code
        };
        out.push(char_from_code(code, pos)?);
    }
    Ok(out)
}

/// Read `XXXX` or `+XXXXXX` starting at `start`; returns (code, consumed)
fn read_unicode_value(
    chars: &[char],
    start: usize,
    pos: Position,
) -> Result<(u32, usize), SyntaxError> {
    let (digits, offset) = if chars.get(start) == Some(&'+') {
        (6, 1)
    } else {
        (4, 0)
    };
    let mut code = 0u32;
    for n in 0..digits {
        let c = chars
            .get(start + offset + n)
            .ok_or_else(|| SyntaxError::new("invalid Unicode escape value", pos))?;
        let digit = c
            .to_digit(16)
            .ok_or_else(|| SyntaxError::new("invalid Unicode escape value", pos))?;
        code = code * 16 + digit;
    }
    Ok((code, offset + digits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::KeywordClass;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::tokenize(input).unwrap()
    }

    fn kinds(input: &str) -> Vec<TokenType> {
        lex(input).into_iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_simple_select() {
        let tokens = lex("SELECT * FROM users");
        assert_eq!(
            tokens[0].token_type,
            TokenType::Keyword(KeywordClass::Reserved)
        );
        assert_eq!(tokens[0].literal, "select");
        assert!(tokens[1].is_operator("*"));
        assert!(tokens[2].is_keyword("from"));
        assert_eq!(tokens[3].token_type, TokenType::Identifier);
        assert_eq!(tokens[3].literal, "users");
        assert!(tokens[4].is_eof());
    }

    #[test]
    fn test_case_folding() {
        let tokens = lex("Users UNIQUE_thing \"MiXeD\"");
        assert_eq!(tokens[0].literal, "users");
        assert_eq!(tokens[1].literal, "unique_thing");
        assert_eq!(tokens[2].literal, "MiXeD");
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("123 45.67 .5 5. 3.14e10 1E-3 1e");
        assert_eq!(tokens[0].token_type, TokenType::Integer);
        assert_eq!(tokens[0].literal, "123");
        assert_eq!(tokens[1].token_type, TokenType::Float);
        assert_eq!(tokens[1].literal, "45.67");
        assert_eq!(tokens[2].token_type, TokenType::Float);
        assert_eq!(tokens[2].literal, ".5");
        assert_eq!(tokens[3].token_type, TokenType::Float);
        assert_eq!(tokens[3].literal, "5.");
        assert_eq!(tokens[4].literal, "3.14e10");
        assert_eq!(tokens[5].literal, "1e-3");
        // `1e` is an integer followed by an identifier
        assert_eq!(tokens[6].token_type, TokenType::Integer);
        assert_eq!(tokens[7].literal, "e");
    }

    #[test]
    fn test_standard_strings() {
        let tokens = lex("'hello' 'it''s' 'back\\slash'");
        assert_eq!(tokens[0].literal, "hello");
        assert_eq!(tokens[1].literal, "it's");
        // no backslash processing in standard strings
        assert_eq!(tokens[2].literal, "back\\slash");
    }

    #[test]
    fn test_string_concatenation_across_newline() {
        let tokens = lex("'foo'\n  'bar'");
        assert_eq!(tokens[0].literal, "foobar");
        assert!(tokens[1].is_eof());

        // no newline, no concatenation
        let tokens = lex("'foo' 'bar'");
        assert_eq!(tokens[0].literal, "foo");
        assert_eq!(tokens[1].literal, "bar");
    }

    #[test]
    fn test_extended_strings() {
        let tokens = lex(r#"e'a\nb' E'\t' e'\x41' e'\101' e'слон'"#);
        assert_eq!(tokens[0].literal, "a\nb");
        assert_eq!(tokens[1].literal, "\t");
        assert_eq!(tokens[2].literal, "A");
        assert_eq!(tokens[3].literal, "A");
        assert_eq!(tokens[4].literal, "слон");
    }

    #[test]
    fn test_extended_string_surrogate_pair() {
        let tokens = lex("e'\\ud83d\\ude03'");
        assert_eq!(tokens[0].literal, "\u{1F603}");
    }

    #[test]
    fn test_unicode_strings() {
        let tokens = lex(r#"U&'d\0061t\+000061' u&'d!0061t!+000061' uescape '!'"#);
        assert_eq!(tokens[0].literal, "data");
        assert_eq!(tokens[1].literal, "data");
    }

    #[test]
    fn test_unicode_identifier() {
        let tokens = lex(r#"U&"d\0061t\+000061""#);
        assert_eq!(tokens[0].token_type, TokenType::Identifier);
        assert_eq!(tokens[0].literal, "data");
    }

    #[test]
    fn test_invalid_unicode_escape() {
        assert!(Lexer::tokenize(r"u&'\00zz'").is_err());
        assert!(Lexer::tokenize(r"u&'\d800'").is_err());
    }

    #[test]
    fn test_dollar_strings() {
        let tokens = lex("$$plain$$ $tag$with $$ inside$tag$ $_x$y$_x$");
        assert_eq!(tokens[0].literal, "plain");
        assert_eq!(tokens[1].literal, "with $$ inside");
        assert_eq!(tokens[2].literal, "y");
    }

    #[test]
    fn test_unterminated_dollar_string() {
        assert!(Lexer::tokenize("$$never ends").is_err());
    }

    #[test]
    fn test_bit_strings() {
        let tokens = lex("b'0101' X'1FAb'");
        assert_eq!(tokens[0].token_type, TokenType::BitString);
        assert_eq!(tokens[0].literal, "b0101");
        assert_eq!(tokens[1].literal, "x1FAb");
        assert!(Lexer::tokenize("b'012'").is_err());
        assert!(Lexer::tokenize("x'fg'").is_err());
    }

    #[test]
    fn test_operators() {
        let tokens = lex("= <> != <= >= || @> #- ~~ ^");
        let lits: Vec<&str> = tokens[..10].iter().map(|t| t.literal.as_str()).collect();
        // != normalizes to <>
        assert_eq!(lits, ["=", "<>", "<>", "<=", ">=", "||", "@>", "#-", "~~", "^"]);
        for t in &tokens[..10] {
            assert_eq!(t.token_type, TokenType::Operator);
        }
    }

    #[test]
    fn test_operator_plus_minus_rule() {
        // *- may not end in -, so it splits into * and -
        let tokens = lex("1 *- 2");
        assert!(tokens[1].is_operator("*"));
        assert!(tokens[2].is_operator("-"));
        // @- contains @, so it stays one operator
        let tokens = lex("1 @- 2");
        assert!(tokens[1].is_operator("@-"));
    }

    #[test]
    fn test_punctuators() {
        let tokens = lex("( ) [ ] , ; . .. : ::");
        let lits: Vec<&str> = tokens[..10].iter().map(|t| t.literal.as_str()).collect();
        assert_eq!(lits, ["(", ")", "[", "]", ",", ";", ".", "..", ":", "::"]);
        for t in &tokens[..10] {
            assert_eq!(t.token_type, TokenType::Punctuator);
        }
    }

    #[test]
    fn test_parameters() {
        let tokens = lex("$1 $23 :name :_x");
        assert_eq!(tokens[0].token_type, TokenType::PositionalParam);
        assert_eq!(tokens[0].literal, "1");
        assert_eq!(tokens[1].literal, "23");
        assert_eq!(tokens[2].token_type, TokenType::NamedParam);
        assert_eq!(tokens[2].literal, "name");
        assert_eq!(tokens[3].literal, "_x");
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("select -- trailing comment\n 1"),
            vec![
                TokenType::Keyword(KeywordClass::Reserved),
                TokenType::Integer,
                TokenType::Eof
            ]
        );
        assert_eq!(
            kinds("select /* one /* nested */ two */ 1"),
            vec![
                TokenType::Keyword(KeywordClass::Reserved),
                TokenType::Integer,
                TokenType::Eof
            ]
        );
        assert!(Lexer::tokenize("/* never closed").is_err());
    }

    #[test]
    fn test_double_dash_is_always_comment() {
        let tokens = lex("select 5--3");
        assert_eq!(tokens[1].literal, "5");
        assert!(tokens[2].is_eof());
    }

    #[test]
    fn test_position_tracking() {
        let tokens = lex("select\n  foo");
        assert_eq!(tokens[0].position, Position::new(0, 1, 1));
        assert_eq!(tokens[1].position, Position::new(9, 2, 3));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::tokenize("select 'never").unwrap_err();
        assert!(err.message.contains("unterminated"));
        assert_eq!(err.position.offset, 7);
    }

    #[test]
    fn test_empty_quoted_identifier() {
        assert!(Lexer::tokenize("select \"\"").is_err());
    }
}
