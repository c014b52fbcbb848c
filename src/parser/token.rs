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

//! Token types for the SQL lexer
//!
//! Keywords are classified into the four PostgreSQL keyword classes at lex
//! time; the parser decides per production which classes are acceptable as
//! identifiers.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

/// Position represents a position in the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset, starting at 0
    pub offset: usize,
    /// Line number, starting at 1
    pub line: usize,
    /// Column number, starting at 1
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// PostgreSQL keyword class
///
/// Mirrors the four classes of the server's keyword list: unreserved
/// keywords can appear anywhere an identifier can, column-name keywords can
/// name columns and types but not functions, type-or-function-name keywords
/// the reverse, and reserved keywords need quoting everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordClass {
    Unreserved,
    ColName,
    TypeFuncName,
    Reserved,
}

/// TokenType represents the type of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// End of input
    Eof,
    /// Identifier, already case-folded (unquoted) or verbatim (quoted)
    Identifier,
    /// SQL keyword with its class; literal is the canonical lowercase form
    Keyword(KeywordClass),
    /// String literal, value fully de-escaped
    String,
    /// Binary or hex bit-string literal; literal keeps the `b`/`x` prefix
    BitString,
    /// Integer number
    Integer,
    /// Floating point or decimal number
    Float,
    /// Operator, including the canonical inequalities `<=` `>=` `<>`
    Operator,
    /// Punctuator: `( ) [ ] , ; . .. : ::`
    Punctuator,
    /// Positional parameter `$N`; literal is the digits
    PositionalParam,
    /// Named parameter `:name`; literal is the name
    NamedParam,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Eof => write!(f, "end of input"),
            TokenType::Identifier => write!(f, "identifier"),
            TokenType::Keyword(_) => write!(f, "keyword"),
            TokenType::String => write!(f, "string literal"),
            TokenType::BitString => write!(f, "bit string literal"),
            TokenType::Integer => write!(f, "integer literal"),
            TokenType::Float => write!(f, "numeric literal"),
            TokenType::Operator => write!(f, "operator"),
            TokenType::Punctuator => write!(f, "punctuator"),
            TokenType::PositionalParam => write!(f, "positional parameter"),
            TokenType::NamedParam => write!(f, "named parameter"),
        }
    }
}

/// Token represents a lexical token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of the token
    pub token_type: TokenType,
    /// The literal (for strings: the de-escaped value)
    pub literal: String,
    /// The position in the source
    pub position: Position,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: TokenType, literal: impl Into<String>, position: Position) -> Self {
        Self {
            token_type,
            literal: literal.into(),
            position,
        }
    }

    /// Create an EOF token
    pub fn eof(position: Position) -> Self {
        Self {
            token_type: TokenType::Eof,
            literal: String::new(),
            position,
        }
    }

    /// Check if this is an EOF token
    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }

    /// Check if this is a keyword (any class) with the given lowercase value
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self.token_type, TokenType::Keyword(_)) && self.literal == keyword
    }

    /// Check if this is an operator with the given value
    pub fn is_operator(&self, op: &str) -> bool {
        self.token_type == TokenType::Operator && self.literal == op
    }

    /// Check if this is a punctuator with the given value
    pub fn is_punctuator(&self, punct: &str) -> bool {
        self.token_type == TokenType::Punctuator && self.literal == punct
    }

    /// True when the token may serve as a column or table name: a plain
    /// identifier or any keyword outside the reserved and type/func classes
    pub fn can_be_col_name(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Identifier
                | TokenType::Keyword(KeywordClass::Unreserved)
                | TokenType::Keyword(KeywordClass::ColName)
        )
    }

    /// True when the token may serve as a function or type name
    pub fn can_be_type_func_name(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Identifier
                | TokenType::Keyword(KeywordClass::Unreserved)
                | TokenType::Keyword(KeywordClass::TypeFuncName)
        )
    }

    /// True when the token may follow a value as a bare alias (no AS).
    /// Only plain identifiers and column-name keywords are safe here.
    pub fn can_be_bare_alias(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Identifier | TokenType::Keyword(KeywordClass::ColName)
        )
    }

    /// A short rendering for error messages
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::Eof => "end of input".to_string(),
            TokenType::String => format!("string '{}'", self.literal),
            _ => format!("'{}'", self.literal),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' at {}",
            self.token_type, self.literal, self.position
        )
    }
}

/// SQL keywords with their PostgreSQL classes, canonical lowercase
pub static KEYWORDS: &[(&str, KeywordClass)] = &[
    ("all", KeywordClass::Reserved),
    ("analyse", KeywordClass::Reserved),
    ("analyze", KeywordClass::Reserved),
    ("and", KeywordClass::Reserved),
    ("any", KeywordClass::Reserved),
    ("array", KeywordClass::Reserved),
    ("as", KeywordClass::Reserved),
    ("asc", KeywordClass::Reserved),
    ("asymmetric", KeywordClass::Reserved),
    ("at", KeywordClass::Unreserved),
    ("authorization", KeywordClass::TypeFuncName),
    ("between", KeywordClass::ColName),
    ("bigint", KeywordClass::ColName),
    ("binary", KeywordClass::TypeFuncName),
    ("bit", KeywordClass::ColName),
    ("boolean", KeywordClass::ColName),
    ("both", KeywordClass::Reserved),
    ("by", KeywordClass::Unreserved),
    ("cascade", KeywordClass::Unreserved),
    ("case", KeywordClass::Reserved),
    ("cast", KeywordClass::Reserved),
    ("char", KeywordClass::ColName),
    ("character", KeywordClass::ColName),
    ("check", KeywordClass::Reserved),
    ("coalesce", KeywordClass::ColName),
    ("collate", KeywordClass::Reserved),
    ("collation", KeywordClass::TypeFuncName),
    ("column", KeywordClass::Reserved),
    ("columns", KeywordClass::Unreserved),
    ("concurrently", KeywordClass::TypeFuncName),
    ("conflict", KeywordClass::Unreserved),
    ("constraint", KeywordClass::Reserved),
    ("content", KeywordClass::Unreserved),
    ("create", KeywordClass::Reserved),
    ("cross", KeywordClass::TypeFuncName),
    ("cube", KeywordClass::Unreserved),
    ("current", KeywordClass::Unreserved),
    ("current_catalog", KeywordClass::Reserved),
    ("current_date", KeywordClass::Reserved),
    ("current_role", KeywordClass::Reserved),
    ("current_schema", KeywordClass::TypeFuncName),
    ("current_time", KeywordClass::Reserved),
    ("current_timestamp", KeywordClass::Reserved),
    ("current_user", KeywordClass::Reserved),
    ("day", KeywordClass::Unreserved),
    ("dec", KeywordClass::ColName),
    ("decimal", KeywordClass::ColName),
    ("default", KeywordClass::Reserved),
    ("deferrable", KeywordClass::Reserved),
    ("delete", KeywordClass::Unreserved),
    ("desc", KeywordClass::Reserved),
    ("distinct", KeywordClass::Reserved),
    ("do", KeywordClass::Reserved),
    ("document", KeywordClass::Unreserved),
    ("double", KeywordClass::Unreserved),
    ("else", KeywordClass::Reserved),
    ("end", KeywordClass::Reserved),
    ("escape", KeywordClass::Unreserved),
    ("except", KeywordClass::Reserved),
    ("exists", KeywordClass::ColName),
    ("extract", KeywordClass::ColName),
    ("false", KeywordClass::Reserved),
    ("fetch", KeywordClass::Reserved),
    ("filter", KeywordClass::Unreserved),
    ("first", KeywordClass::Unreserved),
    ("float", KeywordClass::ColName),
    ("following", KeywordClass::Unreserved),
    ("for", KeywordClass::Reserved),
    ("foreign", KeywordClass::Reserved),
    ("freeze", KeywordClass::TypeFuncName),
    ("from", KeywordClass::Reserved),
    ("full", KeywordClass::TypeFuncName),
    ("grant", KeywordClass::Reserved),
    ("greatest", KeywordClass::ColName),
    ("group", KeywordClass::Reserved),
    ("grouping", KeywordClass::ColName),
    ("having", KeywordClass::Reserved),
    ("hour", KeywordClass::Unreserved),
    ("ilike", KeywordClass::TypeFuncName),
    ("in", KeywordClass::Reserved),
    ("initially", KeywordClass::Reserved),
    ("inner", KeywordClass::TypeFuncName),
    ("insert", KeywordClass::Unreserved),
    ("int", KeywordClass::ColName),
    ("integer", KeywordClass::ColName),
    ("intersect", KeywordClass::Reserved),
    ("interval", KeywordClass::ColName),
    ("into", KeywordClass::Reserved),
    ("is", KeywordClass::TypeFuncName),
    ("isnull", KeywordClass::TypeFuncName),
    ("join", KeywordClass::TypeFuncName),
    ("key", KeywordClass::Unreserved),
    ("last", KeywordClass::Unreserved),
    ("lateral", KeywordClass::Reserved),
    ("leading", KeywordClass::Reserved),
    ("least", KeywordClass::ColName),
    ("left", KeywordClass::TypeFuncName),
    ("like", KeywordClass::TypeFuncName),
    ("limit", KeywordClass::Reserved),
    ("localtime", KeywordClass::Reserved),
    ("localtimestamp", KeywordClass::Reserved),
    ("locked", KeywordClass::Unreserved),
    ("minute", KeywordClass::Unreserved),
    ("month", KeywordClass::Unreserved),
    ("name", KeywordClass::Unreserved),
    ("national", KeywordClass::ColName),
    ("natural", KeywordClass::TypeFuncName),
    ("nchar", KeywordClass::ColName),
    ("next", KeywordClass::Unreserved),
    ("no", KeywordClass::Unreserved),
    ("none", KeywordClass::ColName),
    ("not", KeywordClass::Reserved),
    ("nothing", KeywordClass::Unreserved),
    ("notnull", KeywordClass::TypeFuncName),
    ("nowait", KeywordClass::Unreserved),
    ("null", KeywordClass::Reserved),
    ("nullif", KeywordClass::ColName),
    ("nulls", KeywordClass::Unreserved),
    ("numeric", KeywordClass::ColName),
    ("of", KeywordClass::Unreserved),
    ("offset", KeywordClass::Reserved),
    ("on", KeywordClass::Reserved),
    ("only", KeywordClass::Reserved),
    ("or", KeywordClass::Reserved),
    ("order", KeywordClass::Reserved),
    ("ordinality", KeywordClass::Unreserved),
    ("outer", KeywordClass::TypeFuncName),
    ("over", KeywordClass::Unreserved),
    ("overlaps", KeywordClass::TypeFuncName),
    ("overlay", KeywordClass::ColName),
    ("overriding", KeywordClass::Unreserved),
    ("partition", KeywordClass::Unreserved),
    ("passing", KeywordClass::Unreserved),
    ("placing", KeywordClass::Reserved),
    ("position", KeywordClass::ColName),
    ("preceding", KeywordClass::Unreserved),
    ("precision", KeywordClass::ColName),
    ("preserve", KeywordClass::Unreserved),
    ("primary", KeywordClass::Reserved),
    ("range", KeywordClass::Unreserved),
    ("real", KeywordClass::ColName),
    ("recursive", KeywordClass::Unreserved),
    ("ref", KeywordClass::Unreserved),
    ("references", KeywordClass::Reserved),
    ("repeatable", KeywordClass::Unreserved),
    ("returning", KeywordClass::Reserved),
    ("right", KeywordClass::TypeFuncName),
    ("rollup", KeywordClass::Unreserved),
    ("row", KeywordClass::ColName),
    ("rows", KeywordClass::Unreserved),
    ("second", KeywordClass::Unreserved),
    ("select", KeywordClass::Reserved),
    ("session_user", KeywordClass::Reserved),
    ("set", KeywordClass::Unreserved),
    ("setof", KeywordClass::ColName),
    ("sets", KeywordClass::Unreserved),
    ("share", KeywordClass::Unreserved),
    ("similar", KeywordClass::TypeFuncName),
    ("skip", KeywordClass::Unreserved),
    ("smallint", KeywordClass::ColName),
    ("some", KeywordClass::Reserved),
    ("standalone", KeywordClass::Unreserved),
    ("strip", KeywordClass::Unreserved),
    ("substring", KeywordClass::ColName),
    ("symmetric", KeywordClass::Reserved),
    ("system", KeywordClass::Unreserved),
    ("table", KeywordClass::Reserved),
    ("tablesample", KeywordClass::TypeFuncName),
    ("then", KeywordClass::Reserved),
    ("time", KeywordClass::ColName),
    ("timestamp", KeywordClass::ColName),
    ("to", KeywordClass::Reserved),
    ("trailing", KeywordClass::Reserved),
    ("treat", KeywordClass::ColName),
    ("trim", KeywordClass::ColName),
    ("true", KeywordClass::Reserved),
    ("uescape", KeywordClass::Unreserved),
    ("unbounded", KeywordClass::Unreserved),
    ("union", KeywordClass::Reserved),
    ("unique", KeywordClass::Reserved),
    ("unknown", KeywordClass::Unreserved),
    ("update", KeywordClass::Unreserved),
    ("user", KeywordClass::Reserved),
    ("using", KeywordClass::Reserved),
    ("value", KeywordClass::Unreserved),
    ("values", KeywordClass::ColName),
    ("varchar", KeywordClass::ColName),
    ("variadic", KeywordClass::Reserved),
    ("varying", KeywordClass::Unreserved),
    ("verbose", KeywordClass::TypeFuncName),
    ("version", KeywordClass::Unreserved),
    ("view", KeywordClass::Unreserved),
    ("when", KeywordClass::Reserved),
    ("where", KeywordClass::Reserved),
    ("whitespace", KeywordClass::Unreserved),
    ("window", KeywordClass::Reserved),
    ("with", KeywordClass::Reserved),
    ("within", KeywordClass::Unreserved),
    ("without", KeywordClass::Unreserved),
    ("xmlattributes", KeywordClass::ColName),
    ("xmlconcat", KeywordClass::ColName),
    ("xmlelement", KeywordClass::ColName),
    ("xmlexists", KeywordClass::ColName),
    ("xmlforest", KeywordClass::ColName),
    ("xmlnamespaces", KeywordClass::ColName),
    ("xmlparse", KeywordClass::ColName),
    ("xmlpi", KeywordClass::ColName),
    ("xmlroot", KeywordClass::ColName),
    ("xmlserialize", KeywordClass::ColName),
    ("xmltable", KeywordClass::ColName),
    ("year", KeywordClass::Unreserved),
    ("yes", KeywordClass::Unreserved),
    ("zone", KeywordClass::Unreserved),
];

/// Compiled keyword map for O(1) lookups
static KEYWORD_MAP: LazyLock<FxHashMap<&'static str, KeywordClass>> = LazyLock::new(|| {
    let mut map = FxHashMap::with_capacity_and_hasher(KEYWORDS.len(), Default::default());
    for (kw, class) in KEYWORDS {
        map.insert(*kw, *class);
    }
    map
});

/// Look up the keyword class for an already-lowercased word
#[inline]
pub fn keyword_class(word: &str) -> Option<KeywordClass> {
    KEYWORD_MAP.get(word).copied()
}

/// Check if a lowercase word is any kind of SQL keyword
#[inline]
pub fn is_keyword_word(word: &str) -> bool {
    KEYWORD_MAP.contains_key(word)
}

/// Characters that can form an operator
pub fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-'
            | '*'
            | '/'
            | '<'
            | '>'
            | '='
            | '~'
            | '!'
            | '@'
            | '#'
            | '%'
            | '^'
            | '&'
            | '|'
            | '`'
            | '?'
    )
}

/// Characters an operator ending in `+` or `-` must contain at least one of
pub fn is_extended_operator_char(c: char) -> bool {
    matches!(
        c,
        '~' | '!' | '@' | '#' | '%' | '^' | '&' | '|' | '`' | '?'
    )
}

/// Single-character punctuators
pub fn is_punctuator_char(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | ',' | ';' | '.' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        let pos = Position::new(10, 2, 5);
        assert_eq!(pos.to_string(), "line 2, column 5");
    }

    #[test]
    fn test_keyword_classes() {
        assert_eq!(keyword_class("select"), Some(KeywordClass::Reserved));
        assert_eq!(keyword_class("between"), Some(KeywordClass::ColName));
        assert_eq!(keyword_class("inner"), Some(KeywordClass::TypeFuncName));
        assert_eq!(keyword_class("rollup"), Some(KeywordClass::Unreserved));
        assert_eq!(keyword_class("frobnicate"), None);
        // lookup is over lowercase canonical forms only
        assert_eq!(keyword_class("SELECT"), None);
    }

    #[test]
    fn test_token_class_checks() {
        let pos = Position::default();
        let ident = Token::new(TokenType::Identifier, "foo", pos);
        assert!(ident.can_be_col_name());
        assert!(ident.can_be_type_func_name());
        assert!(ident.can_be_bare_alias());

        let reserved = Token::new(TokenType::Keyword(KeywordClass::Reserved), "select", pos);
        assert!(!reserved.can_be_col_name());
        assert!(!reserved.can_be_bare_alias());

        let colname = Token::new(TokenType::Keyword(KeywordClass::ColName), "between", pos);
        assert!(colname.can_be_col_name());
        assert!(colname.can_be_bare_alias());
        assert!(!colname.can_be_type_func_name());

        let tfn = Token::new(TokenType::Keyword(KeywordClass::TypeFuncName), "left", pos);
        assert!(tfn.can_be_type_func_name());
        assert!(!tfn.can_be_col_name());
    }

    #[test]
    fn test_token_predicates() {
        let pos = Position::default();
        let tok = Token::new(TokenType::Keyword(KeywordClass::Reserved), "select", pos);
        assert!(tok.is_keyword("select"));
        assert!(!tok.is_keyword("from"));

        let op = Token::new(TokenType::Operator, "<>", pos);
        assert!(op.is_operator("<>"));

        let punct = Token::new(TokenType::Punctuator, "::", pos);
        assert!(punct.is_punctuator("::"));

        assert!(Token::eof(pos).is_eof());
    }

    #[test]
    fn test_operator_chars() {
        assert!(is_operator_char('='));
        assert!(is_operator_char('~'));
        assert!(is_operator_char('`'));
        assert!(!is_operator_char('('));
        assert!(is_extended_operator_char('@'));
        assert!(!is_extended_operator_char('+'));
        assert!(is_punctuator_char(';'));
    }
}
