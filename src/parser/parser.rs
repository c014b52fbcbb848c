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

//! SQL Parser - public entry points and the token cursor
//!
//! [`Parser`] is a tiny reusable configuration value; every parse call
//! lexes its input eagerly and drives a fresh [`ParseContext`] over the
//! token vector. The context cursor can be marked and reset, which covers
//! the few grammar spots that need backtracking (function call vs type
//! name with modifiers, `row`-keyword forms, alias lookahead).

use super::ast::*;
use super::lexer::Lexer;
use super::precedence::PrecedenceMode;
use super::token::Token;
use crate::error::{Result, SyntaxError};

/// A reusable, stateless SQL parser
///
/// Cheap to copy; the only configuration is the operator precedence era.
/// A `Parser` can be attached to [`NodeList`]s so that list elements can
/// be given as raw SQL fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Parser {
    mode: PrecedenceMode,
}

impl Parser {
    /// Create a parser with current (9.5+) operator precedence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser for the given precedence era
    pub fn with_mode(mode: PrecedenceMode) -> Self {
        Self { mode }
    }

    /// The configured precedence era
    pub fn mode(&self) -> PrecedenceMode {
        self.mode
    }

    /// Parse one complete statement; a trailing semicolon is accepted
    pub fn parse_statement(&self, sql: &str) -> Result<Statement> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let statement = cx.parse_statement()?;
        cx.eat_punctuator(";");
        cx.expect_eof()?;
        Ok(statement)
    }

    /// Parse a semicolon-separated script into its statements
    pub fn parse_statements(&self, sql: &str) -> Result<Vec<Statement>> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let mut statements = Vec::new();
        while !cx.cur().is_eof() {
            statements.push(cx.parse_statement()?);
            if !cx.eat_punctuator(";") {
                break;
            }
            while cx.eat_punctuator(";") {}
        }
        cx.expect_eof()?;
        Ok(statements)
    }

    /// Parse a SELECT or VALUES statement, including set operations
    pub fn parse_select_statement(&self, sql: &str) -> Result<SelectQuery> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let query = cx.parse_select_query()?;
        cx.eat_punctuator(";");
        cx.expect_eof()?;
        Ok(query)
    }

    /// Parse a scalar expression
    pub fn parse_expression(&self, sql: &str) -> Result<Expression> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let expression = cx.parse_a_expr()?;
        cx.expect_eof()?;
        Ok(expression)
    }

    /// Parse a comma-separated target list (`expr [as alias], ...`)
    pub fn parse_target_list(&self, sql: &str) -> Result<TargetList> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let list = cx.parse_target_list()?;
        cx.expect_eof()?;
        Ok(list)
    }

    /// Parse a single target element
    pub fn parse_target_element(&self, sql: &str) -> Result<TargetElement> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let element = cx.parse_target_element()?;
        cx.expect_eof()?;
        Ok(element)
    }

    /// Parse a comma-separated FROM list
    pub fn parse_from_list(&self, sql: &str) -> Result<FromList> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let list = cx.parse_from_list()?;
        cx.expect_eof()?;
        Ok(list)
    }

    /// Parse a single FROM item
    pub fn parse_from_item(&self, sql: &str) -> Result<FromItem> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let item = cx.parse_from_item()?;
        cx.expect_eof()?;
        Ok(item)
    }

    /// Parse an ORDER BY list (without the leading keywords)
    pub fn parse_order_by_list(&self, sql: &str) -> Result<OrderByList> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let list = cx.parse_order_by_list()?;
        cx.expect_eof()?;
        Ok(list)
    }

    /// Parse a comma-separated list of scalar expressions
    pub fn parse_expression_list(&self, sql: &str) -> Result<ExpressionList> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let mut elements = vec![cx.parse_a_expr()?];
        while cx.eat_punctuator(",") {
            elements.push(cx.parse_a_expr()?);
        }
        cx.expect_eof()?;
        Ok(NodeList::with_parser(elements, *self))
    }

    /// Parse a GROUP BY list (without the leading keywords)
    pub fn parse_group_by_list(&self, sql: &str) -> Result<Vec<GroupByItem>> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let list = cx.parse_group_by_list()?;
        cx.expect_eof()?;
        Ok(list)
    }

    /// Parse a settable column (`name` plus optional indirection)
    pub fn parse_set_target_element(&self, sql: &str) -> Result<SetTargetElement> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let element = cx.parse_set_target_element()?;
        cx.expect_eof()?;
        Ok(element)
    }

    /// Parse an insert column list
    pub fn parse_insert_target_list(&self, sql: &str) -> Result<InsertTargetList> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let mut elements = vec![cx.parse_set_target_element()?];
        while cx.eat_punctuator(",") {
            elements.push(cx.parse_set_target_element()?);
        }
        cx.expect_eof()?;
        Ok(NodeList::with_parser(elements, *self))
    }

    /// Parse an UPDATE set clause list (`a = 1, (b, c) = (2, 3)`)
    pub fn parse_set_clause_list(&self, sql: &str) -> Result<Vec<SetClauseElement>> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let list = cx.parse_set_clause_list()?;
        cx.expect_eof()?;
        Ok(list)
    }

    /// Parse a window specification (the body of an OVER clause)
    pub fn parse_window_definition(&self, sql: &str) -> Result<WindowDefinition> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        cx.expect_punctuator("(")?;
        let window = cx.parse_window_specification()?;
        cx.expect_punctuator(")")?;
        cx.expect_eof()?;
        Ok(window)
    }

    /// Parse a type name
    pub fn parse_type_name(&self, sql: &str) -> Result<TypeName> {
        let mut cx = ParseContext::new(sql, self.mode)?;
        let type_name = cx.parse_type_name()?;
        cx.expect_eof()?;
        Ok(type_name)
    }
}

impl ListItem for TargetElement {
    fn parse_list_item(parser: &Parser, sql: &str) -> Result<Self> {
        parser.parse_target_element(sql)
    }

    fn item_description() -> &'static str {
        "target element"
    }
}

impl ListItem for FromItem {
    fn parse_list_item(parser: &Parser, sql: &str) -> Result<Self> {
        parser.parse_from_item(sql)
    }

    fn item_description() -> &'static str {
        "range item"
    }
}

impl ListItem for OrderByElement {
    fn parse_list_item(parser: &Parser, sql: &str) -> Result<Self> {
        let mut cx = ParseContext::new(sql, parser.mode())?;
        let element = cx.parse_order_by_element()?;
        cx.expect_eof()?;
        Ok(element)
    }

    fn item_description() -> &'static str {
        "order by element"
    }
}

impl ListItem for Expression {
    fn parse_list_item(parser: &Parser, sql: &str) -> Result<Self> {
        parser.parse_expression(sql)
    }

    fn item_description() -> &'static str {
        "expression"
    }
}

impl ListItem for SetTargetElement {
    fn parse_list_item(parser: &Parser, sql: &str) -> Result<Self> {
        parser.parse_set_target_element(sql)
    }

    fn item_description() -> &'static str {
        "set target element"
    }
}

/// The per-input parsing state: an eagerly lexed token vector with a
/// rewindable cursor
pub(crate) struct ParseContext {
    tokens: Vec<Token>,
    pos: usize,
    pub(crate) mode: PrecedenceMode,
}

impl ParseContext {
    pub(crate) fn new(sql: &str, mode: PrecedenceMode) -> Result<Self> {
        let tokens = Lexer::tokenize(sql)?;
        Ok(Self {
            tokens,
            pos: 0,
            mode,
        })
    }

    /// A parser value with this context's configuration, for attaching to
    /// the node lists we build
    pub(crate) fn parser(&self) -> Parser {
        Parser::with_mode(self.mode)
    }

    /// The current token; the vector always ends with EOF
    pub(crate) fn cur(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// The token `n` past the current one
    pub(crate) fn peek(&self, n: usize) -> &Token {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Advance the cursor one token
    pub(crate) fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    /// Save the cursor for backtracking
    pub(crate) fn mark(&self) -> usize {
        self.pos
    }

    /// Rewind to a saved cursor
    pub(crate) fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    pub(crate) fn cur_is_keyword(&self, keyword: &str) -> bool {
        self.cur().is_keyword(keyword)
    }

    pub(crate) fn cur_is_punctuator(&self, punct: &str) -> bool {
        self.cur().is_punctuator(punct)
    }

    pub(crate) fn cur_is_operator(&self, op: &str) -> bool {
        self.cur().is_operator(op)
    }

    // ------------------------------------------------------------------
    // Conditional consumption
    // ------------------------------------------------------------------

    /// Consume the keyword if it is current; report whether it was
    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.cur_is_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a whole keyword sequence or nothing
    pub(crate) fn eat_keywords(&mut self, keywords: &[&str]) -> bool {
        for (n, keyword) in keywords.iter().enumerate() {
            if !self.peek(n).is_keyword(keyword) {
                return false;
            }
        }
        for _ in keywords {
            self.advance();
        }
        true
    }

    pub(crate) fn eat_punctuator(&mut self, punct: &str) -> bool {
        if self.cur_is_punctuator(punct) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_operator(&mut self, op: &str) -> bool {
        if self.cur_is_operator(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Required consumption
    // ------------------------------------------------------------------

    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword))
        }
    }

    pub(crate) fn expect_punctuator(&mut self, punct: &str) -> Result<()> {
        if self.eat_punctuator(punct) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", punct)))
        }
    }

    /// Require a column-name-capable token and return it as an identifier
    pub(crate) fn expect_col_name(&mut self) -> Result<Identifier> {
        if self.cur().can_be_col_name() {
            let ident = Identifier::new(self.cur().literal.clone());
            self.advance();
            Ok(ident)
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// Require a type/function-name-capable token
    pub(crate) fn expect_type_func_name(&mut self) -> Result<Identifier> {
        if self.cur().can_be_type_func_name() {
            let ident = Identifier::new(self.cur().literal.clone());
            self.advance();
            Ok(ident)
        } else {
            Err(self.unexpected("function or type name"))
        }
    }

    /// Require the end of the fragment
    pub(crate) fn expect_eof(&mut self) -> Result<()> {
        if self.cur().is_eof() {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    /// Build the fail-fast error for the current token
    pub(crate) fn unexpected(&self, expected: &str) -> crate::error::Error {
        SyntaxError::expected(expected, self.cur().describe(), self.cur().position).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_is_copy_and_comparable() {
        let a = Parser::new();
        let b = a;
        assert_eq!(a, b);
        assert_eq!(a.mode(), PrecedenceMode::Current);
        let c = Parser::with_mode(PrecedenceMode::Pre95);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cursor_basics() {
        let mut cx = ParseContext::new("select 1", PrecedenceMode::Current).unwrap();
        assert!(cx.cur_is_keyword("select"));
        assert_eq!(cx.peek(1).literal, "1");
        let mark = cx.mark();
        cx.advance();
        assert_eq!(cx.cur().literal, "1");
        cx.reset(mark);
        assert!(cx.cur_is_keyword("select"));
    }

    #[test]
    fn test_cursor_saturates_at_eof() {
        let mut cx = ParseContext::new("x", PrecedenceMode::Current).unwrap();
        cx.advance();
        cx.advance();
        cx.advance();
        assert!(cx.cur().is_eof());
        assert!(cx.peek(10).is_eof());
    }

    #[test]
    fn test_eat_keywords_all_or_nothing() {
        let mut cx = ParseContext::new("order by foo", PrecedenceMode::Current).unwrap();
        assert!(!cx.eat_keywords(&["order", "from"]));
        assert!(cx.cur_is_keyword("order"));
        assert!(cx.eat_keywords(&["order", "by"]));
        assert_eq!(cx.cur().literal, "foo");
    }

    #[test]
    fn test_expect_errors_carry_position() {
        let mut cx = ParseContext::new("select", PrecedenceMode::Current).unwrap();
        cx.advance();
        let err = cx.expect_punctuator("(").unwrap_err();
        match err {
            crate::error::Error::Syntax(e) => {
                assert_eq!(e.expected.as_deref(), Some("'('"));
                assert_eq!(e.got.as_deref(), Some("end of input"));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }
}
