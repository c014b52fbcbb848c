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

//! Expression parsing
//!
//! Expressions are parsed by precedence climbing over the mode-selected
//! operator tables in [`precedence`](super::precedence). The restricted
//! flag implements the grammar's `b_expr`: the expression form allowed in
//! `between` bounds, with no unparenthesized `and`/`or`/`not` and none of
//! the keyword operators.

use super::ast::*;
use super::parser::ParseContext;
use super::precedence::{binary_op, is_test, level, Assoc};
use super::token::{Token, TokenType};
use crate::error::{Result, SyntaxError};

/// The operators lexed as their own token kinds; everything else on an
/// operator token is a user operator
fn is_hardwired_op(op: &str) -> bool {
    matches!(
        op,
        "+" | "-" | "*" | "/" | "%" | "^" | "<" | ">" | "=" | "<=" | ">=" | "<>"
    )
}

/// The infix construct found at the cursor
enum InfixKind {
    Typecast,
    Collate,
    AtTimeZone,
    Binary(String),
    Postfix(String),
    Logical(LogicalOperator),
    Between { not: bool },
    In { not: bool },
    Pattern { operator: String, tokens: usize },
    Is,
    NullTest { not: bool },
    Overlaps,
}

struct InfixOp {
    prec: u16,
    assoc: Assoc,
    kind: InfixKind,
}

impl ParseContext {
    /// Parse a full expression (the grammar's `a_expr`)
    pub(crate) fn parse_a_expr(&mut self) -> Result<Expression> {
        self.parse_expr(0, false)
    }

    /// Parse a restricted expression (the grammar's `b_expr`)
    pub(crate) fn parse_b_expr(&mut self) -> Result<Expression> {
        self.parse_expr(0, true)
    }

    fn parse_expr(&mut self, min_prec: u16, restricted: bool) -> Result<Expression> {
        let mut lhs = self.parse_unary(restricted)?;
        let mut prev_nonassoc: Option<u16> = None;

        loop {
            let Some(op) = self.peek_infix(restricted) else {
                break;
            };
            if op.prec < min_prec {
                break;
            }
            if prev_nonassoc == Some(op.prec) {
                return Err(SyntaxError::new(
                    format!(
                        "operator {} is non-associative and cannot be chained",
                        self.cur().describe()
                    ),
                    self.cur().position,
                )
                .into());
            }
            prev_nonassoc = (op.assoc == Assoc::NonAssoc).then_some(op.prec);
            lhs = self.parse_infix(lhs, op, restricted)?;
        }

        Ok(lhs)
    }

    /// Classify the infix construct at the cursor without consuming it
    fn peek_infix(&self, restricted: bool) -> Option<InfixOp> {
        let cur = self.cur();
        match cur.token_type {
            TokenType::Punctuator if cur.literal == "::" => Some(InfixOp {
                prec: level::TYPECAST,
                assoc: Assoc::Left,
                kind: InfixKind::Typecast,
            }),
            TokenType::Operator => {
                let op = cur.literal.clone();
                if !is_hardwired_op(&op) && ends_expression(self.peek(1)) {
                    return Some(InfixOp {
                        prec: level::POSTFIX_OP,
                        assoc: Assoc::Left,
                        kind: InfixKind::Postfix(op),
                    });
                }
                let (prec, assoc) = binary_op(&op, self.mode);
                Some(InfixOp {
                    prec,
                    assoc,
                    kind: InfixKind::Binary(op),
                })
            }
            TokenType::Keyword(_) => {
                let kw = cur.literal.as_str();
                match kw {
                    "and" if !restricted => Some(InfixOp {
                        prec: level::AND,
                        assoc: Assoc::Left,
                        kind: InfixKind::Logical(LogicalOperator::And),
                    }),
                    "or" if !restricted => Some(InfixOp {
                        prec: level::OR,
                        assoc: Assoc::Left,
                        kind: InfixKind::Logical(LogicalOperator::Or),
                    }),
                    "collate" if !restricted => Some(InfixOp {
                        prec: level::COLLATE,
                        assoc: Assoc::Left,
                        kind: InfixKind::Collate,
                    }),
                    "at" if !restricted
                        && self.peek(1).is_keyword("time")
                        && self.peek(2).is_keyword("zone") =>
                    {
                        Some(InfixOp {
                            prec: level::AT_TIME_ZONE,
                            assoc: Assoc::Left,
                            kind: InfixKind::AtTimeZone,
                        })
                    }
                    "between" if !restricted => Some(InfixOp {
                        prec: level::BETWEEN,
                        assoc: Assoc::NonAssoc,
                        kind: InfixKind::Between { not: false },
                    }),
                    "in" if !restricted => Some(InfixOp {
                        prec: level::IN,
                        assoc: Assoc::NonAssoc,
                        kind: InfixKind::In { not: false },
                    }),
                    "like" | "ilike" if !restricted => Some(InfixOp {
                        prec: level::PATTERN,
                        assoc: Assoc::NonAssoc,
                        kind: InfixKind::Pattern {
                            operator: kw.to_string(),
                            tokens: 1,
                        },
                    }),
                    "similar" if !restricted && self.peek(1).is_keyword("to") => {
                        Some(InfixOp {
                            prec: level::PATTERN,
                            assoc: Assoc::NonAssoc,
                            kind: InfixKind::Pattern {
                                operator: "similar to".to_string(),
                                tokens: 2,
                            },
                        })
                    }
                    "not" if !restricted => {
                        let next = self.peek(1);
                        if next.is_keyword("between") {
                            Some(InfixOp {
                                prec: level::BETWEEN,
                                assoc: Assoc::NonAssoc,
                                kind: InfixKind::Between { not: true },
                            })
                        } else if next.is_keyword("in") {
                            Some(InfixOp {
                                prec: level::IN,
                                assoc: Assoc::NonAssoc,
                                kind: InfixKind::In { not: true },
                            })
                        } else if next.is_keyword("like") || next.is_keyword("ilike") {
                            Some(InfixOp {
                                prec: level::PATTERN,
                                assoc: Assoc::NonAssoc,
                                kind: InfixKind::Pattern {
                                    operator: format!("not {}", next.literal),
                                    tokens: 2,
                                },
                            })
                        } else if next.is_keyword("similar") && self.peek(2).is_keyword("to")
                        {
                            Some(InfixOp {
                                prec: level::PATTERN,
                                assoc: Assoc::NonAssoc,
                                kind: InfixKind::Pattern {
                                    operator: "not similar to".to_string(),
                                    tokens: 3,
                                },
                            })
                        } else {
                            None
                        }
                    }
                    "is" => Some(InfixOp {
                        prec: is_test(self.mode),
                        assoc: Assoc::NonAssoc,
                        kind: InfixKind::Is,
                    }),
                    "isnull" => Some(InfixOp {
                        prec: is_test(self.mode),
                        assoc: Assoc::NonAssoc,
                        kind: InfixKind::NullTest { not: false },
                    }),
                    "notnull" => Some(InfixOp {
                        prec: is_test(self.mode),
                        assoc: Assoc::NonAssoc,
                        kind: InfixKind::NullTest { not: true },
                    }),
                    "overlaps" if !restricted => Some(InfixOp {
                        prec: level::OVERLAPS,
                        assoc: Assoc::NonAssoc,
                        kind: InfixKind::Overlaps,
                    }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn parse_infix(&mut self, lhs: Expression, op: InfixOp, restricted: bool) -> Result<Expression> {
        match op.kind {
            InfixKind::Typecast => {
                self.advance();
                let type_name = self.parse_type_name()?;
                Ok(Expression::Typecast(Box::new(TypecastExpression {
                    argument: Box::new(lhs),
                    type_name,
                })))
            }
            InfixKind::Collate => {
                self.advance();
                let collation = self.parse_qualified_name()?;
                Ok(Expression::Collate(Box::new(CollateExpression {
                    argument: Box::new(lhs),
                    collation,
                })))
            }
            InfixKind::AtTimeZone => {
                self.advance();
                self.advance();
                self.advance();
                let rhs = self.parse_expr(op.prec + 1, restricted)?;
                Ok(Expression::Operator(OperatorExpression::binary(
                    "at time zone",
                    lhs,
                    rhs,
                )))
            }
            InfixKind::Binary(operator) => {
                self.advance();
                if let Some(sub_op) = self.peek_sublink_operator() {
                    let rhs = self.parse_sublink(sub_op)?;
                    return Ok(Expression::Operator(OperatorExpression::binary(
                        operator, lhs, rhs,
                    )));
                }
                let next_min = match op.assoc {
                    Assoc::Right => op.prec,
                    _ => op.prec + 1,
                };
                let rhs = self.parse_expr(next_min, restricted)?;
                Ok(Expression::Operator(OperatorExpression::binary(
                    operator, lhs, rhs,
                )))
            }
            InfixKind::Postfix(operator) => {
                self.advance();
                Ok(Expression::Operator(OperatorExpression::postfix(
                    operator, lhs,
                )))
            }
            InfixKind::Logical(operator) => {
                self.advance();
                let rhs = self.parse_expr(op.prec + 1, restricted)?;
                Ok(match lhs {
                    Expression::Logical(mut logical) if logical.operator == operator => {
                        logical.terms.push(rhs);
                        Expression::Logical(logical)
                    }
                    other => Expression::Logical(LogicalExpression {
                        operator,
                        terms: vec![other, rhs],
                    }),
                })
            }
            InfixKind::Between { not } => {
                if not {
                    self.advance();
                }
                self.advance();
                let mut operator = String::from(if not { "not between" } else { "between" });
                if self.eat_keyword("symmetric") {
                    operator.push_str(" symmetric");
                } else if self.eat_keyword("asymmetric") {
                    operator.push_str(" asymmetric");
                }
                let lower = self.parse_expr(level::BETWEEN + 1, true)?;
                self.expect_keyword("and")?;
                let upper = self.parse_expr(level::BETWEEN + 1, true)?;
                Ok(Expression::Between(Box::new(BetweenExpression {
                    operator,
                    argument: Box::new(lhs),
                    lower: Box::new(lower),
                    upper: Box::new(upper),
                })))
            }
            InfixKind::In { not } => {
                if not {
                    self.advance();
                }
                self.advance();
                self.expect_punctuator("(")?;
                let rhs = if self.cur_starts_select() {
                    let query = self.parse_select_query()?;
                    InRhs::Subquery(query)
                } else {
                    let mut elements = vec![self.parse_a_expr()?];
                    while self.eat_punctuator(",") {
                        elements.push(self.parse_a_expr()?);
                    }
                    InRhs::List(elements)
                };
                self.expect_punctuator(")")?;
                Ok(Expression::In(Box::new(InExpression {
                    not,
                    argument: Box::new(lhs),
                    rhs,
                })))
            }
            InfixKind::Pattern { operator, tokens } => {
                for _ in 0..tokens {
                    self.advance();
                }
                let pattern = self.parse_expr(level::PATTERN + 1, restricted)?;
                let escape = if self.eat_keyword("escape") {
                    Some(Box::new(self.parse_expr(level::PATTERN + 1, restricted)?))
                } else {
                    None
                };
                Ok(Expression::PatternMatch(Box::new(
                    PatternMatchingExpression {
                        operator,
                        argument: Box::new(lhs),
                        pattern: Box::new(pattern),
                        escape,
                    },
                )))
            }
            InfixKind::Is => self.parse_is_rest(lhs, op.prec, restricted),
            InfixKind::NullTest { not } => {
                self.advance();
                let operator = if not { "is not null" } else { "is null" };
                Ok(Expression::Operator(OperatorExpression::postfix(
                    operator, lhs,
                )))
            }
            InfixKind::Overlaps => {
                self.advance();
                let rhs = self.parse_expr(op.prec + 1, restricted)?;
                Ok(Expression::Operator(OperatorExpression::binary(
                    "overlaps", lhs, rhs,
                )))
            }
        }
    }

    /// Everything after `is`: null tests, boolean tests, `distinct from`,
    /// `of (types)`, `document`
    fn parse_is_rest(
        &mut self,
        lhs: Expression,
        prec: u16,
        restricted: bool,
    ) -> Result<Expression> {
        self.advance(); // is
        let not = self.eat_keyword("not");
        let neg = if not { " not" } else { "" };

        if self.eat_keyword("null") {
            return Ok(Expression::Operator(OperatorExpression::postfix(
                format!("is{} null", neg),
                lhs,
            )));
        }
        if self.eat_keyword("true") {
            return Ok(Expression::Operator(OperatorExpression::postfix(
                format!("is{} true", neg),
                lhs,
            )));
        }
        if self.eat_keyword("false") {
            return Ok(Expression::Operator(OperatorExpression::postfix(
                format!("is{} false", neg),
                lhs,
            )));
        }
        if self.eat_keyword("unknown") {
            return Ok(Expression::Operator(OperatorExpression::postfix(
                format!("is{} unknown", neg),
                lhs,
            )));
        }
        if self.eat_keyword("document") {
            return Ok(Expression::Operator(OperatorExpression::postfix(
                format!("is{} document", neg),
                lhs,
            )));
        }
        if self.eat_keyword("distinct") {
            self.expect_keyword("from")?;
            let rhs = self.parse_expr(prec + 1, restricted)?;
            return Ok(Expression::Operator(OperatorExpression::binary(
                format!("is{} distinct from", neg),
                lhs,
                rhs,
            )));
        }
        if self.eat_keyword("of") {
            self.expect_punctuator("(")?;
            let mut types = vec![self.parse_type_name()?];
            while self.eat_punctuator(",") {
                types.push(self.parse_type_name()?);
            }
            self.expect_punctuator(")")?;
            return Ok(Expression::IsOf(Box::new(IsOfExpression {
                not,
                argument: Box::new(lhs),
                types,
            })));
        }
        Err(self.unexpected("null, true, false, unknown, document, distinct or of"))
    }

    /// `any` / `all` / `some` followed by a parenthesized subquery
    fn peek_sublink_operator(&self) -> Option<SubselectOperator> {
        if !self.peek(1).is_punctuator("(") {
            return None;
        }
        match self.cur().literal.as_str() {
            "any" if self.cur().is_keyword("any") => Some(SubselectOperator::Any),
            "all" if self.cur().is_keyword("all") => Some(SubselectOperator::All),
            "some" if self.cur().is_keyword("some") => Some(SubselectOperator::Some),
            _ => None,
        }
    }

    fn parse_sublink(&mut self, operator: SubselectOperator) -> Result<Expression> {
        self.advance(); // any / all / some
        self.expect_punctuator("(")?;
        if !self.cur_starts_select() {
            return Err(self.unexpected("subquery"));
        }
        let query = self.parse_select_query()?;
        self.expect_punctuator(")")?;
        Ok(Expression::Subselect(Box::new(SubselectExpression {
            operator: Some(operator),
            query,
        })))
    }

    // ------------------------------------------------------------------
    // Prefix operators and atoms
    // ------------------------------------------------------------------

    fn parse_unary(&mut self, restricted: bool) -> Result<Expression> {
        let cur = self.cur();
        match cur.token_type {
            TokenType::Operator => {
                let op = cur.literal.clone();
                match op.as_str() {
                    "-" | "+" => {
                        self.advance();
                        let operand = self.parse_expr(level::UNARY_MINUS, restricted)?;
                        Ok(Expression::Operator(OperatorExpression::prefix(op, operand)))
                    }
                    _ if !is_hardwired_op(&op) => {
                        self.advance();
                        let operand = self.parse_expr(level::GENERIC_OP + 1, restricted)?;
                        Ok(Expression::Operator(OperatorExpression::prefix(op, operand)))
                    }
                    _ => Err(self.unexpected("expression")),
                }
            }
            TokenType::Keyword(_) if cur.literal == "not" && !restricted => {
                self.advance();
                let operand = self.parse_expr(level::NOT, restricted)?;
                Ok(Expression::Operator(OperatorExpression::prefix(
                    "not", operand,
                )))
            }
            _ => {
                let atom = self.parse_atom()?;
                self.parse_indirection_suffix(atom)
            }
        }
    }

    /// Attach `.field`, `.*`, `[subscript]` and `[lo:hi]` chains
    fn parse_indirection_suffix(&mut self, base: Expression) -> Result<Expression> {
        let mut items = Vec::new();
        loop {
            if self.cur_is_punctuator(".") {
                let next = self.peek(1);
                if next.is_operator("*") {
                    self.advance();
                    self.advance();
                    items.push(IndirectionItem::Star);
                    break;
                }
                if next.token_type == TokenType::Identifier
                    || matches!(next.token_type, TokenType::Keyword(_))
                {
                    self.advance();
                    let field = Identifier::new(self.cur().literal.clone());
                    self.advance();
                    items.push(IndirectionItem::Field(field));
                    continue;
                }
                break;
            }
            if self.cur_is_punctuator("[") {
                self.advance();
                items.push(self.parse_subscript()?);
                continue;
            }
            break;
        }
        if items.is_empty() {
            Ok(base)
        } else {
            Ok(Expression::Indirection(Indirection {
                base: Box::new(base),
                items,
            }))
        }
    }

    /// The inside of `[...]`, cursor just past the opening bracket
    pub(crate) fn parse_subscript(&mut self) -> Result<IndirectionItem> {
        // [:], [:hi], [lo:], [lo:hi], [*] and plain [idx]
        if self.eat_punctuator(":") {
            if self.eat_punctuator("]") {
                return Ok(IndirectionItem::Slice(None, None));
            }
            let upper = self.parse_a_expr()?;
            self.expect_punctuator("]")?;
            return Ok(IndirectionItem::Slice(None, Some(Box::new(upper))));
        }
        if self.cur_is_operator("*") && self.peek(1).is_punctuator("]") {
            self.advance();
            self.advance();
            return Ok(IndirectionItem::Slice(None, None));
        }
        let first = self.parse_a_expr()?;
        if self.eat_punctuator(":") {
            if self.eat_punctuator("]") {
                return Ok(IndirectionItem::Slice(Some(Box::new(first)), None));
            }
            let upper = self.parse_a_expr()?;
            self.expect_punctuator("]")?;
            return Ok(IndirectionItem::Slice(
                Some(Box::new(first)),
                Some(Box::new(upper)),
            ));
        }
        self.expect_punctuator("]")?;
        Ok(IndirectionItem::Subscript(Box::new(first)))
    }

    fn parse_atom(&mut self) -> Result<Expression> {
        let cur = self.cur().clone();
        match cur.token_type {
            TokenType::Integer => {
                self.advance();
                Ok(Expression::Constant(Constant::integer(cur.literal)))
            }
            TokenType::Float => {
                self.advance();
                Ok(Expression::Constant(Constant::float(cur.literal)))
            }
            TokenType::String => {
                self.advance();
                Ok(Expression::Constant(Constant::string(cur.literal)))
            }
            TokenType::BitString => {
                self.advance();
                Ok(Expression::Constant(Constant::bit_string(cur.literal)))
            }
            TokenType::PositionalParam => {
                self.advance();
                let index: u32 = cur.literal.parse().map_err(|_| {
                    crate::error::Error::from(SyntaxError::new(
                        format!("parameter number ${} out of range", cur.literal),
                        cur.position,
                    ))
                })?;
                Ok(Expression::Parameter(Parameter::Positional(index)))
            }
            TokenType::NamedParam => {
                self.advance();
                Ok(Expression::Parameter(Parameter::Named(cur.literal)))
            }
            TokenType::Punctuator if cur.literal == "(" => self.parse_parenthesized(),
            TokenType::Keyword(_) => self.parse_keyword_atom(&cur),
            TokenType::Identifier => self.parse_name_atom(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `( ... )`: a subquery, a row constructor or a plain grouping
    fn parse_parenthesized(&mut self) -> Result<Expression> {
        self.advance(); // (
        if self.cur_starts_select() {
            let query = self.parse_select_query()?;
            self.expect_punctuator(")")?;
            return Ok(Expression::Subselect(Box::new(SubselectExpression {
                operator: None,
                query,
            })));
        }
        // `((select ...)) union ...` wraps the operand itself in
        // parentheses; try the query reading before the expression one
        if self.cur_is_punctuator("(") {
            let mark = self.mark();
            if let Ok(query) = self.parse_select_query() {
                if self.eat_punctuator(")") {
                    return Ok(Expression::Subselect(Box::new(SubselectExpression {
                        operator: None,
                        query,
                    })));
                }
            }
            self.reset(mark);
        }
        let first = self.parse_a_expr()?;
        if self.eat_punctuator(",") {
            let mut fields = vec![first];
            loop {
                fields.push(self.parse_a_expr()?);
                if !self.eat_punctuator(",") {
                    break;
                }
            }
            self.expect_punctuator(")")?;
            return Ok(Expression::Row(RowExpression {
                fields,
                explicit: false,
            }));
        }
        self.expect_punctuator(")")?;
        Ok(first)
    }

    fn parse_keyword_atom(&mut self, cur: &Token) -> Result<Expression> {
        match cur.literal.as_str() {
            "true" => {
                self.advance();
                Ok(Expression::Constant(Constant::bool(true)))
            }
            "false" => {
                self.advance();
                Ok(Expression::Constant(Constant::bool(false)))
            }
            "null" => {
                self.advance();
                Ok(Expression::Constant(Constant::null()))
            }
            "default" => {
                self.advance();
                Ok(Expression::SetToDefault(SetToDefault))
            }
            "case" => self.parse_case(),
            "cast" => self.parse_cast(),
            "exists" => {
                self.advance();
                self.expect_punctuator("(")?;
                let query = self.parse_select_query()?;
                self.expect_punctuator(")")?;
                Ok(Expression::Subselect(Box::new(SubselectExpression {
                    operator: Some(SubselectOperator::Exists),
                    query,
                })))
            }
            "array" => self.parse_array(),
            "row" if self.peek(1).is_punctuator("(") => {
                self.advance();
                self.advance();
                let mut fields = Vec::new();
                if !self.cur_is_punctuator(")") {
                    fields.push(self.parse_a_expr()?);
                    while self.eat_punctuator(",") {
                        fields.push(self.parse_a_expr()?);
                    }
                }
                self.expect_punctuator(")")?;
                Ok(Expression::Row(RowExpression {
                    fields,
                    explicit: true,
                }))
            }
            "grouping" if self.peek(1).is_punctuator("(") => {
                self.advance();
                self.advance();
                let mut arguments = vec![self.parse_a_expr()?];
                while self.eat_punctuator(",") {
                    arguments.push(self.parse_a_expr()?);
                }
                self.expect_punctuator(")")?;
                Ok(Expression::Grouping(GroupingExpression { arguments }))
            }
            "interval" => self.parse_interval_literal_or_name(),
            "xmlelement" => self.parse_xml_element(),
            "xmlforest" => self.parse_xml_forest(),
            "xmlparse" => self.parse_xml_parse(),
            "xmlpi" => self.parse_xml_pi(),
            "xmlroot" => self.parse_xml_root(),
            "xmlserialize" => self.parse_xml_serialize(),
            "current_date" | "current_role" | "current_user" | "session_user" | "user"
            | "current_catalog" | "current_schema" => {
                self.advance();
                Ok(Expression::FunctionCall(Box::new(FunctionCall::new(
                    QualifiedName::single(cur.literal.clone()),
                    Vec::new(),
                ))))
            }
            "current_time" | "current_timestamp" | "localtime" | "localtimestamp" => {
                self.advance();
                let mut arguments = Vec::new();
                if self.eat_punctuator("(") {
                    arguments.push(self.parse_a_expr()?);
                    self.expect_punctuator(")")?;
                }
                Ok(Expression::FunctionCall(Box::new(FunctionCall::new(
                    QualifiedName::single(cur.literal.clone()),
                    arguments,
                ))))
            }
            // Type keywords: try a type-qualified literal such as
            // `timestamp(3) 'now'` or `double precision '1'`, then fall
            // back to plain name usage
            "timestamp" | "time" | "char" | "character" | "varchar" | "nchar" | "national"
            | "bit" | "numeric" | "dec" | "decimal" | "float" | "int" | "integer" | "smallint"
            | "bigint" | "real" | "boolean" | "double" => {
                let mark = self.mark();
                if let Ok(type_name) = self.parse_simple_type_name() {
                    if self.cur().token_type == TokenType::String {
                        let value = self.cur().literal.clone();
                        self.advance();
                        return Ok(Expression::Typecast(Box::new(TypecastExpression {
                            argument: Box::new(Expression::Constant(Constant::string(value))),
                            type_name,
                        })));
                    }
                }
                self.reset(mark);
                self.parse_name_atom()
            }
            _ if self.cur().can_be_col_name() => self.parse_name_atom(),
            _ if self.cur().can_be_type_func_name() && self.peek(1).is_punctuator("(") => {
                self.parse_name_atom()
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `interval 'value' [fields]`, `interval(p) 'value'`, or the word
    /// used as a plain column name
    fn parse_interval_literal_or_name(&mut self) -> Result<Expression> {
        let mark = self.mark();
        self.advance(); // interval

        if self.cur().token_type == TokenType::String {
            let value = self.cur().literal.clone();
            self.advance();
            // the field mask follows the string in the literal form
            let type_name = self.parse_interval_rest()?;
            return Ok(Expression::Typecast(Box::new(TypecastExpression {
                argument: Box::new(Expression::Constant(Constant::string(value))),
                type_name: TypeName::Interval(type_name),
            })));
        }

        if self.cur_is_punctuator("(") {
            if let Ok(type_name) = self.parse_interval_rest() {
                if self.cur().token_type == TokenType::String {
                    let value = self.cur().literal.clone();
                    self.advance();
                    return Ok(Expression::Typecast(Box::new(TypecastExpression {
                        argument: Box::new(Expression::Constant(Constant::string(value))),
                        type_name: TypeName::Interval(type_name),
                    })));
                }
            }
        }

        self.reset(mark);
        self.parse_name_atom()
    }

    /// An identifier chain: column reference, function call, or a
    /// type-qualified string literal
    fn parse_name_atom(&mut self) -> Result<Expression> {
        if !self.cur().can_be_col_name() && !self.cur().can_be_type_func_name() {
            return Err(self.unexpected("expression"));
        }
        let mut parts: Vec<Identifier> = vec![Identifier::new(self.cur().literal.clone())];
        self.advance();
        let mut star = false;

        while self.cur_is_punctuator(".") {
            let next = self.peek(1);
            if next.is_operator("*") {
                self.advance();
                self.advance();
                star = true;
                break;
            }
            if next.token_type == TokenType::Identifier
                || matches!(next.token_type, TokenType::Keyword(_))
            {
                self.advance();
                parts.push(Identifier::new(self.cur().literal.clone()));
                self.advance();
            } else {
                break;
            }
        }

        if !star && self.cur_is_punctuator("(") {
            let name = QualifiedName::new(parts);
            return self.parse_function_invocation(name);
        }

        if !star && self.cur().token_type == TokenType::String {
            // type 'literal'
            let value = self.cur().literal.clone();
            self.advance();
            return Ok(Expression::Typecast(Box::new(TypecastExpression {
                argument: Box::new(Expression::Constant(Constant::string(value))),
                type_name: TypeName::Plain(PlainTypeName {
                    setof: false,
                    name: QualifiedName::new(parts),
                    modifiers: Vec::new(),
                    array_bounds: Vec::new(),
                }),
            })));
        }

        Ok(Expression::ColumnRef(ColumnReference {
            parts: parts.into_iter().collect(),
            star,
        }))
    }

    /// A full scalar function invocation including aggregate and window
    /// trailers; cursor on the opening parenthesis
    fn parse_function_invocation(&mut self, name: QualifiedName) -> Result<Expression> {
        let (call, distinct, order_by) = self.parse_call_arguments(name)?;

        let mut func = FunctionExpression {
            call,
            distinct,
            order_by,
            within_group: false,
            filter: None,
            over: None,
        };

        if self.eat_keyword("within") {
            self.expect_keyword("group")?;
            self.expect_punctuator("(")?;
            self.expect_keyword("order")?;
            self.expect_keyword("by")?;
            if !func.order_by.is_empty() {
                return Err(SyntaxError::new(
                    "cannot use multiple ORDER BY clauses with WITHIN GROUP",
                    self.cur().position,
                )
                .into());
            }
            func.within_group = true;
            func.order_by = self.parse_order_by_list()?.into_elements();
            self.expect_punctuator(")")?;
        }

        if self.eat_keyword("filter") {
            self.expect_punctuator("(")?;
            self.expect_keyword("where")?;
            func.filter = Some(Box::new(self.parse_a_expr()?));
            self.expect_punctuator(")")?;
        }

        if self.eat_keyword("over") {
            let window = if self.eat_punctuator("(") {
                let spec = self.parse_window_specification()?;
                self.expect_punctuator(")")?;
                spec
            } else {
                let name = self.expect_col_name()?;
                WindowDefinition {
                    existing: Some(name),
                    ..WindowDefinition::default()
                }
            };
            func.over = Some(Box::new(window));
        }

        if func.is_plain() {
            Ok(Expression::FunctionCall(Box::new(func.call)))
        } else {
            Ok(Expression::FunctionExpr(Box::new(func)))
        }
    }

    /// Parse `( [all|distinct] [variadic] args [order by ...] )` and
    /// return the call plus the aggregate argument options
    pub(crate) fn parse_call_arguments(
        &mut self,
        name: QualifiedName,
    ) -> Result<(FunctionCall, bool, Vec<OrderByElement>)> {
        self.expect_punctuator("(")?;
        let mut call = FunctionCall::new(name, Vec::new());
        let mut distinct = false;
        let mut order_by = Vec::new();

        if self.eat_punctuator(")") {
            return Ok((call, distinct, order_by));
        }

        if self.cur_is_operator("*") && self.peek(1).is_punctuator(")") {
            self.advance();
            self.advance();
            call.star = true;
            return Ok((call, distinct, order_by));
        }

        if self.eat_keyword("distinct") {
            distinct = true;
        } else {
            self.eat_keyword("all");
        }
        if self.eat_keyword("variadic") {
            call.variadic = true;
        }

        call.arguments.push(self.parse_a_expr()?);
        while self.eat_punctuator(",") {
            if self.eat_keyword("variadic") {
                call.variadic = true;
            }
            call.arguments.push(self.parse_a_expr()?);
        }

        if self.eat_keywords(&["order", "by"]) {
            order_by = self.parse_order_by_list()?.into_elements();
        }

        self.expect_punctuator(")")?;
        Ok((call, distinct, order_by))
    }

    fn parse_case(&mut self) -> Result<Expression> {
        self.advance(); // case
        let argument = if self.cur_is_keyword("when") {
            None
        } else {
            Some(Box::new(self.parse_a_expr()?))
        };

        let mut when_clauses = Vec::new();
        while self.eat_keyword("when") {
            let condition = self.parse_a_expr()?;
            self.expect_keyword("then")?;
            let result = self.parse_a_expr()?;
            when_clauses.push(WhenExpression { condition, result });
        }
        if when_clauses.is_empty() {
            return Err(self.unexpected("when"));
        }

        let else_clause = if self.eat_keyword("else") {
            Some(Box::new(self.parse_a_expr()?))
        } else {
            None
        };
        self.expect_keyword("end")?;

        Ok(Expression::Case(Box::new(CaseExpression {
            argument,
            when_clauses,
            else_clause,
        })))
    }

    fn parse_cast(&mut self) -> Result<Expression> {
        self.advance(); // cast
        self.expect_punctuator("(")?;
        let argument = self.parse_a_expr()?;
        self.expect_keyword("as")?;
        let type_name = self.parse_type_name()?;
        self.expect_punctuator(")")?;
        Ok(Expression::Typecast(Box::new(TypecastExpression {
            argument: Box::new(argument),
            type_name,
        })))
    }

    /// `array[...]` literal or `array(subquery)`
    fn parse_array(&mut self) -> Result<Expression> {
        self.advance(); // array
        if self.cur_is_punctuator("(") {
            self.advance();
            if !self.cur_starts_select() {
                return Err(self.unexpected("subquery"));
            }
            let query = self.parse_select_query()?;
            self.expect_punctuator(")")?;
            return Ok(Expression::Subselect(Box::new(SubselectExpression {
                operator: Some(SubselectOperator::Array),
                query,
            })));
        }
        self.parse_array_literal()
    }

    /// `[...]` with elements that are either expressions or nested
    /// bracketed arrays
    fn parse_array_literal(&mut self) -> Result<Expression> {
        self.expect_punctuator("[")?;
        let mut elements = Vec::new();
        if !self.cur_is_punctuator("]") {
            loop {
                if self.cur_is_punctuator("[") {
                    elements.push(self.parse_array_literal()?);
                } else {
                    elements.push(self.parse_a_expr()?);
                }
                if !self.eat_punctuator(",") {
                    break;
                }
            }
        }
        self.expect_punctuator("]")?;
        Ok(Expression::Array(ArrayExpression { elements }))
    }

    // ------------------------------------------------------------------
    // XML expressions
    // ------------------------------------------------------------------

    /// Accept any identifier or keyword as a label
    pub(crate) fn expect_col_label(&mut self) -> Result<Identifier> {
        match self.cur().token_type {
            TokenType::Identifier | TokenType::Keyword(_) => {
                let ident = Identifier::new(self.cur().literal.clone());
                self.advance();
                Ok(ident)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// `expr [as label]` lists used by xmlforest and xmlattributes
    fn parse_xml_attribute_list(&mut self) -> Result<Vec<TargetElement>> {
        let mut elements = Vec::new();
        loop {
            let expression = self.parse_a_expr()?;
            let alias = if self.eat_keyword("as") {
                Some(self.expect_col_label()?)
            } else {
                None
            };
            elements.push(TargetElement { expression, alias });
            if !self.eat_punctuator(",") {
                break;
            }
        }
        Ok(elements)
    }

    fn parse_xml_element(&mut self) -> Result<Expression> {
        self.advance(); // xmlelement
        self.expect_punctuator("(")?;
        self.expect_keyword("name")?;
        let name = self.expect_col_label()?;

        let mut attributes = Vec::new();
        let mut content = Vec::new();
        while self.eat_punctuator(",") {
            if self.cur_is_keyword("xmlattributes") {
                self.advance();
                self.expect_punctuator("(")?;
                attributes = self.parse_xml_attribute_list()?;
                self.expect_punctuator(")")?;
            } else {
                content.push(self.parse_a_expr()?);
            }
        }
        self.expect_punctuator(")")?;
        Ok(Expression::XmlElement(Box::new(XmlElement {
            name,
            attributes,
            content,
        })))
    }

    fn parse_xml_forest(&mut self) -> Result<Expression> {
        self.advance(); // xmlforest
        self.expect_punctuator("(")?;
        let elements = self.parse_xml_attribute_list()?;
        self.expect_punctuator(")")?;
        Ok(Expression::XmlForest(Box::new(XmlForest { elements })))
    }

    fn parse_xml_parse(&mut self) -> Result<Expression> {
        self.advance(); // xmlparse
        self.expect_punctuator("(")?;
        let document = self.parse_document_or_content()?;
        let argument = self.parse_a_expr()?;
        let mut preserve_whitespace = false;
        if self.eat_keyword("preserve") {
            self.expect_keyword("whitespace")?;
            preserve_whitespace = true;
        } else if self.eat_keyword("strip") {
            self.expect_keyword("whitespace")?;
        }
        self.expect_punctuator(")")?;
        Ok(Expression::XmlParse(Box::new(XmlParse {
            document,
            argument: Box::new(argument),
            preserve_whitespace,
        })))
    }

    fn parse_xml_pi(&mut self) -> Result<Expression> {
        self.advance(); // xmlpi
        self.expect_punctuator("(")?;
        self.expect_keyword("name")?;
        let name = self.expect_col_label()?;
        let content = if self.eat_punctuator(",") {
            Some(Box::new(self.parse_a_expr()?))
        } else {
            None
        };
        self.expect_punctuator(")")?;
        Ok(Expression::XmlPi(Box::new(XmlPi { name, content })))
    }

    fn parse_xml_root(&mut self) -> Result<Expression> {
        self.advance(); // xmlroot
        self.expect_punctuator("(")?;
        let xml = self.parse_a_expr()?;
        self.expect_punctuator(",")?;
        self.expect_keyword("version")?;
        let version = if self.eat_keywords(&["no", "value"]) {
            None
        } else {
            Some(Box::new(self.parse_a_expr()?))
        };
        let mut standalone = None;
        if self.eat_punctuator(",") {
            self.expect_keyword("standalone")?;
            standalone = Some(if self.eat_keyword("yes") {
                XmlStandalone::Yes
            } else if self.eat_keywords(&["no", "value"]) {
                XmlStandalone::NoValue
            } else if self.eat_keyword("no") {
                XmlStandalone::No
            } else {
                return Err(self.unexpected("yes, no or no value"));
            });
        }
        self.expect_punctuator(")")?;
        Ok(Expression::XmlRoot(Box::new(XmlRoot {
            xml: Box::new(xml),
            version,
            standalone,
        })))
    }

    fn parse_xml_serialize(&mut self) -> Result<Expression> {
        self.advance(); // xmlserialize
        self.expect_punctuator("(")?;
        let document = self.parse_document_or_content()?;
        let argument = self.parse_a_expr()?;
        self.expect_keyword("as")?;
        let type_name = self.parse_type_name()?;
        self.expect_punctuator(")")?;
        Ok(Expression::XmlSerialize(Box::new(XmlSerialize {
            document,
            argument: Box::new(argument),
            type_name,
        })))
    }

    fn parse_document_or_content(&mut self) -> Result<bool> {
        if self.eat_keyword("document") {
            Ok(true)
        } else if self.eat_keyword("content") {
            Ok(false)
        } else {
            Err(self.unexpected("document or content"))
        }
    }

    // ------------------------------------------------------------------
    // Names and types
    // ------------------------------------------------------------------

    /// A dotted name: collations, operator classes, locking targets
    pub(crate) fn parse_qualified_name(&mut self) -> Result<QualifiedName> {
        let mut parts = vec![self.expect_col_name()?];
        while self.cur_is_punctuator(".") {
            self.advance();
            parts.push(self.expect_col_label()?);
        }
        Ok(QualifiedName::new(parts))
    }

    /// A type name with optional `setof`, modifiers and array bounds
    pub(crate) fn parse_type_name(&mut self) -> Result<TypeName> {
        let setof = self.eat_keyword("setof");
        let mut type_name = self.parse_simple_type_name()?;

        if let TypeName::Plain(plain) = &mut type_name {
            plain.setof = setof;
            if self.eat_keyword("array") {
                if self.eat_punctuator("[") {
                    let bound = self.expect_integer_literal()?;
                    self.expect_punctuator("]")?;
                    plain.array_bounds.push(Some(bound));
                } else {
                    plain.array_bounds.push(None);
                }
            } else {
                while self.cur_is_punctuator("[") {
                    self.advance();
                    if self.eat_punctuator("]") {
                        plain.array_bounds.push(None);
                    } else {
                        let bound = self.expect_integer_literal()?;
                        self.expect_punctuator("]")?;
                        plain.array_bounds.push(Some(bound));
                    }
                }
            }
        } else if setof {
            return Err(self.unexpected("type name"));
        }

        Ok(type_name)
    }

    fn expect_integer_literal(&mut self) -> Result<u32> {
        if self.cur().token_type != TokenType::Integer {
            return Err(self.unexpected("integer literal"));
        }
        let value = self.cur().literal.parse::<u32>().map_err(|_| {
            crate::error::Error::from(SyntaxError::new(
                "array bound out of range",
                self.cur().position,
            ))
        })?;
        self.advance();
        Ok(value)
    }

    /// A type name without bounds, normalizing the SQL-standard spellings
    /// to the catalog names the way the backend does
    pub(crate) fn parse_simple_type_name(&mut self) -> Result<TypeName> {
        let kw = self.cur().literal.clone();
        let is_keyword = matches!(self.cur().token_type, TokenType::Keyword(_));

        if is_keyword {
            match kw.as_str() {
                "int" | "integer" => {
                    self.advance();
                    return Ok(TypeName::named("int4"));
                }
                "smallint" => {
                    self.advance();
                    return Ok(TypeName::named("int2"));
                }
                "bigint" => {
                    self.advance();
                    return Ok(TypeName::named("int8"));
                }
                "real" => {
                    self.advance();
                    return Ok(TypeName::named("float4"));
                }
                "boolean" => {
                    self.advance();
                    return Ok(TypeName::named("bool"));
                }
                "float" => {
                    self.advance();
                    let mut precision = None;
                    if self.eat_punctuator("(") {
                        precision = Some(self.expect_integer_literal()?);
                        self.expect_punctuator(")")?;
                    }
                    let name = match precision {
                        Some(p) if p < 1 => {
                            return Err(self.unexpected("float precision between 1 and 53"))
                        }
                        Some(p) if p <= 24 => "float4",
                        Some(p) if p <= 53 => "float8",
                        Some(_) => return Err(self.unexpected("float precision between 1 and 53")),
                        None => "float8",
                    };
                    return Ok(TypeName::named(name));
                }
                "double" => {
                    self.advance();
                    self.expect_keyword("precision")?;
                    return Ok(TypeName::named("float8"));
                }
                "dec" | "decimal" | "numeric" => {
                    self.advance();
                    let modifiers = self.parse_type_modifiers()?;
                    return Ok(TypeName::Plain(PlainTypeName {
                        setof: false,
                        name: QualifiedName::single("numeric"),
                        modifiers,
                        array_bounds: Vec::new(),
                    }));
                }
                "bit" => {
                    self.advance();
                    let varying = self.eat_keyword("varying");
                    let modifiers = self.parse_type_modifiers()?;
                    return Ok(TypeName::Plain(PlainTypeName {
                        setof: false,
                        name: QualifiedName::single(if varying { "varbit" } else { "bit" }),
                        modifiers,
                        array_bounds: Vec::new(),
                    }));
                }
                "varchar" => {
                    self.advance();
                    let modifiers = self.parse_type_modifiers()?;
                    return Ok(TypeName::Plain(PlainTypeName {
                        setof: false,
                        name: QualifiedName::single("varchar"),
                        modifiers,
                        array_bounds: Vec::new(),
                    }));
                }
                "char" | "character" | "nchar" => {
                    self.advance();
                    let varying = self.eat_keyword("varying");
                    let modifiers = self.parse_type_modifiers()?;
                    return Ok(TypeName::Plain(PlainTypeName {
                        setof: false,
                        name: QualifiedName::single(if varying { "varchar" } else { "bpchar" }),
                        modifiers,
                        array_bounds: Vec::new(),
                    }));
                }
                "national" => {
                    self.advance();
                    if !self.eat_keyword("character") && !self.eat_keyword("char") {
                        return Err(self.unexpected("character"));
                    }
                    let varying = self.eat_keyword("varying");
                    let modifiers = self.parse_type_modifiers()?;
                    return Ok(TypeName::Plain(PlainTypeName {
                        setof: false,
                        name: QualifiedName::single(if varying { "varchar" } else { "bpchar" }),
                        modifiers,
                        array_bounds: Vec::new(),
                    }));
                }
                "time" | "timestamp" => {
                    self.advance();
                    let modifiers = self.parse_type_modifiers()?;
                    let with_tz = if self.eat_keywords(&["with", "time", "zone"]) {
                        true
                    } else {
                        self.eat_keywords(&["without", "time", "zone"]);
                        false
                    };
                    let name = match (kw.as_str(), with_tz) {
                        ("time", true) => "timetz",
                        ("time", false) => "time",
                        ("timestamp", true) => "timestamptz",
                        (_, false) => "timestamp",
                        _ => unreachable!(),
                    };
                    return Ok(TypeName::Plain(PlainTypeName {
                        setof: false,
                        name: QualifiedName::single(name),
                        modifiers,
                        array_bounds: Vec::new(),
                    }));
                }
                "interval" => {
                    self.advance();
                    return Ok(TypeName::Interval(self.parse_interval_rest()?));
                }
                _ => {}
            }
        }

        // Generic (possibly qualified) type name
        if !self.cur().can_be_type_func_name() && !self.cur().can_be_col_name() {
            return Err(self.unexpected("type name"));
        }
        let mut parts = vec![Identifier::new(self.cur().literal.clone())];
        self.advance();
        while self.cur_is_punctuator(".") {
            self.advance();
            parts.push(self.expect_col_label()?);
        }
        let modifiers = self.parse_type_modifiers()?;
        Ok(TypeName::Plain(PlainTypeName {
            setof: false,
            name: QualifiedName::new(parts),
            modifiers,
            array_bounds: Vec::new(),
        }))
    }

    fn parse_type_modifiers(&mut self) -> Result<Vec<Expression>> {
        let mut modifiers = Vec::new();
        if self.eat_punctuator("(") {
            modifiers.push(self.parse_a_expr()?);
            while self.eat_punctuator(",") {
                modifiers.push(self.parse_a_expr()?);
            }
            self.expect_punctuator(")")?;
        }
        Ok(modifiers)
    }

    /// The part of an interval type after the keyword: field mask and
    /// precision
    pub(crate) fn parse_interval_rest(&mut self) -> Result<IntervalTypeName> {
        let mut precision = None;
        if self.eat_punctuator("(") {
            precision = Some(self.expect_integer_literal()?.to_string());
            self.expect_punctuator(")")?;
            return Ok(IntervalTypeName {
                mask: None,
                precision,
            });
        }

        let mask = if self.eat_keyword("year") {
            if self.eat_keywords(&["to", "month"]) {
                Some("year to month".to_string())
            } else {
                Some("year".to_string())
            }
        } else if self.eat_keyword("month") {
            Some("month".to_string())
        } else if self.eat_keyword("day") {
            if self.eat_keyword("to") {
                if self.eat_keyword("hour") {
                    Some("day to hour".to_string())
                } else if self.eat_keyword("minute") {
                    Some("day to minute".to_string())
                } else if self.eat_keyword("second") {
                    precision = self.parse_second_precision()?;
                    Some("day to second".to_string())
                } else {
                    return Err(self.unexpected("hour, minute or second"));
                }
            } else {
                Some("day".to_string())
            }
        } else if self.eat_keyword("hour") {
            if self.eat_keyword("to") {
                if self.eat_keyword("minute") {
                    Some("hour to minute".to_string())
                } else if self.eat_keyword("second") {
                    precision = self.parse_second_precision()?;
                    Some("hour to second".to_string())
                } else {
                    return Err(self.unexpected("minute or second"));
                }
            } else {
                Some("hour".to_string())
            }
        } else if self.eat_keyword("minute") {
            if self.eat_keywords(&["to", "second"]) {
                precision = self.parse_second_precision()?;
                Some("minute to second".to_string())
            } else {
                Some("minute".to_string())
            }
        } else if self.eat_keyword("second") {
            precision = self.parse_second_precision()?;
            Some("second".to_string())
        } else {
            None
        };

        Ok(IntervalTypeName { mask, precision })
    }

    fn parse_second_precision(&mut self) -> Result<Option<String>> {
        if self.eat_punctuator("(") {
            let p = self.expect_integer_literal()?.to_string();
            self.expect_punctuator(")")?;
            Ok(Some(p))
        } else {
            Ok(None)
        }
    }

    /// True when the cursor could start a SELECT / VALUES / WITH query
    pub(crate) fn cur_starts_select(&self) -> bool {
        self.cur_is_keyword("select") || self.cur_is_keyword("values") || self.cur_is_keyword("with")
    }
}

/// Expression-terminator test: a generic operator directly followed by
/// one of these tokens is a postfix operator
fn ends_expression(token: &Token) -> bool {
    match token.token_type {
        TokenType::Eof => true,
        TokenType::Punctuator => matches!(token.literal.as_str(), ")" | "]" | "," | ";"),
        TokenType::Keyword(_) => matches!(
            token.literal.as_str(),
            "from"
                | "where"
                | "group"
                | "having"
                | "window"
                | "order"
                | "limit"
                | "offset"
                | "fetch"
                | "for"
                | "union"
                | "intersect"
                | "except"
                | "then"
                | "when"
                | "else"
                | "end"
                | "as"
                | "returning"
                | "and"
                | "or"
        ),
        _ => false,
    }
}
