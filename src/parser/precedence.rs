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

//! Operator precedence tables for expression parsing and printing
//!
//! PostgreSQL changed operator precedence in 9.5: `=`, `<`, `>`, `<=`,
//! `>=`, `<>` moved to a single non-associative comparison level, and the
//! `IS` tests dropped below comparisons. Both ladders are provided here and
//! selected by [`PrecedenceMode`]; the parser uses them for precedence
//! climbing, the printer for deciding where parentheses are required.

use super::ast::{Expression, LogicalOperator, OperatorKind, SelectQuery};

/// Which precedence era to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrecedenceMode {
    /// PostgreSQL releases before 9.5
    Pre95,
    /// PostgreSQL 9.5 and later
    #[default]
    Current,
}

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
    NonAssoc,
}

/// Precedence levels, low binds weakest. The gaps leave room for the
/// pre-9.5 levels that sit between current ones.
pub mod level {
    pub const OR: u16 = 10;
    pub const AND: u16 = 20;
    pub const NOT: u16 = 30;
    /// pre-9.5 only: right-associative `=`
    pub const OLD_EQUALS: u16 = 35;
    /// 9.5+: all six comparison operators, non-associative
    pub const IS: u16 = 40;
    pub const COMPARISON: u16 = 50;
    /// pre-9.5 only: strict inequality `<` `>`
    pub const OLD_INEQUALITY: u16 = 45;
    pub const PATTERN: u16 = 60;
    pub const OVERLAPS: u16 = 70;
    pub const BETWEEN: u16 = 80;
    pub const IN: u16 = 90;
    pub const POSTFIX_OP: u16 = 100;
    pub const GENERIC_OP: u16 = 110;
    /// pre-9.5 only: the `IS` tests, above generic operators
    pub const OLD_IS: u16 = 120;
    pub const ADD: u16 = 130;
    pub const MUL: u16 = 140;
    pub const EXP: u16 = 150;
    pub const AT_TIME_ZONE: u16 = 160;
    pub const COLLATE: u16 = 170;
    pub const UNARY_MINUS: u16 = 180;
    pub const TYPECAST: u16 = 190;
    pub const ATOM: u16 = 666;
}

/// Precedence and associativity of a binary operator token
pub fn binary_op(op: &str, mode: PrecedenceMode) -> (u16, Assoc) {
    match op {
        "=" => match mode {
            PrecedenceMode::Current => (level::COMPARISON, Assoc::NonAssoc),
            PrecedenceMode::Pre95 => (level::OLD_EQUALS, Assoc::Right),
        },
        "<" | ">" => match mode {
            PrecedenceMode::Current => (level::COMPARISON, Assoc::NonAssoc),
            PrecedenceMode::Pre95 => (level::OLD_INEQUALITY, Assoc::NonAssoc),
        },
        "<=" | ">=" | "<>" => match mode {
            PrecedenceMode::Current => (level::COMPARISON, Assoc::NonAssoc),
            PrecedenceMode::Pre95 => (level::GENERIC_OP, Assoc::Left),
        },
        "+" | "-" => (level::ADD, Assoc::Left),
        "*" | "/" | "%" => (level::MUL, Assoc::Left),
        "^" => (level::EXP, Assoc::Left),
        _ => (level::GENERIC_OP, Assoc::Left),
    }
}

/// Level of the `IS ...` test family under the given mode
pub fn is_test(mode: PrecedenceMode) -> u16 {
    match mode {
        PrecedenceMode::Current => level::IS,
        PrecedenceMode::Pre95 => level::OLD_IS,
    }
}

/// True for the six comparison operators
pub fn is_comparison_op(op: &str) -> bool {
    matches!(op, "=" | "<" | ">" | "<=" | ">=" | "<>")
}

/// Set-operation precedence: INTERSECT binds tighter than UNION/EXCEPT,
/// and a plain SELECT or VALUES is an atom
pub fn set_op_precedence(query: &SelectQuery) -> u8 {
    match query {
        SelectQuery::SetOp(s) if s.op.is_intersect() => 2,
        SelectQuery::SetOp(_) => 1,
        SelectQuery::Select(_) | SelectQuery::Values(_) => 3,
    }
}

/// Precedence and associativity of an operator spelling in a given shape
pub fn operator_precedence(op: &str, kind: OperatorKind, mode: PrecedenceMode) -> (u16, Assoc) {
    match kind {
        OperatorKind::Prefix => match op {
            "not" => (level::NOT, Assoc::Right),
            "-" | "+" => (level::UNARY_MINUS, Assoc::Right),
            _ => (level::GENERIC_OP, Assoc::Left),
        },
        OperatorKind::Postfix => {
            if op.starts_with("is") {
                (is_test(mode), Assoc::NonAssoc)
            } else {
                (level::POSTFIX_OP, Assoc::Left)
            }
        }
        OperatorKind::Binary => {
            if op.starts_with("is ") {
                (is_test(mode), Assoc::NonAssoc)
            } else if op == "overlaps" {
                (level::OVERLAPS, Assoc::NonAssoc)
            } else if op == "at time zone" {
                (level::AT_TIME_ZONE, Assoc::Left)
            } else {
                binary_op(op, mode)
            }
        }
    }
}

/// Precedence and associativity of an expression node for printing
pub fn expression_precedence(expr: &Expression, mode: PrecedenceMode) -> (u16, Assoc) {
    match expr {
        Expression::Logical(l) => match l.operator {
            LogicalOperator::And => (level::AND, Assoc::Left),
            LogicalOperator::Or => (level::OR, Assoc::Left),
        },
        Expression::Operator(o) => operator_precedence(&o.operator, o.kind(), mode),
        Expression::Between(_) => (level::BETWEEN, Assoc::NonAssoc),
        Expression::PatternMatch(_) => (level::PATTERN, Assoc::NonAssoc),
        Expression::In(_) => (level::IN, Assoc::NonAssoc),
        Expression::IsOf(_) => (is_test(mode), Assoc::NonAssoc),
        Expression::Collate(_) => (level::COLLATE, Assoc::Left),
        Expression::Typecast(_) => (level::TYPECAST, Assoc::Left),
        _ => (level::ATOM, Assoc::NonAssoc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_ordering() {
        assert!(level::OR < level::AND);
        assert!(level::AND < level::NOT);
        assert!(level::NOT < level::IS);
        assert!(level::IS < level::COMPARISON);
        assert!(level::COMPARISON < level::PATTERN);
        assert!(level::PATTERN < level::OVERLAPS);
        assert!(level::OVERLAPS < level::BETWEEN);
        assert!(level::BETWEEN < level::IN);
        assert!(level::IN < level::POSTFIX_OP);
        assert!(level::POSTFIX_OP < level::GENERIC_OP);
        assert!(level::GENERIC_OP < level::ADD);
        assert!(level::ADD < level::MUL);
        assert!(level::MUL < level::EXP);
        assert!(level::EXP < level::AT_TIME_ZONE);
        assert!(level::AT_TIME_ZONE < level::COLLATE);
        assert!(level::COLLATE < level::UNARY_MINUS);
        assert!(level::UNARY_MINUS < level::TYPECAST);
        assert!(level::TYPECAST < level::ATOM);
    }

    #[test]
    fn test_pre95_levels() {
        assert!(level::NOT < level::OLD_EQUALS);
        assert!(level::OLD_EQUALS < level::OLD_INEQUALITY);
        assert!(level::OLD_INEQUALITY < level::GENERIC_OP);
        assert!(level::GENERIC_OP < level::OLD_IS);
        assert!(level::OLD_IS < level::ADD);
    }

    #[test]
    fn test_equals_mode_split() {
        assert_eq!(
            binary_op("=", PrecedenceMode::Current),
            (level::COMPARISON, Assoc::NonAssoc)
        );
        assert_eq!(
            binary_op("=", PrecedenceMode::Pre95),
            (level::OLD_EQUALS, Assoc::Right)
        );
    }

    #[test]
    fn test_multi_char_comparisons_mode_split() {
        for op in ["<=", ">=", "<>"] {
            assert_eq!(
                binary_op(op, PrecedenceMode::Current),
                (level::COMPARISON, Assoc::NonAssoc)
            );
            assert_eq!(
                binary_op(op, PrecedenceMode::Pre95),
                (level::GENERIC_OP, Assoc::Left)
            );
        }
    }

    #[test]
    fn test_generic_operator() {
        assert_eq!(
            binary_op("@>", PrecedenceMode::Current),
            (level::GENERIC_OP, Assoc::Left)
        );
        assert_eq!(binary_op("^", PrecedenceMode::Current), (level::EXP, Assoc::Left));
    }

    #[test]
    fn test_is_mode_split() {
        assert_eq!(is_test(PrecedenceMode::Current), level::IS);
        assert_eq!(is_test(PrecedenceMode::Pre95), level::OLD_IS);
    }
}
