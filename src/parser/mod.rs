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

//! SQL Parser
//!
//! This module provides the PostgreSQL-dialect parser, including:
//!
//! - [`Lexer`] - Tokenizer for SQL input
//! - [`Parser`] - Reusable parser that builds ASTs from SQL text
//! - [`ast`] - Abstract Syntax Tree types
//! - [`token`] - Token types and the keyword table
//! - [`precedence`] - The pre-9.5 and current operator precedence tables
//!
//! # Example
//!
//! ```
//! use pgscribe::parser::{parse_sql, Statement};
//!
//! let statements = parse_sql("SELECT * FROM users WHERE id = 1").unwrap();
//! assert_eq!(statements.len(), 1);
//! assert!(matches!(statements[0], Statement::Select(_)));
//! ```

pub mod ast;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod precedence;
pub mod token;

// Expression and statement parsing are implemented as impl blocks on the
// internal parse context
mod expressions;
mod statements;

pub use ast::{
    ArrayExpression,
    BetweenExpression,
    CaseExpression,
    CollateExpression,
    ColumnDefinition,
    ColumnReference,
    CommonTableExpression,
    ConflictTarget,
    Constant,
    ConstantKind,
    CubeOrRollup,
    CubeOrRollupClause,
    DeleteStatement,
    DistinctClause,
    EmptyGroupingSet,
    Expression,
    ExpressionList,
    FromItem,
    FromList,
    FunctionCall,
    FunctionExpression,
    GroupByItem,
    GroupingExpression,
    GroupingSetsClause,
    Identifier,
    InExpression,
    InRhs,
    IndexElement,
    IndexParameters,
    Indirection,
    IndirectionItem,
    InsertOverriding,
    InsertStatement,
    InsertTarget,
    InsertTargetList,
    IntervalTypeName,
    IsOfExpression,
    JoinExpression,
    JoinKind,
    ListItem,
    LockingElement,
    LockingStrength,
    LogicalExpression,
    LogicalOperator,
    MultipleSetSource,
    NodeList,
    NullsOrder,
    OnConflictAction,
    OnConflictClause,
    OperatorExpression,
    OperatorKind,
    OrderByElement,
    OrderByList,
    OrderDirection,
    Parameter,
    PatternMatchingExpression,
    PlainTypeName,
    QualifiedName,
    RangeFunctionCall,
    RangeSubselect,
    RelationReference,
    RowExpression,
    RowsFrom,
    RowsFromElement,
    SelectQuery,
    SelectStatement,
    SetClauseElement,
    SetOpSelect,
    SetOperator,
    SetTargetElement,
    SetToDefault,
    Star,
    Statement,
    SubselectExpression,
    SubselectOperator,
    TableSampleClause,
    TargetElement,
    TargetList,
    TypeName,
    TypecastExpression,
    UpdateOrDeleteTarget,
    UpdateStatement,
    ValuesRow,
    ValuesStatement,
    WhenExpression,
    WhereOrHavingClause,
    WindowDefinition,
    WindowFrameBound,
    WindowFrameClause,
    WindowFrameUnits,
    WithClause,
    XmlColumnDefinition,
    XmlElement,
    XmlForest,
    XmlNamespace,
    XmlParse,
    XmlPi,
    XmlRoot,
    XmlSerialize,
    XmlStandalone,
    XmlTable,
};

pub use lexer::Lexer;
pub use parser::Parser;
pub use precedence::{Assoc, PrecedenceMode};
pub use token::{keyword_class, is_keyword_word, KeywordClass, Position, Token, TokenType, KEYWORDS};

/// Parse a semicolon-separated SQL script with the default (current
/// precedence) parser
///
/// # Example
///
/// ```
/// use pgscribe::parser::parse_sql;
///
/// let statements = parse_sql("SELECT 1; SELECT 2;").unwrap();
/// assert_eq!(statements.len(), 2);
/// ```
pub fn parse_sql(sql: &str) -> crate::error::Result<Vec<Statement>> {
    Parser::new().parse_statements(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_select() {
        let statements = parse_sql("SELECT 1").unwrap();
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_parse_multiple_statements() {
        let statements = parse_sql("select 1; insert into t values (1); delete from t;").unwrap();
        assert_eq!(statements.len(), 3);
        assert!(matches!(statements[0], Statement::Select(_)));
        assert!(matches!(statements[1], Statement::Insert(_)));
        assert!(matches!(statements[2], Statement::Delete(_)));
    }

    #[test]
    fn test_parse_empty_string() {
        let statements = parse_sql("").unwrap();
        assert!(statements.is_empty());
    }

    #[test]
    fn test_parse_error_carries_position() {
        let err = parse_sql("select * frum t").unwrap_err();
        match err {
            crate::error::Error::Syntax(e) => assert!(e.position.offset > 0),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_modes_share_entry_points() {
        let pre95 = Parser::with_mode(PrecedenceMode::Pre95);
        let current = Parser::new();
        // both parse plain arithmetic identically
        assert_eq!(
            pre95.parse_expression("1 + 2 * 3").unwrap(),
            current.parse_expression("1 + 2 * 3").unwrap()
        );
    }

    #[test]
    fn test_fragment_entry_points() {
        let parser = Parser::new();
        assert_eq!(parser.parse_target_list("a, b as c, *").unwrap().len(), 3);
        assert_eq!(parser.parse_from_list("t1, t2 join t3 using (x)").unwrap().len(), 2);
        assert_eq!(
            parser.parse_order_by_list("a desc, b nulls first").unwrap().len(),
            2
        );
        assert_eq!(parser.parse_expression_list("1, 2, 3").unwrap().len(), 3);
        assert_eq!(
            parser.parse_set_clause_list("a = 1, (b, c) = (2, 3)").unwrap().len(),
            2
        );
        assert!(parser.parse_window_definition("(partition by a)").is_ok());
        assert!(parser.parse_type_name("numeric(10, 2)").is_ok());
    }

    #[test]
    fn test_fragments_reject_trailing_input() {
        let parser = Parser::new();
        assert!(parser.parse_expression("1 + 2 extra").is_err());
        assert!(parser.parse_target_list("a, b from t").is_err());
    }
}
