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

//! # Pgscribe - PostgreSQL query parser and SQL builder
//!
//! Pgscribe parses PostgreSQL SQL text (9.4 through 10 `SELECT`, `INSERT`,
//! `UPDATE` and `DELETE` syntax) into a typed AST, lets you inspect and
//! rewrite the tree, and renders it back to SQL that PostgreSQL accepts
//! and that re-parses to the same tree.
//!
//! ## Pipeline
//!
//! SQL text → [`parser::Lexer`] → tokens → [`Parser`] → AST → (optional
//! mutation) → [`SqlPrinter`] → SQL text.
//!
//! ## Quick start
//!
//! ```
//! use pgscribe::{Parser, SqlPrinter};
//! use pgscribe::parser::Statement;
//!
//! let parser = Parser::new();
//! let mut statement = parser.parse_statement("select * from foo").unwrap();
//!
//! // splice the select into a set operation in place
//! if let Statement::Select(query) = &mut statement {
//!     query.union_all(parser.parse_select_statement("select * from bar").unwrap());
//! }
//!
//! let sql = SqlPrinter::compact().print(&statement);
//! assert_eq!(sql, "select * from foo union all select * from bar");
//! ```
//!
//! ## Modules
//!
//! - [`parser`] - Lexer, parser, AST types and precedence tables
//! - [`walker`] - The visitor protocol ([`Walker`])
//! - [`printer`] - SQL rendering ([`SqlPrinter`])
//! - [`error`] - Error taxonomy ([`Error`], [`SyntaxError`])

pub mod error;
pub mod parser;
pub mod printer;
pub mod walker;

// Re-export the main types for convenience
pub use error::{Error, Result, SyntaxError};
pub use parser::{parse_sql, Parser, PrecedenceMode};
pub use printer::{ParenthesesMode, PrinterConfig, SqlPrinter};
pub use walker::Walker;

#[cfg(test)]
mod size_tests {
    #[test]
    fn check_ast_sizes() {
        use std::mem::size_of;
        println!("\n=== AST Type Sizes ===");
        println!("Token: {} bytes", size_of::<crate::parser::Token>());
        println!(
            "Expression: {} bytes",
            size_of::<crate::parser::Expression>()
        );
        println!("Statement: {} bytes", size_of::<crate::parser::Statement>());
        println!(
            "SelectQuery: {} bytes",
            size_of::<crate::parser::SelectQuery>()
        );
    }
}
