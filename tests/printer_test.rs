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

//! Printer configuration and lexical rendering rules

use pgscribe::{ParenthesesMode, Parser, PrinterConfig, SqlPrinter};

fn compact(sql: &str) -> String {
    let statement = Parser::new().parse_statement(sql).unwrap();
    SqlPrinter::compact().print(&statement)
}

#[test]
fn test_quoted_identifier_roundtrips_quoted() {
    // mixed case stays quoted
    assert_eq!(compact("select \"SELECT\" from t"), "select \"SELECT\" from t");
    // a lowercase reserved word needs quotes too
    assert_eq!(compact("select \"select\" from t"), "select \"select\" from t");
    // embedded quotes double
    assert_eq!(compact("select \"a\"\"b\""), "select \"a\"\"b\"");
    // plain lowercase identifiers print bare
    assert_eq!(compact("select \"plain\" from t"), "select plain from t");
}

#[test]
fn test_constant_quoting_prefers_plain_quotes() {
    assert_eq!(compact("select 'simple'"), "select 'simple'");
}

#[test]
fn test_constant_with_quote_uses_dollar_quoting() {
    assert_eq!(compact("select 'it''s'"), "select $$it's$$");
}

#[test]
fn test_constant_with_quote_and_backslash_uses_minimal_tag() {
    // contains both ' and \ and the $$ tag itself, so the first numbered
    // tag is chosen
    let printed = compact(r"select e'quote \' slash \\ tag $$'");
    assert_eq!(printed, r"select $_1$quote ' slash \ tag $$$_1$");

    // a value that also contains $_1$ pushes the tag further
    let printed = compact(r"select e'\' $$ $_1$'");
    assert_eq!(printed, r"select $_2$' $$ $_1$$_2$");
}

#[test]
fn test_dollar_quoting_handles_trailing_dollar() {
    // 'a$' + '$$' would form '$$' early, so the tag must change
    let printed = compact(r"select e'a\'b$'");
    assert_eq!(printed, "select $_1$a'b$$_1$");
}

#[test]
fn test_pretty_printing_layout() {
    let statement = Parser::new()
        .parse_statement("select a, b from t where a > 1 order by b limit 3")
        .unwrap();
    let pretty = SqlPrinter::new().print(&statement);
    assert_eq!(
        pretty,
        "select a, b\nfrom t\nwhere a > 1\norder by b\nlimit 3"
    );
}

#[test]
fn test_custom_indent_and_linebreak() {
    let statement = Parser::new()
        .parse_statement("select a from t where exists (select 1 from u)")
        .unwrap();
    let mut printer = SqlPrinter::with_config(PrinterConfig {
        indent: "\t".to_string(),
        linebreak: "\r\n".to_string(),
        ..PrinterConfig::default()
    });
    let printed = printer.print(&statement);
    assert!(printed.contains("\r\n"));
    // nested statements indent one level deeper
    assert!(printed.contains("\r\n\tfrom u"));
}

#[test]
fn test_empty_linebreak_is_single_line() {
    let statement = Parser::new()
        .parse_statement("select a from t where a > 1")
        .unwrap();
    let printed = SqlPrinter::compact().print(&statement);
    assert!(!printed.contains('\n'));
}

#[test]
fn test_wrap_limits_line_length() {
    let statement = Parser::new()
        .parse_statement(
            "select column_one, column_two, column_three, column_four, column_five, \
             column_six from wide_table",
        )
        .unwrap();
    let mut printer = SqlPrinter::with_config(PrinterConfig {
        wrap: Some(40),
        ..PrinterConfig::default()
    });
    let printed = printer.print(&statement);
    for line in printed.lines() {
        // the soft target tolerates an overhanging first item, nothing more
        assert!(line.len() <= 40 + "column_three".len(), "line too long: {:?}", line);
    }
    let reparsed = Parser::new().parse_statement(&printed).unwrap();
    assert_eq!(
        Parser::new()
            .parse_statement(&SqlPrinter::compact().print(&reparsed))
            .unwrap(),
        reparsed
    );
}

#[test]
fn test_compat_parentheses_for_is_tests() {
    let statement = Parser::new().parse_statement("select a = b is null").unwrap();

    let current = SqlPrinter::with_config(PrinterConfig {
        linebreak: String::new(),
        ..PrinterConfig::default()
    })
    .print(&statement);
    assert_eq!(current, "select a = b is null");

    let compat = SqlPrinter::with_config(PrinterConfig {
        linebreak: String::new(),
        parentheses: ParenthesesMode::Compat,
        ..PrinterConfig::default()
    })
    .print(&statement);
    assert_eq!(compat, "select (a = b) is null");
}

#[test]
fn test_nested_subquery_indentation() {
    let statement = Parser::new()
        .parse_statement("select * from (select * from (select 1 from t) a) b")
        .unwrap();
    let pretty = SqlPrinter::new().print(&statement);
    // two nesting levels, two indents
    assert!(pretty.contains("\n    from"), "got {:?}", pretty);
    assert!(pretty.contains("\n        from t"), "got {:?}", pretty);
}

#[test]
fn test_printer_emits_lowercase_keywords() {
    let printed = compact("SELECT A FROM T WHERE B BETWEEN 1 AND 2");
    assert_eq!(printed, "select a from t where b between 1 and 2");
}

#[test]
fn test_operator_spacing_stays_lexable() {
    // a symbolic prefix operator never glues onto another operator
    assert_eq!(compact("select @ -1"), "select @ -1");
    assert_eq!(compact("select - -1"), "select - -1");
    assert_eq!(compact("select -1"), "select -1");
}
