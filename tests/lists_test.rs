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

//! Element-parseable node lists: raw SQL fragments become elements when a
//! parser is attached, and misuse fails fast without changing the list

use pgscribe::parser::{FromItem, NodeList, SelectQuery, Statement, TargetElement};
use pgscribe::{Error, Parser, SqlPrinter};

fn parsed_select(sql: &str) -> Statement {
    Parser::new().parse_statement(sql).unwrap()
}

fn as_plain_select(statement: &mut Statement) -> &mut pgscribe::parser::SelectStatement {
    match statement.as_select_mut().unwrap() {
        SelectQuery::Select(select) => select,
        other => panic!("expected a plain select, got {:?}", other),
    }
}

#[test]
fn test_parsed_lists_carry_the_parser() {
    let mut statement = parsed_select("select a from t");
    let select = as_plain_select(&mut statement);

    select.targets.push_sql("b + 1 as nxt").unwrap();
    select.from.push_sql("u join v on u.x = v.x").unwrap();

    assert_eq!(
        SqlPrinter::compact().print(&statement),
        "select a, b + 1 as nxt from t, u join v on u.x = v.x"
    );
}

#[test]
fn test_set_sql_replaces_in_place() {
    let mut statement = parsed_select("select a, b from t order by a");
    let select = as_plain_select(&mut statement);

    select.targets.set_sql(1, "c as renamed").unwrap();
    select.order_by.set_sql(0, "c desc nulls first").unwrap();

    assert_eq!(
        SqlPrinter::compact().print(&statement),
        "select a, c as renamed from t order by c desc nulls first"
    );
}

#[test]
fn test_push_sql_without_parser_is_invalid_argument() {
    let mut list: NodeList<TargetElement> = NodeList::new();
    match list.push_sql("a") {
        Err(Error::InvalidArgument(message)) => {
            assert!(message.contains("no parser attached"));
        }
        other => panic!("expected invalid argument, got {:?}", other),
    }
    assert!(list.is_empty());
}

#[test]
fn test_bad_fragment_is_syntax_error_and_list_unchanged() {
    let mut statement = parsed_select("select a from t");
    let select = as_plain_select(&mut statement);

    let before = select.targets.clone();
    assert!(matches!(
        select.targets.push_sql("from t"),
        Err(Error::Syntax(_))
    ));
    // a fragment with trailing tokens is rejected as a whole
    assert!(matches!(
        select.targets.push_sql("a, b"),
        Err(Error::Syntax(_))
    ));
    assert_eq!(before, select.targets);
}

#[test]
fn test_set_sql_out_of_bounds_is_invalid_argument() {
    let mut statement = parsed_select("select a from t");
    let select = as_plain_select(&mut statement);
    assert!(matches!(
        select.targets.set_sql(3, "b"),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_manual_list_with_attached_parser() {
    let parser = Parser::new();
    let mut from: NodeList<FromItem> = NodeList::with_parser(Vec::new(), parser);
    from.push_sql("events e").unwrap();
    from.push_sql("lateral (select e.id) l").unwrap();
    assert_eq!(from.len(), 2);
    assert!(matches!(from[1], FromItem::Subselect(ref s) if s.lateral));
}

#[test]
fn test_list_parser_mode_is_preserved() {
    use pgscribe::PrecedenceMode;

    let pre95 = Parser::with_mode(PrecedenceMode::Pre95);
    let mut list: NodeList<pgscribe::parser::Expression> =
        NodeList::with_parser(Vec::new(), pre95);
    // right-associative = only parses before 9.5
    list.push_sql("a = b = c").unwrap();

    let current = Parser::new();
    let mut list: NodeList<pgscribe::parser::Expression> =
        NodeList::with_parser(Vec::new(), current);
    assert!(list.push_sql("a = b = c").is_err());
}

#[test]
fn test_values_rows_are_parseable_lists() {
    let mut statement = parsed_select("insert into t values (1, 2)");
    match &mut statement {
        Statement::Insert(insert) => match insert.source.as_mut().unwrap() {
            SelectQuery::Values(values) => {
                values.rows[0].push_sql("3 + 4").unwrap();
            }
            other => panic!("expected values, got {:?}", other),
        },
        other => panic!("expected insert, got {:?}", other),
    }
    assert_eq!(
        SqlPrinter::compact().print(&statement),
        "insert into t values (1, 2, 3 + 4)"
    );
}
