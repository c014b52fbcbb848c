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

//! Splicing selects into set operations and printing the result

use pgscribe::parser::{Expression, FromItem, InRhs, SelectQuery, Statement};
use pgscribe::{Parser, SqlPrinter};

fn print(statement: &Statement) -> String {
    SqlPrinter::compact().print(statement)
}

fn print_query(query: &SelectQuery) -> String {
    SqlPrinter::compact().print_query(query)
}

#[test]
fn test_union_all_on_parsed_select() {
    let parser = Parser::new();
    let mut statement = parser.parse_statement("select * from foo").unwrap();

    let query = statement.as_select_mut().unwrap();
    query.union_all(parser.parse_select_statement("select * from bar").unwrap());

    assert_eq!(
        print(&statement),
        "select * from foo union all select * from bar"
    );
}

#[test]
fn test_except_on_right_operand_is_parenthesized() {
    let parser = Parser::new();
    let mut query = parser
        .parse_select_statement("select * from foo intersect select * from bar")
        .unwrap();

    match &mut query {
        SelectQuery::SetOp(set_op) => {
            set_op
                .right
                .except(parser.parse_select_statement("select * from baz").unwrap());
        }
        other => panic!("expected a set operation, got {:?}", other),
    }

    // EXCEPT binds weaker than INTERSECT, so the right side keeps parens
    assert_eq!(
        print_query(&query),
        "select * from foo intersect (select * from bar except select * from baz)"
    );
}

#[test]
fn test_intersect_inside_range_subselect() {
    let parser = Parser::new();
    let mut statement = parser
        .parse_statement("select foo.* from (select * from foosource) as foo")
        .unwrap();

    match statement.as_select_mut().unwrap() {
        SelectQuery::Select(select) => match &mut select.from[0] {
            FromItem::Subselect(subselect) => {
                subselect.query.intersect(
                    parser
                        .parse_select_statement("select * from barsource")
                        .unwrap(),
                );
            }
            other => panic!("expected a range subselect, got {:?}", other),
        },
        other => panic!("expected a plain select, got {:?}", other),
    }

    assert_eq!(
        print(&statement),
        "select foo.* from (select * from foosource intersect select * from barsource) as foo"
    );
}

#[test]
fn test_combinators_inside_where_subqueries() {
    let parser = Parser::new();
    let mut statement = parser
        .parse_statement(
            "select * from foo where foo_id in (select id from bar) \
             or foo_name > any(select baz_name from baz)",
        )
        .unwrap();

    let select = match statement.as_select_mut().unwrap() {
        SelectQuery::Select(select) => select,
        other => panic!("expected a plain select, got {:?}", other),
    };
    let condition = select.where_clause.condition.as_mut().unwrap();
    let terms = match condition {
        Expression::Logical(logical) => &mut logical.terms,
        other => panic!("expected a disjunction, got {:?}", other),
    };

    match &mut terms[0] {
        Expression::In(in_expr) => match &mut in_expr.rhs {
            InRhs::Subquery(query) => {
                query.union(parser.parse_select_statement("select id from quux").unwrap());
            }
            other => panic!("expected an IN subquery, got {:?}", other),
        },
        other => panic!("expected an IN expression, got {:?}", other),
    }

    match &mut terms[1] {
        Expression::Operator(op) => match op.right.as_deref_mut() {
            Some(Expression::Subselect(subselect)) => {
                subselect.query.except(
                    parser
                        .parse_select_statement("select xyzzy_name from xyzzy")
                        .unwrap(),
                );
            }
            other => panic!("expected an ANY subselect, got {:?}", other),
        },
        other => panic!("expected a comparison, got {:?}", other),
    }

    assert_eq!(
        print(&statement),
        "select * from foo where foo_id in (select id from bar union select id from quux) \
         or foo_name > any(select baz_name from baz except select xyzzy_name from xyzzy)"
    );
}

#[test]
fn test_all_six_combinators() {
    let parser = Parser::new();
    let base = || parser.parse_select_statement("select 1").unwrap();

    let mut q = base();
    q.union(base());
    assert_eq!(print_query(&q), "select 1 union select 1");

    let mut q = base();
    q.union_all(base());
    assert_eq!(print_query(&q), "select 1 union all select 1");

    let mut q = base();
    q.intersect(base());
    assert_eq!(print_query(&q), "select 1 intersect select 1");

    let mut q = base();
    q.intersect_all(base());
    assert_eq!(print_query(&q), "select 1 intersect all select 1");

    let mut q = base();
    q.except(base());
    assert_eq!(print_query(&q), "select 1 except select 1");

    let mut q = base();
    q.except_all(base());
    assert_eq!(print_query(&q), "select 1 except all select 1");
}

#[test]
fn test_operand_with_order_by_keeps_parens() {
    let parser = Parser::new();
    let mut query = parser
        .parse_select_statement("select a from t order by a")
        .unwrap();
    query.union(parser.parse_select_statement("select b from u").unwrap());

    assert_eq!(
        print_query(&query),
        "(select a from t order by a) union select b from u"
    );
}

#[test]
fn test_where_and_or_helpers() {
    let parser = Parser::new();
    let mut statement = parser.parse_statement("select * from t where a = 1").unwrap();

    let select = match statement.as_select_mut().unwrap() {
        SelectQuery::Select(select) => select,
        other => panic!("expected a plain select, got {:?}", other),
    };
    select
        .where_clause
        .and(parser.parse_expression("b = 2").unwrap());
    select
        .where_clause
        .or(parser.parse_expression("c = 3").unwrap());

    // and binds tighter than or, so no parentheses are needed
    assert_eq!(
        print(&statement),
        "select * from t where a = 1 and b = 2 or c = 3"
    );
}
