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

//! Statement and clause parsing
//!
//! SELECT trees are built by climbing over the set operations (INTERSECT
//! binds tighter than UNION/EXCEPT, all left-associative); tail clauses
//! (`order by`, `limit`, `offset`, locking) attach to the outermost node
//! of the tree they follow.

use super::ast::*;
use super::parser::ParseContext;
use super::token::TokenType;
use crate::error::{Result, SyntaxError};

impl ParseContext {
    /// Parse one statement: SELECT/VALUES (with set ops), INSERT, UPDATE
    /// or DELETE, each optionally under a WITH clause
    pub(crate) fn parse_statement(&mut self) -> Result<Statement> {
        let with = if self.cur_is_keyword("with") {
            Some(self.parse_with_clause()?)
        } else {
            None
        };

        if self.cur_is_keyword("select")
            || self.cur_is_keyword("values")
            || self.cur_is_punctuator("(")
        {
            return Ok(Statement::Select(self.parse_select_query_rest(with)?));
        }
        if self.cur_is_keyword("insert") {
            return Ok(Statement::Insert(Box::new(self.parse_insert(with)?)));
        }
        if self.cur_is_keyword("update") {
            return Ok(Statement::Update(Box::new(self.parse_update(with)?)));
        }
        if self.cur_is_keyword("delete") {
            return Ok(Statement::Delete(Box::new(self.parse_delete(with)?)));
        }
        Err(self.unexpected("select, values, insert, update or delete"))
    }

    // ==================================================================
    // SELECT
    // ==================================================================

    /// A full SELECT/VALUES query with set operations and tail clauses
    pub(crate) fn parse_select_query(&mut self) -> Result<SelectQuery> {
        let with = if self.cur_is_keyword("with") {
            Some(self.parse_with_clause()?)
        } else {
            None
        };
        self.parse_select_query_rest(with)
    }

    fn parse_select_query_rest(&mut self, with: Option<WithClause>) -> Result<SelectQuery> {
        let mut query = self.parse_set_op_tree(0)?;
        self.parse_select_tail(&mut query)?;
        if let Some(with) = with {
            match &mut query {
                SelectQuery::Select(s) => s.with = Some(with),
                SelectQuery::SetOp(s) => s.with = Some(with),
                SelectQuery::Values(v) => v.with = Some(with),
            }
        }
        Ok(query)
    }

    /// Left-associative climb over UNION/EXCEPT (1) and INTERSECT (2)
    fn parse_set_op_tree(&mut self, min_prec: u8) -> Result<SelectQuery> {
        let mut left = self.parse_select_operand()?;

        loop {
            let prec = if self.cur_is_keyword("union") || self.cur_is_keyword("except") {
                1
            } else if self.cur_is_keyword("intersect") {
                2
            } else {
                break;
            };
            if prec < min_prec {
                break;
            }

            let keyword = self.cur().literal.clone();
            self.advance();
            let all = self.eat_keyword("all");
            if !all {
                self.eat_keyword("distinct");
            }
            let op = match (keyword.as_str(), all) {
                ("union", false) => SetOperator::Union,
                ("union", true) => SetOperator::UnionAll,
                ("intersect", false) => SetOperator::Intersect,
                ("intersect", true) => SetOperator::IntersectAll,
                ("except", false) => SetOperator::Except,
                (_, true) => SetOperator::ExceptAll,
                _ => unreachable!(),
            };

            let right = self.parse_set_op_tree(prec + 1)?;
            left = SelectQuery::SetOp(Box::new(SetOpSelect {
                with: None,
                op,
                left,
                right,
                order_by: OrderByList::new(),
                limit: None,
                offset: None,
            }));
        }

        Ok(left)
    }

    /// One operand of a set operation: a simple SELECT, a VALUES clause,
    /// or a parenthesized query
    fn parse_select_operand(&mut self) -> Result<SelectQuery> {
        if self.cur_is_punctuator("(") {
            self.advance();
            let query = self.parse_select_query()?;
            self.expect_punctuator(")")?;
            return Ok(query);
        }
        if self.cur_is_keyword("values") {
            return Ok(SelectQuery::Values(Box::new(self.parse_values_clause()?)));
        }
        if self.cur_is_keyword("select") {
            return Ok(SelectQuery::Select(Box::new(self.parse_simple_select()?)));
        }
        Err(self.unexpected("select or values"))
    }

    /// One SELECT without set operations or tail clauses
    fn parse_simple_select(&mut self) -> Result<SelectStatement> {
        self.expect_keyword("select")?;
        let mut stmt = SelectStatement {
            targets: TargetList::with_parser(Vec::new(), self.parser()),
            from: FromList::with_parser(Vec::new(), self.parser()),
            order_by: OrderByList::with_parser(Vec::new(), self.parser()),
            ..SelectStatement::default()
        };

        if self.eat_keyword("distinct") {
            if self.eat_keyword("on") {
                self.expect_punctuator("(")?;
                let mut exprs = vec![self.parse_a_expr()?];
                while self.eat_punctuator(",") {
                    exprs.push(self.parse_a_expr()?);
                }
                self.expect_punctuator(")")?;
                stmt.distinct = Some(DistinctClause::DistinctOn(exprs));
            } else {
                stmt.distinct = Some(DistinctClause::Distinct);
            }
        } else {
            self.eat_keyword("all");
        }

        if !self.target_list_done() {
            stmt.targets = self.parse_target_list()?;
        }

        if self.eat_keyword("from") {
            stmt.from = self.parse_from_list()?;
        }
        if self.eat_keyword("where") {
            stmt.where_clause.set(self.parse_a_expr()?);
        }
        if self.eat_keywords(&["group", "by"]) {
            stmt.group_by = self.parse_group_by_list()?;
        }
        if self.eat_keyword("having") {
            stmt.having.set(self.parse_a_expr()?);
        }
        if self.eat_keyword("window") {
            loop {
                let name = self.expect_col_name()?;
                self.expect_keyword("as")?;
                self.expect_punctuator("(")?;
                let mut window = self.parse_window_specification()?;
                self.expect_punctuator(")")?;
                window.name = Some(name);
                stmt.windows.push(window);
                if !self.eat_punctuator(",") {
                    break;
                }
            }
        }

        Ok(stmt)
    }

    /// True when the cursor sits on whatever follows a (possibly empty)
    /// target list
    fn target_list_done(&self) -> bool {
        match self.cur().token_type {
            TokenType::Eof => true,
            TokenType::Punctuator => matches!(self.cur().literal.as_str(), ";" | ")"),
            TokenType::Keyword(_) => matches!(
                self.cur().literal.as_str(),
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
            ),
            _ => false,
        }
    }

    fn parse_values_clause(&mut self) -> Result<ValuesStatement> {
        self.expect_keyword("values")?;
        let mut rows = Vec::new();
        loop {
            self.expect_punctuator("(")?;
            let mut row = vec![self.parse_a_expr()?];
            while self.eat_punctuator(",") {
                row.push(self.parse_a_expr()?);
            }
            self.expect_punctuator(")")?;
            rows.push(ValuesRow::with_parser(row, self.parser()));
            if !self.eat_punctuator(",") {
                break;
            }
        }
        Ok(ValuesStatement {
            with: None,
            rows,
            order_by: OrderByList::new(),
            limit: None,
            offset: None,
        })
    }

    /// ORDER BY, LIMIT/OFFSET/FETCH and locking clauses following a
    /// query; they attach to the outermost node
    fn parse_select_tail(&mut self, query: &mut SelectQuery) -> Result<()> {
        if self.eat_keywords(&["order", "by"]) {
            let order_by = self.parse_order_by_list()?;
            match query {
                SelectQuery::Select(s) if s.order_by.is_empty() => s.order_by = order_by,
                SelectQuery::SetOp(s) if s.order_by.is_empty() => s.order_by = order_by,
                SelectQuery::Values(v) if v.order_by.is_empty() => v.order_by = order_by,
                _ => {
                    return Err(SyntaxError::new(
                        "multiple ORDER BY clauses not allowed",
                        self.cur().position,
                    )
                    .into())
                }
            }
        }

        let mut limit = None;
        let mut offset = None;
        loop {
            if limit.is_none() && self.eat_keyword("limit") {
                if !self.eat_keyword("all") {
                    limit = Some(self.parse_a_expr()?);
                }
                continue;
            }
            if offset.is_none() && self.eat_keyword("offset") {
                offset = Some(self.parse_a_expr()?);
                if !self.eat_keyword("rows") {
                    self.eat_keyword("row");
                }
                continue;
            }
            if limit.is_none() && self.eat_keyword("fetch") {
                if !self.eat_keyword("first") && !self.eat_keyword("next") {
                    return Err(self.unexpected("first or next"));
                }
                if self.cur_is_keyword("row") || self.cur_is_keyword("rows") {
                    limit = Some(Expression::Constant(Constant::integer("1")));
                } else {
                    limit = Some(self.parse_a_expr()?);
                }
                if !self.eat_keyword("rows") {
                    self.expect_keyword("row")?;
                }
                self.expect_keyword("only")?;
                continue;
            }
            break;
        }

        match query {
            SelectQuery::Select(s) => {
                if limit.is_some() {
                    s.limit = limit;
                }
                if offset.is_some() {
                    s.offset = offset;
                }
                while self.cur_is_keyword("for") {
                    let element = self.parse_locking_element()?;
                    s.locking.push(element);
                }
            }
            SelectQuery::SetOp(s) => {
                if limit.is_some() {
                    s.limit = limit;
                }
                if offset.is_some() {
                    s.offset = offset;
                }
                if self.cur_is_keyword("for") {
                    return Err(SyntaxError::new(
                        "row-level locking is not allowed with set operations",
                        self.cur().position,
                    )
                    .into());
                }
            }
            SelectQuery::Values(v) => {
                if limit.is_some() {
                    v.limit = limit;
                }
                if offset.is_some() {
                    v.offset = offset;
                }
                if self.cur_is_keyword("for") {
                    return Err(SyntaxError::new(
                        "row-level locking is not allowed with VALUES",
                        self.cur().position,
                    )
                    .into());
                }
            }
        }

        Ok(())
    }

    fn parse_locking_element(&mut self) -> Result<LockingElement> {
        self.expect_keyword("for")?;
        let strength = if self.eat_keyword("update") {
            LockingStrength::Update
        } else if self.eat_keywords(&["no", "key", "update"]) {
            LockingStrength::NoKeyUpdate
        } else if self.eat_keyword("share") {
            LockingStrength::Share
        } else if self.eat_keywords(&["key", "share"]) {
            LockingStrength::KeyShare
        } else {
            return Err(self.unexpected("update, no key update, share or key share"));
        };

        let mut relations = Vec::new();
        if self.eat_keyword("of") {
            relations.push(self.parse_qualified_name()?);
            while self.eat_punctuator(",") {
                relations.push(self.parse_qualified_name()?);
            }
        }

        let mut nowait = false;
        let mut skip_locked = false;
        if self.eat_keyword("nowait") {
            nowait = true;
        } else if self.eat_keywords(&["skip", "locked"]) {
            skip_locked = true;
        }

        Ok(LockingElement {
            strength,
            relations,
            nowait,
            skip_locked,
        })
    }

    // ==================================================================
    // WITH
    // ==================================================================

    fn parse_with_clause(&mut self) -> Result<WithClause> {
        self.expect_keyword("with")?;
        let recursive = self.eat_keyword("recursive");
        let mut ctes = Vec::new();
        loop {
            let name = self.expect_col_name()?;
            let columns = if self.cur_is_punctuator("(") {
                self.parse_paren_name_list()?
            } else {
                Vec::new()
            };
            self.expect_keyword("as")?;
            self.expect_punctuator("(")?;
            let statement = self.parse_statement()?;
            self.expect_punctuator(")")?;
            ctes.push(CommonTableExpression {
                name,
                columns,
                statement: Box::new(statement),
            });
            if !self.eat_punctuator(",") {
                break;
            }
        }
        Ok(WithClause { recursive, ctes })
    }

    // ==================================================================
    // Target lists
    // ==================================================================

    pub(crate) fn parse_target_list(&mut self) -> Result<TargetList> {
        let mut elements = vec![self.parse_target_element()?];
        while self.eat_punctuator(",") {
            elements.push(self.parse_target_element()?);
        }
        Ok(TargetList::with_parser(elements, self.parser()))
    }

    pub(crate) fn parse_target_element(&mut self) -> Result<TargetElement> {
        // bare `*` is a target of its own, never a multiplication
        if self.cur_is_operator("*") {
            self.advance();
            return Ok(TargetElement::new(Expression::Star(Star)));
        }

        let expression = self.parse_a_expr()?;
        let alias = if self.eat_keyword("as") {
            Some(self.expect_col_label()?)
        } else if self.cur().can_be_bare_alias() {
            let alias = Identifier::new(self.cur().literal.clone());
            self.advance();
            Some(alias)
        } else {
            None
        };
        Ok(TargetElement { expression, alias })
    }

    // ==================================================================
    // FROM
    // ==================================================================

    pub(crate) fn parse_from_list(&mut self) -> Result<FromList> {
        let mut elements = vec![self.parse_from_item()?];
        while self.eat_punctuator(",") {
            elements.push(self.parse_from_item()?);
        }
        Ok(FromList::with_parser(elements, self.parser()))
    }

    /// A FROM item including any trailing join chain, left-associative
    pub(crate) fn parse_from_item(&mut self) -> Result<FromItem> {
        let mut item = self.parse_base_from_item()?;

        loop {
            if self.peek_join_ahead() {
                item = self.parse_join_rest(item)?;
            } else {
                break;
            }
        }

        Ok(item)
    }

    fn peek_join_ahead(&self) -> bool {
        self.cur_is_keyword("join")
            || self.cur_is_keyword("natural")
            || self.cur_is_keyword("inner")
            || self.cur_is_keyword("left")
            || self.cur_is_keyword("right")
            || self.cur_is_keyword("full")
            || self.cur_is_keyword("cross")
    }

    /// The join keywords and right side; `left` is already parsed
    fn parse_join_rest(&mut self, left: FromItem) -> Result<FromItem> {
        if self.eat_keyword("cross") {
            self.expect_keyword("join")?;
            let right = self.parse_base_from_item()?;
            return Ok(FromItem::Join(Box::new(JoinExpression {
                kind: JoinKind::Cross,
                natural: false,
                left,
                right,
                on: None,
                using_columns: Vec::new(),
                alias: None,
            })));
        }

        let natural = self.eat_keyword("natural");
        let kind = if self.eat_keyword("inner") {
            JoinKind::Inner
        } else if self.eat_keyword("left") {
            self.eat_keyword("outer");
            JoinKind::Left
        } else if self.eat_keyword("right") {
            self.eat_keyword("outer");
            JoinKind::Right
        } else if self.eat_keyword("full") {
            self.eat_keyword("outer");
            JoinKind::Full
        } else {
            JoinKind::Inner
        };
        self.expect_keyword("join")?;

        let right = self.parse_base_from_item()?;

        let mut on = None;
        let mut using_columns = Vec::new();
        if !natural {
            if self.eat_keyword("on") {
                on = Some(self.parse_a_expr()?);
            } else if self.eat_keyword("using") {
                using_columns = self.parse_paren_name_list()?;
            } else {
                return Err(self.unexpected("on or using"));
            }
        }

        Ok(FromItem::Join(Box::new(JoinExpression {
            kind,
            natural,
            left,
            right,
            on,
            using_columns,
            alias: None,
        })))
    }

    /// A FROM item without joins: relation, subquery, function call,
    /// ROWS FROM, XMLTABLE or a parenthesized join
    fn parse_base_from_item(&mut self) -> Result<FromItem> {
        let lateral = self.eat_keyword("lateral");

        if self.cur_is_punctuator("(") {
            self.advance();
            if self.cur_starts_select() {
                let query = self.parse_select_query()?;
                self.expect_punctuator(")")?;
                let (alias, column_aliases) = self.parse_alias_clause(&[])?;
                return Ok(FromItem::Subselect(Box::new(RangeSubselect {
                    lateral,
                    query,
                    alias,
                    column_aliases,
                })));
            }
            // a parenthesized join
            let inner = self.parse_from_item()?;
            self.expect_punctuator(")")?;
            match inner {
                FromItem::Join(mut join) => {
                    let (alias, _) = self.parse_alias_clause(&[])?;
                    if alias.is_some() {
                        join.alias = alias;
                    }
                    return Ok(FromItem::Join(join));
                }
                _ => {
                    return Err(SyntaxError::new(
                        "parenthesized FROM item must be a join or a subquery",
                        self.cur().position,
                    )
                    .into())
                }
            }
        }

        if lateral && self.cur_is_keyword("xmltable") {
            return self.parse_xml_table(true);
        }
        if self.cur_is_keyword("xmltable") {
            return self.parse_xml_table(false);
        }

        if self.cur_is_keyword("rows") && self.peek(1).is_keyword("from") {
            return self.parse_rows_from(lateral);
        }

        if let Some(name) = self.peek_function_name() {
            return self.parse_range_function(lateral, name);
        }

        if lateral {
            return Err(self.unexpected("subquery or function call"));
        }

        // plain relation
        let mut only = false;
        let mut inherit = None;
        if self.eat_keyword("only") {
            only = true;
            inherit = Some(false);
        }
        let name = if only && self.eat_punctuator("(") {
            let name = self.parse_qualified_name()?;
            self.expect_punctuator(")")?;
            name
        } else {
            self.parse_qualified_name()?
        };
        if !only && self.eat_operator("*") {
            inherit = Some(true);
        }

        let (alias, column_aliases) = self.parse_alias_clause(&[])?;
        let relation = RelationReference {
            name,
            inherit,
            alias,
            column_aliases,
        };

        if self.eat_keyword("tablesample") {
            let method = self.parse_qualified_name()?;
            self.expect_punctuator("(")?;
            let mut arguments = vec![self.parse_a_expr()?];
            while self.eat_punctuator(",") {
                arguments.push(self.parse_a_expr()?);
            }
            self.expect_punctuator(")")?;
            let repeatable = if self.eat_keyword("repeatable") {
                self.expect_punctuator("(")?;
                let seed = self.parse_a_expr()?;
                self.expect_punctuator(")")?;
                Some(seed)
            } else {
                None
            };
            return Ok(FromItem::TableSample(Box::new(TableSampleClause {
                relation,
                method,
                arguments,
                repeatable,
            })));
        }

        Ok(FromItem::Relation(relation))
    }

    /// Look ahead for `name[.name...] (` marking a range function call
    fn peek_function_name(&mut self) -> Option<QualifiedName> {
        if !self.cur().can_be_type_func_name() && !self.cur().can_be_col_name() {
            return None;
        }
        let mark = self.mark();
        let mut parts = vec![Identifier::new(self.cur().literal.clone())];
        self.advance();
        while self.cur_is_punctuator(".") {
            if self.peek(1).token_type == TokenType::Identifier
                || matches!(self.peek(1).token_type, TokenType::Keyword(_))
            {
                self.advance();
                parts.push(Identifier::new(self.cur().literal.clone()));
                self.advance();
            } else {
                break;
            }
        }
        if self.cur_is_punctuator("(") {
            Some(QualifiedName::new(parts))
        } else {
            self.reset(mark);
            None
        }
    }

    fn parse_range_function(&mut self, lateral: bool, name: QualifiedName) -> Result<FromItem> {
        let (call, distinct, order_by) = self.parse_call_arguments(name)?;
        if distinct || !order_by.is_empty() {
            return Err(SyntaxError::new(
                "aggregate argument options are not allowed in FROM",
                self.cur().position,
            )
            .into());
        }

        let ordinality = self.eat_keywords(&["with", "ordinality"]);
        let (alias, column_aliases, column_definitions) = self.parse_function_alias()?;

        Ok(FromItem::Function(Box::new(RangeFunctionCall {
            lateral,
            function: call,
            ordinality,
            alias,
            column_aliases,
            column_definitions,
        })))
    }

    fn parse_rows_from(&mut self, lateral: bool) -> Result<FromItem> {
        self.expect_keyword("rows")?;
        self.expect_keyword("from")?;
        self.expect_punctuator("(")?;
        let mut elements = Vec::new();
        loop {
            let name = self
                .peek_function_name()
                .ok_or_else(|| self.unexpected("function call"))?;
            let (call, distinct, order_by) = self.parse_call_arguments(name)?;
            if distinct || !order_by.is_empty() {
                return Err(SyntaxError::new(
                    "aggregate argument options are not allowed in FROM",
                    self.cur().position,
                )
                .into());
            }
            let column_definitions = if self.eat_keyword("as") {
                self.expect_punctuator("(")?;
                let defs = self.parse_column_definitions()?;
                self.expect_punctuator(")")?;
                defs
            } else {
                Vec::new()
            };
            elements.push(RowsFromElement {
                function: call,
                column_definitions,
            });
            if !self.eat_punctuator(",") {
                break;
            }
        }
        self.expect_punctuator(")")?;

        let ordinality = self.eat_keywords(&["with", "ordinality"]);
        let (alias, column_aliases) = self.parse_alias_clause(&[])?;

        Ok(FromItem::RowsFrom(Box::new(RowsFrom {
            lateral,
            elements,
            ordinality,
            alias,
            column_aliases,
        })))
    }

    /// `[as] name [(cols)]`; bare aliases take any column-name-capable
    /// word except the listed ones
    fn parse_alias_clause(
        &mut self,
        disallowed_bare: &[&str],
    ) -> Result<(Option<Identifier>, Vec<Identifier>)> {
        if self.eat_keyword("as") {
            let name = self.expect_col_name()?;
            let columns = if self.cur_is_punctuator("(") {
                self.parse_paren_name_list()?
            } else {
                Vec::new()
            };
            return Ok((Some(name), columns));
        }
        if self.cur().can_be_col_name()
            && !disallowed_bare.contains(&self.cur().literal.as_str())
        {
            let name = Identifier::new(self.cur().literal.clone());
            self.advance();
            let columns = if self.cur_is_punctuator("(") {
                self.parse_paren_name_list()?
            } else {
                Vec::new()
            };
            return Ok((Some(name), columns));
        }
        Ok((None, Vec::new()))
    }

    /// Alias of a range function: plain alias, column aliases or column
    /// definitions (`as (c int4, d text)`)
    fn parse_function_alias(
        &mut self,
    ) -> Result<(Option<Identifier>, Vec<Identifier>, Vec<ColumnDefinition>)> {
        if self.eat_keyword("as") {
            if self.cur_is_punctuator("(") {
                self.advance();
                let defs = self.parse_column_definitions()?;
                self.expect_punctuator(")")?;
                return Ok((None, Vec::new(), defs));
            }
            let name = self.expect_col_name()?;
            if self.cur_is_punctuator("(") {
                return self.parse_function_alias_columns(name);
            }
            return Ok((Some(name), Vec::new(), Vec::new()));
        }
        if self.cur().can_be_col_name() {
            let name = Identifier::new(self.cur().literal.clone());
            self.advance();
            if self.cur_is_punctuator("(") {
                return self.parse_function_alias_columns(name);
            }
            return Ok((Some(name), Vec::new(), Vec::new()));
        }
        Ok((None, Vec::new(), Vec::new()))
    }

    /// After `alias (`: decide between column aliases and column
    /// definitions by whether a type follows the first name
    fn parse_function_alias_columns(
        &mut self,
        name: Identifier,
    ) -> Result<(Option<Identifier>, Vec<Identifier>, Vec<ColumnDefinition>)> {
        let mark = self.mark();
        self.expect_punctuator("(")?;
        let _first = self.expect_col_name()?;
        let is_definition_list =
            !self.cur_is_punctuator(",") && !self.cur_is_punctuator(")");
        self.reset(mark);

        self.expect_punctuator("(")?;
        if is_definition_list {
            let defs = self.parse_column_definitions()?;
            self.expect_punctuator(")")?;
            Ok((Some(name), Vec::new(), defs))
        } else {
            let mut columns = vec![self.expect_col_name()?];
            while self.eat_punctuator(",") {
                columns.push(self.expect_col_name()?);
            }
            self.expect_punctuator(")")?;
            Ok((Some(name), columns, Vec::new()))
        }
    }

    fn parse_column_definitions(&mut self) -> Result<Vec<ColumnDefinition>> {
        let mut defs = Vec::new();
        loop {
            let name = self.expect_col_name()?;
            let type_name = self.parse_type_name()?;
            defs.push(ColumnDefinition { name, type_name });
            if !self.eat_punctuator(",") {
                break;
            }
        }
        Ok(defs)
    }

    /// `( name, name, ... )`
    pub(crate) fn parse_paren_name_list(&mut self) -> Result<Vec<Identifier>> {
        self.expect_punctuator("(")?;
        let mut names = vec![self.expect_col_name()?];
        while self.eat_punctuator(",") {
            names.push(self.expect_col_name()?);
        }
        self.expect_punctuator(")")?;
        Ok(names)
    }

    fn parse_xml_table(&mut self, lateral: bool) -> Result<FromItem> {
        self.expect_keyword("xmltable")?;
        self.expect_punctuator("(")?;

        let mut namespaces = Vec::new();
        if self.eat_keyword("xmlnamespaces") {
            self.expect_punctuator("(")?;
            loop {
                if self.eat_keyword("default") {
                    let uri = self.parse_b_expr()?;
                    namespaces.push(XmlNamespace { uri, alias: None });
                } else {
                    let uri = self.parse_b_expr()?;
                    self.expect_keyword("as")?;
                    let alias = self.expect_col_label()?;
                    namespaces.push(XmlNamespace {
                        uri,
                        alias: Some(alias),
                    });
                }
                if !self.eat_punctuator(",") {
                    break;
                }
            }
            self.expect_punctuator(")")?;
            self.expect_punctuator(",")?;
        }

        let row_expression = self.parse_a_expr()?;
        self.expect_keyword("passing")?;
        self.eat_keywords(&["by", "ref"]);
        let document_expression = self.parse_a_expr()?;
        self.eat_keywords(&["by", "ref"]);

        self.expect_keyword("columns")?;
        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_xml_table_column()?);
            if !self.eat_punctuator(",") {
                break;
            }
        }

        self.expect_punctuator(")")?;
        let (alias, column_aliases) = self.parse_alias_clause(&[])?;

        Ok(FromItem::XmlTable(Box::new(XmlTable {
            lateral,
            namespaces,
            row_expression,
            document_expression,
            columns,
            alias,
            column_aliases,
        })))
    }

    fn parse_xml_table_column(&mut self) -> Result<XmlColumnDefinition> {
        let name = self.expect_col_name()?;

        if self.eat_keywords(&["for", "ordinality"]) {
            return Ok(XmlColumnDefinition {
                name,
                for_ordinality: true,
                type_name: None,
                path: None,
                default: None,
                not_null: false,
            });
        }

        let type_name = self.parse_type_name()?;
        let mut path = None;
        let mut default = None;
        let mut not_null = false;
        loop {
            if path.is_none() && self.eat_keyword("path") {
                path = Some(self.parse_b_expr()?);
                continue;
            }
            if default.is_none() && self.eat_keyword("default") {
                default = Some(self.parse_b_expr()?);
                continue;
            }
            if self.eat_keywords(&["not", "null"]) {
                not_null = true;
                continue;
            }
            if self.eat_keyword("null") {
                not_null = false;
                continue;
            }
            break;
        }

        Ok(XmlColumnDefinition {
            name,
            for_ordinality: false,
            type_name: Some(type_name),
            path,
            default,
            not_null,
        })
    }

    // ==================================================================
    // ORDER BY and GROUP BY
    // ==================================================================

    pub(crate) fn parse_order_by_list(&mut self) -> Result<OrderByList> {
        let mut elements = vec![self.parse_order_by_element()?];
        while self.eat_punctuator(",") {
            elements.push(self.parse_order_by_element()?);
        }
        Ok(OrderByList::with_parser(elements, self.parser()))
    }

    pub(crate) fn parse_order_by_element(&mut self) -> Result<OrderByElement> {
        let expression = self.parse_a_expr()?;

        let direction = if self.eat_keyword("asc") {
            Some(OrderDirection::Asc)
        } else if self.eat_keyword("desc") {
            Some(OrderDirection::Desc)
        } else if self.eat_keyword("using") {
            if self.cur().token_type != TokenType::Operator {
                return Err(self.unexpected("operator"));
            }
            let op = self.cur().literal.clone();
            self.advance();
            Some(OrderDirection::Using(op))
        } else {
            None
        };

        let nulls = if self.eat_keyword("nulls") {
            if self.eat_keyword("first") {
                Some(NullsOrder::First)
            } else if self.eat_keyword("last") {
                Some(NullsOrder::Last)
            } else {
                return Err(self.unexpected("first or last"));
            }
        } else {
            None
        };

        Ok(OrderByElement {
            expression,
            direction,
            nulls,
        })
    }

    pub(crate) fn parse_group_by_list(&mut self) -> Result<Vec<GroupByItem>> {
        let mut items = vec![self.parse_group_by_item()?];
        while self.eat_punctuator(",") {
            items.push(self.parse_group_by_item()?);
        }
        Ok(items)
    }

    fn parse_group_by_item(&mut self) -> Result<GroupByItem> {
        if self.cur_is_punctuator("(") && self.peek(1).is_punctuator(")") {
            self.advance();
            self.advance();
            return Ok(GroupByItem::Empty(EmptyGroupingSet));
        }
        if (self.cur_is_keyword("rollup") || self.cur_is_keyword("cube"))
            && self.peek(1).is_punctuator("(")
        {
            let kind = if self.cur_is_keyword("rollup") {
                CubeOrRollup::Rollup
            } else {
                CubeOrRollup::Cube
            };
            self.advance();
            self.advance();
            let mut arguments = vec![self.parse_a_expr()?];
            while self.eat_punctuator(",") {
                arguments.push(self.parse_a_expr()?);
            }
            self.expect_punctuator(")")?;
            return Ok(GroupByItem::CubeOrRollup(CubeOrRollupClause {
                kind,
                arguments,
            }));
        }
        if self.cur_is_keyword("grouping") && self.peek(1).is_keyword("sets") {
            self.advance();
            self.advance();
            self.expect_punctuator("(")?;
            let mut sets = vec![self.parse_group_by_item()?];
            while self.eat_punctuator(",") {
                sets.push(self.parse_group_by_item()?);
            }
            self.expect_punctuator(")")?;
            return Ok(GroupByItem::GroupingSets(GroupingSetsClause { sets }));
        }
        Ok(GroupByItem::Expression(self.parse_a_expr()?))
    }

    // ==================================================================
    // Window specifications
    // ==================================================================

    /// The inside of `over ( ... )` or a named window definition
    pub(crate) fn parse_window_specification(&mut self) -> Result<WindowDefinition> {
        let mut window = WindowDefinition::default();

        if self.cur().can_be_col_name()
            && !matches!(
                self.cur().literal.as_str(),
                "partition" | "order" | "range" | "rows"
            )
        {
            window.existing = Some(Identifier::new(self.cur().literal.clone()));
            self.advance();
        }

        if self.eat_keywords(&["partition", "by"]) {
            window.partition_by.push(self.parse_a_expr()?);
            while self.eat_punctuator(",") {
                window.partition_by.push(self.parse_a_expr()?);
            }
        }

        if self.eat_keywords(&["order", "by"]) {
            window.order_by = self.parse_order_by_list()?.into_elements();
        }

        if self.cur_is_keyword("range") || self.cur_is_keyword("rows") {
            let units = if self.cur_is_keyword("range") {
                WindowFrameUnits::Range
            } else {
                WindowFrameUnits::Rows
            };
            self.advance();

            let (start, end) = if self.eat_keyword("between") {
                let start = self.parse_frame_bound()?;
                self.expect_keyword("and")?;
                let end = self.parse_frame_bound()?;
                (start, Some(end))
            } else {
                (self.parse_frame_bound()?, None)
            };
            window.frame = Some(WindowFrameClause { units, start, end });
        }

        Ok(window)
    }

    fn parse_frame_bound(&mut self) -> Result<WindowFrameBound> {
        if self.eat_keyword("unbounded") {
            if self.eat_keyword("preceding") {
                return Ok(WindowFrameBound::UnboundedPreceding);
            }
            self.expect_keyword("following")?;
            return Ok(WindowFrameBound::UnboundedFollowing);
        }
        if self.eat_keyword("current") {
            self.expect_keyword("row")?;
            return Ok(WindowFrameBound::CurrentRow);
        }
        let offset = self.parse_a_expr()?;
        if self.eat_keyword("preceding") {
            return Ok(WindowFrameBound::Preceding(Box::new(offset)));
        }
        self.expect_keyword("following")?;
        Ok(WindowFrameBound::Following(Box::new(offset)))
    }

    // ==================================================================
    // INSERT
    // ==================================================================

    fn parse_insert(&mut self, with: Option<WithClause>) -> Result<InsertStatement> {
        self.expect_keyword("insert")?;
        self.expect_keyword("into")?;
        let relation = self.parse_qualified_name()?;
        let alias = if self.eat_keyword("as") {
            Some(self.expect_col_name()?)
        } else {
            None
        };

        let mut columns = InsertTargetList::with_parser(Vec::new(), self.parser());
        if self.cur_is_punctuator("(") {
            // a target column list, unless the parenthesis opens the
            // source query itself
            let mark = self.mark();
            self.advance();
            if self.cur_starts_select() || self.cur_is_punctuator("(") {
                self.reset(mark);
            } else {
                let mut elements = vec![self.parse_set_target_element()?];
                while self.eat_punctuator(",") {
                    elements.push(self.parse_set_target_element()?);
                }
                self.expect_punctuator(")")?;
                columns = InsertTargetList::with_parser(elements, self.parser());
            }
        }

        let overriding = if self.eat_keyword("overriding") {
            let kind = if self.eat_keyword("system") {
                InsertOverriding::SystemValue
            } else if self.eat_keyword("user") {
                InsertOverriding::UserValue
            } else {
                return Err(self.unexpected("system or user"));
            };
            self.expect_keyword("value")?;
            Some(kind)
        } else {
            None
        };

        let source = if self.eat_keywords(&["default", "values"]) {
            None
        } else {
            Some(self.parse_select_query()?)
        };

        let on_conflict = if self.eat_keywords(&["on", "conflict"]) {
            Some(self.parse_on_conflict()?)
        } else {
            None
        };

        let returning = if self.eat_keyword("returning") {
            self.parse_target_list()?
        } else {
            TargetList::with_parser(Vec::new(), self.parser())
        };

        Ok(InsertStatement {
            with,
            target: InsertTarget { relation, alias },
            columns,
            overriding,
            source,
            on_conflict,
            returning,
        })
    }

    fn parse_on_conflict(&mut self) -> Result<OnConflictClause> {
        let target = if self.cur_is_punctuator("(") {
            let mut parameters = IndexParameters::default();
            self.advance();
            parameters.elements.push(self.parse_index_element()?);
            while self.eat_punctuator(",") {
                parameters.elements.push(self.parse_index_element()?);
            }
            self.expect_punctuator(")")?;
            if self.eat_keyword("where") {
                parameters.where_clause.set(self.parse_a_expr()?);
            }
            Some(ConflictTarget::IndexParameters(parameters))
        } else if self.eat_keywords(&["on", "constraint"]) {
            Some(ConflictTarget::Constraint(self.expect_col_name()?))
        } else {
            None
        };

        self.expect_keyword("do")?;
        let action = if self.eat_keyword("nothing") {
            OnConflictAction::DoNothing
        } else {
            self.expect_keyword("update")?;
            self.expect_keyword("set")?;
            let set = self.parse_set_clause_list()?;
            let mut where_clause = WhereOrHavingClause::default();
            if self.eat_keyword("where") {
                where_clause.set(self.parse_a_expr()?);
            }
            OnConflictAction::DoUpdate { set, where_clause }
        };

        Ok(OnConflictClause { target, action })
    }

    fn parse_index_element(&mut self) -> Result<IndexElement> {
        let expression = if self.cur_is_punctuator("(") {
            self.advance();
            let expr = self.parse_a_expr()?;
            self.expect_punctuator(")")?;
            expr
        } else {
            self.parse_b_expr()?
        };

        let collation = if self.eat_keyword("collate") {
            Some(self.parse_qualified_name()?)
        } else {
            None
        };

        let op_class = if self.cur().can_be_col_name()
            && !matches!(self.cur().literal.as_str(), "nulls")
        {
            Some(self.parse_qualified_name()?)
        } else {
            None
        };

        let direction = if self.eat_keyword("asc") {
            Some(OrderDirection::Asc)
        } else if self.eat_keyword("desc") {
            Some(OrderDirection::Desc)
        } else {
            None
        };

        let nulls = if self.eat_keyword("nulls") {
            if self.eat_keyword("first") {
                Some(NullsOrder::First)
            } else if self.eat_keyword("last") {
                Some(NullsOrder::Last)
            } else {
                return Err(self.unexpected("first or last"));
            }
        } else {
            None
        };

        Ok(IndexElement {
            expression,
            collation,
            op_class,
            direction,
            nulls,
        })
    }

    // ==================================================================
    // UPDATE and DELETE
    // ==================================================================

    fn parse_update(&mut self, with: Option<WithClause>) -> Result<UpdateStatement> {
        self.expect_keyword("update")?;
        let relation = self.parse_update_or_delete_target(&["set"])?;
        self.expect_keyword("set")?;
        let set = self.parse_set_clause_list()?;

        let from = if self.eat_keyword("from") {
            self.parse_from_list()?
        } else {
            FromList::with_parser(Vec::new(), self.parser())
        };

        let mut where_clause = WhereOrHavingClause::default();
        if self.eat_keyword("where") {
            where_clause.set(self.parse_a_expr()?);
        }

        let returning = if self.eat_keyword("returning") {
            self.parse_target_list()?
        } else {
            TargetList::with_parser(Vec::new(), self.parser())
        };

        Ok(UpdateStatement {
            with,
            relation,
            set,
            from,
            where_clause,
            returning,
        })
    }

    fn parse_delete(&mut self, with: Option<WithClause>) -> Result<DeleteStatement> {
        self.expect_keyword("delete")?;
        self.expect_keyword("from")?;
        let relation = self.parse_update_or_delete_target(&["using"])?;

        let using = if self.eat_keyword("using") {
            self.parse_from_list()?
        } else {
            FromList::with_parser(Vec::new(), self.parser())
        };

        let mut where_clause = WhereOrHavingClause::default();
        if self.eat_keyword("where") {
            where_clause.set(self.parse_a_expr()?);
        }

        let returning = if self.eat_keyword("returning") {
            self.parse_target_list()?
        } else {
            TargetList::with_parser(Vec::new(), self.parser())
        };

        Ok(DeleteStatement {
            with,
            relation,
            using,
            where_clause,
            returning,
        })
    }

    fn parse_update_or_delete_target(
        &mut self,
        disallowed_bare: &[&str],
    ) -> Result<UpdateOrDeleteTarget> {
        let only = self.eat_keyword("only");
        let relation = self.parse_qualified_name()?;
        if !only {
            self.eat_operator("*");
        }
        let alias = if self.eat_keyword("as") {
            Some(self.expect_col_name()?)
        } else if self.cur().can_be_col_name()
            && !disallowed_bare.contains(&self.cur().literal.as_str())
        {
            let alias = Identifier::new(self.cur().literal.clone());
            self.advance();
            Some(alias)
        } else {
            None
        };
        Ok(UpdateOrDeleteTarget {
            relation,
            only,
            alias,
        })
    }

    // ==================================================================
    // SET clauses
    // ==================================================================

    pub(crate) fn parse_set_clause_list(&mut self) -> Result<Vec<SetClauseElement>> {
        let mut elements = vec![self.parse_set_clause_element()?];
        while self.eat_punctuator(",") {
            elements.push(self.parse_set_clause_element()?);
        }
        Ok(elements)
    }

    fn parse_set_clause_element(&mut self) -> Result<SetClauseElement> {
        if self.cur_is_punctuator("(") {
            self.advance();
            let mut targets = vec![self.parse_set_target_element()?];
            while self.eat_punctuator(",") {
                targets.push(self.parse_set_target_element()?);
            }
            self.expect_punctuator(")")?;

            if !self.eat_operator("=") {
                return Err(self.unexpected("'='"));
            }

            let source = if self.cur_is_punctuator("(") && self.peek(1).is_keyword("select") {
                self.advance();
                let query = self.parse_select_query()?;
                self.expect_punctuator(")")?;
                MultipleSetSource::Subquery(query)
            } else {
                self.eat_keyword("row");
                self.expect_punctuator("(")?;
                let mut row = vec![self.parse_a_expr()?];
                while self.eat_punctuator(",") {
                    row.push(self.parse_a_expr()?);
                }
                self.expect_punctuator(")")?;
                MultipleSetSource::Row(row)
            };
            return Ok(SetClauseElement::Multiple { targets, source });
        }

        let target = self.parse_set_target_element()?;
        if !self.eat_operator("=") {
            return Err(self.unexpected("'='"));
        }
        let value = self.parse_a_expr()?;
        Ok(SetClauseElement::Single { target, value })
    }

    /// A settable column: name plus optional `.field` / `[subscript]`
    /// indirection
    pub(crate) fn parse_set_target_element(&mut self) -> Result<SetTargetElement> {
        let name = self.expect_col_name()?;
        let mut indirection = Vec::new();
        loop {
            if self.cur_is_punctuator(".") {
                self.advance();
                indirection.push(IndirectionItem::Field(self.expect_col_label()?));
                continue;
            }
            if self.cur_is_punctuator("[") {
                self.advance();
                indirection.push(self.parse_subscript()?);
                continue;
            }
            break;
        }
        Ok(SetTargetElement { name, indirection })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parser::Parser;

    fn stmt(sql: &str) -> Statement {
        Parser::new().parse_statement(sql).unwrap()
    }

    fn select(sql: &str) -> SelectStatement {
        match Parser::new().parse_select_statement(sql).unwrap() {
            SelectQuery::Select(s) => *s,
            other => panic!("expected a plain select, got {:?}", other),
        }
    }

    #[test]
    fn test_minimal_select() {
        let s = select("select 1");
        assert_eq!(s.targets.len(), 1);
        assert!(s.from.is_empty());
    }

    #[test]
    fn test_empty_target_list() {
        let s = select("select from foo");
        assert!(s.targets.is_empty());
        assert_eq!(s.from.len(), 1);
    }

    #[test]
    fn test_select_clauses() {
        let s = select(
            "select a, b as c from t where a > 1 group by a, b having count(*) > 2 \
             order by a desc nulls last limit 10 offset 5",
        );
        assert_eq!(s.targets.len(), 2);
        assert_eq!(s.targets[1].alias.as_ref().unwrap().value, "c");
        assert!(!s.where_clause.is_empty());
        assert_eq!(s.group_by.len(), 2);
        assert!(!s.having.is_empty());
        assert_eq!(s.order_by.len(), 1);
        assert_eq!(s.order_by[0].nulls, Some(NullsOrder::Last));
        assert!(s.limit.is_some());
        assert!(s.offset.is_some());
    }

    #[test]
    fn test_distinct_on() {
        let s = select("select distinct on (a, b) a, b, c from t");
        match s.distinct {
            Some(DistinctClause::DistinctOn(exprs)) => assert_eq!(exprs.len(), 2),
            other => panic!("expected distinct on, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_first() {
        let s = select("select * from t fetch first 5 rows only");
        assert!(matches!(
            s.limit,
            Some(Expression::Constant(ref c)) if c.value == "5"
        ));
        let s = select("select * from t fetch first row only");
        assert!(matches!(
            s.limit,
            Some(Expression::Constant(ref c)) if c.value == "1"
        ));
    }

    #[test]
    fn test_set_op_precedence() {
        // a union b intersect c parses as a union (b intersect c)
        match Parser::new()
            .parse_select_statement("select 1 union select 2 intersect select 3")
            .unwrap()
        {
            SelectQuery::SetOp(s) => {
                assert_eq!(s.op, SetOperator::Union);
                match &s.right {
                    SelectQuery::SetOp(inner) => assert_eq!(inner.op, SetOperator::Intersect),
                    other => panic!("expected intersect on the right, got {:?}", other),
                }
            }
            other => panic!("expected set op, got {:?}", other),
        }
    }

    #[test]
    fn test_set_op_left_associative() {
        match Parser::new()
            .parse_select_statement("select 1 except select 2 union all select 3")
            .unwrap()
        {
            SelectQuery::SetOp(s) => {
                assert_eq!(s.op, SetOperator::UnionAll);
                match &s.left {
                    SelectQuery::SetOp(inner) => assert_eq!(inner.op, SetOperator::Except),
                    other => panic!("expected except on the left, got {:?}", other),
                }
            }
            other => panic!("expected set op, got {:?}", other),
        }
    }

    #[test]
    fn test_order_by_attaches_to_set_op() {
        match Parser::new()
            .parse_select_statement("select 1 union select 2 order by 1")
            .unwrap()
        {
            SelectQuery::SetOp(s) => assert_eq!(s.order_by.len(), 1),
            other => panic!("expected set op, got {:?}", other),
        }
    }

    #[test]
    fn test_parenthesized_operand_keeps_tail() {
        match Parser::new()
            .parse_select_statement("(select 1 order by 1) union select 2")
            .unwrap()
        {
            SelectQuery::SetOp(s) => match &s.left {
                SelectQuery::Select(inner) => assert_eq!(inner.order_by.len(), 1),
                other => panic!("expected select on the left, got {:?}", other),
            },
            other => panic!("expected set op, got {:?}", other),
        }
    }

    #[test]
    fn test_values_statement() {
        match Parser::new()
            .parse_select_statement("values (1, 'a'), (2, 'b')")
            .unwrap()
        {
            SelectQuery::Values(v) => {
                assert_eq!(v.rows.len(), 2);
                assert_eq!(v.rows[0].len(), 2);
            }
            other => panic!("expected values, got {:?}", other),
        }
    }

    #[test]
    fn test_with_clause() {
        let s = select("with recursive t(n) as (select 1) select * from t");
        let with = s.with.unwrap();
        assert!(with.recursive);
        assert_eq!(with.ctes.len(), 1);
        assert_eq!(with.ctes[0].name.value, "t");
        assert_eq!(with.ctes[0].columns.len(), 1);
    }

    #[test]
    fn test_with_dml_statement() {
        let s = select("with moved as (delete from old returning id) select * from moved");
        let with = s.with.unwrap();
        assert!(matches!(*with.ctes[0].statement, Statement::Delete(_)));
    }

    #[test]
    fn test_join_chain() {
        let s = select("select * from a join b on a.x = b.x left outer join c using (y)");
        match &s.from[0] {
            FromItem::Join(outer) => {
                assert_eq!(outer.kind, JoinKind::Left);
                assert_eq!(outer.using_columns.len(), 1);
                match &outer.left {
                    FromItem::Join(inner) => {
                        assert_eq!(inner.kind, JoinKind::Inner);
                        assert!(inner.on.is_some());
                    }
                    other => panic!("expected nested join, got {:?}", other),
                }
            }
            other => panic!("expected join, got {:?}", other),
        }
    }

    #[test]
    fn test_natural_and_cross_join() {
        let s = select("select * from a natural join b cross join c");
        match &s.from[0] {
            FromItem::Join(outer) => {
                assert_eq!(outer.kind, JoinKind::Cross);
                match &outer.left {
                    FromItem::Join(inner) => assert!(inner.natural),
                    other => panic!("expected natural join, got {:?}", other),
                }
            }
            other => panic!("expected join, got {:?}", other),
        }
    }

    #[test]
    fn test_range_subselect_and_lateral() {
        let s = select("select * from (select 1) as sub(a), lateral (select sub.a) l");
        assert!(matches!(&s.from[0], FromItem::Subselect(r) if !r.lateral));
        assert!(matches!(&s.from[1], FromItem::Subselect(r) if r.lateral));
    }

    #[test]
    fn test_range_function() {
        let s = select("select * from generate_series(1, 10) with ordinality as g(n, i)");
        match &s.from[0] {
            FromItem::Function(f) => {
                assert!(f.ordinality);
                assert_eq!(f.alias.as_ref().unwrap().value, "g");
                assert_eq!(f.column_aliases.len(), 2);
            }
            other => panic!("expected range function, got {:?}", other),
        }
    }

    #[test]
    fn test_range_function_column_definitions() {
        let s = select("select * from json_to_record('{}') as x(a int4, b text)");
        match &s.from[0] {
            FromItem::Function(f) => {
                assert_eq!(f.column_definitions.len(), 2);
                assert!(f.column_aliases.is_empty());
            }
            other => panic!("expected range function, got {:?}", other),
        }
    }

    #[test]
    fn test_rows_from() {
        let s = select("select * from rows from (f(1), g(2) as (x int4)) with ordinality t");
        match &s.from[0] {
            FromItem::RowsFrom(r) => {
                assert_eq!(r.elements.len(), 2);
                assert!(r.ordinality);
                assert_eq!(r.elements[1].column_definitions.len(), 1);
            }
            other => panic!("expected rows from, got {:?}", other),
        }
    }

    #[test]
    fn test_only_and_inherit() {
        let s = select("select * from only t");
        assert!(matches!(
            &s.from[0],
            FromItem::Relation(r) if r.inherit == Some(false)
        ));
        let s = select("select * from t *");
        assert!(matches!(
            &s.from[0],
            FromItem::Relation(r) if r.inherit == Some(true)
        ));
    }

    #[test]
    fn test_tablesample() {
        let s = select("select * from t as x tablesample bernoulli(10) repeatable (7)");
        match &s.from[0] {
            FromItem::TableSample(ts) => {
                assert_eq!(ts.relation.alias.as_ref().unwrap().value, "x");
                assert_eq!(ts.method.last().value, "bernoulli");
                assert!(ts.repeatable.is_some());
            }
            other => panic!("expected tablesample, got {:?}", other),
        }
    }

    #[test]
    fn test_xmltable() {
        let s = select(
            "select * from xmltable(xmlnamespaces('http://x' as x, default 'http://y'), \
             '/rows/row' passing data columns id int4 path '@id' not null, \
             ord for ordinality, val text default 'none') as t",
        );
        match &s.from[0] {
            FromItem::XmlTable(x) => {
                assert_eq!(x.namespaces.len(), 2);
                assert!(x.namespaces[1].alias.is_none());
                assert_eq!(x.columns.len(), 3);
                assert!(x.columns[0].not_null);
                assert!(x.columns[1].for_ordinality);
                assert!(x.columns[2].default.is_some());
            }
            other => panic!("expected xmltable, got {:?}", other),
        }
    }

    #[test]
    fn test_group_by_forms() {
        let s = select("select a from t group by rollup(a, b), cube(c), grouping sets ((a), ()), ()");
        assert_eq!(s.group_by.len(), 4);
        assert!(matches!(
            &s.group_by[0],
            GroupByItem::CubeOrRollup(c) if c.kind == CubeOrRollup::Rollup
        ));
        assert!(matches!(
            &s.group_by[1],
            GroupByItem::CubeOrRollup(c) if c.kind == CubeOrRollup::Cube
        ));
        match &s.group_by[2] {
            GroupByItem::GroupingSets(g) => {
                assert_eq!(g.sets.len(), 2);
                assert!(matches!(g.sets[1], GroupByItem::Empty(_)));
            }
            other => panic!("expected grouping sets, got {:?}", other),
        }
        assert!(matches!(s.group_by[3], GroupByItem::Empty(_)));
    }

    #[test]
    fn test_window_clause() {
        let s = select(
            "select sum(x) over w from t \
             window w as (partition by a order by b rows between 1 preceding and current row)",
        );
        assert_eq!(s.windows.len(), 1);
        let w = &s.windows[0];
        assert_eq!(w.name.as_ref().unwrap().value, "w");
        let frame = w.frame.as_ref().unwrap();
        assert_eq!(frame.units, WindowFrameUnits::Rows);
        assert!(matches!(frame.start, WindowFrameBound::Preceding(_)));
        assert_eq!(frame.end, Some(WindowFrameBound::CurrentRow));
    }

    #[test]
    fn test_locking_clause() {
        let s = select("select * from t for update of t nowait for key share skip locked");
        assert_eq!(s.locking.len(), 2);
        assert_eq!(s.locking[0].strength, LockingStrength::Update);
        assert!(s.locking[0].nowait);
        assert_eq!(s.locking[1].strength, LockingStrength::KeyShare);
        assert!(s.locking[1].skip_locked);
    }

    #[test]
    fn test_insert_values() {
        match stmt("insert into t (a, b) values (1, default), (2, 3)") {
            Statement::Insert(ins) => {
                assert_eq!(ins.columns.len(), 2);
                match ins.source {
                    Some(SelectQuery::Values(v)) => {
                        assert_eq!(v.rows.len(), 2);
                        assert!(matches!(v.rows[0][1], Expression::SetToDefault(_)));
                    }
                    other => panic!("expected values source, got {:?}", other),
                }
            }
            other => panic!("expected insert, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_select_without_columns() {
        match stmt("insert into t (select * from u)") {
            Statement::Insert(ins) => {
                assert!(ins.columns.is_empty());
                assert!(matches!(ins.source, Some(SelectQuery::Select(_))));
            }
            other => panic!("expected insert, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_default_values_and_overriding() {
        match stmt("insert into t overriding system value default values") {
            Statement::Insert(ins) => {
                assert_eq!(ins.overriding, Some(InsertOverriding::SystemValue));
                assert!(ins.source.is_none());
            }
            other => panic!("expected insert, got {:?}", other),
        }
    }

    #[test]
    fn test_on_conflict_do_update() {
        match stmt(
            "insert into t (a) values (1) on conflict (a) where a > 0 \
             do update set a = excluded.a where t.a < 10 returning a",
        ) {
            Statement::Insert(ins) => {
                let conflict = ins.on_conflict.unwrap();
                match conflict.target {
                    Some(ConflictTarget::IndexParameters(p)) => {
                        assert_eq!(p.elements.len(), 1);
                        assert!(!p.where_clause.is_empty());
                    }
                    other => panic!("expected index parameters, got {:?}", other),
                }
                match conflict.action {
                    OnConflictAction::DoUpdate { set, where_clause } => {
                        assert_eq!(set.len(), 1);
                        assert!(!where_clause.is_empty());
                    }
                    other => panic!("expected do update, got {:?}", other),
                }
                assert_eq!(ins.returning.len(), 1);
            }
            other => panic!("expected insert, got {:?}", other),
        }
    }

    #[test]
    fn test_on_conflict_constraint_do_nothing() {
        match stmt("insert into t values (1) on conflict on constraint t_pkey do nothing") {
            Statement::Insert(ins) => {
                let conflict = ins.on_conflict.unwrap();
                assert!(matches!(
                    conflict.target,
                    Some(ConflictTarget::Constraint(ref c)) if c.value == "t_pkey"
                ));
                assert!(matches!(conflict.action, OnConflictAction::DoNothing));
            }
            other => panic!("expected insert, got {:?}", other),
        }
    }

    #[test]
    fn test_update_forms() {
        match stmt(
            "update only t as x set a = 1, (b, c) = (2, 3), (d, e) = (select 1, 2) \
             from u where x.a = u.a returning *",
        ) {
            Statement::Update(upd) => {
                assert!(upd.relation.only);
                assert_eq!(upd.relation.alias.as_ref().unwrap().value, "x");
                assert_eq!(upd.set.len(), 3);
                assert!(matches!(upd.set[0], SetClauseElement::Single { .. }));
                assert!(matches!(
                    upd.set[1],
                    SetClauseElement::Multiple {
                        source: MultipleSetSource::Row(_),
                        ..
                    }
                ));
                assert!(matches!(
                    upd.set[2],
                    SetClauseElement::Multiple {
                        source: MultipleSetSource::Subquery(_),
                        ..
                    }
                ));
                assert_eq!(upd.from.len(), 1);
                assert_eq!(upd.returning.len(), 1);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_update_set_indirection() {
        match stmt("update t set a[1] = 2, b.c = 3") {
            Statement::Update(upd) => {
                match &upd.set[0] {
                    SetClauseElement::Single { target, .. } => {
                        assert!(matches!(target.indirection[0], IndirectionItem::Subscript(_)));
                    }
                    other => panic!("expected single set clause, got {:?}", other),
                }
                match &upd.set[1] {
                    SetClauseElement::Single { target, .. } => {
                        assert!(matches!(target.indirection[0], IndirectionItem::Field(_)));
                    }
                    other => panic!("expected single set clause, got {:?}", other),
                }
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_using() {
        match stmt("delete from t using u where t.id = u.id returning t.id") {
            Statement::Delete(del) => {
                assert_eq!(del.using.len(), 1);
                assert!(!del.where_clause.is_empty());
                assert_eq!(del.returning.len(), 1);
            }
            other => panic!("expected delete, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_requires_known_verb() {
        assert!(Parser::new().parse_statement("merge into t").is_err());
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(Parser::new().parse_statement("select 1 select 2").is_err());
    }
}
