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

//! SQL rendering
//!
//! [`SqlPrinter`] is a [`Walker`] that turns any AST subtree back into SQL
//! text that re-parses, under the same precedence mode, to a structurally
//! equal tree. The central job is re-parenthesization: parentheses are
//! not stored in the tree, so each operand is wrapped exactly when the
//! precedence tables require it. In [`ParenthesesMode::Compat`] an operand
//! is wrapped whenever either the pre-9.5 or the current table requires
//! it, producing output safe on both eras.

use crate::parser::ast::*;
use crate::parser::precedence::{
    expression_precedence, is_test, level, operator_precedence, set_op_precedence, Assoc,
    PrecedenceMode,
};
use crate::parser::token::{is_keyword_word, is_operator_char};
use crate::walker::Walker;

/// Which era the emitted parentheses target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParenthesesMode {
    /// Parenthesize for 9.5+ precedence only
    #[default]
    Current,
    /// Parenthesize so the output parses identically on all versions
    Compat,
}

/// Printer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PrinterConfig {
    /// One indentation level
    pub indent: String,
    /// Separator between clauses; empty for compact one-line output
    pub linebreak: String,
    /// Soft target line width for list wrapping
    pub wrap: Option<usize>,
    /// Parenthesization era
    pub parentheses: ParenthesesMode,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            linebreak: "\n".to_string(),
            wrap: None,
            parentheses: ParenthesesMode::Current,
        }
    }
}

/// Which operand slot of its parent an expression occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// The SQL-building walker
pub struct SqlPrinter {
    config: PrinterConfig,
    depth: usize,
}

impl Default for SqlPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlPrinter {
    /// A pretty-printing builder: four-space indent, newline separators
    pub fn new() -> Self {
        Self {
            config: PrinterConfig::default(),
            depth: 0,
        }
    }

    /// A single-line builder
    pub fn compact() -> Self {
        Self {
            config: PrinterConfig {
                linebreak: String::new(),
                ..PrinterConfig::default()
            },
            depth: 0,
        }
    }

    pub fn with_config(config: PrinterConfig) -> Self {
        Self { config, depth: 0 }
    }

    /// Render a statement
    pub fn print(&mut self, statement: &Statement) -> String {
        statement.dispatch(self)
    }

    /// Render a SELECT/VALUES query
    pub fn print_query(&mut self, query: &SelectQuery) -> String {
        query.dispatch(self)
    }

    /// Render a scalar expression
    pub fn print_expression(&mut self, expression: &Expression) -> String {
        expression.dispatch(self)
    }

    // ------------------------------------------------------------------
    // Layout helpers
    // ------------------------------------------------------------------

    /// Separator between statement clauses at the current depth
    fn clause_sep(&self) -> String {
        if self.config.linebreak.is_empty() {
            " ".to_string()
        } else {
            format!(
                "{}{}",
                self.config.linebreak,
                self.config.indent.repeat(self.depth)
            )
        }
    }

    fn join_clauses(&self, parts: Vec<String>) -> String {
        parts.join(&self.clause_sep())
    }

    /// Join list items, wrapping lines at the configured width. Embedded
    /// line breaks in items reset the running line length.
    fn implode(&self, glue: &str, items: &[String]) -> String {
        let width = match self.config.wrap {
            Some(w) if !self.config.linebreak.is_empty() => w,
            _ => return items.join(glue),
        };
        let indent = self.config.indent.repeat(self.depth + 1);
        let break_glue = format!("{}{}{}", glue.trim_end(), self.config.linebreak, indent);

        let mut out = String::new();
        let mut line_len = 0usize;
        for (i, item) in items.iter().enumerate() {
            let first_segment = item.split('\n').next().unwrap_or("").len();
            if i > 0 {
                if line_len + glue.len() + first_segment > width {
                    out.push_str(&break_glue);
                    line_len = indent.len();
                } else {
                    out.push_str(glue);
                    line_len += glue.len();
                }
            }
            out.push_str(item);
            match item.rsplit('\n').next() {
                Some(last) if item.contains('\n') => line_len = last.len(),
                _ => line_len += item.len(),
            }
        }
        out
    }

    /// Render a subtree one nesting level deeper
    fn nested<F: FnOnce(&mut Self) -> String>(&mut self, f: F) -> String {
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    /// The precedence eras to check when deciding on parentheses
    fn modes(&self) -> &'static [PrecedenceMode] {
        match self.config.parentheses {
            ParenthesesMode::Current => &[PrecedenceMode::Current],
            ParenthesesMode::Compat => &[PrecedenceMode::Current, PrecedenceMode::Pre95],
        }
    }

    // ------------------------------------------------------------------
    // Parenthesization
    // ------------------------------------------------------------------

    fn parens_rule(parent_prec: u16, parent_assoc: Assoc, child_prec: u16, side: Side) -> bool {
        if child_prec < parent_prec {
            return true;
        }
        if child_prec > parent_prec {
            return false;
        }
        match parent_assoc {
            Assoc::NonAssoc => true,
            Assoc::Right => side == Side::Left,
            Assoc::Left => side == Side::Right,
        }
    }

    /// Print a child expression, parenthesized when any checked era's
    /// tables require it
    fn operand<F>(&mut self, parent: F, side: Side, child: &Expression) -> String
    where
        F: Fn(PrecedenceMode) -> (u16, Assoc),
    {
        let text = child.dispatch(self);
        let needs = self.modes().iter().any(|mode| {
            let (parent_prec, parent_assoc) = parent(*mode);
            let (child_prec, _) = expression_precedence(child, *mode);
            Self::parens_rule(parent_prec, parent_assoc, child_prec, side)
        });
        if needs {
            format!("({})", text)
        } else {
            text
        }
    }

    /// Print a `between` bound: effectively a `b_expr`, so anything that
    /// does not bind at least as tightly as a typecast gets wrapped
    fn b_expr_operand(&mut self, child: &Expression) -> String {
        let text = child.dispatch(self);
        let needs = self.modes().iter().any(|mode| {
            let (child_prec, _) = expression_precedence(child, *mode);
            child_prec < level::TYPECAST
        });
        if needs {
            format!("({})", text)
        } else {
            text
        }
    }

    // ------------------------------------------------------------------
    // Lexical rendering
    // ------------------------------------------------------------------

    /// Render an identifier, quoting unless it is a bare lowercase word
    /// that is not a keyword
    fn identifier(value: &str) -> String {
        let mut chars = value.chars();
        let bare = match chars.next() {
            Some(c) if c.is_ascii_lowercase() || c == '_' => chars
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$'),
            _ => false,
        };
        if bare && !is_keyword_word(value) {
            value.to_string()
        } else {
            format!("\"{}\"", value.replace('"', "\"\""))
        }
    }

    /// Render a string constant: plain quotes when harmless, otherwise
    /// dollar quoting with the smallest tag not occurring in the value
    fn string_literal(value: &str) -> String {
        if !value.contains('\'') && !value.contains('\\') {
            return format!("'{}'", value);
        }
        let mut n = 0usize;
        loop {
            let tag = if n == 0 {
                String::new()
            } else {
                format!("_{}", n)
            };
            let closer = format!("${}$", tag);
            let combined = format!("{}{}", value, closer);
            if combined.find(&closer) == Some(value.len()) {
                return format!("{}{}{}", closer, value, closer);
            }
            n += 1;
        }
    }

    fn qualified_name(name: &QualifiedName) -> String {
        name.parts
            .iter()
            .map(|p| Self::identifier(&p.value))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn name_list(names: &[Identifier]) -> String {
        names
            .iter()
            .map(|n| Self::identifier(&n.value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // ------------------------------------------------------------------
    // Shared fragments
    // ------------------------------------------------------------------

    fn expression_list(&mut self, exprs: &[Expression]) -> String {
        let items: Vec<String> = exprs.iter().map(|e| e.dispatch(self)).collect();
        self.implode(", ", &items)
    }

    fn order_by_fragment(&mut self, elements: &[OrderByElement]) -> String {
        let items: Vec<String> = elements.iter().map(|e| e.dispatch(self)).collect();
        format!("order by {}", self.implode(", ", &items))
    }

    fn indirection_items(&mut self, items: &[IndirectionItem]) -> String {
        let mut out = String::new();
        for item in items {
            match item {
                IndirectionItem::Field(f) => {
                    out.push('.');
                    out.push_str(&Self::identifier(&f.value));
                }
                IndirectionItem::Star => out.push_str(".*"),
                IndirectionItem::Subscript(e) => {
                    out.push('[');
                    out.push_str(&e.dispatch(self));
                    out.push(']');
                }
                IndirectionItem::Slice(lower, upper) => {
                    out.push('[');
                    if let Some(lower) = lower {
                        out.push_str(&lower.dispatch(self));
                    }
                    out.push(':');
                    if let Some(upper) = upper {
                        out.push_str(&upper.dispatch(self));
                    }
                    out.push(']');
                }
            }
        }
        out
    }

    /// `(query)` with the query one level deeper
    fn parenthesized_query(&mut self, query: &SelectQuery) -> String {
        let inner = self.nested(|p| query.dispatch(p));
        format!("({})", inner)
    }

    /// A set-operation operand needs parentheses when it carries its own
    /// tail or WITH clauses, or when set-op precedence demands it
    fn set_op_operand(&mut self, parent_prec: u8, side: Side, operand: &SelectQuery) -> String {
        let prec = set_op_precedence(operand);
        let needs = operand.has_tail_clauses()
            || operand.has_with_clause()
            || match side {
                Side::Left => prec < parent_prec,
                Side::Right => prec <= parent_prec,
            };
        if needs {
            self.parenthesized_query(operand)
        } else {
            operand.dispatch(self)
        }
    }

    /// The call portion shared by plain and aggregate function rendering
    fn call_arguments(&mut self, call: &FunctionCall, distinct: bool) -> String {
        if call.star {
            return "*".to_string();
        }
        let mut parts: Vec<String> = Vec::new();
        for (i, arg) in call.arguments.iter().enumerate() {
            let mut text = arg.dispatch(self);
            if call.variadic && i + 1 == call.arguments.len() {
                text = format!("variadic {}", text);
            }
            parts.push(text);
        }
        let args = self.implode(", ", &parts);
        if distinct {
            format!("distinct {}", args)
        } else {
            args
        }
    }

    /// Names that render without an argument list
    fn is_bare_value_function(name: &QualifiedName) -> bool {
        name.parts.len() == 1
            && matches!(
                name.parts[0].value.as_str(),
                "current_date"
                    | "current_time"
                    | "current_timestamp"
                    | "localtime"
                    | "localtimestamp"
                    | "current_role"
                    | "current_user"
                    | "session_user"
                    | "user"
                    | "current_catalog"
                    | "current_schema"
            )
    }

    fn function_name(name: &QualifiedName) -> String {
        Self::qualified_name(name)
    }

    fn where_fragment(&mut self, keyword: &str, clause: &WhereOrHavingClause) -> Option<String> {
        clause
            .condition
            .as_ref()
            .map(|c| format!("{} {}", keyword, c.dispatch(self)))
    }

    fn returning_fragment(&mut self, returning: &TargetList) -> Option<String> {
        if returning.is_empty() {
            return None;
        }
        let items: Vec<String> = returning.iter().map(|t| t.dispatch(self)).collect();
        Some(format!("returning {}", self.implode(", ", &items)))
    }

    fn alias_fragment(alias: &Option<Identifier>, columns: &[Identifier]) -> String {
        let mut out = String::new();
        if let Some(alias) = alias {
            out.push_str(" as ");
            out.push_str(&Self::identifier(&alias.value));
        }
        if !columns.is_empty() {
            out.push_str(&format!(" ({})", Self::name_list(columns)));
        }
        out
    }

    fn type_name_text(&mut self, type_name: &TypeName) -> String {
        type_name.dispatch(self)
    }
}

impl Walker for SqlPrinter {
    type Output = String;

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn walk_select(&mut self, node: &SelectStatement) -> String {
        let mut clauses: Vec<String> = Vec::new();

        if let Some(with) = &node.with {
            clauses.push(with.dispatch(self));
        }

        let mut head = "select".to_string();
        match &node.distinct {
            Some(DistinctClause::Distinct) => head.push_str(" distinct"),
            Some(DistinctClause::DistinctOn(exprs)) => {
                let list = self.expression_list(exprs);
                head.push_str(&format!(" distinct on ({})", list));
            }
            None => {}
        }
        if !node.targets.is_empty() {
            let items: Vec<String> = node.targets.iter().map(|t| t.dispatch(self)).collect();
            head.push(' ');
            head.push_str(&self.implode(", ", &items));
        }
        clauses.push(head);

        if !node.from.is_empty() {
            let items: Vec<String> = node.from.iter().map(|f| f.dispatch(self)).collect();
            clauses.push(format!("from {}", self.implode(", ", &items)));
        }
        if let Some(fragment) = self.where_fragment("where", &node.where_clause) {
            clauses.push(fragment);
        }
        if !node.group_by.is_empty() {
            let items: Vec<String> = node.group_by.iter().map(|g| g.dispatch(self)).collect();
            clauses.push(format!("group by {}", self.implode(", ", &items)));
        }
        if let Some(fragment) = self.where_fragment("having", &node.having) {
            clauses.push(fragment);
        }
        if !node.windows.is_empty() {
            let items: Vec<String> = node
                .windows
                .iter()
                .map(|w| {
                    let name = w
                        .name
                        .as_ref()
                        .map(|n| Self::identifier(&n.value))
                        .unwrap_or_default();
                    let body = w.dispatch(self);
                    format!("{} as {}", name, body)
                })
                .collect();
            clauses.push(format!("window {}", self.implode(", ", &items)));
        }
        if !node.order_by.is_empty() {
            let fragment = self.order_by_fragment(&node.order_by);
            clauses.push(fragment);
        }
        if let Some(limit) = &node.limit {
            let text = limit.dispatch(self);
            clauses.push(format!("limit {}", text));
        }
        if let Some(offset) = &node.offset {
            let text = offset.dispatch(self);
            clauses.push(format!("offset {}", text));
        }
        for locking in &node.locking {
            clauses.push(locking.dispatch(self));
        }

        self.join_clauses(clauses)
    }

    fn walk_set_op_select(&mut self, node: &SetOpSelect) -> String {
        let prec = if node.op.is_intersect() { 2 } else { 1 };
        let mut clauses: Vec<String> = Vec::new();

        if let Some(with) = &node.with {
            clauses.push(with.dispatch(self));
        }

        let left = self.set_op_operand(prec, Side::Left, &node.left);
        let right = self.set_op_operand(prec, Side::Right, &node.right);
        let op = match node.op {
            SetOperator::Union => "union",
            SetOperator::UnionAll => "union all",
            SetOperator::Intersect => "intersect",
            SetOperator::IntersectAll => "intersect all",
            SetOperator::Except => "except",
            SetOperator::ExceptAll => "except all",
        };
        clauses.push(format!("{} {} {}", left, op, right));

        if !node.order_by.is_empty() {
            let fragment = self.order_by_fragment(&node.order_by);
            clauses.push(fragment);
        }
        if let Some(limit) = &node.limit {
            let text = limit.dispatch(self);
            clauses.push(format!("limit {}", text));
        }
        if let Some(offset) = &node.offset {
            let text = offset.dispatch(self);
            clauses.push(format!("offset {}", text));
        }

        self.join_clauses(clauses)
    }

    fn walk_values(&mut self, node: &ValuesStatement) -> String {
        let mut clauses: Vec<String> = Vec::new();

        if let Some(with) = &node.with {
            clauses.push(with.dispatch(self));
        }

        let rows: Vec<String> = node
            .rows
            .iter()
            .map(|row| {
                let fields: Vec<String> = row.iter().map(|e| e.dispatch(self)).collect();
                format!("({})", fields.join(", "))
            })
            .collect();
        clauses.push(format!("values {}", self.implode(", ", &rows)));

        if !node.order_by.is_empty() {
            let fragment = self.order_by_fragment(&node.order_by);
            clauses.push(fragment);
        }
        if let Some(limit) = &node.limit {
            let text = limit.dispatch(self);
            clauses.push(format!("limit {}", text));
        }
        if let Some(offset) = &node.offset {
            let text = offset.dispatch(self);
            clauses.push(format!("offset {}", text));
        }

        self.join_clauses(clauses)
    }

    fn walk_insert(&mut self, node: &InsertStatement) -> String {
        let mut clauses: Vec<String> = Vec::new();

        if let Some(with) = &node.with {
            clauses.push(with.dispatch(self));
        }

        let mut head = format!("insert into {}", Self::qualified_name(&node.target.relation));
        if let Some(alias) = &node.target.alias {
            head.push_str(" as ");
            head.push_str(&Self::identifier(&alias.value));
        }
        if !node.columns.is_empty() {
            let cols: Vec<String> = node.columns.iter().map(|c| c.dispatch(self)).collect();
            head.push_str(&format!(" ({})", cols.join(", ")));
        }
        clauses.push(head);

        match &node.overriding {
            Some(InsertOverriding::SystemValue) => {
                clauses.push("overriding system value".to_string())
            }
            Some(InsertOverriding::UserValue) => clauses.push("overriding user value".to_string()),
            None => {}
        }

        match &node.source {
            Some(query) => clauses.push(query.dispatch(self)),
            None => clauses.push("default values".to_string()),
        }

        if let Some(on_conflict) = &node.on_conflict {
            clauses.push(on_conflict.dispatch(self));
        }
        if let Some(fragment) = self.returning_fragment(&node.returning) {
            clauses.push(fragment);
        }

        self.join_clauses(clauses)
    }

    fn walk_update(&mut self, node: &UpdateStatement) -> String {
        let mut clauses: Vec<String> = Vec::new();

        if let Some(with) = &node.with {
            clauses.push(with.dispatch(self));
        }

        let mut head = "update ".to_string();
        if node.relation.only {
            head.push_str("only ");
        }
        head.push_str(&Self::qualified_name(&node.relation.relation));
        if let Some(alias) = &node.relation.alias {
            head.push_str(" as ");
            head.push_str(&Self::identifier(&alias.value));
        }
        clauses.push(head);

        let set: Vec<String> = node.set.iter().map(|s| s.dispatch(self)).collect();
        clauses.push(format!("set {}", self.implode(", ", &set)));

        if !node.from.is_empty() {
            let items: Vec<String> = node.from.iter().map(|f| f.dispatch(self)).collect();
            clauses.push(format!("from {}", self.implode(", ", &items)));
        }
        if let Some(fragment) = self.where_fragment("where", &node.where_clause) {
            clauses.push(fragment);
        }
        if let Some(fragment) = self.returning_fragment(&node.returning) {
            clauses.push(fragment);
        }

        self.join_clauses(clauses)
    }

    fn walk_delete(&mut self, node: &DeleteStatement) -> String {
        let mut clauses: Vec<String> = Vec::new();

        if let Some(with) = &node.with {
            clauses.push(with.dispatch(self));
        }

        let mut head = "delete from ".to_string();
        if node.relation.only {
            head.push_str("only ");
        }
        head.push_str(&Self::qualified_name(&node.relation.relation));
        if let Some(alias) = &node.relation.alias {
            head.push_str(" as ");
            head.push_str(&Self::identifier(&alias.value));
        }
        clauses.push(head);

        if !node.using.is_empty() {
            let items: Vec<String> = node.using.iter().map(|f| f.dispatch(self)).collect();
            clauses.push(format!("using {}", self.implode(", ", &items)));
        }
        if let Some(fragment) = self.where_fragment("where", &node.where_clause) {
            clauses.push(fragment);
        }
        if let Some(fragment) = self.returning_fragment(&node.returning) {
            clauses.push(fragment);
        }

        self.join_clauses(clauses)
    }

    // ------------------------------------------------------------------
    // Clauses
    // ------------------------------------------------------------------

    fn walk_with_clause(&mut self, node: &WithClause) -> String {
        let ctes: Vec<String> = node.ctes.iter().map(|c| c.dispatch(self)).collect();
        format!(
            "with {}{}",
            if node.recursive { "recursive " } else { "" },
            self.implode(", ", &ctes)
        )
    }

    fn walk_common_table_expression(&mut self, node: &CommonTableExpression) -> String {
        let mut out = Self::identifier(&node.name.value);
        if !node.columns.is_empty() {
            out.push_str(&format!(" ({})", Self::name_list(&node.columns)));
        }
        let body = self.nested(|p| node.statement.dispatch(p));
        out.push_str(&format!(" as ({})", body));
        out
    }

    fn walk_on_conflict_clause(&mut self, node: &OnConflictClause) -> String {
        let mut out = "on conflict".to_string();
        match &node.target {
            Some(ConflictTarget::IndexParameters(params)) => {
                let elements: Vec<String> =
                    params.elements.iter().map(|e| e.dispatch(self)).collect();
                out.push_str(&format!(" ({})", elements.join(", ")));
                if let Some(condition) = &params.where_clause.condition {
                    let text = condition.dispatch(self);
                    out.push_str(&format!(" where {}", text));
                }
            }
            Some(ConflictTarget::Constraint(name)) => {
                out.push_str(&format!(" on constraint {}", Self::identifier(&name.value)));
            }
            None => {}
        }
        match &node.action {
            OnConflictAction::DoNothing => out.push_str(" do nothing"),
            OnConflictAction::DoUpdate { set, where_clause } => {
                let elements: Vec<String> = set.iter().map(|s| s.dispatch(self)).collect();
                out.push_str(&format!(" do update set {}", elements.join(", ")));
                if let Some(condition) = &where_clause.condition {
                    let text = condition.dispatch(self);
                    out.push_str(&format!(" where {}", text));
                }
            }
        }
        out
    }

    fn walk_locking_element(&mut self, node: &LockingElement) -> String {
        let mut out = match node.strength {
            LockingStrength::Update => "for update".to_string(),
            LockingStrength::NoKeyUpdate => "for no key update".to_string(),
            LockingStrength::Share => "for share".to_string(),
            LockingStrength::KeyShare => "for key share".to_string(),
        };
        if !node.relations.is_empty() {
            let names: Vec<String> = node.relations.iter().map(Self::qualified_name).collect();
            out.push_str(&format!(" of {}", names.join(", ")));
        }
        if node.nowait {
            out.push_str(" nowait");
        }
        if node.skip_locked {
            out.push_str(" skip locked");
        }
        out
    }

    fn walk_window_definition(&mut self, node: &WindowDefinition) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(existing) = &node.existing {
            parts.push(Self::identifier(&existing.value));
        }
        if !node.partition_by.is_empty() {
            let list = self.expression_list(&node.partition_by);
            parts.push(format!("partition by {}", list));
        }
        if !node.order_by.is_empty() {
            parts.push(self.order_by_fragment(&node.order_by));
        }
        if let Some(frame) = &node.frame {
            parts.push(frame.dispatch(self));
        }
        format!("({})", parts.join(" "))
    }

    fn walk_window_frame_clause(&mut self, node: &WindowFrameClause) -> String {
        let units = match node.units {
            WindowFrameUnits::Range => "range",
            WindowFrameUnits::Rows => "rows",
        };
        match &node.end {
            Some(end) => {
                let start = node.start.dispatch(self);
                let end = end.dispatch(self);
                format!("{} between {} and {}", units, start, end)
            }
            None => {
                let start = node.start.dispatch(self);
                format!("{} {}", units, start)
            }
        }
    }

    fn walk_window_frame_bound(&mut self, node: &WindowFrameBound) -> String {
        match node {
            WindowFrameBound::CurrentRow => "current row".to_string(),
            WindowFrameBound::UnboundedPreceding => "unbounded preceding".to_string(),
            WindowFrameBound::UnboundedFollowing => "unbounded following".to_string(),
            WindowFrameBound::Preceding(e) => format!("{} preceding", e.dispatch(self)),
            WindowFrameBound::Following(e) => format!("{} following", e.dispatch(self)),
        }
    }

    fn walk_order_by_element(&mut self, node: &OrderByElement) -> String {
        let mut out = node.expression.dispatch(self);
        match &node.direction {
            Some(OrderDirection::Asc) => out.push_str(" asc"),
            Some(OrderDirection::Desc) => out.push_str(" desc"),
            Some(OrderDirection::Using(op)) => out.push_str(&format!(" using {}", op)),
            None => {}
        }
        match node.nulls {
            Some(NullsOrder::First) => out.push_str(" nulls first"),
            Some(NullsOrder::Last) => out.push_str(" nulls last"),
            None => {}
        }
        out
    }

    fn walk_target_element(&mut self, node: &TargetElement) -> String {
        let mut out = node.expression.dispatch(self);
        if let Some(alias) = &node.alias {
            out.push_str(" as ");
            out.push_str(&Self::identifier(&alias.value));
        }
        out
    }

    fn walk_set_target_element(&mut self, node: &SetTargetElement) -> String {
        let mut out = Self::identifier(&node.name.value);
        out.push_str(&self.indirection_items(&node.indirection));
        out
    }

    fn walk_set_clause_element(&mut self, node: &SetClauseElement) -> String {
        match node {
            SetClauseElement::Single { target, value } => {
                let target = target.dispatch(self);
                let value = value.dispatch(self);
                format!("{} = {}", target, value)
            }
            SetClauseElement::Multiple { targets, source } => {
                let targets: Vec<String> = targets.iter().map(|t| t.dispatch(self)).collect();
                let source = match source {
                    MultipleSetSource::Row(row) => {
                        let fields: Vec<String> = row.iter().map(|e| e.dispatch(self)).collect();
                        format!("({})", fields.join(", "))
                    }
                    MultipleSetSource::Subquery(query) => self.parenthesized_query(query),
                };
                format!("({}) = {}", targets.join(", "), source)
            }
        }
    }

    fn walk_index_element(&mut self, node: &IndexElement) -> String {
        let mut out = match &node.expression {
            e @ (Expression::ColumnRef(_)
            | Expression::FunctionCall(_)
            | Expression::FunctionExpr(_)) => e.dispatch(self),
            e => {
                let text = e.dispatch(self);
                format!("({})", text)
            }
        };
        if let Some(collation) = &node.collation {
            out.push_str(&format!(" collate {}", Self::qualified_name(collation)));
        }
        if let Some(op_class) = &node.op_class {
            out.push_str(&format!(" {}", Self::qualified_name(op_class)));
        }
        match &node.direction {
            Some(OrderDirection::Asc) => out.push_str(" asc"),
            Some(OrderDirection::Desc) => out.push_str(" desc"),
            Some(OrderDirection::Using(op)) => out.push_str(&format!(" using {}", op)),
            None => {}
        }
        match node.nulls {
            Some(NullsOrder::First) => out.push_str(" nulls first"),
            Some(NullsOrder::Last) => out.push_str(" nulls last"),
            None => {}
        }
        out
    }

    // ------------------------------------------------------------------
    // Scalar expressions
    // ------------------------------------------------------------------

    fn walk_constant(&mut self, node: &Constant) -> String {
        match node.kind {
            ConstantKind::Integer | ConstantKind::Float => node.value.clone(),
            ConstantKind::Bool => node.value.clone(),
            ConstantKind::Null => "null".to_string(),
            ConstantKind::String => Self::string_literal(&node.value),
            ConstantKind::BitString => {
                let (prefix, digits) = node.value.split_at(1);
                format!("{}'{}'", prefix, digits)
            }
        }
    }

    fn walk_parameter(&mut self, node: &Parameter) -> String {
        match node {
            Parameter::Positional(index) => format!("${}", index),
            Parameter::Named(name) => format!(":{}", name),
        }
    }

    fn walk_column_reference(&mut self, node: &ColumnReference) -> String {
        let mut out = node
            .parts
            .iter()
            .map(|p| Self::identifier(&p.value))
            .collect::<Vec<_>>()
            .join(".");
        if node.star {
            out.push_str(".*");
        }
        out
    }

    fn walk_star(&mut self, _node: &Star) -> String {
        "*".to_string()
    }

    fn walk_indirection(&mut self, node: &Indirection) -> String {
        // A bare column base followed by `.field` would re-parse as a
        // longer column reference, so only subscripting may stay bare;
        // parameters and subselects are unambiguous either way.
        let bare = match node.base.as_ref() {
            Expression::Parameter(_) | Expression::Subselect(_) => true,
            Expression::ColumnRef(c) if !c.star => matches!(
                node.items.first(),
                Some(IndirectionItem::Subscript(_) | IndirectionItem::Slice(_, _))
            ),
            _ => false,
        };
        let base = if bare {
            node.base.dispatch(self)
        } else {
            let text = node.base.dispatch(self);
            format!("({})", text)
        };
        format!("{}{}", base, self.indirection_items(&node.items))
    }

    fn walk_operator_expression(&mut self, node: &OperatorExpression) -> String {
        let op = node.operator.clone();
        let kind = node.kind();
        let parent = move |mode: PrecedenceMode| operator_precedence(&op, kind, mode);

        match kind {
            OperatorKind::Prefix => {
                let operand = self.operand(&parent, Side::Right, node.right.as_ref().unwrap());
                let symbolic = !node
                    .operator
                    .chars()
                    .next()
                    .map(|c| c.is_ascii_alphabetic())
                    .unwrap_or(false);
                if symbolic {
                    // avoid gluing into a longer operator or a comment
                    let first = operand.chars().next().unwrap_or(' ');
                    if is_operator_char(first) {
                        format!("{} {}", node.operator, operand)
                    } else {
                        format!("{}{}", node.operator, operand)
                    }
                } else {
                    format!("{} {}", node.operator, operand)
                }
            }
            OperatorKind::Postfix => {
                let operand = self.operand(&parent, Side::Left, node.left.as_ref().unwrap());
                format!("{} {}", operand, node.operator)
            }
            OperatorKind::Binary => {
                let left = self.operand(&parent, Side::Left, node.left.as_ref().unwrap());
                let right = self.operand(&parent, Side::Right, node.right.as_ref().unwrap());
                format!("{} {} {}", left, node.operator, right)
            }
        }
    }

    fn walk_logical_expression(&mut self, node: &LogicalExpression) -> String {
        let (word, prec) = match node.operator {
            LogicalOperator::And => ("and", level::AND),
            LogicalOperator::Or => ("or", level::OR),
        };
        let parent = move |_mode: PrecedenceMode| (prec, Assoc::Left);
        let parts: Vec<String> = node
            .terms
            .iter()
            .enumerate()
            .map(|(i, term)| {
                let side = if i == 0 { Side::Left } else { Side::Right };
                self.operand(&parent, side, term)
            })
            .collect();
        self.implode(&format!(" {} ", word), &parts)
    }

    fn walk_between_expression(&mut self, node: &BetweenExpression) -> String {
        let parent = |_mode: PrecedenceMode| (level::BETWEEN, Assoc::NonAssoc);
        let argument = self.operand(&parent, Side::Left, &node.argument);
        let lower = self.b_expr_operand(&node.lower);
        let upper = self.b_expr_operand(&node.upper);
        format!("{} {} {} and {}", argument, node.operator, lower, upper)
    }

    fn walk_pattern_matching_expression(&mut self, node: &PatternMatchingExpression) -> String {
        let parent = |_mode: PrecedenceMode| (level::PATTERN, Assoc::NonAssoc);
        let argument = self.operand(&parent, Side::Left, &node.argument);
        let pattern = self.operand(&parent, Side::Right, &node.pattern);
        let mut out = format!("{} {} {}", argument, node.operator, pattern);
        if let Some(escape) = &node.escape {
            let escape = self.operand(&parent, Side::Right, escape);
            out.push_str(&format!(" escape {}", escape));
        }
        out
    }

    fn walk_in_expression(&mut self, node: &InExpression) -> String {
        let parent = |_mode: PrecedenceMode| (level::IN, Assoc::NonAssoc);
        let argument = self.operand(&parent, Side::Left, &node.argument);
        let rhs = match &node.rhs {
            InRhs::List(list) => {
                let items: Vec<String> = list.iter().map(|e| e.dispatch(self)).collect();
                format!("({})", items.join(", "))
            }
            InRhs::Subquery(query) => self.parenthesized_query(query),
        };
        format!(
            "{} {} {}",
            argument,
            if node.not { "not in" } else { "in" },
            rhs
        )
    }

    fn walk_is_of_expression(&mut self, node: &IsOfExpression) -> String {
        let parent = |mode: PrecedenceMode| (is_test(mode), Assoc::NonAssoc);
        let argument = self.operand(&parent, Side::Left, &node.argument);
        let types: Vec<String> = node.types.iter().map(|t| self.type_name_text(t)).collect();
        format!(
            "{} {} ({})",
            argument,
            if node.not { "is not of" } else { "is of" },
            types.join(", ")
        )
    }

    fn walk_collate_expression(&mut self, node: &CollateExpression) -> String {
        let parent = |_mode: PrecedenceMode| (level::COLLATE, Assoc::Left);
        let argument = self.operand(&parent, Side::Left, &node.argument);
        format!("{} collate {}", argument, Self::qualified_name(&node.collation))
    }

    fn walk_typecast_expression(&mut self, node: &TypecastExpression) -> String {
        let parent = |_mode: PrecedenceMode| (level::TYPECAST, Assoc::Left);
        let argument = self.operand(&parent, Side::Left, &node.argument);
        let type_text = self.type_name_text(&node.type_name);
        format!("{}::{}", argument, type_text)
    }

    fn walk_case_expression(&mut self, node: &CaseExpression) -> String {
        let mut out = "case".to_string();
        if let Some(argument) = &node.argument {
            out.push(' ');
            out.push_str(&argument.dispatch(self));
        }
        for when in &node.when_clauses {
            out.push(' ');
            out.push_str(&when.dispatch(self));
        }
        if let Some(else_clause) = &node.else_clause {
            out.push_str(" else ");
            out.push_str(&else_clause.dispatch(self));
        }
        out.push_str(" end");
        out
    }

    fn walk_when_expression(&mut self, node: &WhenExpression) -> String {
        let condition = node.condition.dispatch(self);
        let result = node.result.dispatch(self);
        format!("when {} then {}", condition, result)
    }

    fn walk_function_call(&mut self, node: &FunctionCall) -> String {
        if Self::is_bare_value_function(&node.name) {
            let name = node.name.parts[0].value.clone();
            if node.arguments.is_empty() {
                return name;
            }
            let args = self.expression_list(&node.arguments);
            return format!("{}({})", name, args);
        }
        let args = self.call_arguments(node, false);
        format!("{}({})", Self::function_name(&node.name), args)
    }

    fn walk_function_expression(&mut self, node: &FunctionExpression) -> String {
        let mut out = format!("{}(", Self::function_name(&node.call.name));
        let args = self.call_arguments(&node.call, node.distinct);
        out.push_str(&args);
        if !node.within_group && !node.order_by.is_empty() {
            out.push(' ');
            out.push_str(&self.order_by_fragment(&node.order_by));
        }
        out.push(')');

        if node.within_group {
            let order = self.order_by_fragment(&node.order_by);
            out.push_str(&format!(" within group ({})", order));
        }
        if let Some(filter) = &node.filter {
            let condition = filter.dispatch(self);
            out.push_str(&format!(" filter (where {})", condition));
        }
        if let Some(over) = &node.over {
            let window = over.dispatch(self);
            out.push_str(&format!(" over {}", window));
        }
        out
    }

    fn walk_array_expression(&mut self, node: &ArrayExpression) -> String {
        let items = self.expression_list(&node.elements);
        format!("array[{}]", items)
    }

    fn walk_row_expression(&mut self, node: &RowExpression) -> String {
        let fields: Vec<String> = node.fields.iter().map(|e| e.dispatch(self)).collect();
        if node.explicit || node.fields.len() < 2 {
            format!("row({})", fields.join(", "))
        } else {
            format!("({})", fields.join(", "))
        }
    }

    fn walk_subselect_expression(&mut self, node: &SubselectExpression) -> String {
        let query = self.parenthesized_query(&node.query);
        match node.operator {
            Some(op) => format!("{}{}", op.as_str(), query),
            None => query,
        }
    }

    fn walk_grouping_expression(&mut self, node: &GroupingExpression) -> String {
        let args = self.expression_list(&node.arguments);
        format!("grouping({})", args)
    }

    fn walk_set_to_default(&mut self, _node: &SetToDefault) -> String {
        "default".to_string()
    }

    // ------------------------------------------------------------------
    // Names and types
    // ------------------------------------------------------------------

    fn walk_identifier(&mut self, node: &Identifier) -> String {
        Self::identifier(&node.value)
    }

    fn walk_qualified_name(&mut self, node: &QualifiedName) -> String {
        Self::qualified_name(node)
    }

    fn walk_type_name(&mut self, node: &PlainTypeName) -> String {
        let mut out = String::new();
        if node.setof {
            out.push_str("setof ");
        }
        out.push_str(&Self::qualified_name(&node.name));
        if !node.modifiers.is_empty() {
            let mods = self.expression_list(&node.modifiers);
            out.push_str(&format!("({})", mods));
        }
        for bound in &node.array_bounds {
            match bound {
                Some(n) => out.push_str(&format!("[{}]", n)),
                None => out.push_str("[]"),
            }
        }
        out
    }

    fn walk_interval_type_name(&mut self, node: &IntervalTypeName) -> String {
        let mut out = "interval".to_string();
        if let Some(mask) = &node.mask {
            out.push(' ');
            out.push_str(mask);
            if let Some(precision) = &node.precision {
                out.push_str(&format!("({})", precision));
            }
        } else if let Some(precision) = &node.precision {
            out.push_str(&format!("({})", precision));
        }
        out
    }

    // ------------------------------------------------------------------
    // Range items
    // ------------------------------------------------------------------

    fn walk_relation_reference(&mut self, node: &RelationReference) -> String {
        let mut out = String::new();
        if node.inherit == Some(false) {
            out.push_str("only ");
        }
        out.push_str(&Self::qualified_name(&node.name));
        if node.inherit == Some(true) {
            out.push_str(" *");
        }
        out.push_str(&Self::alias_fragment(&node.alias, &node.column_aliases));
        out
    }

    fn walk_range_function_call(&mut self, node: &RangeFunctionCall) -> String {
        let mut out = String::new();
        if node.lateral {
            out.push_str("lateral ");
        }
        out.push_str(&self.walk_function_call(&node.function));
        if node.ordinality {
            out.push_str(" with ordinality");
        }
        if !node.column_definitions.is_empty() {
            let defs: Vec<String> = node
                .column_definitions
                .iter()
                .map(|d| d.dispatch(self))
                .collect();
            match &node.alias {
                Some(alias) => out.push_str(&format!(
                    " as {} ({})",
                    Self::identifier(&alias.value),
                    defs.join(", ")
                )),
                None => out.push_str(&format!(" as ({})", defs.join(", "))),
            }
        } else {
            out.push_str(&Self::alias_fragment(&node.alias, &node.column_aliases));
        }
        out
    }

    fn walk_rows_from(&mut self, node: &RowsFrom) -> String {
        let mut out = String::new();
        if node.lateral {
            out.push_str("lateral ");
        }
        let elements: Vec<String> = node.elements.iter().map(|e| e.dispatch(self)).collect();
        out.push_str(&format!("rows from ({})", elements.join(", ")));
        if node.ordinality {
            out.push_str(" with ordinality");
        }
        out.push_str(&Self::alias_fragment(&node.alias, &node.column_aliases));
        out
    }

    fn walk_rows_from_element(&mut self, node: &RowsFromElement) -> String {
        let mut out = self.walk_function_call(&node.function);
        if !node.column_definitions.is_empty() {
            let defs: Vec<String> = node
                .column_definitions
                .iter()
                .map(|d| d.dispatch(self))
                .collect();
            out.push_str(&format!(" as ({})", defs.join(", ")));
        }
        out
    }

    fn walk_join_expression(&mut self, node: &JoinExpression) -> String {
        let left = node.left.dispatch(self);
        let right = match &node.right {
            // the parser builds join chains left-associatively, so a join
            // as the right operand must keep its parentheses; an aliased
            // join already renders inside its own
            FromItem::Join(join) if join.alias.is_none() => {
                let text = node.right.dispatch(self);
                format!("({})", text)
            }
            other => other.dispatch(self),
        };

        let mut out = match node.kind {
            JoinKind::Cross => format!("{} cross join {}", left, right),
            kind => {
                let word = match kind {
                    JoinKind::Inner => "join",
                    JoinKind::Left => "left join",
                    JoinKind::Right => "right join",
                    JoinKind::Full => "full join",
                    JoinKind::Cross => unreachable!(),
                };
                if node.natural {
                    format!("{} natural {} {}", left, word, right)
                } else {
                    format!("{} {} {}", left, word, right)
                }
            }
        };

        if let Some(on) = &node.on {
            let condition = on.dispatch(self);
            out.push_str(&format!(" on {}", condition));
        } else if !node.using_columns.is_empty() {
            out.push_str(&format!(" using ({})", Self::name_list(&node.using_columns)));
        }

        if let Some(alias) = &node.alias {
            out = format!("({}) as {}", out, Self::identifier(&alias.value));
        }
        out
    }

    fn walk_range_subselect(&mut self, node: &RangeSubselect) -> String {
        let mut out = String::new();
        if node.lateral {
            out.push_str("lateral ");
        }
        out.push_str(&self.parenthesized_query(&node.query));
        out.push_str(&Self::alias_fragment(&node.alias, &node.column_aliases));
        out
    }

    fn walk_xml_table(&mut self, node: &XmlTable) -> String {
        let mut out = String::new();
        if node.lateral {
            out.push_str("lateral ");
        }
        out.push_str("xmltable(");
        if !node.namespaces.is_empty() {
            let namespaces: Vec<String> =
                node.namespaces.iter().map(|n| n.dispatch(self)).collect();
            out.push_str(&format!("xmlnamespaces({}), ", namespaces.join(", ")));
        }
        out.push_str(&node.row_expression.dispatch(self));
        out.push_str(" passing ");
        out.push_str(&node.document_expression.dispatch(self));
        let columns: Vec<String> = node.columns.iter().map(|c| c.dispatch(self)).collect();
        out.push_str(&format!(" columns {}", columns.join(", ")));
        out.push(')');
        out.push_str(&Self::alias_fragment(&node.alias, &node.column_aliases));
        out
    }

    fn walk_table_sample(&mut self, node: &TableSampleClause) -> String {
        let mut out = self.walk_relation_reference(&node.relation);
        let args = self.expression_list(&node.arguments);
        out.push_str(&format!(
            " tablesample {}({})",
            Self::qualified_name(&node.method),
            args
        ));
        if let Some(repeatable) = &node.repeatable {
            let seed = repeatable.dispatch(self);
            out.push_str(&format!(" repeatable ({})", seed));
        }
        out
    }

    fn walk_column_definition(&mut self, node: &ColumnDefinition) -> String {
        let type_text = self.type_name_text(&node.type_name);
        format!("{} {}", Self::identifier(&node.name.value), type_text)
    }

    // ------------------------------------------------------------------
    // XML
    // ------------------------------------------------------------------

    fn walk_xml_element(&mut self, node: &XmlElement) -> String {
        let mut out = format!("xmlelement(name {}", Self::identifier(&node.name.value));
        if !node.attributes.is_empty() {
            let attributes: Vec<String> =
                node.attributes.iter().map(|a| a.dispatch(self)).collect();
            out.push_str(&format!(", xmlattributes({})", attributes.join(", ")));
        }
        for content in &node.content {
            out.push_str(", ");
            out.push_str(&content.dispatch(self));
        }
        out.push(')');
        out
    }

    fn walk_xml_forest(&mut self, node: &XmlForest) -> String {
        let elements: Vec<String> = node.elements.iter().map(|e| e.dispatch(self)).collect();
        format!("xmlforest({})", elements.join(", "))
    }

    fn walk_xml_parse(&mut self, node: &XmlParse) -> String {
        let argument = node.argument.dispatch(self);
        format!(
            "xmlparse({} {}{})",
            if node.document { "document" } else { "content" },
            argument,
            if node.preserve_whitespace {
                " preserve whitespace"
            } else {
                ""
            }
        )
    }

    fn walk_xml_pi(&mut self, node: &XmlPi) -> String {
        let mut out = format!("xmlpi(name {}", Self::identifier(&node.name.value));
        if let Some(content) = &node.content {
            out.push_str(", ");
            out.push_str(&content.dispatch(self));
        }
        out.push(')');
        out
    }

    fn walk_xml_root(&mut self, node: &XmlRoot) -> String {
        let mut out = format!("xmlroot({}, version ", node.xml.dispatch(self));
        match &node.version {
            Some(version) => out.push_str(&version.dispatch(self)),
            None => out.push_str("no value"),
        }
        match node.standalone {
            Some(XmlStandalone::Yes) => out.push_str(", standalone yes"),
            Some(XmlStandalone::No) => out.push_str(", standalone no"),
            Some(XmlStandalone::NoValue) => out.push_str(", standalone no value"),
            None => {}
        }
        out.push(')');
        out
    }

    fn walk_xml_serialize(&mut self, node: &XmlSerialize) -> String {
        let argument = node.argument.dispatch(self);
        let type_text = self.type_name_text(&node.type_name);
        format!(
            "xmlserialize({} {} as {})",
            if node.document { "document" } else { "content" },
            argument,
            type_text
        )
    }

    fn walk_xml_namespace(&mut self, node: &XmlNamespace) -> String {
        let uri = node.uri.dispatch(self);
        match &node.alias {
            Some(alias) => format!("{} as {}", uri, Self::identifier(&alias.value)),
            None => format!("default {}", uri),
        }
    }

    fn walk_xml_column_definition(&mut self, node: &XmlColumnDefinition) -> String {
        let mut out = Self::identifier(&node.name.value);
        if node.for_ordinality {
            out.push_str(" for ordinality");
            return out;
        }
        if let Some(type_name) = &node.type_name {
            out.push(' ');
            out.push_str(&self.type_name_text(type_name));
        }
        if let Some(path) = &node.path {
            let path = self.b_expr_operand(path);
            out.push_str(&format!(" path {}", path));
        }
        if let Some(default) = &node.default {
            let default = self.b_expr_operand(default);
            out.push_str(&format!(" default {}", default));
        }
        if node.not_null {
            out.push_str(" not null");
        }
        out
    }

    // ------------------------------------------------------------------
    // Grouping
    // ------------------------------------------------------------------

    fn walk_empty_grouping_set(&mut self, _node: &EmptyGroupingSet) -> String {
        "()".to_string()
    }

    fn walk_cube_or_rollup(&mut self, node: &CubeOrRollupClause) -> String {
        let args = self.expression_list(&node.arguments);
        match node.kind {
            CubeOrRollup::Cube => format!("cube({})", args),
            CubeOrRollup::Rollup => format!("rollup({})", args),
        }
    }

    fn walk_grouping_sets(&mut self, node: &GroupingSetsClause) -> String {
        let sets: Vec<String> = node.sets.iter().map(|s| s.dispatch(self)).collect();
        format!("grouping sets ({})", sets.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parser::Parser;

    fn roundtrip(sql: &str) -> String {
        let statement = Parser::new().parse_statement(sql).unwrap();
        SqlPrinter::compact().print(&statement)
    }

    #[test]
    fn test_simple_select() {
        assert_eq!(roundtrip("SELECT * FROM foo"), "select * from foo");
    }

    #[test]
    fn test_precedence_parens_dropped_and_kept() {
        assert_eq!(roundtrip("select (1 + 2) * 3"), "select (1 + 2) * 3");
        assert_eq!(roundtrip("select 1 + (2 * 3)"), "select 1 + 2 * 3");
        assert_eq!(roundtrip("select (a or b) and c"), "select (a or b) and c");
    }

    #[test]
    fn test_left_associative_subtraction() {
        assert_eq!(roundtrip("select 1 - (2 - 3)"), "select 1 - (2 - 3)");
        assert_eq!(roundtrip("select (1 - 2) - 3"), "select 1 - 2 - 3");
    }

    #[test]
    fn test_string_quoting() {
        assert_eq!(roundtrip("select 'plain'"), "select 'plain'");
        assert_eq!(roundtrip("select 'it''s'"), "select $$it's$$");
        let printed = roundtrip(r"select e'both \' and \\ and $$'");
        assert_eq!(printed, r"select $_1$both ' and \ and $$$_1$");
    }

    #[test]
    fn test_identifier_quoting() {
        assert_eq!(roundtrip("select \"SELECT\" from t"), "select \"SELECT\" from t");
        assert_eq!(roundtrip("select \"select\" from t"), "select \"select\" from t");
        assert_eq!(roundtrip("select \"Weird name\""), "select \"Weird name\"");
        assert_eq!(roundtrip("select foo.bar"), "select foo.bar");
    }

    #[test]
    fn test_is_null_printing() {
        assert_eq!(roundtrip("select a isnull"), "select a is null");
        assert_eq!(roundtrip("select a notnull"), "select a is not null");
    }

    #[test]
    fn test_pretty_printing_separates_clauses() {
        let statement = Parser::new()
            .parse_statement("select a from t where a > 1")
            .unwrap();
        let pretty = SqlPrinter::new().print(&statement);
        assert_eq!(pretty, "select a\nfrom t\nwhere a > 1");
    }

    #[test]
    fn test_wrap_breaks_long_lists() {
        let statement = Parser::new()
            .parse_statement("select alpha, beta, gamma, delta, epsilon from t")
            .unwrap();
        let mut printer = SqlPrinter::with_config(PrinterConfig {
            wrap: Some(20),
            ..PrinterConfig::default()
        });
        let printed = printer.print(&statement);
        assert!(printed.contains('\n'));
        let reparsed = Parser::new().parse_statement(&printed).unwrap();
        assert_eq!(statement, reparsed);
    }

    #[test]
    fn test_bare_value_functions() {
        assert_eq!(roundtrip("select current_date"), "select current_date");
        assert_eq!(
            roundtrip("select current_timestamp(3)"),
            "select current_timestamp(3)"
        );
    }

    #[test]
    fn test_compat_mode_adds_parens() {
        let statement = Parser::new()
            .parse_statement("select a = b is null")
            .unwrap();
        let mut compat = SqlPrinter::with_config(PrinterConfig {
            linebreak: String::new(),
            parentheses: ParenthesesMode::Compat,
            ..PrinterConfig::default()
        });
        // under pre-9.5 rules the bare form would parse as a = (b is null)
        assert_eq!(compat.print(&statement), "select (a = b) is null");
    }

    #[test]
    fn test_set_op_parens() {
        assert_eq!(
            roundtrip("select 1 union select 2 union select 3"),
            "select 1 union select 2 union select 3"
        );
        assert_eq!(
            roundtrip("select 1 union (select 2 union select 3)"),
            "select 1 union (select 2 union select 3)"
        );
        assert_eq!(
            roundtrip("select 1 union select 2 intersect select 3"),
            "select 1 union select 2 intersect select 3"
        );
        assert_eq!(
            roundtrip("(select 1 union select 2) intersect select 3"),
            "(select 1 union select 2) intersect select 3"
        );
    }

    #[test]
    fn test_set_op_operand_with_tail_clauses() {
        assert_eq!(
            roundtrip("(select 1 order by 1) union select 2"),
            "(select 1 order by 1) union select 2"
        );
    }

    #[test]
    fn test_typecast_printing() {
        assert_eq!(roundtrip("select cast(x as integer)"), "select x::int4");
        assert_eq!(roundtrip("select int '42'"), "select '42'::int4");
        assert_eq!(
            roundtrip("select interval '1 day'"),
            "select '1 day'::interval"
        );
        assert_eq!(
            roundtrip("select interval '1 2:00' day to second"),
            "select '1 2:00'::interval day to second"
        );
    }

    #[test]
    fn test_between_bounds_wrapped() {
        assert_eq!(
            roundtrip("select x between 1 + 2 and 10"),
            "select x between (1 + 2) and 10"
        );
    }

    #[test]
    fn test_insert_printing() {
        assert_eq!(
            roundtrip("insert into t (a, b) values (1, default) on conflict do nothing"),
            "insert into t (a, b) values (1, default) on conflict do nothing"
        );
    }

    #[test]
    fn test_update_printing() {
        assert_eq!(
            roundtrip("update t set a = 1, (b, c) = (2, 3) where a > 0"),
            "update t set a = 1, (b, c) = (2, 3) where a > 0"
        );
    }

    #[test]
    fn test_delete_printing() {
        assert_eq!(
            roundtrip("delete from only t as x using u where x.id = u.id returning *"),
            "delete from only t as x using u where x.id = u.id returning *"
        );
    }

    #[test]
    fn test_join_printing() {
        assert_eq!(
            roundtrip("select * from a left outer join b on a.x = b.x"),
            "select * from a left join b on a.x = b.x"
        );
        assert_eq!(
            roundtrip("select * from a join (b join c using (y)) using (x)"),
            "select * from a join (b join c using (y)) using (x)"
        );
    }

    #[test]
    fn test_window_printing() {
        assert_eq!(
            roundtrip("select rank() over w from t window w as (order by a)"),
            "select rank() over (w) from t window w as (order by a)"
        );
    }
}
