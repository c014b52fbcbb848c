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

//! Abstract Syntax Tree (AST) types for parsed SQL
//!
//! Nodes form a closed family of tagged variants. They hold no rendering
//! logic; every node exposes `dispatch`, which hands it to the matching
//! `walk_*` method of a [`Walker`](crate::walker::Walker).
//!
//! Child ownership is exclusive: a node lives in exactly one parent slot.
//! The splicing combinators ([`SelectQuery::union`] and friends,
//! [`WhereOrHavingClause::and`]) move the current occupant out of its slot
//! and re-own it inside the new enclosing node, so parent links stay
//! consistent under any sequence of mutations.
//!
//! Operator spellings (`"not between symmetric"`, `"is distinct from"`,
//! ...) are grammar data and are kept as lowercase strings, not enums.

use smallvec::SmallVec;
use std::mem;
use std::ops::{Deref, DerefMut};

use super::parser::Parser;
use crate::error::{Error, Result};
use crate::walker::Walker;

// ============================================================================
// Names and types
// ============================================================================

/// A bare identifier; the value is unquoted and case-folded where the
/// source was unquoted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub value: String,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Identifier {
    pub fn dispatch<W: Walker + ?Sized>(&self, walker: &mut W) -> W::Output {
        walker.walk_identifier(self)
    }
}

/// A possibly-qualified name: up to catalog.schema.relation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub parts: SmallVec<[Identifier; 2]>,
}

impl QualifiedName {
    pub fn new(parts: impl IntoIterator<Item = Identifier>) -> Self {
        Self {
            parts: parts.into_iter().collect(),
        }
    }

    /// A single unqualified name
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            parts: [Identifier::new(name)].into_iter().collect(),
        }
    }

    /// The final (relation or function) component
    pub fn last(&self) -> &Identifier {
        self.parts.last().expect("qualified name has no parts")
    }

    pub fn dispatch<W: Walker + ?Sized>(&self, walker: &mut W) -> W::Output {
        walker.walk_qualified_name(self)
    }
}

/// A type name: optional `setof`, qualified base name, modifiers and array
/// bounds (`None` bound = unspecified dimension)
#[derive(Debug, Clone, PartialEq)]
pub struct PlainTypeName {
    pub setof: bool,
    pub name: QualifiedName,
    pub modifiers: Vec<Expression>,
    pub array_bounds: Vec<Option<u32>>,
}

impl PlainTypeName {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            setof: false,
            name: QualifiedName::single(name),
            modifiers: Vec::new(),
            array_bounds: Vec::new(),
        }
    }
}

/// `interval` with an optional field mask (`day to second`, `year`, ...)
/// and optional precision
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTypeName {
    pub mask: Option<String>,
    pub precision: Option<String>,
}

/// Any type reference usable in casts, `IS OF` lists and column definitions
#[derive(Debug, Clone, PartialEq)]
pub enum TypeName {
    Plain(PlainTypeName),
    Interval(IntervalTypeName),
}

impl TypeName {
    pub fn named(name: impl Into<String>) -> Self {
        TypeName::Plain(PlainTypeName::named(name))
    }

    pub fn dispatch<W: Walker + ?Sized>(&self, walker: &mut W) -> W::Output {
        match self {
            TypeName::Plain(n) => walker.walk_type_name(n),
            TypeName::Interval(n) => walker.walk_interval_type_name(n),
        }
    }
}

// ============================================================================
// Scalar expressions
// ============================================================================

/// Kind of a literal constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantKind {
    Integer,
    Float,
    String,
    /// Bit string; the value keeps its `b`/`x` prefix
    BitString,
    Bool,
    Null,
}

/// A literal constant. Numeric values keep their source spelling, so
/// integers wider than any machine type survive untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub kind: ConstantKind,
    pub value: String,
}

impl Constant {
    pub fn integer(value: impl Into<String>) -> Self {
        Self {
            kind: ConstantKind::Integer,
            value: value.into(),
        }
    }

    pub fn float(value: impl Into<String>) -> Self {
        Self {
            kind: ConstantKind::Float,
            value: value.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self {
            kind: ConstantKind::String,
            value: value.into(),
        }
    }

    pub fn bit_string(value: impl Into<String>) -> Self {
        Self {
            kind: ConstantKind::BitString,
            value: value.into(),
        }
    }

    pub fn bool(value: bool) -> Self {
        Self {
            kind: ConstantKind::Bool,
            value: if value { "true" } else { "false" }.to_string(),
        }
    }

    pub fn null() -> Self {
        Self {
            kind: ConstantKind::Null,
            value: String::new(),
        }
    }
}

/// A query parameter: `$1` or `:name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    Positional(u32),
    Named(String),
}

/// A column reference: an identifier chain with an optional trailing `.*`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReference {
    pub parts: SmallVec<[Identifier; 2]>,
    pub star: bool,
}

impl ColumnReference {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            parts: [Identifier::new(name)].into_iter().collect(),
            star: false,
        }
    }
}

/// One step of an indirection chain
#[derive(Debug, Clone, PartialEq)]
pub enum IndirectionItem {
    /// `.field`
    Field(Identifier),
    /// `.*`
    Star,
    /// `[subscript]`
    Subscript(Box<Expression>),
    /// `[lower:upper]`, either bound may be omitted
    Slice(Option<Box<Expression>>, Option<Box<Expression>>),
}

/// A base expression followed by field selections and subscripts
#[derive(Debug, Clone, PartialEq)]
pub struct Indirection {
    pub base: Box<Expression>,
    pub items: Vec<IndirectionItem>,
}

/// Operator shape, derived from which operands are present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Prefix,
    Postfix,
    Binary,
}

/// A unary or binary operator application. The operator is the lowercase
/// grammar spelling: `"+"`, `"@>"`, `"not"`, `"is null"`, `"overlaps"`,
/// `"at time zone"`, `"is not distinct from"`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorExpression {
    pub operator: String,
    pub left: Option<Box<Expression>>,
    pub right: Option<Box<Expression>>,
}

impl OperatorExpression {
    pub fn binary(operator: impl Into<String>, left: Expression, right: Expression) -> Self {
        Self {
            operator: operator.into(),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn prefix(operator: impl Into<String>, operand: Expression) -> Self {
        Self {
            operator: operator.into(),
            left: None,
            right: Some(Box::new(operand)),
        }
    }

    pub fn postfix(operator: impl Into<String>, operand: Expression) -> Self {
        Self {
            operator: operator.into(),
            left: Some(Box::new(operand)),
            right: None,
        }
    }

    pub fn kind(&self) -> OperatorKind {
        match (&self.left, &self.right) {
            (None, _) => OperatorKind::Prefix,
            (Some(_), None) => OperatorKind::Postfix,
            (Some(_), Some(_)) => OperatorKind::Binary,
        }
    }
}

/// `and` / `or`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

/// N-ary conjunction or disjunction
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub terms: Vec<Expression>,
}

impl LogicalExpression {
    pub fn and(terms: Vec<Expression>) -> Self {
        Self {
            operator: LogicalOperator::And,
            terms,
        }
    }

    pub fn or(terms: Vec<Expression>) -> Self {
        Self {
            operator: LogicalOperator::Or,
            terms,
        }
    }
}

/// `a [not] between [symmetric|asymmetric] lo and hi`; the full spelling
/// lives in `operator`
#[derive(Debug, Clone, PartialEq)]
pub struct BetweenExpression {
    pub operator: String,
    pub argument: Box<Expression>,
    pub lower: Box<Expression>,
    pub upper: Box<Expression>,
}

/// `a [not] {like|ilike|similar to} pattern [escape e]`
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMatchingExpression {
    pub operator: String,
    pub argument: Box<Expression>,
    pub pattern: Box<Expression>,
    pub escape: Option<Box<Expression>>,
}

/// Right-hand side of an `in` test
#[derive(Debug, Clone, PartialEq)]
pub enum InRhs {
    List(Vec<Expression>),
    Subquery(SelectQuery),
}

/// `a [not] in (...)`
#[derive(Debug, Clone, PartialEq)]
pub struct InExpression {
    pub not: bool,
    pub argument: Box<Expression>,
    pub rhs: InRhs,
}

/// `a is [not] of (type, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct IsOfExpression {
    pub not: bool,
    pub argument: Box<Expression>,
    pub types: Vec<TypeName>,
}

/// `a collate collation`
#[derive(Debug, Clone, PartialEq)]
pub struct CollateExpression {
    pub argument: Box<Expression>,
    pub collation: QualifiedName,
}

/// `cast(a as t)`, `a::t` or `t 'literal'`; all three print as `::`-casts
/// except constants, which keep the type-literal form when possible
#[derive(Debug, Clone, PartialEq)]
pub struct TypecastExpression {
    pub argument: Box<Expression>,
    pub type_name: TypeName,
}

/// One arm of a `case` expression
#[derive(Debug, Clone, PartialEq)]
pub struct WhenExpression {
    pub condition: Expression,
    pub result: Expression,
}

/// `case [arg] when ... then ... [else ...] end`
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpression {
    pub argument: Option<Box<Expression>>,
    pub when_clauses: Vec<WhenExpression>,
    pub else_clause: Option<Box<Expression>>,
}

/// A plain function call, also usable as a range item
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: QualifiedName,
    pub arguments: Vec<Expression>,
    /// `count(*)`
    pub star: bool,
    pub variadic: bool,
}

impl FunctionCall {
    pub fn new(name: QualifiedName, arguments: Vec<Expression>) -> Self {
        Self {
            name,
            arguments,
            star: false,
            variadic: false,
        }
    }
}

/// An aggregate- and window-capable function call
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression {
    pub call: FunctionCall,
    pub distinct: bool,
    pub order_by: Vec<OrderByElement>,
    /// The order clause came from `within group (order by ...)`
    pub within_group: bool,
    pub filter: Option<Box<Expression>>,
    pub over: Option<Box<WindowDefinition>>,
}

impl FunctionExpression {
    pub fn plain(call: FunctionCall) -> Self {
        Self {
            call,
            distinct: false,
            order_by: Vec::new(),
            within_group: false,
            filter: None,
            over: None,
        }
    }

    /// True when none of the aggregate or window features are used
    pub fn is_plain(&self) -> bool {
        !self.distinct
            && self.order_by.is_empty()
            && !self.within_group
            && self.filter.is_none()
            && self.over.is_none()
    }
}

/// `array[...]`; nested arrays are elements that are themselves arrays
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    pub elements: Vec<Expression>,
}

/// `row(...)` or a parenthesized expression list
#[derive(Debug, Clone, PartialEq)]
pub struct RowExpression {
    pub fields: Vec<Expression>,
    /// Spelled with the `row` keyword
    pub explicit: bool,
}

/// Prefix of a subquery expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubselectOperator {
    Exists,
    Any,
    All,
    Some,
    Array,
}

impl SubselectOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubselectOperator::Exists => "exists",
            SubselectOperator::Any => "any",
            SubselectOperator::All => "all",
            SubselectOperator::Some => "some",
            SubselectOperator::Array => "array",
        }
    }
}

/// `(select ...)`, `exists(...)`, `any(...)`, `array(...)`
#[derive(Debug, Clone, PartialEq)]
pub struct SubselectExpression {
    pub operator: Option<SubselectOperator>,
    pub query: SelectQuery,
}

/// `grouping(...)` in a grouped query's target list
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpression {
    pub arguments: Vec<Expression>,
}

/// The `default` placeholder in insert rows and set clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetToDefault;

/// Bare `*` in a target list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Star;

// ============================================================================
// XML expressions
// ============================================================================

/// `xmlelement(name n [, xmlattributes(...)] [, content...])`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: Identifier,
    pub attributes: Vec<TargetElement>,
    pub content: Vec<Expression>,
}

/// `xmlforest(expr [as name], ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlForest {
    pub elements: Vec<TargetElement>,
}

/// `xmlparse({document|content} expr [preserve whitespace])`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlParse {
    pub document: bool,
    pub argument: Box<Expression>,
    pub preserve_whitespace: bool,
}

/// `xmlpi(name target [, content])`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlPi {
    pub name: Identifier,
    pub content: Option<Box<Expression>>,
}

/// `standalone` option of `xmlroot`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlStandalone {
    Yes,
    No,
    NoValue,
}

/// `xmlroot(xml, version {expr|no value} [, standalone ...])`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlRoot {
    pub xml: Box<Expression>,
    pub version: Option<Box<Expression>>,
    pub standalone: Option<XmlStandalone>,
}

/// `xmlserialize({document|content} expr as type)`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlSerialize {
    pub document: bool,
    pub argument: Box<Expression>,
    pub type_name: TypeName,
}

// ============================================================================
// The Expression family
// ============================================================================

/// Any scalar expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(Constant),
    Parameter(Parameter),
    ColumnRef(ColumnReference),
    Star(Star),
    Indirection(Indirection),
    Operator(OperatorExpression),
    Logical(LogicalExpression),
    Between(Box<BetweenExpression>),
    PatternMatch(Box<PatternMatchingExpression>),
    In(Box<InExpression>),
    IsOf(Box<IsOfExpression>),
    Collate(Box<CollateExpression>),
    Typecast(Box<TypecastExpression>),
    Case(Box<CaseExpression>),
    FunctionCall(Box<FunctionCall>),
    FunctionExpr(Box<FunctionExpression>),
    Array(ArrayExpression),
    Row(RowExpression),
    Subselect(Box<SubselectExpression>),
    Grouping(GroupingExpression),
    SetToDefault(SetToDefault),
    XmlElement(Box<XmlElement>),
    XmlForest(Box<XmlForest>),
    XmlParse(Box<XmlParse>),
    XmlPi(Box<XmlPi>),
    XmlRoot(Box<XmlRoot>),
    XmlSerialize(Box<XmlSerialize>),
}

impl Expression {
    /// Hand this node to the matching `walk_*` method
    pub fn dispatch<W: Walker + ?Sized>(&self, walker: &mut W) -> W::Output {
        match self {
            Expression::Constant(n) => walker.walk_constant(n),
            Expression::Parameter(n) => walker.walk_parameter(n),
            Expression::ColumnRef(n) => walker.walk_column_reference(n),
            Expression::Star(n) => walker.walk_star(n),
            Expression::Indirection(n) => walker.walk_indirection(n),
            Expression::Operator(n) => walker.walk_operator_expression(n),
            Expression::Logical(n) => walker.walk_logical_expression(n),
            Expression::Between(n) => walker.walk_between_expression(n),
            Expression::PatternMatch(n) => walker.walk_pattern_matching_expression(n),
            Expression::In(n) => walker.walk_in_expression(n),
            Expression::IsOf(n) => walker.walk_is_of_expression(n),
            Expression::Collate(n) => walker.walk_collate_expression(n),
            Expression::Typecast(n) => walker.walk_typecast_expression(n),
            Expression::Case(n) => walker.walk_case_expression(n),
            Expression::FunctionCall(n) => walker.walk_function_call(n),
            Expression::FunctionExpr(n) => walker.walk_function_expression(n),
            Expression::Array(n) => walker.walk_array_expression(n),
            Expression::Row(n) => walker.walk_row_expression(n),
            Expression::Subselect(n) => walker.walk_subselect_expression(n),
            Expression::Grouping(n) => walker.walk_grouping_expression(n),
            Expression::SetToDefault(n) => walker.walk_set_to_default(n),
            Expression::XmlElement(n) => walker.walk_xml_element(n),
            Expression::XmlForest(n) => walker.walk_xml_forest(n),
            Expression::XmlParse(n) => walker.walk_xml_parse(n),
            Expression::XmlPi(n) => walker.walk_xml_pi(n),
            Expression::XmlRoot(n) => walker.walk_xml_root(n),
            Expression::XmlSerialize(n) => walker.walk_xml_serialize(n),
        }
    }
}

// ============================================================================
// Clauses
// ============================================================================

/// Sort direction of an order-by element
#[derive(Debug, Clone, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
    /// `using <operator>`
    Using(String),
}

/// `nulls first` / `nulls last`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

/// One element of an `order by` list
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub expression: Expression,
    pub direction: Option<OrderDirection>,
    pub nulls: Option<NullsOrder>,
}

impl OrderByElement {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            direction: None,
            nulls: None,
        }
    }
}

/// Window frame unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFrameUnits {
    Range,
    Rows,
}

/// Window frame bound
#[derive(Debug, Clone, PartialEq)]
pub enum WindowFrameBound {
    CurrentRow,
    UnboundedPreceding,
    UnboundedFollowing,
    Preceding(Box<Expression>),
    Following(Box<Expression>),
}

/// `{range|rows} [between] start [and end]`
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrameClause {
    pub units: WindowFrameUnits,
    pub start: WindowFrameBound,
    pub end: Option<WindowFrameBound>,
}

/// A window specification, either inline after `over` or named in a
/// `window` clause
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowDefinition {
    /// Name when defined in a `window` clause
    pub name: Option<Identifier>,
    /// Name of an existing window this one refines
    pub existing: Option<Identifier>,
    pub partition_by: Vec<Expression>,
    pub order_by: Vec<OrderByElement>,
    pub frame: Option<WindowFrameClause>,
}

impl WindowDefinition {
    /// True when the definition is nothing but a reference to a named window
    pub fn is_bare_reference(&self) -> bool {
        self.existing.is_some()
            && self.partition_by.is_empty()
            && self.order_by.is_empty()
            && self.frame.is_none()
    }
}

/// A common table expression: `name [(cols)] as (statement)`
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    pub name: Identifier,
    pub columns: Vec<Identifier>,
    pub statement: Box<Statement>,
}

/// `with [recursive] cte, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: Vec<CommonTableExpression>,
}

/// The condition container used by `where` and `having`.
///
/// [`and`](Self::and) and [`or`](Self::or) extend the condition in place,
/// folding into an existing top-level conjunction or disjunction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhereOrHavingClause {
    pub condition: Option<Expression>,
}

impl WhereOrHavingClause {
    pub fn new(condition: Expression) -> Self {
        Self {
            condition: Some(condition),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.condition.is_none()
    }

    pub fn set(&mut self, condition: Expression) {
        self.condition = Some(condition);
    }

    pub fn clear(&mut self) {
        self.condition = None;
    }

    /// Add a conjunct
    pub fn and(&mut self, condition: Expression) {
        self.add(LogicalOperator::And, condition);
    }

    /// Add a disjunct
    pub fn or(&mut self, condition: Expression) {
        self.add(LogicalOperator::Or, condition);
    }

    fn add(&mut self, operator: LogicalOperator, condition: Expression) {
        self.condition = Some(match self.condition.take() {
            None => condition,
            Some(Expression::Logical(mut logical)) if logical.operator == operator => {
                logical.terms.push(condition);
                Expression::Logical(logical)
            }
            Some(existing) => Expression::Logical(LogicalExpression {
                operator,
                terms: vec![existing, condition],
            }),
        });
    }
}

/// Locking strength of a `for ...` clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockingStrength {
    Update,
    NoKeyUpdate,
    Share,
    KeyShare,
}

/// `for update [of rel, ...] [nowait | skip locked]`
#[derive(Debug, Clone, PartialEq)]
pub struct LockingElement {
    pub strength: LockingStrength,
    pub relations: Vec<QualifiedName>,
    pub nowait: bool,
    pub skip_locked: bool,
}

/// One element of a conflict target index specification
#[derive(Debug, Clone, PartialEq)]
pub struct IndexElement {
    pub expression: Expression,
    pub collation: Option<QualifiedName>,
    pub op_class: Option<QualifiedName>,
    pub direction: Option<OrderDirection>,
    pub nulls: Option<NullsOrder>,
}

/// Index specification of an `on conflict` target
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexParameters {
    pub elements: Vec<IndexElement>,
    pub where_clause: WhereOrHavingClause,
}

/// What `on conflict` matches against
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictTarget {
    IndexParameters(IndexParameters),
    Constraint(Identifier),
}

/// What `on conflict` does
#[derive(Debug, Clone, PartialEq)]
pub enum OnConflictAction {
    DoNothing,
    DoUpdate {
        set: Vec<SetClauseElement>,
        where_clause: WhereOrHavingClause,
    },
}

/// `on conflict [target] do ...`
#[derive(Debug, Clone, PartialEq)]
pub struct OnConflictClause {
    pub target: Option<ConflictTarget>,
    pub action: OnConflictAction,
}

/// A target-list element: expression with optional alias
#[derive(Debug, Clone, PartialEq)]
pub struct TargetElement {
    pub expression: Expression,
    pub alias: Option<Identifier>,
}

impl TargetElement {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            alias: None,
        }
    }
}

/// A settable column: name plus optional indirection, used by insert
/// column lists and update set clauses
#[derive(Debug, Clone, PartialEq)]
pub struct SetTargetElement {
    pub name: Identifier,
    pub indirection: Vec<IndirectionItem>,
}

impl SetTargetElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Identifier::new(name),
            indirection: Vec::new(),
        }
    }
}

/// Source of a multiple-column set clause
#[derive(Debug, Clone, PartialEq)]
pub enum MultipleSetSource {
    Row(Vec<Expression>),
    Subquery(SelectQuery),
}

/// One element of an update's `set` list
#[derive(Debug, Clone, PartialEq)]
pub enum SetClauseElement {
    /// `col = expr`
    Single {
        target: SetTargetElement,
        value: Expression,
    },
    /// `(col, ...) = [row] (...)` or `(col, ...) = (subquery)`
    Multiple {
        targets: Vec<SetTargetElement>,
        source: MultipleSetSource,
    },
}

// ============================================================================
// Range (FROM) items
// ============================================================================

/// A plain table reference
#[derive(Debug, Clone, PartialEq)]
pub struct RelationReference {
    pub name: QualifiedName,
    /// `Some(false)` = `only rel`, `Some(true)` = `rel *`, `None` = default
    pub inherit: Option<bool>,
    pub alias: Option<Identifier>,
    pub column_aliases: Vec<Identifier>,
}

impl RelationReference {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            inherit: None,
            alias: None,
            column_aliases: Vec::new(),
        }
    }
}

/// A column definition for functions returning `record`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: Identifier,
    pub type_name: TypeName,
}

/// A set-returning function in `from`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFunctionCall {
    pub lateral: bool,
    pub function: FunctionCall,
    pub ordinality: bool,
    pub alias: Option<Identifier>,
    pub column_aliases: Vec<Identifier>,
    pub column_definitions: Vec<ColumnDefinition>,
}

/// One function inside `rows from (...)`
#[derive(Debug, Clone, PartialEq)]
pub struct RowsFromElement {
    pub function: FunctionCall,
    pub column_definitions: Vec<ColumnDefinition>,
}

/// `rows from (f(...) [as (...)], ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct RowsFrom {
    pub lateral: bool,
    pub elements: Vec<RowsFromElement>,
    pub ordinality: bool,
    pub alias: Option<Identifier>,
    pub column_aliases: Vec<Identifier>,
}

/// Join type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// A join of two range items
#[derive(Debug, Clone, PartialEq)]
pub struct JoinExpression {
    pub kind: JoinKind,
    pub natural: bool,
    pub left: FromItem,
    pub right: FromItem,
    pub on: Option<Expression>,
    pub using_columns: Vec<Identifier>,
    /// Alias of a parenthesized join
    pub alias: Option<Identifier>,
}

/// A subquery in `from`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSubselect {
    pub lateral: bool,
    pub query: SelectQuery,
    pub alias: Option<Identifier>,
    pub column_aliases: Vec<Identifier>,
}

/// `xmlnamespaces` entry; a `None` alias is the default namespace
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNamespace {
    pub uri: Expression,
    pub alias: Option<Identifier>,
}

/// An output column of `xmltable`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlColumnDefinition {
    pub name: Identifier,
    pub for_ordinality: bool,
    pub type_name: Option<TypeName>,
    pub path: Option<Expression>,
    pub default: Option<Expression>,
    pub not_null: bool,
}

/// `xmltable([xmlnamespaces(...),] row_expr passing doc_expr columns ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlTable {
    pub lateral: bool,
    pub namespaces: Vec<XmlNamespace>,
    pub row_expression: Expression,
    pub document_expression: Expression,
    pub columns: Vec<XmlColumnDefinition>,
    pub alias: Option<Identifier>,
    pub column_aliases: Vec<Identifier>,
}

/// `rel tablesample method(args) [repeatable (seed)]`
#[derive(Debug, Clone, PartialEq)]
pub struct TableSampleClause {
    pub relation: RelationReference,
    pub method: QualifiedName,
    pub arguments: Vec<Expression>,
    pub repeatable: Option<Expression>,
}

/// The target relation of an insert
#[derive(Debug, Clone, PartialEq)]
pub struct InsertTarget {
    pub relation: QualifiedName,
    pub alias: Option<Identifier>,
}

/// The target relation of an update or delete
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOrDeleteTarget {
    pub relation: QualifiedName,
    pub only: bool,
    pub alias: Option<Identifier>,
}

/// Any element of a `from` list
#[derive(Debug, Clone, PartialEq)]
pub enum FromItem {
    Relation(RelationReference),
    Function(Box<RangeFunctionCall>),
    RowsFrom(Box<RowsFrom>),
    Join(Box<JoinExpression>),
    Subselect(Box<RangeSubselect>),
    XmlTable(Box<XmlTable>),
    TableSample(Box<TableSampleClause>),
}

impl FromItem {
    pub fn dispatch<W: Walker + ?Sized>(&self, walker: &mut W) -> W::Output {
        match self {
            FromItem::Relation(n) => walker.walk_relation_reference(n),
            FromItem::Function(n) => walker.walk_range_function_call(n),
            FromItem::RowsFrom(n) => walker.walk_rows_from(n),
            FromItem::Join(n) => walker.walk_join_expression(n),
            FromItem::Subselect(n) => walker.walk_range_subselect(n),
            FromItem::XmlTable(n) => walker.walk_xml_table(n),
            FromItem::TableSample(n) => walker.walk_table_sample(n),
        }
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// The empty grouping set `()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmptyGroupingSet;

/// `cube` or `rollup`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeOrRollup {
    Cube,
    Rollup,
}

/// `cube(...)` / `rollup(...)`
#[derive(Debug, Clone, PartialEq)]
pub struct CubeOrRollupClause {
    pub kind: CubeOrRollup,
    pub arguments: Vec<Expression>,
}

/// `grouping sets (...)`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingSetsClause {
    pub sets: Vec<GroupByItem>,
}

/// One element of a `group by` list
#[derive(Debug, Clone, PartialEq)]
pub enum GroupByItem {
    Expression(Expression),
    Empty(EmptyGroupingSet),
    CubeOrRollup(CubeOrRollupClause),
    GroupingSets(GroupingSetsClause),
}

impl GroupByItem {
    pub fn dispatch<W: Walker + ?Sized>(&self, walker: &mut W) -> W::Output {
        match self {
            GroupByItem::Expression(e) => e.dispatch(walker),
            GroupByItem::Empty(n) => walker.walk_empty_grouping_set(n),
            GroupByItem::CubeOrRollup(n) => walker.walk_cube_or_rollup(n),
            GroupByItem::GroupingSets(n) => walker.walk_grouping_sets(n),
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

/// `distinct` / `distinct on (...)`
#[derive(Debug, Clone, PartialEq)]
pub enum DistinctClause {
    Distinct,
    DistinctOn(Vec<Expression>),
}

/// A plain `select` statement
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    pub with: Option<WithClause>,
    pub distinct: Option<DistinctClause>,
    pub targets: TargetList,
    pub from: FromList,
    pub where_clause: WhereOrHavingClause,
    pub group_by: Vec<GroupByItem>,
    pub having: WhereOrHavingClause,
    pub windows: Vec<WindowDefinition>,
    pub order_by: OrderByList,
    pub limit: Option<Expression>,
    pub offset: Option<Expression>,
    pub locking: Vec<LockingElement>,
}

/// Set operation connecting two selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
}

impl SetOperator {
    pub fn is_intersect(&self) -> bool {
        matches!(self, SetOperator::Intersect | SetOperator::IntersectAll)
    }
}

/// A binary set-operation tree over selects
#[derive(Debug, Clone, PartialEq)]
pub struct SetOpSelect {
    pub with: Option<WithClause>,
    pub op: SetOperator,
    pub left: SelectQuery,
    pub right: SelectQuery,
    pub order_by: OrderByList,
    pub limit: Option<Expression>,
    pub offset: Option<Expression>,
}

/// A `values` statement / table literal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValuesStatement {
    pub with: Option<WithClause>,
    pub rows: Vec<ValuesRow>,
    pub order_by: OrderByList,
    pub limit: Option<Expression>,
    pub offset: Option<Expression>,
}

/// Anything that can stand where a `select` can: the `SelectCommon`
/// capability surface carrying the set-operation combinators
#[derive(Debug, Clone, PartialEq)]
pub enum SelectQuery {
    Select(Box<SelectStatement>),
    SetOp(Box<SetOpSelect>),
    Values(Box<ValuesStatement>),
}

impl SelectQuery {
    /// Combine with `union`
    pub fn union(&mut self, other: impl Into<SelectQuery>) {
        self.combine(SetOperator::Union, other.into());
    }

    /// Combine with `union all`
    pub fn union_all(&mut self, other: impl Into<SelectQuery>) {
        self.combine(SetOperator::UnionAll, other.into());
    }

    /// Combine with `intersect`
    pub fn intersect(&mut self, other: impl Into<SelectQuery>) {
        self.combine(SetOperator::Intersect, other.into());
    }

    /// Combine with `intersect all`
    pub fn intersect_all(&mut self, other: impl Into<SelectQuery>) {
        self.combine(SetOperator::IntersectAll, other.into());
    }

    /// Combine with `except`
    pub fn except(&mut self, other: impl Into<SelectQuery>) {
        self.combine(SetOperator::Except, other.into());
    }

    /// Combine with `except all`
    pub fn except_all(&mut self, other: impl Into<SelectQuery>) {
        self.combine(SetOperator::ExceptAll, other.into());
    }

    /// Replace this query, wherever it lives, with a set operation whose
    /// left operand is the current query
    fn combine(&mut self, op: SetOperator, right: SelectQuery) {
        let left = mem::replace(
            self,
            SelectQuery::Values(Box::new(ValuesStatement::default())),
        );
        *self = SelectQuery::SetOp(Box::new(SetOpSelect {
            with: None,
            op,
            left,
            right,
            order_by: OrderByList::new(),
            limit: None,
            offset: None,
        }));
    }

    /// True when the query carries its own `with` clause
    pub fn has_with_clause(&self) -> bool {
        match self {
            SelectQuery::Select(s) => s.with.is_some(),
            SelectQuery::SetOp(s) => s.with.is_some(),
            SelectQuery::Values(v) => v.with.is_some(),
        }
    }

    /// True when the query carries clauses that bind after a set operation
    /// (`order by` / `limit` / `offset` / locking)
    pub fn has_tail_clauses(&self) -> bool {
        match self {
            SelectQuery::Select(s) => {
                !s.order_by.is_empty()
                    || s.limit.is_some()
                    || s.offset.is_some()
                    || !s.locking.is_empty()
            }
            SelectQuery::SetOp(s) => {
                !s.order_by.is_empty() || s.limit.is_some() || s.offset.is_some()
            }
            SelectQuery::Values(v) => {
                !v.order_by.is_empty() || v.limit.is_some() || v.offset.is_some()
            }
        }
    }

    pub fn dispatch<W: Walker + ?Sized>(&self, walker: &mut W) -> W::Output {
        match self {
            SelectQuery::Select(n) => walker.walk_select(n),
            SelectQuery::SetOp(n) => walker.walk_set_op_select(n),
            SelectQuery::Values(n) => walker.walk_values(n),
        }
    }
}

impl From<SelectStatement> for SelectQuery {
    fn from(value: SelectStatement) -> Self {
        SelectQuery::Select(Box::new(value))
    }
}

impl From<SetOpSelect> for SelectQuery {
    fn from(value: SetOpSelect) -> Self {
        SelectQuery::SetOp(Box::new(value))
    }
}

impl From<ValuesStatement> for SelectQuery {
    fn from(value: ValuesStatement) -> Self {
        SelectQuery::Values(Box::new(value))
    }
}

/// `overriding {system|user} value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOverriding {
    SystemValue,
    UserValue,
}

/// An `insert` statement; `source: None` means `default values`
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub with: Option<WithClause>,
    pub target: InsertTarget,
    pub columns: InsertTargetList,
    pub overriding: Option<InsertOverriding>,
    pub source: Option<SelectQuery>,
    pub on_conflict: Option<OnConflictClause>,
    pub returning: TargetList,
}

/// An `update` statement
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub with: Option<WithClause>,
    pub relation: UpdateOrDeleteTarget,
    pub set: Vec<SetClauseElement>,
    pub from: FromList,
    pub where_clause: WhereOrHavingClause,
    pub returning: TargetList,
}

/// A `delete` statement
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub with: Option<WithClause>,
    pub relation: UpdateOrDeleteTarget,
    pub using: FromList,
    pub where_clause: WhereOrHavingClause,
    pub returning: TargetList,
}

/// Any statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectQuery),
    Insert(Box<InsertStatement>),
    Update(Box<UpdateStatement>),
    Delete(Box<DeleteStatement>),
}

impl Statement {
    pub fn dispatch<W: Walker + ?Sized>(&self, walker: &mut W) -> W::Output {
        match self {
            Statement::Select(n) => n.dispatch(walker),
            Statement::Insert(n) => walker.walk_insert(n),
            Statement::Update(n) => walker.walk_update(n),
            Statement::Delete(n) => walker.walk_delete(n),
        }
    }

    /// The select query inside, for statements that are selects
    pub fn as_select_mut(&mut self) -> Option<&mut SelectQuery> {
        match self {
            Statement::Select(q) => Some(q),
            _ => None,
        }
    }
}

// Dispatch for clause nodes the printer renders through the walker
macro_rules! impl_dispatch {
    ($($ty:ty => $method:ident),+ $(,)?) => {
        $(impl $ty {
            pub fn dispatch<W: Walker + ?Sized>(&self, walker: &mut W) -> W::Output {
                walker.$method(self)
            }
        })+
    };
}

impl_dispatch! {
    SelectStatement => walk_select,
    SetOpSelect => walk_set_op_select,
    ValuesStatement => walk_values,
    InsertStatement => walk_insert,
    UpdateStatement => walk_update,
    DeleteStatement => walk_delete,
    WithClause => walk_with_clause,
    CommonTableExpression => walk_common_table_expression,
    OnConflictClause => walk_on_conflict_clause,
    LockingElement => walk_locking_element,
    WindowDefinition => walk_window_definition,
    WindowFrameClause => walk_window_frame_clause,
    WindowFrameBound => walk_window_frame_bound,
    OrderByElement => walk_order_by_element,
    TargetElement => walk_target_element,
    SetTargetElement => walk_set_target_element,
    SetClauseElement => walk_set_clause_element,
    IndexElement => walk_index_element,
    WhenExpression => walk_when_expression,
    XmlNamespace => walk_xml_namespace,
    XmlColumnDefinition => walk_xml_column_definition,
    RowsFromElement => walk_rows_from_element,
    ColumnDefinition => walk_column_definition,
}

// ============================================================================
// Node lists
// ============================================================================

/// An element kind that can be parsed out of a raw SQL fragment
pub trait ListItem: Sized {
    /// Parse a single list element from SQL text
    fn parse_list_item(parser: &Parser, sql: &str) -> Result<Self>;

    /// Element kind name for error messages
    fn item_description() -> &'static str;
}

/// A homogeneous, ordered node list.
///
/// A list optionally carries the [`Parser`] that created it; with one
/// attached, [`push_sql`](Self::push_sql) and [`set_sql`](Self::set_sql)
/// accept raw SQL fragments for elements. Without one they fail with
/// [`Error::InvalidArgument`]. Equality ignores the parser attachment.
#[derive(Debug, Clone)]
pub struct NodeList<T> {
    elements: Vec<T>,
    parser: Option<Parser>,
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeList<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            parser: None,
        }
    }

    pub fn from_elements(elements: Vec<T>) -> Self {
        Self {
            elements,
            parser: None,
        }
    }

    pub fn with_parser(elements: Vec<T>, parser: Parser) -> Self {
        Self {
            elements,
            parser: Some(parser),
        }
    }

    /// Attach a parser, enabling the SQL-fragment element API
    pub fn set_parser(&mut self, parser: Parser) {
        self.parser = Some(parser);
    }

    pub fn parser(&self) -> Option<Parser> {
        self.parser
    }

    pub fn into_elements(self) -> Vec<T> {
        self.elements
    }
}

impl<T: ListItem> NodeList<T> {
    fn require_parser(&self) -> Result<Parser> {
        self.parser.ok_or_else(|| {
            Error::InvalidArgument(format!(
                "cannot parse a {} from a string: list has no parser attached",
                T::item_description()
            ))
        })
    }

    /// Parse the fragment and append the resulting element
    pub fn push_sql(&mut self, sql: &str) -> Result<()> {
        let parser = self.require_parser()?;
        self.elements.push(T::parse_list_item(&parser, sql)?);
        Ok(())
    }

    /// Parse the fragment and replace the element at `index`
    pub fn set_sql(&mut self, index: usize, sql: &str) -> Result<()> {
        let parser = self.require_parser()?;
        if index >= self.elements.len() {
            return Err(Error::InvalidArgument(format!(
                "index {} out of bounds for list of length {}",
                index,
                self.elements.len()
            )));
        }
        self.elements[index] = T::parse_list_item(&parser, sql)?;
        Ok(())
    }
}

impl<T: PartialEq> PartialEq for NodeList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T> Deref for NodeList<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T> DerefMut for NodeList<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.elements
    }
}

impl<T> From<Vec<T>> for NodeList<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_elements(elements)
    }
}

impl<T> FromIterator<T> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a NodeList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T> IntoIterator for NodeList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// The selected / returned expressions of a statement
pub type TargetList = NodeList<TargetElement>;
/// The range items of a `from` or `using` clause
pub type FromList = NodeList<FromItem>;
/// An `order by` list
pub type OrderByList = NodeList<OrderByElement>;
/// A plain list of scalar expressions
pub type ExpressionList = NodeList<Expression>;
/// The column list of an insert
pub type InsertTargetList = NodeList<SetTargetElement>;
/// One row of a `values` list
pub type ValuesRow = NodeList<Expression>;

#[cfg(test)]
mod tests {
    use super::*;

    fn select_from(table: &str) -> SelectQuery {
        let mut stmt = SelectStatement::default();
        stmt.targets.push(TargetElement::new(Expression::Star(Star)));
        stmt.from.push(FromItem::Relation(RelationReference::new(
            QualifiedName::single(table),
        )));
        stmt.into()
    }

    #[test]
    fn test_operator_expression_kinds() {
        let b = OperatorExpression::binary(
            "+",
            Expression::Constant(Constant::integer("1")),
            Expression::Constant(Constant::integer("2")),
        );
        assert_eq!(b.kind(), OperatorKind::Binary);

        let p = OperatorExpression::prefix("not", Expression::Constant(Constant::bool(true)));
        assert_eq!(p.kind(), OperatorKind::Prefix);

        let s = OperatorExpression::postfix(
            "is null",
            Expression::ColumnRef(ColumnReference::single("a")),
        );
        assert_eq!(s.kind(), OperatorKind::Postfix);
    }

    #[test]
    fn test_union_splices_in_place() {
        let mut query = select_from("foo");
        query.union_all(select_from("bar"));

        match &query {
            SelectQuery::SetOp(s) => {
                assert_eq!(s.op, SetOperator::UnionAll);
                assert!(matches!(s.left, SelectQuery::Select(_)));
                assert!(matches!(s.right, SelectQuery::Select(_)));
            }
            _ => panic!("expected a set operation"),
        }
    }

    #[test]
    fn test_nested_combine_on_right_operand() {
        let mut query = select_from("foo");
        query.intersect(select_from("bar"));
        if let SelectQuery::SetOp(s) = &mut query {
            s.right.except(select_from("baz"));
        }

        match &query {
            SelectQuery::SetOp(s) => {
                assert_eq!(s.op, SetOperator::Intersect);
                match &s.right {
                    SelectQuery::SetOp(inner) => assert_eq!(inner.op, SetOperator::Except),
                    _ => panic!("right operand should be the spliced set op"),
                }
            }
            _ => panic!("expected a set operation"),
        }
    }

    #[test]
    fn test_where_and_or_fold() {
        let mut clause = WhereOrHavingClause::default();
        assert!(clause.is_empty());

        clause.and(Expression::ColumnRef(ColumnReference::single("a")));
        assert!(matches!(clause.condition, Some(Expression::ColumnRef(_))));

        clause.and(Expression::ColumnRef(ColumnReference::single("b")));
        clause.and(Expression::ColumnRef(ColumnReference::single("c")));
        match &clause.condition {
            Some(Expression::Logical(l)) => {
                assert_eq!(l.operator, LogicalOperator::And);
                assert_eq!(l.terms.len(), 3);
            }
            other => panic!("expected a flattened conjunction, got {:?}", other),
        }

        // a different connector nests instead of flattening
        clause.or(Expression::ColumnRef(ColumnReference::single("d")));
        match &clause.condition {
            Some(Expression::Logical(l)) => {
                assert_eq!(l.operator, LogicalOperator::Or);
                assert_eq!(l.terms.len(), 2);
            }
            other => panic!("expected a disjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_tail_clause_detection() {
        let mut stmt = SelectStatement::default();
        stmt.targets.push(TargetElement::new(Expression::Star(Star)));
        let mut query: SelectQuery = stmt.into();
        assert!(!query.has_tail_clauses());

        if let SelectQuery::Select(s) = &mut query {
            s.limit = Some(Expression::Constant(Constant::integer("10")));
        }
        assert!(query.has_tail_clauses());
    }

    #[test]
    fn test_node_list_equality_ignores_parser() {
        let a: ExpressionList =
            NodeList::from_elements(vec![Expression::Constant(Constant::integer("1"))]);
        let b = NodeList::with_parser(
            vec![Expression::Constant(Constant::integer("1"))],
            Parser::new(),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_push_sql_without_parser_fails() {
        let mut list: ExpressionList = NodeList::new();
        let err = list.push_sql("1 + 1").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_set_sql_out_of_bounds() {
        let mut list: ExpressionList =
            NodeList::with_parser(vec![Expression::Star(Star)], Parser::new());
        let err = list.set_sql(5, "1").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
