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

//! The walker (visitor) protocol
//!
//! A [`Walker`] implements one `walk_*` method per concrete AST node
//! variant. Nodes hand themselves to the correct method through their
//! `dispatch` operation, which is the sole dispatch mechanism in the
//! crate; nodes carry no rendering or analysis logic of their own. The
//! output type is generic: the SQL printer produces `String`, analyses
//! can produce anything else.

use crate::parser::ast::*;

/// A visitor over the AST
pub trait Walker {
    /// Result produced for each walked node
    type Output;

    // Statements
    fn walk_select(&mut self, node: &SelectStatement) -> Self::Output;
    fn walk_set_op_select(&mut self, node: &SetOpSelect) -> Self::Output;
    fn walk_values(&mut self, node: &ValuesStatement) -> Self::Output;
    fn walk_insert(&mut self, node: &InsertStatement) -> Self::Output;
    fn walk_update(&mut self, node: &UpdateStatement) -> Self::Output;
    fn walk_delete(&mut self, node: &DeleteStatement) -> Self::Output;

    // Clauses
    fn walk_with_clause(&mut self, node: &WithClause) -> Self::Output;
    fn walk_common_table_expression(&mut self, node: &CommonTableExpression) -> Self::Output;
    fn walk_on_conflict_clause(&mut self, node: &OnConflictClause) -> Self::Output;
    fn walk_locking_element(&mut self, node: &LockingElement) -> Self::Output;
    fn walk_window_definition(&mut self, node: &WindowDefinition) -> Self::Output;
    fn walk_window_frame_clause(&mut self, node: &WindowFrameClause) -> Self::Output;
    fn walk_window_frame_bound(&mut self, node: &WindowFrameBound) -> Self::Output;
    fn walk_order_by_element(&mut self, node: &OrderByElement) -> Self::Output;
    fn walk_target_element(&mut self, node: &TargetElement) -> Self::Output;
    fn walk_set_target_element(&mut self, node: &SetTargetElement) -> Self::Output;
    fn walk_set_clause_element(&mut self, node: &SetClauseElement) -> Self::Output;
    fn walk_index_element(&mut self, node: &IndexElement) -> Self::Output;

    // Scalar expressions
    fn walk_constant(&mut self, node: &Constant) -> Self::Output;
    fn walk_parameter(&mut self, node: &Parameter) -> Self::Output;
    fn walk_column_reference(&mut self, node: &ColumnReference) -> Self::Output;
    fn walk_star(&mut self, node: &Star) -> Self::Output;
    fn walk_indirection(&mut self, node: &Indirection) -> Self::Output;
    fn walk_operator_expression(&mut self, node: &OperatorExpression) -> Self::Output;
    fn walk_logical_expression(&mut self, node: &LogicalExpression) -> Self::Output;
    fn walk_between_expression(&mut self, node: &BetweenExpression) -> Self::Output;
    fn walk_pattern_matching_expression(
        &mut self,
        node: &PatternMatchingExpression,
    ) -> Self::Output;
    fn walk_in_expression(&mut self, node: &InExpression) -> Self::Output;
    fn walk_is_of_expression(&mut self, node: &IsOfExpression) -> Self::Output;
    fn walk_collate_expression(&mut self, node: &CollateExpression) -> Self::Output;
    fn walk_typecast_expression(&mut self, node: &TypecastExpression) -> Self::Output;
    fn walk_case_expression(&mut self, node: &CaseExpression) -> Self::Output;
    fn walk_when_expression(&mut self, node: &WhenExpression) -> Self::Output;
    fn walk_function_call(&mut self, node: &FunctionCall) -> Self::Output;
    fn walk_function_expression(&mut self, node: &FunctionExpression) -> Self::Output;
    fn walk_array_expression(&mut self, node: &ArrayExpression) -> Self::Output;
    fn walk_row_expression(&mut self, node: &RowExpression) -> Self::Output;
    fn walk_subselect_expression(&mut self, node: &SubselectExpression) -> Self::Output;
    fn walk_grouping_expression(&mut self, node: &GroupingExpression) -> Self::Output;
    fn walk_set_to_default(&mut self, node: &SetToDefault) -> Self::Output;

    // Names and types
    fn walk_identifier(&mut self, node: &Identifier) -> Self::Output;
    fn walk_qualified_name(&mut self, node: &QualifiedName) -> Self::Output;
    fn walk_type_name(&mut self, node: &PlainTypeName) -> Self::Output;
    fn walk_interval_type_name(&mut self, node: &IntervalTypeName) -> Self::Output;

    // Range items
    fn walk_relation_reference(&mut self, node: &RelationReference) -> Self::Output;
    fn walk_range_function_call(&mut self, node: &RangeFunctionCall) -> Self::Output;
    fn walk_rows_from(&mut self, node: &RowsFrom) -> Self::Output;
    fn walk_rows_from_element(&mut self, node: &RowsFromElement) -> Self::Output;
    fn walk_join_expression(&mut self, node: &JoinExpression) -> Self::Output;
    fn walk_range_subselect(&mut self, node: &RangeSubselect) -> Self::Output;
    fn walk_xml_table(&mut self, node: &XmlTable) -> Self::Output;
    fn walk_table_sample(&mut self, node: &TableSampleClause) -> Self::Output;
    fn walk_column_definition(&mut self, node: &ColumnDefinition) -> Self::Output;

    // XML
    fn walk_xml_element(&mut self, node: &XmlElement) -> Self::Output;
    fn walk_xml_forest(&mut self, node: &XmlForest) -> Self::Output;
    fn walk_xml_parse(&mut self, node: &XmlParse) -> Self::Output;
    fn walk_xml_pi(&mut self, node: &XmlPi) -> Self::Output;
    fn walk_xml_root(&mut self, node: &XmlRoot) -> Self::Output;
    fn walk_xml_serialize(&mut self, node: &XmlSerialize) -> Self::Output;
    fn walk_xml_namespace(&mut self, node: &XmlNamespace) -> Self::Output;
    fn walk_xml_column_definition(&mut self, node: &XmlColumnDefinition) -> Self::Output;

    // Grouping
    fn walk_empty_grouping_set(&mut self, node: &EmptyGroupingSet) -> Self::Output;
    fn walk_cube_or_rollup(&mut self, node: &CubeOrRollupClause) -> Self::Output;
    fn walk_grouping_sets(&mut self, node: &GroupingSetsClause) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A walker that counts constants, proving dispatch reaches leaves
    struct ConstantCounter {
        count: usize,
    }

    impl ConstantCounter {
        fn sum(&mut self, nodes: &[Expression]) -> usize {
            nodes.iter().map(|n| n.dispatch(self)).sum()
        }
    }

    impl Walker for ConstantCounter {
        type Output = usize;

        fn walk_constant(&mut self, _node: &Constant) -> usize {
            self.count += 1;
            1
        }

        fn walk_operator_expression(&mut self, node: &OperatorExpression) -> usize {
            let mut total = 0;
            if let Some(left) = &node.left {
                total += left.dispatch(self);
            }
            if let Some(right) = &node.right {
                total += right.dispatch(self);
            }
            total
        }

        fn walk_logical_expression(&mut self, node: &LogicalExpression) -> usize {
            let terms: Vec<Expression> = node.terms.clone();
            self.sum(&terms)
        }

        // Everything else is irrelevant for the test
        fn walk_select(&mut self, _: &SelectStatement) -> usize {
            0
        }
        fn walk_set_op_select(&mut self, _: &SetOpSelect) -> usize {
            0
        }
        fn walk_values(&mut self, _: &ValuesStatement) -> usize {
            0
        }
        fn walk_insert(&mut self, _: &InsertStatement) -> usize {
            0
        }
        fn walk_update(&mut self, _: &UpdateStatement) -> usize {
            0
        }
        fn walk_delete(&mut self, _: &DeleteStatement) -> usize {
            0
        }
        fn walk_with_clause(&mut self, _: &WithClause) -> usize {
            0
        }
        fn walk_common_table_expression(&mut self, _: &CommonTableExpression) -> usize {
            0
        }
        fn walk_on_conflict_clause(&mut self, _: &OnConflictClause) -> usize {
            0
        }
        fn walk_locking_element(&mut self, _: &LockingElement) -> usize {
            0
        }
        fn walk_window_definition(&mut self, _: &WindowDefinition) -> usize {
            0
        }
        fn walk_window_frame_clause(&mut self, _: &WindowFrameClause) -> usize {
            0
        }
        fn walk_window_frame_bound(&mut self, _: &WindowFrameBound) -> usize {
            0
        }
        fn walk_order_by_element(&mut self, _: &OrderByElement) -> usize {
            0
        }
        fn walk_target_element(&mut self, _: &TargetElement) -> usize {
            0
        }
        fn walk_set_target_element(&mut self, _: &SetTargetElement) -> usize {
            0
        }
        fn walk_set_clause_element(&mut self, _: &SetClauseElement) -> usize {
            0
        }
        fn walk_index_element(&mut self, _: &IndexElement) -> usize {
            0
        }
        fn walk_parameter(&mut self, _: &Parameter) -> usize {
            0
        }
        fn walk_column_reference(&mut self, _: &ColumnReference) -> usize {
            0
        }
        fn walk_star(&mut self, _: &Star) -> usize {
            0
        }
        fn walk_indirection(&mut self, _: &Indirection) -> usize {
            0
        }
        fn walk_between_expression(&mut self, _: &BetweenExpression) -> usize {
            0
        }
        fn walk_pattern_matching_expression(&mut self, _: &PatternMatchingExpression) -> usize {
            0
        }
        fn walk_in_expression(&mut self, _: &InExpression) -> usize {
            0
        }
        fn walk_is_of_expression(&mut self, _: &IsOfExpression) -> usize {
            0
        }
        fn walk_collate_expression(&mut self, _: &CollateExpression) -> usize {
            0
        }
        fn walk_typecast_expression(&mut self, _: &TypecastExpression) -> usize {
            0
        }
        fn walk_case_expression(&mut self, _: &CaseExpression) -> usize {
            0
        }
        fn walk_when_expression(&mut self, _: &WhenExpression) -> usize {
            0
        }
        fn walk_function_call(&mut self, _: &FunctionCall) -> usize {
            0
        }
        fn walk_function_expression(&mut self, _: &FunctionExpression) -> usize {
            0
        }
        fn walk_array_expression(&mut self, _: &ArrayExpression) -> usize {
            0
        }
        fn walk_row_expression(&mut self, _: &RowExpression) -> usize {
            0
        }
        fn walk_subselect_expression(&mut self, _: &SubselectExpression) -> usize {
            0
        }
        fn walk_grouping_expression(&mut self, _: &GroupingExpression) -> usize {
            0
        }
        fn walk_set_to_default(&mut self, _: &SetToDefault) -> usize {
            0
        }
        fn walk_identifier(&mut self, _: &Identifier) -> usize {
            0
        }
        fn walk_qualified_name(&mut self, _: &QualifiedName) -> usize {
            0
        }
        fn walk_type_name(&mut self, _: &PlainTypeName) -> usize {
            0
        }
        fn walk_interval_type_name(&mut self, _: &IntervalTypeName) -> usize {
            0
        }
        fn walk_relation_reference(&mut self, _: &RelationReference) -> usize {
            0
        }
        fn walk_range_function_call(&mut self, _: &RangeFunctionCall) -> usize {
            0
        }
        fn walk_rows_from(&mut self, _: &RowsFrom) -> usize {
            0
        }
        fn walk_rows_from_element(&mut self, _: &RowsFromElement) -> usize {
            0
        }
        fn walk_join_expression(&mut self, _: &JoinExpression) -> usize {
            0
        }
        fn walk_range_subselect(&mut self, _: &RangeSubselect) -> usize {
            0
        }
        fn walk_xml_table(&mut self, _: &XmlTable) -> usize {
            0
        }
        fn walk_table_sample(&mut self, _: &TableSampleClause) -> usize {
            0
        }
        fn walk_column_definition(&mut self, _: &ColumnDefinition) -> usize {
            0
        }
        fn walk_xml_element(&mut self, _: &XmlElement) -> usize {
            0
        }
        fn walk_xml_forest(&mut self, _: &XmlForest) -> usize {
            0
        }
        fn walk_xml_parse(&mut self, _: &XmlParse) -> usize {
            0
        }
        fn walk_xml_pi(&mut self, _: &XmlPi) -> usize {
            0
        }
        fn walk_xml_root(&mut self, _: &XmlRoot) -> usize {
            0
        }
        fn walk_xml_serialize(&mut self, _: &XmlSerialize) -> usize {
            0
        }
        fn walk_xml_namespace(&mut self, _: &XmlNamespace) -> usize {
            0
        }
        fn walk_xml_column_definition(&mut self, _: &XmlColumnDefinition) -> usize {
            0
        }
        fn walk_empty_grouping_set(&mut self, _: &EmptyGroupingSet) -> usize {
            0
        }
        fn walk_cube_or_rollup(&mut self, _: &CubeOrRollupClause) -> usize {
            0
        }
        fn walk_grouping_sets(&mut self, _: &GroupingSetsClause) -> usize {
            0
        }
    }

    #[test]
    fn test_dispatch_reaches_nested_constants() {
        // 1 + (2 and 3) counted structurally, semantics aside
        let expr = Expression::Operator(OperatorExpression::binary(
            "+",
            Expression::Constant(Constant::integer("1")),
            Expression::Logical(LogicalExpression::and(vec![
                Expression::Constant(Constant::integer("2")),
                Expression::Constant(Constant::integer("3")),
            ])),
        ));
        let mut counter = ConstantCounter { count: 0 };
        let total = expr.dispatch(&mut counter);
        assert_eq!(total, 3);
        assert_eq!(counter.count, 3);
    }
}
