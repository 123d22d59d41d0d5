//! Function call classification.

use oxide_sql_segment::error::Result;
use oxide_sql_segment::segment::{
    AggregationProjectionSegment, ExpressionProjectionSegment, ProjectionSegment,
};
use oxide_sql_segment::{AggregationType, LowerError, NodeKind, Span};
use tracing::{debug, trace};

use super::Sql92Lowerer;
use crate::tree::{
    AggregationFunctionNode, CastFunctionNode, FunctionAlternative, FunctionCallNode,
    RegularFunctionNode, SpecialFunctionNode, TreeNode,
};

/// Index of the first positional child after `name ( DISTINCT`.
const DISTINCT_ARGUMENTS_START: usize = 3;

impl Sql92Lowerer<'_> {
    fn expression_projection(&self, span: Span) -> ProjectionSegment {
        ProjectionSegment::Expression(ExpressionProjectionSegment {
            span,
            text: self.text(span).to_string(),
        })
    }

    /// Classifies a function call as aggregate, special or regular.
    ///
    /// # Errors
    ///
    /// Returns [`LowerError::StructuralViolation`] when the node has none
    /// of the three alternatives, and propagates errors from its arguments.
    pub fn lower_function_call(&mut self, node: &FunctionCallNode) -> Result<ProjectionSegment> {
        match node.alternative() {
            Some(FunctionAlternative::Aggregation(aggregation)) => {
                self.lower_aggregation_function(aggregation)
            }
            Some(FunctionAlternative::Special(special)) => self.lower_special_function(special),
            Some(FunctionAlternative::Regular(regular)) => self.lower_regular_function(regular),
            None => Err(LowerError::StructuralViolation {
                kind: NodeKind::FunctionCall,
                span: node.span,
            }),
        }
    }

    /// Lowers an aggregate call.
    ///
    /// Recognised aggregates keep the offset of their opening parenthesis
    /// and, when DISTINCT-qualified, the concatenated text of the children
    /// between DISTINCT and the closing parenthesis. Unrecognised names are
    /// kept as an expression projection.
    ///
    /// # Errors
    ///
    /// Propagates errors from the argument expressions.
    pub fn lower_aggregation_function(
        &mut self,
        node: &AggregationFunctionNode,
    ) -> Result<ProjectionSegment> {
        for expr in node.expressions() {
            self.lower_expr(expr)?;
        }

        let name = node.name.text(self.source);
        let Some(aggregation_type) = AggregationType::from_name(name) else {
            debug!(name, span = %node.span, "Unrecognised aggregate kept as expression");
            return Ok(self.expression_projection(node.span));
        };

        let children = node.positional_children();
        let inner_expression_start = children
            .get(1)
            .map_or(node.left_paren.span.start, |paren| paren.start);
        let distinct_expression = node.distinct.map(|_| {
            let end = children.len().saturating_sub(1);
            children
                .get(DISTINCT_ARGUMENTS_START..end)
                .unwrap_or_default()
                .iter()
                .map(|child| self.text(*child))
                .collect::<String>()
        });

        trace!(
            aggregate = aggregation_type.as_str(),
            distinct = distinct_expression.is_some(),
            "Lowered aggregation"
        );
        Ok(ProjectionSegment::Aggregation(AggregationProjectionSegment {
            span: node.span,
            aggregation_type,
            inner_expression_start,
            distinct_expression,
        }))
    }

    /// Lowers CAST, SUBSTRING, EXTRACT and TRIM to expression projections.
    ///
    /// # Errors
    ///
    /// Propagates errors from the argument expressions.
    pub fn lower_special_function(
        &mut self,
        node: &SpecialFunctionNode,
    ) -> Result<ProjectionSegment> {
        match node {
            SpecialFunctionNode::Cast(cast) => self.lower_cast_function(cast),
            SpecialFunctionNode::Substring { span, arguments }
            | SpecialFunctionNode::Trim { span, arguments } => {
                for argument in arguments {
                    self.lower_expr(argument)?;
                }
                Ok(self.expression_projection(*span))
            }
            SpecialFunctionNode::Extract { span, source, .. } => {
                self.lower_expr(source)?;
                Ok(self.expression_projection(*span))
            }
        }
    }

    /// Lowers `CAST(expr AS type)` to an expression projection.
    ///
    /// # Errors
    ///
    /// Propagates errors from the cast operand.
    pub fn lower_cast_function(&mut self, node: &CastFunctionNode) -> Result<ProjectionSegment> {
        self.lower_expr(&node.expr)?;
        let data_type = self.lower_data_type_name(&node.data_type.name);
        trace!(?data_type, span = %node.span, "Lowered cast");
        Ok(self.expression_projection(node.span))
    }

    /// Lowers a regular function call to an expression projection.
    ///
    /// # Errors
    ///
    /// Propagates errors from the arguments.
    pub fn lower_regular_function(
        &mut self,
        node: &RegularFunctionNode,
    ) -> Result<ProjectionSegment> {
        for argument in &node.arguments {
            self.lower_expr(argument)?;
        }
        Ok(self.expression_projection(node.span))
    }
}
