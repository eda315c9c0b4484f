use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::op::Operator;

/// Everything that can go wrong while evaluating an expression.
///
/// Spans point into the expression string, so a caller can render the error
/// with `miette::Report::new(err).with_source_code(expression)`.
#[derive(Diagnostic, Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("malformed number `{literal}`")]
    #[diagnostic(
        code(keycalc::malformed_number),
        help("a number may contain at most one decimal point")
    )]
    MalformedNumber {
        literal: String,
        #[label("this numeric literal")]
        span: SourceSpan,
    },

    #[error("unbalanced parentheses")]
    #[diagnostic(code(keycalc::unbalanced_parentheses))]
    UnbalancedParentheses {
        #[label("no matching parenthesis")]
        span: SourceSpan,
    },

    #[error("not enough operands for `{op}`")]
    #[diagnostic(code(keycalc::insufficient_operands))]
    InsufficientOperands {
        op: Operator,
        #[label("this operator")]
        span: SourceSpan,
    },

    #[error("division by zero")]
    #[diagnostic(code(keycalc::division_by_zero))]
    DivisionByZero {
        #[label("divisor is zero")]
        span: SourceSpan,
    },

    #[error("unknown operator `{symbol}`")]
    #[diagnostic(code(keycalc::unknown_operator), help("expected one of + - * x / %"))]
    UnknownOperator { symbol: String },

    #[error("nothing to evaluate")]
    #[diagnostic(code(keycalc::empty_expression))]
    EmptyExpression,

    #[error("{count} operands left over with no operator between them")]
    #[diagnostic(code(keycalc::dangling_operands))]
    DanglingOperands { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EvalError::MalformedNumber {
            literal: "1.2.3".to_string(),
            span: (0, 5).into(),
        };
        assert_eq!(err.to_string(), "malformed number `1.2.3`");

        let err = EvalError::InsufficientOperands {
            op: Operator::Subtract,
            span: (2, 1).into(),
        };
        assert_eq!(err.to_string(), "not enough operands for `-`");
    }

    #[test]
    fn test_labels_point_at_span() {
        let err = EvalError::DivisionByZero { span: (1, 1).into() };
        let labels: Vec<_> = err.labels().expect("has labels").collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 1);
        assert_eq!(labels[0].len(), 1);
    }

    #[test]
    fn test_code() {
        let code = EvalError::EmptyExpression.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("keycalc::empty_expression"));
    }
}
