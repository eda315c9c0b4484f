use tracing::{debug, trace, warn};

use crate::{
    config::{EvalConfig, Grammar, MissingOperands},
    error::EvalError,
    lexer::{Lexer, TokenKind},
    number::format_number,
    op::Operator,
};

/// Operator stack entry. `Group` marks an open parenthesis.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Op(Operator),
    Group,
}

/// Two-stack (shunting-yard) evaluator.
///
/// An `Evaluator` only holds its configuration. Every call builds its own
/// stacks, so one instance can be shared and reused freely.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn with_grammar(grammar: Grammar) -> Self {
        Self::new(EvalConfig::new(grammar))
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluates `expression` and returns its value.
    pub fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        debug!(expression, grammar = ?self.config.grammar, "evaluating");

        let mut stacks = Stacks::new(self.config);
        for token in Lexer::new(expression, self.config.grammar) {
            let token = token?;
            match token.kind {
                TokenKind::Number(n) => stacks.operands.push(n),
                TokenKind::LeftParen => stacks.operators.push((Pending::Group, token.offset)),
                TokenKind::RightParen => stacks.close_group(token.offset)?,
                kind => {
                    if let Some(op) = kind.operator() {
                        stacks.push_operator(op, token.offset)?;
                    }
                }
            }
        }

        let value = stacks.finish()?;
        debug!(expression, value, "evaluated");
        Ok(value)
    }

    /// Evaluates `expression` and renders the value as display text.
    pub fn evaluate_to_string(&self, expression: &str) -> Result<String, EvalError> {
        self.evaluate(expression).map(format_number)
    }
}

/// Evaluates `expression` with the default policies of `grammar`.
pub fn evaluate(expression: &str, grammar: Grammar) -> Result<f64, EvalError> {
    Evaluator::with_grammar(grammar).evaluate(expression)
}

struct Stacks {
    config: EvalConfig,
    operands: Vec<f64>,
    operators: Vec<(Pending, usize)>,
}

impl Stacks {
    fn new(config: EvalConfig) -> Self {
        Self {
            config,
            operands: Vec::new(),
            operators: Vec::new(),
        }
    }

    /// Resolves every pending operator that binds at least as tightly as
    /// `op`, then defers `op`. A group marker stops the unwinding.
    fn push_operator(&mut self, op: Operator, offset: usize) -> Result<(), EvalError> {
        while let Some(&(Pending::Op(top), at)) = self.operators.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.operators.pop();
            self.reduce(top, at)?;
        }
        self.operators.push((Pending::Op(op), offset));
        Ok(())
    }

    fn close_group(&mut self, offset: usize) -> Result<(), EvalError> {
        loop {
            match self.operators.pop() {
                Some((Pending::Group, _)) => return Ok(()),
                Some((Pending::Op(op), at)) => self.reduce(op, at)?,
                None => {
                    return Err(EvalError::UnbalancedParentheses {
                        span: (offset, 1).into(),
                    })
                }
            }
        }
    }

    /// Pops `b` then `a` and pushes `a OP b`.
    fn reduce(&mut self, op: Operator, offset: usize) -> Result<(), EvalError> {
        let &[.., a, b] = self.operands.as_slice() else {
            return match self.config.missing_operands {
                MissingOperands::Skip => {
                    warn!(%op, offset, "not enough operands, skipping operator");
                    Ok(())
                }
                MissingOperands::Error => Err(EvalError::InsufficientOperands {
                    op,
                    span: (offset, 1).into(),
                }),
            };
        };
        self.operands.truncate(self.operands.len() - 2);

        let value = op
            .apply(a, b, self.config.division_by_zero)
            .ok_or(EvalError::DivisionByZero {
                span: (offset, 1).into(),
            })?;

        if op == Operator::Divide && b == 0.0 {
            warn!(a, offset, "division by zero replaced with 0");
        }
        trace!(a, %op, b, value, "applied");
        self.operands.push(value);
        Ok(())
    }

    fn finish(mut self) -> Result<f64, EvalError> {
        while let Some((pending, at)) = self.operators.pop() {
            match pending {
                Pending::Op(op) => self.reduce(op, at)?,
                Pending::Group => {
                    return Err(EvalError::UnbalancedParentheses {
                        span: (at, 1).into(),
                    })
                }
            }
        }

        match (self.config.missing_operands, self.operands.as_slice()) {
            (_, []) => Err(EvalError::EmptyExpression),
            (MissingOperands::Skip, [.., top]) => Ok(*top),
            (MissingOperands::Error, [value]) => Ok(*value),
            (MissingOperands::Error, rest) => Err(EvalError::DanglingOperands { count: rest.len() }),
        }
    }
}
