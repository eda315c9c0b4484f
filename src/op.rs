use std::str::FromStr;

use crate::{
    config::{DivisionByZero, Grammar},
    error::EvalError,
};

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operator {
    /// Maps a keypad symbol to its operator. Multiplication is spelled either
    /// `*` or `x`.
    pub fn from_symbol(symbol: &str) -> Result<Self, EvalError> {
        match symbol {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" | "x" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "%" => Ok(Operator::Modulo),
            _ => Err(EvalError::UnknownOperator {
                symbol: symbol.to_string(),
            }),
        }
    }

    /// The symbol a keypad for `grammar` writes into the expression.
    pub fn symbol(self, grammar: Grammar) -> char {
        match (self, grammar) {
            (Operator::Multiply, Grammar::Compact) => 'x',
            (Operator::Multiply, Grammar::Spaced) => '*',
            (Operator::Add, _) => '+',
            (Operator::Subtract, _) => '-',
            (Operator::Divide, _) => '/',
            (Operator::Modulo, _) => '%',
        }
    }

    /// Binding strength. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide | Operator::Modulo => 2,
        }
    }

    /// Computes `a OP b`.
    ///
    /// Returns `None` when `b` is zero for a division and the policy is
    /// [`DivisionByZero::Error`]. Modulo by zero is `NaN`, not an error.
    pub fn apply(self, a: f64, b: f64, on_zero: DivisionByZero) -> Option<f64> {
        let value = match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide if b == 0.0 => match on_zero {
                DivisionByZero::Zero => 0.0,
                DivisionByZero::Error => return None,
            },
            Operator::Divide => a / b,
            Operator::Modulo => a % b,
        };
        Some(value)
    }
}

impl FromStr for Operator {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Operator::Add => "+",
                Operator::Subtract => "-",
                Operator::Multiply => "*",
                Operator::Divide => "/",
                Operator::Modulo => "%",
            }
        )
    }
}
