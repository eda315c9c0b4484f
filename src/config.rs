use clap::ValueEnum;

/// Input syntax accepted by the evaluator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Grammar {
    /// Tokens separated by spaces, `+ - * /`, no parentheses.
    Spaced,
    /// No separators needed, `+ - x / %` and parentheses; spaces are ignored.
    #[default]
    Compact,
}

/// What a division whose divisor is zero produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DivisionByZero {
    /// The quotient is silently replaced by `0`.
    Zero,
    /// Evaluation fails with [`EvalError::DivisionByZero`](crate::EvalError::DivisionByZero).
    Error,
}

/// What happens when the operand count does not match the operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum MissingOperands {
    /// An operator without two operands is dropped and the stack is left
    /// as-is. Leftover operands are ignored and the topmost one is the result.
    Skip,
    /// Both cases fail evaluation.
    Error,
}

/// Evaluation settings.
///
/// [`EvalConfig::new`] picks the policies each grammar has always used:
/// `Spaced` is lenient (`5 / 0` is `0`), `Compact` is strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvalConfig {
    pub grammar: Grammar,
    pub division_by_zero: DivisionByZero,
    pub missing_operands: MissingOperands,
}

impl EvalConfig {
    pub fn new(grammar: Grammar) -> Self {
        match grammar {
            Grammar::Spaced => Self {
                grammar,
                division_by_zero: DivisionByZero::Zero,
                missing_operands: MissingOperands::Skip,
            },
            Grammar::Compact => Self {
                grammar,
                division_by_zero: DivisionByZero::Error,
                missing_operands: MissingOperands::Error,
            },
        }
    }

    pub fn with_division_by_zero(mut self, policy: DivisionByZero) -> Self {
        self.division_by_zero = policy;
        self
    }

    pub fn with_missing_operands(mut self, policy: MissingOperands) -> Self {
        self.missing_operands = policy;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::new(Grammar::default())
    }
}

impl From<Grammar> for EvalConfig {
    fn from(grammar: Grammar) -> Self {
        Self::new(grammar)
    }
}
