use tracing::debug;

use crate::{
    config::Grammar, evaluator::Evaluator, history::History, number::format_number, op::Operator,
};

/// What the display shows after a failed evaluation.
pub const ERROR_TEXT: &str = "Error";

/// A key press on the calculator keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Digit(u8),
    Decimal,
    Operator(Operator),
    OpenParen,
    CloseParen,
    Clear,
    Delete,
    ToggleSign,
    Equals,
}

/// Assembles an expression from key presses and drives the evaluator.
///
/// The keypad layout follows the evaluator's grammar. A `Spaced` keypad has
/// digits, `.`, `+ - * /`, clear and equals, and writes operators surrounded
/// by spaces. A `Compact` keypad adds parentheses, `%`, delete and sign
/// toggling, and writes everything without separators.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    evaluator: Evaluator,
    input: String,
    display: String,
    new_input: bool,
    has_decimal: bool,
    last_was_operator: bool,
}

impl InputBuffer {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            input: String::new(),
            display: "0".to_string(),
            new_input: true,
            has_decimal: false,
            last_was_operator: false,
        }
    }

    pub fn grammar(&self) -> Grammar {
        self.evaluator.config().grammar
    }

    /// The expression typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The text the display currently shows.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Feeds one key press and returns the new display text.
    ///
    /// Successful evaluations are recorded in `history`.
    pub fn apply(&mut self, command: Command, history: &mut History) -> &str {
        match self.grammar() {
            Grammar::Spaced => self.apply_spaced(command, history),
            Grammar::Compact => self.apply_compact(command, history),
        }
        &self.display
    }

    fn apply_spaced(&mut self, command: Command, history: &mut History) {
        match command {
            Command::Digit(d) => {
                let Some(digit) = char::from_digit(u32::from(d), 10) else {
                    return;
                };
                if self.new_input {
                    self.input.clear();
                    self.has_decimal = false;
                    self.new_input = false;
                }
                self.input.push(digit);
                self.show_input();
                self.last_was_operator = false;
            }
            Command::Decimal => {
                if self.has_decimal || self.last_was_operator {
                    return;
                }
                if self.input.is_empty() || self.new_input {
                    self.input.clear();
                    self.input.push('0');
                }
                self.input.push('.');
                self.show_input();
                self.has_decimal = true;
                self.new_input = false;
            }
            Command::Operator(Operator::Modulo) => {}
            Command::Operator(op) => {
                if self.input.is_empty() || self.last_was_operator {
                    return;
                }
                self.input.push(' ');
                self.input.push(op.symbol(Grammar::Spaced));
                self.input.push(' ');
                self.show_input();
                self.new_input = false;
                self.has_decimal = false;
                self.last_was_operator = true;
            }
            Command::Clear => {
                self.input.clear();
                self.display = "0".to_string();
                self.new_input = true;
                self.has_decimal = false;
                self.last_was_operator = false;
            }
            Command::Equals => {
                match self.evaluate(history) {
                    Some(result) => {
                        self.has_decimal = result.contains('.');
                        self.input = result;
                        self.last_was_operator = false;
                    }
                    None => self.display = ERROR_TEXT.to_string(),
                }
                self.new_input = true;
            }
            Command::OpenParen | Command::CloseParen | Command::Delete | Command::ToggleSign => {}
        }
    }

    fn apply_compact(&mut self, command: Command, history: &mut History) {
        match command {
            Command::Clear => {
                self.input.clear();
                self.display = "0".to_string();
            }
            Command::Delete => {
                self.input.pop();
                self.show_input();
            }
            Command::Equals => match self.evaluate(history) {
                Some(result) => self.input = result,
                None => {
                    self.display = ERROR_TEXT.to_string();
                    self.input.clear();
                }
            },
            Command::ToggleSign => {
                if self.input.is_empty() {
                    return;
                }
                if self.input.starts_with('-') {
                    self.input.remove(0);
                } else {
                    self.input.insert(0, '-');
                }
                self.show_input();
            }
            Command::Operator(op) => {
                if self.input.chars().last().map_or(true, is_operator_char) {
                    return;
                }
                self.input.push(op.symbol(Grammar::Compact));
                self.show_input();
            }
            Command::Digit(d) => {
                if let Some(digit) = char::from_digit(u32::from(d), 10) {
                    self.input.push(digit);
                    self.show_input();
                }
            }
            Command::Decimal => self.push_char('.'),
            Command::OpenParen => self.push_char('('),
            Command::CloseParen => self.push_char(')'),
        }
    }

    /// Evaluates the current input. On success the result text is shown,
    /// recorded and returned.
    fn evaluate(&mut self, history: &mut History) -> Option<String> {
        match self.evaluator.evaluate(&self.input) {
            Ok(value) => {
                let result = format_number(value);
                history.push(self.input.as_str(), result.as_str());
                self.display = result.clone();
                Some(result)
            }
            Err(err) => {
                debug!(input = %self.input, %err, "evaluation failed");
                None
            }
        }
    }

    fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.show_input();
    }

    fn show_input(&mut self) {
        self.display = if self.input.is_empty() {
            "0".to_string()
        } else {
            self.input.clone()
        };
    }
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | 'x' | '/' | '%')
}
