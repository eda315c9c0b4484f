pub mod config;
pub mod error;
pub mod evaluator;
pub mod history;
pub mod keypad;
pub mod lexer;
pub mod number;
pub mod op;

pub use config::*;
pub use error::EvalError;
pub use evaluator::{evaluate, Evaluator};
pub use lexer::*;
pub use op::Operator;
