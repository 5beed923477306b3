use thiserror::Error;

use crate::arithmetic::BinaryOp;

// Everything that can abort an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    // A variable was read before any value was bound to it
    #[error("unbound variable: {0}")]
    UnboundVariable(String),

    // Checked arithmetic left the i64 range
    #[error("integer overflow: {lhs} {} {rhs}", .op.symbol())]
    Overflow { op: BinaryOp, lhs: i64, rhs: i64 },

    // Bad bindings or tree handed to the CLI
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
