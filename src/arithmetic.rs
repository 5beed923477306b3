use serde::{Deserialize, Serialize};

use crate::errors::{EvalError, Result};
use crate::options::OverflowMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
        }
    }
}

/// Combine two operand values under the given overflow policy.
pub fn apply(op: BinaryOp, lhs: i64, rhs: i64, mode: OverflowMode) -> Result<i64> {
    match mode {
        OverflowMode::Wrapping => Ok(match op {
            BinaryOp::Add => lhs.wrapping_add(rhs),
            BinaryOp::Subtract => lhs.wrapping_sub(rhs),
            BinaryOp::Multiply => lhs.wrapping_mul(rhs),
        }),
        OverflowMode::Checked => {
            let out = match op {
                BinaryOp::Add => lhs.checked_add(rhs),
                BinaryOp::Subtract => lhs.checked_sub(rhs),
                BinaryOp::Multiply => lhs.checked_mul(rhs),
            };
            out.ok_or(EvalError::Overflow { op, lhs, rhs })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn in_range_results_ignore_mode() {
        for mode in [OverflowMode::Checked, OverflowMode::Wrapping] {
            assert_eq!(apply(BinaryOp::Add, 5, 8, mode), Ok(13));
            assert_eq!(apply(BinaryOp::Subtract, 5, 8, mode), Ok(-3));
            assert_eq!(apply(BinaryOp::Multiply, -4, 8, mode), Ok(-32));
        }
    }

    #[test]
    fn checked_overflow_names_the_operation() {
        assert_eq!(
            apply(BinaryOp::Multiply, i64::MAX, 2, OverflowMode::Checked),
            Err(EvalError::Overflow { op: BinaryOp::Multiply, lhs: i64::MAX, rhs: 2 })
        );
        assert!(apply(BinaryOp::Subtract, i64::MIN, 1, OverflowMode::Checked).is_err());
    }

    #[test]
    fn wrapping_overflow_wraps() {
        assert_eq!(apply(BinaryOp::Add, i64::MAX, 1, OverflowMode::Wrapping), Ok(i64::MIN));
        assert_eq!(apply(BinaryOp::Subtract, i64::MIN, 1, OverflowMode::Wrapping), Ok(i64::MAX));
        assert_eq!(apply(BinaryOp::Multiply, i64::MAX, 2, OverflowMode::Wrapping), Ok(-2));
    }

    #[test]
    fn overflow_error_message() {
        let err = apply(BinaryOp::Add, i64::MAX, 1, OverflowMode::Checked).unwrap_err();
        assert_eq!(err.to_string(), format!("integer overflow: {} + 1", i64::MAX));
    }
}
