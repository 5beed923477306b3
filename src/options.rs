use serde::{Deserialize, Serialize};

/// What happens when an operator leaves the `i64` range.
///
/// One mode governs every node of an evaluation; there is no per-operator
/// override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OverflowMode {
    /// Abort with `EvalError::Overflow`.
    #[default]
    Checked,
    /// Two's-complement wraparound.
    Wrapping,
}

/// Evaluation knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    pub overflow: OverflowMode,
}

impl EvalOptions {
    pub fn with_overflow(mut self, overflow: OverflowMode) -> Self {
        self.overflow = overflow;
        self
    }
}
