pub mod errors;
pub mod context;
pub mod options;
pub mod shared;     // lock-guarded Context for multi-threaded callers
pub mod arithmetic; // operator table + overflow policy
mod expression;

use errors::Result;
use context::Context;
use options::EvalOptions;

pub use expression::Expr;
pub use errors::EvalError;

/// Evaluates expression trees under a fixed set of options.
/// Cheap to copy; holds no per-evaluation state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    options: EvalOptions,
}

impl Evaluator {
    pub fn new(options: EvalOptions) -> Self {
        Self { options }
    }

    /// Evaluate `expr` against `ctx`; the tree and the context are left untouched.
    pub fn evaluate(&self, expr: &Expr, ctx: &Context) -> Result<i64> {
        let span = tracing::debug_span!("evaluate", root = ?expr.op(), depth = expr.depth(), overflow = ?self.options.overflow);
        let _guard = span.enter();
        match expr.evaluate_with(ctx, &self.options) {
            Ok(value) => {
                tracing::debug!(%expr, value, "evaluated");
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(%expr, error = %e, "evaluation failed");
                Err(e)
            }
        }
    }
}

/// Convenience: evaluate with default options.
pub fn evaluate(expr: &Expr, ctx: &Context) -> Result<i64> {
    Evaluator::default().evaluate(expr, ctx)
}
