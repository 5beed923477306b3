use std::sync::Arc;

use parking_lot::RwLock;

use crate::context::Context;
use crate::errors::Result;
use crate::expression::Expr;
use crate::options::EvalOptions;

/// Thread-safe handle to one `Context`.
///
/// Writers take the write lock; an evaluation holds the read lock for its whole
/// duration, so it never observes a `set` halfway through.
#[derive(Debug, Clone, Default)]
pub struct SharedContext {
    inner: Arc<RwLock<Context>>,
}

impl SharedContext {
    pub fn new(ctx: Context) -> Self {
        Self { inner: Arc::new(RwLock::new(ctx)) }
    }

    pub fn set(&self, name: impl Into<String>, value: i64) -> Option<i64> {
        self.inner.write().set(name, value)
    }

    /// Apply several changes under one write lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut Context) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn get(&self, name: &str) -> Result<i64> {
        self.inner.read().get(name)
    }

    pub fn evaluate(&self, expr: &Expr, opts: &EvalOptions) -> Result<i64> {
        expr.evaluate_with(&self.inner.read(), opts)
    }

    /// Copy of the current bindings.
    pub fn snapshot(&self) -> Context {
        self.inner.read().clone()
    }
}

impl From<Context> for SharedContext {
    fn from(ctx: Context) -> Self {
        Self::new(ctx)
    }
}
