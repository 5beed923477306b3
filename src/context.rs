use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::{EvalError, Result};

/// Variable bindings consulted while evaluating a tree.
///
/// Reading a name that was never set is an error; there is no default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    variables: HashMap<String, i64>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the value it replaced.
    pub fn set(&mut self, name: impl Into<String>, value: i64) -> Option<i64> {
        let name = name.into();
        tracing::trace!(%name, value, "set variable");
        self.variables.insert(name, value)
    }

    pub fn get(&self, name: &str) -> Result<i64> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UnboundVariable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.variables.keys().map(String::as_str).sorted().collect()
    }
}

impl<S: Into<String>> Extend<(S, i64)> for Context {
    fn extend<I: IntoIterator<Item = (S, i64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Context {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut ctx = Context::new();
        ctx.extend(iter);
        ctx
    }
}
