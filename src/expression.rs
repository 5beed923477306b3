use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::arithmetic::{self, BinaryOp};
use crate::context::Context;
use crate::errors::Result;
use crate::options::EvalOptions;

/// One node of an immutable integer expression tree.
///
/// Each operator node owns its two children. In JSON the tree is externally
/// tagged: `{"add": [{"var": "x"}, {"var": "y"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Var(String),
    Add(Box<Expr>, Box<Expr>),
    Subtract(Box<Expr>, Box<Expr>),
    Multiply(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::Add(Box::new(left), Box::new(right))
    }

    pub fn subtract(left: Expr, right: Expr) -> Self {
        Expr::Subtract(Box::new(left), Box::new(right))
    }

    pub fn multiply(left: Expr, right: Expr) -> Self {
        Expr::Multiply(Box::new(left), Box::new(right))
    }

    /// Evaluate with default options (checked overflow).
    pub fn evaluate(&self, ctx: &Context) -> Result<i64> {
        self.evaluate_with(ctx, &EvalOptions::default())
    }

    /// Operands are evaluated left then right; the first error aborts the
    /// whole evaluation. Runs on an explicit work stack, so tree depth is
    /// bounded by memory rather than by the thread's stack.
    pub fn evaluate_with(&self, ctx: &Context, opts: &EvalOptions) -> Result<i64> {
        enum Step<'a> {
            Visit(&'a Expr),
            Apply(BinaryOp),
        }

        let mut work = vec![Step::Visit(self)];
        let mut values: Vec<i64> = Vec::new();
        while let Some(step) = work.pop() {
            match step {
                Step::Visit(Expr::Var(name)) => values.push(ctx.get(name)?),
                Step::Visit(node) => {
                    if let Some((op, l, r)) = node.binary() {
                        work.push(Step::Apply(op));
                        work.push(Step::Visit(r));
                        work.push(Step::Visit(l));
                    }
                }
                Step::Apply(op) => match (values.pop(), values.pop()) {
                    (Some(rhs), Some(lhs)) => values.push(arithmetic::apply(op, lhs, rhs, opts.overflow)?),
                    _ => unreachable!("operands are evaluated before their operator"),
                },
            }
        }
        match values.pop() {
            Some(value) => Ok(value),
            None => unreachable!("every tree yields exactly one value"),
        }
    }

    /// Operator of a non-terminal node.
    pub fn op(&self) -> Option<BinaryOp> {
        self.binary().map(|(op, _, _)| op)
    }

    fn binary(&self) -> Option<(BinaryOp, &Expr, &Expr)> {
        match self {
            Expr::Var(_) => None,
            Expr::Add(l, r) => Some((BinaryOp::Add, l.as_ref(), r.as_ref())),
            Expr::Subtract(l, r) => Some((BinaryOp::Subtract, l.as_ref(), r.as_ref())),
            Expr::Multiply(l, r) => Some((BinaryOp::Multiply, l.as_ref(), r.as_ref())),
        }
    }

    /// Distinct variable names, in order of first appearance (left to right).
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Expr::Var(name) => out.push(name.as_str()),
                Expr::Add(l, r) | Expr::Subtract(l, r) | Expr::Multiply(l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
            }
        }
        out.into_iter().unique().collect()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some((_, l, r)) = node.binary() {
                stack.push((l, depth + 1));
                stack.push((r, depth + 1));
            }
        }
        deepest
    }

    // Moves operator children out to `stack`, leaving cheap leaves behind.
    fn detach_children(&mut self, stack: &mut Vec<Box<Expr>>) {
        if let Expr::Add(l, r) | Expr::Subtract(l, r) | Expr::Multiply(l, r) = self {
            for child in [l, r] {
                if !matches!(**child, Expr::Var(_)) {
                    stack.push(std::mem::replace(child, Box::new(Expr::Var(String::new()))));
                }
            }
        }
    }
}

// The derived drop would recurse once per level.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.detach_children(&mut stack);
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Node(&'a Expr),
            Text(&'static str),
        }

        let mut stack = vec![Piece::Node(self)];
        while let Some(piece) = stack.pop() {
            let (op, l, r) = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(Expr::Var(name)) => {
                    f.write_str(name)?;
                    continue;
                }
                Piece::Node(Expr::Add(l, r)) => (" + ", l, r),
                Piece::Node(Expr::Subtract(l, r)) => (" - ", l, r),
                Piece::Node(Expr::Multiply(l, r)) => (" * ", l, r),
            };
            f.write_str("(")?;
            stack.extend([Piece::Text(")"), Piece::Node(r), Piece::Text(op), Piece::Node(l)]);
        }
        Ok(())
    }
}
