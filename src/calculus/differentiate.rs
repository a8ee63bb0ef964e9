use std::collections::HashMap;

use tracing::debug;

use crate::error::{DiffError, Result};
use crate::expr::{ExprArena, ExprId, Node};

/// Differentiates `expr` with respect to the arena's single variable.
///
/// The result is built in the same arena and reuses the operands of every
/// product it passes through, so it shares nodes with `expr`. Nothing is
/// simplified: `d(x + 2)` is `(1.0 + 0.0)`.
pub fn differentiate(arena: &mut ExprArena, expr: ExprId) -> Result<ExprId> {
    Differentiator::new().differentiate(arena, expr)
}

/// Configurable entry point for [`differentiate`].
#[derive(Clone, Debug, Default)]
pub struct Differentiator {
    memoize: bool,
}

enum Step {
    Derive(ExprId),
    Combine(ExprId),
}

impl Differentiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the derivative of a node reachable along several paths only once.
    ///
    /// Only matters for inputs that already share nodes, such as a previous
    /// derivative. Off by default, in which case every path is derived on its
    /// own and the output is a tree again.
    pub fn memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn differentiate(&self, arena: &mut ExprArena, expr: ExprId) -> Result<ExprId> {
        arena.check(expr)?;
        let start = arena.len();

        let root = match self.walk(arena, expr) {
            Ok(root) => root,
            Err(err) => {
                // Nothing allocated by a failed walk is referenced from outside.
                arena.truncate(start);
                return Err(err);
            }
        };
        debug!(
            input = ?expr,
            output = ?root,
            allocated = arena.len() - start,
            memoize = self.memoize,
            "differentiated expression"
        );
        Ok(root)
    }

    fn walk(&self, arena: &mut ExprArena, expr: ExprId) -> Result<ExprId> {
        // Post-order walk on an explicit stack, so the depth of the input is
        // bounded by memory rather than by the call stack.
        let mut steps = vec![Step::Derive(expr)];
        let mut derived: Vec<ExprId> = Vec::new();
        let mut memo: HashMap<ExprId, ExprId> = HashMap::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Derive(id) => {
                    if let Some(&d) = memo.get(&id) {
                        derived.push(d);
                        continue;
                    }
                    match arena.node(id)? {
                        Node::Constant(_) => derived.push(self.leaf(arena, &mut memo, id, 0.0)?),
                        Node::Variable => derived.push(self.leaf(arena, &mut memo, id, 1.0)?),
                        Node::Add(u, v) | Node::Mul(u, v) => {
                            arena.check(u)?;
                            arena.check(v)?;
                            steps.push(Step::Combine(id));
                            steps.push(Step::Derive(v));
                            steps.push(Step::Derive(u));
                        }
                    }
                }
                Step::Combine(id) => {
                    let (Some(dv), Some(du)) = (derived.pop(), derived.pop()) else {
                        return Err(DiffError::malformed(format!(
                            "operands of {id:?} were not derived"
                        )));
                    };
                    let d = match arena.node(id)? {
                        Node::Add(_, _) => arena.add(du, dv)?,
                        Node::Mul(u, v) => product_rule(arena, u, v, du, dv)?,
                        Node::Constant(_) | Node::Variable => {
                            return Err(DiffError::malformed(format!(
                                "leaf {id:?} reached as an operation"
                            )));
                        }
                    };
                    if self.memoize {
                        memo.insert(id, d);
                    }
                    derived.push(d);
                }
            }
        }

        match derived.pop() {
            Some(root) if derived.is_empty() => Ok(root),
            _ => Err(DiffError::malformed(format!(
                "walk from {expr:?} did not end with a single derivative"
            ))),
        }
    }

    fn leaf(
        &self,
        arena: &mut ExprArena,
        memo: &mut HashMap<ExprId, ExprId>,
        id: ExprId,
        value: f64,
    ) -> Result<ExprId> {
        let d = arena.constant(value)?;
        if self.memoize {
            memo.insert(id, d);
        }
        Ok(d)
    }
}

/// `(u * v)' = u' * v + u * v'`, with `u` and `v` themselves reused.
fn product_rule(
    arena: &mut ExprArena,
    u: ExprId,
    v: ExprId,
    du: ExprId,
    dv: ExprId,
) -> Result<ExprId> {
    let left = arena.mul(du, v)?;
    let right = arena.mul(u, dv)?;
    arena.add(left, right)
}
