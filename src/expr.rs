//! Expression tree definitions and the arena that owns every node.
//!
//! Trees are built bottom-up through [`ExprArena`] and referred to by
//! [`ExprId`] handles. A handle is a plain index, so the same node can be a
//! child of several parents, which is how a derivative shares the operands of
//! the tree it came from.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::trace;

use crate::error::{AllocReason, DiffError, Result};

static ARENA_ID_COUNTER: AtomicU32 = AtomicU32::new(0);

fn next_arena_id() -> u32 {
    ARENA_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a node stored in an [`ExprArena`].
///
/// Only meaningful for the arena (and generation) that issued it; anything else
/// is rejected with [`DiffError::MalformedTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId {
    pub(crate) arena: u32,
    pub(crate) generation: u32,
    pub(crate) index: u32,
}

impl ExprId {
    pub(crate) fn slot(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)?;
        if self.generation > 0 {
            write!(f, "@{}", self.generation)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Mul,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Mul => "*",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node {
    Constant(f64),
    /// The single free variable.
    Variable,
    Add(ExprId, ExprId),
    Mul(ExprId, ExprId),
}

impl Node {
    pub fn binary(op: BinaryOp, left: ExprId, right: ExprId) -> Self {
        match op {
            BinaryOp::Add => Node::Add(left, right),
            BinaryOp::Mul => Node::Mul(left, right),
        }
    }

    pub fn children(&self) -> Option<(ExprId, ExprId)> {
        match *self {
            Node::Add(l, r) | Node::Mul(l, r) => Some((l, r)),
            Node::Constant(_) | Node::Variable => None,
        }
    }
}

/// Storage for expression nodes.
///
/// Nodes are append-only: once pushed they are never changed, and a parent is
/// always stored after both of its children. Dropping the arena releases every
/// node exactly once no matter how many trees share them; see
/// [`ExprArena::retain`] for releasing part of it.
#[derive(Debug)]
pub struct ExprArena {
    pub(crate) id: u32,
    pub(crate) generation: u32,
    pub(crate) nodes: Vec<Node>,
    node_limit: Option<usize>,
}

impl Default for ExprArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprArena {
    pub fn new() -> Self {
        Self {
            id: next_arena_id(),
            generation: 0,
            nodes: Vec::new(),
            node_limit: None,
        }
    }

    /// An arena that refuses to hold more than `limit` live nodes.
    pub fn with_node_limit(limit: usize) -> Self {
        Self {
            node_limit: Some(limit),
            ..Self::new()
        }
    }

    pub fn node_limit(&self) -> Option<usize> {
        self.node_limit
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn constant(&mut self, value: f64) -> Result<ExprId> {
        self.push(Node::Constant(value))
    }

    pub fn variable(&mut self) -> Result<ExprId> {
        self.push(Node::Variable)
    }

    /// Allocates an interior node sharing `left` and `right` with whatever
    /// else already references them.
    pub fn operation(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> Result<ExprId> {
        self.check(left)?;
        self.check(right)?;
        self.push(Node::binary(op, left, right))
    }

    pub fn add(&mut self, left: ExprId, right: ExprId) -> Result<ExprId> {
        self.operation(BinaryOp::Add, left, right)
    }

    pub fn mul(&mut self, left: ExprId, right: ExprId) -> Result<ExprId> {
        self.operation(BinaryOp::Mul, left, right)
    }

    pub fn node(&self, id: ExprId) -> Result<Node> {
        self.check(id)?;
        Ok(self.nodes[id.slot()])
    }

    /// Whether `id` was issued by this arena and is still live.
    pub fn contains(&self, id: ExprId) -> bool {
        self.check(id).is_ok()
    }

    pub(crate) fn check(&self, id: ExprId) -> Result<()> {
        if id.arena != self.id {
            return Err(DiffError::malformed(format!(
                "handle {id:?} belongs to another arena"
            )));
        }
        if id.generation != self.generation {
            return Err(DiffError::malformed(format!(
                "handle {id:?} was released (arena is at generation {})",
                self.generation
            )));
        }
        if id.slot() >= self.nodes.len() {
            return Err(DiffError::malformed(format!(
                "handle {id:?} points past the last node ({})",
                self.nodes.len()
            )));
        }
        Ok(())
    }

    /// Drops every node appended after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    fn handle(&self, slot: usize) -> ExprId {
        ExprId {
            arena: self.id,
            generation: self.generation,
            index: slot as u32,
        }
    }

    fn push(&mut self, node: Node) -> Result<ExprId> {
        let index = self.nodes.len();
        let limit = self
            .node_limit
            .map_or(u32::MAX as usize, |limit| limit.min(u32::MAX as usize));
        if index >= limit {
            return Err(DiffError::AllocationFailure {
                index,
                reason: AllocReason::LimitReached(limit),
            });
        }
        self.nodes
            .try_reserve(1)
            .map_err(|err| DiffError::AllocationFailure {
                index,
                reason: AllocReason::Exhausted(err),
            })?;
        self.nodes.push(node);
        trace!(index, ?node, "allocated node");
        Ok(self.handle(index))
    }
}
