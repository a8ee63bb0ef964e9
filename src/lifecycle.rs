//! Releasing nodes that no tree references any more.
//!
//! A derivative shares nodes with the tree it was computed from, so neither
//! tree owns its nodes outright. Instead of per-node counts the arena is swept
//! from a set of live roots: whatever they reach survives (once, however many
//! paths lead to it), everything else is dropped. Handles issued before a sweep
//! go stale and are rejected afterwards.

use tracing::debug;

use crate::error::{AllocReason, DiffError, Result};
use crate::expr::{ExprArena, ExprId, Node};

impl ExprArena {
    /// Number of distinct nodes reachable from `roots`.
    pub fn reachable_count(&self, roots: &[ExprId]) -> Result<usize> {
        Ok(self.mark(roots)?.into_iter().filter(|&live| live).count())
    }

    /// Keeps only the nodes reachable from `roots` and returns their new
    /// handles, in the same order. Every other handle into this arena,
    /// including the old values of `roots`, is invalidated.
    pub fn retain(&mut self, roots: &[ExprId]) -> Result<Vec<ExprId>> {
        let live = self.mark(roots)?;
        let kept = live.iter().filter(|&&l| l).count();

        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(kept)
            .map_err(|err| DiffError::AllocationFailure {
                index: kept,
                reason: AllocReason::Exhausted(err),
            })?;

        let generation = self.generation.wrapping_add(1);
        let moved = |slot: u32| ExprId {
            arena: self.id,
            generation,
            index: slot,
        };

        // Slot order is preserved, so children still precede their parents.
        let mut remap = vec![u32::MAX; self.nodes.len()];
        for (slot, node) in self.nodes.iter().enumerate() {
            if !live[slot] {
                continue;
            }
            remap[slot] = nodes.len() as u32;
            nodes.push(match *node {
                Node::Add(l, r) => Node::Add(moved(remap[l.slot()]), moved(remap[r.slot()])),
                Node::Mul(l, r) => Node::Mul(moved(remap[l.slot()]), moved(remap[r.slot()])),
                leaf => leaf,
            });
        }

        let roots = roots.iter().map(|root| moved(remap[root.slot()])).collect();
        let freed = self.nodes.len() - kept;
        self.nodes = nodes;
        self.generation = generation;
        debug!(kept, freed, generation, "released unreachable nodes");
        Ok(roots)
    }

    /// Releases every node. All outstanding handles become stale.
    pub fn clear(&mut self) {
        let freed = self.nodes.len();
        self.nodes = Vec::new();
        self.generation = self.generation.wrapping_add(1);
        debug!(freed, generation = self.generation, "released all nodes");
    }

    fn mark(&self, roots: &[ExprId]) -> Result<Vec<bool>> {
        let mut live = vec![false; self.nodes.len()];
        for &root in roots {
            self.check(root)?;
            live[root.slot()] = true;
        }
        // Children sit below their parents, so one downward pass sees every
        // parent before any of its children.
        for slot in (0..self.nodes.len()).rev() {
            if !live[slot] {
                continue;
            }
            if let Some((l, r)) = self.nodes[slot].children() {
                live[l.slot()] = true;
                live[r.slot()] = true;
            }
        }
        Ok(live)
    }
}
