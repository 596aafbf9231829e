//! Maximum subarray as a pausable divide-and-conquer stepper.
//!
//! Purpose
//! - Third instance of the tree + scheduler pattern, over an integer array:
//!   Divide halves `[lo, hi]` at `⌊(lo + hi) / 2⌋`, Conquer solves a
//!   single-element range, Combine merges the children's summaries.
//!
//! Scheduling
//! - Divide/Conquer pick the first matching leaf in preorder; Combine goes
//!   deepest-first via `first_ready_to_combine`.
//!
//! Once finished, the root summary's `best` equals the largest sum of a
//! non-empty contiguous subarray.

mod types;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::stepper::{Observer, Stepper};
use crate::tree::{first_in_preorder, first_ready_to_combine, NodeId, Tree};

pub use types::{merge, BestCase, MaxSubEvent, MsNode, MsPhase, Span, Summary};

/// Immutable maximum-subarray snapshot. Steps return a new value.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MaxSubarray {
    values: Arc<Vec<i64>>,
    tree: Tree<MsNode>,
    active: Option<NodeId>,
}

impl MaxSubarray {
    /// Single unsplit root over all values. An empty array starts finished.
    pub fn new(values: Vec<i64>) -> Self {
        Self::from_shared(Arc::new(values))
    }

    fn from_shared(values: Arc<Vec<i64>>) -> Self {
        let hi = values.len().saturating_sub(1);
        Self {
            values,
            tree: Tree::with_root(MsNode::unsplit(0, hi)),
            active: None,
        }
    }

    #[must_use]
    pub fn reset(&self) -> Self {
        Self::from_shared(Arc::clone(&self.values))
    }

    #[inline]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    #[inline]
    pub fn tree(&self) -> &Tree<MsNode> {
        &self.tree
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&MsNode> {
        self.tree.get(id).map(|n| &n.item)
    }

    /// Root summary once everything is combined.
    pub fn result(&self) -> Option<&Summary> {
        self.tree[self.tree.root()].item.summary()
    }
}

impl Stepper for MaxSubarray {
    type Event = MaxSubEvent;

    fn next_divide_target(&self) -> Option<NodeId> {
        if self.values.is_empty() {
            return None;
        }
        first_in_preorder(&self.tree, self.tree.root(), |n| {
            n.item.phase == MsPhase::Unsplit && n.item.lo < n.item.hi
        })
    }

    fn next_conquer_target(&self) -> Option<NodeId> {
        if self.values.is_empty() {
            return None;
        }
        first_in_preorder(&self.tree, self.tree.root(), |n| {
            n.is_leaf() && n.item.lo == n.item.hi && !n.item.is_solved()
        })
    }

    fn next_combine_target(&self) -> Option<NodeId> {
        first_ready_to_combine(&self.tree, self.tree.root(), MsNode::is_solved)
    }

    fn step_divide_observed(&self, obs: &mut dyn Observer<MaxSubEvent>) -> Self {
        let Some(target) = self.next_divide_target() else {
            trace!("maxsub.divide: no target");
            return self.clone();
        };
        let node = self.tree[target].item;
        let (lo, hi) = (node.lo, node.hi);
        let mid = lo + (hi - lo) / 2;

        let mut next = self.clone();
        let (l, r) = next.tree.split(
            target,
            MsNode::unsplit(lo, mid),
            MsNode::unsplit(mid + 1, hi),
        );
        next.tree.item_mut(target).phase = MsPhase::Split { mid };
        next.active = Some(target);
        debug!(node = %target, lo, hi, mid, width = node.width(), "maxsub.divide");
        obs.observe(&MaxSubEvent::Divided {
            node: target,
            mid,
            left: l,
            right: r,
        });
        next
    }

    fn step_conquer_observed(&self, obs: &mut dyn Observer<MaxSubEvent>) -> Self {
        let Some(target) = self.next_conquer_target() else {
            trace!("maxsub.conquer: no target");
            return self.clone();
        };
        let index = self.tree[target].item.lo;
        let value = self.values[index];

        let mut next = self.clone();
        next.tree.item_mut(target).phase = MsPhase::Solved(Summary::single(index, value));
        next.active = Some(target);
        debug!(node = %target, index, value, "maxsub.conquer");
        obs.observe(&MaxSubEvent::Solved {
            node: target,
            index,
            value,
        });
        next
    }

    fn step_combine_observed(&self, obs: &mut dyn Observer<MaxSubEvent>) -> Self {
        let Some(target) = self.next_combine_target() else {
            trace!("maxsub.combine: no target");
            return self.clone();
        };
        let Some((l, r)) = self.tree[target].children else {
            return self.clone();
        };
        let (Some(a), Some(b)) = (self.tree[l].item.summary(), self.tree[r].item.summary()) else {
            return self.clone();
        };
        let (summary, chosen) = merge(a, b);
        let cross = a.suff + b.pref;

        let mut next = self.clone();
        next.tree.item_mut(target).phase = MsPhase::Solved(summary);
        next.active = Some(target);
        debug!(node = %target, best = %summary.best, ?chosen, "maxsub.combine");
        obs.observe(&MaxSubEvent::Combined {
            node: target,
            cross,
            cross_left: a.suff_span,
            cross_right: b.pref_span,
            chosen,
            summary,
        });
        next
    }

    #[inline]
    fn active(&self) -> Option<NodeId> {
        self.active
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.values.is_empty() || self.tree[self.tree.root()].item.is_solved()
    }
}

#[cfg(test)]
mod tests;
