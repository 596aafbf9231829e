//! Merge sort as a pausable divide-and-conquer stepper.
//!
//! Purpose
//! - The tree + scheduler pattern over a working array: Divide halves
//!   `[lo, hi]` at `⌊(lo + hi) / 2⌋`, Conquer marks a one-element range
//!   sorted, Combine merges the two sorted children in place.
//!
//! Scheduling
//! - Divide/Conquer pick the first matching leaf in preorder; Combine goes
//!   deepest-first via `first_ready_to_combine`.
//!
//! The merge is stable, so a finished run agrees with `slice::sort`.

mod types;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::stepper::{Observer, Stepper};
use crate::tree::{first_in_preorder, first_ready_to_combine, NodeId, Tree};

pub use types::{merge_runs, MergeWrite, SortEvent, SortNode, SortPhase};

/// Immutable merge-sort snapshot. Steps return a new value.
///
/// `values` is the input as given; `array` is the working copy the merges
/// write into.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MergeSort<T> {
    values: Arc<Vec<T>>,
    array: Arc<Vec<T>>,
    tree: Tree<SortNode>,
    active: Option<NodeId>,
}

impl<T: Ord + Clone> MergeSort<T> {
    /// Single unsplit root over all values. An empty array starts finished.
    pub fn new(values: Vec<T>) -> Self {
        Self::from_shared(Arc::new(values))
    }

    fn from_shared(values: Arc<Vec<T>>) -> Self {
        let hi = values.len().saturating_sub(1);
        Self {
            array: Arc::clone(&values),
            values,
            tree: Tree::with_root(SortNode::unsplit(0, hi)),
            active: None,
        }
    }

    #[must_use]
    pub fn reset(&self) -> Self {
        Self::from_shared(Arc::clone(&self.values))
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Working array, partially sorted until the run finishes.
    #[inline]
    pub fn array(&self) -> &[T] {
        &self.array
    }

    #[inline]
    pub fn tree(&self) -> &Tree<SortNode> {
        &self.tree
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&SortNode> {
        self.tree.get(id).map(|n| &n.item)
    }
}

impl<T: Ord + Clone> Stepper for MergeSort<T> {
    type Event = SortEvent;

    fn next_divide_target(&self) -> Option<NodeId> {
        if self.values.is_empty() {
            return None;
        }
        first_in_preorder(&self.tree, self.tree.root(), |n| {
            n.item.phase == SortPhase::Unsplit && n.item.lo < n.item.hi
        })
    }

    fn next_conquer_target(&self) -> Option<NodeId> {
        if self.values.is_empty() {
            return None;
        }
        first_in_preorder(&self.tree, self.tree.root(), |n| {
            n.is_leaf() && n.item.lo == n.item.hi && !n.item.is_sorted()
        })
    }

    fn next_combine_target(&self) -> Option<NodeId> {
        first_ready_to_combine(&self.tree, self.tree.root(), SortNode::is_sorted)
    }

    fn step_divide_observed(&self, obs: &mut dyn Observer<SortEvent>) -> Self {
        let Some(target) = self.next_divide_target() else {
            trace!("mergesort.divide: no target");
            return self.clone();
        };
        let SortNode { lo, hi, .. } = self.tree[target].item;
        let mid = lo + (hi - lo) / 2;

        let mut next = self.clone();
        let (l, r) = next.tree.split(
            target,
            SortNode::unsplit(lo, mid),
            SortNode::unsplit(mid + 1, hi),
        );
        next.tree.item_mut(target).phase = SortPhase::Split { mid };
        next.active = Some(target);
        debug!(node = %target, lo, hi, mid, "mergesort.divide");
        obs.observe(&SortEvent::Divided {
            node: target,
            mid,
            left: l,
            right: r,
        });
        next
    }

    fn step_conquer_observed(&self, obs: &mut dyn Observer<SortEvent>) -> Self {
        let Some(target) = self.next_conquer_target() else {
            trace!("mergesort.conquer: no target");
            return self.clone();
        };
        let index = self.tree[target].item.lo;

        let mut next = self.clone();
        next.tree.item_mut(target).phase = SortPhase::Sorted;
        next.active = Some(target);
        debug!(node = %target, index, "mergesort.conquer");
        obs.observe(&SortEvent::Solved {
            node: target,
            index,
        });
        next
    }

    fn step_combine_observed(&self, obs: &mut dyn Observer<SortEvent>) -> Self {
        let Some(target) = self.next_combine_target() else {
            trace!("mergesort.combine: no target");
            return self.clone();
        };
        let SortNode { lo, hi, phase } = self.tree[target].item;
        let SortPhase::Split { mid } = phase else {
            return self.clone();
        };

        let mut next = self.clone();
        let writes = merge_runs(Arc::<Vec<T>>::make_mut(&mut next.array), lo, mid, hi);
        next.tree.item_mut(target).phase = SortPhase::Sorted;
        next.active = Some(target);
        debug!(node = %target, lo, mid, hi, writes = writes.len(), "mergesort.combine");
        obs.observe(&SortEvent::Merged {
            node: target,
            lo,
            mid,
            hi,
            writes,
        });
        next
    }

    #[inline]
    fn active(&self) -> Option<NodeId> {
        self.active
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.values.is_empty() || self.tree[self.tree.root()].item.is_sorted()
    }
}

#[cfg(test)]
mod tests;
