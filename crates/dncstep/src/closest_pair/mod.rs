//! Closest pair of points as a pausable divide-and-conquer stepper.
//!
//! Purpose
//! - Run the classical `O(n log n)` closest-pair recursion one micro-step at a
//!   time: Divide (median split by x), Conquer (brute force on ≤3 points),
//!   Combine (strip search across the split line).
//!
//! Scheduling
//! - Divide/Conquer pick the first matching leaf in preorder (left first).
//! - Combine scans the preorder in reverse, so a node is combined only after
//!   both children are done and deeper ready nodes went first.
//!
//! Correctness
//! - Each strip point is compared with at most the next `STRIP_WINDOW` strip
//!   points in y order; in a strip of width `2√d` with no pair closer than `d`
//!   on either side, no further point can beat `d`.
//! - Once the root is done, `global_best` is the true closest pair.
//!
//! Code cross-refs: `tree::{Tree, first_ready_to_combine}`, `stepper::Stepper`

mod types;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::cfg::{BASE_CASE_MAX, STRIP_WINDOW};
use crate::geom2::{cmp_xy, InputError, PointId, PointSet};
use crate::stepper::{Observer, Stepper};
use crate::tree::{first_in_preorder, first_ready_to_combine, NodeId, Tree};

pub use types::{CpEvent, CpNode, CpPhase, Pair};
use types::better;

/// Immutable closest-pair snapshot. Steps return a new value.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClosestPair {
    points: Arc<PointSet>,
    tree: Tree<CpNode>,
    active: Option<NodeId>,
    global_best: Option<Pair>,
}

impl ClosestPair {
    /// Single idle root over all points. Fewer than two points start finished.
    pub fn new(points: PointSet) -> Self {
        Self::from_shared(Arc::new(points))
    }

    fn from_shared(points: Arc<PointSet>) -> Self {
        let mut root = CpNode::idle(points.ids());
        if points.len() < 2 {
            root.phase = CpPhase::Done { best: None };
        }
        Self {
            points,
            tree: Tree::with_root(root),
            active: None,
            global_best: None,
        }
    }

    /// Discard all progress; keep the point set.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::from_shared(Arc::clone(&self.points))
    }

    /// Restart over a different point set.
    #[must_use]
    pub fn with_points(&self, points: PointSet) -> Self {
        Self::new(points)
    }

    /// Restart over the current points plus `(x, y)`.
    pub fn add_point(&self, x: f64, y: f64) -> Result<Self, InputError> {
        Ok(Self::new(self.points.with_point(x, y)?))
    }

    #[inline]
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    #[inline]
    pub fn tree(&self) -> &Tree<CpNode> {
        &self.tree
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&CpNode> {
        self.tree.get(id).map(|n| &n.item)
    }

    /// Best pair over every done node so far.
    #[inline]
    pub fn global_best(&self) -> Option<Pair> {
        self.global_best
    }

    /// Strip of a divided node for its current children's best distance, sorted by y.
    ///
    /// `None` if the node is unknown, undivided, or a child is not yet done.
    pub fn strip_of(&self, id: NodeId) -> Option<Vec<PointId>> {
        let n = self.tree.get(id)?;
        let (l, r) = n.children?;
        let split_x = n.item.split_x?;
        let (bl, br) = (&self.tree[l].item, &self.tree[r].item);
        if !(bl.is_done() && br.is_done()) {
            return None;
        }
        let d2 = better(bl.best(), br.best()).map_or(f64::INFINITY, |p| p.d2);
        Some(build_strip(&self.points, &n.item.members, split_x, d2))
    }

    fn offer_global(&mut self, candidate: Option<Pair>, obs: &mut dyn Observer<CpEvent>) {
        let Some(pair) = candidate else { return };
        if self.global_best.is_none_or(|g| pair.d2 < g.d2) {
            debug!(a = %pair.a, b = %pair.b, d2 = pair.d2, "closest_pair.global_best");
            self.global_best = Some(pair);
            obs.observe(&CpEvent::GlobalBestImproved { pair });
        }
    }
}

impl Stepper for ClosestPair {
    type Event = CpEvent;

    fn next_divide_target(&self) -> Option<NodeId> {
        first_in_preorder(&self.tree, self.tree.root(), |n| {
            n.is_leaf() && n.item.phase == CpPhase::Idle && n.item.members.len() > BASE_CASE_MAX
        })
    }

    fn next_conquer_target(&self) -> Option<NodeId> {
        first_in_preorder(&self.tree, self.tree.root(), |n| {
            n.is_leaf() && !n.item.is_done() && n.item.members.len() <= BASE_CASE_MAX
        })
    }

    fn next_combine_target(&self) -> Option<NodeId> {
        first_ready_to_combine(&self.tree, self.tree.root(), CpNode::is_done)
    }

    fn step_divide_observed(&self, obs: &mut dyn Observer<CpEvent>) -> Self {
        let Some(target) = self.next_divide_target() else {
            trace!("closest_pair.divide: no target");
            return self.clone();
        };
        let pts = &self.points;
        let mut sorted = self.tree[target].item.members.clone();
        sorted.sort_by(|&i, &j| cmp_xy(pts.pos(i), pts.pos(j)).then(i.cmp(&j)));
        let mid = sorted.len() / 2;
        let split_x = pts.pos(sorted[mid]).x;
        let right = sorted.split_off(mid);
        let left = sorted;

        let mut next = self.clone();
        let (l, r) = next
            .tree
            .split(target, CpNode::idle(left), CpNode::idle(right));
        let node = next.tree.item_mut(target);
        node.split_x = Some(split_x);
        node.phase = CpPhase::Divided;
        next.active = Some(target);

        debug!(node = %target, split_x, left = %l, right = %r, "closest_pair.divide");
        obs.observe(&CpEvent::Divided {
            node: target,
            split_x,
            left: l,
            right: r,
        });
        next
    }

    fn step_conquer_observed(&self, obs: &mut dyn Observer<CpEvent>) -> Self {
        let Some(target) = self.next_conquer_target() else {
            trace!("closest_pair.conquer: no target");
            return self.clone();
        };
        let members = &self.tree[target].item.members;
        let mut best: Option<Pair> = None;
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                let pair = Pair::measure(&self.points, a, b);
                obs.observe(&CpEvent::Compared { node: target, pair });
                if best.is_none_or(|p| pair.d2 < p.d2) {
                    best = Some(pair);
                }
            }
        }

        let mut next = self.clone();
        next.tree.item_mut(target).phase = CpPhase::Done { best };
        next.active = Some(target);
        debug!(node = %target, size = members.len(), d2 = ?best.map(|p| p.d2), "closest_pair.conquer");
        obs.observe(&CpEvent::Solved { node: target, best });
        next.offer_global(best, obs);
        next
    }

    fn step_combine_observed(&self, obs: &mut dyn Observer<CpEvent>) -> Self {
        let Some(target) = self.next_combine_target() else {
            trace!("closest_pair.combine: no target");
            return self.clone();
        };
        let node = &self.tree[target];
        let (Some((l, r)), Some(split_x)) = (node.children, node.item.split_x) else {
            return self.clone();
        };
        let best_lr = better(self.tree[l].item.best(), self.tree[r].item.best());
        let d2 = best_lr.map_or(f64::INFINITY, |p| p.d2);

        let strip = build_strip(&self.points, &node.item.members, split_x, d2);
        obs.observe(&CpEvent::StripBuilt {
            node: target,
            strip: strip.clone(),
            d2,
        });
        let cross = strip_best(&self.points, &strip, d2, |pair| {
            obs.observe(&CpEvent::Compared { node: target, pair });
        });
        let best = cross.or(best_lr);

        let mut next = self.clone();
        next.tree.item_mut(target).phase = CpPhase::Done { best };
        next.active = Some(target);
        debug!(
            node = %target,
            strip = strip.len(),
            crossed = cross.is_some(),
            "closest_pair.combine"
        );
        obs.observe(&CpEvent::Solved { node: target, best });
        next.offer_global(best, obs);
        next
    }

    #[inline]
    fn active(&self) -> Option<NodeId> {
        self.active
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.tree[self.tree.root()].item.is_done()
    }
}

/// Members strictly closer than `√d2` to the split line, sorted by y (then id).
fn build_strip(points: &PointSet, members: &[PointId], split_x: f64, d2: f64) -> Vec<PointId> {
    if !d2.is_finite() {
        return Vec::new();
    }
    let d = d2.sqrt();
    let mut strip: Vec<PointId> = members
        .iter()
        .copied()
        .filter(|&id| (points.pos(id).x - split_x).abs() < d)
        .collect();
    strip.sort_by(|&i, &j| {
        points
            .pos(i)
            .y
            .total_cmp(&points.pos(j).y)
            .then(i.cmp(&j))
    });
    strip
}

/// Best strip pair strictly closer than `d2`, comparing each point with the
/// next `STRIP_WINDOW` points.
fn strip_best(
    points: &PointSet,
    strip: &[PointId],
    d2: f64,
    mut on_compare: impl FnMut(Pair),
) -> Option<Pair> {
    let mut best: Option<Pair> = None;
    let mut bound = d2;
    for (i, &a) in strip.iter().enumerate() {
        let end = strip.len().min(i + 1 + STRIP_WINDOW);
        for &b in &strip[i + 1..end] {
            let pair = Pair::measure(points, a, b);
            on_compare(pair);
            if pair.d2 < bound {
                bound = pair.d2;
                best = Some(pair);
            }
        }
    }
    best
}
