//! Quickhull as a pausable divide-and-conquer stepper.
//!
//! Purpose
//! - Run Quickhull one micro-step at a time over a recursion tree whose leaves
//!   are directed hull-candidate edges with their outside sets.
//!
//! Steps
//! - Divide #1 (baseline): the lexicographic min/max points by `(x, y)` are hull
//!   vertices. Points left of `min → max` form the upper chain, points left of
//!   `max → min` the lower chain; the rest is discarded.
//! - Divide (pivot): farthest outside point from the leaf's edge; the node
//!   becomes `Pivoted`. Refused while another pivot awaits Conquer.
//! - Conquer: split the outside set against triangle `A, P, B` into the parts
//!   left of `A → P` and left of `P → B`; interior points are discarded.
//! - Combine: a leaf with an empty outside set contributes its edge.
//!
//! Scheduling
//! - Chains run one at a time (lower, then upper). Divide targets the first
//!   leaf in preorder of the active chain with outside points; Combine only
//!   starts once that chain has no outstanding divide/conquer work, and then
//!   walks its leaves in preorder, i.e. along the chain.
//!
//! Code cross-refs: `geom2::{ids_left_of, perpendicular_distance}`, `stepper::Stepper`

mod types;

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::geom2::{extreme_x, ids_left_of, is_left_of, perpendicular_distance};
use crate::geom2::{InputError, PointId, PointSet};
use crate::stepper::{Observer, Stepper};
use crate::tree::{first_in_preorder, NodeId, Tree};

pub use types::{
    Chain, HullCfg, HullCfgError, HullEdge, HullEvent, HullKind, HullNode, HullPhase,
};
use types::CHAIN_ORDER;

/// Immutable Quickhull snapshot. Steps return a new value.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Quickhull {
    points: Arc<PointSet>,
    cfg: HullCfg,
    tree: Tree<HullNode>,
    /// Baseline endpoints; `None` when fewer than two distinct points exist.
    extremes: Option<(PointId, PointId)>,
    active: Option<NodeId>,
    hull: Vec<HullEdge>,
    #[cfg_attr(feature = "serde", serde(skip))]
    hull_keys: BTreeSet<(PointId, PointId)>,
    discarded: Vec<PointId>,
}

impl Quickhull {
    pub fn new(points: PointSet) -> Self {
        Self::from_shared(Arc::new(points), HullCfg::default())
    }

    /// Like `new` with custom tolerances; rejects a negative or non-finite slack.
    pub fn with_cfg(points: PointSet, cfg: HullCfg) -> Result<Self, HullCfgError> {
        cfg.validate()?;
        Ok(Self::from_shared(Arc::new(points), cfg))
    }

    fn from_shared(points: Arc<PointSet>, cfg: HullCfg) -> Self {
        let extremes = extreme_x(&points).filter(|(lo, hi)| lo != hi);
        let mut root = HullNode {
            kind: HullKind::Root,
            outside: points.ids(),
            phase: HullPhase::Todo,
        };
        if extremes.is_none() {
            root.phase = HullPhase::Done;
        }
        Self {
            points,
            cfg,
            tree: Tree::with_root(root),
            extremes,
            active: None,
            hull: Vec::new(),
            hull_keys: BTreeSet::new(),
            discarded: Vec::new(),
        }
    }

    /// Discard all progress; keep points and tolerances.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::from_shared(Arc::clone(&self.points), self.cfg)
    }

    /// Restart over a different point set.
    #[must_use]
    pub fn with_points(&self, points: PointSet) -> Self {
        Self::from_shared(Arc::new(points), self.cfg)
    }

    /// Restart over the current points plus `(x, y)`.
    pub fn add_point(&self, x: f64, y: f64) -> Result<Self, InputError> {
        Ok(self.with_points(self.points.with_point(x, y)?))
    }

    #[inline]
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    #[inline]
    pub fn cfg(&self) -> HullCfg {
        self.cfg
    }

    #[inline]
    pub fn tree(&self) -> &Tree<HullNode> {
        &self.tree
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&HullNode> {
        self.tree.get(id).map(|n| &n.item)
    }

    /// Confirmed hull edges in the order they were combined.
    #[inline]
    pub fn hull_edges(&self) -> &[HullEdge] {
        &self.hull
    }

    /// Points proven interior so far.
    #[inline]
    pub fn discarded(&self) -> &[PointId] {
        &self.discarded
    }

    /// Leftmost and rightmost points (baseline endpoints).
    #[inline]
    pub fn extremes(&self) -> Option<(PointId, PointId)> {
        self.extremes
    }

    #[inline]
    pub fn baseline_done(&self) -> bool {
        !self.tree[self.tree.root()].is_leaf()
    }

    /// Root node of a chain, once the baseline split exists.
    pub fn chain_root(&self, chain: Chain) -> Option<NodeId> {
        let (upper, lower) = self.tree[self.tree.root()].children?;
        Some(match chain {
            Chain::Upper => upper,
            Chain::Lower => lower,
        })
    }

    /// Every leaf of the chain has been combined.
    pub fn is_chain_complete(&self, chain: Chain) -> bool {
        self.chain_root(chain)
            .is_some_and(|id| self.tree[id].item.is_done())
    }

    /// Chain currently being worked; `None` before the baseline and after both finish.
    pub fn active_chain(&self) -> Option<Chain> {
        CHAIN_ORDER
            .into_iter()
            .find(|&c| self.chain_root(c).is_some_and(|id| !self.tree[id].item.is_done()))
    }

    /// Node whose pivot awaits Conquer, if any.
    pub fn pending_pivot(&self) -> Option<NodeId> {
        first_in_preorder(&self.tree, self.tree.root(), |n| n.item.is_pivoted())
    }

    /// Some leaf of the chain still has outside points or a pending pivot.
    fn chain_has_work(&self, root: NodeId) -> bool {
        self.tree.leaves(root).into_iter().any(|id| {
            let n = &self.tree[id].item;
            n.is_pivoted() || (n.phase == HullPhase::Todo && !n.outside.is_empty())
        })
    }

    fn baseline_divide(&self, obs: &mut dyn Observer<HullEvent>) -> Self {
        let Some((min, max)) = self.extremes else {
            return self.clone();
        };
        let root = self.tree.root();
        let all = &self.tree[root].item.outside;
        let eps = self.cfg.eps_left;
        let upper = ids_left_of(&self.points, min, max, all, eps);
        let lower = ids_left_of(&self.points, max, min, all, eps);
        let kept: BTreeSet<PointId> = upper.iter().chain(lower.iter()).copied().collect();
        let discarded: Vec<PointId> = all
            .iter()
            .copied()
            .filter(|&id| id != min && id != max && !kept.contains(&id))
            .collect();

        let mut next = self.clone();
        let (u, l) = next.tree.split(
            root,
            HullNode::edge(Chain::Upper, min, max, upper),
            HullNode::edge(Chain::Lower, max, min, lower),
        );
        next.tree.item_mut(root).phase = HullPhase::Split { pivot: None };
        next.discarded.extend_from_slice(&discarded);
        next.active = Some(root);
        debug!(
            min = %min,
            max = %max,
            upper = next.tree[u].item.outside.len(),
            lower = next.tree[l].item.outside.len(),
            "quickhull.baseline"
        );
        obs.observe(&HullEvent::Baseline {
            min,
            max,
            upper: u,
            lower: l,
            discarded,
        });
        next
    }

    fn pivot_divide(&self, target: NodeId, obs: &mut dyn Observer<HullEvent>) -> Self {
        let node = &self.tree[target].item;
        let Some((a, b)) = node.endpoints() else {
            return self.clone();
        };
        let (pa, pb) = (self.points.pos(a), self.points.pos(b));
        let dir = pb - pa;
        // Equal distances go to the point furthest along `a → b`, which is a
        // corner of the hull rather than a point inside a hull edge.
        let mut best: Option<(PointId, f64, f64)> = None;
        for &id in &node.outside {
            let q = self.points.pos(id);
            let d = perpendicular_distance(pa, pb, q);
            let along = dir.dot(&(q - pa));
            if best.is_none_or(|(_, bd, ba)| d > bd || (d == bd && along > ba)) {
                best = Some((id, d, along));
            }
        }
        let Some((pivot, dist, _)) = best else {
            return self.clone();
        };

        let mut next = self.clone();
        next.tree.item_mut(target).phase = HullPhase::Pivoted { pivot, dist };
        next.active = Some(target);
        debug!(node = %target, pivot = %pivot, dist, "quickhull.pivot");
        obs.observe(&HullEvent::Pivoted {
            node: target,
            a,
            b,
            pivot,
            dist,
        });
        next
    }

    /// Announce a just-retired leaf and mark every ancestor whose children
    /// are now both done.
    fn propagate_done(&mut self, leaf: NodeId, obs: &mut dyn Observer<HullEvent>) {
        let mut cur = leaf;
        loop {
            self.announce_done(cur, obs);
            let Some(parent) = self.tree[cur].parent else { break };
            let Some((l, r)) = self.tree[parent].children else { break };
            if !(self.tree[l].item.is_done() && self.tree[r].item.is_done()) {
                break;
            }
            self.tree.item_mut(parent).phase = HullPhase::Done;
            cur = parent;
        }
    }

    fn announce_done(&self, id: NodeId, obs: &mut dyn Observer<HullEvent>) {
        match self.tree[id].item.kind {
            HullKind::Root => {
                debug!(edges = self.hull.len(), "quickhull.finished");
                obs.observe(&HullEvent::Finished);
            }
            HullKind::Edge { chain, .. } if self.chain_root(chain) == Some(id) => {
                debug!(?chain, "quickhull.chain_completed");
                obs.observe(&HullEvent::ChainCompleted { chain });
            }
            HullKind::Edge { .. } => {}
        }
    }
}

impl Stepper for Quickhull {
    type Event = HullEvent;

    fn next_divide_target(&self) -> Option<NodeId> {
        let root = self.tree.root();
        if self.tree[root].item.phase == HullPhase::Todo {
            return self.extremes.map(|_| root);
        }
        if self.pending_pivot().is_some() {
            return None;
        }
        let chain_root = self.chain_root(self.active_chain()?)?;
        first_in_preorder(&self.tree, chain_root, |n| {
            n.is_leaf() && n.item.phase == HullPhase::Todo && !n.item.outside.is_empty()
        })
    }

    fn next_conquer_target(&self) -> Option<NodeId> {
        self.pending_pivot()
    }

    fn next_combine_target(&self) -> Option<NodeId> {
        let chain_root = self.chain_root(self.active_chain()?)?;
        if self.chain_has_work(chain_root) {
            return None;
        }
        first_in_preorder(&self.tree, chain_root, |n| {
            n.is_leaf() && n.item.phase == HullPhase::Todo && n.item.outside.is_empty()
        })
    }

    fn step_divide_observed(&self, obs: &mut dyn Observer<HullEvent>) -> Self {
        match self.next_divide_target() {
            Some(id) if id == self.tree.root() => self.baseline_divide(obs),
            Some(id) => self.pivot_divide(id, obs),
            None => {
                trace!("quickhull.divide: no target");
                self.clone()
            }
        }
    }

    fn step_conquer_observed(&self, obs: &mut dyn Observer<HullEvent>) -> Self {
        let Some(target) = self.next_conquer_target() else {
            trace!("quickhull.conquer: no target");
            return self.clone();
        };
        let node = &self.tree[target].item;
        let (Some((a, b)), HullPhase::Pivoted { pivot, .. }) = (node.endpoints(), node.phase)
        else {
            return self.clone();
        };
        let Some(chain) = node.chain() else {
            return self.clone();
        };
        let eps = self.cfg.eps_left;
        let (pa, pp, pb) = (
            self.points.pos(a),
            self.points.pos(pivot),
            self.points.pos(b),
        );
        let mut s1 = Vec::new();
        let mut s2 = Vec::new();
        let mut discarded = Vec::new();
        for &id in node.outside.iter().filter(|&&id| id != pivot) {
            let q = self.points.pos(id);
            if is_left_of(pa, pp, q, eps) {
                s1.push(id);
            } else if is_left_of(pp, pb, q, eps) {
                s2.push(id);
            } else {
                discarded.push(id);
            }
        }

        let mut next = self.clone();
        let (l, r) = next.tree.split(
            target,
            HullNode::edge(chain, a, pivot, s1),
            HullNode::edge(chain, pivot, b, s2),
        );
        next.tree.item_mut(target).phase = HullPhase::Split { pivot: Some(pivot) };
        next.discarded.extend_from_slice(&discarded);
        next.active = Some(target);
        debug!(
            node = %target,
            left = next.tree[l].item.outside.len(),
            right = next.tree[r].item.outside.len(),
            discarded = discarded.len(),
            "quickhull.conquer"
        );
        obs.observe(&HullEvent::Split {
            node: target,
            triangle: [a, pivot, b],
            left: l,
            right: r,
            discarded,
        });
        next
    }

    fn step_combine_observed(&self, obs: &mut dyn Observer<HullEvent>) -> Self {
        let Some(target) = self.next_combine_target() else {
            trace!("quickhull.combine: no target");
            return self.clone();
        };
        let Some((a, b)) = self.tree[target].item.endpoints() else {
            return self.clone();
        };
        let edge = HullEdge { a, b };

        let mut next = self.clone();
        let duplicate = !next.hull_keys.insert(edge.key());
        if !duplicate {
            next.hull.push(edge);
        }
        next.tree.item_mut(target).phase = HullPhase::Done;
        next.active = Some(target);
        debug!(node = %target, a = %a, b = %b, duplicate, "quickhull.combine");
        obs.observe(&HullEvent::EdgeAdded {
            node: target,
            edge,
            duplicate,
        });
        next.propagate_done(target, obs);
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
