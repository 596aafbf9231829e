//! Node payload, hull edges, configuration, and trace events for Quickhull.

use std::fmt;

use crate::cfg::LEFT_EPS;
use crate::geom2::{edge_key, PointId};
use crate::tree::NodeId;

/// One of the two half-hull problems separated by the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Chain {
    /// Points left of `min → max` (above the baseline).
    Upper,
    /// Points left of `max → min` (below the baseline).
    Lower,
}

/// Chains are worked in this order; the second starts once the first is done.
pub(crate) const CHAIN_ORDER: [Chain; 2] = [Chain::Lower, Chain::Upper];

/// What a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HullKind {
    /// Whole point set, split once by the baseline.
    Root,
    /// Directed edge `a → b` of the current hull approximation; outside points lie left of it.
    Edge { chain: Chain, a: PointId, b: PointId },
}

/// Lifecycle of a Quickhull subproblem.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HullPhase {
    Todo,
    /// Farthest outside point chosen; waiting for Conquer.
    Pivoted { pivot: PointId, dist: f64 },
    /// Children own the remaining work. The root splits without a pivot.
    Split { pivot: Option<PointId> },
    /// Leaf: edge confirmed on the hull. Interior node: both children done.
    Done,
}

/// One Quickhull subproblem.
///
/// Invariants:
/// - Every `outside` point lies strictly left of the node's edge.
/// - Children's `outside` sets are disjoint subsets of the parent's.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HullNode {
    pub kind: HullKind,
    pub outside: Vec<PointId>,
    pub phase: HullPhase,
}

impl HullNode {
    pub(crate) fn edge(chain: Chain, a: PointId, b: PointId, outside: Vec<PointId>) -> Self {
        Self {
            kind: HullKind::Edge { chain, a, b },
            outside,
            phase: HullPhase::Todo,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.phase == HullPhase::Done
    }

    #[inline]
    pub fn is_pivoted(&self) -> bool {
        matches!(self.phase, HullPhase::Pivoted { .. })
    }

    /// Endpoints of the node's edge; `None` for the root.
    #[inline]
    pub fn endpoints(&self) -> Option<(PointId, PointId)> {
        match self.kind {
            HullKind::Edge { a, b, .. } => Some((a, b)),
            HullKind::Root => None,
        }
    }

    #[inline]
    pub fn chain(&self) -> Option<Chain> {
        match self.kind {
            HullKind::Edge { chain, .. } => Some(chain),
            HullKind::Root => None,
        }
    }
}

/// Undirected hull edge, stored in the direction it was confirmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HullEdge {
    pub a: PointId,
    pub b: PointId,
}

impl HullEdge {
    #[inline]
    pub fn key(&self) -> (PointId, PointId) {
        edge_key(self.a, self.b)
    }
}

/// Quickhull tolerances.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HullCfg {
    /// Slack of the strict left-of test. Points within it of an edge count as interior.
    pub eps_left: f64,
}

impl Default for HullCfg {
    fn default() -> Self {
        Self { eps_left: LEFT_EPS }
    }
}

impl HullCfg {
    /// `eps_left` must be finite and non-negative; anything else would let
    /// collinear points pass the strict side test.
    pub fn validate(&self) -> Result<(), HullCfgError> {
        if !self.eps_left.is_finite() || self.eps_left < 0.0 {
            return Err(HullCfgError::InvalidSlack {
                eps_left: self.eps_left,
            });
        }
        Ok(())
    }
}

/// Rejected Quickhull configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HullCfgError {
    InvalidSlack { eps_left: f64 },
}

impl fmt::Display for HullCfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSlack { eps_left } => {
                write!(f, "eps_left must be finite and >= 0, got {eps_left}")
            }
        }
    }
}

impl std::error::Error for HullCfgError {}

/// Trace emitted while stepping.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HullEvent {
    /// Baseline split between the extreme points.
    Baseline {
        min: PointId,
        max: PointId,
        upper: NodeId,
        lower: NodeId,
        discarded: Vec<PointId>,
    },
    /// Farthest point from the node's edge selected.
    Pivoted {
        node: NodeId,
        a: PointId,
        b: PointId,
        pivot: PointId,
        dist: f64,
    },
    /// Outside set partitioned against triangle `a, pivot, b`.
    Split {
        node: NodeId,
        triangle: [PointId; 3],
        left: NodeId,
        right: NodeId,
        discarded: Vec<PointId>,
    },
    /// Edge confirmed; `duplicate` if it was already in the hull.
    EdgeAdded {
        node: NodeId,
        edge: HullEdge,
        duplicate: bool,
    },
    ChainCompleted { chain: Chain },
    Finished,
}
