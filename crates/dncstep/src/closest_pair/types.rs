//! Node payload, result pair, and trace events for the closest-pair stepper.

use crate::geom2::{distance2, PointId, PointSet};
use crate::tree::NodeId;

/// A candidate closest pair and its squared distance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pair {
    pub a: PointId,
    pub b: PointId,
    pub d2: f64,
}

impl Pair {
    #[inline]
    pub fn measure(points: &PointSet, a: PointId, b: PointId) -> Self {
        Self {
            a,
            b,
            d2: distance2(points.pos(a), points.pos(b)),
        }
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.d2.sqrt()
    }

    /// Same two points, in either order.
    #[inline]
    pub fn same_points(&self, other: &Pair) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

/// Lifecycle of a closest-pair subproblem.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CpPhase {
    /// Not yet divided or solved.
    Idle,
    /// Split into two children; waiting for both to be done.
    Divided,
    /// Solved. `best` is `None` only for a subproblem with fewer than two points.
    Done { best: Option<Pair> },
}

/// One closest-pair subproblem.
///
/// Invariants:
/// - `split_x` is set iff the node has children.
/// - For a divided node, the children's `members` partition this node's
///   `members`, every left member sorting before every right member by x.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CpNode {
    pub members: Vec<PointId>,
    pub split_x: Option<f64>,
    pub phase: CpPhase,
}

impl CpNode {
    pub(crate) fn idle(members: Vec<PointId>) -> Self {
        Self {
            members,
            split_x: None,
            phase: CpPhase::Idle,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self.phase, CpPhase::Done { .. })
    }

    #[inline]
    pub fn best(&self) -> Option<Pair> {
        match self.phase {
            CpPhase::Done { best } => best,
            _ => None,
        }
    }
}

/// Trace emitted while stepping; carries what a teaching view highlights.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CpEvent {
    Divided {
        node: NodeId,
        split_x: f64,
        left: NodeId,
        right: NodeId,
    },
    /// One distance evaluation (base case or strip).
    Compared { node: NodeId, pair: Pair },
    /// Strip of a combine, sorted by y, built for squared half-width `d2`.
    StripBuilt {
        node: NodeId,
        strip: Vec<PointId>,
        d2: f64,
    },
    Solved { node: NodeId, best: Option<Pair> },
    GlobalBestImproved { pair: Pair },
}

/// Better of two optional pairs; `a` wins ties.
#[inline]
pub(crate) fn better(a: Option<Pair>, b: Option<Pair>) -> Option<Pair> {
    match (a, b) {
        (Some(x), Some(y)) => Some(if x.d2 <= y.d2 { x } else { y }),
        (x, None) => x,
        (None, y) => y,
    }
}
