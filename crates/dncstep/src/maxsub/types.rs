//! Range payload, summaries, and trace events for the maximum-subarray stepper.

use crate::tree::NodeId;

/// Inclusive index range `[lo, hi]`.
pub type Span = (usize, usize);

/// Everything a parent needs from a solved range.
///
/// Sums are `i128`: the sum of any `Vec<i64>` fits, so merging never overflows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub sum: i128,
    /// Best sum of a non-empty prefix, and that prefix.
    pub pref: i128,
    pub pref_span: Span,
    /// Best sum of a non-empty suffix, and that suffix.
    pub suff: i128,
    pub suff_span: Span,
    /// Best sum of a non-empty subarray, and that subarray.
    pub best: i128,
    pub best_span: Span,
}

impl Summary {
    /// Summary of the one-element range at `i`.
    pub fn single(i: usize, x: i64) -> Self {
        let x = i128::from(x);
        Self {
            sum: x,
            pref: x,
            pref_span: (i, i),
            suff: x,
            suff_span: (i, i),
            best: x,
            best_span: (i, i),
        }
    }
}

/// Which candidate won a combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BestCase {
    Left,
    Right,
    Cross,
}

/// Merge the summaries of two adjacent ranges, `a` left of `b`.
///
/// Prefix keeps `a`'s prefix on ties, suffix keeps `b`'s. Best starts from the
/// left, and the right and crossing candidates only win on strict improvement.
pub fn merge(a: &Summary, b: &Summary) -> (Summary, BestCase) {
    let sum = a.sum + b.sum;

    let (pref, pref_span) = if a.pref >= a.sum + b.pref {
        (a.pref, a.pref_span)
    } else {
        (a.sum + b.pref, (a.pref_span.0, b.pref_span.1))
    };
    let (suff, suff_span) = if b.suff >= b.sum + a.suff {
        (b.suff, b.suff_span)
    } else {
        (b.sum + a.suff, (a.suff_span.0, b.suff_span.1))
    };

    let cross = a.suff + b.pref;
    let mut best = (a.best, a.best_span, BestCase::Left);
    if b.best > best.0 {
        best = (b.best, b.best_span, BestCase::Right);
    }
    if cross > best.0 {
        best = (cross, (a.suff_span.0, b.pref_span.1), BestCase::Cross);
    }

    let summary = Summary {
        sum,
        pref,
        pref_span,
        suff,
        suff_span,
        best: best.0,
        best_span: best.1,
    };
    (summary, best.2)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MsPhase {
    Unsplit,
    /// Split at `mid`: children cover `[lo, mid]` and `[mid + 1, hi]`.
    Split { mid: usize },
    Solved(Summary),
}

/// One maximum-subarray subproblem over `[lo, hi]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MsNode {
    pub lo: usize,
    pub hi: usize,
    pub phase: MsPhase,
}

impl MsNode {
    pub(crate) fn unsplit(lo: usize, hi: usize) -> Self {
        Self {
            lo,
            hi,
            phase: MsPhase::Unsplit,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.hi - self.lo + 1
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        matches!(self.phase, MsPhase::Solved(_))
    }

    #[inline]
    pub fn summary(&self) -> Option<&Summary> {
        match &self.phase {
            MsPhase::Solved(s) => Some(s),
            _ => None,
        }
    }
}

/// Trace emitted while stepping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MaxSubEvent {
    Divided {
        node: NodeId,
        mid: usize,
        left: NodeId,
        right: NodeId,
    },
    Solved {
        node: NodeId,
        index: usize,
        value: i64,
    },
    /// `cross` is the best sum straddling the midpoint, built from the left
    /// child's suffix and the right child's prefix.
    Combined {
        node: NodeId,
        cross: i128,
        cross_left: Span,
        cross_right: Span,
        chosen: BestCase,
        summary: Summary,
    },
}
