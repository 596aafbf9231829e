//! Range payload, the stable merge, and trace events for merge sort.

use crate::tree::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SortPhase {
    Unsplit,
    /// Split at `mid`: children cover `[lo, mid]` and `[mid + 1, hi]`.
    Split { mid: usize },
    Sorted,
}

/// One merge-sort subproblem over `[lo, hi]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortNode {
    pub lo: usize,
    pub hi: usize,
    pub phase: SortPhase,
}

impl SortNode {
    pub(crate) fn unsplit(lo: usize, hi: usize) -> Self {
        Self {
            lo,
            hi,
            phase: SortPhase::Unsplit,
        }
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.phase == SortPhase::Sorted
    }
}

/// One slot written by a merge: `to` received the value that sat at `from`
/// before the merge started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MergeWrite {
    pub to: usize,
    pub from: usize,
}

/// Merge the sorted runs `xs[lo..=mid]` and `xs[mid + 1..=hi]` in place.
///
/// Stable: on equal keys the left run is taken first. Returns every write in
/// order, so `writes[k].to == lo + k`.
pub fn merge_runs<T: Ord + Clone>(
    xs: &mut [T],
    lo: usize,
    mid: usize,
    hi: usize,
) -> Vec<MergeWrite> {
    let left = xs[lo..=mid].to_vec();
    let right = xs[mid + 1..=hi].to_vec();
    let (mut i, mut j) = (0, 0);
    let mut writes = Vec::with_capacity(hi - lo + 1);

    for to in lo..=hi {
        let take_left = j >= right.len() || (i < left.len() && left[i] <= right[j]);
        let from = if take_left {
            xs[to] = left[i].clone();
            i += 1;
            lo + i - 1
        } else {
            xs[to] = right[j].clone();
            j += 1;
            mid + j
        };
        writes.push(MergeWrite { to, from });
    }
    writes
}

/// Trace emitted while stepping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SortEvent {
    Divided {
        node: NodeId,
        mid: usize,
        left: NodeId,
        right: NodeId,
    },
    /// A one-element range is sorted as is.
    Solved { node: NodeId, index: usize },
    Merged {
        node: NodeId,
        lo: usize,
        mid: usize,
        hi: usize,
        writes: Vec<MergeWrite>,
    },
}
