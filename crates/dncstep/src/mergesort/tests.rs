use super::*;
use crate::stepper::Recorder;
use proptest::prelude::*;
use std::cmp::Ordering;

/// Orders by key only, so equal keys with different tags expose instability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tagged {
    key: i32,
    tag: usize,
}

impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn tagged(keys: &[i32]) -> Vec<Tagged> {
    keys.iter()
        .enumerate()
        .map(|(tag, &key)| Tagged { key, tag })
        .collect()
}

#[test]
fn sorts_small_array() {
    let s = MergeSort::new(vec![5, 2, 9, 1, 5, 6]).run_to_end();
    assert!(s.is_finished());
    assert_eq!(s.array(), &[1, 2, 5, 5, 6, 9]);
    assert_eq!(s.values(), &[5, 2, 9, 1, 5, 6]);
}

#[test]
fn empty_array_starts_finished() {
    let s = MergeSort::<i64>::new(vec![]);
    assert!(s.is_finished());
    assert!(s.enabled().is_empty());
    assert!(s.array().is_empty());
}

#[test]
fn single_value_needs_one_conquer() {
    let s = MergeSort::new(vec![4]);
    assert!(!s.can_divide());
    assert!(!s.can_combine());
    let mut rec = Recorder::new();
    let s = s.step_conquer_observed(&mut rec);
    assert!(s.is_finished());
    assert_eq!(
        rec.events,
        vec![SortEvent::Solved {
            node: NodeId(0),
            index: 0
        }]
    );
}

#[test]
fn divide_halves_at_floor_mid() {
    let mut rec = Recorder::new();
    let s = MergeSort::new(vec![3, 1, 2, 5, 4]).step_divide_observed(&mut rec);
    assert_eq!(s.tree()[NodeId(0)].item.phase, SortPhase::Split { mid: 2 });
    assert_eq!((s.tree()[NodeId(1)].item.lo, s.tree()[NodeId(1)].item.hi), (0, 2));
    assert_eq!((s.tree()[NodeId(2)].item.lo, s.tree()[NodeId(2)].item.hi), (3, 4));
    assert_eq!(
        rec.events,
        vec![SortEvent::Divided {
            node: NodeId(0),
            mid: 2,
            left: NodeId(1),
            right: NodeId(2)
        }]
    );
    assert_eq!(s.next_divide_target(), Some(NodeId(1)));
    // dividing never touches the array
    assert_eq!(s.array(), s.values());
}

#[test]
fn merge_reports_every_write() {
    let mut xs = vec![2, 7, 1, 3, 8];
    let writes = merge_runs(&mut xs, 0, 1, 4);
    assert_eq!(xs, vec![1, 2, 3, 7, 8]);
    let pairs: Vec<(usize, usize)> = writes.iter().map(|w| (w.to, w.from)).collect();
    assert_eq!(pairs, vec![(0, 2), (1, 0), (2, 3), (3, 1), (4, 4)]);
}

#[test]
fn merge_takes_left_on_equal_keys() {
    let mut xs = tagged(&[1, 4, 1, 4]);
    merge_runs(&mut xs, 0, 1, 3);
    let tags: Vec<usize> = xs.iter().map(|t| t.tag).collect();
    assert_eq!(tags, vec![0, 2, 1, 3]);
}

#[test]
fn combine_waits_for_both_children() {
    let s = MergeSort::new(vec![2, 1]).step_divide();
    let s = s.step_conquer();
    assert!(!s.can_combine());
    let s = s.step_conquer();
    assert_eq!(s.next_combine_target(), Some(NodeId(0)));

    let mut rec = Recorder::new();
    let s = s.step_combine_observed(&mut rec);
    assert!(s.is_finished());
    assert_eq!(s.array(), &[1, 2]);
    assert_eq!(
        rec.events,
        vec![SortEvent::Merged {
            node: NodeId(0),
            lo: 0,
            mid: 0,
            hi: 1,
            writes: vec![MergeWrite { to: 0, from: 1 }, MergeWrite { to: 1, from: 0 }],
        }]
    );
}

#[test]
fn earlier_snapshots_keep_their_array() {
    let before = MergeSort::new(vec![3, 2, 1]).step_divide().step_divide();
    let before = before.step_conquer().step_conquer();
    let after = before.step_combine();
    assert_eq!(before.array(), &[3, 2, 1]);
    assert_eq!(after.array(), &[2, 3, 1]);
}

#[test]
fn reset_keeps_values() {
    let s = MergeSort::new(vec![3, 1, 2]).run_to_end();
    let r = s.reset();
    assert_eq!(r.array(), &[3, 1, 2]);
    assert_eq!(r.tree().len(), 1);
    assert!(!r.is_finished());
    assert_eq!(r.active(), None);
}

proptest! {
    #[test]
    fn any_interleaving_matches_std_sort(
        keys in prop::collection::vec(-8i32..8, 0..60),
        choices in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let xs = tagged(&keys);
        let mut expected = xs.clone();
        expected.sort();

        let mut s = MergeSort::new(xs.clone());
        let mut picks = choices.into_iter();
        loop {
            let enabled = s.enabled();
            if enabled.is_empty() {
                break;
            }
            let k = picks.next().map_or(0, |c| c as usize % enabled.len());
            s = s.step(enabled[k]);
        }
        prop_assert!(s.is_finished());
        // tags included: a stable sort leaves equal keys in input order
        let got: Vec<(i32, usize)> = s.array().iter().map(|t| (t.key, t.tag)).collect();
        let want: Vec<(i32, usize)> = expected.iter().map(|t| (t.key, t.tag)).collect();
        prop_assert_eq!(got, want);
        prop_assert_eq!(s.values(), &xs[..]);
    }
}
