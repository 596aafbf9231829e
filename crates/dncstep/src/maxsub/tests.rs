use super::*;
use crate::stepper::Recorder;
use proptest::prelude::*;

fn kadane(xs: &[i64]) -> i64 {
    let mut best = xs[0];
    let mut cur = xs[0];
    for &x in &xs[1..] {
        cur = x.max(cur + x);
        best = best.max(cur);
    }
    best
}

#[test]
fn classic_example() {
    let xs = vec![-2, 1, -3, 4, -1, 2, 1, -5, 4];
    let s = MaxSubarray::new(xs).run_to_end();
    assert!(s.is_finished());
    let r = s.result().expect("root solved");
    assert_eq!(r.best, 6);
    assert_eq!(r.best_span, (3, 6));
    assert_eq!(r.sum, 1);
}

#[test]
fn empty_array_starts_finished() {
    let s = MaxSubarray::new(vec![]);
    assert!(s.is_finished());
    assert!(s.enabled().is_empty());
    assert_eq!(s.result(), None);
}

#[test]
fn single_value_needs_one_conquer() {
    let s = MaxSubarray::new(vec![-7]);
    assert!(!s.can_divide());
    let s = s.step_conquer();
    assert!(s.is_finished());
    assert_eq!(s.result(), Some(&Summary::single(0, -7)));
}

#[test]
fn divide_halves_at_floor_mid() {
    let mut rec = Recorder::new();
    let s = MaxSubarray::new(vec![1, 2, 3, 4, 5]).step_divide_observed(&mut rec);
    assert_eq!(s.tree()[NodeId(0)].item.phase, MsPhase::Split { mid: 2 });
    assert_eq!((s.tree()[NodeId(1)].item.lo, s.tree()[NodeId(1)].item.hi), (0, 2));
    assert_eq!((s.tree()[NodeId(2)].item.lo, s.tree()[NodeId(2)].item.hi), (3, 4));
    assert_eq!(
        rec.events,
        vec![MaxSubEvent::Divided {
            node: NodeId(0),
            mid: 2,
            left: NodeId(1),
            right: NodeId(2)
        }]
    );
    // left subtree first
    assert_eq!(s.next_divide_target(), Some(NodeId(1)));
}

#[test]
fn merge_tie_rules() {
    // prefix tie: 3 == 3 + 0, keep the left prefix alone
    let a = merge(&Summary::single(0, 3), &Summary::single(1, 0)).0;
    assert_eq!((a.pref, a.pref_span), (3, (0, 0)));
    assert_eq!((a.suff, a.suff_span), (3, (0, 1)));

    // suffix tie: 3 == 3 + 0, keep the right suffix alone
    let b = merge(&Summary::single(0, 0), &Summary::single(1, 3)).0;
    assert_eq!((b.suff, b.suff_span), (3, (1, 1)));
    assert_eq!((b.pref, b.pref_span), (3, (0, 1)));

    // left and right best tie at 2, cross is worse: left wins
    let l = merge(&Summary::single(0, 2), &Summary::single(1, -5)).0;
    let (c, case) = merge(&l, &Summary::single(2, 2));
    assert_eq!(case, BestCase::Left);
    assert_eq!((c.best, c.best_span), (2, (0, 0)));
}

#[test]
fn combine_reports_cross_case() {
    let mut rec = Recorder::new();
    let s = MaxSubarray::new(vec![2, 3]).run_to_end_observed(&mut rec);
    assert_eq!(s.result().unwrap().best, 5);
    let combined = rec.events.iter().find_map(|e| match e {
        MaxSubEvent::Combined {
            chosen,
            cross,
            cross_left,
            cross_right,
            ..
        } => Some((*chosen, *cross, *cross_left, *cross_right)),
        _ => None,
    });
    assert_eq!(combined, Some((BestCase::Cross, 5, (0, 0), (1, 1))));
}

#[test]
fn all_negative_picks_largest_element() {
    let s = MaxSubarray::new(vec![-4, -2, -9, -2]).run_to_end();
    let r = s.result().unwrap();
    assert_eq!(r.best, -2);
    assert_eq!(r.best_span, (1, 1));
}

#[test]
fn sums_beyond_i64_do_not_overflow() {
    let s = MaxSubarray::new(vec![i64::MAX, 1]).run_to_end();
    let r = s.result().unwrap();
    assert_eq!(r.sum, i128::from(i64::MAX) + 1);
    assert_eq!(r.best, i128::from(i64::MAX) + 1);
    assert_eq!(r.best_span, (0, 1));

    let s = MaxSubarray::new(vec![i64::MIN, i64::MIN, i64::MIN]).run_to_end();
    let r = s.result().unwrap();
    assert_eq!(r.sum, 3 * i128::from(i64::MIN));
    assert_eq!(r.best, i128::from(i64::MIN));
    assert_eq!(r.best_span, (0, 0));
}

#[test]
fn children_cover_parent_range() {
    let s = MaxSubarray::new(vec![5, -1, 4, -2, 3, 0, 7]).run_to_end();
    for n in s.tree().iter() {
        let Some((l, r)) = n.children else {
            assert_eq!(n.item.width(), 1);
            continue;
        };
        let (a, b) = (&s.tree()[l].item, &s.tree()[r].item);
        assert_eq!(a.lo, n.item.lo);
        assert_eq!(a.hi + 1, b.lo);
        assert_eq!(b.hi, n.item.hi);
        assert_eq!(a.width() + b.width(), n.item.width());
        // the left half keeps the middle element
        assert!(a.width() == b.width() || a.width() == b.width() + 1);
    }
}

#[test]
fn reset_keeps_values() {
    let s = MaxSubarray::new(vec![1, -1, 1]).run_to_end();
    let r = s.reset();
    assert_eq!(r.values(), &[1, -1, 1]);
    assert_eq!(r.tree().len(), 1);
    assert!(!r.is_finished());
    assert_eq!(r.active(), None);
}

proptest! {
    #[test]
    fn any_interleaving_matches_kadane(
        xs in prop::collection::vec(-50i64..50, 1..60),
        choices in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let expected = kadane(&xs);
        let mut s = MaxSubarray::new(xs.clone());
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
        let r = *s.result().unwrap();
        prop_assert_eq!(r.best, i128::from(expected));
        prop_assert_eq!(r.sum, xs.iter().map(|&x| i128::from(x)).sum::<i128>());
        let (lo, hi) = r.best_span;
        prop_assert_eq!(xs[lo..=hi].iter().map(|&x| i128::from(x)).sum::<i128>(), r.best);
        // n leaves, n - 1 internal nodes
        prop_assert_eq!(s.tree().len(), 2 * xs.len() - 1);
    }
}
