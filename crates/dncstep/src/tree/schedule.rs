//! Deterministic target selection over a recursion tree.
//!
//! All functions are pure: the same tree and predicate always give the same
//! answer. Ties are resolved by position in the fixed preorder from `start`,
//! never by subproblem size or payload values.

use super::{Node, NodeId, Tree};

/// First node in preorder from `start` satisfying `pred`.
pub fn first_in_preorder<P>(
    tree: &Tree<P>,
    start: NodeId,
    pred: impl Fn(&Node<P>) -> bool,
) -> Option<NodeId> {
    tree.preorder(start).into_iter().find(|&id| pred(&tree[id]))
}

/// Last node in preorder from `start` satisfying `pred` (bottom-up scan).
pub fn last_in_preorder<P>(
    tree: &Tree<P>,
    start: NodeId,
    pred: impl Fn(&Node<P>) -> bool,
) -> Option<NodeId> {
    tree.preorder(start)
        .into_iter()
        .rev()
        .find(|&id| pred(&tree[id]))
}

/// Deepest-first internal node that is not done while both its children are.
///
/// Scanning the preorder in reverse guarantees a node is never returned before
/// every node of its subtree that could be combined.
pub fn first_ready_to_combine<P>(
    tree: &Tree<P>,
    start: NodeId,
    is_done: impl Fn(&P) -> bool,
) -> Option<NodeId> {
    last_in_preorder(tree, start, |n| match n.children {
        Some((l, r)) => !is_done(&n.item) && is_done(&tree[l].item) && is_done(&tree[r].item),
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_picks_deepest_ready_node() {
        // item = done flag
        let mut t = Tree::with_root(false);
        let (l, r) = t.split(NodeId(0), false, false);
        t.split(l, true, true);
        t.split(r, true, true);
        // both l and r are ready; r comes last in preorder so it is picked first
        assert_eq!(first_ready_to_combine(&t, t.root(), |d| *d), Some(r));
        *t.item_mut(r) = true;
        assert_eq!(first_ready_to_combine(&t, t.root(), |d| *d), Some(l));
        *t.item_mut(l) = true;
        assert_eq!(first_ready_to_combine(&t, t.root(), |d| *d), Some(NodeId(0)));
        *t.item_mut(NodeId(0)) = true;
        assert_eq!(first_ready_to_combine(&t, t.root(), |d| *d), None);
    }

    #[test]
    fn first_and_last_follow_preorder() {
        let mut t = Tree::with_root(0u32);
        let (l, r) = t.split(NodeId(0), 1, 1);
        assert_eq!(first_in_preorder(&t, t.root(), |n| n.item == 1), Some(l));
        assert_eq!(last_in_preorder(&t, t.root(), |n| n.item == 1), Some(r));
        assert_eq!(first_in_preorder(&t, r, |n| n.item == 0), None);
    }
}
