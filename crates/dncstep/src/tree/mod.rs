//! Recursion tree: an arena of subproblem nodes addressed by `NodeId`.
//!
//! Purpose
//! - Replace call-stack recursion with an explicit binary tree the caller can
//!   inspect between steps.
//! - Make snapshots cheap: nodes live behind `Arc`, so cloning a tree copies
//!   pointers and a step only reallocates the nodes it touches
//!   (`Arc::make_mut`).
//!
//! Invariants
//! - `NodeId(k)` is the k-th node created; ids are never reused or removed.
//! - A node has either no children or exactly two (`children = Some((l, r))`),
//!   and both children name it as `parent`.
//!
//! Code cross-refs: `schedule` (traversal order), `closest_pair`, `quickhull`, `maxsub`

mod schedule;

use std::fmt;
use std::sync::Arc;

pub use schedule::{first_in_preorder, first_ready_to_combine, last_in_preorder};

/// Identifier of a node; equal to its creation index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// One subproblem. `item` carries the solver-specific payload and phase.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node<P> {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Option<(NodeId, NodeId)>,
    pub item: P,
}

impl<P> Node<P> {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(l, _)| l)
    }
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, r)| r)
    }
}

/// Binary recursion tree rooted at `NodeId(0)`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tree<P> {
    nodes: Vec<Arc<Node<P>>>,
}

impl<P: Clone> Tree<P> {
    /// A tree holding only the root.
    pub fn with_root(item: P) -> Self {
        Self {
            nodes: vec![Arc::new(Node {
                id: NodeId(0),
                parent: None,
                children: None,
                item,
            })],
        }
    }

    /// Mutable access to a node's payload; clones the node if a snapshot shares it.
    #[inline]
    pub fn item_mut(&mut self, id: NodeId) -> &mut P {
        &mut Arc::make_mut(&mut self.nodes[id.0]).item
    }

    /// Attach two fresh children to a leaf and return their ids (left, right).
    ///
    /// Panics if `parent` already has children.
    pub fn split(&mut self, parent: NodeId, left: P, right: P) -> (NodeId, NodeId) {
        assert!(self[parent].is_leaf(), "node {parent} is already split");
        let l = self.push(parent, left);
        let r = self.push(parent, right);
        Arc::make_mut(&mut self.nodes[parent.0]).children = Some((l, r));
        (l, r)
    }

    fn push(&mut self, parent: NodeId, item: P) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Arc::new(Node {
            id,
            parent: Some(parent),
            children: None,
            item,
        }));
        id
    }
}

impl<P> Tree<P> {
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node<P>> {
        self.nodes.get(id.0).map(Arc::as_ref)
    }

    /// Nodes in creation (= id) order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<P>> {
        self.nodes.iter().map(Arc::as_ref)
    }

    /// Leaves of the subtree at `start`, in preorder.
    pub fn leaves(&self, start: NodeId) -> Vec<NodeId> {
        self.preorder(start)
            .into_iter()
            .filter(|&id| self[id].is_leaf())
            .collect()
    }

    /// Depth-first preorder from `start`: children are pushed right-then-left
    /// so the left child is visited first.
    pub fn preorder(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(n) = self.get(id) else { continue };
            out.push(id);
            if let Some((l, r)) = n.children {
                stack.push(r);
                stack.push(l);
            }
        }
        out
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut best = 0;
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, d)) = stack.pop() {
            best = best.max(d);
            if let Some((l, r)) = self[id].children {
                stack.push((l, d + 1));
                stack.push((r, d + 1));
            }
        }
        best
    }

    /// True if both trees still share the storage of node `id`, i.e. it was
    /// not written in either since they diverged.
    #[inline]
    pub fn shares_node(&self, other: &Self, id: NodeId) -> bool {
        match (self.nodes.get(id.0), other.nodes.get(id.0)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<P> std::ops::Index<NodeId> for Tree<P> {
    type Output = Node<P>;
    #[inline]
    fn index(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id.0]
    }
}
