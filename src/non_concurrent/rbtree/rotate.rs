use log::{error, trace};

use super::node::{NodeId, Side};
use super::RBTree;

impl<K, V> RBTree<K, V> {
    /// Puts `replacement` into the slot `old` occupies under its parent (or at the root).
    ///
    /// `old` keeps its own links; the caller is responsible for rewiring or freeing it.
    pub(super) fn transplant(&mut self, old: NodeId, replacement: Option<NodeId>) {
        let parent = self.parent(old);
        match (parent, self.side_of(old)) {
            (Some(p), Some(side)) => self.set_child(p, side, replacement),
            _ => {
                self.root = replacement;
                if let Some(r) = replacement {
                    self.node_mut(r).parent = None;
                }
            }
        }
    }

    /// Rotates `pivot` up into the position of its parent.
    ///
    /// The parent moves down to the side opposite the one `pivot` hung off, and
    /// adopts `pivot`'s inner subtree. In-order sequence is unchanged.
    ///
    /// ```text
    ///       P                 X
    ///      / \               / \
    ///     X   c     =>      a   P
    ///    / \                   / \
    ///   a   b                 b   c
    /// ```
    ///
    /// Complexity: O(1)
    pub(super) fn rotate_up(&mut self, pivot: NodeId) {
        let (Some(parent), Some(side)) = (self.parent(pivot), self.side_of(pivot)) else {
            error!("Tried to rotate the root upward");
            debug_assert!(false, "rotate_up called on the root");
            return;
        };
        trace!("Rotating node {pivot:?} over {parent:?}");

        let inner = self.child(pivot, side.opposite());
        self.transplant(parent, Some(pivot));
        self.set_child(parent, side, inner);
        self.set_child(pivot, side.opposite(), Some(parent));
    }

    /// Left rotation around `pivot`'s parent; `pivot` must be a right child.
    pub(super) fn rotate_left(&mut self, pivot: NodeId) {
        debug_assert_eq!(self.side_of(pivot), Some(Side::Right));
        self.rotate_up(pivot);
    }

    /// Right rotation around `pivot`'s parent; `pivot` must be a left child.
    pub(super) fn rotate_right(&mut self, pivot: NodeId) {
        debug_assert_eq!(self.side_of(pivot), Some(Side::Left));
        self.rotate_up(pivot);
    }
}
