use std::cmp::Ordering;

use log::{debug, error};

use super::node::{Color, NodeId, Side};
use super::RBTree;
use crate::error::TreeError;

impl<K: Ord, V> RBTree<K, V> {
    /// Inserts a new entry.
    ///
    /// Re-inserting a present key is rejected; entries are never updated in place.
    ///
    /// Complexity: O(log(n))
    pub fn insert(&mut self, key: impl Into<Option<K>>, value: V) -> Result<(), TreeError> {
        let key = key.into().ok_or(TreeError::IllegalNullKey)?;

        let Some(mut current) = self.root else {
            let root = self.alloc(key, value, None);
            self.set_color(root, Color::Black);
            self.root = Some(root);
            self.len += 1;
            return Ok(())
        };

        // find the empty slot first, so a duplicate leaves the tree untouched
        let side = loop {
            let side = match key.cmp(self.key(current)) {
                Ordering::Equal => return Err(TreeError::DuplicateKey),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match self.child(current, side) {
                Some(next) => current = next,
                None => break side,
            }
        };

        let new = self.alloc(key, value, Some(current));
        self.set_child(current, side, Some(new));
        self.len += 1;

        self.insert_fixup(new);
        Ok(())
    }
}

impl<K, V> RBTree<K, V> {
    /// Walks up from a freshly attached red node, removing red-red edges.
    fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            let Some(parent) = self.parent(node) else {
                // `node` is the root
                self.set_color(node, Color::Black);
                return
            };
            if self.color(parent) == Color::Black {
                return
            }

            // a red parent is never the root, so the grandparent exists
            let Some(grandparent) = self.parent(parent) else {
                error!("Red node {parent:?} has no parent, forcing it black");
                debug_assert!(false, "red root during insert fixup");
                self.set_color(parent, Color::Black);
                return
            };
            let parent_side = match self.side_of(parent) {
                Some(side) => side,
                None => return,
            };
            let uncle = self.child(grandparent, parent_side.opposite());

            if self.is_red(uncle) {
                debug!("Recoloring around {grandparent:?}");
                self.set_color(parent, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                if self.parent(grandparent).is_none() {
                    // the root absorbs the extra black
                    return
                }
                self.set_color(grandparent, Color::Red);
                node = grandparent;
            } else {
                debug!("Restructuring around {grandparent:?}");
                self.restructure(node);
                return
            }
        }
    }

    /// Resolves a red `node` under a red parent whose sibling is black.
    ///
    /// An inner grandchild is first rotated up over its parent, turning the zig-zag into a
    /// straight line. The middle node of the line is then rotated up into the
    /// grandparent's position, colored black, and the old grandparent becomes its red child.
    fn restructure(&mut self, node: NodeId) {
        let (Some(parent), Some(node_side)) = (self.parent(node), self.side_of(node)) else {
            return
        };
        let Some(parent_side) = self.side_of(parent) else {
            return
        };
        let Some(grandparent) = self.parent(parent) else {
            return
        };

        let promoted = if node_side == parent_side {
            parent
        } else {
            match node_side {
                Side::Left => self.rotate_right(node),
                Side::Right => self.rotate_left(node),
            }
            node
        };

        match parent_side {
            Side::Left => self.rotate_right(promoted),
            Side::Right => self.rotate_left(promoted),
        }
        self.set_color(promoted, Color::Black);
        self.set_color(grandparent, Color::Red);
    }
}
