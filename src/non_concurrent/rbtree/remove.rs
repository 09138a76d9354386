use log::{debug, error, trace};

use super::node::{Color, NodeId, Side};
use super::{RBTree, Splice};
use crate::error::TreeError;

impl<K: Ord, V> RBTree<K, V> {
    /// Removes `key` from the tree, returning `Ok(true)` once it is gone.
    ///
    /// Complexity: O(log(n))
    pub fn remove<'k>(&mut self, key: impl Into<Option<&'k K>>) -> Result<bool, TreeError>
    where
        K: 'k,
    {
        self.remove_entry(key).map(|_| true)
    }

    /// Removes `key` from the tree and hands back the entry it held.
    pub fn remove_entry<'k>(&mut self, key: impl Into<Option<&'k K>>) -> Result<(K, V), TreeError>
    where
        K: 'k,
    {
        let id = self.find_present(key)?;
        self.unlink(id);
        self.len -= 1;
        // `find_present` only hands out live nodes
        self.free(id).ok_or(TreeError::KeyNotFound)
    }
}

impl<K, V> RBTree<K, V> {
    /// Detaches `target` from the tree and rebalances; the slot itself stays allocated.
    fn unlink(&mut self, target: NodeId) {
        // `removed_color` is the color that disappears from its position in the tree,
        // `hole` is whatever now sits there and `hole_parent` is its parent
        let (removed_color, hole, hole_parent) = match (self.left(target), self.right(target)) {
            (None, child) | (child, None) => {
                trace!("Splicing out {target:?} with at most one child");
                let parent = self.parent(target);
                self.transplant(target, child);
                (self.color(target), child, parent)
            }
            (Some(left), Some(right)) => {
                // the neighbour has no child on the `far` side, so it detaches with a single splice
                let (near, subtree) = match self.splice {
                    Splice::Predecessor => (Side::Left, left),
                    Splice::Successor => (Side::Right, right),
                };
                let far = near.opposite();
                let neighbour = self.extreme(subtree, far);
                trace!("Splicing in neighbour {neighbour:?} for {target:?}");

                let removed_color = self.color(neighbour);
                let hole = self.child(neighbour, near);
                let hole_parent = if neighbour == subtree {
                    Some(neighbour)
                } else {
                    let parent = self.parent(neighbour);
                    self.transplant(neighbour, hole);
                    let target_near = self.child(target, near);
                    self.set_child(neighbour, near, target_near);
                    parent
                };

                self.transplant(target, Some(neighbour));
                let target_far = self.child(target, far);
                self.set_child(neighbour, far, target_far);
                let target_color = self.color(target);
                self.set_color(neighbour, target_color);

                (removed_color, hole, hole_parent)
            }
        };

        let node = self.node_mut(target);
        node.left = None;
        node.right = None;
        node.parent = None;

        if removed_color == Color::Black {
            self.remove_fixup(hole, hole_parent);
        }
    }

    /// Restores uniform black-height after a black node left the path through `node`.
    ///
    /// `node` carries an extra black. It is pushed upward until it lands on a red node
    /// (which absorbs it) or the root, or is resolved by a rotation at the sibling.
    fn remove_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        while node != self.root && self.is_black(node) {
            let Some(p) = parent else { break };
            let side = if self.left(p) == node { Side::Left } else { Side::Right };
            let far = side.opposite();

            // the sibling's subtree has black-height at least 1, so it exists
            let Some(mut sibling) = self.child(p, far) else {
                error!("Double black at {p:?} has no sibling");
                debug_assert!(false, "missing sibling during remove fixup");
                break
            };

            if self.color(sibling) == Color::Red {
                debug!("Red sibling {sibling:?}, rotating it over {p:?}");
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate_up(sibling);
                match self.child(p, far) {
                    Some(s) => sibling = s,
                    None => break,
                }
            }

            let inner = self.child(sibling, side);
            let outer = self.child(sibling, far);

            if self.is_black(inner) && self.is_black(outer) {
                debug!("Black sibling {sibling:?} with black children, moving up");
                self.set_color(sibling, Color::Red);
                node = Some(p);
                parent = self.parent(p);
                continue
            }

            if self.is_black(outer) {
                if let Some(inner) = inner {
                    debug!("Rotating inner nephew {inner:?} over {sibling:?}");
                    self.set_color(inner, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate_up(inner);
                    sibling = inner;
                }
            }

            debug!("Rotating sibling {sibling:?} over {p:?}");
            let parent_color = self.color(p);
            self.set_color(sibling, parent_color);
            self.set_color(p, Color::Black);
            if let Some(outer) = self.child(sibling, far) {
                self.set_color(outer, Color::Black);
            }
            self.rotate_up(sibling);
            node = self.root;
            break
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }
}
