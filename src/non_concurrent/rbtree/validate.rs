use thiserror::Error;

use super::node::{Color, NodeId, Side};
use super::RBTree;

/// A broken red-black or structural invariant, reported by [`RBTree::check_invariants`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("the root is red")]
    RedRoot,

    #[error("a red node has a red child")]
    RedRedEdge,

    #[error("paths below a node disagree on black-height ({left} on the left, {right} on the right)")]
    BlackHeightMismatch { left: usize, right: usize },

    #[error("keys are not in strictly ascending in-order sequence")]
    OutOfOrder,

    #[error("a child's parent link does not point back at its parent")]
    BrokenParentLink,

    #[error("tree holds {found} reachable nodes but counts {expected}")]
    SizeMismatch { expected: usize, found: usize },
}

impl<K: Ord, V> RBTree<K, V> {
    /// Checks ordering, coloring, black-height and parent links of the whole tree.
    ///
    /// Returns the black-height of the root (0 for an empty tree).
    ///
    /// Complexity: O(n)
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        if let Some(root) = self.root {
            if self.color(root) == Color::Red {
                return Err(InvariantViolation::RedRoot)
            }
            if self.parent(root).is_some() {
                return Err(InvariantViolation::BrokenParentLink)
            }
        }

        let mut count = 0;
        let black_height = self.check_subtree(self.root, &mut count)?;
        if count != self.len() {
            return Err(InvariantViolation::SizeMismatch { expected: self.len(), found: count })
        }

        let keys = self.in_order();
        if keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(InvariantViolation::OutOfOrder)
        }

        Ok(black_height)
    }

    fn check_subtree(&self, node: Option<NodeId>, count: &mut usize) -> Result<usize, InvariantViolation> {
        let Some(id) = node else { return Ok(0) };
        *count += 1;

        for side in [Side::Left, Side::Right] {
            if let Some(child) = self.child(id, side) {
                if self.parent(child) != Some(id) {
                    return Err(InvariantViolation::BrokenParentLink)
                }
                if self.color(id) == Color::Red && self.color(child) == Color::Red {
                    return Err(InvariantViolation::RedRedEdge)
                }
            }
        }

        let left = self.check_subtree(self.left(id), count)?;
        let right = self.check_subtree(self.right(id), count)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { left, right })
        }

        Ok(left + usize::from(self.color(id) == Color::Black))
    }
}
