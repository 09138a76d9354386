use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::node::NodeId;
use super::RBTree;

impl<K, V> RBTree<K, V> {
    /// The number of nodes on the longest root-to-leaf path, 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn height_of(&self, node: Option<NodeId>) -> usize {
        match node {
            None => 0,
            Some(id) => 1 + self.height_of(self.left(id)).max(self.height_of(self.right(id))),
        }
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<&K> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Keys with every node visited before its left and then right subtree.
    pub fn pre_order(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            keys.push(self.key(id));
            // right goes on the stack first so the left subtree is popped first
            stack.extend(self.right(id));
            stack.extend(self.left(id));
        }
        keys
    }

    /// Keys with every node visited after both of its subtrees.
    pub fn post_order(&self) -> Vec<&K> {
        // a (self, right, left) pre-order walk, reversed
        let mut keys = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            keys.push(self.key(id));
            stack.extend(self.left(id));
            stack.extend(self.right(id));
        }
        keys.reverse();
        keys
    }

    /// Keys breadth-first, root first and each level left to right.
    pub fn level_order(&self) -> Vec<&K> {
        self.levels().into_iter().flatten().collect()
    }

    /// Keys grouped by depth; `levels()[0]` holds only the root key.
    pub fn levels(&self) -> Vec<Vec<&K>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();

        while !queue.is_empty() {
            let width = queue.len();
            let mut level = Vec::with_capacity(width);
            for _ in 0..width {
                let Some(id) = queue.pop_front() else { break };
                level.push(self.key(id));
                queue.extend(self.left(id));
                queue.extend(self.right(id));
            }
            levels.push(level);
        }
        levels
    }

    /// Lazily walks the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.descend_left(self.root);
        iter
    }
}

/// In-order iterator over the entries of an [`RBTree`], created by [`RBTree::iter`].
pub struct Iter<'a, K, V> {
    tree: &'a RBTree<K, V>,
    // the path of nodes whose left subtree is being (or has been) visited
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<K, V> Iter<'_, K, V> {
    fn descend_left(&mut self, mut node: Option<NodeId>) {
        while let Some(id) = node {
            self.stack.push(id);
            node = self.tree.left(id);
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.descend_left(self.tree.right(id));
        self.remaining -= 1;

        let node = self.tree.node(id);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a RBTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // this insertion order needs no rotations and gives
    //        4
    //      /   \
    //     2     6
    //    / \   / \
    //   1   3 5   7
    fn perfect() -> RBTree<i32, char> {
        let mut tree = RBTree::new();
        for (k, c) in [(4, 'd'), (2, 'b'), (6, 'f'), (1, 'a'), (3, 'c'), (5, 'e'), (7, 'g')] {
            tree.insert(k, c).unwrap();
        }
        tree
    }

    #[test]
    fn orders() {
        let tree = perfect();
        assert_eq!(tree.in_order(), [&1, &2, &3, &4, &5, &6, &7]);
        assert_eq!(tree.pre_order(), [&4, &2, &1, &3, &6, &5, &7]);
        assert_eq!(tree.post_order(), [&1, &3, &2, &5, &7, &6, &4]);
        assert_eq!(tree.level_order(), [&4, &2, &6, &1, &3, &5, &7]);
    }

    #[test]
    fn levels_group_by_depth() {
        let tree = perfect();
        assert_eq!(tree.levels(), vec![vec![&4], vec![&2, &6], vec![&1, &3, &5, &7]]);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn empty_orders() {
        let tree = RBTree::<u8, ()>::new();
        assert!(tree.in_order().is_empty());
        assert!(tree.pre_order().is_empty());
        assert!(tree.post_order().is_empty());
        assert!(tree.level_order().is_empty());
        assert!(tree.levels().is_empty());
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn iter_yields_entries() {
        let tree = perfect();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.next(), Some((&1, &'a')));
        assert_eq!(iter.len(), 6);

        let letters: String = (&tree).into_iter().map(|(_, c)| *c).collect();
        assert_eq!(letters, "abcdefg");
    }
}
