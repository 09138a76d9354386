use std::cmp::Ordering;
use std::fmt;

use crate::error::TreeError;

mod insert;
mod node;
mod print;
mod remove;
mod rotate;
mod traversal;
mod validate;

use node::{Node, NodeId};

pub use node::Color;
pub use traversal::Iter;
pub use validate::InvariantViolation;

/// Which in-order neighbour takes the place of a removed node that has two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Splice {
    /// The rightmost node of the left subtree.
    #[default]
    Predecessor,
    /// The leftmost node of the right subtree.
    Successor,
}

/// An ordered map backed by a red-black tree.
///
/// Nodes are kept in an arena and linked by index, so the parent back-links
/// never alias the owning child links.
///
/// Operations that take a key accept anything convertible into an `Option` of that key.
/// Passing `None` is rejected with [`TreeError::IllegalNullKey`] before the tree is touched.
///
/// ```
/// use balst::RBTree;
///
/// let mut tree: RBTree<i32, &str> = RBTree::new();
/// tree.insert(10, "ten").unwrap();
/// tree.insert(20, "twenty").unwrap();
/// tree.insert(30, "thirty").unwrap();
///
/// assert_eq!(tree.key_at_root(), Some(&20));
/// assert_eq!(tree.get(&30), Ok(&"thirty"));
/// assert_eq!(tree.in_order(), [&10, &20, &30]);
/// ```
pub struct RBTree<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
    splice: Splice,
}

impl<K, V> RBTree<K, V> {
    pub fn new() -> Self {
        Self::with_splice(Splice::default())
    }

    /// Creates an empty tree that resolves two-child removals with the given neighbour.
    pub fn with_splice(splice: Splice) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            splice,
        }
    }

    pub fn splice(&self) -> Splice {
        self.splice
    }

    /// The amount of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Same as [`len`](Self::len).
    pub fn num_keys(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    pub fn key_at_root(&self) -> Option<&K> {
        self.root.map(|root| self.key(root))
    }

    /// The smallest key, if any.
    pub fn first_key(&self) -> Option<&K> {
        self.root.map(|root| self.key(self.extreme(root, node::Side::Left)))
    }

    /// The largest key, if any.
    pub fn last_key(&self) -> Option<&K> {
        self.root.map(|root| self.key(self.extreme(root, node::Side::Right)))
    }
}

impl<K: Ord, V> RBTree<K, V> {
    /// Descends from the root comparing against `key`.
    ///
    /// Complexity: O(height)
    fn find(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            current = match key.cmp(self.key(id)) {
                Ordering::Equal => return Some(id),
                Ordering::Less => self.left(id),
                Ordering::Greater => self.right(id),
            };
        }
        None
    }

    /// Resolves a possibly-absent key to the node holding it.
    fn find_present<'k>(&self, key: impl Into<Option<&'k K>>) -> Result<NodeId, TreeError>
    where
        K: 'k,
    {
        let key = key.into().ok_or(TreeError::IllegalNullKey)?;
        self.find(key).ok_or(TreeError::KeyNotFound)
    }

    pub fn contains<'k>(&self, key: impl Into<Option<&'k K>>) -> Result<bool, TreeError>
    where
        K: 'k,
    {
        let key = key.into().ok_or(TreeError::IllegalNullKey)?;
        Ok(self.find(key).is_some())
    }

    pub fn get<'k>(&self, key: impl Into<Option<&'k K>>) -> Result<&V, TreeError>
    where
        K: 'k,
    {
        let id = self.find_present(key)?;
        Ok(&self.node(id).value)
    }

    /// The color currently assigned to the node holding `key`.
    pub fn color_of<'k>(&self, key: impl Into<Option<&'k K>>) -> Result<Color, TreeError>
    where
        K: 'k,
    {
        let id = self.find_present(key)?;
        Ok(self.color(id))
    }

    /// The key of the left child of the node holding `key`, or `None` if it has none.
    pub fn key_of_left_child_of<'k>(&self, key: impl Into<Option<&'k K>>) -> Result<Option<&K>, TreeError>
    where
        K: 'k,
    {
        let id = self.find_present(key)?;
        Ok(self.left(id).map(|left| self.key(left)))
    }

    /// The key of the right child of the node holding `key`, or `None` if it has none.
    pub fn key_of_right_child_of<'k>(&self, key: impl Into<Option<&'k K>>) -> Result<Option<&K>, TreeError>
    where
        K: 'k,
    {
        let id = self.find_present(key)?;
        Ok(self.right(id).map(|right| self.key(right)))
    }
}

impl<K, V> Default for RBTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RBTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Once;

    use proptest::prelude::*;

    use super::*;

    pub(super) fn initialize_logging() {
        use simplelog::*;
        use std::fs::File;

        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![
                TermLogger::new(LevelFilter::Warn, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
            ];
            if let Ok(file) = File::create("rbtree_tests.log") {
                loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
            }
            // another test harness may already own the global logger
            let _ = CombinedLogger::init(loggers);
        });
    }

    fn tree_of(keys: &[i32]) -> RBTree<i32, i32> {
        let mut tree: RBTree<i32, i32> = RBTree::new();
        for &k in keys {
            tree.insert(k, k * 10).unwrap();
        }
        tree
    }

    #[test]
    fn empty_tree() {
        let tree = RBTree::<i32, ()>::new();
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.key_at_root(), None);
        assert_eq!(tree.num_keys(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.first_key(), None);
        assert_eq!(tree.last_key(), None);
        assert_eq!(tree.contains(&1), Ok(false));
        assert_eq!(tree.get(&1), Err(TreeError::KeyNotFound));
        assert_eq!(tree.check_invariants(), Ok(0));
    }

    #[test]
    fn insert_then_get() {
        initialize_logging();
        let mut tree: RBTree<&str, i32> = RBTree::new();
        tree.insert("b", 2).unwrap();
        tree.insert("a", 1).unwrap();

        assert_eq!(tree.get(&"a"), Ok(&1));
        assert_eq!(tree.get(&"b"), Ok(&2));
        assert_eq!(tree.contains(&"a"), Ok(true));
        assert_eq!(tree.contains(&"c"), Ok(false));
        assert_eq!(tree.get(&"c"), Err(TreeError::KeyNotFound));
    }

    #[test]
    fn absent_keys_are_rejected() {
        let mut tree = tree_of(&[1, 2, 3]);
        let none: Option<&i32> = None;

        assert_eq!(tree.insert(None::<i32>, 0), Err(TreeError::IllegalNullKey));
        assert_eq!(tree.get(none), Err(TreeError::IllegalNullKey));
        assert_eq!(tree.contains(none), Err(TreeError::IllegalNullKey));
        assert_eq!(tree.remove(none), Err(TreeError::IllegalNullKey));
        assert_eq!(tree.key_of_left_child_of(none), Err(TreeError::IllegalNullKey));
        assert_eq!(tree.key_of_right_child_of(none), Err(TreeError::IllegalNullKey));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn child_keys() {
        let tree = tree_of(&[10, 20, 30]);

        assert_eq!(tree.key_of_left_child_of(&20), Ok(Some(&10)));
        assert_eq!(tree.key_of_right_child_of(&20), Ok(Some(&30)));
        assert_eq!(tree.key_of_left_child_of(&10), Ok(None));
        assert_eq!(tree.key_of_right_child_of(&30), Ok(None));
        assert_eq!(tree.key_of_left_child_of(&15), Err(TreeError::KeyNotFound));
        assert_eq!(tree.key_of_right_child_of(&15), Err(TreeError::KeyNotFound));
    }

    #[test]
    fn extremes() {
        let tree = tree_of(&[7, 3, 9, 1, 12, 5]);
        assert_eq!(tree.first_key(), Some(&1));
        assert_eq!(tree.last_key(), Some(&12));
    }

    #[test]
    fn clear_resets_everything() {
        let mut tree = tree_of(&[1, 2, 3, 4]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.key_at_root(), None);
        tree.insert(8, 80).unwrap();
        assert_eq!(tree.key_at_root(), Some(&8));
    }

    #[test]
    fn debug_lists_entries_in_order() {
        let tree = tree_of(&[2, 1, 3]);
        assert_eq!(format!("{tree:?}"), "{1: 10, 2: 20, 3: 30}");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u16),
        Remove(u16),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..200u16).prop_map(Op::Insert),
            (0..200u16).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn matches_btreemap(ops in proptest::collection::vec(op(), 0..400), successor in any::<bool>()) {
            initialize_logging();
            let splice = if successor { Splice::Successor } else { Splice::Predecessor };
            let mut tree: RBTree<u16, u32> = RBTree::with_splice(splice);
            let mut model = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(k) => {
                        let expected = if model.contains_key(&k) {
                            Err(TreeError::DuplicateKey)
                        } else {
                            model.insert(k, u32::from(k) * 3);
                            Ok(())
                        };
                        prop_assert_eq!(tree.insert(k, u32::from(k) * 3), expected);
                    }
                    Op::Remove(k) => {
                        let expected = match model.remove(&k) {
                            Some(_) => Ok(true),
                            None => Err(TreeError::KeyNotFound),
                        };
                        prop_assert_eq!(tree.remove(&k), expected);
                    }
                }
                prop_assert_eq!(tree.check_invariants().map(|_| ()), Ok(()));
                prop_assert_eq!(tree.len(), model.len());
            }

            let keys: Vec<&u16> = model.keys().collect();
            prop_assert_eq!(tree.in_order(), keys);
            for (k, v) in &model {
                prop_assert_eq!(tree.get(k), Ok(v));
            }
        }

        #[test]
        fn height_stays_logarithmic(keys in proptest::collection::hash_set(any::<i64>(), 1..1000)) {
            let mut tree: RBTree<i64, ()> = RBTree::new();
            for &k in &keys {
                tree.insert(k, ()).unwrap();
            }
            let bound = 2.0 * ((keys.len() + 1) as f64).log2();
            prop_assert!(tree.height() as f64 <= bound);
        }
    }
}
