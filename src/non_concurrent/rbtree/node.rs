use log::debug;

use super::RBTree;

/// Index of a node inside the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Which child slot of a parent a node hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    Left,
    Right,
}

impl Side {
    pub(super) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

// PROVE: any node with height `h` has black height at least `h/2`
// PROVE: the subtree located at any node `x` contains at least `2^bh(x) - 1` nodes (use induction)
// LEMMA: An RBTree with `n` internal nodes has height at most `2*log₂(n+1)`

#[derive(Debug)]
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) color: Color,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
    // not an owning link, only walked upward during fixup
    pub(super) parent: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    /// Fresh nodes are always red leaves.
    fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }

    pub(super) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

// Arena bookkeeping and link accessors.
//
// Every accessor takes a `NodeId` handed out by `alloc` that has not been passed to `free` yet.
// Indexing a vacant slot is a bug in the tree itself, so these panic rather than return `Option`.
impl<K, V> RBTree<K, V> {
    pub(super) fn alloc(&mut self, key: K, value: V, parent: Option<NodeId>) -> NodeId {
        let node = Node::new(key, value, parent);
        match self.free.pop() {
            Some(id) => {
                debug!("Reusing vacant slot {}", id.0);
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Vacates the slot of an already unlinked node, handing back its entry.
    pub(super) fn free(&mut self, id: NodeId) -> Option<(K, V)> {
        let node = self.nodes.get_mut(id.0)?.take()?;
        self.free.push(id);
        Some((node.key, node.value))
    }

    pub(super) fn node(&self, id: NodeId) -> &Node<K, V> {
        match &self.nodes[id.0] {
            Some(node) => node,
            None => panic!("dangling node id {}", id.0),
        }
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match &mut self.nodes[id.0] {
            Some(node) => node,
            None => panic!("dangling node id {}", id.0),
        }
    }

    pub(super) fn key(&self, id: NodeId) -> &K {
        &self.node(id).key
    }

    pub(super) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub(super) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    pub(super) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    pub(super) fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.node(id).child(side)
    }

    /// Sets `id`'s child on `side` and points that child's parent link back at `id`.
    pub(super) fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.node_mut(id).left = child,
            Side::Right => self.node_mut(id).right = child,
        }
        if let Some(c) = child {
            self.node_mut(c).parent = Some(id);
        }
    }

    /// The slot `id` occupies in its parent, or `None` for the root.
    pub(super) fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.parent(id)?;
        if self.left(parent) == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    pub(super) fn color(&self, id: NodeId) -> Color {
        self.node(id).color
    }

    pub(super) fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    /// Absent children count as black.
    pub(super) fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.color(id) == Color::Red)
    }

    pub(super) fn is_black(&self, id: Option<NodeId>) -> bool {
        !self.is_red(id)
    }

    /// Follows `side` links from `id` as far as they go.
    pub(super) fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(next) = self.child(id, side) {
            id = next;
        }
        id
    }
}
