//! Arena storage for tree nodes.
//!
//! Nodes are stored in two `Vec` arenas, one per node kind, and addressed by
//! [`NodeId`] handles. A handle is a tagged index, so the arena can hand back
//! the correctly typed node without the caller reasoning about which kind
//! sits behind an untyped pointer.
//!
//! Arena lifetime matches the tree lifetime: insert never destroys a node and
//! the simplified delete only shrinks key counts, so nothing is ever removed
//! from an arena. Everything is freed together when the tree drops. Handles
//! are plain `Copy` indices, which is what makes the leaf chain safe: the
//! chain stores next-links alongside the owning parent/child relation without
//! any shared-ownership bookkeeping.

use crate::internode::Internode;
use crate::leaf::Leaf;

/// Handle to a node in a [`NodeArena`].
///
/// The variant records the node kind; the payload is the index into the
/// corresponding arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeId {
    /// A leaf node holding keys and values.
    Leaf(usize),
    /// An internode holding routing keys and child handles.
    Internode(usize),
}

impl NodeId {
    /// Whether this handle refers to a leaf.
    #[must_use]
    #[inline]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

/// Owner of every node in one tree.
#[derive(Debug)]
pub struct NodeArena<K, V> {
    leaves: Vec<Leaf<K, V>>,
    internodes: Vec<Internode<K>>,
}

impl<K, V> NodeArena<K, V> {
    /// Create an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            leaves: Vec::new(),
            internodes: Vec::new(),
        }
    }

    /// Store a leaf and return its handle.
    pub fn alloc_leaf(&mut self, leaf: Leaf<K, V>) -> NodeId {
        self.leaves.push(leaf);
        NodeId::Leaf(self.leaves.len() - 1)
    }

    /// Store an internode and return its handle.
    pub fn alloc_internode(&mut self, internode: Internode<K>) -> NodeId {
        self.internodes.push(internode);
        NodeId::Internode(self.internodes.len() - 1)
    }

    /// Borrow the leaf behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a leaf handle from this arena.
    #[must_use]
    pub fn leaf(&self, id: NodeId) -> &Leaf<K, V> {
        match id {
            NodeId::Leaf(idx) => &self.leaves[idx],
            NodeId::Internode(_) => panic!("leaf: {id:?} is not a leaf handle"),
        }
    }

    /// Mutably borrow the leaf behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a leaf handle from this arena.
    pub fn leaf_mut(&mut self, id: NodeId) -> &mut Leaf<K, V> {
        match id {
            NodeId::Leaf(idx) => &mut self.leaves[idx],
            NodeId::Internode(_) => panic!("leaf_mut: {id:?} is not a leaf handle"),
        }
    }

    /// Borrow the internode behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not an internode handle from this arena.
    #[must_use]
    pub fn internode(&self, id: NodeId) -> &Internode<K> {
        match id {
            NodeId::Internode(idx) => &self.internodes[idx],
            NodeId::Leaf(_) => panic!("internode: {id:?} is not an internode handle"),
        }
    }

    /// Mutably borrow the internode behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not an internode handle from this arena.
    pub fn internode_mut(&mut self, id: NodeId) -> &mut Internode<K> {
        match id {
            NodeId::Internode(idx) => &mut self.internodes[idx],
            NodeId::Leaf(_) => panic!("internode_mut: {id:?} is not an internode handle"),
        }
    }

    /// Number of leaves allocated so far.
    #[must_use]
    pub const fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of internodes allocated so far.
    #[must_use]
    pub const fn internode_count(&self) -> usize {
        self.internodes.len()
    }

    /// Total number of nodes allocated so far.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.leaves.len() + self.internodes.len()
    }
}

impl<K, V> Default for NodeArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
//  Tests
// ============================================================================
