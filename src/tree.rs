//! Filepath: src/tree.rs
//! `BpTreeMap` - an in-memory ordered map over a B+Tree index.
//!
//! All key/value pairs live at the leaf level; internodes route. Insertion
//! descends recursively to a leaf, writes the entry, and resolves any
//! overflow by splitting on the way back up: each level either absorbs the
//! child's reported split or splits itself and reports further. A split that
//! escapes the root grows the tree by exactly one level.
//!
//! # Delete is simplified
//!
//! [`BpTreeMap::remove`] only takes the entry out of its leaf. There is no
//! merging, borrowing, divider fix-up, or height shrink, so deletes can leave
//! under-full (even empty) leaves, and deleting the smallest key of a subtree
//! leaves a routing key that no longer equals its subtree minimum. Routing
//! stays correct for lookups; the smallest-right property is simply no longer
//! exact. This mirrors the intended scope and is a documented limitation, not
//! an oversight.
//!
//! # Duplicate keys
//!
//! Inserting a key equal to an existing one stores a second, independent
//! entry after the equal run rather than overwriting. `get` and `remove`
//! operate on the first equal entry *in the leaf the key routes to*. While
//! an equal run sits inside one leaf that is the oldest insert, but a split
//! can divide the run: equal keys route right, so duplicates stranded left
//! of an equal divider are served last or, once the routed leaf's equals are
//! drained, not found by point lookup at all. [`BpTreeMap::len`] counts
//! every insert, so it tracks entries, not distinct keys.

use std::cell::Cell;
use std::fmt as StdFmt;
use std::fmt::Write as _;

use crate::arena::{NodeArena, NodeId};
use crate::error::Error;
use crate::internode::Internode;
use crate::leaf::Leaf;
use crate::order::Order;
use crate::tracing_helpers::debug_log;

/// Result of a recursive insert at one level.
///
/// `Split` reports the new right sibling and the divider key the parent must
/// absorb; for a leaf split the divider is a copy of the sibling's first key,
/// for an internode split it is the promoted middle key.
enum SplitOutcome<K> {
    /// The subtree absorbed the insert without splitting.
    Done,
    /// The node split; the caller owns placing `divider`/`right` one level up.
    Split {
        /// Routing key separating the original node from `right`.
        divider: K,
        /// Handle of the newly allocated right sibling.
        right: NodeId,
    },
}

/// An in-memory ordered map backed by a B+Tree.
///
/// Keys need `Ord` for routing and `Clone` for the copy-up divider written on
/// leaf splits. Single-threaded: callers needing concurrent access must
/// serialize externally.
///
/// # Example
///
/// ```
/// use bptree_map::BpTreeMap;
///
/// let mut tree = BpTreeMap::new();
/// tree.insert(2u32, "two");
/// tree.insert(1, "one");
///
/// assert_eq!(tree.get(&1), Some(&"one"));
/// assert_eq!(tree.remove(&2), Some("two"));
/// assert_eq!(tree.get(&2), None);
/// assert_eq!(tree.len(), 1);
/// ```
pub struct BpTreeMap<K, V> {
    /// Owner of every node.
    arena: NodeArena<K, V>,
    /// Current root. Reassigned only when a split escapes the old root.
    root: NodeId,
    /// Leftmost leaf; head of the leaf chain, fixed for the tree's lifetime.
    first_leaf: NodeId,
    /// Configured fanout.
    order: Order,
    /// Running entry counter: +1 per insert (duplicates included), -1 per
    /// successful remove. Not a recount of leaf contents.
    len: usize,
    /// Nodes visited by lookup descents since the last reset. Diagnostic.
    accesses: Cell<usize>,
}

impl<K: Ord, V> BpTreeMap<K, V> {
    /// Create an empty tree with the default order.
    #[must_use]
    pub fn new() -> Self {
        Self::from_order(Order::default())
    }

    /// Create an empty tree with an explicit order (fanout).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOrder`] if `order < 3`; the split arithmetic
    /// is undefined below that.
    pub fn with_order(order: usize) -> Result<Self, Error> {
        Order::new(order).map(Self::from_order)
    }

    fn from_order(order: Order) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc_leaf(Leaf::new(order));
        Self {
            arena,
            root,
            first_leaf: root,
            order,
            len: 0,
            accesses: Cell::new(0),
        }
    }

    /// The configured fanout.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order.get()
    }

    /// Number of stored entries.
    ///
    /// This is the maintained insert/remove counter, so duplicate-key inserts
    /// each count.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nodes visited by `get`/`remove` descents since the last
    /// [`BpTreeMap::reset_accesses`]. Useful for average-path-length
    /// measurements.
    #[must_use]
    pub fn accesses(&self) -> usize {
        self.accesses.get()
    }

    /// Zero the access counter.
    pub fn reset_accesses(&self) {
        self.accesses.set(0);
    }

    // ========================================================================
    //  Insert
    // ========================================================================

    /// Insert a key/value entry.
    ///
    /// A key equal to an existing one is stored as an additional entry (see
    /// the module docs); `len` grows by one either way.
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Clone,
    {
        self.len += 1;
        match self.insert_rec(self.root, key, value) {
            SplitOutcome::Done => {}
            SplitOutcome::Split { divider, right } => {
                // The split escaped the old root: grow by one level. The
                // root slot is the only place that changes identity.
                let new_root = Internode::new_root(self.order, self.root, divider, right);
                self.root = self.arena.alloc_internode(new_root);
                debug_log!(
                    "root split: height grew, {} nodes total",
                    self.arena.total_count()
                );
            }
        }
    }

    /// Descend to the leaf for `key`, insert, and resolve overflow by
    /// splitting on the way back up.
    fn insert_rec(&mut self, node: NodeId, key: K, value: V) -> SplitOutcome<K>
    where
        K: Clone,
    {
        if node.is_leaf() {
            let leaf = self.arena.leaf_mut(node);
            leaf.insert(key, value);
            if !self.order.overflowing(leaf.len()) {
                return SplitOutcome::Done;
            }

            let (divider, right) = self.arena.leaf_mut(node).split(self.order);
            let right_id = self.arena.alloc_leaf(right);
            // Finish the chain splice: sibling already took over our old
            // next link inside split().
            self.arena.leaf_mut(node).set_next(Some(right_id));
            debug_log!("leaf split: sibling {right_id:?}");
            return SplitOutcome::Split {
                divider,
                right: right_id,
            };
        }

        let child = {
            let internode = self.arena.internode(node);
            internode.child(internode.route(&key))
        };
        match self.insert_rec(child, key, value) {
            SplitOutcome::Done => SplitOutcome::Done,
            SplitOutcome::Split { divider, right } => {
                let internode = self.arena.internode_mut(node);
                internode.insert_key_and_child(divider, right);
                if !self.order.overflowing(internode.len()) {
                    return SplitOutcome::Done;
                }

                let (promoted, sibling) = self.arena.internode_mut(node).split(self.order);
                let right_id = self.arena.alloc_internode(sibling);
                debug_log!("internode split: sibling {right_id:?}");
                SplitOutcome::Split {
                    divider: promoted,
                    right: right_id,
                }
            }
        }
    }

    // ========================================================================
    //  Lookup
    // ========================================================================

    /// Point lookup. Returns the value of the first equal entry in the leaf
    /// `key` routes to; with duplicates split across leaves this need not be
    /// the oldest insert (see the module docs).
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let leaf = self.arena.leaf(self.find_leaf(key));
        leaf.find_eq(key).map(|slot| leaf.value(slot))
    }

    /// Whether at least one entry equals `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Descend from the root to the leaf responsible for `key`, counting
    /// every node visited.
    fn find_leaf(&self, key: &K) -> NodeId {
        let mut node = self.root;
        loop {
            self.accesses.set(self.accesses.get() + 1);
            if node.is_leaf() {
                return node;
            }
            let internode = self.arena.internode(node);
            node = internode.child(internode.route(key));
        }
    }

    // ========================================================================
    //  Delete (simplified)
    // ========================================================================

    /// Remove the first equal entry in the leaf `key` routes to and return
    /// its value.
    ///
    /// Leaf-only removal: no rebalancing of any kind runs (see the module
    /// docs). Returns `None` without touching the tree if the routed leaf
    /// holds no equal entry.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.find_leaf(key);
        let leaf = self.arena.leaf_mut(node);
        let slot = leaf.find_eq(key)?;
        let value = leaf.remove_at(slot);
        self.len -= 1;
        Some(value)
    }

    // ========================================================================
    //  Diagnostics
    // ========================================================================

    /// Pre-order pretty-print of the tree, one node per line, indented by
    /// depth.
    #[must_use]
    pub fn render(&self) -> String
    where
        K: StdFmt::Debug,
    {
        let mut out = String::new();
        self.render_node(self.root, 0, &mut out);
        out
    }

    fn render_node(&self, node: NodeId, depth: usize, out: &mut String)
    where
        K: StdFmt::Debug,
    {
        let indent = "  ".repeat(depth);
        if node.is_leaf() {
            let leaf = self.arena.leaf(node);
            let _ = writeln!(out, "{indent}leaf {:?}", leaf.keys());
        } else {
            let internode = self.arena.internode(node);
            let _ = writeln!(out, "{indent}internode {:?}", internode.keys());
            for &child in internode.children() {
                self.render_node(child, depth + 1, out);
            }
        }
    }

    /// Walk the whole structure and panic on any violated invariant.
    ///
    /// Checks, for every node: key count within bounds and keys in
    /// non-strict ascending order (duplicates sit adjacent in leaves, and
    /// splitting a duplicate run can copy equal dividers into internodes).
    /// Checks, for the tree: all leaves at one depth, the leaf chain starting
    /// at the first leaf and visiting exactly the in-order leaves with keys
    /// ascending across the whole chain, and the entry counter matching the
    /// stored entry count.
    ///
    /// Divider/smallest-right exactness is deliberately *not* checked: the
    /// simplified delete is allowed to leave stale dividers.
    ///
    /// O(n); intended for tests and debugging.
    ///
    /// # Panics
    ///
    /// Panics with a description of the first violated invariant.
    pub fn assert_invariants(&self) {
        let mut inorder = Vec::new();
        let mut depths = Vec::new();
        self.check_node(self.root, 0, &mut inorder, &mut depths);

        let first_depth = depths[0];
        assert!(
            depths.iter().all(|&d| d == first_depth),
            "leaves at differing depths"
        );

        let mut chain = Vec::new();
        let mut cursor = Some(self.first_leaf);
        while let Some(id) = cursor {
            chain.push(id);
            cursor = self.arena.leaf(id).next();
        }
        assert_eq!(chain, inorder, "leaf chain does not match in-order leaves");

        let mut entries = 0;
        let mut prev: Option<&K> = None;
        for &id in &chain {
            let leaf = self.arena.leaf(id);
            entries += leaf.len();
            for i in 0..leaf.len() {
                let key = leaf.key(i);
                if let Some(p) = prev {
                    assert!(p <= key, "keys not ascending across the leaf chain");
                }
                prev = Some(key);
            }
        }
        assert_eq!(entries, self.len, "entry counter out of sync");
    }

    fn check_node(
        &self,
        node: NodeId,
        depth: usize,
        inorder: &mut Vec<NodeId>,
        depths: &mut Vec<usize>,
    ) {
        if node.is_leaf() {
            let leaf = self.arena.leaf(node);
            assert!(
                leaf.len() <= self.order.max_keys(),
                "leaf over capacity after operation"
            );
            for i in 1..leaf.len() {
                assert!(leaf.key(i - 1) <= leaf.key(i), "leaf keys out of order");
            }
            inorder.push(node);
            depths.push(depth);
            return;
        }

        let internode = self.arena.internode(node);
        assert!(!internode.is_empty(), "internode with no routing keys");
        assert!(
            internode.len() <= self.order.max_keys(),
            "internode over capacity after operation"
        );
        assert_eq!(
            internode.children().len(),
            internode.len() + 1,
            "internode child count mismatch"
        );
        // Non-strict: splitting a run of duplicate leaf keys copies the same
        // divider up more than once, so equal routing keys are legitimate.
        for i in 1..internode.len() {
            assert!(
                internode.key(i - 1) <= internode.key(i),
                "internode keys out of order"
            );
        }
        for &child in internode.children() {
            self.check_node(child, depth + 1, inorder, depths);
        }
    }
}

impl<K: Ord, V> Default for BpTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> StdFmt::Debug for BpTreeMap<K, V> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("BpTreeMap")
            .field("order", &self.order.get())
            .field("len", &self.len)
            .field("leaves", &self.arena.leaf_count())
            .field("internodes", &self.arena.internode_count())
            .finish_non_exhaustive()
    }
}

// ============================================================================
//  Tests
// ============================================================================
