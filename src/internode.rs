//! Internode (internal node): the routing levels of the tree.
//!
//! Internodes contain only routing keys and child handles, no values. With
//! `n` keys there are `n + 1` children:
//!
//! ```text
//!         [K0 | K1 | K2]           <- internode (3 keys, 4 children)
//!        /    |    |    \
//!    C0     C1    C2     C3        <- children
//!
//!    C0: keys < K0
//!    C1: keys >= K0 and < K1
//!    C2: keys >= K1 and < K2
//!    C3: keys >= K2
//! ```
//!
//! Each routing key equals the smallest key of its right subtree as long as
//! only inserts (and the non-rebalancing delete) have run.
//!
//! # Split (promote-up)
//!
//! An internode in overflow holds `order` keys and `order + 1` children.
//! [`Internode::split`] keeps the bottom `floor((order-1)/2)` keys, moves the
//! top `ceil((order-1)/2)` keys with their children into a fresh right
//! sibling, and *removes* the middle key entirely, returning it as the
//! divider for the parent. Unlike the leaf rule the key leaves this level:
//! routing keys carry no data, and keeping a copy would create a child slot
//! with nothing to point at.

use crate::arena::NodeId;
use crate::order::Order;

/// An internal routing node.
#[derive(Debug)]
pub struct Internode<K> {
    /// Routing keys, ascending.
    keys: Vec<K>,
    /// Child handles; `children[i]` routes keys below `keys[i]`, the last
    /// child routes everything at or above the last key.
    children: Vec<NodeId>,
}

impl<K: Ord> Internode<K> {
    /// Create an empty internode sized for `order`, with one overflow slot.
    #[must_use]
    pub fn new(order: Order) -> Self {
        Self {
            keys: Vec::with_capacity(order.get()),
            children: Vec::with_capacity(order.get() + 1),
        }
    }

    /// Create a one-key root: `left` below `divider`, `right` at or above.
    ///
    /// This is the only shape a brand-new root ever takes; it is how the tree
    /// grows in height.
    #[must_use]
    pub fn new_root(order: Order, left: NodeId, divider: K, right: NodeId) -> Self {
        let mut root = Self::new(order);
        root.keys.push(divider);
        root.children.push(left);
        root.children.push(right);
        root
    }

    /// Number of routing keys.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the internode holds no keys.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The routing key at slot `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[must_use]
    #[inline]
    pub fn key(&self, i: usize) -> &K {
        &self.keys[i]
    }

    /// All routing keys, ascending.
    #[must_use]
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The child handle at slot `i` (valid for `0..=len()`).
    ///
    /// # Panics
    ///
    /// Panics if `i > len()`.
    #[must_use]
    #[inline]
    pub fn child(&self, i: usize) -> NodeId {
        self.children[i]
    }

    /// Child handles, one more than there are keys.
    #[must_use]
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Index of the child to descend into for `key`.
    ///
    /// First slot `i` with `key < keys[i]`, or `len()` if none; a key equal
    /// to a routing key goes right, per the smallest-right rule.
    #[must_use]
    pub fn route(&self, key: &K) -> usize {
        self.keys.partition_point(|probe| probe <= key)
    }

    /// Absorb a child split: insert `key` at its routing position `p` and
    /// `right_child` at `p + 1`, shifting later slots right.
    ///
    /// `right_child` is the child split's new sibling; the existing child at
    /// `p` stays as the left side of the new divider.
    ///
    /// May push the internode one past nominal capacity; the caller must
    /// check [`Order::overflowing`] afterwards and split.
    pub fn insert_key_and_child(&mut self, key: K, right_child: NodeId) {
        debug_assert!(
            !self.children.is_empty(),
            "insert_key_and_child: internode has no left child"
        );

        let p = self.route(&key);
        self.keys.insert(p, key);
        self.children.insert(p + 1, right_child);
    }

    /// Split this overflowing internode, returning the promoted divider key
    /// and the new right sibling.
    ///
    /// This node keeps the bottom `floor((order-1)/2)` keys with their
    /// children; the sibling takes the top `ceil((order-1)/2)` keys with
    /// theirs; the middle key is removed from both and returned (promote-up).
    pub fn split(&mut self, order: Order) -> (K, Self) {
        debug_assert!(
            order.overflowing(self.keys.len()),
            "split: internode is not in overflow ({} keys, order {})",
            self.keys.len(),
            order.get()
        );

        let left = order.internode_left();
        let mut right = Self::new(order);
        right.keys.extend(self.keys.drain(left + 1..));
        right.children.extend(self.children.drain(left + 1..));
        let promoted = self.keys.remove(left);

        debug_assert_eq!(right.keys.len(), order.internode_right());
        debug_assert_eq!(right.children.len(), right.keys.len() + 1);
        debug_assert_eq!(self.children.len(), self.keys.len() + 1);

        (promoted, right)
    }

    /// Verify internode invariants (debug builds only).
    ///
    /// Key ordering is non-strict: a run of equal leaf keys split more than
    /// once copies the same divider up repeatedly, so equal routing keys are
    /// legitimate.
    ///
    /// # Panics
    ///
    /// Panics if the child count does not exceed the key count by one or
    /// keys are out of order.
    #[cfg(debug_assertions)]
    pub fn debug_assert_invariants(&self) {
        assert_eq!(
            self.children.len(),
            self.keys.len() + 1,
            "internode child/key count mismatch"
        );

        for i in 1..self.keys.len() {
            assert!(
                self.keys[i - 1] <= self.keys[i],
                "internode keys out of order at slot {i}"
            );
        }
    }

    /// No-op in release builds.
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn debug_assert_invariants(&self) {}
}

// ============================================================================
//  Tests
// ============================================================================
