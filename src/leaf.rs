//! Leaf node: the data level of the tree.
//!
//! Leaves hold the actual key/value pairs in two parallel, sorted vectors and
//! a same-level `next` link forming a singly linked chain across all leaves
//! in ascending key order. The chain is a non-owning auxiliary relation on
//! top of the ownership tree; it exists for sequential scans and is never
//! used to free a node.
//!
//! Capacity is `order` slots, one more than the nominal `order - 1` maximum,
//! so an overflowing insert can be written before the split that resolves it.
//!
//! # Split (copy-up)
//!
//! A leaf in overflow holds `order` keys. [`Leaf::split`] moves the top
//! `ceil(order/2)` entries into a fresh right sibling, splices the sibling
//! into the chain position after this leaf, and returns a *clone* of the
//! sibling's first key as the divider for the parent. The divider stays in
//! the sibling: both leaves must remain complete, independently scannable
//! data nodes, so the leaf level gives up no key.

use crate::arena::NodeId;
use crate::order::Order;

/// A leaf node holding up to `order - 1` key/value pairs (transiently
/// `order` while an overflow is being resolved).
#[derive(Debug)]
pub struct Leaf<K, V> {
    /// Active keys, ascending. Duplicate inserts produce adjacent equals.
    keys: Vec<K>,
    /// Values, parallel to `keys`.
    values: Vec<V>,
    /// Next leaf in key order, if any. Non-owning.
    next: Option<NodeId>,
}

impl<K: Ord, V> Leaf<K, V> {
    /// Create an empty leaf sized for `order`, with one overflow slot.
    #[must_use]
    pub fn new(order: Order) -> Self {
        Self {
            keys: Vec::with_capacity(order.get()),
            values: Vec::with_capacity(order.get()),
            next: None,
        }
    }

    /// Number of active keys.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the leaf holds no keys.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key at slot `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[must_use]
    #[inline]
    pub fn key(&self, i: usize) -> &K {
        &self.keys[i]
    }

    /// The value at slot `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[must_use]
    #[inline]
    pub fn value(&self, i: usize) -> &V {
        &self.values[i]
    }

    /// All active keys, ascending.
    #[must_use]
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Next leaf in the chain.
    #[must_use]
    #[inline]
    pub const fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Replace the chain link.
    #[inline]
    pub fn set_next(&mut self, next: Option<NodeId>) {
        self.next = next;
    }

    /// First slot `i` with `key < keys[i]`, or `len()` if none.
    ///
    /// Equal keys compare "not less", so an insert of an existing key lands
    /// *after* the equal run, and routing sends equal keys to the right
    /// subtree (the smallest-right rule).
    #[must_use]
    pub fn insert_position(&self, key: &K) -> usize {
        self.keys.partition_point(|probe| probe <= key)
    }

    /// Slot of the first key equal to `key`, or `None`.
    #[must_use]
    pub fn find_eq(&self, key: &K) -> Option<usize> {
        let i = self.keys.partition_point(|probe| probe < key);
        (i < self.keys.len() && self.keys[i] == *key).then_some(i)
    }

    /// Insert `key`/`value` at the position given by [`Leaf::insert_position`],
    /// shifting later slots right.
    ///
    /// May push the leaf one past nominal capacity; the caller must check
    /// [`Order::overflowing`] afterwards and split.
    pub fn insert(&mut self, key: K, value: V) {
        let ip = self.insert_position(&key);
        self.keys.insert(ip, key);
        self.values.insert(ip, value);
    }

    /// Remove the entry at slot `i`, shifting later slots left, and return
    /// its value.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn remove_at(&mut self, i: usize) -> V {
        self.keys.remove(i);
        self.values.remove(i)
    }

    /// Split this overflowing leaf, returning the divider key and the new
    /// right sibling.
    ///
    /// The sibling receives the top `ceil(order/2)` entries and this leaf's
    /// old `next` link; this leaf keeps the bottom `floor(order/2)` entries.
    /// The caller must allocate the sibling and point `self.next` at it to
    /// complete the chain splice. The divider is a clone of the sibling's
    /// first key (copy-up).
    pub fn split(&mut self, order: Order) -> (K, Self)
    where
        K: Clone,
    {
        debug_assert!(
            order.overflowing(self.keys.len()),
            "split: leaf is not in overflow ({} keys, order {})",
            self.keys.len(),
            order.get()
        );

        let at = order.leaf_left();
        let mut right = Self::new(order);
        right.keys.extend(self.keys.drain(at..));
        right.values.extend(self.values.drain(at..));
        right.next = self.next.take();

        let divider = right.keys[0].clone();
        (divider, right)
    }

    /// Verify leaf invariants (debug builds only).
    ///
    /// # Panics
    ///
    /// Panics if keys and values disagree in length or keys are out of order.
    #[cfg(debug_assertions)]
    pub fn debug_assert_invariants(&self) {
        assert_eq!(
            self.keys.len(),
            self.values.len(),
            "leaf keys/values length mismatch"
        );

        // Non-strict: duplicate inserts legitimately produce adjacent equals.
        for i in 1..self.keys.len() {
            assert!(
                self.keys[i - 1] <= self.keys[i],
                "leaf keys out of order at slot {i}"
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
