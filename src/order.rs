//! Fanout configuration and split arithmetic.
//!
//! The order `p` of the tree is the maximum number of children an internode
//! may reference; every node holds at most `p - 1` keys once an operation has
//! completed. Nodes are sized one slot larger so an overflowing insert can be
//! written in place and immediately resolved by a split.
//!
//! The two node kinds split differently:
//!
//! - A **leaf** in overflow holds `p` keys and divides them
//!   `floor(p/2) / ceil(p/2)` between itself and a new right sibling. The
//!   divider key handed to the parent is *copied*: it stays in the sibling,
//!   because leaf keys carry data that must remain discoverable.
//! - An **internode** in overflow also holds `p` keys, but only `p - 1` of
//!   them survive at this level: the middle key is *promoted* (removed from
//!   both halves) and the rest divide `floor((p-1)/2) / ceil((p-1)/2)`.
//!   Routing keys carry no data, so nothing is lost.
//!
//! For odd `p` the extra key lands in the right sibling at both levels, but
//! the boundary index differs between the two rules. Worked shapes for the
//! parity cases:
//!
//! ```text
//! order 4, leaf overflow [k0 k1 k2 k3]:       [k0 k1] | [k2 k3]     copy up k2
//! order 5, leaf overflow [k0 k1 k2 k3 k4]:    [k0 k1] | [k2 k3 k4]  copy up k2
//! order 4, internode overflow [k0 k1 k2 k3]:  [k0]    | [k2 k3]     promote k1
//! order 5, internode overflow [k0..k4]:       [k0 k1] | [k3 k4]     promote k2
//! ```

use crate::error::Error;

/// Fanout used by [`crate::BpTreeMap::new`].
pub const DEFAULT_ORDER: usize = 16;

/// A validated tree fanout.
///
/// Construction rejects orders below [`Order::MIN`]: the split arithmetic
/// assumes at least one key on each side of a leaf split and at least one
/// promotable key for internode splits, neither of which holds below 3.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Order(usize);

impl Order {
    /// Smallest fanout with well-defined split arithmetic.
    pub const MIN: usize = 3;

    /// Validate and wrap a fanout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOrder`] if `order < 3`.
    pub const fn new(order: usize) -> Result<Self, Error> {
        if order < Self::MIN {
            Err(Error::InvalidOrder { order })
        } else {
            Ok(Self(order))
        }
    }

    /// The raw fanout `p`.
    #[must_use]
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Maximum number of keys a node may hold after an operation completes.
    #[must_use]
    #[inline]
    pub const fn max_keys(self) -> usize {
        self.0 - 1
    }

    /// Whether a node holding `nkeys` keys is one past capacity and must
    /// split before the current operation returns.
    #[must_use]
    #[inline]
    pub const fn overflowing(self, nkeys: usize) -> bool {
        nkeys >= self.0
    }

    /// Keys left in the original leaf after a leaf split: `floor(p/2)`.
    #[must_use]
    #[inline]
    pub const fn leaf_left(self) -> usize {
        self.0 / 2
    }

    /// Keys moved to the new right leaf: `ceil(p/2)`.
    #[must_use]
    #[inline]
    pub const fn leaf_right(self) -> usize {
        self.0.div_ceil(2)
    }

    /// Keys left in the original internode after an internode split:
    /// `floor((p-1)/2)`.
    #[must_use]
    #[inline]
    pub const fn internode_left(self) -> usize {
        (self.0 - 1) / 2
    }

    /// Keys moved to the new right internode: `ceil((p-1)/2)`.
    #[must_use]
    #[inline]
    pub const fn internode_right(self) -> usize {
        (self.0 - 1).div_ceil(2)
    }
}

impl Default for Order {
    fn default() -> Self {
        Self(DEFAULT_ORDER)
    }
}

// ============================================================================
//  Tests
// ============================================================================
