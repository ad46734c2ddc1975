//! # `bptree-map`
//!
//! An in-memory ordered map backed by a B+Tree index.
//!
//! All key/value pairs live in leaf nodes chained together in ascending key
//! order; internal nodes (internodes) hold only routing keys. Point lookups
//! descend in `O(log n)` node visits, inserts split overflowing nodes bottom
//! up and grow the root when a split reaches it.
//!
//! | Feature | Status |
//! |---------|--------|
//! | Point lookup | Works |
//! | Ordered insert with node splits | Works (copy-up leaves, promote-up internodes) |
//! | Configurable fanout | Works (`with_order`, minimum 3) |
//! | Delete | Simplified: leaf-only, no rebalancing |
//! | Range scans | Not implemented |
//! | Custom comparators | Not implemented (`Ord` only) |
//!
//! ## Example
//!
//! ```rust
//! use bptree_map::BpTreeMap;
//!
//! let mut tree = BpTreeMap::new();
//! for k in 0u32..100 {
//!     tree.insert(k, k * k);
//! }
//!
//! assert_eq!(tree.get(&7), Some(&49));
//! assert_eq!(tree.remove(&7), Some(49));
//! assert_eq!(tree.get(&7), None);
//! assert_eq!(tree.len(), 99);
//! ```
//!
//! ## Scope
//!
//! Single-threaded by design: operations run to completion on the calling
//! thread over plain mutable state, and callers needing concurrency must
//! serialize externally. Deletion only removes entries from their leaf -
//! there is no merging, borrowing, or height shrink, which is a documented
//! limitation (see [`BpTreeMap::remove`]). Duplicate keys are stored as
//! separate entries rather than overwriting; `get` and `remove` see the
//! first equal entry of the leaf the key routes to, which after a split of
//! the equal run need not be the oldest insert (see [`BpTreeMap::insert`]).

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod arena;
pub mod error;
pub mod internode;
pub mod leaf;
pub mod order;
pub mod tree;

mod tracing_helpers;

// Re-export main types for convenience
pub use arena::{NodeArena, NodeId};
pub use error::Error;
pub use internode::Internode;
pub use leaf::Leaf;
pub use order::{Order, DEFAULT_ORDER};
pub use tree::BpTreeMap;

/// Initialize a `tracing` subscriber reading `RUST_LOG`.
///
/// No-op unless the crate is built with the `tracing` feature. Safe to call
/// more than once; later calls are ignored.
pub fn init_tracing() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::EnvFilter;

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }
}
