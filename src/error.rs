//! Error types for tree construction.

use std::fmt;

/// Errors returned by fallible constructors.
///
/// Tree operations themselves are infallible once a tree exists; only
/// configuration can be rejected.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// The requested fanout is below the supported minimum of 3.
    ///
    /// Below 3 the split arithmetic degenerates: a leaf split could leave an
    /// empty half, and an internode split would have no middle key to
    /// promote.
    InvalidOrder {
        /// The rejected fanout.
        order: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrder { order } => {
                write!(f, "invalid order {order}: fanout must be at least 3")
            }
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
//  Tests
// ============================================================================
