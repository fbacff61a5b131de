//! Error types for tree operations.

use thiserror::Error;

/// Errors raised by tree mutations and reconciliation.
///
/// All variants are local and non-fatal: callers report them and continue
/// with the remaining work. Operations check their preconditions before
/// touching the tree, so a rejected operation leaves no partial mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A sibling name is empty, contains a slash, or already taken.
    #[error("invalid name: {name:?}")]
    InvalidName { name: String },

    /// A path segment is typed inconsistently between an existing node and
    /// an incoming record (file where a folder is needed, or vice versa).
    #[error("path conflict at {path:?}")]
    PathConflict { path: String },

    /// The operation targets a node that is no longer in the tree.
    #[error("node is no longer in the tree")]
    NotFound,

    /// A remote record could not be interpreted.
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },
}

impl TreeError {
    /// Create an invalid name error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Create a path conflict error.
    pub fn path_conflict(path: impl Into<String>) -> Self {
        Self::PathConflict { path: path.into() }
    }

    /// Create a malformed record error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }
}
