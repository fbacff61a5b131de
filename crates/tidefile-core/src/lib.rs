//! Core types for tidefile.
//!
//! This crate provides the path tree that backs the browsing view over a
//! remote file store: file/folder nodes, canonical path helpers, and the
//! stable display identifier used to correlate nodes with rendered
//! elements across refreshes.

mod error;
mod node;
pub mod path;
mod tree;

pub use error::TreeError;
pub use node::{DisplayId, FileMeta, Node, NodeId, NodeKind};
pub use tree::{Flatten, PathTree};
