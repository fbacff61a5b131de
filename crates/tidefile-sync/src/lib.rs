//! Remote listing reconciliation for tidefile.
//!
//! This crate turns periodically-refreshed flat listings of remote file
//! records into mutations of the [`tidefile_core::PathTree`] while
//! preserving node identity across refreshes.
//!
//! # Example
//!
//! ```rust
//! use tidefile_core::PathTree;
//! use tidefile_sync::{Reconciler, RemoteFile};
//!
//! let mut tree = PathTree::new();
//! let reconciler = Reconciler::default();
//!
//! let snapshot = vec![RemoteFile::new("movies/night.mkv", 2048)];
//! let report = reconciler.apply(&mut tree, &snapshot);
//!
//! assert!(report.is_clean());
//! assert!(tree.resolve("movies/night.mkv").is_some());
//! ```

mod config;
mod feed;
mod listing;
mod reconcile;

pub use config::{SyncConfig, SyncConfigBuilder};
pub use feed::SnapshotFeed;
pub use listing::{Listing, RemoteFile};
pub use reconcile::{ReconcileIssue, ReconcileReport, Reconciler};

// Re-export core types for convenience
pub use tidefile_core::{FileMeta, NodeId, PathTree, TreeError};
