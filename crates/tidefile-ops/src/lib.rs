//! Remote operations engine for tidefile.
//!
//! This crate issues the mutation requests a browsing session makes
//! against the remote store (rename, delete, download, share) as spawned
//! async tasks reporting per-item progress via channels. Bulk operations
//! over a folder are not atomic: each item succeeds or fails on its own
//! and is reported as such.

mod client;
mod delete;
mod download;
mod progress;
mod rename;
mod share;

pub use client::{RemoteClient, RemoteError, ShareTarget};
pub use delete::{start_delete, DeleteResult};
pub use download::{start_download, DownloadItem, DownloadResult};
pub use progress::{OperationComplete, OperationError, OperationProgress, OperationType};
pub use rename::{start_rename, RenameResult};
pub use share::{start_share, ShareResult};

/// Default channel buffer size for operation progress updates.
pub const OPERATION_CHANNEL_SIZE: usize = 100;
