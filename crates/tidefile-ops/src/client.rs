//! The remote storage boundary.
//!
//! The core issues mutation requests by path string only; transport,
//! retries, and error surfaces belong to the implementor (an HTTP client
//! against the storage daemon in production, a mock in tests).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// A failure reported by the remote store for a single call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("remote call failed: {message}")]
pub struct RemoteError {
    /// Human-readable failure description.
    pub message: String,
}

impl RemoteError {
    /// Create a new remote error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// How shared files should be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareTarget {
    /// Write a `.sia` share file to this local destination.
    SiaFile(PathBuf),
    /// Return the share as an ASCII payload (for the clipboard).
    Ascii,
}

/// Asynchronous remote mutation calls, one per store operation.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Move a file to a new remote path.
    async fn rename(&self, old_path: &str, new_path: &str) -> Result<(), RemoteError>;

    /// Remove a file from the remote store.
    async fn delete(&self, path: &str) -> Result<(), RemoteError>;

    /// Fetch a file into a local destination.
    async fn download(&self, path: &str, destination: &Path) -> Result<(), RemoteError>;

    /// Share a batch of files. Returns the payload for
    /// [`ShareTarget::Ascii`], `None` otherwise.
    async fn share(
        &self,
        paths: &[String],
        target: &ShareTarget,
    ) -> Result<Option<String>, RemoteError>;
}
