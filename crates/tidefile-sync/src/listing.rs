//! Remote listing records.

use serde::{Deserialize, Serialize};

use tidefile_core::FileMeta;

/// One file record from a full remote listing.
///
/// Listings enumerate files only; folders exist solely as path prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    /// Slash-delimited path within the remote store.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// Whether the file is currently retrievable.
    pub available: bool,
    /// Upload progress 0..=100, absent once no upload is in flight.
    #[serde(default)]
    pub upload_progress: Option<u8>,
    /// Block height at which the storage contract expires.
    pub expiration_height: u64,
    /// Whether the contract renews automatically.
    pub renewing: bool,
}

impl RemoteFile {
    /// Convenience constructor for an available, fully-uploaded file.
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            available: true,
            upload_progress: None,
            expiration_height: 0,
            renewing: false,
        }
    }

    /// Extract the node metadata carried by this record.
    pub fn meta(&self) -> FileMeta {
        FileMeta {
            size: self.size,
            available: self.available,
            upload_progress: self.upload_progress,
            expiration_height: self.expiration_height,
            renewing: self.renewing,
        }
    }
}

/// A sequence-numbered full snapshot of the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Monotonic snapshot sequence; higher supersedes lower.
    pub sequence: u64,
    /// All file records in the snapshot.
    pub files: Vec<RemoteFile>,
}
