//! Latest-wins snapshot delivery.
//!
//! Polling and on-demand refreshes both publish full listings here. The
//! feed keeps only the newest snapshot: a consumer that was still applying
//! an older one simply observes the newer snapshot on its next read, and
//! because reconciliation applies full snapshots idempotently, skipping a
//! stale one converges to the same tree.

use tokio::sync::watch;

use crate::listing::{Listing, RemoteFile};

/// Publisher side of the snapshot channel.
#[derive(Debug)]
pub struct SnapshotFeed {
    tx: watch::Sender<Listing>,
}

impl SnapshotFeed {
    /// Create a feed primed with an empty sequence-zero listing.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Listing::default());
        Self { tx }
    }

    /// Publish a full snapshot, superseding any unconsumed one.
    ///
    /// Returns the sequence number assigned to the snapshot.
    pub fn publish(&self, files: Vec<RemoteFile>) -> u64 {
        let mut sequence = 0;
        self.tx.send_modify(|listing| {
            listing.sequence += 1;
            listing.files = files;
            sequence = listing.sequence;
        });
        sequence
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<Listing> {
        self.tx.subscribe()
    }
}

impl Default for SnapshotFeed {
    fn default() -> Self {
        Self::new()
    }
}
