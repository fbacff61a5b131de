//! Bulk download operation.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::client::RemoteClient;
use crate::progress::{OperationComplete, OperationError, OperationProgress, OperationType};
use crate::OPERATION_CHANNEL_SIZE;

/// One remote file and where to put it locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadItem {
    /// Remote path to fetch.
    pub path: String,
    /// Local destination for the file.
    pub destination: PathBuf,
}

impl DownloadItem {
    /// Create a new download item.
    pub fn new(path: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            destination: destination.into(),
        }
    }
}

/// Result sent through the channel during download operations.
#[derive(Debug)]
pub enum DownloadResult {
    /// Progress update.
    Progress(OperationProgress),
    /// The operation completed.
    Complete(OperationComplete),
}

/// Start an async bulk download.
///
/// Items download one after another; a failed item is reported and the
/// rest continue.
pub fn start_download(
    client: Arc<dyn RemoteClient>,
    items: Vec<DownloadItem>,
) -> mpsc::Receiver<DownloadResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        download_impl(client, items, tx).await;
    });

    rx
}

async fn download_impl(
    client: Arc<dyn RemoteClient>,
    items: Vec<DownloadItem>,
    tx: mpsc::Sender<DownloadResult>,
) {
    let mut progress = OperationProgress::new(OperationType::Download, items.len());

    for item in &items {
        progress.set_current(Some(item.path.clone()));
        let _ = tx.send(DownloadResult::Progress(progress.clone())).await;

        match client.download(&item.path, &item.destination).await {
            Ok(()) => progress.complete_item(),
            Err(e) => {
                warn!(path = %item.path, error = %e, "download failed");
                progress.add_error(OperationError::new(item.path.clone(), e.message));
            }
        }
    }

    let _ = tx
        .send(DownloadResult::Complete(OperationComplete::from_progress(
            progress,
        )))
        .await;
}
