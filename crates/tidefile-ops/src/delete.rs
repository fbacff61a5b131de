//! Bulk delete operation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::client::RemoteClient;
use crate::progress::{OperationComplete, OperationError, OperationProgress, OperationType};
use crate::OPERATION_CHANNEL_SIZE;

/// Result sent through the channel during delete operations.
#[derive(Debug)]
pub enum DeleteResult {
    /// Progress update.
    Progress(OperationProgress),
    /// The operation completed.
    Complete(OperationComplete),
}

/// Start an async bulk delete.
///
/// `paths` is a value-copy snapshot taken before the operation starts, so
/// reconciliation mutating the tree mid-flight cannot invalidate it.
/// Deletion proceeds per item; partial completion is expected and is
/// reported item by item.
pub fn start_delete(
    client: Arc<dyn RemoteClient>,
    paths: Vec<String>,
) -> mpsc::Receiver<DeleteResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        delete_impl(client, paths, tx).await;
    });

    rx
}

async fn delete_impl(
    client: Arc<dyn RemoteClient>,
    paths: Vec<String>,
    tx: mpsc::Sender<DeleteResult>,
) {
    let mut progress = OperationProgress::new(OperationType::Delete, paths.len());

    for path in &paths {
        progress.set_current(Some(path.clone()));
        let _ = tx.send(DeleteResult::Progress(progress.clone())).await;

        match client.delete(path).await {
            Ok(()) => progress.complete_item(),
            Err(e) => {
                warn!(%path, error = %e, "delete failed");
                progress.add_error(OperationError::new(path.clone(), e.message));
            }
        }
    }

    let _ = tx
        .send(DeleteResult::Complete(OperationComplete::from_progress(
            progress,
        )))
        .await;
}
