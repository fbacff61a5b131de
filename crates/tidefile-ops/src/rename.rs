//! Rename operation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use tidefile_core::path;

use crate::client::RemoteClient;
use crate::progress::{OperationComplete, OperationError, OperationProgress, OperationType};
use crate::OPERATION_CHANNEL_SIZE;

/// Result sent through the channel during rename operations.
#[derive(Debug)]
pub enum RenameResult {
    /// Progress update.
    Progress(OperationProgress),
    /// The operation completed.
    Complete(OperationComplete),
}

/// Start an async rename of a single remote file.
///
/// The new remote path keeps the old directory and swaps the final
/// segment. An invalid name is rejected before any remote call is issued,
/// leaving the store untouched.
pub fn start_rename(
    client: Arc<dyn RemoteClient>,
    old_path: String,
    new_name: String,
) -> mpsc::Receiver<RenameResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        rename_impl(client, old_path, new_name, tx).await;
    });

    rx
}

async fn rename_impl(
    client: Arc<dyn RemoteClient>,
    old_path: String,
    new_name: String,
    tx: mpsc::Sender<RenameResult>,
) {
    let mut progress = OperationProgress::new(OperationType::Rename, 1);
    progress.set_current(Some(old_path.clone()));
    let _ = tx.send(RenameResult::Progress(progress.clone())).await;

    if let Err(e) = path::validate_name(&new_name) {
        progress.add_error(OperationError::new(old_path, e.to_string()));
        let _ = tx
            .send(RenameResult::Complete(OperationComplete::from_progress(
                progress,
            )))
            .await;
        return;
    }

    let new_path = path::join(path::directory(&old_path), &new_name);

    match client.rename(&old_path, &new_path).await {
        Ok(()) => progress.complete_item(),
        Err(e) => {
            warn!(path = %old_path, error = %e, "rename failed");
            progress.add_error(OperationError::new(old_path, e.message));
        }
    }

    let _ = tx
        .send(RenameResult::Complete(OperationComplete::from_progress(
            progress,
        )))
        .await;
}
