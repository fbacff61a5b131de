//! Share operation (.sia file or ASCII payload).

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::client::{RemoteClient, ShareTarget};
use crate::progress::{OperationComplete, OperationError, OperationProgress, OperationType};
use crate::OPERATION_CHANNEL_SIZE;

/// Result sent through the channel during share operations.
#[derive(Debug)]
pub enum ShareResult {
    /// Progress update.
    Progress(OperationProgress),
    /// The operation completed; `ascii` carries the payload when the
    /// target was [`ShareTarget::Ascii`].
    Complete {
        summary: OperationComplete,
        ascii: Option<String>,
    },
}

/// Start an async share of a batch of remote paths.
///
/// `paths` should come from a value-copy subtree snapshot so folder
/// shares include files several levels deep. A `.sia` destination that
/// does not end in `.sia` is rejected before any remote call.
pub fn start_share(
    client: Arc<dyn RemoteClient>,
    paths: Vec<String>,
    target: ShareTarget,
) -> mpsc::Receiver<ShareResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        share_impl(client, paths, target, tx).await;
    });

    rx
}

async fn share_impl(
    client: Arc<dyn RemoteClient>,
    paths: Vec<String>,
    target: ShareTarget,
    tx: mpsc::Sender<ShareResult>,
) {
    let mut progress = OperationProgress::new(OperationType::Share, paths.len());
    let _ = tx.send(ShareResult::Progress(progress.clone())).await;

    if let ShareTarget::SiaFile(destination) = &target
        && destination.extension().and_then(|e| e.to_str()) != Some("sia")
    {
        for path in &paths {
            progress.add_error(OperationError::new(
                path.clone(),
                "share destination must end in .sia",
            ));
        }
        let _ = tx
            .send(ShareResult::Complete {
                summary: OperationComplete::from_progress(progress),
                ascii: None,
            })
            .await;
        return;
    }

    // The store shares the whole batch in one call.
    match client.share(&paths, &target).await {
        Ok(ascii) => {
            for _ in &paths {
                progress.complete_item();
            }
            let _ = tx
                .send(ShareResult::Complete {
                    summary: OperationComplete::from_progress(progress),
                    ascii,
                })
                .await;
        }
        Err(e) => {
            warn!(error = %e, "share failed");
            for path in &paths {
                progress.add_error(OperationError::new(path.clone(), e.message.clone()));
            }
            let _ = tx
                .send(ShareResult::Complete {
                    summary: OperationComplete::from_progress(progress),
                    ascii: None,
                })
                .await;
        }
    }
}
