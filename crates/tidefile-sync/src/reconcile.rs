//! Snapshot-to-tree reconciliation.
//!
//! One pass brings a [`PathTree`] into agreement with a full remote
//! listing: missing files and intermediate folders are created, existing
//! files are refreshed in place so held ids stay valid, and nodes whose
//! paths vanished from the snapshot are pruned bottom-up. A bad record is
//! reported and skipped; it never aborts the rest of the pass.

use std::collections::HashSet;

use tracing::{debug, warn};

use tidefile_core::{NodeId, PathTree, TreeError, path};

use crate::config::SyncConfig;
use crate::listing::RemoteFile;

/// Applies full remote snapshots to a path tree.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: SyncConfig,
}

/// Outcome counters and skipped records for one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Records whose file node was newly created.
    pub created: usize,
    /// Files whose metadata was refreshed in place.
    pub updated: usize,
    /// Nodes pruned after the snapshot was applied.
    pub removed: usize,
    /// Records that were skipped, with the reason.
    pub issues: Vec<ReconcileIssue>,
}

impl ReconcileReport {
    /// Check if every record in the snapshot was applied.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// A skipped record and why it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileIssue {
    /// Path string of the offending record.
    pub path: String,
    /// The error that caused the skip.
    pub error: TreeError,
}

enum Applied {
    Created,
    Updated,
}

impl Reconciler {
    /// Create a reconciler with the given configuration.
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Apply one full snapshot to the tree.
    ///
    /// Idempotent: applying the same snapshot twice yields an identical
    /// tree with identical node ids. Applying a newer snapshot after a
    /// stale one converges to the same tree as applying the newer one
    /// alone.
    pub fn apply(&self, tree: &mut PathTree, files: &[RemoteFile]) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let mut present: HashSet<&str> = HashSet::with_capacity(files.len());

        for record in files {
            match self.apply_record(tree, record) {
                Ok(applied) => {
                    present.insert(record.path.as_str());
                    match applied {
                        Applied::Created => report.created += 1,
                        Applied::Updated => report.updated += 1,
                    }
                }
                Err(error) => {
                    warn!(path = %record.path, %error, "skipping remote record");
                    report.issues.push(ReconcileIssue {
                        path: record.path.clone(),
                        error,
                    });
                }
            }
        }

        report.removed = self.prune_folder(tree, tree.root(), &present);

        debug!(
            created = report.created,
            updated = report.updated,
            removed = report.removed,
            skipped = report.issues.len(),
            "reconciliation pass complete"
        );
        report
    }

    /// Walk one record into the tree, creating intermediate folders.
    fn apply_record(&self, tree: &mut PathTree, record: &RemoteFile) -> Result<Applied, TreeError> {
        let segments = path::parse(&record.path)?;
        let (name, folders) = match segments.split_last() {
            Some(split) => split,
            None => return Err(TreeError::malformed("empty path")),
        };

        let mut cursor = tree.root();
        for segment in folders {
            cursor = match tree.child_of(cursor, segment) {
                Some(child) => {
                    let node = tree.get(child).ok_or(TreeError::NotFound)?;
                    if node.is_file() {
                        // A file sits where the record needs a folder.
                        return Err(TreeError::path_conflict(node.path.clone()));
                    }
                    child
                }
                None => tree.add_folder(cursor, segment)?,
            };
        }

        match tree.child_of(cursor, name) {
            Some(existing) => {
                let node = tree.get(existing).ok_or(TreeError::NotFound)?;
                if node.is_folder() {
                    // The record claims a file; never overwrite the folder.
                    return Err(TreeError::path_conflict(node.path.clone()));
                }
                tree.update_meta(existing, record.meta())?;
                Ok(Applied::Updated)
            }
            None => {
                tree.add_file(cursor, name, record.meta())?;
                Ok(Applied::Created)
            }
        }
    }

    /// Prune stale descendants of `folder` bottom-up.
    ///
    /// Files absent from the snapshot are removed. A folder is removed
    /// only once this pass emptied it (listings enumerate files, never
    /// folders, so the absence of a folder record means nothing). Folders
    /// that were already empty before the pass are kept unless
    /// `prune_idle_folders` opts in.
    fn prune_folder(
        &self,
        tree: &mut PathTree,
        folder: NodeId,
        present: &HashSet<&str>,
    ) -> usize {
        let mut removed = 0;
        let children: Vec<NodeId> = tree.children_sorted(folder);

        for child in children {
            let Some(node) = tree.get(child) else {
                continue;
            };
            if node.is_file() {
                if !present.contains(node.path.as_str()) && tree.remove(child).is_ok() {
                    removed += 1;
                }
                continue;
            }

            let removed_below = self.prune_folder(tree, child, present);
            removed += removed_below;

            let now_empty = tree.get(child).is_some_and(|n| n.is_empty_folder());
            let emptied_this_pass = removed_below > 0 && now_empty;
            if now_empty
                && (emptied_this_pass || self.config.prune_idle_folders)
                && tree.remove(child).is_ok()
            {
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidefile_core::NodeKind;

    fn record(path: &str, size: u64) -> RemoteFile {
        RemoteFile::new(path, size)
    }

    fn apply(tree: &mut PathTree, files: &[RemoteFile]) -> ReconcileReport {
        Reconciler::default().apply(tree, files)
    }

    #[test]
    fn test_creates_intermediate_folders() {
        let mut tree = PathTree::new();
        let report = apply(&mut tree, &[record("a/b/c.txt", 1)]);

        assert_eq!(report.created, 1);
        assert!(report.is_clean());
        assert!(tree.get(tree.resolve("a").unwrap()).unwrap().is_folder());
        assert!(tree.get(tree.resolve("a/b").unwrap()).unwrap().is_folder());
        assert!(tree.resolve("a/b/c.txt").is_some());
    }

    #[test]
    fn test_idempotent_same_snapshot_twice() {
        let snapshot = [record("a/b/c.txt", 1), record("a/d.txt", 2)];
        let mut tree = PathTree::new();
        apply(&mut tree, &snapshot);

        let ids_before: Vec<NodeId> = tree.flatten(tree.root()).collect();
        let report = apply(&mut tree, &snapshot);
        let ids_after: Vec<NodeId> = tree.flatten(tree.root()).collect();

        assert_eq!(ids_before, ids_after);
        assert_eq!(report.created, 0);
        assert_eq!(report.updated, 2);
        assert_eq!(report.removed, 0);
    }

    #[test]
    fn test_identity_preserved_across_refresh() {
        let mut tree = PathTree::new();
        let mut uploading = record("up.bin", 512);
        uploading.upload_progress = Some(40);
        apply(&mut tree, &[uploading.clone()]);

        let held = tree.resolve("up.bin").unwrap();
        uploading.upload_progress = Some(75);
        apply(&mut tree, &[uploading]);

        // The held id observes the refreshed value.
        let meta = tree.get(held).unwrap().meta().unwrap();
        assert_eq!(meta.upload_progress, Some(75));
    }

    #[test]
    fn test_prunes_stale_files_and_emptied_folders() {
        let mut tree = PathTree::new();
        apply(&mut tree, &[record("a/b/c.txt", 1), record("a/d.txt", 2)]);

        let report = apply(&mut tree, &[record("a/d.txt", 2)]);

        // c.txt goes, the emptied folder a/b cascades away, a stays.
        assert_eq!(report.removed, 2);
        assert!(tree.resolve("a/b").is_none());
        assert!(tree.resolve("a/d.txt").is_some());
        assert!(tree.resolve("a").is_some());
    }

    #[test]
    fn test_already_empty_folder_survives() {
        let mut tree = PathTree::new();
        let local = tree.add_folder(tree.root(), "drafts").unwrap();

        apply(&mut tree, &[record("a/d.txt", 2)]);
        assert!(tree.contains(local));

        // Opting in prunes it.
        let pruning = Reconciler::new(
            SyncConfig::builder().prune_idle_folders(true).build().unwrap(),
        );
        pruning.apply(&mut tree, &[record("a/d.txt", 2)]);
        assert!(!tree.contains(local));
    }

    #[test]
    fn test_folder_record_conflict_leaves_folder_untouched() {
        let mut tree = PathTree::new();
        apply(&mut tree, &[record("x/y.txt", 1)]);
        let folder = tree.resolve("x").unwrap();

        // A record claiming `x` is a file is rejected.
        let report = apply(&mut tree, &[record("x", 9), record("x/y.txt", 1)]);
        assert_eq!(report.issues.len(), 1);
        assert!(matches!(
            report.issues[0].error,
            TreeError::PathConflict { .. }
        ));
        assert_eq!(tree.resolve("x"), Some(folder));
        assert!(matches!(
            tree.get(folder).unwrap().kind,
            NodeKind::Folder { .. }
        ));
        assert!(tree.resolve("x/y.txt").is_some());
    }

    #[test]
    fn test_file_mid_path_conflict() {
        let mut tree = PathTree::new();
        apply(&mut tree, &[record("x", 1)]);

        let report = apply(&mut tree, &[record("x", 1), record("x/y.txt", 2)]);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].path, "x/y.txt");
        assert!(tree.get(tree.resolve("x").unwrap()).unwrap().is_file());
    }

    #[test]
    fn test_malformed_record_skipped_not_fatal() {
        let mut tree = PathTree::new();
        let report = apply(
            &mut tree,
            &[record("", 0), record("a//b", 1), record("ok.txt", 2)],
        );

        assert_eq!(report.issues.len(), 2);
        assert!(matches!(
            report.issues[0].error,
            TreeError::MalformedRecord { .. }
        ));
        assert!(tree.resolve("ok.txt").is_some());
    }

    #[test]
    fn test_stale_snapshot_superseded_by_newer() {
        let older = [record("a/b.txt", 1), record("c.txt", 2)];
        let newer = [record("c.txt", 3), record("d.txt", 4)];

        let mut via_both = PathTree::new();
        apply(&mut via_both, &older);
        apply(&mut via_both, &newer);

        let mut via_newer = PathTree::new();
        apply(&mut via_newer, &newer);

        let paths = |tree: &PathTree| {
            let mut v: Vec<String> = tree
                .flatten(tree.root())
                .filter_map(|id| tree.get(id).map(|n| n.path.to_string()))
                .collect();
            v.sort();
            v
        };
        assert_eq!(paths(&via_both), paths(&via_newer));
    }
}
