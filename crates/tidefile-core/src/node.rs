//! File and folder node types.

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::path;

/// Unique identifier for a node within a tree.
///
/// Ids are arena keys and stay stable for a node's whole lifetime, so a
/// held id keeps observing in-place metadata updates across refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Stable display identifier derived from a canonical path.
///
/// Rendering collaborators use the hex form to correlate tree nodes with
/// on-screen elements across refreshes. Equal paths always hash equal;
/// distinct paths never collide in practice (BLAKE3 of the path string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayId([u8; 32]);

impl DisplayId {
    /// Derive the identifier for a canonical path.
    pub fn for_path(path: &str) -> Self {
        Self(*blake3::hash(path.as_bytes()).as_bytes())
    }

    /// Get the identifier as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Per-file metadata from the most recent remote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// File size in bytes.
    pub size: u64,
    /// Whether the file is retrievable from the remote store.
    pub available: bool,
    /// Upload progress 0..=100, or `None` when not applicable.
    pub upload_progress: Option<u8>,
    /// Block height at which the storage contract expires.
    pub expiration_height: u64,
    /// Whether the contract is being renewed automatically.
    pub renewing: bool,
}

impl FileMeta {
    /// Whether the upload has finished (or never applied).
    pub fn is_uploaded(&self) -> bool {
        match self.upload_progress {
            Some(p) => p >= 100,
            None => true,
        }
    }
}

/// Kind of tree node.
///
/// A closed tagged union: every call site that branches on node type
/// matches exhaustively, so adding a kind forces a compile-time audit.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A remote file with its latest metadata.
    File(FileMeta),
    /// A folder owning its children through a name-keyed map.
    ///
    /// Files and folders share the one map, so a name denotes exactly one
    /// child of exactly one kind at a time.
    Folder {
        children: IndexMap<CompactString, NodeId>,
    },
}

impl NodeKind {
    /// Create an empty folder kind.
    pub fn empty_folder() -> Self {
        Self::Folder {
            children: IndexMap::new(),
        }
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File(_))
    }

    /// Check if this is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, NodeKind::Folder { .. })
    }
}

/// A single file or folder in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Arena identifier.
    pub id: NodeId,

    /// Final path segment (empty only for the root).
    pub name: CompactString,

    /// Full canonical path from the root (root path is empty).
    pub path: CompactString,

    /// Non-owning back-reference to the parent folder; `None` only for the
    /// root. Ownership flows strictly downward through child maps.
    pub(crate) parent: Option<NodeId>,

    /// Node kind and associated data.
    pub kind: NodeKind,
}

impl Node {
    pub(crate) fn new_folder(
        id: NodeId,
        name: impl Into<CompactString>,
        path: impl Into<CompactString>,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            parent,
            kind: NodeKind::empty_folder(),
        }
    }

    pub(crate) fn new_file(
        id: NodeId,
        name: impl Into<CompactString>,
        path: impl Into<CompactString>,
        parent: NodeId,
        meta: FileMeta,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            parent: Some(parent),
            kind: NodeKind::File(meta),
        }
    }

    /// Parent folder id, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Check if this node is the root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// File metadata, `None` for folders.
    pub fn meta(&self) -> Option<&FileMeta> {
        match &self.kind {
            NodeKind::File(meta) => Some(meta),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Child id by name, `None` for files or missing names.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Folder { children } => children.get(name).copied(),
            NodeKind::File(_) => None,
        }
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        match &self.kind {
            NodeKind::Folder { children } => children.len(),
            NodeKind::File(_) => 0,
        }
    }

    /// Check if this is a folder with no children.
    pub fn is_empty_folder(&self) -> bool {
        matches!(&self.kind, NodeKind::Folder { children } if children.is_empty())
    }

    /// Ancestor count; the root has depth zero.
    pub fn depth(&self) -> usize {
        path::split(&self.path).count()
    }

    /// Path minus the final segment.
    pub fn directory(&self) -> &str {
        path::directory(&self.path)
    }

    /// File extension without the dot, if any.
    pub fn extension(&self) -> Option<&str> {
        path::extension(&self.path)
    }

    /// Stable display identifier for the current path.
    pub fn display_id(&self) -> DisplayId {
        DisplayId::for_path(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> FileMeta {
        FileMeta {
            size: 1024,
            available: true,
            upload_progress: Some(100),
            expiration_height: 40_000,
            renewing: true,
        }
    }

    #[test]
    fn test_display_id_stability() {
        let a = DisplayId::for_path("movies/night.mkv");
        let b = DisplayId::for_path("movies/night.mkv");
        let c = DisplayId::for_path("movies/day.mkv");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_hex().len(), 64);
    }

    #[test]
    fn test_node_kind_discrimination() {
        assert!(NodeKind::File(meta()).is_file());
        assert!(!NodeKind::File(meta()).is_folder());
        assert!(NodeKind::empty_folder().is_folder());
    }

    #[test]
    fn test_file_meta_uploaded() {
        let mut m = meta();
        assert!(m.is_uploaded());
        m.upload_progress = Some(40);
        assert!(!m.is_uploaded());
        m.upload_progress = None;
        assert!(m.is_uploaded());
    }

    #[test]
    fn test_node_derived_properties() {
        let node = Node::new_file(
            NodeId::new(7),
            "night.mkv",
            "movies/2024/night.mkv",
            NodeId::new(3),
            meta(),
        );

        assert_eq!(node.depth(), 3);
        assert_eq!(node.directory(), "movies/2024");
        assert_eq!(node.extension(), Some("mkv"));
        assert!(!node.is_root());
    }
}
