//! Mutable path tree over arena-allocated nodes.
//!
//! The tree owns every node through a single arena; folders own their
//! children exclusively through name-keyed maps, and parent links are
//! non-owning arena indices. All structural operations check their
//! preconditions before mutating, so a rejected operation leaves the tree
//! untouched.

use std::collections::HashMap;

use compact_str::CompactString;

use crate::error::TreeError;
use crate::node::{FileMeta, Node, NodeId, NodeKind};
use crate::path;

/// Hierarchical view over a flat remote file listing.
#[derive(Debug, Clone)]
pub struct PathTree {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
}

impl PathTree {
    /// Create a tree holding only the root folder (path `""`).
    pub fn new() -> Self {
        let root = NodeId::new(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new_folder(root, "", "", None));
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    /// Root folder id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Check if a node is still in the tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Total number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Direct child of a folder by name.
    pub fn child_of(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes.get(&parent)?.child(name)
    }

    /// Create and link an empty folder under `parent`.
    pub fn add_folder(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        let parent_path = self.check_slot(parent, name)?;
        let id = self.alloc_id();
        let full = path::join(&parent_path, name);
        self.nodes
            .insert(id, Node::new_folder(id, name, full, Some(parent)));
        self.link(parent, name, id);
        Ok(id)
    }

    /// Create and link a file under `parent`, populated from `meta`.
    pub fn add_file(
        &mut self,
        parent: NodeId,
        name: &str,
        meta: FileMeta,
    ) -> Result<NodeId, TreeError> {
        let parent_path = self.check_slot(parent, name)?;
        let id = self.alloc_id();
        let full = path::join(&parent_path, name);
        self.nodes
            .insert(id, Node::new_file(id, name, full, parent, meta));
        self.link(parent, name, id);
        Ok(id)
    }

    /// Validate that `name` is a free slot under a folder `parent`.
    fn check_slot(&self, parent: NodeId, name: &str) -> Result<CompactString, TreeError> {
        path::validate_name(name)?;
        let parent_node = self.nodes.get(&parent).ok_or(TreeError::NotFound)?;
        match &parent_node.kind {
            NodeKind::Folder { children } => {
                if children.contains_key(name) {
                    return Err(TreeError::invalid_name(name));
                }
                Ok(parent_node.path.clone())
            }
            NodeKind::File(_) => Err(TreeError::path_conflict(parent_node.path.clone())),
        }
    }

    fn link(&mut self, parent: NodeId, name: &str, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&parent)
            && let NodeKind::Folder { children } = &mut node.kind
        {
            children.insert(CompactString::from(name), child);
        }
    }

    /// Replace a file's metadata in place, preserving its identity.
    pub fn update_meta(&mut self, id: NodeId, meta: FileMeta) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(&id).ok_or(TreeError::NotFound)?;
        match &mut node.kind {
            NodeKind::File(existing) => {
                *existing = meta;
                Ok(())
            }
            NodeKind::Folder { .. } => Err(TreeError::path_conflict(node.path.clone())),
        }
    }

    /// Unlink a node from its parent and destroy its whole subtree.
    ///
    /// Removing the root or an already-unlinked node fails with `NotFound`.
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        let (parent, name) = {
            let node = self.nodes.get(&id).ok_or(TreeError::NotFound)?;
            let parent = node.parent.ok_or(TreeError::NotFound)?;
            (parent, node.name.clone())
        };

        let unlinked = match self.nodes.get_mut(&parent).map(|n| &mut n.kind) {
            Some(NodeKind::Folder { children }) => children.shift_remove(name.as_str()).is_some(),
            _ => false,
        };
        if !unlinked {
            return Err(TreeError::NotFound);
        }

        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.remove(&cur)
                && let NodeKind::Folder { children } = node.kind
            {
                stack.extend(children.into_values());
            }
        }
        Ok(())
    }

    /// Rename a node, rewriting paths through its whole subtree.
    ///
    /// Fails with `InvalidName` on an empty/colliding name and `NotFound`
    /// for the root; preconditions are checked before any mutation.
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), TreeError> {
        path::validate_name(new_name)?;
        let (parent, old_name) = {
            let node = self.nodes.get(&id).ok_or(TreeError::NotFound)?;
            let parent = node.parent.ok_or(TreeError::NotFound)?;
            (parent, node.name.clone())
        };
        if old_name == new_name {
            return Ok(());
        }
        if self.child_of(parent, new_name).is_some() {
            return Err(TreeError::invalid_name(new_name));
        }

        if let Some(node) = self.nodes.get_mut(&parent)
            && let NodeKind::Folder { children } = &mut node.kind
        {
            children.shift_remove(old_name.as_str());
            children.insert(CompactString::from(new_name), id);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.name = CompactString::from(new_name);
        }
        self.repath(id);
        Ok(())
    }

    /// Recompute `path` for a node and all of its descendants.
    fn repath(&mut self, start: NodeId) {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let parent_path = self
                .nodes
                .get(&id)
                .and_then(|n| n.parent)
                .and_then(|p| self.nodes.get(&p))
                .map(|p| p.path.clone());
            if let Some(node) = self.nodes.get_mut(&id) {
                if let Some(parent_path) = parent_path {
                    node.path = path::join(&parent_path, &node.name);
                }
                if let NodeKind::Folder { children } = &node.kind {
                    stack.extend(children.values().copied());
                }
            }
        }
    }

    /// Walk a canonical path from the root.
    ///
    /// Returns `None` on a missing segment, or when a file shows up
    /// mid-path where a folder is needed.
    pub fn resolve(&self, path: &str) -> Option<NodeId> {
        let mut cur = self.root;
        for segment in path::split(path) {
            cur = self.nodes.get(&cur)?.child(segment)?;
        }
        Some(cur)
    }

    /// Ancestor chain from the root down to the node's parent.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cur = self.nodes.get(&id).and_then(|n| n.parent);
        while let Some(p) = cur {
            chain.push(p);
            cur = self.nodes.get(&p).and_then(|n| n.parent);
        }
        chain.reverse();
        chain
    }

    /// Lazy pre-order walk over all descendants of a node.
    ///
    /// Folders and files interleave in child-map order. The iterator holds
    /// only ids, so it can be restarted by calling `flatten` again.
    pub fn flatten(&self, id: NodeId) -> Flatten<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.nodes.get(&id)
            && let NodeKind::Folder { children } = &node.kind
        {
            stack.extend(children.values().rev().copied());
        }
        Flatten { tree: self, stack }
    }

    /// Direct children in display order: folders first, then lexicographic
    /// by name. This is the order the renderer shows and range selection
    /// operates over.
    pub fn children_sorted(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let NodeKind::Folder { children } = &node.kind else {
            return Vec::new();
        };
        let mut ids: Vec<NodeId> = children.values().copied().collect();
        ids.sort_by_key(|cid| self.nodes.get(cid).map(|c| (c.is_file(), c.name.clone())));
        ids
    }

    /// Number of descendants under a node.
    pub fn descendant_count(&self, id: NodeId) -> usize {
        self.flatten(id).count()
    }

    /// Value-copy snapshot of every file path at or below a node.
    ///
    /// Bulk operations iterate this list instead of live node references,
    /// so concurrent reconciliation pruning a node cannot invalidate an
    /// in-flight operation.
    pub fn file_paths(&self, id: NodeId) -> Vec<CompactString> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        if node.is_file() {
            return vec![node.path.clone()];
        }
        self.flatten(id)
            .filter_map(|cid| self.nodes.get(&cid))
            .filter(|n| n.is_file())
            .map(|n| n.path.clone())
            .collect()
    }
}

impl Default for PathTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order descendant iterator returned by [`PathTree::flatten`].
#[derive(Debug)]
pub struct Flatten<'a> {
    tree: &'a PathTree,
    stack: Vec<NodeId>,
}

impl Iterator for Flatten<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Some(node) = self.tree.nodes.get(&id)
            && let NodeKind::Folder { children } = &node.kind
        {
            self.stack.extend(children.values().rev().copied());
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(size: u64) -> FileMeta {
        FileMeta {
            size,
            available: true,
            upload_progress: None,
            expiration_height: 0,
            renewing: false,
        }
    }

    fn sample_tree() -> (PathTree, NodeId, NodeId) {
        let mut tree = PathTree::new();
        let movies = tree.add_folder(tree.root(), "movies").unwrap();
        let sub = tree.add_folder(movies, "2024").unwrap();
        tree.add_file(sub, "night.mkv", meta(1)).unwrap();
        tree.add_file(movies, "day.mkv", meta(2)).unwrap();
        (tree, movies, sub)
    }

    #[test]
    fn test_add_and_resolve() {
        let (tree, movies, sub) = sample_tree();

        assert_eq!(tree.resolve(""), Some(tree.root()));
        assert_eq!(tree.resolve("movies"), Some(movies));
        assert_eq!(tree.resolve("movies/2024"), Some(sub));
        assert!(tree.resolve("movies/2024/night.mkv").is_some());
        assert!(tree.resolve("movies/missing").is_none());
        // File mid-path is a type mismatch, not a folder.
        assert!(tree.resolve("movies/day.mkv/x").is_none());
    }

    #[test]
    fn test_add_rejects_bad_names() {
        let mut tree = PathTree::new();
        assert_eq!(
            tree.add_folder(tree.root(), ""),
            Err(TreeError::invalid_name(""))
        );
        tree.add_folder(tree.root(), "a").unwrap();
        assert_eq!(
            tree.add_folder(tree.root(), "a"),
            Err(TreeError::invalid_name("a"))
        );
        // File and folder children share one namespace.
        assert_eq!(
            tree.add_file(tree.root(), "a", meta(1)),
            Err(TreeError::invalid_name("a"))
        );
    }

    #[test]
    fn test_add_under_file_is_conflict() {
        let mut tree = PathTree::new();
        let f = tree.add_file(tree.root(), "x", meta(1)).unwrap();
        assert!(matches!(
            tree.add_folder(f, "y"),
            Err(TreeError::PathConflict { .. })
        ));
    }

    #[test]
    fn test_remove_destroys_subtree() {
        let (mut tree, movies, sub) = sample_tree();
        let file = tree.resolve("movies/2024/night.mkv").unwrap();

        tree.remove(movies).unwrap();
        assert!(!tree.contains(movies));
        assert!(!tree.contains(sub));
        assert!(!tree.contains(file));
        assert!(tree.is_empty());

        // Already unlinked.
        assert_eq!(tree.remove(movies), Err(TreeError::NotFound));
    }

    #[test]
    fn test_remove_root_fails() {
        let mut tree = PathTree::new();
        assert_eq!(tree.remove(tree.root()), Err(TreeError::NotFound));
    }

    #[test]
    fn test_ancestors_root_first() {
        let (tree, movies, sub) = sample_tree();
        let file = tree.resolve("movies/2024/night.mkv").unwrap();
        assert_eq!(tree.ancestors(file), vec![tree.root(), movies, sub]);
        assert!(tree.ancestors(tree.root()).is_empty());
    }

    #[test]
    fn test_flatten_preorder() {
        let (tree, _, _) = sample_tree();
        let paths: Vec<_> = tree
            .flatten(tree.root())
            .filter_map(|id| tree.get(id))
            .map(|n| n.path.as_str().to_owned())
            .collect();
        assert_eq!(
            paths,
            ["movies", "movies/2024", "movies/2024/night.mkv", "movies/day.mkv"]
        );
    }

    #[test]
    fn test_children_sorted_folders_first() {
        let mut tree = PathTree::new();
        tree.add_file(tree.root(), "alpha.txt", meta(1)).unwrap();
        tree.add_folder(tree.root(), "zebra").unwrap();
        tree.add_file(tree.root(), "beta.txt", meta(1)).unwrap();
        tree.add_folder(tree.root(), "apple").unwrap();

        let names: Vec<_> = tree
            .children_sorted(tree.root())
            .into_iter()
            .filter_map(|id| tree.get(id))
            .map(|n| n.name.as_str().to_owned())
            .collect();
        assert_eq!(names, ["apple", "zebra", "alpha.txt", "beta.txt"]);
    }

    #[test]
    fn test_rename_repaths_subtree() {
        let (mut tree, movies, sub) = sample_tree();
        tree.rename(movies, "films").unwrap();

        assert_eq!(tree.get(movies).unwrap().path, "films");
        assert_eq!(tree.get(sub).unwrap().path, "films/2024");
        assert!(tree.resolve("films/2024/night.mkv").is_some());
        assert!(tree.resolve("movies").is_none());
    }

    #[test]
    fn test_rename_precondition_leaves_tree_intact() {
        let (mut tree, movies, _) = sample_tree();
        let day = tree.resolve("movies/day.mkv").unwrap();
        assert_eq!(
            tree.rename(day, "2024"),
            Err(TreeError::invalid_name("2024"))
        );
        assert_eq!(tree.get(day).unwrap().path, "movies/day.mkv");
        assert!(tree.contains(movies));
    }

    #[test]
    fn test_file_paths_snapshot() {
        let (tree, movies, _) = sample_tree();
        let mut paths = tree.file_paths(movies);
        paths.sort();
        assert_eq!(paths, ["movies/2024/night.mkv", "movies/day.mkv"]);

        let file = tree.resolve("movies/day.mkv").unwrap();
        assert_eq!(tree.file_paths(file), ["movies/day.mkv"]);
    }

    #[test]
    fn test_update_meta_preserves_identity() {
        let mut tree = PathTree::new();
        let id = tree.add_file(tree.root(), "f", meta(10)).unwrap();
        tree.update_meta(id, meta(99)).unwrap();
        assert_eq!(tree.get(id).unwrap().meta().unwrap().size, 99);
    }
}
