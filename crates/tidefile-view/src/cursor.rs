//! Current-folder pointer and breadcrumb chains.

use tidefile_core::{NodeId, PathTree};

/// Emitted when the cursor moves to a different folder.
///
/// Selection state is scoped per folder view, so subscribers (the
/// [`SelectionController`](crate::SelectionController)) clear themselves
/// on this event. [`Browser`](crate::Browser) wires that contract up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeChanged {
    /// Folder the cursor left.
    pub from: NodeId,
    /// Folder the cursor now points at.
    pub to: NodeId,
}

/// Tracks the folder that scopes listing, selection, and search.
#[derive(Debug, Clone)]
pub struct NavigationCursor {
    current: NodeId,
}

impl NavigationCursor {
    /// Create a cursor pointing at the tree root.
    pub fn new(tree: &PathTree) -> Self {
        Self {
            current: tree.root(),
        }
    }

    /// The current folder.
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Point the cursor at `target`.
    ///
    /// Navigating into a file (or a vanished node) is not an error; it
    /// redirects to the root. Returns the scope-change event when the
    /// current folder actually changed.
    pub fn navigate_to(&mut self, tree: &PathTree, target: NodeId) -> Option<ScopeChanged> {
        let dest = match tree.get(target) {
            Some(node) if node.is_folder() => target,
            _ => tree.root(),
        };
        if dest == self.current {
            return None;
        }
        let event = ScopeChanged {
            from: self.current,
            to: dest,
        };
        self.current = dest;
        Some(event)
    }

    /// Fall back to the root when reconciliation pruned the current
    /// folder out from under the cursor.
    pub fn revalidate(&mut self, tree: &PathTree) -> Option<ScopeChanged> {
        if tree.contains(self.current) {
            return None;
        }
        let event = ScopeChanged {
            from: self.current,
            to: tree.root(),
        };
        self.current = tree.root();
        Some(event)
    }

    /// Folder chain from the root down to and including the current
    /// folder, for rendering the path bar and back-navigation targets.
    pub fn breadcrumb(&self, tree: &PathTree) -> Vec<NodeId> {
        let mut chain = tree.ancestors(self.current);
        chain.push(self.current);
        chain
    }
}
