//! Owning facade over tree, cursor, and selection.
//!
//! The browser is the single logical owner of the browsing state: all
//! mutations (reconciliation against its tree, selection changes,
//! navigation) go through one `&mut` borrow, so no two of them can
//! interleave their effects.

use compact_str::CompactString;
use tracing::debug;

use tidefile_core::{DisplayId, NodeId, PathTree, TreeError};

use crate::cursor::{NavigationCursor, ScopeChanged};
use crate::selection::SelectionController;

/// Default proposed name for UI-created folders.
pub const NEW_FOLDER_NAME: &str = "New Folder";

/// One rendered row: the node, its stable display key, and whether it is
/// selected. External renderers correlate rows to persistent UI elements
/// through the display id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub id: NodeId,
    pub display_id: DisplayId,
    pub selected: bool,
}

/// Browsing session state over one remote store.
#[derive(Debug)]
pub struct Browser {
    tree: PathTree,
    cursor: NavigationCursor,
    selection: SelectionController,
}

impl Default for Browser {
    fn default() -> Self {
        Self::new()
    }
}

impl Browser {
    /// Create a session with an empty tree, cursor at the root.
    pub fn new() -> Self {
        let tree = PathTree::new();
        let cursor = NavigationCursor::new(&tree);
        Self {
            tree,
            cursor,
            selection: SelectionController::new(),
        }
    }

    /// The underlying tree.
    pub fn tree(&self) -> &PathTree {
        &self.tree
    }

    /// Mutable access for reconciliation. Call [`refresh`](Self::refresh)
    /// afterwards so the cursor and selection drop pruned nodes.
    pub fn tree_mut(&mut self) -> &mut PathTree {
        &mut self.tree
    }

    /// The folder currently scoping the view.
    pub fn current_folder(&self) -> NodeId {
        self.cursor.current()
    }

    /// Folder chain from the root to the current folder, inclusive.
    pub fn breadcrumb(&self) -> Vec<NodeId> {
        self.cursor.breadcrumb(&self.tree)
    }

    /// Children of the current folder in display order.
    pub fn display_order(&self) -> Vec<NodeId> {
        self.tree.children_sorted(self.cursor.current())
    }

    /// Rendered rows for the current folder.
    pub fn entries(&self) -> Vec<Entry> {
        self.display_order()
            .into_iter()
            .filter_map(|id| self.tree.get(id))
            .map(|node| Entry {
                id: node.id,
                display_id: node.display_id(),
                selected: self.selection.is_selected(node.id),
            })
            .collect()
    }

    /// Move the view into a folder.
    ///
    /// Scope change clears the selection: selection is scoped per folder
    /// view, and this is the explicit contract rather than an accident of
    /// shared state.
    pub fn navigate_to(&mut self, target: NodeId) -> Option<ScopeChanged> {
        let event = self.cursor.navigate_to(&self.tree, target);
        if let Some(event) = event {
            debug!(from = event.from.0, to = event.to.0, "scope changed");
            self.selection.clear();
        }
        event
    }

    /// Re-anchor the view after the tree changed underneath it.
    ///
    /// Reconciliation may have pruned the current folder or selected
    /// entries; the cursor falls back to the root and the selection drops
    /// anything no longer rendered.
    pub fn refresh(&mut self) {
        if self.cursor.revalidate(&self.tree).is_some() {
            self.selection.clear();
            return;
        }
        let order = self.display_order();
        self.selection.retain_rendered(&order);
    }

    /// Select exactly one rendered entry.
    pub fn select(&mut self, node: NodeId) {
        let order = self.display_order();
        self.selection.select(node, &order);
    }

    /// Toggle one rendered entry.
    pub fn toggle(&mut self, node: NodeId) {
        let order = self.display_order();
        self.selection.toggle(node, &order);
    }

    /// Range-select from the anchor to `node`.
    pub fn select_range(&mut self, node: NodeId) {
        let order = self.display_order();
        self.selection.select_range(node, &order);
    }

    /// Select every rendered entry.
    pub fn select_all(&mut self) {
        let order = self.display_order();
        self.selection.select_all(&order);
    }

    /// Deselect everything except an optional survivor.
    pub fn deselect_all(&mut self, except: Option<NodeId>) {
        self.selection.deselect_all(except);
    }

    /// Selection state, for rendering and assertions.
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Value-copy snapshot of every selected file path, with selected
    /// folders flattened several levels deep. Bulk operations iterate
    /// this list, not live nodes, so concurrent pruning cannot invalidate
    /// them mid-flight.
    pub fn selected_paths(&self) -> Vec<CompactString> {
        let order = self.display_order();
        self.selection
            .in_order(&order)
            .into_iter()
            .flat_map(|id| self.tree.file_paths(id))
            .collect()
    }

    /// All descendants of the current folder whose path contains the
    /// search string, in pre-order.
    pub fn search(&self, needle: &str) -> Vec<NodeId> {
        self.tree
            .flatten(self.cursor.current())
            .filter(|id| {
                self.tree
                    .get(*id)
                    .is_some_and(|n| n.path.contains(needle))
            })
            .collect()
    }

    /// Create a provisional folder in the current folder.
    ///
    /// The proposed name is suffixed (`name`, `name_0`, `name_1`, ...)
    /// until it is unique among current siblings, so this cannot fail on
    /// a collision. The node exists locally until the remote store
    /// confirms it through a later listing or the user deletes it.
    pub fn create_folder(&mut self, proposed: &str) -> Result<NodeId, TreeError> {
        let parent = self.cursor.current();
        let name = unique_sibling_name(&self.tree, parent, proposed);
        let id = self.tree.add_folder(parent, &name)?;
        debug!(%name, "created provisional folder");
        Ok(id)
    }
}

/// Suffix `proposed` until it names no existing child of `parent`.
pub fn unique_sibling_name(tree: &PathTree, parent: NodeId, proposed: &str) -> CompactString {
    if tree.child_of(parent, proposed).is_none() {
        return CompactString::from(proposed);
    }
    let mut n = 0u32;
    loop {
        let candidate = compact_str::format_compact!("{proposed}_{n}");
        if tree.child_of(parent, &candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}
