//! Multi-selection state over the rendered entries of one folder.
//!
//! The controller tracks node ids only; the display order of the current
//! folder (folders first, then lexicographic) is passed into each
//! operation, so selection never outlives or outgrows what is rendered.

use std::collections::HashSet;

use tidefile_core::NodeId;

/// Anchor-based multi-selection state machine.
///
/// The anchor is the reference point for range selection, set by the most
/// recent non-range selection action. Whenever the anchor is defined it is
/// itself selected.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: HashSet<NodeId>,
    anchor: Option<NodeId>,
}

impl SelectionController {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids currently selected (unordered).
    pub fn selected(&self) -> &HashSet<NodeId> {
        &self.selected
    }

    /// Current anchor, if any.
    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }

    /// Check if a node is selected.
    pub fn is_selected(&self, node: NodeId) -> bool {
        self.selected.contains(&node)
    }

    /// Number of selected entries.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in display order.
    pub fn in_order(&self, order: &[NodeId]) -> Vec<NodeId> {
        order
            .iter()
            .copied()
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    /// Select exactly one entry and make it the anchor.
    ///
    /// No-op when the node is not rendered in the current folder.
    pub fn select(&mut self, node: NodeId, order: &[NodeId]) {
        if !order.contains(&node) {
            return;
        }
        self.selected.clear();
        self.selected.insert(node);
        self.anchor = Some(node);
    }

    /// Toggle one entry's selection.
    ///
    /// A newly selected entry becomes the anchor; deselecting the anchor
    /// leaves the anchor undefined rather than reassigning it.
    pub fn toggle(&mut self, node: NodeId, order: &[NodeId]) {
        if !order.contains(&node) {
            return;
        }
        if self.selected.remove(&node) {
            if self.anchor == Some(node) {
                self.anchor = None;
            }
        } else {
            self.selected.insert(node);
            self.anchor = Some(node);
        }
    }

    /// Select the contiguous run between the anchor and `node` inclusive,
    /// deselecting everything else. The anchor does not move.
    ///
    /// Without a usable anchor this behaves as [`select`](Self::select).
    pub fn select_range(&mut self, node: NodeId, order: &[NodeId]) {
        let anchor_pos = self
            .anchor
            .and_then(|a| order.iter().position(|id| *id == a));
        let node_pos = order.iter().position(|id| *id == node);

        match (anchor_pos, node_pos) {
            (Some(a), Some(n)) => {
                let (lo, hi) = if a <= n { (a, n) } else { (n, a) };
                self.selected.clear();
                self.selected.extend(order[lo..=hi].iter().copied());
            }
            (None, Some(_)) => self.select(node, order),
            (_, None) => {}
        }
    }

    /// Select every rendered entry. The anchor is dropped.
    pub fn select_all(&mut self, order: &[NodeId]) {
        self.anchor = None;
        self.selected = order.iter().copied().collect();
    }

    /// Deselect everything except an optional survivor.
    ///
    /// The survivor keeps its selection and anchor status; deselecting
    /// past any other anchor drops that anchor.
    pub fn deselect_all(&mut self, except: Option<NodeId>) {
        if self.anchor != except {
            self.anchor = None;
        }
        self.selected.retain(|id| Some(*id) == except);
    }

    /// Drop the whole selection state (scope change).
    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    /// Drop ids that are no longer rendered (pruned by reconciliation).
    pub fn retain_rendered(&mut self, order: &[NodeId]) {
        self.selected.retain(|id| order.contains(id));
        if let Some(a) = self.anchor
            && !order.contains(&a)
        {
            self.anchor = None;
        }
    }
}
