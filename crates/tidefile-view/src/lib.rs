//! Browsing state for tidefile.
//!
//! Headless view-model over a [`tidefile_core::PathTree`]: which folder
//! the user is in, which rendered entries are selected, and the contracts
//! between the two. Rendering itself belongs to an external collaborator
//! that reads [`Browser::entries`].

mod browser;
mod cursor;
mod selection;

pub use browser::{Browser, Entry, NEW_FOLDER_NAME, unique_sibling_name};
pub use cursor::{NavigationCursor, ScopeChanged};
pub use selection::SelectionController;

// Re-export core types for convenience
pub use tidefile_core::{DisplayId, NodeId, PathTree};
