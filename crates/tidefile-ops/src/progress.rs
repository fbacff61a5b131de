//! Progress reporting types for remote operations.

/// The type of operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Delete,
    Download,
    Rename,
    Share,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delete => write!(f, "Delete"),
            Self::Download => write!(f, "Download"),
            Self::Rename => write!(f, "Rename"),
            Self::Share => write!(f, "Share"),
        }
    }
}

/// A per-item failure inside a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    /// Remote path the failure applies to.
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Progress information for an ongoing operation.
#[derive(Debug, Clone)]
pub struct OperationProgress {
    /// The type of operation.
    pub operation_type: OperationType,
    /// Number of items completed.
    pub items_completed: usize,
    /// Total number of items to process.
    pub items_total: usize,
    /// The path currently being processed.
    pub current_path: Option<String>,
    /// Per-item errors encountered so far.
    pub errors: Vec<OperationError>,
}

impl OperationProgress {
    /// Create a new progress tracker for an operation.
    pub fn new(operation_type: OperationType, items_total: usize) -> Self {
        Self {
            operation_type,
            items_completed: 0,
            items_total,
            current_path: None,
            errors: Vec::new(),
        }
    }

    /// Get the progress as a percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        if self.items_total > 0 {
            (self.items_completed as f64 / self.items_total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Check if the operation has any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Add a per-item error.
    pub fn add_error(&mut self, error: OperationError) {
        self.errors.push(error);
    }

    /// Update the path currently being processed.
    pub fn set_current(&mut self, path: Option<String>) {
        self.current_path = path;
    }

    /// Increment the completed count.
    pub fn complete_item(&mut self) {
        self.items_completed += 1;
    }
}

/// Result of a completed operation.
///
/// Bulk operations are not atomic: `succeeded` and `failed` report partial
/// completion per item, never a single pass/fail.
#[derive(Debug, Clone)]
pub struct OperationComplete {
    /// The type of operation.
    pub operation_type: OperationType,
    /// Number of items successfully processed.
    pub succeeded: usize,
    /// Number of items that failed.
    pub failed: usize,
    /// Per-item errors that occurred.
    pub errors: Vec<OperationError>,
}

impl OperationComplete {
    pub(crate) fn from_progress(progress: OperationProgress) -> Self {
        Self {
            operation_type: progress.operation_type,
            succeeded: progress.items_completed,
            failed: progress.errors.len(),
            errors: progress.errors,
        }
    }

    /// Check if every item was processed successfully.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Get a human-readable summary of the operation.
    pub fn summary(&self) -> String {
        let action = match self.operation_type {
            OperationType::Delete => "Deleted",
            OperationType::Download => "Downloaded",
            OperationType::Rename => "Renamed",
            OperationType::Share => "Shared",
        };
        if self.failed == 0 {
            format!("{} {} items", action, self.succeeded)
        } else {
            format!("{} {} items, {} failed", action, self.succeeded, self.failed)
        }
    }
}
