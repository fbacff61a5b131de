//! Sync configuration types.

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for the reconciliation loop.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SyncConfig {
    /// Interval between remote listing polls.
    #[builder(default = "Duration::from_secs(5)")]
    #[serde(default = "default_poll_interval")]
    pub poll_interval: Duration,

    /// Prune empty folders that no record implies, even when they were
    /// already empty before the pass. Off by default: locally created
    /// folders stay until the user deletes them.
    #[builder(default = "false")]
    #[serde(default)]
    pub prune_idle_folders: bool,
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(5)
}

impl SyncConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(interval) = self.poll_interval
            && interval.is_zero()
        {
            return Err("Poll interval cannot be zero".to_string());
        }
        Ok(())
    }
}

impl SyncConfig {
    /// Create a new sync config builder.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            prune_idle_folders: false,
        }
    }
}
