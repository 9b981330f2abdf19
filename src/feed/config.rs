//! Feed Configuration
//!
//! Node paths and lifecycle tuning, constructed by the hosting shell.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where the feed lives in the remote store, and how long an idle feed
/// keeps its subscriptions alive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Node holding one child record per item
    pub data_node: String,
    /// Node holding one named layout definition per child
    pub layout_node: String,
    /// Node holding the global presentation settings
    pub meta_node: String,
    /// Idle time after the last observer detaches before the upstream
    /// subscriptions are torn down
    pub grace_period_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            data_node: "ui/data".to_string(),
            layout_node: "ui/layout".to_string(),
            meta_node: "ui/meta".to_string(),
            grace_period_ms: 1000,
        }
    }
}

impl FeedConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    /// Path of one item record
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.data_node, id)
    }

    /// Path of one named layout definition
    pub fn layout_path(&self, name: &str) -> String {
        format!("{}/{}", self.layout_node, name)
    }
}
