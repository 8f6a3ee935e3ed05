//! Version records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NodeId;

/// One entry of a store's append-only history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub created_at: DateTime<Utc>,
    pub root_node_id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Version {
    pub fn new(root_node_id: NodeId, description: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            root_node_id,
            description,
        }
    }

    /// Description or a dash, for listings
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or("-")
    }
}
