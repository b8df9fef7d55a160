//! Request bodies for the Input API.

use crate::INBOX_NODE_ID;

use std::time::SystemTime;

use humantime::format_rfc3339_millis;
use serde::Serialize;

/// A node to create: the service's unit of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub name: String,
    pub description: String,
}

impl Node {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// The node sent to the default location (the Library).
    pub fn test_node(timestamp: &str) -> Self {
        Self::new(
            format!("Test Node - {timestamp}"),
            format!("This is a test node created via the Tana Input API at {timestamp}"),
        )
    }

    /// The node sent to the INBOX.
    pub fn inbox_node(timestamp: &str) -> Self {
        Self::new(
            format!("Inbox Test - {timestamp}"),
            "This test node was sent directly to your Tana inbox",
        )
    }
}

/// Where the service files the created nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLocation {
    /// No `targetNodeId`; the service picks its default (the Library).
    Default,
    Inbox,
}

impl TargetLocation {
    pub fn target_node_id(&self) -> Option<&'static str> {
        match self {
            TargetLocation::Default => None,
            TargetLocation::Inbox => Some(INBOX_NODE_ID),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetLocation::Default => "default location",
            TargetLocation::Inbox => "INBOX",
        }
    }
}

impl std::fmt::Display for TargetLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// `{ "targetNodeId"?: string, "nodes": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNodesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_node_id: Option<String>,
    pub nodes: Vec<Node>,
}

impl AddNodesRequest {
    pub fn new(nodes: Vec<Node>, target: TargetLocation) -> Self {
        Self {
            target_node_id: target.target_node_id().map(String::from),
            nodes,
        }
    }
}

/// Current UTC time as RFC 3339 with milliseconds, e.g. `2024-05-01T09:30:00.123Z`.
pub fn current_timestamp() -> String {
    format_rfc3339_millis(SystemTime::now()).to_string()
}
