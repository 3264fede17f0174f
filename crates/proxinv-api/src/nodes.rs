//! Cluster node types returned by `/nodes`

use serde::{Deserialize, Serialize};

/// A node in the Proxmox cluster
///
/// Only `node` is needed to address the per-node endpoints; everything else is
/// whatever the API reports for the node at listing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node name (e.g. "pve1")
    pub node: String,
    /// Node status ("online", "offline", "unknown")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Resource identifier (e.g. "node/pve1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource type, always "node"
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Support subscription level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// CPU utilisation (0.0 to 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    /// Number of CPUs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxcpu: Option<u32>,
    /// Used memory in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem: Option<u64>,
    /// Total memory in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxmem: Option<u64>,
    /// Used root filesystem space in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<u64>,
    /// Root filesystem size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxdisk: Option<u64>,
    /// Uptime in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// TLS certificate fingerprint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_fingerprint: Option<String>,
}

impl NodeRecord {
    /// Create a node record carrying only its name
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            status: None,
            id: None,
            kind: None,
            level: None,
            cpu: None,
            maxcpu: None,
            mem: None,
            maxmem: None,
            disk: None,
            maxdisk: None,
            uptime: None,
            ssl_fingerprint: None,
        }
    }
}
