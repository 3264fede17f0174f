//! Error types for proxinv-inventory

use proxinv_api::GuestKind;
use proxinv_client::ClientError;
use thiserror::Error;

/// Errors that abort inventory assembly
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Listing the cluster nodes failed
    #[error("failed to list proxmox nodes")]
    Nodes(#[source] ClientError),

    /// Listing the guests of one node failed
    #[error("failed to list running {kind} on node {node}")]
    Enumeration {
        /// Node being enumerated
        node: String,
        /// Guest kind being listed
        kind: GuestKind,
        /// Underlying client error
        #[source]
        source: ClientError,
    },

    /// Serializing the document failed
    #[error("failed to serialize inventory")]
    Serialize(#[from] serde_json::Error),
}

impl InventoryError {
    /// Client error behind this failure, if any
    #[must_use]
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            InventoryError::Nodes(source) | InventoryError::Enumeration { source, .. } => {
                Some(source)
            }
            InventoryError::Serialize(_) => None,
        }
    }

    /// Node on which enumeration failed
    #[must_use]
    pub fn node(&self) -> Option<&str> {
        match self {
            InventoryError::Enumeration { node, .. } => Some(node),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_message_names_node() {
        let err = InventoryError::Enumeration {
            node: "pve2".to_string(),
            kind: GuestKind::VirtualMachine,
            source: ClientError::Cancelled,
        };

        assert_eq!(
            err.to_string(),
            "failed to list running virtual machines on node pve2"
        );
        assert_eq!(
            std::error::Error::source(&err).unwrap().to_string(),
            "request cancelled"
        );
        assert_eq!(err.node(), Some("pve2"));
        assert!(err.client_error().unwrap().is_transport());
    }

    #[test]
    fn test_nodes_message() {
        let err = InventoryError::Nodes(ClientError::Protocol {
            status: 401,
            message: String::new(),
        });

        assert_eq!(err.to_string(), "failed to list proxmox nodes");
        assert_eq!(err.node(), None);
        assert_eq!(err.client_error().and_then(ClientError::status), Some(401));
    }
}
