//! Where the assembler gets nodes and guests from

use async_trait::async_trait;
use proxinv_api::{ExclusionSet, GuestKind, NodeRecord};
use proxinv_client::{ClientError, ProxmoxClient};
use tokio_util::sync::CancellationToken;

/// Source of cluster nodes and their running guests
#[async_trait]
pub trait GuestSource: Send + Sync {
    /// List the cluster nodes
    async fn nodes(&self, cancel: &CancellationToken) -> Result<Vec<NodeRecord>, ClientError>;

    /// Names of the running, non-excluded guests of one kind on a node
    async fn running_guests(
        &self,
        node: &str,
        kind: GuestKind,
        exclusions: &ExclusionSet,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, ClientError>;
}

#[async_trait]
impl GuestSource for ProxmoxClient {
    async fn nodes(&self, cancel: &CancellationToken) -> Result<Vec<NodeRecord>, ClientError> {
        self.list_nodes(cancel).await
    }

    async fn running_guests(
        &self,
        node: &str,
        kind: GuestKind,
        exclusions: &ExclusionSet,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, ClientError> {
        match kind {
            GuestKind::VirtualMachine => {
                self.list_running_virtual_machines(node, exclusions, cancel)
                    .await
            }
            GuestKind::Container => {
                self.list_running_containers(node, exclusions, cancel)
                    .await
            }
        }
    }
}
