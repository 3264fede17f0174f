//! Inventory assembly across all cluster nodes

use std::sync::Arc;

use proxinv_api::{ExclusionSet, GuestKind};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::error::InventoryError;
use crate::source::GuestSource;
use crate::types::Inventory;

/// Inventory assembler
///
/// Enumerates nodes one at a time, virtual machines before containers, and
/// appends the results in that order. The first failure aborts the run.
pub struct InventoryAssembler {
    source: Arc<dyn GuestSource>,
    exclusions: ExclusionSet,
}

impl InventoryAssembler {
    /// Create a new inventory assembler
    pub fn new(source: Arc<dyn GuestSource>, exclusions: ExclusionSet) -> Self {
        Self { source, exclusions }
    }

    /// Guest names kept out of the inventory
    #[must_use]
    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Build the inventory
    ///
    /// # Errors
    /// Returns the first node listing or guest listing failure. No partial
    /// inventory is returned.
    #[instrument(skip_all)]
    pub async fn assemble(&self, cancel: &CancellationToken) -> Result<Inventory, InventoryError> {
        info!(excluded = self.exclusions.len(), "assembling inventory");

        let nodes = self
            .source
            .nodes(cancel)
            .await
            .map_err(InventoryError::Nodes)?;
        debug!(count = nodes.len(), "listed nodes");

        let mut inventory = Inventory::new();

        for node in &nodes {
            for kind in [GuestKind::VirtualMachine, GuestKind::Container] {
                let hosts = self
                    .source
                    .running_guests(&node.node, kind, &self.exclusions, cancel)
                    .await
                    .map_err(|source| InventoryError::Enumeration {
                        node: node.node.clone(),
                        kind,
                        source,
                    })?;

                debug!(node = %node.node, %kind, count = hosts.len(), "enumerated guests");
                inventory.group_mut(kind).hosts.extend(hosts);
            }
        }

        info!(
            nodes = nodes.len(),
            virtual_machines = inventory.virtual_machines.hosts.len(),
            containers = inventory.containers.hosts.len(),
            "inventory assembled"
        );

        Ok(inventory)
    }
}
