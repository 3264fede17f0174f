//! proxinv-inventory: Ansible inventory assembly
//!
//! Walks every node of a Proxmox cluster, collects the running virtual machines
//! and containers, and builds the Ansible dynamic inventory document.

pub mod assembler;
pub mod error;
pub mod source;
pub mod types;

pub use assembler::InventoryAssembler;
pub use error::InventoryError;
pub use source::GuestSource;
pub use types::{AllGroup, HostGroup, HostVars, Inventory, InventoryMeta, to_pretty_json};
