//! proxinv-api: Proxmox VE API types
//!
//! Contains the response shapes returned by the Proxmox VE `api2/json` endpoints,
//! the credential configuration, and the exclusion set shared by the client and
//! the inventory assembler.

pub mod agent;
pub mod config;
pub mod exclusion;
pub mod guests;
pub mod nodes;
pub mod responses;
pub mod version;

pub use agent::{AgentInterface, AgentIpAddress, AgentNetworkInterfaces};
pub use config::{ApiCredentials, ConfigError, ProxmoxConfig};
pub use exclusion::ExclusionSet;
pub use guests::{GuestKind, GuestRecord, GuestStatus, LxcConfig, VmConfig};
pub use nodes::NodeRecord;
pub use responses::ApiResponse;
pub use version::{Subdir, VersionInfo};
