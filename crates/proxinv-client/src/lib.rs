//! proxinv-client: Proxmox VE API client
//!
//! Read-only HTTP client for the Proxmox VE `api2/json` API, authenticated with
//! an API token, plus the filter that reduces guest listings to inventory host
//! names.
//!
//! # Example
//!
//! ```no_run
//! use proxinv_api::{ApiCredentials, ExclusionSet};
//! use proxinv_client::ProxmoxClient;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = ApiCredentials::new(
//!     "root@pam",
//!     "inventory",
//!     "00000000-0000-0000-0000-000000000000",
//!     "https://pve1.example.com:8006",
//! );
//! let client = ProxmoxClient::new(&credentials)?;
//! let cancel = CancellationToken::new();
//! let exclusions = ExclusionSet::new(["template-01"]);
//!
//! for node in client.list_nodes(&cancel).await? {
//!     let vms = client
//!         .list_running_virtual_machines(&node.node, &exclusions, &cancel)
//!         .await?;
//!     println!("{}: {vms:?}", node.node);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod filter;
pub mod http;

pub use error::{ClientError, Result};
pub use filter::running_guest_names;
pub use http::{API_PATH, ProxmoxClient, REQUEST_TIMEOUT};
