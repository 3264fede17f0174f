//! Response envelope for the API

use serde::{Deserialize, Serialize};

/// Every Proxmox VE endpoint wraps its payload in a `data` member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload
    pub fn into_data(self) -> T {
        self.data
    }
}
