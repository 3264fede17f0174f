//! API root and version types

use serde::{Deserialize, Serialize};

/// Response of `/version`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Major release (e.g. "8.2")
    pub release: String,
    /// Full version (e.g. "8.2.4")
    pub version: String,
    /// Repository commit
    #[serde(default)]
    pub repoid: String,
}

/// An entry of the API root directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdir {
    pub subdir: String,
}
