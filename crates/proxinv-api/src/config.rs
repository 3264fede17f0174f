//! Proxmox connection settings

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exclusion::ExclusionSet;

/// Configuration errors detected before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is empty or absent
    #[error("{0} is required")]
    Missing(&'static str),
}

/// The `[proxmox]` section of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxmoxConfig {
    /// API token credentials and endpoint
    #[serde(default)]
    pub api: ApiCredentials,
    /// Guest names to leave out of the inventory
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ProxmoxConfig {
    /// Check that every required setting is present
    ///
    /// # Errors
    /// Returns the first missing setting, checked in the order user, token,
    /// secret, url.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()
    }

    /// Build the exclusion set from `exclude`
    #[must_use]
    pub fn exclusions(&self) -> ExclusionSet {
        self.exclude.iter().cloned().collect()
    }
}

/// The `[proxmox.api]` section: an API token and the cluster URL
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ApiCredentials {
    /// Token owner (e.g. "root@pam")
    #[serde(default)]
    pub user: String,
    /// Token ID
    #[serde(default)]
    pub token: String,
    /// Token secret (UUID)
    #[serde(default)]
    pub secret: String,
    /// Base URL of the API (e.g. "https://pve1.example.com:8006")
    #[serde(default)]
    pub url: String,
}

impl ApiCredentials {
    pub fn new(
        user: impl Into<String>,
        token: impl Into<String>,
        secret: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
            secret: secret.into(),
            url: url.into(),
        }
    }

    /// Check that every field is set
    ///
    /// # Errors
    /// Returns the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("proxmox.api.user", &self.user),
            ("proxmox.api.token", &self.token),
            ("proxmox.api.secret", &self.secret),
            ("proxmox.api.url", &self.url),
        ];

        match fields.into_iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(ConfigError::Missing(name)),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("user", &self.user)
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .field("url", &self.url)
            .finish()
    }
}
