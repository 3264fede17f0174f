//! Configuration loading and types

use std::path::{Path, PathBuf};

use eyre::WrapErr;
use proxinv_api::ProxmoxConfig;
use serde::{Deserialize, Serialize};

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "PROXINV_CONFIG";

/// Configuration file looked up in the working directory
const LOCAL_FILE: &str = ".proxinv.toml";

/// Top-level configuration for proxinv
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Proxmox connection and inventory settings
    #[serde(default)]
    pub proxmox: ProxmoxConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            proxmox: ProxmoxConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("failed to parse {}", path.display()))
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns error if the text is not valid TOML or has wrongly typed keys
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Find the configuration file
///
/// `$PROXINV_CONFIG` is returned as-is so a wrong path fails loudly; the
/// default locations are only used when they exist.
pub fn locate() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    candidates(dirs::config_dir())
        .into_iter()
        .find(|path| path.exists())
}

/// Default locations: working directory, then user config directory
fn candidates(config_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_FILE)];
    if let Some(dir) = config_dir {
        paths.push(dir.join("proxinv/proxinv.toml"));
    }
    paths
}
