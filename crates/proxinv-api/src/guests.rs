//! Guest types returned by the `qemu` and `lxc` endpoints

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The two kinds of guest a node can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestKind {
    /// QEMU/KVM virtual machine
    VirtualMachine,
    /// LXC container
    Container,
}

impl GuestKind {
    /// Node sub-path listing guests of this kind
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            GuestKind::VirtualMachine => "qemu",
            GuestKind::Container => "lxc",
        }
    }

    /// Inventory group holding guests of this kind
    #[must_use]
    pub fn group_name(self) -> &'static str {
        match self {
            GuestKind::VirtualMachine => "virtual_machines",
            GuestKind::Container => "containers",
        }
    }
}

impl fmt::Display for GuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestKind::VirtualMachine => write!(f, "virtual machines"),
            GuestKind::Container => write!(f, "containers"),
        }
    }
}

/// Guest lifecycle state as reported in the `status` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    Running,
    Stopped,
    /// Any state this crate does not care about
    #[default]
    #[serde(other)]
    Other,
}

impl GuestStatus {
    #[must_use]
    pub fn is_running(self) -> bool {
        self == GuestStatus::Running
    }
}

/// A virtual machine or container as listed by `/nodes/{node}/qemu` or
/// `/nodes/{node}/lxc`
///
/// Both endpoints return the same core fields; the resource counters are kept
/// for diagnostics only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Guest name (hostname for containers)
    #[serde(default)]
    pub name: String,
    /// Numeric guest ID
    #[serde(deserialize_with = "deserialize_vmid")]
    pub vmid: u32,
    /// Lifecycle state
    #[serde(default)]
    pub status: GuestStatus,
    /// Semicolon separated tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Guest type ("lxc" for containers, absent for VMs)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxmem: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxswap: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxdisk: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diskread: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diskwrite: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netin: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netout: Option<u64>,
    /// Uptime in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
}

impl GuestRecord {
    /// Create a guest record with the fields enumeration looks at
    pub fn new(vmid: u32, name: impl Into<String>, status: GuestStatus) -> Self {
        Self {
            name: name.into(),
            vmid,
            status,
            tags: None,
            kind: None,
            pid: None,
            cpu: None,
            cpus: None,
            mem: None,
            maxmem: None,
            swap: None,
            maxswap: None,
            disk: None,
            maxdisk: None,
            diskread: None,
            diskwrite: None,
            netin: None,
            netout: None,
            uptime: None,
        }
    }

    /// Tags as a list
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        split_tags(self.tags.as_deref())
    }
}

/// QEMU guest configuration from `/nodes/{node}/qemu/{vmid}/config`
///
/// Only a handful of keys are typed; disks, NICs and everything else stay in
/// `extra` because their set depends on the guest's hardware.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VmConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ostype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// QEMU guest agent settings (e.g. "1" or "enabled=1,fstrim_cloned_disks=1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sockets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboot: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Remaining configuration keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl VmConfig {
    /// Network devices (`net0`, `net1`, ...) in index order
    #[must_use]
    pub fn network_devices(&self) -> Vec<(&str, &str)> {
        network_devices(&self.extra)
    }

    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        split_tags(self.tags.as_deref())
    }
}

/// LXC container configuration from `/nodes/{node}/lxc/{vmid}/config`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LxcConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ostype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rootfs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    /// Memory limit in MiB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    /// Swap limit in MiB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboot: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unprivileged: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Remaining configuration keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl LxcConfig {
    /// Network devices (`net0`, `net1`, ...) in index order
    #[must_use]
    pub fn network_devices(&self) -> Vec<(&str, &str)> {
        network_devices(&self.extra)
    }

    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        split_tags(self.tags.as_deref())
    }
}

fn network_devices(extra: &BTreeMap<String, Value>) -> Vec<(&str, &str)> {
    let mut devices: Vec<(u32, &str, &str)> = extra
        .iter()
        .filter_map(|(key, value)| {
            let index = key.strip_prefix("net")?.parse().ok()?;
            Some((index, key.as_str(), value.as_str()?))
        })
        .collect();
    // BTreeMap order puts net10 before net2
    devices.sort_by_key(|(index, _, _)| *index);
    devices
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .collect()
}

fn split_tags(tags: Option<&str>) -> Vec<&str> {
    tags.map(|t| {
        t.split([';', ','])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// LXC listings report `vmid` as a string, QEMU listings as a number
fn deserialize_vmid<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawVmid {
        Number(u32),
        Text(String),
    }

    match RawVmid::deserialize(deserializer)? {
        RawVmid::Number(id) => Ok(id),
        RawVmid::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}
