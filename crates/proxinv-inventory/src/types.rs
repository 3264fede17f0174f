//! Ansible dynamic inventory document

use std::collections::BTreeMap;

use proxinv_api::{ExclusionSet, GuestKind};
use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

/// Per-host variables, keyed by host name
pub type HostVars = BTreeMap<String, BTreeMap<String, String>>;

/// Indentation of the emitted document
const INDENT: &[u8] = b"   ";

// ============================================================================
// Document
// ============================================================================

/// The document printed for `--list`
///
/// Field order here is the key order of the emitted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Host variables, so Ansible does not call `--host` per host
    #[serde(rename = "_meta")]
    pub meta: InventoryMeta,
    /// The `all` group
    pub all: AllGroup,
    /// Running LXC containers
    pub containers: HostGroup,
    /// Running QEMU virtual machines
    pub virtual_machines: HostGroup,
}

impl Inventory {
    /// Create an inventory with empty groups
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: InventoryMeta::default(),
            all: AllGroup {
                children: vec![
                    GuestKind::Container.group_name().to_string(),
                    GuestKind::VirtualMachine.group_name().to_string(),
                ],
            },
            containers: HostGroup::default(),
            virtual_machines: HostGroup::default(),
        }
    }

    /// Group holding guests of one kind
    #[must_use]
    pub fn group(&self, kind: GuestKind) -> &HostGroup {
        match kind {
            GuestKind::VirtualMachine => &self.virtual_machines,
            GuestKind::Container => &self.containers,
        }
    }

    /// Mutable group holding guests of one kind
    pub fn group_mut(&mut self, kind: GuestKind) -> &mut HostGroup {
        match kind {
            GuestKind::VirtualMachine => &mut self.virtual_machines,
            GuestKind::Container => &mut self.containers,
        }
    }

    /// Number of hosts across both groups
    #[must_use]
    pub fn host_count(&self) -> usize {
        self.containers.hosts.len() + self.virtual_machines.hosts.len()
    }

    /// Render as pretty JSON with a trailing newline
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        to_pretty_json(self)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

/// The `_meta` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryMeta {
    pub hostvars: HostVars,
}

impl InventoryMeta {
    /// Hosts that have variables, minus excluded ones, sorted
    #[must_use]
    pub fn sorted_hosts(&self, exclusions: &ExclusionSet) -> Vec<String> {
        // BTreeMap keys are already in order
        self.hostvars
            .keys()
            .filter(|host| !exclusions.contains(host))
            .cloned()
            .collect()
    }

    /// Variables of one host, empty when the host has none
    #[must_use]
    pub fn host_vars(&self, host: &str) -> BTreeMap<String, String> {
        self.hostvars.get(host).cloned().unwrap_or_default()
    }
}

/// The `all` group, which only lists child groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllGroup {
    pub children: Vec<String>,
}

/// A group of hosts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGroup {
    pub hosts: Vec<String>,
}

/// Serialize with three-space indentation and a trailing newline
///
/// # Errors
/// Returns an error if `value` fails to serialize.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_inventory_is_empty() {
        let inventory = Inventory::new();
        assert_eq!(inventory.all.children, vec!["containers", "virtual_machines"]);
        assert!(inventory.meta.hostvars.is_empty());
        assert_eq!(inventory.host_count(), 0);
    }

    #[test]
    fn test_empty_document_layout() {
        let json = Inventory::new().to_json_pretty().unwrap();
        let expected = r#"{
   "_meta": {
      "hostvars": {}
   },
   "all": {
      "children": [
         "containers",
         "virtual_machines"
      ]
   },
   "containers": {
      "hosts": []
   },
   "virtual_machines": {
      "hosts": []
   }
}
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_group_access_by_kind() {
        let mut inventory = Inventory::new();
        inventory
            .group_mut(GuestKind::VirtualMachine)
            .hosts
            .push("web1".to_string());
        inventory
            .group_mut(GuestKind::Container)
            .hosts
            .push("db1".to_string());

        assert_eq!(inventory.virtual_machines.hosts, vec!["web1"]);
        assert_eq!(inventory.group(GuestKind::Container).hosts, vec!["db1"]);
        assert_eq!(inventory.host_count(), 2);
    }

    #[test]
    fn test_serialization_is_stable() {
        let mut inventory = Inventory::new();
        inventory.virtual_machines.hosts = vec!["b".into(), "a".into()];
        inventory
            .meta
            .hostvars
            .insert("a".into(), BTreeMap::from([("x".into(), "1".into())]));

        let first = inventory.to_json_pretty().unwrap();
        let second = inventory.clone().to_json_pretty().unwrap();
        assert_eq!(first, second);
        assert!(first.ends_with("}\n"));
    }

    #[test]
    fn test_sorted_hosts() {
        let mut meta = InventoryMeta::default();
        for host in ["web2", "db1", "web1", "app1"] {
            meta.hostvars.insert(host.to_string(), BTreeMap::new());
        }

        let hosts = meta.sorted_hosts(&ExclusionSet::new(["web1"]));
        assert_eq!(hosts, vec!["app1", "db1", "web2"]);

        let all = meta.sorted_hosts(&ExclusionSet::default());
        let mut expected = all.clone();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_host_vars() {
        let mut meta = InventoryMeta::default();
        meta.hostvars.insert(
            "web1".into(),
            BTreeMap::from([("ansible_host".into(), "10.0.0.5".into())]),
        );

        assert_eq!(meta.host_vars("web1")["ansible_host"], "10.0.0.5");
        assert!(meta.host_vars("db1").is_empty());
    }
}
