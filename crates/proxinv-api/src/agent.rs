//! QEMU guest agent types from `/nodes/{node}/qemu/{vmid}/agent/network-get-interfaces`

use serde::{Deserialize, Serialize};

/// Payload of the agent `network-get-interfaces` call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentNetworkInterfaces {
    #[serde(default)]
    pub result: Vec<AgentInterface>,
}

/// A network interface as seen from inside the guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentInterface {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_address: Option<String>,
    #[serde(default)]
    pub ip_addresses: Vec<AgentIpAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<AgentInterfaceStatistics>,
}

/// An address assigned to a guest interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentIpAddress {
    pub ip_address: String,
    /// "ipv4" or "ipv6"
    pub ip_address_type: String,
    pub prefix: u8,
}

/// Interface counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AgentInterfaceStatistics {
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub rx_errs: u64,
    pub rx_dropped: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
    pub tx_errs: u64,
    pub tx_dropped: u64,
}

impl AgentNetworkInterfaces {
    /// Addresses of every interface except loopback, in reported order
    #[must_use]
    pub fn addresses(&self) -> Vec<&AgentIpAddress> {
        self.result
            .iter()
            .filter(|iface| iface.name != "lo")
            .flat_map(|iface| iface.ip_addresses.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiResponse;

    #[test]
    fn test_decode_agent_interfaces() {
        let body = r#"{"data":{"result":[
            {"name":"lo","hardware-address":"00:00:00:00:00:00",
             "ip-addresses":[{"ip-address":"127.0.0.1","ip-address-type":"ipv4","prefix":8}]},
            {"name":"eth0","hardware-address":"bc:24:11:00:00:01",
             "ip-addresses":[
                {"ip-address":"192.168.1.20","ip-address-type":"ipv4","prefix":24},
                {"ip-address":"fe80::be24:11ff:fe00:1","ip-address-type":"ipv6","prefix":64}],
             "statistics":{"rx-bytes":1024,"tx-bytes":2048,"rx-packets":8,"tx-packets":16,
                           "rx-errs":0,"tx-errs":0,"rx-dropped":0,"tx-dropped":0}}
        ]}}"#;

        let interfaces: AgentNetworkInterfaces = serde_json::from_str::<ApiResponse<_>>(body)
            .unwrap()
            .into_data();

        assert_eq!(interfaces.result.len(), 2);
        let addresses: Vec<&str> = interfaces
            .addresses()
            .iter()
            .map(|a| a.ip_address.as_str())
            .collect();
        assert_eq!(addresses, vec!["192.168.1.20", "fe80::be24:11ff:fe00:1"]);
        let stats = interfaces.result[1].statistics.as_ref().unwrap();
        assert_eq!(stats.tx_bytes, 2048);
    }
}
