use serde::Serialize;

use crate::{Address, Network};

/// Every derived property of a [`Network`], computed once
///
/// Flat so it serializes to a single JSON object or CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub cidr: String,
    pub address: Address,
    pub address_binary: String,
    pub prefix: u8,
    pub mask: Address,
    pub mask_binary: String,
    pub wildcard: Address,
    pub network_address: Address,
    pub broadcast_address: Address,
    pub first_host: Address,
    pub last_host: Address,
    pub total_addresses: u32,
    pub usable_hosts: u32,
    pub next_subnet: String,
}

impl Summary {
    pub(crate) fn new(network: &Network) -> Self {
        let mask = network.mask_address();

        Self {
            cidr: network.to_string(),
            address: network.address(),
            address_binary: network.address().to_binary_string(),
            prefix: network.prefix(),
            mask,
            mask_binary: mask.to_binary_string(),
            wildcard: network.wildcard_address(),
            network_address: network.network_address(),
            broadcast_address: network.broadcast_address(),
            first_host: network.first_host(),
            last_host: network.last_host(),
            total_addresses: network.total_addresses(),
            usable_hosts: network.usable_hosts(),
            next_subnet: network.next_subnet().to_string(),
        }
    }

    /// Labelled, rendered fields in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Network", self.cidr.clone()),
            ("Address", self.address.to_string()),
            ("Binary", self.address_binary.clone()),
            ("Prefix", format!("/{}", self.prefix)),
            ("Mask", self.mask.to_string()),
            ("Mask binary", self.mask_binary.clone()),
            ("Wildcard", self.wildcard.to_string()),
            ("Network addr", self.network_address.to_string()),
            ("Broadcast", self.broadcast_address.to_string()),
            ("First host", self.first_host.to_string()),
            ("Last host", self.last_host.to_string()),
            ("Total addrs", self.total_addresses.to_string()),
            ("Usable hosts", self.usable_hosts.to_string()),
            ("Next subnet", self.next_subnet.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_fields() {
        let summary = Network::parse("192.168.1.141/26").unwrap().summary();
        assert_eq!(summary.cidr, "192.168.1.141/26");
        assert_eq!(summary.mask.to_string(), "255.255.255.192");
        assert_eq!(summary.mask_binary, "11111111.11111111.11111111.11000000");
        assert_eq!(summary.wildcard.to_string(), "0.0.0.63");
        assert_eq!(summary.network_address.to_string(), "192.168.1.128");
        assert_eq!(summary.broadcast_address.to_string(), "192.168.1.191");
        assert_eq!(summary.first_host.to_string(), "192.168.1.129");
        assert_eq!(summary.last_host.to_string(), "192.168.1.190");
        assert_eq!(summary.total_addresses, 64);
        assert_eq!(summary.usable_hosts, 62);
        assert_eq!(summary.next_subnet, "192.168.1.192/26");
    }

    #[test]
    fn test_summary_rows() {
        let rows = Network::parse("10.0.0.0/30").unwrap().summary().rows();
        assert_eq!(rows.len(), 14);
        assert_eq!(rows[0], ("Network", "10.0.0.0/30".to_string()));
        assert!(rows.contains(&("Usable hosts", "2".to_string())));
    }

    #[test]
    fn test_summary_serialization() {
        let summary = Network::parse("10.0.0.0/8").unwrap().summary();
        let json = serde_json::to_string(&summary).expect("serialization failed");
        assert!(json.contains(r#""broadcast_address":"10.255.255.255""#));
        assert!(json.contains(r#""total_addresses":16777216"#));
    }
}
