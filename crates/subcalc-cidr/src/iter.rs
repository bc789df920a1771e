use crate::{Address, Network};

/// Iterator over addresses in a CIDR block
///
/// Counts in `u64` so blocks ending at `255.255.255.255` (including /0)
/// terminate instead of wrapping.
pub struct NetworkAddresses {
    current: u64,
    end: u64,
}

impl NetworkAddresses {
    pub(crate) fn new(network: Network) -> Self {
        let start = network.network_address().to_u32() as u64;
        let end = network.broadcast_address().to_u32() as u64;

        Self {
            current: start,
            end,
        }
    }
}

impl Iterator for NetworkAddresses {
    type Item = Address;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current <= self.end {
            let ip = Address::from_u32(self.current as u32);
            self.current += 1;
            Some(ip)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end + 1).saturating_sub(self.current);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Iterator over contiguous blocks of one prefix length
///
/// Each item is normalized to its network address. Ends after the block that
/// contains `255.255.255.255`.
pub struct Subnets {
    next: Option<Network>,
}

impl Subnets {
    pub(crate) fn new(start: Network) -> Self {
        Self {
            next: Some(Network {
                address: start.network_address(),
                prefix: start.prefix(),
            }),
        }
    }
}

impl Iterator for Subnets {
    type Item = Network;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current.broadcast_address() != Address::BROADCAST {
            self.next = Some(current.next_subnet());
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses_small() {
        let net = Network::parse("192.168.1.0/30").unwrap(); // 4 IPs
        let ips: Vec<Address> = net.addresses().collect();
        assert_eq!(ips.len(), 4);
        assert_eq!(ips[0], Address::from_octets(192, 168, 1, 0));
        assert_eq!(ips[3], Address::from_octets(192, 168, 1, 3));
    }

    #[test]
    fn test_addresses_from_host_address() {
        let net = Network::parse("192.168.1.6/29").unwrap();
        let first = net.addresses().next().unwrap();
        assert_eq!(first, Address::from_octets(192, 168, 1, 0));
        assert_eq!(net.addresses().count(), 8);
    }

    #[test]
    fn test_addresses_top_of_space() {
        let net = Network::parse("255.255.255.252/30").unwrap();
        let ips: Vec<Address> = net.addresses().collect();
        assert_eq!(ips.len(), 4);
        assert_eq!(ips[3], Address::BROADCAST);
    }

    #[test]
    fn test_addresses_size_hint() {
        let net = Network::parse("10.0.0.0/24").unwrap();
        let mut iter = net.addresses();
        assert_eq!(iter.size_hint(), (256, Some(256)));
        iter.next();
        assert_eq!(iter.size_hint(), (255, Some(255)));
    }

    #[test]
    fn test_subnets_contiguous() {
        let start = Network::parse("10.0.0.77/26").unwrap();
        let blocks: Vec<String> = start.subnets().take(3).map(|n| n.to_string()).collect();
        assert_eq!(blocks, ["10.0.0.64/26", "10.0.0.128/26", "10.0.0.192/26"]);
    }

    #[test]
    fn test_subnets_stop_at_top() {
        let start = Network::parse("255.255.254.0/24").unwrap();
        let blocks: Vec<Network> = start.subnets().collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].to_string(), "255.255.255.0/24");
    }

    #[test]
    fn test_subnets_slash_0() {
        let blocks: Vec<Network> = Network::parse("1.2.3.4/0").unwrap().subnets().collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].to_string(), "0.0.0.0/0");
    }
}
