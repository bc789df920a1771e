//! CIDR block arithmetic
//!
//! Provides the [`Network`] type, an IPv4 address paired with a prefix length,
//! and everything derived from it:
//! - Parse CIDR notation (e.g., "192.168.1.141/26")
//! - Mask, wildcard, network and broadcast address
//! - Usable host range and address counts
//! - Next contiguous block of the same size
//!
//! Nothing is cached: every query is recomputed from the stored address and
//! prefix, and the stored address is re-masked each time, so a network built
//! from a host address still reports the correct block boundaries.
//!
//! # Examples
//!
//! ```
//! use subcalc_cidr::{Address, Network};
//!
//! let net = Network::parse("192.168.1.141/26").unwrap();
//! assert_eq!(net.mask_address(), Address::from_octets(255, 255, 255, 192));
//! assert_eq!(net.network_address(), Address::from_octets(192, 168, 1, 128));
//! assert_eq!(net.broadcast_address(), Address::from_octets(192, 168, 1, 191));
//! assert_eq!(net.usable_hosts(), 62);
//! assert_eq!(net.next_subnet().to_string(), "192.168.1.192/26");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use subcalc_core::{Address, ParseError, Result};

mod iter;
mod summary;

pub use iter::{NetworkAddresses, Subnets};
pub use summary::Summary;

/// Longest valid prefix length
pub const MAX_PREFIX: u8 = 32;

/// CIDR block representation
///
/// The stored address may be any address inside the block. Ordering compares
/// the stored address first, then the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    address: Address,
    prefix: u8,
}

/// Unchecked wire shape, validated through [`Network::new`]
#[derive(Deserialize)]
struct RawNetwork {
    address: Address,
    prefix: u8,
}

impl TryFrom<RawNetwork> for Network {
    type Error = ParseError;

    fn try_from(raw: RawNetwork) -> Result<Self> {
        Self::new(raw.address, raw.prefix)
    }
}

impl Network {
    /// Create a network from an address and a prefix length
    ///
    /// The address is kept as given; it is not forced onto the block boundary.
    ///
    /// # Arguments
    ///
    /// * `address` - Any address in the block
    /// * `prefix` - Prefix length (0-32)
    pub fn new(address: Address, prefix: u8) -> Result<Self> {
        if prefix > MAX_PREFIX {
            return Err(ParseError::PrefixOutOfRange(prefix.to_string()));
        }

        Ok(Self { address, prefix })
    }

    /// Parse CIDR notation string
    ///
    /// # Arguments
    ///
    /// * `text` - CIDR string (e.g., "10.1.2.3/8")
    ///
    /// # Examples
    ///
    /// ```
    /// use subcalc_cidr::{Network, ParseError};
    ///
    /// let net = Network::parse("10.1.2.3/8").unwrap();
    /// assert_eq!(net.prefix(), 8);
    ///
    /// assert!(matches!(Network::parse("10.0.0.0/33"), Err(ParseError::PrefixOutOfRange(_))));
    /// assert!(matches!(Network::parse("10.0.0.0"), Err(ParseError::MalformedNetwork(_))));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        match Self::parse_parts(text) {
            Ok(network) => Ok(network),
            Err(err) => {
                tracing::trace!(input = text, %err, "rejected network");
                Err(err)
            }
        }
    }

    fn parse_parts(text: &str) -> Result<Self> {
        let malformed = |reason: &str| ParseError::MalformedNetwork(format!("{:?}: {}", text, reason));

        let (address_part, prefix_part) = text
            .split_once('/')
            .ok_or_else(|| malformed("expected format a.b.c.d/prefix"))?;

        if prefix_part.contains('/') {
            return Err(malformed("more than one '/'"));
        }
        if address_part.is_empty() {
            return Err(malformed("empty address"));
        }
        if prefix_part.is_empty() {
            return Err(malformed("empty prefix"));
        }

        let address = Address::parse(address_part).map_err(|err| malformed(&err.to_string()))?;
        let prefix = parse_prefix(prefix_part)?;

        Ok(Self { address, prefix })
    }

    /// The address this network was built from
    pub fn address(&self) -> Address {
        self.address
    }

    /// Prefix length (0-32)
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Network mask: the leading `prefix` bits set
    pub const fn mask(&self) -> u32 {
        match self.prefix {
            0 => 0,
            p if p >= MAX_PREFIX => u32::MAX,
            // shift is in 1..=31 here
            p => u32::MAX << (MAX_PREFIX - p),
        }
    }

    /// Bitwise complement of [`Network::mask`]
    pub const fn wildcard(&self) -> u32 {
        !self.mask()
    }

    /// Mask as a dotted address (e.g. 255.255.255.192)
    pub fn mask_address(&self) -> Address {
        Address::from_u32(self.mask())
    }

    /// Wildcard as a dotted address (e.g. 0.0.0.63)
    pub fn wildcard_address(&self) -> Address {
        Address::from_u32(self.wildcard())
    }

    /// First address of the block, all host bits clear
    pub fn network_address(&self) -> Address {
        Address::from_u32(self.address.to_u32() & self.mask())
    }

    /// Last address of the block, all host bits set
    pub fn broadcast_address(&self) -> Address {
        Address::from_u32(self.network_address().to_u32() | self.wildcard())
    }

    /// Number of addresses in the block
    ///
    /// A /0 block holds 2^32 addresses, which does not fit in a `u32`; it
    /// reports `u32::MAX` instead.
    pub const fn total_addresses(&self) -> u32 {
        match self.prefix {
            0 => u32::MAX,
            p if p >= MAX_PREFIX => 1,
            p => 1 << (MAX_PREFIX - p),
        }
    }

    /// Addresses excluding network and broadcast; zero for /31 and /32
    pub const fn usable_hosts(&self) -> u32 {
        if self.prefix >= 31 {
            return 0;
        }
        self.total_addresses().saturating_sub(2)
    }

    /// First usable host (the network address itself for /31 and /32)
    pub fn first_host(&self) -> Address {
        let network = self.network_address();
        if self.prefix >= 31 {
            network
        } else {
            Address::from_u32(network.to_u32() + 1)
        }
    }

    /// Last usable host (the broadcast address itself for /31 and /32)
    pub fn last_host(&self) -> Address {
        let broadcast = self.broadcast_address();
        if self.prefix >= 31 {
            broadcast
        } else {
            Address::from_u32(broadcast.to_u32() - 1)
        }
    }

    /// The adjacent block of the same size
    ///
    /// Advancing past `255.255.255.255` wraps modulo 2^32, so the block after
    /// `255.255.255.0/24` is `0.0.0.0/24`. Use [`Network::subnets`] for an
    /// enumeration that stops at the top of the address space instead.
    pub fn next_subnet(&self) -> Network {
        let next = self
            .network_address()
            .to_u32()
            .wrapping_add(self.total_addresses());

        Self {
            address: Address::from_u32(next),
            prefix: self.prefix,
        }
    }

    /// Check if an address falls inside this block
    pub fn contains(&self, address: Address) -> bool {
        address.to_u32() & self.mask() == self.network_address().to_u32()
    }

    /// Iterator over every address from network to broadcast, inclusive
    ///
    /// Note: For large blocks (e.g., /8), this may be very slow.
    /// Consider using contains() or checking ranges instead.
    pub fn addresses(&self) -> NetworkAddresses {
        NetworkAddresses::new(*self)
    }

    /// Iterator over this block and the contiguous blocks after it
    ///
    /// Stops after the block ending at `255.255.255.255`.
    pub fn subnets(&self) -> Subnets {
        Subnets::new(*self)
    }

    /// Snapshot of every derived field
    pub fn summary(&self) -> Summary {
        Summary::new(self)
    }
}

fn parse_prefix(text: &str) -> Result<u8> {
    let out_of_range = || ParseError::PrefixOutOfRange(format!("{:?}", text));

    if text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(out_of_range());
    }

    let prefix = text.bytes().fold(0u8, |acc, b| acc * 10 + (b - b'0'));
    if prefix > MAX_PREFIX {
        return Err(out_of_range());
    }

    Ok(prefix)
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

impl FromStr for Network {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
