//! IPv4 address value type
//!
//! An [`Address`] is four octets, most significant first. Its integer form is
//! always the big-endian packing of those octets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::{ParseError, Result};

/// IPv4 address
///
/// Ordering is lexicographic by octet, which is the numeric order of
/// [`Address::to_u32`].
///
/// # Examples
///
/// ```
/// use subcalc_core::Address;
///
/// let a = Address::from_octets(10, 0, 0, 1);
/// let b = Address::from_u32(0x0A000002);
/// assert!(a < b);
/// assert_eq!(a.to_string(), "10.0.0.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    octets: [u8; 4],
}

impl Address {
    /// `0.0.0.0`
    pub const UNSPECIFIED: Self = Self::from_octets(0, 0, 0, 0);

    /// `255.255.255.255`
    pub const BROADCAST: Self = Self::from_octets(255, 255, 255, 255);

    /// Assemble an address from its four octets in order
    pub const fn from_octets(o0: u8, o1: u8, o2: u8, o3: u8) -> Self {
        Self {
            octets: [o0, o1, o2, o3],
        }
    }

    /// Unpack a big-endian 32-bit value
    pub const fn from_u32(value: u32) -> Self {
        Self {
            octets: value.to_be_bytes(),
        }
    }

    /// Parse dotted-decimal text
    ///
    /// Requires exactly four `.`-separated segments of 1-3 ASCII digits, each
    /// with a value in 0-255. Nothing is clamped: any other shape fails with
    /// [`ParseError::MalformedAddress`].
    ///
    /// # Examples
    ///
    /// ```
    /// use subcalc_core::Address;
    ///
    /// assert!(Address::parse("192.168.1.141").is_ok());
    /// assert!(Address::parse("256.1.1.1").is_err());
    /// assert!(Address::parse("1..2.3").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        match parse_octets(text) {
            Ok(octets) => Ok(Self { octets }),
            Err(reason) => {
                tracing::trace!(input = text, %reason, "rejected address");
                Err(ParseError::MalformedAddress(format!("{:?}: {}", text, reason)))
            }
        }
    }

    /// Pack the octets big-endian
    pub const fn to_u32(&self) -> u32 {
        u32::from_be_bytes(self.octets)
    }

    /// The four octets, most significant first
    pub const fn octets(&self) -> [u8; 4] {
        self.octets
    }

    /// Render every octet as 8 bits, MSB first, dot-separated
    ///
    /// The result is always 35 characters long.
    pub fn to_binary_string(&self) -> String {
        let [a, b, c, d] = self.octets;
        format!("{:08b}.{:08b}.{:08b}.{:08b}", a, b, c, d)
    }
}

fn parse_octets(text: &str) -> std::result::Result<[u8; 4], String> {
    let mut octets = [0u8; 4];
    let mut segments = text.split('.');

    for (i, slot) in octets.iter_mut().enumerate() {
        let segment = segments
            .next()
            .ok_or_else(|| format!("expected 4 octets, found {}", i))?;
        *slot = parse_octet(segment)?;
    }

    if segments.next().is_some() {
        return Err("expected 4 octets, found more".to_string());
    }

    Ok(octets)
}

fn parse_octet(segment: &str) -> std::result::Result<u8, String> {
    if segment.is_empty() {
        return Err("empty octet".to_string());
    }
    if segment.len() > 3 {
        return Err(format!("octet {:?} longer than 3 digits", segment));
    }
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("octet {:?} is not a decimal number", segment));
    }

    let value = segment
        .bytes()
        .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));

    u8::try_from(value).map_err(|_| format!("octet {} out of range 0-255", value))
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl From<Address> for u32 {
    fn from(value: Address) -> Self {
        value.to_u32()
    }
}

impl From<[u8; 4]> for Address {
    fn from(octets: [u8; 4]) -> Self {
        Self { octets }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(value: Ipv4Addr) -> Self {
        Self {
            octets: value.octets(),
        }
    }
}

impl From<Address> for Ipv4Addr {
    fn from(value: Address) -> Self {
        Ipv4Addr::from(value.octets)
    }
}
