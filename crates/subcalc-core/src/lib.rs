//! Core types for subcalc (IPv4 subnet calculator)
//!
//! This crate provides the foundational types used throughout the subcalc workspace:
//! - [`Address`] - A single IPv4 address
//! - [`ParseError`] - Error type shared by every text parser
//!
//! ```
//! use subcalc_core::Address;
//!
//! let ip = Address::parse("192.168.1.141").unwrap();
//! assert_eq!(ip.to_u32(), 0xC0A8018D);
//! assert_eq!(ip.to_binary_string(), "11000000.10101000.00000001.10001101");
//! ```

use thiserror::Error;

pub mod address;

pub use address::Address;

/// Error types for parsing addresses and networks
///
/// Every variant is an input-validation failure; the payload describes the
/// rejected text and the reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Wrong segment count, empty or over-long segment, non-digit or octet above 255
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    /// Missing or duplicate `/`, empty part, or an address part that fails to parse
    #[error("Malformed network: {0}")]
    MalformedNetwork(String),

    /// Prefix is not a 1-2 digit decimal number in 0-32
    #[error("Prefix out of range: {0} (must be 0-32)")]
    PrefixOutOfRange(String),
}

/// Result type alias for subcalc parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
