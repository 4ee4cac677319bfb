// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects with Validation Invariants
//!
//! - [`MacAddress`] - 48-bit MAC address with dialect-driven rendering
//! - [`IpInterface`] - IPv4/IPv6 address with prefix length or netmask
//! - [`InterfaceType`] - role of a network interface on a host

pub mod interface;
pub mod ip;
pub mod mac;

pub use interface::InterfaceType;
pub use ip::IpInterface;
pub use mac::{MacAddress, MacDialect};

use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: {0} (must be 0-32 for IPv4, 0-128 for IPv6)")]
    InvalidPrefixLength(u8),

    #[error("Invalid netmask: {0}")]
    InvalidNetmask(String),

    #[error("Invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("MAC address value out of range: {0:#x} (must fit in 48 bits)")]
    MacOutOfRange(u64),

    #[error("Invalid MAC address prefix: {0} (must be 1-5 octets)")]
    InvalidMacPrefix(String),
}
