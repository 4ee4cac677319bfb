// Copyright (c) 2025 - Cowboy AI, Inc.
//! Strongly-typed hardware and network primitives
//!
//! This crate provides validated value objects for describing the machines a
//! test infrastructure manages: PCI identifiers, devices and addresses, MAC
//! and IP addresses, operating system classification, and the string
//! conversion helpers firmware tooling expects.
//!
//! # Examples
//!
//! ```rust
//! use cim_typing::{PciAddress, PciDevice};
//!
//! let address: PciAddress = "0000:5e:00.1".parse().unwrap();
//! assert_eq!(address.sbdf(), "00:094:00:01");
//!
//! let device = PciDevice::parse("8086:1592").unwrap();
//! assert_eq!(device.to_string(), "8086:1592");
//! ```

pub mod errors;
pub mod network;
pub mod os;
pub mod pci;
pub mod raw;
pub mod utils;

// Re-export commonly used types
pub use errors::{TypingError, TypingResult};
pub use network::{InterfaceType, IpInterface, MacAddress, MacDialect, NetworkError};
pub use os::{IpuHostType, OsBitness, OsName, OsType, OsValueError, WindowsFlavour};
pub use pci::{
    DeviceId, PciAddress, PciDevice, PciError, PciId, PciIdKind, PciResult, SubDeviceId,
    SubVendorId, VendorId,
};
pub use raw::RawValue;
pub use utils::ConversionError;
