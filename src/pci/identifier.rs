// Copyright (c) 2025 - Cowboy AI, Inc.
//! PCI Vendor/Device Identifier Value Objects
//!
//! A PCI identifier is a 16-bit value whose meaning depends on its kind: a
//! vendor ID and a device ID holding the same number are different things.
//! [`PciId`] carries the kind as a type parameter so mismatched fields do not
//! compile, and equality across kinds is always `false`.
//!
//! # Examples
//!
//! ```rust
//! use cim_typing::pci::{DeviceId, VendorId};
//!
//! let vendor = VendorId::parse("8086").unwrap();
//! assert_eq!(vendor.to_string(), "8086");
//! assert_eq!(VendorId::new(0xAD).to_string(), "00AD");
//! assert!(vendor != DeviceId::new(0x8086));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use tracing::debug;

use super::{check_range, parse_hex, PciError, PciResult};
use crate::raw::RawValue;

/// Runtime tag of an identifier kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PciIdKind {
    /// Chip vendor
    Vendor,
    /// Chip model
    Device,
    /// Board (subsystem) vendor
    SubVendor,
    /// Board (subsystem) model
    SubDevice,
}

impl PciIdKind {
    /// Name of the identifier type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Vendor => "VendorId",
            Self::Device => "DeviceId",
            Self::SubVendor => "SubVendorId",
            Self::SubDevice => "SubDeviceId",
        }
    }

    /// Name of the field holding this kind in a [`PciDevice`](super::PciDevice)
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Vendor => "vendor_id",
            Self::Device => "device_id",
            Self::SubVendor => "sub_vendor_id",
            Self::SubDevice => "sub_device_id",
        }
    }
}

impl fmt::Display for PciIdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Marker trait tying a zero-sized kind type to its runtime tag
pub trait IdKind: 'static {
    /// Runtime tag of the kind
    const KIND: PciIdKind;
}

/// Vendor identifier kind
#[derive(Debug)]
pub enum Vendor {}

/// Device identifier kind
#[derive(Debug)]
pub enum Device {}

/// Subsystem vendor identifier kind
#[derive(Debug)]
pub enum SubVendor {}

/// Subsystem device identifier kind
#[derive(Debug)]
pub enum SubDevice {}

impl IdKind for Vendor {
    const KIND: PciIdKind = PciIdKind::Vendor;
}

impl IdKind for Device {
    const KIND: PciIdKind = PciIdKind::Device;
}

impl IdKind for SubVendor {
    const KIND: PciIdKind = PciIdKind::SubVendor;
}

impl IdKind for SubDevice {
    const KIND: PciIdKind = PciIdKind::SubDevice;
}

/// PCI vendor ID
pub type VendorId = PciId<Vendor>;

/// PCI device ID
pub type DeviceId = PciId<Device>;

/// PCI subsystem vendor ID
pub type SubVendorId = PciId<SubVendor>;

/// PCI subsystem device ID
pub type SubDeviceId = PciId<SubDevice>;

/// 16-bit PCI identifier of kind `K`
///
/// Invariants:
/// - Value within 0..=0xFFFF
/// - Equal only to identifiers of the same kind and value
/// - Hash depends on the value alone
pub struct PciId<K: IdKind> {
    value: u16,
    kind: PhantomData<fn() -> K>,
}

impl<K: IdKind> PciId<K> {
    /// Largest identifier value
    pub const MAX: u16 = u16::MAX;

    /// Create an identifier from a 16-bit value
    pub const fn new(value: u16) -> Self {
        Self {
            value,
            kind: PhantomData,
        }
    }

    /// Create an identifier from loosely-typed input
    ///
    /// Integers are range checked, strings are read as hexadecimal (an optional
    /// `0x` prefix and surrounding whitespace are allowed). Anything else,
    /// including absent input, is a type error.
    pub fn parse<'a>(input: impl Into<RawValue<'a>>) -> PciResult<Self> {
        match input.into() {
            RawValue::Int(value) => Self::from_int(value),
            RawValue::Text(text) => Self::from_hex(text),
            other => {
                debug!(
                    kind = K::KIND.type_name(),
                    found = other.type_name(),
                    "rejected identifier input"
                );
                Err(PciError::InvalidType {
                    target: K::KIND.type_name(),
                    expected: "integer or hexadecimal string",
                    found: other.type_name(),
                })
            }
        }
    }

    fn from_int(value: i128) -> PciResult<Self> {
        let checked = check_range(K::KIND.field_name(), value, u64::from(Self::MAX))?;
        Ok(Self::new(checked as u16))
    }

    fn from_hex(text: &str) -> PciResult<Self> {
        let token = text.trim();
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);

        let value = parse_hex(digits, K::KIND.field_name()).map_err(|_| {
            PciError::InvalidFormat {
                what: K::KIND.field_name(),
                input: text.to_string(),
            }
        })?;

        Self::from_int(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Get the kind of this identifier
    pub fn kind(&self) -> PciIdKind {
        K::KIND
    }
}

impl<K: IdKind> Clone for PciId<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: IdKind> Copy for PciId<K> {}

impl<K: IdKind, L: IdKind> PartialEq<PciId<L>> for PciId<K> {
    fn eq(&self, other: &PciId<L>) -> bool {
        K::KIND == L::KIND && self.value == other.value
    }
}

impl<K: IdKind> Eq for PciId<K> {}

impl<K: IdKind> PartialOrd for PciId<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: IdKind> Ord for PciId<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<K: IdKind> Hash for PciId<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<K: IdKind> fmt::Display for PciId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.value)
    }
}

impl<K: IdKind> fmt::Debug for PciId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(K::KIND.type_name())
            .field(&self.to_string())
            .finish()
    }
}

impl<K: IdKind> From<u16> for PciId<K> {
    fn from(value: u16) -> Self {
        Self::new(value)
    }
}

impl<K: IdKind> From<PciId<K>> for u16 {
    fn from(id: PciId<K>) -> Self {
        id.value
    }
}

impl<K: IdKind> TryFrom<i64> for PciId<K> {
    type Error = PciError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_int(i128::from(value))
    }
}

impl<K: IdKind> FromStr for PciId<K> {
    type Err = PciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl<K: IdKind> Serialize for PciId<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, K: IdKind> Deserialize<'de> for PciId<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Text(String),
        }

        let parsed = match Repr::deserialize(deserializer)? {
            Repr::Int(value) => Self::try_from(value),
            Repr::Text(text) => text.parse(),
        };

        parsed.map_err(serde::de::Error::custom)
    }
}
