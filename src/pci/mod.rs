// Copyright (c) 2025 - Cowboy AI, Inc.
//! PCI Value Objects with Validation Invariants
//!
//! Strongly-typed primitives for identifying PCI hardware:
//!
//! - [`PciId`] - 16-bit vendor/device identifiers scoped to their kind
//!   ([`VendorId`], [`DeviceId`], [`SubVendorId`], [`SubDeviceId`])
//! - [`PciDevice`] - make/model quad with partial sub-id equality
//! - [`PciAddress`] - bus topology location with lspci, sbdf, pciconf and
//!   nvmcheck renderings
//!
//! All values are validated once at construction and are immutable afterwards.

pub mod address;
pub mod device;
pub mod identifier;

pub use address::PciAddress;
pub use device::PciDevice;
pub use identifier::{
    Device, DeviceId, IdKind, PciId, PciIdKind, SubDevice, SubDeviceId, SubVendor, SubVendorId,
    Vendor, VendorId,
};

use thiserror::Error;

/// PCI validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PciError {
    /// Numeric field outside of its allowed range
    #[error("Invalid {field}: {value} (must be 0-{max:#x})")]
    OutOfRange {
        field: &'static str,
        value: i128,
        max: u64,
    },

    /// Text does not match any recognized notation
    #[error("Invalid {what} format: {input:?}")]
    InvalidFormat { what: &'static str, input: String },

    /// Required field absent (distinct from zero)
    #[error("Missing {0} data")]
    MissingData(&'static str),

    /// Input of a kind the constructor does not accept
    #[error("Invalid input type for {target}: expected {expected}, got {found}")]
    InvalidType {
        target: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// Comparison against an unrelated type
    #[error("Incorrect object passed for comparison with {0}")]
    Incomparable(&'static str),
}

/// Result type for PCI value construction
pub type PciResult<T> = Result<T, PciError>;

/// Parse a bare hexadecimal token
///
/// Only ASCII hex digits are accepted. Values too large for `i128` saturate so
/// the caller's range check reports them.
pub(crate) fn parse_hex(token: &str, what: &'static str) -> PciResult<i128> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PciError::InvalidFormat {
            what,
            input: token.to_string(),
        });
    }

    Ok(i128::from_str_radix(token, 16).unwrap_or(i128::MAX))
}

/// Check `value` lies within `0..=max`
pub(crate) fn check_range(field: &'static str, value: i128, max: u64) -> PciResult<u64> {
    match u64::try_from(value) {
        Ok(checked) if checked <= max => Ok(checked),
        _ => Err(PciError::OutOfRange { field, value, max }),
    }
}
