// Copyright (c) 2025 - Cowboy AI, Inc.
//! PCI Device (make/model) Value Object

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::str::FromStr;

use super::{
    DeviceId, IdKind, PciError, PciId, PciResult, SubDeviceId, SubVendorId, VendorId,
};
use crate::raw::RawValue;

/// PCI device identity: vendor and device IDs plus optional subsystem IDs
///
/// Invariants:
/// - Vendor and device IDs always present
/// - Immutable after construction
///
/// Equality is lenient about subsystem IDs: a sub-id takes part in the
/// comparison only when both sides carry it. This relation is not transitive,
/// which is why `PciDevice` implements `PartialEq` but neither `Eq` nor `Hash`.
///
/// # Examples
///
/// ```rust
/// use cim_typing::pci::{DeviceId, PciDevice, VendorId};
///
/// let device: PciDevice = "ffff:001A".parse().unwrap();
/// assert_eq!(device, PciDevice::new(VendorId::new(0xFFFF), DeviceId::new(0x001A)));
///
/// let full: PciDevice = "8086:1572:8086:0000".parse().unwrap();
/// assert_eq!(full, PciDevice::new(VendorId::new(0x8086), DeviceId::new(0x1572)));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PciDevice {
    vendor_id: VendorId,
    device_id: DeviceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_vendor_id: Option<SubVendorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_device_id: Option<SubDeviceId>,
}

impl PciDevice {
    /// Create a device without subsystem IDs
    pub fn new(vendor_id: VendorId, device_id: DeviceId) -> Self {
        Self::with_subsystem(vendor_id, device_id, None, None)
    }

    /// Create a device with (some of) its subsystem IDs
    pub fn with_subsystem(
        vendor_id: VendorId,
        device_id: DeviceId,
        sub_vendor_id: Option<SubVendorId>,
        sub_device_id: Option<SubDeviceId>,
    ) -> Self {
        Self {
            vendor_id,
            device_id,
            sub_vendor_id,
            sub_device_id,
        }
    }

    /// Create a device from loosely-typed parts
    ///
    /// # Errors
    /// - `MissingData` when vendor or device is absent
    /// - identifier errors for any part that fails to parse
    pub fn from_raw<'a>(
        vendor_id: impl Into<RawValue<'a>>,
        device_id: impl Into<RawValue<'a>>,
        sub_vendor_id: impl Into<RawValue<'a>>,
        sub_device_id: impl Into<RawValue<'a>>,
    ) -> PciResult<Self> {
        let (vendor_id, device_id) = (vendor_id.into(), device_id.into());
        if vendor_id.is_missing() || device_id.is_missing() {
            return Err(PciError::MissingData("vendor/device"));
        }

        Ok(Self {
            vendor_id: VendorId::parse(vendor_id)?,
            device_id: DeviceId::parse(device_id)?,
            sub_vendor_id: optional(sub_vendor_id.into())?,
            sub_device_id: optional(sub_device_id.into())?,
        })
    }

    /// Parse `vendor:device` or `vendor:device:subvendor:subdevice`
    pub fn parse(data: &str) -> PciResult<Self> {
        let data = data.trim();
        if data.is_empty() {
            return Err(PciError::MissingData("vendor/device"));
        }

        let tokens: Vec<&str> = data.split(':').collect();
        match tokens.as_slice() {
            [vendor, device] => Ok(Self::new(vendor.parse()?, device.parse()?)),
            [vendor, device, sub_vendor, sub_device] => Ok(Self::with_subsystem(
                vendor.parse()?,
                device.parse()?,
                Some(sub_vendor.parse()?),
                Some(sub_device.parse()?),
            )),
            _ => Err(PciError::InvalidFormat {
                what: "vendor data",
                input: data.to_string(),
            }),
        }
    }

    /// Get the vendor ID
    pub fn vendor_id(&self) -> VendorId {
        self.vendor_id
    }

    /// Get the device ID
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Get the subsystem vendor ID
    pub fn sub_vendor_id(&self) -> Option<SubVendorId> {
        self.sub_vendor_id
    }

    /// Get the subsystem device ID
    pub fn sub_device_id(&self) -> Option<SubDeviceId> {
        self.sub_device_id
    }

    /// Compare against a value of unknown type
    ///
    /// Anything other than a `PciDevice` is an error rather than `false`.
    pub fn try_eq(&self, other: &dyn Any) -> PciResult<bool> {
        other
            .downcast_ref::<Self>()
            .map(|device| self == device)
            .ok_or(PciError::Incomparable("PciDevice"))
    }
}

fn optional<K: IdKind>(raw: RawValue<'_>) -> PciResult<Option<PciId<K>>> {
    if raw.is_missing() {
        Ok(None)
    } else {
        PciId::parse(raw).map(Some)
    }
}

fn both_match<T: PartialEq>(left: Option<T>, right: Option<T>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => left == right,
        _ => true,
    }
}

impl PartialEq for PciDevice {
    fn eq(&self, other: &Self) -> bool {
        self.vendor_id == other.vendor_id
            && self.device_id == other.device_id
            && both_match(self.sub_vendor_id, other.sub_vendor_id)
            && both_match(self.sub_device_id, other.sub_device_id)
    }
}

impl fmt::Display for PciDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vendor_id, self.device_id)?;
        if let (Some(sub_vendor), Some(sub_device)) = (self.sub_vendor_id, self.sub_device_id) {
            write!(f, ":{}:{}", sub_vendor, sub_device)?;
        }
        Ok(())
    }
}

impl FromStr for PciDevice {
    type Err = PciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
