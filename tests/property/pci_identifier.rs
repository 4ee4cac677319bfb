// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for PCI Identifiers and Devices

use cim_typing::{DeviceId, PciDevice, SubDeviceId, SubVendorId, VendorId};
use proptest::prelude::*;

proptest! {
    /// Property: rendered identifiers parse back to the same value
    #[test]
    fn prop_identifier_display_round_trip(value in any::<u16>()) {
        let id = VendorId::new(value);
        let rendered = id.to_string();

        prop_assert_eq!(rendered.len(), 4);
        prop_assert_eq!(VendorId::parse(rendered.as_str()), Ok(id));
        prop_assert_eq!(VendorId::parse(format!("0x{rendered}").as_str()), Ok(id));
    }

    /// Property: integer input outside 16 bits is rejected
    #[test]
    fn prop_identifier_range(value in 0x1_0000i64..) {
        prop_assert!(DeviceId::parse(value).is_err());
    }

    /// Property: a device without sub-ids matches every subsystem variant
    #[test]
    fn prop_device_partial_equality(
        vendor in any::<u16>(),
        device in any::<u16>(),
        sub_vendor in any::<u16>(),
        sub_device in any::<u16>(),
    ) {
        let bare = PciDevice::new(VendorId::new(vendor), DeviceId::new(device));
        let full = PciDevice::with_subsystem(
            VendorId::new(vendor),
            DeviceId::new(device),
            Some(SubVendorId::new(sub_vendor)),
            Some(SubDeviceId::new(sub_device)),
        );

        prop_assert_eq!(&bare, &full);
        prop_assert_eq!(PciDevice::parse(&full.to_string()), Ok(full));
    }
}
