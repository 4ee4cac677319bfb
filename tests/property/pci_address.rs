// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for PCI Addresses

use cim_typing::{PciAddress, PciError};
use proptest::prelude::*;
use std::cmp::Ordering;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate arbitrary valid addresses
fn pci_address() -> impl Strategy<Value = PciAddress> {
    (any::<u32>(), any::<u8>(), any::<u8>(), 0u8..=7).prop_map(|(domain, bus, slot, function)| {
        PciAddress::new(domain, bus, slot, function).expect("function is in range")
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: lspci rendering parses back to the same address
    #[test]
    fn prop_lspci_round_trip(address in pci_address()) {
        prop_assert_eq!(PciAddress::parse(&address.lspci()), Ok(address));
    }

    /// Property: the short form loses only the domain
    #[test]
    fn prop_lspci_short_drops_domain(address in pci_address()) {
        let short = PciAddress::parse(&address.lspci_short()).expect("short form parses");

        prop_assert_eq!(short.domain(), 0);
        prop_assert_eq!(
            (short.bus(), short.slot(), short.function()),
            (address.bus(), address.slot(), address.function())
        );
    }

    /// Property: ordering follows (domain, bus, slot, function)
    #[test]
    fn prop_ordering_matches_topology(a in pci_address(), b in pci_address()) {
        let expected = (a.domain(), a.bus(), a.slot(), a.function())
            .cmp(&(b.domain(), b.bus(), b.slot(), b.function()));

        prop_assert_eq!(a.cmp(&b), expected);
        prop_assert_eq!(a == b, expected == Ordering::Equal);
    }

    /// Property: functions above 7 are always rejected
    #[test]
    fn prop_function_out_of_range(bus in any::<u8>(), function in 8u8..) {
        let rejected = matches!(
            PciAddress::new(0, bus, 0, function),
            Err(PciError::OutOfRange { field: "function", .. })
        );
        prop_assert!(rejected);
    }

    /// Property: JSON form is the lspci string
    #[test]
    fn prop_serde_uses_lspci(address in pci_address()) {
        let json = serde_json::to_string(&address).expect("serializes");
        prop_assert_eq!(&json, &format!("\"{}\"", address.lspci()));

        let back: PciAddress = serde_json::from_str(&json).expect("deserializes");
        prop_assert_eq!(back, address);
    }
}
