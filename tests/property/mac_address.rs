// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for MAC Addresses

use cim_typing::{MacAddress, MacDialect};
use proptest::prelude::*;

proptest! {
    /// Property: every dialect renders something the parser accepts
    #[test]
    fn prop_dialects_parse_back(octets in any::<[u8; 6]>()) {
        let mac = MacAddress::from_octets(octets);

        for dialect in [MacDialect::UNIX_EXPANDED, MacDialect::EUI48, MacDialect::CISCO, MacDialect::BARE] {
            prop_assert_eq!(MacAddress::new(mac.format_with(&dialect)), Ok(mac));
        }
    }

    /// Property: integer form is lossless
    #[test]
    fn prop_integer_round_trip(value in 0u64..=MacAddress::MAX) {
        let mac = MacAddress::from_u64(value).expect("value fits in 48 bits");
        prop_assert_eq!(mac.to_u64(), value);
    }
}
