// Copyright (c) 2025 - Cowboy AI, Inc.
//! MAC Address Value Object
//!
//! # Examples
//!
//! ```rust
//! use cim_typing::network::{MacAddress, MacDialect};
//!
//! let mac = MacAddress::new("d2-ee-77-91-34-a7").unwrap();
//! assert_eq!(mac.to_string(), "d2:ee:77:91:34:a7");
//! assert_eq!(mac.format_with(&MacDialect::EUI48), "D2-EE-77-91-34-A7");
//! assert_eq!(format!("{:#x}", mac), "0xd2ee779134a7");
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::NetworkError;
use crate::utils::little_endian_words;

/// Rendering options for MAC addresses
///
/// Octets are grouped `group_octets` at a time, groups joined by `separator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacDialect {
    /// Character between groups, `None` for a bare string
    pub separator: Option<char>,
    /// Octets per group (1-6)
    pub group_octets: usize,
    /// Uppercase hex digits
    pub uppercase: bool,
}

impl MacDialect {
    /// `d2:ee:77:91:34:a7`
    pub const UNIX_EXPANDED: Self = Self {
        separator: Some(':'),
        group_octets: 1,
        uppercase: false,
    };

    /// `D2-EE-77-91-34-A7`
    pub const EUI48: Self = Self {
        separator: Some('-'),
        group_octets: 1,
        uppercase: true,
    };

    /// `d2ee.7791.34a7`
    pub const CISCO: Self = Self {
        separator: Some('.'),
        group_octets: 2,
        uppercase: false,
    };

    /// `d2ee779134a7`
    pub const BARE: Self = Self {
        separator: None,
        group_octets: 6,
        uppercase: false,
    };
}

impl Default for MacDialect {
    fn default() -> Self {
        Self::UNIX_EXPANDED
    }
}

/// MAC Address value object
///
/// Represents a 48-bit MAC address with validation.
/// Invariants:
/// - Exactly 6 octets (12 hex digits)
/// - Canonical representation (lowercase, colon-separated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Largest 48-bit value
    pub const MAX: u64 = 0xFFFF_FFFF_FFFF;

    /// Prefix used by [`MacAddress::random_with_prefix`] callers without one
    pub const DEFAULT_RANDOM_PREFIX: &'static str = "fa:11:11";

    /// Create a new MAC address with validation
    ///
    /// Accepts six 2-digit groups joined by one kind of separator (`:` or `-`),
    /// three 4-digit groups joined by `.` (Cisco), or 12 bare hex digits.
    pub fn new(mac: impl AsRef<str>) -> Result<Self, NetworkError> {
        let mac = mac.as_ref();
        let invalid = || {
            debug!(input = mac, "rejected MAC address");
            NetworkError::InvalidMacAddress(mac.to_string())
        };

        // (separator, digits per group, group count)
        let layout = [(':', 2, 6), ('-', 2, 6), ('.', 4, 3)]
            .into_iter()
            .find(|(separator, _, _)| mac.contains(*separator));

        let mac_clean = match layout {
            Some((separator, width, count)) => {
                let groups: Vec<&str> = mac.split(separator).collect();
                if groups.len() != count || groups.iter().any(|group| group.len() != width) {
                    return Err(invalid());
                }
                groups.concat()
            }
            None => mac.to_string(),
        };

        // Invariant: Must be exactly 12 hex digits (6 octets)
        if mac_clean.len() != 12 || !mac_clean.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut octets = [0u8; 6];
        for (i, chunk) in mac_clean.as_bytes().chunks(2).enumerate() {
            let hex_str = std::str::from_utf8(chunk)
                .map_err(|_| NetworkError::InvalidMacAddress(mac.to_string()))?;
            octets[i] = u8::from_str_radix(hex_str, 16)
                .map_err(|_| NetworkError::InvalidMacAddress(mac.to_string()))?;
        }

        Ok(Self(octets))
    }

    /// Create from the 48-bit integer form
    pub fn from_u64(value: u64) -> Result<Self, NetworkError> {
        if value > Self::MAX {
            return Err(NetworkError::MacOutOfRange(value));
        }

        let bytes = value.to_be_bytes();
        let mut octets = [0u8; 6];
        octets.copy_from_slice(&bytes[2..]);
        Ok(Self(octets))
    }

    /// Create from raw octets
    pub fn from_octets(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Get the octets
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Get the 48-bit integer form
    pub fn to_u64(&self) -> u64 {
        let [a, b, c, d, e, f] = self.0;
        u64::from_be_bytes([0, 0, a, b, c, d, e, f])
    }

    /// Big-endian 16-bit words, e.g. `[0xd2ee, 0x7791, 0x34a7]`
    pub fn words(&self) -> [u16; 3] {
        let [a, b, c, d, e, f] = self.0;
        [
            u16::from_be_bytes([a, b]),
            u16::from_be_bytes([c, d]),
            u16::from_be_bytes([e, f]),
        ]
    }

    /// Render using the given dialect
    pub fn format_with(&self, dialect: &MacDialect) -> String {
        let groups: Vec<String> = self
            .0
            .chunks(dialect.group_octets.clamp(1, 6))
            .map(|group| {
                group
                    .iter()
                    .map(|octet| {
                        if dialect.uppercase {
                            format!("{:02X}", octet)
                        } else {
                            format!("{:02x}", octet)
                        }
                    })
                    .collect()
            })
            .collect();

        match dialect.separator {
            Some(separator) => groups.join(&separator.to_string()),
            None => groups.concat(),
        }
    }

    /// Octets as 8-bit binary groups, e.g. `11010010-11101110-...`
    pub fn bits(&self) -> String {
        self.0
            .iter()
            .map(|octet| format!("{:08b}", octet))
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Little-endian 16-bit words, e.g. `{0xfd3c,0xbcfe,0x68b7}`
    pub fn brackets_format(&self) -> String {
        little_endian_words(&self.0)
    }

    /// Check if this is a broadcast MAC address
    pub fn is_broadcast(&self) -> bool {
        self.0 == [0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    }

    /// Check if this is a multicast MAC address
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    /// Check if this is a unicast MAC address
    pub fn is_unicast(&self) -> bool {
        !self.is_multicast()
    }

    /// Check if the locally administered bit is set
    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & 0x02 != 0
    }

    /// Fully random address
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut octets = [0u8; 6];
        rng.fill(&mut octets[..]);
        Self(octets)
    }

    /// Random locally administered unicast address
    pub fn random_unicast<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut octets = Self::random(rng).0;
        octets[0] = (octets[0] & 0xfc) | 0x02;
        Self(octets)
    }

    /// Random IPv4 multicast address (`01:00:5e` followed by 23 random bits)
    pub fn random_multicast<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let tail = Self::random(rng).0;
        Self([0x01, 0x00, 0x5e, tail[3] & 0x7f, tail[4], tail[5]])
    }

    /// Random address starting with `prefix` (1-5 octets, e.g. `fa:11:11`)
    pub fn random_with_prefix<R: Rng + ?Sized>(
        rng: &mut R,
        prefix: &str,
    ) -> Result<Self, NetworkError> {
        let invalid = || NetworkError::InvalidMacPrefix(prefix.to_string());

        let head = prefix
            .split([':', '-'])
            .map(|octet| {
                if octet.len() == 2 {
                    u8::from_str_radix(octet, 16).map_err(|_| invalid())
                } else {
                    Err(invalid())
                }
            })
            .collect::<Result<Vec<u8>, _>>()?;

        if head.is_empty() || head.len() > 5 {
            return Err(invalid());
        }

        let mut octets = Self::random(rng).0;
        octets[..head.len()].copy_from_slice(&head);
        debug!(prefix, "generated MAC address from prefix");
        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(&MacDialect::default()))
    }
}

impl fmt::LowerHex for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_u64(), f)
    }
}

impl fmt::UpperHex for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.to_u64(), f)
    }
}

impl fmt::Binary for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.to_u64(), f)
    }
}

impl FromStr for MacAddress {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u64> for MacAddress {
    type Error = NetworkError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_u64(value)
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}
