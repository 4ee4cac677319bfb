// Copyright (c) 2025 - Cowboy AI, Inc.
//! PCI Address Value Object
//!
//! A PCI address locates a function on the bus topology as
//! `domain:bus:slot.function`. Diagnostic tools disagree on how to print it,
//! so [`PciAddress`] renders every convention from the same four fields:
//!
//! | render           | example (`ffff:ff:1f.7`) |
//! |------------------|--------------------------|
//! | `lspci`          | `ffff:ff:1f.7`           |
//! | `lspci_short`    | `ff:1f.7`                |
//! | `sbdf`           | `65535:255:31:07`        |
//! | `sbdf_full_width`| `65535:255:31:07`        |
//! | `pciconf`        | `pci65535:255:31:7`      |
//! | `nvmcheck_bdf`   | `255/31/07`              |

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::{check_range, parse_hex, PciError, PciResult};
use crate::raw::RawValue;

/// PCI bus location (domain, bus, slot, function)
///
/// Invariants:
/// - Domain within 0..=0xFFFF_FFFF
/// - Bus and slot within 0..=0xFF
/// - Function within 0..=7
/// - Ordered lexicographically by (domain, bus, slot, function)
///
/// Fields are read-only once constructed:
///
/// ```compile_fail
/// use cim_typing::pci::PciAddress;
///
/// let mut address = PciAddress::new(0, 0, 0, 0).unwrap();
/// address.domain = 1;
/// ```
///
/// # Examples
///
/// ```rust
/// use cim_typing::pci::PciAddress;
///
/// let address: PciAddress = "0000:1A:5C.1".parse().unwrap();
/// assert_eq!(address.lspci(), "0000:1a:5c.1");
/// assert_eq!(address.pciconf(), "pci0:26:92:1");
/// assert!(address < "0000:1b:00.0".parse::<PciAddress>().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PciAddress {
    domain: u32,
    bus: u8,
    slot: u8,
    function: u8,
}

impl PciAddress {
    /// Largest function number
    pub const FUNCTION_MAX: u8 = 7;

    /// Create an address from typed parts
    ///
    /// # Invariants
    /// - Function must be 0-7
    pub fn new(domain: u32, bus: u8, slot: u8, function: u8) -> PciResult<Self> {
        Self::from_checked(
            i128::from(domain),
            i128::from(bus),
            i128::from(slot),
            i128::from(function),
        )
    }

    /// Create an address from loosely-typed parts
    ///
    /// Each part may be an integer, a decimal string or a float (truncated
    /// toward zero). An absent part is `MissingData`, never zero.
    pub fn from_parts<'a>(
        domain: impl Into<RawValue<'a>>,
        bus: impl Into<RawValue<'a>>,
        slot: impl Into<RawValue<'a>>,
        function: impl Into<RawValue<'a>>,
    ) -> PciResult<Self> {
        Self::from_checked(
            integral("domain", domain.into())?,
            integral("bus", bus.into())?,
            integral("slot", slot.into())?,
            integral("function", function.into())?,
        )
    }

    /// Parse `domain:bus:slot.function` or `bus:slot.function`
    ///
    /// Every token is hexadecimal. The function may also follow a colon
    /// (`1:2:3:4`); a missing domain defaults to 0.
    pub fn parse(data: &str) -> PciResult<Self> {
        let data = data.trim();
        let invalid = || PciError::InvalidFormat {
            what: "PCI address",
            input: data.to_string(),
        };

        let (head, function) = data
            .rsplit_once(|c: char| c == '.' || c == ':')
            .ok_or_else(invalid)?;

        let tokens: Vec<&str> = head.split(':').collect();
        let (domain, bus, slot) = match tokens.as_slice() {
            [bus, slot] => ("0", *bus, *slot),
            [domain, bus, slot] => (*domain, *bus, *slot),
            _ => {
                debug!(input = data, "unrecognized PCI address layout");
                return Err(invalid());
            }
        };

        let hex = |token: &str| parse_hex(token, "PCI address").map_err(|_| invalid());
        Self::from_checked(hex(domain)?, hex(bus)?, hex(slot)?, hex(function)?)
    }

    fn from_checked(domain: i128, bus: i128, slot: i128, function: i128) -> PciResult<Self> {
        Ok(Self {
            domain: check_range("domain", domain, u64::from(u32::MAX))? as u32,
            bus: check_range("bus", bus, u64::from(u8::MAX))? as u8,
            slot: check_range("slot", slot, u64::from(u8::MAX))? as u8,
            function: check_range("function", function, u64::from(Self::FUNCTION_MAX))? as u8,
        })
    }

    /// Get the domain (segment) number
    pub fn domain(&self) -> u32 {
        self.domain
    }

    /// Get the bus number
    pub fn bus(&self) -> u8 {
        self.bus
    }

    /// Get the slot (device) number
    pub fn slot(&self) -> u8 {
        self.slot
    }

    /// Get the function number
    pub fn function(&self) -> u8 {
        self.function
    }

    /// `dddd:bb:ss.f` in lowercase hex
    pub fn lspci(&self) -> String {
        format!(
            "{:04x}:{:02x}:{:02x}.{:x}",
            self.domain, self.bus, self.slot, self.function
        )
    }

    /// `bb:ss.f` in lowercase hex
    pub fn lspci_short(&self) -> String {
        format!("{:02x}:{:02x}.{:x}", self.bus, self.slot, self.function)
    }

    /// Decimal `DD:BBB:SS:FF` (e.g. `00:094:00:01`)
    pub fn sbdf(&self) -> String {
        format!(
            "{:02}:{:03}:{:02}:{:02}",
            self.domain, self.bus, self.slot, self.function
        )
    }

    /// Decimal `DDDDD:BBB:SS:FF` with the domain padded to five digits
    pub fn sbdf_full_width(&self) -> String {
        format!(
            "{:05}:{:03}:{:02}:{:02}",
            self.domain, self.bus, self.slot, self.function
        )
    }

    /// FreeBSD `pciconf` selector, e.g. `pci0:26:10:1`
    pub fn pciconf(&self) -> String {
        format!(
            "pci{}:{}:{}:{}",
            self.domain, self.bus, self.slot, self.function
        )
    }

    /// nvmcheck `BBB/SS/FF`
    pub fn nvmcheck_bdf(&self) -> String {
        format!("{:03}/{:02}/{:02}", self.bus, self.slot, self.function)
    }

    /// Order against a value of unknown type
    ///
    /// Anything other than a `PciAddress` is an error rather than a default.
    pub fn try_cmp(&self, other: &dyn Any) -> PciResult<Ordering> {
        other
            .downcast_ref::<Self>()
            .map(|address| self.cmp(address))
            .ok_or(PciError::Incomparable("PciAddress"))
    }

    /// Compare against a value of unknown type
    ///
    /// An absent address (`Option<PciAddress>`) is never equal when `None`.
    pub fn try_eq(&self, other: &dyn Any) -> PciResult<bool> {
        if let Some(maybe) = other.downcast_ref::<Option<Self>>() {
            return Ok(maybe.as_ref() == Some(self));
        }
        self.try_cmp(other).map(Ordering::is_eq)
    }
}

/// Read one address part as an integer
fn integral(field: &'static str, raw: RawValue<'_>) -> PciResult<i128> {
    match raw {
        RawValue::Int(value) => Ok(value),
        RawValue::Float(value) if value.is_finite() => Ok(value.trunc() as i128),
        RawValue::Float(value) => Err(PciError::InvalidFormat {
            what: field,
            input: value.to_string(),
        }),
        RawValue::Text(text) => text.trim().parse().map_err(|_| PciError::InvalidFormat {
            what: field,
            input: text.to_string(),
        }),
        RawValue::Missing => Err(PciError::MissingData(field)),
        other => Err(PciError::InvalidType {
            target: "PciAddress",
            expected: "integer, numeric string or float",
            found: other.type_name(),
        }),
    }
}

impl fmt::Display for PciAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lspci())
    }
}

impl FromStr for PciAddress {
    type Err = PciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PciAddress {
    type Error = PciError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PciAddress> for String {
    fn from(address: PciAddress) -> Self {
        address.lspci()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(data: &str) -> PciAddress {
        PciAddress::parse(data).unwrap()
    }

    #[test]
    fn test_arguments_converted_to_int() {
        let address = PciAddress::from_parts("0", 0.0, "0", 0.0).unwrap();
        assert_eq!(address.domain(), 0);
        assert_eq!(address.bus(), 0);
        assert_eq!(address.slot(), 0);
        assert_eq!(address.function(), 0);

        let truncated = PciAddress::from_parts(1, 26.9, " 10 ", 1).unwrap();
        assert_eq!(truncated, PciAddress::new(1, 26, 10, 1).unwrap());
    }

    #[test]
    fn test_parse_colon_only() {
        let address = addr("1:2:3:4");
        assert_eq!(
            (address.domain(), address.bus(), address.slot(), address.function()),
            (1, 2, 3, 4)
        );
    }

    #[test]
    fn test_parse_wrong_format() {
        for input in ["1.2:3,4", "", "1a", "1a.0", "0:0:0:0:0.1", "zz:00.0", "00:00.", "-1:00.0"] {
            assert!(
                matches!(PciAddress::parse(input), Err(PciError::InvalidFormat { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(
            PciAddress::parse("100000000:00:00.0"),
            Err(PciError::OutOfRange { field: "domain", .. })
        ));
        assert!(matches!(
            PciAddress::parse("0000:100:00.0"),
            Err(PciError::OutOfRange { field: "bus", .. })
        ));
        assert!(matches!(
            PciAddress::parse("0000:00:00.8"),
            Err(PciError::OutOfRange { field: "function", .. })
        ));
    }

    #[test]
    fn test_bounds_validated() {
        let cases: [(i64, i64, i64, i64, &str); 8] = [
            (-1, 0, 0, 0, "domain"),
            (1 << 32, 0, 0, 0, "domain"),
            (0, -1, 0, 0, "bus"),
            (0, 1 << 8, 0, 0, "bus"),
            (0, 0, -1, 0, "slot"),
            (0, 0, 1 << 8, 0, "slot"),
            (0, 0, 0, -1, "function"),
            (0, 0, 0, 1 << 8, "function"),
        ];

        for (domain, bus, slot, function, field) in cases {
            match PciAddress::from_parts(domain, bus, slot, function) {
                Err(PciError::OutOfRange { field: rejected, .. }) => assert_eq!(rejected, field),
                other => panic!("expected {field} out of range, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_function() {
        assert_eq!(
            PciAddress::from_parts(0, 26, 10, None::<u8>),
            Err(PciError::MissingData("function"))
        );
        assert_eq!(
            PciAddress::from_parts(RawValue::Missing, 26, 10, 1),
            Err(PciError::MissingData("domain"))
        );
    }

    #[test]
    fn test_invalid_part_types() {
        assert!(matches!(
            PciAddress::from_parts(0, true, 0, 0),
            Err(PciError::InvalidType { found: "boolean", .. })
        ));
        assert!(matches!(
            PciAddress::from_parts(0, "1a", 0, 0),
            Err(PciError::InvalidFormat { what: "bus", .. })
        ));
        assert!(matches!(
            PciAddress::from_parts(0, f64::NAN, 0, 0),
            Err(PciError::InvalidFormat { what: "bus", .. })
        ));
    }

    #[test]
    fn test_renders() {
        let top = PciAddress::new(0xFFFF, 0xFF, 0x1F, 0x7).unwrap();
        assert_eq!(top.lspci(), "ffff:ff:1f.7");
        assert_eq!(top.to_string(), "ffff:ff:1f.7");
        assert_eq!(top.sbdf(), "65535:255:31:07");
        assert_eq!(top.pciconf(), "pci65535:255:31:7");
        assert_eq!(top.nvmcheck_bdf(), "255/31/07");

        assert_eq!(PciAddress::new(0, 0, 0, 0).unwrap().lspci(), "0000:00:00.0");
        assert_eq!(PciAddress::new(0, 0xFF, 0x1F, 0x7).unwrap().lspci_short(), "ff:1f.7");
        assert_eq!(addr("ff:1f.7").lspci_short(), "ff:1f.7");
        assert_eq!(PciAddress::new(0, 94, 0, 1).unwrap().sbdf(), "00:094:00:01");
        assert_eq!(PciAddress::new(0, 94, 0, 1).unwrap().sbdf_full_width(), "00000:094:00:01");
        assert_eq!(PciAddress::new(0, 26, 0, 1).unwrap().nvmcheck_bdf(), "026/00/01");
        assert_eq!(addr("ffff:ff:1f.7").sbdf(), "65535:255:31:07");
    }

    #[test]
    fn test_hex_normalization() {
        assert_eq!(PciAddress::new(0, 26, 10, 1).unwrap().lspci(), "0000:1a:0a.1");
        assert_eq!(addr("0000:1a:0a.1").lspci(), "0000:1a:0a.1");
        assert_eq!(addr("0000:1A:5C.1").lspci(), "0000:1a:5c.1");
        assert_eq!(addr("1a:0a.1"), addr("0000:1a:0a.1"));
    }

    #[test]
    fn test_equality() {
        let address = addr("0000:1a:0a.1");
        assert_eq!(address, addr("0000:1a:0a.1"));
        assert_ne!(address, addr("0000:00:0a.3"));
        assert_eq!(address.try_eq(&None::<PciAddress>), Ok(false));
        assert_eq!(address.try_eq(&Some(addr("0000:1a:0a.1"))), Ok(true));
        assert_eq!(address.try_eq(&"0000:1a:0a.1"), Err(PciError::Incomparable("PciAddress")));
        assert_eq!(
            address.try_cmp(&None::<PciAddress>),
            Err(PciError::Incomparable("PciAddress"))
        );
    }

    #[test]
    fn test_ordering() {
        assert!(addr("0000:18:00.0") < addr("0000:20:00.0"));
        assert!(addr("0000:18:00.0") < addr("0000:18:01.0"));
        assert!(addr("0000:18:00.0") < addr("0000:18:00.1"));
        assert!(addr("0000:20:00.0") > addr("0000:18:00.0"));
        assert!(addr("0000:20:01.0") > addr("0000:20:00.0"));
        assert!(addr("0000:20:00.1") > addr("0000:20:00.0"));
        assert!(addr("0001:00:00.0") > addr("0000:ff:1f.7"));
    }

    #[test]
    fn test_incomparable() {
        let address = addr("0000:20:00.0");
        let device = crate::pci::PciDevice::parse("8086:1592").unwrap();

        let err = address.try_cmp(&device).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Incorrect object passed for comparison with PciAddress"
        );
        assert_eq!(address.try_cmp(&addr("0000:18:00.0")), Ok(Ordering::Greater));
    }

    #[test]
    fn test_serde() {
        let address = addr("0000:1a:0a.1");
        assert_eq!(serde_json::to_string(&address).unwrap(), "\"0000:1a:0a.1\"");
        assert_eq!(serde_json::from_str::<PciAddress>("\"1A:0A.1\"").unwrap(), address);
        assert!(serde_json::from_str::<PciAddress>("\"1.2:3,4\"").is_err());
    }
}
