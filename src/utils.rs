// Copyright (c) 2025 - Cowboy AI, Inc.
//! Conversion Helpers
//!
//! String renderings used when talking to firmware tools, tables and config
//! files: hex/binary numbers, byte-wise IP and port dumps, canonical MAC
//! strings, loose boolean parsing and `sed` command construction.

use std::cmp::Ordering;
use std::net::IpAddr;

use thiserror::Error;
use tracing::debug;

use crate::network::{IpInterface, MacAddress, NetworkError};
use crate::raw::RawValue;

/// Conversion error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid {what}: {value} (must be 0-{max})")]
    OutOfRange {
        what: &'static str,
        value: i128,
        max: u64,
    },

    #[error("Invalid {what}: {value} (must be non-negative)")]
    Negative { what: &'static str, value: i128 },

    #[error("Range must be greater than zero")]
    ZeroRange,

    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    #[error("Invalid truth value: {0}")]
    InvalidBool(String),

    #[error("Expected {expected}, got {found}")]
    InvalidType {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Conversion result
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Resolve an integer or decimal string into a non-negative number
fn unsigned(value: RawValue<'_>, what: &'static str) -> ConversionResult<u128> {
    let number = match value {
        RawValue::Int(number) => number,
        RawValue::Text(text) => text
            .trim()
            .parse::<i128>()
            .map_err(|_| ConversionError::InvalidNumber(text.to_string()))?,
        other => {
            return Err(ConversionError::InvalidType {
                expected: "integer or string",
                found: other.type_name(),
            })
        }
    };

    u128::try_from(number).map_err(|_| ConversionError::Negative {
        what,
        value: number,
    })
}

/// Render a number as `0x` followed by at least 8 hex digits
///
/// ```rust
/// use cim_typing::utils::decimal_to_hex;
///
/// assert_eq!(decimal_to_hex(10).unwrap(), "0x0000000a");
/// assert_eq!(decimal_to_hex("100").unwrap(), "0x00000064");
/// ```
pub fn decimal_to_hex<'a>(value: impl Into<RawValue<'a>>) -> ConversionResult<String> {
    let number = unsigned(value.into(), "number")?;
    Ok(format!("{number:#010x}"))
}

/// Render a number as binary digits without prefix
pub fn decimal_to_bin<'a>(value: impl Into<RawValue<'a>>) -> ConversionResult<String> {
    let number = unsigned(value.into(), "number")?;
    Ok(format!("{number:b}"))
}

/// Deterministic number derived from a string, in `0..range`
///
/// Sum of the string's code points modulo `range`.
pub fn number_from_string(text: &str, range: u64) -> ConversionResult<u64> {
    if range == 0 {
        return Err(ConversionError::ZeroRange);
    }

    let sum = text.chars().fold(0u64, |acc, c| acc.wrapping_add(u64::from(c)));
    Ok(sum % range)
}

/// Compare two integers as if the negative one were reinterpreted unsigned
///
/// Operands of the same sign compare directly. Otherwise the negative operand
/// is masked to the bit width of the non-negative one, so `-1` equals `1023`.
pub fn compare_numbers_as_unsigned(a: i128, b: i128) -> bool {
    if (a < 0) == (b < 0) {
        return a == b;
    }

    let (negative, positive) = if a < 0 { (a, b) } else { (b, a) };
    let width = i128::BITS - positive.leading_zeros();
    let mask = if width >= i128::BITS - 1 {
        i128::MAX
    } else {
        (1i128 << width) - 1
    };

    negative & mask == positive
}

fn version_parts(version: &str) -> ConversionResult<Vec<u64>> {
    version
        .split('.')
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ConversionError::InvalidVersion(version.to_string()));
            }
            part.parse::<u64>()
                .map_err(|_| ConversionError::InvalidVersion(version.to_string()))
        })
        .collect()
}

/// Compare dotted version strings that do not follow semver
///
/// Components compare numerically; a version that is a prefix of another
/// is the lesser one (`1.2 < 1.2.3`).
pub fn compare_non_conforming_versions(a: &str, b: &str) -> ConversionResult<Ordering> {
    Ok(version_parts(a)?.cmp(&version_parts(b)?))
}

/// Two comma-separated hex bytes of a port number, e.g. `65000` -> `fd,e8`
///
/// Empty text yields an empty string.
pub fn convert_port_dc_to_port_hex<'a>(port: impl Into<RawValue<'a>>) -> ConversionResult<String> {
    let port = port.into();
    if let RawValue::Text(text) = port {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
    }

    let number = unsigned(port, "port")?;
    let port = u16::try_from(number).map_err(|_| ConversionError::OutOfRange {
        what: "port",
        value: i128::try_from(number).unwrap_or(i128::MAX),
        max: u64::from(u16::MAX),
    })?;

    let [high, low] = port.to_be_bytes();
    Ok(format!("{high:02x},{low:02x}"))
}

fn ip_octets(ip: &str) -> ConversionResult<Vec<u8>> {
    let interface = IpInterface::new(ip)?;
    Ok(match interface.address() {
        IpAddr::V4(address) => address.octets().to_vec(),
        IpAddr::V6(address) => address.octets().to_vec(),
    })
}

/// Comma-separated hex bytes of an IP address
///
/// IPv4 bytes are unpadded (`10.10.1.1` -> `a,a,1,1`); with `pad_ipv6_len`
/// twelve `00` bytes follow so the dump is as long as an IPv6 one. IPv6 bytes
/// are always two digits wide.
pub fn convert_ip_dc_to_ip_hex(ip: &str, pad_ipv6_len: bool) -> ConversionResult<String> {
    let octets = ip_octets(ip)?;

    let mut bytes: Vec<String> = if octets.len() == 4 {
        octets.iter().map(|b| format!("{b:x}")).collect()
    } else {
        octets.iter().map(|b| format!("{b:02x}")).collect()
    };
    if octets.len() == 4 && pad_ipv6_len {
        bytes.extend(std::iter::repeat("00".to_string()).take(12));
    }

    Ok(bytes.join(","))
}

/// IP address as little-endian 16-bit words, e.g. `1.2.1.1` -> `{0x0201,0x0101}`
pub fn convert_ip_to_brackets_colon_format(ip: &str) -> ConversionResult<String> {
    Ok(little_endian_words(&ip_octets(ip)?))
}

/// IP address as one hex number, e.g. `192.168.1.1` -> `0xc0a80101`
pub fn convert_ip_dc_to_hex_value(ip: &str) -> ConversionResult<String> {
    let digits: String = ip_octets(ip)?.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("0x{digits}"))
}

/// MAC address as one 12-digit hex number, e.g. `0x00005e0053af`
///
/// Accepts any notation [`MacAddress`] parses, or an already `0x` prefixed value.
pub fn convert_mac_string_to_hex(mac: &str) -> ConversionResult<String> {
    let mac = mac.trim();
    let digits = mac
        .strip_prefix("0x")
        .or_else(|| mac.strip_prefix("0X"))
        .unwrap_or(mac);
    let mac = MacAddress::new(digits)?;
    Ok(format!("{mac:#014x}"))
}

/// Canonical lowercase colon-separated MAC, ignoring any whitespace in the input
pub fn format_mac_string_to_canonical(mac: &str) -> ConversionResult<String> {
    let compact: String = mac.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(MacAddress::new(compact)?.to_string())
}

/// Interpret a loose truth value
///
/// True: `y`, `yes`, `t`, `true`, `on`, `1`. False: `n`, `no`, `f`, `false`,
/// `off`, `0`. Case-insensitive. Booleans pass through.
pub fn strtobool<'a>(value: impl Into<RawValue<'a>>) -> ConversionResult<bool> {
    match value.into() {
        RawValue::Bool(flag) => Ok(flag),
        RawValue::Text(text) => match text.trim().to_lowercase().as_str() {
            "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
            "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
            _ => {
                debug!(input = text, "rejected truth value");
                Err(ConversionError::InvalidBool(text.to_string()))
            }
        },
        other => Err(ConversionError::InvalidType {
            expected: "string or boolean",
            found: other.type_name(),
        }),
    }
}

/// Build an in-place `sed` substitution command
///
/// `|` replaces `/` as delimiter when either side contains a slash.
pub fn sed_inline(actual: &str, new: &str, file: &str, line: Option<u32>) -> String {
    let delimiter = if actual.contains('/') || new.contains('/') {
        '|'
    } else {
        '/'
    };
    let address = line.map(|line| line.to_string()).unwrap_or_default();

    format!("sed -i '{address}s{delimiter}{actual}{delimiter}{new}{delimiter}g' {file}")
}

/// Backslash-escape every character of `input` that appears in `pattern`
pub fn prepare_sed_string(input: &str, pattern: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if pattern.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Bytes as little-endian 16-bit words: `{0xfd3c,0xbcfe}`
pub(crate) fn little_endian_words(bytes: &[u8]) -> String {
    let words: Vec<String> = bytes
        .chunks(2)
        .map(|pair| {
            let low = u16::from(pair[0]);
            let high = pair.get(1).copied().map(u16::from).unwrap_or(0);
            format!("{:#06x}", (high << 8) | low)
        })
        .collect();

    format!("{{{}}}", words.join(","))
}
