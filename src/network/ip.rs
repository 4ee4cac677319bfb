// Copyright (c) 2025 - Cowboy AI, Inc.
//! IP Interface Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use super::NetworkError;

/// IP address with optional prefix length
///
/// Invariants:
/// - Valid IP address format
/// - Prefix length within valid range
/// - Netmask notation (`/255.255.255.0`) normalized to a prefix length
///
/// # Examples
///
/// ```rust
/// use cim_typing::network::IpInterface;
///
/// let ip = IpInterface::new("192.168.1.10/255.255.255.0").unwrap();
/// assert_eq!(ip.prefix_length(), Some(24));
/// assert_eq!(ip.broadcast().unwrap().to_string(), "192.168.1.255");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpInterface {
    address: IpAddr,
    prefix_length: Option<u8>,
}

impl IpInterface {
    /// Create a new interface from `addr`, `addr/len` or `addr/netmask`
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, NetworkError> {
        let cidr = cidr.as_ref().trim();

        if let Some((addr_str, prefix_str)) = cidr.split_once('/') {
            let address = IpAddr::from_str(addr_str)
                .map_err(|_| NetworkError::InvalidIpAddress(addr_str.to_string()))?;

            let prefix_length = if prefix_str.bytes().all(|b| b.is_ascii_digit()) {
                prefix_str
                    .parse::<u8>()
                    .map_err(|_| NetworkError::InvalidCidr(cidr.to_string()))?
            } else {
                Self::netmask_to_prefix(address, prefix_str)?
            };

            Self::from_parts(address, Some(prefix_length))
        } else {
            let address = IpAddr::from_str(cidr)
                .map_err(|_| NetworkError::InvalidIpAddress(cidr.to_string()))?;

            Ok(Self {
                address,
                prefix_length: None,
            })
        }
    }

    /// Create from separate address and prefix
    pub fn from_parts(address: IpAddr, prefix_length: Option<u8>) -> Result<Self, NetworkError> {
        if let Some(prefix) = prefix_length {
            if prefix > Self::max_prefix(address) {
                return Err(NetworkError::InvalidPrefixLength(prefix));
            }
        }

        Ok(Self {
            address,
            prefix_length,
        })
    }

    fn max_prefix(address: IpAddr) -> u8 {
        match address {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        }
    }

    /// Convert a dotted netmask into a prefix length
    fn netmask_to_prefix(address: IpAddr, mask: &str) -> Result<u8, NetworkError> {
        let invalid = || NetworkError::InvalidNetmask(mask.to_string());

        let bits = match (address, IpAddr::from_str(mask).map_err(|_| invalid())?) {
            (IpAddr::V4(_), IpAddr::V4(mask)) => u128::from(u32::from(mask)) << 96,
            (IpAddr::V6(_), IpAddr::V6(mask)) => u128::from(mask),
            _ => return Err(invalid()),
        };

        // Contiguous ones followed by zeros
        let prefix = bits.leading_ones();
        if bits.checked_shl(prefix).unwrap_or(0) != 0 {
            return Err(invalid());
        }

        Ok(prefix.min(u32::from(Self::max_prefix(address))) as u8)
    }

    /// Get the IP address
    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// Get the prefix length
    pub fn prefix_length(&self) -> Option<u8> {
        self.prefix_length
    }

    /// Prefix length, defaulting to a host route when none was given
    pub fn effective_prefix(&self) -> u8 {
        self.prefix_length
            .unwrap_or_else(|| Self::max_prefix(self.address))
    }

    /// Check if this is an IPv4 address
    pub fn is_ipv4(&self) -> bool {
        matches!(self.address, IpAddr::V4(_))
    }

    /// Check if this is an IPv6 address
    pub fn is_ipv6(&self) -> bool {
        matches!(self.address, IpAddr::V6(_))
    }

    /// Network mask derived from the prefix length
    pub fn netmask(&self) -> IpAddr {
        let prefix = u32::from(self.effective_prefix());
        match self.address {
            IpAddr::V4(_) => {
                let mask = u32::MAX.checked_shl(32 - prefix).unwrap_or(0);
                IpAddr::V4(Ipv4Addr::from(mask))
            }
            IpAddr::V6(_) => {
                let mask = u128::MAX.checked_shl(128 - prefix).unwrap_or(0);
                IpAddr::V6(Ipv6Addr::from(mask))
            }
        }
    }

    /// IPv4 broadcast address, `None` for IPv6
    pub fn broadcast(&self) -> Option<Ipv4Addr> {
        match (self.address, self.netmask()) {
            (IpAddr::V4(address), IpAddr::V4(mask)) => {
                Some(Ipv4Addr::from(u32::from(address) | !u32::from(mask)))
            }
            _ => None,
        }
    }

    /// Number of addresses covered by the prefix
    pub fn size(&self) -> u128 {
        let host_bits = u32::from(Self::max_prefix(self.address) - self.effective_prefix());
        1u128.checked_shl(host_bits).unwrap_or(u128::MAX)
    }

    /// Usable IPv4 host addresses (network and broadcast excluded below /31)
    ///
    /// Empty for IPv6.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> {
        let (first, last) = match (self.address, self.netmask()) {
            (IpAddr::V4(address), IpAddr::V4(mask)) => {
                let network = u32::from(address) & u32::from(mask);
                let broadcast = network | !u32::from(mask);
                if self.effective_prefix() >= 31 {
                    (network, broadcast)
                } else {
                    (network + 1, broadcast - 1)
                }
            }
            _ => (1, 0),
        };

        (first..=last).map(Ipv4Addr::from)
    }

    /// Get as CIDR notation string
    pub fn as_cidr(&self) -> String {
        if let Some(prefix) = self.prefix_length {
            format!("{}/{}", self.address, prefix)
        } else {
            self.address.to_string()
        }
    }
}

impl fmt::Display for IpInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cidr())
    }
}

impl FromStr for IpInterface {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<IpAddr> for IpInterface {
    fn from(address: IpAddr) -> Self {
        Self {
            address,
            prefix_length: None,
        }
    }
}

impl From<IpInterface> for IpAddr {
    fn from(interface: IpInterface) -> Self {
        interface.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_address_cidr() {
        let ip = IpInterface::new("192.168.1.10/24").unwrap();
        assert_eq!(ip.address().to_string(), "192.168.1.10");
        assert_eq!(ip.prefix_length(), Some(24));
        assert!(ip.is_ipv4());
        assert_eq!(ip.as_cidr(), "192.168.1.10/24");
    }

    #[test]
    fn test_ip_address_without_cidr() {
        let ip = IpInterface::new("192.168.1.10").unwrap();
        assert_eq!(ip.prefix_length(), None);
        assert_eq!(ip.effective_prefix(), 32);
        assert_eq!(ip.as_cidr(), "192.168.1.10");
    }

    #[test]
    fn test_ipv6_address() {
        let ip = IpInterface::new("2001:db8::1/64").unwrap();
        assert!(ip.is_ipv6());
        assert_eq!(ip.prefix_length(), Some(64));
        assert_eq!(ip.broadcast(), None);
        assert_eq!(IpInterface::new("1:db8:a0b:12f0::1").unwrap().effective_prefix(), 128);
    }

    #[test]
    fn test_invalid_ip() {
        assert!(IpInterface::new("999.999.999.999").is_err());
        assert!(IpInterface::new("244.10.10.1.4").is_err());
        assert!(IpInterface::new("2001:0db8:85a3:0000:0000:8a2e:0370:7334:1234").is_err());
        assert_eq!(
            IpInterface::new("192.168.1.10/33"),
            Err(NetworkError::InvalidPrefixLength(33))
        );
        assert!(IpInterface::new("2001:db8::1/129").is_err());
        assert_eq!(
            IpInterface::new("10.0.0.1/300"),
            Err(NetworkError::InvalidCidr("10.0.0.1/300".to_string()))
        );
        assert_eq!(
            IpInterface::new("10.0.0.1/"),
            Err(NetworkError::InvalidCidr("10.0.0.1/".to_string()))
        );
    }

    #[test]
    fn test_netmask_notation() {
        assert_eq!(
            IpInterface::new("192.10.10.1/255.254.0.0").unwrap().prefix_length(),
            Some(15)
        );
        assert_eq!(
            IpInterface::new("192.10.10.1/255.0.255.0"),
            Err(NetworkError::InvalidNetmask("255.0.255.0".to_string()))
        );
        assert!(IpInterface::new("192.10.10.1/ffff::").is_err());
    }

    #[test]
    fn test_network_properties() {
        let net = IpInterface::new("192.0.2.0/24").unwrap();
        assert_eq!(net.broadcast().unwrap().to_string(), "192.0.2.255");
        assert_eq!(net.netmask().to_string(), "255.255.255.0");
        assert_eq!(net.size(), 256);
        assert_eq!(
            IpInterface::new("192.10.0.0/18").unwrap().netmask().to_string(),
            "255.255.192.0"
        );
        assert_eq!(IpInterface::new("10.0.0.0/0").unwrap().netmask().to_string(), "0.0.0.0");
    }

    #[test]
    fn test_hosts() {
        let hosts: Vec<String> = IpInterface::new("192.0.2.16/29")
            .unwrap()
            .hosts()
            .map(|host| host.to_string())
            .collect();
        assert_eq!(
            hosts,
            vec![
                "192.0.2.17",
                "192.0.2.18",
                "192.0.2.19",
                "192.0.2.20",
                "192.0.2.21",
                "192.0.2.22"
            ]
        );
        assert_eq!(IpInterface::new("10.0.0.1/32").unwrap().hosts().count(), 1);
        assert_eq!(IpInterface::new("2001:db8::1/64").unwrap().hosts().count(), 0);
    }
}
