// Copyright (c) 2025 - Cowboy AI, Inc.
//! Operating System Classification
//!
//! Vocabulary for describing which operating system a host runs:
//! [`OsName`] (the concrete system), [`OsType`] (its family), [`OsBitness`]
//! and [`WindowsFlavour`] (the Windows release, derived from a kernel build).
//! [`IpuHostType`] names the compute complexes of an infrastructure processing unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// OS value error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OsValueError {
    #[error("Invalid Windows kernel version: {0}")]
    InvalidWindowsKernel(String),

    #[error("Unknown Windows kernel version: {0}")]
    UnknownWindowsKernelVersion(u32),

    #[error("Unknown OS name: {0}")]
    UnknownOsName(String),
}

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsType {
    Windows,
    Posix,
    Switch,
}

/// Concrete operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsName {
    Windows,
    Linux,
    FreeBsd,
    Esxi,
    EfiShell,
    /// Mellanox/NVIDIA Onyx switch OS
    Mellanox,
}

impl OsName {
    /// Every known OS name
    pub const ALL: [OsName; 6] = [
        Self::Windows,
        Self::Linux,
        Self::FreeBsd,
        Self::Esxi,
        Self::EfiShell,
        Self::Mellanox,
    ];

    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::FreeBsd => "freebsd",
            Self::Esxi => "esxi",
            Self::EfiShell => "efishell",
            Self::Mellanox => "mellanox",
        }
    }

    /// Family this OS belongs to
    pub fn os_type(&self) -> OsType {
        match self {
            Self::Windows => OsType::Windows,
            Self::Linux | Self::FreeBsd | Self::Esxi | Self::EfiShell => OsType::Posix,
            Self::Mellanox => OsType::Switch,
        }
    }

    /// Identify a switch OS from its version banner
    pub fn detect_switch(banner: &str) -> Option<Self> {
        let banner = banner.to_lowercase();
        SWITCH_OS_NAME_PATTERNS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| banner.contains(keyword)))
            .map(|(name, _)| *name)
    }
}

impl fmt::Display for OsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OsName {
    type Err = OsValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == wanted)
            .ok_or_else(|| OsValueError::UnknownOsName(s.to_string()))
    }
}

/// Lowercase keywords identifying switch operating systems in version banners
pub const SWITCH_OS_NAME_PATTERNS: &[(OsName, &[&str])] =
    &[(OsName::Mellanox, &["mellanox", "onyx", "mlnx-os"])];

/// Operating system word size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsBitness {
    #[serde(rename = "32bit")]
    Os32Bit,
    #[serde(rename = "64bit")]
    Os64Bit,
}

impl OsBitness {
    /// Width of a machine word in bits
    pub fn bits(&self) -> u32 {
        match self {
            Self::Os32Bit => 32,
            Self::Os64Bit => 64,
        }
    }
}

/// Windows release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowsFlavour {
    WindowsServer2012,
    WindowsServer2012R2,
    WindowsServer2016,
    WindowsServer2019,
    WindowsServer2022,
    WindowsServer2025,
}

impl WindowsFlavour {
    /// Kernel build number and release, oldest first
    const KERNEL_BUILDS: [(u32, WindowsFlavour); 6] = [
        (9200, Self::WindowsServer2012),
        (9600, Self::WindowsServer2012R2),
        (14393, Self::WindowsServer2016),
        (17763, Self::WindowsServer2019),
        (20348, Self::WindowsServer2022),
        (26100, Self::WindowsServer2025),
    ];

    /// Resolve the release from a kernel build number such as `"14393"`
    pub fn from_kernel_version(kernel_version: &str) -> Result<Self, OsValueError> {
        let build: u32 = kernel_version
            .trim()
            .parse()
            .map_err(|_| OsValueError::InvalidWindowsKernel(kernel_version.to_string()))?;

        Self::KERNEL_BUILDS
            .iter()
            .find(|(known, _)| *known == build)
            .map(|(_, flavour)| *flavour)
            .ok_or_else(|| {
                warn!(build, "unknown Windows kernel build");
                OsValueError::UnknownWindowsKernelVersion(build)
            })
    }

    /// Kernel build number of this release
    pub fn kernel_build(&self) -> u32 {
        Self::KERNEL_BUILDS
            .iter()
            .find(|(_, flavour)| flavour == self)
            .map(|(build, _)| *build)
            .unwrap_or_default()
    }

    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WindowsServer2012 => "Windows Server 2012",
            Self::WindowsServer2012R2 => "Windows Server 2012 R2",
            Self::WindowsServer2016 => "Windows Server 2016",
            Self::WindowsServer2019 => "Windows Server 2019",
            Self::WindowsServer2022 => "Windows Server 2022",
            Self::WindowsServer2025 => "Windows Server 2025",
        }
    }
}

impl fmt::Display for WindowsFlavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Host role on an infrastructure processing unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpuHostType {
    Xhc,
    Imc,
    Acc,
    Lp,
    Sh,
}

impl IpuHostType {
    /// Every host type, in declaration order
    pub const ALL: [IpuHostType; 5] = [Self::Xhc, Self::Imc, Self::Acc, Self::Lp, Self::Sh];

    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xhc => "xhc",
            Self::Imc => "imc",
            Self::Acc => "acc",
            Self::Lp => "lp",
            Self::Sh => "sh",
        }
    }

    /// Upper-case name, e.g. `IMC`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Xhc => "XHC",
            Self::Imc => "IMC",
            Self::Acc => "ACC",
            Self::Lp => "LP",
            Self::Sh => "SH",
        }
    }
}

impl fmt::Display for IpuHostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
