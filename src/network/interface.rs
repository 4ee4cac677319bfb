// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Interface Roles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a network interface plays on its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceType {
    /// Interface with no special role
    Generic,
    /// Physical Ethernet controller
    EthController,
    /// Software-only device (tap, veth, ...)
    VirtualDevice,
    /// SR-IOV physical function
    Pf,
    /// SR-IOV virtual function
    Vf,
    /// Virtual port of a switchdev/IPU
    Vport,
    /// Link aggregation master
    Bond,
    /// Member of a link aggregation
    BondSlave,
    /// 802.1Q VLAN sub-interface
    Vlan,
    /// ESXi physical uplink
    Vmnic,
    /// Hyper-V synthetic adapter
    Vmbus,
    /// Out-of-band management port
    Management,
}

impl InterfaceType {
    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::EthController => "eth_controller",
            Self::VirtualDevice => "virtual_device",
            Self::Pf => "pf",
            Self::Vf => "vf",
            Self::Vport => "vport",
            Self::Bond => "bond",
            Self::BondSlave => "bond_slave",
            Self::Vlan => "vlan",
            Self::Vmnic => "vmnic",
            Self::Vmbus => "vmbus",
            Self::Management => "management",
        }
    }

    /// Check if this interface is part of a link aggregation
    pub fn is_bonding(&self) -> bool {
        matches!(self, Self::Bond | Self::BondSlave)
    }

    /// Check if this is an SR-IOV function
    pub fn is_sriov(&self) -> bool {
        matches!(self, Self::Pf | Self::Vf)
    }
}

impl Default for InterfaceType {
    fn default() -> Self {
        Self::Generic
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
