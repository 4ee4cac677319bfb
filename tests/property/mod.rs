// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Parsing and rendering must agree for every value in range, and ordering
//! must follow the bus topology.

mod mac_address;
mod pci_address;
mod pci_identifier;
