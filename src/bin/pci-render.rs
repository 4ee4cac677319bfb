// Copyright (c) 2025 - Cowboy AI, Inc.
//! PCI Address Renderer
//!
//! Prints every PCI address given on the command line in the notations used
//! by lspci, sbdf tooling, pciconf and nvmcheck.
//!
//! Run with: cargo run --bin pci-render -- 0000:5e:00.1 ff:1f.7
//!
//! Environment:
//! - `PCI_RENDER_FORMAT`: `all` (default), `lspci`, `lspci_short`, `sbdf`,
//!   `sbdf_full_width`, `pciconf` or `nvmcheck`
//! - `RUST_LOG`: log filter

use anyhow::{bail, Context, Result};
use cim_typing::PciAddress;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Notation to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderFormat {
    All,
    Lspci,
    LspciShort,
    Sbdf,
    SbdfFullWidth,
    Pciconf,
    Nvmcheck,
}

impl RenderFormat {
    const EACH: [RenderFormat; 6] = [
        Self::Lspci,
        Self::LspciShort,
        Self::Sbdf,
        Self::SbdfFullWidth,
        Self::Pciconf,
        Self::Nvmcheck,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Lspci => "lspci",
            Self::LspciShort => "lspci_short",
            Self::Sbdf => "sbdf",
            Self::SbdfFullWidth => "sbdf_full_width",
            Self::Pciconf => "pciconf",
            Self::Nvmcheck => "nvmcheck",
        }
    }

    fn render(&self, address: &PciAddress) -> String {
        match self {
            Self::All => Self::EACH
                .iter()
                .map(|format| format!("{:<16} {}", format.as_str(), format.render(address)))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Lspci => address.lspci(),
            Self::LspciShort => address.lspci_short(),
            Self::Sbdf => address.sbdf(),
            Self::SbdfFullWidth => address.sbdf_full_width(),
            Self::Pciconf => address.pciconf(),
            Self::Nvmcheck => address.nvmcheck_bdf(),
        }
    }
}

impl FromStr for RenderFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        std::iter::once(Self::All)
            .chain(Self::EACH)
            .find(|format| format.as_str() == wanted)
            .with_context(|| format!("Unknown render format: {s}"))
    }
}

/// Configuration for the renderer
#[derive(Debug, Clone)]
struct RenderConfig {
    /// Notation to print
    format: RenderFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: RenderFormat::All,
        }
    }
}

impl RenderConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let format = match std::env::var("PCI_RENDER_FORMAT") {
            Ok(value) => value
                .parse()
                .context("PCI_RENDER_FORMAT is not a supported format")?,
            Err(_) => RenderConfig::default().format,
        };

        Ok(Self { format })
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RenderConfig::from_env()?;
    debug!(format = config.format.as_str(), "configuration loaded");

    let inputs: Vec<String> = std::env::args().skip(1).collect();
    if inputs.is_empty() {
        bail!("usage: pci-render <pci-address>...");
    }

    let mut failures = 0usize;
    for input in &inputs {
        match input.parse::<PciAddress>() {
            Ok(address) => {
                if config.format == RenderFormat::All {
                    println!("{input}");
                }
                println!("{}", config.format.render(&address));
            }
            Err(err) => {
                warn!(input = input.as_str(), error = %err, "skipping address");
                failures += 1;
            }
        }
    }

    info!(rendered = inputs.len() - failures, failures, "done");
    if failures > 0 {
        bail!("{failures} of {} addresses could not be parsed", inputs.len());
    }

    Ok(())
}
