// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for typed value construction

use thiserror::Error;

use crate::network::NetworkError;
use crate::os::OsValueError;
use crate::pci::PciError;
use crate::utils::ConversionError;

/// Errors that can occur while building or converting typed values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypingError {
    /// PCI identifier, device or address error
    #[error(transparent)]
    Pci(#[from] PciError),

    /// MAC or IP error
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Helper conversion error
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// OS value error
    #[error(transparent)]
    Os(#[from] OsValueError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for typed value operations
pub type TypingResult<T> = Result<T, TypingError>;

impl From<serde_json::Error> for TypingError {
    fn from(err: serde_json::Error) -> Self {
        TypingError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pci::PciAddress;

    fn parse_and_render(input: &str) -> TypingResult<String> {
        Ok(input.parse::<PciAddress>()?.sbdf())
    }

    #[test]
    fn test_module_errors_convert() {
        assert_eq!(parse_and_render("0000:5e:00.1").unwrap(), "00:094:00:01");
        assert!(matches!(parse_and_render("5e:00"), Err(TypingError::Pci(_))));

        let err: TypingError = OsValueError::UnknownWindowsKernelVersion(1).into();
        assert_eq!(err.to_string(), "Unknown Windows kernel version: 1");
    }

    #[test]
    fn test_json_error_converts() {
        let err: TypingError = serde_json::from_str::<PciAddress>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, TypingError::Serialization(_)));
    }
}
