//! # Error Types for the Nano ISA

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    // Instruction errors
    #[error("Unknown opcode: {0:#04x}")]
    UnknownOpcode(u8),

    #[error("Truncated instruction: needed {needed} bytes, {available} available")]
    TruncatedInstruction { needed: usize, available: usize },
}

impl SpecError {
    /// Opcode value when decoding failed on an unassigned opcode
    pub fn unknown_opcode(&self) -> Option<u8> {
        match self {
            SpecError::UnknownOpcode(op) => Some(*op),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpecError::UnknownOpcode(0x1f);
        assert_eq!(err.to_string(), "Unknown opcode: 0x1f");

        let err = SpecError::TruncatedInstruction {
            needed: 10,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "Truncated instruction: needed 10 bytes, 4 available"
        );
    }

    #[test]
    fn test_config_error_from() {
        let err: SpecError = ConfigError::ZeroPageSize.into();
        assert!(err.to_string().starts_with("Invalid configuration"));
        assert_eq!(err.unknown_opcode(), None);
    }
}
