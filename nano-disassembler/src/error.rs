//! Disassembler errors

use nano_spec::SpecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("Decode failed at offset {offset:#06x}: {source}")]
    Decode {
        offset: usize,
        #[source]
        source: SpecError,
    },
}

impl DisassemblerError {
    /// Byte offset of the instruction that could not be decoded
    pub fn offset(&self) -> usize {
        match self {
            DisassemblerError::Decode { offset, .. } => *offset,
        }
    }
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
