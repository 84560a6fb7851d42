//! Runtime error types

use nano_spec::{Opcode, SpecError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Spec error: {0}")]
    SpecError(#[from] SpecError),

    #[error("IP out of bounds: {ip:#x} (code size {code_size:#x})")]
    IpOutOfBounds { ip: u64, code_size: usize },

    #[error("Tried to read/write memory outside of VM: {width} bytes at {address:#x}")]
    MemoryAccessViolation { address: u64, width: usize },

    #[error("Stack overflow: sp {sp}, pushing {width} bytes, stack size {stack_size}")]
    StackOverflow { sp: u64, width: usize, stack_size: usize },

    #[error("Stack underflow: sp {sp}, popping {width} bytes")]
    StackUnderflow { sp: u64, width: usize },

    #[error("Invalid instruction at {ip:#x}: opcode {opcode:#04x}")]
    InvalidInstruction { ip: u64, opcode: u8 },

    #[error("Division by zero at IP {ip:#x}")]
    DivisionByZero { ip: u64 },

    #[error("{opcode} at IP {ip:#x} cannot store into an immediate")]
    ImmediateDestination { ip: u64, opcode: Opcode },

    #[error("Cycle limit exceeded: {limit}")]
    CycleLimitExceeded { limit: u64 },

    #[error("VM already faulted: {reason}")]
    Faulted { reason: String },

    #[error("Cannot allocate {bytes} bytes of VM memory")]
    AllocationFailed { bytes: usize },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RuntimeError {
    /// True for errors raised by executing the program itself
    pub fn is_fault(&self) -> bool {
        !matches!(
            self,
            RuntimeError::SpecError(_) | RuntimeError::IoError(_) | RuntimeError::AllocationFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
