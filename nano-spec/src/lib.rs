//! # Nano ISA Specification
//!
//! Minimal register-based instruction set with a bit-packed, variable-length
//! encoding.
//!
//! ## Key Features
//! - 22 opcodes in a 5-bit field
//! - 8 general-purpose 64-bit registers plus ip, stack pointer and flags
//! - Register, immediate and memory-indirect operands
//! - Immediates stored at 1, 2, 4 or 8 bytes (the narrowest that fits)
//! - Instructions are 1, 2, 3, 4, 6 or 10 bytes long
//! - Headerless bytecode: position in the stream is the address

pub mod catalog;
pub mod config;
pub mod encoding;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod register;

pub use catalog::{encode_immediate, lookup_opcode, lookup_register, Immediate, ImmediateError};
pub use config::{ConfigError, MemoryLayout};
pub use encoding::{decode, encode};
pub use error::SpecError;
pub use instruction::{Instruction, Operand, OperandValue, Width};
pub use opcode::Opcode;
pub use program::Program;
pub use register::{Register, NUM_REGISTERS};

/// Default page size; the code segment is padded to a multiple of it.
pub const PAGE_SIZE: usize = 4096;

/// Longest encoded instruction (opcode byte, operand byte, qword immediate).
pub const MAX_INSTRUCTION_LEN: usize = 10;

/// Word type of every register and memory operation.
pub type Word = u64;
