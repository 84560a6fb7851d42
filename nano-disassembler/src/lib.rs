//! # Nano Disassembler
//!
//! Disassemble Nano bytecode into human-readable assembly.
//!
//! ## Example
//!
//! ```rust
//! use nano_spec::Program;
//! use nano_disassembler::disassemble;
//!
//! let program = Program::new(vec![0x0B, 0x80, 0x0A, 0x16]);
//! let listing = disassemble(&program);
//! assert!(listing.contains("mov reg0 10"));
//! ```

pub mod disassembler;
pub mod error;
pub mod formatter;

pub use disassembler::{decode_all, disassemble, to_source};
pub use error::{DisassemblerError, Result};
pub use formatter::{format, format_operand, jump_displacement};
