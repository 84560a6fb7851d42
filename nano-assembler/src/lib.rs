//! Nano Assembler
//!
//! Assemble Nano assembly language into headerless bytecode.
//!
//! ## Example
//!
//! ```rust
//! use nano_assembler::assemble;
//!
//! let source = r#"
//!     mov reg0, 10   ; load
//!     add reg0, 5
//!     printi reg0
//!     halt
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.len(), 3 + 3 + 2 + 1);
//! ```

pub mod assembler;
pub mod error;
pub mod lexer;
pub mod parser;

pub use assembler::{assemble, assemble_file, assemble_lines, output_path, BYTECODE_EXTENSION};
pub use error::{AssemblerError, Result};
pub use lexer::{prepare_line, prepare_lines};
pub use parser::{parse_instruction, parse_operand, parse_register};
