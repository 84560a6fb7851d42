//! # Nano Runtime
//!
//! Virtual machine that executes Nano bytecode.
//!
//! Memory is one flat buffer: the code segment at address 0, padded to a
//! page boundary, followed by the stack segment. The stack pointer is an
//! offset into the stack segment and grows upward.
//!
//! ## Example
//!
//! ```rust
//! use nano_spec::Program;
//! use nano_runtime::{run, VMConfig};
//!
//! // mov reg0 10 / printi reg0 / halt
//! let program = Program::new(vec![0x0B, 0x80, 0x0A, 0x15, 0x60, 0x16]);
//! let result = run(&program, VMConfig::default()).unwrap();
//! assert_eq!(result.outputs, vec![10]);
//! ```

pub mod error;
pub mod execute;
pub mod io;
pub mod memory;
pub mod state;
pub mod vm;

pub use error::{Result, RuntimeError};
pub use io::IOHandler;
pub use memory::{Memory, MemoryRegion};
pub use state::{Flags, Status, VMState};
pub use vm::{ExecutionResult, VMConfig, VM};

use nano_spec::Program;

/// Run a program to completion with a recording-only sink
pub fn run(program: &Program, config: VMConfig) -> Result<ExecutionResult> {
    VM::new(program, config)?.run()
}
