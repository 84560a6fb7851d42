//! # Program Format
//!
//! A program is the raw concatenation of encoded instructions. There is no
//! header, no trailer and no symbol table: offset in the buffer is the
//! instruction address.

use crate::encoding::{decode, encode};
use crate::{Instruction, SpecError};
use std::fs;
use std::io;
use std::path::Path;

/// Immutable bytecode buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    code: Vec<u8>,
}

impl Program {
    /// Wrap raw bytecode
    pub fn new(code: Vec<u8>) -> Self {
        Self { code }
    }

    /// Encode a sequence of instructions back to back
    pub fn from_instructions<'a>(instructions: impl IntoIterator<Item = &'a Instruction>) -> Self {
        let mut code = Vec::new();
        for instr in instructions {
            encode(instr, &mut code);
        }
        Self { code }
    }

    /// Copy raw bytecode from a slice
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }

    /// Raw bytecode
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Read a bytecode file
    pub fn read_from(path: impl AsRef<Path>) -> io::Result<Self> {
        fs::read(path).map(Self::new)
    }

    /// Write the bytecode verbatim
    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, &self.code)
    }

    /// Iterate over `(offset, instruction)` pairs in stream order
    ///
    /// Iteration stops after the first decode error, which is yielded.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            code: &self.code,
            offset: 0,
            failed: false,
        }
    }
}

impl From<Vec<u8>> for Program {
    fn from(code: Vec<u8>) -> Self {
        Self::new(code)
    }
}

impl AsRef<[u8]> for Program {
    fn as_ref(&self) -> &[u8] {
        &self.code
    }
}

/// Sequential decoder over a program
pub struct Instructions<'a> {
    code: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Iterator for Instructions<'a> {
    type Item = (usize, Result<Instruction, SpecError>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.code.len() {
            return None;
        }
        let offset = self.offset;
        match decode(&self.code[offset..]) {
            Ok(instr) => {
                self.offset += instr.len();
                Some((offset, Ok(instr)))
            }
            Err(e) => {
                self.failed = true;
                Some((offset, Err(e)))
            }
        }
    }
}
