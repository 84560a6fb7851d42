//! General-purpose register definitions
//!
//! The control registers (ip, stack pointer, flags) are not part of this
//! enum: they cannot be named in source and are only reachable through the
//! VM state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of general-purpose registers
pub const NUM_REGISTERS: usize = 8;

/// Register (reg0-reg7)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
}

impl Register {
    pub const ALL: [Register; NUM_REGISTERS] = [
        Register::R0,
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R4,
        Register::R5,
        Register::R6,
        Register::R7,
    ];

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::R0 => "reg0",
            Self::R1 => "reg1",
            Self::R2 => "reg2",
            Self::R3 => "reg3",
            Self::R4 => "reg4",
            Self::R5 => "reg5",
            Self::R6 => "reg6",
            Self::R7 => "reg7",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
