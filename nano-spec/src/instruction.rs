//! Decoded instruction representation

use crate::{Opcode, Register, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation width: how many bytes of the addressed location participate.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Width {
    Byte = 0b00,
    Short = 0b01,
    Dword = 0b10,
    Qword = 0b11,
}

impl Width {
    pub const ALL: [Width; 4] = [Width::Byte, Width::Short, Width::Dword, Width::Qword];

    /// Decode the 2-bit width selector
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Width::Byte,
            0b01 => Width::Short,
            0b10 => Width::Dword,
            _ => Width::Qword,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Size in bytes
    #[inline]
    pub const fn bytes(self) -> usize {
        1 << (self as u8)
    }

    /// Narrowest width whose unsigned range holds `value`
    pub const fn for_value(value: Word) -> Self {
        if value <= u8::MAX as Word {
            Width::Byte
        } else if value <= u16::MAX as Word {
            Width::Short
        } else if value <= u32::MAX as Word {
            Width::Dword
        } else {
            Width::Qword
        }
    }

    /// All-ones mask covering the width
    #[inline]
    pub const fn mask(self) -> Word {
        match self {
            Width::Qword => Word::MAX,
            _ => (1 << (8 * self.bytes())) - 1,
        }
    }

    /// Keep only the low `bytes()` bytes (zero extension back to 64 bits)
    #[inline]
    pub const fn truncate(self, value: Word) -> Word {
        value & self.mask()
    }

    /// Interpret the low `bytes()` bytes as a two's-complement number
    #[inline]
    pub const fn sign_extend(self, value: Word) -> i64 {
        match self {
            Width::Byte => value as u8 as i8 as i64,
            Width::Short => value as u16 as i16 as i64,
            Width::Dword => value as u32 as i32 as i64,
            Width::Qword => value as i64,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Width::Byte => "byte",
            Width::Short => "short",
            Width::Dword => "dword",
            Width::Qword => "qword",
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an operand names before indirection is applied
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperandValue {
    Register(Register),
    Immediate(Word),
}

/// Source operand with its operation width and memory-indirect flag
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Operand {
    pub value: OperandValue,
    pub width: Width,
    /// Use the value as an offset into VM memory
    pub indirect: bool,
}

impl Operand {
    /// Register operand at full width, as the assembler emits it
    pub const fn register(reg: Register) -> Self {
        Self {
            value: OperandValue::Register(reg),
            width: Width::Qword,
            indirect: false,
        }
    }

    /// Immediate operand at the narrowest width holding `value`
    pub const fn immediate(value: Word) -> Self {
        Self {
            value: OperandValue::Immediate(value),
            width: Width::for_value(value),
            indirect: false,
        }
    }

    pub const fn indirect(mut self) -> Self {
        self.indirect = true;
        self
    }

    pub const fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    #[inline]
    pub const fn is_immediate(&self) -> bool {
        matches!(self.value, OperandValue::Immediate(_))
    }

    /// Bytes this operand contributes after the opcode byte
    #[inline]
    pub const fn encoded_len(&self) -> usize {
        match self.value {
            OperandValue::Register(_) => 1,
            OperandValue::Immediate(_) => 1 + self.width.bytes(),
        }
    }
}

/// Decoded instruction, shaped by the opcode's arity
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// No operands (HALT)
    Nullary { opcode: Opcode },
    /// One source operand (INC, DEC, PUSH, POP, jumps, PRINTI)
    Unary { opcode: Opcode, src: Operand },
    /// Destination register plus source operand
    Binary {
        opcode: Opcode,
        dst: Register,
        dst_indirect: bool,
        src: Operand,
    },
}

impl Instruction {
    pub const fn halt() -> Self {
        Instruction::Nullary { opcode: Opcode::Halt }
    }

    pub const fn unary(opcode: Opcode, src: Operand) -> Self {
        Instruction::Unary { opcode, src }
    }

    pub const fn binary(opcode: Opcode, dst: Register, src: Operand) -> Self {
        Instruction::Binary {
            opcode,
            dst,
            dst_indirect: false,
            src,
        }
    }

    #[inline]
    pub const fn opcode(&self) -> Opcode {
        match self {
            Instruction::Nullary { opcode }
            | Instruction::Unary { opcode, .. }
            | Instruction::Binary { opcode, .. } => *opcode,
        }
    }

    #[inline]
    pub const fn source(&self) -> Option<&Operand> {
        match self {
            Instruction::Nullary { .. } => None,
            Instruction::Unary { src, .. } | Instruction::Binary { src, .. } => Some(src),
        }
    }

    /// Width the instruction operates at (qword for HALT)
    #[inline]
    pub const fn width(&self) -> Width {
        match self.source() {
            Some(src) => src.width,
            None => Width::Qword,
        }
    }

    /// Total encoded length in bytes
    #[inline]
    pub const fn len(&self) -> usize {
        match self.source() {
            Some(src) => 1 + src.encoded_len(),
            None => 1,
        }
    }

    /// True when the shape agrees with the opcode's arity
    pub const fn is_well_formed(&self) -> bool {
        let arity = match self {
            Instruction::Nullary { .. } => 0,
            Instruction::Unary { .. } => 1,
            Instruction::Binary { .. } => 2,
        };
        arity == self.opcode().arity()
    }
}
