//! # Nano Opcode Definitions
//!
//! Opcodes occupy the low 5 bits of the first instruction byte. Value 0x00 is
//! left unassigned so that zeroed memory never decodes as an instruction.
//!
//! ## Opcode Families
//!
//! - 0x01-0x0A: Arithmetic and bitwise (ADD, SUB, MUL, DIV, MOD, AND, OR, XOR, SHL, SHR)
//! - 0x0B: Data movement (MOV)
//! - 0x0C-0x0D: In-place update (INC, DEC)
//! - 0x0E-0x0F: Stack (PUSH, POP)
//! - 0x10: Compare (CMP)
//! - 0x11-0x14: Conditional relative jumps (JZ, JNZ, JG, JS)
//! - 0x15-0x16: System (PRINTI, HALT)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction opcode (5 bits, values 0x01-0x16)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Arithmetic / bitwise (0x01-0x0A) ==========
    /// ADD: dst = dst + src
    Add = 0x01,
    /// SUB: dst = dst - src
    Sub = 0x02,
    /// MUL: dst = dst * src
    Mul = 0x03,
    /// DIV: dst = dst / src (unsigned)
    Div = 0x04,
    /// MOD: dst = dst % src (unsigned)
    Mod = 0x05,
    /// AND: dst = dst & src
    And = 0x06,
    /// OR: dst = dst | src
    Or = 0x07,
    /// XOR: dst = dst ^ src
    Xor = 0x08,
    /// SHL: dst = dst << src
    Shl = 0x09,
    /// SHR: dst = dst >> src (logical)
    Shr = 0x0A,

    // ========== Data movement (0x0B) ==========
    /// MOV: dst = src
    Mov = 0x0B,

    // ========== In-place update (0x0C-0x0D) ==========
    /// INC: src = src + 1
    Inc = 0x0C,
    /// DEC: src = src - 1
    Dec = 0x0D,

    // ========== Stack (0x0E-0x0F) ==========
    /// PUSH: stack[sp] = src; sp += width
    Push = 0x0E,
    /// POP: sp -= width; src = stack[sp]
    Pop = 0x0F,

    // ========== Compare (0x10) ==========
    /// CMP: flags = compare(dst, src) (unsigned)
    Cmp = 0x10,

    // ========== Jumps (0x11-0x14) ==========
    /// JZ: if flags == zero, ip += src
    Jz = 0x11,
    /// JNZ: if flags != zero, ip += src
    Jnz = 0x12,
    /// JG: if flags == greater, ip += src
    Jg = 0x13,
    /// JS: if flags == smaller, ip += src
    Js = 0x14,

    // ========== System (0x15-0x16) ==========
    /// PRINTI: write src to the output stream
    Printi = 0x15,
    /// HALT: stop execution
    Halt = 0x16,
}

impl Opcode {
    /// Opcode width in bits
    pub const BITS: usize = 5;

    /// Opcode mask (0x1F for 5 bits)
    pub const MASK: u8 = 0x1F;

    /// Every opcode, in encoding order
    pub const ALL: [Opcode; 22] = [
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Shl,
        Opcode::Shr,
        Opcode::Mov,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Cmp,
        Opcode::Jz,
        Opcode::Jnz,
        Opcode::Jg,
        Opcode::Js,
        Opcode::Printi,
        Opcode::Halt,
    ];

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Opcode::Add),
            0x02 => Some(Opcode::Sub),
            0x03 => Some(Opcode::Mul),
            0x04 => Some(Opcode::Div),
            0x05 => Some(Opcode::Mod),
            0x06 => Some(Opcode::And),
            0x07 => Some(Opcode::Or),
            0x08 => Some(Opcode::Xor),
            0x09 => Some(Opcode::Shl),
            0x0A => Some(Opcode::Shr),
            0x0B => Some(Opcode::Mov),
            0x0C => Some(Opcode::Inc),
            0x0D => Some(Opcode::Dec),
            0x0E => Some(Opcode::Push),
            0x0F => Some(Opcode::Pop),
            0x10 => Some(Opcode::Cmp),
            0x11 => Some(Opcode::Jz),
            0x12 => Some(Opcode::Jnz),
            0x13 => Some(Opcode::Jg),
            0x14 => Some(Opcode::Js),
            0x15 => Some(Opcode::Printi),
            0x16 => Some(Opcode::Halt),
            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Number of operands the instruction takes in source
    pub const fn arity(self) -> usize {
        match self {
            Opcode::Halt => 0,
            Opcode::Inc
            | Opcode::Dec
            | Opcode::Push
            | Opcode::Pop
            | Opcode::Jz
            | Opcode::Jnz
            | Opcode::Jg
            | Opcode::Js
            | Opcode::Printi => 1,
            _ => 2,
        }
    }

    /// Source-level mnemonic
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Mod => "mod",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::Shl => "shl",
            Opcode::Shr => "shr",
            Opcode::Mov => "mov",
            Opcode::Inc => "inc",
            Opcode::Dec => "dec",
            Opcode::Push => "push",
            Opcode::Pop => "pop",
            Opcode::Cmp => "cmp",
            Opcode::Jz => "jz",
            Opcode::Jnz => "jnz",
            Opcode::Jg => "jg",
            Opcode::Js => "js",
            Opcode::Printi => "printi",
            Opcode::Halt => "halt",
        }
    }

    /// Check if this is a conditional jump
    #[inline]
    pub const fn is_jump(self) -> bool {
        matches!(self, Opcode::Jz | Opcode::Jnz | Opcode::Jg | Opcode::Js)
    }

    /// Check if this is a two-operand arithmetic or bitwise opcode
    #[inline]
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::Div
                | Opcode::Mod
                | Opcode::And
                | Opcode::Or
                | Opcode::Xor
                | Opcode::Shl
                | Opcode::Shr
        )
    }

    /// Check if executing the opcode stores into one of its operands
    #[inline]
    pub const fn writes_operand(self) -> bool {
        self.is_arithmetic() || matches!(self, Opcode::Mov | Opcode::Inc | Opcode::Dec | Opcode::Pop)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
