//! # Instruction Encoding Constants and Helpers
//!
//! Shared bit-level contract between the assembler and the VM.
//!
//! ## Instruction Format (variable length)
//!
//! ```text
//! byte 0:    [dst:3][opcode:5]                         dst only for binary opcodes
//! byte 1:    [type:1][width:2][src_mem:1][dst_mem:1][src:3]
//! bytes 2..: immediate, little-endian, 1/2/4/8 bytes  only when type = immediate
//! ```
//!
//! Lengths: 1 (nullary), 2 (register source), 3/4/6/10 (immediate source of
//! byte/short/dword/qword width).

use crate::instruction::{Instruction, Operand, OperandValue, Width};
use crate::{Opcode, Register, SpecError, Word};

// ============================================================================
// Byte 0
// ============================================================================

/// Opcode field: bits 0-4
pub const OPCODE_MASK: u8 = 0x1F;

/// Destination register field: bits 5-7
pub const DST_REG_SHIFT: u32 = 5;

/// Destination register mask (after shifting)
pub const DST_REG_MASK: u8 = 0x07;

// ============================================================================
// Byte 1
// ============================================================================

/// Source type bit: set for immediate sources
pub const SRC_TYPE_IMMEDIATE: u8 = 0b1000_0000;

/// Width selector: bits 5-6
pub const WIDTH_SHIFT: u32 = 5;

/// Width selector mask (in place)
pub const WIDTH_MASK: u8 = 0b0110_0000;

/// Source is memory-indirect
pub const SRC_MEM: u8 = 0b0001_0000;

/// Destination is memory-indirect (binary opcodes only)
pub const DST_MEM: u8 = 0b0000_1000;

/// Source register field: bits 0-2
pub const SRC_REG_MASK: u8 = 0b0000_0111;

// ============================================================================
// Field Extraction Functions
// ============================================================================

#[inline]
pub const fn extract_opcode(byte0: u8) -> u8 {
    byte0 & OPCODE_MASK
}

#[inline]
pub const fn extract_dst(byte0: u8) -> u8 {
    (byte0 >> DST_REG_SHIFT) & DST_REG_MASK
}

#[inline]
pub const fn extract_width(byte1: u8) -> Width {
    Width::from_bits((byte1 & WIDTH_MASK) >> WIDTH_SHIFT)
}

#[inline]
pub const fn extract_src_reg(byte1: u8) -> u8 {
    byte1 & SRC_REG_MASK
}

#[inline]
pub const fn is_immediate_source(byte1: u8) -> bool {
    byte1 & SRC_TYPE_IMMEDIATE != 0
}

// ============================================================================
// Encoding
// ============================================================================

/// Build byte 0 from an opcode and destination register index
#[inline]
pub const fn encode_opcode_byte(opcode: Opcode, dst: u8) -> u8 {
    ((dst & DST_REG_MASK) << DST_REG_SHIFT) | (opcode.to_u8() & OPCODE_MASK)
}

/// Build byte 1 from a source operand and the destination-indirect flag
pub const fn encode_operand_byte(src: &Operand, dst_indirect: bool) -> u8 {
    let mut byte = src.width.bits() << WIDTH_SHIFT;
    if src.indirect {
        byte |= SRC_MEM;
    }
    if dst_indirect {
        byte |= DST_MEM;
    }
    match src.value {
        OperandValue::Register(reg) => byte | (reg as u8 & SRC_REG_MASK),
        OperandValue::Immediate(_) => byte | SRC_TYPE_IMMEDIATE,
    }
}

fn encode_operand(src: &Operand, dst_indirect: bool, out: &mut Vec<u8>) {
    out.push(encode_operand_byte(src, dst_indirect));
    if let OperandValue::Immediate(value) = src.value {
        let bytes = src.width.truncate(value).to_le_bytes();
        out.extend_from_slice(&bytes[..src.width.bytes()]);
    }
}

/// Append the encoded form of `instr` to `out`
pub fn encode(instr: &Instruction, out: &mut Vec<u8>) {
    match instr {
        Instruction::Nullary { opcode } => out.push(encode_opcode_byte(*opcode, 0)),
        Instruction::Unary { opcode, src } => {
            out.push(encode_opcode_byte(*opcode, 0));
            encode_operand(src, false, out);
        }
        Instruction::Binary {
            opcode,
            dst,
            dst_indirect,
            src,
        } => {
            out.push(encode_opcode_byte(*opcode, *dst as u8));
            encode_operand(src, *dst_indirect, out);
        }
    }
}

impl Instruction {
    /// Encode into a fresh buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        encode(self, &mut out);
        out
    }
}

// ============================================================================
// Decoding
// ============================================================================

fn register(index: u8) -> Register {
    // the field is 3 bits wide, so every value names a register
    Register::ALL[(index & DST_REG_MASK) as usize]
}

fn read_immediate(bytes: &[u8], width: Width) -> Word {
    let mut raw = [0u8; 8];
    raw[..width.bytes()].copy_from_slice(&bytes[..width.bytes()]);
    Word::from_le_bytes(raw)
}

/// Decode the instruction at the start of `bytes`
///
/// Only the bytes covered by the instruction's length are consumed; any
/// trailing bytes are ignored.
pub fn decode(bytes: &[u8]) -> Result<Instruction, SpecError> {
    let byte0 = *bytes.first().ok_or(SpecError::TruncatedInstruction {
        needed: 1,
        available: 0,
    })?;
    let opcode = Opcode::from_u8(extract_opcode(byte0))
        .ok_or(SpecError::UnknownOpcode(extract_opcode(byte0)))?;

    if opcode.arity() == 0 {
        return Ok(Instruction::Nullary { opcode });
    }

    let byte1 = *bytes.get(1).ok_or(SpecError::TruncatedInstruction {
        needed: 2,
        available: bytes.len(),
    })?;
    let width = extract_width(byte1);
    let value = if is_immediate_source(byte1) {
        let needed = 2 + width.bytes();
        if bytes.len() < needed {
            return Err(SpecError::TruncatedInstruction {
                needed,
                available: bytes.len(),
            });
        }
        OperandValue::Immediate(read_immediate(&bytes[2..], width))
    } else {
        OperandValue::Register(register(extract_src_reg(byte1)))
    };
    let src = Operand {
        value,
        width,
        indirect: byte1 & SRC_MEM != 0,
    };

    if opcode.arity() == 1 {
        Ok(Instruction::Unary { opcode, src })
    } else {
        Ok(Instruction::Binary {
            opcode,
            dst: register(extract_dst(byte0)),
            dst_indirect: byte1 & DST_MEM != 0,
            src,
        })
    }
}
