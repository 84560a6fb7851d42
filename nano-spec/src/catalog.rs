//! # Catalog: mnemonic, register and immediate lookups
//!
//! Pure functions over static tables translating source-level tokens into
//! their binary encoding.

use crate::instruction::Width;
use crate::{Opcode, Register, Word};
use std::num::IntErrorKind;
use thiserror::Error;

/// Failure to turn a token into an immediate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImmediateError {
    #[error("not an integer literal: {0}")]
    UnknownToken(String),

    #[error("integer does not fit in 64 bits: {0}")]
    Overflow(String),
}

/// Immediate literal together with the width it will be encoded at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Immediate {
    pub value: Word,
    pub width: Width,
    raw: [u8; 8],
}

impl Immediate {
    /// Encode `value` at the narrowest width that holds it
    pub fn new(value: Word) -> Self {
        Self {
            value,
            width: Width::for_value(value),
            raw: value.to_le_bytes(),
        }
    }

    /// Little-endian value bytes, `width.bytes()` long
    pub fn bytes(&self) -> &[u8] {
        &self.raw[..self.width.bytes()]
    }
}

/// Case-insensitive mnemonic lookup
pub fn lookup_opcode(mnemonic: &str) -> Option<Opcode> {
    Opcode::ALL
        .into_iter()
        .find(|op| op.mnemonic().eq_ignore_ascii_case(mnemonic))
}

/// Case-insensitive register lookup (`reg0`-`reg7`)
pub fn lookup_register(token: &str) -> Option<Register> {
    Register::ALL
        .into_iter()
        .find(|reg| reg.name().eq_ignore_ascii_case(token))
}

fn parse_magnitude(digits: &str, token: &str) -> Result<Word, ImmediateError> {
    let lower = digits.to_ascii_lowercase();
    let (body, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (bin, 2)
    } else {
        (lower.as_str(), 10)
    };

    // from_str_radix accepts a leading '+', which is not part of the syntax
    if body.starts_with('+') {
        return Err(ImmediateError::UnknownToken(token.to_string()));
    }

    Word::from_str_radix(body, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ImmediateError::Overflow(token.to_string()),
        _ => ImmediateError::UnknownToken(token.to_string()),
    })
}

/// Parse a decimal, hex (`0x`) or binary (`0b`) literal
///
/// A leading `-` stores the 64-bit two's-complement pattern, so negative
/// literals always encode as qword.
pub fn encode_immediate(token: &str) -> Result<Immediate, ImmediateError> {
    let value = match token.strip_prefix('-') {
        Some(digits) => {
            let magnitude = parse_magnitude(digits, token)?;
            if magnitude > 1 << 63 {
                return Err(ImmediateError::Overflow(token.to_string()));
            }
            magnitude.wrapping_neg()
        }
        None => parse_magnitude(token, token)?,
    };
    Ok(Immediate::new(value))
}
