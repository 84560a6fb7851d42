//! Assembly parser
//!
//! Turns one prepared line into a decoded [`Instruction`].

use crate::error::{AssemblerError, Result};
use nano_spec::{
    encode_immediate, lookup_opcode, lookup_register, ImmediateError, Instruction, Operand, Register,
};

/// Prefix marking a memory-indirect operand
pub const INDIRECT_PREFIX: char = '@';

/// Why a single operand failed to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    NotARegister,
    Immediate(ImmediateError),
}

/// Split a leading `@` off an operand token
pub fn split_indirect(token: &str) -> (&str, bool) {
    match token.strip_prefix(INDIRECT_PREFIX) {
        Some(rest) => (rest, true),
        None => (token, false),
    }
}

/// Parse register name
pub fn parse_register(token: &str) -> std::result::Result<Register, OperandError> {
    lookup_register(token).ok_or(OperandError::NotARegister)
}

/// Parse a source operand: register at full width, else immediate at minimal width
pub fn parse_operand(token: &str) -> std::result::Result<Operand, OperandError> {
    let (body, indirect) = split_indirect(token);
    let operand = match lookup_register(body) {
        Some(reg) => Operand::register(reg),
        None => {
            let imm = encode_immediate(body).map_err(OperandError::Immediate)?;
            Operand::immediate(imm.value)
        }
    };
    Ok(if indirect { operand.indirect() } else { operand })
}

/// Parse a single prepared line
///
/// `line` is the 1-based source line number used in diagnostics. Empty
/// lines produce `None`.
pub fn parse_instruction(line: usize, text: &str) -> Result<Option<Instruction>> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let Some((&mnemonic, operands)) = parts.split_first() else {
        return Ok(None);
    };

    let opcode = lookup_opcode(mnemonic).ok_or_else(|| AssemblerError::UnknownInstruction {
        line,
        text: text.to_string(),
        mnemonic: mnemonic.to_string(),
    })?;

    if operands.len() != opcode.arity() {
        return Err(AssemblerError::ArityMismatch {
            line,
            text: text.to_string(),
            mnemonic: mnemonic.to_string(),
            expected: opcode.arity(),
            received: operands.len(),
        });
    }

    let source = |token: &str| {
        parse_operand(token).map_err(|e| match e {
            OperandError::Immediate(ImmediateError::Overflow(_)) => AssemblerError::IntegerTooLarge {
                line,
                text: text.to_string(),
                token: token.to_string(),
            },
            _ => AssemblerError::UnknownParameter {
                line,
                text: text.to_string(),
                token: token.to_string(),
            },
        })
    };

    let instr = match *operands {
        [] => Instruction::Nullary { opcode },
        [src] => Instruction::Unary {
            opcode,
            src: source(src)?,
        },
        [dst, src] => {
            let (dst_name, dst_indirect) = split_indirect(dst);
            let dst = parse_register(dst_name).map_err(|_| AssemblerError::InvalidRegister {
                line,
                text: text.to_string(),
                token: dst_name.to_string(),
            })?;
            Instruction::Binary {
                opcode,
                dst,
                dst_indirect,
                src: source(src)?,
            }
        }
        // arity never exceeds 2 and the count was checked above
        _ => unreachable!("opcode {opcode} has arity {}", opcode.arity()),
    };

    Ok(Some(instr))
}
