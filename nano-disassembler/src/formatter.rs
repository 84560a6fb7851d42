//! Instruction formatting to assembly text

use nano_spec::{Instruction, Opcode, Operand, OperandValue};

/// Format instruction as assembly text the assembler accepts
pub fn format(instr: &Instruction) -> String {
    match instr {
        Instruction::Nullary { opcode } => opcode.mnemonic().to_string(),
        Instruction::Unary { opcode, src } => {
            format!("{} {}", opcode.mnemonic(), format_operand(src))
        }
        Instruction::Binary {
            opcode,
            dst,
            dst_indirect,
            src,
        } => {
            let at = if *dst_indirect { "@" } else { "" };
            format!("{} {}{} {}", opcode.mnemonic(), at, dst, format_operand(src))
        }
    }
}

/// Format a source operand
///
/// Immediates print as the raw unsigned literal, jump displacements
/// included, so reassembly picks the same width.
pub fn format_operand(operand: &Operand) -> String {
    let at = if operand.indirect { "@" } else { "" };
    match operand.value {
        OperandValue::Register(reg) => format!("{at}{reg}"),
        OperandValue::Immediate(v) => format!("{at}{v}"),
    }
}

/// Signed displacement of a jump with a direct immediate operand
pub fn jump_displacement(instr: &Instruction) -> Option<i64> {
    match instr {
        Instruction::Unary { opcode, src } if opcode.is_jump() && !src.indirect => match src.value {
            OperandValue::Immediate(v) => Some(src.width.sign_extend(v)),
            OperandValue::Register(_) => None,
        },
        _ => None,
    }
}
