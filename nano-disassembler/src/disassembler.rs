//! Main disassembler logic

use crate::error::{DisassemblerError, Result};
use crate::formatter::{format, jump_displacement};
use nano_spec::{Instruction, Program};

/// Decode every instruction in order, with its byte offset
pub fn decode_all(program: &Program) -> Result<Vec<(usize, Instruction)>> {
    program
        .instructions()
        .map(|(offset, decoded)| {
            decoded
                .map(|instr| (offset, instr))
                .map_err(|source| DisassemblerError::Decode { offset, source })
        })
        .collect()
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Disassemble a program into a listing
///
/// Decoding stops at the first undecodable instruction, which is reported
/// on a trailing `; ERROR` line. Jumps carry their signed displacement as a
/// comment.
pub fn disassemble(program: &Program) -> String {
    let mut output = String::new();
    let code = program.code();

    output.push_str("; Nano Disassembly\n");
    output.push_str(&format!("; Code size: {} bytes\n", code.len()));
    output.push('\n');

    for (offset, decoded) in program.instructions() {
        match decoded {
            Ok(instr) => {
                let bytes = &code[offset..offset + instr.len()];
                let mut text = format(&instr);
                if let Some(disp) = jump_displacement(&instr) {
                    text.push_str(&format!("  ; {disp:+}"));
                }
                output.push_str(&format!("0x{offset:04x}:  {:<30}  {text}\n", hex_bytes(bytes)));
            }
            Err(e) => {
                output.push_str(&format!("0x{offset:04x}:  ; ERROR: {e}\n"));
            }
        }
    }

    output
}

/// Listing without offsets or bytes, one instruction per line
///
/// The result reassembles to a semantically equivalent program.
pub fn to_source(program: &Program) -> Result<String> {
    let mut output = String::new();
    for (_, instr) in decode_all(program)? {
        output.push_str(&format(&instr));
        output.push('\n');
    }
    Ok(output)
}
