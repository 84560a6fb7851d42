//! Main assembler logic

use crate::error::Result;
use crate::lexer::prepare_lines;
use crate::parser::parse_instruction;
use nano_spec::{encode, Program};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension given to assembled bytecode files
pub const BYTECODE_EXTENSION: &str = "bin";

/// Assemble source code into a program
pub fn assemble(source: &str) -> Result<Program> {
    assemble_lines(&prepare_lines(source))
}

/// Assemble already prepared lines
///
/// `lines[i]` is source line `i + 1`; empty entries are skipped. The first
/// error aborts the whole assembly.
pub fn assemble_lines<S: AsRef<str>>(lines: &[S]) -> Result<Program> {
    let mut code = Vec::new();

    for (index, text) in lines.iter().enumerate() {
        let line = index + 1;
        let text = text.as_ref();

        if let Some(instr) = parse_instruction(line, text)? {
            let offset = code.len();
            encode(&instr, &mut code);
            tracing::debug!(line, offset, len = instr.len(), "{}", text);
        }
    }

    tracing::debug!(bytes = code.len(), "assembly finished");
    Ok(Program::new(code))
}

/// Read and assemble a source file
pub fn assemble_file(path: impl AsRef<Path>) -> Result<Program> {
    let source = fs::read_to_string(path)?;
    assemble(&source)
}

/// Sibling path with the bytecode extension (`prog.asm` -> `prog.bin`)
pub fn output_path(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension(BYTECODE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssemblerError;

    #[test]
    fn test_assemble_simple() {
        let source = r#"
            ; Simple test
            mov reg0 10
            halt
        "#;

        let program = assemble(source).unwrap();
        assert_eq!(program.code(), &[0x0B, 0x80, 10, 0x16]);
    }

    #[test]
    fn test_assemble_lines_reports_source_line() {
        let lines = ["", "mov reg0 1", "", "bogus"];
        let err = assemble_lines(&lines).unwrap_err();
        assert!(matches!(err, AssemblerError::UnknownInstruction { line: 4, .. }));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("dir/prog.asm"), PathBuf::from("dir/prog.bin"));
        assert_eq!(output_path("prog"), PathBuf::from("prog.bin"));
    }
}
