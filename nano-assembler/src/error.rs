//! Assembler errors
//!
//! Every diagnostic variant carries the 1-based source line number and the
//! normalized line text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Error on line {line}: {text}\nUnknown instruction \"{mnemonic}\"")]
    UnknownInstruction {
        line: usize,
        text: String,
        mnemonic: String,
    },

    #[error(
        "Error on line {line}: {text}\nInvalid amount of parameters for instruction \"{mnemonic}\" expected: {expected} but received: {received}"
    )]
    ArityMismatch {
        line: usize,
        text: String,
        mnemonic: String,
        expected: usize,
        received: usize,
    },

    #[error("Error on line {line}: {text}\nInvalid register name: \"{token}\"")]
    InvalidRegister {
        line: usize,
        text: String,
        token: String,
    },

    #[error("Error on line {line}: {text}\nUnknown parameter: \"{token}\"")]
    UnknownParameter {
        line: usize,
        text: String,
        token: String,
    },

    #[error("Error on line {line}: {text}\nInteger too large: {token}")]
    IntegerTooLarge {
        line: usize,
        text: String,
        token: String,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AssemblerError {
    /// Source line the diagnostic points at
    pub fn line(&self) -> Option<usize> {
        match self {
            AssemblerError::UnknownInstruction { line, .. }
            | AssemblerError::ArityMismatch { line, .. }
            | AssemblerError::InvalidRegister { line, .. }
            | AssemblerError::UnknownParameter { line, .. }
            | AssemblerError::IntegerTooLarge { line, .. } => Some(*line),
            AssemblerError::IoError(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_instruction_display() {
        let err = AssemblerError::UnknownInstruction {
            line: 3,
            text: "foo reg0".to_string(),
            mnemonic: "foo".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error on line 3: foo reg0\nUnknown instruction \"foo\""
        );
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_arity_display() {
        let err = AssemblerError::ArityMismatch {
            line: 1,
            text: "mov reg0".to_string(),
            mnemonic: "mov".to_string(),
            expected: 2,
            received: 1,
        };
        assert!(err.to_string().ends_with("expected: 2 but received: 1"));
    }

    #[test]
    fn test_io_error_has_no_line() {
        let err: AssemblerError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.line(), None);
        assert!(err.to_string().contains("gone"));
    }
}
