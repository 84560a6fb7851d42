//! Tests for malformed input handling in the assembler
//!
//! Tests error handling for various invalid inputs.

use nano_assembler::{assemble, AssemblerError};

// ============================================================================
// Invalid Instruction Tests
// ============================================================================

#[test]
fn test_unknown_instruction() {
    let source = "foobar reg1, reg2";
    let result = assemble(source);

    if let Err(AssemblerError::UnknownInstruction { mnemonic, line, .. }) = result {
        assert_eq!(mnemonic, "foobar");
        assert_eq!(line, 1);
    } else {
        panic!("Expected UnknownInstruction error");
    }
}

#[test]
fn test_unknown_instruction_on_line_three() {
    let source = "mov reg0 1\n; comment\nfrobnicate reg0\nhalt\n";
    let err = assemble(source).unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert!(err.to_string().starts_with("Error on line 3: frobnicate reg0"));
}

#[test]
fn test_instruction_typo() {
    let source = "addd reg1, reg2"; // typo: addd instead of add
    assert!(matches!(assemble(source), Err(AssemblerError::UnknownInstruction { .. })));
}

#[test]
fn test_empty_instruction_line() {
    // Empty lines should be fine
    let source = r#"

        halt

    "#;
    let program = assemble(source).unwrap();
    assert_eq!(program.len(), 1);
}

#[test]
fn test_empty_source() {
    let program = assemble("").unwrap();
    assert!(program.is_empty());
}

// ============================================================================
// Invalid Operand Count Tests
// ============================================================================

#[test]
fn test_binary_missing_operand() {
    let result = assemble("add reg1");
    assert!(matches!(
        result,
        Err(AssemblerError::ArityMismatch {
            expected: 2,
            received: 1,
            ..
        })
    ));
}

#[test]
fn test_binary_extra_operand() {
    let result = assemble("add reg1, reg2, reg3");
    assert!(matches!(
        result,
        Err(AssemblerError::ArityMismatch {
            expected: 2,
            received: 3,
            ..
        })
    ));
}

#[test]
fn test_unary_without_operand() {
    assert!(matches!(
        assemble("printi"),
        Err(AssemblerError::ArityMismatch { expected: 1, .. })
    ));
}

#[test]
fn test_halt_with_operands() {
    assert!(matches!(
        assemble("halt reg0"),
        Err(AssemblerError::ArityMismatch { expected: 0, .. })
    ));
}

// ============================================================================
// Invalid Register Tests
// ============================================================================

#[test]
fn test_invalid_destination_register() {
    let result = assemble("mov reg8, reg1");
    assert!(matches!(result, Err(AssemblerError::InvalidRegister { token, .. }) if token == "reg8"));
}

#[test]
fn test_control_registers_not_addressable() {
    for reg in ["ip", "esp", "flags"] {
        let result = assemble(&format!("mov {reg} 1"));
        assert!(matches!(result, Err(AssemblerError::InvalidRegister { .. })), "{reg}");
    }
}

#[test]
fn test_immediate_destination() {
    assert!(matches!(
        assemble("add 10 reg0"),
        Err(AssemblerError::InvalidRegister { .. })
    ));
}

// ============================================================================
// Invalid Immediate Tests
// ============================================================================

#[test]
fn test_non_numeric_operand() {
    let result = assemble("add reg1, abc");
    assert!(matches!(result, Err(AssemblerError::UnknownParameter { token, .. }) if token == "abc"));
}

#[test]
fn test_floating_point_immediate() {
    assert!(matches!(
        assemble("mov reg1, 3.14"),
        Err(AssemblerError::UnknownParameter { .. })
    ));
}

#[test]
fn test_unknown_register_as_source() {
    // not a register and not an integer
    assert!(matches!(
        assemble("mov reg1, reg9"),
        Err(AssemblerError::UnknownParameter { .. })
    ));
}

#[test]
fn test_integer_too_large() {
    let result = assemble("push 18446744073709551616");
    assert!(matches!(result, Err(AssemblerError::IntegerTooLarge { token, .. }) if token == "18446744073709551616"));
}

#[test]
fn test_largest_integer_accepted() {
    let program = assemble("push 18446744073709551615").unwrap();
    assert_eq!(program.len(), 10);
}

#[test]
fn test_error_aborts_before_output() {
    // earlier valid lines produce nothing once a later line fails
    let source = "mov reg0 1\nadd reg0 2\nmov reg0 zzz\n";
    assert!(assemble(source).is_err());
}

#[test]
fn test_first_error_wins() {
    let source = "bad1\nbad2 reg0\n";
    let err = assemble(source).unwrap_err();
    assert_eq!(err.line(), Some(1));
}
