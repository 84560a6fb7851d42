//! Encoding round-trip and minimal-width properties

use nano_spec::encoding::*;
use nano_spec::{encode_immediate, ImmediateError, Instruction, Opcode, Operand, OperandValue, Register, Width};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_register() -> impl Strategy<Value = Register> {
    (0usize..8).prop_map(|i| Register::from_index(i).unwrap())
}

fn arb_width() -> impl Strategy<Value = Width> {
    (0u8..4).prop_map(Width::from_bits)
}

fn arb_operand() -> impl Strategy<Value = Operand> {
    let reg = (arb_register(), arb_width(), any::<bool>()).prop_map(|(reg, width, indirect)| Operand {
        value: OperandValue::Register(reg),
        width,
        indirect,
    });
    let imm = (any::<u64>(), arb_width(), any::<bool>()).prop_map(|(value, width, indirect)| Operand {
        value: OperandValue::Immediate(width.truncate(value)),
        width,
        indirect,
    });
    prop_oneof![reg, imm]
}

fn arb_instruction() -> impl Strategy<Value = Instruction> {
    let opcode = (0usize..Opcode::ALL.len()).prop_map(|i| Opcode::ALL[i]);
    (opcode, arb_register(), any::<bool>(), arb_operand()).prop_map(|(opcode, dst, dst_indirect, src)| {
        match opcode.arity() {
            0 => Instruction::Nullary { opcode },
            1 => Instruction::Unary { opcode, src },
            _ => Instruction::Binary {
                opcode,
                dst,
                dst_indirect,
                src,
            },
        }
    })
}

proptest! {
    #[test]
    fn test_roundtrip(instr in arb_instruction()) {
        let bytes = instr.to_bytes();
        prop_assert_eq!(bytes.len(), instr.len());
        prop_assert_eq!(decode(&bytes).unwrap(), instr);
    }

    #[test]
    fn test_roundtrip_with_trailing_garbage(instr in arb_instruction(), tail in proptest::collection::vec(any::<u8>(), 0..10)) {
        let mut bytes = instr.to_bytes();
        bytes.extend(tail);
        prop_assert_eq!(decode(&bytes).unwrap(), instr);
    }

    #[test]
    fn test_minimal_width(value in any::<u64>()) {
        let imm = encode_immediate(&value.to_string()).unwrap();
        prop_assert_eq!(imm.value, value);
        prop_assert_eq!(imm.bytes().len(), imm.width.bytes());
        // no narrower width represents the value
        for narrower in Width::ALL.iter().filter(|w| w.bytes() < imm.width.bytes()) {
            prop_assert_ne!(narrower.truncate(value), value);
        }
        prop_assert_eq!(imm.width.truncate(value), value);
    }

    #[test]
    fn test_hex_matches_decimal(value in any::<u64>()) {
        let hex = encode_immediate(&format!("0x{value:x}")).unwrap();
        let dec = encode_immediate(&value.to_string()).unwrap();
        prop_assert_eq!(hex, dec);
    }

    #[test]
    fn test_beyond_u64_overflows(excess in 1u128..=u64::MAX as u128) {
        let token = (u64::MAX as u128 + excess).to_string();
        prop_assert!(matches!(encode_immediate(&token), Err(ImmediateError::Overflow(_))));
    }
}

// ============================================================================
// Exhaustive register coverage
// ============================================================================

#[test]
fn test_binary_register_roundtrip_all_registers() {
    for dst in Register::ALL {
        for src in Register::ALL {
            for (dst_indirect, src_indirect) in [(false, false), (true, false), (false, true), (true, true)] {
                let instr = Instruction::Binary {
                    opcode: Opcode::Mov,
                    dst,
                    dst_indirect,
                    src: Operand {
                        value: OperandValue::Register(src),
                        width: Width::Qword,
                        indirect: src_indirect,
                    },
                };
                let bytes = instr.to_bytes();
                assert_eq!(extract_dst(bytes[0]), dst as u8);
                assert_eq!(extract_src_reg(bytes[1]), src as u8);
                assert_eq!(decode(&bytes).unwrap(), instr);
            }
        }
    }
}

#[test]
fn test_immediate_lengths_per_width() {
    let cases = [(0xAB, 3), (0xABCD, 4), (0xABCD_EF01, 6), (0xABCD_EF01_2345, 10)];
    for (value, len) in cases {
        let instr = Instruction::unary(Opcode::Printi, Operand::immediate(value));
        assert_eq!(instr.to_bytes().len(), len, "value {value:#x}");
    }
}
