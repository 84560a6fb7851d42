//! Assembler output through the disassembler

use nano_assembler::assemble;
use nano_disassembler::{decode_all, disassemble, to_source};
use proptest::prelude::*;

const PROGRAM: &str = r#"
    mov reg0, 10
    mov reg1, 0x1234
    add @reg1, @reg0
    push 70000
    pop reg2
    cmp reg0 reg1
    jz 5
    jz 200
    jnz 40000
    printi reg0
    halt
"#;

#[test]
fn test_reassemble_identical() {
    let program = assemble(PROGRAM).unwrap();
    let text = to_source(&program).unwrap();
    assert_eq!(assemble(&text).unwrap(), program);
}

#[test]
fn test_listing_has_one_line_per_instruction() {
    let program = assemble(PROGRAM).unwrap();
    let listing = disassemble(&program);
    let count = listing.lines().filter(|l| l.starts_with("0x")).count();
    assert_eq!(count, decode_all(&program).unwrap().len());
    assert_eq!(count, 11);
}

#[test]
fn test_listing_shows_widths_in_bytes() {
    let program = assemble("push 70000").unwrap();
    let listing = disassemble(&program);
    assert!(listing.contains("0x0000:  0e c0 70 11 01 00"));
}

#[test]
fn test_byte_jump_with_top_bit_keeps_width() {
    let program = assemble("cmp reg0 reg0\njz 200\nhalt").unwrap();
    assert_eq!(program.code(), &[0x10, 0x60, 0x11, 0x80, 200, 0x16]);

    let text = to_source(&program).unwrap();
    assert_eq!(text, "cmp reg0 reg0\njz 200\nhalt\n");
    assert_eq!(assemble(&text).unwrap().code(), program.code());
}

#[test]
fn test_short_jump_with_top_bit_keeps_width() {
    let program = assemble("jnz 40000\nhalt").unwrap();
    assert_eq!(program.code(), &[0x12, 0xA0, 0x40, 0x9C, 0x16]);
    assert_eq!(assemble(&to_source(&program).unwrap()).unwrap(), program);
}

#[test]
fn test_listing_shows_signed_jump_comment() {
    let program = assemble("jz 200\njnz 40000\njg 0x80000000").unwrap();
    let listing = disassemble(&program);
    assert!(listing.contains("jz 200  ; -56"));
    assert!(listing.contains("jnz 40000  ; -25536"));
    assert!(listing.contains("jg 2147483648  ; -2147483648"));
}

proptest! {
    #[test]
    fn test_jump_literals_reassemble_identical(
        mnemonic in prop::sample::select(vec!["jz", "jnz", "jg", "js"]),
        value in prop_oneof![
            any::<u8>().prop_map(u64::from),
            any::<u16>().prop_map(u64::from),
            any::<u32>().prop_map(u64::from),
            any::<u64>(),
        ],
    ) {
        let program = assemble(&format!("{mnemonic} {value}\nhalt")).unwrap();
        let text = to_source(&program).unwrap();
        prop_assert_eq!(assemble(&text).unwrap(), program);
    }
}
