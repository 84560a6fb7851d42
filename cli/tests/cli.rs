use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Fresh scratch directory per test
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nano-cli-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_source(dir: &PathBuf, text: &str) -> PathBuf {
    let path = dir.join("prog.asm");
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn assembles_and_runs() {
    let dir = scratch("run");
    let src = write_source(&dir, "mov reg0 10\nadd reg0 5\nprinti reg0\nhalt\n");

    Command::cargo_bin("nano-asm")
        .unwrap()
        .arg(&src)
        .assert()
        .success()
        .stdout(contains("Bytecode assembled!"));

    let bin = dir.join("prog.bin");
    assert_eq!(fs::read(&bin).unwrap().len(), 9);

    Command::cargo_bin("nano-vm")
        .unwrap()
        .arg(&bin)
        .assert()
        .success()
        .stdout(contains("15\nVM halted!\n"))
        .stdout(contains("reg0: 15\n"))
        .stdout(contains("Flags: --\n"))
        .stdout(contains("IP: 8\n"));
}

#[test]
fn assembler_reports_line_and_writes_nothing() {
    let dir = scratch("asm-error");
    let src = write_source(&dir, "mov reg0 1\n\nfoo reg0\nhalt\n");

    Command::cargo_bin("nano-asm")
        .unwrap()
        .arg(&src)
        .assert()
        .failure()
        .stderr(contains("Error on line 3: foo reg0"))
        .stderr(contains("Unknown instruction \"foo\""));

    assert!(!dir.join("prog.bin").exists());
}

#[test]
fn assembler_honors_output_flag() {
    let dir = scratch("asm-out");
    let src = write_source(&dir, "halt\n");
    let out = dir.join("custom.bytes");

    Command::cargo_bin("nano-asm")
        .unwrap()
        .arg(&src)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(fs::read(&out).unwrap(), vec![0x16]);
}

#[test]
fn assembler_without_arguments_prints_usage() {
    Command::cargo_bin("nano-asm")
        .unwrap()
        .assert()
        .failure()
        .stderr(contains("Usage"));
}

#[test]
fn vm_reports_missing_file() {
    Command::cargo_bin("nano-vm")
        .unwrap()
        .arg("/definitely/not/here.bin")
        .assert()
        .failure()
        .stderr(contains("Unable to open file"));
}

#[test]
fn vm_fault_exits_nonzero() {
    let dir = scratch("fault");
    let bin = dir.join("fault.bin");
    // pop reg0 on an empty stack
    fs::write(&bin, [0x0F, 0x60]).unwrap();

    Command::cargo_bin("nano-vm")
        .unwrap()
        .arg(&bin)
        .assert()
        .failure()
        .stdout(contains("Stack underflow"))
        .stdout(contains("SP: 0\n"));
}

#[test]
fn vm_rejects_oversized_stack() {
    let dir = scratch("huge-stack");
    let bin = dir.join("halt.bin");
    fs::write(&bin, [0x16]).unwrap();

    // overflows the layout arithmetic
    Command::cargo_bin("nano-vm")
        .unwrap()
        .args(["--stack-pages", "18446744073709551615"])
        .arg(&bin)
        .assert()
        .code(1)
        .stderr(contains("memory layout exceeds the address space"))
        .stderr(contains("panicked").not());

    // fits in usize but cannot be allocated
    Command::cargo_bin("nano-vm")
        .unwrap()
        .args(["--stack-pages", "1125899906842624"])
        .arg(&bin)
        .assert()
        .code(1)
        .stderr(contains("Cannot allocate"))
        .stderr(contains("panicked").not());
}

#[test]
fn vm_cycle_limit() {
    let dir = scratch("cycles");
    let bin = dir.join("loop.bin");
    // jnz 0
    fs::write(&bin, [0x12, 0x80, 0x00]).unwrap();

    Command::cargo_bin("nano-vm")
        .unwrap()
        .args(["--max-cycles", "50"])
        .arg(&bin)
        .assert()
        .failure()
        .stdout(contains("Cycle limit exceeded: 50"));
}

#[test]
fn vm_json_report() {
    let dir = scratch("json");
    let bin = dir.join("prog.bin");
    // mov reg0 10 / printi reg0 / halt
    fs::write(&bin, [0x0B, 0x80, 0x0A, 0x15, 0x60, 0x16]).unwrap();

    let output = Command::cargo_bin("nano-vm")
        .unwrap()
        .arg("--json")
        .arg(&bin)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outputs"], serde_json::json!([10]));
    assert_eq!(report["state"]["regs"][0], 10);
    assert_eq!(report["state"]["status"], "Halted");
    assert!(report["error"].is_null());
}

#[test]
fn disassembler_lists_program() {
    let dir = scratch("dis");
    let bin = dir.join("prog.bin");
    fs::write(&bin, [0x0B, 0x80, 0x0A, 0x16]).unwrap();

    Command::cargo_bin("nano-dis")
        .unwrap()
        .arg(&bin)
        .assert()
        .success()
        .stdout(contains("mov reg0 10"))
        .stdout(contains("halt"));
}
