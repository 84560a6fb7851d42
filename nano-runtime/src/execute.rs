//! Instruction execution

use crate::error::{Result, RuntimeError};
use crate::io::IOHandler;
use crate::memory::Memory;
use crate::state::{Flags, VMState};
use nano_spec::{Instruction, Opcode, Operand, OperandValue, Register, Width, Word};

/// Where an operand lives once resolved against the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Register(Register),
    Memory(Word),
    Immediate(Word),
}

/// Resolve a source operand
pub fn resolve(state: &VMState, operand: &Operand) -> Location {
    match (operand.value, operand.indirect) {
        (OperandValue::Register(reg), false) => Location::Register(reg),
        (OperandValue::Register(reg), true) => Location::Memory(state.read_reg(reg)),
        (OperandValue::Immediate(value), false) => Location::Immediate(value),
        (OperandValue::Immediate(value), true) => Location::Memory(value),
    }
}

fn resolve_destination(state: &VMState, dst: Register, indirect: bool) -> Location {
    if indirect {
        Location::Memory(state.read_reg(dst))
    } else {
        Location::Register(dst)
    }
}

fn check(memory: &Memory, loc: Location, width: Width) -> Result<()> {
    if let Location::Memory(address) = loc {
        memory.check(address, width)?;
    }
    Ok(())
}

fn check_writable(loc: Location, ip: Word, opcode: Opcode) -> Result<()> {
    match loc {
        Location::Immediate(_) => Err(RuntimeError::ImmediateDestination { ip, opcode }),
        _ => Ok(()),
    }
}

fn load(state: &VMState, memory: &Memory, loc: Location, width: Width) -> Result<Word> {
    match loc {
        Location::Register(reg) => Ok(width.truncate(state.read_reg(reg))),
        Location::Memory(address) => memory.read(address, width),
        Location::Immediate(value) => Ok(width.truncate(value)),
    }
}

fn store(
    state: &mut VMState,
    memory: &mut Memory,
    loc: Location,
    width: Width,
    value: Word,
    opcode: Opcode,
) -> Result<()> {
    match loc {
        Location::Register(reg) => {
            state.write_reg_width(reg, width, value);
            Ok(())
        }
        Location::Memory(address) => memory.write(address, width, value),
        Location::Immediate(_) => Err(RuntimeError::ImmediateDestination {
            ip: state.ip,
            opcode,
        }),
    }
}

/// Compute `a OP b` for the two-operand arithmetic and bitwise opcodes
fn alu(opcode: Opcode, a: Word, b: Word, ip: Word) -> Result<Word> {
    let value = match opcode {
        Opcode::Add => a.wrapping_add(b),
        Opcode::Sub => a.wrapping_sub(b),
        Opcode::Mul => a.wrapping_mul(b),
        Opcode::Div => a.checked_div(b).ok_or(RuntimeError::DivisionByZero { ip })?,
        Opcode::Mod => a.checked_rem(b).ok_or(RuntimeError::DivisionByZero { ip })?,
        Opcode::And => a & b,
        Opcode::Or => a | b,
        Opcode::Xor => a ^ b,
        Opcode::Shl => u32::try_from(b).ok().and_then(|s| a.checked_shl(s)).unwrap_or(0),
        Opcode::Shr => u32::try_from(b).ok().and_then(|s| a.checked_shr(s)).unwrap_or(0),
        Opcode::Mov => b,
        _ => unreachable!("{opcode} is not an ALU opcode"),
    };
    Ok(value)
}

fn jump_taken(opcode: Opcode, flags: Flags) -> bool {
    match opcode {
        Opcode::Jz => flags == Flags::Zero,
        Opcode::Jnz => flags != Flags::Zero,
        Opcode::Jg => flags == Flags::Greater,
        Opcode::Js => flags == Flags::Smaller,
        _ => false,
    }
}

/// Execute one decoded instruction at `state.ip`
///
/// Every check that can fail runs before the first mutation, so a faulting
/// instruction leaves state and memory untouched.
pub fn execute(
    instr: &Instruction,
    state: &mut VMState,
    memory: &mut Memory,
    io: &mut IOHandler,
) -> Result<()> {
    let ip = state.ip;
    let width = instr.width();
    let opcode = instr.opcode();

    if !instr.is_well_formed() {
        return Err(RuntimeError::InvalidInstruction {
            ip,
            opcode: opcode.to_u8(),
        });
    }

    match instr {
        Instruction::Nullary { opcode: Opcode::Halt } => {
            state.halt();
            return Ok(());
        }

        Instruction::Nullary { .. } => unreachable!("{opcode} takes operands"),

        Instruction::Binary {
            dst,
            dst_indirect,
            src,
            ..
        } => {
            let dst = resolve_destination(state, *dst, *dst_indirect);
            let src = resolve(state, src);
            check(memory, dst, width)?;
            check(memory, src, width)?;

            let a = load(state, memory, dst, width)?;
            let b = load(state, memory, src, width)?;

            if opcode == Opcode::Cmp {
                state.flags = Flags::compare(a, b);
            } else {
                let value = alu(opcode, a, b, ip)?;
                store(state, memory, dst, width, value, opcode)?;
            }
        }

        Instruction::Unary { src, .. } => {
            let loc = resolve(state, src);
            if opcode.writes_operand() {
                check_writable(loc, ip, opcode)?;
            }
            check(memory, loc, width)?;

            match opcode {
                Opcode::Inc | Opcode::Dec => {
                    let v = load(state, memory, loc, width)?;
                    let v = if opcode == Opcode::Inc {
                        v.wrapping_add(1)
                    } else {
                        v.wrapping_sub(1)
                    };
                    store(state, memory, loc, width, v, opcode)?;
                }

                Opcode::Push => {
                    let v = load(state, memory, loc, width)?;
                    let size = width.bytes() as Word;
                    let stack_size = memory.stack_size();
                    if state.sp.saturating_add(size) > stack_size as Word {
                        return Err(RuntimeError::StackOverflow {
                            sp: state.sp,
                            width: width.bytes(),
                            stack_size,
                        });
                    }
                    let top = memory.stack_base() as Word + state.sp;
                    memory.write(top, width, v)?;
                    state.sp += size;
                }

                Opcode::Pop => {
                    let size = width.bytes() as Word;
                    if state.sp < size {
                        return Err(RuntimeError::StackUnderflow {
                            sp: state.sp,
                            width: width.bytes(),
                        });
                    }
                    let sp = state.sp - size;
                    let v = memory.read(memory.stack_base() as Word + sp, width)?;
                    store(state, memory, loc, width, v, opcode)?;
                    state.sp = sp;
                }

                Opcode::Jz | Opcode::Jnz | Opcode::Jg | Opcode::Js => {
                    let v = load(state, memory, loc, width)?;
                    if jump_taken(opcode, state.flags) {
                        let displacement = width.sign_extend(v);
                        state.ip = ip.wrapping_add(displacement as Word);
                        return Ok(());
                    }
                }

                Opcode::Printi => {
                    let v = load(state, memory, loc, width)?;
                    tracing::debug!(ip, value = v, "printi");
                    io.print(v)?;
                }

                _ => unreachable!("{opcode} is not unary"),
            }
        }
    }

    state.ip = ip.wrapping_add(instr.len() as Word);
    Ok(())
}
