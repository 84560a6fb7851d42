//! VM state

use nano_spec::{Register, Width, Word, NUM_REGISTERS};
use serde::Serialize;
use std::fmt;

/// Result of the last `cmp`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Flags {
    #[default]
    None,
    Zero,
    Greater,
    Smaller,
}

impl Flags {
    /// Compare two unsigned operands
    pub fn compare(a: Word, b: Word) -> Self {
        match a.cmp(&b) {
            std::cmp::Ordering::Equal => Flags::Zero,
            std::cmp::Ordering::Greater => Flags::Greater,
            std::cmp::Ordering::Less => Flags::Smaller,
        }
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Flags::None => "--",
            Flags::Zero => "ZERO",
            Flags::Greater => "GREATER",
            Flags::Smaller => "SMALLER",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Status {
    #[default]
    Running,
    Halted,
    Faulted,
}

/// VM state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VMState {
    /// General registers (reg0-reg7)
    pub regs: [Word; NUM_REGISTERS],

    /// Instruction pointer
    pub ip: Word,

    /// Stack pointer, an offset into the stack segment
    pub sp: Word,

    pub flags: Flags,

    /// Instructions executed
    pub cycles: u64,

    pub status: Status,
}

impl VMState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn read_reg(&self, reg: Register) -> Word {
        self.regs[reg.index()]
    }

    #[inline]
    pub fn write_reg(&mut self, reg: Register, value: Word) {
        self.regs[reg.index()] = value;
    }

    /// Replace the low `width` bytes of a register
    #[inline]
    pub fn write_reg_width(&mut self, reg: Register, width: Width, value: Word) {
        let mask = width.mask();
        let slot = &mut self.regs[reg.index()];
        *slot = (*slot & !mask) | (value & mask);
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    pub fn halt(&mut self) {
        self.status = Status::Halted;
    }

    pub fn fault(&mut self) {
        self.status = Status::Faulted;
    }
}

/// Status block printed after a run
impl fmt::Display for VMState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "********************")?;
        for reg in Register::ALL {
            writeln!(f, "{}: {}", reg, self.read_reg(reg))?;
        }
        writeln!(f, "SP: {}", self.sp)?;
        writeln!(f, "Flags: {}", self.flags)?;
        writeln!(f, "IP: {}", self.ip)?;
        writeln!(f, "********************")
    }
}
