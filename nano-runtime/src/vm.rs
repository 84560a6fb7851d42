//! Virtual Machine for the Nano ISA

use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::io::IOHandler;
use crate::memory::Memory;
use crate::state::{Status, VMState};
use nano_disassembler::format;
use nano_spec::{decode, Instruction, MemoryLayout, Program, SpecError};
use serde::Serialize;

/// VM configuration
#[derive(Debug, Clone, Default)]
pub struct VMConfig {
    /// Memory layout (page size, stack pages, guard)
    pub layout: MemoryLayout,

    /// Fault after this many instructions; `None` runs until halt
    pub max_cycles: Option<u64>,
}

/// Execution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Number of instructions executed, `halt` included
    pub cycles: u64,

    /// Values written by `printi`
    pub outputs: Vec<u64>,
}

/// Nano Virtual Machine
#[derive(Debug)]
pub struct VM {
    state: VMState,
    memory: Memory,
    io: IOHandler,
    config: VMConfig,
    fault: Option<String>,
}

impl VM {
    /// Create a VM with `program` loaded at address 0
    pub fn new(program: &Program, config: VMConfig) -> Result<Self> {
        config.layout.validate().map_err(SpecError::from)?;
        let memory = Memory::new(program.code(), &config.layout)?;

        tracing::debug!(
            program_len = program.len(),
            code_size = memory.code_size(),
            stack_size = memory.stack_size(),
            "vm created"
        );

        Ok(Self {
            state: VMState::new(),
            memory,
            io: IOHandler::new(),
            config,
            fault: None,
        })
    }

    /// Replace the output sink
    pub fn with_io(mut self, io: IOHandler) -> Self {
        self.io = io;
        self
    }

    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn io(&self) -> &IOHandler {
        &self.io
    }

    pub fn config(&self) -> &VMConfig {
        &self.config
    }

    /// Message of the error that faulted the VM
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    fn faulted(&self) -> RuntimeError {
        RuntimeError::Faulted {
            reason: self.fault.clone().unwrap_or_default(),
        }
    }

    /// Fetch and decode the instruction at ip
    pub fn fetch(&self) -> Result<Instruction> {
        let ip = self.state.ip;
        let window = self.memory.fetch_window(ip)?;
        decode(window).map_err(|e| match e {
            SpecError::UnknownOpcode(opcode) => RuntimeError::InvalidInstruction { ip, opcode },
            other => other.into(),
        })
    }

    /// Execute one instruction
    ///
    /// Does nothing once the VM has halted. An error moves the VM to the
    /// faulted state, and every later step reports that fault again.
    pub fn step(&mut self) -> Result<()> {
        match self.state.status {
            Status::Halted => return Ok(()),
            Status::Faulted => return Err(self.faulted()),
            Status::Running => {}
        }
        self.try_step().map_err(|e| {
            self.state.fault();
            let address = match &e {
                RuntimeError::MemoryAccessViolation { address, .. } => Some(*address),
                RuntimeError::IpOutOfBounds { ip, .. } => Some(*ip),
                _ => None,
            };
            let region = address.and_then(|address| self.memory.region(address));
            tracing::info!(
                ip = self.state.ip,
                cycles = self.state.cycles,
                address,
                region = ?region,
                "fault: {}",
                e
            );
            self.fault = Some(e.to_string());
            e
        })
    }

    fn try_step(&mut self) -> Result<()> {
        if let Some(limit) = self.config.max_cycles {
            if self.state.cycles >= limit {
                return Err(RuntimeError::CycleLimitExceeded { limit });
            }
        }

        let instr = self.fetch()?;
        tracing::trace!(ip = self.state.ip, cycle = self.state.cycles, "{}", format(&instr));

        execute(&instr, &mut self.state, &mut self.memory, &mut self.io)?;
        self.state.cycles += 1;
        Ok(())
    }

    /// Run until halt or the first fault
    ///
    /// The final state stays available through [`VM::state`] either way.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        while self.state.is_running() {
            self.step()?;
        }
        if self.state.status == Status::Faulted {
            return Err(self.faulted());
        }

        tracing::info!(ip = self.state.ip, cycles = self.state.cycles, "halted");
        Ok(ExecutionResult {
            cycles: self.state.cycles,
            outputs: self.io.outputs().to_vec(),
        })
    }
}
