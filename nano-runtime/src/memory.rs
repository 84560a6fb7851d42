//! Memory subsystem
//!
//! One zero-initialized buffer: the code segment, then the stack segment,
//! then a guard area that only instruction fetch may touch.

use crate::error::{Result, RuntimeError};
use nano_spec::{ConfigError, MemoryLayout, SpecError, Width, MAX_INSTRUCTION_LEN};

/// Region an address falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryRegion {
    Code,
    Stack,
    Guard,
}

#[derive(Debug, Clone)]
pub struct Memory {
    data: Vec<u8>,
    code_size: usize,
    stack_size: usize,
}

impl Memory {
    /// Allocate memory and copy `code` to address 0
    pub fn new(code: &[u8], layout: &MemoryLayout) -> Result<Self> {
        let total = layout
            .checked_total_size(code.len())
            .ok_or(SpecError::InvalidConfig(ConfigError::TooLarge))?;

        let mut data = Vec::new();
        data.try_reserve_exact(total)
            .map_err(|_| RuntimeError::AllocationFailed { bytes: total })?;
        data.resize(total, 0u8);
        data[..code.len()].copy_from_slice(code);

        Ok(Memory {
            data,
            code_size: layout.code_size(code.len()),
            stack_size: layout.stack_size(),
        })
    }

    pub fn code_size(&self) -> usize {
        self.code_size
    }

    pub fn stack_size(&self) -> usize {
        self.stack_size
    }

    /// First address of the stack segment
    pub fn stack_base(&self) -> usize {
        self.code_size
    }

    /// Bytes reachable by program operands
    pub fn addressable_size(&self) -> usize {
        self.code_size + self.stack_size
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Region `address` falls in, `None` past the guard area
    pub fn region(&self, address: u64) -> Option<MemoryRegion> {
        let address = usize::try_from(address).ok()?;
        if address < self.code_size {
            Some(MemoryRegion::Code)
        } else if address < self.addressable_size() {
            Some(MemoryRegion::Stack)
        } else if address < self.data.len() {
            Some(MemoryRegion::Guard)
        } else {
            None
        }
    }

    /// Check that `[address, address + width)` is addressable
    pub fn check(&self, address: u64, width: Width) -> Result<usize> {
        let violation = || RuntimeError::MemoryAccessViolation {
            address,
            width: width.bytes(),
        };
        let start = usize::try_from(address).map_err(|_| violation())?;
        match start.checked_add(width.bytes()) {
            Some(end) if end <= self.addressable_size() => Ok(start),
            _ => Err(violation()),
        }
    }

    /// Little-endian read of `width` bytes
    pub fn read(&self, address: u64, width: Width) -> Result<u64> {
        let start = self.check(address, width)?;
        let n = width.bytes();
        let mut buf = [0u8; 8];
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(u64::from_le_bytes(buf))
    }

    /// Little-endian write of the low `width` bytes of `value`
    pub fn write(&mut self, address: u64, width: Width, value: u64) -> Result<()> {
        let start = self.check(address, width)?;
        let n = width.bytes();
        self.data[start..start + n].copy_from_slice(&value.to_le_bytes()[..n]);
        Ok(())
    }

    /// Bytes an instruction at `ip` may occupy
    ///
    /// The guard area guarantees a full window for any ip inside the code
    /// segment.
    pub fn fetch_window(&self, ip: u64) -> Result<&[u8]> {
        let out_of_bounds = || RuntimeError::IpOutOfBounds {
            ip,
            code_size: self.code_size,
        };
        let start = usize::try_from(ip).map_err(|_| out_of_bounds())?;
        if start >= self.code_size {
            return Err(out_of_bounds());
        }
        let end = (start + MAX_INSTRUCTION_LEN).min(self.data.len());
        Ok(&self.data[start..end])
    }
}
