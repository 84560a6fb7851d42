//! # Memory Layout Configuration
//!
//! VM memory is one contiguous region:
//!
//! ```text
//! [ code: page_size * (1 + len / page_size) ][ stack: stack_pages * page_size ][ guard ]
//! ```
//!
//! The guard area is only ever read by instruction fetch, which always
//! takes a `MAX_INSTRUCTION_LEN` window at ip.

use crate::{MAX_INSTRUCTION_LEN, PAGE_SIZE};
use std::fmt;

/// Sizes of the VM memory segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryLayout {
    /// Page size in bytes; code is padded to a multiple of it
    pub page_size: usize,
    /// Stack segment size in pages
    pub stack_pages: usize,
    /// Trailing bytes reserved for fetch over-read
    pub guard_size: usize,
}

impl MemoryLayout {
    /// Default layout: 4 KB pages, one stack page, 10-byte guard
    pub const DEFAULT: Self = Self {
        page_size: PAGE_SIZE,
        stack_pages: 1,
        guard_size: MAX_INSTRUCTION_LEN,
    };

    /// Create a new layout with validation
    pub const fn new(page_size: usize, stack_pages: usize, guard_size: usize) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if stack_pages == 0 {
            return Err(ConfigError::ZeroStackPages);
        }
        if guard_size < MAX_INSTRUCTION_LEN {
            return Err(ConfigError::GuardTooSmall {
                guard: guard_size,
                min: MAX_INSTRUCTION_LEN,
            });
        }

        let layout = Self {
            page_size,
            stack_pages,
            guard_size,
        };
        // an empty program still occupies one code page
        if layout.checked_total_size(0).is_none() {
            return Err(ConfigError::TooLarge);
        }

        Ok(layout)
    }

    /// Validate a layout built through struct literal syntax
    pub const fn validate(&self) -> Result<(), ConfigError> {
        match Self::new(self.page_size, self.stack_pages, self.guard_size) {
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Code segment size for a program of `program_len` bytes
    #[inline]
    pub const fn code_size(&self, program_len: usize) -> usize {
        self.page_size * (1 + program_len / self.page_size)
    }

    /// Stack segment size in bytes
    #[inline]
    pub const fn stack_size(&self) -> usize {
        self.page_size * self.stack_pages
    }

    /// Addressable bytes (code + stack) for a program of `program_len` bytes
    #[inline]
    pub const fn addressable_size(&self, program_len: usize) -> usize {
        self.code_size(program_len) + self.stack_size()
    }

    /// Allocated bytes including the guard area
    #[inline]
    pub const fn total_size(&self, program_len: usize) -> usize {
        self.addressable_size(program_len) + self.guard_size
    }

    /// `total_size`, or `None` when any segment size overflows `usize`
    pub const fn checked_total_size(&self, program_len: usize) -> Option<usize> {
        let code = match self.page_size.checked_mul(1 + program_len / self.page_size) {
            Some(code) => code,
            None => return None,
        };
        let stack = match self.page_size.checked_mul(self.stack_pages) {
            Some(stack) => stack,
            None => return None,
        };
        match code.checked_add(stack) {
            Some(addressable) => addressable.checked_add(self.guard_size),
            None => None,
        }
    }
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for MemoryLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page={}B, stack={} page(s), guard={}B",
            self.page_size, self.stack_pages, self.guard_size
        )
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Page size must be non-zero
    ZeroPageSize,
    /// Stack must hold at least one page
    ZeroStackPages,
    /// Guard area shorter than the longest instruction
    GuardTooSmall { guard: usize, min: usize },
    /// Segment sizes overflow the address space
    TooLarge,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPageSize => write!(f, "page size must be non-zero"),
            ConfigError::ZeroStackPages => write!(f, "stack must span at least one page"),
            ConfigError::GuardTooSmall { guard, min } => {
                write!(f, "guard area of {} bytes is smaller than the minimum {}", guard, min)
            }
            ConfigError::TooLarge => write!(f, "memory layout exceeds the address space"),
        }
    }
}

impl std::error::Error for ConfigError {}
