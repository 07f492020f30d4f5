//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from a
//! specific memory implementation, and `FlatMemory`, the 256-byte RAM the
//! LS-8 ships with.
//!
//! ## Design Principles
//!
//! Unlike real hardware the emulator fails fast on bad addresses:
//! - Every access is bounds checked against `size()`
//! - Out-of-range accesses return `ExecutionError::AddressOutOfRange`
//! - Cells hold `u8`, so stored values are always 8-bit

use crate::ExecutionError;

/// Number of addressable cells in LS-8 memory.
pub const MEMORY_SIZE: usize = 256;

/// Memory bus trait for CPU to read/write bytes.
///
/// Addresses are `u16` so that a program counter which runs past the last
/// cell can be represented and rejected instead of wrapping silently.
///
/// # Examples
///
/// ```
/// use ls8::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.write(0x42, 0x99).unwrap();
/// assert_eq!(mem.read(0x42).unwrap(), 0x99);
///
/// // One past the end is rejected
/// assert!(mem.read(0x100).is_err());
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use ls8::{ExecutionError, MemoryBus};
///
/// /// Memory that records every write address.
/// struct LoggingMemory {
///     cells: [u8; 256],
///     writes: Vec<u16>,
/// }
///
/// impl MemoryBus for LoggingMemory {
///     fn size(&self) -> usize {
///         self.cells.len()
///     }
///
///     fn read(&self, addr: u16) -> Result<u8, ExecutionError> {
///         self.cells
///             .get(addr as usize)
///             .copied()
///             .ok_or(ExecutionError::AddressOutOfRange(addr))
///     }
///
///     fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
///         let cell = self
///             .cells
///             .get_mut(addr as usize)
///             .ok_or(ExecutionError::AddressOutOfRange(addr))?;
///         *cell = value;
///         self.writes.push(addr);
///         Ok(())
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Returns the number of addressable cells.
    fn size(&self) -> usize;

    /// Reads a byte from the specified address.
    ///
    /// # Errors
    ///
    /// `ExecutionError::AddressOutOfRange` if `addr >= size()`.
    fn read(&self, addr: u16) -> Result<u8, ExecutionError>;

    /// Writes a byte to the specified address.
    ///
    /// # Errors
    ///
    /// `ExecutionError::AddressOutOfRange` if `addr >= size()`.
    fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError>;

    /// Reads a byte for diagnostic purposes, returning 0 for addresses past
    /// the end instead of failing.
    fn peek(&self, addr: u16) -> u8 {
        self.read(addr).unwrap_or(0)
    }
}

/// Flat 256-byte RAM.
///
/// All addresses 0x00-0xFF are writable and initialized to 0x00. Memory is
/// allocated once and never resized.
///
/// # Examples
///
/// ```
/// use ls8::{FlatMemory, MemoryBus, MEMORY_SIZE};
///
/// let mem = FlatMemory::new();
/// assert_eq!(mem.size(), MEMORY_SIZE);
/// assert_eq!(mem.read(0xFF).unwrap(), 0x00);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMemory {
    data: [u8; MEMORY_SIZE],
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: [0; MEMORY_SIZE],
        }
    }

    /// Returns the raw contents of memory.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn size(&self) -> usize {
        MEMORY_SIZE
    }

    fn read(&self, addr: u16) -> Result<u8, ExecutionError> {
        self.data
            .get(addr as usize)
            .copied()
            .ok_or(ExecutionError::AddressOutOfRange(addr))
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        let cell = self
            .data
            .get_mut(addr as usize)
            .ok_or(ExecutionError::AddressOutOfRange(addr))?;
        *cell = value;
        Ok(())
    }
}
