//! # Register File
//!
//! Eight 8-bit general-purpose registers, R0-R7. By convention R7 holds the
//! stack pointer and starts at `STACK_TOP`, leaving the cells above it free.

use crate::ExecutionError;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 8;

/// Register reserved for the stack pointer.
pub const SP_REGISTER: u8 = 7;

/// Initial stack pointer value. The stack grows down from here.
pub const STACK_TOP: u8 = 0xF4;

/// The LS-8 general-purpose register file.
///
/// Register indices arrive as raw operand bytes, so every access is checked.
///
/// # Examples
///
/// ```
/// use ls8::{RegisterFile, STACK_TOP};
///
/// let mut regs = RegisterFile::new();
/// assert_eq!(regs.sp(), STACK_TOP);
///
/// regs.set(3, 0x2A).unwrap();
/// assert_eq!(regs.get(3).unwrap(), 0x2A);
/// assert!(regs.get(8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterFile {
    values: [u8; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a register file with R0-R6 zeroed and the stack pointer at
    /// `STACK_TOP`.
    pub fn new() -> Self {
        let mut values = [0; NUM_REGISTERS];
        values[SP_REGISTER as usize] = STACK_TOP;
        Self { values }
    }

    /// Returns the value of register `index`.
    ///
    /// # Errors
    ///
    /// `ExecutionError::RegisterOutOfRange` if `index > 7`.
    pub fn get(&self, index: u8) -> Result<u8, ExecutionError> {
        self.values
            .get(index as usize)
            .copied()
            .ok_or(ExecutionError::RegisterOutOfRange(index))
    }

    /// Stores `value` in register `index`.
    ///
    /// # Errors
    ///
    /// `ExecutionError::RegisterOutOfRange` if `index > 7`.
    pub fn set(&mut self, index: u8, value: u8) -> Result<(), ExecutionError> {
        let slot = self
            .values
            .get_mut(index as usize)
            .ok_or(ExecutionError::RegisterOutOfRange(index))?;
        *slot = value;
        Ok(())
    }

    /// Returns the stack pointer (R7).
    pub fn sp(&self) -> u8 {
        self.values[SP_REGISTER as usize]
    }

    /// Sets the stack pointer (R7).
    pub fn set_sp(&mut self, value: u8) {
        self.values[SP_REGISTER as usize] = value;
    }

    /// Returns a copy of all eight registers.
    pub fn snapshot(&self) -> [u8; NUM_REGISTERS] {
        self.values
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let regs = RegisterFile::new();
        assert_eq!(regs.snapshot(), [0, 0, 0, 0, 0, 0, 0, 0xF4]);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut regs = RegisterFile::new();
        assert_eq!(regs.get(8), Err(ExecutionError::RegisterOutOfRange(8)));
        assert_eq!(
            regs.set(0xFF, 1),
            Err(ExecutionError::RegisterOutOfRange(0xFF))
        );
    }

    #[test]
    fn test_sp_is_r7() {
        let mut regs = RegisterFile::new();
        regs.set(SP_REGISTER, 0x80).unwrap();
        assert_eq!(regs.sp(), 0x80);

        regs.set_sp(0x10);
        assert_eq!(regs.get(7), Ok(0x10));
    }
}
