//! # Execution Tracing
//!
//! A `TraceSnapshot` captures what the CPU is about to execute: the program
//! counter, the three memory bytes starting there and the register file.
//! The CPU hands one to the trace callback on every fetch.

use crate::NUM_REGISTERS;
use std::fmt;

/// CPU state at the start of a fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceSnapshot {
    /// Address of the instruction about to execute
    pub pc: u16,

    /// Memory at PC, PC+1 and PC+2 (bytes past the end read as 0)
    pub bytes: [u8; 3],

    /// Register values R0-R7
    pub registers: [u8; NUM_REGISTERS],

    /// Packed `FL` register (`00000LGE`)
    pub flags: u8,
}

impl fmt::Display for TraceSnapshot {
    /// Renders `TRACE: PC | b0 b1 b2 | R0 R1 R2 R3 R4 R5 R6 R7` in hex.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::TraceSnapshot;
    ///
    /// let snapshot = TraceSnapshot {
    ///     pc: 0x00,
    ///     bytes: [0x82, 0x00, 0x08],
    ///     registers: [0, 0, 0, 0, 0, 0, 0, 0xF4],
    ///     flags: 0,
    /// };
    /// assert_eq!(
    ///     snapshot.to_string(),
    ///     "TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4"
    /// );
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
            self.pc, self.bytes[0], self.bytes[1], self.bytes[2]
        )?;
        for value in self.registers.iter() {
            write!(f, " {:02X}", value)?;
        }
        Ok(())
    }
}
