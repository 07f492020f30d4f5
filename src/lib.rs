//! # LS-8 CPU Emulator Core
//!
//! An instruction-level emulator for the LS-8, a small 8-bit register machine
//! with 256 bytes of memory, eight general-purpose registers and a
//! downward-growing stack.
//!
//! This crate provides the CPU state structure, a trait-based memory bus
//! abstraction, a compile-time opcode dispatch table, a text program loader
//! and a disassembler.
//!
//! ## Quick Start
//!
//! ```rust
//! use ls8::{CPU, FlatMemory};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! // LDI R0,8  LDI R1,9  MUL R0,R1  PRN R0  HLT
//! let program = [0x82, 0, 8, 0x82, 1, 9, 0xA2, 0, 1, 0x47, 0, 0x01];
//!
//! let mut cpu = CPU::new(FlatMemory::new());
//! cpu.load(&program, 0).unwrap();
//!
//! let printed = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&printed);
//! cpu.set_output_callback(move |value| sink.borrow_mut().push(value));
//!
//! cpu.run().unwrap();
//! assert_eq!(*printed.borrow(), vec![72]);
//! assert!(cpu.is_halted());
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the fetch-decode-execute loop
//! - `memory` - MemoryBus trait and the flat 256-byte implementation
//! - `registers` - Register file and stack pointer conventions
//! - `flags` - LT/GT/EQ condition flags
//! - `opcodes` - Instruction set table
//! - `alu` - Arithmetic and logic operations
//! - `trace` - Per-fetch state snapshots for debugging
//! - `loader` - Text program format
//! - `disassembler` - Machine code to mnemonics

pub mod alu;
pub mod cpu;
pub mod disassembler;
pub mod flags;
pub mod loader;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod trace;

#[cfg(feature = "wasm")]
pub mod wasm;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use alu::AluOp;
pub use cpu::{RunOptions, CPU};
pub use disassembler::{disassemble, format_instruction, format_listing, DisassembledInstruction};
pub use flags::Flags;
pub use loader::{load_program_file, parse_program, LoadError};
pub use memory::{FlatMemory, MemoryBus, MEMORY_SIZE};
pub use opcodes::{decode, Instruction, OpcodeMetadata, INSTRUCTIONS, OPCODE_TABLE};
pub use registers::{RegisterFile, NUM_REGISTERS, SP_REGISTER, STACK_TOP};
pub use trace::TraceSnapshot;

/// Errors that can occur during CPU execution.
///
/// Every variant is fatal: the CPU stops where the fault happened and the
/// caller decides what to report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The ALU was asked for an operation it does not know.
    #[error("unsupported ALU operation `{0}`")]
    UnsupportedOperation(String),

    /// The byte at `pc` is not an instruction in the LS-8 instruction set.
    #[error("illegal instruction 0x{opcode:02X} at address 0x{pc:02X}")]
    IllegalInstruction { opcode: u8, pc: u16 },

    /// An operand named a register outside R0-R7.
    #[error("register index {0} is out of range (R0-R7)")]
    RegisterOutOfRange(u8),

    /// A memory access fell outside the addressable range.
    #[error("memory address 0x{0:X} is out of range")]
    AddressOutOfRange(u16),

    /// PUSH or CALL with the stack pointer already at address 0x00.
    #[error("stack overflow at address 0x{pc:02X}")]
    StackOverflow { pc: u16 },

    /// POP or RET with the stack pointer already at address 0xFF.
    #[error("stack underflow at address 0x{pc:02X}")]
    StackUnderflow { pc: u16 },

    /// The configured step bound was reached before HLT.
    #[error("program did not halt within {0} steps")]
    StepLimitExceeded(u64),
}
