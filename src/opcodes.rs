//! # Opcode Metadata Table
//!
//! This module contains the LS-8 instruction set and the 256-slot dispatch
//! table that maps every opcode byte to its metadata.
//!
//! LS-8 opcodes carry part of their metadata in their bit pattern
//! (`AABCDDDD`):
//! - `AA`: number of operand bytes that follow (0-2)
//! - `B`: set for instructions routed through the ALU
//! - `C`: set for instructions that assign PC themselves
//! - `DDDD`: instruction identifier
//!
//! The table is built at compile time from `INSTRUCTIONS`, so decoding is a
//! single array lookup and nothing is re-declared per run.

use crate::alu::AluOp;

/// Every instruction in the LS-8 instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Ldi,
    Prn,
    Hlt,
    Push,
    Pop,
    Call,
    Ret,
    Jmp,
    Jeq,
    Jne,
    Jgt,
    Jlt,
    Add,
    Mul,
    And,
    Or,
    Xor,
    Not,
    Cmp,
}

impl Instruction {
    /// Returns the ALU operation this instruction delegates to, if any.
    pub fn alu_op(self) -> Option<AluOp> {
        match self {
            Instruction::Add => Some(AluOp::Add),
            Instruction::Mul => Some(AluOp::Mul),
            Instruction::And => Some(AluOp::And),
            Instruction::Or => Some(AluOp::Or),
            Instruction::Xor => Some(AluOp::Xor),
            Instruction::Not => Some(AluOp::Not),
            Instruction::Cmp => Some(AluOp::Cmp),
            _ => None,
        }
    }
}

/// Metadata for a single LS-8 opcode.
///
/// # Examples
///
/// ```
/// use ls8::{decode, Instruction};
///
/// let mul = decode(0xA2).unwrap();
/// assert_eq!(mul.mnemonic, "MUL");
/// assert_eq!(mul.instruction, Instruction::Mul);
/// assert_eq!(mul.size_bytes, 3);
/// assert!(mul.alu);
///
/// assert!(decode(0xFF).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Opcode byte value.
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDI", "PRN").
    pub mnemonic: &'static str,

    /// Which handler executes this opcode.
    pub instruction: Instruction,

    /// Number of operand bytes following the opcode (0-2).
    pub operand_count: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// Whether the instruction is executed by the ALU.
    pub alu: bool,

    /// Whether the instruction may assign PC directly.
    pub sets_pc: bool,
}

const fn entry(opcode: u8, mnemonic: &'static str, instruction: Instruction) -> OpcodeMetadata {
    let operand_count = opcode >> 6;
    OpcodeMetadata {
        opcode,
        mnemonic,
        instruction,
        operand_count,
        size_bytes: 1 + operand_count,
        alu: opcode & 0b0010_0000 != 0,
        sets_pc: opcode & 0b0001_0000 != 0,
    }
}

/// The LS-8 instruction set.
pub const INSTRUCTIONS: [OpcodeMetadata; 19] = [
    entry(0b1000_0010, "LDI", Instruction::Ldi),
    entry(0b0100_0111, "PRN", Instruction::Prn),
    entry(0b0000_0001, "HLT", Instruction::Hlt),
    entry(0b0100_0101, "PUSH", Instruction::Push),
    entry(0b0100_0110, "POP", Instruction::Pop),
    entry(0b0101_0000, "CALL", Instruction::Call),
    entry(0b0001_0001, "RET", Instruction::Ret),
    entry(0b0101_0100, "JMP", Instruction::Jmp),
    entry(0b0101_0101, "JEQ", Instruction::Jeq),
    entry(0b0101_0110, "JNE", Instruction::Jne),
    entry(0b0101_0111, "JGT", Instruction::Jgt),
    entry(0b0101_1000, "JLT", Instruction::Jlt),
    entry(0b1010_0000, "ADD", Instruction::Add),
    entry(0b1010_0010, "MUL", Instruction::Mul),
    entry(0b1010_1000, "AND", Instruction::And),
    entry(0b1010_1010, "OR", Instruction::Or),
    entry(0b1010_1011, "XOR", Instruction::Xor),
    entry(0b0110_1001, "NOT", Instruction::Not),
    entry(0b1010_0111, "CMP", Instruction::Cmp),
];

const fn build_opcode_table() -> [Option<OpcodeMetadata>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < INSTRUCTIONS.len() {
        table[INSTRUCTIONS[i].opcode as usize] = Some(INSTRUCTIONS[i]);
        i += 1;
    }
    table
}

/// Complete 256-entry dispatch table indexed by opcode byte value.
///
/// Slots for bytes outside the instruction set are `None`.
pub static OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_opcode_table();

/// Looks up the metadata for an opcode byte.
///
/// Returns `None` for bytes that are not LS-8 instructions.
pub fn decode(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize].as_ref()
}
