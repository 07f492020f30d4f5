//! # LS-8 Instruction Implementations
//!
//! This module contains the implementations of all LS-8 instructions,
//! organized by category. Each instruction is a standalone function that
//! takes a mutable reference to the CPU and the opcode's metadata, reads its
//! own operands and leaves PC pointing at the next instruction.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic, logic and compare (ADD, MUL, AND, OR, XOR, NOT, CMP)
//! - **load_store**: Immediate loads (LDI)
//! - **io**: Output (PRN)
//! - **stack**: Stack operations (PUSH, POP)
//! - **control**: Control flow (HLT, JMP, CALL, RET)
//! - **branches**: Conditional jumps (JEQ, JNE, JGT, JLT)

pub mod alu;
pub mod branches;
pub mod control;
pub mod io;
pub mod load_store;
pub mod stack;
