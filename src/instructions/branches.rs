//! # Branch Instructions
//!
//! This module implements conditional jumps on the CMP flags:
//! - JEQ: Jump if Equal
//! - JNE: Jump if Not Equal
//! - JGT: Jump if Greater Than
//! - JLT: Jump if Less Than
//!
//! A taken branch sets PC to the value of the register named by PC+1. A
//! branch not taken falls through by the instruction width (2 bytes).

use crate::{ExecutionError, MemoryBus, OpcodeMetadata, CPU};

fn branch_if<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    condition: bool,
) -> Result<(), ExecutionError> {
    // Register is validated whether or not the branch is taken
    let reg = cpu.operand_a()?;
    let target = cpu.registers.get(reg)?;

    if condition {
        cpu.pc = target as u16;
    } else {
        cpu.advance_pc(metadata);
    }

    Ok(())
}

/// Executes the JEQ (Jump if Equal) instruction.
pub(crate) fn execute_jeq<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let condition = cpu.flags.eq;
    branch_if(cpu, metadata, condition)
}

/// Executes the JNE (Jump if Not Equal) instruction.
pub(crate) fn execute_jne<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let condition = !cpu.flags.eq;
    branch_if(cpu, metadata, condition)
}

/// Executes the JGT (Jump if Greater Than) instruction.
pub(crate) fn execute_jgt<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let condition = cpu.flags.gt;
    branch_if(cpu, metadata, condition)
}

/// Executes the JLT (Jump if Less Than) instruction.
pub(crate) fn execute_jlt<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let condition = cpu.flags.lt;
    branch_if(cpu, metadata, condition)
}
