//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - HLT: Halt the CPU
//! - JMP: Jump to the address in a register
//! - CALL: Call subroutine
//! - RET: Return from subroutine
//!
//! CALL pushes the address of the instruction after itself (PC+2) onto the
//! stack; RET pops it back into PC.

use super::stack::{pop_byte, push_byte};
use crate::{ExecutionError, MemoryBus, OpcodeMetadata, CPU};

/// Executes the HLT instruction.
///
/// Stops the run loop. PC is left pointing at the HLT.
pub(crate) fn execute_hlt<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.halted = true;
    log::debug!("HLT at 0x{:02X} after {} steps", cpu.pc, cpu.steps + 1);

    Ok(())
}

/// Executes the JMP instruction.
///
/// Sets PC to the value of the register named by PC+1.
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let reg = cpu.operand_a()?;
    cpu.pc = cpu.registers.get(reg)? as u16;

    Ok(())
}

/// Executes the CALL instruction.
///
/// 1. Push the return address (PC+2) onto the stack
/// 2. Set PC to the value of the register named by PC+1
///
/// The target register is read after the push, matching PUSH.
///
/// # Errors
///
/// `AddressOutOfRange` if the return address does not fit in a byte.
pub(crate) fn execute_call<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let reg = cpu.operand_a()?;
    cpu.registers.get(reg)?;

    let return_address = cpu.pc.wrapping_add(metadata.size_bytes as u16);
    let return_byte = u8::try_from(return_address)
        .map_err(|_| ExecutionError::AddressOutOfRange(return_address))?;

    push_byte(cpu, return_byte)?;

    cpu.pc = cpu.registers.get(reg)? as u16;

    Ok(())
}

/// Executes the RET instruction.
///
/// Pops the return address pushed by CALL into PC.
pub(crate) fn execute_ret<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.pc = pop_byte(cpu)? as u16;

    Ok(())
}
