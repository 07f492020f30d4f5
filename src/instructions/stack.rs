//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PUSH: Push register on stack
//! - POP: Pop stack into register
//!
//! The stack lives in ordinary memory and grows downward from the address in
//! R7. A push writes just below SP and then decrements it; a pop reads and
//! then increments. CALL and RET share the same helpers.

use crate::{ExecutionError, MemoryBus, OpcodeMetadata, CPU, SP_REGISTER};

/// Writes `value` below the current top of stack and decrements SP.
///
/// SP only moves once the write has succeeded. Fails with `StackOverflow` if
/// SP is already 0x00.
pub(crate) fn push_byte<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> Result<(), ExecutionError> {
    let sp = cpu.registers.sp();
    if sp == 0x00 {
        return Err(ExecutionError::StackOverflow { pc: cpu.pc });
    }

    let new_sp = sp - 1;
    cpu.memory.write(new_sp as u16, value)?;
    cpu.registers.set_sp(new_sp);
    Ok(())
}

/// Reads the byte at SP and increments SP.
///
/// Fails with `StackUnderflow` if SP is already 0xFF.
pub(crate) fn pop_byte<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u8, ExecutionError> {
    let sp = cpu.registers.sp();
    if sp == 0xFF {
        return Err(ExecutionError::StackUnderflow { pc: cpu.pc });
    }

    let value = cpu.memory.read(sp as u16)?;
    cpu.registers.set_sp(sp + 1);
    Ok(value)
}

/// Executes the PUSH instruction.
///
/// Stack operation:
/// 1. Write the register named by PC+1 to memory at SP-1
/// 2. Decrement SP
///
/// `PUSH R7` stores the decremented SP.
///
/// Bytes: 2
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `metadata` - Metadata for the PUSH opcode (0x45)
pub(crate) fn execute_push<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let reg = cpu.operand_a()?;
    let value = cpu.registers.get(reg)?;
    let value = if reg == SP_REGISTER {
        value.wrapping_sub(1)
    } else {
        value
    };

    push_byte(cpu, value)?;

    cpu.advance_pc(metadata);

    Ok(())
}

/// Executes the POP instruction.
///
/// Stack operation:
/// 1. Read memory at SP
/// 2. Increment SP
/// 3. Store the value in the register named by PC+1
///
/// Bytes: 2
pub(crate) fn execute_pop<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let reg = cpu.operand_a()?;
    cpu.registers.get(reg)?;

    let value = pop_byte(cpu)?;
    cpu.registers.set(reg, value)?;

    cpu.advance_pc(metadata);

    Ok(())
}
