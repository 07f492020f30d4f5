//! # Load Instructions
//!
//! - LDI: Load Immediate

use crate::{ExecutionError, MemoryBus, OpcodeMetadata, CPU};

/// Executes the LDI (Load Immediate) instruction.
///
/// Stores the byte at PC+2 in the register named by PC+1.
///
/// Bytes: 3
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `metadata` - Metadata for the LDI opcode (0x82)
pub(crate) fn execute_ldi<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let reg = cpu.operand_a()?;
    let value = cpu.operand_b()?;

    cpu.registers.set(reg, value)?;
    cpu.advance_pc(metadata);

    Ok(())
}
