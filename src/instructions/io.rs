//! # Output Instructions
//!
//! - PRN: Print register

use crate::{ExecutionError, MemoryBus, OpcodeMetadata, CPU};

/// Executes the PRN (Print Register) instruction.
///
/// Sends the value of the register named by PC+1 to the output sink.
///
/// Bytes: 2
pub(crate) fn execute_prn<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let reg = cpu.operand_a()?;
    let value = cpu.registers.get(reg)?;

    cpu.emit_output(value);
    cpu.advance_pc(metadata);

    Ok(())
}
