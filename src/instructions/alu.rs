//! # ALU Instructions
//!
//! Register write-back and flag update for ADD, MUL, AND, OR, XOR, NOT and
//! CMP. The arithmetic itself is in `crate::alu`.

use crate::alu::{AluOp, AluOutput};
use crate::{ExecutionError, MemoryBus, OpcodeMetadata, CPU};

/// Executes an ALU instruction fetched from memory.
///
/// Operands are register indices: `reg_a` at PC+1 and, for two-operand
/// operations, `reg_b` at PC+2.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `metadata` - Metadata for the opcode being executed
/// * `op` - The ALU operation the opcode maps to
pub(crate) fn execute_alu_instruction<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    op: AluOp,
) -> Result<(), ExecutionError> {
    let reg_a = cpu.operand_a()?;
    let reg_b = if metadata.operand_count > 1 {
        cpu.operand_b()?
    } else {
        0
    };

    execute_alu(cpu, op, reg_a, reg_b)
}

/// Applies `op` to registers `reg_a` and `reg_b` and advances PC.
///
/// - ADD, MUL, AND, OR, XOR: `reg[a] = reg[a] op reg[b]`, wrapping at 8 bits
/// - NOT: `reg[a] = !reg[a]`; `reg_b` is not read
/// - CMP: sets exactly one of LT/GT/EQ; registers unchanged
///
/// PC advances by 3, or 2 for NOT. On error nothing is modified.
pub(crate) fn execute_alu<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: AluOp,
    reg_a: u8,
    reg_b: u8,
) -> Result<(), ExecutionError> {
    let a = cpu.registers.get(reg_a)?;
    let b = match op {
        AluOp::Not => 0,
        _ => cpu.registers.get(reg_b)?,
    };

    match op.apply(a, b) {
        AluOutput::Register(result) => cpu.registers.set(reg_a, result)?,
        AluOutput::Flags(flags) => cpu.flags = flags,
    }

    cpu.pc = cpu.pc.wrapping_add(op.size_bytes() as u16);

    Ok(())
}
