//! Instruction decoder for the LS-8 disassembler

use crate::disassembler::DisassembledInstruction;
use crate::opcodes::decode;

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
///
/// # Returns
///
/// `None` for bytes outside the instruction set and for instructions cut
/// short by the end of the slice
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<DisassembledInstruction> {
    let opcode = *bytes.first()?;
    let metadata = decode(opcode)?;

    let size = metadata.size_bytes as usize;
    if bytes.len() < size {
        return None;
    }

    Some(DisassembledInstruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        operands: bytes[1..size].to_vec(),
        size_bytes: metadata.size_bytes,
    })
}
