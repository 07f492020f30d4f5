//! LS-8 Disassembler Module
//!
//! Converts binary machine code into human-readable assembly mnemonics.

pub mod decoder;
pub mod formatter;

pub use formatter::{format_instruction, format_listing};

/// A single disassembled instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledInstruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDI", "PRN"), or ".byte" for data
    pub mnemonic: &'static str,

    /// Operand bytes (0-2 depending on the instruction)
    pub operands: Vec<u8>,

    /// Total size in bytes (opcode + operands)
    pub size_bytes: u8,
}

/// Disassemble a byte slice into a vector of instructions
///
/// Bytes that do not start a complete instruction become one-byte `.byte`
/// entries and decoding resumes at the next byte.
///
/// # Arguments
///
/// * `bytes` - The machine code to disassemble
/// * `base_address` - Address of `bytes[0]` (affects address display)
///
/// # Examples
///
/// ```
/// use ls8::{disassemble, format_listing};
///
/// let program = [0x82, 0x00, 0x08, 0x47, 0x00, 0x01];
/// let instructions = disassemble(&program, 0);
///
/// assert_eq!(instructions.len(), 3);
/// assert_eq!(instructions[1].mnemonic, "PRN");
/// assert_eq!(
///     format_listing(&instructions),
///     "00: 82 00 08  LDI R0,8\n03: 47 00     PRN R0\n05: 01        HLT\n"
/// );
/// ```
pub fn disassemble(bytes: &[u8], base_address: u16) -> Vec<DisassembledInstruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = base_address;

    while offset < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[offset..], address).unwrap_or_else(|| {
            // Invalid or truncated instruction - emit a .byte directive
            DisassembledInstruction {
                address,
                opcode: bytes[offset],
                mnemonic: ".byte",
                operands: Vec::new(),
                size_bytes: 1,
            }
        });

        offset += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_empty() {
        assert!(disassemble(&[], 0).is_empty());
    }

    #[test]
    fn test_unknown_byte_then_resync() {
        let instructions = disassemble(&[0xEE, 0x01], 0x10);

        assert_eq!(instructions[0].mnemonic, ".byte");
        assert_eq!(instructions[0].address, 0x10);
        assert_eq!(instructions[1].mnemonic, "HLT");
        assert_eq!(instructions[1].address, 0x11);
    }

    #[test]
    fn test_truncated_instruction_becomes_data() {
        // LDI with only one of its two operands
        let instructions = disassemble(&[0x82, 0x00], 0);

        assert_eq!(instructions.len(), 2);
        assert!(instructions.iter().all(|i| i.mnemonic == ".byte"));
    }
}
