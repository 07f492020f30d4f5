//! Formatting functions for disassembled instructions

use crate::disassembler::DisassembledInstruction;
use std::fmt::Write;

/// Format a single instruction as assembly text
///
/// - LDI: `LDI R0,8` (register, decimal immediate)
/// - Register operands: `PRN R0`, `MUL R0,R1`
/// - Data: `.byte 0xEE`
pub fn format_instruction(instr: &DisassembledInstruction) -> String {
    if instr.mnemonic == ".byte" {
        return format!(".byte 0x{:02X}", instr.opcode);
    }

    match (instr.mnemonic, instr.operands.as_slice()) {
        (_, []) => instr.mnemonic.to_string(),
        ("LDI", [reg, value]) => format!("LDI R{},{}", reg, value),
        (mnemonic, [reg]) => format!("{} R{}", mnemonic, reg),
        (mnemonic, [reg_a, reg_b]) => format!("{} R{},R{}", mnemonic, reg_a, reg_b),
        (mnemonic, operands) => format!("{} {:?}", mnemonic, operands),
    }
}

/// Format instructions as a listing: address, raw bytes, then assembly
pub fn format_listing(instructions: &[DisassembledInstruction]) -> String {
    let mut output = String::new();

    for instr in instructions {
        let mut raw = format!("{:02X}", instr.opcode);
        for operand in &instr.operands {
            let _ = write!(raw, " {:02X}", operand);
        }
        let _ = writeln!(
            output,
            "{:02X}: {:<9} {}",
            instr.address,
            raw,
            format_instruction(instr)
        );
    }

    output
}
