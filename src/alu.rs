//! # Arithmetic Logic Unit
//!
//! Pure combinational logic for the LS-8 arithmetic, bitwise and compare
//! operations. Results wrap to 8 bits; the CPU-facing side (register
//! write-back, flag update, PC advance) lives in `instructions::alu`.

use crate::{ExecutionError, Flags};
use std::fmt;
use std::str::FromStr;

/// An operation the ALU can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Mul,
    And,
    Or,
    Xor,
    Not,
    Cmp,
}

/// What an ALU operation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOutput {
    /// New value for the first operand register.
    Register(u8),

    /// New condition flags (CMP only).
    Flags(Flags),
}

impl AluOp {
    /// Returns the operation's mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Mul => "MUL",
            AluOp::And => "AND",
            AluOp::Or => "OR",
            AluOp::Xor => "XOR",
            AluOp::Not => "NOT",
            AluOp::Cmp => "CMP",
        }
    }

    /// Number of bytes the instruction occupies: 2 for NOT, 3 otherwise.
    pub fn size_bytes(self) -> u8 {
        match self {
            AluOp::Not => 2,
            _ => 3,
        }
    }

    /// Computes the operation on two register values.
    ///
    /// `b` is ignored by NOT.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::alu::{AluOp, AluOutput};
    ///
    /// assert_eq!(AluOp::Add.apply(200, 100), AluOutput::Register(44));
    /// assert_eq!(AluOp::Not.apply(0x0F, 0), AluOutput::Register(0xF0));
    /// ```
    pub fn apply(self, a: u8, b: u8) -> AluOutput {
        match self {
            AluOp::Add => AluOutput::Register(a.wrapping_add(b)),
            AluOp::Mul => AluOutput::Register(a.wrapping_mul(b)),
            AluOp::And => AluOutput::Register(a & b),
            AluOp::Or => AluOutput::Register(a | b),
            AluOp::Xor => AluOutput::Register(a ^ b),
            AluOp::Not => AluOutput::Register(!a),
            AluOp::Cmp => {
                let mut flags = Flags::new();
                flags.compare(a, b);
                AluOutput::Flags(flags)
            }
        }
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for AluOp {
    type Err = ExecutionError;

    /// Parses an operation name, case-insensitively.
    ///
    /// # Errors
    ///
    /// `ExecutionError::UnsupportedOperation` for names outside the ALU set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADD" => Ok(AluOp::Add),
            "MUL" => Ok(AluOp::Mul),
            "AND" => Ok(AluOp::And),
            "OR" => Ok(AluOp::Or),
            "XOR" => Ok(AluOp::Xor),
            "NOT" => Ok(AluOp::Not),
            "CMP" => Ok(AluOp::Cmp),
            _ => Err(ExecutionError::UnsupportedOperation(s.to_string())),
        }
    }
}
