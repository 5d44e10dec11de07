//! Opcode Table.
//!
//! Maps the 7-bit major opcode field onto a closed set of tags. Any bit pattern
//! outside the supported set becomes [`Opcode::Invalid`] instead of being
//! reinterpreted as something it is not (e.g. ASCII text read as a word).

use std::fmt;

use crate::common::constants::OPCODE_MASK;
use crate::isa::rv32i::opcodes;

/// Major opcode of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Register-register arithmetic (`add`, `sub`, `slt`).
    RType,
    /// Register-immediate arithmetic (`addi`, `slli`).
    IType,
    /// Word load (`lw`).
    Load,
    /// Word store (`sw`).
    Store,
    /// Conditional branch (`beq`, `bne`, `blt`).
    Branch,
    /// Jump and link (`jal`).
    Jal,
    /// Jump and link register (`jalr`).
    Jalr,
    /// Sentinel for every 7-bit value not listed above.
    Invalid,
}

/// Instruction encoding format, which decides where the immediate bits live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// `funct7 | rs2 | rs1 | funct3 | rd | opcode`
    R,
    /// `imm[11:0] | rs1 | funct3 | rd | opcode`
    I,
    /// `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
    S,
    /// `imm[12|10:5] | rs2 | rs1 | funct3 | imm[4:1|11] | opcode`
    B,
    /// `imm[20|10:1|11|19:12] | rd | opcode`
    J,
}

impl Opcode {
    /// All valid opcodes, in table order.
    pub const VALID: [Self; 7] = [
        Self::RType,
        Self::IType,
        Self::Load,
        Self::Store,
        Self::Branch,
        Self::Jal,
        Self::Jalr,
    ];

    /// Maps raw opcode bits to a tag. Only the low 7 bits are considered.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & OPCODE_MASK {
            opcodes::OP_REG => Self::RType,
            opcodes::OP_IMM => Self::IType,
            opcodes::OP_LOAD => Self::Load,
            opcodes::OP_STORE => Self::Store,
            opcodes::OP_BRANCH => Self::Branch,
            opcodes::OP_JAL => Self::Jal,
            opcodes::OP_JALR => Self::Jalr,
            _ => Self::Invalid,
        }
    }

    /// Returns the 7-bit encoding. `Invalid` encodes as zero, which is itself invalid.
    pub const fn bits(self) -> u32 {
        match self {
            Self::RType => opcodes::OP_REG,
            Self::IType => opcodes::OP_IMM,
            Self::Load => opcodes::OP_LOAD,
            Self::Store => opcodes::OP_STORE,
            Self::Branch => opcodes::OP_BRANCH,
            Self::Jal => opcodes::OP_JAL,
            Self::Jalr => opcodes::OP_JALR,
            Self::Invalid => 0,
        }
    }

    /// Returns `true` for every tag except [`Opcode::Invalid`].
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Encoding format used by instructions with this opcode.
    pub const fn format(self) -> Option<Format> {
        match self {
            Self::RType => Some(Format::R),
            Self::IType | Self::Load | Self::Jalr => Some(Format::I),
            Self::Store => Some(Format::S),
            Self::Branch => Some(Format::B),
            Self::Jal => Some(Format::J),
            Self::Invalid => None,
        }
    }

    /// Human-readable name of the opcode class.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RType => "R-Type",
            Self::IType => "I-Type",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::Branch => "BRANCH",
            Self::Jal => "JAL",
            Self::Jalr => "JALR",
            Self::Invalid => "Unknown",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::R => "R",
            Self::I => "I",
            Self::S => "S",
            Self::B => "B",
            Self::J => "J",
        };
        f.write_str(s)
    }
}

/// Returns `true` if `bits` is exactly the 7-bit encoding of a supported opcode.
///
/// Values wider than 7 bits are never valid opcodes, even if their low bits match.
pub const fn is_valid_opcode(bits: u32) -> bool {
    bits <= OPCODE_MASK && Opcode::from_bits(bits).is_valid()
}
