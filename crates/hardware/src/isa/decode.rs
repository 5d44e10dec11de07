//! RISC-V Instruction Decoder.
//!
//! This module turns an [`Instruction`] into an [`Op`], the closed set of
//! operations the CPU can execute. It performs the following:
//! 1. **Opcode validation:** Invalid opcodes are rejected before any field is interpreted.
//! 2. **Dispatch:** `(opcode, funct3, funct7)` selects one `Op` variant.
//! 3. **Immediate extraction:** Each variant carries its sign-extended immediate.
//!
//! [`Op::encode`] is the inverse, used by the assembler once ranges are checked.

use std::fmt;

use crate::common::constants::SHAMT_MASK;
use crate::common::error::DecodeError;
use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;
use crate::isa::rv32i::{funct3, funct7};

/// A decoded operation with typed operands.
///
/// Register fields are indices 0-31; immediates are already sign extended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// `rd = rs1 + rs2` (wrapping).
    Add {
        /// Destination register.
        rd: usize,
        /// First source register.
        rs1: usize,
        /// Second source register.
        rs2: usize,
    },
    /// `rd = rs1 - rs2` (wrapping).
    Sub {
        /// Destination register.
        rd: usize,
        /// First source register.
        rs1: usize,
        /// Second source register.
        rs2: usize,
    },
    /// `rd = (rs1 < rs2) as signed`.
    Slt {
        /// Destination register.
        rd: usize,
        /// First source register.
        rs1: usize,
        /// Second source register.
        rs2: usize,
    },
    /// `rd = rs1 + imm`.
    Addi {
        /// Destination register.
        rd: usize,
        /// Source register.
        rs1: usize,
        /// Sign-extended 12-bit immediate.
        imm: i32,
    },
    /// `rd = rs1 << shamt`.
    Slli {
        /// Destination register.
        rd: usize,
        /// Source register.
        rs1: usize,
        /// Shift amount, 0-31.
        shamt: u32,
    },
    /// `rd = mem[rs1 + imm]`.
    Lw {
        /// Destination register.
        rd: usize,
        /// Base address register.
        rs1: usize,
        /// Sign-extended 12-bit offset.
        imm: i32,
    },
    /// `mem[rs1 + imm] = rs2`.
    Sw {
        /// Base address register.
        rs1: usize,
        /// Register holding the stored value.
        rs2: usize,
        /// Sign-extended 12-bit offset.
        imm: i32,
    },
    /// Branch to `pc + imm` if `rs1 == rs2`.
    Beq {
        /// First compared register.
        rs1: usize,
        /// Second compared register.
        rs2: usize,
        /// Even, sign-extended 13-bit offset.
        imm: i32,
    },
    /// Branch to `pc + imm` if `rs1 != rs2`.
    Bne {
        /// First compared register.
        rs1: usize,
        /// Second compared register.
        rs2: usize,
        /// Even, sign-extended 13-bit offset.
        imm: i32,
    },
    /// Branch to `pc + imm` if `rs1 < rs2` (signed).
    Blt {
        /// First compared register.
        rs1: usize,
        /// Second compared register.
        rs2: usize,
        /// Even, sign-extended 13-bit offset.
        imm: i32,
    },
    /// `rd = pc + 4; pc += imm`.
    Jal {
        /// Link register.
        rd: usize,
        /// Even, sign-extended 21-bit offset.
        imm: i32,
    },
    /// `rd = pc + 4; pc = (rs1 + imm) & !1`.
    Jalr {
        /// Link register.
        rd: usize,
        /// Base address register.
        rs1: usize,
        /// Sign-extended 12-bit offset.
        imm: i32,
    },
}

/// Coarse instruction class, used for statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpClass {
    /// Register or immediate arithmetic.
    Alu,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Conditional branch.
    Branch,
    /// Unconditional jump.
    Jump,
}

impl Op {
    /// Assembler mnemonic of this operation.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Sub { .. } => "sub",
            Self::Slt { .. } => "slt",
            Self::Addi { .. } => "addi",
            Self::Slli { .. } => "slli",
            Self::Lw { .. } => "lw",
            Self::Sw { .. } => "sw",
            Self::Beq { .. } => "beq",
            Self::Bne { .. } => "bne",
            Self::Blt { .. } => "blt",
            Self::Jal { .. } => "jal",
            Self::Jalr { .. } => "jalr",
        }
    }

    /// Instruction class of this operation.
    pub const fn class(&self) -> OpClass {
        match self {
            Self::Add { .. }
            | Self::Sub { .. }
            | Self::Slt { .. }
            | Self::Addi { .. }
            | Self::Slli { .. } => OpClass::Alu,
            Self::Lw { .. } => OpClass::Load,
            Self::Sw { .. } => OpClass::Store,
            Self::Beq { .. } | Self::Bne { .. } | Self::Blt { .. } => OpClass::Branch,
            Self::Jal { .. } | Self::Jalr { .. } => OpClass::Jump,
        }
    }

    /// Returns `true` if the operation writes the program counter itself.
    pub const fn is_control_flow(&self) -> bool {
        matches!(self.class(), OpClass::Branch | OpClass::Jump)
    }

    /// Encodes the operation into an instruction word.
    ///
    /// Immediates are truncated to their field width; callers must range check first.
    pub const fn encode(&self) -> Instruction {
        let base = Instruction::new(0);
        match *self {
            Self::Add { rd, rs1, rs2 } => r_type(rd, rs1, rs2, funct3::ADD_SUB, funct7::ADD),
            Self::Sub { rd, rs1, rs2 } => r_type(rd, rs1, rs2, funct3::ADD_SUB, funct7::SUB),
            Self::Slt { rd, rs1, rs2 } => r_type(rd, rs1, rs2, funct3::SLT, funct7::DEFAULT),
            Self::Addi { rd, rs1, imm } => i_type(Opcode::IType, rd, rs1, funct3::ADDI, imm),
            Self::Slli { rd, rs1, shamt } => {
                i_type(Opcode::IType, rd, rs1, funct3::SLLI, shamt as i32)
            }
            Self::Lw { rd, rs1, imm } => i_type(Opcode::Load, rd, rs1, funct3::LW, imm),
            Self::Jalr { rd, rs1, imm } => i_type(Opcode::Jalr, rd, rs1, funct3::JALR, imm),
            Self::Sw { rs1, rs2, imm } => base
                .with_opcode(Opcode::Store)
                .with_funct3(funct3::SW)
                .with_rs1(rs1)
                .with_rs2(rs2)
                .with_imm_s(imm),
            Self::Beq { rs1, rs2, imm } => b_type(funct3::BEQ, rs1, rs2, imm),
            Self::Bne { rs1, rs2, imm } => b_type(funct3::BNE, rs1, rs2, imm),
            Self::Blt { rs1, rs2, imm } => b_type(funct3::BLT, rs1, rs2, imm),
            Self::Jal { rd, imm } => base.with_opcode(Opcode::Jal).with_rd(rd).with_imm_j(imm),
        }
    }
}

const fn r_type(rd: usize, rs1: usize, rs2: usize, f3: u32, f7: u32) -> Instruction {
    Instruction::new(0)
        .with_opcode(Opcode::RType)
        .with_rd(rd)
        .with_rs1(rs1)
        .with_rs2(rs2)
        .with_funct3(f3)
        .with_funct7(f7)
}

const fn i_type(opcode: Opcode, rd: usize, rs1: usize, f3: u32, imm: i32) -> Instruction {
    Instruction::new(0)
        .with_opcode(opcode)
        .with_rd(rd)
        .with_rs1(rs1)
        .with_funct3(f3)
        .with_imm_i(imm)
}

const fn b_type(f3: u32, rs1: usize, rs2: usize, imm: i32) -> Instruction {
    Instruction::new(0)
        .with_opcode(Opcode::Branch)
        .with_funct3(f3)
        .with_rs1(rs1)
        .with_rs2(rs2)
        .with_imm_b(imm)
}

/// Decodes an instruction word into an operation.
///
/// # Errors
///
/// * [`DecodeError::InvalidOpcode`] if the opcode is not in the opcode table.
/// * [`DecodeError::Unimplemented`] if the funct3/funct7 combination is not supported.
pub const fn decode(inst: Instruction) -> Result<Op, DecodeError> {
    let (rd, rs1, rs2) = (inst.rd(), inst.rs1(), inst.rs2());
    let op = match inst.opcode() {
        Opcode::Invalid => {
            return Err(DecodeError::InvalidOpcode {
                opcode: inst.opcode_bits(),
                word: inst.raw(),
            });
        }
        Opcode::RType => match (inst.funct3(), inst.funct7()) {
            (funct3::ADD_SUB, funct7::ADD) => Op::Add { rd, rs1, rs2 },
            (funct3::ADD_SUB, funct7::SUB) => Op::Sub { rd, rs1, rs2 },
            (funct3::SLT, _) => Op::Slt { rd, rs1, rs2 },
            _ => return Err(unimplemented(inst)),
        },
        Opcode::IType => match inst.funct3() {
            funct3::ADDI => Op::Addi {
                rd,
                rs1,
                imm: inst.imm_i(),
            },
            funct3::SLLI => Op::Slli {
                rd,
                rs1,
                shamt: (inst.imm_i() as u32) & SHAMT_MASK,
            },
            _ => return Err(unimplemented(inst)),
        },
        Opcode::Load => match inst.funct3() {
            funct3::LW => Op::Lw {
                rd,
                rs1,
                imm: inst.imm_i(),
            },
            _ => return Err(unimplemented(inst)),
        },
        Opcode::Store => match inst.funct3() {
            funct3::SW => Op::Sw {
                rs1,
                rs2,
                imm: inst.imm_s(),
            },
            _ => return Err(unimplemented(inst)),
        },
        Opcode::Branch => {
            let imm = inst.imm_b();
            match inst.funct3() {
                funct3::BEQ => Op::Beq { rs1, rs2, imm },
                funct3::BNE => Op::Bne { rs1, rs2, imm },
                funct3::BLT => Op::Blt { rs1, rs2, imm },
                _ => return Err(unimplemented(inst)),
            }
        }
        Opcode::Jal => Op::Jal {
            rd,
            imm: inst.imm_j(),
        },
        Opcode::Jalr => Op::Jalr {
            rd,
            rs1,
            imm: inst.imm_i(),
        },
    };
    Ok(op)
}

const fn unimplemented(inst: Instruction) -> DecodeError {
    DecodeError::Unimplemented {
        word: inst.raw(),
        opcode: inst.opcode().name(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
    }
}

impl fmt::Display for Op {
    /// Formats the operation in the syntax accepted by the assembler.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mnemonic();
        match *self {
            Self::Add { rd, rs1, rs2 }
            | Self::Sub { rd, rs1, rs2 }
            | Self::Slt { rd, rs1, rs2 } => write!(f, "{m} x{rd}, x{rs1}, x{rs2}"),
            Self::Addi { rd, rs1, imm } => write!(f, "{m} x{rd}, x{rs1}, {imm}"),
            Self::Slli { rd, rs1, shamt } => write!(f, "{m} x{rd}, x{rs1}, {shamt}"),
            Self::Lw { rd, rs1, imm } | Self::Jalr { rd, rs1, imm } => {
                write!(f, "{m} x{rd}, {imm}(x{rs1})")
            }
            Self::Sw { rs1, rs2, imm } => write!(f, "{m} x{rs2}, {imm}(x{rs1})"),
            Self::Beq { rs1, rs2, imm }
            | Self::Bne { rs1, rs2, imm }
            | Self::Blt { rs1, rs2, imm } => write!(f, "{m} x{rs1}, x{rs2}, {imm}"),
            Self::Jal { rd, imm } => write!(f, "{m} x{rd}, {imm}"),
        }
    }
}
