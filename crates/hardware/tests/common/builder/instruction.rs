//! # Instruction Builder
//!
//! Packs instruction words with plain shifts and masks, independent of the
//! codec under test, so encoder and decoder can be checked against it.

use rv32sim_core::isa::rv32i::{funct3, funct7, opcodes};

/// Encode an R-type instruction.
pub fn r_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> u32 {
    (funct7 & 0x7F) << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | (rd & 0x1F) << 7
        | (opcode & 0x7F)
}

/// Encode an I-type instruction.
pub fn i_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, imm: i32) -> u32 {
    let imm_bits = (imm as u32) & 0xFFF;
    imm_bits << 20 | (rs1 & 0x1F) << 15 | (funct3 & 0x7) << 12 | (rd & 0x1F) << 7 | (opcode & 0x7F)
}

/// Encode an S-type instruction.
pub fn s_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    ((imm >> 5) & 0x7F) << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | (imm & 0x1F) << 7
        | (opcode & 0x7F)
}

/// Encode a B-type instruction.
pub fn b_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    ((imm >> 12) & 1) << 31
        | ((imm >> 5) & 0x3F) << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | ((imm >> 1) & 0xF) << 8
        | ((imm >> 11) & 1) << 7
        | (opcode & 0x7F)
}

/// Encode a J-type instruction.
pub fn j_type(opcode: u32, rd: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    ((imm >> 20) & 1) << 31
        | ((imm >> 1) & 0x3FF) << 21
        | ((imm >> 11) & 1) << 20
        | ((imm >> 12) & 0xFF) << 12
        | (rd & 0x1F) << 7
        | (opcode & 0x7F)
}

/// Fluent builder for the supported instructions.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstructionBuilder {
    rd: u32,
    rs1: u32,
    rs2: u32,
    imm: i32,
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rd(mut self, rd: u32) -> Self {
        self.rd = rd;
        self
    }

    pub fn rs1(mut self, rs1: u32) -> Self {
        self.rs1 = rs1;
        self
    }

    pub fn rs2(mut self, rs2: u32) -> Self {
        self.rs2 = rs2;
        self
    }

    pub fn imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    pub fn add(self) -> u32 {
        self.reg_op(funct3::ADD_SUB, funct7::ADD)
    }

    pub fn sub(self) -> u32 {
        self.reg_op(funct3::ADD_SUB, funct7::SUB)
    }

    pub fn slt(self) -> u32 {
        self.reg_op(funct3::SLT, funct7::DEFAULT)
    }

    pub fn addi(self) -> u32 {
        i_type(opcodes::OP_IMM, self.rd, funct3::ADDI, self.rs1, self.imm)
    }

    pub fn slli(self) -> u32 {
        i_type(opcodes::OP_IMM, self.rd, funct3::SLLI, self.rs1, self.imm)
    }

    pub fn lw(self) -> u32 {
        i_type(opcodes::OP_LOAD, self.rd, funct3::LW, self.rs1, self.imm)
    }

    pub fn sw(self) -> u32 {
        s_type(opcodes::OP_STORE, funct3::SW, self.rs1, self.rs2, self.imm)
    }

    pub fn beq(self) -> u32 {
        self.branch(funct3::BEQ)
    }

    pub fn bne(self) -> u32 {
        self.branch(funct3::BNE)
    }

    pub fn blt(self) -> u32 {
        self.branch(funct3::BLT)
    }

    fn reg_op(self, f3: u32, f7: u32) -> u32 {
        r_type(opcodes::OP_REG, self.rd, f3, self.rs1, self.rs2, f7)
    }

    fn branch(self, f3: u32) -> u32 {
        b_type(opcodes::OP_BRANCH, f3, self.rs1, self.rs2, self.imm)
    }

    pub fn jal(self) -> u32 {
        j_type(opcodes::OP_JAL, self.rd, self.imm)
    }

    pub fn jalr(self) -> u32 {
        i_type(opcodes::OP_JALR, self.rd, funct3::JALR, self.rs1, self.imm)
    }
}
