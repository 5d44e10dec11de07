//! Instruction Codec.
//!
//! An [`Instruction`] is an immutable view over a 32-bit word. Accessors are pure
//! functions of the word; the `with_*` mutators return a new word with exactly
//! one bit range replaced. Immediates of every format are packed and unpacked
//! here, including the scrambled B-type and J-type layouts.

use std::fmt;

use crate::common::constants::{
    FUNCT3_MASK, FUNCT3_SHIFT, FUNCT7_MASK, FUNCT7_SHIFT, OPCODE_MASK, RD_SHIFT, REG_MASK,
    RS1_SHIFT, RS2_SHIFT,
};
use crate::isa::opcode::{Format, Opcode};

/// Bit shift of the I-Type immediate field (bits 20-31).
const I_IMM_SHIFT: u32 = 20;

/// Mask of the 12-bit I-Type / S-Type immediate.
const IMM12_MASK: u32 = 0xFFF;

/// Width of the I-Type and S-Type immediates.
const IMM12_BITS: u32 = 12;

/// Bit shift of the S-Type immediate low field `imm[4:0]` (bits 7-11).
const S_IMM_LOW_SHIFT: u32 = 7;

/// Bit mask of the S-Type immediate low field (5 bits).
const S_IMM_LOW_MASK: u32 = 0x1F;

/// Bit shift of the S-Type immediate high field `imm[11:5]` (bits 25-31).
const S_IMM_HIGH_SHIFT: u32 = 25;

/// Bit mask of the S-Type immediate high field (7 bits).
const S_IMM_HIGH_MASK: u32 = 0x7F;

/// Position of the high field inside the reconstructed S-Type immediate.
const S_IMM_HIGH_POS: u32 = 5;

/// Instruction bit holding B-Type `imm[11]`.
const B_IMM_11_SHIFT: u32 = 7;
/// Instruction bits holding B-Type `imm[4:1]`.
const B_IMM_4_1_SHIFT: u32 = 8;
/// Mask of B-Type `imm[4:1]`.
const B_IMM_4_1_MASK: u32 = 0xF;
/// Instruction bits holding B-Type `imm[10:5]`.
const B_IMM_10_5_SHIFT: u32 = 25;
/// Mask of B-Type `imm[10:5]`.
const B_IMM_10_5_MASK: u32 = 0x3F;
/// Instruction bit holding B-Type `imm[12]`.
const B_IMM_12_SHIFT: u32 = 31;
/// Width of the B-Type immediate (13 bits, bit 0 always zero).
const B_IMM_BITS: u32 = 13;

/// Instruction bits holding J-Type `imm[19:12]`.
const J_IMM_19_12_SHIFT: u32 = 12;
/// Mask of J-Type `imm[19:12]`.
const J_IMM_19_12_MASK: u32 = 0xFF;
/// Instruction bit holding J-Type `imm[11]`.
const J_IMM_11_SHIFT: u32 = 20;
/// Instruction bits holding J-Type `imm[10:1]`.
const J_IMM_10_1_SHIFT: u32 = 21;
/// Mask of J-Type `imm[10:1]`.
const J_IMM_10_1_MASK: u32 = 0x3FF;
/// Instruction bit holding J-Type `imm[20]`.
const J_IMM_20_SHIFT: u32 = 31;
/// Width of the J-Type immediate (21 bits, bit 0 always zero).
const J_IMM_BITS: u32 = 21;

/// A raw 32-bit instruction word with typed field accessors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Instruction(u32);

impl Instruction {
    /// Wraps a raw word.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw word.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Extracts the opcode (bits 0-6) and maps it through the opcode table.
    ///
    /// Returns [`Opcode::Invalid`] for any unsupported 7-bit value.
    pub const fn opcode(self) -> Opcode {
        Opcode::from_bits(self.opcode_bits())
    }

    /// Raw 7-bit opcode field, without validation.
    pub const fn opcode_bits(self) -> u32 {
        self.0 & OPCODE_MASK
    }

    /// Encoding format implied by the opcode, or `None` for an invalid opcode.
    pub const fn format(self) -> Option<Format> {
        self.opcode().format()
    }

    /// Destination register field (bits 7-11).
    pub const fn rd(self) -> usize {
        ((self.0 >> RD_SHIFT) & REG_MASK) as usize
    }

    /// First source register field (bits 15-19).
    pub const fn rs1(self) -> usize {
        ((self.0 >> RS1_SHIFT) & REG_MASK) as usize
    }

    /// Second source register field (bits 20-24).
    pub const fn rs2(self) -> usize {
        ((self.0 >> RS2_SHIFT) & REG_MASK) as usize
    }

    /// funct3 field (bits 12-14).
    pub const fn funct3(self) -> u32 {
        (self.0 >> FUNCT3_SHIFT) & FUNCT3_MASK
    }

    /// funct7 field (bits 25-31).
    pub const fn funct7(self) -> u32 {
        (self.0 >> FUNCT7_SHIFT) & FUNCT7_MASK
    }

    /// Sign-extended I-Type immediate, `imm[11:0]` at bits 20-31.
    pub const fn imm_i(self) -> i32 {
        sign_extend(self.0 >> I_IMM_SHIFT, IMM12_BITS)
    }

    /// Sign-extended S-Type immediate, `imm[4:0]` at bits 7-11 and `imm[11:5]` at bits 25-31.
    pub const fn imm_s(self) -> i32 {
        let low = (self.0 >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
        let high = (self.0 >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
        sign_extend((high << S_IMM_HIGH_POS) | low, IMM12_BITS)
    }

    /// Sign-extended B-Type immediate. Always even.
    pub const fn imm_b(self) -> i32 {
        let bit_11 = (self.0 >> B_IMM_11_SHIFT) & 1;
        let bits_4_1 = (self.0 >> B_IMM_4_1_SHIFT) & B_IMM_4_1_MASK;
        let bits_10_5 = (self.0 >> B_IMM_10_5_SHIFT) & B_IMM_10_5_MASK;
        let bit_12 = (self.0 >> B_IMM_12_SHIFT) & 1;

        let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
        sign_extend(combined, B_IMM_BITS)
    }

    /// Sign-extended J-Type immediate. Always even.
    pub const fn imm_j(self) -> i32 {
        let bits_19_12 = (self.0 >> J_IMM_19_12_SHIFT) & J_IMM_19_12_MASK;
        let bit_11 = (self.0 >> J_IMM_11_SHIFT) & 1;
        let bits_10_1 = (self.0 >> J_IMM_10_1_SHIFT) & J_IMM_10_1_MASK;
        let bit_20 = (self.0 >> J_IMM_20_SHIFT) & 1;

        let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
        sign_extend(combined, J_IMM_BITS)
    }

    /// Replaces the opcode field.
    #[must_use]
    pub const fn with_opcode(self, opcode: Opcode) -> Self {
        Self(replace_field(self.0, OPCODE_MASK, 0, opcode.bits()))
    }

    /// Replaces the rd field. Only the low 5 bits of `rd` are used.
    #[must_use]
    pub const fn with_rd(self, rd: usize) -> Self {
        Self(replace_field(self.0, REG_MASK, RD_SHIFT, rd as u32))
    }

    /// Replaces the rs1 field. Only the low 5 bits of `rs1` are used.
    #[must_use]
    pub const fn with_rs1(self, rs1: usize) -> Self {
        Self(replace_field(self.0, REG_MASK, RS1_SHIFT, rs1 as u32))
    }

    /// Replaces the rs2 field. Only the low 5 bits of `rs2` are used.
    #[must_use]
    pub const fn with_rs2(self, rs2: usize) -> Self {
        Self(replace_field(self.0, REG_MASK, RS2_SHIFT, rs2 as u32))
    }

    /// Replaces the funct3 field.
    #[must_use]
    pub const fn with_funct3(self, funct3: u32) -> Self {
        Self(replace_field(self.0, FUNCT3_MASK, FUNCT3_SHIFT, funct3))
    }

    /// Replaces the funct7 field.
    #[must_use]
    pub const fn with_funct7(self, funct7: u32) -> Self {
        Self(replace_field(self.0, FUNCT7_MASK, FUNCT7_SHIFT, funct7))
    }

    /// Packs a 12-bit I-Type immediate into bits 20-31.
    #[must_use]
    pub const fn with_imm_i(self, imm: i32) -> Self {
        Self(replace_field(self.0, IMM12_MASK, I_IMM_SHIFT, imm as u32))
    }

    /// Packs a 12-bit S-Type immediate into bits 7-11 and 25-31.
    #[must_use]
    pub const fn with_imm_s(self, imm: i32) -> Self {
        let v = imm as u32;
        let word = replace_field(self.0, S_IMM_LOW_MASK, S_IMM_LOW_SHIFT, v);
        Self(replace_field(
            word,
            S_IMM_HIGH_MASK,
            S_IMM_HIGH_SHIFT,
            v >> S_IMM_HIGH_POS,
        ))
    }

    /// Packs a B-Type branch offset. Bit 0 of `imm` is not representable and is dropped.
    #[must_use]
    pub const fn with_imm_b(self, imm: i32) -> Self {
        let v = imm as u32;
        let mut word = replace_field(self.0, 1, B_IMM_12_SHIFT, v >> 12);
        word = replace_field(word, 1, B_IMM_11_SHIFT, v >> 11);
        word = replace_field(word, B_IMM_10_5_MASK, B_IMM_10_5_SHIFT, v >> 5);
        Self(replace_field(word, B_IMM_4_1_MASK, B_IMM_4_1_SHIFT, v >> 1))
    }

    /// Packs a J-Type jump offset. Bit 0 of `imm` is not representable and is dropped.
    #[must_use]
    pub const fn with_imm_j(self, imm: i32) -> Self {
        let v = imm as u32;
        let mut word = replace_field(self.0, 1, J_IMM_20_SHIFT, v >> 20);
        word = replace_field(word, J_IMM_19_12_MASK, J_IMM_19_12_SHIFT, v >> 12);
        word = replace_field(word, 1, J_IMM_11_SHIFT, v >> 11);
        Self(replace_field(
            word,
            J_IMM_10_1_MASK,
            J_IMM_10_1_SHIFT,
            v >> 1,
        ))
    }
}

impl From<u32> for Instruction {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<Instruction> for u32 {
    fn from(inst: Instruction) -> Self {
        inst.0
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::LowerHex for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Clears the `mask << shift` bit range of `word` and ORs in `(value & mask) << shift`.
const fn replace_field(word: u32, mask: u32, shift: u32, value: u32) -> u32 {
    (word & !(mask << shift)) | ((value & mask) << shift)
}

/// Sign extends the low `bits` bits of `value` to a 32-bit signed integer.
///
/// Works by masking: if bit `bits - 1` is set, every bit above it is set.
/// `bits` must be in `1..32`.
pub const fn sign_extend(value: u32, bits: u32) -> i32 {
    let mask = (1u32 << bits) - 1;
    let value = value & mask;
    if value & (1 << (bits - 1)) != 0 {
        (value | !mask) as i32
    } else {
        value as i32
    }
}
