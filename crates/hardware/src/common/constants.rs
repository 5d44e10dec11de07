//! Global Simulator Constants.
//!
//! This module defines constants shared by the codec, the CPU and the assembler. It includes:
//! 1. **Instruction Constants:** Instruction size plus field masks and shifts.
//! 2. **Immediate Ranges:** Signed ranges accepted by each instruction format.
//! 3. **Machine Defaults:** Memory size and load address used when nothing is configured.

/// Size of an instruction in bytes. Every instruction in the supported subset is 32 bits wide.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 32;

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;

/// Bit mask for a 5-bit register index field.
pub const REG_MASK: u32 = 0x1F;

/// Bit position shift for the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;

/// Bit mask for extracting the funct3 field.
pub const FUNCT3_MASK: u32 = 0x7;

/// Bit position shift for the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;

/// Bit position shift for the first source register (rs1) field.
pub const RS1_SHIFT: u32 = 15;

/// Bit position shift for the second source register (rs2) field.
pub const RS2_SHIFT: u32 = 20;

/// Bit mask for extracting the funct7 field.
pub const FUNCT7_MASK: u32 = 0x7F;

/// Bit position shift for the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;

/// Mask applied to an I-type immediate to obtain a shift amount (5 bits on RV32).
pub const SHAMT_MASK: u32 = 0x1F;

/// Smallest I-type (and S-type) immediate.
pub const I_IMM_MIN: i64 = -2048;
/// Largest I-type (and S-type) immediate.
pub const I_IMM_MAX: i64 = 2047;

/// Smallest B-type branch offset.
pub const B_IMM_MIN: i64 = -4096;
/// Largest B-type branch offset.
pub const B_IMM_MAX: i64 = 4095;

/// Smallest J-type jump offset.
pub const J_IMM_MIN: i64 = -(1 << 20);
/// Largest J-type jump offset.
pub const J_IMM_MAX: i64 = (1 << 20) - 1;

/// Largest shift amount accepted by `slli`.
pub const SHAMT_MAX: i64 = 31;

/// Default machine memory size in bytes (64 KiB).
pub const DEFAULT_MEMORY_SIZE: usize = 64 * 1024;

/// Default address programs are loaded at.
pub const DEFAULT_LOAD_ADDRESS: u32 = 0;
