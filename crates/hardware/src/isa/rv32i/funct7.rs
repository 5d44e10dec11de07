//! RISC-V Base Integer (I) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) is used in R-type instructions to
//! distinguish between operations that share the same `funct3` (e.g., ADD vs SUB).

/// Default operation (ADD, SLT).
pub const DEFAULT: u32 = 0b0000000;

/// Alias for the default encoding when it selects ADD.
pub const ADD: u32 = DEFAULT;

/// Alternate operation (SUB).
pub const SUB: u32 = 0b0100000;
