//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode table, the instruction codec, decoding into typed
//! operations and a disassembler for the supported RV32I subset:
//! `add`, `sub`, `slt`, `addi`, `slli`, `lw`, `sw`, `beq`, `bne`, `blt`, `jal`, `jalr`.

/// Application Binary Interface (ABI) register names.
pub mod abi;

/// Decoding of instruction words into typed operations.
pub mod decode;

/// Instruction disassembler for the REPL and diagnostics.
pub mod disasm;

/// Instruction word codec: field accessors and immediate packing.
pub mod instruction;

/// Opcode tags, encoding formats and the validity predicate.
pub mod opcode;

/// Raw field constants of the base integer instruction set.
pub mod rv32i;

pub use decode::{Op, OpClass, decode};
pub use instruction::Instruction;
pub use opcode::{Format, Opcode};
