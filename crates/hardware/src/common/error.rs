//! Simulator Error Definitions.
//!
//! This module defines the error values returned by the core. It provides:
//! 1. **Memory Errors:** Out-of-bounds word reads and writes.
//! 2. **Decode Errors:** Invalid opcodes and unimplemented funct3/funct7 combinations.
//! 3. **Execution Errors:** The union of the two above, returned by `Cpu::step`.
//! 4. **Simulator Errors:** An umbrella type for front ends that also assemble and configure.
//!
//! Every error is returned as a value and is never swallowed by the core.

use thiserror::Error;

use crate::asm::AsmError;
use crate::config::ConfigError;

/// Errors raised by the word-addressable memory store.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The four bytes starting at `addr` do not lie inside the buffer.
    ///
    /// The buffer is left untouched when this is returned.
    #[error("address {addr} out of bounds (memory size {size})")]
    OutOfBounds {
        /// Faulting byte address.
        addr: u32,
        /// Size of the memory buffer in bytes.
        size: usize,
    },
}

/// Errors raised while decoding a 32-bit word into an operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The low 7 bits of the word are not one of the supported opcodes.
    #[error("invalid opcode {opcode:#04x} (from instruction {word:#010x})")]
    InvalidOpcode {
        /// Raw opcode bits.
        opcode: u32,
        /// The full instruction word.
        word: u32,
    },

    /// The opcode is valid but the funct3/funct7 combination is not implemented.
    #[error(
        "unimplemented instruction {word:#010x} (opcode {opcode}, funct3 {funct3:#x}, funct7 {funct7:#x})"
    )]
    Unimplemented {
        /// The full instruction word.
        word: u32,
        /// Display name of the opcode.
        opcode: &'static str,
        /// Raw funct3 field.
        funct3: u32,
        /// Raw funct7 field.
        funct7: u32,
    },
}

/// Errors that abort a single `Cpu::step`.
///
/// A failed step leaves the registers and the program counter exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExecError {
    /// Fetch, load or store touched memory outside the buffer.
    #[error(transparent)]
    Memory(#[from] MemoryError),
    /// The fetched word could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Umbrella error for front ends driving a `Machine`.
#[derive(Debug, Error)]
pub enum SimError {
    /// Execution failed.
    #[error(transparent)]
    Exec(#[from] ExecError),
    /// Direct memory access (program load, memory dump) failed.
    #[error(transparent)]
    Memory(#[from] MemoryError),
    /// Assembly failed.
    #[error(transparent)]
    Asm(#[from] AsmError),
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
