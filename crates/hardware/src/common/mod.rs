//! Common types and constants shared by the codec, the CPU and the assembler.
//!
//! This module provides:
//! 1. **Constants:** Instruction size, field masks and shifts, immediate ranges.
//! 2. **Error Handling:** Memory, decode, execution and umbrella simulator errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types returned by the core.
pub mod error;

pub use constants::INSTRUCTION_SIZE;
pub use error::{DecodeError, ExecError, MemoryError, SimError};
