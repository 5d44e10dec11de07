//! Word memory trait.
//!
//! This module defines the interface the CPU uses to reach memory. It provides:
//! 1. **Access:** Bounds-checked, little-endian 32-bit reads and writes.
//! 2. **Failure Semantics:** Out-of-bounds accesses return an error and never touch the buffer.
//!
//! The CPU is generic over this trait so tests can substitute mock memories.

use crate::common::error::MemoryError;

/// Word-addressable memory as seen by the execution engine.
pub trait WordMemory {
    /// Reads the little-endian word stored at `addr..addr + 4`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if `addr + 4` exceeds the memory size.
    fn read_word(&self, addr: u32) -> Result<u32, MemoryError>;

    /// Writes `val` little-endian at `addr..addr + 4`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if `addr + 4` exceeds the memory size;
    /// no byte is written in that case.
    fn write_word(&mut self, addr: u32, val: u32) -> Result<(), MemoryError>;
}
