//! Main Memory.
//!
//! This module implements the machine's memory store. It provides:
//! 1. **Buffer:** A fixed-size, zero-initialised byte buffer.
//! 2. **Word Access:** Bounds-checked little-endian word reads and writes.
//! 3. **Bulk Access:** Byte slice loading and reading for program images and dumps.

use crate::common::error::MemoryError;
use crate::soc::traits::WordMemory;

/// Width of a memory word in bytes.
const WORD_BYTES: usize = 4;

/// Fixed-size byte-addressable memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Creates a zeroed memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Size of the buffer in bytes.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer has no bytes.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only view of the whole buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copies `bytes` into memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if any byte would fall outside the
    /// buffer; nothing is written in that case.
    pub fn load_bytes(&mut self, addr: u32, bytes: &[u8]) -> Result<(), MemoryError> {
        let range = self.range(addr, bytes.len())?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Returns the `len` bytes starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if the span leaves the buffer.
    pub fn read_bytes(&self, addr: u32, len: usize) -> Result<&[u8], MemoryError> {
        let range = self.range(addr, len)?;
        Ok(&self.data[range])
    }

    /// Validates `addr..addr + len` against the buffer size.
    const fn range(&self, addr: u32, len: usize) -> Result<std::ops::Range<usize>, MemoryError> {
        let start = addr as usize;
        match start.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(start..end),
            _ => Err(MemoryError::OutOfBounds {
                addr,
                size: self.data.len(),
            }),
        }
    }
}

impl WordMemory for Memory {
    fn read_word(&self, addr: u32) -> Result<u32, MemoryError> {
        let range = self.range(addr, WORD_BYTES)?;
        let mut bytes = [0u8; WORD_BYTES];
        bytes.copy_from_slice(&self.data[range]);
        Ok(u32::from_le_bytes(bytes))
    }

    fn write_word(&mut self, addr: u32, val: u32) -> Result<(), MemoryError> {
        let range = self.range(addr, WORD_BYTES)?;
        self.data[range].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }
}
