//! General-Purpose Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 registers (`x0`-`x31`) of 32 bits each.
//! 2. **Invariant Enforcement:** Register `x0` always reads as zero; writes to it are dropped.

use crate::common::constants::NUM_REGISTERS;

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers used for integer operations. Register `x0`
/// is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_REGISTERS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index. Only the low 5 bits are used.
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the register. Register `x0` always returns 0.
    pub const fn read(&self, idx: usize) -> u32 {
        let idx = idx % NUM_REGISTERS;
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// Writes to `x0` are accepted and discarded.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index. Only the low 5 bits are used.
    /// * `val` - The 32-bit value to write.
    pub const fn write(&mut self, idx: usize, val: u32) {
        let idx = idx % NUM_REGISTERS;
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a snapshot of all 32 registers, `x0` included (always 0).
    pub const fn snapshot(&self) -> [u32; NUM_REGISTERS] {
        let mut out = self.regs;
        out[0] = 0;
        out
    }
}
