//! CPU Core Definition.
//!
//! This module defines the `Cpu` structure, the execution engine's only state.
//! It holds:
//! 1. **Registers:** The 32-entry general-purpose register file.
//! 2. **Program Counter:** Byte offset of the next instruction in memory.
//! 3. **Statistics:** Counters of retired instructions.
//!
//! The single state transition, [`Cpu::step`], lives in the `execution` module.

/// Fetch, decode, execute and writeback of a single instruction.
pub mod execution;

use crate::core::arch::Gpr;
use crate::stats::ExecStats;

/// Execution engine state.
///
/// Zero-initialised on construction and mutated only by [`Cpu::step`] (and by
/// explicit register/PC setup from the owner before execution starts).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: Gpr,
    /// Program Counter.
    pub pc: u32,
    /// Retired instruction counters.
    pub stats: ExecStats,
}

impl Cpu {
    /// Creates a CPU with all registers, the PC and the statistics zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads register `idx`; `x0` always reads 0.
    pub const fn register(&self, idx: usize) -> u32 {
        self.regs.read(idx)
    }

    /// Writes register `idx`. Writing `x0` is a no-op.
    pub const fn set_register(&mut self, idx: usize, val: u32) {
        self.regs.write(idx, val);
    }
}
