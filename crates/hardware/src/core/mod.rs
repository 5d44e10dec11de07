//! CPU core: architectural state and the execution engine.

/// Architectural state (general-purpose registers).
pub mod arch;

/// CPU state and single-step execution.
pub mod cpu;

pub use cpu::Cpu;
