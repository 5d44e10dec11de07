//! Simulation driver.
//!
//! Ties the CPU to its memory and provides program loading and bounded execution.

/// CPU plus memory, with load, step, run and reset.
pub mod machine;

pub use machine::Machine;
