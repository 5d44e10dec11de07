//! Architectural state visible to programs.

/// General-purpose register file.
pub mod gpr;

pub use gpr::Gpr;
