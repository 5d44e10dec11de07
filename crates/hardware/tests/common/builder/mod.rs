//! # Builders
//!
//! Fluent constructors for test inputs.

/// Instruction word builder with its own bit packing.
pub mod instruction;
