//! Memory subsystem.
//!
//! The CPU reaches memory only through the [`WordMemory`] trait; [`Memory`]
//! is the byte buffer a `Machine` owns.

/// Fixed-size little-endian memory store.
pub mod memory;

/// Memory access trait used by the execution engine.
pub mod traits;

pub use memory::Memory;
pub use traits::WordMemory;
