//! RV32I subset simulator library.
//!
//! This crate implements a small RISC-V machine and its toolchain with the following:
//! 1. **ISA:** Instruction codec, opcode table, typed decoding and a disassembler.
//! 2. **Core:** A register file with the `x0` invariant and a single-step execution engine.
//! 3. **Memory:** A fixed-size little-endian word store behind the [`soc::WordMemory`] trait.
//! 4. **Assembler:** A two-pass assembler with labels and pseudo-instructions.
//! 5. **Simulation:** The [`Machine`] driver, JSON configuration and execution statistics.
//!
//! ```
//! use rv32sim_core::{Machine, asm::assemble_source};
//!
//! let program = assemble_source("demo", "addi x1, x0, 5\naddi x2, x1, 10").unwrap();
//! let mut machine = Machine::new(1024);
//! machine.load_program(&program, 0).unwrap();
//! assert_eq!(machine.run(2).unwrap(), 2);
//! assert_eq!(machine.cpu.register(2), 15);
//! ```

/// Two-pass assembler (labels, pseudo-instructions, mnemonic table).
pub mod asm;
/// Common types and constants (errors, field layout, immediate ranges).
pub mod common;
/// Simulator configuration (defaults and JSON loading).
pub mod config;
/// CPU core (register file, execution engine).
pub mod core;
/// Instruction set (opcodes, codec, decode, disassembly, ABI names).
pub mod isa;
/// Machine driver (program loading, run loop, reset).
pub mod sim;
/// Memory store and the memory collaborator trait.
pub mod soc;
/// Execution statistics.
pub mod stats;

/// Assembles a source file into instruction words.
pub use crate::asm::assemble_file;
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Execution engine state; advanced by `Cpu::step`.
pub use crate::core::Cpu;
/// Instruction word codec.
pub use crate::isa::Instruction;
/// CPU plus memory; construct with `Machine::new` or `Machine::from_config`.
pub use crate::sim::Machine;
/// Main memory store.
pub use crate::soc::Memory;
