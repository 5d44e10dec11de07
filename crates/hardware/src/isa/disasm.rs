//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction encoding into the text the assembler accepts,
//! for the REPL, debug tracing and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use rv32sim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x00A00513), "addi x10, x0, 10");
//! ```

use crate::isa::decode::decode;
use crate::isa::instruction::Instruction;

/// Text returned for words that do not decode.
pub const UNKNOWN: &str = "unknown";

/// Disassembles a 32-bit instruction into a human-readable string.
///
/// Returns a mnemonic like `"add x1, x2, x3"` or [`UNKNOWN`] for
/// unrecognised encodings.
pub fn disassemble(word: u32) -> String {
    decode(Instruction::new(word)).map_or_else(|_| UNKNOWN.to_string(), |op| op.to_string())
}
