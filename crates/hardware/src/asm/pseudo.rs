//! Pseudo-instruction expansion.
//!
//! Textual rewrites applied before label substitution and parsing:
//!
//! | Pseudo         | Expansion           |
//! |----------------|---------------------|
//! | `j target`     | `jal x0, target`    |
//! | `nop`          | `addi x0, x0, 0`    |
//! | `mv rd, rs`    | `addi rd, rs, 0`    |
//! | `ret`          | `jalr x0, 0(x1)`    |
//!
//! A pseudo mnemonic with the wrong operand count is returned unchanged and
//! rejected later by the parser.

use std::borrow::Cow;

use super::parser::{split_mnemonic, split_operands};

/// Expands `line` if it is a recognised pseudo-instruction.
pub fn expand(line: &str) -> Cow<'_, str> {
    let (mnemonic, rest) = split_mnemonic(line);
    let ops = split_operands(rest);

    match (mnemonic, ops.as_slice()) {
        ("j", [target]) => Cow::Owned(format!("jal x0, {target}")),
        ("nop", []) => Cow::Borrowed("addi x0, x0, 0"),
        ("mv", [rd, rs]) => Cow::Owned(format!("addi {rd}, {rs}, 0")),
        ("ret", []) => Cow::Borrowed("jalr x0, 0(x1)"),
        _ => Cow::Borrowed(line),
    }
}
