//! Label substitution (pass 2).
//!
//! Branches (`beq`, `bne`, `blt`) with three operands and `jal` with two may
//! name a label as their final operand. It is replaced by the decimal byte
//! offset from the current instruction to the label. Numeric operands pass
//! through unchanged.

use std::borrow::Cow;

use super::error::AsmErrorKind;
use super::parser::{split_mnemonic, split_operands};
use super::preparser::LabelMap;
use crate::common::constants::INSTRUCTION_SIZE;

/// Index of the operand that may hold a label, for mnemonics that accept one.
fn label_operand(mnemonic: &str, arity: usize) -> Option<usize> {
    match (mnemonic, arity) {
        ("beq" | "bne" | "blt", 3) => Some(2),
        ("jal", 2) => Some(1),
        _ => None,
    }
}

/// A label is any non-empty operand that does not look like a number.
fn is_label(operand: &str) -> bool {
    !operand.is_empty() && !operand.starts_with('-') && operand.parse::<i64>().is_err()
}

/// Replaces a label operand of the instruction at index `idx` with its PC-relative offset.
///
/// # Arguments
///
/// * `line` - Instruction text after pseudo expansion.
/// * `idx` - Position of the instruction in the program (not a byte address).
/// * `labels` - Label map from pass 1.
///
/// # Errors
///
/// [`AsmErrorKind::UnknownLabel`] if the operand names a label missing from `labels`.
pub fn substitute<'a>(
    line: &'a str,
    idx: usize,
    labels: &LabelMap,
) -> Result<Cow<'a, str>, AsmErrorKind> {
    let (mnemonic, rest) = split_mnemonic(line);
    let mut ops = split_operands(rest);

    let Some(pos) = label_operand(mnemonic, ops.len()) else {
        return Ok(Cow::Borrowed(line));
    };
    if !is_label(&ops[pos]) {
        return Ok(Cow::Borrowed(line));
    }

    let target = *labels
        .get(ops[pos].as_str())
        .ok_or_else(|| AsmErrorKind::UnknownLabel(ops[pos].clone()))?;
    let here = (idx as i64) * i64::from(INSTRUCTION_SIZE);
    ops[pos] = (i64::from(target) - here).to_string();

    Ok(Cow::Owned(format!("{mnemonic} {}", ops.join(", "))))
}
