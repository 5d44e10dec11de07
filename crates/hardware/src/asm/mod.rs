//! Two-Pass Assembler.
//!
//! This module assembles source text into instruction words. It performs the following:
//! 1. **Pass 1:** Strips comments, records labels and collects instruction lines ([`preparser`]).
//! 2. **Pseudo Expansion:** Rewrites `j`, `nop`, `mv` and `ret` ([`pseudo`]).
//! 3. **Label Substitution:** Replaces branch and jump targets with PC-relative offsets ([`labels`]).
//! 4. **Encoding:** Parses each line against the instruction table ([`parser`]).
//!
//! Assembly is all-or-nothing: the first failing line aborts the unit and no
//! partial program is returned.

/// Assembler error types.
pub mod error;

/// Label substitution.
pub mod labels;

/// Mnemonic table and single-line parsing.
pub mod parser;

/// Pass 1: comments, labels and instruction lines.
pub mod preparser;

/// Pseudo-instruction expansion.
pub mod pseudo;

use std::fs;
use std::path::Path;

use tracing::debug;

pub use error::{AsmError, AsmErrorKind};
pub use parser::parse_instruction;
pub use preparser::{LabelMap, SourceLine};

use crate::isa::instruction::Instruction;

/// Assembles one already-preparsed instruction line at program index `idx`.
///
/// # Errors
///
/// Returns the line-level cause; the caller attaches the location.
pub fn assemble_line(
    text: &str,
    idx: usize,
    label_map: &LabelMap,
) -> Result<Instruction, AsmErrorKind> {
    let expanded = pseudo::expand(text);
    let resolved = labels::substitute(&expanded, idx, label_map)?;
    parse_instruction(&resolved)
}

/// Assembles an in-memory source unit.
///
/// # Arguments
///
/// * `name` - Name reported in errors (usually the file path).
/// * `source` - Assembly text.
///
/// # Errors
///
/// [`AsmError::Syntax`] naming the first line that failed.
pub fn assemble_source(name: &str, source: &str) -> Result<Vec<Instruction>, AsmError> {
    let (label_map, lines) = preparser::preparse(source.lines());
    debug!(
        unit = name,
        labels = label_map.len(),
        instructions = lines.len(),
        "assembling"
    );

    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            assemble_line(&line.text, idx, &label_map).map_err(|kind| AsmError::Syntax {
                file: name.to_owned(),
                line: line.line_no,
                kind,
            })
        })
        .collect()
}

/// Reads and assembles the file at `path`.
///
/// # Errors
///
/// * [`AsmError::Io`] if the file cannot be read.
/// * [`AsmError::Syntax`] if any line fails to assemble.
pub fn assemble_file<P: AsRef<Path>>(path: P) -> Result<Vec<Instruction>, AsmError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| AsmError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    assemble_source(&path.display().to_string(), &source)
}
