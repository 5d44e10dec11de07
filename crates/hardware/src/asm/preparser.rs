//! Assembler Pass 1.
//!
//! This module normalizes raw source lines before encoding. It performs the following:
//! 1. **Comment Stripping:** Everything after `#` or `;` is dropped.
//! 2. **Label Collection:** Leading `name:` prefixes are removed and recorded at the byte
//!    address of the next instruction. Several labels may share a line.
//! 3. **Line Collection:** Surviving instruction text is kept with its physical line number.
//!
//! Blank and label-only lines produce no instruction and do not advance the address.

use std::collections::HashMap;

use crate::common::constants::INSTRUCTION_SIZE;

/// Label name to byte address (instruction index times 4).
pub type LabelMap = HashMap<String, u32>;

/// An instruction line that survived pass 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based physical line number in the source unit.
    pub line_no: usize,
    /// Instruction text with comments and labels removed, trimmed.
    pub text: String,
}

/// Removes a trailing `#` or `;` comment and surrounding whitespace.
pub fn strip_comment(line: &str) -> &str {
    let code = line.find(['#', ';']).map_or(line, |idx| &line[..idx]);
    code.trim()
}

/// Splits a comment-free line into its leading labels and the remaining instruction text.
///
/// `"foo: bar: addi x1, x0, 1"` yields `(["foo", "bar"], "addi x1, x0, 1")`.
/// Empty label names (a bare `:`) are skipped.
pub fn split_labels(line: &str) -> (Vec<&str>, &str) {
    let mut labels = Vec::new();
    let mut rest = line.trim();
    while let Some((label, tail)) = rest.split_once(':') {
        let label = label.trim();
        if !label.is_empty() {
            labels.push(label);
        }
        rest = tail.trim();
    }
    (labels, rest)
}

/// Runs pass 1 over `lines`.
///
/// # Returns
///
/// The label map and the ordered list of instruction lines. A label defined
/// twice keeps its last address.
pub fn preparse<'a, I>(lines: I) -> (LabelMap, Vec<SourceLine>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut labels = LabelMap::new();
    let mut out = Vec::new();
    let mut addr: u32 = 0;

    for (idx, raw) in lines.into_iter().enumerate() {
        let (names, text) = split_labels(strip_comment(raw));
        for name in names {
            let _ = labels.insert(name.to_owned(), addr);
        }
        if text.is_empty() {
            continue;
        }
        out.push(SourceLine {
            line_no: idx + 1,
            text: text.to_owned(),
        });
        addr = addr.wrapping_add(INSTRUCTION_SIZE);
    }

    (labels, out)
}
