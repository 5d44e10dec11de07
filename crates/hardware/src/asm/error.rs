//! Assembler error types.
//!
//! [`AsmErrorKind`] describes what is wrong with a single instruction line;
//! [`AsmError`] attaches the file name and source line, or wraps an I/O failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reason a single source line failed to assemble.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmErrorKind {
    /// The mnemonic is not in the instruction table.
    #[error("unsupported instruction: {0:?}")]
    UnsupportedInstruction(String),

    /// The operands do not match the mnemonic's operand shape.
    #[error("invalid operands for {mnemonic}: {operands:?}")]
    InvalidOperands {
        /// Mnemonic being parsed.
        mnemonic: String,
        /// Operand text with whitespace removed.
        operands: String,
    },

    /// An immediate does not fit the instruction format's signed range.
    #[error("immediate out of range for {mnemonic}: {value}")]
    ImmediateOutOfRange {
        /// Mnemonic being parsed.
        mnemonic: String,
        /// Immediate as written in the source.
        value: String,
    },

    /// A shift amount is outside 0-31.
    #[error("shift amount out of range for {mnemonic}: {value}")]
    ShiftAmountOutOfRange {
        /// Mnemonic being parsed.
        mnemonic: String,
        /// Shift amount as written in the source.
        value: String,
    },

    /// A branch or jump names a label that is never defined.
    #[error("unknown label: {0:?}")]
    UnknownLabel(String),

    /// The line has no mnemonic.
    #[error("empty instruction")]
    EmptyInstruction,
}

/// Failure to assemble a source unit. No partial program is ever returned.
#[derive(Debug, Error)]
pub enum AsmError {
    /// The source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line could not be assembled.
    #[error("{file}:{line}: {kind}")]
    Syntax {
        /// Name of the source unit (file path or caller-supplied name).
        file: String,
        /// 1-based physical line number.
        line: usize,
        /// What went wrong.
        #[source]
        kind: AsmErrorKind,
    },
}

impl AsmError {
    /// Returns the line-level cause, if this is a syntax error.
    pub const fn kind(&self) -> Option<&AsmErrorKind> {
        match self {
            Self::Syntax { kind, .. } => Some(kind),
            Self::Io { .. } => None,
        }
    }

    /// Returns the 1-based source line, if this is a syntax error.
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => Some(*line),
            Self::Io { .. } => None,
        }
    }
}
