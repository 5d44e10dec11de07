//! Instruction Parser.
//!
//! This module turns one line of assembly into an [`Instruction`]. It performs the following:
//! 1. **Lookup:** The mnemonic selects an entry in a fixed instruction table.
//! 2. **Operand Matching:** The entry's [`Shape`] checks register and immediate positions.
//! 3. **Range Checking:** Immediates are checked against their format's signed range.
//! 4. **Encoding:** The entry's builder yields an [`Op`], which is encoded by the codec.
//!
//! Operand text has all whitespace removed before matching, so `x1, x2,x3` and
//! `x1,x2,x3` are equivalent. Registers are written `x0`-`x31`; immediates are
//! decimal with an optional leading `-`.

use crate::common::constants::{
    B_IMM_MAX, B_IMM_MIN, I_IMM_MAX, I_IMM_MIN, J_IMM_MAX, J_IMM_MIN, NUM_REGISTERS, SHAMT_MAX,
};
use crate::isa::decode::Op;
use crate::isa::instruction::Instruction;

use super::error::AsmErrorKind;
use super::preparser::strip_comment;

/// Immediate field an operand is encoded into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmField {
    /// 12-bit I/S-type immediate.
    I,
    /// 13-bit branch offset.
    B,
    /// 21-bit jump offset.
    J,
}

impl ImmField {
    /// Inclusive signed range accepted for this field.
    pub const fn bounds(self) -> (i64, i64) {
        match self {
            Self::I => (I_IMM_MIN, I_IMM_MAX),
            Self::B => (B_IMM_MIN, B_IMM_MAX),
            Self::J => (J_IMM_MIN, J_IMM_MAX),
        }
    }
}

/// Operand layout expected by a mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// `xA,xB,xC`
    Rrr,
    /// `xA,xB,imm`
    RrImm(ImmField),
    /// `xA,xB,shamt` with an unsigned shift amount.
    RrShamt,
    /// `xA,imm`
    RImm(ImmField),
    /// `xA,imm(xB)` with an I-type offset.
    RMem,
}

impl Shape {
    const fn bounds(self) -> (i64, i64) {
        match self {
            Self::RrImm(field) | Self::RImm(field) => field.bounds(),
            Self::RrShamt => (0, SHAMT_MAX),
            Self::RMem | Self::Rrr => ImmField::I.bounds(),
        }
    }
}

/// Operands after matching a [`Shape`], in source order.
///
/// For `RMem` the base register is `regs[1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    /// Register operands; unused slots are 0.
    pub regs: [usize; 3],
    /// Range-checked immediate, or 0 if the shape has none.
    pub imm: i32,
}

struct Entry {
    mnemonic: &'static str,
    shape: Shape,
    build: fn(&Operands) -> Op,
}

const TABLE: [Entry; 12] = [
    Entry {
        mnemonic: "add",
        shape: Shape::Rrr,
        build: |o| Op::Add {
            rd: o.regs[0],
            rs1: o.regs[1],
            rs2: o.regs[2],
        },
    },
    Entry {
        mnemonic: "sub",
        shape: Shape::Rrr,
        build: |o| Op::Sub {
            rd: o.regs[0],
            rs1: o.regs[1],
            rs2: o.regs[2],
        },
    },
    Entry {
        mnemonic: "slt",
        shape: Shape::Rrr,
        build: |o| Op::Slt {
            rd: o.regs[0],
            rs1: o.regs[1],
            rs2: o.regs[2],
        },
    },
    Entry {
        mnemonic: "addi",
        shape: Shape::RrImm(ImmField::I),
        build: |o| Op::Addi {
            rd: o.regs[0],
            rs1: o.regs[1],
            imm: o.imm,
        },
    },
    Entry {
        mnemonic: "slli",
        shape: Shape::RrShamt,
        build: |o| Op::Slli {
            rd: o.regs[0],
            rs1: o.regs[1],
            shamt: o.imm.unsigned_abs(),
        },
    },
    Entry {
        mnemonic: "beq",
        shape: Shape::RrImm(ImmField::B),
        build: |o| Op::Beq {
            rs1: o.regs[0],
            rs2: o.regs[1],
            imm: o.imm,
        },
    },
    Entry {
        mnemonic: "bne",
        shape: Shape::RrImm(ImmField::B),
        build: |o| Op::Bne {
            rs1: o.regs[0],
            rs2: o.regs[1],
            imm: o.imm,
        },
    },
    Entry {
        mnemonic: "blt",
        shape: Shape::RrImm(ImmField::B),
        build: |o| Op::Blt {
            rs1: o.regs[0],
            rs2: o.regs[1],
            imm: o.imm,
        },
    },
    Entry {
        mnemonic: "jal",
        shape: Shape::RImm(ImmField::J),
        build: |o| Op::Jal {
            rd: o.regs[0],
            imm: o.imm,
        },
    },
    Entry {
        mnemonic: "jalr",
        shape: Shape::RMem,
        build: |o| Op::Jalr {
            rd: o.regs[0],
            rs1: o.regs[1],
            imm: o.imm,
        },
    },
    Entry {
        mnemonic: "lw",
        shape: Shape::RMem,
        build: |o| Op::Lw {
            rd: o.regs[0],
            rs1: o.regs[1],
            imm: o.imm,
        },
    },
    Entry {
        mnemonic: "sw",
        shape: Shape::RMem,
        build: |o| Op::Sw {
            rs1: o.regs[1],
            rs2: o.regs[0],
            imm: o.imm,
        },
    },
];

fn lookup(mnemonic: &str) -> Option<&'static Entry> {
    TABLE.iter().find(|e| e.mnemonic == mnemonic)
}

/// Returns the operand shape of `mnemonic`, if it is supported.
pub fn shape_of(mnemonic: &str) -> Option<Shape> {
    lookup(mnemonic).map(|e| e.shape)
}

/// Splits a trimmed line at the first whitespace into mnemonic and operand text.
pub fn split_mnemonic(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((mnemonic, rest)) => (mnemonic, rest.trim()),
        None => (line, ""),
    }
}

/// Splits operand text on commas after removing all whitespace.
///
/// Empty text yields no operands; empty fields between commas are kept.
pub fn split_operands(rest: &str) -> Vec<String> {
    let compact = remove_whitespace(rest);
    if compact.is_empty() {
        return Vec::new();
    }
    compact.split(',').map(str::to_owned).collect()
}

fn remove_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parses a register name `x0`-`x31`.
pub fn parse_reg(text: &str) -> Option<usize> {
    let digits = text.strip_prefix('x')?;
    if !is_digits(digits) {
        return None;
    }
    digits.parse::<usize>().ok().filter(|&r| r < NUM_REGISTERS)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_literal(text: &str, signed: bool) -> bool {
    let digits = if signed {
        text.strip_prefix('-').unwrap_or(text)
    } else {
        text
    };
    is_digits(digits)
}

/// Separates register texts and the immediate text according to `shape`.
fn lex(shape: Shape, operands: &str) -> Option<(Vec<&str>, Option<&str>)> {
    let parts: Vec<&str> = if operands.is_empty() {
        Vec::new()
    } else {
        operands.split(',').collect()
    };

    match (shape, parts.as_slice()) {
        (Shape::Rrr, &[a, b, c]) => Some((vec![a, b, c], None)),
        (Shape::RrImm(_) | Shape::RrShamt, &[a, b, imm]) => Some((vec![a, b], Some(imm))),
        (Shape::RImm(_), &[a, imm]) => Some((vec![a], Some(imm))),
        (Shape::RMem, &[a, mem]) => {
            let (imm, base) = mem.strip_suffix(')')?.split_once('(')?;
            Some((vec![a, base], Some(imm)))
        }
        _ => None,
    }
}

/// Matches `operands` (whitespace already removed) against `shape`.
///
/// # Errors
///
/// * [`AsmErrorKind::InvalidOperands`] if the layout, a register or a literal's syntax is wrong.
/// * [`AsmErrorKind::ImmediateOutOfRange`] if an immediate does not fit its field.
/// * [`AsmErrorKind::ShiftAmountOutOfRange`] if a shift amount exceeds 31.
pub fn parse_operands(
    mnemonic: &str,
    shape: Shape,
    operands: &str,
) -> Result<Operands, AsmErrorKind> {
    let invalid = || AsmErrorKind::InvalidOperands {
        mnemonic: mnemonic.to_owned(),
        operands: operands.to_owned(),
    };

    let (regs, imm) = lex(shape, operands).ok_or_else(invalid)?;
    let mut out = Operands::default();
    for (slot, text) in out.regs.iter_mut().zip(&regs) {
        *slot = parse_reg(text).ok_or_else(invalid)?;
    }

    if let Some(text) = imm {
        let is_shift = matches!(shape, Shape::RrShamt);
        if !is_literal(text, !is_shift) {
            return Err(invalid());
        }
        let out_of_range = || {
            let (mnemonic, value) = (mnemonic.to_owned(), text.to_owned());
            if is_shift {
                AsmErrorKind::ShiftAmountOutOfRange { mnemonic, value }
            } else {
                AsmErrorKind::ImmediateOutOfRange { mnemonic, value }
            }
        };
        // Literals too wide for i64 are out of range, not malformed.
        let value: i64 = text.parse().map_err(|_| out_of_range())?;
        let (min, max) = shape.bounds();
        if !(min..=max).contains(&value) {
            return Err(out_of_range());
        }
        out.imm = i32::try_from(value).map_err(|_| out_of_range())?;
    }

    Ok(out)
}

/// Parses a single instruction line into an operation.
///
/// A trailing comment is ignored. Labels and pseudo-instructions must already be resolved.
///
/// # Errors
///
/// * [`AsmErrorKind::EmptyInstruction`] if the line holds no mnemonic.
/// * [`AsmErrorKind::UnsupportedInstruction`] if the mnemonic is unknown.
/// * Any error of [`parse_operands`].
pub fn parse_op(line: &str) -> Result<Op, AsmErrorKind> {
    let (mnemonic, rest) = split_mnemonic(strip_comment(line));
    if mnemonic.is_empty() {
        return Err(AsmErrorKind::EmptyInstruction);
    }
    let Some(entry) = lookup(mnemonic) else {
        return Err(AsmErrorKind::UnsupportedInstruction(mnemonic.to_owned()));
    };
    let operands = parse_operands(mnemonic, entry.shape, &remove_whitespace(rest))?;
    Ok((entry.build)(&operands))
}

/// Parses and encodes a single instruction line.
///
/// # Errors
///
/// See [`parse_op`].
pub fn parse_instruction(line: &str) -> Result<Instruction, AsmErrorKind> {
    parse_op(line).map(|op| op.encode())
}
