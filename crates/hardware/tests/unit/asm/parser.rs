//! # Instruction Parser Tests
//!
//! Acceptance of every mnemonic, range checks at each format's limits and the
//! classification of malformed input.

use rstest::rstest;
use rv32sim_core::asm::AsmErrorKind;
use rv32sim_core::asm::parser::{parse_instruction, parse_op};
use rv32sim_core::isa::decode::Op;

use crate::common::builder::instruction::InstructionBuilder as B;

#[rstest]
#[case("add x3, x1, x2", B::new().rd(3).rs1(1).rs2(2).add())]
#[case("sub x3,x1,x2", B::new().rd(3).rs1(1).rs2(2).sub())]
#[case("slt   x3 , x1 , x2", B::new().rd(3).rs1(1).rs2(2).slt())]
#[case("addi x1, x0, -2048", B::new().rd(1).imm(-2048).addi())]
#[case("addi x1, x0, 2047", B::new().rd(1).imm(2047).addi())]
#[case("slli x1, x1, 31", B::new().rd(1).rs1(1).imm(31).slli())]
#[case("beq x1, x2, -4096", B::new().rs1(1).rs2(2).imm(-4096).beq())]
#[case("bne x1, x2, 4094", B::new().rs1(1).rs2(2).imm(4094).bne())]
#[case("blt x1, x2, 8", B::new().rs1(1).rs2(2).imm(8).blt())]
#[case("jal x1, -1048576", B::new().rd(1).imm(-1_048_576).jal())]
#[case("jal x1, 1048574", B::new().rd(1).imm(1_048_574).jal())]
#[case("jalr x6, 4(x2)", B::new().rd(6).rs1(2).imm(4).jalr())]
#[case("lw x3, -8(x2)", B::new().rd(3).rs1(2).imm(-8).lw())]
#[case("sw x1, 12(x2)", B::new().rs1(2).rs2(1).imm(12).sw())]
#[case("addi x1, x0, 5 # trailing", B::new().rd(1).imm(5).addi())]
fn test_parse_valid(#[case] line: &str, #[case] word: u32) {
    assert_eq!(parse_instruction(line).unwrap().raw(), word);
}

#[test]
fn test_sw_operand_order() {
    assert_eq!(
        parse_op("sw x5, 0(x6)").unwrap(),
        Op::Sw {
            rs1: 6,
            rs2: 5,
            imm: 0
        }
    );
}

#[rstest]
#[case::i_low("addi x1, x0, -2049")]
#[case::i_high("addi x1, x0, 2048")]
#[case::load("lw x1, 2048(x2)")]
#[case::store("sw x1, -2049(x2)")]
#[case::jalr("jalr x1, 4096(x2)")]
#[case::b_low("beq x1, x2, -4098")]
#[case::b_high("bne x1, x2, 4096")]
#[case::j_low("jal x1, -1048577")]
#[case::j_high("jal x1, 1048576")]
#[case::huge("addi x1, x0, 99999999999999999999999")]
fn test_immediate_out_of_range(#[case] line: &str) {
    let err = parse_instruction(line).unwrap_err();
    assert!(
        matches!(err, AsmErrorKind::ImmediateOutOfRange { .. }),
        "{err:?}"
    );
    assert!(err.to_string().contains("immediate out of range"));
}

#[test]
fn test_shift_amount_out_of_range() {
    let err = parse_instruction("slli x1, x1, 32").unwrap_err();
    assert_eq!(
        err,
        AsmErrorKind::ShiftAmountOutOfRange {
            mnemonic: "slli".to_owned(),
            value: "32".to_owned()
        }
    );
    assert!(err.to_string().contains("shift amount out of range"));
}

#[rstest]
#[case::too_few("add x1, x2")]
#[case::too_many("add x1, x2, x3, x4")]
#[case::imm_for_reg("add x1, x2, 3")]
#[case::reg_for_imm("addi x1, x2, x3")]
#[case::register_32("add x32, x1, x2")]
#[case::abi_name("addi a0, zero, 1")]
#[case::negative_shamt("slli x1, x1, -1")]
#[case::missing_parens("lw x1, 4, x2")]
#[case::missing_offset("lw x1, (x2)")]
#[case::hex_imm("addi x1, x0, 0x10")]
#[case::label_left_over("beq x1, x2, loop")]
#[case::empty_operand("add x1,,x2")]
fn test_invalid_operands(#[case] line: &str) {
    let err = parse_instruction(line).unwrap_err();
    assert!(
        matches!(err, AsmErrorKind::InvalidOperands { .. }),
        "{err:?}"
    );
    assert!(err.to_string().contains("invalid operands"));
}

#[rstest]
#[case("mul x1, x2, x3")]
#[case("srli x1, x1, 1")]
#[case("ADD x1, x2, x3")]
fn test_unsupported_instruction(#[case] line: &str) {
    let err = parse_instruction(line).unwrap_err();
    assert!(matches!(err, AsmErrorKind::UnsupportedInstruction(_)));
    assert!(err.to_string().contains("unsupported instruction"));
}

#[test]
fn test_empty_line() {
    let result = parse_instruction("   # nothing");
    assert_eq!(result, Err(AsmErrorKind::EmptyInstruction));
}
