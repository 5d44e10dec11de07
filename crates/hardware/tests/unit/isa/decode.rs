//! # Decode Tests
//!
//! Every supported operation is decoded from an independently built word;
//! unsupported funct3/funct7 combinations and invalid opcodes are rejected.

use rstest::rstest;
use rv32sim_core::common::error::DecodeError;
use rv32sim_core::isa::Instruction;
use rv32sim_core::isa::decode::{Op, decode};

use crate::common::builder::instruction::{InstructionBuilder as B, r_type};

#[rstest]
#[case(B::new().rd(3).rs1(1).rs2(2).add(), Op::Add { rd: 3, rs1: 1, rs2: 2 })]
#[case(B::new().rd(3).rs1(1).rs2(2).sub(), Op::Sub { rd: 3, rs1: 1, rs2: 2 })]
#[case(B::new().rd(4).rs1(5).rs2(6).slt(), Op::Slt { rd: 4, rs1: 5, rs2: 6 })]
#[case(B::new().rd(1).rs1(0).imm(-5).addi(), Op::Addi { rd: 1, rs1: 0, imm: -5 })]
#[case(B::new().rd(1).rs1(1).imm(3).slli(), Op::Slli { rd: 1, rs1: 1, shamt: 3 })]
#[case(B::new().rd(3).rs1(2).imm(-4).lw(), Op::Lw { rd: 3, rs1: 2, imm: -4 })]
#[case(B::new().rs1(2).rs2(1).imm(8).sw(), Op::Sw { rs1: 2, rs2: 1, imm: 8 })]
#[case(B::new().rs1(1).rs2(2).imm(8).beq(), Op::Beq { rs1: 1, rs2: 2, imm: 8 })]
#[case(B::new().rs1(1).rs2(2).imm(-8).bne(), Op::Bne { rs1: 1, rs2: 2, imm: -8 })]
#[case(B::new().rs1(1).rs2(2).imm(16).blt(), Op::Blt { rs1: 1, rs2: 2, imm: 16 })]
#[case(B::new().rd(5).imm(12).jal(), Op::Jal { rd: 5, imm: 12 })]
#[case(B::new().rd(6).rs1(2).imm(4).jalr(), Op::Jalr { rd: 6, rs1: 2, imm: 4 })]
fn test_decode_supported(#[case] word: u32, #[case] expected: Op) {
    assert_eq!(decode(Instruction::new(word)), Ok(expected));
    assert_eq!(expected.encode().raw(), word);
}

#[test]
fn test_blt_shares_slt_funct3() {
    let word = B::new().rs1(1).rs2(2).imm(4).blt();
    assert_eq!((word >> 12) & 0x7, 0b010);
}

#[test]
fn test_slt_ignores_funct7() {
    let word = r_type(0b0110011, 1, 0b010, 2, 3, 0b0100000);
    let expected = Op::Slt {
        rd: 1,
        rs1: 2,
        rs2: 3,
    };
    assert_eq!(decode(Instruction::new(word)), Ok(expected));
}

#[test]
fn test_slli_masks_shift_amount() {
    // imm = 0x23: shift amount is the low five bits.
    let word = B::new().rd(1).rs1(1).imm(0x23).slli();
    let expected = Op::Slli {
        rd: 1,
        rs1: 1,
        shamt: 3,
    };
    assert_eq!(decode(Instruction::new(word)), Ok(expected));
}

#[test]
fn test_decode_in_const_context() {
    const JAL: Result<Op, DecodeError> = decode(Instruction::new(0x0080_00EF));
    assert_eq!(JAL, Ok(Op::Jal { rd: 1, imm: 8 }));
}

#[rstest]
#[case::add_bad_funct7(r_type(0b0110011, 1, 0, 2, 3, 0b0000001))]
#[case::reg_funct3_sll(r_type(0b0110011, 1, 0b001, 2, 3, 0))]
#[case::imm_funct3_xori(0x0000_4013)]
#[case::load_lb(0x0000_0003)]
#[case::store_sb(0x0000_0023)]
#[case::branch_bge(0x0000_5063)]
fn test_decode_unimplemented(#[case] word: u32) {
    assert!(matches!(
        decode(Instruction::new(word)),
        Err(DecodeError::Unimplemented { .. })
    ));
}

#[rstest]
#[case(0x0000_0000)]
#[case(0x0000_0037)]
#[case(0xFFFF_FFFF)]
fn test_decode_invalid_opcode(#[case] word: u32) {
    let err = decode(Instruction::new(word)).unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidOpcode {
            opcode: word & 0x7F,
            word
        }
    );
}
