//! # Disassembler Tests

use rstest::rstest;
use rv32sim_core::asm::parse_instruction;
use rv32sim_core::isa::disasm::{UNKNOWN, disassemble};

#[rstest]
#[case(0x0050_0093, "addi x1, x0, 5")]
#[case(0x0020_81B3, "add x3, x1, x2")]
#[case(0x4020_81B3, "sub x3, x1, x2")]
#[case(0x0001_2183, "lw x3, 0(x2)")]
#[case(0x0011_2023, "sw x1, 0(x2)")]
fn test_disassemble_known_words(#[case] word: u32, #[case] text: &str) {
    assert_eq!(disassemble(word), text);
}

#[rstest]
#[case("slt x4, x5, x6")]
#[case("slli x1, x1, 31")]
#[case("beq x1, x0, -4")]
#[case("bne x7, x8, 4094")]
#[case("blt x1, x2, -4096")]
#[case("jal x5, 12")]
#[case("jalr x6, 4(x2)")]
#[case("lw x3, -2048(x2)")]
#[case("sw x31, 2047(x30)")]
fn test_disassembly_reassembles(#[case] text: &str) {
    let word = parse_instruction(text).unwrap().raw();
    assert_eq!(disassemble(word), text);
}

#[test]
fn test_unknown_words() {
    assert_eq!(disassemble(0), UNKNOWN);
    assert_eq!(disassemble(0x0000_4013), UNKNOWN);
}
