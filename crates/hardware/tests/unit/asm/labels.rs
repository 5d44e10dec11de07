//! # Label Substitution Tests

use rstest::rstest;
use rv32sim_core::asm::labels::substitute;
use rv32sim_core::asm::{AsmErrorKind, LabelMap};

fn labels() -> LabelMap {
    LabelMap::from([("start".to_owned(), 0), ("end".to_owned(), 24)])
}

#[rstest]
#[case::backward("beq x1, x0, start", 1, "beq x1, x0, -4")]
#[case::forward("bne x1,x2,end", 2, "bne x1, x2, 16")]
#[case::self_loop("blt x1, x2, start", 0, "blt x1, x2, 0")]
#[case::jal("jal x1, end", 6, "jal x1, 0")]
fn test_substitute(#[case] line: &str, #[case] idx: usize, #[case] expected: &str) {
    assert_eq!(substitute(line, idx, &labels()).unwrap(), expected);
}

#[rstest]
#[case("beq x1, x0, 12")]
#[case("jal x1, -8")]
#[case("addi x1, x0, start")]
#[case("jalr x1, 0(x2)")]
#[case("beq x1, nowhere")]
#[case("beq x1, x2,")]
#[case("jal x1,")]
fn test_non_label_lines_pass_through(#[case] line: &str) {
    assert_eq!(substitute(line, 3, &labels()).unwrap(), line);
}

#[test]
fn test_unknown_label() {
    assert_eq!(
        substitute("jal x0, nowhere", 0, &labels()).unwrap_err(),
        AsmErrorKind::UnknownLabel("nowhere".to_owned())
    );
}
