//! # Pass 1 Tests

use pretty_assertions::assert_eq;
use rv32sim_core::asm::SourceLine;
use rv32sim_core::asm::preparser::{preparse, split_labels};

#[test]
fn test_labels_point_at_next_instruction() {
    let source = [
        "# header comment",
        "start:",
        "    addi x1, x0, 1   ; first",
        "",
        "loop: mid: add x2, x2, x1",
        "end:",
    ];
    let (labels, lines) = preparse(source);

    assert_eq!(labels.get("start"), Some(&0));
    assert_eq!(labels.get("loop"), Some(&4));
    assert_eq!(labels.get("mid"), Some(&4));
    assert_eq!(labels.get("end"), Some(&8));
    assert_eq!(
        lines,
        vec![
            SourceLine {
                line_no: 3,
                text: "addi x1, x0, 1".to_owned()
            },
            SourceLine {
                line_no: 5,
                text: "add x2, x2, x1".to_owned()
            },
        ]
    );
}

#[test]
fn test_duplicate_label_keeps_last_definition() {
    let (labels, _) = preparse(["a: nop", "a: nop"]);
    assert_eq!(labels.get("a"), Some(&4));
}

#[test]
fn test_split_labels_without_label() {
    assert_eq!(split_labels("addi x1, x0, 1"), (vec![], "addi x1, x0, 1"));
}
