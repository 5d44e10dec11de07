//! # Statistics Tests

use pretty_assertions::assert_eq;
use rv32sim_core::isa::decode::Op;
use rv32sim_core::stats::ExecStats;

#[test]
fn test_record_classifies_operations() {
    let mut stats = ExecStats::default();
    let (rd, rs1, rs2, imm) = (1, 2, 3, 8);
    stats.record(&Op::Add { rd, rs1, rs2 }, false);
    stats.record(&Op::Lw { rd, rs1, imm }, false);
    stats.record(&Op::Sw { rs1, rs2, imm }, false);
    stats.record(&Op::Beq { rs1, rs2, imm }, true);
    stats.record(&Op::Blt { rs1, rs2, imm }, false);
    stats.record(&Op::Jalr { rd, rs1, imm }, false);

    assert_eq!(
        stats,
        ExecStats {
            instructions_retired: 6,
            inst_alu: 1,
            inst_load: 1,
            inst_store: 1,
            inst_branch: 2,
            branches_taken: 1,
            inst_jump: 1,
        }
    );
    assert_eq!(stats.branch_taken_rate(), Some(50.0));
}

#[test]
fn test_taken_flag_ignored_for_non_branches() {
    let mut stats = ExecStats::default();
    stats.record(&Op::Jal { rd: 1, imm: 4 }, true);
    assert_eq!(stats.branches_taken, 0);
    assert_eq!(stats.branch_taken_rate(), None);
}

#[test]
fn test_json_field_names() {
    let json = serde_json::to_value(ExecStats::default()).unwrap();
    for key in [
        "instructions_retired",
        "inst_alu",
        "inst_load",
        "inst_store",
        "inst_branch",
        "branches_taken",
        "inst_jump",
    ] {
        assert_eq!(json[key], 0, "{key}");
    }
}

#[test]
fn test_display_summary() {
    let stats = ExecStats {
        instructions_retired: 4,
        inst_alu: 2,
        inst_branch: 2,
        branches_taken: 1,
        ..ExecStats::default()
    };
    assert_eq!(
        stats.to_string(),
        "instructions retired: 4\n  alu:    2\n  load:   0\n  store:  0\n  branch: 2 (1 taken, 50.0%)\n  jump:   0"
    );
}
