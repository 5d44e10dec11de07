//! # Machine Tests

use pretty_assertions::assert_eq;
use rv32sim_core::common::error::{ExecError, MemoryError};
use rv32sim_core::isa::Instruction;
use rv32sim_core::soc::WordMemory;
use rv32sim_core::{Config, Machine};

use crate::common::harness::TestContext;

fn words(raw: &[u32]) -> Vec<Instruction> {
    raw.iter().copied().map(Instruction::new).collect()
}

#[test]
fn test_load_program_writes_sequentially_and_sets_pc() {
    let mut machine = Machine::new(64);
    machine
        .load_program(&words(&[0x11, 0x22, 0x33]), 8)
        .unwrap();
    assert_eq!(machine.cpu.pc, 8);
    assert_eq!(machine.memory.read_word(8).unwrap(), 0x11);
    assert_eq!(machine.memory.read_word(12).unwrap(), 0x22);
    assert_eq!(machine.memory.read_word(16).unwrap(), 0x33);
}

#[test]
fn test_load_program_that_does_not_fit_changes_nothing() {
    let mut machine = Machine::new(16);
    machine.cpu.pc = 4;
    let before = machine.clone();
    let err = machine.load_program(&words(&[1, 2, 3]), 8).unwrap_err();
    assert_eq!(err, MemoryError::OutOfBounds { addr: 8, size: 16 });
    assert_eq!(machine, before);
}

#[test]
fn test_empty_program_only_moves_pc() {
    let mut machine = Machine::new(16);
    machine.load_program(&[], 32).unwrap();
    assert_eq!(machine.cpu.pc, 32);
    assert_eq!(machine.memory, Machine::new(16).memory);
}

#[test]
fn test_run_respects_budget() {
    // Tight loop: jal x0, 0
    let mut ctx = TestContext::new().load_asm(0, "loop: j loop");
    assert_eq!(ctx.run(25).unwrap(), 25);
    assert_eq!(ctx.pc(), 0);
    assert_eq!(ctx.machine.cpu.stats.inst_jump, 25);
    assert_eq!(ctx.run(0).unwrap(), 0);
}

#[test]
fn test_run_stops_at_first_error_without_rollback() {
    let source = "addi x1, x0, 1\nsw x1, 8(x0)\n";
    let mut ctx = TestContext::with_memory(12).load_asm(0, source);
    // The store writes 1 at address 8, which then fails to decode.
    let err = ctx.run(100).unwrap_err();
    assert!(matches!(err, ExecError::Decode(_)));
    assert_eq!(ctx.machine.cpu.stats.instructions_retired, 2);
    assert_eq!(ctx.reg(1), 1);
    assert_eq!(ctx.machine.memory.read_word(8).unwrap(), 1);
    assert_eq!(ctx.pc(), 8);
}

#[test]
fn test_reset_clears_everything_but_size() {
    let source = "addi x1, x0, 9\nsw x1, 0(x0)";
    let mut ctx = TestContext::with_memory(128).load_asm(16, source);
    let _ = ctx.run(2).unwrap();
    ctx.machine.reset();
    assert_eq!(ctx.machine, Machine::new(128));
}

#[test]
fn test_peek_reads_without_executing() {
    let ctx = TestContext::new().load_asm(4, "addi x1, x0, 5");
    assert_eq!(ctx.machine.peek().unwrap(), 0x0050_0093);
    assert_eq!(ctx.pc(), 4);
    assert_eq!(ctx.reg(1), 0);

    let mut machine = Machine::new(8);
    machine.cpu.pc = 8;
    assert!(machine.peek().is_err());
}

#[test]
fn test_from_config() {
    let json = r#"{"general": {"start_pc": 256}, "memory": {"size": 1024}}"#;
    let config = Config::from_json(json).unwrap();
    let machine = Machine::from_config(&config);
    assert_eq!(machine.memory.len(), 1024);
    assert_eq!(machine.cpu.pc, 256);
}
