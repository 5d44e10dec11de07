//! # General-Purpose Register Tests
//!
//! Tests for the integer register file.

use proptest::prelude::*;
use rv32sim_core::Cpu;
use rv32sim_core::core::arch::gpr::Gpr;

#[test]
fn test_gpr_new_initializes_to_zero() {
    let gpr = Gpr::new();
    for i in 0..32 {
        assert_eq!(gpr.read(i), 0);
    }
}

#[test]
fn test_gpr_write_all_registers() {
    let mut gpr = Gpr::new();
    for i in 1..32 {
        let value = 0x0101_0101 * i as u32;
        gpr.write(i, value);
        assert_eq!(gpr.read(i), value);
    }
}

#[test]
fn test_gpr_snapshot_reports_zero_for_x0() {
    let mut gpr = Gpr::new();
    gpr.write(0, 7);
    gpr.write(31, 9);
    let snap = gpr.snapshot();
    assert_eq!(snap[0], 0);
    assert_eq!(snap[31], 9);
}

#[test]
fn test_cpu_set_register_zero_is_noop() {
    let mut cpu = Cpu::new();
    cpu.set_register(0, 0xDEAD_BEEF);
    cpu.set_register(1, 0xDEAD_BEEF);
    assert_eq!(cpu.register(0), 0);
    assert_eq!(cpu.register(1), 0xDEAD_BEEF);
}

proptest! {
    #[test]
    fn prop_x0_always_reads_zero(writes in proptest::collection::vec((0usize..32, any::<u32>()), 0..64)) {
        let mut gpr = Gpr::new();
        for (idx, val) in writes {
            gpr.write(idx, val);
            gpr.write(0, val);
            prop_assert_eq!(gpr.read(0), 0);
        }
    }
}
