//! Execution statistics collection and reporting.
//!
//! This module tracks what the CPU has retired. It provides:
//! 1. **Retired count:** Total instructions that completed a step.
//! 2. **Instruction mix:** Counts by class (ALU, load, store, branch, jump).
//! 3. **Branch behaviour:** Taken and not-taken conditional branches.
//!
//! Failed steps are never counted.

use std::fmt;

use serde::Serialize;

use crate::isa::decode::{Op, OpClass};

/// Counters of retired instructions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExecStats {
    /// Number of instructions retired.
    pub instructions_retired: u64,
    /// Count of ALU (register and immediate arithmetic) instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of conditional branches that were taken.
    pub branches_taken: u64,
    /// Count of unconditional jumps (`jal`, `jalr`) retired.
    pub inst_jump: u64,
}

impl ExecStats {
    /// Records one retired operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation that completed.
    /// * `taken` - Whether a conditional branch redirected the PC; ignored otherwise.
    pub const fn record(&mut self, op: &Op, taken: bool) {
        self.instructions_retired += 1;
        match op.class() {
            OpClass::Alu => self.inst_alu += 1,
            OpClass::Load => self.inst_load += 1,
            OpClass::Store => self.inst_store += 1,
            OpClass::Branch => {
                self.inst_branch += 1;
                if taken {
                    self.branches_taken += 1;
                }
            }
            OpClass::Jump => self.inst_jump += 1,
        }
    }

    /// Percentage of conditional branches that were taken, or `None` if no branch retired.
    pub fn branch_taken_rate(&self) -> Option<f64> {
        if self.inst_branch == 0 {
            None
        } else {
            Some(self.branches_taken as f64 * 100.0 / self.inst_branch as f64)
        }
    }
}

impl fmt::Display for ExecStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "instructions retired: {}", self.instructions_retired)?;
        writeln!(f, "  alu:    {}", self.inst_alu)?;
        writeln!(f, "  load:   {}", self.inst_load)?;
        writeln!(f, "  store:  {}", self.inst_store)?;
        let (branches, taken) = (self.inst_branch, self.branches_taken);
        write!(f, "  branch: {branches} ({taken} taken")?;
        if let Some(rate) = self.branch_taken_rate() {
            write!(f, ", {rate:.1}%")?;
        }
        writeln!(f, ")")?;
        write!(f, "  jump:   {}", self.inst_jump)
    }
}
