//! Instruction Execution.
//!
//! This module implements the CPU's fetch-decode-dispatch-writeback cycle. It performs the following:
//! 1. **Fetch:** Reads the word at PC; a failed fetch leaves every register and the PC untouched.
//! 2. **Decode:** Maps the word to an [`Op`]; invalid or unimplemented encodings abort the step.
//! 3. **Dispatch:** Executes the operation with wrapping 32-bit arithmetic.
//! 4. **PC Update:** Branches and jumps set the PC; everything else advances it by 4.
//!
//! A step either completes entirely or fails without mutating the CPU. Memory
//! written by earlier successful steps is never rolled back.

use tracing::{debug, trace};

use super::Cpu;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::ExecError;
use crate::isa::decode::{Op, decode};
use crate::isa::instruction::Instruction;
use crate::soc::traits::WordMemory;

impl Cpu {
    /// Executes one instruction from `mem` at the current PC.
    ///
    /// # Arguments
    ///
    /// * `mem` - Memory to fetch from and load/store against.
    ///
    /// # Returns
    ///
    /// The operation that was retired.
    ///
    /// # Errors
    ///
    /// * [`ExecError::Memory`] if the fetch, a load or a store is out of bounds.
    /// * [`ExecError::Decode`] if the fetched word is not a supported instruction.
    ///
    /// On error the registers, the PC and the statistics are unchanged.
    pub fn step<M: WordMemory + ?Sized>(&mut self, mem: &mut M) -> Result<Op, ExecError> {
        let pc = self.pc;
        let word = mem.read_word(pc).inspect_err(|e| {
            debug!(pc = %format_args!("{pc:#010x}"), error = %e, "fetch failed");
        })?;
        let op = decode(Instruction::new(word)).inspect_err(|e| {
            debug!(pc = %format_args!("{pc:#010x}"), error = %e, "decode failed");
        })?;

        trace!(
            pc = %format_args!("{pc:#010x}"),
            word = %format_args!("{word:#010x}"),
            op = %op,
            "step"
        );

        self.execute(op, mem)?;
        Ok(op)
    }

    /// Applies `op` to the architectural state and updates the PC.
    ///
    /// Memory is accessed before any register write so a faulting load or store
    /// leaves the CPU untouched.
    fn execute<M: WordMemory + ?Sized>(&mut self, op: Op, mem: &mut M) -> Result<(), ExecError> {
        let pc = self.pc;
        let next = pc.wrapping_add(INSTRUCTION_SIZE);
        let mut taken = false;

        let next_pc = match op {
            Op::Add { rd, rs1, rs2 } => {
                let val = self.regs.read(rs1).wrapping_add(self.regs.read(rs2));
                self.regs.write(rd, val);
                next
            }
            Op::Sub { rd, rs1, rs2 } => {
                let val = self.regs.read(rs1).wrapping_sub(self.regs.read(rs2));
                self.regs.write(rd, val);
                next
            }
            Op::Slt { rd, rs1, rs2 } => {
                let lt = (self.regs.read(rs1) as i32) < (self.regs.read(rs2) as i32);
                self.regs.write(rd, u32::from(lt));
                next
            }
            Op::Addi { rd, rs1, imm } => {
                let val = self.regs.read(rs1).wrapping_add(imm as u32);
                self.regs.write(rd, val);
                next
            }
            Op::Slli { rd, rs1, shamt } => {
                let val = self.regs.read(rs1) << shamt;
                self.regs.write(rd, val);
                next
            }
            Op::Lw { rd, rs1, imm } => {
                let addr = self.regs.read(rs1).wrapping_add(imm as u32);
                let val = mem.read_word(addr)?;
                self.regs.write(rd, val);
                next
            }
            Op::Sw { rs1, rs2, imm } => {
                let addr = self.regs.read(rs1).wrapping_add(imm as u32);
                mem.write_word(addr, self.regs.read(rs2))?;
                next
            }
            Op::Beq { rs1, rs2, imm } => {
                taken = self.regs.read(rs1) == self.regs.read(rs2);
                branch_target(pc, imm, taken)
            }
            Op::Bne { rs1, rs2, imm } => {
                taken = self.regs.read(rs1) != self.regs.read(rs2);
                branch_target(pc, imm, taken)
            }
            Op::Blt { rs1, rs2, imm } => {
                taken = (self.regs.read(rs1) as i32) < (self.regs.read(rs2) as i32);
                branch_target(pc, imm, taken)
            }
            Op::Jal { rd, imm } => {
                self.regs.write(rd, next);
                pc.wrapping_add(imm as u32)
            }
            Op::Jalr { rd, rs1, imm } => {
                // Target is read before the link write in case rd == rs1.
                let target = self.regs.read(rs1).wrapping_add(imm as u32) & !1;
                self.regs.write(rd, next);
                target
            }
        };

        self.stats.record(&op, taken);
        self.pc = next_pc;
        Ok(())
    }
}

/// Next PC of a conditional branch at `pc` with offset `imm`.
const fn branch_target(pc: u32, imm: i32, taken: bool) -> u32 {
    if taken {
        pc.wrapping_add(imm as u32)
    } else {
        pc.wrapping_add(INSTRUCTION_SIZE)
    }
}
