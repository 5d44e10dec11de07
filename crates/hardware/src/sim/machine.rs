//! Machine: a CPU bound to its memory.
//!
//! This module provides the owner of all mutable simulator state. It performs the following:
//! 1. **Construction:** Builds a zeroed CPU and memory from a size or a [`Config`].
//! 2. **Loading:** Writes a program at an address and points the PC at it.
//! 3. **Execution:** Single steps, bounded runs and reset.

use tracing::debug;

use crate::common::error::{ExecError, MemoryError};
use crate::config::Config;
use crate::core::Cpu;
use crate::isa::decode::Op;
use crate::isa::instruction::Instruction;
use crate::soc::memory::Memory;
use crate::soc::traits::WordMemory;

/// A CPU together with the memory it executes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Machine {
    /// Execution engine state.
    pub cpu: Cpu,
    /// Main memory.
    pub memory: Memory,
}

impl Machine {
    /// Creates a machine with `memory_size` bytes of zeroed memory and PC 0.
    pub fn new(memory_size: usize) -> Self {
        Self {
            cpu: Cpu::new(),
            memory: Memory::new(memory_size),
        }
    }

    /// Creates a machine sized by `config`, with the PC at `general.start_pc`.
    pub fn from_config(config: &Config) -> Self {
        let mut machine = Self::new(config.memory.size);
        machine.cpu.pc = config.general.start_pc;
        machine
    }

    /// Writes `program` at `start` and sets the PC to `start`.
    ///
    /// The whole image is bounds checked before any byte is written. An empty
    /// program writes nothing and only moves the PC, wherever `start` lies.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if the program does not fit; memory and PC are unchanged.
    pub fn load_program(&mut self, program: &[Instruction], start: u32) -> Result<(), MemoryError> {
        if !program.is_empty() {
            let image: Vec<u8> = program
                .iter()
                .flat_map(|inst| inst.raw().to_le_bytes())
                .collect();
            self.memory.load_bytes(start, &image)?;
        }
        self.cpu.pc = start;
        debug!(
            start = %format_args!("{start:#010x}"),
            instructions = program.len(),
            "program loaded"
        );
        Ok(())
    }

    /// Executes one instruction.
    ///
    /// # Errors
    ///
    /// Any [`ExecError`] from [`Cpu::step`]; the CPU is unchanged on failure.
    pub fn step(&mut self) -> Result<Op, ExecError> {
        self.cpu.step(&mut self.memory)
    }

    /// Steps until `max_steps` instructions have retired or a step fails.
    ///
    /// # Returns
    ///
    /// The number of instructions retired by this call.
    ///
    /// # Errors
    ///
    /// The first failing step's error. Instructions retired before it are not
    /// rolled back and remain counted in the CPU statistics.
    pub fn run(&mut self, max_steps: u64) -> Result<u64, ExecError> {
        let mut retired = 0;
        while retired < max_steps {
            let _ = self.step()?;
            retired += 1;
        }
        Ok(retired)
    }

    /// Clears registers, PC and statistics and reallocates zeroed memory of the same size.
    pub fn reset(&mut self) {
        self.cpu = Cpu::new();
        self.memory = Memory::new(self.memory.len());
        debug!(memory_size = self.memory.len(), "machine reset");
    }

    /// Reads the word at the current PC without executing it.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if the PC is outside memory.
    pub fn peek(&self) -> Result<u32, MemoryError> {
        self.memory.read_word(self.cpu.pc)
    }
}
