//! Read-eval-print loop over arbitrary input and output streams.

use std::io::{self, BufRead, Write};

use rv32sim_core::Machine;

use crate::commands::{CommandRegistry, Context, Flow, Settings};

const BANNER: &str = "RV32 simulator REPL. Type 'step', 'run', 'reset', 'quit' or 'help'.";
const PROMPT: &str = "> ";

/// Interactive session driving one machine.
#[derive(Debug)]
pub struct Repl<'a> {
    machine: &'a mut Machine,
    registry: &'a CommandRegistry,
    settings: Settings,
}

impl<'a> Repl<'a> {
    /// Creates a session over `machine` dispatching through `registry`.
    pub const fn new(
        machine: &'a mut Machine,
        registry: &'a CommandRegistry,
        settings: Settings,
    ) -> Self {
        Self {
            machine,
            registry,
            settings,
        }
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// Command errors are printed as `Error: ...` and the loop continues.
    ///
    /// # Errors
    ///
    /// Only I/O errors on `input` or `out` end the loop early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "{BANNER}")?;
        let mut lines = input.lines();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                break;
            };

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some((name, args)) = tokens.split_first() else {
                continue;
            };
            let Some(cmd) = self.registry.get(name) else {
                writeln!(out, "Unknown command. Type 'help' for help.")?;
                continue;
            };

            let mut ctx = Context {
                machine: &mut *self.machine,
                out: &mut *out,
                registry: self.registry,
                settings: self.settings,
            };
            match (cmd.handler)(&mut ctx, args) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => writeln!(out, "Error: {e}")?,
            }
        }
        writeln!(out, "Goodbye!")?;
        Ok(())
    }
}
