//! REPL commands.
//!
//! This module defines the command set of the interactive front end. It provides:
//! 1. **Registry:** An explicit name-to-handler table built once at start-up.
//! 2. **Context:** The machine, output sink and settings a handler operates on.
//! 3. **Handlers:** One function per command, each returning a [`Flow`] or a [`CliError`].

use std::collections::BTreeMap;
use std::io::{self, Write};

use thiserror::Error;

use rv32sim_core::Machine;
use rv32sim_core::asm::assemble_file;
use rv32sim_core::common::error::{ExecError, SimError};
use rv32sim_core::isa::abi::abi_name;
use rv32sim_core::isa::disasm::disassemble;
use rv32sim_core::soc::WordMemory;

/// Words dumped by `mem` when no length is given.
const DEFAULT_DUMP_WORDS: u32 = 16;

/// Errors reported by command handlers. The REPL prints them and continues.
#[derive(Debug, Error)]
pub enum CliError {
    /// Wrong number of arguments.
    #[error("usage: {0}")]
    Usage(&'static str),
    /// An address argument is neither decimal nor `0x` hex.
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
    /// A count argument is not a positive integer.
    #[error("invalid count: {0:?}")]
    InvalidCount(String),
    /// Execution stopped at the given 1-based step of the command.
    #[error("error during step {step}: {source}")]
    Step {
        /// Step number within this command.
        step: u64,
        /// Why the step failed.
        #[source]
        source: ExecError,
    },
    /// Assembling, loading or configuring failed.
    #[error(transparent)]
    Sim(#[from] SimError),
    /// Writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Serialising statistics failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// What the REPL does after a command returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Leave the loop.
    Quit,
}

/// Settings commands fall back on when an argument is omitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Default address for `load`.
    pub load_address: u32,
    /// Default instruction budget for `run`.
    pub step_limit: u64,
}

/// State handed to a command handler.
pub struct Context<'a> {
    /// Machine being driven.
    pub machine: &'a mut Machine,
    /// Where command output goes.
    pub out: &'a mut dyn Write,
    /// The registry, for `help`.
    pub registry: &'a CommandRegistry,
    /// Defaults for omitted arguments.
    pub settings: Settings,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("pc", &self.machine.cpu.pc)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Signature shared by all command handlers.
pub type Handler = fn(&mut Context<'_>, &[&str]) -> Result<Flow, CliError>;

/// A registered command.
#[derive(Clone, Copy, Debug)]
pub struct Command {
    /// Function run when the command is entered.
    pub handler: Handler,
    /// One-line usage and description.
    pub help: &'static str,
}

/// Name-to-command table, sorted by name.
#[derive(Clone, Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Command>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in command.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            "help",
            cmd_help,
            "help [command]: Show help for a command",
        );
        registry.register("quit", cmd_quit, "quit: Exit the CLI");
        registry.register("exit", cmd_quit, "exit: Exit the CLI");
        registry.register(
            "load",
            cmd_load,
            "load <file> [address]: Assemble a source file and load it at an address",
        );
        registry.register(
            "mem",
            cmd_mem,
            "mem [start [length]]: Dump memory words (default: start=0, length=16)",
        );
        registry.register("pc", cmd_pc, "pc: Print the current program counter");
        registry.register(
            "peek",
            cmd_peek,
            "peek: Show the next instruction at the current PC",
        );
        registry.register(
            "step",
            cmd_step,
            "step [n]: Execute n instructions (default 1)",
        );
        registry.register(
            "run",
            cmd_run,
            "run [max]: Execute until an error or max instructions (default: step limit)",
        );
        registry.register("regs", cmd_regs, "regs: Print the register file");
        registry.register(
            "reset",
            cmd_reset,
            "reset: Reset the CPU and memory to initial state",
        );
        registry.register(
            "stats",
            cmd_stats,
            "stats [--json]: Print execution statistics",
        );
        registry
    }

    /// Adds or replaces a command.
    pub fn register(&mut self, name: &'static str, handler: Handler, help: &'static str) {
        let _ = self.commands.insert(name, Command { handler, help });
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal address.
pub fn parse_address(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

fn address_arg(text: &str) -> Result<u32, CliError> {
    parse_address(text).ok_or_else(|| CliError::InvalidAddress(text.to_owned()))
}

fn count_arg(text: &str) -> Result<u64, CliError> {
    text.parse::<u64>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| CliError::InvalidCount(text.to_owned()))
}

fn cmd_help(ctx: &mut Context<'_>, args: &[&str]) -> Result<Flow, CliError> {
    match args.first() {
        None => {
            writeln!(ctx.out, "Available commands:")?;
            for name in ctx.registry.names() {
                writeln!(ctx.out, "  {name}")?;
            }
            writeln!(ctx.out, "Type 'help <command>' for details.")?;
        }
        Some(name) => match ctx.registry.get(name) {
            Some(cmd) => writeln!(ctx.out, "Help for '{name}':\n  {}", cmd.help)?,
            None => writeln!(ctx.out, "Unknown command: {name}")?,
        },
    }
    Ok(Flow::Continue)
}

fn cmd_quit(_ctx: &mut Context<'_>, _args: &[&str]) -> Result<Flow, CliError> {
    Ok(Flow::Quit)
}

fn cmd_load(ctx: &mut Context<'_>, args: &[&str]) -> Result<Flow, CliError> {
    let (path, address) = match args {
        [path] => (*path, ctx.settings.load_address),
        [path, addr] => (*path, address_arg(addr)?),
        _ => return Err(CliError::Usage("load <file> [address]")),
    };

    let program = assemble_file(path).map_err(SimError::from)?;
    ctx.machine
        .load_program(&program, address)
        .map_err(SimError::from)?;
    writeln!(
        ctx.out,
        "Program loaded ({} instructions at {address:#010x})",
        program.len()
    )?;
    Ok(Flow::Continue)
}

fn cmd_mem(ctx: &mut Context<'_>, args: &[&str]) -> Result<Flow, CliError> {
    let start = args.first().map_or(Ok(0), |s| address_arg(s))?;
    let words = match args.get(1) {
        Some(s) => {
            let Ok(words) = u32::try_from(count_arg(s)?) else {
                return Err(CliError::InvalidCount((*s).to_owned()));
            };
            words
        }
        None => DEFAULT_DUMP_WORDS,
    };

    for i in 0..words {
        let addr = start.wrapping_add(i.wrapping_mul(4));
        match ctx.machine.memory.read_word(addr) {
            Ok(word) => writeln!(ctx.out, "{addr:#010x}: {word:#010x}  {}", disassemble(word))?,
            Err(e) => writeln!(ctx.out, "{addr:#010x}: ERROR ({e})")?,
        }
    }
    Ok(Flow::Continue)
}

fn cmd_pc(ctx: &mut Context<'_>, _args: &[&str]) -> Result<Flow, CliError> {
    let pc = ctx.machine.cpu.pc;
    writeln!(ctx.out, "PC: {pc} ({pc:#010x})")?;
    Ok(Flow::Continue)
}

fn cmd_peek(ctx: &mut Context<'_>, _args: &[&str]) -> Result<Flow, CliError> {
    let pc = ctx.machine.cpu.pc;
    let word = ctx.machine.peek().map_err(SimError::from)?;
    writeln!(
        ctx.out,
        "Next instruction at {pc:#010x}: {word:#010x}  {}",
        disassemble(word)
    )?;
    Ok(Flow::Continue)
}

fn cmd_step(ctx: &mut Context<'_>, args: &[&str]) -> Result<Flow, CliError> {
    let n = args.first().map_or(Ok(1), |s| count_arg(s))?;
    for step in 1..=n {
        let _ = ctx
            .machine
            .step()
            .map_err(|source| CliError::Step { step, source })?;
    }
    writeln!(ctx.out, "Executed {n} step(s).")?;
    Ok(Flow::Continue)
}

fn cmd_run(ctx: &mut Context<'_>, args: &[&str]) -> Result<Flow, CliError> {
    let max = args
        .first()
        .map_or(Ok(ctx.settings.step_limit), |s| count_arg(s))?;
    let before = ctx.machine.cpu.stats.instructions_retired;
    match ctx.machine.run(max) {
        Ok(retired) => {
            writeln!(ctx.out, "Executed {retired} instruction(s).")?;
            Ok(Flow::Continue)
        }
        Err(source) => {
            let retired = ctx.machine.cpu.stats.instructions_retired - before;
            writeln!(ctx.out, "Executed {retired} instruction(s).")?;
            Err(CliError::Step {
                step: retired + 1,
                source,
            })
        }
    }
}

fn cmd_regs(ctx: &mut Context<'_>, _args: &[&str]) -> Result<Flow, CliError> {
    writeln!(ctx.out, "Registers:")?;
    for (i, val) in ctx.machine.cpu.regs.snapshot().iter().enumerate() {
        let name = format!("x{i}");
        writeln!(
            ctx.out,
            "{name:<3} ({:>4}): {:>11}  {val:#010x}",
            abi_name(i),
            *val as i32
        )?;
    }
    Ok(Flow::Continue)
}

fn cmd_reset(ctx: &mut Context<'_>, _args: &[&str]) -> Result<Flow, CliError> {
    ctx.machine.reset();
    writeln!(ctx.out, "CPU and memory reset.")?;
    Ok(Flow::Continue)
}

fn cmd_stats(ctx: &mut Context<'_>, args: &[&str]) -> Result<Flow, CliError> {
    let stats = &ctx.machine.cpu.stats;
    match args {
        [] => writeln!(ctx.out, "{stats}")?,
        ["--json"] => writeln!(ctx.out, "{}", serde_json::to_string_pretty(stats)?)?,
        _ => return Err(CliError::Usage("stats [--json]")),
    }
    Ok(Flow::Continue)
}
