//! RV32 simulator CLI.
//!
//! This binary is the interactive front end for the simulator core. It performs:
//! 1. **Configuration:** Loads an optional JSON config and applies command-line overrides.
//! 2. **Logging:** Installs a `tracing` subscriber (`RUST_LOG`, or `--trace` for per-instruction events).
//! 3. **Preload:** Assembles and loads an optional program before the prompt appears.
//! 4. **REPL:** Runs the command loop on stdin/stdout.

mod commands;
mod repl;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rv32sim_core::common::error::SimError;
use rv32sim_core::{Config, Machine, assemble_file};

use crate::commands::{CliError, CommandRegistry, Settings, parse_address};
use crate::repl::Repl;

#[derive(Parser, Debug)]
#[command(
    name = "rv32sim",
    author,
    version,
    about = "RV32I subset simulator with a two-pass assembler",
    long_about = "Interactive simulator for a small RV32I subset.\n\nExamples:\n  rv32sim demos/add.asm\n  rv32sim --memory-size 4096 --load-address 0x100 demos/max.asm\n  RUST_LOG=debug rv32sim --config sim.json"
)]
struct Cli {
    /// Assembly source to load before the REPL starts.
    program: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Memory size in bytes (overrides the config).
    #[arg(long)]
    memory_size: Option<usize>,

    /// Load address and initial PC, decimal or 0x hex (overrides the config).
    #[arg(long, value_parser = parse_load_address)]
    load_address: Option<u32>,

    /// Log every executed instruction to stderr.
    #[arg(long)]
    trace: bool,
}

fn parse_load_address(text: &str) -> Result<u32, String> {
    parse_address(text).ok_or_else(|| format!("invalid address: {text:?}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).map_err(SimError::from)?,
        None => Config::default(),
    };
    if let Some(size) = cli.memory_size {
        config.memory.size = size;
    }
    if let Some(addr) = cli.load_address {
        config.general.start_pc = addr;
    }
    init_tracing(cli.trace || config.general.trace_instructions);

    let mut machine = Machine::from_config(&config);
    if let Some(path) = &cli.program {
        let program = assemble_file(path).map_err(SimError::from)?;
        machine
            .load_program(&program, config.general.start_pc)
            .map_err(SimError::from)?;
        tracing::info!(path = %path.display(), instructions = program.len(), "program preloaded");
    }

    let registry = CommandRegistry::with_defaults();
    let settings = Settings {
        load_address: config.general.start_pc,
        step_limit: config.general.step_limit,
    };
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut repl = Repl::new(&mut machine, &registry, settings);
    repl.run(stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Installs the global subscriber, writing to stderr so REPL output stays clean.
fn init_tracing(trace_instructions: bool) {
    let filter = if trace_instructions {
        EnvFilter::new("rv32sim_core=trace,rv32sim=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
