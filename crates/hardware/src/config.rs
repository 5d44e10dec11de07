//! Configuration system for the simulator.
//!
//! This module defines the configuration used to build a [`Machine`](crate::sim::Machine). It provides:
//! 1. **Defaults:** Baseline memory size, start address and step budget.
//! 2. **Structures:** `general` and `memory` sections, each fully defaulted.
//! 3. **Loading:** JSON from a string or a file.
//!
//! An empty JSON object `{}` is a valid configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration constants.
mod defaults {
    use crate::common::constants::{DEFAULT_LOAD_ADDRESS, DEFAULT_MEMORY_SIZE};

    /// Main memory size in bytes (64 KiB).
    pub const MEMORY_SIZE: usize = DEFAULT_MEMORY_SIZE;

    /// Address programs are loaded at and execution starts from.
    pub const START_PC: u32 = DEFAULT_LOAD_ADDRESS;

    /// Maximum instructions executed by a single `run` before control returns.
    pub const STEP_LIMIT: u64 = 10_000;
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The JSON was malformed or had fields of the wrong type.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Root configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Execution settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Io`] if the file cannot be read.
    /// * [`ConfigError::Parse`] if its contents are not a valid configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General execution settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Emit a trace event for every executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial PC and default program load address.
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Default instruction budget for `run`.
    #[serde(default = "GeneralConfig::default_step_limit")]
    pub step_limit: u64,
}

impl GeneralConfig {
    const fn default_start_pc() -> u32 {
        defaults::START_PC
    }

    const fn default_step_limit() -> u64 {
        defaults::STEP_LIMIT
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: Self::default_start_pc(),
            step_limit: Self::default_step_limit(),
        }
    }
}

/// Main memory settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Memory size in bytes.
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,
}

impl MemoryConfig {
    const fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
        }
    }
}
