//! # Unit Components
//!
//! Organizes the unit tests by subsystem: the instruction set, the core,
//! memory, the assembler, the machine driver, configuration and statistics.







/// Unit tests for execution statistics.
pub mod stats;
