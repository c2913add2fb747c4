//! textstat CLI library
//!
//! Command definitions, configuration file handling, report formatting and
//! progress display for the `textstat` binary.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
