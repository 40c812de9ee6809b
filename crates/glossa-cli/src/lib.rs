//! Glossa CLI library
//!
//! Argument definitions and command implementations behind the `glossa` binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, CommandContext, OutputFormat};
pub use error::CliError;
