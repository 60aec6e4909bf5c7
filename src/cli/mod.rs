//! Command-line interface for fixrun.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, GenerateArgs, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
