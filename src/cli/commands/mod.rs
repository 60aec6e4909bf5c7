//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod check;
pub mod dispatcher;
pub mod generate;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
