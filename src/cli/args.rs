//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fixrun - Run declarative HTTP API fixtures against an environment.
#[derive(Debug, Parser)]
#[command(name = "fixrun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Echo every request, status code and resolution diagnostic
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a fixture document against an environment
    Run(RunArgs),

    /// Validate a fixture document without sending requests
    Check(CheckArgs),

    /// Generate a fixture document from endpoint paths on stdin
    Generate(GenerateArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Environment to run against (local, staging, blue, prod)
    pub environment: String,

    /// Fixture file (reads stdin if omitted)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output file (writes stdout if omitted)
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Abort when a placeholder cannot be resolved
    #[arg(long)]
    pub strict_references: bool,

    /// Retries after a network failure
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Request timeout in seconds (no timeout if omitted)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override the environment's versioned base URL
    #[arg(long, value_name = "URL", env = "FIXRUN_BASE_URL")]
    pub base_url: Option<String>,

    /// Override the environment's raw base URL
    #[arg(long, value_name = "URL", env = "FIXRUN_RAW_BASE_URL")]
    pub raw_base_url: Option<String>,

    /// Override the API version path segment
    #[arg(long, value_name = "SEGMENT")]
    pub api_path: Option<String>,
}

impl RunArgs {
    /// Arguments for `environment` with every option at its default.
    pub fn for_environment(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            file: None,
            output_file: None,
            strict_references: false,
            retries: 0,
            timeout: None,
            base_url: None,
            raw_base_url: None,
            api_path: None,
        }
    }
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Fixture file (reads stdin if omitted)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Arguments for the `generate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GenerateArgs {
    /// Output file (writes stdout if omitted)
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,
}
