//! fixrun CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use console::style;
use fixrun::cli::{Cli, CommandDispatcher};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so the output document can be piped from stdout.
/// Log level is controlled by:
/// 1. `--verbose` or `--debug` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fixrun=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fixrun=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose || cli.debug);

    tracing::debug!("fixrun starting with args: {:?}", cli);

    let dispatcher = CommandDispatcher::new();

    match dispatcher.dispatch(&cli) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            eprintln!("{}", style(format!("ERROR: {}", e)).red());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
