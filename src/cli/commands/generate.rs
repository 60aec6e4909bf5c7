//! `fixrun generate` - build a fixture document from endpoint paths.

use crate::cli::args::GenerateArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::error::Result;
use crate::fixture::generator::generate;
use anyhow::Context;
use std::io::Read;

/// Reads endpoint paths on stdin and prints a fixture document.
pub struct GenerateCommand {
    args: GenerateArgs,
}

impl GenerateCommand {
    pub fn new(args: GenerateArgs) -> Self {
        Self { args }
    }
}

impl Command for GenerateCommand {
    fn execute(&self) -> Result<CommandResult> {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;

        let generated = generate(input.lines());
        for skipped in &generated.skipped {
            eprintln!("{}", skipped);
        }

        let text = serde_json::to_string_pretty(&generated.document)
            .context("Failed to serialize generated document")?;

        match &self.args.output_file {
            Some(path) => std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => println!("{}", text),
        }

        Ok(CommandResult::success())
    }
}
