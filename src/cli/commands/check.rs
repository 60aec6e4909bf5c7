//! `fixrun check` - validate a fixture document offline.

use crate::cli::args::CheckArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::error::Result;
use crate::fixture::document::{load_document, DocumentSource};
use crate::fixture::validator::validate;

/// Parses and validates a document without sending any request.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }
}

impl Command for CheckCommand {
    fn execute(&self) -> Result<CommandResult> {
        let source = DocumentSource::from_option(self.args.file.as_deref());
        let document = load_document(&source)?;
        let fixtures = validate(&document.fixtures)?;

        let assertions = fixtures.iter().filter(|f| f.is_assertion()).count();
        println!(
            "{}: {} fixtures OK ({} requests, {} assertions)",
            source,
            fixtures.len(),
            fixtures.len() - assertions,
            assertions
        );

        Ok(CommandResult::success())
    }
}
