//! `fixrun run` - execute a fixture document.

use crate::cli::args::RunArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::config::environment::{
    load_system_env, profile, CredentialSet, EndpointOverrides, Endpoints,
};
use crate::error::Result;
use crate::fixture::document::{load_document, DocumentSource};
use crate::output::{save_output, OutputTarget};
use crate::runner::{ExecutionOptions, FixtureRunner, ReferencePolicy, ReqwestTransport};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Loads a document, runs it against one environment, and saves the output.
pub struct RunCommand {
    args: RunArgs,
    env: HashMap<String, String>,
}

impl RunCommand {
    /// Create a run command reading credentials from the process environment.
    pub fn new(args: RunArgs) -> Self {
        Self::with_env(args, load_system_env())
    }

    /// Create a run command with an explicit variable map.
    pub fn with_env(args: RunArgs, env: HashMap<String, String>) -> Self {
        Self { args, env }
    }

    /// Credentials for the selected environment with overrides applied.
    pub fn credentials(&self) -> Result<CredentialSet> {
        let profile = profile(&self.args.environment)?;
        let overrides = EndpointOverrides {
            base_url: self.args.base_url.clone(),
            raw_base_url: self.args.raw_base_url.clone(),
            api_path: self.args.api_path.clone(),
        };
        let endpoints = Endpoints::from_profile(profile).with_overrides(&overrides);

        Ok(CredentialSet::from_env(profile, &self.env)?.with_endpoints(endpoints))
    }

    /// Execution options from the command-line flags.
    pub fn options(&self) -> ExecutionOptions {
        ExecutionOptions {
            reference_policy: if self.args.strict_references {
                ReferencePolicy::Abort
            } else {
                ReferencePolicy::Continue
            },
            retries: self.args.retries,
            ..Default::default()
        }
    }
}

impl Command for RunCommand {
    fn execute(&self) -> Result<CommandResult> {
        let credentials = self.credentials()?;
        debug!(
            "Running against '{}' at {}",
            self.args.environment, credentials.endpoints.base_url
        );

        let document = load_document(&DocumentSource::from_option(self.args.file.as_deref()))?;

        let transport = ReqwestTransport::new(self.args.timeout.map(Duration::from_secs))?;
        let runner = FixtureRunner::new(credentials, Box::new(transport), self.options());
        let report = runner.run(&document)?;

        save_output(
            &report.output,
            &OutputTarget::from_option(self.args.output_file.as_deref()),
        )?;

        Ok(CommandResult::success())
    }
}
