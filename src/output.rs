//! Writing the output document.

use crate::error::Result;
use crate::runner::store::OutputDocument;
use anyhow::Context;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the output document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A file, overwritten if it exists.
    File(PathBuf),
    /// Standard output.
    Stdout,
}

impl OutputTarget {
    /// Use `path` when given and non-empty, standard output otherwise.
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => OutputTarget::File(path.to_path_buf()),
            _ => OutputTarget::Stdout,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::File(path) => write!(f, "{}", path.display()),
            OutputTarget::Stdout => write!(f, "<stdout>"),
        }
    }
}

/// Write `output` pretty-printed to `target`.
pub fn save_output(output: &OutputDocument, target: &OutputTarget) -> Result<()> {
    info!("Saving results {}", target);
    let text = output.to_pretty_string();

    match target {
        OutputTarget::File(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
        }
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text)?;
        }
    }

    Ok(())
}
