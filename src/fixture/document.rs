//! Fixture document loading.
//!
//! A document is `{"properties"?: {...}, "fixtures": [...]}`, read either from
//! a file or from standard input.

use crate::error::{FixrunError, Result};
use crate::fixture::schema::RawFixture;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A parsed, not yet validated, fixture document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureDocument {
    /// Free-form run properties.
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,

    /// Fixtures in execution order.
    pub fixtures: Vec<RawFixture>,
}

/// Where a fixture document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// Standard input.
    Stdin,
}

impl DocumentSource {
    /// Use `path` when given, standard input otherwise.
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) => DocumentSource::File(path.to_path_buf()),
            None => DocumentSource::Stdin,
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Read and parse a fixture document.
///
/// # Errors
///
/// Returns `DocumentNotFound` for a missing file and `DocumentParse` for
/// malformed JSON or a missing `fixtures` array.
pub fn load_document(source: &DocumentSource) -> Result<FixtureDocument> {
    let text = match source {
        DocumentSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FixrunError::DocumentNotFound { path: path.clone() }
            } else {
                FixrunError::Io(e)
            }
        })?,
        DocumentSource::Stdin => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    parse_document(&text, &source.to_string())
}

/// Parse a fixture document from JSON text.
pub fn parse_document(text: &str, source_name: &str) -> Result<FixtureDocument> {
    serde_json::from_str(text).map_err(|e| FixrunError::DocumentParse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}
