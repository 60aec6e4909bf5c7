//! Error types for fixture runs.
//!
//! This module defines [`FixrunError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every `FixrunError` aborts the run and maps to exit code 1
//! - Per-fixture problems (HTTP error statuses, unparseable bodies, unresolved
//!   placeholders) are not errors: they are logged and recorded in the stores
//! - Use `anyhow::Error` (via `FixrunError::Other`) for unexpected I/O context

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fixture runs.
#[derive(Debug, Error)]
pub enum FixrunError {
    /// Two fixtures share the same name.
    #[error("Duplicate name in fixture array: {name}")]
    DuplicateName { name: String },

    /// A fixture lacks a field its kind requires.
    #[error("Field '{field}' not in fixture '{fixture}'")]
    MissingField { field: String, fixture: String },

    /// A fixture field has the wrong JSON type or an unsupported value.
    #[error("Field '{field}' in fixture '{fixture}' {message}")]
    InvalidField {
        field: String,
        fixture: String,
        message: String,
    },

    /// `assertion_eq` did not resolve to exactly two values.
    #[error("2 items expected for assertion_eq in fixture '{fixture}', got {found}")]
    AssertionShape { fixture: String, found: String },

    /// The two resolved `assertion_eq` values differ.
    #[error("Failed assertion '{fixture}': {left} != {right}")]
    AssertionFailed {
        fixture: String,
        left: String,
        right: String,
    },

    /// The fixture's method is not one of get, post, delete.
    #[error("Unknown method {method} in fixture {fixture}")]
    UnknownMethod { method: String, fixture: String },

    /// A placeholder could not be resolved while references are strict.
    #[error("Unresolved reference in fixture '{fixture}': {message}")]
    UnresolvedReference { fixture: String, message: String },

    /// A credential is not configured where it is needed.
    #[error("Missing credential {name}: {reason}")]
    MissingCredential { name: String, reason: String },

    /// The selected environment has no endpoint profile.
    #[error("Unknown environment '{name}' (expected one of: {known})")]
    UnknownEnvironment { name: String, known: String },

    /// The fixture document is not valid JSON or has the wrong top-level shape.
    #[error("Failed to parse fixture document {source_name}: {message}")]
    DocumentParse {
        source_name: String,
        message: String,
    },

    /// The fixture document file could not be found.
    #[error("Fixture document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    /// The HTTP call failed below the status-code level.
    #[error("Request for fixture '{fixture}' failed: {message}")]
    Transport { fixture: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FixrunError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type alias for fixture runs.
pub type Result<T> = std::result::Result<T, FixrunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_displays_name() {
        let err = FixrunError::DuplicateName { name: "x".into() };
        assert_eq!(err.to_string(), "Duplicate name in fixture array: x");
    }

    #[test]
    fn missing_field_displays_field_and_fixture() {
        let err = FixrunError::MissingField {
            field: "data".into(),
            fixture: "create-room".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'data'"));
        assert!(msg.contains("'create-room'"));
    }

    #[test]
    fn assertion_failed_displays_both_sides() {
        let err = FixrunError::AssertionFailed {
            fixture: "same-room".into(),
            left: "\"r1\"".into(),
            right: "\"r2\"".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("same-room"));
        assert!(msg.contains("\"r1\""));
        assert!(msg.contains("\"r2\""));
    }

    #[test]
    fn unknown_method_displays_method() {
        let err = FixrunError::UnknownMethod {
            method: "patch".into(),
            fixture: "update".into(),
        };
        assert!(err.to_string().contains("patch"));
    }

    #[test]
    fn transport_error_displays_message() {
        let err = FixrunError::Transport {
            fixture: "rooms".into(),
            message: "connection refused".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("rooms"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn every_error_exits_with_one() {
        let err = FixrunError::DocumentParse {
            source_name: "<stdin>".into(),
            message: "EOF".into(),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FixrunError = io_err.into();
        assert!(matches!(err, FixrunError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(FixrunError::DuplicateName { name: "a".into() })
        }
        assert!(returns_error().is_err());
    }
}
