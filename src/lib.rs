//! fixrun - Declarative HTTP API fixture runner.
//!
//! A fixture document lists HTTP calls and equality assertions. Fixtures run
//! strictly in order; string fields may reference earlier responses with
//! `${name.path[0].field}` placeholders. The responses are collected into an
//! output document keyed by fixture name.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Environments, endpoints and credentials
//! - [`error`] - Error types and result aliases
//! - [`fixture`] - Fixture document loading, validation and generation
//! - [`output`] - Writing the output document
//! - [`runner`] - Fixture execution and run orchestration
//! - [`template`] - Placeholder path resolution and expansion
//!
//! # Example
//!
//! ```
//! use fixrun::runner::ResultStore;
//! use fixrun::template::expand;
//! use serde_json::json;
//!
//! let mut store = ResultStore::new();
//! store.insert("xrooms", json!([{"id": "r1"}, {"id": "r2"}]));
//!
//! let path = expand(&json!("rooms/${xrooms[1].id}"), &store);
//! assert_eq!(path, json!("rooms/r2"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fixture;
pub mod output;
pub mod runner;
pub mod template;

pub use error::{FixrunError, Result};
