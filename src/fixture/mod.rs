//! Fixture documents: loading, typed definitions, validation, generation.
//!
//! - [`document`] - Read `{"fixtures": [...]}` from a file or stdin
//! - [`schema`] - Typed request and assertion fixtures
//! - [`validator`] - Structural checks run before any request
//! - [`generator`] - Build a document from a list of endpoint paths
//!
//! # Example
//!
//! ```
//! use fixrun::fixture::{parse_document, validate};
//!
//! let doc = parse_document(
//!     r#"{"fixtures": [{"name": "a", "method": "get", "path": "widgets"}]}"#,
//!     "inline",
//! ).unwrap();
//! let fixtures = validate(&doc.fixtures).unwrap();
//! assert_eq!(fixtures[0].name, "a");
//! ```

pub mod document;
pub mod generator;
pub mod schema;
pub mod validator;

pub use document::{load_document, parse_document, DocumentSource, FixtureDocument};
pub use generator::{generate, Generated, Skipped};
pub use schema::{
    AssertionFixture, Fixture, FixtureKind, Method, RawFixture, RequestFixture, TokenType,
};
pub use validator::validate;
