//! Placeholder resolution against earlier fixture results.
//!
//! - [`path`] - Parse `a.b[0].c` references and walk them through the result store
//! - [`expander`] - Replace `${...}` placeholders inside fixture values
//!
//! # Example
//!
//! ```
//! use fixrun::runner::ResultStore;
//! use fixrun::template::expand;
//! use serde_json::json;
//!
//! let mut store = ResultStore::new();
//! store.insert("xdomain", json!({"domain_id": "abc123"}));
//!
//! let path = expand(&json!("${xdomain.domain_id}/sub"), &store);
//! assert_eq!(path, json!("abc123/sub"));
//! ```

pub mod expander;
pub mod path;

pub use expander::{expand, expand_reporting, expand_str, expand_typed, Unresolved};
pub use path::{lookup, resolve, resolve_scalar, PathSegment, ReferencePath, ResolveError};
