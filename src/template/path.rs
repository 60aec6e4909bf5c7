//! Placeholder reference paths.
//!
//! A reference such as `xrooms[0].id` is parsed into typed [`PathSegment`]s
//! and then walked against the [`ResultStore`]. The first segment always names
//! a fixture; later segments key into objects, and a trailing `[n]` on any
//! segment indexes into the array found under that key.

use crate::runner::store::ResultStore;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// One dot-separated piece of a reference path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// Object key to look up.
    pub key: String,
    /// Optional array index applied after the key lookup.
    pub index: Option<usize>,
}

impl PathSegment {
    /// Parse a single segment, splitting off a trailing `[<digits>]` index.
    ///
    /// Anything that is not exactly `name[digits]` is treated as a plain key.
    pub fn parse(raw: &str) -> Self {
        if let Some(body) = raw.strip_suffix(']') {
            if let Some(open) = body.rfind('[') {
                let digits = &body[open + 1..];
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(index) = digits.parse() {
                        return Self {
                            key: body[..open].to_string(),
                            index: Some(index),
                        };
                    }
                }
            }
        }

        Self {
            key: raw.to_string(),
            index: None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.key, index),
            None => write!(f, "{}", self.key),
        }
    }
}

/// A parsed reference path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePath {
    segments: Vec<PathSegment>,
}

impl ReferencePath {
    /// Parse a dotted reference path.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(PathSegment::parse).collect(),
        }
    }

    /// The parsed segments, in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for ReferencePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Why a placeholder reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The first segment names no fixture result.
    #[error("'{name}' is not a stored fixture result")]
    UnknownFixture { name: String },

    /// A key is missing from the current object.
    #[error("'{key}' not found in {context}")]
    MissingKey { key: String, context: String },

    /// An index was applied to something that is not an array.
    #[error("'{key}' is not an array and cannot be indexed")]
    NotIndexable { key: String },

    /// An index is past the end of the array.
    #[error("index {index} out of range for '{key}' (length {len})")]
    IndexOutOfRange { key: String, index: usize, len: usize },

    /// The path ended on something other than a string or integer.
    #[error("'{path}' does not resolve to a string or integer")]
    NotScalar { path: String },
}

/// Walk `path` through `store` and return the referenced value as text.
///
/// Only strings and integers can be embedded; anything else is a
/// [`ResolveError::NotScalar`].
pub fn resolve(path: &ReferencePath, store: &ResultStore) -> Result<String, ResolveError> {
    match resolve_scalar(path, store)? {
        Value::String(s) => Ok(s.clone()),
        other => Ok(other.to_string()),
    }
}

/// Walk `path` through `store` and return the referenced string or integer
/// with its JSON type intact.
pub fn resolve_scalar<'a>(
    path: &ReferencePath,
    store: &'a ResultStore,
) -> Result<&'a Value, ResolveError> {
    let value = lookup(path, store)?;

    match value {
        Value::String(_) => Ok(value),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value),
        _ => Err(ResolveError::NotScalar {
            path: path.to_string(),
        }),
    }
}

/// Walk `path` through `store` and return the value it points at, whatever
/// its type.
pub fn lookup<'a>(path: &ReferencePath, store: &'a ResultStore) -> Result<&'a Value, ResolveError> {
    let mut segments = path.segments().iter();

    let first = match segments.next() {
        Some(first) => first,
        None => {
            return Err(ResolveError::UnknownFixture {
                name: String::new(),
            })
        }
    };

    let root = store
        .get(&first.key)
        .ok_or_else(|| ResolveError::UnknownFixture {
            name: first.key.clone(),
        })?;
    let mut cursor = apply_index(root, first)?;

    for segment in segments {
        let next = cursor
            .as_object()
            .and_then(|obj| obj.get(&segment.key))
            .ok_or_else(|| ResolveError::MissingKey {
                key: segment.key.clone(),
                context: preview(cursor),
            })?;
        cursor = apply_index(next, segment)?;
    }

    Ok(cursor)
}

fn apply_index<'a>(value: &'a Value, segment: &PathSegment) -> Result<&'a Value, ResolveError> {
    let Some(index) = segment.index else {
        return Ok(value);
    };

    let items = value.as_array().ok_or_else(|| ResolveError::NotIndexable {
        key: segment.key.clone(),
    })?;

    items.get(index).ok_or(ResolveError::IndexOutOfRange {
        key: segment.key.clone(),
        index,
        len: items.len(),
    })
}

/// Short rendering of a value for diagnostics.
fn preview(value: &Value) -> String {
    let rendered = value.to_string();
    match rendered.char_indices().nth(20) {
        Some((cut, _)) => format!("{}...", &rendered[..cut]),
        None => rendered,
    }
}
