//! `${...}` placeholder expansion over fixture values.
//!
//! Strings are scanned left to right for non-overlapping `${path}`
//! occurrences. Each one that resolves replaces the first placeholder still
//! left in the partially substituted string, so an unresolved placeholder
//! earlier in the string takes the value of a later one. Objects are
//! expanded key by key. Arrays are passed through untouched, so
//! placeholders inside an array element stay literal unless the caller
//! expands the elements itself (as assertions do).

use crate::runner::store::ResultStore;
use crate::template::path::{resolve, resolve_scalar, ReferencePath, ResolveError};
use regex::{NoExpand, Regex};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::info;

/// Matches one `${...}` placeholder with a non-greedy interior.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(.*?)\}").expect("PLACEHOLDER_REGEX must compile")
});

/// A placeholder that was left in place because it could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    /// The literal placeholder text, e.g. `${xrooms[0].id}`.
    pub placeholder: String,
    /// Why resolution failed.
    pub error: ResolveError,
}

impl std::fmt::Display for Unresolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.placeholder, self.error)
    }
}

/// Expand every placeholder in `value` against `store`.
///
/// Unresolvable placeholders are logged and left literally in the output.
pub fn expand(value: &Value, store: &ResultStore) -> Value {
    let mut unresolved = Vec::new();
    expand_reporting(value, store, &mut unresolved)
}

/// Like [`expand`], but also collects the placeholders that stayed unresolved.
pub fn expand_reporting(
    value: &Value,
    store: &ResultStore,
    unresolved: &mut Vec<Unresolved>,
) -> Value {
    match value {
        Value::Object(map) => {
            let expanded: Map<String, Value> = map
                .iter()
                .map(|(key, inner)| (key.clone(), expand_reporting(inner, store, unresolved)))
                .collect();
            Value::Object(expanded)
        }
        Value::String(s) => Value::String(expand_str(s, store, unresolved)),
        Value::Array(_) | Value::Number(_) | Value::Bool(_) | Value::Null => value.clone(),
    }
}

/// Expand the placeholders in a single string.
pub fn expand_str(input: &str, store: &ResultStore, unresolved: &mut Vec<Unresolved>) -> String {
    let mut output = input.to_string();

    for caps in PLACEHOLDER_REGEX.captures_iter(input) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let path = ReferencePath::parse(inner.as_str());
        match resolve(&path, store) {
            Ok(text) => {
                output = PLACEHOLDER_REGEX
                    .replacen(&output, 1, NoExpand(text.as_str()))
                    .into_owned();
            }
            Err(error) => {
                info!("{} not resolved: {}", whole.as_str(), error);
                unresolved.push(Unresolved {
                    placeholder: whole.as_str().to_string(),
                    error,
                });
            }
        }
    }

    output
}

/// Expand a value, keeping the JSON type of a lone placeholder.
///
/// A string that is exactly one `${path}` becomes the string or integer the
/// path points at. Anything else expands as [`expand_reporting`] does.
pub fn expand_typed(
    value: &Value,
    store: &ResultStore,
    unresolved: &mut Vec<Unresolved>,
) -> Value {
    let Value::String(s) = value else {
        return expand_reporting(value, store, unresolved);
    };

    let lone = PLACEHOLDER_REGEX
        .captures(s)
        .filter(|caps| caps.get(0).is_some_and(|m| m.range() == (0..s.len())));
    let Some(inner) = lone.as_ref().and_then(|caps| caps.get(1)) else {
        return expand_reporting(value, store, unresolved);
    };

    match resolve_scalar(&ReferencePath::parse(inner.as_str()), store) {
        Ok(resolved) => resolved.clone(),
        Err(error) => {
            info!("{} not resolved: {}", s, error);
            unresolved.push(Unresolved {
                placeholder: s.clone(),
                error,
            });
            value.clone()
        }
    }
}
