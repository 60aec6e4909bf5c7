//! Fixture validation rules.
//!
//! Runs once over the whole document before any request is made, stopping at
//! the first problem in document order:
//! - Every fixture needs a string `name`, unique across the document
//! - Fixtures with `assertion_eq` are assertions and skip request checks
//! - Requests need `method` and `path`
//! - `post` requests need `data`
//! - Optional request fields must have the right JSON type

use crate::error::{FixrunError, Result};
use crate::fixture::schema::{Fixture, RawFixture, RequestFixture, TokenType};
use serde_json::Value;
use std::collections::HashSet;

/// Validate raw fixtures and classify each into its kind.
///
/// # Errors
///
/// Returns the first `DuplicateName`, `MissingField` or `InvalidField` found.
pub fn validate(fixtures: &[RawFixture]) -> Result<Vec<Fixture>> {
    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(fixtures.len());

    for (position, raw) in fixtures.iter().enumerate() {
        let name = fixture_name(raw, position)?;

        if !seen.insert(name.clone()) {
            return Err(FixrunError::DuplicateName { name });
        }

        let fixture = match raw.get("assertion_eq") {
            Some(assertion_eq) => Fixture::assertion(name, assertion_eq.clone()),
            None => {
                let request = request_fixture(raw, &name)?;
                Fixture::request(name, request)
            }
        };

        validated.push(fixture);
    }

    Ok(validated)
}

fn fixture_name(raw: &RawFixture, position: usize) -> Result<String> {
    match raw.get("name") {
        Some(Value::String(name)) => Ok(name.clone()),
        Some(_) => Err(FixrunError::InvalidField {
            field: "name".to_string(),
            fixture: format!("#{}", position),
            message: "must be a string".to_string(),
        }),
        None => Err(FixrunError::MissingField {
            field: "name".to_string(),
            fixture: format!("#{}", position),
        }),
    }
}

fn request_fixture(raw: &RawFixture, name: &str) -> Result<RequestFixture> {
    let method = required_string(raw, "method", name)?;
    let path = required_string(raw, "path", name)?;

    let data = raw.get("data").cloned();
    if method.eq_ignore_ascii_case("post") && data.is_none() {
        return Err(missing("data", name));
    }

    let token_type = match optional_string(raw, "token_type", name)? {
        Some(t) => Some(TokenType::parse(&t).ok_or_else(|| FixrunError::InvalidField {
            field: "token_type".to_string(),
            fixture: name.to_string(),
            message: format!("must be 'login' or 'none', got '{}'", t),
        })?),
        None => None,
    };

    Ok(RequestFixture {
        method,
        path,
        query: optional_string(raw, "query", name)?,
        data,
        raw: flag(raw, "raw", name)?,
        token_type,
        override_token: optional_string(raw, "override_token", name)?,
        alt: flag(raw, "alt", name)?,
        silent: flag(raw, "silent", name)?,
    })
}

fn missing(field: &str, fixture: &str) -> FixrunError {
    FixrunError::MissingField {
        field: field.to_string(),
        fixture: fixture.to_string(),
    }
}

fn wrong_type(field: &str, fixture: &str, expected: &str) -> FixrunError {
    FixrunError::InvalidField {
        field: field.to_string(),
        fixture: fixture.to_string(),
        message: format!("must be a {}", expected),
    }
}

fn required_string(raw: &RawFixture, field: &str, fixture: &str) -> Result<String> {
    optional_string(raw, field, fixture)?.ok_or_else(|| missing(field, fixture))
}

fn optional_string(raw: &RawFixture, field: &str, fixture: &str) -> Result<Option<String>> {
    match raw.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(wrong_type(field, fixture, "string")),
    }
}

/// Optional boolean flag; `null` counts as unset.
fn flag(raw: &RawFixture, field: &str, fixture: &str) -> Result<bool> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(wrong_type(field, fixture, "boolean")),
    }
}
