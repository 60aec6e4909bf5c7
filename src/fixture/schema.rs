//! Typed fixture definitions.
//!
//! Fixtures arrive as loose JSON objects. The validator classifies each one
//! exactly once into a [`Fixture`] carrying either a [`RequestFixture`] or an
//! [`AssertionFixture`]; nothing downstream re-inspects the raw keys.

use serde_json::Value;
use std::fmt;

/// A fixture as it appears in the document, before validation.
pub type RawFixture = serde_json::Map<String, Value>;

/// A validated fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    /// Unique name; results are stored under it.
    pub name: String,
    /// What the fixture does.
    pub kind: FixtureKind,
}

impl Fixture {
    /// Build a request fixture.
    pub fn request(name: impl Into<String>, request: RequestFixture) -> Self {
        Self {
            name: name.into(),
            kind: FixtureKind::Request(request),
        }
    }

    /// Build an assertion fixture.
    pub fn assertion(name: impl Into<String>, assertion_eq: Value) -> Self {
        Self {
            name: name.into(),
            kind: FixtureKind::Assertion(AssertionFixture { assertion_eq }),
        }
    }

    /// Whether this fixture is an equality assertion.
    pub fn is_assertion(&self) -> bool {
        matches!(self.kind, FixtureKind::Assertion(_))
    }
}

/// The two kinds of fixture.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureKind {
    /// An HTTP call.
    Request(RequestFixture),
    /// An equality check between two resolved values.
    Assertion(AssertionFixture),
}

/// An HTTP call description.
///
/// String fields may contain `${...}` placeholders; they are expanded just
/// before the fixture runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFixture {
    /// HTTP method as written (`get`, `post`, `delete`, any case).
    pub method: String,
    /// Path appended to the base endpoint.
    pub path: String,
    /// Query string appended after `?`.
    pub query: Option<String>,
    /// JSON body for POST.
    pub data: Option<Value>,
    /// Use the unversioned raw endpoint.
    pub raw: bool,
    /// Which credential family to use.
    pub token_type: Option<TokenType>,
    /// Explicit bearer token.
    pub override_token: Option<String>,
    /// Use the alternate credential.
    pub alt: bool,
    /// Keep the result out of the output document.
    pub silent: bool,
}

/// An equality assertion.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionFixture {
    /// Expected to hold exactly two values once expanded.
    pub assertion_eq: Value,
}

/// Credential family selected by `token_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// A login-flow token.
    Login,
    /// No Authorization header.
    None,
}

impl TokenType {
    /// Parse the document spelling.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "login" => Some(TokenType::Login),
            "none" => Some(TokenType::None),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenType::Login => "login",
            TokenType::None => "none",
        };
        write!(f, "{}", s)
    }
}

/// Supported HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    /// Parse a method name, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "get" => Some(Method::Get),
            "post" => Some(Method::Post),
            "delete" => Some(Method::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Delete => "delete",
        };
        write!(f, "{}", s)
    }
}
