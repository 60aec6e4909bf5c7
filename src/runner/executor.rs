//! Single-fixture execution.
//!
//! A fixture is expanded against the result store, then either checked as an
//! assertion or turned into one HTTP call. The returned [`Outcome`] says what
//! the orchestrator should record; nothing here mutates run state.

use crate::config::environment::{CredentialSet, LOGIN_TOKEN_ALT_VAR, LOGIN_TOKEN_VAR};
use crate::error::{FixrunError, Result};
use crate::fixture::schema::{AssertionFixture, Fixture, FixtureKind, Method, RequestFixture, TokenType};
use crate::runner::store::ResultStore;
use crate::runner::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::template::{expand_reporting, expand_str, expand_typed, Unresolved};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

/// What to do when a placeholder cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Log it, leave the placeholder text in place, and run the fixture.
    #[default]
    Continue,
    /// Abort the run before the fixture executes.
    Abort,
}

/// Per-run execution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Handling of unresolved placeholders.
    pub reference_policy: ReferencePolicy,
    /// Extra attempts after a transport failure.
    pub retries: u32,
    /// Base delay between attempts; attempt `n` waits `n * retry_delay`.
    pub retry_delay: Duration,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            reference_policy: ReferencePolicy::Continue,
            retries: 0,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Result of executing one fixture.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Both assertion values were equal.
    AssertionPassed,
    /// 200 response with a JSON body.
    Success { status: u16, body: Value },
    /// 200 response whose body is not JSON.
    Unparseable { status: u16, message: String },
    /// Any status other than 200.
    ErrorStatus { status: u16, text: String },
}

/// Expand and run one fixture.
///
/// # Errors
///
/// Fatal conditions only: assertion shape or mismatch, unknown method,
/// missing credential, exhausted transport retries, and unresolved
/// placeholders under [`ReferencePolicy::Abort`].
pub fn execute(
    fixture: &Fixture,
    store: &ResultStore,
    credentials: &CredentialSet,
    transport: &dyn HttpTransport,
    options: &ExecutionOptions,
) -> Result<Outcome> {
    match &fixture.kind {
        FixtureKind::Assertion(assertion) => {
            check_assertion(&fixture.name, assertion, store, options)?;
            Ok(Outcome::AssertionPassed)
        }
        FixtureKind::Request(request) => {
            let mut unresolved = Vec::new();
            let request = expand_request(request, store, &mut unresolved);
            enforce_policy(&fixture.name, &unresolved, options)?;

            let http = build_request(&fixture.name, &request, credentials)?;
            let response = send_with_retry(&fixture.name, &http, transport, options)?;
            Ok(interpret(response))
        }
    }
}

/// Expand every string field of a request and its `data` body.
pub fn expand_request(
    request: &RequestFixture,
    store: &ResultStore,
    unresolved: &mut Vec<Unresolved>,
) -> RequestFixture {
    let mut expand = |s: &str| expand_str(s, store, unresolved);

    let method = expand(request.method.as_str());
    let path = expand(request.path.as_str());
    let query = request.query.as_deref().map(&mut expand);
    let override_token = request.override_token.as_deref().map(&mut expand);
    let data = request
        .data
        .as_ref()
        .map(|data| expand_reporting(data, store, unresolved));

    RequestFixture {
        method,
        path,
        query,
        data,
        override_token,
        ..request.clone()
    }
}

fn enforce_policy(fixture: &str, unresolved: &[Unresolved], options: &ExecutionOptions) -> Result<()> {
    if unresolved.is_empty() || options.reference_policy == ReferencePolicy::Continue {
        return Ok(());
    }

    let message = unresolved
        .iter()
        .map(|u| u.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    Err(FixrunError::UnresolvedReference {
        fixture: fixture.to_string(),
        message,
    })
}

/// Expand both sides of an `assertion_eq` and compare them.
///
/// Values compare as JSON: `"5"` and `5` differ. A member that is exactly one
/// placeholder takes the type of the value it points at, so `"${a.n}"` with
/// `a.n` the integer 5 equals `5` but not `"5"`.
pub fn check_assertion(
    fixture: &str,
    assertion: &AssertionFixture,
    store: &ResultStore,
    options: &ExecutionOptions,
) -> Result<()> {
    info!("Checking assertion: {}", fixture);

    let items = match &assertion.assertion_eq {
        Value::Array(items) if items.len() == 2 => items,
        other => {
            return Err(FixrunError::AssertionShape {
                fixture: fixture.to_string(),
                found: other.to_string(),
            })
        }
    };

    let mut unresolved = Vec::new();
    let left = expand_typed(&items[0], store, &mut unresolved);
    let right = expand_typed(&items[1], store, &mut unresolved);
    enforce_policy(fixture, &unresolved, options)?;

    if left != right {
        return Err(FixrunError::AssertionFailed {
            fixture: fixture.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        });
    }

    info!("Passed: [{}, {}]", left, right);
    Ok(())
}

/// Pick the bearer token for an expanded request.
///
/// `token_type` wins over `override_token`, which wins over the API keys.
/// `alt` selects the alternate login token or API key.
pub fn select_bearer(
    fixture: &str,
    request: &RequestFixture,
    credentials: &CredentialSet,
) -> Result<Option<String>> {
    let token = match request.token_type {
        Some(TokenType::None) => {
            info!("Using no token for request {}", fixture);
            None
        }
        Some(TokenType::Login) => {
            info!("Using login token for request {}", fixture);
            let (token, var) = if request.alt {
                (&credentials.login_token_alt, LOGIN_TOKEN_ALT_VAR)
            } else {
                (&credentials.login_token, LOGIN_TOKEN_VAR)
            };
            let token = token.as_ref().ok_or_else(|| FixrunError::MissingCredential {
                name: var.to_string(),
                reason: format!("fixture '{}' uses token_type login", fixture),
            })?;
            Some(token.value().to_string())
        }
        None => match &request.override_token {
            Some(token) => Some(token.clone()),
            None if request.alt => {
                info!("Using alt key for request {}", fixture);
                let key =
                    credentials
                        .api_key_alt
                        .as_ref()
                        .ok_or_else(|| FixrunError::MissingCredential {
                            name: "alternate API key".to_string(),
                            reason: format!("fixture '{}' sets alt", fixture),
                        })?;
                Some(key.value().to_string())
            }
            None => Some(credentials.api_key.value().to_string()),
        },
    };

    Ok(token.filter(|t| !t.is_empty()))
}

/// Base endpoint + path, plus `?query` when present.
pub fn compose_url(request: &RequestFixture, credentials: &CredentialSet) -> String {
    let mut url = credentials.endpoints.prefix(request.raw);
    url.push_str(&request.path);
    if let Some(query) = &request.query {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Turn an expanded request fixture into an HTTP request.
pub fn build_request(
    fixture: &str,
    request: &RequestFixture,
    credentials: &CredentialSet,
) -> Result<HttpRequest> {
    let url = compose_url(request, credentials);
    let bearer = select_bearer(fixture, request, credentials)?;

    let method = Method::parse(&request.method).ok_or_else(|| FixrunError::UnknownMethod {
        method: request.method.clone(),
        fixture: fixture.to_string(),
    })?;

    let body = match method {
        Method::Post => request.data.clone(),
        Method::Get | Method::Delete => None,
    };

    Ok(HttpRequest {
        method,
        url,
        bearer,
        body,
    })
}

fn send_with_retry(
    fixture: &str,
    request: &HttpRequest,
    transport: &dyn HttpTransport,
    options: &ExecutionOptions,
) -> Result<HttpResponse> {
    match &request.body {
        Some(body) => info!("{} {} with data {}", request.method, request.url, body),
        None => info!("{} {}", request.method, request.url),
    }

    let mut attempt: u32 = 0;
    loop {
        match transport.send(request) {
            Ok(response) => {
                info!("status: {}", response.status);
                return Ok(response);
            }
            Err(e) if attempt < options.retries => {
                attempt += 1;
                warn!(
                    "Request for '{}' failed ({:#}), retrying (attempt {} of {})",
                    fixture,
                    e,
                    attempt + 1,
                    options.retries + 1
                );
                std::thread::sleep(options.retry_delay * attempt);
            }
            Err(e) => {
                return Err(FixrunError::Transport {
                    fixture: fixture.to_string(),
                    message: format!("{:#}", e),
                })
            }
        }
    }
}

fn interpret(response: HttpResponse) -> Outcome {
    if !response.is_success() {
        info!("Error: {}", response.body);
        return Outcome::ErrorStatus {
            status: response.status,
            text: response.body,
        };
    }

    match serde_json::from_str(&response.body) {
        Ok(body) => Outcome::Success {
            status: response.status,
            body,
        },
        Err(e) => {
            info!("Response body is not JSON: {}", e);
            Outcome::Unparseable {
                status: response.status,
                message: format!("Unexpected response body: {}", e),
            }
        }
    }
}
