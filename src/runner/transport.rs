//! HTTP transport for fixture requests.
//!
//! The executor talks to the network through [`HttpTransport`] so runs can be
//! driven by a scripted transport in tests. [`ReqwestTransport`] is the real
//! blocking client.

use crate::fixture::schema::Method;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// A fully resolved request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token for the Authorization header, if any.
    pub bearer: Option<String>,
    /// JSON body (POST only).
    pub body: Option<Value>,
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is 200; every other status is recorded as an error.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Sends fixture requests.
pub trait HttpTransport {
    /// Send one request and wait for the response.
    ///
    /// # Errors
    ///
    /// Only transport-level failures (DNS, connect, TLS, reading the body)
    /// are errors; any HTTP status is a response.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking reqwest client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport; `None` waits on responses indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fixrun/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .with_context(|| format!("Failed to {} {}", request.method, request.url))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .with_context(|| format!("Failed to read response from {}", request.url))?;

        Ok(HttpResponse { status, body })
    }
}
