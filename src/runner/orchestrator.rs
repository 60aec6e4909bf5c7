//! Run orchestration.
//!
//! Validates the whole document, then executes fixtures strictly in document
//! order, folding each outcome into the shared [`ResultStore`] and
//! [`OutputDocument`]. Only fatal errors stop the run.

use crate::config::environment::CredentialSet;
use crate::error::Result;
use crate::fixture::document::FixtureDocument;
use crate::fixture::schema::{Fixture, FixtureKind};
use crate::fixture::validator::validate;
use crate::runner::executor::{execute, ExecutionOptions, Outcome};
use crate::runner::store::{OutputDocument, ResultStore};
use crate::runner::transport::HttpTransport;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

/// Everything a completed run produced.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Results available to placeholders at the end of the run.
    pub store: ResultStore,
    /// Document to persist.
    pub output: OutputDocument,
    /// Requests sent.
    pub requests: usize,
    /// Requests that came back with a status other than 200.
    pub failed_requests: usize,
    /// Assertions that passed.
    pub assertions: usize,
}

/// Drives a fixture document against one environment.
pub struct FixtureRunner {
    credentials: CredentialSet,
    transport: Box<dyn HttpTransport>,
    options: ExecutionOptions,
}

impl FixtureRunner {
    /// Create a runner.
    pub fn new(
        credentials: CredentialSet,
        transport: Box<dyn HttpTransport>,
        options: ExecutionOptions,
    ) -> Self {
        Self {
            credentials,
            transport,
            options,
        }
    }

    /// Validate and run every fixture in `document`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error; no report is produced in that case.
    pub fn run(&self, document: &FixtureDocument) -> Result<RunReport> {
        if let Some(properties) = &document.properties {
            self.apply_properties(properties);
        }

        let fixtures = validate(&document.fixtures)?;
        self.run_fixtures(&fixtures)
    }

    /// Run already-validated fixtures in order.
    pub fn run_fixtures(&self, fixtures: &[Fixture]) -> Result<RunReport> {
        let mut report = RunReport::default();

        for fixture in fixtures {
            let outcome = execute(
                fixture,
                &report.store,
                &self.credentials,
                self.transport.as_ref(),
                &self.options,
            )?;
            record(fixture, outcome, &mut report);
        }

        debug!(
            "Run complete: {} requests ({} failed), {} assertions",
            report.requests, report.failed_requests, report.assertions
        );
        debug!(
            "Stored results: {}",
            report.store.names().collect::<Vec<_>>().join(", ")
        );
        Ok(report)
    }

    /// Hook for document-level properties. None are acted on yet.
    fn apply_properties(&self, properties: &Map<String, Value>) {
        let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        debug!("Ignoring document properties: {}", keys.join(", "));
    }
}

/// Fold one outcome into the run state.
fn record(fixture: &Fixture, outcome: Outcome, report: &mut RunReport) {
    let silent = match &fixture.kind {
        FixtureKind::Request(request) => request.silent,
        FixtureKind::Assertion(_) => true,
    };

    match outcome {
        Outcome::AssertionPassed => report.assertions += 1,
        Outcome::Success { body, .. } => {
            report.requests += 1;
            if !silent {
                report.output.record_body(&fixture.name, body.clone());
            }
            report.store.insert(&fixture.name, body);
        }
        Outcome::Unparseable { message, .. } => {
            report.requests += 1;
            report
                .store
                .insert(&fixture.name, json!({ "error": message }));
        }
        Outcome::ErrorStatus { status, text } => {
            report.requests += 1;
            report.failed_requests += 1;
            info!("Fixture '{}' failed with status {}", fixture.name, status);
            report.output.record_error(&fixture.name, status, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::Endpoints;
    use crate::error::FixrunError;
    use crate::fixture::document::parse_document;
    use crate::runner::transport::{HttpRequest, HttpResponse};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Answers by URL path and records every URL requested.
    #[derive(Clone, Default)]
    struct RoutedTransport {
        routes: HashMap<String, (u16, String)>,
        sent: Rc<RefCell<Vec<String>>>,
    }

    impl RoutedTransport {
        fn route(mut self, path: &str, status: u16, body: &str) -> Self {
            self.routes
                .insert(format!("http://api.test/v1/{}", path), (status, body.to_string()));
            self
        }
    }

    impl HttpTransport for RoutedTransport {
        fn send(&self, request: &HttpRequest) -> anyhow::Result<HttpResponse> {
            self.sent.borrow_mut().push(request.url.clone());
            let (status, body) = self
                .routes
                .get(&request.url)
                .cloned()
                .unwrap_or((404, "no route".to_string()));
            Ok(HttpResponse { status, body })
        }
    }

    fn runner(transport: RoutedTransport) -> FixtureRunner {
        let endpoints = Endpoints {
            base_url: "http://api.test/".into(),
            raw_base_url: "http://raw.test/".into(),
            api_path: "v1/".into(),
        };
        FixtureRunner::new(
            CredentialSet::new(endpoints, "key"),
            Box::new(transport),
            ExecutionOptions::default(),
        )
    }

    fn doc(json: &str) -> FixtureDocument {
        parse_document(json, "test").unwrap()
    }

    #[test]
    fn later_fixture_uses_earlier_result() {
        let transport = RoutedTransport::default()
            .route("widgets", 200, r#"{"id": "42"}"#)
            .route("widgets/42", 200, r#"{"id": "42", "name": "gear"}"#);
        let sent = transport.sent.clone();

        let report = runner(transport)
            .run(&doc(
                r#"{"fixtures": [
                    {"name": "a", "method": "get", "path": "widgets"},
                    {"name": "b", "method": "get", "path": "widgets/${a.id}"}
                ]}"#,
            ))
            .unwrap();

        assert_eq!(
            *sent.borrow(),
            vec!["http://api.test/v1/widgets", "http://api.test/v1/widgets/42"]
        );
        assert_eq!(report.output.get("b"), Some(&json!({"id": "42", "name": "gear"})));
        assert_eq!(report.requests, 2);
    }

    #[test]
    fn error_status_is_recorded_and_run_continues() {
        let transport = RoutedTransport::default()
            .route("rooms/x", 404, "missing")
            .route("after", 200, "{}");
        let sent = transport.sent.clone();

        let report = runner(transport)
            .run(&doc(
                r#"{"fixtures": [
                    {"name": "a", "method": "get", "path": "rooms/x"},
                    {"name": "b", "method": "get", "path": "rooms/${a.id}"},
                    {"name": "c", "method": "get", "path": "after"}
                ]}"#,
            ))
            .unwrap();

        assert_eq!(
            report.output.get("a"),
            Some(&json!({"error": 404, "text": "missing"}))
        );
        assert!(!report.store.contains("a"));
        assert_eq!(sent.borrow()[1], "http://api.test/v1/rooms/${a.id}");
        assert_eq!(report.output.get("c"), Some(&json!({})));
        assert_eq!(report.failed_requests, 2);
    }

    #[test]
    fn silent_results_are_stored_but_not_output() {
        let transport = RoutedTransport::default()
            .route("rooms", 200, r#"[{"id": "r1"}]"#)
            .route("rooms/r1", 200, r#"{"id": "r1"}"#);

        let report = runner(transport)
            .run(&doc(
                r#"{"fixtures": [
                    {"name": "xrooms", "method": "get", "path": "rooms", "silent": true},
                    {"name": "room", "method": "get", "path": "rooms/${xrooms[0].id}"}
                ]}"#,
            ))
            .unwrap();

        assert!(report.store.contains("xrooms"));
        assert!(report.output.get("xrooms").is_none());
        assert_eq!(report.output.get("room"), Some(&json!({"id": "r1"})));
    }

    #[test]
    fn assertions_are_not_output() {
        let transport = RoutedTransport::default().route("a", 200, r#"{"v": 1}"#);

        let report = runner(transport)
            .run(&doc(
                r#"{"fixtures": [
                    {"name": "a", "method": "get", "path": "a"},
                    {"name": "check", "assertion_eq": ["${a.v}", 1]}
                ]}"#,
            ))
            .unwrap();

        assert_eq!(report.assertions, 1);
        assert!(report.output.get("check").is_none());
        assert!(!report.store.contains("check"));
        assert_eq!(report.output.len(), 1);
    }

    #[test]
    fn created_status_is_output_as_error() {
        let transport = RoutedTransport::default()
            .route("rooms", 201, r#"{"id": "r1"}"#)
            .route("rooms/r1", 200, "{}");
        let sent = transport.sent.clone();

        let report = runner(transport)
            .run(&doc(
                r#"{"fixtures": [
                    {"name": "room", "method": "post", "path": "rooms", "data": {}},
                    {"name": "fetch", "method": "get", "path": "rooms/${room.id}"}
                ]}"#,
            ))
            .unwrap();

        assert_eq!(
            report.output.get("room"),
            Some(&json!({"error": 201, "text": "{\"id\": \"r1\"}"}))
        );
        assert!(!report.store.contains("room"));
        assert_eq!(sent.borrow()[1], "http://api.test/v1/rooms/${room.id}");
        assert_eq!(report.failed_requests, 2);
    }

    #[test]
    fn unparseable_body_is_stored_as_error() {
        let transport = RoutedTransport::default().route("page", 200, "<html>");

        let report = runner(transport)
            .run(&doc(
                r#"{"fixtures": [{"name": "page", "method": "get", "path": "page"}]}"#,
            ))
            .unwrap();

        let stored = report.store.get("page").unwrap();
        assert!(stored["error"].as_str().unwrap().starts_with("Unexpected"));
        assert!(report.output.get("page").is_none());
    }

    #[test]
    fn validation_failure_prevents_all_requests() {
        let transport = RoutedTransport::default();
        let sent = transport.sent.clone();

        let err = runner(transport)
            .run(&doc(
                r#"{"fixtures": [
                    {"name": "a", "method": "get", "path": "a"},
                    {"name": "b", "method": "post", "path": "b"}
                ]}"#,
            ))
            .unwrap_err();

        assert!(matches!(err, FixrunError::MissingField { .. }));
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn failed_assertion_stops_the_run() {
        let transport = RoutedTransport::default().route("a", 200, r#"{"v": "x"}"#);
        let sent = transport.sent.clone();

        let err = runner(transport)
            .run(&doc(
                r#"{"fixtures": [
                    {"name": "a", "method": "get", "path": "a"},
                    {"name": "check", "assertion_eq": ["${a.v}", "y"]},
                    {"name": "never", "method": "get", "path": "never"}
                ]}"#,
            ))
            .unwrap_err();

        assert!(matches!(err, FixrunError::AssertionFailed { .. }));
        assert_eq!(sent.borrow().len(), 1);
    }

    #[test]
    fn properties_are_accepted() {
        let report = runner(RoutedTransport::default())
            .run(&doc(r#"{"properties": {"team": "qa"}, "fixtures": []}"#))
            .unwrap();
        assert!(report.output.is_empty());
    }
}
