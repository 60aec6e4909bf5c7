//! Fixture execution: run state, single-fixture execution, orchestration.

pub mod executor;
pub mod orchestrator;
pub mod store;
pub mod transport;

pub use executor::{execute, ExecutionOptions, Outcome, ReferencePolicy};
pub use orchestrator::{FixtureRunner, RunReport};
pub use store::{OutputDocument, ResultStore};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
