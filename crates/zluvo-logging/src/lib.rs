//! # zluvo logging
//!
//! Observability for rejected form submissions. Each failure becomes a
//! [`FailureRecord`] `{time, project{name, version}, form, errors}` that is
//! emitted as a `tracing` event and, when a collector access token is
//! configured, posted to the collector endpoint.

pub mod handlers;
pub mod logger;
pub mod record;

pub use handlers::{FailureReporter, HttpReporter, MemoryReporter, TracingReporter};
pub use logger::FailureLogger;
pub use record::FailureRecord;

/// Result type for reporting operations
pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Collector rejected the record with status {0}")]
	Rejected(u16),
}
