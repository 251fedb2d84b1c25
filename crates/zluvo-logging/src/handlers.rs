//! Failure reporters
//!
//! A reporter receives every [`FailureRecord`] the [`FailureLogger`](crate::FailureLogger)
//! produces. [`TracingReporter`] is the console channel, [`HttpReporter`]
//! forwards to the collector and [`MemoryReporter`] keeps records for tests.

use crate::record::FailureRecord;
use crate::{ReportError, ReportResult};
use std::sync::{Arc, Mutex};
use zluvo_conf::{ExposeSecret, SecretString, Settings};

/// Destination for failure records
#[async_trait::async_trait]
pub trait FailureReporter: Send + Sync {
	async fn report(&self, record: &FailureRecord) -> ReportResult<()>;

	/// Short name used when a reporter fails
	fn name(&self) -> &str;
}

/// Emits each record as a structured `tracing` warning
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

#[async_trait::async_trait]
impl FailureReporter for TracingReporter {
	async fn report(&self, record: &FailureRecord) -> ReportResult<()> {
		tracing::warn!(
			target: "zluvo::failures",
			time = %record.time.to_rfc3339(),
			project = %record.project.name,
			version = %record.project.version,
			form = %record.form,
			errors = ?record.errors,
			"form submission rejected"
		);
		Ok(())
	}

	fn name(&self) -> &str {
		"tracing"
	}
}

/// Posts each record as JSON to the collector endpoint with a bearer token
pub struct HttpReporter {
	client: reqwest::Client,
	endpoint: reqwest::Url,
	token: SecretString,
}

impl HttpReporter {
	pub fn new(endpoint: reqwest::Url, token: impl Into<String>) -> Self {
		Self {
			client: reqwest::Client::new(),
			endpoint,
			token: SecretString::from(token.into()),
		}
	}

	/// Build a reporter when an access token is configured, `None` otherwise
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_conf::Settings;
	/// use zluvo_logging::HttpReporter;
	///
	/// assert!(HttpReporter::from_settings(&Settings::default()).is_none());
	///
	/// let settings = Settings::default().with_access_token("collector-token");
	/// assert!(HttpReporter::from_settings(&settings).is_some());
	/// ```
	pub fn from_settings(settings: &Settings) -> Option<Self> {
		let token = settings.access_token()?;
		Some(Self::new(
			settings.collector_url().clone(),
			token.expose_secret(),
		))
	}

	pub fn endpoint(&self) -> &reqwest::Url {
		&self.endpoint
	}
}

#[async_trait::async_trait]
impl FailureReporter for HttpReporter {
	async fn report(&self, record: &FailureRecord) -> ReportResult<()> {
		let response = self
			.client
			.post(self.endpoint.clone())
			.bearer_auth(self.token.expose_secret())
			.json(record)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(ReportError::Rejected(status.as_u16()));
		}
		Ok(())
	}

	fn name(&self) -> &str {
		"http"
	}
}

impl std::fmt::Debug for HttpReporter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HttpReporter")
			.field("endpoint", &self.endpoint.as_str())
			.field("token", &"[REDACTED]")
			.finish()
	}
}

/// Keeps records in memory
#[derive(Clone, Default)]
pub struct MemoryReporter {
	records: Arc<Mutex<Vec<FailureRecord>>>,
}

impl MemoryReporter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get_records(&self) -> Vec<FailureRecord> {
		self.records
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.clone()
	}

	pub fn clear(&self) {
		self.records
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.clear();
	}
}

#[async_trait::async_trait]
impl FailureReporter for MemoryReporter {
	async fn report(&self, record: &FailureRecord) -> ReportResult<()> {
		self.records
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.push(record.clone());
		Ok(())
	}

	fn name(&self) -> &str {
		"memory"
	}
}
