use crate::handlers::{FailureReporter, HttpReporter, TracingReporter};
use crate::record::FailureRecord;
use std::sync::Arc;
use zluvo_conf::{ProjectInfo, Settings};

/// Fans failure records out to a set of reporters.
///
/// Reporting never fails the caller: a reporter error is logged and the
/// remaining reporters still run.
#[derive(Clone)]
pub struct FailureLogger {
	project: ProjectInfo,
	reporters: Vec<Arc<dyn FailureReporter>>,
}

impl FailureLogger {
	/// Create a logger without reporters
	pub fn new(project: ProjectInfo) -> Self {
		Self {
			project,
			reporters: Vec::new(),
		}
	}

	/// Console reporting through `tracing`, plus the HTTP collector when an
	/// access token is configured
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_conf::Settings;
	/// use zluvo_logging::FailureLogger;
	///
	/// let logger = FailureLogger::from_settings(&Settings::default());
	/// assert_eq!(logger.reporter_names(), vec!["tracing"]);
	///
	/// let settings = Settings::default().with_access_token("collector-token");
	/// let logger = FailureLogger::from_settings(&settings);
	/// assert_eq!(logger.reporter_names(), vec!["tracing", "http"]);
	/// ```
	pub fn from_settings(settings: &Settings) -> Self {
		let mut logger =
			Self::new(settings.project().clone()).with_reporter(Arc::new(TracingReporter));
		if let Some(http) = HttpReporter::from_settings(settings) {
			logger = logger.with_reporter(Arc::new(http));
		}
		logger
	}

	pub fn with_reporter(mut self, reporter: Arc<dyn FailureReporter>) -> Self {
		self.reporters.push(reporter);
		self
	}

	pub fn project(&self) -> &ProjectInfo {
		&self.project
	}

	pub fn reporter_names(&self) -> Vec<&str> {
		self.reporters.iter().map(|r| r.name()).collect()
	}

	/// Record a rejected submission of `form`
	pub async fn record(&self, form: &str, errors: &[String]) -> FailureRecord {
		let record = FailureRecord::new(self.project.clone(), form, errors.to_vec());

		for reporter in &self.reporters {
			if let Err(e) = reporter.report(&record).await {
				tracing::warn!(
					reporter = reporter.name(),
					form = %record.form,
					"failed to report form failure: {}",
					e
				);
			}
		}

		record
	}
}

impl std::fmt::Debug for FailureLogger {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FailureLogger")
			.field("project", &self.project)
			.field("reporters", &self.reporter_names())
			.finish()
	}
}
