//! Form aggregator
//!
//! A [`Form`] is an ordered set of named [`Field`]s. Processing a submission
//! checks the anti-forgery token (when enabled), evaluates every field
//! concurrently and folds the outcomes, in registration order, into a
//! [`ValidationResult`].

use crate::field::{Field, FieldValue, messages};
use crate::metadata::{FieldMetadata, FormMetadata, HiddenField};
use crate::plugins::PluginSet;
use crate::result::{FormValues, ValidationResult};
use crate::submission::Submission;
use futures::future::join_all;
use std::borrow::Cow;
use std::sync::Arc;
use zluvo_conf::{ProjectInfo, Settings};
use zluvo_logging::{FailureLogger, TracingReporter};
use zluvo_security::{HmacTokenGuard, SecurityError, TokenGuard};

/// Name of the hidden input carrying the anti-forgery token
pub const TOKEN_FIELD: &str = "crsf";

/// Names that cannot be used for fields
pub const RESERVED_NAMES: &[&str] = &[TOKEN_FIELD];

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("'{0}' is reserved and cannot be used as a field name")]
	ReservedName(String),
	#[error("Field '{0}' is registered more than once")]
	DuplicateName(String),
	#[error("Field names must not be empty")]
	EmptyName,
	#[error("Anti-forgery is enabled but the submission has no '{0}' field")]
	MissingToken(String),
	#[error(transparent)]
	Security(#[from] SecurityError),
	#[error("Plugin '{plugin}' failed: {source}")]
	Plugin {
		plugin: String,
		#[source]
		source: anyhow::Error,
	},
}

pub type FormResult<T> = Result<T, FormError>;

/// What to do when a submitted token does not verify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPolicy {
	/// Report `secure: false` and keep evaluating fields
	#[default]
	Report,
	/// Reject the submission without evaluating fields
	Enforce,
}

/// Optional side effects of processing a submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessContext {
	/// Send a failure record when the submission is invalid
	pub record: bool,
	/// Run the form's plugins when the submission is valid
	pub run_plugins: bool,
}

impl ProcessContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_record(mut self) -> Self {
		self.record = true;
		self
	}

	pub fn with_plugins(mut self) -> Self {
		self.run_plugins = true;
		self
	}
}

type FieldOutcome = Result<Option<FieldValue>, Vec<String>>;

/// Per-submission working state
struct Evaluation {
	secure: Option<bool>,
	/// `None` when the token policy rejected the submission outright
	outcomes: Option<Vec<FieldOutcome>>,
}

pub struct Form {
	name: String,
	fields: Vec<Field>,
	guard: Option<Arc<dyn TokenGuard>>,
	token_policy: TokenPolicy,
	plugins: PluginSet,
	logger: FailureLogger,
}

impl Form {
	/// Create an empty form
	///
	/// Failure records go to a tracing-only logger tagged with
	/// [`ProjectInfo::default`]. Use [`Form::with_settings`] to pick up the
	/// configured project identity and forward records to the collector, or
	/// [`Form::with_failure_logger`] for a custom logger.
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_forms::Form;
	///
	/// let form = Form::new("signup");
	/// assert_eq!(form.name(), "signup");
	/// assert!(form.fields().is_empty());
	/// assert!(!form.anti_forgery_enabled());
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: Vec::new(),
			guard: None,
			token_policy: TokenPolicy::default(),
			plugins: PluginSet::new(),
			logger: FailureLogger::new(ProjectInfo::default())
				.with_reporter(Arc::new(TracingReporter)),
		}
	}

	/// Register fields in order.
	///
	/// A field without an explicit name takes its registration key. Nothing
	/// is registered when any name is empty, reserved or already taken.
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_forms::{Form, FormError, field};
	///
	/// let mut form = Form::new("contact");
	/// form.register([
	///     ("email", field::email("Email", "you@example.com").required()),
	///     ("message", field::text_area("Message", "").with_name("body")),
	/// ])
	/// .unwrap();
	///
	/// let names: Vec<_> = form.fields().iter().map(|f| f.name.as_str()).collect();
	/// assert_eq!(names, vec!["email", "body"]);
	///
	/// let err = form.register([("crsf", field::text("Token", ""))]).unwrap_err();
	/// assert!(matches!(err, FormError::ReservedName(_)));
	/// ```
	pub fn register<K, I>(&mut self, fields: I) -> FormResult<()>
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, Field)>,
	{
		let mut incoming: Vec<Field> = Vec::new();
		for (key, mut field) in fields {
			if field.name.is_empty() {
				field.name = key.into();
			}
			let name = field.name.as_str();
			if name.is_empty() {
				return Err(FormError::EmptyName);
			}
			if RESERVED_NAMES.contains(&name) {
				return Err(FormError::ReservedName(name.to_string()));
			}
			if self.field(name).is_some() || incoming.iter().any(|f| f.name == name) {
				return Err(FormError::DuplicateName(name.to_string()));
			}
			incoming.push(field);
		}

		self.fields.extend(incoming);
		Ok(())
	}

	/// Builder-style [`register`](Self::register)
	pub fn with_fields<K, I>(mut self, fields: I) -> FormResult<Self>
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, Field)>,
	{
		self.register(fields)?;
		Ok(self)
	}

	/// Enable anti-forgery with a custom guard
	pub fn with_token_guard(mut self, guard: Arc<dyn TokenGuard>) -> Self {
		self.guard = Some(guard);
		self
	}

	/// Enable anti-forgery signed with the configured `csrf` secret
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_conf::Settings;
	/// use zluvo_forms::{Form, FormError};
	///
	/// let err = Form::new("login").with_anti_forgery(&Settings::default()).unwrap_err();
	/// assert!(matches!(err, FormError::Security(_)));
	///
	/// let settings = Settings::default().with_csrf_secret("s3cret");
	/// let form = Form::new("login").with_anti_forgery(&settings).unwrap();
	/// assert!(form.anti_forgery_enabled());
	/// ```
	pub fn with_anti_forgery(self, settings: &Settings) -> FormResult<Self> {
		let guard = HmacTokenGuard::from_settings(settings)?;
		Ok(self.with_token_guard(Arc::new(guard)))
	}

	pub fn with_token_policy(mut self, policy: TokenPolicy) -> Self {
		self.token_policy = policy;
		self
	}

	/// Record failures with the project identity and collector from `settings`
	///
	/// Records are forwarded over HTTP only when an access token is set.
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_conf::{ProjectInfo, Settings};
	/// use zluvo_forms::Form;
	///
	/// let settings = Settings::default()
	///     .with_project(ProjectInfo::new("shop", "2.0.0"))
	///     .with_access_token("collector-token");
	/// let form = Form::new("checkout").with_settings(&settings);
	/// assert_eq!(form.failure_logger().project().name, "shop");
	/// assert_eq!(form.failure_logger().reporter_names(), vec!["tracing", "http"]);
	/// ```
	pub fn with_settings(mut self, settings: &Settings) -> Self {
		self.logger = FailureLogger::from_settings(settings);
		self
	}

	/// Replace the logger receiving failure records
	pub fn with_failure_logger(mut self, logger: FailureLogger) -> Self {
		self.logger = logger;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Fields in registration order
	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&Field> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn anti_forgery_enabled(&self) -> bool {
		self.guard.is_some()
	}

	pub fn token_policy(&self) -> TokenPolicy {
		self.token_policy
	}

	pub fn plugins(&self) -> &PluginSet {
		&self.plugins
	}

	pub fn plugins_mut(&mut self) -> &mut PluginSet {
		&mut self.plugins
	}

	pub fn failure_logger(&self) -> &FailureLogger {
		&self.logger
	}

	/// Hidden input with a freshly issued token, `None` without anti-forgery
	pub fn token_field(&self) -> Option<HiddenField> {
		self.guard
			.as_ref()
			.map(|guard| HiddenField::new(TOKEN_FIELD, guard.generate()))
	}

	/// Serializable description of the form for rendering
	pub fn to_metadata(&self) -> FormMetadata {
		FormMetadata {
			name: self.name.clone(),
			token: self.token_field(),
			fields: self.fields.iter().map(FieldMetadata::from).collect(),
		}
	}

	/// Validate a submission without side effects
	///
	/// # Examples
	///
	/// ```
	/// use std::collections::HashMap;
	/// use zluvo_forms::{Form, field};
	///
	/// # tokio_test::block_on(async {
	/// let mut form = Form::new("profile");
	/// form.register([
	///     ("name", field::text("Name", "").required()),
	///     ("age", field::number("Age", "")),
	/// ])
	/// .unwrap();
	///
	/// let result = form.process(&HashMap::<String, String>::new()).await.unwrap();
	/// assert!(!result.valid);
	/// assert_eq!(result.errors, vec!["Field is required"]);
	/// assert!(result.values().is_empty());
	/// # });
	/// ```
	pub async fn process<S>(&self, submission: &S) -> FormResult<ValidationResult>
	where
		S: Submission + Sync + ?Sized,
	{
		self.process_with(submission, ProcessContext::default())
			.await
	}

	/// Validate a submission, then record failures or run plugins as `ctx` asks
	pub async fn process_with<S>(
		&self,
		submission: &S,
		ctx: ProcessContext,
	) -> FormResult<ValidationResult>
	where
		S: Submission + Sync + ?Sized,
	{
		let evaluation = self.evaluate(submission).await?;
		let result = self.assemble(evaluation);
		self.after(&result, ctx).await?;
		Ok(result)
	}

	/// Like [`process_with`](Self::process_with), also writing each
	/// successfully cast value back into its field
	pub async fn consume<S>(
		&mut self,
		submission: &S,
		ctx: ProcessContext,
	) -> FormResult<ValidationResult>
	where
		S: Submission + Sync + ?Sized,
	{
		let evaluation = self.evaluate(submission).await?;
		if let Some(outcomes) = &evaluation.outcomes {
			for (field, outcome) in self.fields.iter_mut().zip(outcomes) {
				if let Ok(value) = outcome {
					field.value = value.clone();
				}
			}
		}

		let result = self.assemble(evaluation);
		self.after(&result, ctx).await?;
		Ok(result)
	}

	async fn evaluate<S>(&self, submission: &S) -> FormResult<Evaluation>
	where
		S: Submission + Sync + ?Sized,
	{
		let secure = match &self.guard {
			None => None,
			Some(guard) => {
				let token = submission
					.get(TOKEN_FIELD)
					.ok_or_else(|| FormError::MissingToken(TOKEN_FIELD.to_string()))?;
				let verified = guard.verify(token);
				if !verified {
					tracing::warn!(form = %self.name, policy = ?self.token_policy, "anti-forgery token rejected");
				}
				Some(verified)
			}
		};

		if secure == Some(false) && self.token_policy == TokenPolicy::Enforce {
			return Ok(Evaluation {
				secure,
				outcomes: None,
			});
		}

		let outcomes = join_all(self.fields.iter().map(|field| async move {
			let raw = submission.get(&field.name).map(Cow::Borrowed).or_else(|| {
				field
					.value
					.as_ref()
					.map(|value| Cow::Owned(value.to_string()))
			});
			let outcome = field.clean(raw.as_deref()).await;
			tracing::debug!(form = %self.name, field = %field.name, valid = outcome.is_ok(), "field evaluated");
			outcome
		}))
		.await;

		Ok(Evaluation {
			secure,
			outcomes: Some(outcomes),
		})
	}

	fn assemble(&self, evaluation: Evaluation) -> ValidationResult {
		let Some(outcomes) = evaluation.outcomes else {
			return ValidationResult::new(
				evaluation.secure,
				vec![messages::TOKEN.to_string()],
				FormValues::new(),
			);
		};

		let mut errors = Vec::new();
		let mut data = FormValues::new();
		for (field, outcome) in self.fields.iter().zip(outcomes) {
			match outcome {
				Ok(value) => {
					data.insert(field.name.clone(), value);
				}
				Err(field_errors) => errors.extend(field_errors),
			}
		}

		ValidationResult::new(evaluation.secure, errors, data)
	}

	async fn after(&self, result: &ValidationResult, ctx: ProcessContext) -> FormResult<()> {
		if result.valid {
			if ctx.run_plugins {
				self.plugins.run(&self.name, &result.data).await?;
			}
		} else if ctx.record {
			self.logger.record(&self.name, &result.errors).await;
		}
		Ok(())
	}
}

impl std::fmt::Debug for Form {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Form")
			.field("name", &self.name)
			.field("fields", &self.fields)
			.field("anti_forgery", &self.guard.is_some())
			.field("token_policy", &self.token_policy)
			.field("plugins", &self.plugins)
			.finish()
	}
}
