//! Resolved settings
//!
//! [`Settings`] is built by merging [`ConfigSource`]s by priority and then
//! extracting the handful of keys the forms stack understands.

use crate::sources::{ConfigSource, DefaultSource, EnvSource, SourceError};
use indexmap::IndexMap;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Collector endpoint used when none is configured.
pub const DEFAULT_COLLECTOR_URL: &str = "http://localhost:3000/api/record";

/// Setting keys, as seen after the environment prefix is stripped.
pub mod keys {
	/// Anti-forgery signing secret (`ZLUVO_CSRF`)
	pub const CSRF: &str = "csrf";
	/// Failure collector access token (`ZLUVO_TOKEN`)
	pub const TOKEN: &str = "token";
	/// Failure collector endpoint (`ZLUVO_COLLECTOR_URL`)
	pub const COLLECTOR_URL: &str = "collector_url";
	/// Project name reported with failure records (`ZLUVO_PROJECT_NAME`)
	pub const PROJECT_NAME: &str = "project_name";
	/// Project version reported with failure records (`ZLUVO_PROJECT_VERSION`)
	pub const PROJECT_VERSION: &str = "project_version";
}

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Source error: {0}")]
	Source(#[from] SourceError),

	#[error("Setting '{key}' must be a string")]
	NotAString { key: String },

	#[error("Setting '{key}' is not a valid URL: {source}")]
	InvalidUrl {
		key: String,
		#[source]
		source: url::ParseError,
	},
}

/// Identity of the application embedding the forms, attached to failure records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
	pub name: String,
	pub version: String,
}

impl ProjectInfo {
	pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			version: version.into(),
		}
	}
}

impl Default for ProjectInfo {
	fn default() -> Self {
		Self::new("unknown", "0.0.0")
	}
}

/// Build a [`ProjectInfo`] from the calling crate's package metadata.
///
/// # Examples
///
/// ```
/// let project = zluvo_conf::project_info!();
/// assert_eq!(project.name, env!("CARGO_PKG_NAME"));
/// ```
#[macro_export]
macro_rules! project_info {
	() => {
		$crate::ProjectInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
	};
}

/// Settings consumed by the token guard and the failure reporter
pub struct Settings {
	csrf_secret: Option<SecretString>,
	access_token: Option<SecretString>,
	collector_url: Url,
	project: ProjectInfo,
}

impl Settings {
	/// Load settings from built-in defaults overlaid with `ZLUVO_*` environment variables
	pub fn from_env() -> Result<Self, SettingsError> {
		let defaults = DefaultSource::new();
		let env = EnvSource::new();
		Self::from_sources(&[&defaults, &env])
	}

	/// Merge the given sources, higher priority winning, and resolve the settings
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_conf::Settings;
	/// use zluvo_conf::sources::{DefaultSource, MemorySource};
	///
	/// let defaults = DefaultSource::new();
	/// let values = MemorySource::new()
	///     .with_value("csrf", "s3cret")
	///     .with_value("project_name", "signup");
	///
	/// let settings = Settings::from_sources(&[&defaults, &values]).unwrap();
	/// assert!(settings.csrf_secret().is_some());
	/// assert_eq!(settings.project().name, "signup");
	/// assert_eq!(settings.collector_url().as_str(), "http://localhost:3000/api/record");
	/// ```
	pub fn from_sources(sources: &[&dyn ConfigSource]) -> Result<Self, SettingsError> {
		let mut ordered: Vec<&dyn ConfigSource> = sources.to_vec();
		ordered.sort_by_key(|source| source.priority());

		let mut merged: IndexMap<String, Value> = IndexMap::new();
		for source in ordered {
			merged.extend(source.load()?);
		}

		let collector_url = match string_value(&merged, keys::COLLECTOR_URL)? {
			Some(raw) => Url::parse(&raw).map_err(|source| SettingsError::InvalidUrl {
				key: keys::COLLECTOR_URL.to_string(),
				source,
			})?,
			None => default_collector_url(),
		};

		let defaults = ProjectInfo::default();
		let project = ProjectInfo {
			name: string_value(&merged, keys::PROJECT_NAME)?.unwrap_or(defaults.name),
			version: string_value(&merged, keys::PROJECT_VERSION)?.unwrap_or(defaults.version),
		};

		Ok(Self {
			csrf_secret: string_value(&merged, keys::CSRF)?.map(SecretString::from),
			access_token: string_value(&merged, keys::TOKEN)?.map(SecretString::from),
			collector_url,
			project,
		})
	}

	/// Anti-forgery signing secret, if configured
	pub fn csrf_secret(&self) -> Option<&SecretString> {
		self.csrf_secret.as_ref()
	}

	/// Collector access token, if configured
	pub fn access_token(&self) -> Option<&SecretString> {
		self.access_token.as_ref()
	}

	pub fn collector_url(&self) -> &Url {
		&self.collector_url
	}

	pub fn project(&self) -> &ProjectInfo {
		&self.project
	}

	/// Set the signing secret
	pub fn with_csrf_secret(mut self, secret: impl Into<String>) -> Self {
		self.csrf_secret = non_empty(secret.into()).map(SecretString::from);
		self
	}

	/// Set the collector access token
	pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = non_empty(token.into()).map(SecretString::from);
		self
	}

	pub fn with_collector_url(mut self, url: Url) -> Self {
		self.collector_url = url;
		self
	}

	pub fn with_project(mut self, project: ProjectInfo) -> Self {
		self.project = project;
		self
	}
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			csrf_secret: None,
			access_token: None,
			collector_url: default_collector_url(),
			project: ProjectInfo::default(),
		}
	}
}

impl Clone for Settings {
	fn clone(&self) -> Self {
		Self {
			csrf_secret: self.csrf_secret.as_ref().map(clone_secret),
			access_token: self.access_token.as_ref().map(clone_secret),
			collector_url: self.collector_url.clone(),
			project: self.project.clone(),
		}
	}
}

impl std::fmt::Debug for Settings {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Settings")
			.field("csrf_secret", &self.csrf_secret.as_ref().map(|_| "[REDACTED]"))
			.field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
			.field("collector_url", &self.collector_url.as_str())
			.field("project", &self.project)
			.finish()
	}
}

fn clone_secret(secret: &SecretString) -> SecretString {
	SecretString::from(secret.expose_secret().to_owned())
}

fn default_collector_url() -> Url {
	Url::parse(DEFAULT_COLLECTOR_URL).expect("DEFAULT_COLLECTOR_URL: invalid URL")
}

fn non_empty(value: String) -> Option<String> {
	if value.is_empty() { None } else { Some(value) }
}

/// Read a string setting; empty strings count as unset.
fn string_value(
	merged: &IndexMap<String, Value>,
	key: &str,
) -> Result<Option<String>, SettingsError> {
	match merged.get(key) {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(s)) => Ok(non_empty(s.clone())),
		Some(_) => Err(SettingsError::NotAString {
			key: key.to_string(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::MemorySource;
	use rstest::rstest;

	#[rstest]
	fn test_higher_priority_source_wins() {
		// Arrange
		let low = MemorySource::new()
			.with_value(keys::PROJECT_NAME, "low")
			.with_priority(10);
		let high = MemorySource::new()
			.with_value(keys::PROJECT_NAME, "high")
			.with_priority(90);

		// Act: order of the slice must not matter
		let settings = Settings::from_sources(&[&high, &low]).unwrap();

		// Assert
		assert_eq!(settings.project().name, "high");
	}

	#[rstest]
	fn test_empty_secret_counts_as_unset() {
		let source = MemorySource::new().with_value(keys::CSRF, "");
		let settings = Settings::from_sources(&[&source]).unwrap();
		assert!(settings.csrf_secret().is_none());
	}

	#[rstest]
	fn test_invalid_collector_url_is_rejected() {
		let source = MemorySource::new().with_value(keys::COLLECTOR_URL, "not a url");
		let result = Settings::from_sources(&[&source]);
		assert!(matches!(result, Err(SettingsError::InvalidUrl { .. })));
	}

	#[rstest]
	fn test_debug_redacts_secrets() {
		let settings = Settings::default()
			.with_csrf_secret("hunter2")
			.with_access_token("bearer-value");

		let rendered = format!("{:?}", settings);

		assert!(!rendered.contains("hunter2"));
		assert!(!rendered.contains("bearer-value"));
		assert!(rendered.contains("[REDACTED]"));
	}

	#[rstest]
	fn test_clone_keeps_secrets() {
		let settings = Settings::default().with_csrf_secret("hunter2");
		let cloned = settings.clone();
		assert_eq!(
			cloned.csrf_secret().map(|s| s.expose_secret().to_string()),
			Some("hunter2".to_string())
		);
	}

	#[rstest]
	fn test_project_info_macro_uses_caller_package() {
		let project = crate::project_info!();
		assert_eq!(project.name, "zluvo-conf");
	}
}
