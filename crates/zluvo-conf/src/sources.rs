//! Configuration sources for layered settings
//!
//! Sources are merged in priority order: environment variables override
//! in-memory values, which override built-in defaults.

use indexmap::IndexMap;
use serde_json::Value;

/// Prefix stripped from environment variable names by default.
pub const DEFAULT_ENV_PREFIX: &str = "ZLUVO_";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("Environment variable {0} is not valid unicode")]
	NotUnicode(String),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid source: {0}")]
	InvalidSource(String),
}

/// Environment variable configuration source
///
/// Variables are matched by prefix, the prefix is removed and the remaining
/// key is lowercased, so `ZLUVO_CSRF` becomes `csrf`. Values are kept as
/// strings: secrets made only of digits must not turn into numbers.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Create a source reading variables prefixed with `ZLUVO_`
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_conf::sources::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new();
	/// assert_eq!(source.priority(), 100);
	/// ```
	pub fn new() -> Self {
		Self {
			prefix: DEFAULT_ENV_PREFIX.to_string(),
		}
	}

	/// Use a different variable prefix
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_conf::sources::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new().with_prefix("MYAPP_");
	/// assert_eq!(source.description(), "Environment variables (prefix: MYAPP_)");
	/// ```
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let mut config = IndexMap::new();

		for (key, value) in std::env::vars_os() {
			let Some(key) = key.to_str() else {
				continue;
			};
			let Some(clean_key) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let value = value
				.into_string()
				.map_err(|_| SourceError::NotUnicode(key.to_string()))?;

			config.insert(clean_key.to_lowercase(), Value::String(value));
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100 // Highest priority
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// In-memory configuration source
///
/// Handy for tests and for applications that resolve their secrets
/// elsewhere before building the settings.
pub struct MemorySource {
	values: IndexMap<String, Value>,
	priority: u8,
}

impl MemorySource {
	/// Create an empty in-memory source
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_conf::sources::{ConfigSource, MemorySource};
	///
	/// let source = MemorySource::new().with_value("csrf", "s3cret");
	/// let loaded = source.load().unwrap();
	/// assert_eq!(loaded.get("csrf").and_then(|v| v.as_str()), Some("s3cret"));
	/// ```
	pub fn new() -> Self {
		Self {
			values: IndexMap::new(),
			priority: 50,
		}
	}

	/// Add a string value
	pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.values.insert(key.into(), Value::String(value.into()));
		self
	}

	/// Override the priority of this source
	pub fn with_priority(mut self, priority: u8) -> Self {
		self.priority = priority;
		self
	}
}

impl Default for MemorySource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for MemorySource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		self.priority
	}

	fn description(&self) -> String {
		format!("In-memory values ({} keys)", self.values.len())
	}
}

/// Built-in defaults
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create the default values used when nothing else is configured
	pub fn new() -> Self {
		let mut values = IndexMap::new();
		values.insert(
			crate::settings::keys::COLLECTOR_URL.to_string(),
			Value::String(crate::settings::DEFAULT_COLLECTOR_URL.to_string()),
		);
		Self { values }
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0 // Lowest priority
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[serial(env)]
	fn test_env_source_strips_prefix_and_lowercases() {
		// Arrange
		// SAFETY: guarded by #[serial(env)], no other test touches the environment concurrently
		unsafe {
			std::env::set_var("ZLUVOTEST_CSRF", "12345");
		}
		let source = EnvSource::new().with_prefix("ZLUVOTEST_");

		// Act
		let loaded = source.load().unwrap();

		// Assert
		assert_eq!(loaded.get("csrf"), Some(&Value::String("12345".into())));

		// SAFETY: see above
		unsafe {
			std::env::remove_var("ZLUVOTEST_CSRF");
		}
	}

	#[rstest]
	#[serial(env)]
	fn test_env_source_ignores_other_prefixes() {
		// SAFETY: guarded by #[serial(env)]
		unsafe {
			std::env::set_var("OTHERAPP_CSRF", "nope");
		}
		let loaded = EnvSource::new().with_prefix("ZLUVOTEST_").load().unwrap();
		assert!(!loaded.contains_key("csrf"));
		// SAFETY: guarded by #[serial(env)]
		unsafe {
			std::env::remove_var("OTHERAPP_CSRF");
		}
	}

	#[rstest]
	fn test_memory_source_priority() {
		let source = MemorySource::new().with_priority(75);
		assert_eq!(source.priority(), 75);
		assert!(source.load().unwrap().is_empty());
	}

	#[rstest]
	fn test_default_source_has_collector_url() {
		let loaded = DefaultSource::new().load().unwrap();
		assert_eq!(
			loaded.get("collector_url").and_then(|v| v.as_str()),
			Some("http://localhost:3000/api/record")
		);
	}
}
